use std::io;

use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();
    arbiter::print_engine_info();
    arbiter::print_binary_info();
    arbiter::Shell::new(io::stdin().lock(), io::stdout().lock()).run()
}
