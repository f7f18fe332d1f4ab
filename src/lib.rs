//! Chess move legality: board state, piece movement rules and a headless
//! selection session for presentation layers.
//!
//! ```
//! use arbiter::chess::board::Board;
//! use arbiter::chess::core::Square;
//! use arbiter::chess::rules;
//!
//! let mut board = Board::starting();
//! let knight = board.at(Square::B1).unwrap();
//! assert!(rules::is_legal(&board, knight, Square::C3));
//! assert!(!rules::is_legal(&board, knight, Square::D2));
//! let _ = board.apply_move(knight, Square::C3);
//! ```

#![warn(missing_docs, variant_size_differences)]
// Rustc lints.
#![warn(
    absolute_paths_not_starting_with_crate,
    keyword_idents,
    macro_use_extern_crate,
    trivial_casts,
    trivial_numeric_casts,
    unreachable_pub,
    unused_extern_crates,
    unused_import_braces,
    unused_lifetimes,
    unused_qualifications,
    unused_results
)]
// Rustdoc lints.
#![warn(
    rustdoc::missing_crate_level_docs,
    rustdoc::broken_intra_doc_links,
    rustdoc::invalid_codeblock_attributes,
    rustdoc::invalid_html_tags,
    rustdoc::invalid_rust_codeblocks,
    rustdoc::bare_urls
)]
// Clippy lints.
#![warn(
    clippy::correctness,
    clippy::suspicious,
    clippy::style,
    clippy::complexity,
    clippy::pedantic,
    clippy::nursery,
    clippy::cargo
)]
#![deny(clippy::perf)]

pub mod chess;
pub mod session;

mod shell;
pub use shell::Shell;
use shadow_rs::shadow;

shadow!(build);

/// Crate version together with the Git revision it was built from.
fn version() -> String {
    format!(
        "{} (commit {}, branch {})",
        build::PKG_VERSION,
        build::SHORT_COMMIT,
        build::BRANCH
    )
}

/// Prints the version of the arbiter on startup.
pub fn print_engine_info() {
    println!("Arbiter chess rules engine {}", version());
}

/// Prints the build type and whether the build is clean on startup.
pub fn print_binary_info() {
    println!("Release build: {}", !shadow_rs::is_debug());
    if !shadow_rs::git_clean() {
        println!("Warning: built with uncommitted changes");
    }
    println!();
}
