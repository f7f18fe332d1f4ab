//! Captures the version of the crate, the Git revision it was built from and
//! the build profile. The binary prints this information on startup.

fn main() -> shadow_rs::SdResult<()> {
    shadow_rs::new()
}
