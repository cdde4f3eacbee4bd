//! Init command implementation

use anyhow::Result;
use std::path::Path;

use studyxp::config::Config;

/// Write a default config file
pub fn init_command(path: &Path, force: bool) -> Result<()> {
    if Config::init(path, force)? {
        println!("Wrote {}", path.display());
    } else {
        println!(
            "Config already exists at {} (use --force to overwrite)",
            path.display()
        );
    }
    Ok(())
}
