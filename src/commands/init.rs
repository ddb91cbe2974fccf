//! Init command: write a default config file.

use anyhow::{bail, Result};
use console::style;

use crate::config::{Config, CONFIG_FILE};

/// Options for the init command
#[derive(Debug, Clone)]
pub struct InitOptions {
    /// Overwrite an existing config file
    pub force: bool,
}

/// Execute the init command
pub fn execute_init(options: InitOptions) -> Result<()> {
    let path = std::path::Path::new(CONFIG_FILE);

    if path.exists() && !options.force {
        bail!("{} already exists (use --force to overwrite)", CONFIG_FILE);
    }

    Config::default().save(path)?;
    println!("{} Wrote {}", style("✓").green(), CONFIG_FILE);

    Ok(())
}
