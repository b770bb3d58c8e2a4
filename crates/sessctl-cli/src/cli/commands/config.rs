//! Config command handlers.

use anyhow::Result;
use sessctl_core::config::{Config, paths};

pub fn path() -> Result<()> {
    println!("{}", paths::config_path().display());
    Ok(())
}

pub fn init() -> Result<()> {
    let created = Config::init()?;
    let path = paths::config_path();
    if created {
        println!("✓ Created config at {}", path.display());
    } else {
        println!("Config already exists at {}", path.display());
    }
    Ok(())
}
