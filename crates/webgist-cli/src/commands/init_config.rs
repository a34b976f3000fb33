use anyhow::Result;

use webgist_core::AppConfig;

pub fn run() -> Result<()> {
    let path = AppConfig::config_path();

    if path.exists() {
        println!("Configuration already exists at {}", path.display());
        return Ok(());
    }

    AppConfig::default().save()?;
    println!("Wrote default configuration to {}", path.display());

    Ok(())
}
