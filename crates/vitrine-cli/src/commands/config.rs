use anyhow::Result;

use vitrine_sync::config::{config_file_path, ensure_config_file};
use vitrine_sync::SyncConfig;

/// Write a starter config file if none exists.
pub fn config_init() -> Result<()> {
    let created = ensure_config_file()?;
    let path = config_file_path();

    if created {
        println!("Created starter config at {}", path.display());
        println!("Fill in your bot credentials before running 'vitrine sync'.");
    } else {
        println!("Config already exists at {}", path.display());
    }

    Ok(())
}

/// Print the effective configuration with the password redacted.
pub fn config_show() -> Result<()> {
    let path = config_file_path();
    let config = SyncConfig::load()?;

    println!("Config file: {}", path.display());
    if !path.exists() {
        println!("  (not present; using environment and defaults)");
    }
    println!();
    println!("username:               {}", field(&config.username));
    println!("bot_username:           {}", field(&config.bot_username));
    println!(
        "bot_password:           {}",
        if config.bot_password.as_deref().is_some_and(|p| !p.is_empty()) {
            "(set)"
        } else {
            "(unset)"
        }
    );
    println!("sparql_endpoint:        {}", config.sparql_endpoint);
    println!("api_endpoint:           {}", config.api_endpoint);
    println!("user_agent:             {}", config.user_agent);
    println!("post_create_delay_secs: {}", config.post_create_delay_secs);
    println!("language:               {}", config.language);

    Ok(())
}

fn field(value: &Option<String>) -> &str {
    value.as_deref().filter(|v| !v.is_empty()).unwrap_or("(unset)")
}
