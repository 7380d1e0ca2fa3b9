//! Configuration commands.

use console::style;

use intake::config::Config;

use crate::cli::icons::dim_arrow;

/// Print the effective configuration, environment overrides included.
pub fn cmd_config_show(config: &Config) -> anyhow::Result<()> {
    let source = config
        .source_path
        .as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "built-in defaults".to_string());

    eprintln!("{} {} {}", dim_arrow(), style("Source:").dim(), source);
    print!("{}", config.to_toml()?);
    Ok(())
}
