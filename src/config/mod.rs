pub mod toml_config;

pub use toml_config::SiteConfig;

#[cfg(feature = "cli")]
use clap::Parser;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "consult-site")]
#[command(about = "API server for the consultancy website")]
pub struct CliConfig {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "site-config.toml")]
    pub config: String,

    /// Override server.bind from the config file
    #[arg(long)]
    pub bind: Option<String>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub json_logs: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    /// Loads the TOML file and applies command-line overrides.
    pub fn load_site_config(&self) -> crate::utils::error::Result<SiteConfig> {
        let mut config = SiteConfig::from_file(&self.config)?;
        if let Some(bind) = &self.bind {
            config.server.bind = bind.clone();
        }
        Ok(config)
    }
}
