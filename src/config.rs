use std::path::PathBuf;
use std::time::Duration;

use clap::Args;
use tracing_subscriber::EnvFilter;

/// Runtime settings, taken from flags with environment fallbacks
#[derive(Debug, Clone, Args)]
pub struct Config {
    /// Base URL of the lead service
    #[arg(
        long,
        global = true,
        env = "PROPERTY_LEAD_BASE_URL",
        default_value = "http://localhost:8080"
    )]
    pub base_url: String,

    /// Directory holding the local draft store
    #[arg(
        long,
        global = true,
        env = "PROPERTY_LEAD_DATA_DIR",
        default_value = ".property-lead"
    )]
    pub data_dir: PathBuf,

    /// Request timeout for lead submission, in seconds
    #[arg(long, global = true, env = "PROPERTY_LEAD_TIMEOUT_SECS", default_value_t = 30)]
    pub timeout_secs: u64,

    /// Log filter used when RUST_LOG is not set
    #[arg(long, global = true, env = "PROPERTY_LEAD_LOG", default_value = "info")]
    pub log_level: String,
}

impl Config {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// `RUST_LOG` wins over `--log-level`
    pub fn env_filter(&self) -> EnvFilter {
        EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(&self.log_level))
            .unwrap_or_else(|_| EnvFilter::new("info"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct TestCli {
        #[command(flatten)]
        config: Config,
    }

    #[test]
    fn flags_override_defaults() {
        let cli = TestCli::try_parse_from([
            "property-lead",
            "--base-url",
            "https://leads.example.com",
            "--timeout-secs",
            "5",
        ])
        .unwrap();

        assert_eq!(cli.config.base_url, "https://leads.example.com");
        assert_eq!(cli.config.timeout(), Duration::from_secs(5));
    }
}
