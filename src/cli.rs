use clap::Parser;

/// voxd: voice-assistant backend with intent dispatch and LLM fallback
#[derive(Parser, Debug, Clone)]
#[command(name = "voxd")]
#[command(version)]
#[command(about = "Voice-assistant backend with intent dispatch and LLM fallback", long_about = None)]
pub struct Cli {
    /// Address to listen on. Overrides the config file.
    #[arg(long, value_name = "ADDR")]
    pub listen: Option<String>,

    /// Path to config.toml. Defaults to the platform config directory.
    #[arg(short = 'c', long, value_name = "FILE")]
    pub config: Option<std::path::PathBuf>,

    /// API key for Google Gemini (the AI fallback).
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
    pub gemini_api_key: Option<String>,

    /// API key for OpenWeatherMap.
    #[arg(long, env = "OPENWEATHER_API_KEY", hide_env_values = true)]
    pub openweather_api_key: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::parse_from(["voxd"]);
        assert!(cli.listen.is_none());
        assert!(cli.config.is_none());
        assert_eq!(cli.log_level, "info");
    }

    #[test]
    fn test_listen_flag() {
        let cli = Cli::parse_from(["voxd", "--listen", "0.0.0.0:8080"]);
        assert_eq!(cli.listen.as_deref(), Some("0.0.0.0:8080"));
    }

    #[test]
    fn test_api_key_flags() {
        let cli = Cli::parse_from(["voxd", "--gemini-api-key", "test-key"]);
        assert_eq!(cli.gemini_api_key, Some("test-key".to_string()));
    }

    #[test]
    fn test_config_path_flag() {
        let cli = Cli::parse_from(["voxd", "-c", "/tmp/voxd.toml"]);
        assert_eq!(cli.config, Some(std::path::PathBuf::from("/tmp/voxd.toml")));
    }
}
