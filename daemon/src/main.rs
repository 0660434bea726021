//! factcheck daemon: entry point for running the verification service.

use clap::Parser;
use factcheck_node::{ApiKey, FactcheckNode, ServiceConfig};
use factcheck_utils::LogFormat;
use std::net::IpAddr;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "factcheck-daemon", about = "Content verification service")]
struct Cli {
    /// Address to bind.
    #[arg(long, env = "FACTCHECK_HOST")]
    host: Option<IpAddr>,

    /// HTTP port.
    #[arg(long, env = "PORT")]
    port: Option<u16>,

    /// Directory holding reports.json.
    #[arg(long, env = "FACTCHECK_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Directory served for non-API GET requests.
    #[arg(long, env = "FACTCHECK_STATIC_DIR")]
    static_dir: Option<PathBuf>,

    /// Maximum number of reports retained.
    #[arg(long, env = "FACTCHECK_MAX_REPORTS")]
    max_reports: Option<usize>,

    /// Credential for the external verdict provider.
    #[arg(long, env = "GOOGLE_API_KEY", hide_env_values = true)]
    google_api_key: Option<String>,

    /// Base URL of the generative-language API.
    #[arg(long, env = "FACTCHECK_PROVIDER_URL")]
    provider_url: Option<String>,

    /// Provider model name.
    #[arg(long, env = "FACTCHECK_PROVIDER_MODEL")]
    provider_model: Option<String>,

    /// Provider request timeout in seconds.
    #[arg(long, env = "FACTCHECK_PROVIDER_TIMEOUT_SECS")]
    provider_timeout_secs: Option<u64>,

    /// Log format: "human" or "json".
    #[arg(long, env = "FACTCHECK_LOG_FORMAT")]
    log_format: Option<LogFormat>,

    /// Log level: "trace", "debug", "info", "warn", "error".
    #[arg(long, env = "FACTCHECK_LOG_LEVEL")]
    log_level: Option<String>,

    /// Enable the Prometheus metrics endpoint. The env var accepts
    /// true/false, 1/0, yes/no, on/off.
    #[arg(
        long,
        env = "FACTCHECK_ENABLE_METRICS",
        action = clap::ArgAction::SetTrue,
        value_parser = clap::builder::BoolishValueParser::new(),
    )]
    metrics: bool,

    /// Path to a TOML configuration file. If provided, file settings
    /// are used as the base; CLI flags and env vars override them.
    #[arg(long, env = "FACTCHECK_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(clap::Subcommand)]
enum Command {
    /// Start the service.
    #[command(name = "node")]
    Node {
        #[command(subcommand)]
        action: NodeAction,
    },
    /// Print the effective configuration as TOML (the API key is omitted).
    Config,
}

#[derive(clap::Subcommand)]
enum NodeAction {
    /// Run the service.
    Run,
}

impl Cli {
    fn into_config(self, base: ServiceConfig) -> ServiceConfig {
        ServiceConfig {
            host: self.host.unwrap_or(base.host),
            port: self.port.unwrap_or(base.port),
            data_dir: self.data_dir.unwrap_or(base.data_dir),
            static_dir: self.static_dir.unwrap_or(base.static_dir),
            max_reports: self.max_reports.unwrap_or(base.max_reports),
            google_api_key: self.google_api_key.map(ApiKey::new).or(base.google_api_key),
            provider_base_url: self.provider_url.unwrap_or(base.provider_base_url),
            provider_model: self.provider_model.unwrap_or(base.provider_model),
            provider_timeout_secs: self.provider_timeout_secs.or(base.provider_timeout_secs),
            log_format: self.log_format.unwrap_or(base.log_format),
            log_level: self.log_level.unwrap_or(base.log_level),
            enable_metrics: self.metrics || base.enable_metrics,
            ..base
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let mut cli = Cli::parse();

    let base = match &cli.config {
        Some(path) => ServiceConfig::from_toml_file(path)?,
        None => ServiceConfig::default(),
    };
    let from_file = cli.config.clone();
    // No subcommand means `node run`.
    let command = cli.command.take().unwrap_or(Command::Node {
        action: NodeAction::Run,
    });
    let config = cli.into_config(base);

    factcheck_utils::init_logging(config.log_format, &config.log_level);
    if let Some(path) = from_file {
        tracing::info!("Loaded config from {}", path.display());
    }

    match command {
        Command::Config => {
            print!("{}", config.to_toml_string()?);
        }
        Command::Node {
            action: NodeAction::Run,
        } => {
            tracing::info!(
                "Starting factcheck service on {} (data: {}, static: {}, metrics: {})",
                config.listen_addr(),
                config.data_dir.display(),
                config.static_dir.display(),
                if config.enable_metrics { "on" } else { "off" },
            );

            let node = FactcheckNode::new(config)?;
            node.run().await?;

            tracing::info!("factcheck daemon exited cleanly");
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::Mutex;

    const METRICS_ENV: &str = "FACTCHECK_ENABLE_METRICS";

    // Parsing reads process env vars, which one test below mutates.
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    #[test]
    fn metrics_env_accepts_common_spellings() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        for (value, expected) in [
            ("1", true),
            ("yes", true),
            ("on", true),
            ("true", true),
            ("0", false),
            ("off", false),
            ("false", false),
        ] {
            std::env::set_var(METRICS_ENV, value);
            let cli = Cli::try_parse_from(["factcheck-daemon"])
                .unwrap_or_else(|e| panic!("{METRICS_ENV}={value} rejected: {e}"));
            assert_eq!(cli.metrics, expected, "{METRICS_ENV}={value}");
        }
        std::env::set_var(METRICS_ENV, "maybe");
        assert!(Cli::try_parse_from(["factcheck-daemon"]).is_err());
        std::env::remove_var(METRICS_ENV);
    }

    #[test]
    fn cli_overrides_file_values() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let base = ServiceConfig::from_toml_str(
            r#"
                port = 7000
                max_reports = 25
                enable_metrics = true
                provider_model = "file-model"
            "#,
        )
        .unwrap();
        let cli = Cli::try_parse_from([
            "factcheck-daemon",
            "--port",
            "9000",
            "--provider-model",
            "cli-model",
            "node",
            "run",
        ])
        .unwrap();
        assert!(matches!(
            cli.command,
            Some(Command::Node {
                action: NodeAction::Run
            })
        ));

        let config = cli.into_config(base);
        assert_eq!(config.port, 9000);
        assert_eq!(config.provider_model, "cli-model");
        assert_eq!(config.max_reports, 25);
        assert!(config.enable_metrics);
    }

    #[test]
    fn config_subcommand_parses() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let cli = Cli::try_parse_from(["factcheck-daemon", "--port", "8081", "config"]).unwrap();
        assert!(matches!(cli.command, Some(Command::Config)));
    }
}
