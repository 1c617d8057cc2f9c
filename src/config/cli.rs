use crate::config::toml_config::{AppConfig, DEFAULT_CONFIG_FILE};
use crate::core::spf::{SpfConfig, Strictness, Toggle};
use crate::core::utm::UtmParams;
use crate::domain::model::Selection;
use crate::utils::error::Result;
use crate::utils::validation::Validate;
use clap::{Args, Parser, Subcommand};
use std::path::Path;

#[derive(Debug, Clone, Parser)]
#[command(name = "hosting-toolkit")]
#[command(about = "Hosting plan recommender, SPF record generator and UTM link builder")]
pub struct CliConfig {
    /// Path to TOML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Override the catalog endpoint from config
    #[arg(long, global = true)]
    pub endpoint: Option<String>,

    /// Override the catalog page size from config
    #[arg(long, global = true)]
    pub page_size: Option<usize>,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Emit logs as JSON")]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Recommend a hosting plan for a project type, traffic range and budget range
    Recommend(RecommendArgs),
    /// List the project types offered by the catalog
    ProjectTypes {
        #[arg(long)]
        json: bool,

        /// Also write the listing to this file
        #[arg(short, long)]
        output: Option<String>,
    },
    /// List the traffic and budget ranges
    Buckets,
    /// Generate an SPF TXT record
    Spf(SpfArgs),
    /// Build a UTM tracking URL
    Utm(UtmArgs),
}

#[derive(Debug, Clone, Args)]
pub struct RecommendArgs {
    /// Catalog tag of the project type, e.g. "Node Hosting"
    #[arg(long)]
    pub project_type: String,

    /// Traffic range label, e.g. "1k-5k"
    #[arg(long)]
    pub traffic: String,

    /// Monthly budget range label, e.g. "250-2k"
    #[arg(long)]
    pub budget: String,

    #[arg(long)]
    pub json: bool,

    /// Also write the result to this file
    #[arg(short, long)]
    pub output: Option<String>,
}

impl RecommendArgs {
    pub fn selection(&self) -> Selection {
        Selection::new(&self.project_type, &self.traffic, &self.budget)
    }
}

#[derive(Debug, Clone, Args)]
pub struct SpfArgs {
    #[arg(long)]
    pub domain: String,

    /// Allow servers listed as MX to send email (-, yes, no)
    #[arg(long, default_value = "-")]
    pub allow_mx: Toggle,

    /// Allow the current IP address of the domain (-, yes, no)
    #[arg(long, default_value = "-")]
    pub allow_ip: Toggle,

    /// Allow any hostname ending in the domain (-, yes, no)
    #[arg(long, default_value = "-")]
    pub allow_hostname: Toggle,

    /// IPv4 addresses or CIDR ranges, e.g. 10.0.0.1/32 192.168.0.1/28
    #[arg(long = "ip", num_args = 1..)]
    pub ip_addresses: Vec<String>,

    #[arg(long = "host", num_args = 1..)]
    pub server_hostnames: Vec<String>,

    /// Domains that relay or send mail on behalf of this one
    #[arg(long = "include", num_args = 1..)]
    pub relay_domains: Vec<String>,

    /// -, strict, soft or neutral
    #[arg(long, default_value = "-")]
    pub strictness: Strictness,

    #[arg(short, long)]
    pub output: Option<String>,
}

impl SpfArgs {
    pub fn to_config(&self) -> SpfConfig {
        SpfConfig {
            domain: self.domain.clone(),
            allow_mx: self.allow_mx,
            allow_ip: self.allow_ip,
            allow_hostname: self.allow_hostname,
            ip_addresses: self.ip_addresses.join(" "),
            server_hostnames: self.server_hostnames.join(" "),
            relay_domains: self.relay_domains.join(" "),
            strictness: self.strictness,
        }
    }
}

#[derive(Debug, Clone, Args)]
pub struct UtmArgs {
    /// Website URL, e.g. https://example.com
    #[arg(long)]
    pub url: Option<String>,

    /// Referrer: google, facebook
    #[arg(long)]
    pub source: Option<String>,

    /// Marketing medium: cpc, banner, email, social
    #[arg(long)]
    pub medium: Option<String>,

    #[arg(long)]
    pub campaign: Option<String>,

    #[arg(long)]
    pub term: Option<String>,

    #[arg(long)]
    pub content: Option<String>,

    #[arg(short, long)]
    pub output: Option<String>,
}

impl UtmArgs {
    pub fn to_params(&self) -> UtmParams {
        UtmParams {
            url: self.url.clone().unwrap_or_default(),
            source: self.source.clone().unwrap_or_default(),
            medium: self.medium.clone().unwrap_or_default(),
            campaign: self.campaign.clone().unwrap_or_default(),
            term: self.term.clone().unwrap_or_default(),
            content: self.content.clone().unwrap_or_default(),
        }
    }
}

impl CliConfig {
    /// 載入 TOML 配置並套用命令列覆蓋設定；預設檔案不存在時使用內建預設值
    pub fn load_app_config(&self) -> Result<AppConfig> {
        let mut config = match &self.config {
            Some(path) => {
                tracing::info!("📁 Loading configuration from: {}", path);
                AppConfig::from_file(path)?
            }
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
                tracing::info!("📁 Loading configuration from: {}", DEFAULT_CONFIG_FILE);
                AppConfig::from_file(DEFAULT_CONFIG_FILE)?
            }
            None => {
                tracing::debug!("No configuration file, using built-in defaults");
                AppConfig::default()
            }
        };

        if let Some(endpoint) = &self.endpoint {
            config.catalog.endpoint = endpoint.clone();
            tracing::info!("🔧 Catalog endpoint overridden to: {}", endpoint);
        }
        if let Some(page_size) = self.page_size {
            config.catalog.page_size = Some(page_size);
            tracing::info!("🔧 Page size overridden to: {}", page_size);
        }

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::ConfigProvider;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_spf_command() {
        let cli = CliConfig::parse_from([
            "hosting-toolkit",
            "spf",
            "--domain",
            "example.com",
            "--allow-mx",
            "yes",
            "--ip",
            "10.0.0.1/32",
            "192.168.0.1/28",
            "--strictness",
            "strict",
        ]);

        let Command::Spf(args) = cli.command else {
            panic!("expected spf command");
        };
        let config = args.to_config();
        assert_eq!(config.allow_mx, Toggle::Yes);
        assert_eq!(config.allow_ip, Toggle::Unset);
        assert_eq!(config.ip_addresses, "10.0.0.1/32 192.168.0.1/28");
        assert_eq!(config.strictness, Strictness::Strict);
    }

    #[test]
    fn test_parse_utm_command() {
        let cli = CliConfig::parse_from([
            "hosting-toolkit",
            "utm",
            "--url",
            "https://example.com",
            "--source",
            "google",
        ]);

        let Command::Utm(args) = cli.command else {
            panic!("expected utm command");
        };
        let params = args.to_params();
        assert_eq!(params.url, "https://example.com");
        assert_eq!(params.source, "google");
        assert!(params.medium.is_empty());
    }

    #[test]
    fn test_parse_project_types_output() {
        let cli = CliConfig::parse_from([
            "hosting-toolkit",
            "project-types",
            "--json",
            "-o",
            "out/types.json",
        ]);

        let Command::ProjectTypes { json, output } = cli.command else {
            panic!("expected project-types command");
        };
        assert!(json);
        assert_eq!(output.as_deref(), Some("out/types.json"));

        let cli = CliConfig::parse_from(["hosting-toolkit", "project-types"]);
        assert!(matches!(
            cli.command,
            Command::ProjectTypes { json: false, output: None }
        ));
    }

    #[test]
    fn test_rejects_unknown_toggle() {
        let result = CliConfig::try_parse_from([
            "hosting-toolkit",
            "spf",
            "--domain",
            "example.com",
            "--allow-mx",
            "maybe",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_overrides_applied_over_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[catalog]\nendpoint = \"https://file.example.com/data\"\npage_size = 5\n")
            .unwrap();

        let cli = CliConfig::parse_from([
            "hosting-toolkit",
            "--config",
            temp_file.path().to_str().unwrap(),
            "--page-size",
            "12",
            "buckets",
        ]);

        let config = cli.load_app_config().unwrap();
        assert_eq!(config.catalog_endpoint(), "https://file.example.com/data");
        assert_eq!(config.page_size(), 12);
    }

    #[test]
    fn test_missing_explicit_config_is_error() {
        let cli = CliConfig::parse_from([
            "hosting-toolkit",
            "--config",
            "/definitely/not/here.toml",
            "buckets",
        ]);
        assert!(cli.load_app_config().is_err());
    }
}
