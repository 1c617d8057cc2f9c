use crate::adapters::http::{DEFAULT_CATALOG_ENDPOINT, DEFAULT_PAGE_SIZE};
use crate::domain::bucket::{BucketFamily, BucketTable};
use crate::domain::ports::ConfigProvider;
use crate::utils::error::{Result, ToolkitError};
use crate::utils::validation::Validate;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::sync::LazyLock;
use std::time::Duration;

pub const DEFAULT_CONFIG_FILE: &str = "hosting-toolkit.toml";

static ENV_VAR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{([^}]+)\}").expect("env var pattern is a valid regex"));

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub buckets: BucketsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    pub page_size: Option<usize>,
    pub timeout_seconds: Option<u64>,
    pub headers: Option<HashMap<String, String>>,
}

fn default_endpoint() -> String {
    DEFAULT_CATALOG_ENDPOINT.to_string()
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            page_size: None,
            timeout_seconds: None,
            headers: None,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BucketsConfig {
    pub traffic: Option<Vec<String>>,
    pub budget: Option<Vec<String>>,
}

impl AppConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(ToolkitError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| ToolkitError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${CATALOG_API_KEY})，未設定者保留原樣
    fn substitute_env_vars(content: &str) -> String {
        ENV_VAR_RE
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .to_string()
    }

    pub fn traffic_table(&self) -> Result<BucketTable> {
        match &self.buckets.traffic {
            Some(labels) => BucketTable::from_labels(BucketFamily::Traffic, labels.as_slice()),
            None => Ok(BucketTable::default_traffic()),
        }
    }

    pub fn budget_table(&self) -> Result<BucketTable> {
        match &self.buckets.budget {
            Some(labels) => BucketTable::from_labels(BucketFamily::Budget, labels.as_slice()),
            None => Ok(BucketTable::default_budget()),
        }
    }

    /// 驗證配置的合理性
    pub fn validate_config(&self) -> Result<()> {
        crate::utils::validation::validate_url("catalog.endpoint", &self.catalog.endpoint)?;

        if let Some(page_size) = self.catalog.page_size {
            crate::utils::validation::validate_positive_number("catalog.page_size", page_size, 1)?;
        }

        if self.catalog.timeout_seconds == Some(0) {
            return Err(ToolkitError::InvalidConfigValueError {
                field: "catalog.timeout_seconds".to_string(),
                value: "0".to_string(),
                reason: "Timeout must be at least 1 second".to_string(),
            });
        }

        self.traffic_table()?;
        self.budget_table()?;

        Ok(())
    }
}

impl ConfigProvider for AppConfig {
    fn catalog_endpoint(&self) -> &str {
        &self.catalog.endpoint
    }

    fn page_size(&self) -> usize {
        self.catalog.page_size.unwrap_or(DEFAULT_PAGE_SIZE)
    }

    fn request_timeout(&self) -> Option<Duration> {
        self.catalog.timeout_seconds.map(Duration::from_secs)
    }

    fn extra_headers(&self) -> Vec<(String, String)> {
        self.catalog
            .headers
            .as_ref()
            .map(|headers| {
                headers
                    .iter()
                    .map(|(k, v)| (k.clone(), v.clone()))
                    .collect()
            })
            .unwrap_or_default()
    }
}

impl Validate for AppConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
