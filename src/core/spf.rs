use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

static DOMAIN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9][a-zA-Z0-9-]{1,61}[a-zA-Z0-9]\.[a-zA-Z]{2,}$")
        .expect("domain pattern is a valid regex")
});

/// 表單的三態選項：未選 (`-`)、是、否
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Toggle {
    #[default]
    Unset,
    Yes,
    No,
}

impl Toggle {
    pub fn is_yes(&self) -> bool {
        matches!(self, Toggle::Yes)
    }
}

impl FromStr for Toggle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "-" | "" => Ok(Toggle::Unset),
            "yes" | "y" => Ok(Toggle::Yes),
            "no" | "n" => Ok(Toggle::No),
            other => Err(format!("expected '-', 'yes' or 'no', got '{}'", other)),
        }
    }
}

impl fmt::Display for Toggle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Toggle::Unset => write!(f, "-"),
            Toggle::Yes => write!(f, "yes"),
            Toggle::No => write!(f, "no"),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Strictness {
    #[default]
    Unset,
    Strict,
    Soft,
    Neutral,
}

impl Strictness {
    /// `all` 機制前的限定詞；未選或 Soft 皆為軟性失敗
    pub fn qualifier(&self) -> char {
        match self {
            Strictness::Strict => '-',
            Strictness::Neutral => '?',
            Strictness::Soft | Strictness::Unset => '~',
        }
    }
}

impl FromStr for Strictness {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "-" | "" => Ok(Strictness::Unset),
            "strict" | "fail" => Ok(Strictness::Strict),
            "soft" | "softfail" => Ok(Strictness::Soft),
            "neutral" => Ok(Strictness::Neutral),
            other => Err(format!(
                "expected one of '-', 'strict', 'soft', 'neutral', got '{}'",
                other
            )),
        }
    }
}

/// SPF 產生器的輸入；`Default` 即為重設後的表單狀態
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpfConfig {
    pub domain: String,
    pub allow_mx: Toggle,
    pub allow_ip: Toggle,
    pub allow_hostname: Toggle,
    /// 以空白分隔，例如 `10.0.0.1/32 192.168.0.1/28`
    pub ip_addresses: String,
    pub server_hostnames: String,
    pub relay_domains: String,
    pub strictness: Strictness,
}

pub fn is_valid_domain(domain: &str) -> bool {
    DOMAIN_RE.is_match(domain)
}

/// 產生 SPF TXT 記錄；網域不合法時回傳空字串
pub fn generate_spf_record(config: &SpfConfig) -> String {
    if !is_valid_domain(&config.domain) {
        tracing::debug!("Domain '{}' is not valid, SPF record left empty", config.domain);
        return String::new();
    }

    let mut terms = vec!["v=spf1".to_string()];

    if config.allow_mx.is_yes() {
        terms.push("mx".to_string());
    }
    if config.allow_ip.is_yes() || config.allow_hostname.is_yes() {
        terms.push("a".to_string());
    }

    terms.extend(
        config
            .ip_addresses
            .split_whitespace()
            .map(|ip| format!("ip4:{}", ip)),
    );
    terms.extend(
        config
            .server_hostnames
            .split_whitespace()
            .map(|host| format!("a:{}", host)),
    );
    terms.extend(
        config
            .relay_domains
            .split_whitespace()
            .map(|domain| format!("include:{}", domain)),
    );

    terms.push(format!("{}all", config.strictness.qualifier()));

    terms.join(" ")
}
