use crate::utils::error::{Result, ToolkitError};
use crate::utils::validation::validate_unique_labels;
use serde::Serialize;
use std::fmt;

pub const DEFAULT_TRAFFIC_BUCKETS: &[&str] = &["1k-5k", "6k-10k", "11k-20k", "21k-60k"];
pub const DEFAULT_BUDGET_BUCKETS: &[&str] = &["250-2k", "1.9k-4k", "3.9k-8k", "7.9k-16k"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BucketFamily {
    Traffic,
    Budget,
}

impl fmt::Display for BucketFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BucketFamily::Traffic => write!(f, "traffic"),
            BucketFamily::Budget => write!(f, "budget"),
        }
    }
}

/// 具名的數值區間，上下界皆包含；標籤本身即為區間來源，例如 `1.9k-4k`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Bucket {
    pub label: String,
    pub min: u64,
    pub max: u64,
}

impl Bucket {
    pub fn parse(label: &str) -> Result<Self> {
        let invalid = |reason: &str| ToolkitError::InvalidConfigValueError {
            field: "bucket".to_string(),
            value: label.to_string(),
            reason: reason.to_string(),
        };

        let (low, high) = label
            .split_once('-')
            .ok_or_else(|| invalid("Expected '<min>-<max>'"))?;
        let min = parse_amount(low).ok_or_else(|| invalid("Unparseable lower bound"))?;
        let max = parse_amount(high).ok_or_else(|| invalid("Unparseable upper bound"))?;

        if min > max {
            return Err(invalid("Lower bound exceeds upper bound"));
        }

        Ok(Self {
            label: label.to_string(),
            min,
            max,
        })
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min as f64 && value <= self.max as f64
    }
}

/// 解析 `250`、`5k`、`1.9k` 這類數量；`k` 代表乘以 1000，小數最多三位且只能搭配 `k`
fn parse_amount(raw: &str) -> Option<u64> {
    let raw = raw.trim();
    let (number, multiplier) = match raw.strip_suffix('k').or_else(|| raw.strip_suffix('K')) {
        Some(number) => (number, 1000u64),
        None => (raw, 1u64),
    };

    let (whole, fraction) = match number.split_once('.') {
        Some((_, "")) => return None,
        Some((whole, fraction)) => (whole, fraction),
        None => (number, ""),
    };

    if whole.is_empty() || !whole.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if !fraction.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if !fraction.is_empty() && (multiplier == 1 || fraction.len() > 3) {
        return None;
    }

    let whole_value = whole.parse::<u64>().ok()?.checked_mul(multiplier)?;
    let fraction_value = if fraction.is_empty() {
        0
    } else {
        let digits = fraction.parse::<u64>().ok()?;
        digits * 10u64.pow(3 - fraction.len() as u32)
    };

    whole_value.checked_add(fraction_value)
}

/// 一個家族（流量或預算）的有序區間表，第一筆即為最低區間
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BucketTable {
    family: BucketFamily,
    buckets: Vec<Bucket>,
}

impl BucketTable {
    pub fn from_labels<S: AsRef<str>>(family: BucketFamily, labels: &[S]) -> Result<Self> {
        let field = format!("buckets.{}", family);

        if labels.is_empty() {
            return Err(ToolkitError::ConfigValidationError {
                field,
                message: "At least one bucket must be defined".to_string(),
            });
        }

        let label_refs: Vec<&str> = labels.iter().map(|l| l.as_ref()).collect();
        validate_unique_labels(&field, &label_refs)?;

        let buckets = label_refs
            .iter()
            .map(|label| Bucket::parse(label))
            .collect::<Result<Vec<_>>>()?;

        if let Some(pair) = buckets.windows(2).find(|pair| pair[1].max <= pair[0].max) {
            return Err(ToolkitError::ConfigValidationError {
                field,
                message: format!(
                    "Buckets must be ordered by ascending upper bound ('{}' follows '{}')",
                    pair[1].label, pair[0].label
                ),
            });
        }

        Ok(Self { family, buckets })
    }

    pub fn default_traffic() -> Self {
        Self::from_static(BucketFamily::Traffic, DEFAULT_TRAFFIC_BUCKETS)
    }

    pub fn default_budget() -> Self {
        Self::from_static(BucketFamily::Budget, DEFAULT_BUDGET_BUCKETS)
    }

    fn from_static(family: BucketFamily, labels: &[&str]) -> Self {
        let buckets = labels
            .iter()
            .filter_map(|label| Bucket::parse(label).ok())
            .collect();
        Self { family, buckets }
    }

    pub fn family(&self) -> BucketFamily {
        self.family
    }

    pub fn buckets(&self) -> &[Bucket] {
        &self.buckets
    }

    pub fn find(&self, label: &str) -> Result<&Bucket> {
        self.buckets
            .iter()
            .find(|b| b.label == label)
            .ok_or_else(|| ToolkitError::UnknownBucket {
                family: self.family.to_string(),
                label: label.to_string(),
            })
    }

    pub fn is_lowest(&self, bucket: &Bucket) -> bool {
        self.buckets.first().is_some_and(|first| first == bucket)
    }

    pub fn labels(&self) -> Vec<&str> {
        self.buckets.iter().map(|b| b.label.as_str()).collect()
    }
}
