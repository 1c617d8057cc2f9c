use crate::utils::error::Result;
use crate::utils::validation::{validate_non_empty_string, Validate};
use serde::{Deserialize, Serialize};

/// 目錄中的單一主機方案快照
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plan {
    pub id: String,
    pub title: String,
    pub price: f64,
    pub tags: Vec<String>,
    pub link: String,
}

impl Plan {
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}

/// 使用者一次送出的選擇：專案類型、流量區間、預算區間
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    pub project_type: String,
    pub traffic: String,
    pub budget: String,
}

impl Selection {
    pub fn new(
        project_type: impl Into<String>,
        traffic: impl Into<String>,
        budget: impl Into<String>,
    ) -> Self {
        Self {
            project_type: project_type.into(),
            traffic: traffic.into(),
            budget: budget.into(),
        }
    }
}

impl Validate for Selection {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("project type", &self.project_type)?;
        validate_non_empty_string("traffic range", &self.traffic)?;
        validate_non_empty_string("budget range", &self.budget)?;
        Ok(())
    }
}
