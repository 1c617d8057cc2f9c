pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::{GraphqlCatalog, LocalStorage};
pub use config::AppConfig;
pub use crate::core::plan_selector::{PlanSelector, SelectionRule};
pub use crate::core::recommender::{Recommendation, Recommender};
pub use crate::core::spf::{generate_spf_record, SpfConfig, Strictness, Toggle};
pub use crate::core::utm::{build_utm_url, UtmParams};
pub use domain::bucket::{Bucket, BucketFamily, BucketTable};
pub use domain::model::{Plan, Selection};
pub use utils::error::{Result, ToolkitError};
