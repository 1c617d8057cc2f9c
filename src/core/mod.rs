pub mod plan_selector;
pub mod project_types;
pub mod recommender;
pub mod spf;
pub mod utm;

pub use crate::domain::model::{Plan, Selection};
pub use crate::domain::ports::{CatalogSource, ConfigProvider, Storage};
pub use crate::utils::error::Result;
