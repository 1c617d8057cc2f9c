use crate::domain::model::Plan;
use crate::utils::error::Result;
use async_trait::async_trait;
use std::time::Duration;

pub trait Storage: Send + Sync {
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn catalog_endpoint(&self) -> &str;
    fn page_size(&self) -> usize;
    fn request_timeout(&self) -> Option<Duration>;
    fn extra_headers(&self) -> Vec<(String, String)>;
}

/// 方案目錄來源；每次呼叫都重新抓取，不做快取
#[async_trait]
pub trait CatalogSource: Send + Sync {
    async fn fetch_plans(&self) -> Result<Vec<Plan>>;
}
