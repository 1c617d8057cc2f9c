use crate::domain::model::Plan;
use crate::domain::ports::{CatalogSource, ConfigProvider};
use crate::utils::error::{Result, ToolkitError};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

pub const DEFAULT_CATALOG_ENDPOINT: &str = "https://blog.stablecluster.com/data";
pub const DEFAULT_PAGE_SIZE: usize = 40;

/// 方案目錄的 GraphQL 查詢，只有筆數可調整
pub fn hostings_query(page_size: usize) -> String {
    format!(
        r#"
  query {{
    hostings(first: {}) {{
      edges {{
        node {{
          id
          title
          hostingDetails {{
            plan {{
              nodes {{
                name
              }}
            }}
            price
            link
          }}
        }}
      }}
    }}
  }}
"#,
        page_size
    )
}

#[derive(Debug, Deserialize)]
struct GraphqlResponse {
    data: Option<HostingsData>,
    #[serde(default)]
    errors: Vec<GraphqlError>,
}

#[derive(Debug, Deserialize)]
struct GraphqlError {
    message: String,
}

#[derive(Debug, Deserialize)]
struct HostingsData {
    hostings: HostingConnection,
}

#[derive(Debug, Deserialize)]
struct HostingConnection {
    edges: Vec<HostingEdge>,
}

#[derive(Debug, Deserialize)]
struct HostingEdge {
    node: HostingNode,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct HostingNode {
    id: String,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    hosting_details: Option<HostingDetails>,
}

#[derive(Debug, Deserialize)]
struct HostingDetails {
    price: Option<f64>,
    plan: Option<PlanConnection>,
    link: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PlanConnection {
    #[serde(default)]
    nodes: Vec<PlanNode>,
}

#[derive(Debug, Deserialize)]
struct PlanNode {
    name: Option<String>,
}

impl HostingNode {
    /// 缺少標題、方案細節或價格的節點略過，不影響同頁其他方案
    fn into_plan(self) -> Option<Plan> {
        let Some(title) = self.title else {
            tracing::warn!("⚠️ Skipping hosting '{}' without a title", self.id);
            return None;
        };
        let Some(details) = self.hosting_details else {
            tracing::warn!("⚠️ Skipping hosting '{}' without hosting details", title);
            return None;
        };
        let Some(price) = details.price else {
            tracing::warn!("⚠️ Skipping hosting '{}' without a price", title);
            return None;
        };

        let tags = details
            .plan
            .map(|p| p.nodes.into_iter().filter_map(|n| n.name).collect())
            .unwrap_or_default();

        Some(Plan {
            id: self.id,
            title,
            price,
            tags,
            link: details.link.unwrap_or_default(),
        })
    }
}

pub fn parse_catalog_response(body: &[u8]) -> Result<Vec<Plan>> {
    let response: GraphqlResponse = serde_json::from_slice(body)?;

    if !response.errors.is_empty() {
        let messages: Vec<&str> = response.errors.iter().map(|e| e.message.as_str()).collect();
        return Err(ToolkitError::CatalogError {
            message: messages.join("; "),
        });
    }

    let data = response.data.ok_or_else(|| ToolkitError::CatalogError {
        message: "Response has no data section".to_string(),
    })?;

    Ok(data
        .hostings
        .edges
        .into_iter()
        .filter_map(|edge| edge.node.into_plan())
        .collect())
}

/// 透過 HTTP POST 送出 GraphQL 查詢的方案目錄
pub struct GraphqlCatalog<C: ConfigProvider> {
    config: C,
    client: Client,
}

impl<C: ConfigProvider> GraphqlCatalog<C> {
    pub fn new(config: C) -> Self {
        Self {
            config,
            client: Client::new(),
        }
    }
}

#[async_trait]
impl<C: ConfigProvider> CatalogSource for GraphqlCatalog<C> {
    async fn fetch_plans(&self) -> Result<Vec<Plan>> {
        let endpoint = self.config.catalog_endpoint();
        tracing::info!("🚀 Fetching plan catalog from: {}", endpoint);

        let body = serde_json::json!({ "query": hostings_query(self.config.page_size()) });
        let mut request = self.client.post(endpoint).json(&body);

        // 添加自定義標頭
        for (key, value) in self.config.extra_headers() {
            request = request.header(key, value);
        }

        // 設定超時
        if let Some(timeout) = self.config.request_timeout() {
            request = request.timeout(timeout);
        }

        let response = request.send().await?;
        tracing::debug!("Catalog response status: {}", response.status());

        let bytes = response.error_for_status()?.bytes().await?;
        let plans = parse_catalog_response(&bytes)?;

        tracing::info!("✅ Catalog returned {} plans", plans.len());
        Ok(plans)
    }
}
