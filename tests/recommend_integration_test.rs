use hosting_toolkit::{
    AppConfig, GraphqlCatalog, Recommender, Selection, SelectionRule, ToolkitError,
};
use httpmock::prelude::*;

fn hosting(id: &str, title: &str, price: f64, tags: &[&str]) -> serde_json::Value {
    let nodes: Vec<serde_json::Value> = tags
        .iter()
        .map(|t| serde_json::json!({ "name": t }))
        .collect();
    serde_json::json!({
        "node": {
            "id": id,
            "title": title,
            "hostingDetails": {
                "plan": { "nodes": nodes },
                "price": price,
                "link": format!("https://stablecluster.com/buy/{}", id)
            }
        }
    })
}

/// 價格刻意打亂，驗證推薦前會先排序
fn catalog_body() -> serde_json::Value {
    serde_json::json!({
        "data": {
            "hostings": {
                "edges": [
                    hosting("n4", "Node Enterprise", 14000.0, &["Node Hosting"]),
                    hosting("b1", "Blog Lite", 260.0, &["Blog Hosting"]),
                    hosting("n1", "Node Starter", 450.0, &["Node Hosting"]),
                    hosting("n3", "Node Business", 6500.0, &["Node Hosting"]),
                    hosting("n2", "Node Growth", 2100.0, &["Node Hosting", "Python Hosting"]),
                    hosting("v1", "Bare VPS", 999.0, &["VPS"])
                ]
            }
        }
    })
}

fn config_for(server: &MockServer, buckets: &str) -> AppConfig {
    let toml_content = format!(
        r#"
[catalog]
endpoint = "{}"
page_size = 40
timeout_seconds = 5

{}
"#,
        server.url("/data"),
        buckets
    );
    AppConfig::from_toml_str(&toml_content).unwrap()
}

fn recommender_for(config: AppConfig) -> Recommender<GraphqlCatalog<AppConfig>> {
    Recommender::new(
        GraphqlCatalog::new(config.clone()),
        config.traffic_table().unwrap(),
        config.budget_table().unwrap(),
    )
}

#[tokio::test]
async fn test_entry_level_recommends_cheapest() {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(POST).path("/data").body_contains("hostings(first: 40)");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(catalog_body());
    });

    let recommender = recommender_for(config_for(&server, ""));
    let result = recommender
        .recommend(&Selection::new("Node Hosting", "1k-5k", "250-2k"))
        .await
        .unwrap();

    api_mock.assert();
    assert_eq!(result.rule, SelectionRule::EntryLevel);
    assert_eq!(result.candidate_count, 4);
    assert_eq!(result.plan.unwrap().id, "n1");
}

#[tokio::test]
async fn test_traffic_over_budget_recommends_most_expensive() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/data");
        then.status(200).json_body(catalog_body());
    });

    let recommender = recommender_for(config_for(&server, ""));
    let result = recommender
        .recommend(&Selection::new("Node Hosting", "21k-60k", "250-2k"))
        .await
        .unwrap();

    assert_eq!(result.rule, SelectionRule::TrafficExceedsBudget);
    assert_eq!(result.plan.unwrap().id, "n4");
}

#[tokio::test]
async fn test_budget_over_traffic_recommends_middle() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/data");
        then.status(200).json_body(catalog_body());
    });

    let recommender = recommender_for(config_for(&server, ""));
    let result = recommender
        .recommend(&Selection::new("Node Hosting", "1k-5k", "7.9k-16k"))
        .await
        .unwrap();

    // 4 筆候選 (450, 2100, 6500, 14000)，floor(4/2) = 2
    assert_eq!(result.rule, SelectionRule::BudgetExceedsTraffic);
    assert_eq!(result.plan.unwrap().id, "n3");
}

#[tokio::test]
async fn test_equal_maxima_with_custom_buckets() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/data");
        then.status(200).json_body(catalog_body());
    });

    let buckets = r#"
[buckets]
traffic = ["1k-4k", "4k-8k"]
budget = ["250-2k", "1.9k-8k"]
"#;
    let recommender = recommender_for(config_for(&server, buckets));

    let result = recommender
        .recommend(&Selection::new("Node Hosting", "4k-8k", "1.9k-8k"))
        .await
        .unwrap();
    assert_eq!(result.rule, SelectionRule::BudgetMatched);
    assert_eq!(result.plan.unwrap().id, "n2");

    let result = recommender
        .recommend(&Selection::new("Blog Hosting", "4k-8k", "1.9k-8k"))
        .await
        .unwrap();
    assert_eq!(result.rule, SelectionRule::BudgetMatched);
    assert!(result.plan.is_none());
}

#[tokio::test]
async fn test_no_plan_carries_project_type() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/data");
        then.status(200).json_body(catalog_body());
    });

    let recommender = recommender_for(config_for(&server, ""));
    let result = recommender
        .recommend(&Selection::new("Woocommerce Hosting", "1k-5k", "250-2k"))
        .await
        .unwrap();

    assert_eq!(result.candidate_count, 0);
    assert!(result.plan.is_none());
}

#[tokio::test]
async fn test_unknown_bucket_does_not_hit_catalog() {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(POST).path("/data");
        then.status(200).json_body(catalog_body());
    });

    let recommender = recommender_for(config_for(&server, ""));
    let err = recommender
        .recommend(&Selection::new("Node Hosting", "1k-5k", "0-100"))
        .await
        .unwrap_err();

    api_mock.assert_hits(0);
    assert!(matches!(err, ToolkitError::UnknownBucket { .. }));
}

#[tokio::test]
async fn test_catalog_failure_is_reported() {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(POST).path("/data");
        then.status(502);
    });

    let recommender = recommender_for(config_for(&server, ""));
    let err = recommender
        .recommend(&Selection::new("Node Hosting", "1k-5k", "250-2k"))
        .await
        .unwrap_err();

    api_mock.assert();
    assert!(matches!(err, ToolkitError::ApiError(_)));
    assert_eq!(err.severity().exit_code(), 2);
}

#[tokio::test]
async fn test_project_types_from_catalog() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/data");
        then.status(200).json_body(catalog_body());
    });

    let recommender = recommender_for(config_for(&server, ""));
    let types = recommender.project_types().await.unwrap();

    let labels: Vec<&str> = types.iter().map(|t| t.label).collect();
    assert_eq!(labels, vec!["Node.js App", "Blogging", "Django App"]);
}
