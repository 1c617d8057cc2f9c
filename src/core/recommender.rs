use crate::core::plan_selector::{PlanSelector, SelectionRule};
use crate::core::project_types::{list_project_types, ProjectType};
use crate::domain::bucket::BucketTable;
use crate::domain::model::{Plan, Selection};
use crate::domain::ports::CatalogSource;
use crate::utils::error::Result;
use crate::utils::validation::Validate;
use serde::Serialize;

/// 一次送出的推薦結果
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    pub selection: Selection,
    pub rule: SelectionRule,
    pub candidate_count: usize,
    pub plan: Option<Plan>,
}

pub struct Recommender<C: CatalogSource> {
    catalog: C,
    traffic_table: BucketTable,
    budget_table: BucketTable,
}

impl<C: CatalogSource> Recommender<C> {
    pub fn new(catalog: C, traffic_table: BucketTable, budget_table: BucketTable) -> Self {
        Self {
            catalog,
            traffic_table,
            budget_table,
        }
    }

    pub fn with_default_buckets(catalog: C) -> Self {
        Self::new(
            catalog,
            BucketTable::default_traffic(),
            BucketTable::default_budget(),
        )
    }

    pub async fn project_types(&self) -> Result<Vec<ProjectType>> {
        let plans = self.catalog.fetch_plans().await?;
        let types = list_project_types(&plans);
        tracing::info!(
            "📋 {} project types offered from {} plans",
            types.len(),
            plans.len()
        );
        Ok(types)
    }

    pub async fn recommend(&self, selection: &Selection) -> Result<Recommendation> {
        selection.validate()?;

        // 區間必須先解析成功才去抓目錄
        let traffic = self.traffic_table.find(&selection.traffic)?;
        let budget = self.budget_table.find(&selection.budget)?;

        tracing::info!(
            "🔎 Recommending for '{}' (traffic {}, budget {})",
            selection.project_type,
            traffic.label,
            budget.label
        );

        let plans = self.catalog.fetch_plans().await?;
        tracing::debug!("Fetched {} plans from catalog", plans.len());

        let candidates = rank_candidates(plans, &selection.project_type);
        tracing::info!("Found {} candidate plans", candidates.len());

        let selector = PlanSelector::new(&self.traffic_table, &self.budget_table);
        let (rule, chosen) = selector.select(&candidates, traffic, budget);

        match chosen {
            Some(plan) => tracing::info!("✅ Rule '{}' picked '{}' ({})", rule, plan.title, plan.price),
            None => tracing::warn!("⚠️ Rule '{}' found no matching plan", rule),
        }

        Ok(Recommendation {
            selection: selection.clone(),
            rule,
            candidate_count: candidates.len(),
            plan: chosen.cloned(),
        })
    }
}

/// 過濾出帶有指定標籤的方案，並依價格由低到高排序（穩定排序）
pub fn rank_candidates(plans: Vec<Plan>, project_type: &str) -> Vec<Plan> {
    let mut candidates: Vec<Plan> = plans
        .into_iter()
        .filter(|plan| plan.has_tag(project_type))
        .collect();
    candidates.sort_by(|a, b| a.price.total_cmp(&b.price));
    candidates
}
