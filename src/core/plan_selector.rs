use crate::domain::bucket::{Bucket, BucketTable};
use crate::domain::model::Plan;
use serde::Serialize;
use std::cmp::Ordering;
use std::fmt;

/// 推薦規則；依序比對，第一個符合的規則生效
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionRule {
    /// 最低流量且最低預算：最便宜的方案
    EntryLevel,
    /// 流量上限高於預算上限：最貴的方案
    TrafficExceedsBudget,
    /// 預算上限高於流量上限：中間的方案
    BudgetExceedsTraffic,
    /// 兩者上限相同：第一個價格落在預算區間內的方案
    BudgetMatched,
}

impl SelectionRule {
    pub fn classify(
        traffic: &Bucket,
        budget: &Bucket,
        traffic_table: &BucketTable,
        budget_table: &BucketTable,
    ) -> Self {
        let entry_level = traffic_table.is_lowest(traffic) && budget_table.is_lowest(budget);

        match (entry_level, traffic.max.cmp(&budget.max)) {
            (true, _) => SelectionRule::EntryLevel,
            (false, Ordering::Greater) => SelectionRule::TrafficExceedsBudget,
            (false, Ordering::Less) => SelectionRule::BudgetExceedsTraffic,
            (false, Ordering::Equal) => SelectionRule::BudgetMatched,
        }
    }

    /// `candidates` 必須已依價格由低到高排序；空集合一律沒有推薦
    pub fn apply<'a>(&self, candidates: &'a [Plan], budget: &Bucket) -> Option<&'a Plan> {
        match self {
            SelectionRule::EntryLevel => candidates.first(),
            SelectionRule::TrafficExceedsBudget => candidates.last(),
            SelectionRule::BudgetExceedsTraffic => candidates.get(candidates.len() / 2),
            SelectionRule::BudgetMatched => candidates.iter().find(|p| budget.contains(p.price)),
        }
    }
}

impl fmt::Display for SelectionRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SelectionRule::EntryLevel => "entry level",
            SelectionRule::TrafficExceedsBudget => "traffic exceeds budget",
            SelectionRule::BudgetExceedsTraffic => "budget exceeds traffic",
            SelectionRule::BudgetMatched => "budget matched",
        };
        write!(f, "{}", name)
    }
}

pub struct PlanSelector<'t> {
    traffic_table: &'t BucketTable,
    budget_table: &'t BucketTable,
}

impl<'t> PlanSelector<'t> {
    pub fn new(traffic_table: &'t BucketTable, budget_table: &'t BucketTable) -> Self {
        Self {
            traffic_table,
            budget_table,
        }
    }

    pub fn select<'a>(
        &self,
        candidates: &'a [Plan],
        traffic: &Bucket,
        budget: &Bucket,
    ) -> (SelectionRule, Option<&'a Plan>) {
        let rule = SelectionRule::classify(traffic, budget, self.traffic_table, self.budget_table);
        (rule, rule.apply(candidates, budget))
    }
}
