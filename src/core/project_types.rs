use crate::domain::model::Plan;
use serde::Serialize;
use std::collections::HashSet;

/// 標籤子字串對應的顯示名稱，依序比對
const PROJECT_TYPE_LABELS: &[(&str, &str)] = &[
    ("Woocommerce Hosting", "Woocommerce Store"),
    ("Ecommerce Hosting", "Ecommerce Platform"),
    ("Node Hosting", "Node.js App"),
    ("Business Email Hosting", "Business Website"),
    ("Python Hosting", "Django App"),
    ("Blog Hosting", "Blogging"),
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectType {
    pub tag: String,
    pub label: &'static str,
}

pub fn project_type_label(tag: &str) -> Option<&'static str> {
    PROJECT_TYPE_LABELS
        .iter()
        .find(|(needle, _)| tag.contains(needle))
        .map(|(_, label)| *label)
}

/// 目錄中出現過的標籤（依首次出現順序去重），只保留有顯示名稱者
pub fn list_project_types(plans: &[Plan]) -> Vec<ProjectType> {
    let mut seen = HashSet::new();

    plans
        .iter()
        .flat_map(|plan| plan.tags.iter())
        .filter(|tag| seen.insert(tag.as_str()))
        .filter_map(|tag| {
            project_type_label(tag).map(|label| ProjectType {
                tag: tag.clone(),
                label,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plan(tags: &[&str]) -> Plan {
        Plan {
            id: "id".to_string(),
            title: "title".to_string(),
            price: 1.0,
            tags: tags.iter().map(|t| t.to_string()).collect(),
            link: String::new(),
        }
    }

    #[test]
    fn test_label_first_match_wins() {
        assert_eq!(
            project_type_label("Woocommerce Hosting"),
            Some("Woocommerce Store")
        );
        assert_eq!(
            project_type_label("Managed Ecommerce Hosting"),
            Some("Ecommerce Platform")
        );
        assert_eq!(project_type_label("Node Hosting Pro"), Some("Node.js App"));
        assert_eq!(project_type_label("Python Hosting"), Some("Django App"));
        assert_eq!(project_type_label("Blog Hosting"), Some("Blogging"));
        assert_eq!(
            project_type_label("Business Email Hosting"),
            Some("Business Website")
        );
        assert_eq!(project_type_label("VPS"), None);
    }

    #[test]
    fn test_list_project_types_dedups_in_first_seen_order() {
        let plans = vec![
            plan(&["Node Hosting", "VPS"]),
            plan(&["Blog Hosting", "Node Hosting"]),
            plan(&["Python Hosting"]),
        ];

        let types = list_project_types(&plans);
        let tags: Vec<&str> = types.iter().map(|t| t.tag.as_str()).collect();
        assert_eq!(tags, vec!["Node Hosting", "Blog Hosting", "Python Hosting"]);
        assert_eq!(types[0].label, "Node.js App");
    }

    #[test]
    fn test_list_project_types_empty_catalog() {
        assert!(list_project_types(&[]).is_empty());
    }
}
