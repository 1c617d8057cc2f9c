use serde::{Deserialize, Serialize};
use url::form_urlencoded;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UtmParams {
    pub url: String,
    pub source: String,
    pub medium: String,
    pub campaign: String,
    pub term: String,
    pub content: String,
}

impl UtmParams {
    /// 只保留有值的參數，順序固定
    fn pairs(&self) -> Vec<(&'static str, &str)> {
        [
            ("utm_source", self.source.as_str()),
            ("utm_medium", self.medium.as_str()),
            ("utm_campaign", self.campaign.as_str()),
            ("utm_term", self.term.as_str()),
            ("utm_content", self.content.as_str()),
        ]
        .into_iter()
        .filter(|(_, value)| !value.is_empty())
        .collect()
    }
}

pub fn build_query(params: &UtmParams) -> String {
    let mut serializer = form_urlencoded::Serializer::new(String::new());
    for (key, value) in params.pairs() {
        serializer.append_pair(key, value);
    }
    serializer.finish()
}

pub fn build_utm_url(params: &UtmParams) -> String {
    let query = build_query(params);

    if params.url.is_empty() {
        return query;
    }
    if query.is_empty() {
        return params.url.clone();
    }

    let separator = if params.url.contains('?') { '&' } else { '?' };
    format!("{}{}{}", params.url, separator, query)
}
