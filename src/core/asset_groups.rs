use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::core::types::Appointment;

/// Named bucket of assets derived from the current appointment set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetGroup {
    pub id: String,
    pub name: String,
    /// Ordered; availability lookups resolve ties by this order.
    pub asset_ids: Vec<String>,
    pub expanded: bool,
}

impl AssetGroup {
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>, asset_ids: Vec<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            asset_ids,
            expanded: true,
        }
    }
}

/// Assigns assets whose name contains one of `keywords` followed by a number
/// (e.g. `"Boot 3"`, `"sloepje12"`). Matching is case-insensitive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetClassRule {
    pub group_id: String,
    pub group_name: String,
    pub keywords: Vec<String>,
    /// Emit the group even when no asset matches.
    #[serde(default)]
    pub always_listed: bool,
}

impl AssetClassRule {
    #[must_use]
    pub fn matches(&self, asset_name: &str) -> bool {
        let haystack = asset_name.to_lowercase();
        self.keywords
            .iter()
            .any(|keyword| contains_numbered_keyword(&haystack, &keyword.to_lowercase()))
    }
}

/// Classification table; assets matching no rule land in the fallback group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetClassification {
    pub rules: Vec<AssetClassRule>,
    pub fallback_group_id: String,
    pub fallback_group_name: String,
}

impl Default for AssetClassification {
    fn default() -> Self {
        Self {
            rules: vec![
                AssetClassRule {
                    group_id: "large-boats".to_owned(),
                    group_name: "Large boats".to_owned(),
                    keywords: vec!["boot".to_owned()],
                    always_listed: true,
                },
                AssetClassRule {
                    group_id: "sloops".to_owned(),
                    group_name: "Sloops".to_owned(),
                    keywords: vec!["sloepje".to_owned(), "sloep".to_owned()],
                    always_listed: true,
                },
            ],
            fallback_group_id: "other".to_owned(),
            fallback_group_name: "Other".to_owned(),
        }
    }
}

fn contains_numbered_keyword(haystack: &str, keyword: &str) -> bool {
    if keyword.is_empty() {
        return false;
    }
    haystack.match_indices(keyword).any(|(index, _)| {
        haystack[index + keyword.len()..]
            .trim_start()
            .starts_with(|c: char| c.is_ascii_digit())
    })
}

/// Buckets distinct asset names into groups.
///
/// Names are deduplicated and sorted case-insensitively before bucketing, so
/// each group's asset order is stable. The first matching rule wins.
#[must_use]
pub fn classify_assets<'a, I>(asset_names: I, classification: &AssetClassification) -> Vec<AssetGroup>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut names: Vec<&str> = asset_names
        .into_iter()
        .filter(|name| !name.is_empty())
        .collect();
    names.sort_by(|a, b| a.to_lowercase().cmp(&b.to_lowercase()).then_with(|| a.cmp(b)));
    names.dedup();

    let mut buckets: IndexMap<usize, Vec<String>> = (0..classification.rules.len())
        .map(|index| (index, Vec::new()))
        .collect();
    let mut fallback = Vec::new();

    for name in names {
        match classification.rules.iter().position(|rule| rule.matches(name)) {
            Some(index) => buckets.entry(index).or_default().push(name.to_owned()),
            None => fallback.push(name.to_owned()),
        }
    }

    let mut groups: Vec<AssetGroup> = buckets
        .into_iter()
        .filter_map(|(index, assets)| {
            let rule = &classification.rules[index];
            (rule.always_listed || !assets.is_empty())
                .then(|| AssetGroup::new(&rule.group_id, &rule.group_name, assets))
        })
        .collect();

    if !fallback.is_empty() {
        groups.push(AssetGroup::new(
            &classification.fallback_group_id,
            &classification.fallback_group_name,
            fallback,
        ));
    }

    groups
}

/// Derives groups from the assets referenced by `appointments`.
#[must_use]
pub fn classify_appointments(
    appointments: &[Appointment],
    classification: &AssetClassification,
) -> Vec<AssetGroup> {
    classify_assets(
        appointments.iter().map(|appointment| appointment.asset_id.as_str()),
        classification,
    )
}
