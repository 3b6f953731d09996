//! Aggregation pipeline configuration.

use serde::{Deserialize, Serialize};

/// Which sources to walk and when to classify relative to enrichment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Comma-separated asset-type groups walked through the items
    /// endpoint, one fetch task per group. Empty disables that endpoint;
    /// collectibles and assets are always walked.
    #[serde(default = "default_asset_type_groups")]
    pub asset_type_groups: Vec<String>,
    #[serde(default)]
    pub enrichment: EnrichmentPolicy,
}

/// When the sellability classifier runs relative to catalog enrichment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnrichmentPolicy {
    /// Catalog-enrich every deduped item, then classify with the detail
    /// available. Fewest false negatives.
    #[default]
    Full,
    /// Classify on raw fields first and enrich only the candidates.
    /// Cheaper on catalog traffic; misses items whose only sellable
    /// signal lives in the catalog payload.
    Candidates,
}

fn default_asset_type_groups() -> Vec<String> {
    vec![
        "Hat,Hair,Face".to_string(),
        "Gear,Package".to_string(),
        "Shirt,Pants,TShirt".to_string(),
    ]
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            asset_type_groups: default_asset_type_groups(),
            enrichment: EnrichmentPolicy::default(),
        }
    }
}
