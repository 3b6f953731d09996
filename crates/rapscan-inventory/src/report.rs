//! Aggregation output and per-source reporting.

use rapscan_core::{InventoryItem, ItemSource};
use rapscan_roblox::{SourceFetch, SourceOutcome};

/// How one source walk went, kept for the response debug block. A
/// `private` outcome with zero entries reads very differently from a
/// `failed` one, so the distinction is preserved all the way out.
#[derive(Debug, Clone)]
pub struct SourceReport {
    pub source: ItemSource,
    /// Task label, e.g. `inventory[Hat,Hair,Face]`.
    pub label: String,
    pub outcome: SourceOutcome,
    /// Raw entries fetched, before dedupe.
    pub entries: usize,
    pub pages: u32,
}

impl SourceReport {
    pub fn from_fetch(fetch: &SourceFetch) -> Self {
        Self {
            source: fetch.task.source,
            label: fetch.task.label(),
            outcome: fetch.outcome.clone(),
            entries: fetch.entries.len(),
            pages: fetch.pages,
        }
    }
}

/// Final pipeline output: the sellable item set plus enough bookkeeping
/// to explain it.
#[derive(Debug, Clone, Default)]
pub struct AggregatedInventory {
    /// Sellable items, enriched and normalized, in merge order.
    pub items: Vec<InventoryItem>,
    /// Unique items after dedupe, before classification.
    pub total_fetched: usize,
    pub reports: Vec<SourceReport>,
}

impl AggregatedInventory {
    /// True when every source walk ended 403.
    pub fn all_private(&self) -> bool {
        !self.reports.is_empty() && self.reports.iter().all(|r| r.outcome.is_private())
    }

    pub fn limited_count(&self) -> usize {
        self.items.iter().filter(|i| i.is_limited).count()
    }

    pub fn limited_unique_count(&self) -> usize {
        self.items.iter().filter(|i| i.is_limited_unique).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rapscan_roblox::FetchTask;

    fn fetch(task: FetchTask, entries: usize, outcome: SourceOutcome) -> SourceFetch {
        SourceFetch {
            task,
            entries: (0..entries)
                .map(|i| {
                    let mut e = rapscan_roblox::RawInventoryEntry::default();
                    e.asset_id = Some(i as u64 + 1);
                    e
                })
                .collect(),
            outcome,
            pages: 1,
        }
    }

    #[test]
    fn test_report_carries_walk_identity() {
        let report = SourceReport::from_fetch(&fetch(
            FetchTask::inventory("Hat,Hair,Face"),
            3,
            SourceOutcome::Truncated {
                reason: "page cap".to_string(),
            },
        ));
        assert_eq!(report.source, ItemSource::Inventory);
        assert_eq!(report.label, "inventory[Hat,Hair,Face]");
        assert_eq!(report.entries, 3);
        assert_eq!(report.pages, 1);
        assert!(!report.outcome.is_private());
    }

    #[test]
    fn test_all_private_requires_every_source() {
        let mut agg = AggregatedInventory {
            items: Vec::new(),
            total_fetched: 0,
            reports: vec![
                SourceReport::from_fetch(&fetch(FetchTask::collectibles(), 0, SourceOutcome::Private)),
                SourceReport::from_fetch(&fetch(FetchTask::assets(), 0, SourceOutcome::Private)),
            ],
        };
        assert!(agg.all_private());

        agg.reports[1].outcome = SourceOutcome::Complete;
        assert!(!agg.all_private());

        agg.reports.clear();
        assert!(!agg.all_private());
    }
}
