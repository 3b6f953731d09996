//! Sellability classification.
//!
//! An item is sellable when ANY independent signal fires:
//! - limited or limited-unique flag, on the item or in the catalog
//!   restriction tags
//! - a purchasable sale status (ForSale, OnSale, Resellable)
//! - a positive price anywhere (item RAP, lowest resale price, list price)
//! - collectible evidence (collectible item id, resale configuration, or
//!   the record came from the collectibles endpoint)
//!
//! The predicate is a pure OR, so adding catalog detail can only turn a
//! non-sellable verdict into a sellable one, never the reverse.

use crate::types::{CatalogDetail, InventoryItem, ItemSource};

/// Decide whether an item belongs in the sellable set.
///
/// `detail` is the catalog enrichment when one was fetched; classification
/// also works on a bare inventory record.
pub fn is_sellable(item: &InventoryItem, detail: Option<&CatalogDetail>) -> bool {
    let limited = item.is_limited
        || item.is_limited_unique
        || detail.is_some_and(|d| d.is_limited() || d.is_limited_unique());

    let purchasable = item.sale_status.is_purchasable();

    let priced = item.recent_average_price > 0 || detail.is_some_and(|d| d.best_price() > 0);

    let collectible = item.source == ItemSource::Collectibles
        || detail.is_some_and(|d| d.collectible_item_id.is_some() || d.has_resale_configuration);

    limited || purchasable || priced || collectible
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SaleStatus;

    fn plain_item(id: u64) -> InventoryItem {
        let mut item = InventoryItem::new(id, ItemSource::Assets);
        item.name = format!("Item {id}");
        item
    }

    #[test]
    fn test_plain_asset_is_not_sellable() {
        let item = plain_item(1);
        assert!(!is_sellable(&item, None));
    }

    #[test]
    fn test_limited_flag_alone_is_sellable() {
        let mut item = plain_item(2);
        item.is_limited = true;
        assert!(is_sellable(&item, None));

        let mut item = plain_item(3);
        item.is_limited_unique = true;
        assert!(is_sellable(&item, None));
    }

    #[test]
    fn test_purchasable_statuses_are_sellable() {
        for status in [SaleStatus::ForSale, SaleStatus::OnSale, SaleStatus::Resellable] {
            let mut item = plain_item(4);
            item.sale_status = status;
            assert!(is_sellable(&item, None), "{status} should be sellable");
        }

        let mut item = plain_item(5);
        item.sale_status = SaleStatus::OffSale;
        assert!(!is_sellable(&item, None));
    }

    #[test]
    fn test_positive_rap_is_sellable() {
        let mut item = plain_item(6);
        item.recent_average_price = 1;
        assert!(is_sellable(&item, None));
    }

    #[test]
    fn test_collectibles_source_is_always_sellable() {
        let item = InventoryItem::new(7, ItemSource::Collectibles);
        assert!(is_sellable(&item, None));
    }

    #[test]
    fn test_catalog_detail_can_promote_but_not_demote() {
        let item = plain_item(8);
        assert!(!is_sellable(&item, None));

        // Restriction tag in the catalog promotes.
        let mut d = CatalogDetail {
            asset_id: 8,
            ..CatalogDetail::default()
        };
        d.item_restrictions = vec!["LimitedUnique".to_string()];
        assert!(is_sellable(&item, Some(&d)));

        // An empty detail on an already-sellable item changes nothing.
        let mut limited = plain_item(9);
        limited.is_limited = true;
        let empty = CatalogDetail {
            asset_id: 9,
            ..CatalogDetail::default()
        };
        assert!(is_sellable(&limited, Some(&empty)));
    }

    #[test]
    fn test_catalog_prices_and_collectible_id_promote() {
        let item = plain_item(10);

        let mut priced = CatalogDetail {
            asset_id: 10,
            ..CatalogDetail::default()
        };
        priced.lowest_price = Some(50);
        assert!(is_sellable(&item, Some(&priced)));

        let mut collectible = CatalogDetail {
            asset_id: 10,
            ..CatalogDetail::default()
        };
        collectible.collectible_item_id = Some("6b3f4a2e-ffa8-4e02-85be-7a1c6d1f1f4a".to_string());
        assert!(is_sellable(&item, Some(&collectible)));

        let mut resale = CatalogDetail {
            asset_id: 10,
            ..CatalogDetail::default()
        };
        resale.has_resale_configuration = true;
        assert!(is_sellable(&item, Some(&resale)));
    }
}
