//! Filtering, sorting, pagination, and summary totals.
//!
//! Query parameters use total parsers: an unrecognized filter or sort key
//! silently falls back to the default instead of failing the request.
//! Totals are always computed over the filtered set, not the full
//! inventory.

use crate::types::InventoryItem;

/// Default page size when the request does not specify one.
pub const DEFAULT_PAGE_LIMIT: u32 = 50;

/// Result-set filter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ItemFilter {
    #[default]
    All,
    Limited,
    LimitedUnique,
    /// Limited, limited-unique, resellable, or carrying any positive price.
    Tradeable,
}

impl ItemFilter {
    /// Parse a query-string value; unknown values fall back to `All`.
    ///
    /// `limitedU` is the historical spelling, `limitedUnique` is accepted
    /// as an alias, as is `valuable` for `tradeable`.
    pub fn parse(raw: &str) -> Self {
        match raw.to_ascii_lowercase().as_str() {
            "limited" => Self::Limited,
            "limitedu" | "limitedunique" => Self::LimitedUnique,
            "tradeable" | "valuable" => Self::Tradeable,
            _ => Self::All,
        }
    }

    pub fn matches(&self, item: &InventoryItem) -> bool {
        match self {
            Self::All => true,
            Self::Limited => item.is_limited,
            Self::LimitedUnique => item.is_limited_unique,
            Self::Tradeable => {
                item.is_limited
                    || item.is_limited_unique
                    || item.sale_status == crate::types::SaleStatus::Resellable
                    || item.recent_average_price > 0
            }
        }
    }

    /// Canonical spelling echoed back in responses.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Limited => "limited",
            Self::LimitedUnique => "limitedU",
            Self::Tradeable => "tradeable",
        }
    }
}

impl std::fmt::Display for ItemFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Sort order for the shaped result set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortKey {
    /// Price descending. The default.
    #[default]
    Value,
    /// Name ascending, lexicographic.
    Name,
    /// Creation timestamp descending; items without one sort last.
    Created,
}

impl SortKey {
    /// Parse a query-string value; unknown values fall back to `Value`.
    pub fn parse(raw: &str) -> Self {
        match raw.to_ascii_lowercase().as_str() {
            "name" => Self::Name,
            "created" => Self::Created,
            _ => Self::Value,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Value => "value",
            Self::Name => "name",
            Self::Created => "created",
        }
    }
}

impl std::fmt::Display for SortKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Shaping parameters, already parsed.
///
/// `page` and `limit` below 1 are treated as 1; callers can pass raw
/// values straight through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InventoryQuery {
    pub filter: ItemFilter,
    pub sort: SortKey,
    /// 1-indexed page.
    pub page: u32,
    pub limit: u32,
    /// Drop items whose resolved price is below this floor. 0 keeps all.
    pub min_value: u64,
}

impl Default for InventoryQuery {
    fn default() -> Self {
        Self {
            filter: ItemFilter::All,
            sort: SortKey::Value,
            page: 1,
            limit: DEFAULT_PAGE_LIMIT,
            min_value: 0,
        }
    }
}

/// The priciest item in the filtered set, captured before sorting.
///
/// Ties keep the first record encountered, so the winner is stable for a
/// given aggregation order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MostExpensive {
    pub name: String,
    pub image_url: String,
    pub value: u64,
}

/// One shaped page plus totals over the whole filtered set.
#[derive(Debug, Clone)]
pub struct ShapedPage {
    pub items: Vec<InventoryItem>,
    pub total_count: usize,
    /// Sum of resolved prices over the filtered set (zero-priced items
    /// contribute nothing).
    pub total_value: u64,
    pub items_with_value: usize,
    /// None only when the filtered set is empty.
    pub most_expensive: Option<MostExpensive>,
    pub page: u32,
    pub limit: u32,
    pub total_pages: u32,
    pub sort: SortKey,
    pub filter: ItemFilter,
}

/// Apply filter, totals, sort, and pagination to an aggregated item set.
///
/// An out-of-range page yields an empty `items` slice, never an error.
pub fn shape(items: Vec<InventoryItem>, query: &InventoryQuery) -> ShapedPage {
    let page = query.page.max(1);
    let limit = query.limit.max(1);

    let mut filtered: Vec<InventoryItem> = items
        .into_iter()
        .filter(|item| query.filter.matches(item))
        .filter(|item| query.min_value == 0 || item.recent_average_price >= query.min_value)
        .collect();

    let total_count = filtered.len();
    let total_value: u64 = filtered.iter().map(|i| i.recent_average_price).sum();
    let items_with_value = filtered
        .iter()
        .filter(|i| i.recent_average_price > 0)
        .count();

    let mut most_expensive: Option<&InventoryItem> = None;
    for item in &filtered {
        let beats = most_expensive
            .map_or(true, |best| item.recent_average_price > best.recent_average_price);
        if beats {
            most_expensive = Some(item);
        }
    }
    let most_expensive = most_expensive.map(|item| MostExpensive {
        name: item.name.clone(),
        image_url: item.image_url.clone(),
        value: item.recent_average_price,
    });

    match query.sort {
        SortKey::Value => {
            filtered.sort_by(|a, b| b.recent_average_price.cmp(&a.recent_average_price))
        }
        SortKey::Name => filtered.sort_by(|a, b| a.name.cmp(&b.name)),
        SortKey::Created => filtered.sort_by(|a, b| b.created.cmp(&a.created)),
    }

    let total_pages = (total_count as u32).div_ceil(limit);
    let start = (page as usize - 1).saturating_mul(limit as usize);
    let items: Vec<InventoryItem> = filtered
        .into_iter()
        .skip(start)
        .take(limit as usize)
        .collect();

    ShapedPage {
        items,
        total_count,
        total_value,
        items_with_value,
        most_expensive,
        page,
        limit,
        total_pages,
        sort: query.sort,
        filter: query.filter,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ItemSource, SaleStatus};
    use chrono::{TimeZone, Utc};

    fn item(id: u64, name: &str, price: u64) -> InventoryItem {
        let mut it = InventoryItem::new(id, ItemSource::Assets);
        it.name = name.to_string();
        it.recent_average_price = price;
        it
    }

    fn limited(id: u64, name: &str, price: u64) -> InventoryItem {
        let mut it = item(id, name, price);
        it.is_limited = true;
        it
    }

    #[test]
    fn test_filter_parse_fallbacks() {
        assert_eq!(ItemFilter::parse("limited"), ItemFilter::Limited);
        assert_eq!(ItemFilter::parse("limitedU"), ItemFilter::LimitedUnique);
        assert_eq!(ItemFilter::parse("limitedUnique"), ItemFilter::LimitedUnique);
        assert_eq!(ItemFilter::parse("tradeable"), ItemFilter::Tradeable);
        assert_eq!(ItemFilter::parse("valuable"), ItemFilter::Tradeable);
        assert_eq!(ItemFilter::parse("nonsense"), ItemFilter::All);
        assert_eq!(SortKey::parse("name"), SortKey::Name);
        assert_eq!(SortKey::parse("created"), SortKey::Created);
        assert_eq!(SortKey::parse("whatever"), SortKey::Value);
    }

    #[test]
    fn test_tradeable_filter_signals() {
        let mut resellable = item(1, "a", 0);
        resellable.sale_status = SaleStatus::Resellable;
        assert!(ItemFilter::Tradeable.matches(&resellable));

        let priced = item(2, "b", 10);
        assert!(ItemFilter::Tradeable.matches(&priced));

        let plain = item(3, "c", 0);
        assert!(!ItemFilter::Tradeable.matches(&plain));
    }

    #[test]
    fn test_total_value_counts_filtered_set_only() {
        let items = vec![
            limited(1, "a", 100),
            limited(2, "b", 0),
            item(3, "c", 9_999), // not limited, must not count
        ];
        let query = InventoryQuery {
            filter: ItemFilter::Limited,
            ..InventoryQuery::default()
        };
        let shaped = shape(items, &query);
        assert_eq!(shaped.total_count, 2);
        assert_eq!(shaped.total_value, 100);
        assert_eq!(shaped.items_with_value, 1);
    }

    #[test]
    fn test_most_expensive_keeps_first_on_tie() {
        let items = vec![item(1, "first", 500), item(2, "second", 500)];
        let shaped = shape(items, &InventoryQuery::default());
        let top = shaped.most_expensive.unwrap();
        assert_eq!(top.name, "first");
        assert_eq!(top.value, 500);
    }

    #[test]
    fn test_most_expensive_present_even_when_all_zero() {
        let items = vec![item(1, "zero", 0)];
        let shaped = shape(items, &InventoryQuery::default());
        assert_eq!(shaped.most_expensive.unwrap().value, 0);

        let empty = shape(Vec::new(), &InventoryQuery::default());
        assert!(empty.most_expensive.is_none());
    }

    #[test]
    fn test_value_sort_descending_default() {
        let items = vec![item(1, "low", 10), item(2, "high", 300), item(3, "mid", 50)];
        let shaped = shape(items, &InventoryQuery::default());
        let prices: Vec<u64> = shaped.items.iter().map(|i| i.recent_average_price).collect();
        assert_eq!(prices, vec![300, 50, 10]);
    }

    #[test]
    fn test_created_sort_puts_missing_timestamps_last() {
        let mut old = item(1, "old", 0);
        old.created = Some(Utc.with_ymd_and_hms(2009, 3, 1, 0, 0, 0).unwrap());
        let mut new = item(2, "new", 0);
        new.created = Some(Utc.with_ymd_and_hms(2021, 6, 15, 12, 0, 0).unwrap());
        let undated = item(3, "undated", 0);

        let query = InventoryQuery {
            sort: SortKey::Created,
            ..InventoryQuery::default()
        };
        let shaped = shape(vec![old, undated, new], &query);
        let names: Vec<&str> = shaped.items.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["new", "old", "undated"]);
    }

    #[test]
    fn test_pagination_window_and_total_pages() {
        // 25 limited items named b01..b25 so the name sort is unambiguous.
        let items: Vec<InventoryItem> = (1..=25)
            .map(|n| limited(n, &format!("b{n:02}"), n))
            .collect();
        let query = InventoryQuery {
            filter: ItemFilter::Limited,
            sort: SortKey::Name,
            page: 2,
            limit: 10,
            ..InventoryQuery::default()
        };
        let shaped = shape(items, &query);

        assert_eq!(shaped.total_count, 25);
        assert_eq!(shaped.total_pages, 3);
        assert_eq!(shaped.items.len(), 10);
        assert_eq!(shaped.items.first().unwrap().name, "b11");
        assert_eq!(shaped.items.last().unwrap().name, "b20");
    }

    #[test]
    fn test_out_of_range_page_is_empty_not_error() {
        let items = vec![item(1, "only", 5)];
        let query = InventoryQuery {
            page: 99,
            ..InventoryQuery::default()
        };
        let shaped = shape(items, &query);
        assert!(shaped.items.is_empty());
        assert_eq!(shaped.total_count, 1);
        assert_eq!(shaped.total_pages, 1);
        assert_eq!(shaped.page, 99);
    }

    #[test]
    fn test_last_page_is_partial() {
        let items: Vec<InventoryItem> = (1..=12).map(|n| item(n, "x", 1)).collect();
        let query = InventoryQuery {
            page: 3,
            limit: 5,
            ..InventoryQuery::default()
        };
        let shaped = shape(items, &query);
        assert_eq!(shaped.items.len(), 2);
        assert_eq!(shaped.total_pages, 3);
    }

    #[test]
    fn test_zero_page_and_limit_are_clamped() {
        let items = vec![item(1, "a", 1), item(2, "b", 2)];
        let query = InventoryQuery {
            page: 0,
            limit: 0,
            ..InventoryQuery::default()
        };
        let shaped = shape(items, &query);
        assert_eq!(shaped.page, 1);
        assert_eq!(shaped.limit, 1);
        assert_eq!(shaped.items.len(), 1);
        assert_eq!(shaped.total_pages, 2);
    }

    #[test]
    fn test_min_value_floor() {
        let items = vec![item(1, "cheap", 5), item(2, "fine", 100), item(3, "free", 0)];
        let query = InventoryQuery {
            min_value: 50,
            ..InventoryQuery::default()
        };
        let shaped = shape(items, &query);
        assert_eq!(shaped.total_count, 1);
        assert_eq!(shaped.items[0].name, "fine");
        assert_eq!(shaped.total_value, 100);
    }

    #[test]
    fn test_empty_inventory_shapes_to_zeroes() {
        let shaped = shape(Vec::new(), &InventoryQuery::default());
        assert_eq!(shaped.total_count, 0);
        assert_eq!(shaped.total_value, 0);
        assert_eq!(shaped.total_pages, 0);
        assert!(shaped.items.is_empty());
        assert!(shaped.most_expensive.is_none());
    }
}
