//! Storefront browsing: filter, sort, and the per-size index.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::iter::Peekable;
use std::str::Chars;

use crate::item::InventoryItem;

/// Browse filters as they come off the storefront controls.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogFilter {
    /// Exact size match; `None` or empty matches every size.
    pub size: Option<String>,
    /// Minimum tread depth in 32nds, inclusive.
    pub min_tread: u32,
    /// Case-insensitive substring matched against brand, model, size, and
    /// notes together.
    pub search: String,
}

impl CatalogFilter {
    pub fn matches(&self, item: &InventoryItem) -> bool {
        if let Some(size) = self.size.as_deref() {
            if !size.is_empty() && item.size != size {
                return false;
            }
        }
        if item.tread_32nds < self.min_tread {
            return false;
        }
        let needle = self.search.trim().to_lowercase();
        if !needle.is_empty() {
            let haystack = format!(
                "{} {} {} {}",
                item.brand, item.model, item.size, item.notes
            )
            .to_lowercase();
            if !haystack.contains(&needle) {
                return false;
            }
        }
        true
    }
}

/// Sort orders offered by the storefront. `Size` is the default.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub enum SortKey {
    #[default]
    Size,
    PriceAscending,
    TreadDescending,
    Brand,
}

impl SortKey {
    /// Parses a storefront sort key, falling back to `Size` for anything
    /// unrecognized.
    pub fn parse(raw: &str) -> SortKey {
        match raw {
            "price" => SortKey::PriceAscending,
            "tread" => SortKey::TreadDescending,
            "brand" => SortKey::Brand,
            _ => SortKey::Size,
        }
    }

    pub fn compare(self, a: &InventoryItem, b: &InventoryItem) -> Ordering {
        match self {
            SortKey::Size => {
                natural_cmp(&a.size, &b.size).then_with(|| a.brand.cmp(&b.brand))
            }
            SortKey::PriceAscending => a.price.cmp(&b.price),
            SortKey::TreadDescending => b.tread_32nds.cmp(&a.tread_32nds),
            SortKey::Brand => a.brand.cmp(&b.brand).then_with(|| a.model.cmp(&b.model)),
        }
    }
}

/// Applies the browse filter and sort to a catalog snapshot.
///
/// The sort is stable, so equal keys keep their catalog order.
pub fn filter_items(
    items: &[InventoryItem],
    filter: &CatalogFilter,
    sort: SortKey,
) -> Vec<InventoryItem> {
    let mut out: Vec<InventoryItem> = items
        .iter()
        .filter(|item| filter.matches(item))
        .cloned()
        .collect();
    out.sort_by(|a, b| sort.compare(a, b));
    out
}

/// Numeric-aware string compare: digit runs compare by value, other
/// characters compare case-insensitively, so "9R15" sorts before "10R15".
/// Ties fall back to a plain byte compare to keep the order total.
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let mut ca = a.chars().peekable();
    let mut cb = b.chars().peekable();
    loop {
        match (ca.peek().copied(), cb.peek().copied()) {
            (None, None) => return a.cmp(b),
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(x), Some(y)) => {
                if x.is_ascii_digit() && y.is_ascii_digit() {
                    match take_number(&mut ca).cmp(&take_number(&mut cb)) {
                        Ordering::Equal => {}
                        other => return other,
                    }
                } else {
                    match x.to_ascii_lowercase().cmp(&y.to_ascii_lowercase()) {
                        Ordering::Equal => {
                            ca.next();
                            cb.next();
                        }
                        other => return other,
                    }
                }
            }
        }
    }
}

fn take_number(chars: &mut Peekable<Chars<'_>>) -> u128 {
    let mut value: u128 = 0;
    while let Some(c) = chars.peek().copied() {
        if !c.is_ascii_digit() {
            break;
        }
        value = value
            .saturating_mul(10)
            .saturating_add(u128::from(c as u8 - b'0'));
        chars.next();
    }
    value
}

/// Total units across a set of listings.
pub fn sum_quantities(items: &[InventoryItem]) -> u32 {
    items
        .iter()
        .fold(0u32, |acc, item| acc.saturating_add(item.quantity))
}

/// Catalog grouped by size for the sidebar, blank sizes bucketed under
/// `"Unknown"`. Buckets iterate in natural size order.
#[derive(Debug, Clone, Default)]
pub struct SizeIndex {
    buckets: Vec<(String, Vec<InventoryItem>)>,
}

impl SizeIndex {
    pub const UNKNOWN: &'static str = "Unknown";

    pub fn build(items: &[InventoryItem]) -> SizeIndex {
        let mut map: BTreeMap<String, Vec<InventoryItem>> = BTreeMap::new();
        for item in items {
            let key = if item.size.is_empty() {
                Self::UNKNOWN.to_string()
            } else {
                item.size.clone()
            };
            map.entry(key).or_default().push(item.clone());
        }
        let mut buckets: Vec<_> = map.into_iter().collect();
        buckets.sort_by(|a, b| natural_cmp(&a.0, &b.0));
        SizeIndex { buckets }
    }

    /// Size keys with their unit counts, in natural order.
    pub fn counts(&self) -> impl Iterator<Item = (&str, u32)> {
        self.buckets
            .iter()
            .map(|(size, items)| (size.as_str(), sum_quantities(items)))
    }

    pub fn get(&self, size: &str) -> Option<&[InventoryItem]> {
        self.buckets
            .iter()
            .find(|(key, _)| key == size)
            .map(|(_, items)| items.as_slice())
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }
}
