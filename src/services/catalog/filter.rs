use rust_decimal::Decimal;
use serde::Serialize;
use std::str::FromStr;

/// Page size bounds for listing queries.
pub const DEFAULT_LIMIT: u64 = 20;
pub const MAX_LIMIT: u64 = 60;

/// Closed set of listing sort orders. Unknown inputs fall back to `Newest`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    #[default]
    Newest,
    PriceAsc,
    PriceDesc,
}

impl SortKey {
    pub fn parse(raw: &str) -> Self {
        match raw {
            "price_asc" => SortKey::PriceAsc,
            "price_desc" => SortKey::PriceDesc,
            _ => SortKey::Newest,
        }
    }
}

/// One price band selected in the filter UI. At least one bound is present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PriceRange {
    pub min: Option<Decimal>,
    pub max: Option<Decimal>,
}

impl PriceRange {
    /// Parses `"min-max"`, `"min-"` or `"-max"`. Returns `None` for
    /// anything malformed: no separator, non-numeric bounds, or both
    /// bounds missing.
    pub fn parse(raw: &str) -> Option<Self> {
        let (lo, hi) = raw.split_once('-')?;

        let min = parse_bound(lo)?;
        let max = parse_bound(hi)?;
        if min.is_none() && max.is_none() {
            return None;
        }
        Some(Self { min, max })
    }
}

/// Empty means open-ended; present text must be a non-negative decimal.
fn parse_bound(raw: &str) -> Option<Option<Decimal>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Some(None);
    }
    match Decimal::from_str(raw) {
        Ok(value) if value >= Decimal::ZERO => Some(Some(value)),
        _ => None,
    }
}

/// Normalized, request-scoped filter criteria. Every field carries a
/// concrete value; downstream composers never null-check.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CatalogFilter {
    pub search: Option<String>,
    pub genders: Vec<String>,
    pub brands: Vec<String>,
    pub categories: Vec<String>,
    pub colors: Vec<String>,
    pub sizes: Vec<String>,
    pub price_ranges: Vec<PriceRange>,
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
    pub sort: SortKey,
    pub page: u64,
    pub limit: u64,
}

impl CatalogFilter {
    /// Parses a raw URL query string. Repeated keys accumulate into the
    /// multi-valued fields, so `color=red&color=blue` and a single
    /// `color=red` both normalize to arrays.
    pub fn from_query(raw: &str) -> Self {
        Self::from_pairs(
            url::form_urlencoded::parse(raw.as_bytes())
                .map(|(k, v)| (k.into_owned(), v.into_owned())),
        )
    }

    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut filter = CatalogFilter {
            page: 1,
            limit: DEFAULT_LIMIT,
            ..Default::default()
        };

        for (key, value) in pairs {
            let value = value.trim();
            if value.is_empty() {
                continue;
            }
            match key.as_str() {
                "search" | "q" => filter.search = Some(value.to_string()),
                "gender" => filter.genders.push(value.to_string()),
                "brand" => filter.brands.push(value.to_string()),
                "category" => filter.categories.push(value.to_string()),
                "color" => filter.colors.push(value.to_string()),
                "size" => filter.sizes.push(value.to_string()),
                "price" => {
                    if let Some(range) = PriceRange::parse(value) {
                        filter.price_ranges.push(range);
                    }
                }
                "min_price" => filter.min_price = parse_price(value),
                "max_price" => filter.max_price = parse_price(value),
                "sort" => filter.sort = SortKey::parse(value),
                "page" => {
                    filter.page = value.parse::<u64>().ok().filter(|p| *p >= 1).unwrap_or(1);
                }
                "limit" => {
                    filter.limit = value
                        .parse::<u64>()
                        .ok()
                        .map(|l| l.clamp(1, MAX_LIMIT))
                        .unwrap_or(DEFAULT_LIMIT);
                }
                _ => {}
            }
        }

        filter
    }

    /// True when any variant-level constraint (color, size, price) is set.
    pub fn has_variant_filters(&self) -> bool {
        !self.colors.is_empty()
            || !self.sizes.is_empty()
            || self.has_price_filters()
    }

    pub fn has_price_filters(&self) -> bool {
        !self.price_ranges.is_empty() || self.min_price.is_some() || self.max_price.is_some()
    }

    pub fn offset(&self) -> u64 {
        (self.page - 1) * self.limit
    }
}

fn parse_price(raw: &str) -> Option<Decimal> {
    Decimal::from_str(raw).ok().filter(|v| *v >= Decimal::ZERO)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rust_decimal_macros::dec;
    use test_case::test_case;

    fn parse(query: &str) -> CatalogFilter {
        CatalogFilter::from_query(query)
    }

    #[test_case("50-100", Some(dec!(50)), Some(dec!(100)); "closed range")]
    #[test_case("50-", Some(dec!(50)), None; "open upper")]
    #[test_case("-100", None, Some(dec!(100)); "open lower")]
    #[test_case("49.99-99.95", Some(dec!(49.99)), Some(dec!(99.95)); "fractional bounds")]
    #[test_case(" 50 - 100 ", Some(dec!(50)), Some(dec!(100)); "whitespace tolerated")]
    fn price_range_grammar(raw: &str, min: Option<Decimal>, max: Option<Decimal>) {
        let range = PriceRange::parse(raw).expect("should parse");
        assert_eq!(range.min, min);
        assert_eq!(range.max, max);
    }

    #[test_case(""; "empty")]
    #[test_case("-"; "separator only")]
    #[test_case("abc-def"; "non numeric")]
    #[test_case("50"; "missing separator")]
    #[test_case("a-100"; "bad lower")]
    #[test_case("50-b"; "bad upper")]
    fn malformed_price_ranges_dropped(raw: &str) {
        assert_eq!(PriceRange::parse(raw), None);
    }

    proptest! {
        #[test]
        fn price_range_parse_never_panics(raw in ".{0,40}") {
            let _ = PriceRange::parse(&raw);
        }

        #[test]
        fn query_parse_never_panics(raw in ".{0,120}") {
            let _ = CatalogFilter::from_query(&raw);
        }
    }

    #[test]
    fn scalar_and_repeated_params_both_coerce_to_arrays() {
        let single = parse("color=red");
        assert_eq!(single.colors, vec!["red"]);

        let repeated = parse("color=red&color=blue&size=10");
        assert_eq!(repeated.colors, vec!["red", "blue"]);
        assert_eq!(repeated.sizes, vec!["10"]);
    }

    #[test]
    fn malformed_price_entries_do_not_poison_valid_ones() {
        let filter = parse("price=0-65&price=junk&price=-");
        assert_eq!(filter.price_ranges.len(), 1);
        assert_eq!(filter.price_ranges[0].max, Some(dec!(65)));
    }

    #[test]
    fn page_and_limit_defaults_and_clamping() {
        let filter = parse("");
        assert_eq!(filter.page, 1);
        assert_eq!(filter.limit, DEFAULT_LIMIT);

        let filter = parse("page=0&limit=0");
        assert_eq!(filter.page, 1);
        assert_eq!(filter.limit, 1);

        let filter = parse("page=-3&limit=500");
        assert_eq!(filter.page, 1);
        assert_eq!(filter.limit, MAX_LIMIT);

        let filter = parse("page=3&limit=10");
        assert_eq!(filter.offset(), 20);
    }

    #[test]
    fn unknown_sort_falls_back_to_newest() {
        assert_eq!(parse("sort=price_asc").sort, SortKey::PriceAsc);
        assert_eq!(parse("sort=price_desc").sort, SortKey::PriceDesc);
        assert_eq!(parse("sort=alphabetical").sort, SortKey::Newest);
        assert_eq!(parse("").sort, SortKey::Newest);
    }

    #[test]
    fn blank_values_are_dropped() {
        let filter = parse("color=&brand=%20&search=");
        assert!(filter.colors.is_empty());
        assert!(filter.brands.is_empty());
        assert!(filter.search.is_none());
    }

    #[test]
    fn explicit_bounds_parse_independently_of_ranges() {
        let filter = parse("min_price=25&max_price=75&price=0-10");
        assert_eq!(filter.min_price, Some(dec!(25)));
        assert_eq!(filter.max_price, Some(dec!(75)));
        assert_eq!(filter.price_ranges.len(), 1);
        assert!(filter.has_price_filters());
        assert!(filter.has_variant_filters());
    }

    #[test]
    fn negative_explicit_bounds_are_dropped() {
        let filter = parse("min_price=-5&max_price=nope");
        assert_eq!(filter.min_price, None);
        assert_eq!(filter.max_price, None);
        assert!(!filter.has_price_filters());
    }
}
