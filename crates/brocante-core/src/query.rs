// Offer search query builder
//
// Translates the untrusted /offers query parameters into an immutable,
// typed query specification. The storage layer consumes the spec; nothing
// here touches the database.

use serde::Deserialize;
use utoipa::IntoParams;

/// Raw query parameters of GET /offers, exactly as the client sent them.
/// Everything is optional and untrusted; numbers arrive as strings.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct SearchParams {
    /// Case-insensitive substring match against the offer title
    pub title: Option<String>,
    /// Lower price bound, inclusive
    pub price_min: Option<String>,
    /// Upper price bound, inclusive
    pub price_max: Option<String>,
    /// `price-asc` or `price-desc` (suffix matched case-insensitively)
    pub sort: Option<String>,
    /// 1-based page number
    pub page: Option<String>,
    /// Page size; anything that is not a positive integer means "no limit"
    pub limit: Option<String>,
}

/// Filter predicate over the offer collection.
/// Both price bounds combine conjunctively when present.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OfferFilter {
    pub title: Option<String>,
    pub price_min: Option<f64>,
    pub price_max: Option<f64>,
}

impl OfferFilter {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.price_min.is_none() && self.price_max.is_none()
    }
}

/// Explicit price ordering requested by the client
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceSort {
    Ascending,
    Descending,
}

impl PriceSort {
    /// Parse a raw `sort` value. The `price-` prefix is stripped
    /// case-insensitively; a remaining `desc` (any case) selects
    /// descending order, anything else ascending.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        let suffix = match trimmed.get(..6) {
            Some(prefix) if prefix.eq_ignore_ascii_case("price-") => &trimmed[6..],
            _ => trimmed,
        };

        if suffix.eq_ignore_ascii_case("desc") {
            PriceSort::Descending
        } else {
            PriceSort::Ascending
        }
    }
}

/// Pagination window. `limit = None` means the full filtered set is
/// returned and the page number is ignored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Page {
    pub limit: Option<i64>,
    pub offset: i64,
}

impl Page {
    /// Compute the window from raw `page`/`limit` values.
    ///
    /// Effective limit: `limit` iff it parses to a positive integer.
    /// Effective offset: `(page - 1) * limit` when `page` parses to an
    /// integer >= 1, else 0.
    pub fn from_raw(page: Option<&str>, limit: Option<&str>) -> Self {
        let limit = limit
            .and_then(|s| s.trim().parse::<i64>().ok())
            .filter(|l| *l > 0);

        let offset = match limit {
            Some(l) => page
                .and_then(|s| s.trim().parse::<i64>().ok())
                .filter(|p| *p >= 1)
                .map(|p| (p - 1) * l)
                .unwrap_or(0),
            None => 0,
        };

        Page { limit, offset }
    }
}

/// Immutable query specification for the offer collection:
/// filter predicate, optional price ordering, pagination window.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OfferQuery {
    pub filter: OfferFilter,
    pub sort: Option<PriceSort>,
    pub page: Page,
}

impl OfferQuery {
    /// Build the query from untrusted request parameters.
    /// Unparseable or non-finite price bounds are dropped.
    pub fn from_params(params: &SearchParams) -> Self {
        let filter = OfferFilter {
            title: params
                .title
                .as_deref()
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(str::to_string),
            price_min: parse_price(params.price_min.as_deref()),
            price_max: parse_price(params.price_max.as_deref()),
        };

        OfferQuery {
            filter,
            sort: params.sort.as_deref().map(PriceSort::parse),
            page: Page::from_raw(params.page.as_deref(), params.limit.as_deref()),
        }
    }
}

fn parse_price(raw: Option<&str>) -> Option<f64> {
    raw.and_then(|s| s.trim().parse::<f64>().ok())
        .filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(pairs: &[(&str, &str)]) -> SearchParams {
        let mut p = SearchParams::default();
        for (k, v) in pairs {
            let v = Some(v.to_string());
            match *k {
                "title" => p.title = v,
                "priceMin" => p.price_min = v,
                "priceMax" => p.price_max = v,
                "sort" => p.sort = v,
                "page" => p.page = v,
                "limit" => p.limit = v,
                other => panic!("unknown param {other}"),
            }
        }
        p
    }

    #[test]
    fn test_empty_params_build_empty_query() {
        let query = OfferQuery::from_params(&SearchParams::default());

        assert!(query.filter.is_empty());
        assert_eq!(query.sort, None);
        assert_eq!(query.page, Page::default());
    }

    #[test]
    fn test_price_bounds_combine() {
        let query = OfferQuery::from_params(&params(&[("priceMin", "10"), ("priceMax", "20")]));

        assert_eq!(query.filter.price_min, Some(10.0));
        assert_eq!(query.filter.price_max, Some(20.0));
    }

    #[test]
    fn test_unparseable_prices_are_dropped() {
        let query = OfferQuery::from_params(&params(&[
            ("priceMin", "abc"),
            ("priceMax", "NaN"),
        ]));

        assert_eq!(query.filter.price_min, None);
        assert_eq!(query.filter.price_max, None);
    }

    #[test]
    fn test_blank_title_is_no_filter() {
        let query = OfferQuery::from_params(&params(&[("title", "   ")]));
        assert_eq!(query.filter.title, None);
    }

    #[test]
    fn test_sort_parsing() {
        assert_eq!(PriceSort::parse("price-asc"), PriceSort::Ascending);
        assert_eq!(PriceSort::parse("price-desc"), PriceSort::Descending);
        assert_eq!(PriceSort::parse("PRICE-DESC"), PriceSort::Descending);
        assert_eq!(PriceSort::parse("Price-Desc"), PriceSort::Descending);
        // Unknown suffixes fall back to ascending
        assert_eq!(PriceSort::parse("price-up"), PriceSort::Ascending);
        assert_eq!(PriceSort::parse(""), PriceSort::Ascending);
    }

    #[test]
    fn test_pagination_window() {
        // page 1, limit 10 -> offset 0
        assert_eq!(
            Page::from_raw(Some("1"), Some("10")),
            Page { limit: Some(10), offset: 0 }
        );
        // page 3, limit 5 -> offset 10
        assert_eq!(
            Page::from_raw(Some("3"), Some("5")),
            Page { limit: Some(5), offset: 10 }
        );
    }

    #[test]
    fn test_pagination_defaults() {
        // No limit means the full set; page is ignored
        assert_eq!(
            Page::from_raw(Some("4"), None),
            Page { limit: None, offset: 0 }
        );
        // Zero or negative limits mean no limit
        assert_eq!(Page::from_raw(None, Some("0")).limit, None);
        assert_eq!(Page::from_raw(None, Some("-3")).limit, None);
        // Page below 1 or unparseable -> offset 0
        assert_eq!(Page::from_raw(Some("0"), Some("10")).offset, 0);
        assert_eq!(Page::from_raw(Some("x"), Some("10")).offset, 0);
    }

    #[test]
    fn test_pagination_arithmetic_covers_all_pages() {
        // For N matching rows, limit L and page P the returned slice must
        // be min(L, max(0, N - (P-1)*L)) items
        let n: i64 = 23;
        let l: i64 = 5;
        for p in 1..=6 {
            let page = Page::from_raw(Some(&p.to_string()), Some(&l.to_string()));
            let remaining = (n - page.offset).max(0);
            let expected = l.min(remaining);
            assert_eq!(page.offset, (p - 1) * l);
            assert_eq!(page.limit, Some(l));
            // page 5 holds the last 3 rows, page 6 is empty
            match p {
                5 => assert_eq!(expected, 3),
                6 => assert_eq!(expected, 0),
                _ => assert_eq!(expected, l),
            }
        }
    }
}
