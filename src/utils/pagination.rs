use rocket_okapi::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::utils::error::{AppError, AppResult};

pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_PER_PAGE: u32 = 10;
pub const MAX_PER_PAGE: u32 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    pub fn as_sql(&self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortOrder::Asc => write!(f, "asc"),
            SortOrder::Desc => write!(f, "desc"),
        }
    }
}

impl FromStr for SortOrder {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(SortOrder::Asc),
            "desc" => Ok(SortOrder::Desc),
            _ => Err(AppError::invalid_field("order", "order must be 'asc' or 'desc'")),
        }
    }
}

/// Validated page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageQuery {
    pub page: u32,
    pub per_page: u32,
    pub order: SortOrder,
}

impl Default for PageQuery {
    fn default() -> Self {
        PageQuery {
            page: DEFAULT_PAGE,
            per_page: DEFAULT_PER_PAGE,
            order: SortOrder::Desc,
        }
    }
}

impl PageQuery {
    // Build from raw query string values, applying defaults for missing ones
    pub fn parse(
        page: Option<&str>,
        per_page: Option<&str>,
        order: Option<&str>,
    ) -> AppResult<Self> {
        let page = match page {
            Some(raw) => raw
                .trim()
                .parse::<u32>()
                .ok()
                .filter(|n| *n >= 1)
                .ok_or_else(|| AppError::invalid_field("page", "page must be an integer ≥ 1"))?,
            None => DEFAULT_PAGE,
        };

        let per_page = match per_page {
            Some(raw) => raw
                .trim()
                .parse::<u32>()
                .ok()
                .filter(|n| (1..=MAX_PER_PAGE).contains(n))
                .ok_or_else(|| {
                    AppError::invalid_field(
                        "per_page",
                        format!("per_page must be an integer between 1 and {}", MAX_PER_PAGE),
                    )
                })?,
            None => DEFAULT_PER_PAGE,
        };

        let order = match order {
            Some(raw) => raw.parse()?,
            None => SortOrder::default(),
        };

        Ok(PageQuery {
            page,
            per_page,
            order,
        })
    }

    pub fn skip(&self) -> u64 {
        (self.page as u64 - 1) * self.per_page as u64
    }

    pub fn limit(&self) -> u64 {
        self.per_page as u64
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    pub page: u32,
    #[serde(rename = "per_page")]
    pub per_page: u32,
    pub total: u64,
    pub total_pages: u64,
    pub has_prev: bool,
    pub has_next: bool,
    pub prev_page: Option<u32>,
    pub next_page: Option<u32>,
    pub order: SortOrder,
}

impl PageMeta {
    /// `returned` is the number of rows actually fetched for this page.
    pub fn new(query: &PageQuery, total: u64, returned: usize) -> Self {
        let total_pages = total_pages(total, query.per_page);
        let has_prev = query.page > 1;
        let has_next = query.skip() + (returned as u64) < total;

        PageMeta {
            page: query.page,
            per_page: query.per_page,
            total,
            total_pages,
            has_prev,
            has_next,
            prev_page: if has_prev { Some(query.page - 1) } else { None },
            next_page: if has_next { Some(query.page + 1) } else { None },
            order: query.order,
        }
    }
}

pub fn total_pages(total: u64, per_page: u32) -> u64 {
    if total == 0 || per_page == 0 {
        return 0;
    }
    total.div_ceil(per_page as u64)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(page: u32, per_page: u32) -> PageQuery {
        PageQuery {
            page,
            per_page,
            order: SortOrder::Desc,
        }
    }

    #[test]
    fn defaults_apply_when_params_missing() {
        let q = PageQuery::parse(None, None, None).unwrap();
        assert_eq!(q, PageQuery::default());
        assert_eq!(q.skip(), 0);
        assert_eq!(q.limit(), 10);
    }

    #[test]
    fn parse_accepts_valid_values() {
        let q = PageQuery::parse(Some("3"), Some("25"), Some("asc")).unwrap();
        assert_eq!(q.page, 3);
        assert_eq!(q.per_page, 25);
        assert_eq!(q.order, SortOrder::Asc);
        assert_eq!(q.skip(), 50);
    }

    #[test]
    fn parse_rejects_out_of_range_values() {
        assert!(PageQuery::parse(Some("0"), None, None).is_err());
        assert!(PageQuery::parse(Some("-1"), None, None).is_err());
        assert!(PageQuery::parse(Some("abc"), None, None).is_err());
        assert!(PageQuery::parse(None, Some("0"), None).is_err());
        assert!(PageQuery::parse(None, Some("101"), None).is_err());
        assert!(PageQuery::parse(None, None, Some("sideways")).is_err());
    }

    #[test]
    fn last_page_of_twenty_five() {
        let meta = PageMeta::new(&query(3, 10), 25, 5);
        assert_eq!(meta.total_pages, 3);
        assert!(!meta.has_next);
        assert!(meta.has_prev);
        assert_eq!(meta.prev_page, Some(2));
        assert_eq!(meta.next_page, None);
    }

    #[test]
    fn first_page_of_twenty_five() {
        let meta = PageMeta::new(&query(1, 10), 25, 10);
        assert!(meta.has_next);
        assert!(!meta.has_prev);
        assert_eq!(meta.next_page, Some(2));
        assert_eq!(meta.prev_page, None);
    }

    #[test]
    fn empty_table_has_no_pages() {
        let meta = PageMeta::new(&query(1, 10), 0, 0);
        assert_eq!(meta.total_pages, 0);
        assert!(!meta.has_next);
        assert!(!meta.has_prev);
    }

    #[test]
    fn page_past_the_end() {
        let meta = PageMeta::new(&query(5, 10), 25, 0);
        assert_eq!(meta.total_pages, 3);
        assert!(!meta.has_next);
        assert!(meta.has_prev);
    }

    #[test]
    fn meta_serializes_with_mixed_case_keys() {
        let meta = PageMeta::new(&query(2, 10), 25, 10);
        let value = serde_json::to_value(&meta).unwrap();
        assert_eq!(value["per_page"], 10);
        assert_eq!(value["totalPages"], 3);
        assert_eq!(value["hasNext"], true);
        assert_eq!(value["order"], "desc");
    }
}
