//! List query building
//!
//! Writers, blogs and comments share one listing contract: `page`, `limit`,
//! `sortBy`, `sortOrder` and `search` arrive as raw query strings, get
//! validated together, and become a [`ListSpec`] that the Postgres
//! repositories translate into `WHERE / ORDER BY / LIMIT / OFFSET`.

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

use crate::error::app_error::{AppError, AppResult};
use crate::validation::Validator;

pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_LIMIT: u32 = 10;
pub const MAX_LIMIT: u32 = 100;
pub const MAX_SEARCH_LEN: usize = 100;

// ============================================================================
// Sorting
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    /// Absent means descending; any value other than `desc` is ascending.
    pub fn from_param(raw: Option<&str>) -> Self {
        match raw {
            None | Some("desc") => SortOrder::Desc,
            Some(_) => SortOrder::Asc,
        }
    }

    pub const fn as_sql(self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

/// Closed set of sortable fields for one entity
///
/// Request names map to SQL columns here and nowhere else, so nothing from
/// the query string is ever interpolated into SQL.
pub trait SortKey: Copy + Sized {
    const DEFAULT: Self;

    fn from_param(raw: &str) -> Option<Self>;

    /// Fully qualified column used in `ORDER BY`
    fn column(self) -> &'static str;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sort<K> {
    pub key: K,
    pub order: SortOrder,
}

impl<K: SortKey> Default for Sort<K> {
    fn default() -> Self {
        Self {
            key: K::DEFAULT,
            order: SortOrder::Desc,
        }
    }
}

impl<K: SortKey> Sort<K> {
    /// `ORDER BY` body; ties break on id so pages are stable.
    pub fn order_by(&self, id_column: &str) -> String {
        format!(
            "{} {}, {} {}",
            self.key.column(),
            self.order.as_sql(),
            id_column,
            self.order.as_sql()
        )
    }
}

// ============================================================================
// Pagination
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
    pub limit: u32,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl PageRequest {
    pub fn new(page: u32, limit: u32) -> Self {
        Self { page, limit }
    }

    pub fn offset(&self) -> i64 {
        i64::from(self.page.saturating_sub(1)) * i64::from(self.limit)
    }

    pub fn limit_i64(&self) -> i64 {
        i64::from(self.limit)
    }

    /// `ceil(total / limit)`; a zero limit yields zero pages
    pub fn total_pages(&self, total: u64) -> u64 {
        if self.limit == 0 {
            return 0;
        }
        total.div_ceil(u64::from(self.limit))
    }
}

// ============================================================================
// Search
// ============================================================================

/// Case-insensitive literal substring
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTerm(String);

impl SearchTerm {
    /// Empty or whitespace-only input means no search
    pub fn new(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `ILIKE` pattern with `\`, `%` and `_` escaped
    pub fn like_pattern(&self) -> String {
        let mut pattern = String::with_capacity(self.0.len() + 2);
        pattern.push('%');
        for c in self.0.chars() {
            if matches!(c, '\\' | '%' | '_') {
                pattern.push('\\');
            }
            pattern.push(c);
        }
        pattern.push('%');
        pattern
    }

    /// In-memory equivalent of the `ILIKE` match
    pub fn matches(&self, haystack: &str) -> bool {
        haystack.to_lowercase().contains(&self.0.to_lowercase())
    }
}

// ============================================================================
// Request parameters
// ============================================================================

/// Raw listing parameters as they arrive in the query string
///
/// Everything stays a string until [`ListParams::to_spec`] so a bad number
/// becomes a field error instead of an extractor rejection.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListParams {
    pub page: Option<String>,
    pub limit: Option<String>,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
    pub search: Option<String>,
}

/// Validated listing specification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListSpec<K> {
    pub search: Option<SearchTerm>,
    pub sort: Sort<K>,
    pub page: PageRequest,
}

impl<K: SortKey> Default for ListSpec<K> {
    fn default() -> Self {
        Self {
            search: None,
            sort: Sort::default(),
            page: PageRequest::default(),
        }
    }
}

impl ListParams {
    /// Validate into a [`ListSpec`], recording failures in `v`
    pub fn to_spec<K: SortKey>(&self, v: &mut Validator) -> Option<ListSpec<K>> {
        let page = v.check(parse_bounded(
            "page",
            self.page.as_deref(),
            DEFAULT_PAGE,
            1,
            u32::MAX,
            "Page must be a positive integer",
        ));
        let limit = v.check(parse_bounded(
            "limit",
            self.limit.as_deref(),
            DEFAULT_LIMIT,
            1,
            MAX_LIMIT,
            "Limit must be between 1 and 100",
        ));

        let search = match self.search.as_deref() {
            Some(raw) if raw.trim().chars().count() > MAX_SEARCH_LEN => {
                v.push(
                    "search",
                    "Search term cannot exceed 100 characters",
                    Some(raw.into()),
                );
                None
            }
            Some(raw) => SearchTerm::new(raw),
            None => None,
        };

        let key = match self.sort_by.as_deref() {
            None => Some(K::DEFAULT),
            Some(raw) => {
                let key = K::from_param(raw);
                if key.is_none() {
                    v.push("sortBy", "Invalid sort field", Some(raw.into()));
                }
                key
            }
        };

        let order = match self.sort_order.as_deref() {
            None | Some("asc") | Some("desc") => Some(SortOrder::from_param(self.sort_order.as_deref())),
            Some(raw) => {
                v.push("sortOrder", "Sort order must be 'asc' or 'desc'", Some(raw.into()));
                None
            }
        };

        let (Some(page), Some(limit), Some(key), Some(order)) = (page, limit, key, order) else {
            return None;
        };
        Some(ListSpec {
            search,
            sort: Sort { key, order },
            page: PageRequest::new(page, limit),
        })
    }
}

fn parse_bounded(
    field: &str,
    raw: Option<&str>,
    default: u32,
    min: u32,
    max: u32,
    message: &str,
) -> AppResult<u32> {
    let Some(raw) = raw else {
        return Ok(default);
    };
    match raw.trim().parse::<u32>() {
        Ok(n) if (min..=max).contains(&n) => Ok(n),
        _ => Err(AppError::invalid_field(field, message, raw)),
    }
}

/// Tri-state boolean filter: absent means "do not filter"
pub fn parse_flag(field: &str, raw: Option<&str>) -> AppResult<Option<bool>> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some("true") => Ok(Some(true)),
        Some("false") => Ok(Some(false)),
        Some(other) => Err(AppError::invalid_field(
            field,
            format!("{} must be true or false", field),
            other,
        )),
    }
}

// ============================================================================
// Output
// ============================================================================

/// One page of results
///
/// Serializes as `{<label>: [...], totalPages, currentPage, total}` where the
/// label names the entity (`blogs`, `writers`, `comments`).
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub label: &'static str,
    pub items: Vec<T>,
    pub total_pages: u64,
    pub current_page: u32,
    pub total: u64,
}

impl<T> Page<T> {
    pub fn new(label: &'static str, items: Vec<T>, total: u64, req: PageRequest) -> Self {
        Self {
            label,
            items,
            total_pages: req.total_pages(total),
            current_page: req.page,
            total,
        }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            label: self.label,
            items: self.items.into_iter().map(f).collect(),
            total_pages: self.total_pages,
            current_page: self.current_page,
            total: self.total,
        }
    }
}

impl<T: Serialize> Serialize for Page<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(4))?;
        map.serialize_entry(self.label, &self.items)?;
        map.serialize_entry("totalPages", &self.total_pages)?;
        map.serialize_entry("currentPage", &self.current_page)?;
        map.serialize_entry("total", &self.total)?;
        map.end()
    }
}
