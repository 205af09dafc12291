//! Filter/pagination engine for listing endpoints.
//!
//! Turns caller-supplied page, page size and sort expression into a bounded
//! [`PageQuery`] whose sort column is always one of the listing's safelisted
//! `&'static str` values, and turns a total row count into [`Metadata`].
//! Nothing here performs I/O.

use serde::Serialize;

use crate::validation::ValidationErrors;

// ---------------------------------------------------------------------------
// Bounds and defaults
// ---------------------------------------------------------------------------

/// Highest page number a listing accepts.
pub const MAX_PAGE: i64 = 10_000_000;

/// Largest page a listing returns.
pub const MAX_PAGE_SIZE: i64 = 100;

pub const DEFAULT_PAGE: i64 = 1;
pub const DEFAULT_PAGE_SIZE: i64 = 20;
pub const DEFAULT_SORT: &str = "id";

/// Sort expressions accepted by the room listing. A leading `-` means
/// descending; the remainder is the `rooms` column name.
pub const ROOM_SORT_SAFELIST: &[&str] = &[
    "id",
    "title",
    "room_width",
    "room_height",
    "-id",
    "-title",
    "-room_width",
    "-room_height",
];

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    /// SQL keyword for an `ORDER BY` clause.
    pub fn as_sql(self) -> &'static str {
        match self {
            SortDirection::Ascending => "ASC",
            SortDirection::Descending => "DESC",
        }
    }
}

/// Raw listing parameters as supplied by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Filters {
    pub page: i64,
    pub page_size: i64,
    pub sort: String,
}

impl Default for Filters {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            page_size: DEFAULT_PAGE_SIZE,
            sort: DEFAULT_SORT.to_string(),
        }
    }
}

/// Validated listing parameters, safe to splice into a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageQuery {
    pub page: i64,
    pub page_size: i64,
    /// Column name borrowed from the safelist, never from caller input.
    pub sort_column: &'static str,
    pub direction: SortDirection,
}

/// Pagination summary returned alongside a listing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Metadata {
    pub current_page: i64,
    pub page_size: i64,
    pub first_page: i64,
    pub last_page: i64,
    pub total_records: i64,
}

// ---------------------------------------------------------------------------
// Resolution
// ---------------------------------------------------------------------------

impl Filters {
    /// Check page bounds and safelist membership, reporting every violation.
    pub fn validate(&self, safelist: &[&str]) -> ValidationErrors {
        let mut errors = ValidationErrors::new();

        errors.check(self.page > 0, "page", "must be greater than zero");
        errors.check(self.page <= MAX_PAGE, "page", "must be a maximum of 10 million");

        errors.check(self.page_size > 0, "page_size", "must be greater than zero");
        errors.check(
            self.page_size <= MAX_PAGE_SIZE,
            "page_size",
            "must be a maximum of 100",
        );

        errors.check(
            safelist.contains(&self.sort.as_str()),
            "sort",
            "invalid sort value",
        );

        errors
    }

    /// Validate and resolve into a [`PageQuery`].
    pub fn resolve(&self, safelist: &'static [&'static str]) -> Result<PageQuery, ValidationErrors> {
        self.validate(safelist).into_result()?;

        // validate() guarantees membership, so the lookup cannot miss.
        let entry = safelist
            .iter()
            .copied()
            .find(|s| *s == self.sort)
            .ok_or_else(|| ValidationErrors::single("sort", "invalid sort value"))?;

        let (sort_column, direction) = match entry.strip_prefix('-') {
            Some(column) => (column, SortDirection::Descending),
            None => (entry, SortDirection::Ascending),
        };

        Ok(PageQuery {
            page: self.page,
            page_size: self.page_size,
            sort_column,
            direction,
        })
    }
}

impl PageQuery {
    pub fn limit(&self) -> i64 {
        self.page_size
    }

    pub fn offset(&self) -> i64 {
        (self.page - 1) * self.page_size
    }

    /// Metadata for this page given the total number of matching rows.
    pub fn metadata(&self, total_records: i64) -> Metadata {
        Metadata::calculate(total_records, self.page, self.page_size)
    }
}

impl Metadata {
    /// Compute page metadata. All fields are zero when nothing matched.
    pub fn calculate(total_records: i64, page: i64, page_size: i64) -> Self {
        if total_records <= 0 || page_size <= 0 {
            return Self::default();
        }

        Self {
            current_page: page,
            page_size,
            first_page: 1,
            last_page: (total_records + page_size - 1) / page_size,
            total_records,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
