//! Query parameter types for listing endpoints.
//!
//! Parameters arrive as raw strings so a non-integer value becomes a
//! field-level validation error instead of an extractor rejection.

use ehome_core::filters::{
    Filters, PageQuery, DEFAULT_PAGE, DEFAULT_PAGE_SIZE, DEFAULT_SORT, ROOM_SORT_SAFELIST,
};
use ehome_core::validation::ValidationErrors;
use ehome_db::models::room::RoomSearch;
use serde::Deserialize;

/// `GET /rooms?title=&width=&height=&page=&page_size=&sort=`
#[derive(Debug, Default, Deserialize)]
pub struct ListRoomsParams {
    pub title: Option<String>,
    pub width: Option<String>,
    pub height: Option<String>,
    pub page: Option<String>,
    pub page_size: Option<String>,
    pub sort: Option<String>,
}

impl ListRoomsParams {
    /// Parse and validate into search criteria plus a resolved page query,
    /// reporting every bad parameter at once.
    pub fn resolve(&self) -> Result<(RoomSearch, PageQuery), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let search = RoomSearch {
            title: self.title.clone().unwrap_or_default(),
            max_width: read_int(self.width.as_deref(), "width", 0, &mut errors),
            max_height: read_int(self.height.as_deref(), "height", 0, &mut errors),
        };

        let filters = Filters {
            page: read_int(self.page.as_deref(), "page", DEFAULT_PAGE, &mut errors),
            page_size: read_int(
                self.page_size.as_deref(),
                "page_size",
                DEFAULT_PAGE_SIZE,
                &mut errors,
            ),
            sort: self
                .sort
                .as_deref()
                .filter(|s| !s.is_empty())
                .unwrap_or(DEFAULT_SORT)
                .to_string(),
        };

        errors.merge(filters.validate(ROOM_SORT_SAFELIST));
        errors.into_result()?;

        let page = filters.resolve(ROOM_SORT_SAFELIST)?;
        Ok((search, page))
    }
}

/// An absent or empty value yields `default`; anything else must parse as
/// an integer.
fn read_int(value: Option<&str>, key: &str, default: i64, errors: &mut ValidationErrors) -> i64 {
    match value {
        None | Some("") => default,
        Some(raw) => raw.parse().unwrap_or_else(|_| {
            errors.add(key, "must be an integer value");
            default
        }),
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use ehome_core::filters::SortDirection;

    use super::*;

    fn params(pairs: &[(&str, &str)]) -> ListRoomsParams {
        let mut p = ListRoomsParams::default();
        for (key, value) in pairs {
            let value = Some(value.to_string());
            match *key {
                "title" => p.title = value,
                "width" => p.width = value,
                "height" => p.height = value,
                "page" => p.page = value,
                "page_size" => p.page_size = value,
                "sort" => p.sort = value,
                other => panic!("unknown key {other}"),
            }
        }
        p
    }

    #[test]
    fn defaults_apply_when_absent() {
        let (search, page) = ListRoomsParams::default().resolve().unwrap();
        assert_eq!(search, RoomSearch::default());
        assert_eq!(page.page, 1);
        assert_eq!(page.page_size, 20);
        assert_eq!(page.sort_column, "id");
        assert_eq!(page.direction, SortDirection::Ascending);
    }

    #[test]
    fn values_are_parsed() {
        let (search, page) = params(&[
            ("title", "blue kitchen"),
            ("width", "400"),
            ("page", "2"),
            ("page_size", "5"),
            ("sort", "-title"),
        ])
        .resolve()
        .unwrap();
        assert_eq!(search.title, "blue kitchen");
        assert_eq!(search.max_width, 400);
        assert_eq!(search.max_height, 0);
        assert_eq!(page.offset(), 5);
        assert_eq!(page.sort_column, "title");
        assert_eq!(page.direction, SortDirection::Descending);
    }

    #[test]
    fn non_integers_are_field_errors() {
        let errors = params(&[("width", "wide"), ("page", "1.5")])
            .resolve()
            .unwrap_err();
        assert_eq!(errors.get("width"), Some("must be an integer value"));
        assert_eq!(errors.get("page"), Some("must be an integer value"));
    }

    #[test]
    fn unknown_sort_and_bounds_are_reported_together() {
        let errors = params(&[("sort", "drop_table"), ("page_size", "101")])
            .resolve()
            .unwrap_err();
        assert_eq!(errors.get("sort"), Some("invalid sort value"));
        assert_eq!(errors.get("page_size"), Some("must be a maximum of 100"));
    }

    #[test]
    fn zero_page_is_rejected() {
        let result = params(&[("page", "0")]).resolve();
        assert_matches!(result, Err(e) if e.get("page") == Some("must be greater than zero"));
    }
}
