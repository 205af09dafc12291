//! Ordered field -> message report.

use std::fmt;

use indexmap::IndexMap;
use serde::Serialize;

/// Field-level violations in the order they were detected.
///
/// Only the first message recorded for a field is kept. Serializes as a
/// plain JSON object (`{"title": "must be provided"}`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(IndexMap<String, String>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// A report holding exactly one violation.
    pub fn single(field: impl Into<String>, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.add(field, message);
        errors
    }

    /// `true` when no violation has been recorded.
    pub fn is_valid(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Record a violation unless the field already has one.
    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.entry(field.into()).or_insert_with(|| message.into());
    }

    /// Record `message` against `field` when `ok` is false.
    pub fn check(&mut self, ok: bool, field: &str, message: &str) {
        if !ok {
            self.add(field, message);
        }
    }

    /// Append the violations of `other`, keeping existing messages.
    pub fn merge(&mut self, other: ValidationErrors) {
        for (field, message) in other.0 {
            self.add(field, message);
        }
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(f, m)| (f.as_str(), m.as_str()))
    }

    /// `Ok(())` when valid, otherwise the report itself as the error.
    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_valid() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, message) in &self.0 {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{field}: {message}")?;
            first = false;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_message_per_field_wins() {
        let mut errors = ValidationErrors::new();
        errors.add("title", "must be provided");
        errors.add("title", "must not be more than 30 characters long");
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.get("title"), Some("must be provided"));
    }

    #[test]
    fn merge_keeps_insertion_order() {
        let mut errors = ValidationErrors::single("width", "must be provided");
        let mut other = ValidationErrors::new();
        other.add("height", "must be provided");
        other.add("width", "must be greater than zero");
        errors.merge(other);

        let fields: Vec<&str> = errors.iter().map(|(f, _)| f).collect();
        assert_eq!(fields, vec!["width", "height"]);
        assert_eq!(errors.get("width"), Some("must be provided"));
    }

    #[test]
    fn check_only_records_failures() {
        let mut errors = ValidationErrors::new();
        errors.check(true, "x", "must not be negative");
        assert!(errors.is_valid());
        errors.check(false, "x", "must not be negative");
        assert!(!errors.is_valid());
    }

    #[test]
    fn into_result_and_display() {
        assert!(ValidationErrors::new().into_result().is_ok());

        let mut errors = ValidationErrors::single("page", "must be greater than zero");
        errors.add("sort", "invalid sort value");
        assert_eq!(
            errors.to_string(),
            "page: must be greater than zero; sort: invalid sort value"
        );
        assert_eq!(
            serde_json::to_value(&errors).unwrap(),
            serde_json::json!({"page": "must be greater than zero", "sort": "invalid sort value"})
        );
        assert!(errors.into_result().is_err());
    }
}
