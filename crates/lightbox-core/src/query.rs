//! Query-string builder shared by every listing and filter call.

use std::fmt;

/// Ordered collection of request options, rendered into a query string.
///
/// Option order is preserved so requests are reproducible; adding an option
/// under an existing name replaces its value in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryOptions {
    options: Vec<(String, String)>,
}

impl QueryOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an option, replacing the value in place if the name is already set.
    pub fn add_option(&mut self, name: &str, value: impl ToString) {
        let value = value.to_string();
        match self.options.iter_mut().find(|(n, _)| n == name) {
            Some(entry) => entry.1 = value,
            None => self.options.push((name.to_string(), value)),
        }
    }

    /// Remove every option.
    pub fn clear(&mut self) {
        self.options.clear();
    }

    /// Merge another option set into this one; `other` wins on collisions.
    pub fn merge(&mut self, other: &QueryOptions) {
        for (name, value) in &other.options {
            self.add_option(name, value);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.options.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    /// Render the options as a `?name=value&...` query string.
    ///
    /// Returns an empty string when no options are set. Values are
    /// percent-encoded; names are taken as-is (they are crate-controlled).
    pub fn get_options(&self) -> String {
        if self.options.is_empty() {
            return String::new();
        }
        let mut out = String::from("?");
        for (i, (name, value)) in self.options.iter().enumerate() {
            if i > 0 {
                out.push('&');
            }
            out.push_str(name);
            out.push('=');
            out.push_str(&urlencoding::encode(value));
        }
        out
    }
}

impl fmt::Display for QueryOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.get_options())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_renders_nothing() {
        assert_eq!(QueryOptions::new().get_options(), "");
    }

    #[test]
    fn test_order_preserved() {
        let mut op = QueryOptions::new();
        op.add_option("limit", "0");
        op.add_option("keyword_category_id", "3,4");
        assert_eq!(op.get_options(), "?limit=0&keyword_category_id=3%2C4");
    }

    #[test]
    fn test_duplicate_name_replaces_in_place() {
        let mut op = QueryOptions::new();
        op.add_option("limit", "10");
        op.add_option("id", "5");
        op.add_option("limit", "0");
        assert_eq!(op.get_options(), "?limit=0&id=5");
    }

    #[test]
    fn test_clear() {
        let mut op = QueryOptions::new();
        op.add_option("limit", "0");
        op.clear();
        assert!(op.is_empty());
        assert_eq!(op.get_options(), "");
    }

    #[test]
    fn test_merge_other_wins() {
        let mut base = QueryOptions::new();
        base.add_option("limit", "10");
        base.add_option("offset", "0");

        let mut other = QueryOptions::new();
        other.add_option("limit", "0");
        other.add_option("name", "Spring Shoot");

        base.merge(&other);
        assert_eq!(
            base.get_options(),
            "?limit=0&offset=0&name=Spring%20Shoot"
        );
    }

    #[test]
    fn test_numeric_values_accepted() {
        let mut op = QueryOptions::new();
        op.add_option("id", 42);
        assert_eq!(op.get_options(), "?id=42");
    }
}
