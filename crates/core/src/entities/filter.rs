//! List filters built from request query parameters.
//!
//! The `search` parameter becomes a case-insensitive substring match OR'd
//! across the entity's search fields. Every other recognized parameter adds
//! an exact, case-sensitive condition; conditions are AND'ed. Empty and
//! unrecognized parameters are dropped.

use std::collections::HashMap;

use keystone_domain::EntityKind;

/// Query parameter carrying the free-text term.
pub const SEARCH_PARAM: &str = "search";

/// Filter over one entity's records. Field names are API (camelCase) names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListFilter {
    kind: EntityKind,
    search: Option<String>,
    exact: Vec<(&'static str, String)>,
}

impl ListFilter {
    /// A filter that matches every record of `kind`.
    pub const fn new(kind: EntityKind) -> Self {
        Self { kind, search: None, exact: Vec::new() }
    }

    /// Build from raw query parameters.
    pub fn from_params(kind: EntityKind, params: &HashMap<String, String>) -> Self {
        let mut filter = Self::new(kind);
        if let Some(term) = params.get(SEARCH_PARAM) {
            filter = filter.with_search(term);
        }
        // Iterate the recognized fields, not the map, for a stable order.
        for field in kind.filter_fields() {
            if let Some(value) = params.get(*field) {
                filter = filter.with_filter(field, value);
            }
        }
        filter
    }

    /// Set the search term. Blank terms clear it.
    #[must_use]
    pub fn with_search(mut self, term: &str) -> Self {
        let term = term.trim();
        self.search = (!term.is_empty()).then(|| term.to_string());
        self
    }

    /// Add an exact-match condition. Ignored when `field` is not a filter
    /// field of this entity or `value` is empty.
    #[must_use]
    pub fn with_filter(mut self, field: &str, value: &str) -> Self {
        if value.is_empty() {
            return self;
        }
        if let Some(&known) = self.kind.filter_fields().iter().find(|f| **f == field) {
            self.exact.retain(|(f, _)| *f != known);
            self.exact.push((known, value.to_string()));
        }
        self
    }

    pub const fn kind(&self) -> EntityKind {
        self.kind
    }

    /// The trimmed search term, if any.
    pub fn search(&self) -> Option<&str> {
        self.search.as_deref()
    }

    /// Fields the search term is matched against.
    pub const fn search_fields(&self) -> &'static [&'static str] {
        self.kind.search_fields()
    }

    /// Exact-match conditions as `(field, value)` pairs.
    pub fn exact(&self) -> &[(&'static str, String)] {
        &self.exact
    }

    /// True when the filter imposes no constraint.
    pub fn is_unconstrained(&self) -> bool {
        self.search.is_none() && self.exact.is_empty()
    }

    /// Evaluate the filter against a record exposed as a field lookup.
    ///
    /// Reference semantics for stores that filter in memory; SQL stores
    /// translate the same rules into a WHERE clause.
    pub fn matches<'a, F>(&self, field: F) -> bool
    where
        F: Fn(&str) -> Option<&'a str>,
    {
        let exact_ok = self.exact.iter().all(|(name, value)| field(name) == Some(value.as_str()));
        if !exact_ok {
            return false;
        }
        match &self.search {
            None => true,
            Some(term) => {
                let needle = term.to_lowercase();
                self.search_fields()
                    .iter()
                    .filter_map(|name| field(name))
                    .any(|haystack| haystack.to_lowercase().contains(&needle))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs.iter().map(|(k, v)| ((*k).to_string(), (*v).to_string())).collect()
    }

    #[test]
    fn empty_and_unknown_params_impose_nothing() {
        let filter = ListFilter::from_params(
            EntityKind::Lead,
            &params(&[("search", "  "), ("status", ""), ("stage", "Won"), ("color", "red")]),
        );
        assert!(filter.is_unconstrained());
    }

    #[test]
    fn recognized_params_become_exact_conditions() {
        let filter = ListFilter::from_params(
            EntityKind::Deal,
            &params(&[("stage", "Negotiation"), ("accountId", "acc-1"), ("search", " pilot ")]),
        );
        assert_eq!(filter.search(), Some("pilot"));
        assert_eq!(
            filter.exact(),
            &[("stage", "Negotiation".to_string()), ("accountId", "acc-1".to_string())]
        );
    }

    #[test]
    fn repeated_filter_replaces_previous_value() {
        let filter = ListFilter::new(EntityKind::Task)
            .with_filter("status", "Pending")
            .with_filter("status", "Done");
        assert_eq!(filter.exact(), &[("status", "Done".to_string())]);
    }

    #[test]
    fn search_is_case_insensitive_across_fields() {
        let filter = ListFilter::new(EntityKind::Contact).with_search("SMITH");
        let record = |name: &str| match name {
            "firstName" => Some("Ann"),
            "lastName" => Some("Goldsmith"),
            _ => None,
        };
        assert!(filter.matches(record));

        let other = |name: &str| match name {
            "firstName" => Some("Bob"),
            "notes" => Some("smith"),
            _ => None,
        };
        assert!(!filter.matches(other));
    }

    #[test]
    fn exact_filters_are_case_sensitive_and_intersect_with_search() {
        let filter =
            ListFilter::new(EntityKind::Lead).with_search("acme").with_filter("status", "New");
        let lead = |status: &'static str| {
            move |name: &str| match name {
                "company" => Some("Acme Corp"),
                "status" => Some(status),
                _ => None,
            }
        };
        assert!(filter.matches(lead("New")));
        assert!(!filter.matches(lead("new")));
        assert!(!ListFilter::new(EntityKind::Lead).with_search("globex").matches(lead("New")));
    }
}
