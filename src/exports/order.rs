//! Reference order of condition names.
//!
//! The conditional target with the most conditions sets the canonical order
//! for the whole manifest. Every other conditional target must list the
//! conditions it shares with it in the same relative order.

use crate::manifest::{ExportMap, ExportTarget};

/// Canonical condition order for one manifest.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReferenceOrder<'a> {
    conditions: Vec<&'a str>,
    source_entry: Option<&'a str>,
}

impl<'a> ReferenceOrder<'a> {
    /// Pick the conditional target with the most conditions.
    ///
    /// Ties go to the entry declared first. A map with no conditional targets
    /// yields an empty order, against which every target is consistent.
    pub fn derive(map: &'a ExportMap) -> Self {
        let mut best = Self::default();

        for entry in map {
            if let ExportTarget::Conditions(conditions) = &entry.target {
                if conditions.len() > best.conditions.len() {
                    best = Self {
                        conditions: conditions.iter().map(|c| c.name.as_str()).collect(),
                        source_entry: Some(entry.key.as_str()),
                    };
                }
            }
        }

        tracing::debug!(
            order = ?best.conditions,
            entry = best.source_entry.unwrap_or("<none>"),
            "derived reference condition order"
        );

        best
    }

    /// Build an order directly from condition names.
    pub fn from_names(names: impl IntoIterator<Item = &'a str>) -> Self {
        Self {
            conditions: names.into_iter().collect(),
            source_entry: None,
        }
    }

    /// Position of `name` in the reference order, first occurrence.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.conditions.iter().position(|c| *c == name)
    }

    /// The reference order restricted to `names`, for error messages.
    pub fn expected_for(&self, names: &[&str]) -> Vec<&'a str> {
        self.conditions.iter().copied().filter(|c| names.contains(c)).collect()
    }

    /// Condition names in reference order.
    pub fn as_slice(&self) -> &[&'a str] {
        &self.conditions
    }

    /// Entry the order was taken from.
    pub fn source_entry(&self) -> Option<&'a str> {
        self.source_entry
    }

    /// Whether no conditional target exists.
    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }
}

/// Render condition names as `"a" -> "b" -> "c"`.
pub fn format_order(names: &[&str]) -> String {
    names.iter().map(|n| format!("\"{n}\"")).collect::<Vec<_>>().join(" -> ")
}
