//! Relevance Port
//!
//! Scoring seam for citations. The keyword-overlap matcher in
//! `services::relevance` is the default; embedding or model based
//! scorers can replace it without touching the poll loop or store.

use std::collections::{BTreeMap, BTreeSet};

/// Decides which previously seen contributions a new jab builds on
pub trait RelevanceMatcher: Send + Sync {
    /// Return the identifiers in `candidates` relevant to `content`.
    ///
    /// `exclude` is never part of the result.
    fn find_relevant(
        &self,
        content: &str,
        candidates: &BTreeMap<String, String>,
        exclude: Option<&str>,
    ) -> BTreeSet<String>;
}
