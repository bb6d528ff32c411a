//! Draw session — results accumulated across cycles of one event

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use ld_stage::{DrawResult, RowIndex};

/// Append-only record of every winner in one event
///
/// Starting a new event means constructing a new session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DrawSession {
    results: Vec<DrawResult>,
    excluded: BTreeSet<RowIndex>,
}

impl DrawSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a result and exclude its identity from later no-duplicate draws
    pub fn record(&mut self, result: DrawResult) {
        self.excluded.insert(result.row());
        self.results.push(result);
    }

    /// Every result, in draw order
    pub fn all_results(&self) -> &[DrawResult] {
        &self.results
    }

    /// Identities already drawn
    pub fn excluded_identities(&self) -> &BTreeSet<RowIndex> {
        &self.excluded
    }

    /// Sequence number the next result will carry
    pub fn next_sequence(&self) -> usize {
        self.results.len() + 1
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn last(&self) -> Option<&DrawResult> {
        self.results.last()
    }
}
