//! Entrant taxonomy shared by the engine and every host
//!
//! Participants and results live here so that events can carry them without
//! the vocabulary crate depending on the engine.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identity of a participant: the originating row of the source table
///
/// Names may collide, rows may not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RowIndex(pub usize);

impl fmt::Display for RowIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "row {}", self.0)
    }
}

/// A single entrant
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Participant {
    /// Source row (identity for duplicate prevention)
    pub row: RowIndex,
    /// Optional external id, passed through for display
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Display name, never empty
    pub name: String,
    /// Optional account, passed through for display
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account: Option<String>,
}

impl Participant {
    /// Create a participant with only a name
    pub fn new(row: usize, name: impl Into<String>) -> Self {
        Self {
            row: RowIndex(row),
            id: None,
            name: name.into(),
            account: None,
        }
    }

    /// Builder: set external id
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Builder: set account
    pub fn with_account(mut self, account: impl Into<String>) -> Self {
        self.account = Some(account.into());
        self
    }
}

/// One selected participant and its position in the session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrawResult {
    /// 1-based "Winner #k" index within the session
    pub sequence: usize,
    pub participant: Participant,
}

impl DrawResult {
    pub fn new(sequence: usize, participant: Participant) -> Self {
        Self {
            sequence,
            participant,
        }
    }

    /// Identity of the winning row
    pub fn row(&self) -> RowIndex {
        self.participant.row
    }

    /// "Winner #k"
    pub fn label(&self) -> String {
        format!("Winner #{}", self.sequence)
    }
}
