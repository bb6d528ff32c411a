//! Participant sets built from tabular input

use std::collections::HashSet;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use ld_stage::{Participant, RowIndex};

use crate::error::DrawError;

/// Tabular import error
#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("Table must contain a 'Name' column")]
    MissingNameColumn,

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Participants(#[from] DrawError),
}

/// Detected column positions of a participant table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnMap {
    pub id: Option<usize>,
    pub name: usize,
    pub account: Option<usize>,
}

impl ColumnMap {
    /// Detect columns case-insensitively.
    ///
    /// `id` and `name` must match exactly; the account column is the first
    /// header containing "account".
    pub fn detect<S: AsRef<str>>(headers: &[S]) -> Result<Self, ImportError> {
        let lower: Vec<String> = headers
            .iter()
            .map(|h| h.as_ref().trim().to_lowercase())
            .collect();

        let name = lower
            .iter()
            .position(|h| h == "name")
            .ok_or(ImportError::MissingNameColumn)?;

        Ok(Self {
            id: lower.iter().position(|h| h == "id"),
            name,
            account: lower.iter().position(|h| h.contains("account")),
        })
    }
}

/// Ordered, validated collection of entrants
///
/// Always holds at least one participant with a non-empty name.
#[derive(Debug, Clone, PartialEq)]
pub struct ParticipantSet {
    participants: Vec<Participant>,
}

impl ParticipantSet {
    /// Build from already-constructed participants
    ///
    /// Blank names are dropped. Fails if nothing is left.
    pub fn new(participants: Vec<Participant>) -> Result<Self, DrawError> {
        let participants: Vec<Participant> = participants
            .into_iter()
            .filter_map(|mut p| {
                let trimmed = p.name.trim();
                if trimmed.is_empty() {
                    log::warn!("Skipping {} with blank name", p.row);
                    return None;
                }
                if trimmed.len() != p.name.len() {
                    p.name = trimmed.to_string();
                }
                Some(p)
            })
            .collect();

        if participants.is_empty() {
            return Err(DrawError::EmptyParticipants);
        }

        Ok(Self { participants })
    }

    /// Build from plain names, one row per name
    pub fn from_names<I, S>(names: I) -> Result<Self, DrawError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(
            names
                .into_iter()
                .enumerate()
                .map(|(row, name)| Participant::new(row, name))
                .collect(),
        )
    }

    /// Build from a header row and data rows
    ///
    /// Row identity is the 0-based data-row index. Rows repeating an id that
    /// was already seen are skipped.
    pub fn from_table<H, R, C>(headers: &[H], rows: R) -> Result<Self, ImportError>
    where
        H: AsRef<str>,
        R: IntoIterator<Item = Vec<C>>,
        C: AsRef<str>,
    {
        let columns = ColumnMap::detect(headers)?;
        let mut seen_ids = HashSet::new();
        let mut participants = Vec::new();

        for (row, cells) in rows.into_iter().enumerate() {
            let cell = |idx: Option<usize>| {
                idx.and_then(|i| cells.get(i))
                    .map(|c| c.as_ref().trim())
                    .filter(|c| !c.is_empty())
                    .map(str::to_string)
            };

            let Some(name) = cell(Some(columns.name)) else {
                log::warn!("Skipping row {row}: empty name");
                continue;
            };

            let id = cell(columns.id);
            if let Some(ref id) = id {
                if !seen_ids.insert(id.clone()) {
                    log::warn!("Skipping row {row}: duplicate id '{id}'");
                    continue;
                }
            }

            participants.push(Participant {
                row: RowIndex(row),
                id,
                name,
                account: cell(columns.account),
            });
        }

        Ok(Self::new(participants)?)
    }

    /// Read a CSV table with a header row
    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self, ImportError> {
        let mut table = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers: Vec<String> = table.headers()?.iter().map(str::to_string).collect();
        let rows = table
            .records()
            .map(|record| record.map(|r| r.iter().map(str::to_string).collect::<Vec<_>>()))
            .collect::<Result<Vec<_>, _>>()?;

        log::debug!("Read {} participant rows", rows.len());
        Self::from_table(&headers, rows)
    }

    /// Read a CSV file with a header row
    pub fn from_csv_path(path: impl AsRef<Path>) -> Result<Self, ImportError> {
        let file = File::open(path.as_ref())?;
        Self::from_csv_reader(file)
    }

    pub fn len(&self) -> usize {
        self.participants.len()
    }

    /// Always false for a constructed set
    pub fn is_empty(&self) -> bool {
        self.participants.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Participant> {
        self.participants.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Participant> {
        self.participants.iter()
    }

    pub fn as_slice(&self) -> &[Participant] {
        &self.participants
    }

    /// Number of participants whose identity is not in `excluded`
    pub fn eligible_count(&self, excluded: &std::collections::BTreeSet<RowIndex>) -> usize {
        self.participants
            .iter()
            .filter(|p| !excluded.contains(&p.row))
            .count()
    }
}

impl<'a> IntoIterator for &'a ParticipantSet {
    type Item = &'a Participant;
    type IntoIter = std::slice::Iter<'a, Participant>;

    fn into_iter(self) -> Self::IntoIter {
        self.participants.iter()
    }
}
