//! Inbound link records and the sources that produce them.
//!
//! A [`LinkRecord`] is one raw row of a link list as an external producer
//! (typically a SQL view) hands it over. Endpoints are optional because the
//! producer may return NULLs; [`PathGraph::load_link_list`] rejects such rows.
//!
//! [`PathGraph::load_link_list`]: super::PathGraph::load_link_list

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::graph::Connection;

use super::PathGraphError;

// ---------------------------------------------------------------------------
// LinkDirection
// ---------------------------------------------------------------------------

/// Direction code of a link, as stored in the link direction table.
///
/// | Code  | Variant         |
/// |-------|-----------------|
/// | `BID` | `Bidirectional` |
/// | `STE` | `StartToEnd`    |
/// | `ETS` | `EndToStart`    |
///
/// Only `Bidirectional` adds a complement edge. Every other value (including
/// `EndToStart` and unknown codes) is loaded as a single start→end edge.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LinkDirection {
    Bidirectional,
    StartToEnd,
    EndToStart,
    #[default]
    Unknown,
}

impl LinkDirection {
    /// Parse a direction code. `None` and unrecognized codes map to
    /// [`LinkDirection::Unknown`].
    #[must_use]
    pub fn from_code(code: Option<&str>) -> Self {
        match code.map(str::trim) {
            Some("BID") => Self::Bidirectional,
            Some("STE") => Self::StartToEnd,
            Some("ETS") => Self::EndToStart,
            _ => Self::Unknown,
        }
    }

    /// The stored code, if the direction is known.
    #[must_use]
    pub const fn code(self) -> Option<&'static str> {
        match self {
            Self::Bidirectional => Some("BID"),
            Self::StartToEnd => Some("STE"),
            Self::EndToStart => Some("ETS"),
            Self::Unknown => None,
        }
    }

    #[must_use]
    pub const fn is_bidirectional(self) -> bool {
        matches!(self, Self::Bidirectional)
    }
}

// ---------------------------------------------------------------------------
// LinkRecord
// ---------------------------------------------------------------------------

/// Which end of a link record is missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Endpoint {
    Start,
    End,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Start => write!(f, "start"),
            Self::End => write!(f, "end"),
        }
    }
}

/// One raw link-list row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LinkRecord {
    pub start: Option<i64>,
    pub end: Option<i64>,
    pub direction: LinkDirection,
}

impl LinkRecord {
    /// A record with both endpoints present.
    #[must_use]
    pub const fn new(start: i64, end: i64, direction: LinkDirection) -> Self {
        Self {
            start: Some(start),
            end: Some(end),
            direction,
        }
    }

    /// Resolve both endpoints, or report which one is missing.
    ///
    /// `row` is only used for the error.
    ///
    /// # Errors
    ///
    /// Returns [`PathGraphError::MalformedRecord`] if an endpoint is `None`.
    pub fn endpoints(&self, row: usize) -> Result<(Connection, Connection), PathGraphError> {
        let start = self.start.ok_or(PathGraphError::MalformedRecord {
            row,
            missing: Endpoint::Start,
        })?;
        let end = self.end.ok_or(PathGraphError::MalformedRecord {
            row,
            missing: Endpoint::End,
        })?;
        Ok((Connection(start), Connection(end)))
    }
}

// ---------------------------------------------------------------------------
// LinkSource
// ---------------------------------------------------------------------------

/// Any producer of link records.
///
/// Implementations do their I/O up front and hand back a complete list, so
/// graph construction itself never blocks.
pub trait LinkSource {
    /// Fetch every link record.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying store cannot be read.
    fn link_records(&self) -> anyhow::Result<Vec<LinkRecord>>;
}

impl LinkSource for [LinkRecord] {
    fn link_records(&self) -> anyhow::Result<Vec<LinkRecord>> {
        Ok(self.to_vec())
    }
}

impl LinkSource for Vec<LinkRecord> {
    fn link_records(&self) -> anyhow::Result<Vec<LinkRecord>> {
        Ok(self.clone())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
