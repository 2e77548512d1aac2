//! Value types shared by the graph engine and its callers.

use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Connection
// ---------------------------------------------------------------------------

/// Identifier of one electrical terminal (pin, socket contact, terminal
/// block position).
///
/// The graph never owns connection data; it only stores copies of the id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Connection(pub i64);

impl Connection {
    /// Return the raw identifier.
    #[must_use]
    pub const fn id(self) -> i64 {
        self.0
    }
}

impl From<i64> for Connection {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl fmt::Display for Connection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Link
// ---------------------------------------------------------------------------

/// One directed link between two connections.
///
/// `is_complement` marks the synthetic reverse edge of a bidirectional
/// physical link. Path projections skip complement links so a bidirectional
/// wire is reported once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Link {
    pub start: Connection,
    pub end: Connection,
    pub weight: u32,
    pub is_complement: bool,
}

impl Link {
    #[must_use]
    pub const fn new(start: Connection, end: Connection, weight: u32, is_complement: bool) -> Self {
        Self {
            start,
            end,
            weight,
            is_complement,
        }
    }

    /// The reverse-direction complement of this link.
    #[must_use]
    pub const fn complement(&self) -> Self {
        Self::new(self.end, self.start, self.weight, true)
    }
}

// ---------------------------------------------------------------------------
// Handles
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct Slot {
    pub(crate) index: usize,
    pub(crate) generation: u32,
}

/// Opaque handle to a vertex inside one [`GraphImpl`](super::GraphImpl).
///
/// The default value is the null handle. Handles compare equal only when
/// they designate the same vertex of the same graph generation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Vertex {
    slot: Option<Slot>,
}

impl Vertex {
    /// The null vertex ("not found / not created").
    #[must_use]
    pub const fn null() -> Self {
        Self { slot: None }
    }

    #[must_use]
    pub const fn is_null(&self) -> bool {
        self.slot.is_none()
    }

    pub(crate) const fn new(index: usize, generation: u32) -> Self {
        Self {
            slot: Some(Slot { index, generation }),
        }
    }

    pub(crate) const fn slot(self) -> Option<Slot> {
        self.slot
    }
}

/// Opaque handle to an edge inside one [`GraphImpl`](super::GraphImpl).
///
/// Same contract as [`Vertex`]. Adding a link that already exists returns a
/// handle equal to the existing edge's handle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Edge {
    slot: Option<Slot>,
}

impl Edge {
    /// The null edge.
    #[must_use]
    pub const fn null() -> Self {
        Self { slot: None }
    }

    #[must_use]
    pub const fn is_null(&self) -> bool {
        self.slot.is_none()
    }

    pub(crate) const fn new(index: usize, generation: u32) -> Self {
        Self {
            slot: Some(Slot { index, generation }),
        }
    }

    pub(crate) const fn slot(self) -> Option<Slot> {
        self.slot
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
