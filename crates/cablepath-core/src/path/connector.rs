//! Connector membership: which connections belong to which connector.
//!
//! The path graph only knows connections. Connector-level queries go through
//! a [`ConnectorDirectory`], which is backed by the unit/connector data in
//! the caller's store (see [`crate::sqlite::SqliteConnectorDirectory`]) or by
//! [`MemoryConnectorDirectory`].

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::graph::Connection;

/// Identifier of a connector: a plug, socket, or terminal strip grouping
/// several connections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConnectorId(pub i64);

impl fmt::Display for ConnectorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Lookup of connector membership.
pub trait ConnectorDirectory {
    /// Connections that are part of `connector`. Unknown connectors yield an
    /// empty list.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be queried.
    fn connections_of_connector(&self, connector: ConnectorId) -> anyhow::Result<Vec<Connection>>;

    /// Connector owning `connection`, or `None` for free-standing connections.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be queried.
    fn connector_of_connection(&self, connection: Connection) -> anyhow::Result<Option<ConnectorId>>;
}

/// In-memory [`ConnectorDirectory`].
#[derive(Debug, Clone, Default)]
pub struct MemoryConnectorDirectory {
    members: BTreeMap<ConnectorId, Vec<Connection>>,
    owners: HashMap<Connection, ConnectorId>,
}

impl MemoryConnectorDirectory {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `connections` as members of `connector`.
    ///
    /// A connection belongs to at most one connector; registering it again
    /// moves it to the new connector.
    pub fn insert(&mut self, connector: ConnectorId, connections: impl IntoIterator<Item = Connection>) {
        for connection in connections {
            if let Some(previous) = self.owners.insert(connection, connector) {
                if let Some(list) = self.members.get_mut(&previous) {
                    list.retain(|&c| c != connection);
                }
            }
            self.members.entry(connector).or_default().push(connection);
        }
    }
}

impl ConnectorDirectory for MemoryConnectorDirectory {
    fn connections_of_connector(&self, connector: ConnectorId) -> anyhow::Result<Vec<Connection>> {
        Ok(self.members.get(&connector).cloned().unwrap_or_default())
    }

    fn connector_of_connection(&self, connection: Connection) -> anyhow::Result<Option<ConnectorId>> {
        Ok(self.owners.get(&connection).copied())
    }
}
