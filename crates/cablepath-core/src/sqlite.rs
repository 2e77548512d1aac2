//! SQLite-backed link source and connector directory.
//!
//! # Overview
//!
//! Both adapters only read. They expect the cable list database to already
//! provide:
//!
//! ```sql
//! -- link view: one row per physical link
//! SELECT UnitConnectionStart_Id_FK, UnitConnectionEnd_Id_FK, LinkDirection_Code_FK
//! FROM LinkList_view;
//!
//! -- connection table: connection id -> owning connector (nullable)
//! SELECT Id_PK, UnitConnector_Id_FK FROM UnitConnection_tbl;
//! ```
//!
//! Names come from [`LinksConfig`] / [`ConnectorsConfig`] and are validated
//! as plain identifiers before being spliced into SQL text. Ids are always
//! bound as parameters.

use anyhow::Context;
use rusqlite::{OptionalExtension, params};
use tracing::{debug, instrument};

use crate::config::{ConnectorsConfig, InvalidIdentifier, LinksConfig};
use crate::graph::Connection;
use crate::path::{ConnectorDirectory, ConnectorId, LinkDirection, LinkRecord, LinkSource};

// ---------------------------------------------------------------------------
// SqliteLinkSource
// ---------------------------------------------------------------------------

/// Reads link records from a link view.
#[derive(Debug)]
pub struct SqliteLinkSource<'conn> {
    conn: &'conn rusqlite::Connection,
    query: String,
}

impl<'conn> SqliteLinkSource<'conn> {
    /// Build a source over the view and columns named in `links`.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidIdentifier`] if a configured name is not a plain
    /// identifier.
    pub fn new(conn: &'conn rusqlite::Connection, links: &LinksConfig) -> Result<Self, InvalidIdentifier> {
        links.validate()?;
        Ok(Self::from_names(conn, links))
    }

    /// Source over the default `LinkList_view` layout.
    #[must_use]
    pub fn with_defaults(conn: &'conn rusqlite::Connection) -> Self {
        Self::from_names(conn, &LinksConfig::default())
    }

    fn from_names(conn: &'conn rusqlite::Connection, links: &LinksConfig) -> Self {
        let query = format!(
            "SELECT {start}, {end}, {direction} FROM {view}",
            start = links.start_column,
            end = links.end_column,
            direction = links.direction_column,
            view = links.view,
        );
        Self { conn, query }
    }
}

impl LinkSource for SqliteLinkSource<'_> {
    #[instrument(skip(self))]
    fn link_records(&self) -> anyhow::Result<Vec<LinkRecord>> {
        let mut stmt = self
            .conn
            .prepare(&self.query)
            .context("prepare link list query")?;

        let records = stmt
            .query_map([], |row| {
                let start: Option<i64> = row.get(0)?;
                let end: Option<i64> = row.get(1)?;
                let direction: Option<String> = row.get(2)?;
                Ok(LinkRecord {
                    start,
                    end,
                    direction: LinkDirection::from_code(direction.as_deref()),
                })
            })
            .context("execute link list query")?
            .collect::<Result<Vec<_>, _>>()
            .context("collect link records")?;

        debug!(rows = records.len(), "link list read");
        Ok(records)
    }
}

// ---------------------------------------------------------------------------
// SqliteConnectorDirectory
// ---------------------------------------------------------------------------

/// Resolves connector membership from the connection table.
#[derive(Debug)]
pub struct SqliteConnectorDirectory<'conn> {
    conn: &'conn rusqlite::Connection,
    members_query: String,
    owner_query: String,
}

impl<'conn> SqliteConnectorDirectory<'conn> {
    /// Build a directory over the table and columns named in `connectors`.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidIdentifier`] if a configured name is not a plain
    /// identifier.
    pub fn new(
        conn: &'conn rusqlite::Connection,
        connectors: &ConnectorsConfig,
    ) -> Result<Self, InvalidIdentifier> {
        connectors.validate()?;
        Ok(Self::from_names(conn, connectors))
    }

    /// Directory over the default `UnitConnection_tbl` layout.
    #[must_use]
    pub fn with_defaults(conn: &'conn rusqlite::Connection) -> Self {
        Self::from_names(conn, &ConnectorsConfig::default())
    }

    fn from_names(conn: &'conn rusqlite::Connection, c: &ConnectorsConfig) -> Self {
        let members_query = format!(
            "SELECT {id} FROM {table} WHERE {connector} = ?1 ORDER BY {id}",
            id = c.connection_column,
            table = c.table,
            connector = c.connector_column,
        );
        let owner_query = format!(
            "SELECT {connector} FROM {table} WHERE {id} = ?1",
            id = c.connection_column,
            table = c.table,
            connector = c.connector_column,
        );
        Self {
            conn,
            members_query,
            owner_query,
        }
    }
}

impl ConnectorDirectory for SqliteConnectorDirectory<'_> {
    fn connections_of_connector(&self, connector: ConnectorId) -> anyhow::Result<Vec<Connection>> {
        let mut stmt = self
            .conn
            .prepare_cached(&self.members_query)
            .context("prepare connector members query")?;

        let members = stmt
            .query_map(params![connector.0], |row| row.get::<_, i64>(0))
            .context("execute connector members query")?
            .map(|id| id.map(Connection))
            .collect::<Result<Vec<_>, _>>()
            .context("collect connector members")?;

        Ok(members)
    }

    fn connector_of_connection(&self, connection: Connection) -> anyhow::Result<Option<ConnectorId>> {
        let mut stmt = self
            .conn
            .prepare_cached(&self.owner_query)
            .context("prepare connection owner query")?;

        let owner = stmt
            .query_row(params![connection.0], |row| row.get::<_, Option<i64>>(0))
            .optional()
            .context("execute connection owner query")?;

        Ok(owner.flatten().map(ConnectorId))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
