//! Per-invocation state: the open database and the project config.
//!
//! The link graph is rebuilt from the database on every command; nothing is
//! cached between invocations.

use std::path::{Path, PathBuf};

use anyhow::Context;
use cablepath_core::config::{self, ProjectConfig, UserConfig};
use cablepath_core::path::{LoadSummary, PathGraph};
use cablepath_core::sqlite::{SqliteConnectorDirectory, SqliteLinkSource};
use rusqlite::OpenFlags;
use tracing::{debug, info};

/// No database was given on the command line or in the user config.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("no database given: pass --db PATH or set `database` in the user config")]
pub struct MissingDatabase;

#[derive(Debug)]
pub struct Session {
    conn: rusqlite::Connection,
    config: ProjectConfig,
    db_path: PathBuf,
}

impl Session {
    /// Resolve config and open the database read-only.
    ///
    /// The project config comes from `config_flag` if given, otherwise from
    /// `<project_root>/.cablepath/config.toml`. The database path comes from
    /// `db_flag`, falling back to the user config.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be parsed or names an invalid
    /// identifier, if no database is configured, or if it cannot be opened.
    pub fn open(
        db_flag: Option<&Path>,
        config_flag: Option<&Path>,
        user: &UserConfig,
        project_root: &Path,
    ) -> anyhow::Result<Self> {
        let config = match config_flag {
            Some(path) => config::load_config_file(path)?,
            None => config::load_project_config(project_root)?,
        };
        config.validate()?;

        let db_path = db_flag
            .map(Path::to_path_buf)
            .or_else(|| user.database.clone())
            .ok_or(MissingDatabase)?;

        let conn = rusqlite::Connection::open_with_flags(
            &db_path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )
        .with_context(|| format!("Failed to open database {}", db_path.display()))?;
        debug!(db = %db_path.display(), "database opened");

        Ok(Self {
            conn,
            config,
            db_path,
        })
    }

    pub fn db_path(&self) -> &Path {
        &self.db_path
    }

    /// Build the link graph from the configured link view.
    ///
    /// # Errors
    ///
    /// Returns an error if the view cannot be read or holds a malformed row.
    pub fn load_path_graph(&self) -> anyhow::Result<(PathGraph, LoadSummary)> {
        let source = SqliteLinkSource::new(&self.conn, &self.config.links)?;
        let mut graph = PathGraph::new().with_link_weight(self.config.links.default_weight);
        let summary = graph.load_from_source(&source)?;
        info!(
            vertices = summary.vertices,
            edges = summary.edges,
            "link graph loaded"
        );
        Ok((graph, summary))
    }

    /// Connector membership backed by the configured connection table.
    ///
    /// # Errors
    ///
    /// Returns an error if a configured name is not a plain identifier.
    pub fn directory(&self) -> anyhow::Result<SqliteConnectorDirectory<'_>> {
        Ok(SqliteConnectorDirectory::new(&self.conn, &self.config.connectors)?)
    }
}
