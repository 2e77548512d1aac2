#![forbid(unsafe_code)]
//! cablepath-core library.
//!
//! Connection graph for cable harness documentation: a directed multigraph
//! over electrical connections (terminals/pins), loaded from a flat link
//! list, answering "what is wired to what" questions.
//!
//! # Conventions
//!
//! - **Errors**: typed [`thiserror`] enums for conditions callers branch on
//!   ([`graph::GraphError`], [`path::PathGraphError`]); `anyhow::Result` at
//!   I/O boundaries (sources, directories, config).
//! - **Logging**: Use `tracing` macros (`info!`, `warn!`, `error!`, `debug!`, `trace!`).
//!
//! # Typical Usage
//!
//! ```rust
//! use cablepath_core::graph::Connection;
//! use cablepath_core::path::{LinkDirection, LinkRecord, PathGraph};
//!
//! let mut path_graph = PathGraph::new();
//! path_graph
//!     .load_link_list([
//!         LinkRecord::new(1, 2, LinkDirection::StartToEnd),
//!         LinkRecord::new(2, 3, LinkDirection::StartToEnd),
//!     ])
//!     .expect("well-formed link list");
//!
//! let linked = path_graph
//!     .get_linked_connection_id_list(Connection(1))
//!     .expect("connection 1 is in the graph");
//! assert_eq!(linked, vec![Connection(2), Connection(3)]);
//! ```

pub mod config;
pub mod error;
pub mod graph;
pub mod path;
pub mod sqlite;
