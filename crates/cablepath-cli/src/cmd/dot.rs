//! `cablepath dot`: Graphviz drawing of the wiring reached from a connection.

use std::io::Write;

use cablepath_core::graph::Connection;
use clap::Args;
use serde::Serialize;

use crate::output::{OutputMode, render_mode};
use crate::session::Session;

/// Arguments for `cablepath dot`.
#[derive(Args, Debug)]
pub struct DotArgs {
    /// Connection id to draw from.
    #[arg(value_name = "CONNECTION")]
    pub connection: i64,
}

#[derive(Debug, Serialize)]
pub struct DotReport {
    pub connection: Connection,
    pub dot: String,
}

/// Execute `cablepath dot`.
///
/// Pretty and text modes both print the raw DOT text so it can be piped
/// straight into `dot -Tsvg`.
pub fn run_dot(args: &DotArgs, output: OutputMode, session: &Session) -> anyhow::Result<()> {
    let (graph, _) = session.load_path_graph()?;
    let connection = Connection(args.connection);
    let dot = graph.to_dot(connection)?;

    let report = DotReport { connection, dot };
    render_mode(output, &report, write_dot, write_dot)
}

fn write_dot(report: &DotReport, w: &mut dyn Write) -> std::io::Result<()> {
    write!(w, "{}", report.dot)?;
    if !report.dot.ends_with('\n') {
        writeln!(w)?;
    }
    Ok(())
}
