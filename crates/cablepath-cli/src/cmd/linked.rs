//! `cablepath linked`: connections wired to a connection.

use std::io::Write;

use cablepath_core::graph::Connection;
use clap::Args;
use serde::Serialize;

use crate::output::{OutputMode, pretty_section, render_mode};
use crate::session::Session;

/// Arguments for `cablepath linked`.
#[derive(Args, Debug)]
pub struct LinkedArgs {
    /// Connection id to start from.
    #[arg(value_name = "CONNECTION")]
    pub connection: i64,
}

#[derive(Debug, Serialize)]
pub struct LinkedReport {
    pub connection: Connection,
    pub linked: Vec<Connection>,
}

/// Execute `cablepath linked`.
pub fn run_linked(args: &LinkedArgs, output: OutputMode, session: &Session) -> anyhow::Result<()> {
    let (graph, _) = session.load_path_graph()?;
    let connection = Connection(args.connection);
    let linked = graph.get_linked_connection_id_list(connection)?;

    let report = LinkedReport { connection, linked };
    render_mode(output, &report, render_linked_text, render_linked_pretty)
}

fn render_linked_text(report: &LinkedReport, w: &mut dyn Write) -> std::io::Result<()> {
    for connection in &report.linked {
        writeln!(w, "{connection}")?;
    }
    Ok(())
}

fn render_linked_pretty(report: &LinkedReport, w: &mut dyn Write) -> std::io::Result<()> {
    pretty_section(w, &format!("Connections linked to {}", report.connection))?;
    if report.linked.is_empty() {
        writeln!(w, "(none)")?;
        return Ok(());
    }
    for connection in &report.linked {
        writeln!(w, "  {connection}")?;
    }
    writeln!(w, "\n{} connection(s)", report.linked.len())
}
