//! `cablepath stats`: size of the loaded link graph.

use std::io::Write;

use clap::Args;
use serde::Serialize;

use crate::output::{OutputMode, pretty_kv, pretty_section, render_mode};
use crate::session::Session;

/// Arguments for `cablepath stats`.
#[derive(Args, Debug, Default)]
pub struct StatsArgs {}

/// Report payload for `cablepath stats`.
#[derive(Debug, Serialize)]
pub struct GraphStats {
    pub database: String,
    pub records: usize,
    pub bidirectional: usize,
    pub vertices: usize,
    pub edges: usize,
}

/// Execute `cablepath stats`.
pub fn run_stats(_args: &StatsArgs, output: OutputMode, session: &Session) -> anyhow::Result<()> {
    let (_, summary) = session.load_path_graph()?;

    let payload = GraphStats {
        database: session.db_path().display().to_string(),
        records: summary.records,
        bidirectional: summary.bidirectional,
        vertices: summary.vertices,
        edges: summary.edges,
    };
    render_mode(output, &payload, render_stats_text, render_stats_pretty)
}

fn render_stats_text(stats: &GraphStats, w: &mut dyn Write) -> std::io::Result<()> {
    writeln!(w, "records\t{}", stats.records)?;
    writeln!(w, "bidirectional\t{}", stats.bidirectional)?;
    writeln!(w, "vertices\t{}", stats.vertices)?;
    writeln!(w, "edges\t{}", stats.edges)
}

fn render_stats_pretty(stats: &GraphStats, w: &mut dyn Write) -> std::io::Result<()> {
    pretty_section(w, "Link graph")?;
    pretty_kv(w, "database", &stats.database)?;
    pretty_kv(w, "links", stats.records.to_string())?;
    pretty_kv(w, "bidirectional", stats.bidirectional.to_string())?;
    pretty_kv(w, "connections", stats.vertices.to_string())?;
    pretty_kv(w, "edges", stats.edges.to_string())
}
