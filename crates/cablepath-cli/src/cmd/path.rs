//! `cablepath path`: cheapest route between two connections.

use std::io::Write;

use cablepath_core::graph::Connection;
use clap::Args;
use serde::Serialize;

use crate::output::{OutputMode, pretty_kv, pretty_section, render_mode};
use crate::session::Session;

/// Arguments for `cablepath path`.
#[derive(Args, Debug)]
pub struct PathArgs {
    /// Connection id the route starts at.
    #[arg(value_name = "FROM")]
    pub from: i64,

    /// Connection id the route ends at.
    #[arg(value_name = "TO")]
    pub to: i64,
}

#[derive(Debug, Serialize)]
pub struct PathReport {
    pub from: Connection,
    pub to: Connection,
    pub reachable: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cost: Option<u64>,
    pub connections: Vec<Connection>,
}

/// Execute `cablepath path`.
pub fn run_path(args: &PathArgs, output: OutputMode, session: &Session) -> anyhow::Result<()> {
    let (graph, _) = session.load_path_graph()?;
    let from = Connection(args.from);
    let to = Connection(args.to);

    let report = match graph.shortest_path(from, to)? {
        Some(path) => PathReport {
            from,
            to,
            reachable: true,
            cost: Some(path.cost),
            connections: path.connections,
        },
        None => PathReport {
            from,
            to,
            reachable: false,
            cost: None,
            connections: Vec::new(),
        },
    };
    render_mode(output, &report, render_path_text, render_path_pretty)
}

fn render_path_text(report: &PathReport, w: &mut dyn Write) -> std::io::Result<()> {
    for connection in &report.connections {
        writeln!(w, "{connection}")?;
    }
    Ok(())
}

fn render_path_pretty(report: &PathReport, w: &mut dyn Write) -> std::io::Result<()> {
    pretty_section(w, &format!("Path {} -> {}", report.from, report.to))?;
    let Some(cost) = report.cost else {
        writeln!(w, "(unreachable)")?;
        return Ok(());
    };
    let hops: Vec<String> = report.connections.iter().map(ToString::to_string).collect();
    pretty_kv(w, "route", hops.join(" -> "))?;
    pretty_kv(w, "cost", cost.to_string())?;
    pretty_kv(w, "hops", report.connections.len().saturating_sub(1).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reachable() -> PathReport {
        PathReport {
            from: Connection(3),
            to: Connection(1),
            reachable: true,
            cost: Some(2),
            connections: vec![Connection(3), Connection(2), Connection(1)],
        }
    }

    #[test]
    fn pretty_shows_route_and_cost() {
        let mut buf = Vec::new();
        render_path_pretty(&reachable(), &mut buf).expect("render");
        let text = String::from_utf8(buf).expect("utf8");
        assert!(text.contains("3 -> 2 -> 1"));
        assert!(text.contains("cost:"));
        assert!(text.lines().any(|l| l.starts_with("hops:") && l.ends_with(" 2")));
    }

    #[test]
    fn unreachable_renders_marker_and_omits_cost() {
        let report = PathReport {
            from: Connection(1),
            to: Connection(5),
            reachable: false,
            cost: None,
            connections: Vec::new(),
        };
        let mut buf = Vec::new();
        render_path_pretty(&report, &mut buf).expect("render");
        assert!(String::from_utf8(buf).expect("utf8").contains("(unreachable)"));

        let value = serde_json::to_value(&report).expect("serialize");
        assert_eq!(value["reachable"], false);
        assert!(value.get("cost").is_none());
    }

    #[test]
    fn text_lists_route() {
        let mut buf = Vec::new();
        render_path_text(&reachable(), &mut buf).expect("render");
        assert_eq!(String::from_utf8(buf).expect("utf8"), "3\n2\n1\n");
    }
}
