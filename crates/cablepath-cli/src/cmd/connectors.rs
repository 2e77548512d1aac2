//! `cablepath connectors`: connectors wired to a connector.

use std::io::Write;

use cablepath_core::graph::Connection;
use cablepath_core::path::ConnectorId;
use clap::Args;
use serde::Serialize;

use crate::output::{OutputMode, pretty_kv, pretty_section, render_mode};
use crate::session::Session;

/// Arguments for `cablepath connectors`.
#[derive(Args, Debug)]
pub struct ConnectorsArgs {
    /// Connector id to start from.
    #[arg(value_name = "CONNECTOR")]
    pub connector: i64,

    /// Skip this member connection of the connector (repeatable).
    #[arg(long = "ignore", value_name = "CONNECTION")]
    pub ignore: Vec<i64>,
}

#[derive(Debug, Serialize)]
pub struct ConnectorsReport {
    pub connector: ConnectorId,
    pub ignored: Vec<Connection>,
    pub linked: Vec<ConnectorId>,
}

/// Execute `cablepath connectors`.
pub fn run_connectors(args: &ConnectorsArgs, output: OutputMode, session: &Session) -> anyhow::Result<()> {
    let (graph, _) = session.load_path_graph()?;
    let directory = session.directory()?;

    let connector = ConnectorId(args.connector);
    let ignored: Vec<Connection> = args.ignore.iter().copied().map(Connection).collect();
    let linked = graph.get_linked_connector_id_list(connector, &ignored, &directory)?;

    let report = ConnectorsReport {
        connector,
        ignored,
        linked,
    };
    render_mode(output, &report, render_connectors_text, render_connectors_pretty)
}

fn render_connectors_text(report: &ConnectorsReport, w: &mut dyn Write) -> std::io::Result<()> {
    for connector in &report.linked {
        writeln!(w, "{connector}")?;
    }
    Ok(())
}

fn render_connectors_pretty(report: &ConnectorsReport, w: &mut dyn Write) -> std::io::Result<()> {
    pretty_section(w, &format!("Connectors linked to {}", report.connector))?;
    if !report.ignored.is_empty() {
        let ignored: Vec<String> = report.ignored.iter().map(ToString::to_string).collect();
        pretty_kv(w, "ignoring", ignored.join(", "))?;
    }
    if report.linked.is_empty() {
        writeln!(w, "(none)")?;
        return Ok(());
    }
    for connector in &report.linked {
        writeln!(w, "  {connector}")?;
    }
    writeln!(w, "\n{} connector(s)", report.linked.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report() -> ConnectorsReport {
        ConnectorsReport {
            connector: ConnectorId(100),
            ignored: vec![Connection(11)],
            linked: vec![ConnectorId(200), ConnectorId(300)],
        }
    }

    #[test]
    fn text_is_one_id_per_line() {
        let mut buf = Vec::new();
        render_connectors_text(&report(), &mut buf).expect("render");
        assert_eq!(String::from_utf8(buf).expect("utf8"), "200\n300\n");
    }

    #[test]
    fn pretty_lists_ignored_members() {
        let mut buf = Vec::new();
        render_connectors_pretty(&report(), &mut buf).expect("render");
        let text = String::from_utf8(buf).expect("utf8");
        assert!(text.contains("ignoring:"));
        assert!(text.contains("11"));
        assert!(text.contains("2 connector(s)"));
    }

    #[test]
    fn json_shape() {
        let value = serde_json::to_value(report()).expect("serialize");
        assert_eq!(
            value,
            serde_json::json!({"connector": 100, "ignored": [11], "linked": [200, 300]})
        );
    }
}
