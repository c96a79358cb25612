//! Graph command handler reporting the shape of a built graph.

use std::io;

use anyhow::{bail, Context, Result};

use spatialgraph_lib::{build_graph, CancellationToken, GraphSummary, Orientation, Outcome};

use super::{open_edges, EdgeTableArgs};
use crate::output::{render_summary, OutputFormat};

/// Handle the graph subcommand.
///
/// Without a weight column every edge counts as one unit.
pub fn handle_graph_command(
    table: &EdgeTableArgs,
    orientation: Orientation,
    weight_column: Option<&str>,
    format: OutputFormat,
    cancel: &CancellationToken,
) -> Result<()> {
    let connection = table.connect()?;
    let source = open_edges(&connection, table.config(weight_column, None))?;

    let graph = match build_graph(&source, orientation, weight_column, cancel)
        .context("failed to build graph")?
    {
        Outcome::Complete(graph) => graph,
        Outcome::Cancelled => bail!("graph build cancelled"),
    };

    let stdout = io::stdout();
    render_summary(&mut stdout.lock(), &GraphSummary::of(&graph), format)
        .context("failed to write output")?;
    Ok(())
}
