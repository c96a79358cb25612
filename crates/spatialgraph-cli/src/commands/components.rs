//! Components command handler listing weakly connected components.

use std::io;

use anyhow::{bail, Context, Result};

use spatialgraph_lib::{build_graph, connected_components, CancellationToken, Orientation, Outcome};

use super::{open_edges, EdgeTableArgs};
use crate::output::{render_components, OutputFormat};

/// Handle the components subcommand.
pub fn handle_components_command(
    table: &EdgeTableArgs,
    format: OutputFormat,
    cancel: &CancellationToken,
) -> Result<()> {
    let connection = table.connect()?;
    let source = open_edges(&connection, table.config(None, None))?;

    // Components ignore direction, so orientation and weights do not matter.
    let graph = match build_graph(&source, Orientation::Direct, None, cancel)
        .context("failed to build graph")?
    {
        Outcome::Complete(graph) => graph,
        Outcome::Cancelled => bail!("graph build cancelled"),
    };
    let components = match connected_components(&graph, cancel) {
        Outcome::Complete(components) => components,
        Outcome::Cancelled => bail!("component search cancelled"),
    };

    let stdout = io::stdout();
    render_components(&mut stdout.lock(), &components, format)
        .context("failed to write output")?;
    Ok(())
}
