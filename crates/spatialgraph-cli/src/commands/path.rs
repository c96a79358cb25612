//! Path command handler for shortest path queries against an edge table.

use std::io;

use anyhow::{bail, Context, Result};
use tracing::debug;

use spatialgraph_lib::{
    shortest_path_query, CancellationToken, NodeId, Orientation, Outcome, ShortestPathRequest,
};

use super::{open_edges, EdgeTableArgs};
use crate::output::{render_path, OutputFormat};

/// Arguments for the path command.
#[derive(Debug, Clone)]
pub struct PathCommandArgs {
    pub from: NodeId,
    pub to: NodeId,
    /// Count hops instead of reading weights.
    pub unweighted: bool,
    pub orientation: Option<Orientation>,
    /// Column holding edge weights.
    pub weight_column: String,
}

impl PathCommandArgs {
    pub fn to_request(&self) -> ShortestPathRequest {
        let mut request = ShortestPathRequest::new(self.from, self.to);
        if self.unweighted {
            request = request.unweighted();
        }
        if let Some(orientation) = self.orientation {
            request = request.with_orientation(orientation);
        }
        request
    }
}

/// Handle the path subcommand.
pub fn handle_path_command(
    table: &EdgeTableArgs,
    args: &PathCommandArgs,
    format: OutputFormat,
    cancel: &CancellationToken,
) -> Result<()> {
    let connection = table.connect()?;
    let weight_column = (!args.unweighted).then_some(args.weight_column.as_str());
    let source = open_edges(&connection, table.config(weight_column, None))?;

    let request = args.to_request();
    debug!(?request, "running shortest path query");
    let response = match shortest_path_query(&source, &request, cancel)
        .with_context(|| format!("failed to compute a path from {} to {}", args.from, args.to))?
    {
        Outcome::Complete(response) => response,
        Outcome::Cancelled => bail!("path query cancelled"),
    };

    let stdout = io::stdout();
    render_path(&mut stdout.lock(), &response, format).context("failed to write output")?;
    Ok(())
}
