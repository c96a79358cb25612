//! Output formatting for query results.
//!
//! Every renderer writes to a caller-supplied writer so the binary can target
//! stdout while tests capture into a buffer.

use std::io::{self, Write};

use clap::ValueEnum;
use serde::Serialize;

use spatialgraph_lib::{Components, Geometry, GraphSummary, ShortestPathResponse, OUTPUT_COLUMNS};

/// Output format selected with `--format`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table.
    #[default]
    Text,
    /// Pretty-printed JSON.
    Json,
}

/// Text rendering of a geometry cell. WKB blobs are shown as hex.
pub fn geometry_text(geometry: &Geometry) -> String {
    match geometry {
        Geometry::Empty => "NULL".to_string(),
        Geometry::Wkt(text) => text.clone(),
        Geometry::Wkb(bytes) => hex::encode_upper(bytes),
    }
}

pub fn render_path(
    out: &mut impl Write,
    response: &ShortestPathResponse,
    format: OutputFormat,
) -> io::Result<()> {
    if format == OutputFormat::Json {
        return render_json(out, response);
    }

    if !response.path_found {
        return writeln!(
            out,
            "No path from {} to {} ({}).",
            response.source, response.target, response.orientation
        );
    }

    writeln!(
        out,
        "Path from {} to {} ({} edges; orientation: {}; {}):",
        response.source,
        response.target,
        response.hops,
        response.orientation,
        if response.weighted {
            "weighted"
        } else {
            "unweighted"
        }
    )?;
    if response.rows.is_empty() {
        writeln!(out, "(source and target are the same node)")?;
    } else {
        writeln!(out, "{}", OUTPUT_COLUMNS.join("\t"))?;
        for row in &response.rows {
            writeln!(
                out,
                "{}\t{}\t{}\t{}\t{}",
                geometry_text(&row.the_geom),
                row.gid,
                row.start_node,
                row.end_node,
                row.weight
            )?;
        }
    }
    if let Some(total) = response.total_weight {
        writeln!(out, "\nTotal weight: {total}")?;
    }
    Ok(())
}

pub fn render_summary(
    out: &mut impl Write,
    summary: &GraphSummary,
    format: OutputFormat,
) -> io::Result<()> {
    match format {
        OutputFormat::Json => render_json(out, summary),
        OutputFormat::Text => {
            writeln!(out, "Orientation: {}", summary.orientation)?;
            writeln!(out, "Weighted: {}", summary.weighted)?;
            writeln!(out, "Nodes: {}", summary.nodes)?;
            writeln!(out, "Edges: {}", summary.edges)?;
            writeln!(out, "Total weight: {}", summary.total_weight)
        }
    }
}

pub fn render_components(
    out: &mut impl Write,
    components: &Components,
    format: OutputFormat,
) -> io::Result<()> {
    match format {
        OutputFormat::Json => render_json(out, components),
        OutputFormat::Text => {
            writeln!(out, "{} connected component(s):", components.len())?;
            for (index, nodes) in components.components.iter().enumerate() {
                let nodes: Vec<String> = nodes.iter().map(ToString::to_string).collect();
                writeln!(out, "{}: {}", index + 1, nodes.join(", "))?;
            }
            Ok(())
        }
    }
}

fn render_json<T: Serialize>(out: &mut impl Write, value: &T) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)
}
