use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use spatialgraph_cli::commands::components::handle_components_command;
use spatialgraph_cli::commands::graph::handle_graph_command;
use spatialgraph_cli::commands::path::{handle_path_command, PathCommandArgs};
use spatialgraph_cli::commands::EdgeTableArgs;
use spatialgraph_cli::output::OutputFormat;
use spatialgraph_lib::db::{END_NODE_COLUMN, GEOMETRY_COLUMN, START_NODE_COLUMN, WEIGHT_COLUMN};
use spatialgraph_lib::{CancellationToken, NodeId, Orientation};

#[derive(Parser, Debug)]
#[command(author, version, about = "Graph queries over spatial network edge tables")]
struct Cli {
    /// SQLite database holding the edge table (defaults to $SPATIALGRAPH_DB).
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    /// Edge table name.
    #[arg(long, global = true, default_value = "edges")]
    table: String,

    /// Geometry column name.
    #[arg(long, global = true, default_value = GEOMETRY_COLUMN)]
    geometry_column: String,

    /// Start node column name.
    #[arg(long, global = true, default_value = START_NODE_COLUMN)]
    start_node_column: String,

    /// End node column name.
    #[arg(long, global = true, default_value = END_NODE_COLUMN)]
    end_node_column: String,

    /// Output format.
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compute the shortest path between two nodes.
    Path {
        /// Source node id.
        #[arg(long = "from", allow_hyphen_values = true)]
        from: NodeId,
        /// Target node id.
        #[arg(long = "to", allow_hyphen_values = true)]
        to: NodeId,
        /// Count hops instead of reading edge weights.
        #[arg(long)]
        unweighted: bool,
        /// Graph orientation: 1/direct, 2/reversed or 3/undirect.
        #[arg(long, value_parser = parse_orientation)]
        orientation: Option<Orientation>,
        /// Column holding edge weights.
        #[arg(long, default_value = WEIGHT_COLUMN)]
        weight_column: String,
    },
    /// Build the graph and report its size.
    Graph {
        /// Graph orientation: 1/direct, 2/reversed or 3/undirect.
        #[arg(long, value_parser = parse_orientation, default_value = "direct")]
        orientation: Orientation,
        /// Column holding edge weights; unit weights when omitted.
        #[arg(long)]
        weight_column: Option<String>,
    },
    /// List weakly connected components.
    Components,
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let table = EdgeTableArgs {
        db: cli.db,
        table: cli.table,
        geometry_column: cli.geometry_column,
        start_node_column: cli.start_node_column,
        end_node_column: cli.end_node_column,
    };
    let cancel = CancellationToken::new();

    match cli.command {
        Command::Path {
            from,
            to,
            unweighted,
            orientation,
            weight_column,
        } => {
            let args = PathCommandArgs {
                from,
                to,
                unweighted,
                orientation,
                weight_column,
            };
            handle_path_command(&table, &args, cli.format, &cancel)
        }
        Command::Graph {
            orientation,
            weight_column,
        } => handle_graph_command(
            &table,
            orientation,
            weight_column.as_deref(),
            cli.format,
            &cancel,
        ),
        Command::Components => handle_components_command(&table, cli.format, &cancel),
    }
}

fn parse_orientation(value: &str) -> std::result::Result<Orientation, String> {
    value.parse::<Orientation>().map_err(|err| err.to_string())
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}
