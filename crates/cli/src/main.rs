use anyhow::{bail, Context as AnyhowContext, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use prospect_graph::{
    build_master_graph, circular_layout, Focus, GraphConfig, GraphSnapshot, GroupAnalysis,
    NodeKey, NodePosition,
};
use serde::Serialize;
use std::path::PathBuf;

mod input;
mod report;

#[derive(Parser)]
#[command(name = "prospect-graph")]
#[command(about = "Company relationship graphs for saved prospects", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Quiet mode: log only warnings/errors (stdout is reserved for output)
    #[arg(long, global = true)]
    quiet: bool,

    /// Layout config file (overrides PROSPECT_GRAPH_CONFIG)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the full relationship graph
    Graph(GraphArgs),

    /// Print the ego network around a company or a contact
    Ego(EgoArgs),

    /// Print what the group-analysis view would render
    View(ViewArgs),
}

#[derive(Args)]
struct InputArgs {
    /// JSON file with saved entities (list or {"savedProspects": [...]})
    #[arg(long)]
    input: PathBuf,

    /// Pretty-print JSON output
    #[arg(long)]
    pretty: bool,
}

#[derive(Args)]
struct GraphArgs {
    #[command(flatten)]
    input: InputArgs,
}

#[derive(Args)]
struct EgoArgs {
    #[command(flatten)]
    input: InputArgs,

    /// Focal company key
    #[arg(long, conflicts_with = "contact", required_unless_present = "contact")]
    entity: Option<String>,

    /// Focal contact name
    #[arg(long)]
    contact: Option<String>,

    /// Include node positions
    #[arg(long)]
    layout: bool,
}

#[derive(Args)]
struct ViewArgs {
    #[command(flatten)]
    input: InputArgs,

    /// Focal company key (defaults to the first entity)
    #[arg(long)]
    entity: Option<String>,

    /// Focal contact name
    #[arg(long)]
    contact: Option<String>,

    /// Contact to highlight
    #[arg(long)]
    hover: Option<String>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    format: OutputFormat,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Json,
    Markdown,
}

#[derive(Serialize)]
struct EgoOutput {
    focus: Focus,
    #[serde(flatten)]
    graph: GraphSnapshot,
    #[serde(skip_serializing_if = "Option::is_none")]
    positions: Option<Vec<NodePosition>>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if cli.quiet {
        builder.filter_level(log::LevelFilter::Warn);
    } else if cli.verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.target(env_logger::Target::Stderr).init();

    let config = input::load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Graph(args) => run_graph(args),
        Commands::Ego(args) => run_ego(args, &config),
        Commands::View(args) => run_view(args, &config),
    }
}

fn run_graph(args: GraphArgs) -> Result<()> {
    let entities = input::load_entities(&args.input.input)?;
    let graph = build_master_graph(&entities).context("Failed to build relationship graph")?;
    print_json(&graph.snapshot(), args.input.pretty)
}

fn run_ego(args: EgoArgs, config: &GraphConfig) -> Result<()> {
    let entities = input::load_entities(&args.input.input)?;
    let graph = build_master_graph(&entities).context("Failed to build relationship graph")?;

    let focus = match (args.entity, args.contact) {
        (Some(key), None) => Focus::Entity(NodeKey::from(key)),
        (None, Some(name)) => Focus::Contact(name),
        _ => bail!("Pass exactly one of --entity or --contact"),
    };

    let ego = graph.ego_network(&focus);
    if ego.is_empty() {
        log::info!("No connections for {:?}", focus);
    }
    let positions = args
        .layout
        .then(|| circular_layout(&ego, &focus, &config.layout));

    print_json(
        &EgoOutput {
            focus,
            graph: ego,
            positions,
        },
        args.input.pretty,
    )
}

fn run_view(args: ViewArgs, config: &GraphConfig) -> Result<()> {
    let entities = input::load_entities(&args.input.input)?;

    let mut session = GroupAnalysis::new(config.layout.clone());
    session.sync(&entities)?;
    if let Some(key) = args.entity {
        session
            .focus_entity(&NodeKey::from(key))
            .context("Unknown focal company")?;
    }
    if let Some(name) = &args.contact {
        session.toggle_contact(name);
    }
    session.hover_contact(args.hover.as_deref());

    let state = session.display();
    match args.format {
        OutputFormat::Json => print_json(&state, args.input.pretty),
        OutputFormat::Markdown => {
            print!("{}", report::render_display_report(&state));
            Ok(())
        }
    }
}

fn print_json<T: Serialize>(value: &T, pretty: bool) -> Result<()> {
    let out = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{out}");
    Ok(())
}
