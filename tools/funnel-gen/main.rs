use clap::Parser;
use funnelgraph::config::DEFAULT_EDGE_TYPE;
use funnelgraph::editor::titles;
use funnelgraph::graph::{FunnelEdge, FunnelNode, Position, Snapshot};
use funnelgraph::persistence::export_document;
use funnelgraph::step::StepType;
use funnelgraph::validation::validate;
use rand::Rng;
use rand::rngs::ThreadRng;
use std::fs;

/// A CLI tool to generate random funnel documents for the funnelgraph validator
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// The path to write the generated JSON file to
    #[arg(short, long, default_value = "generated_funnel.json")]
    output: String,

    /// The number of steps to generate
    #[arg(short, long, default_value_t = 8)]
    steps: usize,

    /// Probability that any allowed ordered pair of steps gets a connection
    #[arg(long, default_value_t = 0.2)]
    density: f64,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let mut rng = rand::rng();

    if !(0.0..=1.0).contains(&cli.density) {
        eprintln!("Error: --density ({}) must be between 0 and 1", cli.density);
        std::process::exit(1);
    }

    println!("Generating a funnel with {} step(s)...", cli.steps);

    let nodes = generate_nodes(&mut rng, cli.steps);
    let edges = generate_edges(&mut rng, &nodes, cli.density);
    let snapshot = Snapshot::new(nodes, edges);

    fs::write(&cli.output, export_document(&snapshot)?)?;

    let issues = validate(&snapshot.nodes, &snapshot.edges);
    println!(
        "Successfully generated {} step(s) and {} connection(s) into '{}' ({} issue(s))",
        snapshot.nodes.len(),
        snapshot.edges.len(),
        cli.output,
        issues.len()
    );

    Ok(())
}

/// Places steps in a loose grid, titled the way the editor would title them.
fn generate_nodes(rng: &mut ThreadRng, count: usize) -> Vec<FunnelNode> {
    let mut nodes: Vec<FunnelNode> = Vec::with_capacity(count);
    for i in 0..count {
        let step = StepType::ALL[rng.random_range(0..StepType::ALL.len())];
        let title = titles::default_title(&nodes, step);
        let position = Position::new(
            (i % 4) as f64 * 260.0 + rng.random_range(-20.0..20.0),
            (i / 4) as f64 * 160.0 + rng.random_range(-20.0..20.0),
        );
        nodes.push(FunnelNode::new(format!("{}-{}", step, i + 1), step, position, title));
    }
    nodes
}

/// Connects random ordered pairs. Thank-you steps are never sources.
fn generate_edges(rng: &mut ThreadRng, nodes: &[FunnelNode], density: f64) -> Vec<FunnelEdge> {
    let mut edges = Vec::new();
    for source in nodes.iter().filter(|n| n.step().can_be_source()) {
        for target in nodes.iter().filter(|n| n.id != source.id) {
            if rng.random_bool(density) {
                edges.push(FunnelEdge::new(
                    format!("e-{}-{}", source.id, target.id),
                    source.id.clone(),
                    target.id.clone(),
                    Some(DEFAULT_EDGE_TYPE.to_string()),
                ));
            }
        }
    }
    edges
}
