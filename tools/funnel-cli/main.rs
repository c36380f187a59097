use clap::{Parser, Subcommand, ValueEnum};
use funnelgraph::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};

/// Step kinds as accepted on the command line.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum StepCli {
    Sales,
    Order,
    Upsell,
    Downsell,
    Thankyou,
}

impl From<StepCli> for StepType {
    fn from(step: StepCli) -> Self {
        match step {
            StepCli::Sales => StepType::Sales,
            StepCli::Order => StepType::Order,
            StepCli::Upsell => StepType::Upsell,
            StepCli::Downsell => StepType::Downsell,
            StepCli::Thankyou => StepType::ThankYou,
        }
    }
}

/// Build and check sales funnels from the command line
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Directory holding the saved funnel snapshot
    #[arg(short, long, default_value = ".funnel")]
    state_dir: PathBuf,

    /// Optional JSON config file overriding editor defaults
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the available step types
    Steps,
    /// Print every step and connection of the saved funnel
    Show,
    /// Validate the saved funnel, or a funnel document if a path is given
    Validate { file: Option<PathBuf> },
    /// Add a step at the given canvas position
    Add {
        #[arg(value_enum)]
        step: StepCli,
        #[arg(long, default_value_t = 0.0)]
        x: f64,
        #[arg(long, default_value_t = 0.0)]
        y: f64,
    },
    /// Connect one step to another
    Connect { source: String, target: String },
    /// Move a step to a position as if dragged there; dropping it onto
    /// another step connects the two
    Drop {
        node: String,
        #[arg(long)]
        x: f64,
        #[arg(long)]
        y: f64,
    },
    /// Remove a step and every connection touching it
    Remove { node: String },
    /// Remove a single connection
    Disconnect { edge: String },
    /// Replace the funnel with the example order flow
    Example,
    /// Remove every step and connection
    Clear,
    /// Write the funnel to funnel.json
    Export {
        #[arg(short, long, default_value = ".")]
        out: PathBuf,
    },
    /// Replace the funnel with the contents of a funnel document
    Import { file: PathBuf },
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => FunnelConfig::from_file(path)
            .unwrap_or_else(|e| exit_with_error(&format!("Failed to load config: {}", e))),
        None => FunnelConfig::default(),
    };
    let store = FileSnapshotStore::from_config(&cli.state_dir, &config);
    let mut editor = FunnelEditor::builder(store).with_config(config).build();

    match cli.command {
        Command::Steps => print_steps(),
        Command::Show => print_funnel(&editor),
        Command::Validate { file } => match file {
            Some(path) => validate_file(&path),
            None => print_issues(editor.issues()),
        },
        Command::Add { step, x, y } => {
            let id = editor.add_node(step.into(), Position::new(x, y));
            println!("Added step '{}'", id);
            print_issues(editor.issues());
        }
        Command::Connect { source, target } => match editor.connect(&source, &target) {
            Ok(edge_id) => {
                println!("Connected '{}' -> '{}' ({})", source, target, edge_id);
                print_issues(editor.issues());
            }
            Err(e) => exit_with_error(&e.to_string()),
        },
        Command::Drop { node, x, y } => drop_node(&mut editor, &node, Position::new(x, y)),
        Command::Remove { node } => {
            let report = editor.apply_node_changes(&[NodeChange::Remove { id: node.clone() }]);
            if !report.changed() {
                exit_with_error(&format!("Step '{}' does not exist", node));
            }
            println!(
                "Removed step '{}' and {} connection(s)",
                node, report.cascaded
            );
            print_issues(editor.issues());
        }
        Command::Disconnect { edge } => {
            let report = editor.apply_edge_changes(&[EdgeChange::Remove { id: edge.clone() }]);
            if !report.changed() {
                exit_with_error(&format!("Connection '{}' does not exist", edge));
            }
            println!("Removed connection '{}'", edge);
            print_issues(editor.issues());
        }
        Command::Example => {
            editor.load_example();
            println!("Example order flow loaded");
            print_funnel(&editor);
        }
        Command::Clear => {
            editor.clear();
            println!("Cleared");
        }
        Command::Export { out } => match editor.export_to_dir(&out) {
            Ok(path) => println!("Exported to {}", path.display()),
            Err(e) => exit_with_error(&format!("Export failed: {}", e)),
        },
        Command::Import { file } => {
            let json = read_file(&file);
            if let Err(e) = editor.import_json(&json) {
                exit_with_error(&format!("Invalid JSON: {}", e));
            }
            println!("Imported");
            print_issues(editor.issues());
        }
    }
}

/// Simulates a drag: records the start, moves the step, then releases it.
fn drop_node<S: SnapshotStore>(editor: &mut FunnelEditor<S>, node: &str, position: Position) {
    if !editor.begin_drag(node) {
        exit_with_error(&format!("Step '{}' does not exist", node));
    }
    editor.apply_node_changes(&[NodeChange::move_to(node, position)]);
    match editor.end_drag(node) {
        Ok(DropOutcome::Connected { edge_id }) => {
            println!("Dropped onto another step: connected ({})", edge_id)
        }
        Ok(DropOutcome::AlreadyConnected) => println!("Steps were already connected"),
        Ok(DropOutcome::SameNode) | Ok(DropOutcome::NoTarget) => {
            println!("Moved '{}' to ({}, {})", node, position.x, position.y)
        }
        Err(e) => exit_with_error(&e.to_string()),
    }
    print_issues(editor.issues());
}

fn validate_file(path: &Path) {
    let json = read_file(path);
    match funnelgraph::persistence::parse_document(&json) {
        Ok(snapshot) => print_issues(&validate(&snapshot.nodes, &snapshot.edges)),
        Err(e) => exit_with_error(&format!("Invalid JSON: {}", e)),
    }
}

fn print_steps() {
    println!("{:<10} {:<12} {:<20} {}", "TYPE", "LABEL", "BUTTON", "COLOR");
    for step in StepType::ALL {
        let config = step.config();
        println!(
            "{:<10} {:<12} {:<20} {}",
            step.as_str(),
            config.label,
            config.default_button_label,
            config.color
        );
    }
}

fn print_funnel<S: SnapshotStore>(editor: &FunnelEditor<S>) {
    let nodes = editor.nodes();
    if nodes.is_empty() {
        println!("The funnel is empty. Run `example` to start from the example order flow.");
        return;
    }

    println!("\n--- Steps ---");
    for node in &nodes {
        let warning = node
            .data
            .warning_message
            .as_deref()
            .map_or(String::new(), |w| format!("  [!] {}", w));
        println!(
            "{:<40} {:<9} {:<14} ({}, {}){}",
            node.id,
            node.step().as_str(),
            node.title(),
            node.position.x,
            node.position.y,
            warning
        );
    }

    println!("\n--- Connections ---");
    for edge in editor.edges() {
        println!("{:<36} {} -> {}", edge.id, edge.source, edge.target);
    }
    println!();
    print_issues(editor.issues());
}

fn print_issues(issues: &[ValidationIssue]) {
    match ValidationStatus::from_issues(issues) {
        ValidationStatus::Ok => println!("Status: OK"),
        ValidationStatus::Issues { count, .. } => {
            println!("Status: {} issue(s)", count);
            for issue in issues {
                println!("  - {}", issue.message);
            }
        }
    }
}

fn read_file(path: &Path) -> String {
    fs::read_to_string(path).unwrap_or_else(|e| {
        exit_with_error(&format!(
            "Failed to read file '{}': {}",
            path.display(),
            e
        ))
    })
}

fn exit_with_error(message: &str) -> ! {
    eprintln!("\nError: {}", message);
    std::process::exit(1);
}
