use anyhow::Result;
use clap::{Args, Parser};
use rustyline::Editor;
use rustyline::error::ReadlineError;
use rustyline::history::DefaultHistory;
use std::path::PathBuf;
use wirebox::graph::ImportGraph;
use wirebox::{Registry, load_manifests, resolve};

#[derive(Parser)]
#[command(name = "wirebox")]
#[command(about = "A configuration-import registry for named components")]
struct Cli {
    #[command(flatten)]
    mode: ModeArgs,

    /// Root configuration source (defaults to the first declared source)
    #[arg(long, short)]
    root: Option<String>,

    /// Source manifest files (.toml)
    #[arg(required = true)]
    manifests: Vec<PathBuf>,
}

#[derive(Args)]
#[group(required = false, multiple = false)]
struct ModeArgs {
    /// Print the import graph without resolving the registry
    #[arg(long, short)]
    dry_run: bool,

    /// Export import graph to DOT file (graph.dot)
    #[arg(long, short)]
    export: bool,

    /// Start interactive session for inspecting the resolved registry
    #[arg(long, short)]
    interactive: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let (catalog, source_order) = load_manifests(&cli.manifests)?;
    let root = match cli.root {
        Some(root) => root,
        None => source_order
            .first()
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("No sources declared in manifests"))?,
    };

    if cli.mode.dry_run {
        let graph = ImportGraph::build(&catalog, &root)?;
        println!("--- Source Import Graph (Dry Run) ---");
        println!("{graph:#?}");
        println!("-------------------------------------");
    } else if cli.mode.export {
        let graph = ImportGraph::build(&catalog, &root)?;
        let filename = "graph.dot";
        graph.write_dot_file(filename)?;
        println!("Graph exported to {filename}");
    } else if cli.mode.interactive {
        run_interactive_session(&catalog, &root)?;
    } else {
        let registry = resolve(&catalog, &root)?;
        for name in registry.names() {
            println!("{name}");
        }
    }

    Ok(())
}

fn run_interactive_session(catalog: &wirebox::Catalog, root: &str) -> Result<()> {
    println!("Resolving registry from root '{root}'...");
    let registry = resolve(catalog, root)?;
    println!(
        "Successfully resolved registry with {} components.",
        registry.len()
    );

    println!("Starting interactive session. Type 'help' for commands.");
    let mut rl = Editor::<(), DefaultHistory>::new()?;
    loop {
        let readline = rl.readline("> ");
        match readline {
            Ok(line) => {
                let _ = rl.add_history_entry(line.as_str());
                if handle_command(&line, &registry).is_err() {
                    break;
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("CTRL-C");
                break;
            }
            Err(ReadlineError::Eof) => {
                println!("CTRL-D");
                break;
            }
            Err(err) => {
                eprintln!("Error: {err:?}");
                break;
            }
        }
    }

    Ok(())
}

fn handle_command(line: &str, registry: &Registry) -> Result<(), ()> {
    let parts: Vec<&str> = line.trim().split_whitespace().collect();

    match parts.as_slice() {
        [] => {}
        ["list"] => {
            for name in registry.names() {
                println!("- {name}");
            }
        }
        ["describe", name] => {
            if let Some(descriptor) = registry.get(name) {
                println!("Component: {}", descriptor.name());
                println!("Type: {}", descriptor.type_name());
                match descriptor.config() {
                    Some(config) => {
                        let object: serde_json::Map<String, serde_json::Value> =
                            config.clone().into_iter().collect();
                        println!(
                            "Config: {}",
                            serde_json::to_string_pretty(&serde_json::Value::Object(object))
                                .unwrap_or_else(|_| "{}".to_string())
                        );
                    }
                    None => println!("Config: (none)"),
                }
            } else {
                eprintln!("Error: Component '{name}' not found.");
            }
        }
        ["instantiate", name] => match registry.instantiate(name) {
            Ok(instance) => {
                if let Some(value) = instance.downcast_ref::<serde_json::Value>() {
                    println!(
                        "{}",
                        serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
                    );
                } else {
                    let type_name = registry
                        .get(name)
                        .map(|descriptor| descriptor.type_name())
                        .unwrap_or("unknown");
                    println!("Instantiated '{name}' ({type_name})");
                }
            }
            Err(e) => eprintln!("Error: {e}"),
        },
        ["describe"] => eprintln!("Usage: describe <component>"),
        ["instantiate"] => eprintln!("Usage: instantiate <component>"),
        ["help"] => {
            println!("Available commands:");
            println!("  list                      - List registered component names");
            println!("  describe <component>      - Show details for a component descriptor");
            println!("  instantiate <component>   - Run a component's factory");
            println!("  help                      - Show this help message");
            println!("  exit, quit                - Exit the interactive session");
        }
        ["exit"] | ["quit"] => return Err(()),
        _ => {
            eprintln!("Unknown command. Type 'help' for a list of commands.");
        }
    }
    Ok(())
}
