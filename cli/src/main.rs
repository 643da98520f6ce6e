//! Typegraph CLI: load a JSON type catalog into an in-memory graph and inspect it

use clap::{Parser, Subcommand};
use comfy_table::{ContentArrangement, Table};
use std::path::{Path, PathBuf};
use tracing::Level;
use typegraph::{GraphProvider, TypeDef, TypeDefGraphStore, TypeStoreConfig, TypeStoreError, TypesDef};

#[derive(Parser)]
#[command(name = "typegraph", version, about = "Type catalog graph store CLI")]
struct Cli {
    /// Store configuration (YAML)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(long, default_value = "table", global = true)]
    format: OutputFormat,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, clap::ValueEnum)]
enum OutputFormat {
    Table,
    Json,
    Csv,
}

#[derive(Subcommand)]
enum Commands {
    /// Load a catalog and list its types
    Load {
        /// Catalog JSON file
        catalog: PathBuf,
    },
    /// Show the supertypes of one type
    Supertypes {
        catalog: PathBuf,

        /// Type name
        name: String,
    },
    /// Delete a type, refusing while other types reference it
    Delete {
        catalog: PathBuf,

        /// Type name
        name: String,
    },
    /// Load a catalog and print it back with generated defaults filled in
    Export {
        catalog: PathBuf,
    },
    /// Start an interactive shell over a loaded catalog
    Shell {
        catalog: PathBuf,
    },
}

type CliResult<T> = Result<T, Box<dyn std::error::Error>>;

fn main() {
    let cli = Cli::parse();

    let level = if cli.verbose { Level::DEBUG } else { Level::WARN };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    let result = run(&cli);

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> CliResult<()> {
    let config = match &cli.config {
        Some(path) => TypeStoreConfig::from_file(path)?,
        None => TypeStoreConfig::default(),
    };

    match &cli.command {
        Commands::Load { catalog } => {
            let (_provider, store) = open_catalog(catalog, config)?;
            run_list(&store, &cli.format)
        }
        Commands::Supertypes { catalog, name } => {
            let (_provider, store) = open_catalog(catalog, config)?;
            run_supertypes(&store, name, &cli.format)
        }
        Commands::Delete { catalog, name } => {
            let (_provider, store) = open_catalog(catalog, config)?;
            run_delete(&store, name)?;
            run_list(&store, &cli.format)
        }
        Commands::Export { catalog } => {
            let (_provider, store) = open_catalog(catalog, config)?;
            println!("{}", serde_json::to_string_pretty(&store.load_types_def()?)?);
            Ok(())
        }
        Commands::Shell { catalog } => {
            let (_provider, store) = open_catalog(catalog, config)?;
            run_shell(&store, &cli.format)
        }
    }
}

fn open_catalog(path: &Path, config: TypeStoreConfig) -> CliResult<(GraphProvider, TypeDefGraphStore)> {
    let contents = std::fs::read_to_string(path)?;
    let types: TypesDef = serde_json::from_str(&contents)?;

    let provider = GraphProvider::in_memory(&config);
    let store = TypeDefGraphStore::new(&provider, config);
    let created = store.create_types_def(types)?;
    eprintln!("Loaded {} type(s) from {}", created.len(), path.display());

    Ok((provider, store))
}

fn run_list(store: &TypeDefGraphStore, format: &OutputFormat) -> CliResult<()> {
    let defs = store.load_types_def()?.into_type_defs();

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&defs)?);
        }
        OutputFormat::Csv => {
            println!("name,category,type_version,version,guid,supertypes");
            for def in &defs {
                let cells: Vec<String> = type_row(def).iter().map(|v| format_csv_value(v)).collect();
                println!("{}", cells.join(","));
            }
        }
        OutputFormat::Table => {
            if defs.is_empty() {
                println!("(no types)");
                return Ok(());
            }

            let mut table = Table::new();
            table.set_content_arrangement(ContentArrangement::Dynamic);
            table.set_header(vec!["Name", "Category", "Type Version", "Version", "GUID", "Supertypes"]);

            for def in &defs {
                table.add_row(type_row(def));
            }

            println!("{}", table);
            println!("{} type(s)", defs.len());
        }
    }

    Ok(())
}

fn run_supertypes(store: &TypeDefGraphStore, name: &str, format: &OutputFormat) -> CliResult<()> {
    let vertex = store
        .find_type_vertex_by_name(name)?
        .ok_or_else(|| format!("type {} not found", name))?;
    let names = store.get_super_type_names(vertex)?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&names)?);
        }
        _ => {
            if names.is_empty() {
                println!("{} has no supertypes", name);
            }
            for super_type in &names {
                println!("{}", super_type);
            }
        }
    }

    Ok(())
}

fn run_delete(store: &TypeDefGraphStore, name: &str) -> CliResult<()> {
    let vertex = store
        .find_type_vertex_by_name(name)?
        .ok_or_else(|| format!("type {} not found", name))?;

    match store.delete_type_vertex(vertex) {
        Ok(()) => {
            println!("Deleted {}", name);
            Ok(())
        }
        Err(TypeStoreError::HasReferences(_)) => {
            Err(format!("{} is still referenced by other types", name).into())
        }
        Err(e) => Err(e.into()),
    }
}

fn run_shell(store: &TypeDefGraphStore, format: &OutputFormat) -> CliResult<()> {
    println!("Typegraph Interactive Shell");
    println!("Type :help for commands. :quit to exit.\n");

    let stdin = std::io::stdin();
    let mut line = String::new();

    loop {
        eprint!("typegraph> ");

        line.clear();
        if stdin.read_line(&mut line)? == 0 {
            break; // EOF
        }

        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        let (command, arg) = match trimmed.split_once(char::is_whitespace) {
            Some((command, arg)) => (command, arg.trim()),
            None => (trimmed, ""),
        };

        let result = match command {
            ":quit" | ":exit" | ":q" => break,
            ":help" | ":h" => {
                println!("Commands:");
                println!("  :types              List stored types");
                println!("  :supertypes <name>  Show supertypes of a type");
                println!("  :delete <name>      Delete a type");
                println!("  :quit               Exit shell");
                Ok(())
            }
            ":types" => run_list(store, format),
            ":supertypes" => run_supertypes(store, arg, format),
            ":delete" => run_delete(store, arg),
            other => Err(format!("unknown command {}", other).into()),
        };

        if let Err(e) = result {
            eprintln!("Error: {}", e);
        }
    }

    println!("Bye!");
    Ok(())
}

fn type_row(def: &TypeDef) -> Vec<String> {
    let base = def.base();
    let super_types = def
        .super_types()
        .map(|names| names.iter().cloned().collect::<Vec<_>>().join(" "))
        .unwrap_or_default();

    vec![
        base.name.clone(),
        def.category().to_string(),
        base.type_version.clone().unwrap_or_default(),
        base.version.map(|v| v.to_string()).unwrap_or_default(),
        base.guid.clone().unwrap_or_default(),
        super_types,
    ]
}

fn format_csv_value(v: &str) -> String {
    if v.contains(',') || v.contains('"') || v.contains('\n') {
        format!("\"{}\"", v.replace('"', "\"\""))
    } else {
        v.to_string()
    }
}
