use clap::{Parser as ClapParser, Subcommand};
use std::cmp::Ordering;
use std::io::{self, Read};
use tracing_subscriber::EnvFilter;
use valpath::Source;
use valpath::cli::{
    self, CheckOptions, CliError, CompareOptions, DiffOptions, Document, GetOptions, PathsOptions,
};

#[derive(ClapParser)]
#[command(name = "valpath")]
#[command(about = "valpath - address, walk, compare and diff JSON documents with path expressions")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the value addressed by a path
    Get {
        /// The path expression, e.g. `.spec.ports[0].name`
        path: String,

        /// JSON file to read (reads from stdin if not provided)
        #[arg(short, long)]
        input: Option<String>,

        /// Pretty-print the output
        #[arg(short, long)]
        pretty: bool,
    },

    /// Validate a path expression and print its canonical form
    Check {
        /// The path expression to validate
        path: String,
    },

    /// List every leaf path in a document
    Paths {
        /// JSON file to read (reads from stdin if not provided)
        #[arg(short, long)]
        input: Option<String>,

        /// Also list array and map paths
        #[arg(long)]
        collections: bool,
    },

    /// Report structural differences between two JSON files
    Diff { left: String, right: String },

    /// Order two JSON files, printing -1, 0 or 1
    Compare { left: String, right: String },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Get {
            path,
            input,
            pretty,
        } => run_get(path, input, pretty),
        Commands::Check { path } => cli::execute_check(&CheckOptions { path }).map(|result| {
            println!("{}", result.canonical);
        }),
        Commands::Paths { input, collections } => run_paths(input, collections),
        Commands::Diff { left, right } => run_diff(&left, &right),
        Commands::Compare { left, right } => run_compare(&left, &right),
    };

    if let Err(e) = result {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

/// Read `--input`, or stdin when it is not a terminal.
fn read_input(input: Option<String>) -> Result<Option<Document>, CliError> {
    match input {
        Some(path) => Document::from_file(&path).map(Some),
        None if !atty::is(atty::Stream::Stdin) => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .map_err(|source| CliError::Io {
                    path: "<stdin>".to_string(),
                    source,
                })?;
            Ok(Some(Document::new(buffer, Source::named("<stdin>"))))
        }
        None => Ok(None),
    }
}

fn run_get(path: String, input: Option<String>, pretty: bool) -> Result<(), CliError> {
    let options = GetOptions {
        path,
        input: read_input(input)?,
    };
    let output = cli::execute_get(&options)?;
    let json = if pretty {
        serde_json::to_string_pretty(&output)
    } else {
        serde_json::to_string(&output)
    }
    .map_err(|source| CliError::Json {
        name: "output".to_string(),
        source,
    })?;
    println!("{}", json);
    Ok(())
}

fn run_paths(input: Option<String>, collections: bool) -> Result<(), CliError> {
    let options = PathsOptions {
        input: read_input(input)?,
        collections,
    };
    for entry in cli::execute_paths(&options)? {
        println!("{}\t{}", entry.path, entry.kind);
    }
    Ok(())
}

fn run_diff(left: &str, right: &str) -> Result<(), CliError> {
    let options = DiffOptions {
        left: Document::from_file(left)?,
        right: Document::from_file(right)?,
    };
    for difference in cli::execute_diff(&options)? {
        let show = |side: &Option<valpath::Value>| match side {
            Some(value) => value.to_string(),
            None => "<absent>".to_string(),
        };
        println!(
            "{}: {} -> {}",
            difference.path,
            show(&difference.left),
            show(&difference.right)
        );
    }
    Ok(())
}

fn run_compare(left: &str, right: &str) -> Result<(), CliError> {
    let options = CompareOptions {
        left: Document::from_file(left)?,
        right: Document::from_file(right)?,
    };
    let ordering = match cli::execute_compare(&options)? {
        Ordering::Less => -1,
        Ordering::Equal => 0,
        Ordering::Greater => 1,
    };
    println!("{}", ordering);
    Ok(())
}
