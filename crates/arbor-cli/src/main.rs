use arbor_archive::Format;
use arbor_cli::{check, convert, outline, ConvertArgs, DEFAULT_ROOT};
use clap::{ArgAction, Parser, Subcommand};
use miette::Result;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "arbor", version, about = "Convert and inspect arbor XML/JSON documents")]
struct Cli {
    /// More log output (-v debug, -vv trace); RUST_LOG takes precedence
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load a document and save it again, possibly in another format
    Convert {
        input: PathBuf,
        output: PathBuf,
        #[arg(long, default_value = DEFAULT_ROOT)]
        root: String,
        /// Root name for the output, defaults to --root
        #[arg(long)]
        out_root: Option<String>,
        #[arg(long)]
        from: Option<Format>,
        #[arg(long)]
        to: Option<Format>,
    },
    /// Load a document and report its size
    Check {
        input: PathBuf,
        #[arg(long, default_value = DEFAULT_ROOT)]
        root: String,
        #[arg(long)]
        format: Option<Format>,
    },
    /// Print the tree of a document
    Print {
        input: PathBuf,
        #[arg(long, default_value = DEFAULT_ROOT)]
        root: String,
        #[arg(long)]
        format: Option<Format>,
    },
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .build(),
        )
    }))
    .ok();

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Convert {
            input,
            output,
            root,
            out_root,
            from,
            to,
        } => {
            let tree = convert(&ConvertArgs {
                input: &input,
                output: &output,
                from,
                to,
                root: &root,
                out_root: out_root.as_deref(),
            })?;
            println!(
                "{} -> {} ({} containers)",
                input.display(),
                output.display(),
                tree.tree_size()
            );
        }
        Commands::Check {
            input,
            root,
            format,
        } => {
            let summary = check(&input, format, &root)?;
            println!(
                "{}: ok, {} containers, {} attributes",
                input.display(),
                summary.containers,
                summary.attributes
            );
        }
        Commands::Print {
            input,
            root,
            format,
        } => {
            print!("{}", outline(&input, format, &root)?);
        }
    }
    Ok(())
}
