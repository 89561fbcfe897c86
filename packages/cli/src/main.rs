mod commands;

use clap::{Parser, Subcommand};
use commands::{form, infer, inspect, normalize, FormArgs, InferArgs, InspectArgs, NormalizeArgs};

/// Pagecraft CLI - inspect and edit page files offline
#[derive(Parser, Debug)]
#[command(name = "pagecraft")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the blocks of a page file
    Inspect(InspectArgs),

    /// Infer the editable schema of a content sample
    Infer(InferArgs),

    /// Render the form outline for a content sample
    Form(FormArgs),

    /// Renumber a page file's order indices and rewrite it
    Normalize(NormalizeArgs),
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Inspect(args) => inspect::run(args),
        Command::Infer(args) => infer::run(args),
        Command::Form(args) => form::run(args),
        Command::Normalize(args) => normalize::run(args),
    }
}
