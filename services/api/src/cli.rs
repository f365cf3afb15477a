use crate::demo::{run_analyze, run_demo, run_import, AnalyzeArgs, ImportArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use veteran_profile::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Veteran Profile Service",
    about = "Classify customer inquiries and serve veteran-personalized experiences",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Classify one inquiry and print its profile, discounts and specialist
    Analyze(AnalyzeArgs),
    /// Classify every row of a CSV export (columns: id,text,budget,timeline,project_type)
    Import(ImportArgs),
    /// Walk through a full veteran session from the command line
    Demo,
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Analyze(args) => run_analyze(args),
        Command::Import(args) => run_import(args),
        Command::Demo => run_demo(),
    }
}
