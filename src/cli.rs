use crate::commands::{run_compile, run_report, CompileArgs, ReportArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use indicator_forms::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Indicator Forms",
    about = "Compile indicator spreadsheets into standardized reporting forms",
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
    /// Compile an indicator CSV and print the resulting form
    Compile(CompileArgs),
    /// Compile, score and export a submission report
    Report(ReportArgs),
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
        Command::Compile(args) => run_compile(args),
        Command::Report(args) => run_report(args),
    }
}
