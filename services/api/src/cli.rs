use crate::admissions::{run_list, run_update, ListArgs, UpdateArgs};
use crate::demo::{run_demo, DemoArgs};
use crate::server;
use admissions_crm::error::AppError;
use admissions_crm::workflows::admissions::{TransitionPolicyKind, UnknownStagePolicy};
use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "Admissions CRM",
    about = "Run the admissions CRM service or work with admission records from the command line",
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
    /// List, filter, export, or move admission records
    Admissions {
        #[command(subcommand)]
        command: AdmissionsCommand,
    },
    /// Walk through a full operator session against the seeded data
    Demo(DemoArgs),
}

#[derive(Subcommand, Debug)]
enum AdmissionsCommand {
    /// Print admission records, optionally filtered and exported to CSV
    List(ListArgs),
    /// Move one record to a new stage
    Update(UpdateArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
    /// Stage transition rules: any or forward
    #[arg(long, value_parser = crate::infra::parse_transitions)]
    pub(crate) transitions: Option<TransitionPolicyKind>,
    /// Handling of unrecognised stage keys: reject or fallback
    #[arg(long, value_parser = crate::infra::parse_unknown_stage)]
    pub(crate) unknown_stage: Option<UnknownStagePolicy>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Admissions {
            command: AdmissionsCommand::List(args),
        } => run_list(args),
        Command::Admissions {
            command: AdmissionsCommand::Update(args),
        } => run_update(args),
        Command::Demo(args) => run_demo(args),
    }
}
