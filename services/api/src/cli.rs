use crate::demo::{run_audit, run_demo, run_settings, AuditArgs, DemoArgs, SettingsCommand};
use crate::server;
use clap::{Args, Parser, Subcommand};
use kisan_audit::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Kisan Audit",
    about = "Run local eligibility audits and manage device settings from the command line",
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
    /// Score a single applicant with the local audit rules
    Audit(AuditArgs),
    /// Inspect or change the persisted device settings
    Settings {
        #[command(subcommand)]
        command: SettingsCommand,
    },
    /// Walk through a scripted audit and settings session
    Demo(DemoArgs),
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
        Command::Audit(args) => run_audit(args),
        Command::Settings { command } => run_settings(command),
        Command::Demo(args) => run_demo(args),
    }
}
