use crate::assess::{run_assess, run_symptoms, AssessArgs};
use crate::server;
use crate::session::{run_login, run_logout, run_whoami, LoginArgs};
use clap::{Args, Parser, Subcommand};
use postcovid::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Post COVID Assessment Service",
    about = "Kent & Medway post-COVID symptom assessment from the command line or over HTTP",
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
    /// List the symptom catalog by clinical category
    Symptoms,
    /// Generate an assessment for a set of symptoms and a postcode
    Assess(AssessArgs),
    /// Sign in with an NHS email address (mock, no verification)
    Login(LoginArgs),
    /// Forget the stored clinician
    Logout,
    /// Show the stored clinician, if any
    Whoami,
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
        Command::Symptoms => run_symptoms(),
        Command::Assess(args) => run_assess(args).await,
        Command::Login(args) => run_login(args).await,
        Command::Logout => run_logout(),
        Command::Whoami => run_whoami(),
    }
}
