pub mod complete;
pub mod export;
pub mod init;
pub mod order;
pub mod resume;
pub mod session;
pub mod status;
pub mod wait;
pub mod watch;

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Debug, Subcommand)]
enum Commands {
    #[command(about = "Configuration initialization")]
    Init(init::InitArgs),
    #[command(about = "Register, list and inspect work orders", arg_required_else_help = true)]
    Order(order::OrderArgs),
    #[command(about = "Mark a work order as awaiting an external dependency")]
    Wait(wait::WaitArgs),
    #[command(about = "Resume a work order after its dependency is resolved")]
    Resume(resume::ResumeArgs),
    #[command(about = "Mark a work order as completed")]
    Complete(complete::CompleteArgs),
    #[command(about = "Show the SLA dashboard")]
    Status(status::StatusArgs),
    #[command(about = "Re-evaluate open orders periodically and alert on changes")]
    Watch,
    #[command(about = "Show or change the current session role")]
    Session(session::SessionArgs),
    #[command(about = "Export the SLA report")]
    Export(export::ExportArgs),
}

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
#[command(arg_required_else_help(true))]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub async fn menu() -> Result<()> {
        let cli = Self::parse();
        match cli.command {
            Commands::Init(args) => init::cmd(args),
            Commands::Order(args) => order::cmd(args),
            Commands::Wait(args) => wait::cmd(args),
            Commands::Resume(args) => resume::cmd(args),
            Commands::Complete(args) => complete::cmd(args),
            Commands::Status(args) => status::cmd(args),
            Commands::Watch => watch::cmd().await,
            Commands::Session(args) => session::cmd(args),
            Commands::Export(args) => export::cmd(args),
        }
    }
}
