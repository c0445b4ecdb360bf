//! Jarurat Care Control - operator CLI for the support intake API
//!
//! Lists and submits support requests, manages volunteers and prints the
//! coordinator dashboard.

mod commands;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use jarurat_shared::Urgency;
use jaruratctl::display::parse_urgency;
use jaruratctl::{ApiClient, DEFAULT_SERVER};
use uuid::Uuid;

#[derive(Parser)]
#[command(name = "jaruratctl")]
#[command(about = "Jarurat Care - operator CLI for the support intake API", long_about = None)]
#[command(version)]
struct Cli {
    /// API base URL
    #[arg(long, global = true, env = "JARURAT_API", default_value = DEFAULT_SERVER)]
    server: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check API health
    Health,

    /// Support requests
    #[command(subcommand)]
    Support(SupportCommand),

    /// Volunteer sign-ups
    #[command(subcommand)]
    Volunteer(VolunteerCommand),

    /// Show the coordinator dashboard
    Dashboard,
}

#[derive(Subcommand)]
enum SupportCommand {
    /// List support requests, newest first
    List {
        /// Only show this urgency (High, Medium, Low)
        #[arg(long, value_parser = parse_urgency)]
        urgency: Option<Urgency>,
    },

    /// Show one request with its case summary and AI output
    Show { id: Uuid },

    /// Submit a support request
    Submit(SubmitArgs),
}

#[derive(Args)]
pub struct SubmitArgs {
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub phone: String,
    #[arg(long)]
    pub city: String,
    #[arg(long)]
    pub state: String,
    #[arg(long)]
    pub age: Option<u32>,
    /// Relation to the patient
    #[arg(long, default_value = "Self")]
    pub relation: String,
    /// Preferred contact channel
    #[arg(long, default_value = "WhatsApp")]
    pub contact: String,
    #[arg(long)]
    pub cancer_type: Option<String>,
    #[arg(long)]
    pub stage: Option<String>,
    /// Requested help, repeatable
    #[arg(long = "need")]
    pub needs: Vec<String>,
    #[arg(long)]
    pub symptoms: Option<String>,
    #[arg(long)]
    pub message: Option<String>,
}

#[derive(Subcommand)]
enum VolunteerCommand {
    /// List registered volunteers
    List,

    /// Register a volunteer
    Register(RegisterArgs),
}

#[derive(Args)]
pub struct RegisterArgs {
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub phone: String,
    #[arg(long)]
    pub city: String,
    #[arg(long)]
    pub state: String,
    #[arg(long)]
    pub email: Option<String>,
    /// Skill, repeatable
    #[arg(long = "skill")]
    pub skills: Vec<String>,
    /// Availability in hours per week
    #[arg(long)]
    pub hours: Option<u32>,
    #[arg(long)]
    pub motivation: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let client = ApiClient::new(&cli.server)?;

    match cli.command {
        Commands::Health => commands::health(&client).await,
        Commands::Support(SupportCommand::List { urgency }) => {
            commands::list_support(&client, urgency).await
        }
        Commands::Support(SupportCommand::Show { id }) => commands::show_support(&client, id).await,
        Commands::Support(SupportCommand::Submit(args)) => {
            commands::submit_support(&client, args).await
        }
        Commands::Volunteer(VolunteerCommand::List) => commands::list_volunteers(&client).await,
        Commands::Volunteer(VolunteerCommand::Register(args)) => {
            commands::register_volunteer(&client, args).await
        }
        Commands::Dashboard => commands::dashboard(&client).await,
    }
}
