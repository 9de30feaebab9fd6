// CLI surface for managing the registry from the terminal

pub mod accounts;
pub mod reference;

use clap::{Parser, Subcommand};
use sea_orm::DatabaseConnection;

use crate::config;
use crate::types::db::account::Role;

use accounts::RegisterCommands;
use reference::{DepartmentCommands, GradeCommands};

/// Account registry CLI for school account management
#[derive(Parser)]
#[command(name = "account-registry")]
#[command(about = "School account registry CLI", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run pending database migrations
    Migrate,

    /// Register an account for one of the roles
    #[command(subcommand)]
    Register(RegisterCommands),

    /// List registered accounts
    List {
        /// Restrict the listing to one role
        #[arg(long)]
        role: Option<Role>,

        /// Emit JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Department management commands
    #[command(subcommand)]
    Department(DepartmentCommands),

    /// Grade management commands
    #[command(subcommand)]
    Grade(GradeCommands),
}

/// Execute CLI command
///
/// Routes the parsed CLI command to the appropriate handler function.
///
/// # Arguments
/// * `cli` - Parsed CLI arguments
/// * `db` - Open registry database connection
///
/// # Returns
/// * `Ok(())` - Command executed successfully
/// * `Err(...)` - Command execution failed
pub async fn execute_command(
    cli: Cli,
    db: &DatabaseConnection,
) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Migrate => {
            config::migrate_database(db).await?;
            println!("✅ Database migrations completed");
        }
        Commands::Register(register_cmd) => {
            accounts::register_account(register_cmd, db).await?;
        }
        Commands::List { role, json } => {
            accounts::list_accounts(role, json, db).await?;
        }
        Commands::Department(department_cmd) => {
            reference::handle_department_command(department_cmd, db).await?;
        }
        Commands::Grade(grade_cmd) => {
            reference::handle_grade_command(grade_cmd, db).await?;
        }
    }

    Ok(())
}
