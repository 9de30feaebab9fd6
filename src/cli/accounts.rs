// Account registration and listing commands

use chrono::NaiveDate;
use clap::{Args, Subcommand};
use sea_orm::DatabaseConnection;

use crate::stores::AccountStore;
use crate::types::db::account::{Gender, Role};
use crate::types::domain::{AccountDraft, Profile, RoleDetails};

/// Profile fields shared by every role, all optional at registration time
#[derive(Args)]
pub struct ProfileArgs {
    /// First name
    #[arg(long, default_value = "")]
    pub first_name: String,

    /// Last name
    #[arg(long, default_value = "")]
    pub last_name: String,

    /// Email address
    #[arg(long, default_value = "")]
    pub email: String,

    /// Phone number
    #[arg(long)]
    pub phone: Option<String>,

    /// Postal address
    #[arg(long)]
    pub address: Option<String>,

    /// Date of birth (YYYY-MM-DD)
    #[arg(long)]
    pub date_of_birth: Option<NaiveDate>,

    /// Gender (male, female, other)
    #[arg(long)]
    pub gender: Option<Gender>,

    /// Emergency contact
    #[arg(long, default_value = "")]
    pub emergency_contact: String,

    /// Joining date (YYYY-MM-DD)
    #[arg(long)]
    pub joining_date: Option<NaiveDate>,
}

impl ProfileArgs {
    fn into_profile(self) -> Profile {
        Profile {
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            phone_number: self.phone,
            address: self.address,
            date_of_birth: self.date_of_birth,
            gender: self.gender,
            profile_picture: None,
            emergency_contact: self.emergency_contact,
            joining_date: self.joining_date,
        }
    }
}

#[derive(Subcommand)]
pub enum RegisterCommands {
    /// Register an admin account
    Admin {
        username: String,
        password: String,

        /// Department the admin belongs to
        #[arg(long)]
        department: Option<i32>,

        /// Qualification (may be left empty)
        #[arg(long, default_value = "")]
        qualification: String,

        #[command(flatten)]
        profile: ProfileArgs,
    },

    /// Register a staff account
    Staff {
        username: String,
        password: String,

        /// Job designation, e.g. "Teacher"
        #[arg(long)]
        designation: String,

        /// Qualification, e.g. "M.Sc"
        #[arg(long)]
        qualification: String,

        /// Department the staff member belongs to
        #[arg(long)]
        department: Option<i32>,

        #[command(flatten)]
        profile: ProfileArgs,
    },

    /// Register a librarian account
    Librarian {
        username: String,
        password: String,

        /// Qualification, e.g. "MLIS"
        #[arg(long)]
        qualification: String,

        #[command(flatten)]
        profile: ProfileArgs,
    },

    /// Register a student account
    Student {
        username: String,
        password: String,

        /// Grade the student is enrolled in
        #[arg(long)]
        grade: i32,

        /// Admission date (YYYY-MM-DD)
        #[arg(long)]
        admission_date: NaiveDate,

        /// Parent or guardian name
        #[arg(long)]
        parent_name: String,

        /// Parent or guardian contact number
        #[arg(long)]
        parent_contact: String,

        #[command(flatten)]
        profile: ProfileArgs,
    },
}

impl RegisterCommands {
    fn into_draft(self) -> AccountDraft {
        match self {
            RegisterCommands::Admin {
                username,
                password,
                department,
                qualification,
                profile,
            } => AccountDraft::new(
                username,
                password,
                RoleDetails::Admin {
                    department,
                    qualification,
                },
            )
            .with_profile(profile.into_profile()),
            RegisterCommands::Staff {
                username,
                password,
                designation,
                qualification,
                department,
                profile,
            } => AccountDraft::new(
                username,
                password,
                RoleDetails::Staff {
                    department,
                    designation,
                    qualification,
                },
            )
            .with_profile(profile.into_profile()),
            RegisterCommands::Librarian {
                username,
                password,
                qualification,
                profile,
            } => AccountDraft::new(username, password, RoleDetails::Librarian { qualification })
                .with_profile(profile.into_profile()),
            RegisterCommands::Student {
                username,
                password,
                grade,
                admission_date,
                parent_name,
                parent_contact,
                profile,
            } => AccountDraft::new(
                username,
                password,
                RoleDetails::Student {
                    grade,
                    admission_date,
                    parent_name,
                    parent_contact_number: parent_contact,
                },
            )
            .with_profile(profile.into_profile()),
        }
    }
}

/// Register a new account
///
/// Builds a draft from the parsed arguments and runs it through the save
/// pipeline. The assigned registration identifier is printed on success.
///
/// # Returns
/// * `Ok(())` - Account registered successfully
/// * `Err(...)` - Registration failed
pub async fn register_account(
    cmd: RegisterCommands,
    db: &DatabaseConnection,
) -> Result<(), Box<dyn std::error::Error>> {
    let store = AccountStore::new(db.clone());
    let draft = cmd.into_draft();

    match store.save(draft).await {
        Ok(account) => {
            println!("✅ {} account registered.", account.role);
            println!("   Username:        {}", account.username);
            println!("   Registration ID: {}", account.registration_id);
            Ok(())
        }
        Err(e) => {
            println!("❌ Registration failed: {}", e);
            Err(e.into())
        }
    }
}

/// List registered accounts, optionally restricted to one role
///
/// # Returns
/// * `Ok(())` - Listing printed successfully
/// * `Err(...)` - Lookup failed
pub async fn list_accounts(
    role: Option<Role>,
    json: bool,
    db: &DatabaseConnection,
) -> Result<(), Box<dyn std::error::Error>> {
    let store = AccountStore::new(db.clone());
    let accounts = match role {
        Some(role) => store.list_by_role(role).await?,
        None => store.list().await?,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&accounts)?);
        return Ok(());
    }

    if accounts.is_empty() {
        println!("No accounts registered.");
        return Ok(());
    }

    for account in &accounts {
        let label = store.display_label(account).await?;
        println!(
            "{:<12} {:<10} {}",
            account.registration_id, account.role, label
        );
    }
    println!();
    println!("{} account(s)", accounts.len());

    Ok(())
}
