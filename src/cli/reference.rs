// Department and grade management commands

use clap::Subcommand;
use sea_orm::DatabaseConnection;

use crate::errors::RegistryError;
use crate::stores::{DepartmentStore, GradeStore};

#[derive(Subcommand)]
pub enum DepartmentCommands {
    /// Add a department
    Add { name: String },

    /// Remove a department, detaching any accounts that reference it
    Remove { id: i32 },

    /// List departments
    List,
}

#[derive(Subcommand)]
pub enum GradeCommands {
    /// Add a grade
    Add { name: String },

    /// Remove a grade (refused while students are enrolled in it)
    Remove { id: i32 },

    /// List grades
    List,
}

pub async fn handle_department_command(
    cmd: DepartmentCommands,
    db: &DatabaseConnection,
) -> Result<(), Box<dyn std::error::Error>> {
    let store = DepartmentStore::new(db.clone());

    match cmd {
        DepartmentCommands::Add { name } => {
            let department = store.create(&name).await?;
            println!(
                "✅ Department '{}' created with id {}.",
                department.name, department.id
            );
        }
        DepartmentCommands::Remove { id } => {
            let detached = store.delete(id).await?;
            println!("✅ Department {} removed.", id);
            if detached > 0 {
                println!("   {} account(s) detached from it.", detached);
            }
        }
        DepartmentCommands::List => {
            let departments = store.list().await?;
            if departments.is_empty() {
                println!("No departments defined.");
                return Ok(());
            }
            for department in departments {
                println!("{:<5} {}", department.id, department.name);
            }
        }
    }

    Ok(())
}

pub async fn handle_grade_command(
    cmd: GradeCommands,
    db: &DatabaseConnection,
) -> Result<(), Box<dyn std::error::Error>> {
    let store = GradeStore::new(db.clone());

    match cmd {
        GradeCommands::Add { name } => {
            let grade = store.create(&name).await?;
            println!("✅ Grade '{}' created with id {}.", grade.name, grade.id);
        }
        GradeCommands::Remove { id } => match store.delete(id).await {
            Ok(()) => println!("✅ Grade {} removed.", id),
            Err(e @ RegistryError::GradeInUse { .. }) => {
                println!("❌ {}", e);
                println!("   Move or remove the students first.");
                return Err(e.into());
            }
            Err(e) => return Err(e.into()),
        },
        GradeCommands::List => {
            let grades = store.list().await?;
            if grades.is_empty() {
                println!("No grades defined.");
                return Ok(());
            }
            for grade in grades {
                println!("{:<5} {}", grade.id, grade.name);
            }
        }
    }

    Ok(())
}
