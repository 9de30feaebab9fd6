use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Reference tables first so the accounts table can point at them
        manager
            .create_table(
                Table::create()
                    .table(Departments::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Departments::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Departments::Name)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Grades::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Grades::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Grades::Name)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .to_owned(),
            )
            .await?;

        // Single accounts table: person columns plus a role tag and the
        // role-specific columns, nullable where only some roles carry them
        manager
            .create_table(
                Table::create()
                    .table(Accounts::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Accounts::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Accounts::Username)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(Accounts::PasswordHash)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Accounts::RegistrationId)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(Accounts::Role)
                            .string_len(3)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Accounts::FirstName)
                            .string()
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(Accounts::LastName)
                            .string()
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(Accounts::Email)
                            .string()
                            .not_null()
                            .default(""),
                    )
                    .col(ColumnDef::new(Accounts::PhoneNumber).string().null())
                    .col(ColumnDef::new(Accounts::Address).text().null())
                    .col(ColumnDef::new(Accounts::DateOfBirth).date().null())
                    .col(ColumnDef::new(Accounts::Gender).string_len(3).null())
                    .col(ColumnDef::new(Accounts::ProfilePicture).string().null())
                    .col(
                        ColumnDef::new(Accounts::EmergencyContact)
                            .string()
                            .not_null()
                            .default(""),
                    )
                    .col(ColumnDef::new(Accounts::JoiningDate).date().null())
                    .col(ColumnDef::new(Accounts::DepartmentId).integer().null())
                    .col(ColumnDef::new(Accounts::Qualification).string().null())
                    .col(ColumnDef::new(Accounts::Designation).string().null())
                    .col(ColumnDef::new(Accounts::GradeId).integer().null())
                    .col(ColumnDef::new(Accounts::AdmissionDate).date().null())
                    .col(ColumnDef::new(Accounts::ParentName).string().null())
                    .col(
                        ColumnDef::new(Accounts::ParentContactNumber)
                            .string()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(Accounts::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Accounts::UpdatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_accounts_department_id")
                            .from(Accounts::Table, Accounts::DepartmentId)
                            .to(Departments::Table, Departments::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_accounts_grade_id")
                            .from(Accounts::Table, Accounts::GradeId)
                            .to(Grades::Table, Grades::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_accounts_username")
                    .table(Accounts::Table)
                    .col(Accounts::Username)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_accounts_registration_id")
                    .table(Accounts::Table)
                    .col(Accounts::RegistrationId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_accounts_department_id")
                    .table(Accounts::Table)
                    .col(Accounts::DepartmentId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_accounts_grade_id")
                    .table(Accounts::Table)
                    .col(Accounts::GradeId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Accounts::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Grades::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Departments::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Accounts {
    Table,
    Id,
    Username,
    PasswordHash,
    RegistrationId,
    Role,
    FirstName,
    LastName,
    Email,
    PhoneNumber,
    Address,
    DateOfBirth,
    Gender,
    ProfilePicture,
    EmergencyContact,
    JoiningDate,
    DepartmentId,
    Qualification,
    Designation,
    GradeId,
    AdmissionDate,
    ParentName,
    ParentContactNumber,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Departments {
    Table,
    Id,
    Name,
}

#[derive(DeriveIden)]
enum Grades {
    Table,
    Id,
    Name,
}
