use sea_orm::entity::prelude::*;
use serde::Serialize;

/// A person known to the registry. One row per account, whatever the role;
/// the `role` tag says which of the nullable role-specific columns are live.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "accounts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    #[sea_orm(unique)]
    pub username: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Assigned once, on first save. Never rewritten afterwards.
    #[sea_orm(unique)]
    pub registration_id: String,
    pub role: Role,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: Option<String>,
    pub address: Option<String>,
    pub date_of_birth: Option<Date>,
    pub gender: Option<Gender>,
    pub profile_picture: Option<String>,
    pub emergency_contact: String,
    pub joining_date: Option<Date>,

    // Admin/Staff
    pub department_id: Option<i32>,
    pub qualification: Option<String>,
    // Staff
    pub designation: Option<String>,
    // Student
    pub grade_id: Option<i32>,
    pub admission_date: Option<Date>,
    pub parent_name: Option<String>,
    pub parent_contact_number: Option<String>,

    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::department::Entity",
        from = "Column::DepartmentId",
        to = "super::department::Column::Id",
        on_update = "Cascade",
        on_delete = "SetNull"
    )]
    Department,
    #[sea_orm(
        belongs_to = "super::grade::Entity",
        from = "Column::GradeId",
        to = "super::grade::Column::Id",
        on_update = "Cascade",
        on_delete = "Restrict"
    )]
    Grade,
}

impl Related<super::department::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Department.def()
    }
}

impl Related<super::grade::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Grade.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Role tag stored on the row. The stored code doubles as the registration
/// identifier prefix.
#[derive(Copy, Clone, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(3))")]
pub enum Role {
    #[sea_orm(string_value = "ADM")]
    Admin,
    #[sea_orm(string_value = "STF")]
    Staff,
    #[sea_orm(string_value = "LIB")]
    Librarian,
    #[sea_orm(string_value = "STU")]
    Student,
}

impl Role {
    /// 3-character prefix of registration identifiers minted for this role.
    pub const fn prefix(&self) -> &'static str {
        match self {
            Role::Admin => "ADM",
            Role::Staff => "STF",
            Role::Librarian => "LIB",
            Role::Student => "STU",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let token = match self {
            Role::Admin => "Admin",
            Role::Staff => "Staff",
            Role::Librarian => "Librarian",
            Role::Student => "Student",
        };
        write!(f, "{}", token)
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "admin" => Ok(Role::Admin),
            "staff" => Ok(Role::Staff),
            "librarian" => Ok(Role::Librarian),
            "student" => Ok(Role::Student),
            _ => Err(format!("{:?} is not a valid role", s)),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(3))")]
pub enum Gender {
    #[sea_orm(string_value = "MAL")]
    Male,
    #[sea_orm(string_value = "FEM")]
    Female,
    #[sea_orm(string_value = "OTH")]
    Other,
}

impl std::fmt::Display for Gender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let token = match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
            Gender::Other => "Other",
        };
        write!(f, "{}", token)
    }
}

impl std::str::FromStr for Gender {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "male" => Ok(Gender::Male),
            "female" => Ok(Gender::Female),
            "other" => Ok(Gender::Other),
            _ => Err(format!("{:?} is not a valid gender", s)),
        }
    }
}
