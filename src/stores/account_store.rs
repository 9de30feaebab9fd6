use chrono::{Datelike, NaiveDate, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait, QueryFilter,
    QueryOrder, Set,
};
use uuid::Uuid;

use crate::errors::RegistryError;
use crate::services::{credential, registration};
use crate::types::db::account::{self, Entity as Account, Role};
use crate::types::db::{department, grade};
use crate::types::domain::{AccountDraft, RoleDetails};

use super::unique_violation;

/// AccountStore persists person records and runs the save pipeline:
/// validate, mint a registration identifier if the draft has none, pass the
/// credential through the hashing gate, then write. The same pipeline runs
/// for every role; the draft's tagged union decides which columns are set.
pub struct AccountStore {
    db: DatabaseConnection,
}

/// The nullable role-specific columns of one row, as a unit so insert and
/// update can share the mapping from the tagged union.
struct RoleColumns {
    department_id: Option<i32>,
    qualification: Option<String>,
    designation: Option<String>,
    grade_id: Option<i32>,
    admission_date: Option<NaiveDate>,
    parent_name: Option<String>,
    parent_contact_number: Option<String>,
}

impl RoleColumns {
    fn from_details(details: &RoleDetails) -> Self {
        let mut columns = Self {
            department_id: None,
            qualification: None,
            designation: None,
            grade_id: None,
            admission_date: None,
            parent_name: None,
            parent_contact_number: None,
        };
        match details {
            RoleDetails::Admin {
                department,
                qualification,
            } => {
                columns.department_id = *department;
                columns.qualification = Some(qualification.clone());
            }
            RoleDetails::Staff {
                department,
                designation,
                qualification,
            } => {
                columns.department_id = *department;
                columns.designation = Some(designation.clone());
                columns.qualification = Some(qualification.clone());
            }
            RoleDetails::Librarian { qualification } => {
                columns.qualification = Some(qualification.clone());
            }
            RoleDetails::Student {
                grade,
                admission_date,
                parent_name,
                parent_contact_number,
            } => {
                columns.grade_id = Some(*grade);
                columns.admission_date = Some(*admission_date);
                columns.parent_name = Some(parent_name.clone());
                columns.parent_contact_number = Some(parent_contact_number.clone());
            }
        }
        columns
    }
}

impl AccountStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Save a draft. A draft without a registration identifier is a first
    /// save: an identifier is minted for the draft's role and the record is
    /// inserted. A draft carrying one updates the persisted row with that
    /// identifier. Either way the credential passes the hashing gate, and
    /// neither the identifier nor the role tag of an existing row is ever
    /// rewritten.
    ///
    /// # Returns
    /// * `Ok(Model)` - The persisted row
    /// * `Err(RegistryError)` - Validation, duplicate username, unknown
    ///   registration id, missing reference, or database failure
    pub async fn save(&self, draft: AccountDraft) -> Result<account::Model, RegistryError> {
        draft.validate()?;
        self.check_references(&draft.details).await?;
        match draft.registration_id.clone() {
            None => self.insert_account(draft).await,
            Some(registration_id) => self.update_account(&registration_id, draft).await,
        }
    }

    async fn insert_account(&self, draft: AccountDraft) -> Result<account::Model, RegistryError> {
        // Pre-check for a clean error; the unique constraint is the backstop
        if self.find_by_username(&draft.username).await?.is_some() {
            return Err(RegistryError::DuplicateUsername(draft.username));
        }

        let role = draft.details.role();
        let password_hash = credential::ensure_hashed(&draft.credential)?;
        let now = Utc::now().timestamp();

        let mut attempt = 0;
        loop {
            let registration_id = self.next_registration_id(role).await?;
            let row = compose_row(&draft, role, &registration_id, &password_hash, now);
            match row.insert(&self.db).await {
                Ok(model) => {
                    tracing::info!(
                        username = %model.username,
                        registration_id = %model.registration_id,
                        role = %role,
                        "account registered"
                    );
                    return Ok(model);
                }
                Err(e) if unique_violation(&e, "accounts.registration_id") => {
                    attempt += 1;
                    if attempt >= registration::MAX_INSERT_ATTEMPTS {
                        return Err(RegistryError::RegistrationIdExhausted {
                            prefix: role.prefix(),
                            year: Utc::now().year(),
                        });
                    }
                    tracing::warn!(
                        candidate = %registration_id,
                        "registration id taken by a concurrent save, redrawing"
                    );
                }
                Err(e) if unique_violation(&e, "accounts.username") => {
                    return Err(RegistryError::DuplicateUsername(draft.username));
                }
                Err(e) => return Err(RegistryError::database("insert_account", e)),
            }
        }
    }

    async fn update_account(
        &self,
        registration_id: &str,
        draft: AccountDraft,
    ) -> Result<account::Model, RegistryError> {
        let existing = self
            .find_by_registration_id(registration_id)
            .await?
            .ok_or_else(|| RegistryError::AccountNotFound(registration_id.to_owned()))?;

        let role = draft.details.role();
        if existing.role != role {
            return Err(RegistryError::RoleMismatch {
                registration_id: registration_id.to_owned(),
                stored: existing.role,
                requested: role,
            });
        }

        let password_hash = credential::ensure_hashed(&draft.credential)?;
        let columns = RoleColumns::from_details(&draft.details);

        // registration_id, role and created_at stay as stored
        let mut row: account::ActiveModel = existing.into();
        row.username = Set(draft.username.clone());
        row.password_hash = Set(password_hash);
        row.first_name = Set(draft.profile.first_name.clone());
        row.last_name = Set(draft.profile.last_name.clone());
        row.email = Set(draft.profile.email.clone());
        row.phone_number = Set(draft.profile.phone_number.clone());
        row.address = Set(draft.profile.address.clone());
        row.date_of_birth = Set(draft.profile.date_of_birth);
        row.gender = Set(draft.profile.gender);
        row.profile_picture = Set(draft.profile.profile_picture.clone());
        row.emergency_contact = Set(draft.profile.emergency_contact.clone());
        row.joining_date = Set(draft.profile.joining_date);
        row.department_id = Set(columns.department_id);
        row.qualification = Set(columns.qualification);
        row.designation = Set(columns.designation);
        row.grade_id = Set(columns.grade_id);
        row.admission_date = Set(columns.admission_date);
        row.parent_name = Set(columns.parent_name);
        row.parent_contact_number = Set(columns.parent_contact_number);
        row.updated_at = Set(Utc::now().timestamp());

        let model = row.update(&self.db).await.map_err(|e| {
            if unique_violation(&e, "accounts.username") {
                RegistryError::DuplicateUsername(draft.username.clone())
            } else {
                RegistryError::database("update_account", e)
            }
        })?;

        tracing::debug!(
            registration_id = %model.registration_id,
            "account updated"
        );
        Ok(model)
    }

    /// Mint a registration identifier for `role` that no persisted row
    /// carries. Bounded: after [`registration::MAX_CANDIDATE_DRAWS`] colliding
    /// draws the serial pool for this prefix and year is treated as exhausted.
    async fn next_registration_id(&self, role: Role) -> Result<String, RegistryError> {
        let year = Utc::now().year();
        let prefix = role.prefix();

        for _ in 0..registration::MAX_CANDIDATE_DRAWS {
            // rng is scoped so the draw never holds it across an await
            let candidate = {
                let mut rng = rand::rng();
                registration::candidate(prefix, year, &mut rng)
            };
            let taken = Account::find()
                .filter(account::Column::RegistrationId.eq(&candidate))
                .one(&self.db)
                .await
                .map_err(|e| RegistryError::database("check_registration_id", e))?;
            if taken.is_none() {
                return Ok(candidate);
            }
            tracing::debug!(candidate = %candidate, "registration id already assigned, redrawing");
        }

        Err(RegistryError::RegistrationIdExhausted { prefix, year })
    }

    /// Typed existence checks for the references a draft carries, so a
    /// dangling department or grade id fails before the row is composed.
    async fn check_references(&self, details: &RoleDetails) -> Result<(), RegistryError> {
        match details {
            RoleDetails::Admin {
                department: Some(id),
                ..
            }
            | RoleDetails::Staff {
                department: Some(id),
                ..
            } => {
                let found = department::Entity::find_by_id(*id)
                    .one(&self.db)
                    .await
                    .map_err(|e| RegistryError::database("check_department_reference", e))?;
                if found.is_none() {
                    return Err(RegistryError::DepartmentNotFound(*id));
                }
            }
            RoleDetails::Student { grade, .. } => {
                let found = grade::Entity::find_by_id(*grade)
                    .one(&self.db)
                    .await
                    .map_err(|e| RegistryError::database("check_grade_reference", e))?;
                if found.is_none() {
                    return Err(RegistryError::GradeNotFound(*grade));
                }
            }
            _ => {}
        }
        Ok(())
    }

    pub async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<account::Model>, RegistryError> {
        Account::find()
            .filter(account::Column::Username.eq(username))
            .one(&self.db)
            .await
            .map_err(|e| RegistryError::database("find_by_username", e))
    }

    pub async fn find_by_registration_id(
        &self,
        registration_id: &str,
    ) -> Result<Option<account::Model>, RegistryError> {
        Account::find()
            .filter(account::Column::RegistrationId.eq(registration_id))
            .one(&self.db)
            .await
            .map_err(|e| RegistryError::database("find_by_registration_id", e))
    }

    pub async fn list(&self) -> Result<Vec<account::Model>, RegistryError> {
        Account::find()
            .order_by_asc(account::Column::Username)
            .all(&self.db)
            .await
            .map_err(|e| RegistryError::database("list_accounts", e))
    }

    pub async fn list_by_role(&self, role: Role) -> Result<Vec<account::Model>, RegistryError> {
        Account::find()
            .filter(account::Column::Role.eq(role))
            .order_by_asc(account::Column::Username)
            .all(&self.db)
            .await
            .map_err(|e| RegistryError::database("list_accounts_by_role", e))
    }

    /// Check a plaintext against the stored credential of `username`.
    /// Unknown usernames and credentials this crate did not hash (empty, or
    /// an imported non-argon2 scheme) verify as false rather than erroring.
    pub async fn verify_credential(
        &self,
        username: &str,
        secret: &str,
    ) -> Result<bool, RegistryError> {
        let account = match self.find_by_username(username).await? {
            Some(account) => account,
            None => return Ok(false),
        };
        if !account.password_hash.starts_with("$argon2") {
            return Ok(false);
        }
        credential::verify_secret(secret, &account.password_hash)
    }

    /// Human-readable label: students with a recorded name show as
    /// `"First Last - GradeName"`, everyone else as
    /// `"username - registration_id"`.
    pub async fn display_label(&self, account: &account::Model) -> Result<String, RegistryError> {
        if account.role == Role::Student
            && !(account.first_name.is_empty() && account.last_name.is_empty())
        {
            let grade = account
                .find_related(grade::Entity)
                .one(&self.db)
                .await
                .map_err(|e| RegistryError::database("find_student_grade", e))?;
            if let Some(grade) = grade {
                return Ok(format!(
                    "{} {} - {}",
                    account.first_name, account.last_name, grade.name
                ));
            }
        }
        Ok(format!("{} - {}", account.username, account.registration_id))
    }
}

fn compose_row(
    draft: &AccountDraft,
    role: Role,
    registration_id: &str,
    password_hash: &str,
    now: i64,
) -> account::ActiveModel {
    let columns = RoleColumns::from_details(&draft.details);
    account::ActiveModel {
        id: Set(Uuid::new_v4().to_string()),
        username: Set(draft.username.clone()),
        password_hash: Set(password_hash.to_owned()),
        registration_id: Set(registration_id.to_owned()),
        role: Set(role),
        first_name: Set(draft.profile.first_name.clone()),
        last_name: Set(draft.profile.last_name.clone()),
        email: Set(draft.profile.email.clone()),
        phone_number: Set(draft.profile.phone_number.clone()),
        address: Set(draft.profile.address.clone()),
        date_of_birth: Set(draft.profile.date_of_birth),
        gender: Set(draft.profile.gender),
        profile_picture: Set(draft.profile.profile_picture.clone()),
        emergency_contact: Set(draft.profile.emergency_contact.clone()),
        joining_date: Set(draft.profile.joining_date),
        department_id: Set(columns.department_id),
        qualification: Set(columns.qualification),
        designation: Set(columns.designation),
        grade_id: Set(columns.grade_id),
        admission_date: Set(columns.admission_date),
        parent_name: Set(columns.parent_name),
        parent_contact_number: Set(columns.parent_contact_number),
        created_at: Set(now),
        updated_at: Set(now),
    }
}
