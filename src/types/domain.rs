//! Domain model of the registry: the person profile shared by every role and
//! the role-specific attributes as a tagged union. Role-required fields are
//! required by type here, not by a validation table.

use chrono::NaiveDate;
use serde::Serialize;

use crate::errors::RegistryError;

pub use crate::types::db::account::{Gender, Role};

/// Profile attributes common to every account, all optional at registration
/// time. Name and contact fields follow the convention of the persisted
/// schema: absent text is an empty string, absent dates are `None`.
#[derive(Clone, Debug, Default, Serialize)]
pub struct Profile {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: Option<String>,
    pub address: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub gender: Option<Gender>,
    pub profile_picture: Option<String>,
    pub emergency_contact: String,
    pub joining_date: Option<NaiveDate>,
}

/// Role-specific attributes, one variant per specialization. Variants are
/// mutually exclusive; the variant fixes both the registration id prefix and
/// which columns of the row are live.
#[derive(Clone, Debug, Serialize)]
pub enum RoleDetails {
    Admin {
        department: Option<i32>,
        /// May be left empty for admins.
        qualification: String,
    },
    Staff {
        department: Option<i32>,
        designation: String,
        qualification: String,
    },
    Librarian {
        qualification: String,
    },
    Student {
        grade: i32,
        admission_date: NaiveDate,
        parent_name: String,
        parent_contact_number: String,
    },
}

impl RoleDetails {
    pub fn role(&self) -> Role {
        match self {
            RoleDetails::Admin { .. } => Role::Admin,
            RoleDetails::Staff { .. } => Role::Staff,
            RoleDetails::Librarian { .. } => Role::Librarian,
            RoleDetails::Student { .. } => Role::Student,
        }
    }

    /// Non-empty checks for the string fields each role requires. Fields the
    /// type system already guarantees (student grade, admission date) need no
    /// check here.
    pub(crate) fn validate(&self) -> Result<(), RegistryError> {
        match self {
            RoleDetails::Admin { .. } => Ok(()),
            RoleDetails::Staff {
                designation,
                qualification,
                ..
            } => {
                non_empty("designation", designation)?;
                non_empty("qualification", qualification)
            }
            RoleDetails::Librarian { qualification } => non_empty("qualification", qualification),
            RoleDetails::Student {
                parent_name,
                parent_contact_number,
                ..
            } => {
                non_empty("parent_name", parent_name)?;
                non_empty("parent_contact_number", parent_contact_number)
            }
        }
    }
}

fn non_empty(field: &'static str, value: &str) -> Result<(), RegistryError> {
    if value.trim().is_empty() {
        Err(RegistryError::MissingField { field })
    } else {
        Ok(())
    }
}

/// What a caller hands to [`AccountStore::save`](crate::stores::AccountStore::save).
///
/// `registration_id` of `None` marks a first save: the store mints an
/// identifier and inserts. `Some(..)` addresses the already-persisted row
/// with that identifier and updates it; the stored identifier and role tag
/// are never rewritten.
#[derive(Clone, Debug)]
pub struct AccountDraft {
    pub username: String,
    /// Plaintext or an already-marked hash; the save pipeline decides.
    pub credential: String,
    pub registration_id: Option<String>,
    pub profile: Profile,
    pub details: RoleDetails,
}

impl AccountDraft {
    pub fn new(
        username: impl Into<String>,
        credential: impl Into<String>,
        details: RoleDetails,
    ) -> Self {
        Self {
            username: username.into(),
            credential: credential.into(),
            registration_id: None,
            profile: Profile::default(),
            details,
        }
    }

    pub fn admin(username: impl Into<String>, credential: impl Into<String>) -> Self {
        Self::new(
            username,
            credential,
            RoleDetails::Admin {
                department: None,
                qualification: String::new(),
            },
        )
    }

    pub fn staff(
        username: impl Into<String>,
        credential: impl Into<String>,
        designation: impl Into<String>,
        qualification: impl Into<String>,
    ) -> Self {
        Self::new(
            username,
            credential,
            RoleDetails::Staff {
                department: None,
                designation: designation.into(),
                qualification: qualification.into(),
            },
        )
    }

    pub fn librarian(
        username: impl Into<String>,
        credential: impl Into<String>,
        qualification: impl Into<String>,
    ) -> Self {
        Self::new(
            username,
            credential,
            RoleDetails::Librarian {
                qualification: qualification.into(),
            },
        )
    }

    pub fn student(
        username: impl Into<String>,
        credential: impl Into<String>,
        grade: i32,
        admission_date: NaiveDate,
        parent_name: impl Into<String>,
        parent_contact_number: impl Into<String>,
    ) -> Self {
        Self::new(
            username,
            credential,
            RoleDetails::Student {
                grade,
                admission_date,
                parent_name: parent_name.into(),
                parent_contact_number: parent_contact_number.into(),
            },
        )
    }

    pub fn with_profile(mut self, profile: Profile) -> Self {
        self.profile = profile;
        self
    }

    /// Re-save form of an already-persisted account: same username and
    /// details, addressed by the stored registration identifier.
    pub fn with_registration_id(mut self, registration_id: impl Into<String>) -> Self {
        self.registration_id = Some(registration_id.into());
        self
    }

    pub(crate) fn validate(&self) -> Result<(), RegistryError> {
        if self.username.trim().is_empty() {
            return Err(RegistryError::MissingField { field: "username" });
        }
        self.details.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_of_details_matches_variant() {
        let details = RoleDetails::Librarian {
            qualification: "MLIS".to_string(),
        };
        assert_eq!(details.role(), Role::Librarian);
        assert_eq!(details.role().prefix(), "LIB");
    }

    #[test]
    fn test_staff_validation_requires_designation() {
        let draft = AccountDraft::staff("jdoe", "secret", "", "B.Ed");
        match draft.validate() {
            Err(RegistryError::MissingField { field }) => assert_eq!(field, "designation"),
            other => panic!("expected MissingField, got {:?}", other),
        }
    }

    #[test]
    fn test_admin_validation_allows_blank_qualification() {
        let draft = AccountDraft::admin("root", "secret");
        assert!(draft.validate().is_ok());
    }

    #[test]
    fn test_librarian_validation_requires_qualification() {
        let draft = AccountDraft::librarian("marian", "secret", "");
        match draft.validate() {
            Err(RegistryError::MissingField { field }) => assert_eq!(field, "qualification"),
            other => panic!("expected MissingField, got {:?}", other),
        }
    }

    #[test]
    fn test_student_validation_requires_parent_contact() {
        let admission = NaiveDate::from_ymd_opt(2024, 1, 10).unwrap();
        let draft = AccountDraft::student("asmith", "pw123", 1, admission, "Jane Smith", "  ");
        match draft.validate() {
            Err(RegistryError::MissingField { field }) => {
                assert_eq!(field, "parent_contact_number")
            }
            other => panic!("expected MissingField, got {:?}", other),
        }
    }

    #[test]
    fn test_blank_username_rejected() {
        let draft = AccountDraft::admin("   ", "secret");
        match draft.validate() {
            Err(RegistryError::MissingField { field }) => assert_eq!(field, "username"),
            other => panic!("expected MissingField, got {:?}", other),
        }
    }
}
