use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};

use crate::errors::RegistryError;
use crate::types::db::{account, grade};

use super::unique_violation;

/// Grade levels that students reference. A grade with enrolled students is
/// protected: the delete is refused until the students are moved or removed.
pub struct GradeStore {
    db: DatabaseConnection,
}

impl GradeStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create(&self, name: &str) -> Result<grade::Model, RegistryError> {
        if name.trim().is_empty() {
            return Err(RegistryError::MissingField {
                field: "grade name",
            });
        }
        let row = grade::ActiveModel {
            name: Set(name.to_owned()),
            ..Default::default()
        };
        row.insert(&self.db).await.map_err(|e| {
            if unique_violation(&e, "grades.name") {
                RegistryError::DuplicateGrade(name.to_owned())
            } else {
                RegistryError::database("create_grade", e)
            }
        })
    }

    /// Delete a grade, refusing while any student still references it.
    /// The student count and the delete commit together, so an enrollment
    /// racing the delete still surfaces as the typed refusal.
    pub async fn delete(&self, id: i32) -> Result<(), RegistryError> {
        let existing = self
            .find(id)
            .await?
            .ok_or(RegistryError::GradeNotFound(id))?;

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| RegistryError::database("begin_grade_delete", e))?;

        let students = account::Entity::find()
            .filter(account::Column::GradeId.eq(id))
            .count(&txn)
            .await
            .map_err(|e| RegistryError::database("count_grade_students", e))?;
        if students > 0 {
            // Dropping the open transaction rolls it back
            return Err(RegistryError::GradeInUse { id, students });
        }

        grade::Entity::delete_by_id(id)
            .exec(&txn)
            .await
            .map_err(|e| RegistryError::database("delete_grade", e))?;

        txn.commit()
            .await
            .map_err(|e| RegistryError::database("commit_grade_delete", e))?;

        tracing::info!(grade = %existing.name, "grade deleted");
        Ok(())
    }

    pub async fn find(&self, id: i32) -> Result<Option<grade::Model>, RegistryError> {
        grade::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| RegistryError::database("find_grade", e))
    }

    pub async fn list(&self) -> Result<Vec<grade::Model>, RegistryError> {
        grade::Entity::find()
            .order_by_asc(grade::Column::Name)
            .all(&self.db)
            .await
            .map_err(|e| RegistryError::database("list_grades", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stores::AccountStore;
    use crate::types::domain::AccountDraft;
    use chrono::NaiveDate;
    use migration::{Migrator, MigratorTrait};
    use sea_orm::Database;

    async fn setup_test_store() -> (DatabaseConnection, GradeStore) {
        let db = Database::connect("sqlite::memory:")
            .await
            .expect("Failed to create test database");

        Migrator::up(&db, None)
            .await
            .expect("Failed to run migrations");

        let store = GradeStore::new(db.clone());
        (db, store)
    }

    #[tokio::test]
    async fn test_create_and_list_grades() {
        let (_db, store) = setup_test_store().await;

        store.create("Grade 2").await.expect("Failed to create");
        store.create("Grade 1").await.expect("Failed to create");

        let all = store.list().await.expect("Failed to list");
        let names: Vec<&str> = all.iter().map(|g| g.name.as_str()).collect();
        assert_eq!(names, vec!["Grade 1", "Grade 2"]);
    }

    #[tokio::test]
    async fn test_duplicate_grade_name_rejected() {
        let (_db, store) = setup_test_store().await;

        store.create("Grade 1").await.expect("Failed to create");
        match store.create("Grade 1").await {
            Err(RegistryError::DuplicateGrade(name)) => assert_eq!(name, "Grade 1"),
            other => panic!("expected DuplicateGrade, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_delete_empty_grade_succeeds() {
        let (_db, store) = setup_test_store().await;

        let grade = store.create("Grade 1").await.expect("Failed to create");
        store.delete(grade.id).await.expect("Failed to delete");
        assert!(store.find(grade.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_delete_refused_while_students_enrolled() {
        let (db, store) = setup_test_store().await;
        let accounts = AccountStore::new(db.clone());

        let grade = store.create("Grade 1").await.expect("Failed to create");
        let admission = NaiveDate::from_ymd_opt(2024, 1, 10).unwrap();
        accounts
            .save(AccountDraft::student(
                "asmith", "pw123", grade.id, admission, "Jane", "555-1234",
            ))
            .await
            .expect("Failed to save student");

        match store.delete(grade.id).await {
            Err(RegistryError::GradeInUse { id, students }) => {
                assert_eq!(id, grade.id);
                assert_eq!(students, 1);
            }
            other => panic!("expected GradeInUse, got {:?}", other),
        }

        // The grade row is untouched by the refused delete
        assert!(store.find(grade.id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_refused_delete_leaves_grade_usable() {
        let (db, store) = setup_test_store().await;
        let accounts = AccountStore::new(db.clone());

        let grade = store.create("Grade 1").await.expect("Failed to create");
        let admission = NaiveDate::from_ymd_opt(2024, 1, 10).unwrap();
        accounts
            .save(AccountDraft::student(
                "first", "pw", grade.id, admission, "Pat", "555-0001",
            ))
            .await
            .expect("Failed to save student");

        match store.delete(grade.id).await {
            Err(RegistryError::GradeInUse { students, .. }) => assert_eq!(students, 1),
            other => panic!("expected GradeInUse, got {:?}", other),
        }

        // The refusal rolled back without partial state: the grade is still
        // there and still accepts enrollments
        assert!(store.find(grade.id).await.unwrap().is_some());
        accounts
            .save(AccountDraft::student(
                "second", "pw", grade.id, admission, "Sam", "555-0002",
            ))
            .await
            .expect("Failed to enroll after refused delete");

        match store.delete(grade.id).await {
            Err(RegistryError::GradeInUse { students, .. }) => assert_eq!(students, 2),
            other => panic!("expected GradeInUse, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_delete_missing_grade_fails() {
        let (_db, store) = setup_test_store().await;

        match store.delete(42).await {
            Err(RegistryError::GradeNotFound(id)) => assert_eq!(id, 42),
            other => panic!("expected GradeNotFound, got {:?}", other),
        }
    }
}
