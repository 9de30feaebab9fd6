use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};

use crate::errors::RegistryError;
use crate::types::db::{account, department};

use super::unique_violation;

/// Departments that staff and admins may reference. Deleting one detaches
/// its members rather than blocking or cascading.
pub struct DepartmentStore {
    db: DatabaseConnection,
}

impl DepartmentStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create(&self, name: &str) -> Result<department::Model, RegistryError> {
        if name.trim().is_empty() {
            return Err(RegistryError::MissingField {
                field: "department name",
            });
        }
        let row = department::ActiveModel {
            name: Set(name.to_owned()),
            ..Default::default()
        };
        row.insert(&self.db).await.map_err(|e| {
            if unique_violation(&e, "departments.name") {
                RegistryError::DuplicateDepartment(name.to_owned())
            } else {
                RegistryError::database("create_department", e)
            }
        })
    }

    /// Delete a department, detaching every account that references it.
    /// The detach and the delete commit together.
    ///
    /// # Returns
    /// * `Ok(u64)` - How many accounts were detached
    /// * `Err(RegistryError)` - Unknown department or database failure
    pub async fn delete(&self, id: i32) -> Result<u64, RegistryError> {
        let existing = self
            .find(id)
            .await?
            .ok_or(RegistryError::DepartmentNotFound(id))?;

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| RegistryError::database("begin_department_delete", e))?;

        let detached = account::Entity::update_many()
            .col_expr(account::Column::DepartmentId, Expr::value(None::<i32>))
            .filter(account::Column::DepartmentId.eq(id))
            .exec(&txn)
            .await
            .map_err(|e| RegistryError::database("detach_department_members", e))?
            .rows_affected;

        department::Entity::delete_by_id(id)
            .exec(&txn)
            .await
            .map_err(|e| RegistryError::database("delete_department", e))?;

        txn.commit()
            .await
            .map_err(|e| RegistryError::database("commit_department_delete", e))?;

        tracing::info!(
            department = %existing.name,
            detached = detached,
            "department deleted"
        );
        Ok(detached)
    }

    pub async fn find(&self, id: i32) -> Result<Option<department::Model>, RegistryError> {
        department::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| RegistryError::database("find_department", e))
    }

    pub async fn list(&self) -> Result<Vec<department::Model>, RegistryError> {
        department::Entity::find()
            .order_by_asc(department::Column::Name)
            .all(&self.db)
            .await
            .map_err(|e| RegistryError::database("list_departments", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stores::AccountStore;
    use crate::types::domain::{AccountDraft, RoleDetails};
    use migration::{Migrator, MigratorTrait};
    use sea_orm::Database;

    async fn setup_test_store() -> (DatabaseConnection, DepartmentStore) {
        let db = Database::connect("sqlite::memory:")
            .await
            .expect("Failed to create test database");

        Migrator::up(&db, None)
            .await
            .expect("Failed to run migrations");

        let store = DepartmentStore::new(db.clone());
        (db, store)
    }

    #[tokio::test]
    async fn test_create_and_list_departments() {
        let (_db, store) = setup_test_store().await;

        store.create("Science").await.expect("Failed to create");
        store.create("Arts").await.expect("Failed to create");

        let all = store.list().await.expect("Failed to list");
        let names: Vec<&str> = all.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["Arts", "Science"]);
    }

    #[tokio::test]
    async fn test_duplicate_department_name_rejected() {
        let (_db, store) = setup_test_store().await;

        store.create("Science").await.expect("Failed to create");
        match store.create("Science").await {
            Err(RegistryError::DuplicateDepartment(name)) => assert_eq!(name, "Science"),
            other => panic!("expected DuplicateDepartment, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_delete_missing_department_fails() {
        let (_db, store) = setup_test_store().await;

        match store.delete(99).await {
            Err(RegistryError::DepartmentNotFound(id)) => assert_eq!(id, 99),
            other => panic!("expected DepartmentNotFound, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_delete_detaches_members_and_keeps_accounts() {
        let (db, store) = setup_test_store().await;
        let accounts = AccountStore::new(db.clone());

        let science = store.create("Science").await.expect("Failed to create");

        let mut draft = AccountDraft::staff("jdoe", "pw", "Teacher", "M.Sc");
        draft.details = RoleDetails::Staff {
            department: Some(science.id),
            designation: "Teacher".to_string(),
            qualification: "M.Sc".to_string(),
        };
        let staff = accounts.save(draft).await.expect("Failed to save staff");
        assert_eq!(staff.department_id, Some(science.id));

        let detached = store.delete(science.id).await.expect("Failed to delete");
        assert_eq!(detached, 1);

        let reloaded = accounts
            .find_by_registration_id(&staff.registration_id)
            .await
            .unwrap()
            .expect("staff row must survive the department delete");
        assert_eq!(reloaded.department_id, None);
        assert!(store.find(science.id).await.unwrap().is_none());
    }
}
