use crate::error::{DbError, Result};
use crate::models::{Application, UNASSIGNED_ID};
use crate::Database;
use tracing::debug;

const APPLICATION_COLUMNS: &str = "id, customerId, name, createdAt";

/// Repository for application-related database operations
///
/// Owns id assignment: the value handed to [`insert`](Self::insert) must not
/// carry an id, and the returned row always does.
pub struct ApplicationRepository<'a> {
    db: &'a Database,
}

impl<'a> ApplicationRepository<'a> {
    /// Create a new `ApplicationRepository`
    pub(crate) fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// Store a new application and return it with its assigned id
    ///
    /// # Returns
    /// * `Err(DbError::AlreadyPersisted)` - `app` already carries an id
    /// * `Err(DbError::DuplicateApplication)` - the customer already owns an application with this name
    pub async fn insert(&self, app: &Application) -> Result<Application> {
        if app.id() != UNASSIGNED_ID {
            return Err(DbError::AlreadyPersisted(app.id()));
        }

        let stored = sqlx::query_as::<_, Application>(&format!(
            "INSERT INTO applications (customerId, name, createdAt) VALUES (?, ?, ?) \
             RETURNING {APPLICATION_COLUMNS}"
        ))
        .bind(app.customer_id())
        .bind(app.name())
        .bind(app.created_at())
        .fetch_one(&self.db.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e {
                if db_err.is_unique_violation() {
                    return DbError::DuplicateApplication {
                        customer_id: app.customer_id(),
                        name: app.name().to_string(),
                    };
                }
            }
            DbError::DatabaseError(e)
        })?;

        debug!(
            "Stored application '{}' for customer {} with id {}",
            stored.name(),
            stored.customer_id(),
            stored.id()
        );

        Ok(stored)
    }

    /// Get application by ID
    pub async fn get(&self, id: i64) -> Result<Option<Application>> {
        sqlx::query_as::<_, Application>(&format!(
            "SELECT {APPLICATION_COLUMNS} FROM applications WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(&self.db.pool)
        .await
        .map_err(Into::into)
    }

    /// Get a customer's application by name
    pub async fn find_by_customer_and_name(
        &self,
        customer_id: i64,
        name: &str,
    ) -> Result<Option<Application>> {
        sqlx::query_as::<_, Application>(&format!(
            "SELECT {APPLICATION_COLUMNS} FROM applications WHERE customerId = ? AND name = ?"
        ))
        .bind(customer_id)
        .bind(name)
        .fetch_optional(&self.db.pool)
        .await
        .map_err(Into::into)
    }

    /// List a customer's applications, oldest first
    pub async fn list_by_customer(&self, customer_id: i64) -> Result<Vec<Application>> {
        sqlx::query_as::<_, Application>(&format!(
            "SELECT {APPLICATION_COLUMNS} FROM applications WHERE customerId = ? \
             ORDER BY createdAt ASC, id ASC"
        ))
        .bind(customer_id)
        .fetch_all(&self.db.pool)
        .await
        .map_err(Into::into)
    }

    /// Count all stored applications
    pub async fn count(&self) -> Result<i64> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM applications")
            .fetch_one(&self.db.pool)
            .await?;
        Ok(count)
    }

    /// Delete application by ID
    pub async fn delete(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM applications WHERE id = ?")
            .bind(id)
            .execute(&self.db.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Delete every application owned by a customer, returning how many were removed
    pub async fn delete_by_customer(&self, customer_id: i64) -> Result<u64> {
        let result = sqlx::query("DELETE FROM applications WHERE customerId = ?")
            .bind(customer_id)
            .execute(&self.db.pool)
            .await?;

        debug!(
            "Deleted {} applications of customer {}",
            result.rows_affected(),
            customer_id
        );

        Ok(result.rows_affected())
    }
}
