use chrono::Utc;
use scavenger_db::{validate_app_name, Application, Database, DbError};
use tracing::info;

/// Service for application-related business logic
///
/// This service wraps the database repository and layers name
/// validation and get-or-create registration on top of it.
#[derive(Clone)]
pub struct ApplicationService {
    db: Database,
}

impl ApplicationService {
    /// Create a new `ApplicationService`
    #[must_use]
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Store a new application
    ///
    /// # Returns
    /// * `Ok(Application)` - The stored application with its assigned id
    /// * `Err(DbError::InvalidName)` - Name validation failed
    /// * `Err(DbError::DuplicateApplication)` - The customer already owns this name
    /// * `Err(DbError::AlreadyPersisted)` - `app` already carries an id
    pub async fn create_app(&self, app: Application) -> Result<Application, DbError> {
        validate_app_name(app.name())?;
        self.db.applications().insert(&app).await
    }

    /// Return the customer's application with this name, creating it if needed
    ///
    /// # Examples
    /// ```ignore
    /// let service = ApplicationService::new(db);
    /// let app = service.register_app(42, "billing-service").await?;
    /// println!("Registered app: {} with id {}", app.name(), app.id());
    /// ```
    pub async fn register_app(&self, customer_id: i64, name: &str) -> Result<Application, DbError> {
        validate_app_name(name)?;

        let repo = self.db.applications();
        if let Some(existing) = repo.find_by_customer_and_name(customer_id, name).await? {
            return Ok(existing);
        }

        match repo
            .insert(&Application::new(customer_id, name, Utc::now()))
            .await
        {
            Ok(app) => {
                info!(
                    "Registered application '{}' for customer {} (id {})",
                    app.name(),
                    app.customer_id(),
                    app.id()
                );
                Ok(app)
            }
            // Lost a race with a concurrent registration of the same name
            Err(err @ DbError::DuplicateApplication { .. }) => repo
                .find_by_customer_and_name(customer_id, name)
                .await?
                .ok_or(err),
            Err(err) => Err(err),
        }
    }

    /// Get application by ID
    pub async fn get_app(&self, id: i64) -> Result<Option<Application>, DbError> {
        self.db.applications().get(id).await
    }

    /// Get a customer's application by name
    pub async fn find_app(
        &self,
        customer_id: i64,
        name: &str,
    ) -> Result<Option<Application>, DbError> {
        self.db
            .applications()
            .find_by_customer_and_name(customer_id, name)
            .await
    }

    /// List a customer's applications
    pub async fn list_apps(&self, customer_id: i64) -> Result<Vec<Application>, DbError> {
        self.db.applications().list_by_customer(customer_id).await
    }

    /// Delete application by ID
    pub async fn delete_app(&self, id: i64) -> Result<bool, DbError> {
        self.db.applications().delete(id).await
    }

    /// Delete all applications of a customer
    pub async fn delete_customer_apps(&self, customer_id: i64) -> Result<u64, DbError> {
        let deleted = self.db.applications().delete_by_customer(customer_id).await?;
        info!("Removed {} applications of customer {}", deleted, customer_id);
        Ok(deleted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use scavenger_db::UNASSIGNED_ID;
    use tempfile::{tempdir, TempDir};

    async fn setup_test_service() -> Result<(TempDir, ApplicationService), Box<dyn std::error::Error>>
    {
        let temp_dir = tempdir()?;
        let db_path = temp_dir.path().join("test.db");
        let db = Database::new(&db_path).await?;
        db.migrate().await?;
        Ok((temp_dir, ApplicationService::new(db)))
    }

    /// Test that `ApplicationService` correctly integrates with the database layer
    #[tokio::test]
    async fn test_service_integration() -> Result<(), Box<dyn std::error::Error>> {
        let (_dir, service) = setup_test_service().await?;
        let created_at = Utc.with_ymd_and_hms(2024, 1, 15, 10, 0, 0).unwrap();

        let app = service
            .create_app(Application::new(42, "billing-service", created_at))
            .await?;
        assert_ne!(app.id(), UNASSIGNED_ID);
        assert_eq!(app.created_at(), created_at);

        let fetched = service.get_app(app.id()).await?;
        assert_eq!(fetched.as_ref(), Some(&app));

        let by_name = service.find_app(42, "billing-service").await?;
        assert_eq!(by_name, Some(app.clone()));

        assert_eq!(service.list_apps(42).await?, vec![app.clone()]);

        assert!(service.delete_app(app.id()).await?);
        assert!(service.get_app(app.id()).await?.is_none());

        Ok(())
    }

    #[tokio::test]
    async fn test_register_is_get_or_create() -> Result<(), Box<dyn std::error::Error>> {
        let (_dir, service) = setup_test_service().await?;

        let first = service.register_app(42, "billing-service").await?;
        let second = service.register_app(42, "billing-service").await?;
        assert_eq!(first, second);

        let other_customer = service.register_app(43, "billing-service").await?;
        assert_ne!(other_customer.id(), first.id());

        Ok(())
    }

    #[tokio::test]
    async fn test_concurrent_register_yields_one_row() -> Result<(), Box<dyn std::error::Error>> {
        let (_dir, service) = setup_test_service().await?;

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let service = service.clone();
                tokio::spawn(async move { service.register_app(7, "shared").await })
            })
            .collect();

        let mut ids = Vec::new();
        for result in futures::future::join_all(handles).await {
            ids.push(result??.id());
        }
        ids.dedup();
        assert_eq!(ids.len(), 1);
        assert_eq!(service.list_apps(7).await?.len(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn test_delete_customer_apps() -> Result<(), Box<dyn std::error::Error>> {
        let (_dir, service) = setup_test_service().await?;

        service.register_app(1, "a").await?;
        service.register_app(1, "b").await?;
        service.register_app(2, "a").await?;

        assert_eq!(service.delete_customer_apps(1).await?, 2);
        assert!(service.list_apps(1).await?.is_empty());
        assert_eq!(service.list_apps(2).await?.len(), 1);

        Ok(())
    }

    /// Test that errors from DB layer are properly propagated
    #[tokio::test]
    async fn test_service_error_propagation() -> Result<(), Box<dyn std::error::Error>> {
        let (_dir, service) = setup_test_service().await?;
        let now = Utc::now();

        let result = service.create_app(Application::new(1, "invalid name", now)).await;
        assert!(matches!(result, Err(DbError::InvalidName(_))));

        let result = service.register_app(1, "").await;
        assert!(matches!(result, Err(DbError::InvalidName(_))));

        service.create_app(Application::new(1, "duplicate", now)).await?;
        let result = service.create_app(Application::new(1, "duplicate", now)).await;
        assert!(matches!(result, Err(DbError::DuplicateApplication { .. })));

        let stored = service.register_app(1, "stored").await?;
        let result = service.create_app(stored).await;
        assert!(matches!(result, Err(DbError::AlreadyPersisted(_))));

        Ok(())
    }
}
