use thiserror::Error;

/// Maximum length of an application name, in characters
pub const MAX_NAME_LEN: usize = 255;

#[derive(Error, Debug)]
pub enum DbError {
    #[error("Invalid name: {0}")]
    InvalidName(String),

    #[error("Application '{name}' already exists for customer {customer_id}")]
    DuplicateApplication { customer_id: i64, name: String },

    #[error("Application already persisted with id {0}")]
    AlreadyPersisted(i64),

    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),
}

pub type Result<T> = std::result::Result<T, DbError>;

/// Validate application name
pub fn validate_app_name(name: &str) -> Result<()> {
    let Some(first) = name.chars().next() else {
        return Err(DbError::InvalidName("name cannot be empty".to_string()));
    };

    if name.chars().count() > MAX_NAME_LEN {
        return Err(DbError::InvalidName(format!(
            "name cannot exceed {MAX_NAME_LEN} characters"
        )));
    }

    if !first.is_alphanumeric() {
        return Err(DbError::InvalidName(
            "name must start with alphanumeric character".to_string(),
        ));
    }

    if !name
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-' || c == '_' || c == '.')
    {
        return Err(DbError::InvalidName(
            "name can only contain alphanumeric characters, hyphens, underscores, and dots"
                .to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_app_name() {
        // Valid names
        assert!(validate_app_name("billing-service").is_ok());
        assert!(validate_app_name("my_app").is_ok());
        assert!(validate_app_name("com.example.api").is_ok());
        assert!(validate_app_name("app123").is_ok());
        assert!(validate_app_name(&"a".repeat(255)).is_ok());

        // Invalid names
        assert!(validate_app_name("").is_err());
        assert!(validate_app_name("-app").is_err());
        assert!(validate_app_name(".app").is_err());
        assert!(validate_app_name("my app").is_err());
        assert!(validate_app_name("my@app").is_err());
        assert!(validate_app_name(&"a".repeat(256)).is_err());
    }

    #[test]
    fn test_duplicate_message_names_owner() {
        let err = DbError::DuplicateApplication {
            customer_id: 42,
            name: "billing-service".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Application 'billing-service' already exists for customer 42"
        );
    }
}
