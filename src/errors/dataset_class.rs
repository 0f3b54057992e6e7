use thiserror::Error;

/// Dataset class operation errors
#[derive(Error, Debug)]
pub enum DatasetClassError {
    /// Required input was missing or blank; raised before any write
    #[error("Missing required field: {0}")]
    MissingField(String),

    /// Another live class in the dataset already uses this name for the
    /// same tool type
    #[error("Class name '{name}' already exists in dataset {dataset_id}")]
    DuplicateName { dataset_id: i32, name: String },

    /// Database operation failed
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),
}

impl DatasetClassError {
    pub fn duplicate_name(dataset_id: i32, name: impl Into<String>) -> Self {
        Self::DuplicateName {
            dataset_id,
            name: name.into(),
        }
    }

    /// Check if this is a client error (bad input, conflict)
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            DatasetClassError::MissingField(_) | DatasetClassError::DuplicateName { .. }
        )
    }

    /// Get error code for API responses
    pub fn error_code(&self) -> &'static str {
        match self {
            DatasetClassError::MissingField(_) => "VALIDATION_FAILED",
            DatasetClassError::DuplicateName { .. } => "NAME_DUPLICATED",
            DatasetClassError::Database(_) => "DATABASE_ERROR",
        }
    }
}
