use std::{error::Error, fmt::Debug};

#[derive(thiserror::Error)]
pub enum CustomError {
    #[error("Unsupported database url '{0}'")]
    UnsupportedDatabase(String),

    #[error("Database query")]
    DBError(#[source] sqlx::Error),

    #[error("Database migration")]
    MigrationError(#[source] sqlx::Error),

    #[error("HTTP client")]
    HttpClient(#[source] reqwest::Error),
}

impl Debug for CustomError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self)?;
        if let Some(source) = self.source() {
            write!(f, " (Caused by: {})", source)?;
        }
        Ok(())
    }
}
