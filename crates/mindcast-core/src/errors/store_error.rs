/// Persistence-layer errors raised by store implementations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("backend error: {message}")]
    Backend { message: String },

    #[error("migration failed at version {version}: {reason}")]
    MigrationFailed { version: u32, reason: String },

    #[error("invalid row in {table}: {details}")]
    InvalidRow { table: String, details: String },
}
