mod sqlite_credentials_repository;

pub use sqlite_credentials_repository::SqliteCredentialsRepository;
