mod repositories;
mod sqlite_pool;
mod vector_store;

pub use repositories::SqliteCredentialsRepository;
pub use sqlite_pool::create_pool;
pub use vector_store::InMemoryVectorStore;
