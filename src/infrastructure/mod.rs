pub mod audio;
pub mod crypto;
pub mod llm;
pub mod news;
pub mod observability;
pub mod persistence;
pub mod publishing;
pub mod sync;
