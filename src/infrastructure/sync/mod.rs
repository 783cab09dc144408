mod hf_dataset_sync;

pub use hf_dataset_sync::{DisabledDatabaseSync, HfDatasetSync};
