pub mod logging;
pub mod storage;

pub use storage::{DomainRecord, DomainStorage, EvmDomainStorage, StorageError};
