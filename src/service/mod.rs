pub mod domain_data;

pub use domain_data::{DomainDataService, DomainDataSnapshot};
