pub mod importer;
pub mod mapper;
pub mod profile;
pub mod reader;

pub use crate::domain::model::{CustomerRecord, RawRecord};
pub use crate::domain::ports::{ConfigProvider, CustomerRepository};
pub use crate::utils::error::Result;
