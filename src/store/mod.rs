pub mod error;
pub mod json_store;
pub mod schema;

pub use error::StoreError;
