//! Feature tables, schemas and the frames handed to models.

pub mod frame;
pub mod schema;
pub mod table;

pub use frame::FeatureFrame;
pub use schema::{FeatureSchema, SchemaDiff};
pub use table::{ClientRecord, FeatureTable, LoanId};
