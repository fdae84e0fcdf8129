//! Data types shared by the record source, the reconciler and the clients.

pub mod record;

pub use record::{AliasRequest, Record, RecordId};
