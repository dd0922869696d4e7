//! Label set library and its persistence.
//!
//! Label sets live in memory and every change is visible immediately. The
//! durable copy is written afterwards in the background; a failed write is
//! reported but never rolls the in-memory change back.

mod library;
mod store;

pub use library::{LabelLibrary, PersistenceEvent, PersistenceOp};
pub use store::{LabelSetStore, MemoryLabelSetStore, StoreError};
