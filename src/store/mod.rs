//! Note persistence: the `NoteStore` seam plus MongoDB and in-memory implementations.

pub mod memory;
pub mod mongo;
pub mod traits;

pub use memory::MemoryNoteStore;
pub use mongo::MongoNoteStore;
pub use traits::{NoteStore, StoreResult};
