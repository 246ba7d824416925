//! Request extractors.

pub mod note_id;

pub use note_id::NoteId;
