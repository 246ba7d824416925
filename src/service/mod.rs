//! NoteService: timestamping and document shaping on top of a `NoteStore`.

mod notes;
pub use notes::NoteService;
