pub mod entities;
pub mod indexed;

// Re-export the core types to provide a clean public API.
pub use entities::{Classroom, School};
pub use indexed::Indexed;
