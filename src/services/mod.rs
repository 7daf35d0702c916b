//! Services used by the command-line shell.
//!
//! ARCHITECTURE
//! ============
//! The canvas crate owns the document and the controller. Service modules
//! add what needs I/O or presentation: image generation through the
//! gateway, project files on disk, and the text outline.

pub mod genni;
pub mod outline;
pub mod persistence;
