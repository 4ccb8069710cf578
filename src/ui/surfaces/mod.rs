//! Presentation surfaces. Each one reads the dialog through a handle and
//! holds no navigation logic of its own.

pub mod body;
pub mod footer;
pub mod header;
pub mod progress;
pub mod sidebar;

pub use header::DialogChrome;
