pub mod command;
pub mod host;
pub mod key_bindings;
pub mod runner;
pub mod script;

pub use host::DialogHost;
pub use runner::Runtime;
