pub mod guard;
pub mod registry;
pub mod step;
