//! A multi-step dialog for the terminal: a step navigator with a host
//! navigation guard, shared read context for presentation surfaces, and a
//! crossterm runtime that drives it.

pub mod config;
pub mod core;
pub mod demo;
pub mod error;
pub mod logging;
pub mod runtime;
pub mod state;
pub mod terminal;
pub mod ui;

pub use crate::core::guard::{NavigationGuard, SharedGuard};
pub use crate::core::registry::StepRegistry;
pub use crate::core::step::{Step, StepId, StepState};
pub use crate::error::{ConfigError, DialogError, Error};
pub use crate::state::dialog::{DialogContext, DialogHandle, DialogProps, MultiStepDialog};
pub use crate::state::navigator::{Navigator, StayReason, Transition};
