pub mod affordance;
pub mod dialog;
pub mod navigator;
pub mod view;
