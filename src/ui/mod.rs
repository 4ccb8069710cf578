pub mod layout;
pub mod renderer;
pub mod span;
pub mod style;
pub mod surfaces;
pub mod theme;
