pub mod automator;
pub mod deadline;
pub mod error;
pub mod settings;
