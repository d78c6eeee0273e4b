//! Text-based find and act helpers for driving iOS apps through an
//! automation driver, tolerant of renamed labels, partial matches, and
//! layout drift.
//!
//! Start from [`Automator`] over any [`Driver`]; [`AppiumSession`] talks to
//! a real Appium server.

pub mod automator;
pub mod cli;
pub mod driver;
pub mod interact;
pub mod matching;
pub mod recipes;
pub mod search;

pub use automator::automator::Automator;
pub use automator::error::{Action, SmartError};
pub use automator::settings::SmartConfig;
pub use driver::appium::AppiumSession;
pub use driver::driver::{Driver, ElementId, Rect, WindowSize};
pub use driver::element_type::ElementType;
pub use driver::error::DriverError;
pub use interact::scroll::ScrollDirection;
