pub mod appium;
pub mod driver;
pub mod element_type;
pub mod error;
pub mod gesture;
pub mod query;
