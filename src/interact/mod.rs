pub mod click;
pub mod geometry;
pub mod input;
pub mod scroll;
