pub mod edit_icon;
pub mod navigation;
pub mod presence;
pub mod system;
