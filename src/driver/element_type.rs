use std::fmt;

use serde::{Deserialize, Serialize};

/// XCUITest element kinds the helpers query for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementType {
    Button,
    StaticText,
    TextField,
    SecureTextField,
    Cell,
    Other,
    Image,
    TabBar,
}

impl ElementType {
    /// Default type filter for text lookups, in tie-break order: when several
    /// types have predicate hits, the first listed type wins.
    pub const TEXT_TYPES: [ElementType; 6] = [
        ElementType::Button,
        ElementType::StaticText,
        ElementType::TextField,
        ElementType::SecureTextField,
        ElementType::Cell,
        ElementType::Other,
    ];

    /// Types that accept keyboard input.
    pub const INPUT_TYPES: [ElementType; 2] = [ElementType::TextField, ElementType::SecureTextField];

    pub fn class_name(&self) -> &'static str {
        match self {
            ElementType::Button => "XCUIElementTypeButton",
            ElementType::StaticText => "XCUIElementTypeStaticText",
            ElementType::TextField => "XCUIElementTypeTextField",
            ElementType::SecureTextField => "XCUIElementTypeSecureTextField",
            ElementType::Cell => "XCUIElementTypeCell",
            ElementType::Other => "XCUIElementTypeOther",
            ElementType::Image => "XCUIElementTypeImage",
            ElementType::TabBar => "XCUIElementTypeTabBar",
        }
    }
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.class_name())
    }
}
