use serde::{Deserialize, Serialize};
use std::fmt;

use crate::models::color::Color;

/// Shape used for data modules.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ModuleShape {
    #[default]
    Squares,
    Dots,
    Rounded,
}

/// Shape used for the three finder patterns.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum CornerShape {
    #[default]
    Square,
    Dot,
    Rounded,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct StyleConfig {
    pub module_shape: ModuleShape,
    pub corner_shape: CornerShape,
    pub foreground: Color,
    /// May be `transparent`.
    pub background: Color,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            module_shape: ModuleShape::Squares,
            corner_shape: CornerShape::Square,
            foreground: Color::BLACK,
            background: Color::WHITE,
        }
    }
}

impl fmt::Display for ModuleShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModuleShape::Squares => write!(f, "Square"),
            ModuleShape::Dots => write!(f, "Dots"),
            ModuleShape::Rounded => write!(f, "Rounded"),
        }
    }
}

impl fmt::Display for CornerShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CornerShape::Square => write!(f, "Square"),
            CornerShape::Dot => write!(f, "Dot"),
            CornerShape::Rounded => write!(f, "Rounded"),
        }
    }
}

impl ModuleShape {
    pub fn all() -> Vec<ModuleShape> {
        vec![ModuleShape::Squares, ModuleShape::Dots, ModuleShape::Rounded]
    }
}

impl CornerShape {
    pub fn all() -> Vec<CornerShape> {
        vec![CornerShape::Square, CornerShape::Dot, CornerShape::Rounded]
    }
}
