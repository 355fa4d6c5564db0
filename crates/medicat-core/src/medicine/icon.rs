//! Fixed icon palette for medicines. Presentation only.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Icon {
    #[default]
    Pill,
    Red,
    Orange,
    Yellow,
    Green,
    Blue,
    Purple,
    White,
    Black,
    Bandage,
}

impl Icon {
    pub const PALETTE: [Icon; 10] = [
        Icon::Pill,
        Icon::Red,
        Icon::Orange,
        Icon::Yellow,
        Icon::Green,
        Icon::Blue,
        Icon::Purple,
        Icon::White,
        Icon::Black,
        Icon::Bandage,
    ];

    pub fn symbol(&self) -> &'static str {
        match self {
            Icon::Pill => "💊",
            Icon::Red => "🔴",
            Icon::Orange => "🟠",
            Icon::Yellow => "🟡",
            Icon::Green => "🟢",
            Icon::Blue => "🔵",
            Icon::Purple => "🟣",
            Icon::White => "⚪",
            Icon::Black => "⚫",
            Icon::Bandage => "🩹",
        }
    }

    fn name(&self) -> &'static str {
        match self {
            Icon::Pill => "pill",
            Icon::Red => "red",
            Icon::Orange => "orange",
            Icon::Yellow => "yellow",
            Icon::Green => "green",
            Icon::Blue => "blue",
            Icon::Purple => "purple",
            Icon::White => "white",
            Icon::Black => "black",
            Icon::Bandage => "bandage",
        }
    }
}

impl fmt::Display for Icon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Accepts either the symbol itself or its lowercase name (`pill`, `blue`, ...).
impl FromStr for Icon {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Icon::PALETTE
            .into_iter()
            .find(|icon| icon.symbol() == s || icon.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| ValidationError::InvalidIcon(s.to_string()))
    }
}

impl TryFrom<String> for Icon {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Icon> for String {
    fn from(value: Icon) -> Self {
        value.symbol().to_string()
    }
}
