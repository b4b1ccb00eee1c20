use super::ValidationError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Notion color token attached to rich text runs, tags and text blocks.
///
/// Foreground and `*_background` tokens are distinct variants so that the
/// token can be echoed back verbatim into a `text-<token>` class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Color {
    #[default]
    Default,
    Gray,
    Brown,
    Orange,
    Yellow,
    Green,
    Blue,
    Purple,
    Pink,
    Red,
    GrayBackground,
    BrownBackground,
    OrangeBackground,
    YellowBackground,
    GreenBackground,
    BlueBackground,
    PurpleBackground,
    PinkBackground,
    RedBackground,
}

const ALL_COLORS: [Color; 19] = [
    Color::Default,
    Color::Gray,
    Color::Brown,
    Color::Orange,
    Color::Yellow,
    Color::Green,
    Color::Blue,
    Color::Purple,
    Color::Pink,
    Color::Red,
    Color::GrayBackground,
    Color::BrownBackground,
    Color::OrangeBackground,
    Color::YellowBackground,
    Color::GreenBackground,
    Color::BlueBackground,
    Color::PurpleBackground,
    Color::PinkBackground,
    Color::RedBackground,
];

impl std::str::FromStr for Color {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ALL_COLORS
            .iter()
            .copied()
            .find(|color| color.as_str() == s)
            .ok_or_else(|| ValidationError::InvalidColor(s.to_string()))
    }
}

impl Color {
    /// The token exactly as the Notion API spells it.
    pub fn as_str(&self) -> &'static str {
        match self {
            Color::Default => "default",
            Color::Gray => "gray",
            Color::Brown => "brown",
            Color::Orange => "orange",
            Color::Yellow => "yellow",
            Color::Green => "green",
            Color::Blue => "blue",
            Color::Purple => "purple",
            Color::Pink => "pink",
            Color::Red => "red",
            Color::GrayBackground => "gray_background",
            Color::BrownBackground => "brown_background",
            Color::OrangeBackground => "orange_background",
            Color::YellowBackground => "yellow_background",
            Color::GreenBackground => "green_background",
            Color::BlueBackground => "blue_background",
            Color::PurpleBackground => "purple_background",
            Color::PinkBackground => "pink_background",
            Color::RedBackground => "red_background",
        }
    }

    /// Parses a color token, treating anything unrecognised as the default.
    pub fn parse_lenient(token: &str) -> Self {
        token.parse().unwrap_or_else(|_| {
            log::debug!("Unknown color token '{}', using default", token);
            Color::Default
        })
    }

    pub fn is_default(&self) -> bool {
        matches!(self, Color::Default)
    }

    /// Text class for non-default colors, e.g. `text-red`.
    pub fn text_class(&self) -> Option<String> {
        (!self.is_default()).then(|| format!("text-{}", self.as_str()))
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
