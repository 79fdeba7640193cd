// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Presentation options carried by the panel.
//!
//! Strata stores these for the presentation layer and never acts on them.

use core::fmt;
use core::str::FromStr;

/// Corner of the map the panel is anchored to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ControlPosition {
    /// Top-left corner.
    TopLeft,
    /// Top-right corner.
    #[default]
    TopRight,
    /// Bottom-left corner.
    BottomLeft,
    /// Bottom-right corner.
    BottomRight,
}

impl ControlPosition {
    /// Returns the option spelling, e.g. `"topright"`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::TopLeft => "topleft",
            Self::TopRight => "topright",
            Self::BottomLeft => "bottomleft",
            Self::BottomRight => "bottomright",
        }
    }
}

/// Error returned when parsing an unknown [`ControlPosition`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UnknownPosition;

impl fmt::Display for UnknownPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("expected one of topleft, topright, bottomleft, bottomright")
    }
}

impl core::error::Error for UnknownPosition {}

impl FromStr for ControlPosition {
    type Err = UnknownPosition;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "topleft" => Ok(Self::TopLeft),
            "topright" => Ok(Self::TopRight),
            "bottomleft" => Ok(Self::BottomLeft),
            "bottomright" => Ok(Self::BottomRight),
            _ => Err(UnknownPosition),
        }
    }
}

/// Options for the panel's presentation layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PanelOptions {
    /// Whether the panel starts collapsed and expands on hover or focus.
    pub collapsed: bool,
    /// Where the panel is anchored.
    pub position: ControlPosition,
}

impl Default for PanelOptions {
    fn default() -> Self {
        Self {
            collapsed: true,
            position: ControlPosition::TopRight,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let options = PanelOptions::default();
        assert!(options.collapsed);
        assert_eq!(options.position, ControlPosition::TopRight);
    }

    #[test]
    fn position_parses_its_own_spelling() {
        for position in [
            ControlPosition::TopLeft,
            ControlPosition::TopRight,
            ControlPosition::BottomLeft,
            ControlPosition::BottomRight,
        ] {
            assert_eq!(position.as_str().parse(), Ok(position));
        }
        assert_eq!("middle".parse::<ControlPosition>(), Err(UnknownPosition));
    }
}
