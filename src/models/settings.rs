use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{FusionError, Result};

pub const MIN_DIMENSION: u32 = 256;
pub const MAX_DIMENSION: u32 = 2048;

/// Visual preset passed to the generation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ImageStyle {
    #[serde(rename = "ANIME")]
    Anime,
    #[serde(rename = "DEFAULT")]
    Default,
    #[serde(rename = "UHD")]
    Uhd,
    #[serde(rename = "KANDINSKY")]
    Kandinsky,
    #[serde(rename = "3D")]
    ThreeD,
}

impl ImageStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            ImageStyle::Anime => "ANIME",
            ImageStyle::Default => "DEFAULT",
            ImageStyle::Uhd => "UHD",
            ImageStyle::Kandinsky => "KANDINSKY",
            ImageStyle::ThreeD => "3D",
        }
    }

    pub fn all() -> &'static [ImageStyle] {
        &[
            ImageStyle::Anime,
            ImageStyle::Default,
            ImageStyle::Uhd,
            ImageStyle::Kandinsky,
            ImageStyle::ThreeD,
        ]
    }

    /// Human-readable menu label.
    pub fn label(&self) -> &'static str {
        match self {
            ImageStyle::Anime => "Anime 🎎",
            ImageStyle::Default => "Standard 🖼️",
            ImageStyle::Uhd => "High detail 🔍",
            ImageStyle::Kandinsky => "Kandinsky 🎨",
            ImageStyle::ThreeD => "3D style 🏗️",
        }
    }
}

impl fmt::Display for ImageStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ImageStyle {
    type Err = FusionError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "ANIME" => Ok(ImageStyle::Anime),
            "DEFAULT" => Ok(ImageStyle::Default),
            "UHD" => Ok(ImageStyle::Uhd),
            "KANDINSKY" => Ok(ImageStyle::Kandinsky),
            "3D" => Ok(ImageStyle::ThreeD),
            other => Err(FusionError::InputError(format!(
                "Unknown style: {}",
                other
            ))),
        }
    }
}

/// Per-user generation settings, created lazily with defaults on first use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSettings {
    pub style: ImageStyle,
    pub width: u32,
    pub height: u32,
}

impl Default for UserSettings {
    fn default() -> Self {
        UserSettings {
            style: ImageStyle::Anime,
            width: 1024,
            height: 1024,
        }
    }
}

impl UserSettings {
    pub fn size_label(&self) -> String {
        format!("{}x{}", self.width, self.height)
    }
}

/// Both dimensions must lie in [256, 2048].
pub fn validate_dimensions(width: u32, height: u32) -> Result<()> {
    for dim in [width, height] {
        if !(MIN_DIMENSION..=MAX_DIMENSION).contains(&dim) {
            return Err(FusionError::InputError(format!(
                "Dimensions must be between {} and {}, got {}x{}",
                MIN_DIMENSION, MAX_DIMENSION, width, height
            )));
        }
    }
    Ok(())
}
