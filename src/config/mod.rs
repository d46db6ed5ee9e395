//! Startup configuration: everything the renderer treats as immutable once running.

use crate::foundation::core::AvatarSize;
use crate::foundation::error::{AvatarError, AvatarResult};
use crate::palette::Palette;
use crate::palette::color::Color;
use crate::selection::DEFAULT_PLACEHOLDER;
use anyhow::Context as _;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Logical avatar side used when none is configured.
pub const DEFAULT_SIZE: u32 = 160;

/// Font size as a fraction of the avatar side.
pub const FONT_SCALE: f64 = 0.7;

/// Largest drawing surface side, in device pixels.
pub const MAX_SURFACE_SIDE: u16 = 16_384;

/// Text layout engine family of the host, which shifts where glyphs sit vertically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HostEngine {
    /// WebKit/Safari text metrics.
    Safari,
    /// Everything else (Blink, Gecko, native).
    #[default]
    Other,
}

impl HostEngine {
    /// Safari is detected when `safari` appears with no `chrome` or `android` before it.
    pub fn from_user_agent(ua: &str) -> Self {
        let ua = ua.to_ascii_lowercase();
        match ua.find("safari") {
            Some(at) if !ua[..at].contains("chrome") && !ua[..at].contains("android") => {
                Self::Safari
            }
            _ => Self::Other,
        }
    }

    /// Vertical glyph offset, as a fraction of the font size.
    pub fn baseline_offset_factor(self) -> f64 {
        match self {
            Self::Safari => 0.02,
            Self::Other => 0.125,
        }
    }
}

/// How the host engine is chosen in a config file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum HostEngineDef {
    /// `"safari"` or `"other"`.
    Named(HostEngine),
    /// `{ "user_agent": "..." }`, probed once at load.
    Probe {
        /// User agent string to probe.
        user_agent: String,
    },
}

impl Default for HostEngineDef {
    fn default() -> Self {
        Self::Named(HostEngine::Other)
    }
}

impl HostEngineDef {
    pub fn resolve(&self) -> HostEngine {
        match self {
            Self::Named(e) => *e,
            Self::Probe { user_agent } => HostEngine::from_user_agent(user_agent),
        }
    }
}

/// Where glyph outlines come from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FontConfig {
    /// Discover installed system fonts.
    pub system: bool,
    /// Extra font files (ttf/otf/ttc), tried before system fonts.
    pub files: Vec<PathBuf>,
}

impl Default for FontConfig {
    fn default() -> Self {
        Self {
            system: true,
            files: Vec::new(),
        }
    }
}

impl FontConfig {
    /// No fonts at all: every glyph uses the substitution box.
    pub fn none() -> Self {
        Self {
            system: false,
            files: Vec::new(),
        }
    }
}

/// Avatar generator configuration, as read from JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AvatarConfig {
    /// Logical side length.
    pub size: u32,
    /// Device pixel ratio of the output surface.
    pub device_pixel_ratio: f64,
    /// Selectable background colors, in order.
    pub palette: Vec<Color>,
    /// Glyph shown before the user picks one.
    pub placeholder: String,
    /// Host text-metrics family.
    pub host_engine: HostEngineDef,
    /// Font sources for glyph rendering.
    pub fonts: FontConfig,
}

impl Default for AvatarConfig {
    fn default() -> Self {
        Self {
            size: DEFAULT_SIZE,
            device_pixel_ratio: 1.0,
            palette: crate::palette::DEFAULT_PALETTE.to_vec(),
            placeholder: DEFAULT_PLACEHOLDER.to_owned(),
            host_engine: HostEngineDef::default(),
            fonts: FontConfig::default(),
        }
    }
}

impl AvatarConfig {
    pub fn from_json_str(s: &str) -> AvatarResult<Self> {
        serde_json::from_str(s).map_err(|e| AvatarError::serde(format!("avatar config: {e}")))
    }

    pub fn from_path(path: impl AsRef<Path>) -> AvatarResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read avatar config '{}'", path.display()))?;
        let cfg = Self::from_json_str(&text)?;
        tracing::debug!(path = %path.display(), "loaded avatar config");
        Ok(cfg)
    }

    pub fn validate(&self) -> AvatarResult<()> {
        let device_side = self.avatar_size()?.device_side();
        if device_side == 0 || device_side > u64::from(MAX_SURFACE_SIDE) {
            return Err(AvatarError::validation(format!(
                "size x device_pixel_ratio is {device_side} device pixels; \
                 must be in 1..={MAX_SURFACE_SIDE}"
            )));
        }
        if self.palette.is_empty() {
            return Err(AvatarError::validation("palette must not be empty"));
        }
        Ok(())
    }

    pub fn avatar_size(&self) -> AvatarResult<AvatarSize> {
        AvatarSize::new(self.size, self.device_pixel_ratio)
    }

    pub fn palette(&self) -> AvatarResult<Palette> {
        Palette::new(self.palette.clone())
    }

    pub fn host_engine(&self) -> HostEngine {
        self.host_engine.resolve()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/config/config.rs"]
mod tests;
