//! Circular emoji avatars, composited on the CPU and exported as PNG.
//!
//! # Pipeline overview
//!
//! 1. **Select**: picker events update a [`SelectionState`] (emoji + palette index)
//! 2. **Render**: the subscribed [`AvatarCompositor`] fills a circle with the palette color
//!    and composites the glyph layer over it into an [`AvatarImage`]
//! 3. **Export**: the latest image is encoded as PNG, a `data:` URI, or saved as
//!    [`DOWNLOAD_FILE_NAME`]
//!
//! [`AvatarApp`] wires the three together. Everything is single-threaded and synchronous:
//! when an event call returns, the avatar has already been redrawn.
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Deterministic**: identical inputs and fonts yield identical pixels.
//! - **Premultiplied RGBA8** internally; exports use straight alpha.
#![forbid(unsafe_code)]

mod app;
mod config;
mod export;
mod foundation;
mod palette;
mod render;
mod selection;

pub use crate::app::AvatarApp;
pub use crate::app::command::SessionCommand;
pub use crate::config::{
    AvatarConfig, DEFAULT_SIZE, FONT_SCALE, FontConfig, HostEngine, HostEngineDef,
    MAX_SURFACE_SIDE,
};
pub use crate::export::{DOWNLOAD_FILE_NAME, decode_data_uri, save_download};
pub use crate::foundation::core::{AvatarSize, Rgba8Premul};
pub use crate::foundation::error::{AvatarError, AvatarResult};
pub use crate::palette::color::Color;
pub use crate::palette::{DEFAULT_PALETTE, Palette, PalettePicker, Swatch};
pub use crate::render::compositor::{AvatarCompositor, RenderOutcome};
pub use crate::render::output::AvatarImage;
pub use crate::selection::{
    DEFAULT_PLACEHOLDER, Selection, SelectionEvent, SelectionState, SubscriptionId,
};
