use crate::foundation::error::{AvatarError, AvatarResult};

pub use kurbo::{Affine, Circle, Point, Rect};

/// Premultiplied RGBA8 (r,g,b already multiplied by a).
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Rgba8Premul {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8Premul {
    pub fn from_straight_rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        fn premul(c: u8, a: u8) -> u8 {
            let c = u16::from(c);
            let a = u16::from(a);
            (((c * a) + 127) / 255) as u8
        }

        Self {
            r: premul(r, a),
            g: premul(g, a),
            b: premul(b, a),
            a,
        }
    }

    pub fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

/// Square avatar geometry: a logical side length plus the device pixel ratio.
///
/// Drawing happens in logical units; the backing surface is `device_side()` pixels square.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct AvatarSize {
    /// Side length in logical (CSS) pixels.
    pub logical: u32,
    /// Physical pixels per logical pixel.
    pub dpr: f64,
}

impl AvatarSize {
    pub fn new(logical: u32, dpr: f64) -> AvatarResult<Self> {
        if logical == 0 {
            return Err(AvatarError::validation("avatar size must be > 0"));
        }
        if !dpr.is_finite() || dpr <= 0.0 {
            return Err(AvatarError::validation(
                "device pixel ratio must be finite and > 0",
            ));
        }
        Ok(Self { logical, dpr })
    }

    pub fn logical_f64(self) -> f64 {
        f64::from(self.logical)
    }

    /// Backing surface side in device pixels.
    pub fn device_side(self) -> u64 {
        (self.logical_f64() * self.dpr).round().max(0.0) as u64
    }

    /// Transform from logical drawing units to device pixels.
    pub fn to_device(self) -> Affine {
        Affine::scale(self.dpr)
    }

    /// The circle inscribed in the logical square.
    pub fn inscribed_circle(self) -> Circle {
        let half = self.logical_f64() / 2.0;
        Circle::new(Point::new(half, half), half)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
