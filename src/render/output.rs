/// A rendered avatar as RGBA8 pixels.
///
/// Pixels are **premultiplied alpha**, tightly packed and row-major. Export paths convert to
/// straight alpha.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AvatarImage {
    /// Width in device pixels.
    pub width: u32,
    /// Height in device pixels.
    pub height: u32,
    /// Premultiplied RGBA8 bytes.
    pub data: Vec<u8>,
}

impl AvatarImage {
    /// Premultiplied pixel at `(x, y)`, or `None` outside the image.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        let px = self.data.get(idx..idx + 4)?;
        Some([px[0], px[1], px[2], px[3]])
    }

    /// Pixel nearest the geometric center.
    pub fn center_pixel(&self) -> Option<[u8; 4]> {
        self.pixel(self.width / 2, self.height / 2)
    }

    /// Copy of the pixels with alpha un-premultiplied.
    pub fn to_straight_rgba8(&self) -> Vec<u8> {
        let mut out = self.data.clone();
        crate::foundation::math::unpremultiply_rgba8_in_place(&mut out);
        out
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/output.rs"]
mod tests;
