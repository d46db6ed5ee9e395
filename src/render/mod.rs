//! CPU rasterization of the avatar: background circle, glyph layer, composite.

pub(crate) mod compositor;
pub(crate) mod glyph;
pub(crate) mod output;

use crate::config::MAX_SURFACE_SIDE;
use crate::foundation::core::{Affine, Circle};
use kurbo::Shape;

pub(crate) fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

/// Convert a kurbo circle into the rasterizer's path type.
pub(crate) fn circle_to_cpu(circle: Circle) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let mut out = vello_cpu::kurbo::BezPath::new();
    for el in circle.path_elements(0.1) {
        match el {
            PathEl::MoveTo(p) => out.move_to(vello_cpu::kurbo::Point::new(p.x, p.y)),
            PathEl::LineTo(p) => out.line_to(vello_cpu::kurbo::Point::new(p.x, p.y)),
            PathEl::QuadTo(p1, p2) => out.quad_to(
                vello_cpu::kurbo::Point::new(p1.x, p1.y),
                vello_cpu::kurbo::Point::new(p2.x, p2.y),
            ),
            PathEl::CurveTo(p1, p2, p3) => out.curve_to(
                vello_cpu::kurbo::Point::new(p1.x, p1.y),
                vello_cpu::kurbo::Point::new(p2.x, p2.y),
                vello_cpu::kurbo::Point::new(p3.x, p3.y),
            ),
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

/// Surface side as the rasterizer's `u16`, or `None` when no surface can exist.
pub(crate) fn surface_side(device_side: u64) -> Option<u16> {
    u16::try_from(device_side)
        .ok()
        .filter(|&s| s > 0 && s <= MAX_SURFACE_SIDE)
}

fn clear_pixmap_to_transparent(pixmap: &mut vello_cpu::Pixmap) {
    pixmap.data_as_u8_slice_mut().fill(0);
}
