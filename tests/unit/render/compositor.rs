use super::*;
use crate::config::MAX_SURFACE_SIDE;

const PINK: Color = Color::rgb(0xe5, 0x9f, 0xb8);
const GREY: Color = Color::rgb(0x9b, 0x9f, 0xaa);

fn compositor(size: u32, dpr: f64, host: HostEngine) -> AvatarCompositor {
    AvatarCompositor::new(
        AvatarSize::new(size, dpr).unwrap(),
        host,
        &FontConfig::none(),
    )
    .unwrap()
}

fn assert_px_close(actual: [u8; 4], expected: [u8; 4]) {
    for (a, e) in actual.iter().zip(expected.iter()) {
        assert!(
            (i16::from(*a) - i16::from(*e)).abs() <= 1,
            "pixel {actual:?} != {expected:?}"
        );
    }
}

#[test]
fn renders_circle_with_flat_fill_and_transparent_corners() {
    let mut c = compositor(160, 1.0, HostEngine::Other);
    assert_eq!(c.render("\u{1F389}", PINK), RenderOutcome::Rendered);
    let img = c.image().unwrap();

    assert_eq!((img.width, img.height), (160, 160));
    assert_eq!(img.pixel(0, 0), Some([0, 0, 0, 0]));
    assert_eq!(img.pixel(159, 159), Some([0, 0, 0, 0]));
    assert_eq!(img.pixel(159, 0), Some([0, 0, 0, 0]));

    // Inside the circle, above the glyph.
    assert_px_close(img.pixel(80, 16).unwrap(), PINK.to_rgba8_premul().to_array());
    assert_px_close(img.pixel(16, 80).unwrap(), PINK.to_rgba8_premul().to_array());
}

#[test]
fn glyph_ink_covers_center() {
    let mut c = compositor(160, 1.0, HostEngine::Other);
    c.render("\u{1F389}", PINK);
    assert_eq!(c.image().unwrap().center_pixel(), Some([255, 255, 255, 255]));
}

#[test]
fn empty_glyph_draws_only_background() {
    let mut c = compositor(160, 1.0, HostEngine::Other);
    c.render("", PINK);
    assert_px_close(
        c.image().unwrap().center_pixel().unwrap(),
        PINK.to_rgba8_premul().to_array(),
    );
}

#[test]
fn identical_inputs_are_pixel_identical() {
    let mut a = compositor(96, 2.0, HostEngine::Other);
    let mut b = compositor(96, 2.0, HostEngine::Other);
    a.render("\u{1F47B}", GREY);
    b.render("\u{1F47B}", GREY);
    assert_eq!(a.image(), b.image());

    let first = a.image().unwrap().clone();
    a.invalidate();
    assert_eq!(a.render("\u{1F47B}", GREY), RenderOutcome::Rendered);
    assert_eq!(a.image().unwrap(), &first);
}

#[test]
fn unchanged_inputs_skip_redraw() {
    let mut c = compositor(64, 1.0, HostEngine::Other);
    assert_eq!(c.render("x", GREY), RenderOutcome::Rendered);
    assert_eq!(c.render("x", GREY), RenderOutcome::Unchanged);
    assert_eq!(c.render("x", PINK), RenderOutcome::Rendered);
    assert_eq!(c.render("y", PINK), RenderOutcome::Rendered);
}

#[test]
fn new_glyph_replaces_previous() {
    let mut c = compositor(160, 1.0, HostEngine::Other);
    c.render("\u{1F389}", PINK);
    assert_eq!(c.image().unwrap().center_pixel(), Some([255, 255, 255, 255]));

    // Two boxes leave a gap at the center.
    c.render("ab", PINK);
    assert_px_close(
        c.image().unwrap().center_pixel().unwrap(),
        PINK.to_rgba8_premul().to_array(),
    );
}

#[test]
fn color_change_replaces_background() {
    let mut c = compositor(160, 1.0, HostEngine::Other);
    c.render("x", PINK);
    c.render("x", GREY);
    assert_px_close(
        c.image().unwrap().pixel(80, 16).unwrap(),
        GREY.to_rgba8_premul().to_array(),
    );
}

#[test]
fn surface_is_scaled_by_device_pixel_ratio() {
    let mut c = compositor(160, 2.0, HostEngine::Other);
    c.render("x", PINK);
    let img = c.image().unwrap();
    assert_eq!((img.width, img.height), (320, 320));
    assert_eq!(img.data.len(), 320 * 320 * 4);
    assert_px_close(img.pixel(160, 32).unwrap(), PINK.to_rgba8_premul().to_array());
    assert_eq!(img.center_pixel(), Some([255, 255, 255, 255]));
}

#[test]
fn host_engine_shifts_glyph_anchor() {
    let other = compositor(160, 1.0, HostEngine::Other);
    let safari = compositor(160, 1.0, HostEngine::Safari);
    assert!((other.font_size() - 112.0).abs() < 1e-9);
    assert!((other.glyph_anchor().y - 94.0).abs() < 1e-9);
    assert!((safari.glyph_anchor().y - 82.24).abs() < 1e-9);
    assert_eq!(other.glyph_anchor().x, 80.0);
}

#[test]
fn oversize_surface_skips_draw() {
    let mut c = compositor(70_000, 1.0, HostEngine::Other);
    assert_eq!(c.render("x", PINK), RenderOutcome::Skipped);
    assert!(c.image().is_none());
}

#[test]
fn surface_over_side_cap_skips_draw() {
    let mut c = compositor(30_000, 1.0, HostEngine::Other);
    assert_eq!(c.render("x", PINK), RenderOutcome::Skipped);
    assert!(c.image().is_none());

    let mut c = compositor(u32::from(MAX_SURFACE_SIDE / 2) + 1, 2.0, HostEngine::Other);
    assert_eq!(c.render("x", PINK), RenderOutcome::Skipped);
}

#[test]
fn skipped_draw_keeps_previous_image() {
    let mut c = compositor(64, 1.0, HostEngine::Other);
    assert_eq!(c.render("x", PINK), RenderOutcome::Rendered);
    let before = c.image().unwrap().clone();

    c.size = AvatarSize::new(20_000, 1.0).unwrap();
    assert_eq!(c.render("y", GREY), RenderOutcome::Skipped);
    assert_eq!(c.image(), Some(&before));
}

#[test]
fn from_config_validates() {
    let cfg = AvatarConfig {
        size: 0,
        ..AvatarConfig::default()
    };
    assert!(AvatarCompositor::from_config(&cfg).is_err());

    let cfg = AvatarConfig {
        fonts: FontConfig::none(),
        ..AvatarConfig::default()
    };
    let c = AvatarCompositor::from_config(&cfg).unwrap();
    assert_eq!(c.size().logical, 160);
    assert_eq!(c.host_engine(), HostEngine::Other);
}

const FIXTURE_FONT: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/data/fonts/DejaVuSans.ttf");

fn fixture_compositor() -> AvatarCompositor {
    let fonts = FontConfig {
        system: false,
        files: vec![FIXTURE_FONT.into()],
    };
    AvatarCompositor::new(AvatarSize::new(160, 1.0).unwrap(), HostEngine::Other, &fonts).unwrap()
}

fn is_ink(px: [u8; 4]) -> bool {
    px[0] >= 0xf0 && px[1] >= 0xf0 && px[2] >= 0xf0 && px[3] == 255
}

/// Bounding box `(x0, y0, x1, y1)` of white glyph ink, inclusive.
fn ink_bbox(img: &AvatarImage) -> (u32, u32, u32, u32) {
    let mut bbox = (u32::MAX, u32::MAX, 0, 0);
    for y in 0..img.height {
        for x in 0..img.width {
            if is_ink(img.pixel(x, y).unwrap()) {
                bbox.0 = bbox.0.min(x);
                bbox.1 = bbox.1.min(y);
                bbox.2 = bbox.2.max(x);
                bbox.3 = bbox.3.max(y);
            }
        }
    }
    assert!(bbox.0 <= bbox.2, "no glyph ink");
    bbox
}

#[test]
fn shaped_glyph_is_centered_on_anchor() {
    let mut c = fixture_compositor();
    assert_eq!(c.render("H", PINK), RenderOutcome::Rendered);
    let img = c.image().unwrap();
    let anchor = c.glyph_anchor();

    let (x0, y0, x1, y1) = ink_bbox(img);
    let cx = f64::from(x0 + x1 + 1) / 2.0;
    let cy = f64::from(y0 + y1 + 1) / 2.0;
    assert!((cx - anchor.x).abs() <= 2.0, "ink x {x0}..{x1}");
    assert!((cy - anchor.y).abs() <= c.font_size() * 0.1, "ink y {y0}..{y1}");

    // Real outline: the gap between the stems of H shows the background.
    assert!(!is_ink(img.pixel(80, 60).unwrap()));
    assert_px_close(img.pixel(80, 16).unwrap(), PINK.to_rgba8_premul().to_array());
}

#[test]
fn shaped_renders_are_byte_identical() {
    let mut a = fixture_compositor();
    let mut b = fixture_compositor();
    a.render("Hg", GREY);
    b.render("Hg", GREY);
    assert_eq!(a.image().unwrap().data, b.image().unwrap().data);
}

#[test]
fn uncovered_glyph_falls_back_to_box() {
    let mut c = fixture_compositor();
    c.render("\u{1F9A9}", PINK);
    let img = c.image().unwrap();

    let (x0, _, x1, _) = ink_bbox(img);
    // One 0.5em box, solid through the middle.
    assert!((f64::from(x1 + 1 - x0) - c.font_size() * 0.5).abs() <= 2.0);
    assert!(is_ink(img.pixel(80, 60).unwrap()));
    assert_eq!(img.center_pixel(), Some([255, 255, 255, 255]));
}
