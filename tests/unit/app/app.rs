use super::*;
use crate::config::FontConfig;

fn app() -> AvatarApp {
    let cfg = AvatarConfig {
        fonts: FontConfig::none(),
        ..AvatarConfig::default()
    };
    AvatarApp::new(&cfg).unwrap()
}

#[test]
fn starts_with_placeholder_on_first_color() {
    let app = app();
    assert_eq!(app.selection(), &Selection::default());
    let (glyph, color) = app.resolved();
    assert_eq!(glyph, "\u{1F47B}");
    assert_eq!(color, Color::rgb(0x9b, 0x9f, 0xaa));

    let img = app.image().unwrap();
    assert_eq!(img.pixel(80, 16), Some([0x9b, 0x9f, 0xaa, 255]));
}

#[test]
fn events_redraw_before_returning() {
    let mut app = app();
    app.select_emoji("ab");
    assert!(app.click_swatch(3));
    let img = app.image().unwrap();
    assert_eq!(img.pixel(80, 16), Some([0xe5, 0x9f, 0xb8, 255]));
    assert_eq!(img.center_pixel(), Some([0xe5, 0x9f, 0xb8, 255]));
}

#[test]
fn every_swatch_paints_its_own_color() {
    let mut app = app();
    let swatches: Vec<_> = app.swatches().collect();
    for s in swatches {
        assert!(app.click_swatch(s.index));
        let px = app.image().unwrap().pixel(80, 16).unwrap();
        assert_eq!(px, s.color.to_rgba8_premul().to_array(), "swatch {}", s.index);
        for other in app.swatches().filter(|o| o.color != s.color) {
            assert_ne!(px, other.color.to_rgba8_premul().to_array());
        }
    }
}

#[test]
fn clicks_outside_palette_change_nothing() {
    let mut app = app();
    assert!(app.click_swatch(5));
    assert!(!app.click_swatch(18));
    assert_eq!(app.selection().color_index, 5);
}

#[test]
fn download_writes_current_render() {
    let mut app = app();
    app.select_emoji("\u{1F389}");
    let dir = PathBuf::from("target").join("app_unit_download");
    let path = app.download(&dir).unwrap();
    assert!(path.ends_with("emoji-avatar.png"));

    let png = std::fs::read(&path).unwrap();
    let decoded = image::load_from_memory(&png).unwrap().to_rgba8();
    assert_eq!(decoded.dimensions(), (160, 160));

    let uri = app.data_uri().unwrap();
    assert!(uri.starts_with("data:image/png;base64,"));
}
