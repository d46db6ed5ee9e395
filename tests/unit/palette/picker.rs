use super::*;

#[test]
fn default_palette_order_is_fixed() {
    let p = Palette::default();
    assert_eq!(p.len(), 18);
    assert_eq!(p.get(0), Some(Color::rgb(0x9b, 0x9f, 0xaa)));
    assert_eq!(p.get(3), Some(Color::rgb(0xe5, 0x9f, 0xb8)));
    assert_eq!(p.get(17), Some(Color::rgb(0x86, 0x86, 0x86)));
    assert_eq!(p.get(18), None);
}

#[test]
fn empty_palette_is_rejected() {
    assert!(Palette::new(Vec::new()).is_err());
}

#[test]
fn clamp_index_stays_in_range() {
    let p = Palette::default();
    assert_eq!(p.clamp_index(-5), 0);
    assert_eq!(p.clamp_index(0), 0);
    assert_eq!(p.clamp_index(7), 7);
    assert_eq!(p.clamp_index(18), 17);
    assert_eq!(p.clamp_index(i64::MAX), 17);
    assert_eq!(p.color_at(99), Color::rgb(0x86, 0x86, 0x86));
}

#[test]
fn picker_never_emits_out_of_range_index() {
    let p = Palette::new(vec![Color::WHITE, Color::rgb(1, 2, 3)]).unwrap();
    let picker = PalettePicker::new(p.clone());

    for position in 0..64 {
        match picker.click(position) {
            Some(SelectionEvent::ColorPicked(i)) => {
                assert!(i < p.len());
                assert_eq!(i, position);
            }
            Some(other) => panic!("unexpected event {other:?}"),
            None => assert!(position >= p.len()),
        }
    }
}

#[test]
fn swatches_cover_palette_in_order() {
    let picker = PalettePicker::new(Palette::default());
    let swatches: Vec<_> = picker.swatches().collect();
    assert_eq!(swatches.len(), 18);
    for (i, s) in swatches.iter().enumerate() {
        assert_eq!(s.index, i);
        assert_eq!(Some(s.color), Palette::default().get(i));
    }
}
