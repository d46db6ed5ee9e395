use super::*;

fn sample() -> AvatarImage {
    AvatarImage {
        width: 2,
        height: 1,
        data: vec![64, 0, 0, 128, 10, 20, 30, 255],
    }
}

#[test]
fn png_decodes_with_straight_alpha() {
    let png = sample().encode_png().unwrap();
    assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");

    let decoded = image::load_from_memory(&png).unwrap().to_rgba8();
    assert_eq!(decoded.dimensions(), (2, 1));
    assert_eq!(decoded.get_pixel(0, 0).0, [128, 0, 0, 128]);
    assert_eq!(decoded.get_pixel(1, 0).0, [10, 20, 30, 255]);
}

#[test]
fn mismatched_buffer_is_an_encode_error() {
    let img = AvatarImage {
        width: 4,
        height: 4,
        data: vec![0; 3],
    };
    assert!(matches!(img.encode_png(), Err(AvatarError::Encode(_))));
}

#[test]
fn data_uri_carries_the_png() {
    let img = sample();
    let uri = img.to_data_uri().unwrap();
    assert!(uri.starts_with("data:image/png;base64,"));
    assert_eq!(decode_data_uri(&uri).unwrap(), img.encode_png().unwrap());

    assert!(decode_data_uri("data:text/plain,hi").is_err());
    assert!(decode_data_uri("data:image/png;base64,@@@").is_err());
}

#[test]
fn download_uses_fixed_file_name() {
    let dir = PathBuf::from("target").join("export_unit");
    let _ = std::fs::remove_dir_all(&dir);

    let path = save_download(&sample(), &dir).unwrap();
    assert_eq!(path, dir.join("emoji-avatar.png"));
    assert_eq!(std::fs::read(&path).unwrap(), sample().encode_png().unwrap());

    // A second download overwrites in place.
    let again = save_download(&sample(), &dir).unwrap();
    assert_eq!(again, path);
}
