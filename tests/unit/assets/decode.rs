use std::io::Cursor;

use super::*;

fn encode_png(width: u32, height: u32, px: [u8; 4]) -> Vec<u8> {
    let img = image::RgbaImage::from_raw(width, height, px.repeat((width * height) as usize))
        .unwrap();
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

#[test]
fn decode_png_keeps_straight_alpha() {
    let bytes = encode_png(2, 1, [100, 50, 200, 128]);
    let img = decode_image(4, &bytes).unwrap();
    assert_eq!(img.index, 4);
    assert_eq!((img.width, img.height), (2, 1));
    assert_eq!(img.rgba8.as_slice(), &[100, 50, 200, 128, 100, 50, 200, 128]);
}

#[test]
fn decode_garbage_fails() {
    assert!(decode_image(0, b"not an image").is_err());
}

