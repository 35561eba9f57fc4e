use std::path::Path;

use super::*;

fn write_png(path: &Path, width: u32, height: u32, px: [u8; 4]) {
    let img = image::RgbaImage::from_raw(width, height, px.repeat((width * height) as usize))
        .unwrap();
    img.save(path).unwrap();
}

fn canvas() -> Canvas {
    Canvas::new(2, 2).unwrap()
}

#[test]
fn numeric_key_uses_leading_digits() {
    assert_eq!(numeric_file_key("12.png"), Some(12));
    assert_eq!(numeric_file_key("3-beach.jpg"), Some(3));
    assert_eq!(numeric_file_key("007.png"), Some(7));
    assert_eq!(numeric_file_key("cover.png"), None);
    assert_eq!(numeric_file_key(""), None);
}

#[test]
fn files_are_ordered_numerically_not_lexically() {
    let dir = tempfile::tempdir().unwrap();
    write_png(&dir.path().join("10.png"), 2, 2, [10, 0, 0, 255]);
    write_png(&dir.path().join("2.png"), 2, 2, [2, 0, 0, 255]);
    write_png(&dir.path().join("1.png"), 2, 2, [1, 0, 0, 255]);
    std::fs::write(dir.path().join(".DS_Store"), b"junk").unwrap();
    std::fs::create_dir(dir.path().join("nested")).unwrap();

    let mut supplier = DirImageSupplier::open(dir.path(), canvas()).unwrap();
    assert_eq!(supplier.len(), 3);

    let names: Vec<String> = supplier
        .paths()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["1.png", "2.png", "10.png"]);

    let third = supplier.load(2).unwrap();
    assert_eq!(third.index, 2);
    assert_eq!(&third.rgba8[..4], &[10, 0, 0, 255]);
}

#[test]
fn non_numeric_file_name_fails() {
    let dir = tempfile::tempdir().unwrap();
    write_png(&dir.path().join("1.png"), 2, 2, [0, 0, 0, 255]);
    write_png(&dir.path().join("cover.png"), 2, 2, [0, 0, 0, 255]);
    let err = DirImageSupplier::open(dir.path(), canvas()).unwrap_err();
    assert!(err.to_string().contains("cover.png"));
}

#[test]
fn duplicate_sequence_numbers_fail() {
    let dir = tempfile::tempdir().unwrap();
    write_png(&dir.path().join("1.png"), 2, 2, [0, 0, 0, 255]);
    write_png(&dir.path().join("01.png"), 2, 2, [0, 0, 0, 255]);
    assert!(DirImageSupplier::open(dir.path(), canvas()).is_err());
}

#[test]
fn missing_directory_is_a_read_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = DirImageSupplier::open(dir.path().join("nope"), canvas()).unwrap_err();
    assert!(matches!(err, CrossreelError::Read { .. }));
}

#[test]
fn undecodable_file_is_a_decode_error() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("1.png"), b"definitely not a png").unwrap();
    let mut supplier = DirImageSupplier::open(dir.path(), canvas()).unwrap();
    let err = supplier.load(0).unwrap_err();
    assert!(matches!(err, CrossreelError::Decode { .. }));
    assert!(err.to_string().contains("1.png"));
}

#[test]
fn wrong_size_image_is_rejected_on_load() {
    let dir = tempfile::tempdir().unwrap();
    write_png(&dir.path().join("1.png"), 3, 2, [0, 0, 0, 255]);
    let mut supplier = DirImageSupplier::open(dir.path(), canvas()).unwrap();
    assert!(matches!(
        supplier.load(0).unwrap_err(),
        CrossreelError::Config(_)
    ));
}

#[test]
fn in_memory_supplier_hands_out_images_by_index() {
    let mut supplier = InMemorySupplier::new(vec![
        SourceImage::solid(0, 1, 1, [1, 1, 1, 255]),
        SourceImage::solid(1, 1, 1, [2, 2, 2, 255]),
    ]);
    assert_eq!(supplier.len(), 2);
    assert!(!supplier.is_empty());
    assert_eq!(supplier.load(1).unwrap().rgba8[0], 2);
    assert!(supplier.load(2).is_err());
}
