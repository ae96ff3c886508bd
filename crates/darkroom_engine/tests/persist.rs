use darkroom_engine::write_atomically;

#[test]
fn writes_bytes_to_the_destination() {
    let dir = tempfile::tempdir().expect("tempdir");
    let destination = dir.path().join("processed_image.png");

    let written = write_atomically(&destination, b"pixels").expect("write ok");

    assert_eq!(written, destination);
    assert_eq!(std::fs::read(&destination).expect("read back"), b"pixels");
}

#[test]
fn replaces_an_existing_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let destination = dir.path().join("processed_image.png");
    std::fs::write(&destination, b"old").expect("seed file");

    write_atomically(&destination, b"new").expect("write ok");

    assert_eq!(std::fs::read(&destination).expect("read back"), b"new");
}

#[test]
fn creates_missing_parent_directories() {
    let dir = tempfile::tempdir().expect("tempdir");
    let destination = dir.path().join("nested/out/processed_image.png");

    write_atomically(&destination, b"pixels").expect("write ok");

    assert_eq!(std::fs::read(&destination).expect("read back"), b"pixels");
}
