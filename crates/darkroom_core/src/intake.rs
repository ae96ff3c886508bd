//! File-name based media type declaration.
//!
//! The platform shell has no browser to declare a MIME type for a dropped
//! file, so the declared type is derived from the extension. Validation only
//! ever checks the `image/` prefix.

/// Extensions offered by the picker filter and recognized at intake.
pub const IMAGE_EXTENSIONS: &[&str] = &[
    "png", "jpg", "jpeg", "gif", "webp", "bmp", "tiff", "tif",
];

/// Declared media type for a file name, `application/octet-stream` when the
/// extension is not a known image type.
pub fn media_type_for_name(name: &str) -> String {
    let ext = name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "bmp" => "image/bmp",
        "tiff" | "tif" => "image/tiff",
        _ => "application/octet-stream",
    }
    .to_string()
}
