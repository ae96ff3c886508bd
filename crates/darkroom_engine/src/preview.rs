use crate::{Generation, PreviewImage, PreviewTarget};

/// Builds the loader URI + bytes pair for a display slot.
///
/// URIs are unique per generation and slot, so the shell's image cache can
/// never serve a superseded submission's pixels under a reused key.
pub fn render_preview(
    generation: Generation,
    target: PreviewTarget,
    media_type: &str,
    bytes: Vec<u8>,
) -> PreviewImage {
    let slot = match target {
        PreviewTarget::Original => "original",
        PreviewTarget::Processed => "processed",
    };
    PreviewImage {
        uri: format!("preview://{generation}/{slot}"),
        media_type: media_type.to_string(),
        bytes,
    }
}

/// Media type of a processed result, from its path extension.
///
/// The service writes PNG unless the submission was a JPEG, so PNG is the
/// fallback.
pub(crate) fn result_media_type(result_path: &str) -> &'static str {
    let ext = result_path
        .rsplit_once('.')
        .map(|(_, ext)| ext)
        .unwrap_or_default();
    if ext.eq_ignore_ascii_case("jpg") || ext.eq_ignore_ascii_case("jpeg") {
        "image/jpeg"
    } else {
        "image/png"
    }
}
