use std::fs;
use std::path::Path;
use std::sync::Arc;

use darkroom_core::{
    media_type_for_name, CandidateFile, Msg, IMAGE_EXTENSIONS, SUGGESTED_DOWNLOAD_NAME,
};
use eframe::egui;
use engine_logging::engine_warn;

/// Messages produced by this frame's raw drag-and-drop input.
///
/// Hover tracking is what marks the drop target active; `drop_active` is the
/// previously rendered value so a change is only reported once.
pub fn collect_drag_and_drop(ctx: &egui::Context, drop_active: bool) -> Vec<Msg> {
    let mut msgs = Vec::new();

    let hovering = ctx.input(|input| !input.raw.hovered_files.is_empty());
    if hovering != drop_active {
        msgs.push(Msg::DropHoverChanged(hovering));
    }

    let dropped = ctx.input(|input| input.raw.dropped_files.clone());
    if let Some(first) = dropped.into_iter().next() {
        // Only the first entry can win; skip reading the rest.
        msgs.push(match candidate_from_drop(&first) {
            Ok(candidate) => Msg::FilesOffered(vec![candidate]),
            Err(message) => Msg::IntakeFailed { message },
        });
    }

    msgs
}

/// Opens the platform file picker, filtered to image extensions.
pub fn pick_file() -> Option<Msg> {
    let path = rfd::FileDialog::new()
        .add_filter("Images", IMAGE_EXTENSIONS)
        .pick_file()?;
    Some(match candidate_from_path(&path) {
        Ok(candidate) => Msg::FilesOffered(vec![candidate]),
        Err(message) => Msg::IntakeFailed { message },
    })
}

/// Opens a save dialog pre-filled with the suggested download filename.
pub fn choose_save_destination() -> Option<Msg> {
    let destination = rfd::FileDialog::new()
        .set_file_name(SUGGESTED_DOWNLOAD_NAME)
        .save_file()?;
    Some(Msg::DownloadRequested { destination })
}

fn candidate_from_drop(file: &egui::DroppedFile) -> Result<CandidateFile, String> {
    if let Some(path) = &file.path {
        return candidate_from_path(path);
    }
    // A drop without a backing path carries its content inline.
    if let Some(bytes) = &file.bytes {
        return Ok(CandidateFile {
            name: file.name.clone(),
            media_type: media_type_for_name(&file.name),
            bytes: Arc::new(bytes.to_vec()),
        });
    }
    Err(format!("could not read dropped file {:?}", file.name))
}

fn candidate_from_path(path: &Path) -> Result<CandidateFile, String> {
    let name = path
        .file_name()
        .and_then(|name| name.to_str())
        .map(str::to_string)
        .ok_or_else(|| format!("invalid file name: {}", path.display()))?;
    let bytes = fs::read(path).map_err(|err| {
        engine_warn!("intake read failed for {:?}: {}", path, err);
        format!("could not read {}: {}", path.display(), err)
    })?;
    Ok(CandidateFile {
        media_type: media_type_for_name(&name),
        name,
        bytes: Arc::new(bytes),
    })
}
