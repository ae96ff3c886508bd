use darkroom_core::{AppViewModel, TaskPhase};
use eframe::egui;

/// User intents the render pass reports back to the shell.
pub enum UiEvent {
    PickClicked,
    DownloadClicked,
}

const DROP_BORDER_IDLE: egui::Color32 = egui::Color32::from_rgb(52, 152, 219);
const DROP_BORDER_ACTIVE: egui::Color32 = egui::Color32::from_rgb(46, 204, 113);
const ERROR_RED: egui::Color32 = egui::Color32::from_rgb(220, 50, 50);
const OK_GREEN: egui::Color32 = egui::Color32::from_rgb(0, 180, 0);

/// Renders the whole view model. Presentation only: nothing here mutates
/// state, it just reports clicks.
pub fn render(ui: &mut egui::Ui, view: &AppViewModel) -> Vec<UiEvent> {
    let mut events = Vec::new();

    ui.vertical_centered(|ui| {
        ui.heading("Darkroom");
        ui.add_space(4.0);
        ui.label("Process an image with one drop");
        ui.add_space(16.0);
    });

    render_drop_zone(ui, view, &mut events);
    ui.add_space(12.0);

    if view.loading {
        ui.vertical_centered(|ui| {
            ui.horizontal(|ui| {
                ui.spinner();
                ui.label(match view.phase {
                    TaskPhase::Submitting => "Uploading…".to_string(),
                    _ => format!("Processing… (status check {})", view.poll_attempts),
                });
            });
        });
    }

    if let Some(notice) = &view.notice {
        ui.add_space(8.0);
        ui.vertical_centered(|ui| {
            ui.colored_label(ERROR_RED, format!("Error: {}", notice.message));
        });
    }

    if view.results_visible {
        ui.add_space(12.0);
        render_results(ui, view, &mut events);
    }

    events
}

fn render_drop_zone(ui: &mut egui::Ui, view: &AppViewModel, events: &mut Vec<UiEvent>) {
    let stroke = if view.drop_active {
        egui::Stroke::new(2.0, DROP_BORDER_ACTIVE)
    } else {
        egui::Stroke::new(1.0, DROP_BORDER_IDLE)
    };

    egui::Frame::none()
        .stroke(stroke)
        .inner_margin(egui::Margin::symmetric(24.0, 24.0))
        .show(ui, |ui| {
            ui.vertical_centered(|ui| {
                ui.label(if view.drop_active {
                    "Release to submit"
                } else {
                    "Drag & drop an image here"
                });
                ui.add_space(8.0);
                if ui
                    .add_enabled(!view.loading, egui::Button::new("📁 Select Image"))
                    .clicked()
                {
                    events.push(UiEvent::PickClicked);
                }
                if let Some(name) = &view.selected_name {
                    ui.add_space(4.0);
                    ui.label(format!("Selected: {name}"));
                }
            });
        });
}

fn render_results(ui: &mut egui::Ui, view: &AppViewModel, events: &mut Vec<UiEvent>) {
    ui.columns(2, |columns| {
        columns[0].vertical_centered(|ui| {
            ui.label("Original");
            if let Some(preview) = &view.original_preview {
                ui.add(egui::Image::from_uri(preview.uri.clone()).max_height(280.0));
            }
        });
        columns[1].vertical_centered(|ui| {
            ui.label("Processed");
            if let Some(preview) = &view.processed_preview {
                ui.add(egui::Image::from_uri(preview.uri.clone()).max_height(280.0));
            }
        });
    });

    ui.add_space(12.0);
    ui.vertical_centered(|ui| {
        if view.download_available && ui.button("⬇ Download Image").clicked() {
            events.push(UiEvent::DownloadClicked);
        }
        if let Some(path) = &view.saved_to {
            ui.colored_label(OK_GREEN, format!("Saved to {}", path.display()));
        }
    });
}
