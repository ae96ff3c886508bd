use std::collections::HashSet;
use std::path::Path;
use std::sync::mpsc;
use std::time::Duration;

use darkroom_core::{update, AppState, AppViewModel, Msg};
use darkroom_engine::ServiceSettings;
use eframe::egui;
use engine_logging::LogDestination;

use super::effects::EffectRunner;
use super::intake;
use super::ui;

pub fn run_app() -> Result<(), eframe::Error> {
    engine_logging::initialize(LogDestination::Both(Path::new("./darkroom.log")));

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([900.0, 640.0])
            .with_min_inner_size([640.0, 480.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Darkroom",
        options,
        Box::new(|cc: &eframe::CreationContext| {
            egui_extras::install_image_loaders(&cc.egui_ctx);
            Box::new(DarkroomApp::new(cc.egui_ctx.clone()))
        }),
    )
}

struct DarkroomApp {
    state: AppState,
    runner: EffectRunner,
    msg_rx: mpsc::Receiver<Msg>,
    /// Preview URIs already handed to the image loader.
    registered_previews: HashSet<String>,
}

impl DarkroomApp {
    fn new(ctx: egui::Context) -> Self {
        let (msg_tx, msg_rx) = mpsc::channel();
        let runner = EffectRunner::new(ServiceSettings::default(), msg_tx, move || {
            ctx.request_repaint();
        });
        Self {
            state: AppState::new(),
            runner,
            msg_rx,
            registered_previews: HashSet::new(),
        }
    }

    fn dispatch(&mut self, msg: Msg) {
        let state = std::mem::take(&mut self.state);
        let (state, effects) = update(state, msg);
        self.state = state;
        self.runner.run(effects);
    }

    /// Registers preview bytes with the image loader, once per URI. URIs are
    /// unique per generation, so stale entries are simply never rendered
    /// again.
    fn register_previews(&mut self, ctx: &egui::Context, view: &AppViewModel) {
        for preview in [&view.original_preview, &view.processed_preview]
            .into_iter()
            .flatten()
        {
            if self.registered_previews.insert(preview.uri.clone()) {
                ctx.include_bytes(preview.uri.clone(), preview.bytes.as_ref().clone());
            }
        }
    }
}

impl eframe::App for DarkroomApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Engine events and raw drop input first, so this frame renders the
        // freshest state.
        let mut inbox: Vec<Msg> = Vec::new();
        while let Ok(msg) = self.msg_rx.try_recv() {
            inbox.push(msg);
        }
        inbox.extend(intake::collect_drag_and_drop(
            ctx,
            self.state.view().drop_active,
        ));
        for msg in inbox {
            self.dispatch(msg);
        }

        let view = self.state.view();
        self.register_previews(ctx, &view);

        let mut ui_events = Vec::new();
        egui::CentralPanel::default().show(ctx, |ui| {
            ui_events = ui::render(ui, &view);
        });

        for event in ui_events {
            match event {
                ui::UiEvent::PickClicked => {
                    if let Some(msg) = intake::pick_file() {
                        self.dispatch(msg);
                    }
                }
                ui::UiEvent::DownloadClicked => {
                    if let Some(msg) = intake::choose_save_destination() {
                        self.dispatch(msg);
                    }
                }
            }
        }

        if self.state.consume_dirty() {
            ctx.request_repaint();
        }
        if view.loading {
            // Keep frames coming while a poll cycle is outstanding.
            ctx.request_repaint_after(Duration::from_millis(150));
        }
    }
}
