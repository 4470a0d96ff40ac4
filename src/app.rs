use eframe::egui;

use crate::state::{AppState, Stage};
use crate::ui::{explore, inference, load, panels};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct MelaApp {
    pub state: AppState,
}

impl Default for MelaApp {
    fn default() -> Self {
        Self {
            state: AppState::default(),
        }
    }
}

impl eframe::App for MelaApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: stage navigation ----
        egui::SidePanel::left("stage_panel")
            .default_width(220.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: the selected stage ----
        egui::CentralPanel::default().show(ctx, |ui| match self.state.stage {
            Stage::Load => load::show(ui, &mut self.state),
            Stage::Explore => explore::show(ui, &mut self.state),
            Stage::Infer => inference::show(ui, &mut self.state),
        });
    }
}
