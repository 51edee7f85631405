use eframe::egui;
use upscaler_core::{AppViewModel, JobState, Phase};

use super::constants::*;
use super::layout::action_button;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiAction {
    ChooseInput,
    ChooseOutput,
    Start,
}

/// Draws the window from the view model and reports which buttons were clicked.
pub fn render(ui: &mut egui::Ui, view: &AppViewModel) -> Vec<UiAction> {
    let mut actions = Vec::new();
    let enabled = view.controls_enabled;

    ui.vertical_centered(|ui| {
        ui.add_space(ROW_SPACING);
        ui.horizontal(|ui| {
            if view.phase == Phase::Running {
                ui.spinner();
            }
            ui.label(status_text(view));
        });
        ui.add_space(ROW_SPACING);

        if action_button(ui, enabled, LABEL_START) {
            actions.push(UiAction::Start);
        }
        if action_button(ui, enabled, LABEL_CHOOSE_INPUT) {
            actions.push(UiAction::ChooseInput);
        }
        ui.small(view.input_label());
        if action_button(ui, enabled, LABEL_CHOOSE_OUTPUT) {
            actions.push(UiAction::ChooseOutput);
        }
        ui.small(view.output_label());
    });

    actions
}

fn status_text(view: &AppViewModel) -> egui::RichText {
    let text = egui::RichText::new(&view.status_text).strong();
    match view.job_state {
        JobState::Failed(_) => text.color(egui::Color32::LIGHT_RED),
        JobState::Succeeded => text.color(egui::Color32::LIGHT_GREEN),
        JobState::Idle | JobState::Running => text,
    }
}
