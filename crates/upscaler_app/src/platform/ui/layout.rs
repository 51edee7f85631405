use eframe::egui;

use super::constants::*;

pub fn native_options() -> eframe::NativeOptions {
    eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(WINDOW_TITLE)
            .with_app_id(APP_ID)
            .with_inner_size(WINDOW_SIZE)
            .with_min_inner_size(WINDOW_SIZE),
        ..Default::default()
    }
}

/// One full-width action button, enabled or not as a unit with its siblings.
pub fn action_button(ui: &mut egui::Ui, enabled: bool, text: &str) -> bool {
    let button = egui::Button::new(text).min_size(egui::vec2(BUTTON_WIDTH, BUTTON_HEIGHT));
    let clicked = ui.add_enabled(enabled, button).clicked();
    ui.add_space(ROW_SPACING);
    clicked
}
