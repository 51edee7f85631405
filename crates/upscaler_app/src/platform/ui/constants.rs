pub const APP_ID: &str = "upscaler";
pub const WINDOW_TITLE: &str = "Upscaler";
pub const WINDOW_SIZE: [f32; 2] = [420.0, 260.0];

pub const BUTTON_WIDTH: f32 = 320.0;
pub const BUTTON_HEIGHT: f32 = 28.0;
pub const ROW_SPACING: f32 = 5.0;

pub const LABEL_CHOOSE_INPUT: &str = "Choose input image";
pub const LABEL_CHOOSE_OUTPUT: &str = "Save as file";
pub const LABEL_START: &str = "Start Process";
