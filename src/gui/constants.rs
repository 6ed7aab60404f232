//! Layout and colour constants shared by GUI components

use eframe::egui::Color32;

pub const ITEM_SPACING: f32 = 8.0;
pub const SECTION_SPACING: f32 = 20.0;

pub const LABEL_GAP: f32 = 8.0;
pub const INPUT_PADDING: f32 = 12.0;

pub const SURPRISE_BUTTON_FILL: Color32 = Color32::from_rgb(0xEC, 0xEC, 0xF1);
pub const SURPRISE_BUTTON_ROUNDING: f32 = 5.0;

pub const REQUIRED_MARKER: Color32 = Color32::from_rgb(0xDC, 0x26, 0x26);
pub const ACCENT: Color32 = Color32::from_rgb(0x46, 0x49, 0xFF);
