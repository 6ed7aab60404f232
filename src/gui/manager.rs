//! GUI manager - the "create post" form window

use anyhow::Result;
use eframe::egui;
use tracing::debug;

use crate::config::AppConfig;
use crate::gui::components::form_field::{FormField, InputKind};
use crate::gui::constants::*;
use crate::surprise::random_prompt;

/// Values typed into the form; the fields themselves hold no state
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PostForm {
    pub name: String,
    pub prompt: String,
}

impl PostForm {
    pub fn surprise_me(&mut self) {
        self.prompt = random_prompt(&self.prompt).to_string();
        debug!(prompt = %self.prompt, "picked surprise prompt");
    }

    pub fn ui(&mut self, ui: &mut egui::Ui) {
        // The callbacks borrow the fields mutably, so render from snapshots
        let name = self.name.clone();
        FormField::new("Your name", "name")
            .kind(InputKind::Text)
            .placeholder("John Doe")
            .on_change(|value| self.name = value.to_string())
            .show(ui, &name);

        ui.add_space(SECTION_SPACING);

        let prompt = self.prompt.clone();
        let mut surprise_requested = false;
        FormField::new("Prompt", "prompt")
            .placeholder("a corgi astronaut planting a flag on the moon")
            .on_change(|value| self.prompt = value.to_string())
            .surprise_me(true, || surprise_requested = true)
            .show(ui, &prompt);

        if surprise_requested {
            self.surprise_me();
        }
    }
}

#[derive(Default)]
pub struct GuiManager {
    form: PostForm,
}

impl GuiManager {
    pub fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        Self::default()
    }
}

impl eframe::App for GuiManager {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("Create");
            ui.label(
                egui::RichText::new(
                    "Write an imaginative prompt, or let Surprise me pick one for you",
                )
                .weak(),
            );
            ui.add_space(SECTION_SPACING);

            self.form.ui(ui);
        });
    }
}

pub fn run_gui(config: &AppConfig) -> Result<()> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([config.window_width, config.window_height])
            .with_title("Promptboard"),
        ..Default::default()
    };

    eframe::run_native(
        "Promptboard",
        options,
        Box::new(|cc| Ok(Box::new(GuiManager::new(cc)))),
    )
    .map_err(|e| anyhow::anyhow!("Failed to run egui application: {}", e))?;

    Ok(())
}
