//! Labeled single-line input with an optional "Surprise me" button
//!
//! The field is controlled: the caller owns the value, passes it in on every
//! frame and receives edits through the change callback. The widget never
//! writes back into the caller's state itself.

use std::fmt;
use std::str::FromStr;

use anyhow::bail;
use eframe::egui;
use crate::gui::constants::*;

/// HTML-style input type of a form field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputKind {
    #[default]
    Text,
    Password,
    Email,
    Search,
    Url,
    Number,
}

impl InputKind {
    pub fn as_str(self) -> &'static str {
        match self {
            InputKind::Text => "text",
            InputKind::Password => "password",
            InputKind::Email => "email",
            InputKind::Search => "search",
            InputKind::Url => "url",
            InputKind::Number => "number",
        }
    }

    /// Whether typed characters are hidden
    pub fn is_masked(self) -> bool {
        self == InputKind::Password
    }
}

impl FromStr for InputKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().to_ascii_lowercase().as_str() {
            "text" => InputKind::Text,
            "password" => InputKind::Password,
            "email" => InputKind::Email,
            "search" => InputKind::Search,
            "url" => InputKind::Url,
            "number" => InputKind::Number,
            other => bail!("unsupported input type '{other}'"),
        })
    }
}

impl fmt::Display for InputKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What the field rendered this frame
pub struct FormFieldResponse {
    pub input: egui::Response,
    /// `None` unless the surprise button was enabled
    pub surprise: Option<egui::Response>,
}

impl FormFieldResponse {
    pub fn changed(&self) -> bool {
        self.input.changed()
    }

    pub fn surprise_clicked(&self) -> bool {
        self.surprise.as_ref().is_some_and(|r| r.clicked())
    }
}

pub struct FormField<'a> {
    label: &'a str,
    name: &'a str,
    kind: InputKind,
    placeholder: &'a str,
    required: bool,
    on_change: Option<Box<dyn FnMut(&str) + 'a>>,
    surprise_me: bool,
    on_surprise: Option<Box<dyn FnMut() + 'a>>,
}

impl<'a> FormField<'a> {
    pub fn new(label: &'a str, name: &'a str) -> Self {
        Self {
            label,
            name,
            kind: InputKind::default(),
            placeholder: "",
            required: true,
            on_change: None,
            surprise_me: false,
            on_surprise: None,
        }
    }

    pub fn kind(mut self, kind: InputKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn placeholder(mut self, placeholder: &'a str) -> Self {
        self.placeholder = placeholder;
        self
    }

    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    /// Called with the full new value whenever the user edits the input
    pub fn on_change(mut self, handler: impl FnMut(&str) + 'a) -> Self {
        self.on_change = Some(Box::new(handler));
        self
    }

    /// Show the "Surprise me" button next to the label when `enabled`
    pub fn surprise_me(mut self, enabled: bool, handler: impl FnMut() + 'a) -> Self {
        self.surprise_me = enabled;
        self.on_surprise = Some(Box::new(handler));
        self
    }

    /// Stable id of the input, shared by every field with the same name
    pub fn input_id(name: &str) -> egui::Id {
        egui::Id::new(("form_field", name))
    }

    /// The red marker after the label. This is a hint only, nothing is blocked.
    pub fn required_hint_visible(&self, value: &str) -> bool {
        self.required && value.trim().is_empty()
    }

    pub fn show(mut self, ui: &mut egui::Ui, value: &str) -> FormFieldResponse {
        let show_required = self.required_hint_visible(value);

        let (label, surprise) = ui
            .horizontal(|ui| {
                ui.spacing_mut().item_spacing.x = LABEL_GAP;
                let label = ui.label(egui::RichText::new(self.label).strong());
                if show_required {
                    ui.label(egui::RichText::new("*").color(REQUIRED_MARKER));
                }

                let surprise = self.surprise_me.then(|| {
                    ui.add(
                        egui::Button::new(
                            egui::RichText::new("Surprise me")
                                .small()
                                .strong()
                                .color(egui::Color32::BLACK),
                        )
                        .fill(SURPRISE_BUTTON_FILL)
                        .rounding(SURPRISE_BUTTON_ROUNDING),
                    )
                });
                (label, surprise)
            })
            .inner;

        if surprise.as_ref().is_some_and(|r| r.clicked()) {
            if let Some(handler) = self.on_surprise.as_mut() {
                handler();
            }
        }

        ui.add_space(ITEM_SPACING / 2.0);

        // Edits land in a scratch copy and are reported, not applied
        let mut buffer = value.to_owned();
        let input = ui
            .scope(|ui| {
                ui.visuals_mut().selection.stroke.color = ACCENT;
                ui.add(
                    egui::TextEdit::singleline(&mut buffer)
                        .id(Self::input_id(self.name))
                        .hint_text(self.placeholder)
                        .password(self.kind.is_masked())
                        .margin(INPUT_PADDING)
                        .desired_width(f32::INFINITY),
                )
            })
            .inner
            .labelled_by(label.id);

        if input.changed() && buffer != value {
            if let Some(handler) = self.on_change.as_mut() {
                handler(&buffer);
            }
        }

        FormFieldResponse { input, surprise }
    }
}
