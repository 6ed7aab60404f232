//! GUI module - egui front end for composing image prompts

pub mod components;
mod constants;
mod manager;

pub use components::form_field::{FormField, FormFieldResponse, InputKind};
pub use manager::{PostForm, run_gui};
