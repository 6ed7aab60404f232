#![forbid(unsafe_code)]

pub mod config;
pub mod database;
pub mod gui;
pub mod surprise;

#[cfg(test)]
mod test_support;
