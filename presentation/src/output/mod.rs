//! Terminal output rendering

pub mod transcript;
