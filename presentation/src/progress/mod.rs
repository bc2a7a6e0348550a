//! Review progress display

pub mod reporter;
