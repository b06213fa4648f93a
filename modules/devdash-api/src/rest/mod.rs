pub mod content;
pub mod indicators;
