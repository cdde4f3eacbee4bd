//! CLI command implementations

pub mod achievements;
pub mod award;
pub mod init;
pub mod prefs;
pub mod reset;
pub mod status;
pub mod title;
