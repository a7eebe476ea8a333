pub mod chime;
pub mod config;
pub mod format;
pub mod run;
