pub mod assets;
pub mod config;
pub mod error;
pub mod feature;
pub mod io;
pub mod jira;
pub mod paths;
pub mod project;
pub mod settings;
pub mod status;
pub mod template;

pub use error::{Result, SpecError};
