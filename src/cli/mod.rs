pub mod commands;
pub mod output;
pub mod prompt;

pub use commands::*;
pub use output::*;
pub use prompt::*;
