// CLI module
// Public interface for the interactive routing session

mod commands;
pub mod display;
mod input;
mod repl;
mod workbench;

pub use commands::{handle_command, help_text, Command};
pub use input::InputHandler;
pub use repl::Repl;
pub use workbench::{PendingRouting, Workbench};
