//! 交互式命令行支持

mod commands;
mod completer;
mod printer;

pub use commands::{get_help_text, parse_command, Command, CommandResult, Session};
pub use completer::CommandCompleter;
pub use printer::{PrintMode, Printer};
