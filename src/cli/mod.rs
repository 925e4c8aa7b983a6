mod commands;
mod handlers;

pub use commands::{Cli, Commands, ServeArgs};
pub use handlers::{handle_add, handle_get, handle_init, handle_list, handle_serve};
