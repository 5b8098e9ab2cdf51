// Domain value objects
pub mod chat_command;
pub mod links;

pub use chat_command::*;
pub use links::*;
