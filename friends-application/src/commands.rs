pub mod dispatch_commands;
