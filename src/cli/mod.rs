pub mod app;
pub mod catalog;
pub mod commands;
pub mod config;
pub mod context;
pub mod dispatch;
pub mod env;
pub mod locate;
pub mod output;
pub mod record;
pub mod runtime;

pub use catalog::{cmd_commands, CommandsArgs};
pub use config::cmd_config;
pub use locate::{cmd_locate, LocateArgs};
pub use record::{cmd_record, RecordArgs};
