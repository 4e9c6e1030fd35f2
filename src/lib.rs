#[macro_use]
mod macros;

pub mod args;
pub mod config;
pub mod console;
pub mod env;
pub mod error;
pub mod key;
pub mod level;
pub mod logger;
pub mod memory_sink;
pub mod pipeline;
pub mod record;
pub mod registry;
pub mod sink;
pub mod tag;
pub mod typecast;

pub mod init;
pub mod layer;

pub use args::{Arg, ErrorArg};
pub use config::Config;
pub use error::TypecastError;
pub use level::{Level, LevelRoutes, SinkMethod};
pub use logger::Logger;
pub use record::LogEvent;
pub use registry::{get_logger, lookup};
pub use tag::TypeTag;
pub use typecast::typecast;
