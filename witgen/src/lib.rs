pub mod args;
pub mod commands;
pub mod config;

pub mod prelude {
    pub use crate::args::*;
    pub use crate::commands::*;
    pub use crate::config::*;
}
