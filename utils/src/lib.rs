mod backend;
mod generator;

pub use backend::MockBackend;
pub use generator::AbiGenerator;
