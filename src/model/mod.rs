pub mod config;
pub mod extraction;
pub mod framework;
pub mod mapping;

pub use config::{Config, MapperConfig};
pub use framework::*;
pub use mapping::*;
