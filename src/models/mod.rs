pub mod generation;
pub mod settings;

pub use generation::*;
pub use settings::*;
