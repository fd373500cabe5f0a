pub mod catalog;
pub mod import;
pub mod keyboard;
pub mod model;

pub use catalog::*;
pub use import::*;
pub use keyboard::*;
pub use model::*;
