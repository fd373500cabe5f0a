pub mod gauge;
pub mod judge;
pub mod motion;

pub use gauge::*;
pub use judge::*;
pub use motion::*;
