pub mod audio;
pub mod songgen;
pub mod storage;
pub mod types;

pub use audio::*;
pub use songgen::*;
pub use storage::*;
pub use types::*;
