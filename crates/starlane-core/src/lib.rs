pub mod app;
pub mod frame_loop;
pub mod highscore;
pub mod ipc;
pub mod recorder;
pub mod rules;
pub mod scheduler;
pub mod session;

pub use app::*;
pub use frame_loop::*;
pub use highscore::*;
pub use ipc::*;
pub use recorder::*;
pub use rules::*;
pub use scheduler::*;
pub use session::*;
