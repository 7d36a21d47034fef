pub mod map_session;
pub mod run_context;

pub use map_session::{MapSessionState, SessionAction, SessionError};
pub use run_context::{Lifetime, Recorded, RunContext, RunGuard};
