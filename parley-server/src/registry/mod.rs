mod session;
mod session_registry;

pub use session::Session;
pub use session_registry::*;
