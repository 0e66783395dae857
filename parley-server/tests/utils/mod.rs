pub mod test_client;
pub mod ws_client;

pub use test_client::*;
pub use ws_client::*;
