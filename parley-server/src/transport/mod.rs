mod connection_handle;

pub use connection_handle::*;
