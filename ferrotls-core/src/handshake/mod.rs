//! Handshake processing.

pub mod process;
pub mod state;

pub use process::{process_handshake, process_server_hello};
pub use state::HandshakeState;
