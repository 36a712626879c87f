//! # ferrotls Core
//!
//! Core TLS protocol implementation for ferrotls: the receive-side
//! handshake state machine and the per-connection session state it
//! mutates.
//!
//! Decoded plaintext records flow in from a transport's record layer; the
//! core classifies each record, advances the handshake, maintains
//! cryptographic context (transcript digests, verify data, master secret,
//! renegotiation info) and emits semantic events to higher layers.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │   Connection / backend I/O (external)   │
//! └─────────────────┬───────────────────────┘
//!                   │ records in, packets out
//! ┌─────────────────▼───────────────────────┐
//! │      ferrotls-core (this crate)         │
//! │  ┌──────────────────────────────────┐   │
//! │  │  Record classifier (receive)     │   │
//! │  ├──────────────────────────────────┤   │
//! │  │  Handshake processor             │   │
//! │  ├──────────────────────────────────┤   │
//! │  │  Session + handshake state       │   │
//! │  ├──────────────────────────────────┤   │
//! │  │  Wire codec (messages)           │   │
//! │  └──────────────────────────────────┘   │
//! └─────────────────┬───────────────────────┘
//!                   │
//! ┌─────────────────▼───────────────────────┐
//! │    ferrotls-crypto (trait interface)    │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Concurrency
//!
//! Single-threaded cooperative per connection: nothing here suspends, and
//! the state is not thread-safe. Callers serialize access to one
//! [`session::SessionState`]; which thread makes the call does not matter
//! as long as calls are linearized.

#![forbid(unsafe_code)]
#![warn(
    missing_docs,
    missing_debug_implementations,
    rust_2018_idioms,
    unreachable_pub,
    unused_qualifications
)]

// Re-export crypto interface
pub use ferrotls_crypto;

// Core modules
pub mod alert;
pub mod cipher;
pub mod error;
pub mod extensions;
pub mod handshake;
pub mod messages;
pub mod protocol;
pub mod receive;
pub mod record;
pub mod session;
pub mod tls12;
pub mod transcript;
pub mod x509;

// Re-exports
pub use error::{AlertDescription, Error, KxError, Result};
pub use handshake::{process_handshake, process_server_hello};
pub use protocol::{ContentType, ProtocolVersion};
pub use receive::{process_packet, Packet, ReceiveCipherSwitch};
pub use session::{Role, SessionState};
pub use tls12::verify_rsa;
