//! TLS 1.2 key-exchange and key-derivation helpers.

pub mod key_exchange;
pub mod prf;

pub use key_exchange::{process_client_key_exchange, set_master_secret_from_pre, verify_rsa};
pub use prf::{compute_master_secret, compute_verify_data};
