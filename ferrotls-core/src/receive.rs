//! Record classification: the receive-side entry point.
//!
//! An already-decrypted plaintext record enters [`process_packet`] and
//! leaves as one semantic [`Packet`]: application data, a batch of alerts,
//! a cipher-spec switch, or a batch of decoded handshake messages. The
//! caller then feeds each handshake message to
//! [`crate::handshake::process_handshake`] individually.
//!
//! Handshake messages may span records; the classifier parks the bytes of
//! a trailing incomplete message in the session state and resumes on the
//! next record of the same epoch.

use crate::alert::{self, Alert};
use crate::error::{Error, Result};
use crate::messages::{self, DecodeParams, HandshakeMessage};
use crate::protocol::{ContentType, ProtocolVersion};
use crate::record::TlsPlaintext;
use crate::session::SessionState;

/// A semantic event produced from one record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Packet {
    /// A batch of handshake messages, in wire order.
    Handshake(Vec<HandshakeMessage>),

    /// One or more alerts.
    Alert(Vec<Alert>),

    /// The peer switched to the pending cipher spec.
    ChangeCipherSpec,

    /// Application data, passed through untouched.
    AppData(Vec<u8>),
}

/// Record-layer hook: flips the receive side to the pending cipher spec.
///
/// The record layer owns cipher state; the classifier only tells it when
/// the peer's ChangeCipherSpec arrives.
pub trait ReceiveCipherSwitch {
    /// Switch the receive direction to the pending cipher spec.
    fn switch_receive_cipher(&mut self);
}

/// Classify one plaintext record into a [`Packet`].
///
/// Pure with respect to the record payload; reads negotiation state for
/// handshake decoding and, for ChangeCipherSpec, flips the record layer's
/// receive cipher.
pub fn process_packet(
    state: &mut SessionState,
    record: TlsPlaintext,
    record_layer: &mut dyn ReceiveCipherSwitch,
) -> Result<Packet> {
    match record.content_type {
        ContentType::ApplicationData => Ok(Packet::AppData(record.fragment)),

        ContentType::Alert => Ok(Packet::Alert(alert::decode_alerts(&record.fragment)?)),

        ContentType::ChangeCipherSpec => {
            decode_change_cipher_spec(&record.fragment)?;
            record_layer.switch_receive_cipher();
            Ok(Packet::ChangeCipherSpec)
        },

        ContentType::Handshake => {
            let tls13 = record.version == ProtocolVersion::Tls13;

            let mut input = state.take_handshake_record_buffer(tls13);
            input.extend_from_slice(&record.fragment);
            let (items, leftover) = messages::decode_handshake_stream(&input);
            state.set_handshake_record_buffer(tls13, leftover);

            let params = current_params(state, record.version);
            let mut decoded = Vec::with_capacity(items.len());
            for (ty, body) in items {
                decoded.push(messages::decode_handshake(&params, ty, &body)?);
            }
            Ok(Packet::Handshake(decoded))
        },

        ContentType::DeprecatedHandshake => {
            let msg = messages::decode_deprecated_handshake(&record.fragment)?;
            Ok(Packet::Handshake(vec![msg]))
        },
    }
}

/// Snapshot of negotiation state the structural decoder needs.
fn current_params(state: &SessionState, record_version: ProtocolVersion) -> DecodeParams {
    DecodeParams {
        version: record_version,
        key_exchange: state
            .handshake_opt()
            .and_then(|hs| hs.pending_cipher)
            .map(|cipher| cipher.kx),
        supports_npn: state.extension_npn(),
    }
}

fn decode_change_cipher_spec(fragment: &[u8]) -> Result<()> {
    if fragment != [1] {
        return Err(Error::InvalidMessage(
            "Invalid change cipher spec payload".into(),
        ));
    }
    Ok(())
}
