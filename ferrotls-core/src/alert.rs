//! TLS alert protocol.

use crate::error::{AlertDescription, Error, Result};

/// Alert level (RFC 5246 Section 7.2).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum AlertLevel {
    /// Warning (1)
    Warning = 1,

    /// Fatal (2)
    Fatal = 2,
}

impl AlertLevel {
    /// Create from wire format (u8).
    pub const fn from_u8(value: u8) -> Option<Self> {
        match value {
            1 => Some(AlertLevel::Warning),
            2 => Some(AlertLevel::Fatal),
            _ => None,
        }
    }

    /// Convert to wire format (u8).
    pub const fn to_u8(self) -> u8 {
        self as u8
    }
}

/// TLS alert message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Alert {
    /// Alert level
    pub level: AlertLevel,

    /// Alert description
    pub description: AlertDescription,
}

impl Alert {
    /// Create a new alert.
    pub fn new(level: AlertLevel, description: AlertDescription) -> Self {
        Self { level, description }
    }

    /// Create a fatal alert.
    pub fn fatal(description: AlertDescription) -> Self {
        Self {
            level: AlertLevel::Fatal,
            description,
        }
    }

    /// Create a close_notify alert.
    pub fn close_notify() -> Self {
        Self {
            level: AlertLevel::Warning,
            description: AlertDescription::CloseNotify,
        }
    }

    /// Encode the alert to bytes.
    pub fn encode(&self) -> [u8; 2] {
        [self.level.to_u8(), self.description.to_u8()]
    }

    /// Decode one alert from bytes.
    pub fn decode(data: &[u8]) -> Result<Self> {
        if data.len() < 2 {
            return Err(Error::InvalidMessage("Alert too short".into()));
        }

        let level = AlertLevel::from_u8(data[0])
            .ok_or_else(|| Error::InvalidMessage("Invalid alert level".into()))?;

        let description = AlertDescription::from_u8(data[1])
            .ok_or_else(|| Error::InvalidMessage("Invalid alert description".into()))?;

        Ok(Self { level, description })
    }

    /// Check if this alert is fatal.
    pub fn is_fatal(&self) -> bool {
        self.level == AlertLevel::Fatal || self.description.is_fatal()
    }
}

/// Decode every alert in a record fragment.
///
/// A fragment may legally carry several consecutive two-byte alerts.
pub fn decode_alerts(data: &[u8]) -> Result<Vec<Alert>> {
    if data.is_empty() || data.len() % 2 != 0 {
        return Err(Error::InvalidMessage("Invalid alert fragment length".into()));
    }

    data.chunks_exact(2).map(Alert::decode).collect()
}
