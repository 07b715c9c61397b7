//! Companion-protocol layer for Fujimi
//!
//! Defines the message protocol spoken with the paired watch client and the
//! bridge service that maps inbound triggers onto scoring jobs.

pub mod messages;
pub mod service;

pub use messages::{InboundMessage, OutboundMessage};
pub use service::ScoreBridge;
