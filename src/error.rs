//! Error types for the modifier engine.
//!
//! The engine's runtime surface is deliberately error-free: operating on
//! an absent identifier, removing a protected modifier, or scanning an
//! empty store are no-ops, not failures. Errors only arise at the
//! persistence seam, where an external save file names modifiers the
//! game no longer knows how to build.

use thiserror::Error;

/// Failure reconstructing modifiers from saved records.
#[derive(Debug, Error)]
pub enum ModifierError {
    /// The save named an identifier the factory doesn't recognize.
    #[error("no modifier registered for identifier `{0}`")]
    UnknownIdentifier(String),

    /// The factory recognized the identifier but rejected the payload.
    #[error("modifier `{identifier}` rejected saved payload: {reason}")]
    BadPayload { identifier: String, reason: String },
}
