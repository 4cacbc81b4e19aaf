//! Error codes surfaced to callers of the scoring engine.
//!
//! Add new codes here; never pass ad-hoc strings as error codes.
//! All error codes are SCREAMING_SNAKE_CASE.

use core::fmt;

/// Centralized error codes for the scoring engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Sheet creation
    /// Fewer than two players were selected
    TooFewPlayers,
    /// The same identifier appears twice in the seating order
    DuplicatePlayer,
    /// Identifier resolves to neither a member nor a guest
    UnknownPlayer,
    /// Guest drafted without a host member
    GuestMissingHost,
    /// Guest host is not a roster member
    UnknownHost,
    /// Year/month outside the accepted range
    InvalidPeriod,

    // Cell entry and reorder
    /// Value is not legal for the target field
    InvalidScoreValue,
    /// Reorder payload is not a permutation of the current players
    NotAPermutation,
    /// Reorder requested while a derived sort mode is displayed
    ReorderRequiresManual,
    /// Player is not seated on this sheet
    PlayerNotOnSheet,

    // Billing
    /// Guest has no resolvable host to bill
    UnresolvableHost,
    /// Billing collaborator failed to create the penalty
    BillingFailed,

    /// General validation error
    ValidationError,

    // Resource Not Found
    /// Sheet not found
    SheetNotFound,
    /// Member not found
    MemberNotFound,
    /// General not found error
    NotFound,

    // Persistence
    /// Write or read against the persistence collaborator failed
    PersistenceFailed,
    /// Database unavailable
    DbUnavailable,
    /// Best-effort write deadline elapsed
    WriteDeadlineExceeded,
    /// Stored document could not be decoded
    DataCorruption,

    /// Configuration error
    ConfigError,
    /// Internal error
    Internal,
}

impl ErrorCode {
    /// Returns the canonical SCREAMING_SNAKE_CASE string for this error code.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::TooFewPlayers => "TOO_FEW_PLAYERS",
            Self::DuplicatePlayer => "DUPLICATE_PLAYER",
            Self::UnknownPlayer => "UNKNOWN_PLAYER",
            Self::GuestMissingHost => "GUEST_MISSING_HOST",
            Self::UnknownHost => "UNKNOWN_HOST",
            Self::InvalidPeriod => "INVALID_PERIOD",

            Self::InvalidScoreValue => "INVALID_SCORE_VALUE",
            Self::NotAPermutation => "NOT_A_PERMUTATION",
            Self::ReorderRequiresManual => "REORDER_REQUIRES_MANUAL",
            Self::PlayerNotOnSheet => "PLAYER_NOT_ON_SHEET",

            Self::UnresolvableHost => "UNRESOLVABLE_HOST",
            Self::BillingFailed => "BILLING_FAILED",

            Self::ValidationError => "VALIDATION_ERROR",

            Self::SheetNotFound => "SHEET_NOT_FOUND",
            Self::MemberNotFound => "MEMBER_NOT_FOUND",
            Self::NotFound => "NOT_FOUND",

            Self::PersistenceFailed => "PERSISTENCE_FAILED",
            Self::DbUnavailable => "DB_UNAVAILABLE",
            Self::WriteDeadlineExceeded => "WRITE_DEADLINE_EXCEEDED",
            Self::DataCorruption => "DATA_CORRUPTION",

            Self::ConfigError => "CONFIG_ERROR",
            Self::Internal => "INTERNAL",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
