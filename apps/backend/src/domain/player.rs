//! Players seated on a sheet: permanent members and sheet-scoped guests.

use std::fmt;

use serde::{Deserialize, Serialize};
use ulid::Ulid;

use crate::errors::domain::{DomainError, ValidationKind};

/// Identifier of a seated player (member id or generated guest id).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(String);

impl PlayerId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Fresh identifier for a guest drafted onto a new sheet.
    pub fn generate_guest() -> Self {
        Self(format!("guest-{}", Ulid::new()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PlayerId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for PlayerId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Permanent roster identity, usable across sessions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub id: PlayerId,
    pub display_name: String,
}

impl Member {
    pub fn new(id: impl Into<PlayerId>, display_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
        }
    }
}

/// Guest snapshot frozen into a sheet at creation.
///
/// `host_member_id` is mandatory at creation; documents written elsewhere may
/// still carry a blank host, which billing resolution rejects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuestPlayer {
    pub id: PlayerId,
    pub display_name: String,
    #[serde(default)]
    pub host_member_id: PlayerId,
}

/// Guest as entered by the caller, before host validation.
///
/// The id is assigned up front so callers can place the guest in the
/// seating order they submit alongside it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuestDraft {
    pub id: PlayerId,
    pub display_name: String,
    pub host_member_id: Option<PlayerId>,
}

impl GuestDraft {
    pub fn new(display_name: impl Into<String>, host: Option<&str>) -> Self {
        Self {
            id: PlayerId::generate_guest(),
            display_name: display_name.into(),
            host_member_id: host.map(PlayerId::from),
        }
    }

    /// Freeze into a guest snapshot once the host has been checked.
    pub fn into_guest(self, host_member_id: PlayerId) -> GuestPlayer {
        GuestPlayer {
            id: self.id,
            display_name: self.display_name,
            host_member_id,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Player {
    Member(Member),
    Guest(GuestPlayer),
}

impl Player {
    pub fn id(&self) -> &PlayerId {
        match self {
            Player::Member(m) => &m.id,
            Player::Guest(g) => &g.id,
        }
    }

    pub fn display_name(&self) -> &str {
        match self {
            Player::Member(m) => &m.display_name,
            Player::Guest(g) => &g.display_name,
        }
    }

    pub fn is_guest(&self) -> bool {
        matches!(self, Player::Guest(_))
    }
}

/// Who pays for this player's penalties: members pay for themselves, guests
/// are billed to their host.
pub fn resolve_billing_target(player: &Player) -> Result<PlayerId, DomainError> {
    match player {
        Player::Member(member) => Ok(member.id.clone()),
        Player::Guest(guest) => {
            if guest.host_member_id.is_blank() {
                return Err(DomainError::validation(
                    ValidationKind::UnresolvableHost,
                    format!("guest '{}' has no host member", guest.display_name),
                ));
            }
            Ok(guest.host_member_id.clone())
        }
    }
}
