//! Resolve a sheet's seating order against the member roster and its guests.

use tracing::debug;

use crate::domain::player::{GuestPlayer, Member, Player, PlayerId};

/// Walk `order` and resolve each id against members first, then guests.
///
/// Ids that resolve to neither are dropped: members can leave the roster
/// after a sheet was created.
pub fn resolve_players(
    order: &[PlayerId],
    members: &[Member],
    guests: &[GuestPlayer],
) -> Vec<Player> {
    order
        .iter()
        .filter_map(|pid| {
            let resolved = resolve_one(pid, members, guests);
            if resolved.is_none() {
                debug!(player_id = %pid, "dropping unresolvable player from roster view");
            }
            resolved
        })
        .collect()
}

pub fn resolve_one(pid: &PlayerId, members: &[Member], guests: &[GuestPlayer]) -> Option<Player> {
    if let Some(member) = members.iter().find(|m| &m.id == pid) {
        return Some(Player::Member(member.clone()));
    }
    guests
        .iter()
        .find(|g| &g.id == pid)
        .map(|g| Player::Guest(g.clone()))
}
