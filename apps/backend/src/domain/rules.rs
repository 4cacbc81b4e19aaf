//! Fixed constants of the Kniffel ruleset.

/// Upper-section sum required for the bonus.
pub const BONUS_THRESHOLD: u32 = 63;
/// Bonus awarded once the upper section reaches the threshold.
pub const BONUS_POINTS: u32 = 35;

/// Dice per roll; bounds the dice count of an upper field.
pub const DICE: u8 = 5;
/// Dice count per face that exactly reaches the bonus threshold.
pub const PAR_DICE_PER_FACE: u8 = 3;

pub const FULL_HOUSE_POINTS: u16 = 25;
pub const SMALL_STRAIGHT_POINTS: u16 = 30;
pub const LARGE_STRAIGHT_POINTS: u16 = 40;
pub const KNIFFEL_POINTS: u16 = 50;

/// A sheet needs at least this many seated players.
pub const MIN_PLAYERS: usize = 2;

/// Amount of a single penalty, in currency units.
pub const PENALTY_AMOUNT: u32 = 1;

/// Value of an upper field for the given face and dice count.
pub fn upper_value(face: u8, dice_count: u8) -> Option<u16> {
    if !(1..=6).contains(&face) || dice_count > DICE {
        return None;
    }
    Some(u16::from(face) * u16::from(dice_count))
}
