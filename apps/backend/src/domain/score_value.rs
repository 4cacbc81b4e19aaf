use serde::{Deserialize, Serialize};

use crate::domain::fields::{EntryDiscipline, ScoreField};
use crate::domain::rules::DICE;
use crate::errors::domain::{DomainError, ValidationKind};

/// Content of a single scoresheet cell.
///
/// `Stroke` and `Numeric(0)` both contribute nothing to sums but are distinct:
/// a stroke is a forfeited category, a zero is a played one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(tag = "state", content = "value", rename_all = "snake_case")]
pub enum ScoreValue {
    /// Not played yet.
    #[default]
    Empty,
    Numeric(u16),
    /// Deliberately forfeited.
    Stroke,
}

impl ScoreValue {
    /// Contribution to section sums.
    pub fn contribution(self) -> u32 {
        match self {
            ScoreValue::Numeric(v) => u32::from(v),
            ScoreValue::Empty | ScoreValue::Stroke => 0,
        }
    }

    pub fn numeric(self) -> Option<u16> {
        match self {
            ScoreValue::Numeric(v) => Some(v),
            _ => None,
        }
    }

    pub fn is_empty(self) -> bool {
        matches!(self, ScoreValue::Empty)
    }

    pub fn is_stroke(self) -> bool {
        matches!(self, ScoreValue::Stroke)
    }

    /// Played: either a number or a stroke.
    pub fn is_filled(self) -> bool {
        !self.is_empty()
    }
}

/// Check that `value` is legal for `field`.
///
/// Empty and stroke are legal everywhere; numeric values must follow the
/// field's entry discipline.
pub fn validate_value(field: ScoreField, value: ScoreValue) -> Result<(), DomainError> {
    let ScoreValue::Numeric(v) = value else {
        return Ok(());
    };

    match field.discipline() {
        EntryDiscipline::Upper { face } => {
            let face = u16::from(face);
            if v % face != 0 || v / face > u16::from(DICE) {
                return Err(DomainError::validation(
                    ValidationKind::InvalidScoreValue,
                    format!("{field} accepts multiples of {face} up to {}, got {v}", face * u16::from(DICE)),
                ));
            }
        }
        EntryDiscipline::Fixed { points } => {
            if v != points {
                return Err(DomainError::validation(
                    ValidationKind::InvalidScoreValue,
                    format!("{field} is either unset or {points}, got {v}"),
                ));
            }
        }
        EntryDiscipline::FreeForm => {}
    }
    Ok(())
}
