//! Cell entry: every gesture on a cell becomes a `CellEdit`, and `apply_edit`
//! is the one place where numeric/stroke mutual exclusion is enforced.

use serde::{Deserialize, Serialize};

use crate::domain::fields::{EntryDiscipline, ScoreField};
use crate::domain::rules::upper_value;
use crate::domain::score_value::{validate_value, ScoreValue};
use crate::errors::domain::{DomainError, ValidationKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", content = "arg", rename_all = "snake_case")]
pub enum CellEdit {
    /// Write an explicit value (numeric, stroke or empty).
    Set(ScoreValue),
    /// Upper-section quick entry: number of dice showing the field's face.
    DiceCount(u8),
    /// Fixed-point fields: unset <-> constant.
    ToggleFixed,
    /// Stroke on/off; turning it on discards any number.
    ToggleStroke,
    Clear,
}

/// Compute the new cell value for `edit`, rejecting illegal values.
pub fn apply_edit(
    current: ScoreValue,
    field: ScoreField,
    edit: CellEdit,
) -> Result<ScoreValue, DomainError> {
    let next = match edit {
        CellEdit::Set(value) => value,
        CellEdit::DiceCount(count) => {
            let face = field.face().ok_or_else(|| {
                DomainError::validation(
                    ValidationKind::InvalidScoreValue,
                    format!("{field} has no dice-count entry"),
                )
            })?;
            let value = upper_value(face, count).ok_or_else(|| {
                DomainError::validation(
                    ValidationKind::InvalidScoreValue,
                    format!("dice count {count} out of range for {field}"),
                )
            })?;
            ScoreValue::Numeric(value)
        }
        CellEdit::ToggleFixed => {
            let EntryDiscipline::Fixed { points } = field.discipline() else {
                return Err(DomainError::validation(
                    ValidationKind::InvalidScoreValue,
                    format!("{field} is not a fixed-point field"),
                ));
            };
            if current == ScoreValue::Numeric(points) {
                ScoreValue::Empty
            } else {
                ScoreValue::Numeric(points)
            }
        }
        CellEdit::ToggleStroke => {
            if current.is_stroke() {
                ScoreValue::Empty
            } else {
                ScoreValue::Stroke
            }
        }
        CellEdit::Clear => ScoreValue::Empty,
    };

    validate_value(field, next)?;
    Ok(next)
}

/// Parse free-text entry for a field: blank clears, `-`/`/` strokes, digits
/// are a numeric value. Upper fields take the point value, not the dice count.
pub fn parse_entry(field: ScoreField, raw: &str) -> Result<ScoreValue, DomainError> {
    let trimmed = raw.trim();
    let value = match trimmed {
        "" => ScoreValue::Empty,
        "-" | "/" | "x" | "X" => ScoreValue::Stroke,
        digits => {
            let v: u16 = digits.parse().map_err(|_| {
                DomainError::validation(
                    ValidationKind::InvalidScoreValue,
                    format!("'{digits}' is not a score for {field}"),
                )
            })?;
            ScoreValue::Numeric(v)
        }
    };
    validate_value(field, value)?;
    Ok(value)
}
