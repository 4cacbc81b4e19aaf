//! The 13 scoring fields of a Kniffel sheet and their entry disciplines.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::rules::{
    FULL_HOUSE_POINTS, KNIFFEL_POINTS, LARGE_STRAIGHT_POINTS, SMALL_STRAIGHT_POINTS,
};
use crate::errors::domain::{DomainError, ValidationKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreField {
    Ones,
    Twos,
    Threes,
    Fours,
    Fives,
    Sixes,
    ThreeOfAKind,
    FourOfAKind,
    FullHouse,
    SmallStraight,
    LargeStraight,
    /// Five of a kind, the top combination.
    Kniffel,
    Chance,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Upper,
    Lower,
}

/// How a field accepts values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryDiscipline {
    /// `dice_count * face`, dice_count in 0..=5.
    Upper { face: u8 },
    /// Either unset or exactly `points`.
    Fixed { points: u16 },
    /// Any non-negative integer.
    FreeForm,
}

impl ScoreField {
    /// All fields in sheet order.
    pub const ALL: [ScoreField; 13] = [
        ScoreField::Ones,
        ScoreField::Twos,
        ScoreField::Threes,
        ScoreField::Fours,
        ScoreField::Fives,
        ScoreField::Sixes,
        ScoreField::ThreeOfAKind,
        ScoreField::FourOfAKind,
        ScoreField::FullHouse,
        ScoreField::SmallStraight,
        ScoreField::LargeStraight,
        ScoreField::Kniffel,
        ScoreField::Chance,
    ];

    pub const UPPER: [ScoreField; 6] = [
        ScoreField::Ones,
        ScoreField::Twos,
        ScoreField::Threes,
        ScoreField::Fours,
        ScoreField::Fives,
        ScoreField::Sixes,
    ];

    pub const LOWER: [ScoreField; 7] = [
        ScoreField::ThreeOfAKind,
        ScoreField::FourOfAKind,
        ScoreField::FullHouse,
        ScoreField::SmallStraight,
        ScoreField::LargeStraight,
        ScoreField::Kniffel,
        ScoreField::Chance,
    ];

    pub const fn section(self) -> Section {
        match self {
            ScoreField::Ones
            | ScoreField::Twos
            | ScoreField::Threes
            | ScoreField::Fours
            | ScoreField::Fives
            | ScoreField::Sixes => Section::Upper,
            _ => Section::Lower,
        }
    }

    pub const fn discipline(self) -> EntryDiscipline {
        match self {
            ScoreField::Ones => EntryDiscipline::Upper { face: 1 },
            ScoreField::Twos => EntryDiscipline::Upper { face: 2 },
            ScoreField::Threes => EntryDiscipline::Upper { face: 3 },
            ScoreField::Fours => EntryDiscipline::Upper { face: 4 },
            ScoreField::Fives => EntryDiscipline::Upper { face: 5 },
            ScoreField::Sixes => EntryDiscipline::Upper { face: 6 },
            ScoreField::FullHouse => EntryDiscipline::Fixed {
                points: FULL_HOUSE_POINTS,
            },
            ScoreField::SmallStraight => EntryDiscipline::Fixed {
                points: SMALL_STRAIGHT_POINTS,
            },
            ScoreField::LargeStraight => EntryDiscipline::Fixed {
                points: LARGE_STRAIGHT_POINTS,
            },
            ScoreField::Kniffel => EntryDiscipline::Fixed {
                points: KNIFFEL_POINTS,
            },
            ScoreField::ThreeOfAKind | ScoreField::FourOfAKind | ScoreField::Chance => {
                EntryDiscipline::FreeForm
            }
        }
    }

    /// Die face for upper fields.
    pub const fn face(self) -> Option<u8> {
        match self.discipline() {
            EntryDiscipline::Upper { face } => Some(face),
            _ => None,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            ScoreField::Ones => "ones",
            ScoreField::Twos => "twos",
            ScoreField::Threes => "threes",
            ScoreField::Fours => "fours",
            ScoreField::Fives => "fives",
            ScoreField::Sixes => "sixes",
            ScoreField::ThreeOfAKind => "three_of_a_kind",
            ScoreField::FourOfAKind => "four_of_a_kind",
            ScoreField::FullHouse => "full_house",
            ScoreField::SmallStraight => "small_straight",
            ScoreField::LargeStraight => "large_straight",
            ScoreField::Kniffel => "kniffel",
            ScoreField::Chance => "chance",
        }
    }
}

impl fmt::Display for ScoreField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ScoreField {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ScoreField::ALL
            .into_iter()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| {
                DomainError::validation(
                    ValidationKind::Other("UnknownField".into()),
                    format!("unknown score field '{s}'"),
                )
            })
    }
}
