use serde::{Deserialize, Serialize};

use crate::domain::fields::ScoreField;
use crate::domain::score_value::ScoreValue;

/// One player's column: the 13 raw cells. Derived figures live in `derivation`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct KniffelScores {
    pub ones: ScoreValue,
    pub twos: ScoreValue,
    pub threes: ScoreValue,
    pub fours: ScoreValue,
    pub fives: ScoreValue,
    pub sixes: ScoreValue,
    pub three_of_a_kind: ScoreValue,
    pub four_of_a_kind: ScoreValue,
    pub full_house: ScoreValue,
    pub small_straight: ScoreValue,
    pub large_straight: ScoreValue,
    pub kniffel: ScoreValue,
    pub chance: ScoreValue,
}

impl KniffelScores {
    pub fn get(&self, field: ScoreField) -> ScoreValue {
        match field {
            ScoreField::Ones => self.ones,
            ScoreField::Twos => self.twos,
            ScoreField::Threes => self.threes,
            ScoreField::Fours => self.fours,
            ScoreField::Fives => self.fives,
            ScoreField::Sixes => self.sixes,
            ScoreField::ThreeOfAKind => self.three_of_a_kind,
            ScoreField::FourOfAKind => self.four_of_a_kind,
            ScoreField::FullHouse => self.full_house,
            ScoreField::SmallStraight => self.small_straight,
            ScoreField::LargeStraight => self.large_straight,
            ScoreField::Kniffel => self.kniffel,
            ScoreField::Chance => self.chance,
        }
    }

    fn cell_mut(&mut self, field: ScoreField) -> &mut ScoreValue {
        match field {
            ScoreField::Ones => &mut self.ones,
            ScoreField::Twos => &mut self.twos,
            ScoreField::Threes => &mut self.threes,
            ScoreField::Fours => &mut self.fours,
            ScoreField::Fives => &mut self.fives,
            ScoreField::Sixes => &mut self.sixes,
            ScoreField::ThreeOfAKind => &mut self.three_of_a_kind,
            ScoreField::FourOfAKind => &mut self.four_of_a_kind,
            ScoreField::FullHouse => &mut self.full_house,
            ScoreField::SmallStraight => &mut self.small_straight,
            ScoreField::LargeStraight => &mut self.large_straight,
            ScoreField::Kniffel => &mut self.kniffel,
            ScoreField::Chance => &mut self.chance,
        }
    }

    /// Replace a cell, returning the previous value.
    ///
    /// No validation happens here; callers go through `entry::apply_edit`.
    pub fn set(&mut self, field: ScoreField, value: ScoreValue) -> ScoreValue {
        std::mem::replace(self.cell_mut(field), value)
    }

    /// Cells in sheet order.
    pub fn iter(&self) -> impl Iterator<Item = (ScoreField, ScoreValue)> + '_ {
        ScoreField::ALL.into_iter().map(move |field| (field, self.get(field)))
    }

    /// Builder-style helper, mostly for fixtures.
    pub fn with(mut self, field: ScoreField, value: ScoreValue) -> Self {
        self.set(field, value);
        self
    }
}
