use crate::domain::derivation::summarize_sheet;
use crate::domain::test_sheet_helpers::{make_sheet, n, pid, with_chance};
use crate::domain::{ChanceRank, ScoreField, ScoreValue};

#[test]
fn chance_ranks_flag_ties_at_the_top_and_the_minimum() {
    let mut sheet = make_sheet(&["a", "b", "c", "d"]);
    with_chance(&mut sheet, "a", n(10));
    with_chance(&mut sheet, "b", n(20));
    with_chance(&mut sheet, "c", n(20));

    let summaries = summarize_sheet(&sheet);

    assert_eq!(summaries[&pid("a")].chance_rank, Some(ChanceRank::Lowest));
    assert_eq!(summaries[&pid("b")].chance_rank, Some(ChanceRank::Highest));
    assert_eq!(summaries[&pid("c")].chance_rank, Some(ChanceRank::Highest));
    assert_eq!(summaries[&pid("d")].chance_rank, None);
}

#[test]
fn single_filled_chance_is_not_ranked() {
    let mut sheet = make_sheet(&["a", "b", "c"]);
    with_chance(&mut sheet, "b", n(24));

    let summaries = summarize_sheet(&sheet);
    assert!(summaries.values().all(|s| s.chance_rank.is_none()));
}

#[test]
fn identical_chance_values_are_all_highest() {
    let mut sheet = make_sheet(&["a", "b", "c"]);
    with_chance(&mut sheet, "a", n(17));
    with_chance(&mut sheet, "b", n(17));

    let summaries = summarize_sheet(&sheet);
    assert_eq!(summaries[&pid("a")].chance_rank, Some(ChanceRank::Highest));
    assert_eq!(summaries[&pid("b")].chance_rank, Some(ChanceRank::Highest));
    assert_eq!(summaries[&pid("c")].chance_rank, None);
}

#[test]
fn strokes_do_not_take_part_in_chance_ranking() {
    let mut sheet = make_sheet(&["a", "b", "c"]);
    with_chance(&mut sheet, "a", n(12));
    with_chance(&mut sheet, "b", ScoreValue::Stroke);
    with_chance(&mut sheet, "c", n(25));

    let summaries = summarize_sheet(&sheet);
    assert_eq!(summaries[&pid("a")].chance_rank, Some(ChanceRank::Lowest));
    assert_eq!(summaries[&pid("b")].chance_rank, None);
    assert_eq!(summaries[&pid("c")].chance_rank, Some(ChanceRank::Highest));
}

#[test]
fn middle_values_get_no_flag() {
    let mut sheet = make_sheet(&["a", "b", "c"]);
    with_chance(&mut sheet, "a", n(12));
    with_chance(&mut sheet, "b", n(19));
    with_chance(&mut sheet, "c", n(25));

    let summaries = summarize_sheet(&sheet);
    assert_eq!(summaries[&pid("b")].chance_rank, None);
}

#[test]
fn top_combination_flag_is_per_player() {
    let mut sheet = make_sheet(&["a", "b"]);
    sheet
        .put_cell(&pid("a"), ScoreField::Kniffel, n(50))
        .unwrap();
    sheet
        .put_cell(&pid("b"), ScoreField::Kniffel, ScoreValue::Stroke)
        .unwrap();

    let summaries = summarize_sheet(&sheet);
    assert!(summaries[&pid("a")].top_combination);
    assert!(!summaries[&pid("b")].top_combination);
}
