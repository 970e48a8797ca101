//! Property tests for line detection over arbitrary boards.

use photobingo_core::*;
use proptest::prelude::*;

const FREE: CellIndex = 40;

fn uploadable_cells() -> impl Strategy<Value = Vec<CellIndex>> {
    prop::collection::vec((0..81u16).prop_filter("free cell", |&index| index != FREE), 0..120)
}

fn any_cells() -> impl Strategy<Value = Vec<CellIndex>> {
    prop::collection::vec(0..81u16, 0..120)
}

fn board(indices: &[CellIndex]) -> OccupiedSet {
    OccupiedSet::from_indices(BoardConfig::STANDARD, indices.iter().copied()).unwrap()
}

proptest! {
    #[test]
    fn compute_lines_is_deterministic(cells in uploadable_cells()) {
        let engine = WinEngine::standard();
        let occupied = board(&cells);

        prop_assert_eq!(engine.compute_lines(&occupied), engine.compute_lines(&occupied));
    }

    #[test]
    fn adding_cells_never_loses_lines(cells in uploadable_cells()) {
        let engine = WinEngine::standard();
        let mut occupied = OccupiedSet::new(BoardConfig::STANDARD);
        let mut previous = 0;

        for index in cells {
            occupied.insert(index).unwrap();
            let report = engine.compute_lines(&occupied);
            prop_assert!(report.line_count >= previous);
            previous = report.line_count;
        }
    }

    #[test]
    fn blackout_only_when_every_other_cell_is_filled(cells in uploadable_cells()) {
        let engine = WinEngine::standard();
        let occupied = board(&cells);

        prop_assert_eq!(engine.is_blackout(&occupied), occupied.len() == 80);
    }

    #[test]
    fn covered_cells_come_from_completed_lines(cells in uploadable_cells()) {
        let engine = WinEngine::standard();
        let occupied = board(&cells);
        let report = engine.compute_lines(&occupied);

        for index in &report.covered {
            prop_assert!(*index == FREE || occupied.contains(*index));
        }
        prop_assert_eq!(report.covered.is_empty(), report.line_count == 0);
    }

    #[test]
    fn free_cell_never_changes_the_result(cells in any_cells()) {
        let engine = WinEngine::standard();
        let with_free = board(&cells);
        let without_free: Vec<CellIndex> =
            cells.iter().copied().filter(|&index| index != FREE).collect();

        prop_assert!(!with_free.contains(FREE));
        prop_assert_eq!(
            engine.compute_lines(&with_free),
            engine.compute_lines(&board(&without_free))
        );
    }

    #[test]
    fn interactive_milestone_never_goes_down(cells in uploadable_cells()) {
        let engine = WinEngine::standard();
        let mut occupied = OccupiedSet::new(BoardConfig::STANDARD);
        let mut milestone = MilestoneState::default();
        let mut last_celebrated = Tier::Playing;

        for index in cells {
            occupied.insert(index).unwrap();
            let result = engine.evaluate(&occupied, milestone, EvaluationMode::Interactive);
            let acknowledged = result.milestone.acknowledged_line_count;
            prop_assert!(acknowledged >= milestone.acknowledged_line_count);
            if let Some(celebration) = result.celebration {
                prop_assert!(celebration.tier > last_celebrated);
                last_celebrated = celebration.tier;
            }
            milestone = result.milestone;
        }
    }
}

#[test]
fn blackout_matches_all_but_free_cell() {
    let engine = WinEngine::standard();
    let all_but_free: Vec<CellIndex> = (0..81).filter(|&index| index != FREE).collect();
    let every_cell: Vec<CellIndex> = (0..81).collect();

    assert!(engine.is_blackout(&board(&all_but_free)));
    assert!(engine.is_blackout(&board(&every_cell)));
    assert!(!engine.is_blackout(&board(&all_but_free[1..])));
}

#[test]
fn scenarios_reach_expected_tiers() {
    let engine = WinEngine::standard();
    let cases: [(Vec<CellIndex>, CellCount, Tier); 5] = [
        ((0..9).collect(), 1, Tier::SustainStart),
        (vec![36, 37, 38, 39, 41, 42, 43, 44], 1, Tier::SustainStart),
        ((0..27).collect(), 3, Tier::Bingo),
        ((0..54).collect(), 6, Tier::AdvancedSustain),
        ((0..81).collect(), 20, Tier::Champion),
    ];

    for (cells, lines, tier) in cases {
        let status = engine.status(&board(&cells));
        assert_eq!(status.line_count, lines);
        assert_eq!(status.tier, tier);
    }
}

#[test]
fn reload_then_upload_follows_ratchet() {
    let engine = WinEngine::standard();
    // rows 0..=4 stored from an earlier visit
    let stored: Vec<CellIndex> = (0..45).collect();
    let (mut session, reload) = GameSession::restore(
        engine,
        board(&stored),
        MilestoneState::default(),
        SessionState::Active,
    )
    .unwrap();
    assert_eq!(reload.celebration, None);
    assert_eq!(reload.milestone.acknowledged_line_count, 5);

    for index in 45..53 {
        assert_eq!(session.upload(index).unwrap().celebration, None);
    }
    let sixth = session.upload(53).unwrap();
    assert_eq!(sixth.celebration.map(|c| c.tier), Some(Tier::AdvancedSustain));
}
