use hexapawn::{
    Error,
    hexapawn::{BoardState, Coord, Side, TerminalResult},
};
use rand::{SeedableRng, rngs::StdRng};

mod common;

use common::{board, mv, random_playout};

#[test]
fn opening_offers_three_advances() {
    let state = BoardState::initial();
    let legal: Vec<String> = state.legal_moves().iter().map(ToString::to_string).collect();

    assert_eq!(legal, vec!["a1-a2", "b1-b2", "c1-c2"]);
    assert_eq!(state.to_move(), Side::First);
    assert_eq!(state.result(), TerminalResult::InProgress);
    assert_eq!(state.canonical_key().as_str(), "FFF...SSS_F");
}

#[test]
fn reaching_the_far_row_wins() {
    // First pawn on a2 with Second's pawns out of the way
    let state = board("..F/F../.SS F");
    let next = state.apply(mv("a2-a3")).unwrap();

    assert_eq!(next.result(), TerminalResult::FirstWins);
    assert_eq!(next.winner(), Some(Side::First));
    assert!(next.legal_moves().is_empty());
    assert!(matches!(next.apply(mv("b3-b2")), Err(Error::GameOver)));
}

#[test]
fn second_wins_on_its_goal_row() {
    let state = board("FFF/S../..S S");
    let next = state.apply(mv("a2xb1")).unwrap();
    assert_eq!(next.result(), TerminalResult::SecondWins);
}

#[test]
fn side_without_moves_loses() {
    // First's lone pawn is blocked head-on after Second advances
    let state = board("F../.../S.. S");
    let next = state.apply(mv("a3-a2")).unwrap();

    assert_eq!(next.to_move(), Side::First);
    assert_eq!(next.result(), TerminalResult::SecondWins);
}

#[test]
fn capturing_the_last_pawn_wins() {
    let state = board("..F/.S./... F");
    let next = state.apply(mv("c1xb2")).unwrap();
    assert_eq!(next.pawn_count(Side::Second), 0);
    assert_eq!(next.result(), TerminalResult::FirstWins);
}

#[test]
fn illegal_moves_are_rejected() {
    let state = BoardState::initial();
    for text in ["a1-a3", "a1xb2", "a3-a2", "b1-a2"] {
        let err = state.apply(mv(text)).unwrap_err();
        assert!(
            matches!(err, Error::IllegalMove { .. }),
            "{text} should be illegal, got {err}"
        );
    }
}

#[test]
fn apply_is_deterministic_and_leaves_input_untouched() {
    let state = BoardState::initial();
    let copy = state;
    let a = state.apply(mv("b1-b2")).unwrap();
    let b = state.apply(mv("b1-b2")).unwrap();

    assert_eq!(a, b);
    assert_eq!(state, copy);
    assert_eq!(a.canonical_key().as_str(), "F.F.F.SSS_S");
}

#[test]
fn legal_moves_start_on_own_pawns_and_stay_on_board() {
    let mut rng = StdRng::seed_from_u64(11);
    for _ in 0..200 {
        let mut state = BoardState::initial();
        while !state.is_terminal() {
            let mover = state.to_move();
            let legal = state.legal_moves();
            for candidate in &legal {
                assert_eq!(state.side_at(candidate.from()), mover);
                assert_ne!(state.side_at(candidate.to()), mover);
                assert!(Coord::is_valid(
                    candidate.to().row() as isize,
                    candidate.to().col() as isize
                ));
                let step = candidate.to().row() as isize - candidate.from().row() as isize;
                assert_eq!(step, mover.forward());
            }
            let (next, _) = random_playout(state, &mut rng);
            assert!(next.is_terminal());
            state = state.apply(legal[0]).unwrap();
        }
    }
}

#[test]
fn random_self_play_never_draws() {
    let mut rng = StdRng::seed_from_u64(2024);
    for _ in 0..1000 {
        let (end, moves) = random_playout(BoardState::initial(), &mut rng);
        assert!(end.is_terminal());
        assert_ne!(end.result(), TerminalResult::Draw);
        assert!(end.winner().is_some());
        assert!(moves >= 3);
    }
}

#[test]
fn key_distinguishes_side_to_move() {
    let first = board("F../.S./... F");
    let second = board("F../.S./... S");
    assert_eq!(first.encode(), second.encode());
    assert_ne!(first.canonical_key(), second.canonical_key());
}

#[test]
fn board_round_trips_through_its_key() {
    let state = BoardState::initial().apply(mv("c1-c2")).unwrap();
    let key = state.canonical_key();
    assert_eq!(key.state().unwrap(), state);
}

#[test]
fn capture_opens_a_path_to_the_goal_line() {
    // First pawns on a1 and b2, Second pawns on a3 and c3, Second to move
    let state = board("F../.F./S.S S");
    assert!(!state.is_terminal());

    let state = state.apply(mv("a3xb2")).unwrap();
    assert!(!state.is_terminal());
    assert_eq!(state.pawn_count(Side::First), 1);

    let state = state.apply(mv("a1-a2")).unwrap();
    assert!(!state.is_terminal());

    let state = state.apply(mv("b2-b1")).unwrap();
    assert_eq!(state.result(), TerminalResult::SecondWins);
}
