use hexapawn::{
    Error,
    hexapawn::{BoardState, Side, TerminalResult},
    menace::{MenaceAgent, Outcome, ReinforcementValues},
    pipeline::Session,
};

mod common;

use common::{board, mv};

fn agent(seed: u64, initial_beads: u32, reinforcement: ReinforcementValues) -> MenaceAgent {
    MenaceAgent::builder()
        .seed(seed)
        .initial_beads(initial_beads)
        .reinforcement(reinforcement)
        .build()
        .expect("agent configuration should be valid")
}

#[test]
fn loss_removes_exactly_one_bead_from_each_recorded_move() {
    let values = ReinforcementValues {
        win: 3,
        draw: 1,
        loss: -1,
    };
    let mut session = Session::with_agents(agent(1, 3, values), agent(2, 3, values));
    session.start_new_game().unwrap();
    let result = session.play_one_game().unwrap();

    let loser = match result.winner() {
        Some(winner) => winner.opponent(),
        None => panic!("hexapawn games always have a winner, got {result}"),
    };
    let agent = session.agent(loser).unwrap();

    assert_eq!(agent.stats().games_played, 1);
    assert_eq!(agent.stats().games_lost, 1);
    assert!(!agent.known_keys().is_empty());
    for matchbox in agent.matchboxes() {
        let lowered: Vec<u32> = matchbox
            .beads()
            .iter()
            .map(|&(_, beads)| beads)
            .filter(|&beads| beads != 3)
            .collect();
        assert_eq!(lowered, vec![2], "matchbox {}", matchbox.key());
    }
}

#[test]
fn win_adds_the_win_reinforcement_to_each_recorded_move() {
    let values = ReinforcementValues::default();
    let mut session = Session::with_agents(agent(5, 3, values), agent(6, 3, values));
    session.start_new_game().unwrap();
    let result = session.play_one_game().unwrap();

    let winner = result.winner().expect("game should have a winner");
    let agent = session.agent(winner).unwrap();
    assert_eq!(agent.stats().games_won, 1);
    for matchbox in agent.matchboxes() {
        let raised: Vec<u32> = matchbox
            .beads()
            .iter()
            .map(|&(_, beads)| beads)
            .filter(|&beads| beads != 3)
            .collect();
        assert_eq!(raised, vec![6]);
    }
}

#[test]
fn exhausted_matchbox_gives_every_legal_move_one_bead() {
    let values = ReinforcementValues {
        win: 3,
        draw: 1,
        loss: -5,
    };
    let mut agent = agent(9, 1, values);
    // Second to move with exactly two advances available
    let state = board("F../.../.SS S");
    let key = state.canonical_key();
    assert_eq!(state.legal_moves().len(), 2);

    for _ in 0..2 {
        agent.select_move(&state).unwrap();
        let report = agent.learn(TerminalResult::FirstWins, Side::Second).unwrap();
        assert_eq!(report.outcome, Outcome::Loss);
    }
    assert_eq!(agent.matchbox(&key).unwrap().total_beads(), 0);

    let chosen = agent.select_move(&state).unwrap();
    assert!(state.legal_moves().contains(&chosen));
    let matchbox = agent.matchbox(&key).unwrap();
    assert_eq!(matchbox.bead_count(mv("b3-b2")), Some(1));
    assert_eq!(matchbox.bead_count(mv("c3-c2")), Some(1));
}

#[test]
fn repeated_losses_keep_emptied_moves_at_zero() {
    let values = ReinforcementValues {
        win: 3,
        draw: 1,
        loss: -100,
    };
    let mut agent = agent(3, 3, values);
    let state = BoardState::initial();
    let key = state.canonical_key();
    let mut emptied = Vec::new();

    // Each loss empties the chosen move; emptied moves are never drawn again
    for _ in 0..state.legal_moves().len() {
        let chosen = agent.select_move(&state).unwrap();
        assert!(!emptied.contains(&chosen));
        agent.learn(TerminalResult::SecondWins, Side::First).unwrap();

        emptied.push(chosen);
        let matchbox = agent.matchbox(&key).unwrap();
        for &mv in &emptied {
            assert_eq!(matchbox.bead_count(mv), Some(0));
        }
    }
    assert_eq!(agent.matchbox(&key).unwrap().total_beads(), 0);

    // Learning again with nothing recorded leaves the box alone
    let report = agent.learn(TerminalResult::SecondWins, Side::First).unwrap();
    assert!(report.updated.is_empty());
    assert_eq!(agent.matchbox(&key).unwrap().total_beads(), 0);
}

#[test]
fn learning_from_unfinished_game_is_an_error() {
    let mut agent = MenaceAgent::new(Some(4)).unwrap();
    agent.select_move(&BoardState::initial()).unwrap();

    let err = agent
        .learn(TerminalResult::InProgress, Side::First)
        .unwrap_err();
    assert!(matches!(err, Error::GameNotFinished));
    assert_eq!(agent.history().len(), 1);
    assert_eq!(agent.total_beads(), 9);
}

#[test]
fn reset_learning_clears_state_but_keeps_configuration() {
    let values = ReinforcementValues {
        win: 2,
        draw: 0,
        loss: -2,
    };
    let mut session = Session::with_agents(agent(10, 4, values), agent(11, 4, values));
    session.train(20, |_| {}).unwrap();

    let agent = session.agent_mut(Side::Second).unwrap();
    assert!(!agent.known_keys().is_empty());
    assert_eq!(agent.stats().games_played, 20);

    agent.reset_learning();
    assert!(agent.known_keys().is_empty());
    assert!(agent.history().is_empty());
    assert_eq!(agent.stats().games_played, 0);
    assert_eq!(agent.total_beads(), 0);
    assert_eq!(agent.config().initial_beads, 4);
    assert_eq!(agent.reinforcement_values(), values);
    assert_eq!(agent.config().seed, Some(11));
}

#[test]
fn second_player_learns_to_win() {
    let mut session = Session::with_agents(
        MenaceAgent::new(Some(100)).unwrap(),
        MenaceAgent::new(Some(101)).unwrap(),
    );
    let report = session.train(1000, |_| {}).unwrap();

    assert_eq!(report.total_games, 1000);
    assert_eq!(report.draws, 0);
    assert!(
        report.recent_win_rate(Side::Second, 100) > report.recent_win_rate(Side::First, 100),
        "second should dominate late in training: {:.2}",
        report.recent_win_rate(Side::Second, 100)
    );
}
