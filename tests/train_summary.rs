use clap::Parser;
use hexapawn::cli::commands::train::{TrainArgs, execute};
use tempfile::tempdir;

fn parse_args<I, T>(args: I) -> TrainArgs
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    TrainArgs::parse_from(args)
}

#[test]
fn train_writes_summary_curve_and_observations() {
    let tmp = tempdir().unwrap();
    let summary = tmp.path().join("summary.json");
    let curve = tmp.path().join("curve.csv");
    let observations = tmp.path().join("games.jsonl");

    let args = parse_args([
        "hexapawn-train",
        "--games",
        "12",
        "--seed",
        "3",
        "--no-progress",
        "--summary",
        summary.to_str().unwrap(),
        "--curve",
        curve.to_str().unwrap(),
        "--observations",
        observations.to_str().unwrap(),
    ]);
    execute(args).expect("training should succeed");

    let contents = std::fs::read_to_string(&summary).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&contents).unwrap();
    assert_eq!(parsed["total_games"], 12);
    assert_eq!(parsed["draws"], 0);
    assert_eq!(parsed["config"]["seed"], 3);
    assert_eq!(parsed["second"]["games_played"], 12);

    let curve_text = std::fs::read_to_string(&curve).unwrap();
    assert_eq!(curve_text.lines().count(), 13);

    let log = std::fs::read_to_string(&observations).unwrap();
    let games: Vec<serde_json::Value> = log
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    assert_eq!(games.len(), 12);
    for game in &games {
        let steps = game["steps"].as_array().unwrap();
        assert_eq!(game["total_moves"].as_u64().unwrap() as usize, steps.len());
        assert!(steps.iter().all(|step| step["weights_after"].is_array()));
    }
}

#[test]
fn summary_without_extension_appends_json() {
    let tmp = tempdir().unwrap();
    let summary_stem = tmp.path().join("run_overview");

    let args = parse_args([
        "hexapawn-train",
        "--games",
        "5",
        "--no-progress",
        "--summary",
        summary_stem.to_str().unwrap(),
    ]);
    execute(args).expect("training with summary should succeed");

    let expected_path = summary_stem.with_extension("json");
    assert!(
        expected_path.exists(),
        "expected summary at {}",
        expected_path.display()
    );
}

#[test]
fn summary_directory_argument_creates_default_file() {
    let tmp = tempdir().unwrap();
    let summary_dir = tmp.path().join("summaries");
    let summary_arg = format!("{}/", summary_dir.display());

    let args = parse_args([
        "hexapawn-train",
        "--games",
        "3",
        "--no-progress",
        "--summary",
        &summary_arg,
    ]);
    execute(args).expect("training with directory summary should succeed");

    let expected_path = summary_dir.join("training_summary.json");
    let contents = std::fs::read_to_string(&expected_path).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&contents).unwrap();
    assert_eq!(parsed["total_games"], 3);
}

#[test]
fn config_file_values_are_overridden_by_flags() {
    let tmp = tempdir().unwrap();
    let config_path = tmp.path().join("session.json");
    std::fs::write(
        &config_path,
        r#"{ "games": 40, "seed": 9, "second": { "initial_beads": 5 } }"#,
    )
    .unwrap();

    let args = parse_args([
        "hexapawn-train",
        "--config",
        config_path.to_str().unwrap(),
        "--games",
        "7",
    ]);
    let config = args.session_config().unwrap();
    assert_eq!(config.games, 7);
    assert_eq!(config.seed, Some(9));
    assert_eq!(config.second.initial_beads, 5);
    assert_eq!(config.first.initial_beads, 3);
}

#[test]
fn unreadable_config_is_an_error() {
    let tmp = tempdir().unwrap();
    let args = parse_args([
        "hexapawn-train",
        "--config",
        tmp.path().join("missing.json").to_str().unwrap(),
    ]);
    assert!(execute(args).is_err());
}
