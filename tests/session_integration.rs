//! Game session integration tests

use dugout::core::config::{load_config, EngineConfig};
use dugout::core::error::DugoutError;
use dugout::core::types::Side;
use dugout::engine::{Strategy, StrategySide};
use dugout::game::GameSession;
use dugout::narrative::{
    CoachAdviceFacts, MoundVisitFacts, NarrativeProvider, NarrativeRequest, PlayFacts,
    TemplateNarrator,
};
use dugout::player::{load_team, Team};
use std::path::PathBuf;

fn data_path(relative: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data").join(relative)
}

fn teams() -> (Team, Team) {
    let home = load_team(&data_path("teams/home.json")).unwrap();
    let away = load_team(&data_path("teams/away.json")).unwrap();
    (home, away)
}

fn seeded(seed: u64) -> EngineConfig {
    let mut config = EngineConfig::default();
    config.game.seed = Some(seed);
    config
}

#[test]
fn test_sample_data_loads() {
    let (home, away) = teams();
    assert!(home.batters.len() >= 9);
    assert!(away.pitchers.len() >= 2);

    let config = load_config(&data_path("engine.toml")).unwrap();
    assert_eq!(config.game.start_inning, 7);
    assert_eq!(config.triggers.fatigue_threshold, 75.0);
}

#[test]
fn test_same_seed_replays_identically() {
    let (home, away) = teams();
    let play = |seed| {
        let mut session = GameSession::new(&home, &away, seeded(seed)).unwrap();
        session.play_out(|_| None, true).unwrap();
        session
            .play_log()
            .iter()
            .map(|r| (r.batter_name.clone(), r.outcome, r.pitches))
            .collect::<Vec<_>>()
    };

    assert_eq!(play(2024), play(2024));
}

#[test]
fn test_many_games_finish_with_consistent_box_scores() {
    let (home, away) = teams();
    for seed in 0..25 {
        let mut session = GameSession::new(&home, &away, seeded(seed)).unwrap();
        let plate_appearances = session.play_out(|_| None, true).unwrap();

        assert!(session.is_over());
        let state = session.state();
        assert_ne!(state.home_score, state.away_score);
        assert!(state.inning >= 9);

        let box_score = session.box_score();
        assert_eq!(box_score.teams.home.runs, state.home_score);
        assert_eq!(box_score.teams.away.runs, state.away_score);
        assert_eq!(session.play_log().len(), plate_appearances);

        let charged: u32 = session.play_log().iter().map(|r| r.pitches).sum();
        assert_eq!(
            box_score.teams.home.pitches_thrown + box_score.teams.away.pitches_thrown,
            charged
        );
    }
}

#[test]
fn test_strategies_flow_into_the_log() {
    let (home, away) = teams();
    let mut session = GameSession::new(&home, &away, seeded(7)).unwrap();

    // Top of the inning: the home club pitches
    let report = session.play_at_bat(Some(Strategy::IntentionalWalk)).unwrap();
    assert_eq!(report.strategy, Some(Strategy::IntentionalWalk));
    assert_eq!(report.outcome, dugout::engine::AtBatOutcome::Walk);
    assert!(report.snapshot.runners[0]);
}

#[test]
fn test_relief_resets_the_mound() {
    let (home, away) = teams();
    let mut session = GameSession::new(&home, &away, seeded(11)).unwrap();
    for _ in 0..2 {
        session.play_at_bat(None).unwrap();
    }
    let starter = session.club(Side::Home).pitcher.name.clone();
    let pen_before = session.club(Side::Home).bullpen.len();

    let reliever = session.change_pitcher(Side::Home, 0).unwrap().name.clone();
    assert_ne!(reliever, starter);
    assert_eq!(session.state().pitches(Side::Home), 0);
    assert_eq!(session.club(Side::Home).bullpen.len(), pen_before - 1);
    assert_eq!(session.current_counters().runs_allowed, 0);

    let pitchers = &session.box_score().teams.home.pitchers;
    assert_eq!(pitchers.last(), Some(&reliever));

    assert!(matches!(
        session.change_pitcher(Side::Home, 99),
        Err(DugoutError::PlayerNotFound(_))
    ));
}

#[test]
fn test_bad_config_is_rejected() {
    let (home, away) = teams();
    let mut config = EngineConfig::default();
    config.game.min_pitches_per_at_bat = 7;
    assert!(matches!(
        GameSession::new(&home, &away, config),
        Err(DugoutError::InvalidConfig(_))
    ));

    assert!(EngineConfig::from_toml_str("[game]\nstart_inning = 0\n").is_err());
}

#[test]
fn test_templates_narrate_a_whole_game() {
    let (home, away) = teams();
    let narrator = TemplateNarrator::new(3);
    let mut session = GameSession::new(&home, &away, seeded(5)).unwrap();

    let advice = narrator
        .render(&NarrativeRequest::CoachAdvice(CoachAdviceFacts::from_session(
            &session,
            Side::Home,
        )))
        .unwrap();
    assert!(advice.contains("[Recommendation]"));

    let facts = CoachAdviceFacts::from_session(&session, Side::Home);
    assert_eq!(facts.side, StrategySide::Pitching);

    while !session.is_over() {
        let report = session.play_at_bat(None).unwrap();
        let text = narrator
            .render(&NarrativeRequest::Commentary(PlayFacts::from_report(&report)))
            .unwrap();
        assert!(!text.is_empty());

        if !report.mound_visit.is_empty() {
            let visit = MoundVisitFacts::from_session(&session, report.mound_visit.clone());
            let dialogue = narrator.render(&NarrativeRequest::MoundVisit(visit)).unwrap();
            assert_eq!(dialogue.lines().count(), 3);
        }
    }
}
