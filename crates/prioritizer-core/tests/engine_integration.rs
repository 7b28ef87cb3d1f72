//! End-to-end tests for the scoring pipeline.

use task_prioritizer_core::{
    compose_output, evaluate, map_symbols, normalize_rating, parse_ratings, parse_tags,
    score_category, EngineConfig, EngineError, Mode, ProfileLoader, Rating, ScoreSet, SymbolSet,
    Tag, TaskLog, WeightConfig,
};
use chrono::Utc;
use tempfile::TempDir;

#[test]
fn test_impact_end_to_end_three_stars() {
    // L=3, Conf=2, G=3 with equal weights
    let impact: Vec<f64> = [3u8, 2, 3]
        .iter()
        .map(|r| normalize_rating(*r).unwrap())
        .collect();
    assert_eq!(impact, vec![1.0, 0.6, 1.0]);

    let score = score_category(&impact, &[1.0, 1.0, 1.0]).unwrap();
    assert!((score - 0.8667).abs() < 1e-4);

    let mut config = EngineConfig::default();
    config.weights = WeightConfig::equal();
    let scores = ScoreSet {
        impact: score,
        urgency: 0.0,
        execution: 0.0,
    };
    let symbols = map_symbols(&scores, Rating::NONE, Rating::NONE, &config);
    assert_eq!(symbols.impact, config.symbols.star.repeat(3));
}

#[test]
fn test_full_evaluation_with_equal_weights() {
    let mut config = EngineConfig::default();
    config.weights = WeightConfig::equal();

    // L,Conf,G,P,D,C,T,R,F,S,Pl
    let ratings = parse_ratings("3,2,3,3,0,1,1,1,1,2,3").unwrap();
    let eval = evaluate("{p1:00}{P:Code} write", &ratings, &config).unwrap();

    let s = &config.symbols;
    assert_eq!(eval.symbols.impact, s.star.repeat(3));
    // (1.0 + 0.0) / 2 = 0.5, inclusive
    assert_eq!(eval.symbols.urgency, s.urgent);
    // 0.3 across the board
    assert_eq!(eval.symbols.execution, s.easy);
    assert_eq!(eval.symbols.surprise, s.surprise);
    assert_eq!(eval.symbols.planned, s.planned);

    let expected = format!(
        "{}{}{}{}{}{{p1:00}}{{P:Code}} write",
        s.star.repeat(3),
        s.urgent,
        s.easy,
        s.surprise,
        s.planned
    );
    assert_eq!(eval.output, expected);
    assert_eq!(eval.estimated_minutes, None);
    assert_eq!(eval.minutes(), Some(60));
}

#[test]
fn test_default_weights_demo_ratings() {
    let config = EngineConfig::default();
    let ratings = parse_ratings(&config.demo.ratings).unwrap();
    let eval = evaluate(&config.demo.task, &ratings, &config).unwrap();

    // impact: 0.6 all round -> 0.6 -> two stars
    assert!((eval.scores.impact - 0.6).abs() < 1e-9);
    assert_eq!(eval.symbols.impact, config.symbols.star.repeat(2));
    // urgency: 0.3 -> calm
    assert_eq!(eval.symbols.urgency, config.symbols.calm);
    // execution: 0.3*0.4 + 0.3*0.3 + 0.3*0.2 + 0.6*0.1 = 0.33 -> easy
    assert!((eval.scores.execution - 0.33).abs() < 1e-9);
    assert_eq!(eval.symbols.execution, config.symbols.easy);
    assert_eq!(eval.estimated_minutes, Some(70));
}

#[test]
fn test_reparse_annotated_output() {
    let config = EngineConfig::default();
    let ratings = parse_ratings("3,3,3,0,0,2,_,2,0,0,3").unwrap();
    let first = evaluate("{p0:45}{P:Web}{ctx:desk} ship the form", &ratings, &config).unwrap();

    // Scoring the annotated line again keeps tags and description
    let second = evaluate(&first.output, &ratings, &config).unwrap();
    assert_eq!(second.task, first.task);
    assert_eq!(second.output, first.output);
}

#[test]
fn test_compose_then_parse_roundtrip() {
    let tags = vec![Tag::new("P", "Code"), Tag::new("area", "ops")];
    let output = compose_output(&SymbolSet::default(), Some(130), &tags, "rotate keys");
    let parsed = parse_tags(&output).unwrap();
    assert_eq!(parsed.planned_minutes, Some(130));
    assert_eq!(parsed.tags, tags);
    assert_eq!(parsed.description, "rotate keys");
}

#[test]
fn test_user_errors_are_typed() {
    let config = EngineConfig::default();

    assert!(matches!(
        parse_ratings("3,2,1"),
        Err(EngineError::RatingCount { found: 3 })
    ));
    assert!(matches!(
        parse_ratings("3,2,1,1,2,1,1,1,0,2,9"),
        Err(EngineError::InvalidRating { .. })
    ));

    let ratings = parse_ratings("1,1,1,1,1,1,1,1,1,1,1").unwrap();
    let err = evaluate("{p0:5} typo", &ratings, &config).unwrap_err();
    assert!(matches!(err, EngineError::MalformedTimeTag { .. }));
    assert!(err.is_recoverable());
}

#[test]
fn test_profile_to_log_workflow() {
    let project = TempDir::new().unwrap();
    let data = TempDir::new().unwrap();
    let log_path = data.path().join("tasks.jsonl");
    std::fs::write(
        project.path().join(".env.focus"),
        format!(
            "WEIGHT_URGENCY_PRIORITY=1\nWEIGHT_URGENCY_DEADLINE=0\nLOG_FILE={}\n",
            log_path.display()
        ),
    )
    .unwrap();

    let profile = ProfileLoader::new(project.path(), data.path())
        .load(Some("focus"))
        .unwrap();
    let ratings = parse_ratings("1,1,1,2,0,1,1,1,1,1,1").unwrap();
    let eval = evaluate("call the bank", &ratings, &profile.config).unwrap();
    // Only priority counts: 0.6 -> urgent
    assert!((eval.scores.urgency - 0.6).abs() < 1e-9);
    assert_eq!(eval.symbols.urgency, profile.config.symbols.urgent);

    let log = TaskLog::for_config(&profile.config).unwrap();
    let record = eval.log_record(Utc::now(), Mode::Inline, profile.name.as_deref());
    log.append(&record).unwrap();

    let records = log.read_all().unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].profile.as_deref(), Some("focus"));
    assert_eq!(records[0].output, eval.output);
}
