// Slash command flow without a terminal: route, give feedback, document, export

use anyhow::Result;
use clinic_router::cli::{handle_command, Command, Workbench};
use clinic_router::config::Config;
use clinic_router::feedback::{ClinicianJudgment, Verdict};
use clinic_router::patient::PrimaryConcern;
use clinic_router::InvalidInput;
use tempfile::TempDir;

fn run(bench: &mut Workbench, config: &Config, input: &str) -> Result<String> {
    let command = Command::parse(input).unwrap_or_else(|| panic!("command should parse: {}", input));
    handle_command(command, bench, config)
}

#[test]
fn test_full_session_flow() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let config = Config {
        export_dir: temp_dir.path().to_path_buf(),
        ..Config::default()
    };
    let mut bench = Workbench::new();

    let output = run(&mut bench, &config, "/route 7 adhd")?;
    assert!(output.contains("DBP - Developmental & Behavioral Pediatrics"));
    assert!(run(&mut bench, &config, "/agree")?.contains("Match confirmed (case 1)"));

    run(&mut bench, &config, "/route 13 autism depression, suicidal ideation -- recent ED visit")?;
    let output = run(&mut bench, &config, "/disagree triage Needs a same-day crisis call")?;
    assert!(output.contains("Needs triage call"));

    run(&mut bench, &config, "/edge Autism with new psychosis | No rule covers it | Sent to PPC")?;

    let log = bench.log();
    assert_eq!(log.len(), 2);
    assert_eq!(log.records()[1].verdict, Verdict::Disagree);
    assert_eq!(log.records()[1].clinician_judgment, ClinicianJudgment::TriageCall);
    assert_eq!(log.records()[1].case_notes.as_deref(), Some("recent ED visit"));
    assert_eq!(log.edge_cases().len(), 1);

    let summary = run(&mut bench, &config, "/summary")?;
    assert!(summary.contains("50.0% (1/2 cases)"));

    assert!(bench.has_unexported());
    let output = run(&mut bench, &config, "/export")?;
    assert!(output.contains("Session exported to"));
    assert!(!bench.has_unexported());

    assert_eq!(std::fs::read_dir(temp_dir.path())?.count(), 1);

    Ok(())
}

#[test]
fn test_invalid_route_is_rejected() {
    let mut bench = Workbench::new();
    let config = Config::default();

    let err = run(&mut bench, &config, "/route 30 adhd").unwrap_err();
    assert!(matches!(
        err.downcast_ref::<InvalidInput>(),
        Some(InvalidInput::AgeOutOfRange { age: 30, .. })
    ));

    let err = run(&mut bench, &config, "/route 8 adhd gout").unwrap_err();
    assert!(err.downcast_ref::<InvalidInput>().is_some());

    assert!(bench.pending().is_none());
    assert_eq!(bench.log().len(), 0);
}

#[test]
fn test_export_with_nothing_collected() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let mut bench = Workbench::new();
    let config = Config::default();

    let input = format!("/export {}", temp_dir.path().display());
    let output = run(&mut bench, &config, &input)?;
    assert!(output.starts_with("No data collected yet"));
    assert_eq!(std::fs::read_dir(temp_dir.path())?.count(), 0);

    Ok(())
}

#[test]
fn test_edge_case_without_description() {
    let mut bench = Workbench::new();
    let config = Config::default();
    assert!(Command::parse("/edge   ").is_none());

    let err = handle_command(
        Command::Edge {
            description: " ".to_string(),
            challenge: "x".to_string(),
            decision: None,
        },
        &mut bench,
        &config,
    )
    .unwrap_err();
    assert!(err.to_string().contains("edge case description must not be empty"));
}

#[test]
fn test_route_accepts_multi_word_concern_labels() -> Result<()> {
    let config = Config::default();
    let mut bench = Workbench::new();

    run(&mut bench, &config, "/route 8 ADHD Only")?;
    let pending = bench.pending().expect("case should be pending");
    assert_eq!(pending.decision.rule, "adhd");

    run(&mut bench, &config, "/route 13 Autism Spectrum depression")?;
    let pending = bench.pending().expect("case should be pending");
    assert_eq!(pending.decision.rule, "autism-with-mood");
    assert_eq!(pending.case.comorbidities().len(), 1);

    run(&mut bench, &config, "/route 6 Developmental Delay -- parent concerned about speech")?;
    let pending = bench.pending().expect("case should be pending");
    assert_eq!(pending.case.primary_concern(), PrimaryConcern::DevelopmentalDelay);
    assert_eq!(pending.decision.rule, "fallback");
    assert_eq!(pending.notes.as_deref(), Some("parent concerned about speech"));

    Ok(())
}

#[test]
fn test_export_with_only_edge_cases() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let mut bench = Workbench::new();
    let config = Config::default();

    run(&mut bench, &config, "/edge Genetic syndrome with regression | Fits no clinic cleanly")?;
    assert!(bench.log().is_empty());
    assert!(bench.log().has_data());

    let input = format!("/export {}", temp_dir.path().display());
    let output = run(&mut bench, &config, &input)?;
    assert!(output.contains("Session exported to"));
    assert_eq!(std::fs::read_dir(temp_dir.path())?.count(), 1);

    Ok(())
}
