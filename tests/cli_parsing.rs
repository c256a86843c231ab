use std::path::PathBuf;

use clap::Parser;
use redraft::cli::commands::flow::FlowCommands;
use redraft::cli::{Cli, Commands};

#[test]
fn test_parse_humanize_defaults() {
    let cli = Cli::try_parse_from(["redraft", "humanize", "Some text."]).unwrap();
    assert!(!cli.json);
    match cli.command {
        Commands::Humanize(args) => {
            assert_eq!(args.text.as_deref(), Some("Some text."));
            assert_eq!(args.tone, "Neutral");
            assert_eq!(args.intensity, 50);
            assert!(args.file.is_none());
        }
        other => panic!("Wrong command: {other:?}"),
    }
}

#[test]
fn test_parse_humanize_options() {
    let cli = Cli::try_parse_from([
        "redraft",
        "humanize",
        "--file",
        "draft.txt",
        "--tone",
        "Friendly",
        "--intensity",
        "80",
        "--json",
    ])
    .unwrap();
    assert!(cli.json);
    match cli.command {
        Commands::Humanize(args) => {
            assert_eq!(args.file, Some(PathBuf::from("draft.txt")));
            assert_eq!(args.tone, "Friendly");
            assert_eq!(args.intensity, 80);
        }
        other => panic!("Wrong command: {other:?}"),
    }
}

#[test]
fn test_intensity_out_of_range_is_rejected() {
    assert!(Cli::try_parse_from(["redraft", "humanize", "x", "--intensity", "0"]).is_err());
    assert!(Cli::try_parse_from(["redraft", "humanize", "x", "--intensity", "101"]).is_err());
}

#[test]
fn test_text_and_file_conflict() {
    assert!(Cli::try_parse_from(["redraft", "detect", "inline", "--file", "a.txt"]).is_err());
}

#[test]
fn test_parse_detect_without_input() {
    let cli = Cli::try_parse_from(["redraft", "detect"]).unwrap();
    match cli.command {
        Commands::Detect(args) => {
            assert!(args.text.is_none());
            assert!(args.file.is_none());
        }
        other => panic!("Wrong command: {other:?}"),
    }
}

#[test]
fn test_parse_actions_with_global_flags() {
    let cli =
        Cli::try_parse_from(["redraft", "--config", "custom.yaml", "actions", "-j"]).unwrap();
    assert!(cli.json);
    assert_eq!(cli.config, Some(PathBuf::from("custom.yaml")));
    assert!(matches!(cli.command, Commands::Actions(_)));
}

#[test]
fn test_parse_flow_run() {
    let cli = Cli::try_parse_from(["redraft", "flow", "run", "plan.yaml"]).unwrap();
    match cli.command {
        Commands::Flow(args) => match args.command {
            FlowCommands::Run { plan } => assert_eq!(plan, PathBuf::from("plan.yaml")),
        },
        other => panic!("Wrong command: {other:?}"),
    }
}

#[test]
fn test_flow_run_requires_plan() {
    assert!(Cli::try_parse_from(["redraft", "flow", "run"]).is_err());
}

#[test]
fn test_unknown_command_is_rejected() {
    assert!(Cli::try_parse_from(["redraft", "teleport"]).is_err());
}
