use std::path::Path;

use super::*;

#[test]
fn parses_evidence_command() {
    let cli = Cli::try_parse_from(["sitepulse", "evidence", "job.json"]).expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Commands::Evidence { ref job } if job == Path::new("job.json")
    ));
}

#[test]
fn parses_health_with_stored_snapshot() {
    let cli = Cli::try_parse_from(["sitepulse", "health", "job.json", "--stored", "snap.json"])
        .expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Commands::Health { stored: Some(ref p), .. } if p == Path::new("snap.json")
    ));
}

#[test]
fn parses_audit_without_options() {
    let cli = Cli::try_parse_from(["sitepulse", "audit", "job.json"]).expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Commands::Audit {
            stored: None,
            issues: None,
            ..
        }
    ));
}

#[test]
fn job_path_is_required() {
    assert!(Cli::try_parse_from(["sitepulse", "backlog"]).is_err());
}

#[test]
fn subcommand_is_required() {
    assert!(Cli::try_parse_from(["sitepulse"]).is_err());
}
