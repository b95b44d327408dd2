use std::process::Command;

fn ranking_pdf_command() -> Command {
    Command::new(env!("CARGO_BIN_EXE_ranking-pdf"))
}

#[test]
fn missing_tournament_id_prints_usage_and_exits_with_one() {
    let dir = tempfile::tempdir().unwrap();
    let output = ranking_pdf_command()
        .current_dir(dir.path())
        .output()
        .expect("run ranking-pdf");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.starts_with("error:"), "stderr was: {stderr}");
    assert!(stderr.contains("Usage:"), "stderr was: {stderr}");
    assert!(stderr.contains("<TOURNAMENT_ID>"), "stderr was: {stderr}");
    assert!(output.stdout.is_empty(), "nothing should be fetched");
    assert!(!dir.path().join("ranking.pdf").exists());
}

#[test]
fn help_exits_successfully() {
    let output = ranking_pdf_command().arg("--help").output().expect("run ranking-pdf");

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("--output"), "stdout was: {stdout}");
}
