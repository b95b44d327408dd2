use mockito::{Server, ServerGuard};
use ranking_pdf::api::{ApiConfig, TournamentApi};
use ranking_pdf::fonts::FontSource;
use ranking_pdf::report::Progress;
use ranking_pdf::{Error, FetchError, RankingReport, RankingStyle, RenderError};

fn report_for(server: &ServerGuard, output: &std::path::Path) -> RankingReport {
    let api = TournamentApi::with_config(&ApiConfig::new(server.url())).unwrap();
    RankingReport::new(api).with_output_path(output)
}

#[test]
fn failed_details_request_skips_ranking_and_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("ranking.pdf");
    let mut server = Server::new();
    server
        .mock("GET", "/tournaments/7")
        .with_status(503)
        .create();
    let ranking = server
        .mock("GET", "/tournaments/7/ranking")
        .expect(0)
        .create();

    let mut seen = Vec::new();
    let err = report_for(&server, &output)
        .run("7", |progress| seen.push(format!("{progress:?}")))
        .unwrap_err();

    ranking.assert();
    assert!(matches!(err, Error::Fetch(FetchError::Status { status: 503, .. })), "{err}");
    assert_eq!(seen, vec!["FetchingDetails"]);
    assert!(!output.exists());
}

#[test]
fn failed_ranking_request_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("ranking.pdf");
    let mut server = Server::new();
    server
        .mock("GET", "/tournaments/7")
        .with_status(200)
        .with_body(r#"{"name": "Spring Open"}"#)
        .create();
    server
        .mock("GET", "/tournaments/7/ranking")
        .with_status(403)
        .create();

    let mut names = Vec::new();
    let err = report_for(&server, &output)
        .run("7", |progress| {
            if let Progress::FetchingRanking { tournament_name } = progress {
                names.push(tournament_name.to_owned());
            }
        })
        .unwrap_err();

    assert_eq!(names, vec!["Spring Open"]);
    assert!(matches!(err, Error::Fetch(FetchError::Status { status: 403, .. })), "{err}");
    assert!(!output.exists());
}

#[test]
fn missing_fonts_abort_after_fetching() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("ranking.pdf");
    let mut server = Server::new();
    server
        .mock("GET", "/tournaments/3")
        .with_status(200)
        .with_body("{}")
        .create();
    server
        .mock("GET", "/tournaments/3/ranking")
        .with_status(200)
        .with_body(r#"[{"player": {"name": "Alice"}, "total_points": 1}]"#)
        .create();

    let style = RankingStyle::detailed().with_fonts(FontSource::Directory(dir.path().join("none")));
    let err = report_for(&server, &output)
        .with_style(style)
        .run("3", |_| {})
        .unwrap_err();

    assert!(matches!(err, Error::Render(RenderError::ResourceLoad(_))), "{err}");
    assert!(!output.exists());
}

#[test]
fn exports_ranking_when_fonts_are_available() {
    if !FontSource::Search.is_available() {
        eprintln!(
            "Skipping exports_ranking_when_fonts_are_available: DejaVu Sans not found. Set RANKING_PDF_FONTS_DIR or copy the fonts to assets/fonts."
        );
        return;
    }

    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("spring.pdf");
    let mut server = Server::new();
    server
        .mock("GET", "/tournaments/12")
        .with_status(200)
        .with_body(r#"{"name": "Spring Open"}"#)
        .create();
    server
        .mock("GET", "/tournaments/12/ranking")
        .with_status(200)
        .with_body(
            r#"[{"player":{"name":"Alice"},"total_points":120},{"player":{"name":"Bob"},"total_points":95}]"#,
        )
        .create();

    let summary = report_for(&server, &output).run("12", |_| {}).unwrap();

    assert_eq!(summary.tournament_name, "Spring Open");
    assert_eq!(summary.output_path, output);
    assert_eq!(summary.table_rows, 3);
    let bytes = std::fs::read(&output).unwrap();
    assert!(bytes.starts_with(b"%PDF"));
}
