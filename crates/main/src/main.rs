use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::error::ErrorKind;
use clap::Parser;
use ranking_pdf::report::Progress;
use ranking_pdf::{RankingReport, TournamentApi, DEFAULT_OUTPUT_PATH};

/// Renders the ranking of a Mahjong Tracker tournament to a PDF table.
///
/// DejaVu Sans (`DejaVuSans.ttf` and `DejaVuSans-Bold.ttf`) must be available under
/// `assets/fonts`, in the working directory, in a system font directory, or in the directory
/// named by `RANKING_PDF_FONTS_DIR`.
#[derive(Parser)]
#[command(author, version, about)]
struct Cli {
    /// Identifier of the tournament on mahjongtracker.com.
    tournament_id: String,

    /// Where to write the PDF.
    #[arg(short, long, default_value = DEFAULT_OUTPUT_PATH)]
    output: PathBuf,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            err.exit()
        }
        Err(err) => {
            eprint!("{err}");
            return ExitCode::from(1);
        }
    };

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {}", err);
            print_error_sources(err.as_ref());
            ExitCode::from(1)
        }
    }
}

fn run(cli: &Cli) -> Result<(), Box<dyn Error>> {
    let report = RankingReport::new(TournamentApi::new()?).with_output_path(&cli.output);

    let summary = report.run(&cli.tournament_id, |progress| match progress {
        Progress::FetchingDetails => println!("Fetching tournament details..."),
        Progress::FetchingRanking { tournament_name } => {
            println!("Fetching ranking for {}...", tournament_name)
        }
        Progress::Rendering { entries } => log::info!("Rendering {} entries", entries),
    })?;

    println!("PDF generated: {}", summary.output_path.display());
    Ok(())
}

fn print_error_sources(mut error: &(dyn Error + 'static)) {
    while let Some(source) = error.source() {
        eprintln!("  caused by: {}", source);
        error = source;
    }
}
