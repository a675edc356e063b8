use std::path::PathBuf;
use std::process;

use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;

use facecam_core::pipeline::self_test_use_case::SelfTestUseCase;
use facecam_core::shared::constants::DEFAULT_SAMPLES_DIR;
use facecam_core::training::infrastructure::recognizer_factory::create_recognizer;
use facecam_core::training::infrastructure::sample_collector::SampleCollector;

/// Recognizer self-test: holds out one random sample, trains on the rest and
/// reports whether the held-out face is recognized.
#[derive(Parser)]
#[command(name = "facecam-selftest", version)]
struct Cli {
    /// Training sample root, laid out as `<root>/s<label>/*.pgm`.
    #[arg(default_value = DEFAULT_SAMPLES_DIR)]
    samples: PathBuf,
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let samples = SampleCollector::default().collect(&cli.samples)?;
    log::info!(
        "Collected {} samples of {} subjects",
        samples.len(),
        samples.distinct_labels().len()
    );

    let use_case = SelfTestUseCase::new(create_recognizer()?);
    let report = use_case.execute(samples, &mut StdRng::from_entropy())?;

    println!(
        "held out sample #{} (label {}), trained on {}, predicted {}: {}",
        report.held_out_index,
        report.expected,
        report.training_samples,
        report.predicted,
        if report.passed() { "pass" } else { "FAIL" }
    );
    Ok(())
}
