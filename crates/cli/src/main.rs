use std::path::PathBuf;
use std::process;

use clap::Parser;

use facecam_core::capture::infrastructure::camera_factory::open_camera;
use facecam_core::display::infrastructure::window_factory::open_window;
use facecam_core::pipeline::capture_loop::{CaptureLoop, CaptureLoopConfig, LoopExit};
use facecam_core::pipeline::loop_logger::StdoutLoopLogger;
use facecam_core::pipeline::train_model_use_case::TrainModelUseCase;
use facecam_core::shared::constants::{CAMERA_INDEX, DEFAULT_SAMPLES_DIR, WINDOW_NAME};
use facecam_core::training::infrastructure::recognizer_factory::create_recognizer;
use facecam_core::training::infrastructure::sample_collector::SampleCollector;

/// Live face recognition: trains an eigenface model, then frames the camera
/// feed in red, yellow or green depending on how steadily the target
/// subject is recognized.
#[derive(Parser)]
#[command(name = "facecam", version)]
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

    let trainer = TrainModelUseCase::new(SampleCollector::default(), create_recognizer()?);
    let model = trainer.execute(&cli.samples)?;

    let source = open_camera(CAMERA_INDEX)?;
    let sink = open_window(WINDOW_NAME)?;

    let mut capture_loop = CaptureLoop::new(
        source,
        model,
        sink,
        Box::new(StdoutLoopLogger::default()),
        CaptureLoopConfig::default(),
    );
    match capture_loop.run()? {
        LoopExit::StopRequested => log::info!("Stopped by viewer"),
        LoopExit::Cancelled | LoopExit::AlreadyTerminated => log::info!("Capture stopped"),
    }
    Ok(())
}
