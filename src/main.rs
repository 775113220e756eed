//! Kuchipaku demo - plays a clip and animates a character rig headlessly.
//!
//! The "rig" is an in-memory recording model, so the demo runs anywhere
//! with an audio output device and prints what a renderer would have
//! been told to do.

use std::f32::consts::TAU;
use std::time::{Duration, Instant};

use clap::Parser;

use kuchipaku::animation::{AnimationController, FramePacer};
use kuchipaku::audio::{decode_wav, AudioTransport, LoudnessAnalyzer};
use kuchipaku::cli::Args;
use kuchipaku::expression::Expression;
use kuchipaku::model::{param_ids, Model, RecordingModel};
use kuchipaku::stage;
use kuchipaku::{KuchipakuError, Result};

/// Seconds the simulated pointer takes for one lap of the stage
const POINTER_LAP_SECS: f32 = 8.0;

fn main() {
    env_logger::init();

    let args = Args::parse();
    if let Err(e) = run(args) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<()> {
    println!("Kuchipaku - audio-reactive character animator");

    let bytes = load_audio_bytes(&args)?;
    let audio = decode_wav(&bytes)?;
    println!(
        "Audio: {:.1}s @ {}Hz",
        audio.duration_secs(),
        audio.sample_rate_hz
    );

    let transport = AudioTransport::play(audio)?;
    transport.wait_ready(Duration::from_secs(2))?;

    let mut analyzer = LoudnessAnalyzer::new(args.analyzer_config())?;
    analyzer.attach(&transport.tap());

    let mut model = RecordingModel::standard(2048.0, 2048.0);
    let stage_config = args.stage_config();
    let placement = stage::fit(model.width(), model.height(), &stage_config);
    println!(
        "Stage: {}x{} (model scale {:.2})",
        placement.surface_width, placement.surface_height, placement.scale
    );

    if let Some(path) = &args.expression {
        let expression = Expression::load(path)?;
        let applied = expression.apply(&mut model);
        println!("Expression: {} ({applied} parameters)", path.display());
    }

    let mut controller = AnimationController::new(args.animator_config())?;
    controller.start(&mut model);

    let mut pacer = FramePacer::new(stage_config.target_fps);
    let started = Instant::now();
    let mut peak_mouth: f32 = 0.0;
    let mut frames = 0u64;

    while !transport.has_ended() {
        let dt = pacer.pace();
        let now = started.elapsed();

        if args.tracking {
            // Simulated pointer: slow laps around the stage
            let theta = now.as_secs_f32() * TAU / POINTER_LAP_SECS;
            let x = stage_config.width as f32 * (0.5 + 0.5 * theta.cos());
            let y = stage_config.height as f32 * (0.5 + 0.5 * theta.sin());
            controller.pointer_moved(
                x,
                y,
                (stage_config.width as f32, stage_config.height as f32),
            );
        }

        let volume = if transport.is_paused() {
            0.0
        } else {
            analyzer.volume()
        };
        controller.tick(now, dt, volume, &mut model);

        peak_mouth = peak_mouth.max(controller.drivers().mouth_open);
        frames += 1;
    }

    controller.stop();
    analyzer.detach();

    let eye_writes = model.writes_for(param_ids::EYE_L_OPEN);
    let blinks = eye_writes
        .windows(2)
        .filter(|w| w[0] == 1.0 && w[1] == 0.0)
        .count();

    println!(
        "\nDone: {frames} frames, {} parameter writes",
        model.write_count()
    );
    println!("Peak mouth openness: {peak_mouth:.2}, blinks: {blinks}");
    Ok(())
}

fn load_audio_bytes(args: &Args) -> Result<Vec<u8>> {
    if let Some(text) = &args.speak {
        #[cfg(feature = "tts")]
        {
            println!("Synthesizing {} chars via {}", text.len(), args.tts_endpoint);
            return kuchipaku::tts::TtsClient::new(&args.tts_endpoint).synthesize(text);
        }
        #[cfg(not(feature = "tts"))]
        {
            let _ = text;
            return Err(KuchipakuError::InvalidConfig {
                reason: "--speak requires building with the `tts` feature".to_string(),
            });
        }
    }

    match &args.audio {
        Some(path) => Ok(std::fs::read(path)?),
        None => Err(KuchipakuError::InvalidConfig {
            reason: "provide an AUDIO file or --speak TEXT".to_string(),
        }),
    }
}
