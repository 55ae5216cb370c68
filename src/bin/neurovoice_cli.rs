use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use neurovoice::analysis::features::FeatureExtractor;
use neurovoice::audio::Preprocessor;
use neurovoice::config::AppConfig;
use neurovoice::error::ErrorCode;
use neurovoice::{AppContext, SubjectInfo};

#[derive(Parser, Debug)]
#[command(
    name = "neurovoice_cli",
    about = "Voice biomarker analysis for Parkinson's indicator screening"
)]
struct Cli {
    /// Override path to the JSON config file
    #[arg(long)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Analyze a WAV recording and print the full prediction report
    Analyze {
        /// Path to the WAV recording
        #[arg(long)]
        audio: PathBuf,
        /// Override path to the model artifact
        #[arg(long)]
        model: Option<PathBuf>,
        /// Subject name, echoed in the report
        #[arg(long, default_value = "")]
        name: String,
        /// Subject age, echoed in the report
        #[arg(long, default_value = "")]
        age: String,
        /// Subject gender, echoed in the report
        #[arg(long, default_value = "")]
        gender: String,
        /// Write the JSON report to a file instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Extract and print the acoustic features without classifying
    Features {
        /// Path to the WAV recording
        #[arg(long)]
        audio: PathBuf,
    },
    /// Report service health and whether the model artifact loads
    Health {
        /// Override path to the model artifact
        #[arg(long)]
        model: Option<PathBuf>,
    },
}

fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(err) => {
            eprintln!("Error: {err:?}");
            ExitCode::from(1)
        }
    }
}

fn run() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = cli
        .config
        .as_deref()
        .map(AppConfig::load_from_file)
        .unwrap_or_default();

    match cli.command {
        Commands::Analyze {
            audio,
            model,
            name,
            age,
            gender,
            output,
        } => {
            let subject = SubjectInfo { name, age, gender };
            run_analyze(config, &audio, model, subject, output)
        }
        Commands::Features { audio } => run_features(&config, &audio),
        Commands::Health { model } => run_health(config, model),
    }
}

fn run_analyze(
    mut config: AppConfig,
    audio: &Path,
    model_override: Option<PathBuf>,
    subject: SubjectInfo,
    output: Option<PathBuf>,
) -> Result<ExitCode> {
    if let Some(path) = model_override {
        config.model_path = path.display().to_string();
    }
    let ctx = AppContext::new(config);

    let (samples, sample_rate) =
        read_wav(audio).with_context(|| format!("reading {}", audio.display()))?;
    check_duration(&samples, sample_rate, ctx.config().audio.max_duration_secs)?;

    match ctx.analyze(samples, sample_rate, subject) {
        Ok(response) => {
            let json = serde_json::to_string_pretty(&response)?;
            if let Some(path) = output {
                fs::write(&path, json).with_context(|| format!("writing {}", path.display()))?;
            } else {
                println!("{json}");
            }
            Ok(ExitCode::from(0))
        }
        Err(err) => {
            eprintln!("{err}");
            // Error codes are in the 2001-2004 range; fold into a small,
            // stable exit code per failure kind.
            Ok(ExitCode::from((err.code() - 2000) as u8 + 10))
        }
    }
}

fn run_features(config: &AppConfig, audio: &Path) -> Result<ExitCode> {
    let (samples, sample_rate) =
        read_wav(audio).with_context(|| format!("reading {}", audio.display()))?;
    check_duration(&samples, sample_rate, config.audio.max_duration_secs)?;

    let buffer = Preprocessor::preprocess(samples, sample_rate)?;
    let features = FeatureExtractor::for_signal(buffer.samples.len()).extract(&buffer)?;

    println!("{}", serde_json::to_string_pretty(&features)?);
    Ok(ExitCode::from(0))
}

fn run_health(mut config: AppConfig, model_override: Option<PathBuf>) -> Result<ExitCode> {
    if let Some(path) = model_override {
        config.model_path = path.display().to_string();
    }
    let ctx = AppContext::new(config);
    println!("{}", serde_json::to_string_pretty(&ctx.health())?);
    Ok(ExitCode::from(0))
}

/// Reject recordings longer than the configured cap before analysis.
fn check_duration(samples: &[f32], sample_rate: u32, max_secs: f32) -> Result<()> {
    let duration = samples.len() as f32 / sample_rate.max(1) as f32;
    anyhow::ensure!(
        duration <= max_secs,
        "recording is {:.1} s, longer than the {:.1} s limit",
        duration,
        max_secs
    );
    Ok(())
}

/// Decode a WAV file to mono f32 samples.
///
/// Multi-channel recordings are down-mixed by averaging; integer sample
/// formats are scaled to [-1, 1].
fn read_wav(path: &Path) -> Result<(Vec<f32>, u32)> {
    let mut reader = hound::WavReader::open(path)?;
    let spec = reader.spec();
    let channels = spec.channels.max(1) as usize;

    let interleaved: Vec<f32> = match spec.sample_format {
        hound::SampleFormat::Float => reader
            .samples::<f32>()
            .collect::<std::result::Result<_, _>>()?,
        hound::SampleFormat::Int => {
            let max = (1i64 << (spec.bits_per_sample - 1)) as f32;
            reader
                .samples::<i32>()
                .map(|s| s.map(|v| v as f32 / max))
                .collect::<std::result::Result<_, _>>()?
        }
    };

    let mono: Vec<f32> = if channels == 1 {
        interleaved
    } else {
        interleaved
            .chunks_exact(channels)
            .map(|frame| frame.iter().sum::<f32>() / channels as f32)
            .collect()
    };

    Ok((mono, spec.sample_rate))
}
