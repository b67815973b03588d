//! Command-line front end
//!
//! Usage:
//!   stratum-pcm convert [OPTIONS] <input.wav> -o <out.h>
//!   stratum-pcm batch [--jobs N] --out-dir <dir> [OPTIONS] <file1.wav> <file2.wav> ...
//!
//! Options given on the command line override values from `--config`.

use std::path::PathBuf;
use std::time::Instant;

use clap::{Args, Parser, Subcommand};
use stratum_pcm::batch::{convert_batch, default_jobs, job_for_input};
use stratum_pcm::{convert_file, ConversionConfig, OutputFormat, QuantizePolicy};

#[derive(Parser)]
#[command(
    name = "stratum-pcm",
    version,
    about = "Convert WAV audio into fixed-point sample arrays for PWM/DAC playback"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Convert a single WAV file
    Convert {
        /// Input WAV file
        input: Option<PathBuf>,

        /// Output file (default: input name with the format's extension)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Generated array identifier
        #[arg(short = 'n', long)]
        name: Option<String>,

        #[command(flatten)]
        options: PipelineArgs,
    },

    /// Convert many WAV files in parallel, one output per input
    Batch {
        /// Input WAV files
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        /// Directory receiving `<stem>.<ext>` outputs
        #[arg(long)]
        out_dir: PathBuf,

        /// Parallel workers (default: CPU-1)
        #[arg(short, long)]
        jobs: Option<usize>,

        #[command(flatten)]
        options: PipelineArgs,
    },
}

#[derive(Args)]
struct PipelineArgs {
    /// JSON configuration file providing defaults
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Target sample rate in Hz
    #[arg(short, long)]
    rate: Option<u32>,

    /// Keep at most this many seconds
    #[arg(long)]
    max_duration: Option<f64>,

    /// Bits per output sample (1-32)
    #[arg(short, long)]
    bits: Option<u32>,

    /// Quantization policy: symmetric | minmax
    #[arg(short, long)]
    policy: Option<QuantizePolicy>,

    /// Output format: header | dec | hex | bin | csv
    #[arg(short, long)]
    format: Option<OutputFormat>,

    /// Emit one JSON object per converted file (JSONL)
    #[arg(long)]
    json: bool,
}

impl PipelineArgs {
    /// Load `--config` (or defaults) and apply command-line overrides
    fn base_config(&self) -> Result<ConversionConfig, Box<dyn std::error::Error>> {
        let mut config = match &self.config {
            Some(path) => ConversionConfig::from_json_file(path)?,
            None => ConversionConfig::default(),
        };

        if let Some(rate) = self.rate {
            config.pipeline.target_sample_rate = Some(rate);
        }
        if let Some(secs) = self.max_duration {
            config.pipeline.max_duration_secs = Some(secs);
        }
        if let Some(bits) = self.bits {
            config.pipeline.bit_depth = bits;
        }
        if let Some(policy) = self.policy {
            config.pipeline.policy = policy;
        }
        if let Some(format) = self.format {
            config.format = format;
        }
        Ok(config)
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let cli = Cli::parse();
    match cli.command {
        Command::Convert {
            input,
            output,
            name,
            options,
        } => {
            let mut config = options.base_config()?;
            if let Some(input) = input {
                config.input = input;
            }
            if let Some(name) = name {
                config.array_name = name;
            }
            if let Some(output) = output {
                config.output = output;
            } else if config.output.as_os_str().is_empty() {
                config.output = config.input.with_extension(config.format.extension());
            }

            let report = convert_file(&config)?;
            if options.json {
                println!("{}", serde_json::to_string(&report)?);
            } else {
                println!(
                    "{} -> {}: {} samples at {} Hz ({:.3} s), {}-bit {}, {:.2} ms",
                    report.input.display(),
                    report.output.display(),
                    report.metadata.sample_count,
                    report.metadata.sample_rate,
                    report.metadata.duration_seconds,
                    report.bit_depth,
                    report.policy,
                    report.processing_time_ms
                );
            }
        }

        Command::Batch {
            inputs,
            out_dir,
            jobs,
            options,
        } => {
            let template = options.base_config()?;
            let configs: Vec<ConversionConfig> = inputs
                .iter()
                .map(|input| job_for_input(&template, input, &out_dir))
                .collect();

            let jobs = jobs.unwrap_or_else(default_jobs);
            eprintln!("Batch: {} files, jobs={}", configs.len(), jobs);

            let t0 = Instant::now();
            let outcomes = convert_batch(&configs, jobs)?;
            let total = outcomes.len();
            let mut failed = 0usize;

            for (idx, outcome) in outcomes.iter().enumerate() {
                match &outcome.result {
                    Ok(report) if options.json => {
                        println!("{}", serde_json::to_string(report)?);
                    }
                    Ok(report) => {
                        println!(
                            "[{}/{}] {}: {} samples at {} Hz -> {}",
                            idx + 1,
                            total,
                            outcome.input.display(),
                            report.metadata.sample_count,
                            report.metadata.sample_rate,
                            report.output.display()
                        );
                    }
                    Err(e) => {
                        failed += 1;
                        if options.json {
                            println!(
                                "{}",
                                serde_json::json!({
                                    "file": outcome.input,
                                    "error": e.to_string(),
                                })
                            );
                        } else {
                            println!(
                                "[{}/{}] {}: ERROR: {}",
                                idx + 1,
                                total,
                                outcome.input.display(),
                                e
                            );
                        }
                    }
                }
            }

            eprintln!(
                "Done: ok={}/{} wall={:.0}ms",
                total - failed,
                total,
                t0.elapsed().as_secs_f64() * 1000.0
            );
            if failed > 0 {
                std::process::exit(1);
            }
        }
    }

    Ok(())
}
