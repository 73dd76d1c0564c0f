use crate::cli::{Cli, Commands, JobArgs};
use ffbatch::engine::worker::{BatchWorker, WorkerMessage, run_batch};
use ffbatch::engine::{self, CancelToken, EncoderCommand, Job, Preset, SizeCap};
use ffbatch::{config, logging, ui};
use std::path::PathBuf;
use std::process;

fn current_dir() -> PathBuf {
    std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
}

fn resolve_encoder(cli_path: Option<&PathBuf>, config: &config::Config) -> EncoderCommand {
    let explicit = cli_path.or(config.encoder.path.as_ref());
    engine::resolve_encoder(explicit.map(PathBuf::as_path))
}

fn job_settings(args: &JobArgs, config: &config::Config) -> (Preset, SizeCap) {
    (
        args.preset.unwrap_or(config.defaults.preset),
        SizeCap::from_megabytes(args.size.unwrap_or(config.defaults.size_cap_mb)),
    )
}

fn init_logging(config: &config::Config) {
    if !config.logging.enabled {
        return;
    }
    let result = config.log_path().and_then(|path| {
        logging::init_file_logging(&path, logging::parse_level(&config.logging.level))
    });
    if let Err(e) = result {
        eprintln!("Warning: logging disabled: {:#}", e);
    }
}

pub fn run(cli: Cli) {
    let config = match config::Config::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Warning: {:#}", e);
            eprintln!("Using built-in defaults.");
            config::Config::default()
        }
    };
    init_logging(&config);

    let encoder = resolve_encoder(cli.ffmpeg.as_ref(), &config);
    tracing::info!(encoder = %encoder.program.display(), "encoder resolved");

    if let Some(command) = cli.command {
        match command {
            Commands::CheckFfmpeg => handle_check_ffmpeg(&encoder),
            Commands::Scan { directory, job } => handle_scan(directory, &job, &config),
            Commands::DryRun { directory, job } => {
                handle_dry_run(directory, &job, &config, &encoder)
            }
            Commands::Convert {
                directory,
                job,
                overwrite,
            } => handle_convert(
                directory,
                &job,
                overwrite || config.defaults.overwrite,
                &config,
                encoder,
            ),
            Commands::InitConfig => handle_init_config(),
        }
        return;
    }

    // Launch TUI (default behavior)
    let options = ui::UiOptions {
        folder: cli.directory,
        preset: cli.preset.unwrap_or(config.defaults.preset),
        size_cap_mb: cli.size.unwrap_or(config.defaults.size_cap_mb),
        overwrite: config.defaults.overwrite,
    };
    let worker = BatchWorker::new(encoder, config.defaults.interrupt_on_stop);

    if let Err(e) = ui::run_ui(worker, options) {
        eprintln!("Error running UI: {}", e);
        process::exit(1);
    }
}

fn handle_check_ffmpeg(encoder: &EncoderCommand) {
    println!("Encoder: {}", encoder.program.display());
    match engine::encoder_version(encoder) {
        Ok(version) => {
            println!("Found: {}", version);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("Error: {:#}", e);
            process::exit(1);
        }
    }
}

fn handle_scan(directory: Option<PathBuf>, args: &JobArgs, config: &config::Config) {
    let dir = directory.unwrap_or_else(current_dir);
    let (preset, _) = job_settings(args, config);
    println!("Scanning folder: {}", dir.display());

    match engine::scan_folder(&dir, preset) {
        Ok(tasks) => {
            for task in &tasks {
                println!(
                    "- {} -> {}",
                    task.input_path.display(),
                    task.output_path.display()
                );
            }
            println!("Total files: {}", tasks.len());
        }
        Err(e) => {
            eprintln!("Error scanning folder: {:#}", e);
            process::exit(1);
        }
    }
}

fn handle_dry_run(
    directory: Option<PathBuf>,
    args: &JobArgs,
    config: &config::Config,
    encoder: &EncoderCommand,
) {
    let dir = directory.unwrap_or_else(current_dir);
    let (preset, size_cap) = job_settings(args, config);
    println!("Dry run: building encoder commands for {}", dir.display());

    let job = Job::new(dir.clone(), preset, size_cap).with_overwrite(config.defaults.overwrite);
    match engine::scan_folder(&dir, preset) {
        Ok(tasks) => {
            for task in &tasks {
                let cmd = engine::build_encoder_cmd(encoder, &job, task);
                println!("{}", engine::format_cmd(&cmd));
            }
        }
        Err(e) => {
            eprintln!("Error scanning folder: {:#}", e);
            process::exit(1);
        }
    }
}

fn handle_convert(
    directory: PathBuf,
    args: &JobArgs,
    overwrite: bool,
    config: &config::Config,
    encoder: EncoderCommand,
) {
    if !directory.is_dir() {
        eprintln!("Error: {} is not a directory", directory.display());
        process::exit(1);
    }

    let (preset, size_cap) = job_settings(args, config);
    let job = Job::new(directory, preset, size_cap).with_overwrite(overwrite);

    let mut last_percent = None;
    let summary = run_batch(
        &job,
        &encoder,
        &CancelToken::new(),
        config.defaults.interrupt_on_stop,
        |msg| match msg {
            WorkerMessage::Log { line, .. } => println!("{}", line),
            WorkerMessage::Progress { percent, .. } => {
                if last_percent != Some(percent) {
                    println!("Progress: {}%", percent);
                    last_percent = Some(percent);
                }
            }
            WorkerMessage::Finished { .. } => {}
        },
    );

    println!("Conversion finished: {}", summary);
    if summary.failed > 0 {
        process::exit(2);
    }
}

fn handle_init_config() {
    match config::Config::config_path() {
        Ok(path) if path.exists() => match config::Config::load_from(&path) {
            Ok(cfg) => {
                println!("Config loaded successfully from {}", path.display());
                println!("{:#?}", cfg);
            }
            Err(e) => {
                eprintln!("Config at {} is invalid: {:#}", path.display(), e);
                process::exit(1);
            }
        },
        Ok(path) => {
            println!("No config at {}", path.display());
            println!("Creating default config...");
            if let Err(err) = config::Config::default().save() {
                eprintln!("Failed to save default config: {:#}", err);
                process::exit(1);
            }
            println!("Default config saved to {}", path.display());
        }
        Err(e) => {
            eprintln!("Error: {:#}", e);
            process::exit(1);
        }
    }
}
