use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use msprobe_core::access::{ChipAccess, Detached};
use msprobe_core::config::StatusConfig;
use msprobe_core::decoder::{self, DEFAULT_DECODER};
use msprobe_core::image::MemoryImage;
use msprobe_core::{shutdown, sink, PollMode, ProbeError, ProbeResult};
use msprobe_utils::{format_from_env, info, init_logging, init_logging_with, warn, LogLevel};

/// Exit status when a single-shot read gets no data
const NO_DATA_EXIT: u8 = 1;

/// Report the video-signal status of a MacroSilicon capture chip.
#[derive(Parser, Debug)]
#[command(name = "msprobe")]
#[command(version)]
#[command(about = "Report the video-signal status of a MacroSilicon capture chip", long_about = None)]
struct Cli
{
    /// Log level (overrides RUST_LOG)
    #[arg(long, global = true, value_name = "LEVEL")]
    log_level: Option<LogLevel>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands
{
    /// Read the current signal status once or in a loop
    Status(StatusArgs),
    /// List the available decoders and how safe they are
    Decoders,
}

#[derive(Args, Debug)]
struct StatusArgs
{
    /// Decoder to read with (murderous, flaky [default], unknown, fazant, bertold, bertold_scaler)
    #[arg(long, value_name = "NAME")]
    region: Option<String>,
    /// Output JSON instead of the default list
    #[arg(long, default_value_t = false)]
    json: bool,
    /// Run in a loop, sleeping this many milliseconds after every read (0 reads once)
    #[arg(long = "loop", value_name = "MS", default_value_t = 0)]
    loop_ms: u64,
    /// Write each report atomically to this file instead of stdout
    #[arg(long, value_name = "PATH")]
    filename: Option<PathBuf>,
    /// Read chip RAM from this image file instead of a device
    #[arg(long, value_name = "PATH")]
    image: Option<PathBuf>,
}

fn main() -> ExitCode
{
    let cli = Cli::parse();

    // Logs go to stderr; stdout carries the reports
    let logging = match cli.log_level {
        Some(level) => format_from_env().and_then(|format| init_logging_with(Some(level), format)),
        None => init_logging(),
    };
    let _guard = match logging {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match cli.command {
        Commands::Status(args) => run_status(args),
        Commands::Decoders => {
            print_decoders();
            ExitCode::SUCCESS
        }
    }
}

fn run_status(args: StatusArgs) -> ExitCode
{
    let config = StatusConfig::resolve(args.region.as_deref(), args.json, args.loop_ms, args.filename);

    match poll(&config, args.image.as_deref()) {
        Ok(exit) => {
            info!(?exit, "done");
            ExitCode::SUCCESS
        }
        Err(ProbeError::NoData { decoder, source }) => {
            info!(decoder, error = %source, "single-shot read failed");
            eprintln!("Read nothing from the device, exiting");
            ExitCode::from(NO_DATA_EXIT)
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn poll(config: &StatusConfig, image: Option<&Path>) -> ProbeResult<msprobe_core::PollExit>
{
    let mut chip = open_backend(config, image)?;
    let mut sink = sink::open(config.destination.as_deref());
    let poller = config.poller();

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(ProbeError::Runtime)?;

    runtime.block_on(async {
        let (trigger, mut shutdown) = shutdown::channel();

        // Only loops listen for Ctrl-C; a single read keeps the default
        // behaviour so a hung device can still be interrupted
        if matches!(config.mode, PollMode::Every(_)) {
            tokio::spawn(async move {
                if tokio::signal::ctrl_c().await.is_ok() {
                    info!("interrupt received, stopping after the current read");
                    trigger.trigger();
                }
            });
        }

        poller.run(chip.as_mut(), sink.as_mut(), &mut shutdown).await
    })
}

fn open_backend(config: &StatusConfig, image: Option<&Path>) -> ProbeResult<Box<dyn ChipAccess>>
{
    match image {
        Some(path) => {
            info!(path = %path.display(), "reading chip RAM from image");
            let image = MemoryImage::open(path).map_err(|source| ProbeError::Backend {
                path: path.to_path_buf(),
                source,
            })?;
            Ok(Box::new(image))
        }
        None => {
            if config.decoder.name() != "fazant" {
                warn!(
                    decoder = config.decoder.name(),
                    "no device or image given, reads will return no data"
                );
            }
            Ok(Box::new(Detached))
        }
    }
}

fn print_decoders()
{
    for entry in decoder::REGISTRY {
        let name = if entry.name() == DEFAULT_DECODER.name() {
            format!("{} (default)", entry.name())
        } else {
            entry.name().to_string()
        };
        println!("{name:<20} {}", entry.safety());
    }
}
