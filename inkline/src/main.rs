use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};
use color_eyre::eyre::{self, Context};
use inkline::batch::process_directory;
use inkline::bin_common::args::SettingsArgs;
use inkline::bin_common::init::{init_eyre, init_logger, verbosity_level};
use inkline::split::{SplitMode, split_page};

#[derive(Parser, Debug)]
#[command(version)]
/// Split scanned script pages into cropped line images.
///
/// This uses rayon for batches, so the `RAYON_NUM_THREADS` environment
/// variable might be of interest.
struct Cli {
    /// Also write the log to this file
    #[arg(long, global = true)]
    logfile: Option<PathBuf>,

    /// More log output, repeat for even more
    #[arg(long, short = 'v', action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Split one page image into line images
    Split {
        /// The page image
        image: PathBuf,

        /// Where to write the line images
        #[arg(long, short = 'o', default_value = ".")]
        outdir: PathBuf,

        /// Extract from the source colors instead of the binarized page
        #[arg(long)]
        direct: bool,

        #[command(flatten)]
        settings: SettingsArgs,
    },

    /// Split every page in a directory, keeping ink colors on a
    /// transparent background
    Batch {
        /// Directory with page images
        input: PathBuf,

        /// Directory to write one sub-directory of lines per page into
        output: PathBuf,

        #[command(flatten)]
        settings: SettingsArgs,
    },
}

fn main() -> eyre::Result<()> {
    init_eyre()?;
    let cli = Cli::parse();
    init_logger(cli.logfile.as_deref(), verbosity_level(cli.verbose))?;
    log::debug!("CLI arguments: {cli:#?}");

    match cli.command {
        Command::Split {
            image,
            outdir,
            direct,
            settings,
        } => {
            let settings = settings.to_settings();
            settings.validate().wrap_err("invalid settings")?;
            let mode = if direct {
                SplitMode::Direct
            } else {
                SplitMode::Cleaned
            };

            let report = split_page(&image, &outdir, &settings, mode)
                .wrap_err_with(|| format!("failed to split {:?}", image))?;
            if let Some(threshold) = report.threshold {
                log::info!("Ink threshold: {threshold}");
            }
            println!(
                "Found {} lines. Output: {}",
                report.files.len(),
                outdir.display()
            );
        }
        Command::Batch {
            input,
            output,
            settings,
        } => {
            let settings = settings.to_settings();
            settings.validate().wrap_err("invalid settings")?;

            let summary = process_directory(&input, &output, &settings)
                .wrap_err_with(|| format!("batch over {:?} failed", input))?;
            if summary.failed > 0 {
                log::warn!("{} pages were skipped", summary.failed);
            }
            println!("{summary}");
            println!("Output: {}", output.display());
        }
    }

    Ok(())
}
