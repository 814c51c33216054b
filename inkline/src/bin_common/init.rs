use std::path::Path;
use std::time::SystemTime;

use color_eyre::{
    config::{HookBuilder, Theme},
    eyre::{self, Context},
};

pub fn init_eyre() -> eyre::Result<()> {
    let theme = if std::io::IsTerminal::is_terminal(&std::io::stderr()) {
        Theme::dark()
    } else {
        Theme::new()
    };

    HookBuilder::default()
        .theme(theme)
        .install()
        .wrap_err("failed to install eyre hook")
}

/// Log level for a `-v` count: info, then debug, then trace.
pub fn verbosity_level(verbose: u8) -> log::LevelFilter {
    match verbose {
        0 => log::LevelFilter::Info,
        1 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    }
}

fn format_record(out: fern::FormatCallback, message: &std::fmt::Arguments, record: &log::Record) {
    out.finish(format_args!(
        "{} {:<5} [{}] {}",
        humantime::format_rfc3339_seconds(SystemTime::now()),
        record.level(),
        record.target(),
        message
    ))
}

pub fn init_logger(logfile: Option<&Path>, level: log::LevelFilter) -> eyre::Result<()> {
    let mut dispatch = fern::Dispatch::new()
        .level(level)
        .format(format_record)
        .chain(std::io::stderr());

    if let Some(logfile) = logfile {
        dispatch = dispatch.chain(
            fern::log_file(logfile)
                .wrap_err_with(|| format!("failed to open the log file at: {logfile:?}"))?,
        );
    }

    dispatch.apply().wrap_err("failed to set the logger")?;

    if let Some(logfile) = logfile {
        log::debug!("Logging to: {}", logfile.display());
    }
    Ok(())
}
