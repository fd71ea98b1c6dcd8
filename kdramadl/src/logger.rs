use chrono::{SecondsFormat, Utc};
use colored::{ColoredString, Colorize};
use log::{Level, LevelFilter, Log, Metadata, Record};
use std::{
    fmt,
    fs::{File, OpenOptions},
    io::{self, Write},
    path::Path,
    sync::Mutex,
};

/// Console logger with an optional append-only file sink.
///
/// Every component receives a `&Logger` instead of going through the global `log` facade.
/// The file sink records everything, the console only what passes `level`.
pub struct Logger {
    level: LevelFilter,
    file: Option<Mutex<File>>,
}

impl Logger {
    pub fn new(verbose: bool, log_file: Option<&Path>) -> io::Result<Self> {
        let file = match log_file {
            Some(path) => Some(Mutex::new(
                OpenOptions::new().create(true).append(true).open(path)?,
            )),
            None => None,
        };

        Ok(Self {
            level: if verbose {
                LevelFilter::Debug
            } else {
                LevelFilter::Info
            },
            file,
        })
    }

    /// A logger that writes nowhere.
    pub fn silent() -> Self {
        Self {
            level: LevelFilter::Off,
            file: None,
        }
    }

    #[cfg(test)]
    pub fn level(&self) -> LevelFilter {
        self.level
    }

    pub fn verbose(&self) -> bool {
        self.level >= LevelFilter::Debug
    }

    pub fn debug(&self, message: impl fmt::Display) {
        self.emit(Level::Debug, message);
    }

    pub fn info(&self, message: impl fmt::Display) {
        self.emit(Level::Info, message);
    }

    pub fn warn(&self, message: impl fmt::Display) {
        self.emit(Level::Warn, message);
    }

    pub fn error(&self, message: impl fmt::Display) {
        self.emit(Level::Error, message);
    }

    /// Writes `message` to the file sink only, for messages already shown on the console.
    pub fn to_file(&self, level: Level, message: impl fmt::Display) {
        self.write_file(
            &Record::builder()
                .level(level)
                .target(env!("CARGO_PKG_NAME"))
                .args(format_args!("{}", message))
                .build(),
        );
    }

    fn emit(&self, level: Level, message: impl fmt::Display) {
        self.log(
            &Record::builder()
                .level(level)
                .target(env!("CARGO_PKG_NAME"))
                .args(format_args!("{}", message))
                .build(),
        );
    }

    fn write_file(&self, record: &Record) {
        let Some(file) = &self.file else {
            return;
        };

        let Ok(mut file) = file.lock() else {
            return;
        };

        let line = format!(
            "{} {} ‣ {}",
            Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
            record.level(),
            record.args()
        );

        let result = if line.ends_with('\n') {
            file.write_all(line.as_bytes())
        } else {
            writeln!(file, "{}", line)
        };

        if let Err(e) = result {
            eprintln!("{} {}", label(Level::Error), e);
        }
    }
}

impl Log for Logger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level || self.file.is_some()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        self.write_file(record);

        if record.level() > self.level {
            return;
        }

        let message = record.args().to_string();
        let message = message.trim_end_matches('\n');

        match self.level {
            LevelFilter::Off => (),
            LevelFilter::Error | LevelFilter::Warn | LevelFilter::Info => match record.level() {
                Level::Info => println!("{}", message),
                _ => println!("{} {}", label(record.level()), message),
            },
            LevelFilter::Debug | LevelFilter::Trace => {
                println!(
                    "{} {} {}",
                    label(record.level()),
                    record.target().dimmed(),
                    message
                );
            }
        }
    }

    fn flush(&self) {
        if let Some(file) = &self.file {
            if let Ok(mut file) = file.lock() {
                let _ = file.flush();
            }
        }
    }
}

fn label(level: Level) -> ColoredString {
    match level {
        Level::Debug => "[DEBUG]".bold().blue(),
        Level::Error => "[ERROR]".bold().red(),
        Level::Info => "[INFO]".bold().green(),
        Level::Trace => "[TRACE]".bold().purple(),
        Level::Warn => "[WARN]".bold().yellow(),
    }
}
