use crate::{
    config::{DEFAULT_CONFIG_PATH, FileConfig, MAX_TIMEOUT},
    links::{HOST_ALT, HOST_MAIN, Host},
    request::{DEFAULT_HARD_SUBS_STYLE, RequestInput},
};
use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

/// Alternative downloader for https://goplay.anontpp.com
///
/// Make sure you have ffmpeg installed in PATH or next to this executable.
#[derive(Debug, Clone, Parser)]
#[command(version, about)]
pub struct Args {
    /// Download code.
    #[arg(short, long)]
    pub code: Option<String>,

    /// Resolution of video, for example: 720p.
    #[arg(short, long)]
    pub resolution: Option<String>,

    /// Video format. Choose from: "mkv" "mp4". Default is "mkv".
    #[arg(short, long)]
    pub format: Option<String>,

    /// Filename to save as (without extension).
    #[arg(long)]
    pub filename: Option<String>,

    /// Download only subtitles.
    #[arg(long)]
    pub sub: bool,

    /// Enable hard subs (for mp4 only).
    #[arg(long, alias = "hardsubs", help_heading = "Subtitle Options")]
    pub hard_subs: bool,

    /// Custom hard subs font style,
    /// e.g. to make subs blue and font size 22 'FontSize=22,PrimaryColour=&H00FF0000'.
    /// Defaults to 'PrimaryColour=&H0000FFFF'.
    #[arg(long, alias = "hardsubsstyle", help_heading = "Subtitle Options")]
    pub hard_subs_style: Option<String>,

    /// Path to ffmpeg executable. Defaults to 'ffmpeg'.
    #[arg(long, help_heading = "Download Options")]
    pub ffmpeg: Option<PathBuf>,

    /// Path to download folder.
    /// By default the folder containing this executable is used.
    #[arg(long, help_heading = "Download Options")]
    pub folder: Option<PathBuf>,

    #[arg(long, help_heading = "Client Options", help = format!("Use {} instead of {}.", HOST_ALT, HOST_MAIN))]
    pub alt: bool,

    /// Proxy address (only HTTP proxies supported), example "http://127.0.0.1:80".
    #[arg(long, help_heading = "Client Options")]
    pub proxy: Option<String>,

    /// Connection timeout interval in seconds (1-86400). Default 10.
    #[arg(long, help_heading = "Client Options", value_parser = clap::value_parser!(u64).range(1..=MAX_TIMEOUT))]
    pub timeout: Option<u64>,

    /// Automatically quit when done (skip the "Press ENTER to continue" prompt).
    #[arg(long, alias = "autoquit")]
    pub auto_quit: bool,

    /// Disable color output.
    #[arg(long, alias = "nocolor")]
    pub no_color: bool,

    /// Raw style input prompts for old and unsupported terminals.
    #[arg(long)]
    pub raw_prompts: bool,

    /// Generate more verbose messages.
    #[arg(long)]
    pub verbose: bool,

    /// Path to logfile (for debugging/reporting).
    #[arg(long, alias = "logfile")]
    pub log_file: Option<PathBuf>,

    /// Path to custom toml config file.
    #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,
}

/// Command line flags merged with the config file.
#[derive(Debug, Clone)]
pub struct Settings {
    pub input: RequestInput,
    pub ffmpeg: PathBuf,
    pub folder: Option<PathBuf>,
    pub host: Host,
    pub proxy: Option<String>,
    pub timeout: u64,
    pub auto_quit: bool,
    pub no_color: bool,
    pub raw_prompts: bool,
    pub verbose: bool,
    pub log_file: Option<PathBuf>,
}

impl Args {
    pub fn settings(self) -> Result<Settings> {
        let config = FileConfig::load(&self.config)?;
        Ok(self.merge(config))
    }

    /// Flags given on the command line win over the config file.
    pub fn merge(self, config: FileConfig) -> Settings {
        Settings {
            input: RequestInput {
                code: self.code,
                resolution: self.resolution.or(config.resolution),
                format: self.format.or(config.format),
                filename: self.filename,
                subtitles_only: self.sub,
                hard_subs: self.hard_subs || config.hard_subs.unwrap_or(false),
                hard_subs_style: self
                    .hard_subs_style
                    .or(config.hard_subs_style)
                    .or_else(|| Some(DEFAULT_HARD_SUBS_STYLE.to_owned())),
            },
            ffmpeg: self
                .ffmpeg
                .or(config.ffmpeg)
                .unwrap_or_else(|| PathBuf::from("ffmpeg")),
            folder: self.folder.or(config.folder),
            host: Host::from_alt_flag(self.alt || config.alt.unwrap_or(false)),
            proxy: self
                .proxy
                .or(config.proxy)
                .filter(|x| !x.trim().is_empty()),
            timeout: self
                .timeout
                .or(config.timeout)
                .map_or(10, |x| x.clamp(1, MAX_TIMEOUT)),
            auto_quit: self.auto_quit || config.auto_quit.unwrap_or(false),
            no_color: self.no_color || config.no_color.unwrap_or(false),
            raw_prompts: self.raw_prompts || config.raw_prompts.unwrap_or(false),
            verbose: self.verbose || config.verbose.unwrap_or(false),
            log_file: self.log_file.or(config.log_file),
        }
    }
}
