use crate::request::Format;
use reqwest::Url;
use std::{
    fmt,
    path::{Path, PathBuf},
    process::{Command, Stdio},
};

/// ffmpeg `-loglevel` values used by the downloader.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Fatal,
    Error,
    Warning,
    Info,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Fatal => "fatal",
            Self::Error => "error",
            Self::Warning => "warning",
            Self::Info => "info",
        }
    }

    /// Level of the first run.
    pub fn primary(verbose: bool) -> Self {
        if verbose { Self::Warning } else { Self::Fatal }
    }

    /// Level of the retry run, never quieter than `warning`.
    pub fn escalate(self) -> Self {
        self.max(Self::Warning)
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything ffmpeg needs to know about one episode.
#[derive(Debug, Clone)]
pub struct CommandParams {
    pub ffmpeg: PathBuf,
    /// Network timeout in seconds.
    pub timeout: u64,
    pub video_url: Url,
    pub subtitles_url: Url,
    pub format: Format,
    pub part_path: PathBuf,
    pub proxy: Option<String>,
    /// Local subtitle file, only set when it exists on disk.
    pub subtitles_file: Option<PathBuf>,
    pub hard_subs: bool,
    pub hard_subs_style: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FfmpegCommand {
    pub program: PathBuf,
    pub args: Vec<String>,
    /// Capture stderr instead of passing it through to the terminal.
    pub capture_stderr: bool,
}

impl FfmpegCommand {
    pub fn build(params: &CommandParams, log_level: LogLevel, capture_stderr: bool) -> Self {
        let mut args = vec![
            "-loglevel".to_owned(),
            log_level.to_string(),
            "-stats".to_owned(),
            "-y".to_owned(),
            "-timeout".to_owned(),
            params.timeout.saturating_mul(1_000_000).to_string(), // microseconds
            "-reconnect".to_owned(),
            "1".to_owned(),
            "-reconnect_streamed".to_owned(),
            "1".to_owned(),
        ];

        if let Some(proxy) = &params.proxy {
            args.extend_from_slice(&["-http_proxy".to_owned(), proxy.to_owned()]);
        }

        args.extend_from_slice(&["-i".to_owned(), params.video_url.to_string()]);

        if params.format == Format::Mkv || !params.hard_subs {
            args.extend_from_slice(&["-i".to_owned(), params.subtitles_url.to_string()]);
        } else if let Some(subtitles_file) = &params.subtitles_file {
            args.extend_from_slice(&[
                "-vf".to_owned(),
                subtitles_filter(subtitles_file, &params.hard_subs_style),
            ]);
        }

        match params.format {
            Format::Mp4 => {
                if !params.hard_subs {
                    args.extend_from_slice(&["-c:s".to_owned(), "mov_text".to_owned()]);
                }

                args.extend_from_slice(&[
                    "-c:v".to_owned(),
                    "libx264".to_owned(),
                    "-c:a".to_owned(),
                    "copy".to_owned(),
                ]);
            }
            Format::Mkv => {
                args.extend_from_slice(&["-c".to_owned(), "copy".to_owned()]);
            }
        }

        args.extend_from_slice(&[
            "-bsf:a".to_owned(),
            "aac_adtstoasc".to_owned(),
            "-f".to_owned(),
            params.format.muxer().to_owned(),
            params.part_path.to_string_lossy().into(),
        ]);

        Self {
            program: params.ffmpeg.clone(),
            args,
            capture_stderr,
        }
    }

    pub fn command(&self) -> Command {
        let mut command = Command::new(&self.program);
        command
            .args(&self.args)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(if self.capture_stderr {
                Stdio::piped()
            } else {
                Stdio::inherit()
            });
        command
    }

    #[cfg(test)]
    fn contains(&self, flag: &str, value: &str) -> bool {
        self.args.windows(2).any(|x| x[0] == flag && x[1] == value)
    }

    #[cfg(test)]
    pub(crate) fn value_of(&self, flag: &str) -> Option<&str> {
        self.args
            .windows(2)
            .find(|x| x[0] == flag)
            .map(|x| x[1].as_str())
    }
}

impl fmt::Display for FfmpegCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}",
            self.program.to_string_lossy(),
            self.args
                .iter()
                .map(|x| if x.contains(' ') {
                    format!("\"{x}\"")
                } else {
                    x.to_owned()
                })
                .collect::<Vec<_>>()
                .join(" ")
        )
    }
}

fn subtitles_filter(path: &Path, style: &str) -> String {
    if style.is_empty() {
        format!("subtitles={}", path.to_string_lossy())
    } else {
        format!("subtitles={}:force_style='{}'", path.to_string_lossy(), style)
    }
}
