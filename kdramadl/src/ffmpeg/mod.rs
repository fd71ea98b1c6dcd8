mod command;
mod runner;

pub use command::{CommandParams, FfmpegCommand, LogLevel};
pub use runner::{Executor, FfmpegExecutor, Outcome, Probe, ProbeOutcome, classify, run};

use crate::error::{Error, Result};
use std::{
    path::{Path, PathBuf},
    process::{Command, Stdio},
};

/// Candidate ffmpeg locations, in the order they are tried.
pub fn ffmpeg_candidates(configured: &Path, exe_dir: Option<&Path>) -> Vec<PathBuf> {
    let mut candidates = vec![configured.to_owned()];

    if let Some(exe_dir) = exe_dir {
        candidates.push(exe_dir.join("ffmpeg"));
        candidates.push(exe_dir.join("ffmpeg.exe"));
    }

    candidates
}

/// Returns the first candidate that runs `ffmpeg -version` successfully.
pub fn find_ffmpeg(candidates: &[PathBuf]) -> Result<PathBuf> {
    candidates
        .iter()
        .find(|x| {
            Command::new(x)
                .arg("-version")
                .stdin(Stdio::null())
                .stdout(Stdio::null())
                .stderr(Stdio::null())
                .status()
                .is_ok_and(|x| x.success())
        })
        .cloned()
        .ok_or(Error::FfmpegNotFound)
}
