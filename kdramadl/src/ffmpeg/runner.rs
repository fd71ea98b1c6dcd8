use super::command::{CommandParams, FfmpegCommand, LogLevel};
use crate::{
    client::{self, Rejection},
    error::{Error, Result},
    logger::Logger,
};
use reqwest::{StatusCode, Url, blocking::Client};

/// Result of one ffmpeg invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Success,
    Failed {
        reason: String,
        /// Captured stderr, only present when the command asked for it.
        stderr: Option<String>,
    },
}

pub trait Executor {
    fn execute(&mut self, command: &FfmpegCommand) -> Outcome;
}

/// Spawns the real ffmpeg process and waits for it.
pub struct FfmpegExecutor;

impl Executor for FfmpegExecutor {
    fn execute(&mut self, command: &FfmpegCommand) -> Outcome {
        let child = match command.command().spawn() {
            Ok(x) => x,
            Err(e) => {
                return Outcome::Failed {
                    reason: format!("Error starting command: {}", e),
                    stderr: None,
                };
            }
        };

        let output = match child.wait_with_output() {
            Ok(x) => x,
            Err(e) => {
                return Outcome::Failed {
                    reason: e.to_string(),
                    stderr: None,
                };
            }
        };

        if output.status.success() {
            return Outcome::Success;
        }

        Outcome::Failed {
            reason: match output.status.code() {
                Some(code) => format!("exit status {}", code),
                None => "terminated by signal".to_owned(),
            },
            stderr: command
                .capture_stderr
                .then(|| String::from_utf8_lossy(&output.stderr).trim().to_owned()),
        }
    }
}

/// What a plain GET of the video url revealed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
    Transport(String),
    Response {
        status: StatusCode,
        content_type: Option<String>,
        /// Final url after redirects.
        url: String,
    },
}

pub trait Probe {
    fn probe(&self, url: &Url) -> ProbeOutcome;
}

impl Probe for Client {
    fn probe(&self, url: &Url) -> ProbeOutcome {
        match self.get(url.clone()).send() {
            Ok(response) => ProbeOutcome::Response {
                status: response.status(),
                content_type: client::content_type(&response).map(|x| x.to_owned()),
                url: response.url().to_string(),
            },
            Err(e) => ProbeOutcome::Transport(e.to_string()),
        }
    }
}

/// Turns a failed download into the most specific error the probe allows.
pub fn classify(probe: ProbeOutcome, ffmpeg_error: String) -> Error {
    match probe {
        ProbeOutcome::Transport(e) => Error::VideoRequest(e),
        ProbeOutcome::Response {
            status,
            content_type,
            url,
        } => match client::check_response(status, content_type.as_deref()) {
            Err(Rejection::Status(status)) => Error::VideoStatus { status, url },
            Err(Rejection::ContentType(content_type)) => Error::VideoContentType(content_type),
            Ok(()) => Error::Ffmpeg(ffmpeg_error),
        },
    }
}

enum Stage {
    Primary,
    Retry,
    Diagnose { reason: String },
}

/// Runs ffmpeg, retrying once with louder logging before asking the server what went wrong.
pub fn run(
    params: &CommandParams,
    executor: &mut impl Executor,
    probe: &impl Probe,
    logger: &Logger,
) -> Result<()> {
    let primary_level = LogLevel::primary(logger.verbose());
    let mut stage = Stage::Primary;

    loop {
        stage = match stage {
            Stage::Primary => {
                let command = FfmpegCommand::build(params, primary_level, false);
                logger.debug(format_args!("Requesting {}", params.video_url));
                logger.debug(format_args!("Executing {}", command));

                match executor.execute(&command) {
                    Outcome::Success => return Ok(()),
                    Outcome::Failed { reason, .. } => {
                        logger.warn(format_args!("Retrying ffmpeg command due to: {}", reason));
                        Stage::Retry
                    }
                }
            }
            Stage::Retry => {
                let command = FfmpegCommand::build(params, primary_level.escalate(), true);
                logger.debug(format_args!("Requesting {}", params.video_url));
                logger.debug(format_args!("Executing {}", command));

                match executor.execute(&command) {
                    Outcome::Success => return Ok(()),
                    Outcome::Failed { reason, stderr } => {
                        if let Some(stderr) = stderr.filter(|x| !x.is_empty()) {
                            logger.error(format_args!("FFMPEG Error: {}", stderr));
                        }
                        Stage::Diagnose { reason }
                    }
                }
            }
            Stage::Diagnose { reason } => {
                logger.debug(format_args!("Probing {}", params.video_url));
                return Err(classify(probe.probe(&params.video_url), reason));
            }
        };
    }
}
