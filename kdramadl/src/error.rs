use std::{io, path::PathBuf};
use thiserror::Error;

/// The error type returned by every download step.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Download Code cannot be blank")]
    BlankCode,

    #[error("Invalid Download Code")]
    InvalidCode,

    #[error("Filename cannot be blank")]
    BlankFilename,

    #[error("Resolution cannot be blank")]
    BlankResolution,

    #[error("Invalid resolution: {0}")]
    InvalidResolution(String),

    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    #[error("Unable to read input: {0}")]
    Prompt(String),

    #[error("Unable to find valid ffmpeg path")]
    FfmpegNotFound,

    #[error("Invalid proxy address {address:?}: {message}")]
    InvalidProxy { address: String, message: String },

    #[error("Unsupported proxy scheme: {0}")]
    UnsupportedProxy(String),

    #[error("Unable to build http client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("Error downloading subtitles: {0}")]
    SubtitleRequest(#[source] reqwest::Error),

    #[error("Error downloading subtitles: HTTP {0}")]
    SubtitleStatus(u16),

    #[error("Error downloading subtitles: Unexpected Content-Type {0:?}")]
    SubtitleContentType(String),

    #[error("{} already exists", .0.display())]
    SubtitleExists(PathBuf),

    #[error("Error saving subtitles to {}: {source}", .path.display())]
    SubtitleWrite { path: PathBuf, source: io::Error },

    #[error("Error downloading video: {0}")]
    VideoRequest(String),

    #[error("Error downloading video: HTTP {status} {url:?}")]
    VideoStatus { status: u16, url: String },

    #[error("Error downloading video: Unexpected Content-Type {0:?}")]
    VideoContentType(String),

    #[error("ffmpeg Error: {0}")]
    Ffmpeg(String),

    #[error("Unable to create folder {}: {source}", .path.display())]
    Folder { path: PathBuf, source: io::Error },

    #[error("Unable to rename file")]
    Rename,
}

#[cfg(test)]
impl Error {
    /// Returns true for errors caused by bad user input.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::BlankCode
                | Self::InvalidCode
                | Self::BlankFilename
                | Self::BlankResolution
                | Self::InvalidResolution(_)
                | Self::InvalidFormat(_)
        )
    }

    /// Returns true for errors raised while fetching subtitles or probing the video url.
    pub fn is_download(&self) -> bool {
        matches!(
            self,
            Self::SubtitleRequest(_)
                | Self::SubtitleStatus(_)
                | Self::SubtitleContentType(_)
                | Self::VideoRequest(_)
                | Self::VideoStatus { .. }
                | Self::VideoContentType(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, Error>;
