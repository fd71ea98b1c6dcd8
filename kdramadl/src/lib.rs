//! Download episodes with subtitles from goplay.anontpp.com.
//!
//! Download links are built from a download code and handed to ffmpeg, which fetches the
//! video and muxes it with the subtitle track into mkv or mp4.

mod args;
mod client;
mod config;
mod downloader;
mod error;
mod finalize;
mod links;
mod logger;
mod paths;
mod prompt;
mod request;
mod subtitle;

pub mod ffmpeg;

pub use args::{Args, Settings};
pub use client::{Rejection, USER_AGENT, build_client, check_response, parse_proxy};
pub use config::FileConfig;
pub use downloader::{Job, Saved, download, header};
pub use error::{Error, Result};
pub use finalize::finalize;
pub use links::{HOST_ALT, HOST_MAIN, Host, Links};
pub use logger::Logger;
pub use paths::{OutputPaths, download_folder};
pub use prompt::{Prompter, Prompts};
pub use request::{DEFAULT_HARD_SUBS_STYLE, DownloadRequest, Format, RequestInput};
pub use subtitle::download_subtitles;
pub use reqwest;
