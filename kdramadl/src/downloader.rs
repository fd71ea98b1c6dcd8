use crate::{
    args::Settings,
    client,
    error::Result,
    ffmpeg::{self, CommandParams, Executor, FfmpegExecutor, Probe},
    finalize,
    links::Links,
    logger::Logger,
    paths::{self, OutputPaths},
    prompt::Prompter,
    request::DownloadRequest,
    subtitle,
};
use reqwest::blocking::Client;
use std::path::PathBuf;

/// Files written by a successful run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Saved {
    pub subtitles: Option<PathBuf>,
    pub video: Option<PathBuf>,
}

pub fn header() -> String {
    format!(
        "=====================================================\n\
         KDRAMA DOWNLOADER (v:{})\n\
         =====================================================",
        env!("CARGO_PKG_VERSION")
    )
}

/// Runs one download end to end with the real ffmpeg and http client.
pub fn download(settings: &Settings, prompter: &impl Prompter, logger: &Logger) -> Result<Saved> {
    let candidates = ffmpeg::ffmpeg_candidates(&settings.ffmpeg, paths::exe_dir().as_deref());
    let ffmpeg = ffmpeg::find_ffmpeg(&candidates)?;
    logger.debug(format_args!("Using ffmpeg: {}", ffmpeg.display()));

    let client = client::build_client(settings.proxy.as_deref(), settings.timeout, logger)?;
    let request = settings.input.clone().resolve(prompter)?;
    let folder = paths::download_folder(settings.folder.as_deref(), logger)?;

    logger.debug(format_args!(
        "App Version: {}, Download Code: {}, Resolution: {}, Filename: {}, Format: {}, Folder: {}, Proxy: {}, Hard Subs: {}, Hard Subs Style: {}",
        env!("CARGO_PKG_VERSION"),
        request.code,
        request.resolution,
        request.filename,
        request.format,
        folder.display(),
        settings.proxy.as_deref().unwrap_or_default(),
        request.hard_subs,
        request.hard_subs_style,
    ));

    let job = Job {
        ffmpeg,
        links: Links::for_request(settings.host, &request),
        paths: OutputPaths::new(&folder, &request.filename, request.format),
        request,
        proxy: settings.proxy.clone(),
        timeout: settings.timeout,
    };

    job.execute(&client, &mut FfmpegExecutor, &client, logger)
}

/// A validated download with every path and url resolved.
pub struct Job {
    pub ffmpeg: PathBuf,
    pub request: DownloadRequest,
    pub links: Links,
    pub paths: OutputPaths,
    pub proxy: Option<String>,
    pub timeout: u64,
}

impl Job {
    pub fn execute(
        &self,
        client: &Client,
        executor: &mut impl Executor,
        probe: &impl Probe,
        logger: &Logger,
    ) -> Result<Saved> {
        let mut saved = Saved::default();

        if self.request.needs_subtitle_file() {
            subtitle::download_subtitles(
                client,
                &self.links.subtitles,
                &self.paths.subtitles,
                logger,
            )?;
            saved.subtitles = Some(self.paths.subtitles.clone());
        }

        if self.request.subtitles_only {
            return Ok(saved);
        }

        ffmpeg::run(&self.command_params(), executor, probe, logger)?;
        saved.video = finalize::finalize(&self.paths, self.request.burns_subtitles(), logger)?;

        if saved.video.is_some() && self.request.burns_subtitles() {
            saved.subtitles = None;
        }

        Ok(saved)
    }

    /// Checks the disk for the subtitle file, so call it right before running ffmpeg.
    pub fn command_params(&self) -> CommandParams {
        CommandParams {
            ffmpeg: self.ffmpeg.clone(),
            timeout: self.timeout,
            video_url: self.links.video.clone(),
            subtitles_url: self.links.subtitles.clone(),
            format: self.request.format,
            part_path: self.paths.part.clone(),
            proxy: self.proxy.clone(),
            subtitles_file: self
                .paths
                .subtitles
                .exists()
                .then(|| self.paths.subtitles.clone()),
            hard_subs: self.request.hard_subs,
            hard_subs_style: self.request.hard_subs_style.clone(),
        }
    }
}
