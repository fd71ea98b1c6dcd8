use crate::{
    error::{Error, Result},
    logger::Logger,
    request::Format,
};
use std::{
    env, fs,
    path::{Path, PathBuf},
};

/// Where one episode is written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPaths {
    pub subtitles: PathBuf,
    pub video: PathBuf,
    /// Written by ffmpeg, renamed to `video` once it exits cleanly.
    pub part: PathBuf,
}

impl OutputPaths {
    pub fn new(folder: &Path, filename: &str, format: Format) -> Self {
        Self {
            subtitles: folder.join(format!("{}.srt", filename)),
            video: folder.join(format!("{}.{}", filename, format)),
            part: folder.join(format!("{}.{}.part", filename, format)),
        }
    }
}

/// Directory of the running executable.
pub fn exe_dir() -> Option<PathBuf> {
    env::current_exe()
        .ok()
        .and_then(|x| x.parent().map(|x| x.to_owned()))
}

/// Resolves the download folder, creating it when needed.
/// Without `folder` the directory of the running executable is used.
pub fn download_folder(folder: Option<&Path>, logger: &Logger) -> Result<PathBuf> {
    let Some(folder) = folder.filter(|x| !x.as_os_str().is_empty()) else {
        return Ok(exe_dir().unwrap_or_else(|| PathBuf::from(".")));
    };

    let folder = std::path::absolute(folder).map_err(|e| Error::Folder {
        path: folder.to_owned(),
        source: e,
    })?;

    if !folder.is_dir() {
        fs::create_dir_all(&folder).map_err(|e| Error::Folder {
            path: folder.clone(),
            source: e,
        })?;
        logger.info(format_args!("Created folder: {}", folder.display()));
    }

    Ok(folder)
}
