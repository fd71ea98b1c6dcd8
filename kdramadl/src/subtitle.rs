use crate::{
    client::{self, Rejection},
    error::{Error, Result},
    logger::Logger,
};
use reqwest::{Url, blocking::Client};
use std::{
    fs::{File, OpenOptions},
    io::{self, Read},
    path::Path,
};

/// Downloads the subtitle track at `url` into `path`.
///
/// An existing file at `path` is never overwritten.
pub fn download_subtitles(client: &Client, url: &Url, path: &Path, logger: &Logger) -> Result<()> {
    logger.debug(format_args!("Requesting {}", url));

    let response = client
        .get(url.clone())
        .send()
        .map_err(Error::SubtitleRequest)?;

    client::check_response(response.status(), client::content_type(&response)).map_err(
        |x| match x {
            Rejection::Status(status) => Error::SubtitleStatus(status),
            Rejection::ContentType(content_type) => Error::SubtitleContentType(content_type),
        },
    )?;

    save(response, path)?;
    logger.info(format_args!("Saved subtitles: {}", path.display()));
    Ok(())
}

/// Streams `body` into a newly created file at `path`.
pub fn save(mut body: impl Read, path: &Path) -> Result<()> {
    let mut file = create_new(path)?;

    io::copy(&mut body, &mut file).map_err(|e| Error::SubtitleWrite {
        path: path.to_owned(),
        source: e,
    })?;

    Ok(())
}

fn create_new(path: &Path) -> Result<File> {
    OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .map_err(|e| match e.kind() {
            io::ErrorKind::AlreadyExists => Error::SubtitleExists(path.to_owned()),
            _ => Error::SubtitleWrite {
                path: path.to_owned(),
                source: e,
            },
        })
}
