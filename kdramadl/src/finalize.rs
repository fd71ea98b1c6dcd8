use crate::{
    error::{Error, Result},
    logger::Logger,
    paths::OutputPaths,
};
use std::{fs, path::PathBuf};

/// Moves the finished part file into place.
///
/// Returns the saved video path, or `None` when ffmpeg produced nothing.
/// With `burned_subtitles` the subtitle file is deleted since the video already carries them.
pub fn finalize(
    paths: &OutputPaths,
    burned_subtitles: bool,
    logger: &Logger,
) -> Result<Option<PathBuf>> {
    if paths.part.exists() {
        if let Err(e) = fs::rename(&paths.part, &paths.video) {
            logger.debug(format_args!(
                "Error renaming {:?} to {:?}: {}",
                paths.part, paths.video, e
            ));
            return Err(Error::Rename);
        }
    }

    if !paths.video.exists() {
        return Ok(None);
    }

    if burned_subtitles {
        logger.debug(format_args!("Deleting {}", paths.subtitles.display()));
        if let Err(e) = fs::remove_file(&paths.subtitles) {
            logger.debug(format_args!(
                "Unable to delete {}: {}",
                paths.subtitles.display(),
                e
            ));
        }
    }

    logger.info(format_args!("Saved video: {}", paths.video.display()));
    Ok(Some(paths.video.clone()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::Format;

    fn setup(format: Format) -> (tempfile::TempDir, OutputPaths) {
        let dir = tempfile::tempdir().unwrap();
        let paths = OutputPaths::new(dir.path(), "ep1", format);
        fs::write(&paths.part, b"video").unwrap();
        fs::write(&paths.subtitles, b"1\n").unwrap();
        (dir, paths)
    }

    #[test]
    fn part_file_is_renamed() {
        let (_dir, paths) = setup(Format::Mkv);

        let saved = finalize(&paths, false, &Logger::silent()).unwrap();

        assert_eq!(saved.as_ref(), Some(&paths.video));
        assert!(!paths.part.exists());
        assert_eq!(fs::read(&paths.video).unwrap(), b"video");
        assert!(paths.subtitles.exists());
    }

    #[test]
    fn burned_subtitles_are_deleted() {
        let (_dir, paths) = setup(Format::Mp4);

        finalize(&paths, true, &Logger::silent()).unwrap();

        assert!(paths.video.exists());
        assert!(!paths.subtitles.exists());
    }

    #[test]
    fn missing_subtitles_are_not_an_error() {
        let (_dir, paths) = setup(Format::Mp4);
        fs::remove_file(&paths.subtitles).unwrap();

        assert!(finalize(&paths, true, &Logger::silent()).unwrap().is_some());
    }

    #[test]
    fn nothing_to_finalize() {
        let dir = tempfile::tempdir().unwrap();
        let paths = OutputPaths::new(dir.path(), "ep1", Format::Mkv);

        assert_eq!(finalize(&paths, false, &Logger::silent()).unwrap(), None);
    }

    #[test]
    fn rename_failure() {
        let (_dir, paths) = setup(Format::Mkv);
        // A non-empty directory cannot be replaced by a file.
        fs::create_dir(&paths.video).unwrap();
        fs::write(paths.video.join("keep"), b"x").unwrap();

        assert!(matches!(
            finalize(&paths, false, &Logger::silent()),
            Err(Error::Rename)
        ));
        assert!(paths.part.exists());
    }
}
