use crate::{
    error::{Error, Result},
    prompt::Prompter,
};
use regex::Regex;
use std::{fmt, str::FromStr, sync::LazyLock};

static INVALID_CODE_CHAR: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^a-zA-Z0-9]").unwrap());
static VALID_RESOLUTION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([0-9]{3,4}p[+]?|[1-9])$").unwrap());

pub const DEFAULT_HARD_SUBS_STYLE: &str = "PrimaryColour=&H0000FFFF";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Format {
    #[default]
    Mkv,
    Mp4,
}

impl Format {
    pub const ALL: [Format; 2] = [Format::Mkv, Format::Mp4];

    pub fn extension(&self) -> &'static str {
        match self {
            Self::Mkv => "mkv",
            Self::Mp4 => "mp4",
        }
    }

    /// Value for ffmpeg's `-f` flag.
    pub fn muxer(&self) -> &'static str {
        match self {
            Self::Mkv => "matroska",
            Self::Mp4 => "mp4",
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for Format {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|x| x.extension() == s)
            .ok_or_else(|| Error::InvalidFormat(s.to_owned()))
    }
}

/// A validated download request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadRequest {
    pub code: String,
    pub resolution: String,
    pub format: Format,
    pub filename: String,
    pub subtitles_only: bool,
    pub hard_subs: bool,
    pub hard_subs_style: String,
}

/// Raw values as given on the command line or in the config file.
///
/// Values are used verbatim, only prompted answers are trimmed.
#[derive(Debug, Clone, Default)]
pub struct RequestInput {
    pub code: Option<String>,
    pub resolution: Option<String>,
    pub format: Option<String>,
    pub filename: Option<String>,
    pub subtitles_only: bool,
    pub hard_subs: bool,
    pub hard_subs_style: Option<String>,
}

impl RequestInput {
    /// Fills blank fields through `prompter` and validates each of them as soon as it is known.
    pub fn resolve(self, prompter: &impl Prompter) -> Result<DownloadRequest> {
        let code = value_or_prompt(self.code, prompter, "Enter the Download Code: ")?;
        validate_code(&code)?;

        let filename = value_or_prompt(self.filename, prompter, "Enter the Filename (no extension): ")?;
        if filename.is_empty() {
            return Err(Error::BlankFilename);
        }

        let resolution = value_or_prompt(
            self.resolution,
            prompter,
            "Enter a Resolution (please check on video page): ",
        )?;
        validate_resolution(&resolution)?;

        let format = value_or_prompt(
            self.format,
            prompter,
            &format!(
                "Choose a Format ({}). Press ENTER to use the default ({}): ",
                Format::ALL.map(|x| x.extension()).join(", "),
                Format::default()
            ),
        )?;
        let format = if format.is_empty() {
            Format::default()
        } else {
            format.parse()?
        };

        Ok(DownloadRequest {
            code,
            resolution,
            format,
            filename,
            subtitles_only: self.subtitles_only,
            hard_subs: self.hard_subs,
            hard_subs_style: self
                .hard_subs_style
                .unwrap_or_else(|| DEFAULT_HARD_SUBS_STYLE.to_owned()),
        })
    }
}

impl DownloadRequest {
    /// Subtitles are saved to disk in subtitle only mode and whenever they have to be muxed into mp4.
    pub fn needs_subtitle_file(&self) -> bool {
        self.subtitles_only || self.format == Format::Mp4
    }

    /// Whether the subtitle file is redundant once the video is saved.
    pub fn burns_subtitles(&self) -> bool {
        self.format == Format::Mp4 && self.hard_subs
    }
}

fn value_or_prompt(value: Option<String>, prompter: &impl Prompter, message: &str) -> Result<String> {
    match value {
        Some(x) if !x.is_empty() => Ok(x),
        _ => prompter.input(message),
    }
}

pub fn validate_code(code: &str) -> Result<()> {
    if code.is_empty() {
        return Err(Error::BlankCode);
    }

    if INVALID_CODE_CHAR.is_match(code) {
        return Err(Error::InvalidCode);
    }

    Ok(())
}

pub fn validate_resolution(resolution: &str) -> Result<()> {
    if resolution.is_empty() {
        return Err(Error::BlankResolution);
    }

    if !VALID_RESOLUTION.is_match(resolution) {
        return Err(Error::InvalidResolution(resolution.to_owned()));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{cell::RefCell, collections::VecDeque};

    struct Scripted {
        answers: RefCell<VecDeque<&'static str>>,
        asked: RefCell<Vec<String>>,
    }

    impl Scripted {
        fn new(answers: &[&'static str]) -> Self {
            Self {
                answers: RefCell::new(answers.iter().copied().collect()),
                asked: RefCell::new(Vec::new()),
            }
        }
    }

    impl Prompter for Scripted {
        fn input(&self, message: &str) -> Result<String> {
            self.asked.borrow_mut().push(message.to_owned());
            Ok(self
                .answers
                .borrow_mut()
                .pop_front()
                .unwrap_or_default()
                .trim()
                .to_owned())
        }
    }

    fn full_input() -> RequestInput {
        RequestInput {
            code: Some("ABC123".to_owned()),
            resolution: Some("720p".to_owned()),
            format: Some("mp4".to_owned()),
            filename: Some("episode 01".to_owned()),
            ..Default::default()
        }
    }

    #[test]
    fn codes_outside_alphanumerics_are_rejected() {
        for code in ["abc-123", "abc 123", "abc_123", "ABC123!", "코드", "a/b", "a&quality=1"] {
            assert!(matches!(validate_code(code), Err(Error::InvalidCode)), "{code}");
        }
        assert!(matches!(validate_code(""), Err(Error::BlankCode)));
        assert!(validate_code("ABC123xyz").is_ok());
    }

    #[test]
    fn resolution_pattern() {
        for res in ["720p", "1080p", "1080p+", "360p", "1", "9"] {
            assert!(validate_resolution(res).is_ok(), "{res}");
        }
        for res in ["0", "10", "72p", "10800p", "720", "720p++", "720P", " 720p", "hd", "p"] {
            assert!(
                matches!(validate_resolution(res), Err(Error::InvalidResolution(_))),
                "{res}"
            );
        }
        assert!(matches!(validate_resolution(""), Err(Error::BlankResolution)));
    }

    #[test]
    fn format_parsing() {
        assert_eq!("mkv".parse::<Format>().unwrap(), Format::Mkv);
        assert_eq!("mp4".parse::<Format>().unwrap(), Format::Mp4);
        assert!(matches!("avi".parse::<Format>(), Err(Error::InvalidFormat(x)) if x == "avi"));
        assert_eq!(Format::Mkv.muxer(), "matroska");
        assert_eq!(Format::Mp4.muxer(), "mp4");
    }

    #[test]
    fn provided_values_skip_prompts() {
        let prompter = Scripted::new(&[]);
        let request = full_input().resolve(&prompter).unwrap();

        assert!(prompter.asked.borrow().is_empty());
        assert_eq!(request.format, Format::Mp4);
        assert_eq!(request.filename, "episode 01");
        assert_eq!(request.hard_subs_style, DEFAULT_HARD_SUBS_STYLE);
    }

    #[test]
    fn blank_values_are_prompted_in_order() {
        let prompter = Scripted::new(&["  XYZ789 ", "ep2", "1080p+", ""]);
        let request = RequestInput::default().resolve(&prompter).unwrap();

        let asked = prompter.asked.borrow();
        assert_eq!(asked.len(), 4);
        assert!(asked[0].contains("Download Code"));
        assert!(asked[1].contains("Filename"));
        assert!(asked[2].contains("Resolution"));
        assert_eq!(
            asked[3],
            "Choose a Format (mkv, mp4). Press ENTER to use the default (mkv): "
        );
        assert_eq!(request.code, "XYZ789");
        assert_eq!(request.resolution, "1080p+");
        assert_eq!(request.format, Format::Mkv);
    }

    #[test]
    fn invalid_code_fails_before_filename_prompt() {
        let prompter = Scripted::new(&["bad code!", "never asked"]);
        let err = RequestInput::default().resolve(&prompter).unwrap_err();

        assert!(matches!(err, Error::InvalidCode));
        assert!(err.is_validation());
        assert_eq!(prompter.asked.borrow().len(), 1);
    }

    #[test]
    fn blank_answers_fail_validation() {
        let err = RequestInput::default()
            .resolve(&Scripted::new(&[""]))
            .unwrap_err();
        assert!(matches!(err, Error::BlankCode));

        let input = RequestInput {
            filename: None,
            ..full_input()
        };
        let err = input.resolve(&Scripted::new(&["   "])).unwrap_err();
        assert!(matches!(err, Error::BlankFilename));

        let input = RequestInput {
            resolution: Some(String::new()),
            ..full_input()
        };
        let err = input.resolve(&Scripted::new(&[""])).unwrap_err();
        assert!(matches!(err, Error::BlankResolution));
    }

    #[test]
    fn flag_values_are_not_trimmed() {
        let input = RequestInput {
            filename: Some(" episode 01 ".to_owned()),
            ..full_input()
        };
        let prompter = Scripted::new(&[]);
        let request = input.resolve(&prompter).unwrap();
        assert_eq!(request.filename, " episode 01 ");
        assert!(prompter.asked.borrow().is_empty());

        let input = RequestInput {
            code: Some(" ABC123".to_owned()),
            ..full_input()
        };
        let prompter = Scripted::new(&["ABC123"]);
        let err = input.resolve(&prompter).unwrap_err();
        assert!(matches!(err, Error::InvalidCode));
        assert!(prompter.asked.borrow().is_empty());

        let input = RequestInput {
            resolution: Some("720p ".to_owned()),
            ..full_input()
        };
        let err = input.resolve(&Scripted::new(&[])).unwrap_err();
        assert!(matches!(err, Error::InvalidResolution(x) if x == "720p "));
    }

    #[test]
    fn unknown_format_fails() {
        let input = RequestInput {
            format: Some("webm".to_owned()),
            ..full_input()
        };
        let err = input.resolve(&Scripted::new(&[])).unwrap_err();
        assert_eq!(err.to_string(), "Invalid format: webm");
    }

    #[test]
    fn subtitle_file_requirements() {
        let mut request = full_input().resolve(&Scripted::new(&[])).unwrap();
        assert!(request.needs_subtitle_file());
        assert!(!request.burns_subtitles());

        request.hard_subs = true;
        assert!(request.burns_subtitles());

        request.format = Format::Mkv;
        assert!(!request.needs_subtitle_file());
        assert!(!request.burns_subtitles());

        request.subtitles_only = true;
        assert!(request.needs_subtitle_file());
    }
}
