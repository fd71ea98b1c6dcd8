use crate::request::DownloadRequest;
use reqwest::Url;

pub const HOST_MAIN: &str = "goplay.anontpp.com";
pub const HOST_ALT: &str = "kdrama.armsasuncion.com";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Host {
    #[default]
    Main,
    Alt,
}

impl Host {
    pub fn from_alt_flag(alt: bool) -> Self {
        if alt { Self::Alt } else { Self::Main }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Main => HOST_MAIN,
            Self::Alt => HOST_ALT,
        }
    }

    pub fn base_url(&self) -> Url {
        // Both hostnames are constants, so this never fails.
        Url::parse(&format!("https://{}/", self.name())).unwrap()
    }
}

/// Direct download links for one episode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Links {
    pub subtitles: Url,
    pub video: Url,
}

impl Links {
    pub fn new(base: &Url, code: &str, resolution: &str) -> Self {
        let mut subtitles = base.clone();
        subtitles
            .query_pairs_mut()
            .append_pair("dcode", code)
            .append_pair("downloadccsub", "1");

        let mut video = base.clone();
        video
            .query_pairs_mut()
            .append_pair("dcode", code)
            .append_pair("quality", resolution)
            .append_pair("downloadmp4vid", "1");

        Self { subtitles, video }
    }

    pub fn for_request(host: Host, request: &DownloadRequest) -> Self {
        Self::new(&host.base_url(), &request.code, &request.resolution)
    }
}
