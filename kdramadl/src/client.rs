use crate::{
    error::{Error, Result},
    logger::Logger,
};
use reqwest::{
    Proxy, StatusCode, Url,
    blocking::{Client, Response},
    header,
};
use std::time::Duration;

pub const USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64; rv:10.0) Gecko/20150101 Firefox/47.0 (Chrome)";

/// Reasons a response is not the payload we asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    Status(u16),
    ContentType(String),
}

/// Checks an http response before its body is used.
///
/// The site answers invalid or expired codes with an html page, so `text/html` is always
/// treated as a failure even when the status looks fine.
pub fn check_response(
    status: StatusCode,
    content_type: Option<&str>,
) -> std::result::Result<(), Rejection> {
    if status.as_u16() >= 400 {
        return Err(Rejection::Status(status.as_u16()));
    }

    if let Some(content_type) = content_type {
        if content_type.contains("text/html") {
            return Err(Rejection::ContentType(content_type.to_owned()));
        }
    }

    Ok(())
}

pub(crate) fn content_type(response: &Response) -> Option<&str> {
    response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|x| x.to_str().ok())
}

/// Checks that `address` can be handed to both reqwest and ffmpeg.
/// ffmpeg has no socks support so only http(s) proxies are accepted.
pub fn parse_proxy(address: &str) -> Result<Url> {
    let url = address.parse::<Url>().map_err(|e| Error::InvalidProxy {
        address: address.to_owned(),
        message: e.to_string(),
    })?;

    if !url.scheme().starts_with("http") {
        return Err(Error::UnsupportedProxy(url.scheme().to_owned()));
    }

    Ok(url)
}

pub fn build_client(proxy: Option<&str>, timeout: u64, logger: &Logger) -> Result<Client> {
    let mut client_builder = Client::builder()
        .user_agent(USER_AGENT)
        .connect_timeout(Duration::from_secs(timeout))
        .timeout(None);

    if let Some(proxy) = proxy {
        let url = parse_proxy(proxy)?;
        logger.debug(format_args!("Using proxy: {}", proxy));
        client_builder = client_builder.proxy(Proxy::all(url).map_err(|e| Error::InvalidProxy {
            address: proxy.to_owned(),
            message: e.to_string(),
        })?);
    }

    client_builder.build().map_err(Error::Client)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn html_is_rejected_for_any_status() {
        for status in [200, 204, 302, 404, 500] {
            let status = StatusCode::from_u16(status).unwrap();
            assert!(check_response(status, Some("text/html; charset=UTF-8")).is_err());
        }
        assert_eq!(
            check_response(StatusCode::OK, Some("text/html")),
            Err(Rejection::ContentType("text/html".to_owned()))
        );
    }

    #[test]
    fn error_statuses_are_rejected() {
        assert_eq!(
            check_response(StatusCode::NOT_FOUND, Some("application/octet-stream")),
            Err(Rejection::Status(404))
        );
        assert_eq!(
            check_response(StatusCode::BAD_REQUEST, None),
            Err(Rejection::Status(400))
        );
        assert!(check_response(StatusCode::from_u16(399).unwrap(), None).is_ok());
    }

    #[test]
    fn subtitle_payloads_pass() {
        assert!(check_response(StatusCode::OK, Some("application/x-subrip")).is_ok());
        assert!(check_response(StatusCode::OK, Some("text/plain")).is_ok());
        assert!(check_response(StatusCode::OK, None).is_ok());
    }

    #[test]
    fn only_http_proxies_are_accepted() {
        assert!(parse_proxy("http://127.0.0.1:80").is_ok());
        assert!(parse_proxy("https://proxy.local:3128").is_ok());
        assert!(matches!(
            parse_proxy("socks5://127.0.0.1:1080"),
            Err(Error::UnsupportedProxy(x)) if x == "socks5"
        ));
        assert!(matches!(
            parse_proxy("not a url"),
            Err(Error::InvalidProxy { .. })
        ));
    }

    #[test]
    fn socks_proxy_fails_client_build() {
        let err = build_client(Some("socks5://127.0.0.1:1080"), 10, &Logger::silent()).unwrap_err();
        assert_eq!(err.to_string(), "Unsupported proxy scheme: socks5");
    }
}
