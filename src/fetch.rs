use std::path::Path;

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use reqwest::blocking::Client;
use tracing::{debug, info};

use crate::config::Settings;
use crate::error::{Error, Result};

/// Characters left bare when escaping a single path segment.
pub const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~')
    .remove(b'$')
    .remove(b'&')
    .remove(b'+')
    .remove(b':')
    .remove(b'=')
    .remove(b'@');

/// Anything that can turn a url into its response body.
pub trait Fetch {
    fn fetch(&self, url: &str) -> std::result::Result<Vec<u8>, String>;
}

/// Blocking HTTP transport: one attempt per url, non-2xx is a failure.
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(settings: &Settings) -> Result<Self> {
        let client = Client::builder()
            .timeout(settings.timeout())
            .user_agent(settings.user_agent.clone())
            .build()
            .map_err(|e| Error::Config(format!("building http client: {e}")))?;
        Ok(Self { client })
    }
}

impl Fetch for HttpFetcher {
    fn fetch(&self, url: &str) -> std::result::Result<Vec<u8>, String> {
        debug!(url, "GET");
        let response = self
            .client
            .get(url)
            .send()
            .and_then(|r| r.error_for_status())
            .map_err(|e| e.to_string())?;
        response
            .bytes()
            .map(|b| b.to_vec())
            .map_err(|e| e.to_string())
    }
}

/// Lookup page url for `word`: `<lookup_url>/<escaped word>`.
pub fn lookup_url(base: &str, word: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        utf8_percent_encode(word, PATH_SEGMENT)
    )
}

/// Fetch the dictionary page for `word` as text.
pub fn fetch_page(fetcher: &dyn Fetch, base: &str, word: &str) -> Result<String> {
    let url = lookup_url(base, word);
    info!(url = %url, "Fetching dictionary page");
    let body = fetcher.fetch(&url).map_err(|reason| Error::Network {
        url: url.clone(),
        reason,
    })?;
    Ok(String::from_utf8_lossy(&body).into_owned())
}

/// Download `url` and write the body to `path`, replacing any existing file.
pub fn download(fetcher: &dyn Fetch, url: &str, path: &Path) -> Result<()> {
    let media_error = |reason: String| Error::MediaDownload {
        url: url.to_string(),
        path: path.to_path_buf(),
        reason,
    };
    let body = fetcher.fetch(url).map_err(media_error)?;
    std::fs::write(path, &body).map_err(|e| media_error(e.to_string()))?;
    debug!(url, path = %path.display(), bytes = body.len(), "Wrote media file");
    Ok(())
}
