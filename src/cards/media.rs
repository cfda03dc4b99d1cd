use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use percent_encoding::utf8_percent_encode;
use tracing::info;

use crate::error::Result;
use crate::fetch::{download, Fetch, PATH_SEGMENT};
use crate::parser::model::Headword;

static LAST_SUFFIX: AtomicU64 = AtomicU64::new(0);

/// Nanosecond timestamp, bumped so that no two calls in a process repeat.
pub fn unique_suffix() -> u64 {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or_default();
    let prev = LAST_SUFFIX
        .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |last| {
            Some(now.max(last + 1))
        })
        .unwrap_or_else(|v| v);
    now.max(prev + 1)
}

/// File name stem for a word: no spaces, no path separators.
pub fn file_stem(word: &str) -> String {
    word.replace([' ', '/', '\\'], "_")
}

/// `https://` + host, unless the host already carries a scheme.
pub fn asset_base(scheme: &str, host: &str) -> String {
    if host.contains("://") {
        host.trim_end_matches('/').to_string()
    } else {
        format!("{}://{}", scheme, host.trim_end_matches('/'))
    }
}

/// Absolute url for a translation image.
///
/// The asset host serves file names escaped twice, so only the last path
/// component is escaped again here; the directory is kept verbatim. The first
/// `/original/` is swapped for `/300/` to get the mid-size rendition.
pub fn image_url(asset_base: &str, image_path: &str) -> String {
    let path = match image_path.rsplit_once('/') {
        Some((dir, file)) => format!("{}/{}", dir, utf8_percent_encode(file, PATH_SEGMENT)),
        None => format!("/{}", utf8_percent_encode(image_path, PATH_SEGMENT)),
    };
    format!("{}{}", asset_base, path.replacen("/original/", "/300/", 1))
}

/// Downloads card media into the collection directory and hands back the tags
/// that reference them.
pub struct MediaResolver<'a> {
    fetcher: &'a dyn Fetch,
    collections_dir: &'a Path,
    asset_base: String,
}

impl<'a> MediaResolver<'a> {
    pub fn new(fetcher: &'a dyn Fetch, collections_dir: &'a Path, asset_base: String) -> Self {
        Self {
            fetcher,
            collections_dir,
            asset_base,
        }
    }

    /// `[sound:<file>]` for the headword pronunciation.
    ///
    /// Without an audio url the tag is still emitted, with an empty name.
    pub fn audio_tag(&self, headword: &Headword) -> Result<String> {
        let mut name = String::new();
        if !headword.audio_url.is_empty() {
            name = format!("{}{}.mp3", file_stem(&headword.display_text), unique_suffix());
            let path = self.collections_dir.join(&name);
            download(self.fetcher, &headword.audio_url, &path)?;
            info!(path = %path.display(), "Saved audio file");
        }
        Ok(format!("[sound:{}]", name))
    }

    /// `<img src="<file>">` for a translation image, or an empty string when
    /// the translation has none.
    pub fn picture_tag(&self, subheadword: &str, image_path: &str) -> Result<String> {
        if image_path.is_empty() {
            return Ok(String::new());
        }
        let url = image_url(&self.asset_base, image_path);
        let name = format!("{}{}.jpg", file_stem(subheadword), unique_suffix());
        let path = self.collections_dir.join(&name);
        download(self.fetcher, &url, &path)?;
        info!(url = %url, path = %path.display(), "Saved image");
        Ok(format!("<img src=\"{}\">", name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::fetch::fake::FakeFetcher;

    const BASE: &str = "https://d10gt6izjc94x0.cloudfront.net";

    #[test]
    fn image_url_escapes_file_name_only() {
        assert_eq!(
            image_url(BASE, "/images/original/talk about/dos amigos%20hablando.jpg"),
            "https://d10gt6izjc94x0.cloudfront.net/images/300/talk about/dos%20amigos%2520hablando.jpg"
        );
    }

    #[test]
    fn image_url_swaps_resolution_once() {
        assert_eq!(
            image_url(BASE, "/a/original/b/original/c.jpg"),
            "https://d10gt6izjc94x0.cloudfront.net/a/300/b/original/c.jpg"
        );
        assert_eq!(
            image_url(BASE, "/a/300/c.jpg"),
            "https://d10gt6izjc94x0.cloudfront.net/a/300/c.jpg"
        );
        assert_eq!(image_url(BASE, "c.jpg"), format!("{}/c.jpg", BASE));
    }

    #[test]
    fn asset_base_adds_scheme() {
        assert_eq!(asset_base("https", "assets.example.com"), "https://assets.example.com");
        assert_eq!(asset_base("https", "http://localhost:9000/"), "http://localhost:9000");
    }

    #[test]
    fn suffixes_never_repeat() {
        let mut seen: Vec<u64> = (0..1000).map(|_| unique_suffix()).collect();
        let len = seen.len();
        seen.dedup();
        assert_eq!(seen.len(), len);
        assert!(seen.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn file_stem_flattens_separators() {
        assert_eq!(file_stem("hablar de"), "hablar_de");
        assert_eq!(file_stem("../etc/passwd"), ".._etc_passwd");
    }

    #[test]
    fn empty_audio_url_gives_degenerate_tag() {
        let dir = tempfile::tempdir().unwrap();
        let fetcher = FakeFetcher::default();
        let resolver = MediaResolver::new(&fetcher, dir.path(), BASE.into());
        let tag = resolver.audio_tag(&Headword::default()).unwrap();
        assert_eq!(tag, "[sound:]");
        assert!(fetcher.requests().is_empty());
    }

    #[test]
    fn audio_is_downloaded_under_headword_name() {
        let dir = tempfile::tempdir().unwrap();
        let fetcher = FakeFetcher::default().with("https://audio.example.com/a.mp3", "ID3");
        let resolver = MediaResolver::new(&fetcher, dir.path(), BASE.into());
        let headword = Headword {
            display_text: "hacer falta".into(),
            audio_url: "https://audio.example.com/a.mp3".into(),
            ..Default::default()
        };

        let tag = resolver.audio_tag(&headword).unwrap();
        let name = tag.strip_prefix("[sound:").unwrap().strip_suffix(']').unwrap();
        assert!(name.starts_with("hacer_falta") && name.ends_with(".mp3"));
        assert_eq!(std::fs::read(dir.path().join(name)).unwrap(), b"ID3");
    }

    #[test]
    fn picture_tag_downloads_rewritten_url() {
        let dir = tempfile::tempdir().unwrap();
        let fetcher = FakeFetcher::default().with(&format!("{}/img/300/perro.jpg", BASE), "JPEG");
        let resolver = MediaResolver::new(&fetcher, dir.path(), BASE.into());

        let tag = resolver.picture_tag("el perro", "/img/original/perro.jpg").unwrap();
        let name = tag.strip_prefix("<img src=\"").unwrap().strip_suffix("\">").unwrap();
        assert!(name.starts_with("el_perro") && name.ends_with(".jpg"));
        assert!(dir.path().join(name).exists());
    }

    #[test]
    fn picture_tag_empty_without_path() {
        let dir = tempfile::tempdir().unwrap();
        let fetcher = FakeFetcher::default();
        let resolver = MediaResolver::new(&fetcher, dir.path(), BASE.into());
        assert_eq!(resolver.picture_tag("perro", "").unwrap(), "");
        assert!(fetcher.requests().is_empty());
    }

    #[test]
    fn picture_download_failure() {
        let dir = tempfile::tempdir().unwrap();
        let fetcher = FakeFetcher::default();
        let resolver = MediaResolver::new(&fetcher, dir.path(), BASE.into());
        let err = resolver.picture_tag("perro", "/img/original/perro.jpg").unwrap_err();
        assert!(matches!(err, Error::MediaDownload { .. }));
    }
}
