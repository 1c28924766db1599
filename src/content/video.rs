//! Video URL classification: platform embeds vs. directly playable files.

use reqwest::Url;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Youtube,
    Vimeo,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoEmbed {
    pub platform: Platform,
    pub video_id: String,
    pub embed_url: String,
}

/// Parse a YouTube (`watch?v=ID`, `youtu.be/ID`) or Vimeo (`/ID`,
/// `/ID/hash`) link into a player embed. Anything else is `None`.
pub fn parse_embed(url: &str) -> Option<VideoEmbed> {
    let parsed = Url::parse(url.trim()).ok()?;
    let host = parsed.host_str()?.to_ascii_lowercase();

    if host.contains("youtube.com") {
        let id = parsed
            .query_pairs()
            .find(|(k, _)| k == "v")
            .map(|(_, v)| v.into_owned())
            .filter(|v| !v.is_empty())?;
        return Some(youtube(id));
    }

    if host == "youtu.be" {
        let id = parsed.path().trim_start_matches('/').split('/').next()?;
        if id.is_empty() {
            return None;
        }
        return Some(youtube(id.to_string()));
    }

    if host.contains("vimeo.com") {
        let mut parts = parsed.path().split('/').filter(|p| !p.is_empty());
        let id = parts.next()?.to_string();
        let embed_url = match parts.next() {
            Some(hash) => format!("https://player.vimeo.com/video/{id}?h={hash}"),
            None => format!("https://player.vimeo.com/video/{id}"),
        };
        return Some(VideoEmbed {
            platform: Platform::Vimeo,
            video_id: id,
            embed_url,
        });
    }

    None
}

fn youtube(id: String) -> VideoEmbed {
    VideoEmbed {
        platform: Platform::Youtube,
        embed_url: format!("https://www.youtube-nocookie.com/embed/{id}?rel=0&modestbranding=1"),
        video_id: id,
    }
}

/// True for video files a `<video>` element can loop directly: `.mp4`
/// files and assets served by the store's CDN.
pub fn is_directly_playable(url: &str) -> bool {
    let Ok(parsed) = Url::parse(url.trim()) else {
        // Site-relative paths such as `/reel.mp4`.
        return url.trim().starts_with('/') && url.contains(".mp4");
    };

    let host = parsed.host_str().unwrap_or_default().to_ascii_lowercase();
    if host.contains("youtube") || host == "youtu.be" || host.contains("vimeo.com") {
        return false;
    }

    parsed.path().to_ascii_lowercase().ends_with(".mp4") || host.ends_with("sanity.io")
}
