use crate::api::{request_timeout, ApiError, HTTP_CLIENT};
use serde::Deserialize;
use tracing::debug;

const ITUNES_SEARCH_ENDPOINT: &str = "https://itunes.apple.com/search";

/// iTunes storefronts tried for artwork, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Storefront {
    China,
    Japan,
}

impl Storefront {
    fn country(self) -> &'static str {
        match self {
            Self::China => "cn",
            Self::Japan => "jp",
        }
    }

    fn limit(self) -> u32 {
        match self {
            Self::China => 5,
            Self::Japan => 3,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
struct ItunesSearchResponse {
    #[serde(default)]
    results: Vec<ItunesResult>,
}

#[derive(Debug, Clone, Deserialize, Default)]
struct ItunesResult {
    #[serde(default, rename = "trackName")]
    track_name: Option<String>,
    #[serde(default, rename = "artworkUrl100")]
    artwork_url_100: Option<String>,
}

pub async fn search_itunes_cover(
    query: &str,
    title: &str,
    storefront: Storefront,
    timeout_seconds: u32,
) -> Result<Option<String>, ApiError> {
    let limit = storefront.limit().to_string();
    let response = HTTP_CLIENT
        .get(ITUNES_SEARCH_ENDPOINT)
        .query(&[
            ("term", query),
            ("media", "music"),
            ("limit", limit.as_str()),
            ("country", storefront.country()),
        ])
        .timeout(request_timeout(timeout_seconds))
        .send()
        .await?;
    ApiError::check_status(&response)?;

    let body = response.text().await?;
    pick_cover(&body, title, storefront)
}

fn pick_cover(body: &str, title: &str, storefront: Storefront) -> Result<Option<String>, ApiError> {
    let payload: ItunesSearchResponse = serde_json::from_str(body)?;
    let chosen = match storefront {
        Storefront::China => {
            let wanted = title.to_lowercase();
            payload
                .results
                .iter()
                .find(|result| {
                    result
                        .track_name
                        .as_deref()
                        .is_some_and(|name| name.to_lowercase().contains(&wanted))
                })
                .or_else(|| payload.results.first())
        }
        Storefront::Japan => payload.results.first(),
    };

    Ok(chosen
        .and_then(|result| result.artwork_url_100.as_deref())
        .filter(|url| !url.trim().is_empty())
        .map(upscale_artwork))
}

/// iTunes serves any square size when the size segment of the URL is rewritten.
pub fn upscale_artwork(url: &str) -> String {
    url.replace("100x100", "1200x1200")
}

/// Cover from the China storefront, falling back to Japan when that finds nothing.
pub async fn resolve_cover(query: &str, title: &str, timeout_seconds: u32) -> Option<String> {
    for storefront in [Storefront::China, Storefront::Japan] {
        match search_itunes_cover(query, title, storefront, timeout_seconds).await {
            Ok(Some(cover)) => return Some(cover),
            Ok(None) => debug!(country = storefront.country(), "itunes returned no artwork"),
            Err(error) => debug!(country = storefront.country(), %error, "itunes lookup failed"),
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    const RESULTS: &str = r#"{"resultCount": 3, "results": [
        {"trackName": "Intro", "artworkUrl100": "https://is1.example/a/100x100bb.jpg"},
        {"trackName": "晴天 (Live)", "artworkUrl100": "https://is1.example/b/100x100bb.jpg"},
        {"trackName": "Sunny Day", "artworkUrl100": "https://is1.example/c/100x100bb.jpg"}
    ]}"#;

    #[test]
    fn china_prefers_title_match() {
        let cover = pick_cover(RESULTS, "晴天", Storefront::China).unwrap();
        assert_eq!(cover.as_deref(), Some("https://is1.example/b/1200x1200bb.jpg"));

        let cover = pick_cover(RESULTS, "SUNNY", Storefront::China).unwrap();
        assert_eq!(cover.as_deref(), Some("https://is1.example/c/1200x1200bb.jpg"));
    }

    #[test]
    fn china_falls_back_to_first_result() {
        let cover = pick_cover(RESULTS, "missing", Storefront::China).unwrap();
        assert_eq!(cover.as_deref(), Some("https://is1.example/a/1200x1200bb.jpg"));
    }

    #[test]
    fn japan_takes_first_result() {
        let cover = pick_cover(RESULTS, "Sunny Day", Storefront::Japan).unwrap();
        assert_eq!(cover.as_deref(), Some("https://is1.example/a/1200x1200bb.jpg"));
    }

    #[test]
    fn empty_or_artless_results_yield_none() {
        assert_eq!(pick_cover(r#"{"results": []}"#, "x", Storefront::China).unwrap(), None);
        assert_eq!(
            pick_cover(r#"{"results": [{"trackName": "x"}]}"#, "x", Storefront::China).unwrap(),
            None
        );
        assert!(pick_cover("not json", "x", Storefront::Japan).is_err());
    }
}
