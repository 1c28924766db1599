//! Image URL resolution against the store's image CDN.

use serde::Serialize;

use super::static_data::PLACEHOLDER_IMAGE;
use super::types::ImageRef;

const IMAGE_CDN: &str = "https://cdn.sanity.io/images";

/// Requested output size. A missing height keeps the aspect ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub width: u32,
    pub height: Option<u32>,
}

impl Dimensions {
    pub const fn width(width: u32) -> Self {
        Self {
            width,
            height: None,
        }
    }

    pub const fn exact(width: u32, height: u32) -> Self {
        Self {
            width,
            height: Some(height),
        }
    }
}

pub const HERO: Dimensions = Dimensions::width(1600);
pub const SOCIAL_PREVIEW: Dimensions = Dimensions::exact(1200, 630);
pub const CARD: Dimensions = Dimensions::exact(800, 450);
pub const GALLERY_THUMB: Dimensions = Dimensions::exact(800, 600);
pub const GALLERY_FULL: Dimensions = Dimensions::width(1400);
pub const PROFILE_PHOTO: Dimensions = Dimensions::exact(900, 984);

/// Image ready for presentation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedImage {
    pub url: String,
    pub alt: String,
}

/// Builds CDN URLs for image assets of one project/dataset.
#[derive(Debug, Clone)]
pub struct ImageUrlBuilder {
    project_id: Option<String>,
    dataset: String,
}

impl ImageUrlBuilder {
    pub fn new(project_id: Option<String>, dataset: impl Into<String>) -> Self {
        Self {
            project_id: project_id.filter(|id| !id.trim().is_empty()),
            dataset: dataset.into(),
        }
    }

    /// URL for the referenced image at the requested size, or `None` when
    /// the reference cannot be turned into a URL.
    ///
    /// Asset ids look like `image-<hash>-<w>x<h>-<ext>`. References that only
    /// carry an absolute URL (bundled data) are returned unchanged.
    pub fn url(&self, image: &ImageRef, size: Dimensions) -> Option<String> {
        if let (Some(id), Some(project_id)) = (image.asset_id(), self.project_id.as_deref()) {
            if let Some(file) = asset_file_name(id) {
                let mut url = format!(
                    "{}/{}/{}/{}?w={}",
                    IMAGE_CDN, project_id, self.dataset, file, size.width
                );
                if let Some(height) = size.height {
                    url.push_str(&format!("&h={height}"));
                }
                url.push_str("&fit=max&auto=format");
                return Some(url);
            }
        }

        image
            .asset
            .as_ref()
            .and_then(|a| a.url.as_deref())
            .filter(|u| u.starts_with("https://") || u.starts_with("http://") || u.starts_with('/'))
            .map(str::to_string)
    }

    /// Like [`url`](Self::url) but never empty: absent or unresolvable
    /// references give the local placeholder.
    pub fn url_or_placeholder(&self, image: Option<&ImageRef>, size: Dimensions) -> String {
        image
            .and_then(|img| self.url(img, size))
            .unwrap_or_else(|| PLACEHOLDER_IMAGE.to_string())
    }
}

/// `image-abc123-2000x3000-jpg` -> `abc123-2000x3000.jpg`
fn asset_file_name(asset_id: &str) -> Option<String> {
    let rest = asset_id.strip_prefix("image-")?;
    let (stem, ext) = rest.rsplit_once('-')?;
    let (hash, dims) = stem.rsplit_once('-')?;

    let (w, h) = dims.split_once('x')?;
    let valid = !hash.is_empty()
        && !ext.is_empty()
        && ext.chars().all(|c| c.is_ascii_alphanumeric())
        && w.parse::<u32>().is_ok()
        && h.parse::<u32>().is_ok();

    valid.then(|| format!("{hash}-{dims}.{ext}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn builder() -> ImageUrlBuilder {
        ImageUrlBuilder::new(Some("abc123".to_string()), "production")
    }

    #[test]
    fn test_asset_resolves_to_sized_cdn_url() {
        let image = ImageRef::from_asset("image-Tb9Ew8CXIwaY6R1k-2000x3000-jpg");
        let url = builder().url(&image, SOCIAL_PREVIEW).unwrap();
        assert_eq!(
            url,
            "https://cdn.sanity.io/images/abc123/production/Tb9Ew8CXIwaY6R1k-2000x3000.jpg?w=1200&h=630&fit=max&auto=format"
        );
    }

    #[test]
    fn test_resolution_is_deterministic() {
        let image = ImageRef::from_asset("image-deadbeef-640x480-png");
        let first = builder().url(&image, HERO);
        let second = builder().url(&image, HERO);
        assert!(first.is_some());
        assert_eq!(first, second);
    }

    #[test]
    fn test_different_sizes_share_the_source_asset() {
        let image = ImageRef::from_asset("image-deadbeef-640x480-png");
        let hero = builder().url(&image, HERO).unwrap();
        let card = builder().url(&image, CARD).unwrap();
        assert_ne!(hero, card);
        assert!(hero.contains("deadbeef-640x480.png"));
        assert!(card.contains("deadbeef-640x480.png"));
    }

    #[test]
    fn test_missing_or_malformed_reference_uses_placeholder() {
        let b = builder();
        assert_eq!(b.url_or_placeholder(None, HERO), PLACEHOLDER_IMAGE);

        let malformed = ImageRef::from_asset("file-notanimage");
        assert_eq!(b.url_or_placeholder(Some(&malformed), HERO), PLACEHOLDER_IMAGE);

        let empty = ImageRef::default();
        assert_eq!(b.url_or_placeholder(Some(&empty), HERO), PLACEHOLDER_IMAGE);
    }

    #[test]
    fn test_unconfigured_project_cannot_build_asset_urls() {
        let b = ImageUrlBuilder::new(None, "production");
        let image = ImageRef::from_asset("image-deadbeef-640x480-png");
        assert_eq!(b.url(&image, HERO), None);
    }

    #[test]
    fn test_absolute_url_passes_through() {
        let image = ImageRef::from_url("https://vumbnail.com/385106794.jpg");
        assert_eq!(
            builder().url(&image, CARD).as_deref(),
            Some("https://vumbnail.com/385106794.jpg")
        );
    }
}
