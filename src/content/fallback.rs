//! Fallback resolution.
//!
//! Each field is resolved from an ordered list of candidate sources: the
//! first non-blank candidate wins and the bundled default closes the list,
//! so a resolved field is never empty. Fields resolve independently; a
//! half-authored document keeps every value it does have.

use std::collections::BTreeMap;

use serde::Serialize;

use super::image::{self, ImageUrlBuilder, ResolvedImage};
use super::static_data;
use super::types::{AboutContent, ImageRef, RichText, SiteSettings, TextBlock};
use super::video::{self, VideoEmbed};

// ============================================================================
// Candidate lists
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    /// Authored in the content store.
    Store,
    /// Computed from another store field (e.g. a title standing in for alt text).
    Derived,
    /// Bundled default.
    Static,
}

/// Values that can be "set but empty".
pub trait Blank {
    fn is_blank(&self) -> bool;
}

impl Blank for String {
    fn is_blank(&self) -> bool {
        self.trim().is_empty()
    }
}

impl<T> Blank for Vec<T> {
    fn is_blank(&self) -> bool {
        self.is_empty()
    }
}

impl Blank for ImageRef {
    fn is_blank(&self) -> bool {
        self.asset_id().is_none()
            && self
                .asset
                .as_ref()
                .and_then(|a| a.url.as_deref())
                .map_or(true, |u| u.trim().is_empty())
    }
}

impl Blank for RichText {
    fn is_blank(&self) -> bool {
        RichText::is_blank(self)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Resolved<T> {
    pub value: T,
    pub source: Source,
}

/// Ordered candidate sources for one field, evaluated first to last.
#[derive(Debug, Clone)]
pub struct Candidates<T> {
    items: Vec<(Source, Option<T>)>,
}

impl<T: Blank> Default for Candidates<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T: Blank> Candidates<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn store(mut self, value: Option<T>) -> Self {
        self.items.push((Source::Store, value));
        self
    }

    pub fn derived(mut self, value: Option<T>) -> Self {
        self.items.push((Source::Derived, value));
        self
    }

    /// First non-blank candidate, if any.
    pub fn first(self) -> Option<Resolved<T>> {
        self.items.into_iter().find_map(|(source, value)| {
            value
                .filter(|v| !v.is_blank())
                .map(|value| Resolved { value, source })
        })
    }

    /// First non-blank candidate, else the bundled default.
    pub fn or_static(self, default: T) -> Resolved<T> {
        self.first().unwrap_or(Resolved {
            value: default,
            source: Source::Static,
        })
    }
}

/// Winning source per field name, for diagnostics.
pub type FieldSources = BTreeMap<&'static str, Source>;

fn record<T>(sources: &mut FieldSources, field: &'static str, resolved: Resolved<T>) -> T {
    sources.insert(field, resolved.source);
    resolved.value
}

// ============================================================================
// Site settings
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum HeroMedia {
    /// Directly playable file, looped over the poster.
    Loop { src: String },
    /// External platform link, embedded.
    Embed(VideoEmbed),
    PosterOnly,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HeroBackground {
    pub poster_url: String,
    pub media: HeroMedia,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactDetails {
    pub email: String,
    pub phone: String,
    pub phone_href: String,
    pub location: String,
    pub resume_url: String,
    pub music_url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedSettings {
    pub hero: HeroBackground,
    pub edit_reel_url: String,
    pub contact: ContactDetails,
    pub sources: FieldSources,
}

/// `512-801-1314` -> `tel:+15128011314`. Numbers that already carry a
/// country code keep it.
pub fn phone_href(phone: &str) -> String {
    let digits: String = phone.chars().filter(char::is_ascii_digit).collect();
    if phone.trim_start().starts_with('+') || digits.len() > 10 {
        format!("tel:+{digits}")
    } else {
        format!("tel:+1{digits}")
    }
}

/// Classify a hero video URL.
pub fn hero_media(url: Option<&str>) -> HeroMedia {
    let Some(url) = url.map(str::trim).filter(|u| !u.is_empty()) else {
        return HeroMedia::PosterOnly;
    };
    if let Some(embed) = video::parse_embed(url) {
        return HeroMedia::Embed(embed);
    }
    if video::is_directly_playable(url) {
        return HeroMedia::Loop {
            src: url.to_string(),
        };
    }
    HeroMedia::PosterOnly
}

pub fn resolve_settings(settings: Option<&SiteSettings>, images: &ImageUrlBuilder) -> ResolvedSettings {
    let mut sources = FieldSources::new();
    let field = |f: fn(&SiteSettings) -> Option<&String>| settings.and_then(f).cloned();

    let poster_url = Candidates::new()
        .store(
            settings
                .and_then(|s| s.hero_fallback_image.as_ref())
                .and_then(|img| images.url(img, image::HERO)),
        )
        .or_static(static_data::PLACEHOLDER_IMAGE.to_string());
    let poster_url = record(&mut sources, "heroFallbackImage", poster_url);

    let hero_video = Candidates::new().store(field(|s| s.hero_video_url.as_ref())).first();
    sources.insert(
        "heroVideoUrl",
        hero_video.as_ref().map_or(Source::Static, |r| r.source),
    );
    let media = hero_media(hero_video.as_ref().map(|r| r.value.as_str()));

    let edit_reel_url = Candidates::new()
        .store(field(|s| s.edit_reel_url.as_ref()))
        .or_static(static_data::EDIT_REEL_URL.to_string());
    let edit_reel_url = record(&mut sources, "editReelUrl", edit_reel_url);

    let email = Candidates::new()
        .store(field(|s| s.contact_email.as_ref()))
        .or_static(static_data::CONTACT_EMAIL.to_string());
    let email = record(&mut sources, "contactEmail", email);

    let phone = Candidates::new()
        .store(field(|s| s.contact_phone.as_ref()))
        .or_static(static_data::CONTACT_PHONE.to_string());
    let phone = record(&mut sources, "contactPhone", phone);

    let location = Candidates::new()
        .store(field(|s| s.location.as_ref()))
        .or_static(static_data::CONTACT_LOCATION.to_string());
    let location = record(&mut sources, "location", location);

    let music_url = Candidates::new()
        .store(field(|s| s.music_url.as_ref()))
        .or_static(static_data::MUSIC_URL.to_string());
    let music_url = record(&mut sources, "musicUrl", music_url);

    let resume_url = Candidates::new()
        .store(
            settings
                .and_then(|s| s.resume_pdf.as_ref())
                .and_then(|f| f.url())
                .map(str::to_string),
        )
        .or_static(static_data::RESUME_URL.to_string());
    let resume_url = record(&mut sources, "resumePdf", resume_url);

    ResolvedSettings {
        hero: HeroBackground { poster_url, media },
        edit_reel_url,
        contact: ContactDetails {
            phone_href: phone_href(&phone),
            email,
            phone,
            location,
            resume_url,
            music_url,
        },
        sources,
    }
}

// ============================================================================
// About content
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedAbout {
    pub heading: String,
    pub profile_photo: ResolvedImage,
    pub bio: Vec<TextBlock>,
    pub pull_quote: String,
    pub pull_quote_subtext: String,
    pub sources: FieldSources,
}

/// About page fields. The bundled bio links to `music_url`, which callers
/// take from the resolved settings.
pub fn resolve_about(
    about: Option<&AboutContent>,
    music_url: &str,
    images: &ImageUrlBuilder,
) -> ResolvedAbout {
    let mut sources = FieldSources::new();
    let field = |f: fn(&AboutContent) -> Option<&String>| about.and_then(f).cloned();

    let heading = Candidates::new()
        .store(field(|a| a.heading.as_ref()))
        .or_static(static_data::ABOUT_HEADING.to_string());
    let heading = record(&mut sources, "heading", heading);

    let photo = about.and_then(|a| a.profile_photo.as_ref());
    let photo_url = Candidates::new()
        .store(photo.and_then(|img| images.url(img, image::PROFILE_PHOTO)))
        .or_static(static_data::PLACEHOLDER_IMAGE.to_string());
    let photo_url = record(&mut sources, "profilePhoto", photo_url);
    let photo_alt = Candidates::new()
        .store(photo.and_then(|img| img.alt.clone()))
        .or_static(static_data::PROFILE_PHOTO_ALT.to_string())
        .value;

    let bio = Candidates::new()
        .store(
            about
                .and_then(|a| a.bio_blocks.clone())
                .filter(|blocks| blocks.iter().any(|b| !b.plain_text().trim().is_empty())),
        )
        .or_static(static_data::bio_blocks(music_url));
    let bio = record(&mut sources, "bioBlocks", bio);

    let pull_quote = Candidates::new()
        .store(field(|a| a.pull_quote.as_ref()))
        .or_static(static_data::PULL_QUOTE.to_string());
    let pull_quote = record(&mut sources, "pullQuote", pull_quote);

    let pull_quote_subtext = Candidates::new()
        .store(field(|a| a.pull_quote_subtext.as_ref()))
        .or_static(static_data::PULL_QUOTE_SUBTEXT.to_string());
    let pull_quote_subtext = record(&mut sources, "pullQuoteSubtext", pull_quote_subtext);

    ResolvedAbout {
        heading,
        profile_photo: ResolvedImage {
            url: photo_url,
            alt: photo_alt,
        },
        bio,
        pull_quote,
        pull_quote_subtext,
        sources,
    }
}

// ============================================================================
// Alt text
// ============================================================================

/// Hero alt: hero image alt, then thumbnail alt, then the title.
pub fn hero_alt(hero: Option<&ImageRef>, thumbnail: Option<&ImageRef>, title: &str) -> String {
    Candidates::new()
        .store(hero.and_then(|i| i.alt.clone()))
        .store(thumbnail.and_then(|i| i.alt.clone()))
        .derived(Some(title.to_string()))
        .or_static(String::new())
        .value
}

/// Card alt: thumbnail alt, then the title.
pub fn card_alt(thumbnail: Option<&ImageRef>, title: &str) -> String {
    Candidates::new()
        .store(thumbnail.and_then(|i| i.alt.clone()))
        .derived(Some(title.to_string()))
        .or_static(String::new())
        .value
}

/// Gallery alt: the image's own alt, then `"<title> - image <n>"` (1-based).
pub fn gallery_alt(image: &ImageRef, title: &str, position: usize) -> String {
    Candidates::new()
        .store(image.alt.clone())
        .or_static(format!("{title} - image {}", position + 1))
        .value
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::types::FileRef;

    fn images() -> ImageUrlBuilder {
        ImageUrlBuilder::new(Some("abc123".to_string()), "production")
    }

    #[test]
    fn test_candidates_first_non_blank_wins() {
        let r = Candidates::new()
            .store(Some("   ".to_string()))
            .store(None)
            .derived(Some("title".to_string()))
            .or_static("default".to_string());
        assert_eq!(r.value, "title");
        assert_eq!(r.source, Source::Derived);

        let r = Candidates::<String>::new().store(None).or_static("default".to_string());
        assert_eq!(r.source, Source::Static);
    }

    #[test]
    fn test_missing_settings_resolve_entirely_static() {
        let resolved = resolve_settings(None, &images());
        assert_eq!(resolved.edit_reel_url, static_data::EDIT_REEL_URL);
        assert_eq!(resolved.contact.email, static_data::CONTACT_EMAIL);
        assert_eq!(resolved.contact.phone_href, "tel:+15128011314");
        assert_eq!(resolved.hero.poster_url, static_data::PLACEHOLDER_IMAGE);
        assert_eq!(resolved.hero.media, HeroMedia::PosterOnly);
        assert!(resolved.sources.values().all(|s| *s == Source::Static));
    }

    #[test]
    fn test_settings_fields_fall_back_independently() {
        let settings = SiteSettings {
            contact_email: Some("studio@example.com".to_string()),
            contact_phone: Some("".to_string()),
            location: None,
            music_url: Some("https://music.example.com".to_string()),
            resume_pdf: Some(FileRef::default()),
            ..SiteSettings::default()
        };
        let resolved = resolve_settings(Some(&settings), &images());

        assert_eq!(resolved.contact.email, "studio@example.com");
        assert_eq!(resolved.contact.music_url, "https://music.example.com");
        assert_eq!(resolved.contact.phone, static_data::CONTACT_PHONE);
        assert_eq!(resolved.contact.location, static_data::CONTACT_LOCATION);
        assert_eq!(resolved.contact.resume_url, static_data::RESUME_URL);
        assert_eq!(resolved.edit_reel_url, static_data::EDIT_REEL_URL);

        assert_eq!(resolved.sources["contactEmail"], Source::Store);
        assert_eq!(resolved.sources["contactPhone"], Source::Static);
    }

    #[test]
    fn test_hero_media_classification() {
        assert_eq!(
            hero_media(Some("https://cdn.sanity.io/files/abc/production/reel.mp4")),
            HeroMedia::Loop {
                src: "https://cdn.sanity.io/files/abc/production/reel.mp4".to_string()
            }
        );
        assert!(matches!(
            hero_media(Some("https://youtu.be/rRqMH-W_4YY")),
            HeroMedia::Embed(ref e) if e.video_id == "rRqMH-W_4YY"
        ));
        assert_eq!(hero_media(Some("https://example.com/page")), HeroMedia::PosterOnly);
        assert_eq!(hero_media(Some("  ")), HeroMedia::PosterOnly);
    }

    #[test]
    fn test_about_keeps_authored_heading_and_fills_rest() {
        let about = AboutContent {
            heading: Some("Hello there.".to_string()),
            bio_blocks: Some(vec![TextBlock::paragraph("  ")]),
            ..AboutContent::default()
        };
        let resolved = resolve_about(Some(&about), "https://music.example.com", &images());

        assert_eq!(resolved.heading, "Hello there.");
        assert_eq!(resolved.pull_quote, static_data::PULL_QUOTE);
        assert_eq!(resolved.profile_photo.url, static_data::PLACEHOLDER_IMAGE);
        assert_eq!(resolved.profile_photo.alt, static_data::PROFILE_PHOTO_ALT);
        assert_eq!(resolved.sources["bioBlocks"], Source::Static);

        let last = resolved.bio.last().unwrap();
        assert_eq!(last.mark_defs[0].href.as_deref(), Some("https://music.example.com"));
    }

    #[test]
    fn test_phone_href_variants() {
        assert_eq!(phone_href("(512) 801-1314"), "tel:+15128011314");
        assert_eq!(phone_href("+44 20 7946 0958"), "tel:+442079460958");
    }

    #[test]
    fn test_alt_text_cascades() {
        let with_alt = ImageRef::from_asset("image-a-1x1-png").with_alt("Crew on set");
        let without = ImageRef::from_asset("image-b-1x1-png");

        assert_eq!(hero_alt(Some(&without), Some(&with_alt), "Film"), "Crew on set");
        assert_eq!(hero_alt(None, None, "Film"), "Film");
        assert_eq!(card_alt(Some(&without), "Film"), "Film");
        assert_eq!(gallery_alt(&without, "Film", 2), "Film - image 3");
    }
}
