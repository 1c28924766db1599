//! Content Types - documents as they come out of the content store.
//!
//! Field names follow the store's camelCase schema; `_id`, `_key`, `_type`
//! and `_ref` are renamed onto plain Rust names.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ============================================================================
// Value objects
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slug {
    #[serde(default, deserialize_with = "nullable")]
    pub current: String,
}

impl Slug {
    pub fn new(current: impl Into<String>) -> Self {
        Self {
            current: current.into(),
        }
    }
}

/// Reference to an uploaded asset.
///
/// A raw reference carries `_ref`; a dereferenced one (`asset->` in a
/// projection) carries `_id` and `url` instead.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AssetRef {
    #[serde(rename = "_ref", default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl AssetRef {
    pub fn asset_id(&self) -> Option<&str> {
        self.reference
            .as_deref()
            .or(self.id.as_deref())
            .filter(|id| !id.trim().is_empty())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageRef {
    #[serde(default)]
    pub asset: Option<AssetRef>,
    #[serde(default)]
    pub alt: Option<String>,
    #[serde(default)]
    pub caption: Option<String>,
}

impl ImageRef {
    pub fn from_asset(reference: impl Into<String>) -> Self {
        Self {
            asset: Some(AssetRef {
                reference: Some(reference.into()),
                ..AssetRef::default()
            }),
            alt: None,
            caption: None,
        }
    }

    /// Image known only by an absolute URL (bundled data).
    pub fn from_url(url: impl Into<String>) -> Self {
        Self {
            asset: Some(AssetRef {
                url: Some(url.into()),
                ..AssetRef::default()
            }),
            alt: None,
            caption: None,
        }
    }

    pub fn with_alt(mut self, alt: impl Into<String>) -> Self {
        self.alt = Some(alt.into());
        self
    }

    pub fn asset_id(&self) -> Option<&str> {
        self.asset.as_ref().and_then(AssetRef::asset_id)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FileRef {
    #[serde(default)]
    pub asset: Option<AssetRef>,
}

impl FileRef {
    pub fn url(&self) -> Option<&str> {
        self.asset.as_ref().and_then(|a| a.url.as_deref())
    }
}

/// A label/URL pair (video links, press links, link-list entries).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LabeledLink {
    #[serde(rename = "_key", default, deserialize_with = "nullable", skip_serializing_if = "String::is_empty")]
    pub key: String,
    #[serde(default, deserialize_with = "nullable")]
    pub label: String,
    #[serde(default, deserialize_with = "nullable")]
    pub url: String,
}

impl LabeledLink {
    pub fn new(label: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            key: String::new(),
            label: label.into(),
            url: url.into(),
        }
    }

    pub fn is_complete(&self) -> bool {
        !self.label.trim().is_empty() && !self.url.trim().is_empty()
    }
}

// ============================================================================
// Rich text
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Span {
    #[serde(rename = "_key", default, deserialize_with = "nullable", skip_serializing_if = "String::is_empty")]
    pub key: String,
    #[serde(default, deserialize_with = "nullable")]
    pub text: String,
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Vec::is_empty")]
    pub marks: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MarkDef {
    #[serde(rename = "_key", default, deserialize_with = "nullable")]
    pub key: String,
    #[serde(rename = "_type", default, deserialize_with = "nullable")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
}

/// One Portable Text block.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextBlock {
    #[serde(rename = "_key", default, deserialize_with = "nullable", skip_serializing_if = "String::is_empty")]
    pub key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub children: Vec<Span>,
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Vec::is_empty")]
    pub mark_defs: Vec<MarkDef>,
}

impl TextBlock {
    pub fn paragraph(text: impl Into<String>) -> Self {
        Self {
            key: String::new(),
            style: Some("normal".to_string()),
            children: vec![Span {
                key: String::new(),
                text: text.into(),
                marks: Vec::new(),
            }],
            mark_defs: Vec::new(),
        }
    }

    pub fn plain_text(&self) -> String {
        self.children.iter().map(|s| s.text.as_str()).collect()
    }
}

/// Rich text as stored: structured blocks from the store, or a plain
/// string (paragraphs separated by blank lines) from bundled data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RichText {
    Blocks(Vec<TextBlock>),
    Plain(String),
}

impl Default for RichText {
    fn default() -> Self {
        RichText::Blocks(Vec::new())
    }
}

impl RichText {
    pub fn is_blank(&self) -> bool {
        match self {
            RichText::Blocks(blocks) => blocks.iter().all(|b| b.plain_text().trim().is_empty()),
            RichText::Plain(text) => text.trim().is_empty(),
        }
    }

    /// Structured form; plain text is split into one block per paragraph.
    pub fn into_blocks(self) -> Vec<TextBlock> {
        match self {
            RichText::Blocks(blocks) => blocks,
            RichText::Plain(text) => text
                .split("\n\n")
                .map(str::trim)
                .filter(|p| !p.is_empty())
                .map(TextBlock::paragraph)
                .collect(),
        }
    }
}

// ============================================================================
// Sections
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TextSection {
    #[serde(rename = "_key", default, deserialize_with = "nullable")]
    pub key: String,
    #[serde(default)]
    pub heading: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub content: Vec<TextBlock>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VideoSection {
    #[serde(rename = "_key", default, deserialize_with = "nullable")]
    pub key: String,
    #[serde(default, deserialize_with = "nullable")]
    pub label: String,
    #[serde(default, deserialize_with = "nullable")]
    pub url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LinkListSection {
    #[serde(rename = "_key", default, deserialize_with = "nullable")]
    pub key: String,
    #[serde(default)]
    pub heading: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub links: Vec<LabeledLink>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImageGallerySection {
    #[serde(rename = "_key", default, deserialize_with = "nullable")]
    pub key: String,
    #[serde(default)]
    pub heading: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub images: Vec<ImageRef>,
}

/// One reorderable block of a project page.
///
/// Required fields are defaulted on decode so a half-authored block never
/// poisons the whole document; the normalizer drops incomplete blocks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "_type")]
pub enum Section {
    #[serde(rename = "textSection")]
    Text(TextSection),
    #[serde(rename = "videoEmbed")]
    Video(VideoSection),
    #[serde(rename = "linkList")]
    LinkList(LinkListSection),
    #[serde(rename = "imageGallery")]
    ImageGallery(ImageGallerySection),
    #[serde(other)]
    Unknown,
}

/// Legacy gallery entry: an uploaded image or an external video.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "_type")]
pub enum GalleryItem {
    #[serde(rename = "galleryImage")]
    Image(ImageRef),
    #[serde(rename = "galleryVideo")]
    Video {
        #[serde(default, deserialize_with = "nullable")]
        url: String,
        #[serde(default)]
        caption: Option<String>,
    },
    #[serde(other)]
    Unknown,
}

// ============================================================================
// Projects
// ============================================================================

/// Fixed-field content shape used before sections existed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LegacyContent {
    pub body: RichText,
    pub video_links: Vec<LabeledLink>,
    pub press_links: Vec<LabeledLink>,
    pub media_gallery: Vec<GalleryItem>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ProjectContent {
    Legacy(LegacyContent),
    Sections(Vec<Section>),
}

/// Project document exactly as the store returns it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectDocument {
    #[serde(rename = "_id", default, deserialize_with = "nullable")]
    pub id: String,
    #[serde(default, deserialize_with = "nullable")]
    pub title: String,
    #[serde(default, deserialize_with = "nullable")]
    pub slug: Slug,
    #[serde(default, deserialize_with = "lenient_order")]
    pub order: Option<i64>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub short_description: Option<String>,
    #[serde(default)]
    pub thumbnail: Option<ImageRef>,
    #[serde(default)]
    pub hero_image: Option<ImageRef>,
    #[serde(default)]
    pub body: Option<RichText>,
    #[serde(default)]
    pub video_links: Option<Vec<LabeledLink>>,
    #[serde(default)]
    pub press_links: Option<Vec<LabeledLink>>,
    #[serde(default)]
    pub media_gallery: Option<Vec<GalleryItem>>,
    #[serde(default)]
    pub sections: Option<Vec<Section>>,
}

/// A project with its content shape made explicit.
#[derive(Debug, Clone, PartialEq)]
pub struct Project {
    pub id: String,
    pub title: String,
    pub slug: String,
    pub order: Option<i64>,
    pub location: Option<String>,
    pub role: Option<String>,
    pub short_description: Option<String>,
    pub thumbnail: Option<ImageRef>,
    pub hero_image: Option<ImageRef>,
    pub content: ProjectContent,
}

impl From<ProjectDocument> for Project {
    fn from(doc: ProjectDocument) -> Self {
        let content = match doc.sections {
            Some(sections) => ProjectContent::Sections(sections),
            None => ProjectContent::Legacy(LegacyContent {
                body: doc.body.unwrap_or_default(),
                video_links: doc.video_links.unwrap_or_default(),
                press_links: doc.press_links.unwrap_or_default(),
                media_gallery: doc.media_gallery.unwrap_or_default(),
            }),
        };

        Self {
            id: doc.id,
            title: doc.title,
            slug: doc.slug.current,
            order: doc.order,
            location: doc.location,
            role: doc.role,
            short_description: doc.short_description,
            thumbnail: doc.thumbnail,
            hero_image: doc.hero_image,
            content,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectSummary {
    #[serde(rename = "_id", default, deserialize_with = "nullable")]
    pub id: String,
    #[serde(default, deserialize_with = "nullable")]
    pub title: String,
    #[serde(default, deserialize_with = "nullable")]
    pub slug: Slug,
    #[serde(default, deserialize_with = "lenient_order")]
    pub order: Option<i64>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub short_description: Option<String>,
    #[serde(default)]
    pub thumbnail: Option<ImageRef>,
}

/// Treats an explicit `null` like a missing key. Projections return `null`
/// for every unset field, so `default` alone is not enough.
fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Display order that tolerates malformed values: anything that is not an
/// integral number decodes to `None` rather than failing the document.
fn lenient_order<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| match v {
        serde_json::Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64)),
        _ => None,
    }))
}

// ============================================================================
// Singletons
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteSettings {
    #[serde(rename = "_id", default, deserialize_with = "nullable")]
    pub id: String,
    #[serde(default)]
    pub hero_video_url: Option<String>,
    #[serde(default)]
    pub hero_fallback_image: Option<ImageRef>,
    #[serde(default)]
    pub edit_reel_url: Option<String>,
    #[serde(default)]
    pub contact_email: Option<String>,
    #[serde(default)]
    pub contact_phone: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(rename = "forennMusicUrl", default)]
    pub music_url: Option<String>,
    #[serde(default)]
    pub resume_pdf: Option<FileRef>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AboutContent {
    #[serde(rename = "_id", default, deserialize_with = "nullable")]
    pub id: String,
    #[serde(default)]
    pub heading: Option<String>,
    #[serde(default)]
    pub profile_photo: Option<ImageRef>,
    #[serde(default)]
    pub bio_blocks: Option<Vec<TextBlock>>,
    #[serde(default)]
    pub pull_quote: Option<String>,
    #[serde(default)]
    pub pull_quote_subtext: Option<String>,
}

// ============================================================================
// Contact submissions
// ============================================================================

pub const CONTACT_SUBMISSION_TYPE: &str = "contactSubmission";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactSubmission {
    pub name: String,
    pub email: String,
    pub message: String,
    pub submitted_at: DateTime<Utc>,
    #[serde(default)]
    pub read: bool,
}

impl ContactSubmission {
    pub fn new(name: String, email: String, message: String, submitted_at: DateTime<Utc>) -> Self {
        Self {
            name,
            email,
            message,
            submitted_at,
            read: false,
        }
    }

    /// Store document for the `create` mutation.
    pub fn to_document(&self) -> serde_json::Value {
        let mut doc = serde_json::to_value(self).unwrap_or_else(|_| serde_json::json!({}));
        if let Some(map) = doc.as_object_mut() {
            map.insert(
                "_type".to_string(),
                serde_json::Value::String(CONTACT_SUBMISSION_TYPE.to_string()),
            );
        }
        doc
    }
}
