//! Section normalization.
//!
//! Both project content shapes become one ordered list of render blocks.
//! Legacy records are synthesized as body, then one video per link, then
//! press links. Section lists pass through in authoring order.

use serde::Serialize;

use super::fallback::gallery_alt;
use super::image::{self, ImageUrlBuilder};
use super::types::{LabeledLink, LegacyContent, ProjectContent, Section, TextBlock};
use super::video::{self, VideoEmbed};

pub const BLOCK_DELAY_BASE_MS: u64 = 80;
pub const BLOCK_DELAY_STEP_MS: u64 = 40;

const PRESS_HEADING: &str = "Press";

/// Entrance delay for the block at `position`.
pub fn block_delay_ms(position: usize) -> u64 {
    BLOCK_DELAY_BASE_MS + position as u64 * BLOCK_DELAY_STEP_MS
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GalleryImage {
    pub thumb_url: String,
    pub full_url: String,
    pub alt: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum BlockKind {
    Text {
        heading: Option<String>,
        body: Vec<TextBlock>,
    },
    Video {
        label: String,
        url: String,
        embed: Option<VideoEmbed>,
    },
    LinkList {
        heading: Option<String>,
        links: Vec<LabeledLink>,
    },
    ImageGallery {
        heading: Option<String>,
        images: Vec<GalleryImage>,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderBlock {
    pub key: String,
    pub delay_ms: u64,
    #[serde(flatten)]
    pub kind: BlockKind,
}

/// Normalize project content into render blocks. `title` feeds generated
/// gallery alt text.
pub fn normalize(
    content: &ProjectContent,
    title: &str,
    images: &ImageUrlBuilder,
) -> Vec<RenderBlock> {
    let keyed = match content {
        ProjectContent::Legacy(legacy) => from_legacy(legacy),
        ProjectContent::Sections(sections) => from_sections(sections, title, images),
    };

    keyed
        .into_iter()
        .enumerate()
        .map(|(position, (key, kind))| RenderBlock {
            key,
            delay_ms: block_delay_ms(position),
            kind,
        })
        .collect()
}

fn non_blank(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

fn video_block(label: &str, url: &str) -> BlockKind {
    BlockKind::Video {
        label: label.to_string(),
        url: url.to_string(),
        embed: video::parse_embed(url),
    }
}

fn from_legacy(legacy: &LegacyContent) -> Vec<(String, BlockKind)> {
    let mut blocks = Vec::with_capacity(legacy.video_links.len() + 2);

    blocks.push((
        "body".to_string(),
        BlockKind::Text {
            heading: None,
            body: legacy.body.clone().into_blocks(),
        },
    ));

    for (i, link) in legacy.video_links.iter().enumerate() {
        let key = if link.key.is_empty() {
            format!("video-{i}")
        } else {
            link.key.clone()
        };
        blocks.push((key, video_block(&link.label, &link.url)));
    }

    let press: Vec<LabeledLink> = legacy
        .press_links
        .iter()
        .filter(|l| l.is_complete())
        .cloned()
        .collect();
    if !press.is_empty() {
        blocks.push((
            "press".to_string(),
            BlockKind::LinkList {
                heading: Some(PRESS_HEADING.to_string()),
                links: press,
            },
        ));
    }

    blocks
}

fn from_sections(
    sections: &[Section],
    title: &str,
    images: &ImageUrlBuilder,
) -> Vec<(String, BlockKind)> {
    sections
        .iter()
        .enumerate()
        .filter_map(|(i, section)| {
            let (key, kind) = match section {
                Section::Text(s) => (
                    &s.key,
                    Some(BlockKind::Text {
                        heading: non_blank(&s.heading),
                        body: s.content.clone(),
                    }),
                ),
                Section::Video(s) => (
                    &s.key,
                    (!s.url.trim().is_empty()).then(|| video_block(&s.label, s.url.trim())),
                ),
                Section::LinkList(s) => {
                    let links: Vec<LabeledLink> =
                        s.links.iter().filter(|l| l.is_complete()).cloned().collect();
                    (
                        &s.key,
                        (!links.is_empty()).then(|| BlockKind::LinkList {
                            heading: non_blank(&s.heading),
                            links,
                        }),
                    )
                }
                Section::ImageGallery(s) => {
                    let gallery: Vec<GalleryImage> = s
                        .images
                        .iter()
                        .enumerate()
                        .map(|(n, img)| GalleryImage {
                            thumb_url: images.url_or_placeholder(Some(img), image::GALLERY_THUMB),
                            full_url: images.url_or_placeholder(Some(img), image::GALLERY_FULL),
                            alt: gallery_alt(img, title, n),
                            caption: non_blank(&img.caption),
                        })
                        .collect();
                    (
                        &s.key,
                        (!gallery.is_empty()).then(|| BlockKind::ImageGallery {
                            heading: non_blank(&s.heading),
                            images: gallery,
                        }),
                    )
                }
                Section::Unknown => {
                    tracing::debug!(position = i, "skipping section of unknown type");
                    return None;
                }
            };

            let Some(kind) = kind else {
                tracing::debug!(position = i, key = %key, "skipping incomplete section");
                return None;
            };

            let key = if key.is_empty() {
                format!("section-{i}")
            } else {
                key.clone()
            };
            Some((key, kind))
        })
        .collect()
}
