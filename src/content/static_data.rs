//! Bundled content used whenever the content store has nothing to offer.
//!
//! The project table mirrors what was published before the store was
//! seeded. Array position is the display order.

use once_cell::sync::Lazy;

use super::types::{
    ImageRef, LabeledLink, LegacyContent, MarkDef, Project, ProjectContent, RichText, Span,
    TextBlock,
};

// ============================================================================
// Site-wide constants
// ============================================================================

pub const PLACEHOLDER_IMAGE: &str = "/ns-profile-photo.png";
pub const EDIT_REEL_URL: &str = "https://youtu.be/rRqMH-W_4YY";

pub const CONTACT_EMAIL: &str = "hello@neilsandoz.com";
pub const CONTACT_PHONE: &str = "512-801-1314";
pub const CONTACT_LOCATION: &str = "Austin, Texas";
pub const RESUME_URL: &str = "/Neil Sandoz_Editor_Resume_2026.pdf";
pub const MUSIC_URL: &str = "https://forennmusic.com";

pub const ABOUT_HEADING: &str = "Hey, I'm Neil.";
pub const PROFILE_PHOTO_ALT: &str = "Neil Sandoz";
pub const PULL_QUOTE: &str =
    "I believe connection is the thread that runs through every good story.";
pub const PULL_QUOTE_SUBTEXT: &str =
    "If you're looking to connect your story to an audience in a meaningful way, I'd love to create something with you.";

const BIO_PARAGRAPHS: &[&str] = &[
    "I'm an editor who loves using creativity to help people communicate what really matters to them. I find energy and joy in partnering with others who are doing meaningful work, the kind of work with a story worth telling, and helping shape that story into something clear, honest, and compelling.",
    "Since 2010, I've been using cameras and computers as my primary tools, working across commercial, documentary, and nonprofit spaces. I bring deep creative instincts paired with the structure of someone who knows how to lead teams, be on teams, manage projects, and constantly deliver work that connects.",
    "For the past nine years, I've lived and worked in Nairobi, Kenya, producing films and leading creative teams across cultures and contexts. I've recently relocated back to my home state of Texas, settling in Austin. Giddy up!",
];

/// Bio as rich text. The closing paragraph links to the music project, so
/// the link target is whatever music URL the page resolved.
pub fn bio_blocks(music_url: &str) -> Vec<TextBlock> {
    let mut blocks: Vec<TextBlock> = BIO_PARAGRAPHS
        .iter()
        .enumerate()
        .map(|(i, p)| TextBlock {
            key: format!("bio-{i}"),
            ..TextBlock::paragraph(*p)
        })
        .collect();

    blocks.push(TextBlock {
        key: format!("bio-{}", BIO_PARAGRAPHS.len()),
        style: Some("normal".to_string()),
        children: vec![
            Span {
                key: "s0".to_string(),
                text: "Life is anchored by my sweet wife and our wild little boys. I also make music with close friends through ".to_string(),
                marks: Vec::new(),
            },
            Span {
                key: "s1".to_string(),
                text: "Forenn".to_string(),
                marks: vec!["music".to_string()],
            },
            Span {
                key: "s2".to_string(),
                text: ", and I love basketball, making things with my hands, and being outside.".to_string(),
                marks: Vec::new(),
            },
        ],
        mark_defs: vec![MarkDef {
            key: "music".to_string(),
            kind: "link".to_string(),
            href: Some(music_url.to_string()),
        }],
    });

    blocks
}

// ============================================================================
// Projects
// ============================================================================

pub struct StaticProject {
    pub slug: &'static str,
    pub title: &'static str,
    pub location: &'static str,
    pub role: &'static str,
    pub short_description: &'static str,
    pub body: &'static str,
    pub thumbnail: Option<&'static str>,
    /// (label, url)
    pub video_links: &'static [(&'static str, &'static str)],
    pub press_links: &'static [(&'static str, &'static str)],
}

pub static PROJECTS: &[StaticProject] = &[
    StaticProject {
        slug: "open-your-eyes",
        title: "Open Your Eyes",
        location: "Nairobi, Kenya",
        role: "Director, Camera Operator, Editor, Project Manager, Sound Design, Color",
        short_description: "In Kibera, Kenya, basketball isn't just a game; it's a lifeline. The court becomes a place to dream, to escape, to learn, to find family, and to hold on to something greater than the grind of everyday life.",
        body: r#"In Kibera, Kenya, basketball isn't just a game; it's a lifeline. The court becomes a place to dream, to escape, to learn, to find family, and to hold on to something greater than the grind of everyday life. Through sweat and grit, young players discover that challenges don't make their dreams less possible but more meaningful.

Open Your Eyes began as a passion project and grew into a full scale feature documentary that shaped me both personally and creatively. With nothing other than passion driving the process, the film became a space to experiment, push boundaries, and build an art piece centered on a profound truth that's true for these guys and girls in Kenya, true for me, true for you.

That theme became just as real in the making of the film as it was for the players we followed. With an all star producer at my side, Tony Tei — the project was built through collaboration, perseverance, and the contributions of dozens of people who poured thousands of hours into bringing it to life. The result is a story that reflects resilience, creativity, and the power of community.

Note: The film is currently in festival circulation, so the full documentary cannot be publicly shared yet."#,
        thumbnail: Some("https://img.youtube.com/vi/zudyjGIrVZI/maxresdefault.jpg"),
        video_links: &[
            ("Trailer", "https://youtu.be/zudyjGIrVZI?si=W1VDCL9bh9G_icMV"),
        ],
        press_links: &[
            ("Culture Custodian Article", "https://culturecustodian.com/neil-sandozs-open-your-eyes-documentary-underscores-the-reparative-effect-of-grassroots-targeted-sports/"),
        ],
    },
    StaticProject {
        slug: "uchi-school-of-fish",
        title: "Uchi – School of Fish",
        location: "Remote - Houston & Austin, Texas",
        role: "Editor, Motion Design, Sound Design, Music Supervision",
        short_description: "Uchi needed a fresh editorial vision for a series of 14 branded videos highlighting their craft, flavors, and approach to sushi.",
        body: r#"Uchi needed a fresh editorial vision for a series of 14 branded videos highlighting their craft, flavors, and approach to sushi. I was brought in by the fine folks at Filmlab to elevate the campaign's style and clarity while shaping the material into a compelling experience. The client provided scripts, rough outlines, and a small set of graphics, and from there I explored visual rhythm and pace.

I expanded and refined the graphic elements, created custom bumpers with musical cues, and animated the provided assets. The result was a polished series that felt cohesive and true to Uchi's artistry.

We delivered a set of short, shareable videos that both Filmlab and Uchi were genuinely excited about. And to date, I have never worked on a project that made me this consistently hungry. See you at Uchi sometime?"#,
        thumbnail: Some("https://vumbnail.com/1147821185.jpg"),
        video_links: &[
            ("School of Fish", "https://vimeo.com/1147821185/98d0487a11"),
            ("Episode 2", "https://youtu.be/h1UfC4jy9V4"),
            ("Episode 3", "https://youtu.be/l9BEA1bDZjk"),
            ("Episode 4", "https://youtu.be/oD1GO5CfppE"),
        ],
        press_links: &[],
    },
    StaticProject {
        slug: "the-golden-people",
        title: "The Golden People",
        location: "Aswan, Egypt",
        role: "Director, Camera Operator, Editor",
        short_description: "A personal film created while studying Arabic in an immersive environment, capturing the contrast between the desert and the Nile River.",
        body: r#"The Golden People was a personal film created while I was studying Arabic in an immersive environment in Aswan, Egypt. Living there, I became deeply aware of the contrast between the surrounding desert and the Nile River cutting through it. On both the east and west of the city lies harsh, unlivable land, yet along the Nile there is abundance, movement, and life. That tension became the foundation of the film.

I partnered with my friend Eslam Mohamed and set out with a simple goal: bring the camera along and pay attention. We documented everyday life and invited people to share what makes Aswan feel like home to them. There was no agenda beyond observing, listening, and honoring a specific place and moment in time.

I shot and edited the entire piece, allowing the film to take shape organically through rhythm, light, and human presence. With custom title animations by Evan Wright, the final film became a quiet portrait of place and people, capturing beauty that often goes unnoticed and preserving a fleeting season of life along the Nile."#,
        thumbnail: Some("https://img.youtube.com/vi/8V2VTcmkoP4/maxresdefault.jpg"),
        video_links: &[
            ("Watch Film", "https://youtu.be/8V2VTcmkoP4?si=DKVlywdzsJi5x6O1"),
        ],
        press_links: &[],
    },
    StaticProject {
        slug: "before-you-believe",
        title: "Before You Believe",
        location: "Remote - Houston, Texas",
        role: "Editor",
        short_description: "A cinematic commercial for City Church, a vibrant faith community in downtown Houston.",
        body: r#"City Church is a vibrant faith community in the heart of downtown Houston. My great friends at Filmlab thought this felt like a piece that would really fit my edit style. The church wanted a short, cinematic commercial that expressed who they are at their core: a creative and welcoming community of artists, parents, professionals, and thinkers. The goal was to make something that did not feel like a traditional church video, and with a combo of digital and 16mm footage — the tone of the piece was found quickly. The 16mm was such a delight to cut in!

I shaped the edit around the natural rhythm of the story, letting the imagery and pacing guide the flow. Music played a central role in capturing the emotional heart of the piece, and once we aligned on direction, the rest of the process moved quickly and smoothly. The film was completed with a custom logo animation that brought everything together.

The result is an artistic, cinematic portrait of a community that values authenticity, belonging, and beauty."#,
        thumbnail: Some("https://vumbnail.com/1136198575.jpg"),
        video_links: &[
            ("Watch Film", "https://vimeo.com/1136198575"),
        ],
        press_links: &[],
    },
    StaticProject {
        slug: "pan-african-academy",
        title: "The Pan-African Academy of Christian Surgeons",
        location: "Mandritsara, Madagascar",
        role: "Project Manager, Director, Camera Operator, Editor, Script Writing",
        short_description: "Two complementary films about surgical training and Good News Hospital in Madagascar.",
        body: r#"The PAACS team and Good News Hospital in Mandritsara, Madagascar reached out to create two distinct but complementary films. The first was a PAACS focused overview designed to explain the program itself, how it works, and why surgical training and discipleship are essential in a resource poor context. The second, titled We Have Good News to Share, centered on the hospital as a place, capturing its history, daily rhythms, and its deeper mission of combining medical excellence with Gospel witness.

I led both projects from concept through delivery, documenting day to day hospital life, directing interviews, and shaping each story with a clear editorial focus. The PAACS film emphasized structure, training, and long term impact, while the hospital film leaned into atmosphere, human connection, and purpose. Together, the two pieces offered both clarity and heart, giving viewers a full picture of the work happening in Mandritsara.

The finished videos were crafted to support fundraising, recruitment, and storytelling efforts, helping donors and potential trainees understand not only what PAACS and Good News Hospital do, but why their presence matters. The result is a paired set of films that work together to communicate vision, credibility, and hope."#,
        thumbnail: Some("https://img.youtube.com/vi/NFXt4Od6x8o/maxresdefault.jpg"),
        video_links: &[
            ("PAACS Overview", "https://www.youtube.com/watch?v=NFXt4Od6x8o"),
            ("We Have Good News to Share", "https://www.youtube.com/watch?v=H0iI4f7QoPY"),
        ],
        press_links: &[],
    },
    StaticProject {
        slug: "the-fork-in-the-road",
        title: "The Fork in the Road",
        location: "Addis Ababa & Soddo, Ethiopia",
        role: "Director, Camera Operator, Editor, Project Manager, Communications Coordinator, Script Writing, Custom Music Coordination",
        short_description: "A vision casting film for SIM Ethiopia that tells a story about choosing the untrodden path.",
        body: r#"SIM Ethiopia approached me to create a vision casting film that would communicate a significant shift in organizational priorities. Rather than relying on facts, data, or strategy language, the challenge was to express this change in a way that felt human, memorable, and invitational. The solution was to tell a story.

Working with the team I lead, we developed and pitched a narrative built around a real and symbolic moment from SIM's history. Over a century ago, missionaries stood at a fork in the road and chose one path that led to unexpected fruit. The film reflects on that decision while inviting viewers to consider the untrodden road that leads. The story unfolds like a conversation with a grandfather, sharing wisdom, history, and an invitation to take the next step.

I led the project from concept through delivery, shaping the script, directing and shooting on location, communicating with our Ethiopian production partners, and crafting the edit to support both inspiration and clarity. One of my favorite parts was working with an Ethiopian musician named Kibraeb Tassew to create a custom score using musical elements gathered in the field, grounding the film in place and culture. The final piece served as both a compelling vision statement and a clear call to action, and the SIM Ethiopia team felt the story captured the heart of where they believe God is leading them next."#,
        thumbnail: Some("https://img.youtube.com/vi/-exgXL3CnAo/maxresdefault.jpg"),
        video_links: &[
            ("Watch Film", "https://youtu.be/-exgXL3CnAo?si=9Hs4we5wWMKr7AuP"),
        ],
        press_links: &[],
    },
    StaticProject {
        slug: "wellsky-brand-promo",
        title: "WellSky Brand Promo",
        location: "Remote - Houston, TX",
        role: "Editor, Animator, Music Coordinator",
        short_description: "A promotional film for WellSky, built primarily from stock assets, transformed into a unified and engaging story.",
        body: r#"WellSky is a technology company working at the forefront of intelligent, coordinated care across the global health and community care continuum. Filmlab, a long term creative partner, brought me in to help edit a short promotional film that clearly and confidently communicated WellSky's mission, impact, and vision.

The project presented a creative challenge due to limited original footage, requiring the story to be built primarily from stock assets. I embraced this constraint by carefully curating and shaping visually diverse material into a cohesive narrative that supported the script and brand message. Through pacing, rhythm, and thoughtful transitions, the edit transformed unrelated visuals into a unified and engaging story.

I was given wide creative freedom to explore structure, tone, and visual flow, as well as to incorporate custom animation and music direction. The final piece delivered a polished, modern brand film that WellSky was excited to share, and the process reinforced the value of trust and collaboration between creative partners."#,
        thumbnail: Some("https://vumbnail.com/385106794.jpg"),
        video_links: &[
            ("Watch Film", "https://vimeo.com/385106794/a4bf200b87"),
        ],
        press_links: &[],
    },
];

static BUNDLED: Lazy<Vec<Project>> = Lazy::new(|| {
    PROJECTS
        .iter()
        .enumerate()
        .map(|(i, p)| p.to_project(i))
        .collect()
});

impl StaticProject {
    fn to_project(&self, index: usize) -> Project {
        let links = |pairs: &[(&str, &str)]| -> Vec<LabeledLink> {
            pairs
                .iter()
                .map(|(label, url)| LabeledLink::new(*label, *url))
                .collect()
        };

        Project {
            id: self.slug.to_string(),
            title: self.title.to_string(),
            slug: self.slug.to_string(),
            order: Some(index as i64 + 1),
            location: Some(self.location.to_string()),
            role: Some(self.role.to_string()),
            short_description: Some(self.short_description.to_string()),
            thumbnail: self.thumbnail.map(ImageRef::from_url),
            hero_image: None,
            content: ProjectContent::Legacy(LegacyContent {
                body: RichText::Plain(self.body.to_string()),
                video_links: links(self.video_links),
                press_links: links(self.press_links),
                media_gallery: Vec::new(),
            }),
        }
    }
}

/// All bundled projects in display order.
pub fn projects() -> &'static [Project] {
    BUNDLED.as_slice()
}

/// Bundled project and its position in the list.
pub fn find_project(slug: &str) -> Option<(usize, &'static Project)> {
    projects().iter().enumerate().find(|(_, p)| p.slug == slug)
}

pub fn slugs() -> Vec<String> {
    PROJECTS.iter().map(|p| p.slug.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_bundled_slugs_are_unique() {
        let slugs = slugs();
        let unique: HashSet<_> = slugs.iter().collect();
        assert_eq!(unique.len(), slugs.len());
    }

    #[test]
    fn test_bundled_orders_follow_array_position() {
        for (i, project) in projects().iter().enumerate() {
            assert_eq!(project.order, Some(i as i64 + 1));
        }
    }

    #[test]
    fn test_every_project_has_title_and_video() {
        for project in PROJECTS {
            assert!(!project.title.trim().is_empty());
            assert!(!project.video_links.is_empty(), "{}", project.slug);
        }
    }

    #[test]
    fn test_find_project_returns_index() {
        let (index, project) = find_project("the-golden-people").unwrap();
        assert_eq!(index, 2);
        assert_eq!(project.title, "The Golden People");
        assert!(find_project("does-not-exist").is_none());
    }

    #[test]
    fn test_bio_links_to_resolved_music_url() {
        let blocks = bio_blocks("https://example.com/music");
        let last = blocks.last().unwrap();
        assert_eq!(
            last.mark_defs[0].href.as_deref(),
            Some("https://example.com/music")
        );
        assert_eq!(blocks.len(), BIO_PARAGRAPHS.len() + 1);
    }
}
