//! Query descriptors and their GROQ rendering.

use serde_json::{json, Map, Value};

pub const PROJECT: &str = "project";
pub const SITE_SETTINGS: &str = "siteSettings";
pub const ABOUT_CONTENT: &str = "aboutContent";

const PROJECT_SUMMARY_FIELDS: &str =
    "_id, title, slug, order, location, role, shortDescription, thumbnail{..., asset->}";

const PROJECT_FULL_FIELDS: &str = "_id, title, slug, order, location, role, shortDescription, \
     heroImage{..., asset->}, thumbnail{..., asset->}, \
     body[]{..., markDefs[]{..., _type == \"link\" => { href }}}, \
     videoLinks[]{_key, label, url}, pressLinks[]{_key, label, url}, \
     mediaGallery[]{..., _type == \"galleryImage\" => {..., asset->}, _type == \"galleryVideo\" => {url, caption}}, \
     sections[]{..., _type == \"imageGallery\" => {..., images[]{..., asset->}}}";

const ABOUT_FIELDS: &str = "_id, heading, profilePhoto{..., asset->}, \
     bioBlocks[]{..., markDefs[]{..., _type == \"link\" => { href }}}, pullQuote, pullQuoteSubtext";

const SETTINGS_FIELDS: &str = "..., heroFallbackImage{..., asset->}, resumePdf{asset->{_id, url}}";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderFilter {
    Before(i64),
    After(i64),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Asc,
    Desc,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cardinality {
    First,
    All,
}

/// What to fetch: document type, optional filters, ordering, and shape.
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    pub doc_type: &'static str,
    pub slug: Option<String>,
    pub order: Option<OrderFilter>,
    pub sort: Option<Direction>,
    pub cardinality: Cardinality,
    pub projection: Option<&'static str>,
}

impl Query {
    pub fn new(doc_type: &'static str) -> Self {
        Self {
            doc_type,
            slug: None,
            order: None,
            sort: None,
            cardinality: Cardinality::All,
            projection: None,
        }
    }

    pub fn slug(mut self, slug: impl Into<String>) -> Self {
        self.slug = Some(slug.into());
        self
    }

    pub fn order(mut self, filter: OrderFilter) -> Self {
        self.order = Some(filter);
        self
    }

    pub fn sort(mut self, direction: Direction) -> Self {
        self.sort = Some(direction);
        self
    }

    pub fn first(mut self) -> Self {
        self.cardinality = Cardinality::First;
        self
    }

    pub fn project(mut self, fields: &'static str) -> Self {
        self.projection = Some(fields);
        self
    }

    // ------------------------------------------------------------------------
    // Canned queries
    // ------------------------------------------------------------------------

    pub fn project_by_slug(slug: &str) -> Self {
        Query::new(PROJECT)
            .slug(slug)
            .first()
            .project(PROJECT_FULL_FIELDS)
    }

    pub fn all_projects() -> Self {
        Query::new(PROJECT)
            .sort(Direction::Asc)
            .project(PROJECT_SUMMARY_FIELDS)
    }

    pub fn all_slugs() -> Self {
        Query::new(PROJECT).project("slug")
    }

    /// Project with the greatest order below `order`.
    pub fn previous_project(order: i64) -> Self {
        Query::new(PROJECT)
            .order(OrderFilter::Before(order))
            .sort(Direction::Desc)
            .first()
            .project(PROJECT_SUMMARY_FIELDS)
    }

    /// Project with the least order above `order`.
    pub fn next_project(order: i64) -> Self {
        Query::new(PROJECT)
            .order(OrderFilter::After(order))
            .sort(Direction::Asc)
            .first()
            .project(PROJECT_SUMMARY_FIELDS)
    }

    pub fn site_settings() -> Self {
        Query::new(SITE_SETTINGS).first().project(SETTINGS_FIELDS)
    }

    pub fn about_content() -> Self {
        Query::new(ABOUT_CONTENT).first().project(ABOUT_FIELDS)
    }

    /// GROQ text plus the parameters it references (keys without `$`).
    pub fn to_groq(&self) -> (String, Map<String, Value>) {
        let mut params = Map::new();
        let mut filter = format!("_type == \"{}\"", self.doc_type);

        if let Some(slug) = &self.slug {
            filter.push_str(" && slug.current == $slug");
            params.insert("slug".to_string(), json!(slug));
        }

        match self.order {
            Some(OrderFilter::Before(n)) => {
                filter.push_str(" && order < $order");
                params.insert("order".to_string(), json!(n));
            }
            Some(OrderFilter::After(n)) => {
                filter.push_str(" && order > $order");
                params.insert("order".to_string(), json!(n));
            }
            None => {}
        }

        let mut groq = format!("*[{filter}]");

        if let Some(direction) = self.sort {
            let dir = match direction {
                Direction::Asc => "asc",
                Direction::Desc => "desc",
            };
            groq.push_str(&format!(" | order(order {dir})"));
        }

        if self.cardinality == Cardinality::First {
            groq.push_str("[0]");
        }

        if let Some(fields) = self.projection {
            groq.push_str(&format!("{{ {fields} }}"));
        }

        (groq, params)
    }
}
