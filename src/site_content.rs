// src/site_content.rs
use crate::error::SiteError;
use serde::{Deserialize, Serialize};

const EMBEDDED_CONTENT: &str = include_str!("../assets/content.json");

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteContent {
    pub headline: String,
    pub blocks: Vec<ContentBlock>,
    #[serde(default)]
    pub hidden_blocks: Vec<ContentBlock>,
    pub link: LinkSection,
    pub teaser: Teaser,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ContentBlock {
    Paragraph { inlines: Vec<Inline> },
    List { items: Vec<Vec<Inline>> },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Inline {
    Text { content: String },
    Strong { content: String },
    Emphasis { content: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InlineKind {
    Text,
    Strong,
    Emphasis,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkSection {
    pub title: String,
    pub image: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Teaser {
    pub image: String,
    pub caption: String,
}

impl SiteContent {
    /// Parse the site copy bundled into the binary.
    pub fn load() -> Result<Self, SiteError> {
        Self::from_json(EMBEDDED_CONTENT)
    }

    pub fn from_json(json: &str) -> Result<Self, SiteError> {
        serde_json::from_str(json).map_err(SiteError::Content)
    }

    /// Blocks currently on screen, in document order. Hidden blocks follow
    /// the always-visible ones once the read-more toggle is expanded.
    pub fn visible_blocks(&self, expanded: bool) -> impl Iterator<Item = (&ContentBlock, bool)> {
        let hidden: &[ContentBlock] = if expanded { &self.hidden_blocks } else { &[] };
        self.blocks
            .iter()
            .map(|block| (block, false))
            .chain(hidden.iter().map(|block| (block, true)))
    }
}

impl Inline {
    pub fn kind(&self) -> InlineKind {
        match self {
            Inline::Text { .. } => InlineKind::Text,
            Inline::Strong { .. } => InlineKind::Strong,
            Inline::Emphasis { .. } => InlineKind::Emphasis,
        }
    }

    pub fn content(&self) -> &str {
        match self {
            Inline::Text { content } | Inline::Strong { content } | Inline::Emphasis { content } => {
                content.as_str()
            }
        }
    }
}
