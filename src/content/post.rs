//! Post modules and the page data built from them

use serde::{Deserialize, Serialize};

use super::PostMetadata;

/// The renderable unit of a post.
///
/// The resolver never looks inside; it is handed to the rendering layer as is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Content {
    /// Entry key the content was loaded from
    pub source: String,

    /// Post body with the front matter removed
    pub body: String,
}

impl Content {
    pub fn new(source: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            body: body.into(),
        }
    }
}

/// What an entry loader materializes: the content plus its metadata
#[derive(Debug, Clone, PartialEq)]
pub struct PostModule {
    pub content: Content,
    pub metadata: PostMetadata,
}

impl PostModule {
    pub fn new(content: Content, metadata: PostMetadata) -> Self {
        Self { content, metadata }
    }
}

/// Page data returned for a resolved slug
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostPage {
    pub content: Content,
    pub metadata: PageMetadata,
}

/// Metadata as exposed to the page. Absent fields stay absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PageMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub datetime: Option<String>,
}

impl From<PostModule> for PostPage {
    fn from(module: PostModule) -> Self {
        let PostModule { content, metadata } = module;
        Self {
            content,
            metadata: PageMetadata {
                title: metadata.title,
                datetime: metadata.date,
            },
        }
    }
}
