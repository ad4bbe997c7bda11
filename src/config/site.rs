//! Site configuration (_config.yml)

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub url: String,

    // Posts
    /// Directory (relative to the base dir) holding the post source files
    pub posts_dir: String,
    /// Extension of post source files, without the dot
    pub extension: String,
    /// Virtual namespace prepended to every entry key
    pub key_prefix: String,

    // Serving
    /// Route under which posts are served, e.g. `/blog`
    pub route: String,

    // Writing
    pub new_post_name: String,

    // Store any additional fields
    #[serde(flatten)]
    pub extra: HashMap<String, serde_yaml::Value>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Blog".to_string(),
            url: "http://example.com".to_string(),

            posts_dir: "src/routes/blog".to_string(),
            extension: "svx".to_string(),
            key_prefix: "../".to_string(),

            route: "/blog".to_string(),

            new_post_name: ":title".to_string(),

            extra: HashMap::new(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: SiteConfig = serde_yaml::from_str(&content)?;
        tracing::debug!("Loaded site config from {:?}", path.as_ref());
        Ok(config)
    }

    /// The route with surrounding slashes normalized, e.g. `/blog`.
    /// An empty route (posts at the site root) yields an empty string.
    pub fn route_base(&self) -> String {
        let trimmed = self.route.trim_matches('/');
        if trimmed.is_empty() {
            String::new()
        } else {
            format!("/{}", trimmed)
        }
    }
}
