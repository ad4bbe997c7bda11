//! blogpage: page-data loader for a statically generated blog
//!
//! Resolves a URL slug to one of a fixed set of post entries and returns the
//! post's renderable content with its title and date, or a not-found error.

pub mod commands;
pub mod config;
pub mod content;
pub mod server;

use anyhow::Result;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use content::{EntrySet, KeyTemplate, SlugResolver};

/// A blog rooted at a base directory
#[derive(Debug, Clone)]
pub struct Blog {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: PathBuf,
    /// Directory holding the post source files
    pub posts_dir: PathBuf,
}

impl Blog {
    /// Create a new Blog instance from a directory
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join("_config.yml");

        let config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            config::SiteConfig::default()
        };

        let posts_dir = base_dir.join(&config.posts_dir);

        Ok(Self {
            config,
            base_dir,
            posts_dir,
        })
    }

    /// Key template derived from the site configuration
    pub fn key_template(&self) -> KeyTemplate {
        KeyTemplate::from_config(&self.config)
    }

    /// Enumerate the posts directory into an entry set
    pub fn load_entries(&self) -> Result<EntrySet> {
        EntrySet::scan(&self.posts_dir, &self.key_template())
    }

    /// Build a resolver over the posts currently on disk
    pub fn resolver(&self) -> Result<SlugResolver> {
        let entries = self.load_entries()?;
        tracing::info!("Loaded {} posts from {:?}", entries.len(), self.posts_dir);
        Ok(SlugResolver::with_template(
            Arc::new(entries),
            self.key_template(),
        ))
    }

    /// Create a new post, returning the path of the written file
    pub fn new_post(&self, title: &str, slug: Option<&str>) -> Result<PathBuf> {
        commands::new::create_post(self, title, slug)
    }
}
