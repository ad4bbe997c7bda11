//! Entry set - the fixed mapping from entry keys to post loaders

use anyhow::{Context, Result};
use async_trait::async_trait;
use indexmap::IndexMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::{Content, KeyTemplate, PostMetadata, PostModule};

/// Materializes one post on demand
#[async_trait]
pub trait EntryLoader: Send + Sync {
    async fn load(&self) -> Result<PostModule>;
}

/// Loader for a post that is already in memory
#[derive(Debug, Clone)]
pub struct StaticLoader {
    module: PostModule,
}

impl StaticLoader {
    pub fn new(module: PostModule) -> Self {
        Self { module }
    }
}

#[async_trait]
impl EntryLoader for StaticLoader {
    async fn load(&self) -> Result<PostModule> {
        Ok(self.module.clone())
    }
}

/// Loader that reads a post source file each time it is invoked
#[derive(Debug, Clone)]
pub struct FileLoader {
    key: String,
    path: PathBuf,
}

impl FileLoader {
    pub fn new(key: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            key: key.into(),
            path: path.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl EntryLoader for FileLoader {
    async fn load(&self) -> Result<PostModule> {
        let source = tokio::fs::read_to_string(&self.path)
            .await
            .with_context(|| format!("Failed to read post {:?}", self.path))?;
        let (metadata, body) = PostMetadata::parse(&source);

        if metadata.title.is_none() {
            tracing::warn!("Post {} has no title in its front-matter", self.key);
        }
        if metadata.date.is_none() {
            tracing::warn!("Post {} has no date in its front-matter", self.key);
        }

        tracing::debug!("Loaded post {} from {:?}", self.key, self.path);
        Ok(PostModule::new(Content::new(self.key.as_str(), body), metadata))
    }
}

/// Immutable mapping from entry key to loader.
///
/// Iteration follows insertion order.
#[derive(Clone, Default)]
pub struct EntrySet {
    entries: IndexMap<String, Arc<dyn EntryLoader>>,
}

impl EntrySet {
    pub fn builder() -> EntrySetBuilder {
        EntrySetBuilder::default()
    }

    /// Enumerate `dir/*.<ext>` and register a file loader for each match,
    /// keyed by the template prefix followed by the file name.
    ///
    /// Only the top level of `dir` is scanned. A missing directory gives an
    /// empty set.
    pub fn scan(dir: &Path, template: &KeyTemplate) -> Result<Self> {
        if !dir.exists() {
            tracing::debug!("Posts directory {:?} does not exist", dir);
            return Ok(Self::default());
        }

        let dir_str = dir
            .to_str()
            .with_context(|| format!("Posts directory is not valid UTF-8: {:?}", dir))?;
        let pattern = format!(
            "{}/*.{}",
            glob::Pattern::escape(dir_str.trim_end_matches('/')),
            glob::Pattern::escape(template.extension())
        );
        let options = glob::MatchOptions {
            require_literal_leading_dot: true,
            ..Default::default()
        };

        let mut builder = Self::builder();
        for entry in glob::glob_with(&pattern, options)? {
            let path = match entry {
                Ok(path) => path,
                Err(e) => {
                    tracing::warn!("Failed to read posts entry: {}", e);
                    continue;
                }
            };
            if !path.is_file() {
                continue;
            }
            let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
                tracing::warn!("Skipping post with non UTF-8 file name: {:?}", path);
                continue;
            };
            // Hidden files, including a bare `.svx`
            if file_name.starts_with('.') {
                tracing::debug!("Skipping hidden file {:?}", path);
                continue;
            }

            let key = format!("{}{}", template.prefix(), file_name);
            builder = builder.insert(key.clone(), FileLoader::new(key, path));
        }

        let set = builder.build();
        tracing::debug!("Found {} posts in {:?}", set.len(), dir);
        Ok(set)
    }

    pub fn get(&self, key: &str) -> Option<&dyn EntryLoader> {
        self.entries.get(key).map(|loader| loader.as_ref())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl std::fmt::Debug for EntrySet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(self.entries.keys()).finish()
    }
}

/// Collects entries before freezing them into an [`EntrySet`]
#[derive(Default)]
pub struct EntrySetBuilder {
    entries: IndexMap<String, Arc<dyn EntryLoader>>,
}

impl EntrySetBuilder {
    /// Register a loader under `key`. A repeated key replaces the earlier
    /// loader but keeps its position.
    pub fn insert(mut self, key: impl Into<String>, loader: impl EntryLoader + 'static) -> Self {
        let key = key.into();
        if self.entries.insert(key.clone(), Arc::new(loader)).is_some() {
            tracing::debug!("Replacing loader for {}", key);
        }
        self
    }

    pub fn build(self) -> EntrySet {
        EntrySet {
            entries: self.entries,
        }
    }
}
