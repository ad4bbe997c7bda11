//! Slug resolver - turns a URL slug into page data

use std::sync::Arc;
use thiserror::Error;

use super::{EntryLoader, EntrySet, KeyTemplate, PostPage};

/// Errors produced while resolving a slug
#[derive(Debug, Error)]
pub enum ResolveError {
    /// No entry matches the slug
    #[error("Post not found: {slug}")]
    NotFound { slug: String },

    /// The entry exists but its loader failed
    #[error("Failed to load post {slug}: {source}")]
    Load {
        slug: String,
        #[source]
        source: anyhow::Error,
    },
}

impl ResolveError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ResolveError::NotFound { .. })
    }
}

/// Resolves slugs against a read-only entry set
#[derive(Debug, Clone)]
pub struct SlugResolver {
    entries: Arc<EntrySet>,
    template: KeyTemplate,
}

impl SlugResolver {
    /// Create a resolver using the default `../<slug>.svx` key template
    pub fn new(entries: Arc<EntrySet>) -> Self {
        Self::with_template(entries, KeyTemplate::default())
    }

    pub fn with_template(entries: Arc<EntrySet>, template: KeyTemplate) -> Self {
        Self { entries, template }
    }

    pub fn entries(&self) -> &EntrySet {
        &self.entries
    }

    pub fn template(&self) -> &KeyTemplate {
        &self.template
    }

    /// Find the loader for a slug without loading anything.
    ///
    /// Matching is by exact key, so input such as `../secret` can only hit an
    /// entry that was registered under that very key.
    pub fn lookup(&self, slug: &str) -> Result<&dyn EntryLoader, ResolveError> {
        let key = self.template.key_for(slug);
        match self.entries.get(&key) {
            Some(loader) => {
                tracing::debug!("Resolved slug {:?} to {}", slug, key);
                Ok(loader)
            }
            None => {
                tracing::debug!("No post for slug {:?} (key {})", slug, key);
                Err(ResolveError::NotFound {
                    slug: slug.to_string(),
                })
            }
        }
    }

    /// Resolve a slug to its page data
    pub async fn resolve(&self, slug: &str) -> Result<PostPage, ResolveError> {
        let loader = self.lookup(slug)?;
        let module = loader.load().await.map_err(|source| ResolveError::Load {
            slug: slug.to_string(),
            source,
        })?;
        Ok(PostPage::from(module))
    }

    /// Slugs of every entry whose key fits the template, in entry order
    pub fn slugs(&self) -> Vec<&str> {
        self.entries
            .keys()
            .filter_map(|key| self.template.slug_of(key))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{Content, PostMetadata, PostModule, StaticLoader};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn single_post() -> SlugResolver {
        let entries = EntrySet::builder()
            .insert(
                "../a.svx",
                StaticLoader::new(PostModule::new(
                    Content::new("../a.svx", "<p>Hi</p>"),
                    PostMetadata::new("Hello", "2024-01-01"),
                )),
            )
            .build();
        SlugResolver::new(Arc::new(entries))
    }

    /// Counts how often it is asked to load
    struct CountingLoader {
        calls: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl EntryLoader for CountingLoader {
        async fn load(&self) -> anyhow::Result<PostModule> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(PostModule::new(
                Content::new("../counted.svx", ""),
                PostMetadata::new("Counted", "2024-03-03"),
            ))
        }
    }

    struct FailingLoader;

    #[async_trait]
    impl EntryLoader for FailingLoader {
        async fn load(&self) -> anyhow::Result<PostModule> {
            anyhow::bail!("disk on fire")
        }
    }

    #[tokio::test]
    async fn test_resolve_existing_post() {
        let resolver = single_post();

        let page = resolver.resolve("a").await.unwrap();
        assert_eq!(page.content, Content::new("../a.svx", "<p>Hi</p>"));
        assert_eq!(page.metadata.title.as_deref(), Some("Hello"));
        assert_eq!(page.metadata.datetime.as_deref(), Some("2024-01-01"));
    }

    #[tokio::test]
    async fn test_resolve_missing_post() {
        let resolver = single_post();

        let err = resolver.resolve("b").await.unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "Post not found: b");
    }

    #[tokio::test]
    async fn test_not_found_message_keeps_slug_verbatim() {
        let resolver = single_post();

        for slug in ["", "A", "a.svx", "héllo wörld", "a/../a"] {
            let err = resolver.resolve(slug).await.unwrap_err();
            assert!(err.is_not_found());
            assert_eq!(err.to_string(), format!("Post not found: {}", slug));
        }
    }

    #[tokio::test]
    async fn test_path_like_slugs_are_not_normalized() {
        let entries = EntrySet::builder()
            .insert(
                "../secret.svx",
                StaticLoader::new(PostModule::new(
                    Content::new("../secret.svx", "classified"),
                    PostMetadata::new("Secret", "2024-01-01"),
                )),
            )
            .build();
        let resolver = SlugResolver::new(Arc::new(entries));

        assert!(resolver.resolve("secret").await.is_ok());
        for slug in ["../secret", "./secret", "x/../secret", "secret/"] {
            let err = resolver.resolve(slug).await.unwrap_err();
            assert_eq!(err.to_string(), format!("Post not found: {}", slug));
        }
    }

    #[tokio::test]
    async fn test_not_found_never_invokes_loader() {
        let calls = Arc::new(AtomicUsize::new(0));
        let entries = EntrySet::builder()
            .insert(
                "../counted.svx",
                CountingLoader {
                    calls: calls.clone(),
                },
            )
            .build();
        let resolver = SlugResolver::new(Arc::new(entries));

        assert!(resolver.lookup("other").is_err());
        assert!(resolver.resolve("other").await.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 0);

        resolver.resolve("counted").await.unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_repeated_resolves_agree() {
        let resolver = single_post();

        let first = resolver.resolve("a").await.unwrap();
        for _ in 0..3 {
            let again = resolver.resolve("a").await.unwrap();
            assert_eq!(again.metadata, first.metadata);
        }
    }

    #[tokio::test]
    async fn test_concurrent_resolves() {
        let resolver = single_post();

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let resolver = resolver.clone();
                tokio::spawn(async move {
                    let slug = if i % 2 == 0 { "a" } else { "b" };
                    resolver.resolve(slug).await.map(|page| page.metadata)
                })
            })
            .collect();

        for (i, handle) in handles.into_iter().enumerate() {
            let result = handle.await.unwrap();
            if i % 2 == 0 {
                assert_eq!(result.unwrap().title.as_deref(), Some("Hello"));
            } else {
                assert!(result.unwrap_err().is_not_found());
            }
        }
    }

    #[tokio::test]
    async fn test_loader_failure_is_not_a_404() {
        let entries = EntrySet::builder()
            .insert("../broken.svx", FailingLoader)
            .build();
        let resolver = SlugResolver::new(Arc::new(entries));

        let err = resolver.resolve("broken").await.unwrap_err();
        assert!(!err.is_not_found());
        assert!(err.to_string().contains("disk on fire"));
    }

    #[test]
    fn test_slugs_follow_template() {
        let entries = EntrySet::builder()
            .insert("../b.svx", FailingLoader)
            .insert("../a.svx", FailingLoader)
            .insert("../notes.md", FailingLoader)
            .build();
        let resolver = SlugResolver::new(Arc::new(entries));

        assert_eq!(resolver.slugs(), vec!["b", "a"]);
    }

    #[tokio::test]
    async fn test_custom_template() {
        let entries = EntrySet::builder()
            .insert(
                "posts/x.md",
                StaticLoader::new(PostModule::new(
                    Content::new("posts/x.md", ""),
                    PostMetadata::new("X", "2020-02-02"),
                )),
            )
            .build();
        let resolver =
            SlugResolver::with_template(Arc::new(entries), KeyTemplate::new("posts/", "md"));

        let page = resolver.resolve("x").await.unwrap();
        assert_eq!(page.metadata.datetime.as_deref(), Some("2020-02-02"));
        assert!(resolver.resolve("posts/x").await.is_err());
    }
}
