//! Mapping between slugs and entry keys

use crate::config::SiteConfig;

/// Template that embeds a slug into the entry namespace.
///
/// With the defaults, slug `hello` maps to key `../hello.svx`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyTemplate {
    prefix: String,
    extension: String,
}

impl KeyTemplate {
    pub fn new(prefix: impl Into<String>, extension: &str) -> Self {
        Self {
            prefix: prefix.into(),
            extension: extension.trim_start_matches('.').to_string(),
        }
    }

    pub fn from_config(config: &SiteConfig) -> Self {
        Self::new(config.key_prefix.clone(), &config.extension)
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Extension without the leading dot
    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// Build the lookup key for a slug. The slug is embedded verbatim.
    pub fn key_for(&self, slug: &str) -> String {
        format!("{}{}.{}", self.prefix, slug, self.extension)
    }

    /// Recover the slug from a key, if the key fits this template
    pub fn slug_of<'k>(&self, key: &'k str) -> Option<&'k str> {
        key.strip_prefix(self.prefix.as_str())?
            .strip_suffix(self.extension.as_str())?
            .strip_suffix('.')
    }
}

impl Default for KeyTemplate {
    fn default() -> Self {
        Self::new("../", "svx")
    }
}
