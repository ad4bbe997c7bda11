//! Front-matter parsing for post source files

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};

/// Custom deserializer that accepts any YAML scalar as text.
///
/// Numbers and booleans arrive already typed, so `1.0` comes out as `"1"`.
/// [`PostMetadata::parse`] puts the source text back for `title` and `date`.
fn scalar_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::{self, Visitor};
    use std::fmt;

    struct ScalarString;

    impl<'de> Visitor<'de> for ScalarString {
        type Value = Option<String>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a string, number or boolean")
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Some(value.to_string()))
        }

        fn visit_string<E>(self, value: String) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Some(value))
        }

        fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Some(value.to_string()))
        }

        fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Some(value.to_string()))
        }

        fn visit_f64<E>(self, value: f64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Some(value.to_string()))
        }

        fn visit_bool<E>(self, value: bool) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Some(value.to_string()))
        }

        fn visit_none<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(None)
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(None)
        }
    }

    deserializer.deserialize_any(ScalarString)
}

/// Metadata block of a post: the `title` and `date` the page needs, plus
/// whatever else the author put in the front matter.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PostMetadata {
    #[serde(deserialize_with = "scalar_string", skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Opaque date string, never parsed
    #[serde(deserialize_with = "scalar_string", skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,

    /// Additional custom fields, in source order
    #[serde(flatten)]
    pub extra: IndexMap<String, serde_yaml::Value>,
}

impl PostMetadata {
    /// Create metadata with a title and date
    pub fn new(title: impl Into<String>, date: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            date: Some(date.into()),
            extra: IndexMap::new(),
        }
    }

    /// Split a post source into its front matter and body.
    ///
    /// A source without a `---` fenced YAML block, or whose block fails to
    /// deserialize, yields empty metadata and the source unchanged.
    pub fn parse(source: &str) -> (Self, &str) {
        let trimmed = source.trim_start();

        let Some(rest) = trimmed.strip_prefix("---") else {
            return (Self::default(), source);
        };
        let rest = rest.trim_start_matches([' ', '\t', '\r', '\n']);

        // Empty block: the closing fence follows the opening one directly
        if let Some(body) = rest.strip_prefix("---") {
            return (Self::default(), body.trim_start_matches(['\r', '\n']));
        }

        let Some(end) = rest.find("\n---") else {
            return (Self::default(), source);
        };
        let yaml = &rest[..end];
        let body = rest[end + 4..].trim_start_matches(['\r', '\n']);

        if yaml.trim().is_empty() {
            return (Self::default(), body);
        }

        if !looks_like_yaml(yaml) {
            return (Self::default(), source);
        }

        match serde_yaml::from_str::<PostMetadata>(yaml) {
            Ok(mut metadata) => {
                if let Some(raw) = typed_scalar_text(yaml, "title") {
                    metadata.title = Some(raw.to_string());
                }
                if let Some(raw) = typed_scalar_text(yaml, "date") {
                    metadata.date = Some(raw.to_string());
                }
                (metadata, body)
            }
            Err(e) => {
                tracing::warn!("Failed to parse front-matter, treating as content: {}", e);
                (Self::default(), source)
            }
        }
    }
}

/// Source text of a top-level `key: value` line whose value YAML reads as a
/// number or boolean, e.g. `2024.10` or `0x1F`. Strings are left to serde.
fn typed_scalar_text<'a>(block: &'a str, key: &str) -> Option<&'a str> {
    let value = block.lines().find_map(|line| {
        let value = line.strip_prefix(key)?.strip_prefix(':')?;
        if !value.is_empty() && !value.starts_with([' ', '\t']) {
            return None;
        }
        // Trailing comment
        let value = match value.find(" #") {
            Some(pos) => &value[..pos],
            None => value,
        };
        Some(value.trim())
    })?;

    match serde_yaml::from_str::<serde_yaml::Value>(value).ok()? {
        serde_yaml::Value::Number(_) | serde_yaml::Value::Bool(_) => Some(value),
        _ => None,
    }
}

/// A block counts as front matter when at least one line is a `key: value`
/// mapping entry. A `---` used as a markdown rule is followed by prose.
fn looks_like_yaml(block: &str) -> bool {
    block.lines().map(str::trim).any(|line| {
        if line.is_empty() || line.starts_with('#') {
            return false;
        }
        let Some((key, value)) = line.split_once(':') else {
            return false;
        };
        let plain_key = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        // "https://..." has a key-shaped scheme but no space after the colon
        plain_key && (value.is_empty() || value.starts_with(' '))
    })
}
