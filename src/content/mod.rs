//! Content module - post entries, their metadata, and slug resolution

mod entries;
mod frontmatter;
mod key;
mod post;
mod resolver;

pub use entries::{EntryLoader, EntrySet, EntrySetBuilder, FileLoader, StaticLoader};
pub use frontmatter::PostMetadata;
pub use key::KeyTemplate;
pub use post::{Content, PageMetadata, PostModule, PostPage};
pub use resolver::{ResolveError, SlugResolver};
