//! Resolve a single slug and print its page data

use anyhow::Result;

use crate::Blog;

/// Resolve `slug` and return the page data as pretty JSON
pub async fn render(blog: &Blog, slug: &str) -> Result<String> {
    let resolver = blog.resolver()?;
    let page = resolver.resolve(slug).await?;
    Ok(serde_json::to_string_pretty(&page)?)
}

/// Run the resolve command
pub async fn run(blog: &Blog, slug: &str) -> Result<()> {
    println!("{}", render(blog, slug).await?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_render_page_json() {
        let dir = TempDir::new().unwrap();
        let blog = Blog::new(dir.path()).unwrap();
        fs::create_dir_all(&blog.posts_dir).unwrap();
        fs::write(
            blog.posts_dir.join("a.svx"),
            "---\ntitle: Hello\ndate: 2024-01-01\n---\nBody",
        )
        .unwrap();

        let json: serde_json::Value =
            serde_json::from_str(&render(&blog, "a").await.unwrap()).unwrap();
        assert_eq!(json["metadata"]["title"], "Hello");
        assert_eq!(json["metadata"]["datetime"], "2024-01-01");
        assert_eq!(json["content"]["body"], "Body");
    }

    #[tokio::test]
    async fn test_render_missing_slug() {
        let dir = TempDir::new().unwrap();
        let blog = Blog::new(dir.path()).unwrap();

        let err = render(&blog, "b").await.unwrap_err();
        assert_eq!(err.to_string(), "Post not found: b");
    }
}
