//! Create a new post

use anyhow::Result;
use serde::Serialize;
use std::fs;
use std::path::PathBuf;

use crate::Blog;

#[derive(Serialize)]
struct Scaffold<'a> {
    title: &'a str,
    date: String,
}

/// Create a post file with `title` and today's `date` in its front matter.
///
/// The file name comes from `slug` if given, otherwise from the configured
/// `new_post_name` pattern.
pub fn create_post(blog: &Blog, title: &str, slug: Option<&str>) -> Result<PathBuf> {
    let now = chrono::Local::now();

    let stem = match slug {
        Some(s) => s.to_string(),
        None => blog
            .config
            .new_post_name
            .replace(":title", &slug::slugify(title))
            .replace(":year", &now.format("%Y").to_string())
            .replace(":month", &now.format("%m").to_string())
            .replace(":day", &now.format("%d").to_string()),
    };
    if stem.is_empty() || stem.contains(['/', '\\']) || stem.starts_with('.') {
        anyhow::bail!("Invalid post slug: {:?}", stem);
    }

    let extension = blog.key_template().extension().to_string();
    let file_path = blog.posts_dir.join(format!("{}.{}", stem, extension));

    if file_path.exists() {
        anyhow::bail!("File already exists: {:?}", file_path);
    }

    let front_matter = serde_yaml::to_string(&Scaffold {
        title,
        date: now.format("%Y-%m-%d").to_string(),
    })?;
    let content = format!("---\n{}---\n", front_matter);

    fs::create_dir_all(&blog.posts_dir)?;
    fs::write(&file_path, content)?;
    tracing::info!("Created post {:?}", file_path);

    Ok(file_path)
}

/// Run the new command
pub fn run(blog: &Blog, title: &str, slug: Option<&str>) -> Result<()> {
    let path = create_post(blog, title, slug)?;
    println!("Created: {:?}", path);
    Ok(())
}
