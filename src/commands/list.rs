//! List the posts the resolver can serve

use anyhow::Result;

use crate::Blog;

/// List every resolvable slug with its entry key
pub fn run(blog: &Blog) -> Result<()> {
    let resolver = blog.resolver()?;
    let template = resolver.template();

    let slugs = resolver.slugs();
    println!("Posts ({}):", slugs.len());
    for slug in slugs {
        println!("  {} [{}]", slug, template.key_for(slug));
    }

    Ok(())
}
