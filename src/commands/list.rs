//! List site content

use anyhow::Result;

use crate::helpers::date_ymd;
use crate::Folio;

/// List site content by type
pub fn run(folio: &Folio, content_type: &str) -> Result<()> {
    let collections = folio.load_collections()?;

    match content_type {
        "blog" | "post" | "posts" => {
            let mut posts: Vec<_> = collections.blog.iter().collect();
            posts.sort_by(|a, b| b.data.pub_date.cmp(&a.data.pub_date));
            println!("Posts ({}):", posts.len());
            for post in posts {
                let flags = match (post.data.draft, post.data.featured) {
                    (true, _) => " (draft)",
                    (false, true) => " (featured)",
                    (false, false) => "",
                };
                println!(
                    "  {} - {}{} [{}]",
                    date_ymd(&post.data.pub_date),
                    post.data.title,
                    flags,
                    post.path
                );
            }
        }
        "projects" | "project" => {
            let projects = collections.sorted_projects();
            println!("Projects ({}):", projects.len());
            for project in projects {
                println!(
                    "  {:>3} {} - {} [{}]",
                    project.data.order,
                    date_ymd(&project.data.pub_date),
                    project.data.title,
                    project.path
                );
            }
        }
        "tag" | "tags" => {
            let mut tags: Vec<_> = collections.tag_counts().into_iter().collect();
            tags.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
            println!("Tags ({}):", tags.len());
            for (tag, count) in tags {
                println!("  {} ({})", tag, count);
            }
        }
        _ => {
            anyhow::bail!(
                "Unknown type: {}. Available: blog, projects, tags",
                content_type
            );
        }
    }

    let invalid = collections.error_count();
    if invalid > 0 {
        println!("{} invalid document(s) not listed, run `folio check`", invalid);
    }

    Ok(())
}
