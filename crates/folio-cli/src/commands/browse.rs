//! Read-only commands against the public portfolio endpoints.

use anyhow::Result;
use colored::Colorize;

use folio_client::FolioClient;
use folio_core::model::{BlogPost, Experience, Project, Skill};
use folio_core::view::CollectionView;

pub async fn projects(
    client: &FolioClient,
    search: Option<String>,
    tag: Option<String>,
    featured: bool,
) -> Result<()> {
    let mut items = client.api().projects().await?;
    if featured {
        items.retain(|p| p.featured);
    }

    let view = filtered_view(items, search, tag);
    let visible = view.visible();

    println!(
        "{}",
        format!("Projects ({} of {})", visible.len(), view.items().len()).bold()
    );
    println!("Tags: {}", view.available_tags().join(", "));
    println!();

    for project in visible {
        print_project(project);
    }

    Ok(())
}

pub async fn blog(client: &FolioClient, search: Option<String>, tag: Option<String>) -> Result<()> {
    let items = client.api().blog_posts().await?;

    let view = filtered_view(items, search, tag);
    let visible = view.visible();

    println!(
        "{}",
        format!("Blog posts ({} of {})", visible.len(), view.items().len()).bold()
    );
    println!("Tags: {}", view.available_tags().join(", "));
    println!();

    for post in visible {
        print_post(post);
    }

    Ok(())
}

pub async fn skills(client: &FolioClient) -> Result<()> {
    let skills = client.api().skills().await?;

    for (category, group) in Skill::group_by_category(&skills) {
        println!("{}", category.bold());
        for skill in group {
            // level is a 1-5 proficiency scale
            let bar = "●".repeat(skill.level.min(5) as usize);
            println!("  {:<24} {}", skill.name, bar.yellow());
        }
        println!();
    }

    Ok(())
}

pub async fn experience(client: &FolioClient) -> Result<()> {
    let mut entries = client.api().experience().await?;
    Experience::sort_newest_first(&mut entries);

    for entry in &entries {
        let end = entry.end_date.as_deref().unwrap_or("present");
        println!(
            "{}",
            format!("{} at {}", entry.position, entry.company).bold()
        );
        println!("  {}", format!("{} to {}", entry.start_date, end).yellow());
        println!("  {}", entry.description);
        if !entry.technologies.is_empty() {
            println!("  [{}]", entry.technologies.join(", "));
        }
        println!();
    }

    Ok(())
}

/// Fetches every public list concurrently and prints a one-screen summary.
pub async fn overview(client: &FolioClient) -> Result<()> {
    let api = client.api();
    let (projects, posts, skills, entries) = futures::try_join!(
        api.projects(),
        api.blog_posts(),
        api.skills(),
        api.experience()
    )?;

    println!("{}", "Portfolio overview".bold());
    println!("  Projects:   {}", projects.len());
    println!("  Blog posts: {}", posts.len());
    println!("  Skills:     {}", skills.len());
    println!("  Experience: {}", entries.len());
    println!();

    let featured = Project::featured(&projects);
    if !featured.is_empty() {
        println!("{}", "Featured".bold());
        for project in featured {
            println!("{}", format!("  ★ {}", project.title).green());
        }
    }

    Ok(())
}

fn filtered_view<T: folio_core::view::Card>(
    items: Vec<T>,
    search: Option<String>,
    tag: Option<String>,
) -> CollectionView<T> {
    let mut view = CollectionView::with_items(items);
    if let Some(term) = search {
        view.set_search_term(term);
    }
    if let Some(tag) = tag {
        view.set_tag(tag);
    }
    view
}

fn print_project(project: &Project) {
    let marker = if project.featured { "★ " } else { "" };
    println!("{}", format!("{}{}", marker, project.title).green());
    println!("  {}", project.description);
    if !project.technologies.is_empty() {
        println!("  [{}]", project.technologies.join(", "));
    }
    if let Some(url) = &project.github_url {
        println!("  code: {}", url);
    }
    if let Some(url) = &project.live_url {
        println!("  live: {}", url);
    }
    println!();
}

fn print_post(post: &BlogPost) {
    println!("{}", post.title.green());
    if let Some(date) = &post.created_at {
        println!("  {}", date.format("%Y-%m-%d").to_string().yellow());
    }
    println!("  {}", post.excerpt);
    if !post.tags.is_empty() {
        println!("  [{}]", post.tags.join(", "));
    }
    println!();
}
