//! Search and saved-article command handlers.

use anyhow::{Context as _, Result, bail};
use comfy_table::{ContentArrangement, Table};
use shelf_core::api::{Article, SavedArticle};
use shelf_core::tags::{format_tag_input, parse_tag_input};
use shelf_core::{ArticleId, messages};

use super::{Context, prompt};

pub async fn search(ctx: &mut Context, query: &str) -> Result<()> {
    if query.trim().is_empty() {
        bail!("Query cannot be empty");
    }
    let client = ctx.authenticated()?;
    let result = client.search(query).await;
    let results = ctx.check(result, messages::SEARCH_FAILED)?;

    if results.is_empty() {
        println!("No articles found for \"{query}\".");
    } else {
        println!("{}", search_table(&results));
    }
    Ok(())
}

pub async fn save(ctx: &mut Context, title: &str, url: &str) -> Result<()> {
    let client = ctx.authenticated()?;
    let result = client.save_article(title, url).await;
    let article = ctx.check(result, messages::SAVE_FAILED)?;

    println!("✓ {}", messages::saved_successfully(&article.title));
    println!("  ID: {}", article.id);
    Ok(())
}

pub async fn saved(ctx: &mut Context) -> Result<()> {
    let articles = fetch_saved(ctx).await?;
    if articles.is_empty() {
        println!("{}", messages::SAVED_EMPTY);
    } else {
        println!("{}", saved_table(&articles));
    }
    Ok(())
}

pub async fn generate_tags(ctx: &mut Context, id: &ArticleId) -> Result<()> {
    let client = ctx.authenticated()?;
    let result = client.generate_tags(id).await;
    let article = ctx.check(result, messages::GENERATE_FAILED)?;

    println!("✓ {}", messages::TAGS_GENERATED);
    print_tags(&article);
    Ok(())
}

pub async fn set_tags(ctx: &mut Context, id: &ArticleId, input: &str) -> Result<()> {
    let names = parse_tag_input(input);
    let client = ctx.authenticated()?;
    let result = client.replace_tags(id, &names).await;
    let article = ctx.check(result, messages::UPDATE_TAGS_FAILED)?;

    println!("✓ {}", messages::TAGS_UPDATED);
    print_tags(&article);
    Ok(())
}

pub async fn delete(ctx: &mut Context, id: &ArticleId, yes: bool) -> Result<()> {
    if !yes {
        let article = find_saved(ctx, id).await?;
        let answer = prompt(&format!("{} [y/N] ", messages::confirm_delete(&article.title)))?;
        if !answer.trim().eq_ignore_ascii_case("y") {
            println!("Delete cancelled.");
            return Ok(());
        }
    }

    let client = ctx.authenticated()?;
    let result = client.delete_article(id).await;
    ctx.check(result, messages::DELETE_FAILED)?;
    println!("✓ {}", messages::ARTICLE_DELETED);
    Ok(())
}

pub async fn open(ctx: &mut Context, id: &ArticleId) -> Result<()> {
    let article = find_saved(ctx, id).await?;
    open::that(&article.url).with_context(|| format!("open {}", article.url))?;
    println!("Opened {}", article.url);
    Ok(())
}

async fn fetch_saved(ctx: &mut Context) -> Result<Vec<SavedArticle>> {
    let client = ctx.authenticated()?;
    let result = client.list_articles().await;
    ctx.check(result, messages::SAVED_FETCH_FAILED)
}

async fn find_saved(ctx: &mut Context, id: &ArticleId) -> Result<SavedArticle> {
    let articles = fetch_saved(ctx).await?;
    articles
        .into_iter()
        .find(|a| &a.id == id)
        .with_context(|| format!("No saved article with ID {id}"))
}

fn print_tags(article: &SavedArticle) {
    if article.tags.is_empty() {
        println!("  Tags: (none)");
    } else {
        println!("  Tags: {}", format_tag_input(&article.tag_names()));
    }
}

fn search_table(results: &[Article]) -> Table {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Title", "URL", "Summary"]);
    for article in results {
        table.add_row(vec![
            article.title.as_str(),
            article.url.as_str(),
            article.summary.as_str(),
        ]);
    }
    table
}

fn saved_table(articles: &[SavedArticle]) -> Table {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["ID", "Title", "Tags", "URL"]);
    for article in articles {
        table.add_row(vec![
            article.id.to_string(),
            article.title.clone(),
            format_tag_input(&article.tag_names()),
            article.url.clone(),
        ]);
    }
    table
}
