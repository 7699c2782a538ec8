//! Export the rendered card view as a standalone HTML page.
//!
//! The page contains the status line and one `<article class="card">`
//! per displayed card, exactly as the renderer produces them, plus a small
//! inline stylesheet. Useful for sharing a filtered snapshot.

use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use card_viewer_core::render::{escape_html, Node};
use card_viewer_core::source::CardSource;
use card_viewer_core::surface::memory::MemorySurface;
use chrono::{DateTime, Utc};

use crate::config::Config;
use crate::controller::Controller;

const STYLE: &str = "\
body{font-family:system-ui,sans-serif;max-width:60rem;margin:2rem auto;padding:0 1rem}\
.status{color:#555}\
.card{border:1px solid #ddd;border-radius:8px;padding:1rem;margin:1rem 0}\
.card-claim{font-size:1.1rem;margin:0 0 .5rem}\
.pill{display:inline-block;border-radius:999px;padding:0 .6rem;margin-right:.3rem;font-size:.8rem}\
.pill-type{background:#222;color:#fff}\
.pill-tag{background:#eee}\
.card-meta{color:#666;font-size:.85rem;margin:.5rem 0}\
.card-meta span+span::before{content:' | '}\
[hidden]{display:none}";

/// Builds the full HTML document.
pub fn render_page(
    status: &str,
    cards: &[Node],
    query: Option<&str>,
    generated_at: DateTime<Utc>,
) -> String {
    let mut body = String::new();
    for card in cards {
        body.push_str(&card.to_html());
        body.push('\n');
    }

    let heading = match query.map(str::trim).filter(|q| !q.is_empty()) {
        Some(q) => format!("Cards matching &ldquo;{}&rdquo;", escape_html(q)),
        None => "Cards".to_string(),
    };

    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>{heading}</title>\n<style>{style}</style>\n</head>\n<body>\n\
         <h1>{heading}</h1>\n<p class=\"status\">{status}</p>\n\
         <section class=\"cards\">\n{body}</section>\n\
         <footer>Generated {generated}</footer>\n</body>\n</html>\n",
        heading = heading,
        style = STYLE,
        status = escape_html(status),
        body = body,
        generated = generated_at.format("%Y-%m-%d %H:%M UTC"),
    )
}

/// Fetches cards, applies `query`, and writes the page to `output` or stdout.
pub async fn run_export(
    config: &Config,
    source: Arc<dyn CardSource>,
    query: Option<&str>,
    output: Option<&Path>,
) -> Result<()> {
    let mut controller = Controller::new(source, MemorySurface::new(), config.search.debounce());
    controller.start().await?;
    if let Some(q) = query {
        controller.apply_query(q)?;
    }

    let surface = controller.into_surface();
    let html = render_page(surface.status(), surface.cards(), query, Utc::now());

    match output {
        Some(path) => {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(path, &html)?;
            eprintln!(
                "Exported {} cards to {}",
                surface.cards().len(),
                path.display()
            );
        }
        None => {
            print!("{}", html);
        }
    }

    Ok(())
}
