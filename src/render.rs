//! Plain-text rendering of screen snapshots

use crate::app::ScreenView;
use crate::view::{DetailScreen, FactCard, ListScreen, LoadState};
use std::fmt::Write;

const SPINNER: &str = "Loading...";
const RULE_WIDTH: usize = 72;

pub fn render(view: &ScreenView) -> String {
    match view {
        ScreenView::List(screen) => render_list(screen),
        ScreenView::Detail(screen) => render_detail(screen),
        ScreenView::NotFound { path } => format!("No page at {}\n", path),
    }
}

pub fn render_list(screen: &ListScreen) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Facts  [{}]", screen.location);
    if let Some(ref search) = screen.search {
        let _ = writeln!(out, "Search: {}", search);
    }

    match screen.tags {
        LoadState::Ready(ref tags) if !tags.is_empty() => {
            let line = tags
                .iter()
                .map(|t| {
                    if t.selected {
                        format!("[x] {} ({})", t.name, t.id)
                    } else {
                        format!("[ ] {} ({})", t.name, t.id)
                    }
                })
                .collect::<Vec<_>>()
                .join("  ");
            let _ = writeln!(out, "Tags: {}", line);
        }
        LoadState::Failed(ref message) => {
            let _ = writeln!(out, "Tags unavailable: {}", message);
        }
        _ => {}
    }
    let _ = writeln!(out, "{}", "-".repeat(RULE_WIDTH));

    match screen.grid {
        LoadState::Loading => {
            let _ = writeln!(out, "{}", SPINNER);
        }
        LoadState::Failed(ref message) => {
            let _ = writeln!(out, "Could not load facts: {}", message);
        }
        LoadState::Ready(ref cards) if cards.is_empty() => {
            let _ = writeln!(out, "No facts match.");
        }
        LoadState::Ready(ref cards) => {
            for card in cards {
                render_card(&mut out, card);
            }
        }
    }
    out
}

fn render_card(out: &mut String, card: &FactCard) {
    let _ = writeln!(out, "#{}  {}", card.id, card.text);
    let mut badges = Vec::new();
    if let Some(n) = card.research_count {
        badges.push(format!("Citations {}", n));
    }
    if let Some(n) = card.category_count {
        badges.push(format!("Categories {}", n));
    }
    if !badges.is_empty() {
        let _ = writeln!(out, "    {}", badges.join("  "));
    }
    let _ = writeln!(out, "    -> {}", card.href);
}

pub fn render_detail(screen: &DetailScreen) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "< Back to Facts ({})", screen.back);
    let _ = writeln!(out, "{}", "-".repeat(RULE_WIDTH));

    let page = match screen.fact {
        LoadState::Loading => {
            let _ = writeln!(out, "{}", SPINNER);
            return out;
        }
        LoadState::Failed(ref message) => {
            let _ = writeln!(out, "Could not load fact: {}", message);
            return out;
        }
        LoadState::Ready(ref page) => page,
    };

    let _ = writeln!(out, "# {}", page.heading);
    if let Some(updated) = page.updated_at {
        let _ = writeln!(out, "Updated {}", updated.format("%Y-%m-%d"));
    }
    if !page.categories.is_empty() {
        let tags = page
            .categories
            .iter()
            .map(|c| format!("{} ({})", c.name, c.href))
            .collect::<Vec<_>>()
            .join("  ");
        let _ = writeln!(out, "Tags: {}", tags);
    }

    if let Some(ref research) = page.research {
        let _ = writeln!(out);
        let _ = writeln!(out, "## Research");
        for entry in research {
            match entry.link {
                Some(ref link) => {
                    let _ = writeln!(out, "- {}  [link: {}]", entry.title, link);
                }
                None => {
                    let _ = writeln!(out, "- {}", entry.title);
                }
            }
            if let Some(ref citation) = entry.citation {
                let _ = writeln!(out, "    {}", citation);
            }
        }
    }
    out
}
