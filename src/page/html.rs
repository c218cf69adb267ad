//! HTML fragments for the project grid and the writing section.
//!
//! Output mirrors the page's markup classes so the fragments can be pasted
//! into the static template.  Every outbound link opens in a new browsing
//! context with `rel="noopener noreferrer"`.

use std::fmt::Write;

use super::projects::{CardOrigin, ProjectCard, Tag};
use super::writing::{PostCard, WritingSection};
use super::Page;

const EXTERNAL: &str = r#"target="_blank" rel="noopener noreferrer""#;

/// Both sections, one after the other.
pub fn render_page(page: &Page) -> String {
    let mut out = render_projects(page.projects.slots());
    out.push('\n');
    out.push_str(&render_writing(&page.writing));
    out
}

pub fn render_projects(cards: &[ProjectCard]) -> String {
    let mut out = String::from("<div class=\"projects-grid\">\n");
    for card in cards {
        render_project_card(&mut out, card);
    }
    out.push_str("</div>\n");
    out
}

fn render_project_card(out: &mut String, card: &ProjectCard) {
    let origin = match card.origin {
        CardOrigin::Static => "static",
        CardOrigin::Remote => "remote",
    };
    let title = escape(&card.title);

    // Writing into a String cannot fail.
    let _ = writeln!(out, "  <article class=\"project-card\" data-origin=\"{origin}\">");
    let _ = writeln!(
        out,
        "    <div class=\"project-image\" style=\"background: {}\">\
         <div class=\"project-gradient-title\">{title}</div></div>",
        card.background
    );
    if let Some(link) = &card.link {
        let _ = writeln!(
            out,
            "    <div class=\"project-overlay\"><a href=\"{}\" class=\"project-link\" {EXTERNAL}>View</a></div>",
            escape(link)
        );
    }
    let _ = writeln!(out, "    <h3 class=\"project-title\">{title}</h3>");
    let _ = writeln!(
        out,
        "    <p class=\"project-description\">{}</p>",
        escape(&card.description)
    );
    out.push_str("    <div class=\"project-tech\">");
    for tag in &card.tags {
        let class = match tag {
            Tag::Stars(_) => "tech-tag stars",
            Tag::Language(_) | Tag::Topic(_) => "tech-tag",
        };
        let _ = write!(out, "<span class=\"{class}\">{}</span>", escape(&tag.to_string()));
    }
    out.push_str("</div>\n  </article>\n");
}

pub fn render_writing(section: &WritingSection) -> String {
    let mut out = String::from("<div id=\"substackPosts\">\n");
    match section {
        WritingSection::Loading => {
            out.push_str("  <p class=\"loading\">Loading posts...</p>\n");
        }
        WritingSection::Posts(cards) => {
            for card in cards {
                render_post_card(&mut out, card);
            }
        }
        WritingSection::Fallback { landing_page } => {
            let _ = writeln!(
                out,
                "  <div class=\"writing-placeholder\"><p>Visit <a href=\"{}\" {EXTERNAL}>my Substack</a> \
                 to read my latest articles and posts.</p></div>",
                escape(landing_page)
            );
        }
    }
    out.push_str("</div>\n");
    out
}

fn render_post_card(out: &mut String, card: &PostCard) {
    let link = escape(&card.link);
    let title = escape(&card.title);

    let _ = writeln!(out, "  <article class=\"writing-card\" data-href=\"{link}\">");
    if let Some(image) = &card.image {
        let _ = writeln!(
            out,
            "    <div class=\"writing-card-image\"><img src=\"{}\" alt=\"{title}\" loading=\"lazy\"></div>",
            escape(image)
        );
    }
    out.push_str("    <div class=\"writing-card-content\">\n");
    let _ = writeln!(out, "      <h3>{title}</h3>");
    let _ = writeln!(
        out,
        "      <div class=\"post-meta\"><span>{}</span></div>",
        escape(&card.date)
    );
    let _ = writeln!(
        out,
        "      <p class=\"post-excerpt\">{}</p>",
        escape(&card.excerpt)
    );
    let _ = writeln!(
        out,
        "      <a href=\"{link}\" {EXTERNAL} class=\"read-more\">Read More</a>"
    );
    out.push_str("    </div>\n  </article>\n");
}

/// Escape text for use in element content and double-quoted attributes.
fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
