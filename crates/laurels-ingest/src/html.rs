//! Locate category lists on a year page.
//!
//! Each category is a section heading whose anchor id is the category key,
//! followed by an ordered list of citations. Two heading markups are
//! recognized:
//!
//! ```html
//! <h2><span class="mw-headline" id="Победители">Победители</span></h2>
//! <div class="mw-heading mw-heading2"><h2 id="Победители">Победители</h2></div>
//! ```

use laurels_core::{CategoryScores, Citation};
use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};

static HEADING_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("span.mw-headline[id], h2[id], h3[id], h4[id], h5[id], h6[id]").unwrap()
});

static ITEM_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("li").unwrap());

/// Citations for every category in `categories` found on the page, in page order.
pub fn extract_citations(
    html: &str,
    award: &str,
    year: i32,
    categories: &CategoryScores,
) -> Vec<Citation> {
    let document = Html::parse_document(html);
    let mut citations = Vec::new();

    for heading in document.select(&HEADING_SELECTOR) {
        let Some(id) = heading.value().id() else {
            continue;
        };
        if !categories.contains_key(id) {
            continue;
        }

        let Some(list) = following_list(heading_block(heading)) else {
            tracing::debug!(award, year, category = id, "no list after heading");
            continue;
        };

        let before = citations.len();
        for item in list.select(&ITEM_SELECTOR) {
            citations.push(Citation {
                award: award.to_string(),
                year,
                category: id.to_string(),
                text: item.text().collect(),
            });
        }
        tracing::debug!(
            award,
            year,
            category = id,
            items = citations.len() - before,
            "located category list"
        );
    }

    citations
}

/// The element whose siblings hold the section body.
fn heading_block(heading: ElementRef<'_>) -> ElementRef<'_> {
    let mut block = heading;
    if block.value().name() == "span"
        && let Some(parent) = block.parent().and_then(ElementRef::wrap)
    {
        block = parent;
    }
    if let Some(parent) = block.parent().and_then(ElementRef::wrap)
        && parent.value().classes().any(|c| c == "mw-heading")
    {
        block = parent;
    }
    block
}

/// First `<ol>` after `block`, stopping at the next section heading.
fn following_list(block: ElementRef<'_>) -> Option<ElementRef<'_>> {
    for sibling in block.next_siblings().filter_map(ElementRef::wrap) {
        if sibling.value().name() == "ol" {
            return Some(sibling);
        }
        if is_heading(sibling) {
            return None;
        }
    }
    None
}

fn is_heading(el: ElementRef<'_>) -> bool {
    let value = el.value();
    matches!(value.name(), "h1" | "h2" | "h3" | "h4" | "h5" | "h6")
        || value.classes().any(|c| c == "mw-heading")
}
