//! Container slots and host page injection.
//!
//! A [`Container`] collects the cards for one slot. [`inject`] appends each
//! container's cards to the element of the host page whose `id` matches the
//! slot id, after any children the element already has.

use regex::Regex;
use tracing::debug;

use crate::error::{DocsError, Result};
use crate::render::Element;

/// Cards destined for one named slot of the host page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Container {
    id: String,
    cards: Vec<Element>,
}

impl Container {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            cards: Vec::new(),
        }
    }

    /// Slot element id in the host page.
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn append(&mut self, card: Element) {
        self.cards.push(card);
    }

    pub fn cards(&self) -> &[Element] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// HTML for all cards, one per line.
    pub fn render_cards(&self) -> String {
        let mut out = String::new();
        for card in &self.cards {
            out.push_str(&card.to_html());
            out.push('\n');
        }
        out
    }
}

/// Insert every container's cards into `template`.
///
/// Each container must match exactly one element with `id="<slot id>"`
/// (double or single quotes). Cards are placed right before that element's
/// closing tag. Markup inside `<!-- ... -->` comments is ignored when looking
/// for slots. Returns [`DocsError::MissingSlot`] if an id is absent.
pub fn inject(template: &str, containers: &[&Container]) -> Result<String> {
    let mut html = template.to_string();

    for container in containers {
        let at = slot_insertion_point(&html, container.id())?;
        html.insert_str(at, &container.render_cards());
        debug!(slot = container.id(), cards = container.len(), "Injected container");
    }

    Ok(html)
}

/// Copy of `html` with every comment blanked out, byte offsets unchanged.
fn mask_comments(html: &str) -> String {
    let mut masked = String::with_capacity(html.len());
    let mut rest = html;
    while let Some(start) = rest.find("<!--") {
        masked.push_str(&rest[..start]);
        let body = &rest[start..];
        let end = body[4..].find("-->").map_or(body.len(), |i| i + 7);
        masked.extend(std::iter::repeat(' ').take(end));
        rest = &body[end..];
    }
    masked.push_str(rest);
    masked
}

/// Byte offset of the closing tag of the element with the given id.
fn slot_insertion_point(html: &str, id: &str) -> Result<usize> {
    let html = &mask_comments(html);
    let open_re = Regex::new(&format!(
        r#"<([A-Za-z][A-Za-z0-9-]*)\b[^>]*?\sid\s*=\s*(?:"{id}"|'{id}')[^>]*>"#,
        id = regex::escape(id)
    ))
    .map_err(|e| DocsError::Config(format!("Invalid slot id '{}': {}", id, e)))?;

    let open = open_re
        .captures(html)
        .ok_or_else(|| DocsError::MissingSlot(id.to_string()))?;
    let whole = open.get(0).ok_or_else(|| DocsError::MissingSlot(id.to_string()))?;
    let tag = &open[1];

    if whole.as_str().ends_with("/>") {
        return Err(DocsError::Parse(format!(
            "Slot element '{}' is self-closing and cannot hold cards",
            id
        )));
    }

    // Walk same-name tags after the opening tag to find its matching close.
    let tag_re = Regex::new(&format!(r"(?i)<(/?){}\b[^>]*>", regex::escape(tag)))
        .map_err(|e| DocsError::Config(format!("Invalid slot tag '{}': {}", tag, e)))?;

    let mut depth = 1usize;
    for m in tag_re.captures_iter(&html[whole.end()..]) {
        let Some(full) = m.get(0) else { continue };
        if &m[1] == "/" {
            depth -= 1;
            if depth == 0 {
                return Ok(whole.end() + full.start());
            }
        } else if !full.as_str().ends_with("/>") {
            depth += 1;
        }
    }

    Err(DocsError::Parse(format!(
        "Slot element '{}' is never closed",
        id
    )))
}
