//! HTML result cards.

use sortwise_core::{IndexedDocument, ScoredResult};

const HINT_EMPTY: &str = "Start typing to see suggestions.";
const HINT_NO_MATCH: &str = "No results. Try another word or a synonym.";
const UNCONFIGURED_BIN: &str = "Unconfigured bin";

/// Cards for the first items of the catalog, shown while the query is blank.
pub fn render_featured(docs: &[IndexedDocument]) -> String {
    let mut html = empty_state(HINT_EMPTY);
    for doc in docs {
        html.push_str(&card(doc, None, &[]));
    }
    html
}

/// Cards for a ranked result list, with query words highlighted in titles.
pub fn render_results(query: &str, results: &[ScoredResult<'_>]) -> String {
    if results.is_empty() {
        return empty_state(HINT_NO_MATCH);
    }
    let terms: Vec<&str> = query.split_whitespace().collect();
    results.iter().map(|r| card(r.document, Some(r.score), &terms)).collect()
}

fn empty_state(message: &str) -> String {
    format!("<p class=\"empty\">{}</p>\n", escape_html(message))
}

fn card(doc: &IndexedDocument, score: Option<f32>, terms: &[&str]) -> String {
    let item = &doc.item;
    let mut html = String::from("<div class=\"card\">\n");
    html.push_str(&format!("  <div class=\"title\">{}</div>\n", highlight_terms(&item.name, terms)));

    html.push_str("  <div class=\"row\">\n");
    match &doc.bin {
        Some(bin) => {
            let hex = escape_html(&bin.hex);
            html.push_str(&format!(
                "    <span class=\"badge\" style=\"background:{hex};color:{};border-color:{hex}\">{}</span>\n",
                escape_html(&bin.text_hex),
                escape_html(&bin.label)
            ));
        }
        None => html.push_str(&format!("    <span class=\"badge\">{UNCONFIGURED_BIN}</span>\n")),
    }
    if let Some(score) = score {
        html.push_str(&format!("    <span class=\"small\">Score: {score:.2}</span>\n"));
    }
    html.push_str("  </div>\n");

    if let Some(notes) = &item.notes {
        html.push_str(&format!("  <div class=\"note\">{}</div>\n", escape_html(notes)));
    }
    if let Some(notes) = doc.bin.as_ref().and_then(|b| b.notes.as_ref()) {
        html.push_str(&format!("  <div class=\"note\">{}</div>\n", escape_html(notes)));
    }
    // aliases only on scored cards
    let aliases = item.alias_list();
    if score.is_some() && !aliases.is_empty() {
        let list: Vec<String> = aliases.iter().map(|a| escape_html(a)).collect();
        html.push_str(&format!("  <div class=\"note small\"><strong>Aliases:</strong> {}</div>\n", list.join(", ")));
    }
    html.push_str("</div>\n");
    html
}

pub fn escape_html(text: &str) -> String {
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

/// Escape `text` for HTML, wrapping case-insensitive occurrences of `terms` in `<em>`.
///
/// Matching runs on the raw text and every piece is escaped as it is emitted,
/// so terms never match inside entities and inserted tags are never rescanned.
fn highlight_terms(text: &str, terms: &[&str]) -> String {
    let alternatives: Vec<String> = terms
        .iter()
        .filter(|t| !t.trim().is_empty())
        .map(|t| regex::escape(t))
        .collect();
    if alternatives.is_empty() {
        return escape_html(text);
    }
    let pat = match regex::RegexBuilder::new(&alternatives.join("|")).case_insensitive(true).build() {
        Ok(pat) => pat,
        Err(_) => return escape_html(text),
    };
    let mut out = String::with_capacity(text.len());
    let mut last = 0;
    for m in pat.find_iter(text) {
        out.push_str(&escape_html(&text[last..m.start()]));
        out.push_str(&format!("<em>{}</em>", escape_html(m.as_str())));
        last = m.end();
    }
    out.push_str(&escape_html(&text[last..]));
    out
}
