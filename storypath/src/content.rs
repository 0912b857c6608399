//! Location content is authored as HTML and stored unmodified by the backend.
//! Everything here treats it as untrusted input.

/// Remove scripts, event handlers and other unsafe markup from stored HTML.
pub fn sanitize_html(html: &str) -> String {
    ammonia::clean(html)
}

/// Sanitize stored HTML and convert it to Markdown-flavoured text for display.
pub fn html_to_text(html: &str) -> String {
    let clean = sanitize_html(html);
    htmd::convert(&clean)
        .map(|text| text.trim().to_string())
        .unwrap_or_else(|_| strip_html(&clean))
}

const ENTITIES: [(&str, &str); 6] = [
    ("&lt;", "<"),
    ("&gt;", ">"),
    ("&quot;", "\""),
    ("&#39;", "'"),
    ("&nbsp;", " "),
    ("&amp;", "&"),
];

/// Plain-text fallback: keep text outside tags, then decode a few entities.
fn strip_html(html: &str) -> String {
    let text: String = html
        .split('<')
        .enumerate()
        .filter_map(|(i, chunk)| match i {
            0 => Some(chunk),
            _ => chunk.split_once('>').map(|(_, rest)| rest),
        })
        .collect();

    ENTITIES
        .iter()
        .fold(text, |acc, (entity, ch)| acc.replace(entity, ch))
        .trim()
        .to_string()
}
