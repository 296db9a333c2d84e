//! # HTML Views
//!
//! Renders the single summarization page. All user-supplied text is escaped,
//! and the API key input is always rendered empty.

use textsum::Outcome;

const PAGE_TITLE: &str = "Writing Text Summarization";

/// Escapes the characters that are significant in HTML text and attributes.
pub fn escape_html(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn render_panel(outcome: &Outcome) -> String {
    let (class, role) = if outcome.is_warning() {
        ("warning", "alert")
    } else {
        ("info", "status")
    };
    format!(
        r#"<div class="panel {class}" role="{role}" data-status="{status}">{message}</div>"#,
        status = outcome.status(),
        message = escape_html(outcome.message()),
    )
}

/// Renders the form page with `text` pre-filled and an optional outcome panel.
pub fn render_page(text: &str, outcome: Option<&Outcome>) -> String {
    let panel = outcome.map(render_panel).unwrap_or_default();
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{PAGE_TITLE}</title>
<style>
body {{ font-family: sans-serif; max-width: 48rem; margin: 2rem auto; }}
textarea {{ width: 100%; height: 200px; }}
input[type=password] {{ width: 100%; }}
.panel {{ margin-top: 1rem; padding: 0.75rem; border-radius: 4px; white-space: pre-wrap; }}
.warning {{ background: #fff4e5; border: 1px solid #f0ad4e; }}
.info {{ background: #e8f4fd; border: 1px solid #5bc0de; }}
</style>
</head>
<body>
<h1>{PAGE_TITLE}</h1>
<form method="post" action="/">
<label for="text">Enter your text</label>
<textarea id="text" name="text">
{text}</textarea>
<label for="groq_api_key">Groq API Key</label>
<input type="password" id="groq_api_key" name="groq_api_key" value="" placeholder="Ex: gsk-live-xxxxxxxxxxxxxxxxx">
<button type="submit">Submit</button>
</form>
{panel}
</body>
</html>
"#,
        text = escape_html(text),
    )
}
