//! HTML rendering for the research form.
//!
//! Summaries arrive as Markdown (bullets and tables for numeric data) and
//! are rendered with `pulldown_cmark`. Raw HTML inside a summary is shown
//! as text, never interpreted.

use pulldown_cmark::{Event, Options, Parser};

/// Render Markdown summary text to an HTML fragment.
pub fn render_markdown_html(content: &str) -> String {
    let options =
        Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TASKLISTS;

    let events = Parser::new_ext(content, options).map(|event| match event {
        Event::Html(raw) | Event::InlineHtml(raw) => Event::Text(raw),
        other => other,
    });

    let mut html_output = String::with_capacity(content.len() * 3 / 2);
    pulldown_cmark::html::push_html(&mut html_output, events);
    html_output
}

/// Escape text for use in HTML element content or a quoted attribute.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

/// Render the full form page.
///
/// `query` is echoed into the input box; the summary section appears only
/// after a submission, even when the summary is empty.
pub fn render_page(query: Option<&str>, summary: &str) -> String {
    let query_value = escape_html(query.unwrap_or(""));
    let result_section = match query {
        None => String::new(),
        Some(_) if summary.trim().is_empty() => {
            "<section class=\"summary empty\"><h2>Summary</h2><p></p></section>".to_owned()
        }
        Some(_) => format!(
            "<section class=\"summary\"><h2>Summary</h2>\n{}</section>",
            render_markdown_html(summary)
        ),
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>Web Research Assistant</title>
<style>
body {{ font-family: system-ui, sans-serif; max-width: 52rem; margin: 2rem auto; padding: 0 1rem; }}
form {{ display: flex; gap: 0.5rem; }}
input[name=query] {{ flex: 1; padding: 0.5rem; }}
table {{ border-collapse: collapse; }}
th, td {{ border: 1px solid #ccc; padding: 0.25rem 0.5rem; }}
</style>
</head>
<body>
<h1>Web Research Assistant</h1>
<form method="post" action="/">
<input type="text" name="query" value="{query_value}" placeholder="What do you want to research?" required>
<button type="submit">Research</button>
</form>
{result_section}
</body>
</html>
"#
    )
}
