//! Server-rendered HTML pages
//!
//! Pages are plain strings; every value that came from a user passes
//! through [`escape`] on the way in.

pub mod board;
pub mod member;

use std::fmt::Write;

/// HTML-escape text for use in element content and quoted attributes.
pub fn escape(text: &str) -> String {
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

/// Wrap page content in the shared document shell.
pub(crate) fn layout(title: &str, body: &str) -> String {
    let mut page = String::with_capacity(body.len() + 512);
    let _ = write!(
        page,
        r#"<!DOCTYPE html>
<html lang="ko">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>{title}</title>
  <style>
    body {{ font-family: system-ui, sans-serif; margin: 2rem auto; max-width: 960px; }}
    table {{ border-collapse: collapse; width: 100%; }}
    th, td {{ border-bottom: 1px solid #ddd; padding: 0.4rem; text-align: left; }}
    .pager a, .pager strong {{ margin: 0 0.2rem; }}
    .reply {{ margin: 0.5rem 0; }}
    .reply.nested {{ margin-left: 2rem; }}
  </style>
</head>
<body>
  <header><a href="/board/list/1">게시판</a></header>
  <main>
{body}
  </main>
</body>
</html>
"#,
        title = escape(title),
    );
    page
}
