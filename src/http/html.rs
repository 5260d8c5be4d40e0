//! HTML helpers: escaping and the diagnostic error page

use crate::error::error_chain;

/// Escape text for safe embedding in HTML element content or attributes
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
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

/// Render the diagnostic page shown for unhandled errors
///
/// With `verbose` set the full source chain and the request line are included,
/// otherwise only the top-level message.
pub fn render_error_page(
    err: &dyn std::error::Error,
    method: &str,
    path: &str,
    verbose: bool,
) -> String {
    let mut body = escape_html(&err.to_string());
    if verbose {
        for cause in error_chain(err).iter().skip(1) {
            body.push_str("\n    caused by: ");
            body.push_str(&escape_html(cause));
        }
        body.push_str("\n    at ");
        body.push_str(&escape_html(method));
        body.push(' ');
        body.push_str(&escape_html(path));
    }
    format!("<pre>{body}</pre>")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::EvalError;
    use crate::error::AppError;

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<a href="x">&'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;&amp;&#39;&lt;/a&gt;"
        );
        assert_eq!(escape_html("plain"), "plain");
    }

    #[test]
    fn test_error_page_verbose() {
        let err = AppError::Evaluator(EvalError::new("<boom>"));
        let page = render_error_page(&err, "POST", "/test.json", true);
        assert!(page.starts_with("<pre>evaluator failed"));
        assert!(page.contains("caused by: &lt;boom&gt;"));
        assert!(page.contains("at POST /test.json"));
        assert!(page.ends_with("</pre>"));
    }

    #[test]
    fn test_error_page_terse() {
        let err = AppError::Evaluator(EvalError::new("secret"));
        let page = render_error_page(&err, "POST", "/test.json", false);
        assert_eq!(page, "<pre>evaluator failed</pre>");
    }
}
