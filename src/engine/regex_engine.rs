//! Built-in evaluator backed by the `regex` crate

use regex::{Regex, RegexBuilder};
use std::fmt::Write;

use super::{EvalError, Evaluator, TestInput, TestOutput};
use crate::http::html::escape_html;

/// Compiled program size cap, keeps pathological patterns from eating memory
const DEFAULT_SIZE_LIMIT: usize = 1 << 20;

/// Evaluates tests with `regex::Regex`
#[derive(Debug, Clone)]
pub struct RegexEvaluator {
    size_limit: usize,
}

impl RegexEvaluator {
    pub const fn new() -> Self {
        Self {
            size_limit: DEFAULT_SIZE_LIMIT,
        }
    }

    fn compile(&self, pattern: &str, options: &[String]) -> (Result<Regex, regex::Error>, Vec<String>) {
        let mut builder = RegexBuilder::new(pattern);
        builder.size_limit(self.size_limit);
        let mut ignored = Vec::new();

        for option in options {
            match option.as_str() {
                "i" | "ignorecase" => {
                    builder.case_insensitive(true);
                }
                "m" | "multiline" => {
                    builder.multi_line(true);
                }
                "s" | "dotall" => {
                    builder.dot_matches_new_line(true);
                }
                "x" | "comments" => {
                    builder.ignore_whitespace(true);
                }
                "U" | "ungreedy" => {
                    builder.swap_greed(true);
                }
                "" => {}
                other => ignored.push(other.to_string()),
            }
        }

        (builder.build(), ignored)
    }
}

impl Default for RegexEvaluator {
    fn default() -> Self {
        Self::new()
    }
}

impl Evaluator for RegexEvaluator {
    fn run_test(&self, input: &TestInput) -> Result<TestOutput, EvalError> {
        if input.regex.is_empty() {
            return Ok(TestOutput::failure("No regex to test!"));
        }

        let (compiled, ignored) = self.compile(&input.regex, &input.options);
        let re = match compiled {
            Ok(re) => re,
            Err(e) => {
                let message = e.to_string();
                return Ok(TestOutput {
                    success: false,
                    html: Some(format!(
                        "<div class=\"alert alert-danger\" role=\"alert\">Error: <pre>{}</pre></div>",
                        escape_html(&message)
                    )),
                    message: Some(message),
                });
            }
        };

        let mut html = String::new();
        render_summary(&mut html, input, &ignored).map_err(fmt_error)?;
        render_results(&mut html, &re, input).map_err(fmt_error)?;
        Ok(TestOutput::success(html))
    }
}

fn fmt_error(e: std::fmt::Error) -> EvalError {
    EvalError::new(format!("failed to render result: {e}"))
}

fn render_summary(out: &mut String, input: &TestInput, ignored: &[String]) -> std::fmt::Result {
    out.push_str("<table class=\"table table-bordered table-striped\" style=\"width:auto;\">\n<tbody>\n");
    writeln!(
        out,
        "<tr><td>Regular Expression</td><td><code>{}</code></td></tr>",
        escape_html(&input.regex)
    )?;
    if !input.replacement.is_empty() {
        writeln!(
            out,
            "<tr><td>Replacement</td><td><code>{}</code></td></tr>",
            escape_html(&input.replacement)
        )?;
    }
    if !ignored.is_empty() {
        writeln!(
            out,
            "<tr><td>Ignored options</td><td>{}</td></tr>",
            escape_html(&ignored.join(", "))
        )?;
    }
    out.push_str("</tbody>\n</table>\n");
    Ok(())
}

fn render_results(out: &mut String, re: &Regex, input: &TestInput) -> std::fmt::Result {
    let targets: Vec<&str> = input
        .inputs
        .iter()
        .map(String::as_str)
        .filter(|s| !s.is_empty())
        .collect();

    if targets.is_empty() {
        out.push_str("<div class=\"alert alert-warning\" role=\"alert\">No inputs to test</div>\n");
        return Ok(());
    }

    out.push_str("<table class=\"table table-bordered table-striped\" style=\"width:auto;\">\n");
    out.push_str(
        "<thead><tr><th style=\"text-align:center;\">Test</th><th>Target String</th>\
         <th>is_match()</th><th>replace()</th><th>replace_all()</th><th>captures()</th></tr></thead>\n<tbody>\n",
    );

    for (idx, target) in targets.iter().enumerate() {
        writeln!(
            out,
            "<tr><td style=\"text-align:center;\">{}</td><td><code>{}</code></td><td>{}</td>\
             <td><code>{}</code></td><td><code>{}</code></td><td>{}</td></tr>",
            idx + 1,
            escape_html(target),
            if re.is_match(target) { "Yes" } else { "No" },
            escape_html(&re.replace(target, input.replacement.as_str())),
            escape_html(&re.replace_all(target, input.replacement.as_str())),
            render_captures(re, target),
        )?;
    }

    out.push_str("</tbody>\n</table>\n");
    Ok(())
}

fn render_captures(re: &Regex, target: &str) -> String {
    let Some(caps) = re.captures(target) else {
        return "<i>(no match)</i>".to_string();
    };

    re.capture_names()
        .enumerate()
        .map(|(i, name)| {
            let label = name.map_or_else(|| i.to_string(), ToString::to_string);
            caps.get(i).map_or_else(
                || format!("[{}]: <i>(none)</i>", escape_html(&label)),
                |m| {
                    format!(
                        "[{}]: <code>{}</code>",
                        escape_html(&label),
                        escape_html(m.as_str())
                    )
                },
            )
        })
        .collect::<Vec<_>>()
        .join("<br/>")
}
