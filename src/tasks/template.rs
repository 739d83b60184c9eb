// src/tasks/template.rs

//! Template task: copy HTML templates, minifying them in release mode.

use anyhow::{Context, Result};
use tracing::debug;

use crate::tasks::{matches_with_rel_dest, BuildContext, Category, TaskReport};

pub async fn run(ctx: &BuildContext) -> Result<TaskReport> {
    let cfg = &ctx.config.template;
    let files = matches_with_rel_dest(ctx, &cfg.sources, &cfg.exclude)?;

    let dest_root = ctx.dest_dir(Category::Template);
    let mut report = TaskReport::new(Category::Template);

    for (src_rel, dest_rel) in files {
        let src = ctx.root.join(&src_rel);
        let target = dest_root.join(&dest_rel);

        if let Some(parent) = target.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .with_context(|| format!("creating destination directory {:?}", parent))?;
        }

        if ctx.profile.optimize() {
            let html = tokio::fs::read_to_string(&src)
                .await
                .with_context(|| format!("reading template {:?}", src))?;
            tokio::fs::write(&target, minify_html(&html))
                .await
                .with_context(|| format!("writing template {:?}", target))?;
        } else {
            tokio::fs::copy(&src, &target)
                .await
                .with_context(|| format!("copying template {:?} to {:?}", src, target))?;
        }

        debug!(src = ?src_rel, dest = ?target, "template written");
        report.written.push(target);
    }

    Ok(report)
}

/// Strip HTML comments and collapse insignificant whitespace.
fn minify_html(input: &str) -> String {
    collapse_whitespace(&strip_comments(input))
}

fn strip_comments(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(start) = rest.find("<!--") {
        out.push_str(&rest[..start]);
        match rest[start..].find("-->") {
            Some(pos) => rest = &rest[start + pos + 3..],
            None => {
                // Unterminated comment: drop the remainder.
                rest = "";
            }
        }
    }

    out.push_str(rest);
    out
}

/// Whitespace collapse over a small tag/quote state machine: runs of
/// whitespace become a single space, and spaces touching tag boundaries
/// are dropped. Quoted attribute values pass through untouched.
fn collapse_whitespace(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut in_tag = false;
    let mut in_quote: Option<char> = None;
    let mut pending_text_space = false;

    for ch in input.chars() {
        if in_tag {
            if let Some(q) = in_quote {
                out.push(ch);
                if ch == q {
                    in_quote = None;
                }
                continue;
            }

            match ch {
                '"' | '\'' => {
                    in_quote = Some(ch);
                    out.push(ch);
                }
                '>' => {
                    while out.ends_with(' ') {
                        out.pop();
                    }
                    out.push('>');
                    in_tag = false;
                }
                _ if ch.is_whitespace() => {
                    if !out.ends_with(' ') && !out.ends_with('<') {
                        out.push(' ');
                    }
                }
                _ => out.push(ch),
            }
            continue;
        }

        match ch {
            '<' => {
                while out.ends_with(' ') {
                    out.pop();
                }
                out.push('<');
                in_tag = true;
                pending_text_space = false;
            }
            _ if ch.is_whitespace() => {
                pending_text_space = true;
            }
            _ => {
                if pending_text_space {
                    if !out.ends_with('>') && !out.ends_with('<') {
                        out.push(' ');
                    }
                    pending_text_space = false;
                }
                out.push(ch);
            }
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_comments_and_collapses_whitespace() {
        let html = "<div>\n    <p>hello   world</p>\n    <!-- remove me -->\n</div>\n";
        let min = minify_html(html);
        assert!(!min.contains("remove me"));
        assert!(!min.contains('\n'));
        assert!(min.contains("<p>hello world</p>"));
    }

    #[test]
    fn quoted_attributes_are_untouched() {
        let html = "<a title=\"two  spaces\">x</a>";
        assert_eq!(minify_html(html), html);
    }

    #[test]
    fn unterminated_comment_drops_remainder() {
        let html = "<p>ok</p><!-- dangling";
        assert_eq!(minify_html(html), "<p>ok</p>");
    }
}
