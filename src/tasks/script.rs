// src/tasks/script.rs

//! Script task: vendor prelude + authored sources, concatenated into one
//! bundle. Authored files (those under the configured source root) pass a
//! syntax gate before inclusion; vendored inputs are taken verbatim.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{debug, warn};

use crate::errors::TransformError;
use crate::tasks::{collect_matches, source_map_json, BuildContext, Category, TaskReport};

pub async fn run(ctx: &BuildContext) -> Result<TaskReport> {
    let cfg = &ctx.config.script;

    // Vendor bundles come first in the output stream, then authored
    // sources in sorted path order.
    let vendor = collect_matches(ctx, &cfg.vendor, &[])?;
    let authored = collect_matches(ctx, &cfg.sources, &cfg.exclude)?;

    let mut report = TaskReport::new(Category::Script);
    if vendor.is_empty() && authored.is_empty() {
        debug!("no script sources matched; nothing to write");
        return Ok(report);
    }

    let mut parser = js_parser()?;
    let source_root = Path::new(&ctx.config.project.source_root);

    let mut seen: BTreeSet<PathBuf> = BTreeSet::new();
    let mut pieces: Vec<(String, String)> = Vec::new();

    for rel in vendor.iter().chain(authored.iter()) {
        if !seen.insert(rel.clone()) {
            continue;
        }

        let rel_str = rel.to_string_lossy().replace('\\', "/");
        let text = match tokio::fs::read_to_string(ctx.root.join(rel)).await {
            Ok(text) => text,
            Err(err) => {
                warn!(
                    error = %TransformError::Read { path: rel_str, source: err },
                    "script source skipped"
                );
                report.skipped += 1;
                continue;
            }
        };

        // The path prefix decides authored vs. prebuilt: only authored
        // files are held to the syntax gate.
        if rel.starts_with(source_root) && !syntax_ok(&mut parser, &text) {
            warn!(
                error = %TransformError::Syntax { path: rel_str },
                "script source skipped"
            );
            report.skipped += 1;
            continue;
        }

        pieces.push((rel_str, text));
    }

    let mut js = pieces
        .iter()
        .map(|(_, text)| text.as_str())
        .collect::<Vec<_>>()
        .join("\n");

    if ctx.profile.optimize() {
        js = minify_js(&js);
    }

    let dest = ctx.dest_dir(Category::Script);
    tokio::fs::create_dir_all(&dest)
        .await
        .with_context(|| format!("creating destination directory {:?}", dest))?;

    let file_name = format!("{}.min.js", cfg.file_name);

    if ctx.profile.source_maps() {
        let map_name = format!("{file_name}.map");
        let map_path = dest.join(&map_name);
        tokio::fs::write(&map_path, source_map_json(&file_name, &pieces))
            .await
            .with_context(|| format!("writing source map {:?}", map_path))?;
        report.written.push(map_path);

        js.push_str(&format!("\n//# sourceMappingURL={map_name}\n"));
    }

    let out_path = dest.join(&file_name);
    tokio::fs::write(&out_path, js)
        .await
        .with_context(|| format!("writing script bundle {:?}", out_path))?;

    debug!(path = ?out_path, skipped = report.skipped, "script bundle written");
    report.written.push(out_path);
    Ok(report)
}

fn js_parser() -> Result<tree_sitter::Parser> {
    let mut parser = tree_sitter::Parser::new();
    parser
        .set_language(&tree_sitter_javascript::LANGUAGE.into())
        .context("loading the JavaScript grammar")?;
    Ok(parser)
}

/// A file passes the gate when its parse tree contains no error nodes.
fn syntax_ok(parser: &mut tree_sitter::Parser, source: &str) -> bool {
    parser
        .parse(source, None)
        .map(|tree| !tree.root_node().has_error())
        .unwrap_or(false)
}

/// Conservative whitespace/comment minification: trims indentation and
/// drops blank lines and full-line `//` comments. Statements keep their
/// own lines, so sources without semicolons stay valid.
fn minify_js(input: &str) -> String {
    input
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter(|line| !line.starts_with("//"))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn syntax_gate_accepts_valid_and_rejects_invalid() {
        let mut parser = js_parser().expect("grammar");
        assert!(syntax_ok(&mut parser, "const x = 1;\nfunction f() { return x; }\n"));
        assert!(!syntax_ok(&mut parser, "function ( { nope ]]"));
    }

    #[test]
    fn minify_drops_comments_and_indentation() {
        let js = "  // header\nfunction f() {\n    return 1;\n}\n\n";
        assert_eq!(minify_js(js), "function f() {\nreturn 1;\n}");
    }
}
