//! Consumer HTML patching.
//!
//! Rewrites the target documents so they load the freshly generated data
//! files. The rewrite itself is a pure string transform; I/O stays in
//! [`patch_html_targets`], where a missing target is a warning, not an
//! error.

use anyhow::{Context, Result};
use std::io::ErrorKind;

use crate::config::Config;

/// The single-file reference the rewrite replaces when upgrading a page
/// to the chunked form.
const SINGLE_TAG: &str = r#"<script src="data.js"></script>"#;

/// Marker meaning the page already references the chunked form.
const FIRST_CHUNK: &str = "data_part0.js";

/// Render the script tags for the generated files, joined with the
/// indentation the targets use.
pub fn script_block(files: &[String]) -> String {
    files
        .iter()
        .map(|name| format!(r#"<script src="{name}"></script>"#))
        .collect::<Vec<_>>()
        .join("\n    ")
}

/// Apply the patch rules to one document, in priority order:
/// replace an existing single-file reference; leave an already-chunked page
/// alone; otherwise inject before the first inline script, or before the
/// closing body tag. A page with neither marker is returned unchanged.
pub fn rewrite(html: &str, block: &str) -> String {
    if html.contains(SINGLE_TAG) {
        return html.replace(SINGLE_TAG, block);
    }
    if html.contains(FIRST_CHUNK) {
        return html.to_string();
    }
    if html.contains("<script>") {
        return html.replacen("<script>", &format!("{block}\n    <script>"), 1);
    }
    if html.contains("</body>") {
        return html.replace("</body>", &format!("{block}\n</body>"));
    }
    html.to_string()
}

/// Patch every configured HTML target in place. Missing targets are
/// reported on stderr and skipped.
pub fn patch_html_targets(config: &Config, files: &[String]) -> Result<()> {
    let block = script_block(files);

    for target in &config.output.html_targets {
        let path = config.output.dir.join(target);
        let html = match std::fs::read_to_string(&path) {
            Ok(html) => html,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                eprintln!("warning: {} not found, skipping", path.display());
                continue;
            }
            Err(err) => {
                return Err(err).with_context(|| format!("Failed to read {}", path.display()))
            }
        };

        let patched = rewrite(&html, &block);
        std::fs::write(&path, patched)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        println!("updated {}", path.display());
    }

    Ok(())
}
