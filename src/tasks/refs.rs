//! Reference resolution for entry-document templates.
//!
//! A reference token is `@` followed by a whitespace-free relative path
//! ending in `.md`, e.g. `@.claude/rules/style.md`. Any leading
//! profile-directory prefix is normalized back to the canonical store, so
//! every dialect resolves to the same source file.
//!
//! Resolution is applied line by line with no cross-line state, and
//! embedding depth is exactly one: the contents of an embedded document are
//! inserted as-is, their own references left untouched. That makes cycles
//! impossible by construction.
use std::path::Path;

use crate::profiles::ProfileId;
use crate::store::STORE_DIR;

/// Punctuation that may trail a reference inside prose and is not part of
/// the path.
const TRAILING: &[char] = &['\'', '"', ')', ']', ',', ';', ':'];

/// Resolve the reference on one `line` of template text.
///
/// - Whole-line reference: returns the referenced file's contents wrapped
///   in `<!-- BEGIN: … -->` / `<!-- END: … -->` delimiter comments naming
///   the resolved store path.
/// - Inline reference: returns the line with only the path after `@`
///   replaced by the absolute canonical path.
/// - No token, or a token whose resolved file does not exist (authors may
///   reference not-yet-created content while drafting): returns the line
///   unchanged.
#[must_use]
pub fn resolve_line(line: &str, root: &Path) -> String {
    let Some((at, raw)) = find_token(line) else {
        return line.to_string();
    };
    let canonical = normalize(raw);
    let full = root.join(&canonical);
    if !full.is_file() {
        return line.to_string();
    }

    let whole_line = line.trim() == format!("@{raw}");
    if whole_line {
        let Ok(content) = std::fs::read_to_string(&full) else {
            return line.to_string();
        };
        let body = content.trim_end_matches('\n');
        return format!("<!-- BEGIN: {canonical} -->\n{body}\n<!-- END: {canonical} -->");
    }

    // Inline: keep the marker, swap the relative path for an absolute one.
    let before = line.get(..at).unwrap_or_default();
    let after = line.get(at + 1 + raw.len()..).unwrap_or_default();
    format!("{before}@{}{after}", full.display())
}

/// Find the first reference token: byte offset of `@` plus the raw path.
fn find_token(line: &str) -> Option<(usize, &str)> {
    let at = line.find('@')?;
    let rest = line.get(at + 1..)?;
    let end = rest
        .find(char::is_whitespace)
        .unwrap_or(rest.len());
    let token = rest.get(..end)?.trim_end_matches(TRAILING);
    (token.ends_with(".md") && !token.is_empty()).then_some((at, token))
}

/// Rewrite a profile-directory prefix back to the canonical store root.
fn normalize(path: &str) -> String {
    for id in ProfileId::ALL {
        let dir = id.spec().dir_name;
        if let Some(rest) = path.strip_prefix(dir) {
            if let Some(rest) = rest.strip_prefix('/') {
                return format!("{STORE_DIR}/{rest}");
            }
        }
    }
    path.to_string()
}
