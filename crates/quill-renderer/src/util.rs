//! Shared utilities: HTML escaping and heading slugs.

use std::borrow::Cow;
use std::collections::HashSet;

/// Escape `&`, `<`, `>`, `"` and `'` for safe embedding in HTML text or
/// attribute values. Borrows when no escaping is needed.
#[must_use]
pub fn escape_html(input: &str) -> Cow<'_, str> {
    if !input.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(input);
    }
    let mut out = String::with_capacity(input.len() + 8);
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    Cow::Owned(out)
}

/// Derive a heading slug: lowercase, each whitespace run becomes a single
/// hyphen, then everything outside `[a-z0-9-]` is stripped.
///
/// The steps compose in that order: the hyphen for a whitespace run is
/// emitted even when the token it separated strips away entirely, so
/// `"Intro ? Outro"` yields `"intro--outro"`.
#[must_use]
pub fn slugify(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut after_whitespace = false;
    for ch in text.trim().chars() {
        if ch.is_whitespace() {
            after_whitespace = true;
            continue;
        }
        if after_whitespace {
            out.push('-');
            after_whitespace = false;
        }
        for lower in ch.to_lowercase() {
            if lower.is_ascii_lowercase() || lower.is_ascii_digit() || lower == '-' {
                out.push(lower);
            }
        }
    }
    out
}

/// Allocates unique heading ids for one render.
///
/// The first heading with a given slug keeps the bare id; later collisions
/// get `-2`, `-3`, ... (first free suffix). Explicit ids go through the
/// same pool so derived ids can never collide with them.
#[derive(Debug, Default)]
pub struct Slugger {
    taken: HashSet<String>,
}

impl Slugger {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim a unique id with `base` as the preferred value.
    ///
    /// An empty base falls back to `section` so every heading is
    /// addressable.
    pub fn claim(&mut self, base: &str) -> String {
        let base = if base.is_empty() { "section" } else { base };
        if self.taken.insert(base.to_owned()) {
            return base.to_owned();
        }
        let mut n = 2u32;
        loop {
            let candidate = format!("{base}-{n}");
            if self.taken.insert(candidate.clone()) {
                return candidate;
            }
            n += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_html_borrows_clean_input() {
        assert!(matches!(escape_html("plain text"), Cow::Borrowed(_)));
    }

    #[test]
    fn test_escape_html_all_specials() {
        assert_eq!(
            escape_html(r#"<a href="x">&'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;&amp;&#39;&lt;/a&gt;"
        );
    }

    #[test]
    fn test_slugify_basic() {
        assert_eq!(slugify("Hello World"), "hello-world");
    }

    #[test]
    fn test_slugify_collapses_whitespace_runs() {
        assert_eq!(slugify("a  \t b\nc"), "a-b-c");
    }

    #[test]
    fn test_slugify_strips_punctuation() {
        assert_eq!(slugify("What's New in v2.0?"), "whats-new-in-v20");
    }

    #[test]
    fn test_slugify_stripped_token_keeps_both_hyphens() {
        assert_eq!(slugify("Intro ? Outro"), "intro--outro");
    }

    #[test]
    fn test_slugify_keeps_existing_hyphens() {
        assert_eq!(slugify("copy-to-clipboard"), "copy-to-clipboard");
    }

    #[test]
    fn test_slugify_trims_edges() {
        assert_eq!(slugify("  padded  "), "padded");
    }

    #[test]
    fn test_slugify_non_ascii_stripped() {
        assert_eq!(slugify("Héllo Wörld"), "hllo-wrld");
    }

    #[test]
    fn test_slugger_collision_suffixes() {
        let mut slugger = Slugger::new();
        assert_eq!(slugger.claim("intro"), "intro");
        assert_eq!(slugger.claim("intro"), "intro-2");
        assert_eq!(slugger.claim("intro"), "intro-3");
    }

    #[test]
    fn test_slugger_skips_taken_suffix() {
        let mut slugger = Slugger::new();
        assert_eq!(slugger.claim("intro-2"), "intro-2");
        assert_eq!(slugger.claim("intro"), "intro");
        // "intro-2" is taken by the explicit claim above.
        assert_eq!(slugger.claim("intro"), "intro-3");
    }

    #[test]
    fn test_slugger_empty_base_falls_back() {
        let mut slugger = Slugger::new();
        assert_eq!(slugger.claim(""), "section");
        assert_eq!(slugger.claim(""), "section-2");
    }
}
