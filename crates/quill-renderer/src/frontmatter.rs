//! Document header (frontmatter) parsing.
//!
//! A document may begin with a `---` delimited YAML block holding page
//! metadata. [`parse_header`] splits that block from the body and parses it
//! into a [`Frontmatter`]. A missing block is not an error; a present but
//! malformed block is, since silently dropping metadata would corrupt
//! display.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Metadata parsed from the document header.
///
/// Recognized keys are typed fields; anything else lands in `extra` so
/// unknown keys survive a parse/serialize round trip even though the
/// pipeline itself ignores them.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Frontmatter {
    /// Page title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Author display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,

    /// Publication date, kept as the literal scalar from the header.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,

    /// Short description for listings and previews.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Cover image path or URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,

    /// Keys the pipeline does not recognize, preserved as-is.
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_yaml::Value>,
}

impl Frontmatter {
    /// True when no field was set by the header.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.author.is_none()
            && self.date.is_none()
            && self.description.is_none()
            && self.image.is_none()
            && self.extra.is_empty()
    }
}

/// Errors from header parsing. The rest of the pipeline is total; this is
/// the only parse stage that can fail.
#[derive(Debug, thiserror::Error)]
pub enum HeaderError {
    /// Opening `---` fence with no matching close before end of input.
    #[error("unterminated metadata block: expected closing '---'")]
    Unterminated,
    /// The block is delimited correctly but is not valid YAML.
    #[error("metadata parse error: {0}")]
    Parse(String),
    /// The block parsed but its top level is not a key/value mapping.
    #[error("metadata block must be a mapping at the top level")]
    InvalidRoot,
}

/// Split the leading metadata block from `raw` and parse it.
///
/// Returns the parsed [`Frontmatter`] and the remaining body text. When no
/// block is present the frontmatter is empty and the body is the full
/// input. A UTF-8 BOM and blank lines before the opening fence are
/// tolerated.
///
/// # Errors
///
/// Returns [`HeaderError`] when a block is present but unterminated,
/// unparsable, or not a mapping.
pub fn parse_header(raw: &str) -> Result<(Frontmatter, &str), HeaderError> {
    let Some((block, body)) = split_header(raw)? else {
        return Ok((Frontmatter::default(), raw));
    };

    if block.trim().is_empty() {
        return Ok((Frontmatter::default(), body));
    }

    let meta: Frontmatter =
        serde_yaml::from_str(block).map_err(|e| classify_yaml_error(block, &e))?;
    Ok((meta, body))
}

/// Locate the fenced block. Returns `(block, body)` or `None` when the
/// document does not start with a fence.
fn split_header(raw: &str) -> Result<Option<(&str, &str)>, HeaderError> {
    let input = raw.strip_prefix('\u{feff}').unwrap_or(raw);

    let mut cursor = 0;
    // Skip leading blank lines.
    let open = loop {
        let Some((line, next)) = next_line(input, cursor) else {
            return Ok(None);
        };
        if line.trim().is_empty() {
            cursor = next;
            continue;
        }
        if !is_fence(line) {
            return Ok(None);
        }
        break next;
    };

    let mut scan = open;
    loop {
        match next_line(input, scan) {
            Some((line, next)) => {
                if is_fence(line) {
                    let block = input[open..scan].trim_end_matches(['\r', '\n']);
                    return Ok(Some((block, &input[next..])));
                }
                scan = next;
            }
            None => return Err(HeaderError::Unterminated),
        }
    }
}

fn classify_yaml_error(block: &str, err: &serde_yaml::Error) -> HeaderError {
    // A scalar or sequence at the top level deserializes into Frontmatter
    // with an "invalid type" error; report that as a structural problem.
    match serde_yaml::from_str::<serde_yaml::Value>(block) {
        Ok(value) if !value.is_mapping() => HeaderError::InvalidRoot,
        _ => HeaderError::Parse(err.to_string()),
    }
}

fn next_line(input: &str, start: usize) -> Option<(&str, usize)> {
    if start >= input.len() {
        return None;
    }
    match input[start..].find('\n') {
        Some(pos) => Some((&input[start..start + pos], start + pos + 1)),
        None => Some((&input[start..], input.len())),
    }
}

fn is_fence(line: &str) -> bool {
    line.trim_end_matches('\r') == "---"
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_no_header_is_identity() {
        let raw = "# Title\n\nBody text.";
        let (meta, body) = parse_header(raw).unwrap();
        assert!(meta.is_empty());
        assert_eq!(body, raw);
    }

    #[test]
    fn test_basic_header() {
        let raw = "---\ntitle: Mastering TypeScript\nauthor: Jane Doe\ndate: 2024-10-08\n---\n# Content";
        let (meta, body) = parse_header(raw).unwrap();
        assert_eq!(meta.title.as_deref(), Some("Mastering TypeScript"));
        assert_eq!(meta.author.as_deref(), Some("Jane Doe"));
        assert_eq!(meta.date.as_deref(), Some("2024-10-08"));
        assert_eq!(body, "# Content");
    }

    #[test]
    fn test_unknown_keys_preserved() {
        let raw = "---\ntitle: T\nbanner_color: teal\n---\nbody";
        let (meta, _) = parse_header(raw).unwrap();
        assert_eq!(
            meta.extra.get("banner_color"),
            Some(&serde_yaml::Value::String("teal".to_owned()))
        );
    }

    #[test]
    fn test_empty_block() {
        let (meta, body) = parse_header("---\n---\nbody").unwrap();
        assert!(meta.is_empty());
        assert_eq!(body, "body");
    }

    #[test]
    fn test_bom_and_blank_lines_before_fence() {
        let raw = "\u{feff}\n\n---\ntitle: T\n---\nbody";
        let (meta, body) = parse_header(raw).unwrap();
        assert_eq!(meta.title.as_deref(), Some("T"));
        assert_eq!(body, "body");
    }

    #[test]
    fn test_crlf_fences() {
        let raw = "---\r\ntitle: T\r\n---\r\nbody";
        let (meta, body) = parse_header(raw).unwrap();
        assert_eq!(meta.title.as_deref(), Some("T"));
        assert_eq!(body, "body");
    }

    #[test]
    fn test_unterminated_block_errors() {
        let err = parse_header("---\ntitle: T\n").unwrap_err();
        assert!(matches!(err, HeaderError::Unterminated));
    }

    #[test]
    fn test_invalid_yaml_errors() {
        let err = parse_header("---\ntitle: [unclosed\n---\nbody").unwrap_err();
        assert!(matches!(err, HeaderError::Parse(_)));
    }

    #[test]
    fn test_non_mapping_root_errors() {
        let err = parse_header("---\n- just\n- a list\n---\nbody").unwrap_err();
        assert!(matches!(err, HeaderError::InvalidRoot));
    }

    #[test]
    fn test_thematic_break_later_is_not_a_header() {
        // A `---` that is not the first non-blank line stays in the body.
        let raw = "intro\n\n---\n\nmore";
        let (meta, body) = parse_header(raw).unwrap();
        assert!(meta.is_empty());
        assert_eq!(body, raw);
    }

    #[test]
    fn test_date_kept_verbatim() {
        let (meta, _) = parse_header("---\ndate: October 8, 2024\n---\n").unwrap();
        assert_eq!(meta.date.as_deref(), Some("October 8, 2024"));
    }
}
