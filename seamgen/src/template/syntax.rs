//! Template syntax: `{{key}}` scalars and `{{#key}}...{{/key}}` blocks.
//!
//! Templates are parsed once into a segment tree and rendered in a single
//! pass, so substituted values are never scanned for markers.

use std::sync::OnceLock;

use regex::Regex;

/// A parsed piece of a template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Literal text, emitted verbatim.
    Text(String),
    /// A `{{key}}` placeholder.
    Scalar(String),
    /// A `{{#name}}...{{/name}}` block and its parsed body.
    Block {
        /// Block name.
        name: String,
        /// Segments between the opening and closing markers.
        body: Vec<Segment>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TagKind {
    Scalar,
    Open,
    Close,
}

#[derive(Debug)]
struct Tag<'a> {
    start: usize,
    end: usize,
    kind: TagKind,
    name: &'a str,
}

fn tag_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"\{\{\s*([#/]?)\s*([A-Za-z_][A-Za-z0-9_.\-]*)\s*\}\}")
            .unwrap_or_else(|err| unreachable!("static tag pattern is valid: {err}"))
    })
}

/// Parses a template into segments.
///
/// A block opener without a matching closer, and a closer without an
/// opener, are kept as literal text. A block closes at the first matching
/// closer after its opener.
#[must_use]
pub fn parse(source: &str) -> Vec<Segment> {
    let tags: Vec<Tag<'_>> = tag_pattern()
        .captures_iter(source)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let name = caps.get(2)?.as_str();
            let kind = match caps.get(1).map_or("", |m| m.as_str()) {
                "#" => TagKind::Open,
                "/" => TagKind::Close,
                _ => TagKind::Scalar,
            };
            Some(Tag {
                start: whole.start(),
                end: whole.end(),
                kind,
                name,
            })
        })
        .collect();

    parse_span(source, &tags, 0, source.len())
}

fn parse_span(source: &str, tags: &[Tag<'_>], lo: usize, hi: usize) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut cursor = lo;
    let mut i = 0;

    while i < tags.len() {
        let tag = &tags[i];
        match tag.kind {
            TagKind::Scalar => {
                push_text(&mut segments, &source[cursor..tag.start]);
                segments.push(Segment::Scalar(tag.name.to_string()));
                cursor = tag.end;
                i += 1;
            }
            TagKind::Open => {
                let close = tags[i + 1..]
                    .iter()
                    .position(|t| t.kind == TagKind::Close && t.name == tag.name)
                    .map(|offset| i + 1 + offset);
                if let Some(j) = close {
                    push_text(&mut segments, &source[cursor..tag.start]);
                    let body = parse_span(source, &tags[i + 1..j], tag.end, tags[j].start);
                    segments.push(Segment::Block {
                        name: tag.name.to_string(),
                        body,
                    });
                    cursor = tags[j].end;
                    i = j + 1;
                } else {
                    i += 1;
                }
            }
            TagKind::Close => i += 1,
        }
    }

    push_text(&mut segments, &source[cursor..hi]);
    segments
}

fn push_text(segments: &mut Vec<Segment>, text: &str) {
    if text.is_empty() {
        return;
    }
    if let Some(Segment::Text(last)) = segments.last_mut() {
        last.push_str(text);
    } else {
        segments.push(Segment::Text(text.to_string()));
    }
}

/// Names of every scalar placeholder in the segment tree, in order of appearance.
#[must_use]
pub fn scalar_names(segments: &[Segment]) -> Vec<&str> {
    let mut names = Vec::new();
    collect_names(segments, &mut names, false);
    names
}

/// Names of every block in the segment tree, in order of appearance.
#[must_use]
pub fn block_names(segments: &[Segment]) -> Vec<&str> {
    let mut names = Vec::new();
    collect_names(segments, &mut names, true);
    names
}

fn collect_names<'a>(segments: &'a [Segment], names: &mut Vec<&'a str>, blocks: bool) {
    for segment in segments {
        match segment {
            Segment::Text(_) => {}
            Segment::Scalar(name) => {
                if !blocks {
                    names.push(name);
                }
            }
            Segment::Block { name, body } => {
                if blocks {
                    names.push(name);
                }
                collect_names(body, names, blocks);
            }
        }
    }
}
