//! Tokenizer and resolver for data references embedded in text templates.
//!
//! Grammar: `%(name)`, `%(name[index])`, `%(name.axis)format`. `name` is
//! either the reserved word `graphs`/`paths` (positional addressing into the
//! owning object's attachment lists) or an identifier matched by unique name
//! against those lists. `axis` is only legal for path references. `format` is
//! a printf-style numeric spec ending in a lowercase conversion letter,
//! defaulting to `s`.
//!
//! Text that does not form a valid token stays literal. Resolution happens
//! once per owning object at encode time; the decoder treats templates as
//! opaque strings.

use crate::error::ReferenceError;
use crate::wire::{scalar_property, vector_property};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    fn as_str(self) -> &'static str {
        match self {
            Axis::X => "x",
            Axis::Y => "y",
            Axis::Z => "z",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Segment {
    Literal(String),
    Reference(Reference),
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Reference {
    /// Token text as written, for error messages.
    pub raw: String,
    pub name: String,
    pub index: Option<usize>,
    pub axis: Option<Axis>,
    pub format: Option<String>,
}

pub(crate) fn parse_template(input: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut literal = String::new();
    let bytes = input.as_bytes();
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] == b'%' && i + 1 < bytes.len() && bytes[i + 1] == b'(' {
            if let Some((reference, consumed)) = parse_reference(&input[i..]) {
                if !literal.is_empty() {
                    segments.push(Segment::Literal(std::mem::take(&mut literal)));
                }
                segments.push(Segment::Reference(reference));
                i += consumed;
                continue;
            }
        }
        // Advance one full character, not one byte.
        let ch = input[i..].chars().next().expect("in-bounds char");
        literal.push(ch);
        i += ch.len_utf8();
    }

    if !literal.is_empty() {
        segments.push(Segment::Literal(literal));
    }
    segments
}

/// Parses one token starting at `%(`. Returns the reference and the number of
/// bytes consumed, or `None` if the text is not a well-formed token.
fn parse_reference(input: &str) -> Option<(Reference, usize)> {
    let bytes = input.as_bytes();
    debug_assert!(input.starts_with("%("));
    let mut i = 2;

    let name_start = i;
    while i < bytes.len() && !matches!(bytes[i], b'[' | b'.' | b')' | b'(' | b'%') {
        i += 1;
    }
    if i == name_start || i == bytes.len() {
        return None;
    }
    let name = input[name_start..i].to_owned();

    let mut index = None;
    if bytes[i] == b'[' {
        i += 1;
        let digits_start = i;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        if i == digits_start || i == bytes.len() || bytes[i] != b']' {
            return None;
        }
        index = input[digits_start..i].parse::<usize>().ok();
        index?;
        i += 1;
    }

    let mut axis = None;
    if i < bytes.len() && bytes[i] == b'.' {
        i += 1;
        axis = match bytes.get(i) {
            Some(b'x') => Some(Axis::X),
            Some(b'y') => Some(Axis::Y),
            Some(b'z') => Some(Axis::Z),
            _ => return None,
        };
        i += 1;
    }

    if i >= bytes.len() || bytes[i] != b')' {
        return None;
    }
    i += 1;

    let format = parse_format(&input[i..]).map(|(spec, consumed)| {
        i += consumed;
        spec
    });

    Some((
        Reference {
            raw: input[..i].to_owned(),
            name,
            index,
            axis,
            format,
        },
        i,
    ))
}

/// A format spec is a run of `[0-9.+-#]` followed by one lowercase
/// conversion letter, with no intervening whitespace.
fn parse_format(input: &str) -> Option<(String, usize)> {
    let bytes = input.as_bytes();
    let mut i = 0;
    while i < bytes.len() && matches!(bytes[i], b'0'..=b'9' | b'.' | b'+' | b'-' | b'#') {
        i += 1;
    }
    if i < bytes.len() && bytes[i].is_ascii_lowercase() {
        Some((input[..=i].to_owned(), i + 1))
    } else {
        None
    }
}

/// Resolves every reference in `content` against the locally attached data,
/// already encoded into `(local_name, wire_variant)` pairs in declaration
/// order. Constants collapse into formatted literals; table-backed data is
/// rewritten into the canonical global form.
pub(crate) fn resolve_template(
    content: &str,
    graphs: &[(String, scalar_property::Value)],
    paths: &[(String, vector_property::Value)],
) -> Result<String, ReferenceError> {
    let mut out = String::new();
    for segment in parse_template(content) {
        match segment {
            Segment::Literal(text) => out.push_str(&text),
            Segment::Reference(reference) => {
                out.push_str(&resolve_reference(&reference, graphs, paths)?)
            }
        }
    }
    Ok(out)
}

fn resolve_reference(
    reference: &Reference,
    graphs: &[(String, scalar_property::Value)],
    paths: &[(String, vector_property::Value)],
) -> Result<String, ReferenceError> {
    let raw = || reference.raw.clone();

    match reference.name.as_str() {
        "graphs" => {
            let index = reference.index.ok_or_else(|| ReferenceError::IndexOutOfRange(raw()))?;
            let (_, value) = graphs
                .get(index)
                .ok_or_else(|| ReferenceError::IndexOutOfRange(raw()))?;
            if reference.axis.is_some() {
                return Err(ReferenceError::InvalidAxis(raw()));
            }
            Ok(render_graph(*value, reference))
        }
        "paths" => {
            let index = reference.index.ok_or_else(|| ReferenceError::IndexOutOfRange(raw()))?;
            let (_, value) = paths
                .get(index)
                .ok_or_else(|| ReferenceError::IndexOutOfRange(raw()))?;
            Ok(render_path(*value, reference))
        }
        name => {
            if reference.index.is_some() {
                return Err(ReferenceError::NamedIndexConflict(raw()));
            }
            let graph_matches: Vec<_> = graphs.iter().filter(|(n, _)| n == name).collect();
            let path_matches: Vec<_> = paths.iter().filter(|(n, _)| n == name).collect();
            match graph_matches.len() + path_matches.len() {
                0 => Err(ReferenceError::ReferenceNotFound(raw())),
                1 => {
                    if let Some(entry) = path_matches.first() {
                        Ok(render_path(entry.1, reference))
                    } else {
                        let entry = graph_matches[0];
                        if reference.axis.is_some() {
                            return Err(ReferenceError::InvalidAxis(raw()));
                        }
                        Ok(render_graph(entry.1, reference))
                    }
                }
                _ => Err(ReferenceError::AmbiguousReference(raw())),
            }
        }
    }
}

fn render_graph(value: scalar_property::Value, reference: &Reference) -> String {
    match value {
        scalar_property::Value::ConstValue(v) => {
            format_value(v, reference.format.as_deref().unwrap_or("s"))
        }
        scalar_property::Value::GraphId(id) => {
            format!(
                "%(graphs[{id}]){}",
                reference.format.as_deref().unwrap_or("")
            )
        }
    }
}

fn render_path(value: vector_property::Value, reference: &Reference) -> String {
    match value {
        vector_property::Value::ConstValue(v) => {
            // A constant vector with no axis prints its z component, matching
            // the reference viewer's fallback.
            let component = match reference.axis {
                Some(Axis::X) => v.x,
                Some(Axis::Y) => v.y,
                _ => v.z,
            };
            format_value(component, reference.format.as_deref().unwrap_or("s"))
        }
        vector_property::Value::PathId(id) => {
            let axis = reference
                .axis
                .map(|a| format!(".{}", a.as_str()))
                .unwrap_or_default();
            format!(
                "%(paths[{id}]{axis}){}",
                reference.format.as_deref().unwrap_or("")
            )
        }
    }
}

/// printf-flavored numeric formatting covering the conversions templates use.
fn format_value(value: f64, spec: &str) -> String {
    let conv = spec.chars().next_back().unwrap_or('s');
    let body = &spec[..spec.len().saturating_sub(1)];
    let (mut width_part, precision) = match body.split_once('.') {
        Some((w, p)) => (w, p.parse::<usize>().ok()),
        None => (body, None),
    };

    let mut zero_pad = false;
    while let Some(c) = width_part.chars().next() {
        match c {
            '0' => {
                zero_pad = true;
                width_part = &width_part[1..];
            }
            '+' | '-' | '#' => width_part = &width_part[1..],
            _ => break,
        }
    }
    let width: usize = width_part.parse().unwrap_or(0);

    let base = match conv {
        'f' => format!("{:.*}", precision.unwrap_or(6), value),
        'e' => format!("{:.*e}", precision.unwrap_or(6), value),
        'd' | 'i' => format!("{}", value.trunc() as i64),
        'x' => format!("{:x}", value.trunc() as i64),
        _ => match precision {
            Some(p) => format!("{value:.p$}"),
            None => format!("{value}"),
        },
    };

    if base.len() >= width {
        return base;
    }
    if zero_pad {
        if let Some(stripped) = base.strip_prefix('-') {
            format!("-{stripped:0>rest$}", rest = width - 1)
        } else {
            format!("{base:0>width$}")
        }
    } else {
        format!("{base:>width$}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wire::{scalar_property::Value as G, vector_property::Value as P};
    use crate::wire::Vector;

    fn graphs(entries: &[(&str, G)]) -> Vec<(String, G)> {
        entries.iter().map(|(n, v)| (n.to_string(), *v)).collect()
    }

    fn paths(entries: &[(&str, P)]) -> Vec<(String, P)> {
        entries.iter().map(|(n, v)| (n.to_string(), *v)).collect()
    }

    #[test]
    fn tokenizer_splits_literals_and_references() {
        let segments = parse_template("E = %(energy)0.2f GeV");
        assert_eq!(segments.len(), 3);
        assert_eq!(segments[0], Segment::Literal("E = ".into()));
        let Segment::Reference(r) = &segments[1] else {
            panic!("expected reference");
        };
        assert_eq!(r.name, "energy");
        assert_eq!(r.format.as_deref(), Some("0.2f"));
        assert_eq!(r.index, None);
        assert_eq!(segments[2], Segment::Literal(" GeV".into()));
    }

    #[test]
    fn tokenizer_parses_positional_and_axis_forms() {
        let segments = parse_template("%(paths[2].y)e");
        let Segment::Reference(r) = &segments[0] else {
            panic!("expected reference");
        };
        assert_eq!(r.name, "paths");
        assert_eq!(r.index, Some(2));
        assert_eq!(r.axis, Some(Axis::Y));
        assert_eq!(r.format.as_deref(), Some("e"));
    }

    #[test]
    fn malformed_tokens_stay_literal() {
        for text in ["100%", "%(unclosed", "%()s", "%(a[)", "%(a.w)"] {
            let segments = parse_template(text);
            assert!(
                segments
                    .iter()
                    .all(|s| matches!(s, Segment::Literal(_))),
                "{text:?} should stay literal"
            );
        }
    }

    #[test]
    fn format_spec_does_not_leak_into_following_text() {
        let segments = parse_template("%(g) meters");
        let Segment::Reference(r) = &segments[0] else {
            panic!("expected reference");
        };
        assert_eq!(r.format, None);
        assert_eq!(segments[1], Segment::Literal(" meters".into()));
    }

    #[test]
    fn constant_graph_collapses_to_formatted_literal() {
        let g = graphs(&[("myGraph", G::ConstValue(3.14159))]);
        let out = resolve_template("%(myGraph)0.2f", &g, &[]).unwrap();
        assert_eq!(out, "3.14");
    }

    #[test]
    fn table_backed_graph_rewrites_to_global_form() {
        let g = graphs(&[("myGraph", G::GraphId(5))]);
        let out = resolve_template("%(myGraph)0.2f", &g, &[]).unwrap();
        assert_eq!(out, "%(graphs[5])0.2f");
    }

    #[test]
    fn positional_path_keeps_axis_and_format() {
        let p = paths(&[("trk", P::PathId(3))]);
        let out = resolve_template("%(paths[0].x)0.1f", &[], &p).unwrap();
        assert_eq!(out, "%(paths[3].x)0.1f");
    }

    #[test]
    fn constant_path_formats_the_requested_component() {
        let p = paths(&[(
            "",
            P::ConstValue(Vector {
                x: 1.0,
                y: 2.0,
                z: 3.0,
            }),
        )]);
        assert_eq!(resolve_template("%(paths[0].y)0.0f", &[], &p).unwrap(), "2");
        assert_eq!(resolve_template("%(paths[0])0.0f", &[], &p).unwrap(), "3");
    }

    #[test]
    fn reference_errors() {
        let g = graphs(&[
            ("foo", G::GraphId(0)),
            ("foo", G::GraphId(1)),
            ("bar", G::GraphId(2)),
        ]);

        assert_eq!(
            resolve_template("%(foo)", &g, &[]).unwrap_err(),
            ReferenceError::AmbiguousReference("%(foo)".into())
        );
        assert!(matches!(
            resolve_template("%(missing)", &g, &[]).unwrap_err(),
            ReferenceError::ReferenceNotFound(_)
        ));
        assert!(matches!(
            resolve_template("%(bar[0])", &g, &[]).unwrap_err(),
            ReferenceError::NamedIndexConflict(_)
        ));
        assert!(matches!(
            resolve_template("%(graphs[9])", &g, &[]).unwrap_err(),
            ReferenceError::IndexOutOfRange(_)
        ));
        assert!(matches!(
            resolve_template("%(graphs)", &g, &[]).unwrap_err(),
            ReferenceError::IndexOutOfRange(_)
        ));
        assert!(matches!(
            resolve_template("%(bar.x)", &g, &[]).unwrap_err(),
            ReferenceError::InvalidAxis(_)
        ));
    }

    #[test]
    fn format_value_covers_common_conversions() {
        assert_eq!(format_value(3.14159, "0.2f"), "3.14");
        assert_eq!(format_value(3.14159, "s"), "3.14159");
        assert_eq!(format_value(-7.9, "d"), "-7");
        assert_eq!(format_value(5.0, "05.1f"), "005.0");
        assert_eq!(format_value(42.0, "6d"), "    42");
    }
}
