//! Parameter descriptors and decoded values
//!
//! A compiled pattern carries one descriptor per capturing group, in
//! capture order. The descriptor list doubles as a runtime schema for the
//! route: which names decode to plain text and which to segment lists.

use serde::Serialize;

/// How a captured parameter value is decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ParamKind {
    /// One path segment's worth of non-slash characters, kept verbatim.
    Single,
    /// Zero or more whole segments; empty segments from doubled slashes
    /// are dropped.
    MultiMergeSlashes,
    /// Zero or more whole segments; empty segments are kept.
    MultiExact,
}

/// A named capture in a compiled pattern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParamDescriptor {
    name: String,
    kind: ParamKind,
}

/// A decoded parameter value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamValue {
    /// A single-segment capture.
    Text(String),
    /// A single-segment parameter inside an optional section that was
    /// absent from the matched path.
    Missing,
    /// A multi-segment capture, split into path segments.
    Segments(Vec<String>),
}

impl ParamDescriptor {
    pub(crate) fn new(name: impl Into<String>, kind: ParamKind) -> Self {
        Self { name: name.into(), kind }
    }

    /// The parameter name as written in the pattern.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The decode kind for this parameter.
    pub fn kind(&self) -> ParamKind {
        self.kind
    }

    /// Decodes a raw capture according to this descriptor's kind.
    ///
    /// Total over any input. `None` means the capture's optional section
    /// did not participate in the match: a single parameter decodes to
    /// [`ParamValue::Missing`], a multi parameter to an empty segment list.
    pub fn decode(&self, raw: Option<&str>) -> ParamValue {
        match self.kind {
            ParamKind::Single => match raw {
                Some(text) => ParamValue::Text(text.to_string()),
                None => ParamValue::Missing,
            },
            ParamKind::MultiMergeSlashes => ParamValue::Segments(
                raw.unwrap_or("")
                    .split('/')
                    .filter(|segment| !segment.is_empty())
                    .map(str::to_string)
                    .collect(),
            ),
            ParamKind::MultiExact => {
                let raw = raw.unwrap_or("");
                if raw.is_empty() {
                    ParamValue::Segments(Vec::new())
                } else {
                    ParamValue::Segments(raw.split('/').map(str::to_string).collect())
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_single() {
        let descriptor = ParamDescriptor::new("id", ParamKind::Single);
        assert_eq!(descriptor.decode(Some("42")), ParamValue::Text("42".to_string()));
        assert_eq!(descriptor.decode(None), ParamValue::Missing);
    }

    #[test]
    fn test_decode_multi_merges_doubled_slashes() {
        let descriptor = ParamDescriptor::new("rest", ParamKind::MultiMergeSlashes);
        assert_eq!(
            descriptor.decode(Some("a//b/c")),
            ParamValue::Segments(vec!["a".to_string(), "b".to_string(), "c".to_string()])
        );
        assert_eq!(descriptor.decode(Some("")), ParamValue::Segments(vec![]));
        assert_eq!(descriptor.decode(None), ParamValue::Segments(vec![]));
    }

    #[test]
    fn test_decode_multi_exact_keeps_empty_segments() {
        let descriptor = ParamDescriptor::new("rest", ParamKind::MultiExact);
        assert_eq!(
            descriptor.decode(Some("a//b")),
            ParamValue::Segments(vec!["a".to_string(), String::new(), "b".to_string()])
        );
        assert_eq!(descriptor.decode(Some("")), ParamValue::Segments(vec![]));
    }
}
