//! Path-pattern compilation
//!
//! A pattern string is compiled once, at route-registration time, into a
//! [`CompiledPattern`]: an anchored regex plus the ordered list of
//! parameter descriptors. The compiled value is immutable and is reused
//! for every request path tested against the route.
//!
//! The compiler walks the token stream left to right while maintaining a
//! stack of optional-section frames. Each frame tracks the separator text
//! accumulated since the most recent parameter; that text becomes a
//! negative-lookahead guard on the next parameter's capture, so adjacent
//! captures always have an unambiguous boundary. Every capture is either
//! bounded (`[^/]`) or lazy, and alternation only arises from merging
//! optional-section frames, so the generated regex cannot backtrack
//! exponentially.

mod token;

use std::collections::HashMap;

use fancy_regex::Regex;
use tracing::debug;

use crate::error::PatternError;
use crate::escape::escape_literal;
use crate::param::{ParamDescriptor, ParamKind, ParamValue};

use self::token::{tokenize, Token};

/// Name of the trailing capture that receives the unmatched remainder of
/// the path when a pattern is compiled with `allow_sub_routes`.
pub const REST_PARAM: &str = "rest";

/// Leading single-character flags accepted before the pattern's first `/`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct PatternFlags {
    /// `i` — the whole pattern matches case-insensitively.
    pub case_insensitive: bool,
    /// `!` — slash runs must appear exactly as written instead of the
    /// default merge of any run down to one.
    pub exact_slashes: bool,
}

impl PatternFlags {
    /// Splits recognized flags off the front of a pattern string.
    ///
    /// Everything before the first `/` must be a recognized flag; any
    /// other character there, or a pattern with no `/` at all, is
    /// rejected.
    fn strip(pattern: &str) -> Result<(Self, &str), PatternError> {
        let mut flags = Self::default();
        for (idx, ch) in pattern.char_indices() {
            match ch {
                '/' => return Ok((flags, &pattern[idx..])),
                'i' => flags.case_insensitive = true,
                '!' => flags.exact_slashes = true,
                _ => break,
            }
        }
        Err(PatternError::MissingLeadingSlash(pattern.to_string()))
    }
}

/// Separator text accumulated since the most recent parameter.
#[derive(Debug, Clone)]
struct Separator {
    /// Regex fragment for the literal text seen so far.
    pattern: String,
    /// True while no literal has followed the parameter yet; a second
    /// parameter in that state has no possible boundary and is rejected.
    empty: bool,
}

/// One level of optional-section nesting.
#[derive(Debug, Clone, Default)]
struct Frame {
    sep: Option<Separator>,
    /// Length of the regex source right after this frame's `(?:` was
    /// emitted; used to reject empty optional sections.
    opened_at: usize,
}

struct Compiler {
    flags: PatternFlags,
    source: String,
    params: Vec<ParamDescriptor>,
    /// Innermost open frame; enclosing frames live on `stack`.
    current: Frame,
    stack: Vec<Frame>,
    multi_param: Option<String>,
    last_param: Option<String>,
}

impl Compiler {
    fn new(flags: PatternFlags) -> Self {
        Self {
            flags,
            source: String::new(),
            params: Vec::new(),
            current: Frame::default(),
            stack: Vec::new(),
            multi_param: None,
            last_param: None,
        }
    }

    fn push_token(&mut self, token: Token) -> Result<(), PatternError> {
        match token {
            Token::Literal(text) => self.push_literal(&escape_literal(&text)),
            Token::Escaped(ch) => self.push_literal(&escape_literal(&ch.to_string())),
            Token::Slashes(run) => self.push_slashes(run),
            Token::OpenGroup => self.open_group(),
            Token::CloseGroup => self.close_group()?,
            Token::Param { name, multi } => self.push_param(name, multi)?,
        }
        Ok(())
    }

    /// Appends an already-escaped fragment, feeding it into the active
    /// separator context so the next parameter's guard sees it.
    fn push_literal(&mut self, fragment: &str) {
        self.source.push_str(fragment);
        if let Some(sep) = self.current.sep.as_mut() {
            sep.pattern.push_str(fragment);
            sep.empty = false;
        }
    }

    /// A literal slash ends any parameter-boundary ambiguity, so the
    /// separator context resets. Runs merge to `/+` by default, matching
    /// the slash-collapsing a reverse proxy applies; the `!` flag keeps
    /// the run verbatim.
    fn push_slashes(&mut self, run: usize) {
        self.current.sep = None;
        if self.flags.exact_slashes {
            for _ in 0..run {
                self.source.push('/');
            }
        } else {
            self.source.push_str("/+");
        }
    }

    /// Opens an optional section. The new frame starts from a copy of the
    /// enclosing frame's separator context, so a guard crossing the
    /// optional boundary keeps protecting the pending parameter.
    fn open_group(&mut self) {
        self.source.push_str("(?:");
        let frame = Frame {
            sep: self.current.sep.clone(),
            opened_at: self.source.len(),
        };
        self.stack.push(std::mem::replace(&mut self.current, frame));
    }

    /// Closes an optional section, merging its separator context back into
    /// the parent: adopt whichever side has one, or combine both as an
    /// alternation (either text satisfies the guard) with the empty flags
    /// OR-ed together.
    fn close_group(&mut self) -> Result<(), PatternError> {
        let parent = self.stack.pop().ok_or(PatternError::UnbalancedBraces)?;
        let popped = std::mem::replace(&mut self.current, parent);
        if self.source.len() == popped.opened_at {
            return Err(PatternError::EmptyGroup);
        }
        self.current.sep = match (self.current.sep.take(), popped.sep) {
            (Some(outer), Some(inner)) => Some(Separator {
                pattern: format!("(?:{}|{})", outer.pattern, inner.pattern),
                empty: outer.empty || inner.empty,
            }),
            (outer, None) => outer,
            (None, inner) => inner,
        };
        self.source.push_str(")?");
        Ok(())
    }

    fn push_param(&mut self, name: String, multi: bool) -> Result<(), PatternError> {
        if let Some(sep) = &self.current.sep {
            if sep.empty {
                let previous = self.last_param.clone().unwrap_or_default();
                return Err(PatternError::AdjacentParams(previous, name));
            }
        }
        if multi {
            if let Some(first) = &self.multi_param {
                return Err(PatternError::SecondMultiParam(first.clone(), name));
            }
            self.multi_param = Some(name.clone());
        }

        let guard = self.current.sep.as_ref().map(|sep| sep.pattern.clone());
        let fragment = match (multi, guard) {
            // one segment: one-or-more non-slash characters
            (false, None) => "([^/]+)".to_string(),
            (false, Some(sep)) => format!("((?:(?!{sep})[^/])+)"),
            // any number of segments: lazy core, with a greedy "/anything"
            // tail inside the capture to absorb trailing segments without
            // walking them character by character
            (true, None) => "(.*?(?:/.*)?)".to_string(),
            (true, Some(sep)) => format!("((?:(?!{sep}).)*?(?:/.*)?)"),
        };
        self.source.push_str(&fragment);

        let kind = if !multi {
            ParamKind::Single
        } else if self.flags.exact_slashes {
            ParamKind::MultiExact
        } else {
            ParamKind::MultiMergeSlashes
        };
        self.params.push(ParamDescriptor::new(name.clone(), kind));
        self.current.sep = Some(Separator { pattern: String::new(), empty: true });
        self.last_param = Some(name);
        Ok(())
    }

    fn finish(self, allow_sub_routes: bool) -> Result<CompiledPattern, PatternError> {
        if !self.stack.is_empty() {
            return Err(PatternError::UnbalancedBraces);
        }
        let mut full = String::with_capacity(self.source.len() + 48);
        if self.flags.case_insensitive {
            full.push_str("(?i)");
        }
        full.push('^');
        full.push_str(&self.source);
        if allow_sub_routes {
            // the remainder starts either right at a slash the prefix
            // already consumed, or after one-or-more further slashes
            full.push_str(&format!("(?:(?:(?<=/)|/+)(?P<{REST_PARAM}>.*))?"));
        }
        full.push('$');

        let regex = Regex::new(&full).map_err(|err| PatternError::Matcher(Box::new(err)))?;
        debug!(pattern = %full, params = self.params.len(), "compiled route pattern");
        Ok(CompiledPattern { regex, params: self.params })
    }
}

/// Compiles a flag-prefixed path pattern into a reusable matcher.
///
/// The pattern grammar:
///
/// - literal text matches itself (any character can be protected with
///   `\`);
/// - `/` separates segments; runs of slashes merge by default;
/// - `:name` captures one segment, `*name` captures any number of
///   segments (at most one `*` per pattern);
/// - `{...}` marks a section that may be absent from the path;
/// - leading flags before the first `/`: `i` for case-insensitive
///   matching, `!` for exact slash runs.
///
/// With `allow_sub_routes`, the matcher additionally accepts any path
/// that extends the pattern past a segment boundary and exposes the
/// unmatched tail as the [`REST_PARAM`] capture, so a mounted sub-router
/// can keep matching it.
///
/// # Examples
///
/// ```
/// use virgule::{compile, ParamValue};
///
/// let route = compile("/users/:id{/:tab}", false)?;
///
/// let found = route.match_path("/users/42/posts").unwrap();
/// let params = found.params();
/// assert_eq!(params["id"], ParamValue::Text("42".to_string()));
/// assert_eq!(params["tab"], ParamValue::Text("posts".to_string()));
///
/// let found = route.match_path("/users/42").unwrap();
/// assert_eq!(found.params()["tab"], ParamValue::Missing);
///
/// assert!(route.match_path("/users").is_none());
/// # Ok::<(), virgule::PatternError>(())
/// ```
pub fn compile(pattern: &str, allow_sub_routes: bool) -> Result<CompiledPattern, PatternError> {
    let (flags, path) = PatternFlags::strip(pattern)?;
    let mut compiler = Compiler::new(flags);
    for token in tokenize(path)? {
        compiler.push_token(token)?;
    }
    compiler.finish(allow_sub_routes)
}

/// A compiled route pattern: the anchored matcher plus the ordered
/// parameter descriptors.
///
/// Immutable once built; safe to share across any number of concurrent
/// match calls. Descriptor `i` corresponds to capture group `i + 1`; the
/// sub-route remainder, when enabled, is the trailing named group
/// [`REST_PARAM`] and has no descriptor.
#[derive(Debug)]
pub struct CompiledPattern {
    regex: Regex,
    params: Vec<ParamDescriptor>,
}

impl CompiledPattern {
    /// Tests a request path against this pattern.
    ///
    /// Never errors: absence of a match is the normal `None` result. The
    /// engine's backtrack limit is unreachable for patterns this compiler
    /// emits, and is folded into `None` rather than surfaced.
    pub fn match_path<'c, 'p>(&'c self, path: &'p str) -> Option<PathMatch<'c, 'p>> {
        let caps = self.regex.captures(path).ok().flatten()?;
        Some(PathMatch { pattern: self, caps })
    }

    /// Ordered parameter descriptors, in capture order. Doubles as the
    /// route's runtime schema.
    pub fn params(&self) -> &[ParamDescriptor] {
        &self.params
    }

    /// The generated regex source, for diagnostics.
    pub fn regex_source(&self) -> &str {
        self.regex.as_str()
    }
}

/// One successful match of a request path against a [`CompiledPattern`].
#[derive(Debug)]
pub struct PathMatch<'c, 'p> {
    pattern: &'c CompiledPattern,
    caps: fancy_regex::Captures<'p>,
}

impl<'c, 'p> PathMatch<'c, 'p> {
    /// Raw capture for the `index`-th parameter descriptor. `None` when
    /// the descriptor sits in an optional section absent from the path.
    pub fn raw(&self, index: usize) -> Option<&'p str> {
        self.caps.get(index + 1).map(|capture| capture.as_str())
    }

    /// Decodes every capture against its descriptor, yielding the
    /// parameter mapping handed to route handlers.
    pub fn params(&self) -> HashMap<String, ParamValue> {
        self.pattern
            .params
            .iter()
            .enumerate()
            .map(|(index, descriptor)| {
                (descriptor.name().to_string(), descriptor.decode(self.raw(index)))
            })
            .collect()
    }

    /// The unmatched remainder of the path, present only for patterns
    /// compiled with `allow_sub_routes` when the path continues past the
    /// matched prefix.
    pub fn rest(&self) -> Option<&'p str> {
        self.caps.name(REST_PARAM).map(|capture| capture.as_str())
    }
}
