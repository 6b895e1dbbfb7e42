//! Route Patterns
//!
//! Path patterns such as `/sessions/:session/grid/:grid` and the parameter
//! map a successful match produces.

use serde::Serialize;
use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use super::error::{RouteError, RouteResult};

/// One segment of a route pattern
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Must equal the path segment exactly
    Literal(String),
    /// `:name` - binds one non-empty path segment
    Param(String),
    /// `*name` - binds the rest of the path (only valid as the last segment)
    CatchAll(String),
}

/// A parsed route pattern
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutePattern {
    raw: String,
    segments: Vec<Segment>,
}

/// Parameters bound by a route match, keyed by parameter name
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RouteParams(BTreeMap<String, String>);

impl RouteParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.0.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for RouteParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Self::new();
        for (k, v) in iter {
            params.insert(k, v);
        }
        params
    }
}

impl RoutePattern {
    /// Parse a pattern. It must start with `/`; `/` alone is the root.
    pub fn parse(pattern: &str) -> RouteResult<Self> {
        let invalid = |reason: &str| RouteError::InvalidPattern {
            pattern: pattern.to_string(),
            reason: reason.to_string(),
        };

        if !pattern.starts_with('/') {
            return Err(invalid("pattern must start with '/'"));
        }

        let parts = split_path(pattern);
        let mut segments = Vec::with_capacity(parts.len());
        let mut seen = Vec::new();

        for (i, part) in parts.iter().enumerate() {
            let segment = if let Some(name) = part.strip_prefix(':') {
                Segment::Param(name.to_string())
            } else if let Some(name) = part.strip_prefix('*') {
                if i + 1 != parts.len() {
                    return Err(invalid("catch-all must be the last segment"));
                }
                Segment::CatchAll(name.to_string())
            } else if part.is_empty() {
                return Err(invalid("empty segment"));
            } else {
                Segment::Literal(part.to_string())
            };

            if let Segment::Param(name) | Segment::CatchAll(name) = &segment {
                if name.is_empty() {
                    return Err(invalid("parameter name is empty"));
                }
                if seen.contains(name) {
                    return Err(invalid(&format!("parameter {name:?} appears twice")));
                }
                seen.push(name.clone());
            }

            segments.push(segment);
        }

        Ok(Self {
            raw: pattern.to_string(),
            segments,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Names of all parameters, in pattern order
    pub fn param_names(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|s| match s {
            Segment::Param(name) | Segment::CatchAll(name) => Some(name.as_str()),
            Segment::Literal(_) => None,
        })
    }

    pub fn is_catch_all(&self) -> bool {
        matches!(self.segments.last(), Some(Segment::CatchAll(_)))
    }

    /// Match already-split path segments against this pattern.
    ///
    /// Literal segments compare against the percent-decoded path segment;
    /// parameter values are stored decoded.
    pub fn match_segments(&self, path: &[&str]) -> Option<RouteParams> {
        let mut params = RouteParams::new();

        for (i, segment) in self.segments.iter().enumerate() {
            match segment {
                Segment::Literal(literal) => {
                    let part = path.get(i)?;
                    if decode_segment(part) != literal.as_str() {
                        return None;
                    }
                }
                Segment::Param(name) => {
                    let part = path.get(i)?;
                    if part.is_empty() {
                        return None;
                    }
                    params.insert(name.as_str(), decode_segment(part));
                }
                Segment::CatchAll(name) => {
                    let rest = path
                        .get(i..)
                        .unwrap_or_default()
                        .iter()
                        .map(|p| decode_segment(p))
                        .collect::<Vec<_>>()
                        .join("/");
                    params.insert(name.as_str(), rest);
                    return Some(params);
                }
            }
        }

        (path.len() == self.segments.len()).then_some(params)
    }

    /// Whether two non-catch-all patterns could match the same path
    pub fn overlaps(&self, other: &RoutePattern) -> bool {
        if self.is_catch_all() || other.is_catch_all() {
            return false;
        }
        self.segments.len() == other.segments.len()
            && self
                .segments
                .iter()
                .zip(&other.segments)
                .all(|pair| match pair {
                    (Segment::Literal(a), Segment::Literal(b)) => a == b,
                    _ => true,
                })
    }

    /// Whether this catch-all pattern matches every path `other` matches
    pub fn subsumes(&self, other: &RoutePattern) -> bool {
        let Some(Segment::CatchAll(_)) = self.segments.last() else {
            return false;
        };
        let prefix = &self.segments[..self.segments.len() - 1];
        if other.segments.len() < prefix.len() {
            return false;
        }

        prefix.iter().zip(&other.segments).all(|pair| match pair {
            (Segment::Param(_), Segment::Literal(_) | Segment::Param(_)) => true,
            (Segment::Literal(a), Segment::Literal(b)) => a == b,
            _ => false,
        })
    }

    /// Fill the pattern with parameter values, percent-encoding each one
    pub fn build(&self, params: &RouteParams) -> Result<String, String> {
        let mut out = String::new();

        for segment in &self.segments {
            match segment {
                Segment::Literal(literal) => {
                    out.push('/');
                    out.push_str(literal);
                }
                Segment::Param(name) => {
                    let value = params
                        .get(name)
                        .filter(|v| !v.is_empty())
                        .ok_or_else(|| name.clone())?;
                    out.push('/');
                    out.push_str(&urlencoding::encode(value));
                }
                Segment::CatchAll(name) => {
                    let value = params.get(name).ok_or_else(|| name.clone())?;
                    for part in value.split('/').filter(|p| !p.is_empty()) {
                        out.push('/');
                        out.push_str(&urlencoding::encode(part));
                    }
                }
            }
        }

        if out.is_empty() {
            out.push('/');
        }
        Ok(out)
    }
}

impl FromStr for RoutePattern {
    type Err = RouteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for RoutePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// Split a path into segments, ignoring the leading slash and one trailing
/// slash. Interior empty segments are kept so they never match a parameter.
pub fn split_path(path: &str) -> Vec<&str> {
    let trimmed = path.strip_prefix('/').unwrap_or(path);
    let trimmed = trimmed.strip_suffix('/').unwrap_or(trimmed);
    if trimmed.is_empty() {
        Vec::new()
    } else {
        trimmed.split('/').collect()
    }
}

/// Percent-decode a segment, keeping the raw text if it is not valid UTF-8
pub fn decode_segment(segment: &str) -> Cow<'_, str> {
    urlencoding::decode(segment).unwrap_or(Cow::Borrowed(segment))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_root() {
        let pattern = RoutePattern::parse("/").unwrap();
        assert!(pattern.segments().is_empty());
        assert!(pattern.match_segments(&[]).is_some());
        assert!(pattern.match_segments(&["x"]).is_none());
    }

    #[test]
    fn test_parse_params() {
        let pattern = RoutePattern::parse("/sessions/:session/grid/:grid").unwrap();
        assert_eq!(
            pattern.segments(),
            &[
                Segment::Literal("sessions".into()),
                Segment::Param("session".into()),
                Segment::Literal("grid".into()),
                Segment::Param("grid".into()),
            ]
        );
        assert_eq!(
            pattern.param_names().collect::<Vec<_>>(),
            vec!["session", "grid"]
        );
    }

    #[test]
    fn test_parse_rejects_bad_patterns() {
        assert!(RoutePattern::parse("sessions").is_err());
        assert!(RoutePattern::parse("/sessions/:").is_err());
        assert!(RoutePattern::parse("/a/:x/b/:x").is_err());
        assert!(RoutePattern::parse("/*rest/tail").is_err());
        assert!(RoutePattern::parse("/a//b").is_err());
    }

    #[test]
    fn test_param_requires_non_empty_segment() {
        let pattern = RoutePattern::parse("/sessions/:session/grid/:grid").unwrap();
        assert!(pattern.match_segments(&split_path("/sessions//grid/7")).is_none());
        let params = pattern
            .match_segments(&split_path("/sessions/42/grid/7"))
            .unwrap();
        assert_eq!(params.get("session"), Some("42"));
        assert_eq!(params.get("grid"), Some("7"));
    }

    #[test]
    fn test_params_are_decoded() {
        let pattern = RoutePattern::parse("/sessions/:session").unwrap();
        let params = pattern
            .match_segments(&split_path("/sessions/Screening%2020220617"))
            .unwrap();
        assert_eq!(params.get("session"), Some("Screening 20220617"));
    }

    #[test]
    fn test_catch_all_binds_rest() {
        let pattern = RoutePattern::parse("/*path").unwrap();
        let params = pattern.match_segments(&split_path("/a/b/c")).unwrap();
        assert_eq!(params.get("path"), Some("a/b/c"));

        let params = pattern.match_segments(&[]).unwrap();
        assert_eq!(params.get("path"), Some(""));
    }

    #[test]
    fn test_overlap_detection() {
        let a = RoutePattern::parse("/sessions/:session").unwrap();
        let b = RoutePattern::parse("/sessions/:id").unwrap();
        let c = RoutePattern::parse("/grids/:grid").unwrap();
        let d = RoutePattern::parse("/:anything/new").unwrap();
        let e = RoutePattern::parse("/grids/:grid/new").unwrap();
        assert!(a.overlaps(&b));
        assert!(!a.overlaps(&c));
        // both match /sessions/new
        assert!(a.overlaps(&d));
        assert!(d.overlaps(&a));
        assert!(!a.overlaps(&e));
    }

    #[test]
    fn test_catch_all_subsumes() {
        let all = RoutePattern::parse("/*path").unwrap();
        let scoped = RoutePattern::parse("/sessions/*rest").unwrap();
        let session = RoutePattern::parse("/sessions/:session").unwrap();
        let root = RoutePattern::parse("/").unwrap();
        assert!(all.subsumes(&session));
        assert!(all.subsumes(&root));
        assert!(scoped.subsumes(&session));
        assert!(!scoped.subsumes(&root));
        assert!(!session.subsumes(&root));
    }

    #[test]
    fn test_build_encodes_values() {
        let pattern = RoutePattern::parse("/sessions/:session/grid/:grid").unwrap();
        let params = RouteParams::new()
            .with("session", "run 1")
            .with("grid", "3");
        assert_eq!(pattern.build(&params).unwrap(), "/sessions/run%201/grid/3");

        let missing = RouteParams::new().with("session", "run");
        assert_eq!(pattern.build(&missing), Err("grid".to_string()));
        assert_eq!(
            RoutePattern::parse("/").unwrap().build(&RouteParams::new()).unwrap(),
            "/"
        );
    }
}
