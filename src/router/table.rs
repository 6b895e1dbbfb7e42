//! Route Table
//!
//! Ordered list of route entries. Resolution walks the list in order and
//! the first structural match wins.

use serde::Serialize;
use std::collections::BTreeMap;

use super::error::{RouteError, RouteResult};
use super::pattern::{decode_segment, split_path, RouteParams, RoutePattern};

/// A single route: pattern, unique name and the view it renders
#[derive(Debug, Clone)]
pub struct RouteEntry<V> {
    pub name: String,
    pub pattern: RoutePattern,
    pub view: V,
}

/// The outcome of resolving a path against a table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Resolved<V> {
    /// Route name
    pub name: String,
    /// Bound view
    pub view: V,
    /// Path parameters
    pub params: RouteParams,
    /// Decoded query string
    pub query: BTreeMap<String, String>,
    /// Path relative to the history base, without query or fragment
    pub path: String,
}

/// Ordered route table with a history base path
#[derive(Debug, Clone)]
pub struct RouteTable<V> {
    base: String,
    entries: Vec<RouteEntry<V>>,
}

impl<V: Clone> RouteTable<V> {
    /// Create an empty table. `base` is the history base (e.g. `/mortimer/`);
    /// it is normalised to a leading slash and no trailing slash.
    pub fn new(base: &str) -> Self {
        Self {
            base: normalize_base(base),
            entries: Vec::new(),
        }
    }

    /// Append a route. Rejects duplicate names, patterns ambiguous with an
    /// earlier entry, and anything placed behind a catch-all that covers it.
    pub fn route(mut self, pattern: &str, name: &str, view: V) -> RouteResult<Self> {
        let pattern = RoutePattern::parse(pattern)?;

        for entry in &self.entries {
            if entry.name == name {
                return Err(RouteError::DuplicateName(name.to_string()));
            }
            if entry.pattern.subsumes(&pattern) {
                return Err(RouteError::Unreachable {
                    name: name.to_string(),
                    catch_all: entry.name.clone(),
                });
            }
            if entry.pattern.overlaps(&pattern) {
                return Err(RouteError::Ambiguous {
                    name: name.to_string(),
                    pattern: pattern.to_string(),
                    other: entry.name.clone(),
                });
            }
        }

        self.entries.push(RouteEntry {
            name: name.to_string(),
            pattern,
            view,
        });
        Ok(self)
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    pub fn entries(&self) -> &[RouteEntry<V>] {
        &self.entries
    }

    pub fn get(&self, name: &str) -> Option<&RouteEntry<V>> {
        self.entries.iter().find(|e| e.name == name)
    }

    /// Resolve a location (path with optional query and fragment).
    ///
    /// Returns `None` when the path lies outside the base or no entry
    /// matches.
    pub fn resolve(&self, location: &str) -> Option<Resolved<V>> {
        let (path, query) = split_location(location);
        let path = self.strip_base(path)?;
        let segments = split_path(path);

        self.entries.iter().find_map(|entry| {
            entry.pattern.match_segments(&segments).map(|params| Resolved {
                name: entry.name.clone(),
                view: entry.view.clone(),
                params,
                query: parse_query(query),
                path: path.to_string(),
            })
        })
    }

    /// Build the full (base-prefixed) location of a named route
    pub fn href(&self, name: &str, params: &RouteParams) -> RouteResult<String> {
        let entry = self
            .get(name)
            .ok_or_else(|| RouteError::UnknownRoute(name.to_string()))?;

        let path = entry
            .pattern
            .build(params)
            .map_err(|param| RouteError::MissingParam {
                route: name.to_string(),
                param,
            })?;

        if self.base.is_empty() {
            Ok(path)
        } else if path == "/" {
            Ok(format!("{}/", self.base))
        } else {
            Ok(format!("{}{}", self.base, path))
        }
    }

    /// Remove the history base from a path. Returns `None` if the path is
    /// not under the base.
    pub fn strip_base<'a>(&self, path: &'a str) -> Option<&'a str> {
        if self.base.is_empty() {
            return match path {
                "" => Some("/"),
                p if p.starts_with('/') => Some(p),
                _ => None,
            };
        }

        let rest = path.strip_prefix(self.base.as_str())?;
        if rest.is_empty() {
            Some("/")
        } else if rest.starts_with('/') {
            Some(rest)
        } else {
            None
        }
    }
}

/// Normalise a base path: leading slash, no trailing slash, `/` becomes empty
pub fn normalize_base(base: &str) -> String {
    let trimmed = base.trim().trim_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("/{trimmed}")
    }
}

fn split_location(location: &str) -> (&str, &str) {
    let without_fragment = location.split('#').next().unwrap_or_default();
    match without_fragment.split_once('?') {
        Some((path, query)) => (path, query),
        None => (without_fragment, ""),
    }
}

fn parse_query(query: &str) -> BTreeMap<String, String> {
    query
        .split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            let key = decode_segment(&key.replace('+', " ")).into_owned();
            let value = decode_segment(&value.replace('+', " ")).into_owned();
            (key, value)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> RouteTable<u8> {
        RouteTable::new("/")
            .route("/", "home", 0)
            .unwrap()
            .route("/sessions/:session", "sessionView", 1)
            .unwrap()
            .route("/sessions/:session/grid/:grid", "gridView", 2)
            .unwrap()
    }

    #[test]
    fn test_first_match_wins() {
        let table = RouteTable::new("")
            .route("/sessions/new", "newSession", 'n')
            .unwrap()
            .route("/sessions/:session/grid/:grid", "gridView", 'g')
            .unwrap()
            .route("/*path", "notFound", 'x')
            .unwrap();

        assert_eq!(table.resolve("/sessions/new").unwrap().view, 'n');
        assert_eq!(table.resolve("/sessions/a/grid/b").unwrap().view, 'g');
        assert_eq!(table.resolve("/sessions/a").unwrap().view, 'x');
    }

    #[test]
    fn test_no_match_without_catch_all() {
        let table = table();
        assert!(table.resolve("/unknown").is_none());
        assert!(table.resolve("/sessions").is_none());
        assert!(table.resolve("/sessions/1/grid").is_none());
    }

    #[test]
    fn test_query_and_fragment() {
        let resolved = table().resolve("/sessions/42?view=list&q=a+b#top").unwrap();
        assert_eq!(resolved.name, "sessionView");
        assert_eq!(resolved.path, "/sessions/42");
        assert_eq!(resolved.query.get("view").map(String::as_str), Some("list"));
        assert_eq!(resolved.query.get("q").map(String::as_str), Some("a b"));
    }

    #[test]
    fn test_trailing_slash_ignored() {
        let resolved = table().resolve("/sessions/42/").unwrap();
        assert_eq!(resolved.params.get("session"), Some("42"));
    }

    #[test]
    fn test_relative_locations_rejected() {
        let table = table();
        assert!(table.resolve("sessions/42").is_none());
        assert!(table.resolve("sessions/42/grid/7").is_none());
        assert_eq!(table.resolve("").unwrap().name, "home");
        assert_eq!(table.resolve("/sessions/42").unwrap().name, "sessionView");
    }

    #[test]
    fn test_base_stripping() {
        let table = RouteTable::new("/mortimer/")
            .route("/", "home", 0)
            .unwrap()
            .route("/sessions/:session", "sessionView", 1)
            .unwrap();

        assert_eq!(table.base(), "/mortimer");
        assert_eq!(table.resolve("/mortimer").unwrap().name, "home");
        assert_eq!(table.resolve("/mortimer/").unwrap().name, "home");
        assert_eq!(
            table.resolve("/mortimer/sessions/9").unwrap().params.get("session"),
            Some("9")
        );
        assert!(table.resolve("/sessions/9").is_none());
        assert!(table.resolve("/mortimerx/sessions/9").is_none());
    }

    #[test]
    fn test_rejects_duplicates_and_ambiguity() {
        let dup = table().route("/other", "home", 9);
        assert_eq!(dup.unwrap_err(), RouteError::DuplicateName("home".into()));

        let ambiguous = table().route("/sessions/:id", "byId", 9);
        assert!(matches!(ambiguous, Err(RouteError::Ambiguous { .. })));

        let unreachable = table()
            .route("/*path", "notFound", 9)
            .unwrap()
            .route("/late", "late", 10);
        assert!(matches!(unreachable, Err(RouteError::Unreachable { .. })));
    }

    #[test]
    fn test_href() {
        let table = RouteTable::new("/mortimer")
            .route("/", "home", 0)
            .unwrap()
            .route("/sessions/:session/grid/:grid", "gridView", 2)
            .unwrap();

        assert_eq!(table.href("home", &RouteParams::new()).unwrap(), "/mortimer/");
        let params = RouteParams::new().with("session", "s 1").with("grid", "4");
        assert_eq!(
            table.href("gridView", &params).unwrap(),
            "/mortimer/sessions/s%201/grid/4"
        );
        assert!(matches!(
            table.href("sessionView", &params),
            Err(RouteError::UnknownRoute(_))
        ));
        assert!(matches!(
            table.href("gridView", &RouteParams::new()),
            Err(RouteError::MissingParam { .. })
        ));
    }

    #[test]
    fn test_href_round_trips_through_resolve() {
        let table = RouteTable::new("/mortimer")
            .route("/sessions/:session", "sessionView", 1)
            .unwrap();
        let params = RouteParams::new().with("session", "Screening-2022/06");
        let href = table.href("sessionView", &params).unwrap();
        assert_eq!(table.resolve(&href).unwrap().params, params);
    }

    #[test]
    fn test_normalize_base() {
        assert_eq!(normalize_base("/"), "");
        assert_eq!(normalize_base(""), "");
        assert_eq!(normalize_base("mortimer"), "/mortimer");
        assert_eq!(normalize_base("/mortimer/"), "/mortimer");
    }
}
