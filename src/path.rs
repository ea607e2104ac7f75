/// Target path of a request: either a verbatim path or a list of segments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSpec {
    /// Used as-is (e.g. `/api/user`).
    Single(String),
    /// Joined in order, each segment prefixed with `/`.
    Segments(Vec<String>),
}

impl From<&str> for PathSpec {
    fn from(path: &str) -> Self {
        PathSpec::Single(path.to_string())
    }
}

impl From<String> for PathSpec {
    fn from(path: String) -> Self {
        PathSpec::Single(path)
    }
}

impl From<&String> for PathSpec {
    fn from(path: &String) -> Self {
        PathSpec::Single(path.clone())
    }
}

impl From<Vec<String>> for PathSpec {
    fn from(segments: Vec<String>) -> Self {
        PathSpec::Segments(segments)
    }
}

impl From<Vec<&str>> for PathSpec {
    fn from(segments: Vec<&str>) -> Self {
        PathSpec::Segments(segments.into_iter().map(str::to_string).collect())
    }
}

impl From<&[&str]> for PathSpec {
    fn from(segments: &[&str]) -> Self {
        PathSpec::Segments(segments.iter().map(|s| s.to_string()).collect())
    }
}

impl<const N: usize> From<[&str; N]> for PathSpec {
    fn from(segments: [&str; N]) -> Self {
        PathSpec::Segments(segments.iter().map(|s| s.to_string()).collect())
    }
}

/// Build the path-and-query part of a request URL.
///
/// No encoding or slash normalization happens here: segments are
/// concatenated as given, and `query` must already be encoded. A supplied
/// query string is appended after `?` even when it is empty.
pub fn format_path(path: &PathSpec, query: Option<&str>) -> String {
    let mut out = match path {
        PathSpec::Single(p) => p.clone(),
        PathSpec::Segments(segments) => {
            let mut joined = String::with_capacity(segments.iter().map(|s| s.len() + 1).sum());
            for segment in segments {
                joined.push('/');
                joined.push_str(segment);
            }
            joined
        }
    };

    if let Some(q) = query {
        out.push('?');
        out.push_str(q);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segments_are_slash_prefixed() {
        let path = PathSpec::from(["a", "b", "c"]);
        assert_eq!(format_path(&path, None), "/a/b/c");
    }

    #[test]
    fn test_segments_keep_repeated_slashes() {
        let path = PathSpec::from(vec!["/api", "", "user/"]);
        assert_eq!(format_path(&path, None), "//api//user/");
    }

    #[test]
    fn test_empty_segment_list_is_empty_path() {
        let path = PathSpec::Segments(Vec::new());
        assert_eq!(format_path(&path, None), "");
    }

    #[test]
    fn test_single_path_is_verbatim() {
        assert_eq!(format_path(&"api/user/".into(), None), "api/user/");
    }

    #[test]
    fn test_query_appended() {
        assert_eq!(
            format_path(&"/api/user".into(), Some("test=1")),
            "/api/user?test=1"
        );
    }

    #[test]
    fn test_empty_query_still_appends_separator() {
        assert_eq!(format_path(&"/api/user".into(), Some("")), "/api/user?");
    }
}
