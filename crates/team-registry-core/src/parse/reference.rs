//! Recognition of account references.
//!
//! A team or member account may be written as a profile URL on a known
//! code host (with or without the scheme) or as a bare handle, optionally
//! prefixed with `@`.

use nom::{
    IResult, Parser,
    branch::alt,
    bytes::complete::{tag, tag_no_case},
    combinator::opt,
};
use std::fmt;

/// Hosts whose profile URLs are accepted as account references.
pub const KNOWN_HOSTS: &[&str] = &["github.com", "gitlab.com", "gitee.com"];

/// Maximum length of a GitHub login.
const MAX_HANDLE_LEN: usize = 39;

/// The URL scheme written in a reference, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scheme {
    /// `http://`
    Http,
    /// `https://`
    Https,
}

/// A recognized account reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccountReference {
    /// A profile or repository URL on a known host.
    Url {
        /// Scheme as written; `None` when the submitter left it out.
        scheme: Option<Scheme>,
        /// Lowercased host without a `www.` prefix.
        host: String,
        /// Non-empty path segments.
        segments: Vec<String>,
    },
    /// A bare handle, stored without the `@`.
    Handle(String),
}

impl AccountReference {
    /// Recognizes an account reference.
    ///
    /// Returns the reason the text was rejected on failure.
    pub fn parse(text: &str) -> Result<Self, String> {
        let text = text.trim();
        if text.is_empty() {
            return Err("reference is empty".to_string());
        }
        if text.chars().any(char::is_whitespace) {
            return Err("reference cannot contain whitespace".to_string());
        }

        let (rest, scheme) = parse_scheme(text).map_err(|_| "unreadable reference".to_string())?;
        let rest = strip_www(rest);
        let (host_part, path) = match rest.split_once('/') {
            Some((host, path)) => (host, Some(path)),
            None => (rest, None),
        };
        let host = host_part.to_ascii_lowercase();

        if KNOWN_HOSTS.contains(&host.as_str()) {
            let segments = url_segments(path.unwrap_or(""))?;
            return Ok(AccountReference::Url {
                scheme,
                host,
                segments,
            });
        }

        if scheme.is_some() || path.is_some() || host.contains('.') {
            return Err(format!(
                "'{}' is not a known host (expected one of: {})",
                host_part,
                KNOWN_HOSTS.join(", ")
            ));
        }

        let handle = text.strip_prefix('@').unwrap_or(text);
        validate_handle(handle)?;
        Ok(AccountReference::Handle(handle.to_string()))
    }

    /// Returns true if the reference is written as a URL.
    pub fn is_url(&self) -> bool {
        matches!(self, AccountReference::Url { .. })
    }

    /// Returns the account name this reference points at.
    ///
    /// For URLs this is the first path segment (the user or organization).
    pub fn account(&self) -> &str {
        match self {
            AccountReference::Url { segments, .. } => {
                segments.first().map(String::as_str).unwrap_or_default()
            }
            AccountReference::Handle(handle) => handle.as_str(),
        }
    }
}

impl fmt::Display for AccountReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccountReference::Url { host, segments, .. } => {
                write!(f, "https://{}/{}", host, segments.join("/"))
            }
            AccountReference::Handle(handle) => write!(f, "@{}", handle),
        }
    }
}

/// Parses an optional `http://` or `https://` prefix.
fn parse_scheme(input: &str) -> IResult<&str, Option<Scheme>> {
    opt(alt((
        tag_no_case("https://").map(|_| Scheme::Https),
        tag_no_case("http://").map(|_| Scheme::Http),
    )))
    .parse(input)
}

/// Drops a leading `www.` from a host.
fn strip_www(input: &str) -> &str {
    let parsed: IResult<&str, &str> = tag_no_case("www.")(input);
    match parsed {
        Ok((rest, _)) => rest,
        Err(_) => input,
    }
}

/// Splits and checks the path part of a URL reference.
fn url_segments(path: &str) -> Result<Vec<String>, String> {
    // Query strings and fragments carry no account information.
    let path = path.split(['?', '#']).next().unwrap_or("");
    let segments: Vec<String> = path
        .split('/')
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect();

    if segments.is_empty() {
        return Err("URL has no account path".to_string());
    }

    for segment in &segments {
        if !segment
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
        {
            return Err(format!("invalid path segment '{}'", segment));
        }
    }

    Ok(segments)
}

/// Validates a bare handle against GitHub login rules.
pub fn validate_handle(handle: &str) -> Result<(), String> {
    if handle.is_empty() {
        return Err("handle cannot be empty".to_string());
    }

    if handle.len() > MAX_HANDLE_LEN {
        return Err(format!(
            "handle cannot exceed {} characters",
            MAX_HANDLE_LEN
        ));
    }

    if handle.starts_with('-') || handle.ends_with('-') {
        return Err("handle cannot start or end with a hyphen".to_string());
    }

    if !handle.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
        return Err("handle can only contain alphanumeric characters and hyphens".to_string());
    }

    if handle.contains("--") {
        return Err("handle cannot contain consecutive hyphens".to_string());
    }

    Ok(())
}

/// Returns true if the text looks like a URL on a known host.
pub fn looks_like_url(text: &str) -> bool {
    matches!(AccountReference::parse(text), Ok(AccountReference::Url { .. }))
}

/// Consumes a literal `@` prefix, if present.
pub(crate) fn strip_at(input: &str) -> &str {
    let parsed: IResult<&str, &str> = tag("@")(input);
    match parsed {
        Ok((rest, _)) => rest,
        Err(_) => input,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_url() {
        let reference = AccountReference::parse("https://github.com/team-alpha").unwrap();
        assert_eq!(
            reference,
            AccountReference::Url {
                scheme: Some(Scheme::Https),
                host: "github.com".to_string(),
                segments: vec!["team-alpha".to_string()],
            }
        );
        assert_eq!(reference.account(), "team-alpha");
    }

    #[test]
    fn url_without_scheme() {
        let reference = AccountReference::parse("github.com/alpha-team").unwrap();
        assert!(reference.is_url());
        assert_eq!(reference.account(), "alpha-team");
        assert_eq!(reference.to_string(), "https://github.com/alpha-team");
    }

    #[test]
    fn url_with_www_and_trailing_slash() {
        let reference = AccountReference::parse("http://www.GitHub.com/alpha/").unwrap();
        match reference {
            AccountReference::Url {
                scheme,
                host,
                segments,
            } => {
                assert_eq!(scheme, Some(Scheme::Http));
                assert_eq!(host, "github.com");
                assert_eq!(segments, vec!["alpha"]);
            }
            _ => panic!("Expected URL reference"),
        }
    }

    #[test]
    fn repository_url_segments() {
        let reference =
            AccountReference::parse("https://github.com/team-alpha/project.git").unwrap();
        match reference {
            AccountReference::Url { segments, .. } => {
                assert_eq!(segments, vec!["team-alpha", "project.git"]);
            }
            _ => panic!("Expected URL reference"),
        }
    }

    #[test]
    fn bare_and_at_handles() {
        assert_eq!(
            AccountReference::parse("team-alpha").unwrap(),
            AccountReference::Handle("team-alpha".to_string())
        );
        assert_eq!(
            AccountReference::parse("@team-alpha").unwrap(),
            AccountReference::Handle("team-alpha".to_string())
        );
    }

    #[test]
    fn unknown_host_rejected() {
        let err = AccountReference::parse("https://example.com/alpha").unwrap_err();
        assert!(err.contains("not a known host"));

        let err = AccountReference::parse("example.com").unwrap_err();
        assert!(err.contains("not a known host"));
    }

    #[test]
    fn host_without_path_rejected() {
        let err = AccountReference::parse("https://github.com/").unwrap_err();
        assert!(err.contains("no account path"));
    }

    #[test]
    fn whitespace_rejected() {
        assert!(AccountReference::parse("team alpha").is_err());
    }

    #[test]
    fn handle_rules() {
        assert!(validate_handle("ok-name").is_ok());
        assert!(validate_handle("-bad").is_err());
        assert!(validate_handle("bad-").is_err());
        assert!(validate_handle("bad--name").is_err());
        assert!(validate_handle("bad_name").is_err());
        assert!(validate_handle(&"a".repeat(40)).is_err());
        assert!(validate_handle(&"a".repeat(39)).is_ok());
    }

    #[test]
    fn looks_like_url_detection() {
        assert!(looks_like_url("https://github.com/zhangsan"));
        assert!(looks_like_url("github.com/zhangsan"));
        assert!(!looks_like_url("zhangsan"));
    }
}
