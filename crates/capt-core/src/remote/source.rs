//! Parsing of GitHub example sources
//!
//! Two input grammars are accepted:
//! - full URLs: `https://github.com/<owner>/<repo>[/tree/<ref>/<path...>][#<ref>]`
//! - shorthand: `<owner>/<repo>[/<path...>][#<ref>]`, where a `tree/<ref>/...`
//!   segment is recognised the same way as in URLs
//!
//! A ref given after `#` always wins over one implied by a `tree` segment.

use crate::error::SourceError;
use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, CONTROLS};
use std::fmt;
use std::str::FromStr;
use url::Url;

const GITHUB_HOSTS: &[&str] = &["github.com", "www.github.com"];
const DEFAULT_REF: &str = "HEAD";
const EMPTY_REF_MESSAGE: &str = "GitHub source ref cannot be empty after \"#\".";
const DOT_SEGMENT_MESSAGE: &str = "Example source path cannot contain \".\" or \"..\" segments.";

/// Characters escaped when a ref or path segment is written back into a URL path
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'\\')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// A validated GitHub example source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GithubSource {
    owner: String,
    repo: String,
    git_ref: String,
    sub_path: String,
    normalized_source: String,
}

impl GithubSource {
    /// Parse a GitHub URL or `owner/repo[/path][#ref]` shorthand
    pub fn parse(source: &str) -> Result<Self, SourceError> {
        let trimmed = source.trim();
        if trimmed.is_empty() {
            return Err(SourceError::new("Example source cannot be empty."));
        }

        if trimmed.ends_with('#') {
            return Err(SourceError::new(EMPTY_REF_MESSAGE));
        }

        if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
            parse_url_source(trimmed)
        } else {
            parse_shorthand_source(trimmed)
        }
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn repo(&self) -> &str {
        &self.repo
    }

    /// Branch, tag or commit; `HEAD` when none was given
    pub fn git_ref(&self) -> &str {
        &self.git_ref
    }

    /// Repository-relative directory; empty for the repository root
    pub fn sub_path(&self) -> &str {
        &self.sub_path
    }

    /// Canonical `https://github.com/<owner>/<repo>/tree/<ref>[/<path>]` form
    pub fn normalized_source(&self) -> &str {
        &self.normalized_source
    }

    fn new(owner: String, repo: String, git_ref: &str, sub_path: &str) -> Self {
        let git_ref = match git_ref.trim() {
            "" => DEFAULT_REF.to_string(),
            trimmed => trimmed.to_string(),
        };
        let sub_path = sub_path.trim_matches('/').to_string();

        let mut normalized_source = format!(
            "https://github.com/{}/{}/tree/{}",
            owner,
            repo,
            utf8_percent_encode(&git_ref, PATH_SEGMENT)
        );
        for segment in sub_path.split('/').filter(|s| !s.is_empty()) {
            normalized_source.push('/');
            normalized_source.extend(utf8_percent_encode(segment, PATH_SEGMENT));
        }

        Self {
            owner,
            repo,
            git_ref,
            sub_path,
            normalized_source,
        }
    }
}

impl FromStr for GithubSource {
    type Err = SourceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for GithubSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.normalized_source)
    }
}

fn parse_url_source(raw: &str) -> Result<GithubSource, SourceError> {
    let url = Url::parse(raw).map_err(|_| SourceError::new("Example source is not a valid URL."))?;

    let on_github = url
        .host_str()
        .is_some_and(|host| GITHUB_HOSTS.contains(&host));
    if !on_github {
        return Err(SourceError::new("Example source URL must point to github.com."));
    }

    let segments = decode_segments(url.path())?;
    if segments.len() < 2 {
        return Err(SourceError::new(
            "GitHub example URL must include owner and repository.",
        ));
    }

    let ref_from_hash = match url.fragment() {
        Some(fragment) => Some(decode_ref(fragment)?),
        None => None,
    };

    from_segments(
        &segments,
        ref_from_hash,
        "GitHub tree URL must include a branch or tag.",
    )
}

fn parse_shorthand_source(raw: &str) -> Result<GithubSource, SourceError> {
    let (main_part, ref_from_hash) = match raw.split_once('#') {
        Some((main_part, fragment)) => (main_part, Some(decode_ref(fragment)?)),
        None => (raw, None),
    };

    let segments = decode_segments(main_part)?;
    if segments.len() < 2 {
        return Err(SourceError::new(
            "GitHub repo source must use \"<owner>/<repo>\" format.",
        ));
    }

    from_segments(
        &segments,
        ref_from_hash,
        "GitHub tree source must include a branch or tag.",
    )
}

fn from_segments(
    segments: &[String],
    ref_from_hash: Option<String>,
    missing_tree_ref: &str,
) -> Result<GithubSource, SourceError> {
    let owner = validate_token(&segments[0], "owner")?;
    let repo = validate_token(strip_git_suffix(&segments[1]), "repository")?;

    let (git_ref, sub_path) = if segments.get(2).map(String::as_str) == Some("tree") {
        let tree_ref = segments
            .get(3)
            .ok_or_else(|| SourceError::new(missing_tree_ref))?;
        (
            ref_from_hash.unwrap_or_else(|| tree_ref.clone()),
            segments[4..].join("/"),
        )
    } else {
        (
            ref_from_hash.unwrap_or_else(|| DEFAULT_REF.to_string()),
            segments.get(2..).map(|rest| rest.join("/")).unwrap_or_default(),
        )
    };

    if is_dot_segment(git_ref.trim()) {
        return Err(SourceError::new(format!(
            "Invalid GitHub ref in example source: \"{}\".",
            git_ref.trim()
        )));
    }
    if sub_path.split('/').any(is_dot_segment) {
        return Err(SourceError::new(DOT_SEGMENT_MESSAGE));
    }

    Ok(GithubSource::new(owner, repo, &git_ref, &sub_path))
}

fn is_dot_segment(segment: &str) -> bool {
    matches!(segment, "." | "..")
}

fn decode_segments(path: &str) -> Result<Vec<String>, SourceError> {
    path.split('/')
        .filter(|segment| !segment.is_empty())
        .map(|segment| {
            percent_decode_str(segment)
                .decode_utf8()
                .map(|decoded| decoded.into_owned())
                .map_err(|_| SourceError::new("Example source path is not valid URL encoding."))
        })
        .collect()
}

fn decode_ref(fragment: &str) -> Result<String, SourceError> {
    let raw_ref = fragment.trim();
    if raw_ref.is_empty() {
        return Err(SourceError::new(EMPTY_REF_MESSAGE));
    }

    percent_decode_str(raw_ref)
        .decode_utf8()
        .map(|decoded| decoded.into_owned())
        .map_err(|_| SourceError::new("GitHub source ref is not valid URL encoding."))
}

fn validate_token(value: &str, label: &str) -> Result<String, SourceError> {
    let valid = !value.is_empty()
        && value
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'));

    if valid {
        Ok(value.to_string())
    } else {
        Err(SourceError::new(format!(
            "Invalid GitHub {} in example source: \"{}\".",
            label, value
        )))
    }
}

fn strip_git_suffix(repo: &str) -> &str {
    repo.strip_suffix(".git").unwrap_or(repo)
}
