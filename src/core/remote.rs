//! Remote URL resolution and web link construction.
//!
//! A remote is accepted in URL form (`https://host/path.git`, `ssh://git@host/path`)
//! or SCP form (`git@host:path.git`) and reduced to a [`RemoteInfo`]: host, repository
//! path and a `https://{host}/{path}` web base. The hosting [`Provider`] is guessed
//! from the host name and decides how pull request and issue links look.

use crate::core::{git::GitClient, process::GitExecutor};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use std::path::Path;
use url::Url;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provider {
    GitHub,
    GitLab,
    Bitbucket,
    Other,
}

impl Provider {
    /// Case-insensitive substring match on the host name
    pub fn from_host(host: &str) -> Self {
        let host = host.to_lowercase();
        if host.contains("github") {
            Provider::GitHub
        } else if host.contains("gitlab") {
            Provider::GitLab
        } else if host.contains("bitbucket") {
            Provider::Bitbucket
        } else {
            Provider::Other
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteInfo {
    pub host: String,
    pub repo_path: String,
    pub web_base: String,
    pub provider: Provider,
}

impl RemoteInfo {
    /// Normalize a remote string; `None` when no host and path can be extracted.
    pub fn parse(remote: &str) -> Option<Self> {
        let trimmed = remote.trim();
        if trimmed.is_empty() {
            return None;
        }

        let (host, path) = match Url::parse(trimmed) {
            Ok(url) if url.host_str().is_some_and(|h| !h.is_empty()) => {
                (url.host_str()?.to_string(), url.path().to_string())
            }
            _ => parse_scp(trimmed)?,
        };

        let mut path = path.trim_matches('/');
        if let Some(stripped) = path.strip_suffix(".git") {
            path = stripped;
        }
        if path.is_empty() {
            return None;
        }

        Some(Self {
            web_base: format!("https://{host}/{path}"),
            provider: Provider::from_host(&host),
            repo_path: path.to_string(),
            host,
        })
    }

    /// Page for opening a pull (merge) request of `head` into `base`
    pub fn pull_request_url(&self, base: &str, head: &str) -> Option<String> {
        match self.provider {
            Provider::GitHub => Some(format!(
                "{}/compare/{}...{}?expand=1",
                self.web_base,
                encode_path(base),
                encode_path(head)
            )),
            Provider::GitLab => Some(format!(
                "{}/-/merge_requests/new?merge_request[source_branch]={}&merge_request[target_branch]={}",
                self.web_base,
                encode_query(head),
                encode_query(base)
            )),
            Provider::Bitbucket => Some(format!(
                "{}/pull-requests/new?source={}&dest={}",
                self.web_base,
                encode_query(head),
                encode_query(base)
            )),
            Provider::Other => None,
        }
    }

    /// Issue page for a token such as `#123`; only its digits are used
    pub fn issue_url(&self, issue: &str) -> Option<String> {
        let digits: String = issue.chars().filter(char::is_ascii_digit).collect();
        if digits.is_empty() {
            return None;
        }

        match self.provider {
            Provider::GitHub | Provider::Bitbucket => {
                Some(format!("{}/issues/{}", self.web_base, digits))
            }
            Provider::GitLab => Some(format!("{}/-/issues/{}", self.web_base, digits)),
            Provider::Other => None,
        }
    }
}

/// `user@host:path` → (`host`, `/path`)
fn parse_scp(remote: &str) -> Option<(String, String)> {
    let (_, after_at) = remote.split_once('@')?;
    let (host, path) = after_at.split_once(':')?;
    if host.is_empty() || path.is_empty() {
        return None;
    }
    Some((host.to_string(), format!("/{path}")))
}

/// Path characters kept as-is in ref names; `/` stays so nested branches read naturally.
const REF_PATH: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'/')
    .remove(b'!')
    .remove(b'$')
    .remove(b'&')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')')
    .remove(b'*')
    .remove(b'+')
    .remove(b',')
    .remove(b'-')
    .remove(b'.')
    .remove(b':')
    .remove(b';')
    .remove(b'=')
    .remove(b'@')
    .remove(b'_')
    .remove(b'~');

/// Query values keep only unreserved characters and `/`.
const REF_QUERY: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'/')
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

fn encode_path(value: &str) -> String {
    utf8_percent_encode(value, REF_PATH).to_string()
}

fn encode_query(value: &str) -> String {
    utf8_percent_encode(value, REF_QUERY).to_string()
}

impl<E: GitExecutor> GitClient<E> {
    /// URL of `origin`, else of the first listed remote. Failures read as "no remote".
    pub async fn preferred_remote_url(&self, path: &Path) -> Option<String> {
        if let Ok(origin) = self.run(&["remote", "get-url", "origin"], path).await {
            if !origin.is_empty() {
                return Some(origin);
            }
        }

        let remotes = self.run(&["remote"], path).await.ok()?;
        let first = remotes.lines().map(str::trim).find(|l| !l.is_empty())?;

        match self.run(&["remote", "get-url", first], path).await {
            Ok(url) if !url.is_empty() => Some(url),
            _ => None,
        }
    }
}
