use reqwest::blocking::Client;
use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue, USER_AGENT};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use std::env;
use std::time::Duration;

use crate::error::CheckResult;
use crate::settings::Settings;

const TOKEN_VARS: [&str; 2] = ["GITHUB_TOKEN", "GH_TOKEN"];

/// One entry of `GET /repos/{owner}/{repo}/releases`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Release {
    #[serde(default, deserialize_with = "nullable")]
    pub tag_name: String,
    #[serde(default, deserialize_with = "nullable")]
    pub published_at: String,
    #[serde(default, deserialize_with = "nullable")]
    pub body: String,
}

/// One entry of `GET /repos/{owner}/{repo}/commits`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Commit {
    #[serde(default, deserialize_with = "nullable")]
    pub sha: String,
    #[serde(default)]
    pub commit: CommitDetail,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CommitDetail {
    #[serde(default, deserialize_with = "nullable")]
    pub message: String,
    #[serde(default)]
    pub committer: Option<Signature>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Signature {
    #[serde(default, deserialize_with = "nullable")]
    pub date: String,
}

impl Commit {
    pub fn message(&self) -> &str {
        &self.commit.message
    }

    pub fn committer_date(&self) -> &str {
        self.commit
            .committer
            .as_ref()
            .map(|c| c.date.as_str())
            .unwrap_or("")
    }
}

fn nullable<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(d)?.unwrap_or_default())
}

/// First non-empty token among `GITHUB_TOKEN` and `GH_TOKEN`.
pub fn token_from(lookup: impl Fn(&str) -> Option<String>) -> Option<String> {
    TOKEN_VARS
        .into_iter()
        .filter_map(lookup)
        .find(|tok| !tok.trim().is_empty())
}

pub fn env_token() -> Option<String> {
    token_from(|name| env::var(name).ok())
}

/// Minimal blocking GitHub REST client.
///
/// Every request carries the GitHub media type and a `User-Agent`; a bearer
/// token is attached when one is available. The timeout covers the whole
/// exchange including the body, so a stalled server cannot hang the hook.
pub struct GitHub {
    http: Client,
    base: String,
}

impl GitHub {
    pub fn new(base: &str, timeout: Duration, token: Option<String>) -> CheckResult<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github+json"),
        );
        headers.insert(
            USER_AGENT,
            HeaderValue::from_static("upcheck-update-checker"),
        );
        if let Some(tok) = token {
            match HeaderValue::from_str(&format!("Bearer {}", tok.trim())) {
                Ok(v) => {
                    headers.insert(AUTHORIZATION, v);
                }
                Err(_) => tracing::warn!("token is not a valid header value; going anonymous"),
            }
        }
        let http = Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()?;
        Ok(GitHub {
            http,
            base: base.trim_end_matches('/').to_string(),
        })
    }

    pub fn from_settings(settings: &Settings) -> CheckResult<Self> {
        Self::new(&settings.api_base, settings.timeout(), env_token())
    }

    /// GET `path` (relative to the API base) and decode the JSON body.
    ///
    /// # Errors
    /// Network failure, timeout, non-2xx status and undecodable bodies all
    /// surface as [`crate::error::CheckError::RemoteQueryFailed`]. Nothing is
    /// retried.
    pub fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> CheckResult<T> {
        let url = format!("{}{}", self.base, path);
        tracing::debug!("GET {url}");
        let body: T = self
            .http
            .get(&url)
            .query(query)
            .send()?
            .error_for_status()?
            .json()?;
        Ok(body)
    }

    /// Newest-first release listing.
    pub fn list_releases(&self, owner: &str, repo: &str, per_page: u32) -> CheckResult<Vec<Release>> {
        self.get_json(
            &format!("/repos/{owner}/{repo}/releases"),
            &[("per_page", per_page.to_string())],
        )
    }

    /// Commits at or after `since` (an ISO-8601 timestamp).
    pub fn list_commits(
        &self,
        owner: &str,
        repo: &str,
        since: &str,
        per_page: u32,
    ) -> CheckResult<Vec<Commit>> {
        self.get_json(
            &format!("/repos/{owner}/{repo}/commits"),
            &[("since", since.to_string()), ("per_page", per_page.to_string())],
        )
    }
}
