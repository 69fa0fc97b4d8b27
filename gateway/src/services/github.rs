//! GitHub 用户查询服务

use axum::http::{HeaderMap, StatusCode};
use reqwest::Url;

use common::errors::{AppError, AppResult};
use common::http_client::{bearer_auth, OutboundClient, UpstreamResponse};
use common::models::github::{GitHubErrorBody, GitHubUser, UserSummary};

const RATE_LIMIT_REMAINING: &str = "x-ratelimit-remaining";

/// GitHub 用户查询服务
pub struct GitHubService {
    api_base: String,
    token: Option<String>,
    http_client: OutboundClient,
}

impl GitHubService {
    /// 创建新的 GitHub 服务实例
    pub fn new(api_base: String, token: Option<String>, http_client: OutboundClient) -> Self {
        Self {
            api_base,
            token,
            http_client,
        }
    }

    /// 查询用户资料并转换为摘要
    pub async fn get_user(&self, username: &str) -> AppResult<UserSummary> {
        let url = user_url(&self.api_base, username)?;
        let headers = match &self.token {
            Some(token) => bearer_auth(token),
            None => HeaderMap::new(),
        };

        tracing::debug!(username = %username, "fetching GitHub user");
        let response = self
            .http_client
            .get(url, headers, &[])
            .await
            .map_err(|e| AppError::BadGateway(format!("Network error talking to GitHub: {e}")))?;

        summarize(response)
    }
}

/// Builds `{api_base}/users/{username}` with the username as one encoded segment.
fn user_url(api_base: &str, username: &str) -> AppResult<Url> {
    let mut url = Url::parse(api_base)
        .map_err(|e| AppError::Internal(format!("Invalid GitHub API URL: {e}")))?;
    url.path_segments_mut()
        .map_err(|_| AppError::Internal("Invalid GitHub API URL: cannot be a base".to_string()))?
        .pop_if_empty()
        .push("users")
        .push(username);
    Ok(url)
}

fn summarize(response: UpstreamResponse) -> AppResult<UserSummary> {
    match response.status {
        StatusCode::NOT_FOUND => Err(AppError::NotFound("GitHub user not found".to_string())),
        StatusCode::FORBIDDEN if is_rate_limited(&response) => Err(AppError::TooManyRequests(
            "GitHub API rate limit exceeded. Try again later or add a token.".to_string(),
        )),
        StatusCode::FORBIDDEN => Err(AppError::Forbidden(
            "GitHub API returned 403 Forbidden.".to_string(),
        )),
        status if response.is_error() => Err(AppError::Upstream {
            status,
            message: format!("GitHub API error ({}).", status.as_u16()),
        }),
        _ => response
            .json::<GitHubUser>()
            .map(UserSummary::from)
            .map_err(|e| AppError::Internal(format!("Unexpected response shape from GitHub: {e}"))),
    }
}

/// Either an exhausted remaining-count header or a "rate limit" message marks a 403 as throttling.
fn is_rate_limited(response: &UpstreamResponse) -> bool {
    if response.header_str(RATE_LIMIT_REMAINING) == Some("0") {
        return true;
    }
    response
        .json::<GitHubErrorBody>()
        .ok()
        .and_then(|body| body.message)
        .is_some_and(|message| message.to_lowercase().contains("rate limit"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn response(status: u16, body: &str) -> UpstreamResponse {
        UpstreamResponse {
            status: StatusCode::from_u16(status).unwrap(),
            headers: HeaderMap::new(),
            body: body.to_string().into(),
        }
    }

    fn with_remaining(mut response: UpstreamResponse, remaining: &'static str) -> UpstreamResponse {
        response
            .headers
            .insert(RATE_LIMIT_REMAINING, HeaderValue::from_static(remaining));
        response
    }

    #[test]
    fn test_user_url() {
        let url = user_url("https://api.github.com", "octocat").unwrap();
        assert_eq!(url.as_str(), "https://api.github.com/users/octocat");

        let url = user_url("http://127.0.0.1:8080/", "octocat").unwrap();
        assert_eq!(url.as_str(), "http://127.0.0.1:8080/users/octocat");
    }

    #[test]
    fn test_user_url_encodes_segment() {
        let url = user_url("https://api.github.com", "../orgs/x").unwrap();
        assert_eq!(url.path(), "/users/..%2Forgs%2Fx");
    }

    #[test]
    fn test_user_url_rejects_bad_base() {
        assert!(matches!(user_url("not a url", "x"), Err(AppError::Internal(_))));
    }

    #[test]
    fn test_not_found() {
        let err = summarize(response(404, r#"{"message":"Not Found"}"#)).unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[test]
    fn test_rate_limit_by_header() {
        let err = summarize(with_remaining(response(403, ""), "0")).unwrap_err();
        assert!(matches!(err, AppError::TooManyRequests(_)));
    }

    #[test]
    fn test_rate_limit_by_message() {
        let body = r#"{"message":"API Rate Limit exceeded for 1.2.3.4."}"#;
        let err = summarize(response(403, body)).unwrap_err();
        assert!(matches!(err, AppError::TooManyRequests(_)));
    }

    #[test]
    fn test_plain_forbidden() {
        let body = r#"{"message":"Resource not accessible"}"#;
        let err = summarize(with_remaining(response(403, body), "42")).unwrap_err();
        assert!(matches!(err, AppError::Forbidden(_)));

        let err = summarize(response(403, "<html>nope</html>")).unwrap_err();
        assert!(matches!(err, AppError::Forbidden(_)));
    }

    #[test]
    fn test_other_errors_forward_status() {
        let err = summarize(response(503, "")).unwrap_err();
        assert_eq!(err.status_code(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(err.to_string(), "GitHub API error (503).");

        let err = summarize(response(401, "")).unwrap_err();
        assert_eq!(err.status_code(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_success_decodes_summary() {
        let body = r#"{"login":"octocat","name":"The Octocat","public_repos":"12","followers":3}"#;
        let summary = summarize(response(200, body)).unwrap();
        assert_eq!(
            summary,
            UserSummary {
                login: "octocat".into(),
                name: Some("The Octocat".into()),
                public_repos: 12,
                followers: 3,
                following: 0,
            }
        );
    }

    #[test]
    fn test_success_with_bad_shape_is_internal() {
        let err = summarize(response(200, r#"{"name":"no login"}"#)).unwrap_err();
        assert!(matches!(err, AppError::Internal(_)));

        let err = summarize(response(200, "not json")).unwrap_err();
        assert!(matches!(err, AppError::Internal(_)));
    }
}
