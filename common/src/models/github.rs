//! GitHub user profile models.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// Query string for the user lookup endpoint.
///
/// A missing `username` decodes as empty so it fails validation the same way
/// an explicit empty value does. When the parameter repeats, the last value wins.
#[derive(Debug, Deserialize, Validate, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct UserQuery {
    /// GitHub username.
    #[serde(default)]
    #[validate(length(min = 1, message = "username must not be empty"))]
    pub username: String,
}

impl UserQuery {
    /// Builds the query from raw key/value pairs.
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let username = pairs
            .into_iter()
            .filter(|(key, _)| key == "username")
            .map(|(_, value)| value)
            .last()
            .unwrap_or_default();
        Self { username }
    }
}

/// Profile returned by `GET /users/{username}`. Only the fields we expose.
#[derive(Debug, Clone, Deserialize)]
pub struct GitHubUser {
    pub login: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "super::number::count")]
    pub public_repos: u64,
    #[serde(default, deserialize_with = "super::number::count")]
    pub followers: u64,
    #[serde(default, deserialize_with = "super::number::count")]
    pub following: u64,
}

/// Error body GitHub sends alongside 4xx statuses.
#[derive(Debug, Default, Deserialize)]
pub struct GitHubErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}

/// Normalized user summary returned to callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UserSummary {
    /// Login handle.
    pub login: String,
    /// Display name, if the user set one.
    pub name: Option<String>,
    /// Number of public repositories.
    pub public_repos: u64,
    /// Follower count.
    pub followers: u64,
    /// Following count.
    pub following: u64,
}

impl From<GitHubUser> for UserSummary {
    fn from(user: GitHubUser) -> Self {
        Self {
            login: user.login,
            name: user.name,
            public_repos: user.public_repos,
            followers: user.followers,
            following: user.following,
        }
    }
}
