//! Wire DTOs for the REST backend.
//!
//! DESIGN
//! ======
//! The backend has shipped several user shapes over time (`uid` vs `id`,
//! `name` vs `displayName`); serde aliases absorb them here so the rest of the
//! client only sees one `User`.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};

/// The authenticated user record held in the session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Backend user identifier.
    #[serde(alias = "uid", deserialize_with = "deserialize_id")]
    pub id: String,
    /// Display name.
    #[serde(default, alias = "displayName")]
    pub name: String,
    #[serde(default)]
    pub email: String,
}

/// Successful login/signup payload.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: User,
    #[serde(default)]
    pub message: Option<String>,
}

/// Successful `GET /auth/verify` payload. The user is optional because older
/// backends answer with an empty 2xx.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct VerifyResponse {
    #[serde(default)]
    pub user: Option<User>,
}

/// Login request body.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct LoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

/// Registration payload for `POST /auth/signup`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct SignupProfile {
    pub name: String,
    pub email: String,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interests: Option<String>,
}

/// Error body returned by the backend on non-2xx replies.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Dashboard profile card from `GET /user/profile`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct UserProfile {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub avatar: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub badges: Vec<String>,
    #[serde(default)]
    pub expertise: Vec<String>,
    #[serde(default)]
    pub initials: String,
}

impl UserProfile {
    /// Initials to render, derived from the name when the backend sent none.
    pub fn display_initials(&self) -> String {
        if self.initials.trim().is_empty() {
            initials_for(&self.name)
        } else {
            self.initials.clone()
        }
    }
}

/// Uppercased first letter of each whitespace-separated word.
pub fn initials_for(name: &str) -> String {
    name.split_whitespace()
        .filter_map(|word| word.chars().next())
        .flat_map(char::to_uppercase)
        .collect()
}

/// A dashboard notification.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct Notification {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub time: String,
    #[serde(default)]
    pub read: bool,
}

/// Filters for `GET /resources`. Blank fields are omitted from the query.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ResourceQuery {
    pub category: String,
    pub search: String,
    pub kind: String,
    pub duration: String,
    pub rating: String,
}

impl ResourceQuery {
    /// URL-encoded query string without the leading `?`.
    pub fn to_query_string(&self) -> String {
        let mut serializer = url::form_urlencoded::Serializer::new(String::new());
        for (key, value) in [
            ("category", &self.category),
            ("search", &self.search),
            ("type", &self.kind),
            ("duration", &self.duration),
            ("rating", &self.rating),
        ] {
            let value = value.trim();
            if !value.is_empty() {
                serializer.append_pair(key, value);
            }
        }
        serializer.finish()
    }

    /// Request path including the query string, if any.
    pub fn path(&self) -> String {
        let query = self.to_query_string();
        if query.is_empty() {
            "/resources".to_owned()
        } else {
            format!("/resources?{query}")
        }
    }
}

/// A resource directory entry.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Resource {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub tags: Option<String>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub duration: Option<String>,
    #[serde(default)]
    pub members: Option<u64>,
}

/// New directory entry for `POST /add-resource`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct NewResource {
    pub title: String,
    pub link: String,
    pub category: String,
    pub description: String,
    pub user_id: String,
}

/// Acknowledgement body carrying only a human-readable message.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct MessageReply {
    #[serde(default)]
    pub message: Option<String>,
}

/// Named directory counters from `GET /stats`, e.g. `"Total Resources"`.
pub type PortalStats = BTreeMap<String, f64>;

/// Progress toward one dashboard achievement, in percent.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Achievement {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub progress: f64,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct Insight {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    pub title: String,
    #[serde(default, rename = "type")]
    pub kind: String,
}

/// A recommended course. Courses carry no identifier on the wire.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct Course {
    #[serde(default, alias = "title")]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub link: Option<String>,
}

/// Window for `GET /funding/statistics`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum TimeRange {
    #[default]
    SixMonths,
    OneYear,
}

impl TimeRange {
    pub const ALL: [Self; 2] = [Self::SixMonths, Self::OneYear];

    /// Value of the `timeRange` query parameter.
    pub fn as_param(self) -> &'static str {
        match self {
            Self::SixMonths => "6M",
            Self::OneYear => "1Y",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::SixMonths => "6 Months",
            Self::OneYear => "1 Year",
        }
    }

    pub fn path(self) -> String {
        format!("/funding/statistics?timeRange={}", self.as_param())
    }
}

/// One funding award. `date` is `YYYY-MM-DD`, possibly with a time suffix.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct FundingEntry {
    #[serde(alias = "uploaded_at", alias = "uploadedAt")]
    pub date: String,
    #[serde(default)]
    pub amount: f64,
    #[serde(default)]
    pub category: String,
}

/// Funding awards within the requested [`TimeRange`], with server-side
/// totals when the backend computes them.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct FundingStatistics {
    #[serde(default, alias = "fundingResources")]
    pub data_points: Vec<FundingEntry>,
    #[serde(default)]
    pub total_amount: Option<f64>,
    #[serde(default)]
    pub count: Option<u64>,
    #[serde(default)]
    pub average: Option<f64>,
}

/// A top-funded project.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct SuccessStory {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    #[serde(default, alias = "project_title")]
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub amount: f64,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub category: String,
}

/// Identifiers arrive as strings from newer endpoints and as integers from
/// older ones.
fn deserialize_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Number(i64),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(s) => s,
        RawId::Number(n) => n.to_string(),
    })
}
