use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::null_as_default;

/// A team in the access-control hierarchy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Team {
    /// Team identifier.
    pub id: i64,
    /// Short name.
    pub name: String,
    /// Full path, e.g. `/CxServer/SCA-PM/Champions/UK`.
    pub full_name: String,
    /// Parent team, absent for the root.
    #[serde(default)]
    pub parent_id: Option<i64>,
}

/// A role that can be granted to users.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Role {
    /// Role identifier.
    pub id: i64,
    /// Role name.
    pub name: String,
    /// Optional description.
    #[serde(default)]
    pub description: Option<String>,
}

/// A user as returned by the access-control service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// User identifier.
    pub id: i64,
    /// Login name.
    pub user_name: String,
    /// Given name.
    #[serde(default, deserialize_with = "null_as_default")]
    pub first_name: String,
    /// Family name.
    #[serde(default, deserialize_with = "null_as_default")]
    pub last_name: String,
    /// Email address.
    #[serde(default, deserialize_with = "null_as_default")]
    pub email: String,
    /// Whether the account is enabled.
    #[serde(default, deserialize_with = "null_as_default")]
    pub active: bool,
    /// When the account expires.
    #[serde(default)]
    pub expiration_date: Option<DateTime<Utc>>,
    /// Last successful login.
    #[serde(default)]
    pub last_login_date: Option<DateTime<Utc>>,
    /// Granted roles.
    #[serde(default, deserialize_with = "null_as_default")]
    pub role_ids: Vec<i64>,
    /// Team memberships.
    #[serde(default, deserialize_with = "null_as_default")]
    pub team_ids: Vec<i64>,
    /// IP allowlist.
    #[serde(default, deserialize_with = "null_as_default")]
    pub allowed_ip_list: Vec<String>,
    /// Mobile phone.
    #[serde(default)]
    pub cell_phone_number: Option<String>,
    /// Landline.
    #[serde(default)]
    pub phone_number: Option<String>,
    /// Country.
    #[serde(default)]
    pub country: Option<String>,
    /// Job title.
    #[serde(default)]
    pub job_title: Option<String>,
    /// Locale identifier.
    #[serde(default)]
    pub locale_id: Option<i64>,
    /// Free-form notes.
    #[serde(default)]
    pub other: Option<String>,
}

impl User {
    /// Returns `"First Last"`, trimmed.
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name).trim().to_string()
    }
}

/// Full replacement body for `PUT Users/{id}`.
///
/// The service overwrites every field, so start from [`UpdateUser::from`] an
/// existing [`User`] and change only what is needed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUser {
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Email address.
    pub email: String,
    /// Whether the account is enabled.
    pub active: bool,
    /// When the account expires.
    pub expiration_date: Option<DateTime<Utc>>,
    /// Granted roles.
    pub role_ids: Vec<i64>,
    /// Team memberships.
    pub team_ids: Vec<i64>,
    /// IP allowlist.
    pub allowed_ip_list: Vec<String>,
    /// Mobile phone.
    pub cell_phone_number: Option<String>,
    /// Landline.
    pub phone_number: Option<String>,
    /// Country.
    pub country: Option<String>,
    /// Job title.
    pub job_title: Option<String>,
    /// Locale identifier.
    pub locale_id: Option<i64>,
    /// Free-form notes.
    pub other: Option<String>,
}

impl From<&User> for UpdateUser {
    fn from(user: &User) -> Self {
        Self {
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            email: user.email.clone(),
            active: user.active,
            expiration_date: user.expiration_date,
            role_ids: user.role_ids.clone(),
            team_ids: user.team_ids.clone(),
            allowed_ip_list: user.allowed_ip_list.clone(),
            cell_phone_number: user.cell_phone_number.clone(),
            phone_number: user.phone_number.clone(),
            country: user.country.clone(),
            job_title: user.job_title.clone(),
            locale_id: user.locale_id,
            other: user.other.clone(),
        }
    }
}
