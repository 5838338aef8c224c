//! Login users and site storage credentials handed out by the hub.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Login data for a user of the scraped site.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LoginUser {
    /// Username on the scraped site.
    pub username: String,
    /// Password on the scraped site. Empty when the hub could not decrypt it.
    #[serde(default)]
    pub password: String,
}

impl LoginUser {
    /// Create a login user.
    #[must_use]
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

/// Browser storage (cookies) used to log into a website.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SiteStorageCredentialValue {
    /// Cookies keyed by name; each cookie may carry several values.
    #[serde(default)]
    pub cookies: Option<HashMap<String, Vec<String>>>,
}

/// A stored set of site credentials as tracked by the hub.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteStorageCredential {
    /// Hub id of this credential.
    pub id: String,
    /// Id of the scraper (API key id) that owns this credential.
    #[serde(default)]
    pub scraper_id: String,
    /// Whether the credential has been marked as no longer working.
    #[serde(default)]
    pub invalid: bool,
    /// Set when the API key may not see the credential contents.
    #[serde(default)]
    pub hidden_credentials: bool,
    /// The stored cookies.
    #[serde(default)]
    pub cookies: Option<HashMap<String, Vec<String>>>,
}

impl SiteStorageCredential {
    /// The storage value of this credential, as sent to a credential check.
    #[must_use]
    pub fn value(&self) -> SiteStorageCredentialValue {
        SiteStorageCredentialValue {
            cookies: self.cookies.clone(),
        }
    }
}

/// A list of site storage credentials with filtering helpers.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SiteStorageCredentials(pub Vec<SiteStorageCredential>);

impl SiteStorageCredentials {
    /// Returns `true` if there are no credentials.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of credentials.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterate over the credentials.
    pub fn iter(&self) -> std::slice::Iter<'_, SiteStorageCredential> {
        self.0.iter()
    }

    /// Returns `true` if any credential hides its contents from this API key.
    #[must_use]
    pub fn any_hidden(&self) -> bool {
        self.0.iter().any(|c| c.hidden_credentials)
    }

    /// Credentials that are not marked invalid.
    #[must_use]
    pub fn only_valid(&self) -> Self {
        Self(self.0.iter().filter(|c| !c.invalid).cloned().collect())
    }

    /// Credentials that are marked invalid.
    #[must_use]
    pub fn only_invalid(&self) -> Self {
        Self(self.0.iter().filter(|c| c.invalid).cloned().collect())
    }
}

impl From<Vec<SiteStorageCredential>> for SiteStorageCredentials {
    fn from(credentials: Vec<SiteStorageCredential>) -> Self {
        Self(credentials)
    }
}

impl IntoIterator for SiteStorageCredentials {
    type Item = SiteStorageCredential;
    type IntoIter = std::vec::IntoIter<SiteStorageCredential>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a SiteStorageCredentials {
    type Item = &'a SiteStorageCredential;
    type IntoIter = std::slice::Iter<'a, SiteStorageCredential>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn credential(id: &str, invalid: bool) -> SiteStorageCredential {
        SiteStorageCredential {
            id: id.to_string(),
            invalid,
            ..SiteStorageCredential::default()
        }
    }

    #[test]
    fn filters_by_validity() {
        let all = SiteStorageCredentials::from(vec![
            credential("a", false),
            credential("b", true),
            credential("c", false),
        ]);

        let valid: Vec<_> = all.only_valid().iter().map(|c| c.id.clone()).collect();
        let invalid: Vec<_> = all.only_invalid().iter().map(|c| c.id.clone()).collect();
        assert_eq!(valid, vec!["a", "c"]);
        assert_eq!(invalid, vec!["b"]);
        assert!(!all.is_empty());
        assert!(SiteStorageCredentials::default().is_empty());
    }

    #[test]
    fn deserializes_hub_credential() {
        let json = r#"[{
            "id": "64f0",
            "scraperId": "key-1",
            "invalid": false,
            "hiddenCredentials": true,
            "cookies": {"session": ["abc", "def"]}
        }]"#;

        let credentials: SiteStorageCredentials = serde_json::from_str(json).unwrap();
        assert_eq!(credentials.len(), 1);
        assert!(credentials.any_hidden());

        let first = &credentials.0[0];
        assert_eq!(first.scraper_id, "key-1");
        let cookies = first.value().cookies.unwrap();
        assert_eq!(cookies["session"], vec!["abc", "def"]);
    }

    #[test]
    fn login_user_password_defaults_to_empty() {
        let user: LoginUser = serde_json::from_str(r#"{"username": "bob"}"#).unwrap();
        assert_eq!(user, LoginUser::new("bob", ""));
    }
}
