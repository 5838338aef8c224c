//! Search profiles the hub matches scraped CVs against.

use serde::{Deserialize, Serialize};

use crate::de::null_as_default;

/// A hub search profile.
///
/// Only returned to API keys with the information-obtainer role.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Profile {
    /// Hub id of the profile.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Whether the profile is currently active.
    pub active: bool,
    /// Scraper keys allowed to use this profile; empty means all keys.
    #[serde(deserialize_with = "null_as_default")]
    pub allowed_scrapers: Vec<String>,

    /// A matching CV must have one of the desired professions.
    pub must_desired_profession: bool,
    /// Professions the profile looks for.
    #[serde(deserialize_with = "null_as_default")]
    pub desired_professions: Vec<ProfileProfession>,

    /// Maximum years since the candidate last worked.
    pub years_since_work: Option<u32>,
    /// A matching CV must have experience in one of the listed professions.
    pub must_exp_profession: bool,
    /// Professions the candidate should have experience in.
    #[serde(deserialize_with = "null_as_default")]
    pub profession_experienced: Vec<ProfileProfession>,

    /// Employers a matching CV should list.
    #[serde(deserialize_with = "null_as_default")]
    pub employers: Vec<ProfileName>,
    /// A matching CV must have at least one employer.
    pub must_employer: bool,

    /// A matching CV must hold one of the listed driver's licenses.
    pub must_drivers_license: bool,
    /// Accepted driver's licenses.
    #[serde(deserialize_with = "null_as_default")]
    pub drivers_licenses: Vec<ProfileName>,

    /// A matching CV must have a finished education.
    pub must_education_finished: bool,
    /// A matching CV must list at least one education.
    pub must_education: bool,
    /// Maximum years since the last education.
    pub years_since_education: Option<u32>,
    /// Accepted educations.
    #[serde(deserialize_with = "null_as_default")]
    pub educations: Vec<ProfileName>,

    /// Accepted Dutch zip code ranges.
    #[serde(deserialize_with = "null_as_default")]
    pub zip_codes: Vec<ProfileZipcodeRange>,

    /// What happens when a CV matches this profile.
    pub on_match: ProfileOnMatch,

    /// Whether CV lists may be matched against this profile.
    pub lists_allowed: bool,
    /// Whether the hub uses its deeper profession search for this profile.
    pub use_deep_search: bool,
}

/// A profession referenced by a profile.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProfileProfession {
    /// Profession name.
    pub name: String,
    /// Id of the profession in the hub's profession tree.
    pub leaf_id: String,
}

/// A named item (employer, driver's license, education) in a profile.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileName {
    /// Item name.
    pub name: String,
}

/// A range of numeric Dutch zip codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileZipcodeRange {
    /// First zip code in the range.
    pub from: u16,
    /// Last zip code in the range.
    pub to: u16,
}

impl ProfileZipcodeRange {
    /// Returns `true` if `zip` lies within this range, inclusive.
    #[must_use]
    pub const fn contains(&self, zip: u16) -> bool {
        zip >= self.from && zip <= self.to
    }
}

/// Actions taken when a profile matches.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProfileOnMatch {
    /// Addresses that receive an email on a match.
    #[serde(deserialize_with = "null_as_default")]
    pub send_mail: Vec<ProfileSendEmail>,
}

/// A match notification address.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileSendEmail {
    /// Email address.
    pub email: String,
}
