//! Curriculum vitae records exchanged with the hub.
//!
//! Every optional field is omitted from the JSON encoding when unset, so a CV
//! built with only a reference number serializes to
//! `{"referenceNumber": "..."}`.

use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};

/// Minimum age, in years, of a person whose CV may be submitted.
pub const MINIMUM_AGE_YEARS: i32 = 13;

/// All information that belongs to a curriculum vitae.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cv {
    /// CV headline.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Free-form introduction written by the candidate.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub presentation: String,
    /// The scraped site's identifier for this CV.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub reference_number: String,
    /// Link to the CV on the scraped site.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    /// When the CV was created on the scraped site.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    /// When the CV was last changed on the scraped site.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_changed: Option<DateTime<Utc>>,
    /// Followed educations and courses.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub educations: Vec<Education>,
    /// Work history.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub work_experiences: Vec<WorkExperience>,
    /// Jobs the candidate is looking for.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub preferred_jobs: Vec<String>,
    /// Job preferences.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferences: Option<Preferences>,
    /// Spoken and written languages.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub languages: Vec<Language>,
    /// Hobbies and interests.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub hobbies: Vec<Hobby>,
    /// Contact and identity details.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub personal_details: Option<PersonalDetails>,
    /// Held driver's licenses (e.g. `B`, `C1`).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub drivers_licenses: Vec<String>,
    /// What kind of candidate this CV describes.
    #[serde(default, rename = "cvType", skip_serializing_if = "Option::is_none")]
    pub cv_type: Option<CvType>,
}

impl Cv {
    /// Create a CV with only a reference number set.
    #[must_use]
    pub fn with_reference(reference_number: impl Into<String>) -> Self {
        Self {
            reference_number: reference_number.into(),
            ..Self::default()
        }
    }

    /// Check that this CV may be sent to the hub.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidCv`] if the reference number is missing or
    /// the candidate is younger than [`MINIMUM_AGE_YEARS`].
    pub fn validate(&self) -> Result<()> {
        self.validate_at(Utc::now())
    }

    /// Like [`Cv::validate`] but against a fixed point in time.
    ///
    /// # Errors
    ///
    /// See [`Cv::validate`].
    pub fn validate_at(&self, now: DateTime<Utc>) -> Result<()> {
        if self.reference_number.is_empty() {
            return Err(CoreError::InvalidCv(
                "referenceNumber is required".to_string(),
            ));
        }

        let dob = self
            .personal_details
            .as_ref()
            .and_then(|details| details.date_of_birth);
        if let Some(dob) = dob {
            if now.year() - dob.year() < MINIMUM_AGE_YEARS {
                return Err(CoreError::InvalidCv(format!(
                    "you must be at least {MINIMUM_AGE_YEARS} years old to work"
                )));
            }
        }

        Ok(())
    }

    /// The subset of this CV that is sent in a CV list.
    #[must_use]
    pub fn list_entry(&self) -> Self {
        Self {
            reference_number: self.reference_number.clone(),
            link: self.link.clone(),
            created_at: self.created_at,
            last_changed: self.last_changed,
            personal_details: self.personal_details.clone(),
            ..Self::default()
        }
    }
}

/// Job preferences of a candidate.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Preferences {
    /// Maximum travel distance.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_distance_in_km: Option<u32>,
    /// Maximum weekly hours.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maximal_hours: Option<u32>,
    /// Minimum weekly hours.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minimal_hours: Option<u32>,
    /// Postcode to measure distance from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub postcode: Option<String>,
    /// Preferred weekly hours.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub working_hours: Option<u32>,
}

/// An education or course a candidate has followed.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Education {
    /// 0: unknown, 1: education, 2: course.
    #[serde(default)]
    pub is: u8,
    /// Name of the education.
    #[serde(default)]
    pub name: String,
    /// Description of the education.
    #[serde(default)]
    pub description: String,
    /// School or institute.
    #[serde(default)]
    pub institute: String,
    /// Whether the education was finished.
    #[serde(default)]
    pub is_completed: Option<bool>,
    /// Whether a diploma was obtained.
    #[serde(default)]
    pub has_diploma: Option<bool>,
    /// Start of the education.
    #[serde(default)]
    pub start_date: Option<DateTime<Utc>>,
    /// End of the education.
    #[serde(default)]
    pub end_date: Option<DateTime<Utc>>,
}

/// A job a candidate has held.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkExperience {
    /// Description of the work.
    #[serde(default)]
    pub description: String,
    /// Job title.
    #[serde(default)]
    pub profession: String,
    /// Employer name.
    #[serde(default)]
    pub employer: String,
    /// Start of the employment.
    #[serde(default)]
    pub start_date: Option<DateTime<Utc>>,
    /// End of the employment.
    #[serde(default)]
    pub end_date: Option<DateTime<Utc>>,
    /// Whether the candidate still works here.
    #[serde(default)]
    pub still_employed: Option<bool>,
    /// Hours per week.
    #[serde(default)]
    pub weekly_hours_worked: Option<u32>,
}

/// Proficiency in a language, encoded as `0..=3` on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum LanguageLevel {
    /// Unknown level.
    #[default]
    Unknown,
    /// Reasonable.
    Reasonable,
    /// Good.
    Good,
    /// Excellent.
    Excellent,
}

impl TryFrom<u8> for LanguageLevel {
    type Error = String;

    fn try_from(value: u8) -> std::result::Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Unknown),
            1 => Ok(Self::Reasonable),
            2 => Ok(Self::Good),
            3 => Ok(Self::Excellent),
            other => Err(format!("unknown language level {other}")),
        }
    }
}

impl From<LanguageLevel> for u8 {
    fn from(level: LanguageLevel) -> Self {
        match level {
            LanguageLevel::Unknown => 0,
            LanguageLevel::Reasonable => 1,
            LanguageLevel::Good => 2,
            LanguageLevel::Excellent => 3,
        }
    }
}

/// A language a candidate speaks.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Language {
    /// Language name.
    pub name: String,
    /// Speaking proficiency.
    #[serde(default)]
    pub level_spoken: LanguageLevel,
    /// Writing proficiency.
    #[serde(default)]
    pub level_written: LanguageLevel,
}

/// An interest or hobby.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Hobby {
    /// Hobby name.
    pub name: String,
    /// Hobby description.
    #[serde(default)]
    pub description: String,
}

/// Personal and contact details of a candidate.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalDetails {
    /// Full name.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    /// Initials.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub initials: String,
    /// First name.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub first_name: String,
    /// Surname prefix (e.g. `van der`).
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub sur_name_prefix: String,
    /// Surname.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub sur_name: String,
    /// Date of birth.
    #[serde(default, rename = "dob", skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<DateTime<Utc>>,
    /// Gender.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub gender: String,
    /// Street.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub street_name: String,
    /// House number.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub house_number: String,
    /// House number suffix.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub house_number_suffix: String,
    /// Postal code.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub zip: String,
    /// City.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub city: String,
    /// Country.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub country: String,
    /// Phone number.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub phone_number: String,
    /// Email address.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub email: String,
}

/// The kind of candidate a CV describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CvType {
    /// A lead.
    #[serde(rename = "lead")]
    Lead,
    /// A potential candidate. The wire value keeps the hub's spelling.
    #[serde(rename = "potential_candiate")]
    PotentialCandidate,
}
