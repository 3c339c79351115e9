use std::collections::BTreeSet;
use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Store-assigned identifier for a posting.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct JobId(pub String);

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SalaryType {
    #[serde(alias = "hourly")]
    Hourly,
    #[serde(alias = "monthly")]
    Monthly,
    #[serde(alias = "yearly")]
    Yearly,
}

impl SalaryType {
    pub const fn label(self) -> &'static str {
        match self {
            SalaryType::Hourly => "Hourly",
            SalaryType::Monthly => "Monthly",
            SalaryType::Yearly => "Yearly",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        [Self::Hourly, Self::Monthly, Self::Yearly]
            .into_iter()
            .find(|kind| kind.label().eq_ignore_ascii_case(raw.trim()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EmploymentType {
    #[serde(rename = "Full-time", alias = "full-time")]
    FullTime,
    #[serde(rename = "Part-time", alias = "part-time")]
    PartTime,
    #[serde(alias = "contract")]
    Contract,
    #[serde(alias = "freelance")]
    Freelance,
    #[serde(alias = "temporary")]
    Temporary,
}

impl EmploymentType {
    pub const fn label(self) -> &'static str {
        match self {
            EmploymentType::FullTime => "Full-time",
            EmploymentType::PartTime => "Part-time",
            EmploymentType::Contract => "Contract",
            EmploymentType::Freelance => "Freelance",
            EmploymentType::Temporary => "Temporary",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        [
            Self::FullTime,
            Self::PartTime,
            Self::Contract,
            Self::Freelance,
            Self::Temporary,
        ]
        .into_iter()
        .find(|kind| kind.label().eq_ignore_ascii_case(raw.trim()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExperienceLevel {
    #[serde(rename = "Entry Level", alias = "entry-level")]
    EntryLevel,
    #[serde(rename = "Mid Level", alias = "mid-level")]
    MidLevel,
    #[serde(rename = "Senior Level", alias = "senior-level")]
    SeniorLevel,
    #[serde(alias = "internship")]
    Internship,
    #[serde(rename = "Any experience", alias = "any")]
    AnyExperience,
}

impl ExperienceLevel {
    pub const fn label(self) -> &'static str {
        match self {
            ExperienceLevel::EntryLevel => "Entry Level",
            ExperienceLevel::MidLevel => "Mid Level",
            ExperienceLevel::SeniorLevel => "Senior Level",
            ExperienceLevel::Internship => "Internship",
            ExperienceLevel::AnyExperience => "Any experience",
        }
    }
}

/// Employer-supplied fields of a posting. Used for creation and full replacement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobListing {
    #[serde(alias = "jobTitle")]
    pub title: String,
    pub company_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_logo: Option<String>,
    #[serde(alias = "minPrice", deserialize_with = "deserialize_amount")]
    pub min_salary: f64,
    #[serde(alias = "maxPrice", deserialize_with = "deserialize_amount")]
    pub max_salary: f64,
    pub salary_type: SalaryType,
    #[serde(default, alias = "jobLocation")]
    pub location: String,
    pub employment_type: EmploymentType,
    pub experience_level: ExperienceLevel,
    pub posted_by: String,
    #[serde(deserialize_with = "deserialize_date")]
    pub posting_date: NaiveDate,
    #[serde(default, deserialize_with = "deserialize_skills")]
    pub skills: BTreeSet<String>,
    #[serde(default)]
    pub description: String,
}

/// A stored posting: the listing plus store-owned metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobPosting {
    #[serde(alias = "_id")]
    pub id: JobId,
    #[serde(flatten)]
    pub listing: JobListing,
    pub created_at: DateTime<Utc>,
}

impl JobPosting {
    pub fn title(&self) -> &str {
        &self.listing.title
    }

    pub fn is_owned_by(&self, owner_email: &str) -> bool {
        self.listing.posted_by == owner_email
    }
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

pub(crate) fn parse_amount(raw: &str) -> Result<f64, String> {
    raw.trim()
        .parse::<f64>()
        .map_err(|err| format!("failed to parse '{raw}' as a salary amount ({err})"))
}

fn deserialize_date<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_date(&raw).map_err(serde::de::Error::custom)
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawAmount {
    Number(f64),
    Text(String),
}

fn deserialize_amount<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    match RawAmount::deserialize(deserializer)? {
        RawAmount::Number(value) => Ok(value),
        RawAmount::Text(raw) => parse_amount(&raw).map_err(serde::de::Error::custom),
    }
}

/// Skills arrive either as plain strings or as `{value, label}` selector options.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawSkill {
    Name(String),
    Option { value: String },
}

fn deserialize_skills<'de, D>(deserializer: D) -> Result<BTreeSet<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Vec<RawSkill>>::deserialize(deserializer)?.unwrap_or_default();
    Ok(raw
        .into_iter()
        .map(|skill| match skill {
            RawSkill::Name(name) => name,
            RawSkill::Option { value } => value,
        })
        .map(|skill| skill.trim().to_string())
        .filter(|skill| !skill.is_empty())
        .collect())
}
