use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};

use crate::model::statuses::{AnalysisStatus, CaseReviewStatus};

/// Reads a JSON `null` as the field's default; the server sends `null` for
/// unset descriptions, feature lists and counts.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct User {
    #[serde(deserialize_with = "null_as_default")]
    pub full_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub email: String,
}

impl User {
    pub fn display(&self) -> &str {
        if self.full_name.is_empty() {
            &self.email
        } else {
            &self.full_name
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Project {
    #[serde(deserialize_with = "null_as_default")]
    pub project_guid: String,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(deserialize_with = "null_as_default")]
    pub created_date: String,
    pub last_accessed_date: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub project_category_guids: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub num_families: u32,
    #[serde(deserialize_with = "null_as_default")]
    pub num_individuals: u32,
    #[serde(deserialize_with = "null_as_default")]
    pub num_variant_tags: u32,
    /// Family counts keyed by analysis status code, as summarized by the server.
    #[serde(deserialize_with = "null_as_default")]
    pub analysis_status_counts: BTreeMap<String, u32>,
    #[serde(deserialize_with = "null_as_default")]
    pub can_edit: bool,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProjectCategory {
    #[serde(deserialize_with = "null_as_default")]
    pub project_category_guid: String,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AnalysedBy {
    #[serde(deserialize_with = "null_as_default")]
    pub created_by: User,
    #[serde(deserialize_with = "null_as_default")]
    pub last_modified_date: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Family {
    #[serde(deserialize_with = "null_as_default")]
    pub family_guid: String,
    #[serde(deserialize_with = "null_as_default")]
    pub project_guid: String,
    #[serde(deserialize_with = "null_as_default")]
    pub family_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub display_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub description: String,
    pub analysis_status: AnalysisStatus,
    pub assigned_analyst: Option<User>,
    #[serde(deserialize_with = "null_as_default")]
    pub analysed_by: Vec<AnalysedBy>,
    #[serde(deserialize_with = "null_as_default")]
    pub individual_guids: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub created_date: String,
    pub internal_case_review_summary: Option<String>,
}

impl Family {
    pub fn display(&self) -> &str {
        if self.display_name.is_empty() {
            &self.family_id
        } else {
            &self.display_name
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PhenotypeFeature {
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub label: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "Option<String>", into = "String")]
pub enum Sex {
    Male,
    Female,
    #[default]
    Unknown,
}

impl Sex {
    pub fn code(self) -> &'static str {
        match self {
            Sex::Male => "M",
            Sex::Female => "F",
            Sex::Unknown => "U",
        }
    }
}

impl From<String> for Sex {
    fn from(code: String) -> Self {
        match code.as_str() {
            "M" => Sex::Male,
            "F" => Sex::Female,
            _ => Sex::Unknown,
        }
    }
}

impl From<Option<String>> for Sex {
    fn from(code: Option<String>) -> Self {
        code.map_or(Sex::Unknown, Sex::from)
    }
}

impl From<Sex> for String {
    fn from(sex: Sex) -> Self {
        sex.code().to_string()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "Option<String>", into = "String")]
pub enum Affected {
    Affected,
    Unaffected,
    #[default]
    Unknown,
}

impl Affected {
    pub fn code(self) -> &'static str {
        match self {
            Affected::Affected => "A",
            Affected::Unaffected => "N",
            Affected::Unknown => "U",
        }
    }
}

impl From<String> for Affected {
    fn from(code: String) -> Self {
        match code.as_str() {
            "A" => Affected::Affected,
            "N" => Affected::Unaffected,
            _ => Affected::Unknown,
        }
    }
}

impl From<Option<String>> for Affected {
    fn from(code: Option<String>) -> Self {
        code.map_or(Affected::Unknown, Affected::from)
    }
}

impl From<Affected> for String {
    fn from(affected: Affected) -> Self {
        affected.code().to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Individual {
    #[serde(deserialize_with = "null_as_default")]
    pub individual_guid: String,
    #[serde(deserialize_with = "null_as_default")]
    pub family_guid: String,
    #[serde(deserialize_with = "null_as_default")]
    pub individual_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub display_name: String,
    pub paternal_id: Option<String>,
    pub maternal_id: Option<String>,
    pub sex: Sex,
    pub affected: Affected,
    pub case_review_status: CaseReviewStatus,
    pub case_review_status_last_modified_date: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub features: Vec<PhenotypeFeature>,
    #[serde(deserialize_with = "null_as_default")]
    pub sample_guids: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub created_date: String,
}

impl Individual {
    pub fn display(&self) -> &str {
        if self.display_name.is_empty() {
            &self.individual_id
        } else {
            &self.display_name
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Sample {
    #[serde(deserialize_with = "null_as_default")]
    pub sample_guid: String,
    #[serde(deserialize_with = "null_as_default")]
    pub individual_guid: String,
    #[serde(deserialize_with = "null_as_default")]
    pub sample_type: String,
    #[serde(deserialize_with = "null_as_default")]
    pub dataset_type: String,
    pub loaded_date: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub is_active: bool,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Transcript {
    #[serde(deserialize_with = "null_as_default")]
    pub transcript_id: String,
    pub major_consequence: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SavedVariant {
    #[serde(deserialize_with = "null_as_default")]
    pub variant_guid: String,
    #[serde(deserialize_with = "null_as_default")]
    pub family_guids: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub tag_guids: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub chrom: String,
    #[serde(deserialize_with = "null_as_default")]
    pub pos: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub xpos: u64,
    #[serde(rename = "ref")]
    #[serde(deserialize_with = "null_as_default")]
    pub reference: String,
    #[serde(deserialize_with = "null_as_default")]
    pub alt: String,
    #[serde(deserialize_with = "null_as_default")]
    pub genome_version: String,
    /// Transcripts keyed by gene id.
    #[serde(deserialize_with = "null_as_default")]
    pub transcripts: BTreeMap<String, Vec<Transcript>>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VariantTag {
    #[serde(deserialize_with = "null_as_default")]
    pub tag_guid: String,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub category: String,
    #[serde(deserialize_with = "null_as_default")]
    pub color: String,
    pub created_by: Option<String>,
    pub last_modified_date: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AnalysisGroup {
    #[serde(deserialize_with = "null_as_default")]
    pub analysis_group_guid: String,
    #[serde(deserialize_with = "null_as_default")]
    pub project_guid: String,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub family_guids: Vec<String>,
}
