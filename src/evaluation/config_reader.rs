use crate::evaluation::*;

use serde::{Deserialize, Serialize};
use serde_json::Value as JSValue;
use std::collections::BTreeMap;

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize, Default)]
pub struct OutputSettings {
    #[serde(rename = "centreName")]
    pub centre_name: String,
    #[serde(rename = "evaluatorName")]
    pub evaluator_name: Option<String>,
    #[serde(rename = "evaluationDate")]
    pub evaluation_date: Option<String>,
    #[serde(rename = "outputDirectory")]
    pub output_directory: Option<String>,
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub centre: String,
    pub evaluator: Option<String>,
    pub date: Option<String>,
    #[serde(rename = "schoolType")]
    pub school_type: Option<String>,
    #[serde(rename = "rubricVersion")]
    pub rubric_version: String,
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct ResponseSource {
    pub provider: String,
    #[serde(rename = "filePath")]
    pub file_path: String,
    /// The section filled by a spreadsheet.
    pub section: Option<String>,
    #[serde(rename = "excelWorksheetName")]
    pub excel_worksheet_name: Option<String>,
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct DraftSettings {
    pub directory: String,
    #[serde(rename = "instanceId")]
    pub instance_id: String,
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize, Default)]
pub struct SurveyConfig {
    #[serde(rename = "outputSettings", default)]
    pub output_settings: OutputSettings,
    #[serde(rename = "schoolType")]
    pub school_type: Option<String>,
    #[serde(rename = "responseSources", default)]
    pub response_sources: Vec<ResponseSource>,
    pub draft: Option<DraftSettings>,
}

// ********* Survey documents (drafts and json inputs) **********

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize, Default)]
pub struct ResponseDocument {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub availability: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quality: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub observation: Option<String>,
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize, Default)]
pub struct OverviewDocument {
    #[serde(default)]
    pub strength: String,
    #[serde(default)]
    pub weakness: String,
    #[serde(default)]
    pub improvement: String,
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize, Default)]
pub struct SectionDocument {
    #[serde(default)]
    pub responses: BTreeMap<String, ResponseDocument>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overview: Option<OverviewDocument>,
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize, Default)]
pub struct SurveyDocument {
    #[serde(rename = "instanceId", skip_serializing_if = "Option::is_none")]
    pub instance_id: Option<String>,
    #[serde(rename = "rubricVersion", skip_serializing_if = "Option::is_none")]
    pub rubric_version: Option<String>,
    #[serde(rename = "rubricFingerprint", skip_serializing_if = "Option::is_none")]
    pub rubric_fingerprint: Option<String>,
    #[serde(rename = "schoolType", skip_serializing_if = "Option::is_none")]
    pub school_type: Option<String>,
    #[serde(default)]
    pub sections: BTreeMap<String, SectionDocument>,
}

pub fn read_config(path: &str) -> SurveyResult<SurveyConfig> {
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu { path })?;
    let config: SurveyConfig =
        serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu { path })?;
    debug!("read_config: {:?}", config);
    Ok(config)
}

pub fn read_summary(path: &str) -> SurveyResult<JSValue> {
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu { path })?;
    let js: JSValue = serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu { path })?;
    Ok(js)
}
