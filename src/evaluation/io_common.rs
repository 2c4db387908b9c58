use std::path::Path;

use crate::evaluation::*;

/// A response as read by the readers, before the labels are interpreted.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct ParsedResponse {
    pub section: SectionId,
    pub item_id: String,
    pub availability: String,
    pub quality: String,
    pub observation: String,
    /// Where the response comes from, for the messages.
    pub origin: String,
}

impl ParsedResponse {
    pub fn to_response(&self) -> EvaluationResponse {
        EvaluationResponse {
            availability: parse_answer(&self.availability, &self.origin),
            quality: parse_answer(&self.quality, &self.origin),
            observation: self.observation.clone(),
        }
    }
}

/// Everything one source contributes to a survey.
#[derive(PartialEq, Debug, Clone, Default)]
pub struct ResponseBatch {
    pub school_type: Option<SchoolType>,
    pub responses: Vec<ParsedResponse>,
    pub overviews: Vec<(SectionId, SectionOverview)>,
}

/// Labels that cannot be understood earn nothing: they are read as unanswered.
pub fn parse_answer(label: &str, origin: &str) -> Answer {
    match Answer::from_label(label) {
        Some(a) => a,
        None => {
            warn!(
                "parse_answer: {}: cannot understand answer {:?}, treating it as unanswered",
                origin, label
            );
            Answer::Unanswered
        }
    }
}

pub fn parse_section(key: &str) -> SurveyResult<SectionId> {
    SectionId::from_key(key.trim()).context(UnknownSectionSnafu { name: key })
}

pub fn parse_school_type(s: &str) -> SurveyResult<SchoolType> {
    SchoolType::parse(s).context(UnknownSchoolTypeSnafu { name: s })
}

pub fn simplify_file_name(path: &str) -> String {
    Path::new(path)
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or(path)
        .to_string()
}

/// Marks are always rendered with two decimals.
pub fn format_marks(marks: f64) -> String {
    format!("{:.2}", marks)
}
