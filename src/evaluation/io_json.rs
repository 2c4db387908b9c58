// Survey documents in JSON: the json input provider and the drafts share this format.

use tvtc_scoring::builder::Builder;

use crate::evaluation::{io_common::*, *};

pub fn read_json_responses(path: &str) -> SurveyResult<ResponseBatch> {
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu { path })?;
    let doc: SurveyDocument =
        serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu { path })?;
    batch_from_document(&doc, &simplify_file_name(path))
}

/// Flattens a document. Section keys and the school type are checked, item ids are
/// checked later against the rubric.
pub fn batch_from_document(doc: &SurveyDocument, origin: &str) -> SurveyResult<ResponseBatch> {
    let school_type = match doc.school_type.as_deref() {
        None | Some("") => None,
        Some(s) => Some(parse_school_type(s)?),
    };
    let mut batch = ResponseBatch {
        school_type,
        ..ResponseBatch::default()
    };
    for (key, section_doc) in doc.sections.iter() {
        let section = parse_section(key)?;
        for (item_id, r) in section_doc.responses.iter() {
            batch.responses.push(ParsedResponse {
                section,
                item_id: item_id.clone(),
                availability: r.availability.clone().unwrap_or_default(),
                quality: r.quality.clone().unwrap_or_default(),
                observation: r.observation.clone().unwrap_or_default(),
                origin: format!("{}:{}/{}", origin, key, item_id),
            });
        }
        if let Some(o) = &section_doc.overview {
            batch.overviews.push((
                section,
                SectionOverview {
                    strength: o.strength.clone(),
                    weakness: o.weakness.clone(),
                    improvement: o.improvement.clone(),
                },
            ));
        }
    }
    debug!(
        "batch_from_document: {}: {} responses, {} overviews",
        origin,
        batch.responses.len(),
        batch.overviews.len()
    );
    Ok(batch)
}

/// Builds a complete survey out of a batch. Any item unknown to the rubric rejects the batch.
pub fn survey_from_batch(batch: &ResponseBatch) -> SurveyResult<Survey> {
    let mut sections: Vec<(SectionId, SectionResponses, SectionOverview)> = Vec::new();
    for section in SectionId::ALL {
        let mut builder = Builder::new(section);
        for pr in batch.responses.iter().filter(|pr| pr.section == section) {
            builder
                .add_response(&pr.item_id, &pr.to_response())
                .context(ScoringSnafu {})?;
        }
        let overview = batch
            .overviews
            .iter()
            .find(|(s, _)| *s == section)
            .map(|(_, o)| o.clone())
            .unwrap_or_default();
        sections.push((section, builder.build(), overview));
    }
    Survey::from_sections(batch.school_type, &sections).context(ScoringSnafu {})
}

pub fn survey_from_document(doc: &SurveyDocument, origin: &str) -> SurveyResult<Survey> {
    survey_from_batch(&batch_from_document(doc, origin)?)
}

/// The document of a survey, stamped with the rubric it was made against.
/// Unanswered dimensions and empty sections are left out.
pub fn document_from_survey(survey: &Survey, instance_id: &str) -> SurveyDocument {
    let mut doc = SurveyDocument {
        instance_id: Some(instance_id.to_string()),
        rubric_version: Some(RUBRIC_VERSION.to_string()),
        rubric_fingerprint: Some(rubric_fingerprint()),
        school_type: survey.school_type().map(|st| st.as_str().to_string()),
        sections: Default::default(),
    };
    for state in survey.sections() {
        if state.responses().is_empty() && state.overview.is_empty() {
            continue;
        }
        let mut section_doc = SectionDocument::default();
        for (item_id, r) in state.responses().iter() {
            section_doc.responses.insert(
                item_id.clone(),
                ResponseDocument {
                    availability: non_empty(r.availability.label()),
                    quality: non_empty(r.quality.label()),
                    observation: non_empty(&r.observation),
                },
            );
        }
        if !state.overview.is_empty() {
            section_doc.overview = Some(OverviewDocument {
                strength: state.overview.strength.clone(),
                weakness: state.overview.weakness.clone(),
                improvement: state.overview.improvement.clone(),
            });
        }
        doc.sections.insert(state.id.key().to_string(), section_doc);
    }
    doc
}

fn non_empty(s: &str) -> Option<String> {
    if s.is_empty() {
        None
    } else {
        Some(s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc_from_str(s: &str) -> SurveyDocument {
        serde_json::from_str(s).unwrap()
    }

    #[test]
    fn reads_sections_and_overviews() {
        let doc = doc_from_str(
            r#"{
              "schoolType": "day",
              "sections": {
                "strategicPlanning": {
                  "responses": {
                    "sp_strategic_plan": {"availability": "yes", "quality": "no"},
                    "sp_alignment_national_policy": {"quality": "Yes"}
                  },
                  "overview": {"strength": "clear direction"}
                }
              }
            }"#,
        );
        let survey = survey_from_document(&doc, "test").unwrap();
        assert_eq!(survey.school_type(), Some(SchoolType::Day));
        // 1.5 * 0.4 + 1.0
        assert!((survey.overall() - 1.6).abs() < 1e-9);
        assert_eq!(
            survey.section(SectionId::StrategicPlanning).overview.strength,
            "clear direction"
        );
    }

    #[test]
    fn unknown_sections_and_items_are_errors() {
        let doc = doc_from_str(r#"{"sections": {"canteen": {}}}"#);
        assert!(matches!(
            batch_from_document(&doc, "test"),
            Err(SurveyError::UnknownSection { .. })
        ));
        let doc = doc_from_str(
            r#"{"sections": {"infrastructure": {"responses": {"inf_swimming_pool": {"availability": "yes"}}}}}"#,
        );
        assert!(matches!(
            survey_from_document(&doc, "test"),
            Err(SurveyError::Scoring { .. })
        ));
        let doc = doc_from_str(r#"{"schoolType": "evening"}"#);
        assert!(matches!(
            batch_from_document(&doc, "test"),
            Err(SurveyError::UnknownSchoolType { .. })
        ));
    }

    #[test]
    fn malformed_answers_earn_nothing() {
        let doc = doc_from_str(
            r#"{"sections": {"infrastructure": {"responses": {"inf_library": {"availability": "maybe", "quality": "yes"}}}}}"#,
        );
        let survey = survey_from_document(&doc, "test").unwrap();
        let r = survey
            .section(SectionId::Infrastructure)
            .responses()
            .get("inf_library")
            .unwrap()
            .clone();
        assert_eq!(r.availability, Answer::Unanswered);
        assert!((survey.overall() - 0.9).abs() < 1e-9);
    }

    #[test]
    fn documents_keep_answers_and_stamp_the_rubric() {
        let mut survey = Survey::new(Some(SchoolType::Boarding));
        survey
            .record_response(
                SectionId::Infrastructure,
                "inf_dormitories",
                EvaluationResponse {
                    availability: Answer::Yes,
                    quality: Answer::NotApplicable,
                    observation: "two blocks".to_string(),
                },
            )
            .unwrap();
        survey
            .record_response(
                SectionId::Infrastructure,
                "inf_library",
                EvaluationResponse::new(Answer::No, Answer::Unanswered),
            )
            .unwrap();
        let doc = document_from_survey(&survey, "centre-1");
        assert_eq!(doc.school_type.as_deref(), Some("boarding"));
        assert_eq!(doc.rubric_fingerprint, Some(rubric_fingerprint()));
        assert_eq!(doc.sections.len(), 1);
        let inf = &doc.sections["infrastructure"];
        assert_eq!(inf.responses["inf_dormitories"].quality.as_deref(), Some("n/a"));
        assert_eq!(inf.responses["inf_library"].quality, None);

        let restored = survey_from_document(&doc, "draft").unwrap();
        assert_eq!(restored, survey);
    }
}
