use log::{debug, info};

use crate::builder::Builder;
use crate::catalog::*;
use crate::config::*;
use crate::{compute_item_score, compute_overall_score, compute_section_score};

/// The state of one section inside a survey.
#[derive(PartialEq, Debug, Clone)]
pub struct SectionState {
    pub id: SectionId,
    responses: SectionResponses,
    pub overview: SectionOverview,
    total: f64,
}

impl SectionState {
    fn new(id: SectionId) -> SectionState {
        SectionState {
            id,
            responses: SectionResponses::new(),
            overview: SectionOverview::default(),
            total: 0.0,
        }
    }

    pub fn rubric(&self) -> &'static SectionRubric {
        section_rubric(self.id)
    }

    pub fn responses(&self) -> &SectionResponses {
        &self.responses
    }

    /// The capped total, as of the last recorded answer.
    pub fn total(&self) -> f64 {
        self.total
    }

    /// The score of one item under the current answers. Inactive items still get a
    /// score here, they are only left out of the total.
    pub fn item_score(&self, item: &EvaluationItem) -> f64 {
        compute_item_score(item, self.responses.get_or_unanswered(item.id))
    }

    /// Every applicable dimension of every active item has an answer.
    pub fn is_complete(&self, school_type: Option<SchoolType>) -> bool {
        self.rubric()
            .active_items(school_type)
            .all(|item| item_is_answered(item, self.responses.get_or_unanswered(item.id)))
    }

    fn recompute(&mut self, school_type: Option<SchoolType>) {
        self.total = compute_section_score(self.rubric(), &self.responses, school_type);
    }
}

fn item_is_answered(item: &EvaluationItem, response: &EvaluationResponse) -> bool {
    (!item.availability_applicable || response.availability != Answer::Unanswered)
        && (!item.quality_applicable || response.quality != Answer::Unanswered)
}

/// One evaluation of a training centre.
///
/// A survey always holds the six sections. Each recorded answer updates the item,
/// the section total and the overall total immediately.
#[derive(PartialEq, Debug, Clone)]
pub struct Survey {
    school_type: Option<SchoolType>,
    sections: Vec<SectionState>,
}

impl Survey {
    /// A new survey with every item unanswered.
    pub fn new(school_type: Option<SchoolType>) -> Survey {
        Survey {
            school_type,
            sections: SectionId::ALL.iter().map(|s| SectionState::new(*s)).collect(),
        }
    }

    /// Rebuilds a survey from previously recorded sections (for example a draft).
    ///
    /// Sections not listed stay at their defaults. The responses are checked against
    /// the rubric: a single unknown item rejects the whole set.
    pub fn from_sections(
        school_type: Option<SchoolType>,
        sections: &[(SectionId, SectionResponses, SectionOverview)],
    ) -> Result<Survey, ScoringErrors> {
        let mut survey = Survey::new(school_type);
        for (section, responses, overview) in sections.iter() {
            let checked = Builder::new(*section).responses(responses)?.build();
            let state = &mut survey.sections[section.index()];
            state.responses = checked;
            state.overview = overview.clone();
        }
        survey.recompute_all();
        Ok(survey)
    }

    pub fn school_type(&self) -> Option<SchoolType> {
        self.school_type
    }

    /// Changes the school type. All the totals are recomputed because the set of
    /// active items changes. Returns the new overall total.
    pub fn set_school_type(&mut self, school_type: Option<SchoolType>) -> f64 {
        if self.school_type != school_type {
            info!(
                "set_school_type: {:?} -> {:?}",
                self.school_type, school_type
            );
            self.school_type = school_type;
            self.recompute_all();
        }
        self.overall()
    }

    /// Records the answer of an evaluator for one item.
    pub fn record_response(
        &mut self,
        section: SectionId,
        item_id: &str,
        response: EvaluationResponse,
    ) -> Result<ScoreUpdate, ScoringErrors> {
        let item = section_rubric(section)
            .item(item_id)
            .ok_or_else(|| ScoringErrors::UnknownItem {
                section,
                item_id: item_id.to_string(),
            })?;
        let school_type = self.school_type;
        let state = &mut self.sections[section.index()];
        state.responses.insert(item_id, response);
        state.recompute(school_type);
        let item_score = state.item_score(item);
        let section_total = state.total;
        let overall = self.overall();
        debug!(
            "record_response: {}/{}: item {} section {} overall {}",
            section, item_id, item_score, section_total, overall
        );
        Ok(ScoreUpdate {
            section,
            item_id: item_id.to_string(),
            item_score,
            section_total,
            overall,
        })
    }

    pub fn set_overview(&mut self, section: SectionId, overview: SectionOverview) {
        self.sections[section.index()].overview = overview;
    }

    pub fn section(&self, section: SectionId) -> &SectionState {
        &self.sections[section.index()]
    }

    pub fn sections(&self) -> &[SectionState] {
        &self.sections
    }

    pub fn section_scores(&self) -> SectionScores {
        let mut scores = SectionScores::default();
        for state in self.sections.iter() {
            scores.set(state.id, state.total);
        }
        scores
    }

    pub fn overall(&self) -> f64 {
        compute_overall_score(&self.section_scores())
    }

    /// Nothing has been recorded yet.
    pub fn is_empty(&self) -> bool {
        self.sections
            .iter()
            .all(|s| s.responses.is_empty() && s.overview.is_empty())
    }

    pub fn incomplete_sections(&self) -> Vec<SectionId> {
        self.sections
            .iter()
            .filter(|s| !s.is_complete(self.school_type))
            .map(|s| s.id)
            .collect()
    }

    pub fn is_complete(&self) -> bool {
        self.school_type.is_some() && self.incomplete_sections().is_empty()
    }

    /// Checks that the survey can be submitted and freezes its scores.
    ///
    /// The school type must be known (otherwise the conditional items were never
    /// active) and every section must be complete.
    pub fn finalize(&self) -> Result<SubmittedSurvey, ScoringErrors> {
        let school_type = self.school_type.ok_or(ScoringErrors::MissingSchoolType)?;
        let incomplete = self.incomplete_sections();
        if !incomplete.is_empty() {
            return Err(ScoringErrors::IncompleteSections(incomplete));
        }
        let section_scores = self.section_scores();
        let overall = compute_overall_score(&section_scores);
        info!(
            "finalize: school type {} overall {}",
            school_type.as_str(),
            overall
        );
        Ok(SubmittedSurvey {
            school_type,
            section_scores,
            overall,
            rubric_version: RUBRIC_VERSION,
        })
    }

    fn recompute_all(&mut self) {
        let school_type = self.school_type;
        for state in self.sections.iter_mut() {
            state.recompute(school_type);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    fn yes_yes() -> EvaluationResponse {
        EvaluationResponse::new(Answer::Yes, Answer::Yes)
    }

    fn answer_everything(survey: &mut Survey) {
        for section in SectionId::ALL {
            for item in section_rubric(section).items() {
                survey
                    .record_response(section, item.id, yes_yes())
                    .unwrap();
            }
        }
    }

    #[test]
    fn new_survey_is_empty_and_scores_zero() {
        let survey = Survey::new(Some(SchoolType::Day));
        assert!(survey.is_empty());
        assert_eq!(survey.sections().len(), 6);
        assert_eq!(survey.overall(), 0.0);
        assert_eq!(survey.incomplete_sections().len(), 6);
    }

    #[test]
    fn recording_updates_item_section_and_overall() {
        let mut survey = Survey::new(Some(SchoolType::Boarding));
        let u = survey
            .record_response(
                SectionId::StrategicPlanning,
                "sp_strategic_plan",
                EvaluationResponse::new(Answer::Yes, Answer::No),
            )
            .unwrap();
        assert!(approx(u.item_score, 0.6));
        assert!(approx(u.section_total, 0.6));
        assert!(approx(u.overall, 0.6));

        let u = survey
            .record_response(SectionId::Infrastructure, "inf_dormitories", yes_yes())
            .unwrap();
        assert_eq!(u.item_score, 1.5);
        assert_eq!(u.section_total, 1.5);
        assert!(approx(u.overall, 2.1));
        assert!(approx(survey.section_scores().strategic_planning, 0.6));
    }

    #[test]
    fn unknown_items_are_rejected() {
        let mut survey = Survey::new(None);
        let err = survey
            .record_response(SectionId::TeachingLearning, "sp_strategic_plan", yes_yes())
            .unwrap_err();
        assert!(matches!(err, ScoringErrors::UnknownItem { .. }));
        assert!(survey.is_empty());
    }

    #[test]
    fn changing_school_type_moves_conditional_marks() {
        let mut survey = Survey::new(Some(SchoolType::Day));
        survey
            .record_response(SectionId::Infrastructure, "inf_changing_rooms", yes_yes())
            .unwrap();
        survey
            .record_response(SectionId::Infrastructure, "inf_dormitories", yes_yes())
            .unwrap();
        assert_eq!(survey.section(SectionId::Infrastructure).total(), 1.0);
        assert_eq!(survey.set_school_type(Some(SchoolType::Boarding)), 1.5);
        assert_eq!(survey.set_school_type(None), 0.0);
    }

    #[test]
    fn fully_answered_survey_finalizes_at_one_hundred() {
        let mut survey = Survey::new(Some(SchoolType::Boarding));
        answer_everything(&mut survey);
        assert!(survey.is_complete());
        let submitted = survey.finalize().unwrap();
        assert_eq!(submitted.overall, 100.0);
        assert_eq!(submitted.school_type, SchoolType::Boarding);
        assert_eq!(submitted.rubric_version, RUBRIC_VERSION);
    }

    #[test]
    fn finalize_requires_school_type() {
        let mut survey = Survey::new(None);
        answer_everything(&mut survey);
        assert_eq!(survey.finalize(), Err(ScoringErrors::MissingSchoolType));
        assert!(approx(survey.overall(), 96.0));
    }

    #[test]
    fn finalize_lists_incomplete_sections() {
        let mut survey = Survey::new(Some(SchoolType::Day));
        answer_everything(&mut survey);
        survey
            .record_response(
                SectionId::ContinuousImprovement,
                "ci_benchmarking",
                EvaluationResponse::new(Answer::Yes, Answer::Unanswered),
            )
            .unwrap();
        assert_eq!(
            survey.finalize(),
            Err(ScoringErrors::IncompleteSections(vec![
                SectionId::ContinuousImprovement
            ]))
        );
    }

    #[test]
    fn not_applicable_counts_as_answered() {
        let mut survey = Survey::new(Some(SchoolType::Day));
        for item in section_rubric(SectionId::StakeholdersEngagement).items() {
            survey
                .record_response(
                    SectionId::StakeholdersEngagement,
                    item.id,
                    EvaluationResponse::new(Answer::NotApplicable, Answer::NotApplicable),
                )
                .unwrap();
        }
        assert!(survey
            .section(SectionId::StakeholdersEngagement)
            .is_complete(Some(SchoolType::Day)));
        assert_eq!(survey.section(SectionId::StakeholdersEngagement).total(), 0.0);
    }

    #[test]
    fn from_sections_restores_totals_and_rejects_unknown_items() {
        let mut b = Builder::new(SectionId::StrategicPlanning);
        b.answer("sp_plan_review", Answer::Yes, Answer::Yes).unwrap();
        let overview = SectionOverview {
            strength: "clear plan".to_string(),
            ..SectionOverview::default()
        };
        let survey = Survey::from_sections(
            Some(SchoolType::Day),
            &[(SectionId::StrategicPlanning, b.build(), overview.clone())],
        )
        .unwrap();
        assert_eq!(survey.overall(), 1.0);
        assert_eq!(survey.section(SectionId::StrategicPlanning).overview, overview);

        let mut foreign = SectionResponses::new();
        foreign.insert("not_an_item", yes_yes());
        assert!(Survey::from_sections(
            None,
            &[(SectionId::Infrastructure, foreign, SectionOverview::default())]
        )
        .is_err());
    }

    #[test]
    fn surveys_are_independent_copies() {
        let mut a = Survey::new(Some(SchoolType::Day));
        let b = a.clone();
        a.record_response(SectionId::StrategicPlanning, "sp_plan_review", yes_yes())
            .unwrap();
        assert_eq!(a.overall(), 1.0);
        assert_eq!(b.overall(), 0.0);
    }
}
