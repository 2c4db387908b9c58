pub use crate::catalog::*;
pub use crate::config::*;

/// A builder for the responses of one section.
///
/// Every item id is checked against the rubric of the section, so that a
/// [`SectionResponses`] built this way only contains items the scorer knows about.
///
/// ```
/// use tvtc_scoring::builder::Builder;
/// use tvtc_scoring::{Answer, ScoringErrors, SectionId};
///
/// let mut builder = Builder::new(SectionId::StrategicPlanning);
/// builder.answer("sp_strategic_plan", Answer::Yes, Answer::No)?;
/// builder.answer_with_observation(
///     "sp_plan_review",
///     Answer::Yes,
///     Answer::Yes,
///     "reviewed every term",
/// )?;
/// let responses = builder.build();
/// assert_eq!(responses.len(), 2);
///
/// # Ok::<(), ScoringErrors>(())
/// ```
pub struct Builder<'a> {
    pub(crate) _rubric: &'a SectionRubric,
    pub(crate) _responses: SectionResponses,
}

impl Builder<'static> {
    /// A builder checking against the catalog definition of the section.
    pub fn new(section: SectionId) -> Builder<'static> {
        Builder::for_rubric(section_rubric(section))
    }
}

impl<'a> Builder<'a> {
    pub fn for_rubric(rubric: &'a SectionRubric) -> Builder<'a> {
        Builder {
            _rubric: rubric,
            _responses: SectionResponses::new(),
        }
    }

    /// Starts from responses recorded earlier. They go through the same checks.
    pub fn responses(mut self, previous: &SectionResponses) -> Result<Builder<'a>, ScoringErrors> {
        for (item_id, response) in previous.iter() {
            self.add_response(item_id, response)?;
        }
        Ok(self)
    }

    /// Records the two answers of an item.
    ///
    /// It is the simplest use case for most cases.
    pub fn answer(
        &mut self,
        item_id: &str,
        availability: Answer,
        quality: Answer,
    ) -> Result<(), ScoringErrors> {
        self.add_response(item_id, &EvaluationResponse::new(availability, quality))
    }

    pub fn answer_with_observation(
        &mut self,
        item_id: &str,
        availability: Answer,
        quality: Answer,
        observation: &str,
    ) -> Result<(), ScoringErrors> {
        self.add_response(
            item_id,
            &EvaluationResponse {
                availability,
                quality,
                observation: observation.to_string(),
            },
        )
    }

    /// Records a full response. A later response for the same item replaces the earlier one.
    pub fn add_response(
        &mut self,
        item_id: &str,
        response: &EvaluationResponse,
    ) -> Result<(), ScoringErrors> {
        if self._rubric.item(item_id).is_none() {
            return Err(ScoringErrors::UnknownItem {
                section: self._rubric.id,
                item_id: item_id.to_string(),
            });
        }
        self._responses.insert(item_id, response.clone());
        Ok(())
    }

    pub fn build(self) -> SectionResponses {
        self._responses
    }
}
