// ********* Input data structures ***********

use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::Display;

/// Share of an item's marks earned by a positive availability answer when both
/// dimensions apply.
pub const AVAILABILITY_WEIGHT: f64 = 0.4;
/// Share of an item's marks earned by a positive quality answer when both
/// dimensions apply.
pub const QUALITY_WEIGHT: f64 = 0.6;

/// All the possible states of one dimension (availability or quality) of a response.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash, Default)]
pub enum Answer {
    /// The evaluator has not looked at this dimension yet.
    #[default]
    Unanswered,
    Yes,
    No,
    /// The dimension does not apply to this item. The other dimension then carries
    /// the full weight of the item.
    NotApplicable,
}

impl Answer {
    /// Reads the textual codes used by the evaluation forms and spreadsheets.
    ///
    /// Returns `None` when the label cannot be understood. Callers decide how to degrade.
    pub fn from_label(label: &str) -> Option<Answer> {
        match label.trim().to_lowercase().as_str() {
            "" => Some(Answer::Unanswered),
            "yes" | "y" | "true" => Some(Answer::Yes),
            "no" | "n" | "false" => Some(Answer::No),
            "n/a" | "na" | "not applicable" | "notapplicable" => Some(Answer::NotApplicable),
            _ => None,
        }
    }

    /// The label written back to drafts and summaries. Unanswered is the empty string.
    pub fn label(&self) -> &'static str {
        match self {
            Answer::Unanswered => "",
            Answer::Yes => "yes",
            Answer::No => "no",
            Answer::NotApplicable => "n/a",
        }
    }
}

/// The classification of the training centre. It controls which conditional
/// items of the rubric are active.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash)]
pub enum SchoolType {
    Day,
    Boarding,
}

impl SchoolType {
    pub fn parse(s: &str) -> Option<SchoolType> {
        match s.trim().to_lowercase().as_str() {
            "day" => Some(SchoolType::Day),
            "boarding" => Some(SchoolType::Boarding),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SchoolType::Day => "day",
            SchoolType::Boarding => "boarding",
        }
    }
}

/// Which school types an item applies to.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash)]
pub enum SchoolScope {
    All,
    DayOnly,
    BoardingOnly,
}

impl SchoolScope {
    /// Conditional items are only active once the school type is known.
    pub fn is_active(&self, school_type: Option<SchoolType>) -> bool {
        match self {
            SchoolScope::All => true,
            SchoolScope::DayOnly => school_type == Some(SchoolType::Day),
            SchoolScope::BoardingOnly => school_type == Some(SchoolType::Boarding),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SchoolScope::All => "all",
            SchoolScope::DayOnly => "day",
            SchoolScope::BoardingOnly => "boarding",
        }
    }
}

/// The six sections of the evaluation, in the order they are presented.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash, Ord, PartialOrd)]
pub enum SectionId {
    StrategicPlanning,
    OperationalManagement,
    TeachingLearning,
    StakeholdersEngagement,
    ContinuousImprovement,
    Infrastructure,
}

impl SectionId {
    pub const ALL: [SectionId; 6] = [
        SectionId::StrategicPlanning,
        SectionId::OperationalManagement,
        SectionId::TeachingLearning,
        SectionId::StakeholdersEngagement,
        SectionId::ContinuousImprovement,
        SectionId::Infrastructure,
    ];

    /// The key used in drafts, configuration files and summaries.
    pub fn key(&self) -> &'static str {
        match self {
            SectionId::StrategicPlanning => "strategicPlanning",
            SectionId::OperationalManagement => "operationalManagement",
            SectionId::TeachingLearning => "teachingLearning",
            SectionId::StakeholdersEngagement => "stakeholdersEngagement",
            SectionId::ContinuousImprovement => "continuousImprovement",
            SectionId::Infrastructure => "infrastructure",
        }
    }

    pub fn from_key(key: &str) -> Option<SectionId> {
        SectionId::ALL.iter().copied().find(|s| s.key() == key)
    }

    pub(crate) fn index(&self) -> usize {
        match self {
            SectionId::StrategicPlanning => 0,
            SectionId::OperationalManagement => 1,
            SectionId::TeachingLearning => 2,
            SectionId::StakeholdersEngagement => 3,
            SectionId::ContinuousImprovement => 4,
            SectionId::Infrastructure => 5,
        }
    }
}

impl Display for SectionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// One piece of evidence checked by the evaluator.
#[derive(PartialEq, Debug, Clone)]
pub struct EvaluationItem {
    pub id: &'static str,
    pub label: &'static str,
    /// The maximum marks this item can contribute.
    pub marks_allocated: f64,
    pub availability_applicable: bool,
    pub quality_applicable: bool,
    pub school_scope: SchoolScope,
}

/// A named group of items. Groups are the tabs of the evaluation form.
#[derive(PartialEq, Debug, Clone)]
pub struct ItemGroup {
    pub id: &'static str,
    pub title: &'static str,
    pub items: &'static [EvaluationItem],
}

#[derive(PartialEq, Debug, Clone)]
pub struct SectionRubric {
    pub id: SectionId,
    pub title: &'static str,
    pub max_marks: f64,
    pub groups: &'static [ItemGroup],
}

impl SectionRubric {
    /// All the items of the section, in catalog order, regardless of school type.
    pub fn items(&self) -> impl Iterator<Item = &'static EvaluationItem> {
        self.groups.iter().flat_map(|g| g.items.iter())
    }

    /// The items that count for the given school type.
    pub fn active_items(
        &self,
        school_type: Option<SchoolType>,
    ) -> impl Iterator<Item = &'static EvaluationItem> {
        self.items()
            .filter(move |item| item.school_scope.is_active(school_type))
    }

    pub fn item(&self, item_id: &str) -> Option<&'static EvaluationItem> {
        self.items().find(|item| item.id == item_id)
    }
}

/// What the evaluator entered for one item.
#[derive(Eq, PartialEq, Debug, Clone, Default)]
pub struct EvaluationResponse {
    pub availability: Answer,
    pub quality: Answer,
    /// Free text. Not scored.
    pub observation: String,
}

impl EvaluationResponse {
    pub fn new(availability: Answer, quality: Answer) -> EvaluationResponse {
        EvaluationResponse {
            availability,
            quality,
            observation: String::new(),
        }
    }
}

pub(crate) static UNANSWERED: EvaluationResponse = EvaluationResponse {
    availability: Answer::Unanswered,
    quality: Answer::Unanswered,
    observation: String::new(),
};

/// The responses of one section, keyed by item id.
///
/// The public way to fill it is the [`crate::builder::Builder`], which checks the
/// item ids against the rubric.
#[derive(Eq, PartialEq, Debug, Clone, Default)]
pub struct SectionResponses {
    pub(crate) entries: BTreeMap<String, EvaluationResponse>,
}

impl SectionResponses {
    pub fn new() -> SectionResponses {
        SectionResponses::default()
    }

    pub fn get(&self, item_id: &str) -> Option<&EvaluationResponse> {
        self.entries.get(item_id)
    }

    /// The response for an item, or an unanswered one if nothing was recorded.
    pub fn get_or_unanswered(&self, item_id: &str) -> &EvaluationResponse {
        self.entries.get(item_id).unwrap_or(&UNANSWERED)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &EvaluationResponse)> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub(crate) fn insert(&mut self, item_id: &str, response: EvaluationResponse) {
        self.entries.insert(item_id.to_string(), response);
    }
}

/// Free-text summary of a section. Not scored.
#[derive(Eq, PartialEq, Debug, Clone, Default)]
pub struct SectionOverview {
    pub strength: String,
    pub weakness: String,
    pub improvement: String,
}

impl SectionOverview {
    pub fn is_empty(&self) -> bool {
        self.strength.is_empty() && self.weakness.is_empty() && self.improvement.is_empty()
    }
}

// ******** Output data structures *********

/// The totals of the six sections.
#[derive(PartialEq, Debug, Clone, Copy, Default)]
pub struct SectionScores {
    pub strategic_planning: f64,
    pub operational_management: f64,
    pub teaching_learning: f64,
    pub stakeholders_engagement: f64,
    pub continuous_improvement: f64,
    pub infrastructure: f64,
}

impl SectionScores {
    pub fn get(&self, section: SectionId) -> f64 {
        match section {
            SectionId::StrategicPlanning => self.strategic_planning,
            SectionId::OperationalManagement => self.operational_management,
            SectionId::TeachingLearning => self.teaching_learning,
            SectionId::StakeholdersEngagement => self.stakeholders_engagement,
            SectionId::ContinuousImprovement => self.continuous_improvement,
            SectionId::Infrastructure => self.infrastructure,
        }
    }

    pub fn set(&mut self, section: SectionId, total: f64) {
        let slot = match section {
            SectionId::StrategicPlanning => &mut self.strategic_planning,
            SectionId::OperationalManagement => &mut self.operational_management,
            SectionId::TeachingLearning => &mut self.teaching_learning,
            SectionId::StakeholdersEngagement => &mut self.stakeholders_engagement,
            SectionId::ContinuousImprovement => &mut self.continuous_improvement,
            SectionId::Infrastructure => &mut self.infrastructure,
        };
        *slot = total;
    }

    pub fn iter(&self) -> impl Iterator<Item = (SectionId, f64)> + '_ {
        SectionId::ALL.iter().map(move |s| (*s, self.get(*s)))
    }
}

/// What one recorded answer changed. The caller reports it upward (display, persistence).
#[derive(PartialEq, Debug, Clone)]
pub struct ScoreUpdate {
    pub section: SectionId,
    pub item_id: String,
    pub item_score: f64,
    pub section_total: f64,
    pub overall: f64,
}

/// A survey that passed the completeness checks.
#[derive(PartialEq, Debug, Clone)]
pub struct SubmittedSurvey {
    pub school_type: SchoolType,
    pub section_scores: SectionScores,
    pub overall: f64,
    pub rubric_version: &'static str,
}

/// Errors raised when the input does not fit the rubric.
///
/// Scoring itself never fails: these only come from validating responses and from
/// submission checks.
#[derive(Eq, PartialEq, Debug, Clone)]
pub enum ScoringErrors {
    UnknownItem { section: SectionId, item_id: String },
    MissingSchoolType,
    IncompleteSections(Vec<SectionId>),
}

impl Error for ScoringErrors {}

impl Display for ScoringErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScoringErrors::UnknownItem { section, item_id } => {
                write!(f, "item {:?} is not part of section {}", item_id, section)
            }
            ScoringErrors::MissingSchoolType => {
                write!(f, "the school type (day or boarding) must be selected")
            }
            ScoringErrors::IncompleteSections(sections) => {
                let keys: Vec<&str> = sections.iter().map(|s| s.key()).collect();
                write!(f, "sections not complete: {}", keys.join(", "))
            }
        }
    }
}
