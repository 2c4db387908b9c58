pub mod builder;
mod catalog;
mod config;
pub mod manual;
mod survey;

use log::debug;

pub use crate::catalog::*;
pub use crate::config::*;
pub use crate::survey::*;

/// Computes the marks obtained by one item.
///
/// Rules, in order:
/// * quality not applicable (answered N/A or not part of the item): full marks when
///   availability is Yes, nothing otherwise.
/// * availability not applicable: full marks when quality is Yes, nothing otherwise.
/// * both dimensions apply: availability earns 40% of the marks and quality 60%.
///
/// Anything but an explicit Yes earns nothing for its dimension. Items with
/// non-positive or non-finite marks always score 0.
pub fn compute_item_score(item: &EvaluationItem, response: &EvaluationResponse) -> f64 {
    let marks = item.marks_allocated;
    if !marks.is_finite() || marks <= 0.0 {
        return 0.0;
    }
    let availability = if item.availability_applicable {
        response.availability
    } else {
        Answer::NotApplicable
    };
    let quality = if item.quality_applicable {
        response.quality
    } else {
        Answer::NotApplicable
    };

    let score = match (availability, quality) {
        (a, Answer::NotApplicable) => full_credit(a, marks),
        (Answer::NotApplicable, q) => full_credit(q, marks),
        (Answer::Yes, Answer::Yes) => marks,
        (a, q) => partial_credit(a, AVAILABILITY_WEIGHT, marks) + partial_credit(q, QUALITY_WEIGHT, marks),
    };
    score.clamp(0.0, marks)
}

fn full_credit(answer: Answer, marks: f64) -> f64 {
    if answer == Answer::Yes {
        marks
    } else {
        0.0
    }
}

fn partial_credit(answer: Answer, weight: f64, marks: f64) -> f64 {
    if answer == Answer::Yes {
        marks * weight
    } else {
        0.0
    }
}

/// Computes the total of a section: the sum of the scores of the items active for the
/// school type, capped at the maximum of the section.
///
/// Responses for items that are not active (or not in the rubric) are ignored.
pub fn compute_section_score(
    rubric: &SectionRubric,
    responses: &SectionResponses,
    school_type: Option<SchoolType>,
) -> f64 {
    let raw: f64 = rubric
        .active_items(school_type)
        .map(|item| compute_item_score(item, responses.get_or_unanswered(item.id)))
        .sum();
    let cap = if rubric.max_marks.is_finite() && rubric.max_marks > 0.0 {
        rubric.max_marks
    } else {
        0.0
    };
    if raw > cap {
        // Only reachable when the catalog marks of a section exceed its maximum.
        debug!(
            "compute_section_score: section {}: raw total {} exceeds the maximum {}, capping",
            rubric.id, raw, cap
        );
        cap
    } else {
        debug!(
            "compute_section_score: section {}: total {} / {}",
            rubric.id, raw, cap
        );
        raw.max(0.0)
    }
}

/// The overall score: the plain sum of the six section totals.
pub fn compute_overall_score(scores: &SectionScores) -> f64 {
    scores.iter().map(|(_, total)| total).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn init() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    fn both(marks: f64) -> EvaluationItem {
        EvaluationItem {
            id: "item",
            label: "Item",
            marks_allocated: marks,
            availability_applicable: true,
            quality_applicable: true,
            school_scope: SchoolScope::All,
        }
    }

    fn resp(availability: Answer, quality: Answer) -> EvaluationResponse {
        EvaluationResponse::new(availability, quality)
    }

    const ANSWERS: [Answer; 4] = [
        Answer::Unanswered,
        Answer::Yes,
        Answer::No,
        Answer::NotApplicable,
    ];

    #[test]
    fn weighted_partial_credit() {
        let it = both(2.5);
        assert_eq!(compute_item_score(&it, &resp(Answer::No, Answer::No)), 0.0);
        assert_eq!(
            compute_item_score(&it, &resp(Answer::Unanswered, Answer::Unanswered)),
            0.0
        );
        assert!(approx(
            compute_item_score(&it, &resp(Answer::Yes, Answer::No)),
            1.0
        ));
        assert!(approx(
            compute_item_score(&it, &resp(Answer::Unanswered, Answer::Yes)),
            1.5
        ));
        assert_eq!(compute_item_score(&it, &resp(Answer::Yes, Answer::Yes)), 2.5);
    }

    #[test]
    fn half_mark_item_with_availability_only() {
        let it = both(0.5);
        assert!(approx(
            compute_item_score(&it, &resp(Answer::Yes, Answer::No)),
            0.2
        ));
    }

    #[test]
    fn quality_not_applicable_uses_availability_only() {
        let it = both(2.0);
        assert_eq!(
            compute_item_score(&it, &resp(Answer::No, Answer::NotApplicable)),
            0.0
        );
        assert_eq!(
            compute_item_score(&it, &resp(Answer::Yes, Answer::NotApplicable)),
            2.0
        );

        let mut availability_only = both(2.0);
        availability_only.quality_applicable = false;
        for q in ANSWERS {
            assert_eq!(
                compute_item_score(&availability_only, &resp(Answer::Yes, q)),
                2.0
            );
            assert_eq!(
                compute_item_score(&availability_only, &resp(Answer::No, q)),
                0.0
            );
            assert_eq!(
                compute_item_score(&availability_only, &resp(Answer::Unanswered, q)),
                0.0
            );
        }
    }

    #[test]
    fn availability_not_applicable_uses_quality_only() {
        let it = both(1.5);
        assert_eq!(
            compute_item_score(&it, &resp(Answer::NotApplicable, Answer::Yes)),
            1.5
        );
        assert_eq!(
            compute_item_score(&it, &resp(Answer::NotApplicable, Answer::No)),
            0.0
        );

        let mut quality_only = both(1.5);
        quality_only.availability_applicable = false;
        for a in ANSWERS {
            assert_eq!(compute_item_score(&quality_only, &resp(a, Answer::Yes)), 1.5);
            assert_eq!(compute_item_score(&quality_only, &resp(a, Answer::No)), 0.0);
        }
    }

    #[test]
    fn both_dimensions_not_applicable_scores_nothing() {
        let it = both(1.0);
        assert_eq!(
            compute_item_score(&it, &resp(Answer::NotApplicable, Answer::NotApplicable)),
            0.0
        );
    }

    #[test]
    fn degenerate_marks_score_nothing() {
        let full = resp(Answer::Yes, Answer::Yes);
        assert_eq!(compute_item_score(&both(0.0), &full), 0.0);
        assert_eq!(compute_item_score(&both(-1.0), &full), 0.0);
        assert_eq!(compute_item_score(&both(f64::NAN), &full), 0.0);
        assert_eq!(compute_item_score(&both(f64::INFINITY), &full), 0.0);
    }

    #[test]
    fn item_score_stays_within_bounds() {
        let it = both(1.5);
        for a in ANSWERS {
            for q in ANSWERS {
                let s = compute_item_score(&it, &resp(a, q));
                assert!((0.0..=1.5).contains(&s), "{:?} {:?} -> {}", a, q, s);
                assert_eq!(s, compute_item_score(&it, &resp(a, q)));
            }
        }
    }

    static OVERFULL_ITEMS: [EvaluationItem; 3] = [
        EvaluationItem {
            id: "a",
            label: "A",
            marks_allocated: 4.0,
            availability_applicable: true,
            quality_applicable: true,
            school_scope: SchoolScope::All,
        },
        EvaluationItem {
            id: "b",
            label: "B",
            marks_allocated: 4.0,
            availability_applicable: true,
            quality_applicable: false,
            school_scope: SchoolScope::All,
        },
        EvaluationItem {
            id: "c",
            label: "C",
            marks_allocated: 4.0,
            availability_applicable: true,
            quality_applicable: true,
            school_scope: SchoolScope::DayOnly,
        },
    ];

    static OVERFULL_GROUPS: [ItemGroup; 1] = [ItemGroup {
        id: "all",
        title: "All",
        items: &OVERFULL_ITEMS,
    }];

    static OVERFULL: SectionRubric = SectionRubric {
        id: SectionId::StrategicPlanning,
        title: "Overfull",
        max_marks: 10.0,
        groups: &OVERFULL_GROUPS,
    };

    fn all_yes(rubric: &SectionRubric) -> SectionResponses {
        let mut b = builder::Builder::for_rubric(rubric);
        for it in rubric.items() {
            b.answer(it.id, Answer::Yes, Answer::Yes).unwrap();
        }
        b.build()
    }

    #[test]
    fn section_total_is_capped() {
        init();
        let responses = all_yes(&OVERFULL);
        // 4 + 4 + 4 = 12 for a day school
        assert_eq!(
            compute_section_score(&OVERFULL, &responses, Some(SchoolType::Day)),
            10.0
        );
        // 4 + 4 = 8 when the day-only item is filtered out
        assert_eq!(
            compute_section_score(&OVERFULL, &responses, Some(SchoolType::Boarding)),
            8.0
        );
    }

    #[test]
    fn missing_responses_count_as_unanswered() {
        let empty = SectionResponses::new();
        for section in SectionId::ALL {
            assert_eq!(
                compute_section_score(section_rubric(section), &empty, Some(SchoolType::Day)),
                0.0
            );
        }
    }

    #[test]
    fn strategic_planning_full_credit() {
        let rubric = section_rubric(SectionId::StrategicPlanning);
        let responses = all_yes(rubric);
        assert_eq!(compute_section_score(rubric, &responses, None), 10.0);
        assert_eq!(
            compute_section_score(rubric, &responses, None),
            compute_section_score(rubric, &responses, None)
        );
    }

    #[test]
    fn inactive_items_do_not_count() {
        let rubric = section_rubric(SectionId::Infrastructure);
        let mut b = builder::Builder::new(SectionId::Infrastructure);
        b.answer("inf_dormitories", Answer::Yes, Answer::Yes).unwrap();
        b.answer("inf_changing_rooms", Answer::Yes, Answer::No).unwrap();
        let responses = b.build();
        assert_eq!(
            compute_section_score(rubric, &responses, Some(SchoolType::Boarding)),
            1.5
        );
        assert!(approx(
            compute_section_score(rubric, &responses, Some(SchoolType::Day)),
            0.4
        ));
        assert_eq!(compute_section_score(rubric, &responses, None), 0.0);
    }

    #[test]
    fn fully_answered_sections_reach_their_maxima() {
        for school_type in [SchoolType::Day, SchoolType::Boarding] {
            let mut scores = SectionScores::default();
            for section in SectionId::ALL {
                let rubric = section_rubric(section);
                let total = compute_section_score(rubric, &all_yes(rubric), Some(school_type));
                assert_eq!(total, rubric.max_marks);
                scores.set(section, total);
            }
            let overall = compute_overall_score(&scores);
            assert_eq!(overall, 100.0);
            assert_eq!(format!("{:.2}", overall), "100.00");
        }
    }

    #[test]
    fn overall_is_the_plain_sum() {
        let scores = SectionScores {
            strategic_planning: 7.4,
            operational_management: 21.0,
            teaching_learning: 12.5,
            stakeholders_engagement: 6.0,
            continuous_improvement: 3.6,
            infrastructure: 15.0,
        };
        assert!(approx(compute_overall_score(&scores), 65.5));
        assert_eq!(compute_overall_score(&SectionScores::default()), 0.0);
    }
}
