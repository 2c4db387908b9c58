// ********* Rubric catalog ***********
//
// The static definition of the six sections. Marks of the active items of every
// section sum exactly to the section maximum for either school type.
// Any change to this file must bump RUBRIC_VERSION: drafts are stamped with the
// fingerprint of the catalog they were made against.

use log::debug;

use crate::config::SchoolScope::{All, BoardingOnly, DayOnly};
use crate::config::*;

pub const RUBRIC_VERSION: &str = "tvtc-2024.2";

const fn item(
    id: &'static str,
    label: &'static str,
    marks_allocated: f64,
    availability_applicable: bool,
    quality_applicable: bool,
    school_scope: SchoolScope,
) -> EvaluationItem {
    EvaluationItem {
        id,
        label,
        marks_allocated,
        availability_applicable,
        quality_applicable,
        school_scope,
    }
}

// ---- Strategic planning (10) ----

const SP_DIRECTION: &[EvaluationItem] = &[
    item(
        "sp_vision_mission_documented",
        "Vision, mission and core values are documented and displayed",
        1.0,
        true,
        true,
        All,
    ),
    // Evidence of consultation is a yes/no fact: there is no quality judgement.
    item(
        "sp_vision_stakeholder_input",
        "Stakeholders were consulted when the vision and mission were developed",
        1.0,
        true,
        false,
        All,
    ),
    // The alignment is always assessed on the statement itself.
    item(
        "sp_alignment_national_policy",
        "Vision and mission are aligned with the national TVET policy",
        1.0,
        false,
        true,
        All,
    ),
];

const SP_PLANNING: &[EvaluationItem] = &[
    item(
        "sp_strategic_plan",
        "Approved strategic plan covering at least three years",
        1.5,
        true,
        true,
        All,
    ),
    item(
        "sp_annual_work_plan",
        "Annual work plan derived from the strategic plan",
        1.5,
        true,
        true,
        All,
    ),
    item(
        "sp_swot_analysis",
        "Situational (SWOT) analysis informing the strategic plan",
        1.0,
        true,
        true,
        All,
    ),
    item(
        "sp_performance_indicators",
        "Key performance indicators set for each strategic objective",
        1.0,
        true,
        true,
        All,
    ),
    item(
        "sp_budget_alignment",
        "Budget allocations follow the strategic priorities",
        1.0,
        true,
        true,
        All,
    ),
    item(
        "sp_plan_review",
        "Implementation of the strategic plan is reviewed periodically",
        1.0,
        true,
        true,
        All,
    ),
];

const STRATEGIC_PLANNING_GROUPS: &[ItemGroup] = &[
    ItemGroup {
        id: "direction",
        title: "Vision and direction",
        items: SP_DIRECTION,
    },
    ItemGroup {
        id: "planning",
        title: "Strategic and operational plans",
        items: SP_PLANNING,
    },
];

// ---- Operational management (30) ----

const OM_GOVERNANCE: &[EvaluationItem] = &[
    item(
        "om_governing_council",
        "Governing council constituted according to the regulations",
        1.5,
        true,
        true,
        All,
    ),
    item(
        "om_council_minutes",
        "Minutes of governing council meetings",
        1.0,
        true,
        true,
        All,
    ),
    item(
        "om_organisation_chart",
        "Organisational structure chart",
        1.0,
        true,
        false,
        All,
    ),
    item(
        "om_job_descriptions",
        "Job descriptions for all staff positions",
        1.0,
        true,
        true,
        All,
    ),
    item(
        "om_policy_manuals",
        "Institutional policy manuals (human resources, finance, procurement)",
        1.5,
        true,
        true,
        All,
    ),
];

const OM_HUMAN_RESOURCES: &[EvaluationItem] = &[
    item(
        "om_staff_establishment",
        "Staff establishment meets the trainer to trainee ratio",
        1.5,
        true,
        true,
        All,
    ),
    item(
        "om_staff_qualification_records",
        "Records of staff qualifications and registration",
        1.0,
        true,
        true,
        All,
    ),
    item(
        "om_performance_appraisal",
        "Staff performance appraisal system in use",
        1.5,
        true,
        true,
        All,
    ),
    item(
        "om_professional_development",
        "Staff professional development plan",
        1.0,
        true,
        true,
        All,
    ),
    item(
        "om_duty_rosters",
        "Staff duty rosters",
        1.0,
        true,
        false,
        All,
    ),
];

const OM_FINANCE: &[EvaluationItem] = &[
    item(
        "om_approved_budget",
        "Approved annual budget",
        1.5,
        true,
        true,
        All,
    ),
    item(
        "om_books_of_accounts",
        "Books of accounts kept up to date",
        1.5,
        true,
        true,
        All,
    ),
    item(
        "om_audited_statements",
        "Audited financial statements for the last financial year",
        1.5,
        true,
        true,
        All,
    ),
    item(
        "om_fee_receipting",
        "Fee collection and receipting system",
        1.0,
        true,
        true,
        All,
    ),
    item(
        "om_procurement_records",
        "Procurement committee and procurement records",
        1.0,
        true,
        true,
        All,
    ),
    item(
        "om_asset_register",
        "Asset register",
        1.0,
        true,
        true,
        All,
    ),
];

const OM_RECORDS: &[EvaluationItem] = &[
    item(
        "om_admission_register",
        "Trainee admission register",
        1.0,
        true,
        true,
        All,
    ),
    item(
        "om_attendance_records",
        "Trainee attendance records",
        1.0,
        true,
        true,
        All,
    ),
    item(
        "om_assessment_records",
        "Examination and assessment records",
        1.5,
        true,
        true,
        All,
    ),
    item(
        "om_information_system",
        "Management information system in use",
        1.0,
        true,
        true,
        All,
    ),
    item(
        "om_records_storage",
        "Secure storage of records",
        1.0,
        true,
        true,
        All,
    ),
];

const OM_TRAINEE_WELFARE: &[EvaluationItem] = &[
    item(
        "om_guidance_counselling",
        "Guidance and counselling services",
        1.0,
        true,
        true,
        All,
    ),
    item(
        "om_trainee_council",
        "Trainee council and leadership structures",
        1.0,
        true,
        true,
        All,
    ),
    item(
        "om_health_first_aid",
        "Health services and first aid provision",
        1.0,
        true,
        true,
        All,
    ),
    item(
        "om_changing_rooms_schedule",
        "Management schedule for the changing rooms",
        1.0,
        true,
        true,
        DayOnly,
    ),
    item(
        "om_day_meals_transport",
        "Meal and transport arrangements for day trainees",
        1.0,
        true,
        true,
        DayOnly,
    ),
    item(
        "om_dormitory_allocation",
        "Dormitory allocation register",
        1.0,
        true,
        true,
        BoardingOnly,
    ),
    item(
        "om_boarding_duty_roster",
        "Boarding master and matron duty roster",
        1.0,
        true,
        true,
        BoardingOnly,
    ),
];

const OPERATIONAL_MANAGEMENT_GROUPS: &[ItemGroup] = &[
    ItemGroup {
        id: "governance",
        title: "Governance",
        items: OM_GOVERNANCE,
    },
    ItemGroup {
        id: "human_resources",
        title: "Human resources",
        items: OM_HUMAN_RESOURCES,
    },
    ItemGroup {
        id: "finance",
        title: "Finance and procurement",
        items: OM_FINANCE,
    },
    ItemGroup {
        id: "records",
        title: "Records management",
        items: OM_RECORDS,
    },
    ItemGroup {
        id: "trainee_welfare",
        title: "Trainee welfare",
        items: OM_TRAINEE_WELFARE,
    },
];

// ---- Teaching and learning (20) ----

const TL_CURRICULUM: &[EvaluationItem] = &[
    item(
        "tl_approved_curriculum",
        "Approved curriculum for every programme offered",
        1.5,
        true,
        true,
        All,
    ),
    item(
        "tl_schemes_of_work",
        "Schemes of work",
        1.5,
        true,
        true,
        All,
    ),
    item(
        "tl_session_plans",
        "Session (lesson) plans",
        1.5,
        true,
        true,
        All,
    ),
    item(
        "tl_master_timetable",
        "Master and class timetables",
        1.0,
        true,
        true,
        All,
    ),
    item(
        "tl_records_of_work",
        "Records of work covered",
        1.0,
        true,
        true,
        All,
    ),
];

const TL_DELIVERY: &[EvaluationItem] = &[
    item(
        "tl_practical_sessions",
        "Practical sessions conducted as timetabled",
        2.0,
        true,
        true,
        All,
    ),
    item(
        "tl_competent_trainers",
        "Trainers hold the required technical and pedagogical qualifications",
        1.5,
        true,
        true,
        All,
    ),
    item(
        "tl_learning_materials",
        "Training and learning materials",
        1.5,
        true,
        true,
        All,
    ),
    item(
        "tl_industrial_attachment",
        "Industrial attachment programme",
        2.0,
        true,
        true,
        All,
    ),
    item(
        "tl_ict_integration",
        "ICT integrated in training delivery",
        1.0,
        true,
        true,
        All,
    ),
];

const TL_ASSESSMENT: &[EvaluationItem] = &[
    item(
        "tl_assessment_tools",
        "Competency assessment tools",
        1.5,
        true,
        true,
        All,
    ),
    item(
        "tl_portfolio_of_evidence",
        "Trainee portfolios of evidence",
        1.5,
        true,
        true,
        All,
    ),
    item(
        "tl_internal_verification",
        "Internal verification of assessments",
        1.0,
        true,
        true,
        All,
    ),
    item(
        "tl_results_analysis",
        "Analysis of assessment results",
        1.0,
        true,
        true,
        All,
    ),
    item(
        "tl_trainee_feedback",
        "Trainee feedback on training delivery",
        0.5,
        true,
        false,
        All,
    ),
];

const TEACHING_LEARNING_GROUPS: &[ItemGroup] = &[
    ItemGroup {
        id: "curriculum",
        title: "Curriculum and planning",
        items: TL_CURRICULUM,
    },
    ItemGroup {
        id: "delivery",
        title: "Training delivery",
        items: TL_DELIVERY,
    },
    ItemGroup {
        id: "assessment",
        title: "Assessment",
        items: TL_ASSESSMENT,
    },
];

// ---- Stakeholders engagement (10) ----

const SE_INDUSTRY: &[EvaluationItem] = &[
    item(
        "se_industry_linkages",
        "Memoranda of understanding with industry partners",
        1.5,
        true,
        true,
        All,
    ),
    item(
        "se_advisory_committee",
        "Industry advisory committee",
        1.5,
        true,
        true,
        All,
    ),
    item(
        "se_partnership_agreements",
        "Partnership agreements with other institutions",
        1.0,
        true,
        true,
        All,
    ),
    item(
        "se_alumni_tracking",
        "Tracer studies of graduates",
        1.0,
        true,
        true,
        All,
    ),
];

const SE_COMMUNITY: &[EvaluationItem] = &[
    item(
        "se_parents_engagement",
        "Engagement of parents and guardians",
        1.0,
        true,
        true,
        All,
    ),
    item(
        "se_community_outreach",
        "Community outreach activities",
        1.0,
        true,
        true,
        All,
    ),
    item(
        "se_stakeholder_feedback",
        "Mechanism for collecting stakeholder feedback",
        1.0,
        true,
        true,
        All,
    ),
    item(
        "se_communication_channels",
        "Communication channels with stakeholders",
        1.0,
        true,
        true,
        All,
    ),
    item(
        "se_open_days",
        "Open days, exhibitions and joint events",
        1.0,
        true,
        false,
        All,
    ),
];

const STAKEHOLDERS_ENGAGEMENT_GROUPS: &[ItemGroup] = &[
    ItemGroup {
        id: "industry",
        title: "Industry and partners",
        items: SE_INDUSTRY,
    },
    ItemGroup {
        id: "community",
        title: "Parents and community",
        items: SE_COMMUNITY,
    },
];

// ---- Continuous improvement (10) ----

const CI_QUALITY_ASSURANCE: &[EvaluationItem] = &[
    item(
        "ci_quality_policy",
        "Quality assurance policy",
        1.0,
        true,
        true,
        All,
    ),
    item(
        "ci_self_assessment",
        "Institutional self-assessment report",
        1.5,
        true,
        true,
        All,
    ),
    item(
        "ci_improvement_plan",
        "Improvement plan addressing the self-assessment findings",
        1.5,
        true,
        true,
        All,
    ),
    item(
        "ci_internal_audits",
        "Internal quality audits",
        1.0,
        true,
        true,
        All,
    ),
    item(
        "ci_corrective_actions",
        "Corrective actions tracked to closure",
        1.0,
        true,
        true,
        All,
    ),
];

const CI_MONITORING: &[EvaluationItem] = &[
    item(
        "ci_monitoring_evaluation",
        "Monitoring and evaluation framework",
        1.0,
        true,
        true,
        All,
    ),
    item(
        "ci_innovation_projects",
        "Innovation and income generating projects",
        1.0,
        true,
        true,
        All,
    ),
    item(
        "ci_benchmarking",
        "Benchmarking against other institutions",
        1.0,
        true,
        true,
        All,
    ),
    item(
        "ci_customer_satisfaction",
        "Customer satisfaction surveys",
        1.0,
        true,
        true,
        All,
    ),
];

const CONTINUOUS_IMPROVEMENT_GROUPS: &[ItemGroup] = &[
    ItemGroup {
        id: "quality_assurance",
        title: "Quality assurance",
        items: CI_QUALITY_ASSURANCE,
    },
    ItemGroup {
        id: "monitoring",
        title: "Monitoring and innovation",
        items: CI_MONITORING,
    },
];

// ---- Infrastructure (20) ----

const INF_TRAINING_FACILITIES: &[EvaluationItem] = &[
    item(
        "inf_workshops",
        "Workshops for every trade offered",
        2.0,
        true,
        true,
        All,
    ),
    item(
        "inf_classrooms",
        "Classrooms",
        1.5,
        true,
        true,
        All,
    ),
    item(
        "inf_library",
        "Library or resource centre",
        1.5,
        true,
        true,
        All,
    ),
    item(
        "inf_computer_lab",
        "Computer laboratory",
        1.5,
        true,
        true,
        All,
    ),
    item(
        "inf_tools_equipment",
        "Tools and equipment matching the curriculum",
        2.0,
        true,
        true,
        All,
    ),
    item(
        "inf_staff_offices",
        "Staff offices and staffroom",
        1.0,
        true,
        true,
        All,
    ),
];

const INF_UTILITIES_SAFETY: &[EvaluationItem] = &[
    item(
        "inf_water_supply",
        "Reliable water supply",
        1.0,
        true,
        false,
        All,
    ),
    item(
        "inf_power_supply",
        "Reliable power supply",
        1.0,
        true,
        false,
        All,
    ),
    item(
        "inf_sanitation",
        "Sanitation facilities",
        1.5,
        true,
        true,
        All,
    ),
    item(
        "inf_fire_safety",
        "Fire safety equipment and assembly points",
        1.5,
        true,
        true,
        All,
    ),
    item(
        "inf_disability_access",
        "Access for persons with disabilities",
        1.0,
        true,
        true,
        All,
    ),
    item(
        "inf_maintenance_plan",
        "Maintenance plan for buildings and equipment",
        1.0,
        true,
        true,
        All,
    ),
    item(
        "inf_dining_hall",
        "Dining hall and kitchen",
        1.5,
        true,
        true,
        All,
    ),
];

const INF_TRAINEE_FACILITIES: &[EvaluationItem] = &[
    item(
        "inf_changing_rooms",
        "Changing rooms",
        1.0,
        true,
        true,
        DayOnly,
    ),
    item(
        "inf_lockers",
        "Lockers for day trainees",
        1.0,
        true,
        true,
        DayOnly,
    ),
    item(
        "inf_dormitories",
        "Dormitories",
        1.5,
        true,
        true,
        BoardingOnly,
    ),
    item(
        "inf_boarding_sanitation",
        "Sanitation facilities in the boarding area",
        0.5,
        true,
        true,
        BoardingOnly,
    ),
];

const INFRASTRUCTURE_GROUPS: &[ItemGroup] = &[
    ItemGroup {
        id: "training_facilities",
        title: "Training facilities",
        items: INF_TRAINING_FACILITIES,
    },
    ItemGroup {
        id: "utilities_safety",
        title: "Utilities and safety",
        items: INF_UTILITIES_SAFETY,
    },
    ItemGroup {
        id: "trainee_facilities",
        title: "Trainee facilities",
        items: INF_TRAINEE_FACILITIES,
    },
];

/// The six sections, in the order of `SectionId::ALL`.
pub static RUBRIC: [SectionRubric; 6] = [
    SectionRubric {
        id: SectionId::StrategicPlanning,
        title: "Strategic planning",
        max_marks: 10.0,
        groups: STRATEGIC_PLANNING_GROUPS,
    },
    SectionRubric {
        id: SectionId::OperationalManagement,
        title: "Operational management",
        max_marks: 30.0,
        groups: OPERATIONAL_MANAGEMENT_GROUPS,
    },
    SectionRubric {
        id: SectionId::TeachingLearning,
        title: "Teaching and learning",
        max_marks: 20.0,
        groups: TEACHING_LEARNING_GROUPS,
    },
    SectionRubric {
        id: SectionId::StakeholdersEngagement,
        title: "Stakeholders engagement",
        max_marks: 10.0,
        groups: STAKEHOLDERS_ENGAGEMENT_GROUPS,
    },
    SectionRubric {
        id: SectionId::ContinuousImprovement,
        title: "Continuous improvement",
        max_marks: 10.0,
        groups: CONTINUOUS_IMPROVEMENT_GROUPS,
    },
    SectionRubric {
        id: SectionId::Infrastructure,
        title: "Infrastructure",
        max_marks: 20.0,
        groups: INFRASTRUCTURE_GROUPS,
    },
];

pub fn section_rubric(section: SectionId) -> &'static SectionRubric {
    &RUBRIC[section.index()]
}

/// The items of a section that count for the given school type, in catalog order.
///
/// When the school type is not known, only the items common to both types are returned.
pub fn get_section_items(
    section: SectionId,
    school_type: Option<SchoolType>,
) -> Vec<&'static EvaluationItem> {
    let items: Vec<&'static EvaluationItem> =
        section_rubric(section).active_items(school_type).collect();
    debug!(
        "get_section_items: section: {} school_type: {:?} items: {}",
        section,
        school_type,
        items.len()
    );
    items
}

/// A digest of everything in the catalog that influences scoring.
pub fn rubric_fingerprint() -> String {
    let mut lines: Vec<String> = vec![RUBRIC_VERSION.to_string()];
    for section in RUBRIC.iter() {
        lines.push(format!("{}|{:.4}", section.id.key(), section.max_marks));
        for group in section.groups.iter() {
            lines.push(format!("  {}", group.id));
            for it in group.items.iter() {
                lines.push(format!(
                    "    {}|{:.4}|{}|{}|{}",
                    it.id,
                    it.marks_allocated,
                    it.availability_applicable,
                    it.quality_applicable,
                    it.school_scope.as_str()
                ));
            }
        }
    }
    sha256::digest(lines.join("\n").as_str())
}
