use log::{debug, info, warn};

use snafu::{prelude::*, Snafu};
use tvtc_scoring::*;

use std::fs;
use std::path::{Path, PathBuf};

use calamine::{open_workbook, Reader, Xlsx};

use serde_json::json;
use serde_json::Value as JSValue;
use text_diff::print_diff;

use crate::args::Args;
use crate::evaluation::config_reader::*;
use crate::evaluation::draft_store::*;
use crate::evaluation::io_common::*;

pub mod config_reader;
pub mod draft_store;
mod io_common;
mod io_json;
mod io_xlsx;

#[derive(Debug, Snafu)]
pub enum SurveyError {
    #[snafu(display("Error opening file {path}"))]
    OpeningExcel {
        source: calamine::XlsxError,
        path: String,
    },
    #[snafu(display("No worksheet or no header row in {path}"))]
    EmptyExcel { path: String },
    #[snafu(display("{path} has several worksheets, the worksheet name must be provided"))]
    TooManyWorksheets { path: String },
    #[snafu(display("{path}: missing column {column:?} in the header row"))]
    ExcelMissingColumn { path: String, column: String },
    #[snafu(display("{path}: the section filled by a spreadsheet must be provided"))]
    MissingSection { path: String },
    #[snafu(display("Error opening file {path}"))]
    OpeningJson {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error parsing JSON in {path}"))]
    ParsingJson {
        source: serde_json::Error,
        path: String,
    },
    #[snafu(display("Error writing JSON"))]
    WritingJson { source: serde_json::Error },
    #[snafu(display("Error writing the summary to {path}"))]
    WritingOutput {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error accessing the draft {path}"))]
    DraftIo {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Invalid survey instance id {instance_id:?}"))]
    InvalidInstanceId { instance_id: String },
    #[snafu(display("Unknown section {name:?}"))]
    UnknownSection { name: String },
    #[snafu(display("Unknown school type {name:?}: expected day or boarding"))]
    UnknownSchoolType { name: String },
    #[snafu(display("Unknown input provider {provider:?}: expected json or xlsx"))]
    UnknownProvider { provider: String },
    #[snafu(display("Scoring error: {source}"))]
    Scoring { source: ScoringErrors },

    #[snafu(whatever, display("{message}"))]
    Whatever {
        message: String,
        #[snafu(source(from(Box<dyn std::error::Error>, Some)))]
        source: Option<Box<dyn std::error::Error>>,
    },
}

pub type SurveyResult<T> = Result<T, SurveyError>;

fn read_response_data(source: &ResponseSource) -> SurveyResult<ResponseBatch> {
    info!(
        "Attempting to read {} response file {:?}",
        source.provider, source.file_path
    );
    match source.provider.as_str() {
        "json" => io_json::read_json_responses(&source.file_path),
        "xlsx" => io_xlsx::read_xlsx_responses(&source.file_path, source),
        x => UnknownProviderSnafu { provider: x }.fail(),
    }
}

/// Records the responses and overviews of a batch into the survey.
fn apply_batch(survey: &mut Survey, batch: &ResponseBatch) -> SurveyResult<()> {
    for pr in batch.responses.iter() {
        let update = survey
            .record_response(pr.section, &pr.item_id, pr.to_response())
            .context(ScoringSnafu {})?;
        debug!("apply_batch: {}: {:?}", pr.origin, update);
    }
    for (section, overview) in batch.overviews.iter() {
        survey.set_overview(*section, overview.clone());
    }
    Ok(())
}

fn overview_js(overview: &SectionOverview) -> JSValue {
    json!({
        "strength": overview.strength,
        "weakness": overview.weakness,
        "improvement": overview.improvement,
    })
}

fn section_js(state: &SectionState, school_type: Option<SchoolType>) -> JSValue {
    let rubric = state.rubric();
    let items: Vec<JSValue> = rubric
        .active_items(school_type)
        .map(|item| {
            let r = state.responses().get_or_unanswered(item.id);
            json!({
                "item": item.id,
                "allocated": format_marks(item.marks_allocated),
                "obtained": format_marks(state.item_score(item)),
                "availability": r.availability.label(),
                "quality": r.quality.label(),
            })
        })
        .collect();
    json!({
        "section": state.id.key(),
        "title": rubric.title,
        "maxMarks": format_marks(rubric.max_marks),
        "total": format_marks(state.total()),
        "complete": state.is_complete(school_type),
        "items": items,
        "overview": overview_js(&state.overview),
    })
}

pub fn build_summary_js(settings: &OutputSettings, survey: &Survey, status: &str) -> JSValue {
    let c = OutputConfig {
        centre: settings.centre_name.clone(),
        evaluator: settings.evaluator_name.clone(),
        date: settings.evaluation_date.clone(),
        school_type: survey.school_type().map(|st| st.as_str().to_string()),
        rubric_version: RUBRIC_VERSION.to_string(),
    };
    let sections: Vec<JSValue> = survey
        .sections()
        .iter()
        .map(|s| section_js(s, survey.school_type()))
        .collect();
    json!({
        "config": c,
        "sections": sections,
        "overall": format_marks(survey.overall()),
        "status": status,
    })
}

/// The whole catalog, for display.
pub fn rubric_js() -> JSValue {
    let sections: Vec<JSValue> = RUBRIC
        .iter()
        .map(|section| {
            let groups: Vec<JSValue> = section
                .groups
                .iter()
                .map(|g| {
                    let items: Vec<JSValue> = g
                        .items
                        .iter()
                        .map(|it| {
                            json!({
                                "item": it.id,
                                "label": it.label,
                                "marks": format_marks(it.marks_allocated),
                                "availability": it.availability_applicable,
                                "quality": it.quality_applicable,
                                "schoolType": it.school_scope.as_str(),
                            })
                        })
                        .collect();
                    json!({"group": g.id, "title": g.title, "items": items})
                })
                .collect();
            json!({
                "section": section.id.key(),
                "title": section.title,
                "maxMarks": format_marks(section.max_marks),
                "groups": groups,
            })
        })
        .collect();
    json!({
        "rubricVersion": RUBRIC_VERSION,
        "fingerprint": rubric_fingerprint(),
        "sections": sections,
    })
}

/// Command line values take precedence over the configuration. Relative paths of the
/// configuration are resolved against its directory.
fn merge_args(mut config: SurveyConfig, root: &Path, args: &Args) -> SurveyResult<SurveyConfig> {
    let resolve = |p: &str| root.join(p).display().to_string();
    for source in config.response_sources.iter_mut() {
        source.file_path = resolve(&source.file_path);
    }
    if let Some(d) = config.draft.as_mut() {
        d.directory = resolve(&d.directory);
    }
    if let Some(o) = config.output_settings.output_directory.clone() {
        config.output_settings.output_directory = Some(resolve(&o));
    }

    if let Some(input) = &args.input {
        config.response_sources = vec![ResponseSource {
            provider: args.input_type.clone().unwrap_or_else(|| "json".to_string()),
            file_path: input.clone(),
            section: args.section.clone(),
            excel_worksheet_name: args.excel_worksheet_name.clone(),
        }];
    }
    if args.school_type.is_some() {
        config.school_type = args.school_type.clone();
    }
    match (&args.draft_dir, &args.instance_id) {
        (Some(directory), Some(instance_id)) => {
            config.draft = Some(DraftSettings {
                directory: directory.clone(),
                instance_id: instance_id.clone(),
            });
        }
        (None, Some(instance_id)) => match config.draft.as_mut() {
            Some(d) => d.instance_id = instance_id.clone(),
            None => whatever!("--instance-id requires --draft-dir or a draft block in the configuration"),
        },
        (Some(directory), None) => match config.draft.as_mut() {
            Some(d) => d.directory = directory.clone(),
            None => whatever!("--draft-dir requires --instance-id"),
        },
        (None, None) => {}
    }
    // Checked before scoring: the draft store only logs its failures.
    if let Some(d) = &config.draft {
        check_instance_id(&d.instance_id)?;
    }
    Ok(config)
}

fn output_path(args: &Args, config: &SurveyConfig) -> Option<String> {
    if let Some(out) = &args.out {
        return Some(out.clone());
    }
    config.output_settings.output_directory.as_ref().map(|dir| {
        let name = config
            .draft
            .as_ref()
            .map(|d| d.instance_id.clone())
            .unwrap_or_else(|| "evaluation".to_string());
        PathBuf::from(dir)
            .join(format!("{}_summary.json", name))
            .display()
            .to_string()
    })
}

fn write_output(out: Option<String>, pretty_js: &str) -> SurveyResult<()> {
    match out.as_deref() {
        None | Some("stdout") => {
            println!("{}", pretty_js);
        }
        Some(path) => {
            if let Some(parent) = Path::new(path).parent() {
                fs::create_dir_all(parent).context(WritingOutputSnafu { path })?;
            }
            fs::write(path, pretty_js).context(WritingOutputSnafu { path })?;
            info!("Summary written to {}", path);
        }
    }
    Ok(())
}

/// Compares the summary with a reference summary. Prints the differences if any.
fn check_reference(summary: &JSValue, reference_path: &str) -> SurveyResult<()> {
    let summary_ref = read_summary(reference_path)?;
    let pretty_js_summary_ref =
        serde_json::to_string_pretty(&summary_ref).context(WritingJsonSnafu {})?;
    let pretty_js_stats = serde_json::to_string_pretty(summary).context(WritingJsonSnafu {})?;
    if pretty_js_summary_ref != pretty_js_stats {
        warn!("Found differences with the reference summary");
        print_diff(
            pretty_js_summary_ref.as_str(),
            pretty_js_stats.as_str(),
            "\n",
        );
        whatever!("Difference detected between calculated summary and reference summary")
    }
    Ok(())
}

/// Scores one evaluation. Returns the summary.
pub fn run_evaluation(args: &Args) -> SurveyResult<JSValue> {
    let (config, root) = match &args.config {
        Some(config_path) => {
            let config = read_config(config_path)?;
            let root = Path::new(config_path)
                .parent()
                .map(|p| p.to_path_buf())
                .unwrap_or_default();
            (config, root)
        }
        None => (SurveyConfig::default(), PathBuf::new()),
    };
    let config = merge_args(config, &root, args)?;
    info!("config: {:?}", config);

    if config.response_sources.is_empty() && config.draft.is_none() {
        whatever!("Nothing to score: provide --input, --config or a draft to resume")
    }

    let mut batches: Vec<ResponseBatch> = Vec::new();
    for source in config.response_sources.iter() {
        batches.push(read_response_data(source)?);
    }

    let explicit_school_type = match config.school_type.as_deref() {
        Some(s) => Some(parse_school_type(s)?),
        None => None,
    };
    let school_type = explicit_school_type.or_else(|| batches.iter().find_map(|b| b.school_type));

    let repo: Option<(JsonFileDraftRepository, String)> = config.draft.as_ref().map(|d| {
        (
            JsonFileDraftRepository::new(d.directory.clone()),
            d.instance_id.clone(),
        )
    });
    let mut survey = match &repo {
        Some((r, instance_id)) => restore_survey(r, instance_id, school_type),
        None => Survey::new(school_type),
    };

    for batch in batches.iter() {
        apply_batch(&mut survey, batch)?;
    }
    if survey.school_type().is_none() {
        warn!("No school type selected: day and boarding specific items are not counted");
    }
    for state in survey.sections() {
        info!(
            "{:<24} {:>6} / {}",
            state.rubric().title,
            format_marks(state.total()),
            format_marks(state.rubric().max_marks)
        );
    }
    info!("Overall: {}", format_marks(survey.overall()));

    let status = if args.submit {
        let submitted = match survey.finalize() {
            Ok(submitted) => submitted,
            Err(e) => {
                // The answers of this run are kept for the next attempt.
                if let Some((r, instance_id)) = &repo {
                    store_survey(r, instance_id, &survey);
                }
                return Err(e).context(ScoringSnafu {});
            }
        };
        info!(
            "Survey submitted: overall {} ({} centre)",
            format_marks(submitted.overall),
            submitted.school_type.as_str()
        );
        if let Some((r, instance_id)) = &repo {
            if let Err(e) = r.delete(instance_id) {
                warn!("Could not delete the draft of {}: {}", instance_id, e);
            }
        }
        "submitted"
    } else {
        if let Some((r, instance_id)) = &repo {
            store_survey(r, instance_id, &survey);
        }
        "draft"
    };

    let summary = build_summary_js(&config.output_settings, &survey, status);
    let pretty_js = serde_json::to_string_pretty(&summary).context(WritingJsonSnafu {})?;
    write_output(output_path(args, &config), &pretty_js)?;

    if let Some(reference_path) = &args.reference {
        check_reference(&summary, reference_path)?;
    }
    Ok(summary)
}

pub fn print_rubric() -> SurveyResult<()> {
    let pretty_js = serde_json::to_string_pretty(&rubric_js()).context(WritingJsonSnafu {})?;
    println!("{}", pretty_js);
    Ok(())
}
