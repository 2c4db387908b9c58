// Storage of survey drafts, keyed by survey instance id.
//
// The scoring never depends on the store: a failed save is logged and the run goes on.

use std::cell::RefCell;
use std::collections::HashMap;
use std::path::PathBuf;

use crate::evaluation::{io_json::*, *};

pub trait DraftRepository {
    fn load(&self, instance_id: &str) -> SurveyResult<Option<SurveyDocument>>;
    fn save(&self, instance_id: &str, doc: &SurveyDocument) -> SurveyResult<()>;
    fn delete(&self, instance_id: &str) -> SurveyResult<()>;
}

/// One pretty-printed JSON file per instance, in a directory.
pub struct JsonFileDraftRepository {
    root: PathBuf,
}

impl JsonFileDraftRepository {
    pub fn new(root: impl Into<PathBuf>) -> JsonFileDraftRepository {
        JsonFileDraftRepository { root: root.into() }
    }

    fn draft_path(&self, instance_id: &str) -> SurveyResult<PathBuf> {
        check_instance_id(instance_id)?;
        Ok(self.root.join(format!("{}.draft.json", instance_id)))
    }
}

/// Instance ids name files: only ASCII letters, digits, '-' and '_' are accepted.
pub fn check_instance_id(instance_id: &str) -> SurveyResult<()> {
    let valid = !instance_id.is_empty()
        && instance_id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    ensure!(valid, InvalidInstanceIdSnafu { instance_id });
    Ok(())
}

impl DraftRepository for JsonFileDraftRepository {
    fn load(&self, instance_id: &str) -> SurveyResult<Option<SurveyDocument>> {
        let p = self.draft_path(instance_id)?;
        if !p.exists() {
            return Ok(None);
        }
        let path = p.display().to_string();
        let contents = fs::read_to_string(&p).context(DraftIoSnafu { path: &path })?;
        let doc: SurveyDocument =
            serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu { path })?;
        Ok(Some(doc))
    }

    fn save(&self, instance_id: &str, doc: &SurveyDocument) -> SurveyResult<()> {
        let p = self.draft_path(instance_id)?;
        let path = p.display().to_string();
        fs::create_dir_all(&self.root).context(DraftIoSnafu { path: &path })?;
        let js = serde_json::to_string_pretty(doc).context(WritingJsonSnafu {})?;
        fs::write(&p, js).context(DraftIoSnafu { path })?;
        debug!("save: draft {} written to {:?}", instance_id, p);
        Ok(())
    }

    fn delete(&self, instance_id: &str) -> SurveyResult<()> {
        let p = self.draft_path(instance_id)?;
        if p.exists() {
            let path = p.display().to_string();
            fs::remove_file(&p).context(DraftIoSnafu { path })?;
        }
        Ok(())
    }
}

/// Keeps the serialized drafts in memory.
#[derive(Default)]
pub struct MemoryDraftRepository {
    drafts: RefCell<HashMap<String, String>>,
}

impl MemoryDraftRepository {
    pub fn new() -> MemoryDraftRepository {
        MemoryDraftRepository::default()
    }

    /// Stores raw content, valid or not.
    pub fn insert_raw(&self, instance_id: &str, contents: &str) {
        self.drafts
            .borrow_mut()
            .insert(instance_id.to_string(), contents.to_string());
    }
}

impl DraftRepository for MemoryDraftRepository {
    fn load(&self, instance_id: &str) -> SurveyResult<Option<SurveyDocument>> {
        match self.drafts.borrow().get(instance_id) {
            None => Ok(None),
            Some(contents) => {
                let doc: SurveyDocument = serde_json::from_str(contents.as_str())
                    .context(ParsingJsonSnafu { path: instance_id })?;
                Ok(Some(doc))
            }
        }
    }

    fn save(&self, instance_id: &str, doc: &SurveyDocument) -> SurveyResult<()> {
        let js = serde_json::to_string(doc).context(WritingJsonSnafu {})?;
        self.insert_raw(instance_id, &js);
        Ok(())
    }

    fn delete(&self, instance_id: &str) -> SurveyResult<()> {
        self.drafts.borrow_mut().remove(instance_id);
        Ok(())
    }
}

/// Loads the draft of an instance into a survey.
///
/// Falls back to a new survey when there is no draft, or when it cannot be read, is empty,
/// was made against another rubric, or does not fit the rubric. An explicit school type
/// replaces the one of the draft.
pub fn restore_survey(
    repo: &dyn DraftRepository,
    instance_id: &str,
    school_type: Option<SchoolType>,
) -> Survey {
    let doc = match repo.load(instance_id) {
        Ok(Some(doc)) => doc,
        Ok(None) => {
            info!("restore_survey: no draft for {}, starting a new survey", instance_id);
            return Survey::new(school_type);
        }
        Err(e) => {
            warn!(
                "restore_survey: cannot read the draft of {}: {}, starting a new survey",
                instance_id, e
            );
            return Survey::new(school_type);
        }
    };

    let fingerprint = rubric_fingerprint();
    if doc.rubric_fingerprint.as_deref() != Some(fingerprint.as_str()) {
        warn!(
            "restore_survey: the draft of {} was made with rubric {:?}, current is {}: starting a new survey",
            instance_id, doc.rubric_version, RUBRIC_VERSION
        );
        return Survey::new(school_type);
    }

    match survey_from_document(&doc, instance_id) {
        Ok(survey) if survey.is_empty() => {
            info!("restore_survey: the draft of {} is empty", instance_id);
            Survey::new(school_type.or_else(|| survey.school_type()))
        }
        Ok(mut survey) => {
            if school_type.is_some() {
                survey.set_school_type(school_type);
            }
            info!(
                "restore_survey: restored {} (overall {})",
                instance_id,
                format_marks(survey.overall())
            );
            survey
        }
        Err(e) => {
            warn!(
                "restore_survey: the draft of {} is invalid: {}, starting a new survey",
                instance_id, e
            );
            Survey::new(school_type)
        }
    }
}

/// Saves the survey as the draft of the instance. Failures are only logged.
pub fn store_survey(repo: &dyn DraftRepository, instance_id: &str, survey: &Survey) -> bool {
    match repo.save(instance_id, &document_from_survey(survey, instance_id)) {
        Ok(()) => true,
        Err(e) => {
            warn!("store_survey: could not save the draft of {}: {}", instance_id, e);
            false
        }
    }
}
