//! # Project Records
//!
//! Simple job log for field work: who the client is, when the job runs, notes,
//! and a status. The status is derived from the dates every time records are
//! loaded, except that a project marked `completed` stays completed.
//!
//! ## Structure
//!
//! ```text
//! ProjectList
//! └── projects: Vec<Project> (newest first)
//!     ├── id, name, client, notes
//!     ├── start_date, end_date (date only)
//!     └── status: pending | in-progress | completed | delayed
//! ```
//!
//! Records serialize to the camelCase JSON shape used by backups:
//!
//! ```json
//! {
//!   "id": "2",
//!   "name": "Res. Johnson - Wiring",
//!   "client": "Mr. Johnson",
//!   "startDate": "2024-03-01",
//!   "endDate": "2024-03-08",
//!   "notes": "Waiting for architectural plans.",
//!   "status": "in-progress"
//! }
//! ```
//!
//! ## Example
//!
//! ```rust
//! use chrono::NaiveDate;
//! use volt_core::project::{ProjectDraft, ProjectList, ProjectStatus};
//!
//! let today = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
//! let mut list = ProjectList::default();
//!
//! let draft = ProjectDraft::new(
//!     "Panel upgrade",
//!     "IndusCorp",
//!     NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
//!     NaiveDate::from_ymd_opt(2024, 3, 20).unwrap(),
//! );
//! let id = list.create(draft, today).unwrap();
//!
//! assert_eq!(list.get(&id).unwrap().status, ProjectStatus::InProgress);
//! ```

use chrono::{Days, Local, NaiveDate};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{CalcError, CalcResult};

/// Days between a defaulted start date and end date
const DEFAULT_DURATION_DAYS: u64 = 7;

/// Effective state of a project
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum ProjectStatus {
    /// Start date is in the future
    #[default]
    Pending,
    /// Today is within the scheduled dates
    InProgress,
    /// Manually closed; never re-derived
    Completed,
    /// End date has passed without completion
    Delayed,
}

impl ProjectStatus {
    /// All statuses for UI selection
    pub const ALL: [ProjectStatus; 4] = [
        ProjectStatus::Pending,
        ProjectStatus::InProgress,
        ProjectStatus::Completed,
        ProjectStatus::Delayed,
    ];

    /// Wire/storage name
    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectStatus::Pending => "pending",
            ProjectStatus::InProgress => "in-progress",
            ProjectStatus::Completed => "completed",
            ProjectStatus::Delayed => "delayed",
        }
    }

    /// Lenient parse of a stored status; unknown values are `None`
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim().to_lowercase();
        ProjectStatus::ALL.into_iter().find(|status| status.as_str() == s)
    }
}

impl std::fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

/// Classify a project by its dates.
///
/// `completed` always wins. Otherwise `today` before `start` is pending,
/// after `end` is delayed, and anything in between (inclusive) is in progress.
///
/// # Example
///
/// ```rust
/// use chrono::NaiveDate;
/// use volt_core::project::{derive_status, ProjectStatus};
///
/// let d = |day| NaiveDate::from_ymd_opt(2024, 5, day).unwrap();
/// let status = |stored| derive_status(d(1), d(10), stored, d(11));
/// assert_eq!(status(ProjectStatus::Pending), ProjectStatus::Delayed);
/// assert_eq!(status(ProjectStatus::Completed), ProjectStatus::Completed);
/// ```
pub fn derive_status(
    start: NaiveDate,
    end: NaiveDate,
    stored: ProjectStatus,
    today: NaiveDate,
) -> ProjectStatus {
    if stored == ProjectStatus::Completed {
        return ProjectStatus::Completed;
    }
    if today < start {
        ProjectStatus::Pending
    } else if today > end {
        ProjectStatus::Delayed
    } else {
        ProjectStatus::InProgress
    }
}

/// [`derive_status`] against the local calendar date
pub fn derive_status_today(
    start: NaiveDate,
    end: NaiveDate,
    stored: ProjectStatus,
) -> ProjectStatus {
    derive_status(start, end, stored, today())
}

/// Current local date (no time of day)
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

fn default_end(start: NaiveDate) -> NaiveDate {
    start
        .checked_add_days(Days::new(DEFAULT_DURATION_DAYS))
        .unwrap_or(start)
}

/// A project record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub name: String,
    pub client: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default)]
    pub notes: String,
    pub status: ProjectStatus,
}

impl Project {
    /// Re-derive the status for `today`
    pub fn refresh_status(&mut self, today: NaiveDate) {
        self.status = derive_status(self.start_date, self.end_date, self.status, today);
    }

    /// Case-insensitive match on name or client
    pub fn matches(&self, query: &str) -> bool {
        let query = query.to_lowercase();
        self.name.to_lowercase().contains(&query) || self.client.to_lowercase().contains(&query)
    }
}

/// A project as found in storage, tolerant of older shapes.
///
/// Older records carry a single `date` instead of `startDate`/`endDate`, and
/// may hold empty or unknown values. [`ProjectRecord::normalize`] fills the gaps.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectRecord {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub client: Option<String>,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
    /// Legacy single date
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

/// Parse `YYYY-MM-DD`, also accepting a full ISO timestamp
fn parse_date(raw: Option<&str>) -> Option<NaiveDate> {
    let raw = raw?.trim();
    let date_part = raw.get(..10).unwrap_or(raw);
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()
}

/// True when `raw` is already a plain `YYYY-MM-DD` date
fn is_canonical_date(raw: Option<&str>) -> bool {
    raw.is_some_and(|raw| raw.len() == 10 && NaiveDate::parse_from_str(raw, "%Y-%m-%d").is_ok())
}

impl ProjectRecord {
    /// Whether this record is in an older shape that [`normalize`](Self::normalize) rewrites
    pub fn needs_migration(&self) -> bool {
        self.date.is_some()
            || self.id.as_deref().unwrap_or("").trim().is_empty()
            || !is_canonical_date(self.start_date.as_deref())
            || !is_canonical_date(self.end_date.as_deref())
    }

    /// Turn a stored record into a [`Project`] with a freshly derived status.
    ///
    /// Missing start dates fall back to the legacy `date`, then to `today`;
    /// missing end dates fall back to `date`, then to today + 7 days.
    pub fn normalize(self, today: NaiveDate) -> Project {
        let legacy = parse_date(self.date.as_deref());
        let start_date = parse_date(self.start_date.as_deref())
            .or(legacy)
            .unwrap_or(today);
        let end_date = parse_date(self.end_date.as_deref())
            .or(legacy)
            .unwrap_or_else(|| default_end(today));
        let stored = self
            .status
            .as_deref()
            .and_then(ProjectStatus::parse)
            .unwrap_or_default();

        Project {
            id: self
                .id
                .filter(|id| !id.trim().is_empty())
                .unwrap_or_else(|| Uuid::new_v4().to_string()),
            name: self.name.unwrap_or_default(),
            client: self.client.unwrap_or_default(),
            start_date,
            end_date,
            notes: self.notes.unwrap_or_default(),
            status: derive_status(start_date, end_date, stored, today),
        }
    }
}

/// Editable fields of a project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectDraft {
    pub name: String,
    pub client: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default)]
    pub notes: String,
    /// Manual "completed" mark; the only status a user sets directly
    #[serde(default)]
    pub completed: bool,
}

impl ProjectDraft {
    /// New draft with empty notes, not completed
    pub fn new(
        name: impl Into<String>,
        client: impl Into<String>,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Self {
        ProjectDraft {
            name: name.into(),
            client: client.into(),
            start_date,
            end_date,
            notes: String::new(),
            completed: false,
        }
    }

    /// Draft starting `today` and ending a week later
    pub fn starting(name: impl Into<String>, client: impl Into<String>, today: NaiveDate) -> Self {
        Self::new(name, client, today, default_end(today))
    }

    /// Draft pre-filled from an existing project
    pub fn from_project(project: &Project) -> Self {
        ProjectDraft {
            name: project.name.clone(),
            client: project.client.clone(),
            start_date: project.start_date,
            end_date: project.end_date,
            notes: project.notes.clone(),
            completed: project.status == ProjectStatus::Completed,
        }
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }

    pub fn with_completed(mut self, completed: bool) -> Self {
        self.completed = completed;
        self
    }

    /// Validate input parameters.
    pub fn validate(&self) -> CalcResult<()> {
        if self.name.trim().is_empty() {
            return Err(CalcError::invalid_input("name", "", "Project name is required"));
        }
        if self.end_date < self.start_date {
            return Err(CalcError::invalid_input(
                "end_date",
                self.end_date.to_string(),
                format!("End date is before start date {}", self.start_date),
            ));
        }
        Ok(())
    }

    fn into_project(self, id: String, today: NaiveDate) -> Project {
        // Only the manual completed mark survives an edit
        let stored = if self.completed {
            ProjectStatus::Completed
        } else {
            ProjectStatus::Pending
        };
        Project {
            id,
            status: derive_status(self.start_date, self.end_date, stored, today),
            name: self.name.trim().to_string(),
            client: self.client.trim().to_string(),
            start_date: self.start_date,
            end_date: self.end_date,
            notes: self.notes,
        }
    }
}

/// The full list of projects, newest first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectList {
    projects: Vec<Project>,
}

impl ProjectList {
    /// Build from stored records, normalizing each and deriving statuses.
    pub fn from_records(records: Vec<ProjectRecord>, today: NaiveDate) -> Self {
        ProjectList {
            projects: records.into_iter().map(|r| r.normalize(today)).collect(),
        }
    }

    /// Build from already-typed projects, re-deriving statuses.
    pub fn from_projects(projects: Vec<Project>, today: NaiveDate) -> Self {
        let mut list = ProjectList { projects };
        list.refresh_statuses(today);
        list
    }

    /// All projects, newest first
    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn into_projects(self) -> Vec<Project> {
        self.projects
    }

    pub fn len(&self) -> usize {
        self.projects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }

    /// Get a project by id
    pub fn get(&self, id: &str) -> Option<&Project> {
        self.projects.iter().find(|p| p.id == id)
    }

    /// Add a project at the front of the list. Returns its new id.
    pub fn create(&mut self, draft: ProjectDraft, today: NaiveDate) -> CalcResult<String> {
        draft.validate()?;
        let id = Uuid::new_v4().to_string();
        let project = draft.into_project(id.clone(), today);
        self.projects.insert(0, project);
        Ok(id)
    }

    /// Replace the editable fields of an existing project.
    pub fn update(
        &mut self,
        id: &str,
        draft: ProjectDraft,
        today: NaiveDate,
    ) -> CalcResult<&Project> {
        draft.validate()?;
        let slot = self
            .projects
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| CalcError::ProjectNotFound { id: id.to_string() })?;
        *slot = draft.into_project(id.to_string(), today);
        Ok(slot)
    }

    /// Remove a project, returning it.
    pub fn remove(&mut self, id: &str) -> CalcResult<Project> {
        let index = self
            .projects
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| CalcError::ProjectNotFound { id: id.to_string() })?;
        Ok(self.projects.remove(index))
    }

    /// Projects whose name or client contains `query` (case-insensitive)
    pub fn search(&self, query: &str) -> Vec<&Project> {
        self.projects.iter().filter(|p| p.matches(query)).collect()
    }

    /// Re-derive every status for `today`
    pub fn refresh_statuses(&mut self, today: NaiveDate) {
        for project in &mut self.projects {
            project.refresh_status(today);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_derive_status() {
        let start = d(2024, 5, 1);
        let end = d(2024, 5, 10);

        let status = |stored, today| derive_status(start, end, stored, today);

        assert_eq!(status(ProjectStatus::Pending, d(2024, 4, 30)), ProjectStatus::Pending);
        assert_eq!(status(ProjectStatus::Pending, d(2024, 5, 5)), ProjectStatus::InProgress);
        assert_eq!(status(ProjectStatus::InProgress, d(2024, 5, 11)), ProjectStatus::Delayed);
        assert_eq!(status(ProjectStatus::Completed, d(2024, 4, 1)), ProjectStatus::Completed);
        assert_eq!(status(ProjectStatus::Completed, d(2024, 6, 1)), ProjectStatus::Completed);
    }

    #[test]
    fn test_boundaries_are_in_progress() {
        let start = d(2024, 5, 1);
        let end = d(2024, 5, 10);
        let status = |today| derive_status(start, end, ProjectStatus::Pending, today);
        assert_eq!(status(start), ProjectStatus::InProgress);
        assert_eq!(status(end), ProjectStatus::InProgress);
    }

    #[test]
    fn test_delayed_can_recover_when_dates_move() {
        // Delayed is not sticky: pushing the end date out re-derives
        let (start, end) = (d(2024, 5, 1), d(2024, 6, 1));
        let status = derive_status(start, end, ProjectStatus::Delayed, d(2024, 5, 20));
        assert_eq!(status, ProjectStatus::InProgress);
    }

    #[test]
    fn test_status_serialization() {
        let json = serde_json::to_string(&ProjectStatus::InProgress).unwrap();
        assert_eq!(json, "\"in-progress\"");
        assert_eq!(ProjectStatus::parse(" Completed "), Some(ProjectStatus::Completed));
        assert_eq!(ProjectStatus::parse("archived"), None);
    }

    #[test]
    fn test_project_json_shape() {
        let project = Project {
            id: "1".to_string(),
            name: "Factory A - Panel Upgrade".to_string(),
            client: "IndusCorp".to_string(),
            start_date: d(2023, 10, 1),
            end_date: d(2023, 10, 25),
            notes: String::new(),
            status: ProjectStatus::Completed,
        };
        let value = serde_json::to_value(&project).unwrap();
        assert_eq!(value["startDate"], "2023-10-01");
        assert_eq!(value["endDate"], "2023-10-25");
        assert_eq!(value["status"], "completed");

        let roundtrip: Project = serde_json::from_value(value).unwrap();
        assert_eq!(roundtrip, project);
    }

    #[test]
    fn test_normalize_legacy_record() {
        let today = d(2024, 1, 15);
        let json = r#"{"id":"7","name":"Old job","client":"ACME","date":"2023-12-01",
            "status":"pending"}"#;
        let record: ProjectRecord = serde_json::from_str(json).unwrap();
        let project = record.normalize(today);

        assert_eq!(project.start_date, d(2023, 12, 1));
        assert_eq!(project.end_date, d(2023, 12, 1));
        assert_eq!(project.status, ProjectStatus::Delayed);
        assert_eq!(project.notes, "");
    }

    #[test]
    fn test_normalize_missing_dates() {
        let today = d(2024, 1, 15);
        let record = ProjectRecord {
            name: Some("New".to_string()),
            status: Some("bogus".to_string()),
            ..Default::default()
        };
        let project = record.normalize(today);

        assert_eq!(project.start_date, today);
        assert_eq!(project.end_date, d(2024, 1, 22));
        assert_eq!(project.status, ProjectStatus::InProgress);
        assert!(!project.id.is_empty());
    }

    #[test]
    fn test_normalize_timestamp_dates() {
        let record = ProjectRecord {
            id: Some("3".to_string()),
            start_date: Some("2024-02-01T00:00:00.000Z".to_string()),
            end_date: Some("2024-02-10".to_string()),
            ..Default::default()
        };
        let project = record.normalize(d(2024, 1, 1));
        assert_eq!(project.start_date, d(2024, 2, 1));
        assert_eq!(project.status, ProjectStatus::Pending);
    }

    #[test]
    fn test_missing_end_counts_from_today() {
        let record = ProjectRecord {
            id: Some("4".to_string()),
            start_date: Some("2024-01-02".to_string()),
            ..Default::default()
        };
        let project = record.normalize(d(2024, 1, 15));
        assert_eq!(project.end_date, d(2024, 1, 22));
    }

    #[test]
    fn test_needs_migration() {
        let current = ProjectRecord {
            id: Some("1".to_string()),
            start_date: Some("2024-01-02".to_string()),
            end_date: Some("2024-01-09".to_string()),
            ..Default::default()
        };
        assert!(!current.needs_migration());

        let legacy = ProjectRecord {
            date: Some("2024-01-02".to_string()),
            ..current.clone()
        };
        assert!(legacy.needs_migration());

        let timestamp = ProjectRecord {
            start_date: Some("2024-01-02T00:00:00.000Z".to_string()),
            ..current.clone()
        };
        assert!(timestamp.needs_migration());

        let blank_id = ProjectRecord {
            id: Some(" ".to_string()),
            ..current
        };
        assert!(blank_id.needs_migration());
    }

    #[test]
    fn test_create_prepends_and_derives() {
        let today = d(2024, 3, 5);
        let mut list = ProjectList::default();

        let first = list
            .create(ProjectDraft::new("A", "Client A", d(2024, 3, 10), d(2024, 3, 20)), today)
            .unwrap();
        let second = list
            .create(ProjectDraft::starting("B", "Client B", today), today)
            .unwrap();

        assert_eq!(list.len(), 2);
        assert_eq!(list.projects()[0].id, second);
        assert_eq!(list.get(&first).unwrap().status, ProjectStatus::Pending);
        assert_eq!(list.get(&second).unwrap().status, ProjectStatus::InProgress);
    }

    #[test]
    fn test_draft_validation() {
        let today = d(2024, 3, 5);
        let mut list = ProjectList::default();

        let blank = ProjectDraft::starting("   ", "Client", today);
        assert!(matches!(list.create(blank, today), Err(CalcError::InvalidInput { .. })));

        let backwards = ProjectDraft::new("Job", "Client", d(2024, 3, 10), d(2024, 3, 1));
        assert!(matches!(list.create(backwards, today), Err(CalcError::InvalidInput { .. })));
        assert!(list.is_empty());
    }

    #[test]
    fn test_update_completed_is_sticky() {
        let today = d(2024, 3, 5);
        let mut list = ProjectList::default();
        let id = list
            .create(ProjectDraft::new("Job", "Client", d(2024, 2, 1), d(2024, 2, 10)), today)
            .unwrap();
        assert_eq!(list.get(&id).unwrap().status, ProjectStatus::Delayed);

        let draft = ProjectDraft::from_project(list.get(&id).unwrap()).with_completed(true);
        let updated = list.update(&id, draft, today).unwrap();
        assert_eq!(updated.status, ProjectStatus::Completed);

        list.refresh_statuses(d(2030, 1, 1));
        assert_eq!(list.get(&id).unwrap().status, ProjectStatus::Completed);
    }

    #[test]
    fn test_update_reopen_rederives() {
        let today = d(2024, 3, 5);
        let mut list = ProjectList::default();
        let draft =
            ProjectDraft::new("Job", "Client", d(2024, 3, 1), d(2024, 3, 10)).with_completed(true);
        let id = list.create(draft.clone(), today).unwrap();

        list.update(&id, draft.with_completed(false), today).unwrap();
        assert_eq!(list.get(&id).unwrap().status, ProjectStatus::InProgress);
    }

    #[test]
    fn test_update_and_remove_missing() {
        let today = d(2024, 3, 5);
        let mut list = ProjectList::default();
        let draft = ProjectDraft::starting("Job", "Client", today);

        assert!(matches!(
            list.update("nope", draft, today),
            Err(CalcError::ProjectNotFound { .. })
        ));
        assert!(matches!(list.remove("nope"), Err(CalcError::ProjectNotFound { .. })));
    }

    #[test]
    fn test_remove() {
        let today = d(2024, 3, 5);
        let mut list = ProjectList::default();
        let id = list.create(ProjectDraft::starting("Job", "Client", today), today).unwrap();

        let removed = list.remove(&id).unwrap();
        assert_eq!(removed.name, "Job");
        assert!(list.is_empty());
    }

    #[test]
    fn test_search() {
        let today = d(2024, 3, 5);
        let mut list = ProjectList::default();
        list.create(ProjectDraft::starting("Factory A - Panel Upgrade", "IndusCorp", today), today)
            .unwrap();
        list.create(ProjectDraft::starting("Res. Johnson - Wiring", "Mr. Johnson", today), today)
            .unwrap();

        assert_eq!(list.search("panel").len(), 1);
        assert_eq!(list.search("JOHNSON").len(), 1);
        assert_eq!(list.search("").len(), 2);
        assert!(list.search("substation").is_empty());
    }
}
