use crate::catalog::Catalog;
use crate::table::{self, LectureRow};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Stage {
    #[default]
    NoSelection,
    SemesterSelected {
        semester: String,
    },
    SubjectSelected {
        semester: String,
        subject: String,
    },
}

impl Stage {
    pub fn semester(&self) -> Option<&str> {
        match self {
            Stage::NoSelection => None,
            Stage::SemesterSelected { semester } | Stage::SubjectSelected { semester, .. } => {
                Some(semester.as_str())
            }
        }
    }

    pub fn subject(&self) -> Option<&str> {
        match self {
            Stage::SubjectSelected { subject, .. } => Some(subject.as_str()),
            _ => None,
        }
    }
}

/// Semester → subject cascade. The selector never owns the catalog; every
/// transition borrows it.
#[derive(Debug, Clone, Default)]
pub struct Selector {
    stage: Stage,
    semesters: Vec<String>,
    subjects: Vec<String>,
    rows: Vec<LectureRow>,
    rows_origin: Option<(String, String)>,
    subjects_revealed: bool,
    lectures_revealed: bool,
    file_name: String,
}

impl Selector {
    pub fn new(file_name: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            ..Self::default()
        }
    }

    /// Fills the semester options once the catalog is available.
    pub fn populate(&mut self, catalog: &Catalog) {
        self.semesters = catalog.semesters().map(str::to_string).collect();
    }

    pub fn stage(&self) -> &Stage {
        &self.stage
    }

    pub fn semesters(&self) -> &[String] {
        &self.semesters
    }

    pub fn subjects(&self) -> &[String] {
        &self.subjects
    }

    pub fn rows(&self) -> &[LectureRow] {
        &self.rows
    }

    /// Semester and subject the current rows were rendered for. Survives a
    /// semester change until another subject is chosen.
    pub fn rows_origin(&self) -> Option<(&str, &str)> {
        self.rows_origin
            .as_ref()
            .map(|(semester, subject)| (semester.as_str(), subject.as_str()))
    }

    pub fn subjects_revealed(&self) -> bool {
        self.subjects_revealed
    }

    pub fn lectures_revealed(&self) -> bool {
        self.lectures_revealed
    }

    /// Returns false when the semester is not part of the catalog.
    pub fn select_semester(&mut self, catalog: &Catalog, semester: &str) -> bool {
        let Some(subjects) = catalog.subjects(semester) else {
            return false;
        };
        self.subjects = subjects.map(str::to_string).collect();
        self.stage = Stage::SemesterSelected {
            semester: semester.to_string(),
        };
        self.subjects_revealed = true;
        true
    }

    /// Returns false without a selected semester or for a subject that is not
    /// among the current options.
    pub fn select_subject(&mut self, catalog: &Catalog, subject: &str) -> bool {
        let Some(semester) = self.stage.semester().map(str::to_string) else {
            return false;
        };
        if !self.subjects.iter().any(|candidate| candidate == subject) {
            return false;
        }
        self.rows = table::render(catalog, &semester, subject, &self.file_name);
        self.rows_origin = Some((semester.clone(), subject.to_string()));
        self.stage = Stage::SubjectSelected {
            semester,
            subject: subject.to_string(),
        };
        self.lectures_revealed = true;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CATALOG: &str = r#"{
        "Sem1": {"Math": [{"serialNumber":1,"lecture":"Intro"},{"serialNumber":2,"lecture":"Sets"}], "Art": []},
        "Sem2": {"Physics": [{"serialNumber":7,"lecture":"Motion"}]},
        "Sem3": {}
    }"#;

    fn setup() -> (Catalog, Selector) {
        let catalog = Catalog::from_json(CATALOG).unwrap();
        let mut selector = Selector::new("Lecture.pdf");
        selector.populate(&catalog);
        (catalog, selector)
    }

    #[test]
    fn semester_options_follow_catalog_order() {
        let (_, selector) = setup();
        assert_eq!(selector.semesters(), ["Sem1", "Sem2", "Sem3"]);
        assert_eq!(selector.stage(), &Stage::NoSelection);
        assert!(!selector.subjects_revealed());
    }

    #[test]
    fn selecting_semester_populates_subjects() {
        let (catalog, mut selector) = setup();
        assert!(selector.select_semester(&catalog, "Sem1"));
        assert_eq!(selector.subjects(), ["Math", "Art"]);
        assert!(selector.subjects_revealed());
        assert!(!selector.lectures_revealed());
    }

    #[test]
    fn selecting_subject_renders_rows() {
        let (catalog, mut selector) = setup();
        selector.select_semester(&catalog, "Sem1");
        assert!(selector.select_subject(&catalog, "Math"));
        let serials: Vec<_> = selector.rows().iter().map(|row| row.serial.as_str()).collect();
        assert_eq!(serials, vec!["1", "2"]);
        assert!(selector.lectures_revealed());
        assert_eq!(selector.stage().subject(), Some("Math"));
    }

    #[test]
    fn reselecting_semester_discards_subject() {
        let (catalog, mut selector) = setup();
        selector.select_semester(&catalog, "Sem1");
        selector.select_subject(&catalog, "Math");
        selector.select_semester(&catalog, "Sem2");
        assert_eq!(
            selector.stage(),
            &Stage::SemesterSelected {
                semester: "Sem2".into()
            }
        );
        assert_eq!(selector.subjects(), ["Physics"]);
        // Previously rendered rows stay until another subject is picked.
        assert_eq!(selector.rows().len(), 2);
        assert!(selector.lectures_revealed());
        assert!(!selector.select_subject(&catalog, "Math"));
        assert!(selector.select_subject(&catalog, "Physics"));
        assert_eq!(selector.rows()[0].serial, "7");
    }

    #[test]
    fn subject_requires_semester() {
        let (catalog, mut selector) = setup();
        assert!(!selector.select_subject(&catalog, "Math"));
        assert!(!selector.lectures_revealed());
    }

    #[test]
    fn unknown_semester_is_ignored() {
        let (catalog, mut selector) = setup();
        assert!(!selector.select_semester(&catalog, "Sem9"));
        assert_eq!(selector.stage(), &Stage::NoSelection);
    }

    #[test]
    fn empty_catalog_has_no_options() {
        let mut selector = Selector::new("Lecture.pdf");
        selector.populate(&Catalog::default());
        assert!(selector.semesters().is_empty());
    }

    #[test]
    fn rows_remember_where_they_came_from() {
        let (catalog, mut selector) = setup();
        assert_eq!(selector.rows_origin(), None);
        selector.select_semester(&catalog, "Sem1");
        selector.select_subject(&catalog, "Math");
        selector.select_semester(&catalog, "Sem2");
        assert_eq!(selector.rows_origin(), Some(("Sem1", "Math")));
        selector.select_subject(&catalog, "Physics");
        assert_eq!(selector.rows_origin(), Some(("Sem2", "Physics")));
    }
}
