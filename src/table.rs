use crate::catalog::{Catalog, Lecture};
use crate::links::to_download_link;

/// Columns of the lecture table, left to right.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    Serial,
    Lecture,
    HandNotes,
    Video,
    Resources,
    Download,
}

impl Column {
    pub const ALL: [Column; 6] = [
        Column::Serial,
        Column::Lecture,
        Column::HandNotes,
        Column::Video,
        Column::Resources,
        Column::Download,
    ];

    pub fn title(self) -> &'static str {
        match self {
            Column::Serial => "#",
            Column::Lecture => "Lecture",
            Column::HandNotes => "Notes",
            Column::Video => "Video",
            Column::Resources => "Resources",
            Column::Download => "Download",
        }
    }

    pub fn next(self) -> Self {
        match self {
            Column::Serial => Column::Lecture,
            Column::Lecture => Column::HandNotes,
            Column::HandNotes => Column::Video,
            Column::Video => Column::Resources,
            Column::Resources => Column::Download,
            Column::Download => Column::Download,
        }
    }

    pub fn previous(self) -> Self {
        match self {
            Column::Serial => Column::Serial,
            Column::Lecture => Column::Serial,
            Column::HandNotes => Column::Lecture,
            Column::Video => Column::HandNotes,
            Column::Resources => Column::Video,
            Column::Download => Column::Resources,
        }
    }
}

/// What activating a cell does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowAction {
    OpenDocument { source: String, download: String },
    OpenVideo { source: String },
    OpenExternal { label: &'static str, url: String },
    Download { url: String, file_name: String },
}

/// One rendered table row. Rows carry no identity and are rebuilt on every
/// render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LectureRow {
    pub serial: String,
    pub name: String,
    pub pdf: String,
    pub hand_notes: String,
    pub video: String,
    pub resources: String,
    pub download: String,
    pub file_name: String,
}

impl LectureRow {
    pub fn from_lecture(lecture: &Lecture, file_name: &str) -> Self {
        Self {
            serial: lecture.serial_label(),
            name: lecture.lecture.clone(),
            pdf: lecture.pdf.clone(),
            hand_notes: lecture.hand_notes.clone(),
            video: lecture.video.clone(),
            resources: lecture.resources.clone(),
            download: to_download_link(&lecture.pdf),
            file_name: file_name.to_string(),
        }
    }

    /// Dispatch table for the row's cells. The serial cell is static text.
    pub fn action(&self, column: Column) -> Option<RowAction> {
        match column {
            Column::Serial => None,
            Column::Lecture => Some(RowAction::OpenDocument {
                source: self.pdf.clone(),
                download: self.download.clone(),
            }),
            Column::HandNotes => Some(RowAction::OpenExternal {
                label: "hand notes",
                url: self.hand_notes.clone(),
            }),
            Column::Video => Some(RowAction::OpenVideo {
                source: self.video.clone(),
            }),
            Column::Resources => Some(RowAction::OpenExternal {
                label: "resources",
                url: self.resources.clone(),
            }),
            Column::Download => Some(RowAction::Download {
                url: self.download.clone(),
                file_name: self.file_name.clone(),
            }),
        }
    }

    pub fn cell_text(&self, column: Column) -> &str {
        match column {
            Column::Serial => &self.serial,
            Column::Lecture => &self.name,
            Column::HandNotes => link_glyph(&self.hand_notes, "notes"),
            Column::Video => link_glyph(&self.video, "play"),
            Column::Resources => link_glyph(&self.resources, "open"),
            Column::Download => link_glyph(&self.download, "save"),
        }
    }
}

fn link_glyph<'a>(url: &str, label: &'a str) -> &'a str {
    if url.is_empty() {
        "-"
    } else {
        label
    }
}

/// Builds the rows for one subject in list order. Unknown semesters or
/// subjects produce an empty table.
pub fn render(
    catalog: &Catalog,
    semester: &str,
    subject: &str,
    file_name: &str,
) -> Vec<LectureRow> {
    catalog
        .lectures(semester, subject)
        .unwrap_or_default()
        .iter()
        .map(|lecture| LectureRow::from_lecture(lecture, file_name))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE: &str = r#"{"Sem1": {"Math": [
        {"serialNumber":1,"lecture":"Intro","pdf":"https://drive.google.com/file/d/ABC123/view","handNotes":"https://x/notes1","video":"https://y/v1","resources":"https://z/r1"},
        {"serialNumber":2,"lecture":"Limits","pdf":"https://host/limits.pdf","handNotes":"","video":"https://y/v2","resources":"https://z/r2"}
    ]}}"#;

    fn catalog() -> Catalog {
        Catalog::from_json(EXAMPLE).unwrap()
    }

    #[test]
    fn renders_one_row_per_lecture_in_order() {
        let rows = render(&catalog(), "Sem1", "Math", "Lecture.pdf");
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].serial, "1");
        assert_eq!(rows[1].serial, "2");
        assert_eq!(rows[1].name, "Limits");
    }

    #[test]
    fn lecture_cell_opens_raw_pdf_with_download_target() {
        let rows = render(&catalog(), "Sem1", "Math", "Lecture.pdf");
        assert_eq!(
            rows[0].action(Column::Lecture),
            Some(RowAction::OpenDocument {
                source: "https://drive.google.com/file/d/ABC123/view".into(),
                download: "https://drive.google.com/uc?export=download&id=ABC123".into(),
            })
        );
    }

    #[test]
    fn download_cell_uses_fixed_file_name() {
        let rows = render(&catalog(), "Sem1", "Math", "Lecture.pdf");
        assert_eq!(
            rows[1].action(Column::Download),
            Some(RowAction::Download {
                url: "https://host/limits.pdf".into(),
                file_name: "Lecture.pdf".into(),
            })
        );
    }

    #[test]
    fn outbound_cells_pass_urls_verbatim() {
        let rows = render(&catalog(), "Sem1", "Math", "Lecture.pdf");
        assert_eq!(
            rows[0].action(Column::HandNotes),
            Some(RowAction::OpenExternal {
                label: "hand notes",
                url: "https://x/notes1".into(),
            })
        );
        assert_eq!(
            rows[0].action(Column::Video),
            Some(RowAction::OpenVideo {
                source: "https://y/v1".into()
            })
        );
        assert_eq!(rows[0].action(Column::Serial), None);
    }

    #[test]
    fn blank_links_render_as_dead_cells() {
        let rows = render(&catalog(), "Sem1", "Math", "Lecture.pdf");
        assert_eq!(rows[1].cell_text(Column::HandNotes), "-");
        assert_eq!(rows[1].cell_text(Column::Video), "play");
    }

    #[test]
    fn unknown_subject_renders_nothing() {
        assert!(render(&catalog(), "Sem1", "Art", "Lecture.pdf").is_empty());
        assert!(render(&catalog(), "Sem7", "Math", "Lecture.pdf").is_empty());
    }
}
