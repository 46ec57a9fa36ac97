use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Lectures of one subject, in the order the data file lists them.
pub type LectureList = Vec<Lecture>;

/// Subjects of one semester, keyed by display name.
pub type SubjectMap = IndexMap<String, LectureList>;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lecture {
    #[serde(default)]
    pub serial_number: Value,
    #[serde(default, deserialize_with = "nullable_string")]
    pub lecture: String,
    #[serde(default, deserialize_with = "nullable_string")]
    pub pdf: String,
    #[serde(default, deserialize_with = "nullable_string")]
    pub hand_notes: String,
    #[serde(default, deserialize_with = "nullable_string")]
    pub video: String,
    #[serde(default, deserialize_with = "nullable_string")]
    pub resources: String,
}

fn nullable_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl Lecture {
    /// Serial number rendered as plain text. Numbers print without a trailing
    /// fraction, strings verbatim, anything missing as blank.
    pub fn serial_label(&self) -> String {
        match &self.serial_number {
            Value::Null => String::new(),
            Value::String(text) => text.clone(),
            Value::Number(number) => match number.as_f64() {
                Some(float) if float.fract() == 0.0 && float.abs() < 1e15 => {
                    format!("{}", float as i64)
                }
                _ => number.to_string(),
            },
            other => other.to_string(),
        }
    }
}

/// Semester → Subject → lectures. Key order follows the source document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalog {
    semesters: IndexMap<String, SubjectMap>,
}

impl Catalog {
    pub fn from_json(data: &str) -> serde_json::Result<Self> {
        serde_json::from_str(data)
    }

    pub fn is_empty(&self) -> bool {
        self.semesters.is_empty()
    }

    pub fn semesters(&self) -> impl Iterator<Item = &str> {
        self.semesters.keys().map(String::as_str)
    }

    pub fn subjects(&self, semester: &str) -> Option<impl Iterator<Item = &str>> {
        self.semesters
            .get(semester)
            .map(|subjects| subjects.keys().map(String::as_str))
    }

    pub fn lectures(&self, semester: &str, subject: &str) -> Option<&[Lecture]> {
        self.semesters
            .get(semester)?
            .get(subject)
            .map(Vec::as_slice)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &SubjectMap)> {
        self.semesters.iter().map(|(name, subjects)| (name.as_str(), subjects))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "Sem2": {"Physics": [], "Chem": []},
        "Sem1": {"Math": [{"serialNumber":1,"lecture":"Intro","pdf":"p","handNotes":"h","video":"v","resources":"r"}]}
    }"#;

    #[test]
    fn keeps_document_order() {
        let catalog = Catalog::from_json(SAMPLE).unwrap();
        let semesters: Vec<_> = catalog.semesters().collect();
        assert_eq!(semesters, vec!["Sem2", "Sem1"]);
        let subjects: Vec<_> = catalog.subjects("Sem2").unwrap().collect();
        assert_eq!(subjects, vec!["Physics", "Chem"]);
    }

    #[test]
    fn reads_camel_case_fields() {
        let catalog = Catalog::from_json(SAMPLE).unwrap();
        let lecture = &catalog.lectures("Sem1", "Math").unwrap()[0];
        assert_eq!(lecture.lecture, "Intro");
        assert_eq!(lecture.hand_notes, "h");
        assert_eq!(lecture.serial_label(), "1");
    }

    #[test]
    fn missing_fields_become_blank() {
        let catalog = Catalog::from_json(r#"{"S":{"T":[{"lecture":"Only name"}]}}"#).unwrap();
        let lecture = &catalog.lectures("S", "T").unwrap()[0];
        assert_eq!(lecture.serial_label(), "");
        assert!(lecture.pdf.is_empty());
        assert!(lecture.video.is_empty());
    }

    #[test]
    fn null_fields_become_blank() {
        let catalog =
            Catalog::from_json(r#"{"S":{"T":[{"serialNumber":null,"pdf":null}]}}"#).unwrap();
        let lecture = &catalog.lectures("S", "T").unwrap()[0];
        assert_eq!(lecture.serial_label(), "");
        assert!(lecture.pdf.is_empty());
    }

    #[test]
    fn serial_label_formats_like_text_content() {
        let mut lecture = Lecture {
            serial_number: serde_json::json!(2.0),
            ..Lecture::default()
        };
        assert_eq!(lecture.serial_label(), "2");
        lecture.serial_number = serde_json::json!(2.5);
        assert_eq!(lecture.serial_label(), "2.5");
        lecture.serial_number = serde_json::json!("3a");
        assert_eq!(lecture.serial_label(), "3a");
    }

    #[test]
    fn unknown_keys_resolve_to_none() {
        let catalog = Catalog::from_json(SAMPLE).unwrap();
        assert!(catalog.subjects("Sem9").is_none());
        assert!(catalog.lectures("Sem1", "Art").is_none());
    }

    #[test]
    fn duplicate_keys_keep_last_value_at_first_position() {
        let catalog = Catalog::from_json(r#"{"A":{"x":[]},"B":{},"A":{"y":[]}}"#).unwrap();
        assert_eq!(catalog.semesters().collect::<Vec<_>>(), vec!["A", "B"]);
        assert_eq!(catalog.subjects("A").unwrap().collect::<Vec<_>>(), vec!["y"]);
    }
}
