use once_cell::sync::Lazy;
use regex::Regex;

pub const DRIVE_DOWNLOAD_BASE: &str = "https://drive.google.com/uc?export=download";

static DRIVE_FILE_ID_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"/d/(.+?)/").expect("valid drive file id regex"));

/// Returns the file identifier of a Drive sharing link, i.e. the first
/// `/d/<id>/` path segment.
pub fn drive_file_id(url: &str) -> Option<&str> {
    DRIVE_FILE_ID_RE
        .captures(url)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Maps a sharing link to a direct download link. Anything that does not look
/// like a sharing link is returned as-is.
pub fn to_download_link(url: &str) -> String {
    match drive_file_id(url) {
        Some(id) => format!("{DRIVE_DOWNLOAD_BASE}&id={id}"),
        None => url.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_drive_view_link() {
        assert_eq!(
            to_download_link("https://drive.google.com/file/d/ABC123/view"),
            "https://drive.google.com/uc?export=download&id=ABC123"
        );
    }

    #[test]
    fn keeps_query_suffix_out_of_id() {
        assert_eq!(
            to_download_link("https://drive.google.com/file/d/1xY-z_9/view?usp=sharing"),
            "https://drive.google.com/uc?export=download&id=1xY-z_9"
        );
    }

    #[test]
    fn uses_first_matching_segment() {
        assert_eq!(
            drive_file_id("https://host/d/first/d/second/"),
            Some("first")
        );
    }

    #[test]
    fn falls_back_to_input_without_trailing_slash() {
        let url = "https://drive.google.com/file/d/ABC123";
        assert_eq!(to_download_link(url), url);
    }

    #[test]
    fn falls_back_for_unrelated_urls() {
        for url in ["https://youtu.be/xyz", "", "notes.pdf", "https://x/d//"] {
            assert_eq!(to_download_link(url), url);
        }
    }
}
