use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::blocking::Client as HttpClient;
use reqwest::header::USER_AGENT;
use url::Url;

use crate::catalog::Catalog;

#[derive(Debug, thiserror::Error)]
pub enum DataError {
    #[error("catalog request failed with status {0}")]
    Status(reqwest::StatusCode),
    #[error("catalog payload is not valid JSON: {0}")]
    Malformed(#[from] serde_json::Error),
}

pub trait CatalogSource: Send + Sync {
    fn describe(&self) -> String;
    fn fetch(&self) -> Result<Catalog>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogLocation {
    Remote(Url),
    Local(PathBuf),
}

impl CatalogLocation {
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        match Url::parse(trimmed) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => CatalogLocation::Remote(url),
            Ok(url) if url.scheme() == "file" => match url.to_file_path() {
                Ok(path) => CatalogLocation::Local(path),
                Err(_) => CatalogLocation::Local(PathBuf::from(trimmed)),
            },
            _ => CatalogLocation::Local(PathBuf::from(trimmed)),
        }
    }
}

pub fn source_for(
    location: CatalogLocation,
    timeout: Duration,
) -> Result<Arc<dyn CatalogSource + Send + Sync>> {
    let source: Arc<dyn CatalogSource + Send + Sync> = match location {
        CatalogLocation::Remote(url) => Arc::new(HttpCatalogSource::new(url, timeout)?),
        CatalogLocation::Local(path) => Arc::new(FileCatalogSource::new(path)),
    };
    Ok(source)
}

pub struct HttpCatalogSource {
    http: HttpClient,
    url: Url,
    user_agent: String,
}

impl HttpCatalogSource {
    pub fn new(url: Url, timeout: Duration) -> Result<Self> {
        let http = HttpClient::builder()
            .timeout(timeout)
            .build()
            .context("build catalog HTTP client")?;
        Ok(Self {
            http,
            url,
            user_agent: format!("lecture-tui/{}", crate::VERSION),
        })
    }
}

impl CatalogSource for HttpCatalogSource {
    fn describe(&self) -> String {
        self.url.to_string()
    }

    fn fetch(&self) -> Result<Catalog> {
        let response = self
            .http
            .get(self.url.clone())
            .header(USER_AGENT, &self.user_agent)
            .send()
            .with_context(|| format!("request catalog from {}", self.url))?;

        if !response.status().is_success() {
            return Err(DataError::Status(response.status()).into());
        }

        let body = response.text().context("read catalog body")?;
        let catalog = Catalog::from_json(&body).map_err(DataError::from)?;
        Ok(catalog)
    }
}

pub struct FileCatalogSource {
    path: PathBuf,
}

impl FileCatalogSource {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl CatalogSource for FileCatalogSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    fn fetch(&self) -> Result<Catalog> {
        let data = fs::read_to_string(&self.path)
            .with_context(|| format!("read catalog file {}", self.path.display()))?;
        let catalog = Catalog::from_json(&data).map_err(DataError::from)?;
        Ok(catalog)
    }
}

/// Serves a fixed document; used for offline demos and tests.
#[derive(Default)]
pub struct MockCatalogSource {
    pub body: String,
}

impl CatalogSource for MockCatalogSource {
    fn describe(&self) -> String {
        "mock catalog".to_string()
    }

    fn fetch(&self) -> Result<Catalog> {
        let catalog = Catalog::from_json(&self.body).map_err(DataError::from)?;
        Ok(catalog)
    }
}

/// Performs the one catalog fetch of a session. Failures are logged and
/// leave the catalog empty.
pub fn load(source: &dyn CatalogSource) -> Catalog {
    match source.fetch() {
        Ok(catalog) => {
            tracing::info!(
                source = %source.describe(),
                semesters = catalog.semesters().count(),
                "catalog loaded"
            );
            catalog
        }
        Err(err) => {
            tracing::error!(source = %source.describe(), "Error loading catalog: {err:#}");
            Catalog::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn parses_remote_and_local_locations() {
        assert!(matches!(
            CatalogLocation::parse("https://site.example/data.json"),
            CatalogLocation::Remote(_)
        ));
        assert_eq!(
            CatalogLocation::parse("data.json"),
            CatalogLocation::Local(PathBuf::from("data.json"))
        );
        assert_eq!(
            CatalogLocation::parse("/srv/notes/data.json"),
            CatalogLocation::Local(PathBuf::from("/srv/notes/data.json"))
        );
    }

    #[test]
    fn loads_file_catalog() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("data.json");
        fs::write(&path, r#"{"Sem1":{"Math":[]},"Sem2":{}}"#).unwrap();
        let catalog = load(&FileCatalogSource::new(path));
        assert_eq!(catalog.semesters().collect::<Vec<_>>(), vec!["Sem1", "Sem2"]);
    }

    #[test]
    fn malformed_payload_leaves_catalog_empty() {
        let source = MockCatalogSource {
            body: "{not json".into(),
        };
        let err = source.fetch().unwrap_err();
        assert!(err.downcast_ref::<DataError>().is_some());
        assert!(load(&source).is_empty());
    }

    #[test]
    fn missing_file_leaves_catalog_empty() {
        let dir = tempdir().unwrap();
        let source = FileCatalogSource::new(dir.path().join("absent.json"));
        assert!(load(&source).is_empty());
    }

    #[test]
    fn wrong_shape_is_a_load_failure() {
        let source = MockCatalogSource {
            body: r#"["Sem1", "Sem2"]"#.into(),
        };
        assert!(load(&source).is_empty());
    }

    fn http_source(url: &str) -> HttpCatalogSource {
        HttpCatalogSource::new(Url::parse(url).unwrap(), Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn fetches_catalog_over_http() {
        let url = crate::test_server::serve(vec![(
            200,
            r#"{"Sem1":{"Math":[{"serialNumber":1,"lecture":"Intro"}]}}"#.into(),
        )]);
        let catalog = load(&http_source(&url));
        assert_eq!(catalog.semesters().collect::<Vec<_>>(), vec!["Sem1"]);
        assert_eq!(catalog.lectures("Sem1", "Math").unwrap()[0].lecture, "Intro");
    }

    #[test]
    fn error_status_leaves_catalog_empty() {
        let url = crate::test_server::serve(vec![
            (404, "not found".into()),
            (404, "not found".into()),
        ]);
        let source = http_source(&url);
        let err = source.fetch().unwrap_err();
        match err.downcast_ref::<DataError>() {
            Some(DataError::Status(status)) => assert_eq!(status.as_u16(), 404),
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(load(&source).is_empty());
    }
}
