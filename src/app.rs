use std::sync::Arc;

use anyhow::{Context, Result};

use crate::config;
use crate::data::{self, CatalogLocation};
use crate::download::Downloader;
use crate::logging;
use crate::player::{Launcher, SystemLauncher};
use crate::ui;

#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Overrides the configured catalog location (URL or path).
    pub catalog: Option<String>,
}

pub fn run(options: RunOptions) -> Result<()> {
    let cfg = config::load(config::LoadOptions::default()).context("load config")?;

    if let Err(err) = logging::init(None) {
        eprintln!("warning: logging disabled: {err:#}");
    }
    tracing::info!(version = crate::VERSION, "lecture-tui starting");

    let location = options
        .catalog
        .clone()
        .unwrap_or_else(|| cfg.catalog.location());
    let parsed = CatalogLocation::parse(&location);
    let catalog_source = match data::source_for(parsed, cfg.catalog.timeout) {
        Ok(source) => Some(source),
        Err(err) => {
            tracing::error!(%location, "Error preparing catalog source: {err:#}");
            None
        }
    };

    let downloader = match Downloader::new(&cfg.downloads, cfg.catalog.timeout) {
        Ok(downloader) => Some(downloader),
        Err(err) => {
            tracing::warn!("downloads disabled: {err:#}");
            None
        }
    };

    let launcher: Arc<dyn Launcher + Send + Sync> =
        Arc::new(SystemLauncher::new(cfg.player.clone()));

    let options = ui::Options {
        status_message: format!("Loading lectures from {location}…"),
        catalog_source,
        downloader,
        launcher,
        download_name: cfg.downloads.file_name.clone(),
    };

    let mut model = ui::Model::new(options);
    model.run()?;

    tracing::info!("lecture-tui exiting");
    Ok(())
}

/// Loads the catalog without starting the UI and renders it as an indented
/// tree. An unreadable catalog prints nothing but the header.
pub fn catalog_outline(location: &str, cfg: &config::Config) -> Result<String> {
    let source = data::source_for(CatalogLocation::parse(location), cfg.catalog.timeout)?;
    let catalog = data::load(source.as_ref());

    let mut out = format!("Catalog: {}\n", source.describe());
    if catalog.is_empty() {
        out.push_str("  (no semesters)\n");
        return Ok(out);
    }
    for (semester, subjects) in catalog.iter() {
        out.push_str(&format!("{semester}\n"));
        for (subject, lectures) in subjects {
            out.push_str(&format!("  {subject} ({} lectures)\n", lectures.len()));
            for lecture in lectures {
                out.push_str(&format!(
                    "    {:>3}. {}\n",
                    lecture.serial_label(),
                    lecture.lecture
                ));
            }
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn outline_lists_tree_in_order() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("data.json");
        fs::write(
            &path,
            r#"{"Sem1":{"Math":[{"serialNumber":1,"lecture":"Intro"}]},"Sem2":{"Art":[]}}"#,
        )
        .unwrap();
        let outline =
            catalog_outline(path.to_str().unwrap(), &config::Config::default()).unwrap();
        let lines: Vec<_> = outline.lines().skip(1).collect();
        assert_eq!(
            lines,
            vec![
                "Sem1",
                "  Math (1 lectures)",
                "      1. Intro",
                "Sem2",
                "  Art (0 lectures)"
            ]
        );
    }

    #[test]
    fn outline_of_missing_catalog_is_empty() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nope.json");
        let outline =
            catalog_outline(path.to_str().unwrap(), &config::Config::default()).unwrap();
        assert!(outline.ends_with("(no semesters)\n"));
    }
}
