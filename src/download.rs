use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use reqwest::blocking::Client;

use crate::config::DownloadConfig;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub url: String,
    pub file_name: String,
}

#[derive(Clone)]
pub struct Downloader {
    client: Client,
    dir: PathBuf,
}

impl Downloader {
    pub fn new(cfg: &DownloadConfig, timeout: Duration) -> Result<Self> {
        let dir = cfg
            .dir
            .clone()
            .context("download: no download directory configured")?;
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(format!("lecture-tui/{}", crate::VERSION))
            .build()
            .context("download: build http client")?;
        Ok(Self { client, dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Fetches `request.url` and stores it under the suggested file name,
    /// never replacing an existing file.
    pub fn fetch(&self, request: &Request) -> Result<PathBuf> {
        if request.url.trim().is_empty() {
            return Err(anyhow!("download: url required"));
        }

        let response = self
            .client
            .get(&request.url)
            .send()
            .with_context(|| format!("download: request {}", request.url))?;

        if !response.status().is_success() {
            return Err(anyhow!(
                "download: request failed with status {}",
                response.status()
            ));
        }

        let bytes = response.bytes().context("download: body")?;
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("download: create {}", self.dir.display()))?;
        let (path, mut file) = create_unique(&self.dir, &request.file_name)
            .with_context(|| format!("download: create file in {}", self.dir.display()))?;
        file.write_all(&bytes)
            .with_context(|| format!("download: write {}", path.display()))?;
        tracing::info!(
            url = %request.url,
            path = %path.display(),
            bytes = bytes.len(),
            "download saved"
        );
        Ok(path)
    }
}

/// Creates the first free file in `dir` for `file_name`: `Lecture.pdf`,
/// then `Lecture (1).pdf`, `Lecture (2).pdf`, ... A name is claimed by
/// creating the file, so concurrent downloads never share one.
pub fn create_unique(dir: &Path, file_name: &str) -> io::Result<(PathBuf, File)> {
    let file_name = sanitize_file_name(file_name);
    let (stem, extension) = match file_name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => (stem.to_string(), Some(ext.to_string())),
        _ => (file_name.clone(), None),
    };

    let mut counter = 0usize;
    loop {
        let name = match (counter, extension.as_deref()) {
            (0, _) => file_name.clone(),
            (_, Some(ext)) => format!("{stem} ({counter}).{ext}"),
            (_, None) => format!("{stem} ({counter})"),
        };
        let candidate = dir.join(name);
        match OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&candidate)
        {
            Ok(file) => return Ok((candidate, file)),
            Err(err) if err.kind() == io::ErrorKind::AlreadyExists => counter += 1,
            Err(err) => return Err(err),
        }
    }
}

fn sanitize_file_name(raw: &str) -> String {
    let cleaned: String = raw
        .trim()
        .chars()
        .map(|ch| match ch {
            '/' | '\\' | ':' | '\0' => '_',
            other => other,
        })
        .collect();
    if cleaned.is_empty() || cleaned == "." || cleaned == ".." {
        crate::config::DEFAULT_DOWNLOAD_NAME.to_string()
    } else {
        cleaned
    }
}
