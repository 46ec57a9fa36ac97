use std::process::{Command, Stdio};

use anyhow::{anyhow, Context, Result};

use crate::config::PlayerConfig;

const URL_PLACEHOLDER: &str = "%URL%";

pub fn open_in_browser(url: &str) -> Result<()> {
    if url.trim().is_empty() {
        return Err(anyhow!("link is empty"));
    }
    webbrowser::open(url).with_context(|| format!("open {url} in browser"))?;
    Ok(())
}

/// Expands the configured video command for `url`. Returns `None` when no
/// command is configured. A template without `%URL%` gets the URL appended.
pub fn video_command_line(cfg: &PlayerConfig, url: &str) -> Option<(String, Vec<String>)> {
    let (program, rest) = cfg.video_command.split_first()?;
    let mut substituted = false;
    let mut args: Vec<String> = rest
        .iter()
        .map(|arg| {
            if arg.contains(URL_PLACEHOLDER) {
                substituted = true;
                arg.replace(URL_PLACEHOLDER, url)
            } else {
                arg.clone()
            }
        })
        .collect();
    if !substituted {
        args.push(url.to_string());
    }
    Some((program.clone(), args))
}

/// Hands a video link to the configured player, or to the browser when no
/// player is set up.
pub fn play_video(cfg: &PlayerConfig, url: &str) -> Result<()> {
    if url.trim().is_empty() {
        return Err(anyhow!("video link is empty"));
    }
    let Some((program, args)) = video_command_line(cfg, url) else {
        return open_in_browser(url);
    };

    Command::new(&program)
        .args(&args)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .with_context(|| format!("launch {program} for {url}"))?;
    tracing::debug!(%program, %url, "video player launched");
    Ok(())
}

/// Outbound side of the UI: links that leave the terminal.
pub trait Launcher: Send + Sync {
    fn open_link(&self, url: &str) -> Result<()>;
    fn play_video(&self, url: &str) -> Result<()>;
}

pub struct SystemLauncher {
    cfg: PlayerConfig,
}

impl SystemLauncher {
    pub fn new(cfg: PlayerConfig) -> Self {
        Self { cfg }
    }
}

impl Launcher for SystemLauncher {
    fn open_link(&self, url: &str) -> Result<()> {
        open_in_browser(url)
    }

    fn play_video(&self, url: &str) -> Result<()> {
        play_video(&self.cfg, url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cfg(command: &[&str]) -> PlayerConfig {
        PlayerConfig {
            video_command: command.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn substitutes_placeholder() {
        let line = video_command_line(&cfg(&["mpv", "--fs", "%URL%"]), "https://y/v1").unwrap();
        assert_eq!(line.0, "mpv");
        assert_eq!(line.1, vec!["--fs", "https://y/v1"]);
    }

    #[test]
    fn appends_url_without_placeholder() {
        let line = video_command_line(&cfg(&["vlc"]), "https://y/v1").unwrap();
        assert_eq!(line.1, vec!["https://y/v1"]);
    }

    #[test]
    fn empty_command_means_browser() {
        assert!(video_command_line(&cfg(&[]), "https://y/v1").is_none());
    }

    #[test]
    fn empty_links_are_rejected() {
        assert!(open_in_browser("").is_err());
        assert!(play_video(&cfg(&["mpv"]), "  ").is_err());
    }
}
