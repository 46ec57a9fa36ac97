#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PaneState {
    #[default]
    Hidden,
    Visible(String),
}

impl PaneState {
    pub fn is_visible(&self) -> bool {
        matches!(self, PaneState::Visible(_))
    }

    pub fn source(&self) -> Option<&str> {
        match self {
            PaneState::Visible(source) => Some(source.as_str()),
            PaneState::Hidden => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewerKind {
    Document,
    Video,
}

/// The document and video panes. At most one of them is visible.
#[derive(Debug, Clone, Default)]
pub struct Viewers {
    document: PaneState,
    video: PaneState,
    download_target: Option<String>,
    scroll_request: Option<ViewerKind>,
}

impl Viewers {
    pub fn document(&self) -> &PaneState {
        &self.document
    }

    pub fn video(&self) -> &PaneState {
        &self.video
    }

    /// Target of the document pane's download button.
    pub fn download_target(&self) -> Option<&str> {
        self.download_target.as_deref()
    }

    pub fn active(&self) -> Option<ViewerKind> {
        if self.document.is_visible() {
            Some(ViewerKind::Document)
        } else if self.video.is_visible() {
            Some(ViewerKind::Video)
        } else {
            None
        }
    }

    /// Shows `source` in the document pane and hides the video pane. Does
    /// nothing for an empty source.
    pub fn open_document(&mut self, source: &str, download: &str) -> bool {
        if source.is_empty() {
            return false;
        }
        self.document = PaneState::Visible(source.to_string());
        self.download_target = Some(download.to_string());
        self.video = PaneState::Hidden;
        self.scroll_request = Some(ViewerKind::Document);
        true
    }

    /// Shows `source` in the video pane and hides the document pane. Does
    /// nothing for an empty source.
    pub fn open_video(&mut self, source: &str) -> bool {
        if source.is_empty() {
            return false;
        }
        self.video = PaneState::Visible(source.to_string());
        self.document = PaneState::Hidden;
        self.scroll_request = Some(ViewerKind::Video);
        true
    }

    pub fn close_document(&mut self) {
        self.document = PaneState::Hidden;
    }

    pub fn close_video(&mut self) {
        self.video = PaneState::Hidden;
    }

    pub fn close(&mut self, kind: ViewerKind) {
        match kind {
            ViewerKind::Document => self.close_document(),
            ViewerKind::Video => self.close_video(),
        }
    }

    /// Pane that was just opened and should be brought into view. Consumed by
    /// the renderer.
    pub fn take_scroll_request(&mut self) -> Option<ViewerKind> {
        self.scroll_request.take()
    }
}
