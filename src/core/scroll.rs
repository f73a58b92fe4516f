//! Bounded scroll positions shared by every preview widget

/// How the maximum position is derived from content and viewport
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ScrollMode {
    /// Position is a highlighted item (table row): max = len - 1
    Cursor,
    /// Position is the first visible line: max = len - viewport
    #[default]
    Viewport,
}

/// A position that can never leave `[0, max]`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScrollState {
    position: usize,
    content_len: usize,
    viewport: usize,
    mode: ScrollMode,
}

impl ScrollState {
    /// Viewport-style scroll over `content_len` lines
    pub fn viewport(content_len: usize) -> Self {
        Self {
            position: 0,
            content_len,
            viewport: 1,
            mode: ScrollMode::Viewport,
        }
    }

    /// Cursor-style scroll over `content_len` items
    pub fn cursor(content_len: usize) -> Self {
        Self {
            position: 0,
            content_len,
            viewport: 1,
            mode: ScrollMode::Cursor,
        }
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn content_len(&self) -> usize {
        self.content_len
    }

    /// Visible lines (at least 1)
    pub fn page(&self) -> usize {
        self.viewport.max(1)
    }

    /// Largest reachable position
    pub fn max(&self) -> usize {
        match self.mode {
            ScrollMode::Cursor => self.content_len.saturating_sub(1),
            ScrollMode::Viewport => self.content_len.saturating_sub(self.page()),
        }
    }

    /// Update the viewport size (called on every render) and re-clamp
    pub fn set_viewport(&mut self, viewport: usize) {
        self.viewport = viewport;
        self.clamp();
    }

    /// Replace the content length and re-clamp
    pub fn set_content_len(&mut self, content_len: usize) {
        self.content_len = content_len;
        self.clamp();
    }

    pub fn step_back(&mut self, n: usize) {
        self.position = self.position.saturating_sub(n);
    }

    pub fn step_forward(&mut self, n: usize) {
        self.position = self.position.saturating_add(n).min(self.max());
    }

    pub fn page_back(&mut self) {
        self.step_back(self.page());
    }

    pub fn page_forward(&mut self) {
        self.step_forward(self.page());
    }

    pub fn to_start(&mut self) {
        self.position = 0;
    }

    pub fn to_end(&mut self) {
        self.position = self.max();
    }

    fn clamp(&mut self) {
        self.position = self.position.min(self.max());
    }
}
