/// Viewports narrower than this close the TOC after a jump.
pub const DEFAULT_NARROW_WIDTH: f32 = 768.0;

/// Open/closed state of the table of contents side panel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TocPanel {
    open: bool,
    narrow_width: f32,
}

impl Default for TocPanel {
    fn default() -> Self {
        Self::new(DEFAULT_NARROW_WIDTH)
    }
}

impl TocPanel {
    pub fn new(narrow_width: f32) -> Self {
        Self {
            open: false,
            narrow_width,
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn open(&mut self) {
        self.open = true;
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    pub fn toggle(&mut self) {
        self.open = !self.open;
    }

    /// Called after a jump was picked from the list.
    pub fn after_jump(&mut self, viewport_width: f32) {
        if viewport_width < self.narrow_width {
            self.close();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle() {
        let mut panel = TocPanel::default();
        assert!(!panel.is_open());
        panel.toggle();
        assert!(panel.is_open());
        panel.toggle();
        assert!(!panel.is_open());
    }

    #[test]
    fn test_close_is_idempotent() {
        let mut panel = TocPanel::default();
        panel.close();
        assert!(!panel.is_open());
        panel.open();
        panel.close();
        panel.close();
        assert!(!panel.is_open());
    }

    #[test]
    fn test_auto_close_only_when_narrow() {
        let mut panel = TocPanel::default();
        panel.open();
        panel.after_jump(1280.0);
        assert!(panel.is_open());
        panel.after_jump(767.0);
        assert!(!panel.is_open());
    }

    #[test]
    fn test_custom_breakpoint() {
        let mut panel = TocPanel::new(1000.0);
        panel.open();
        panel.after_jump(900.0);
        assert!(!panel.is_open());
    }
}
