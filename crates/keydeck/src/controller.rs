use crate::input::Command;
use crate::navigator::Navigator;
use crate::toc::TocPanel;
use crate::view::{self, DeckView, ViewSync};

/// Routes commands to the navigator and TOC panel, then pushes a fresh view.
pub struct Controller {
    navigator: Navigator,
    toc: TocPanel,
    viewport_width: f32,
}

impl Controller {
    pub fn new(navigator: Navigator, toc: TocPanel) -> Self {
        let deck = navigator.deck();
        tracing::info!(
            total = deck.len(),
            essential = deck.essential_count(),
            "deck loaded"
        );
        Self {
            navigator,
            toc,
            viewport_width: f32::INFINITY,
        }
    }

    pub fn navigator(&self) -> &Navigator {
        &self.navigator
    }

    pub fn toc(&self) -> &TocPanel {
        &self.toc
    }

    pub fn set_viewport_width(&mut self, width: f32) {
        self.viewport_width = width;
    }

    pub fn view(&self) -> DeckView {
        view::project(&self.navigator)
    }

    /// Apply one command and resynchronize the view.
    pub fn dispatch(&mut self, command: Command, sink: &mut impl ViewSync) {
        tracing::debug!(?command, "dispatch");
        match command {
            Command::Next => self.navigator.next(),
            Command::Prev => self.navigator.prev(),
            Command::First => self.navigator.first(),
            Command::Last => self.navigator.last(),
            Command::GoTo(index) => {
                self.navigator.go_to(index);
                self.toc.after_jump(self.viewport_width);
            }
            Command::ToggleFilter => self.navigator.toggle_filter(),
            Command::ToggleToc => self.toc.toggle(),
            Command::OpenToc => self.toc.open(),
            Command::CloseToc => self.toc.close(),
        }
        self.navigator.settle();
        sink.sync(&self.view());
    }
}
