use eframe::egui;

/// A user intent, independent of where it came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Next,
    Prev,
    First,
    Last,
    /// Jump picked from the TOC.
    GoTo(usize),
    ToggleFilter,
    ToggleToc,
    OpenToc,
    CloseToc,
}

/// Keyboard bindings. Right/Space advance, Left retreats, Escape closes the TOC.
pub fn command_for_key(key: egui::Key) -> Option<Command> {
    match key {
        egui::Key::ArrowRight | egui::Key::Space => Some(Command::Next),
        egui::Key::ArrowLeft => Some(Command::Prev),
        egui::Key::Home => Some(Command::First),
        egui::Key::End => Some(Command::Last),
        egui::Key::Escape => Some(Command::CloseToc),
        egui::Key::T => Some(Command::ToggleToc),
        egui::Key::E => Some(Command::ToggleFilter),
        _ => None,
    }
}

/// Commands for every bound key pressed this frame, in event order.
pub fn collect_commands(input: &egui::InputState) -> Vec<Command> {
    input
        .events
        .iter()
        .filter_map(|event| match event {
            egui::Event::Key {
                key,
                pressed: true,
                modifiers,
                ..
            } if modifiers.is_none() => command_for_key(*key),
            _ => None,
        })
        .collect()
}
