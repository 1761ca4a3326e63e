use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// What the keyboard is currently talking to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    #[default]
    Normal,
    /// Typing a filter after `/`
    Search,
    SignalMenu,
    Help,
}

/// Dashboard panels that can be toggled with the number keys
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Cpu,
    Memory,
    Network,
    Disk,
    Gpu,
    Security,
}

impl Section {
    /// Order of the `1`..`6` keys
    pub const ALL: [Section; 6] = [
        Section::Cpu,
        Section::Memory,
        Section::Network,
        Section::Disk,
        Section::Gpu,
        Section::Security,
    ];
}

/// Actions the dashboard can perform
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    Up,
    Down,
    Top,
    Bottom,
    PageUp,
    PageDown,
    StartSearch,
    SearchInput(char),
    SearchBackspace,
    SearchSubmit,
    /// Esc: close the open overlay or clear the filter
    Cancel,
    /// `K`: SIGTERM the selected process
    TerminateSelected,
    OpenSignalMenu,
    SignalMenuUp,
    SignalMenuDown,
    SignalMenuConfirm,
    ToggleTree,
    CycleSort,
    ToggleSection(Section),
    ToggleProcesses,
    ToggleHelp,
    NextTheme,
    PrevTheme,
    /// Shorter refresh interval
    Faster,
    /// Longer refresh interval
    Slower,
    ResetView,
    ReloadConfig,
    None,
}

/// Map a key press to an action for the given mode.
pub fn map_key(key: KeyEvent, mode: InputMode, vim_mode: bool) -> Action {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Action::Quit;
    }

    match mode {
        InputMode::Normal => map_normal(key.code, vim_mode),
        InputMode::Search => match key.code {
            KeyCode::Esc => Action::Cancel,
            KeyCode::Enter => Action::SearchSubmit,
            KeyCode::Backspace => Action::SearchBackspace,
            KeyCode::Char(c) => Action::SearchInput(c),
            _ => Action::None,
        },
        InputMode::SignalMenu => match key.code {
            KeyCode::Esc | KeyCode::Char('q') => Action::Cancel,
            KeyCode::Enter => Action::SignalMenuConfirm,
            KeyCode::Up => Action::SignalMenuUp,
            KeyCode::Down => Action::SignalMenuDown,
            KeyCode::Char('k') if vim_mode => Action::SignalMenuUp,
            KeyCode::Char('j') if vim_mode => Action::SignalMenuDown,
            _ => Action::None,
        },
        InputMode::Help => match key.code {
            KeyCode::Char('q') => Action::Quit,
            KeyCode::Esc | KeyCode::Char('?') => Action::ToggleHelp,
            _ => Action::None,
        },
    }
}

fn map_normal(code: KeyCode, vim_mode: bool) -> Action {
    match code {
        KeyCode::Char('q') => Action::Quit,
        KeyCode::Up => Action::Up,
        KeyCode::Down => Action::Down,
        KeyCode::Home => Action::Top,
        KeyCode::End => Action::Bottom,
        KeyCode::PageUp => Action::PageUp,
        KeyCode::PageDown => Action::PageDown,
        KeyCode::Esc => Action::Cancel,
        KeyCode::Char('k') if vim_mode => Action::Up,
        KeyCode::Char('j') if vim_mode => Action::Down,
        KeyCode::Char('g') if vim_mode => Action::Top,
        KeyCode::Char('G') if vim_mode => Action::Bottom,
        KeyCode::Char('/') => Action::StartSearch,
        KeyCode::Char('K') => Action::TerminateSelected,
        KeyCode::Char('s') => Action::OpenSignalMenu,
        KeyCode::Char('t') => Action::ToggleTree,
        KeyCode::Char('o') => Action::CycleSort,
        KeyCode::Char('p') => Action::ToggleProcesses,
        KeyCode::Char('?') => Action::ToggleHelp,
        KeyCode::Char('c') => Action::NextTheme,
        KeyCode::Char('C') => Action::PrevTheme,
        KeyCode::Char('+') | KeyCode::Char('=') => Action::Faster,
        KeyCode::Char('-') => Action::Slower,
        KeyCode::Char('r') => Action::ResetView,
        KeyCode::Char('R') => Action::ReloadConfig,
        KeyCode::Char(c @ '1'..='6') => {
            let index = c as usize - '1' as usize;
            Action::ToggleSection(Section::ALL[index])
        }
        _ => Action::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_ctrl_c_quits_in_every_mode() {
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        for mode in [
            InputMode::Normal,
            InputMode::Search,
            InputMode::SignalMenu,
            InputMode::Help,
        ] {
            assert_eq!(map_key(ctrl_c, mode, true), Action::Quit);
        }
    }

    #[test]
    fn test_plain_c_cycles_theme() {
        assert_eq!(map_key(key(KeyCode::Char('c')), InputMode::Normal, true), Action::NextTheme);
        assert_eq!(map_key(key(KeyCode::Char('C')), InputMode::Normal, true), Action::PrevTheme);
    }

    #[test]
    fn test_vim_keys_respect_setting() {
        assert_eq!(map_key(key(KeyCode::Char('j')), InputMode::Normal, true), Action::Down);
        assert_eq!(map_key(key(KeyCode::Char('j')), InputMode::Normal, false), Action::None);
        assert_eq!(map_key(key(KeyCode::Down), InputMode::Normal, false), Action::Down);
    }

    #[test]
    fn test_number_keys_toggle_sections() {
        assert_eq!(
            map_key(key(KeyCode::Char('1')), InputMode::Normal, true),
            Action::ToggleSection(Section::Cpu)
        );
        assert_eq!(
            map_key(key(KeyCode::Char('6')), InputMode::Normal, true),
            Action::ToggleSection(Section::Security)
        );
        assert_eq!(map_key(key(KeyCode::Char('7')), InputMode::Normal, true), Action::None);
    }

    #[test]
    fn test_search_mode_captures_letters() {
        assert_eq!(
            map_key(key(KeyCode::Char('q')), InputMode::Search, true),
            Action::SearchInput('q')
        );
        assert_eq!(map_key(key(KeyCode::Esc), InputMode::Search, true), Action::Cancel);
    }
}
