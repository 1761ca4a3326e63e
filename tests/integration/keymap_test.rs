use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use wellz::ui::monitor_tui::{map_key, Action, InputMode, Section};

fn press(code: KeyCode) -> Action {
    map_key(KeyEvent::new(code, KeyModifiers::NONE), InputMode::Normal, true)
}

#[test]
fn test_normal_mode_bindings() {
    let cases = [
        (KeyCode::Char('q'), Action::Quit),
        (KeyCode::Char('k'), Action::Up),
        (KeyCode::Up, Action::Up),
        (KeyCode::Char('G'), Action::Bottom),
        (KeyCode::Home, Action::Top),
        (KeyCode::PageDown, Action::PageDown),
        (KeyCode::Char('/'), Action::StartSearch),
        (KeyCode::Esc, Action::Cancel),
        (KeyCode::Char('K'), Action::TerminateSelected),
        (KeyCode::Char('s'), Action::OpenSignalMenu),
        (KeyCode::Char('t'), Action::ToggleTree),
        (KeyCode::Char('o'), Action::CycleSort),
        (KeyCode::Char('3'), Action::ToggleSection(Section::Network)),
        (KeyCode::Char('p'), Action::ToggleProcesses),
        (KeyCode::Char('?'), Action::ToggleHelp),
        (KeyCode::Char('='), Action::Faster),
        (KeyCode::Char('-'), Action::Slower),
        (KeyCode::Char('r'), Action::ResetView),
        (KeyCode::Char('R'), Action::ReloadConfig),
    ];
    for (code, expected) in cases {
        assert_eq!(press(code), expected, "{:?}", code);
    }
}

#[test]
fn test_signal_menu_bindings() {
    let key = |code| map_key(KeyEvent::new(code, KeyModifiers::NONE), InputMode::SignalMenu, true);
    assert_eq!(key(KeyCode::Char('j')), Action::SignalMenuDown);
    assert_eq!(key(KeyCode::Enter), Action::SignalMenuConfirm);
    assert_eq!(key(KeyCode::Esc), Action::Cancel);
}

#[test]
fn test_help_mode_swallows_other_keys() {
    let key = |code| map_key(KeyEvent::new(code, KeyModifiers::NONE), InputMode::Help, true);
    assert_eq!(key(KeyCode::Char('t')), Action::None);
    assert_eq!(key(KeyCode::Char('?')), Action::ToggleHelp);
}
