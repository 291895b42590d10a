use textdesk_core::{update, AppState, Msg, PanelKind};

#[test]
fn noop_changes_nothing() {
    let state = AppState::new();
    let before = state.view();
    let (mut state, effects) = update(state, Msg::NoOp);
    assert!(effects.is_empty());
    assert_eq!(state.view(), before);
    assert!(!state.consume_dirty());
}

#[test]
fn rendering_is_a_pure_function_of_state() {
    let state = AppState::new();
    let (state, _effects) = update(
        state,
        Msg::TextPasted {
            panel: PanelKind::QuestionAnswering,
            text: "same text".to_string(),
        },
    );
    assert_eq!(state.view(), state.view());
}

#[test]
fn edits_mark_the_state_dirty_once() {
    let state = AppState::new();
    let (mut state, _effects) = update(
        state,
        Msg::UrlEdited {
            panel: PanelKind::Summarizer,
            text: "https://example.com".to_string(),
        },
    );
    assert!(state.view().dirty);
    assert!(state.consume_dirty());
    assert!(!state.consume_dirty());
    assert!(!state.view().dirty);
}

#[test]
fn tab_selection_switches_the_active_panel() {
    let state = AppState::new();
    assert_eq!(state.view().active, PanelKind::Summarizer);
    let (state, _effects) = update(state, Msg::TabSelected(PanelKind::QuestionAnswering));
    let view = state.view();
    assert_eq!(view.active, PanelKind::QuestionAnswering);
    assert_eq!(view.active_panel().title, "Question Answering");
}
