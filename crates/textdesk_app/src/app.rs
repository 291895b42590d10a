use std::sync::mpsc;
use std::time::Duration;

use anyhow::Context;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use desk_logging::desk_info;
use ratatui::DefaultTerminal;
use textdesk_client::ApiSettings;
use textdesk_core::{update, AppState, AppViewModel, Msg, PanelKind, PanelView, SourceKind};

use crate::effects::EffectRunner;
use crate::ui;

const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Which part of the active panel keyboard input currently edits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    /// The input belonging to the selected source kind.
    Source,
    /// The questions buffer (question-answering panel only).
    Questions,
}

pub fn run_app() -> anyhow::Result<()> {
    let terminal = ratatui::init();
    let result = event_loop(terminal);
    ratatui::restore();
    result
}

fn api_settings() -> ApiSettings {
    let mut settings = ApiSettings::default();
    if let Ok(base) = std::env::var("TEXTDESK_API") {
        if !base.trim().is_empty() {
            settings.base_url = base.trim().to_string();
        }
    }
    settings
}

fn event_loop(mut terminal: DefaultTerminal) -> anyhow::Result<()> {
    let (msg_tx, msg_rx) = mpsc::channel::<Msg>();
    let settings = api_settings();
    desk_info!("task service at {}", settings.base_url);
    let runner = EffectRunner::new(msg_tx.clone(), settings).context("starting task client")?;

    let mut state = AppState::new();
    let mut focus = Focus::Source;
    terminal.draw(|frame| ui::render(frame, &state.view(), focus))?;

    loop {
        let mut redraw = false;

        if event::poll(POLL_INTERVAL)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => match key.code {
                    KeyCode::Esc => break,
                    KeyCode::F(6) => {
                        if state.active() == PanelKind::QuestionAnswering {
                            focus = toggle(focus);
                            redraw = true;
                        }
                    }
                    _ => {
                        if key.code == KeyCode::Tab {
                            focus = Focus::Source;
                        }
                        if let Some(msg) = msg_for_key(&state.view(), focus, &key) {
                            let _ = msg_tx.send(msg);
                        }
                    }
                },
                Event::Resize(_, _) => redraw = true,
                _ => {}
            }
        }

        while let Ok(msg) = msg_rx.try_recv() {
            let (next, effects) = update(std::mem::take(&mut state), msg);
            state = next;
            runner.enqueue(effects);
            redraw |= state.consume_dirty();
        }

        if redraw {
            terminal.draw(|frame| ui::render(frame, &state.view(), focus))?;
        }
    }
    Ok(())
}

fn toggle(focus: Focus) -> Focus {
    match focus {
        Focus::Source => Focus::Questions,
        Focus::Questions => Focus::Source,
    }
}

fn other_panel(panel: PanelKind) -> PanelKind {
    match panel {
        PanelKind::Summarizer => PanelKind::QuestionAnswering,
        PanelKind::QuestionAnswering => PanelKind::Summarizer,
    }
}

fn next_source(panel: &PanelView) -> SourceKind {
    let choices = panel.source_choices;
    let index = choices
        .iter()
        .position(|choice| *choice == panel.source)
        .unwrap_or(0);
    choices[(index + 1) % choices.len()]
}

enum EditKind {
    Push(char),
    Pop,
}

fn msg_for_key(view: &AppViewModel, focus: Focus, key: &KeyEvent) -> Option<Msg> {
    if key
        .modifiers
        .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
    {
        return None;
    }
    let panel = view.active_panel();
    let kind = panel.kind;
    let questions_focused = focus == Focus::Questions && kind == PanelKind::QuestionAnswering;

    match key.code {
        KeyCode::Tab => Some(Msg::TabSelected(other_panel(view.active))),
        KeyCode::F(2) => Some(Msg::SourceSelected {
            panel: kind,
            source: next_source(panel),
        }),
        KeyCode::F(5) => Some(Msg::SubmitClicked { panel: kind }),
        KeyCode::Enter if questions_focused => Some(Msg::QuestionsEdited {
            panel: kind,
            text: format!("{}\n", panel.questions_input),
        }),
        KeyCode::Enter => match panel.source {
            SourceKind::Url => Some(Msg::LoadUrlRequested { panel: kind }),
            SourceKind::Upload => Some(Msg::UploadRequested { panel: kind }),
            SourceKind::Paste => Some(Msg::TextPasted {
                panel: kind,
                text: format!("{}\n", panel.resolved_text),
            }),
        },
        KeyCode::Char(c) => Some(edit_msg(panel, questions_focused, EditKind::Push(c))),
        KeyCode::Backspace => Some(edit_msg(panel, questions_focused, EditKind::Pop)),
        _ => None,
    }
}

fn edit_msg(panel: &PanelView, questions_focused: bool, edit: EditKind) -> Msg {
    let kind = panel.kind;
    let buffer = if questions_focused {
        &panel.questions_input
    } else {
        match panel.source {
            SourceKind::Url => &panel.url_input,
            SourceKind::Upload => &panel.file_input,
            SourceKind::Paste => &panel.resolved_text,
        }
    };
    let mut text = buffer.clone();
    match edit {
        EditKind::Push(c) => text.push(c),
        EditKind::Pop => {
            text.pop();
        }
    }
    if questions_focused {
        Msg::QuestionsEdited { panel: kind, text }
    } else {
        match panel.source {
            SourceKind::Url => Msg::UrlEdited { panel: kind, text },
            SourceKind::Upload => Msg::FileEdited { panel: kind, text },
            SourceKind::Paste => Msg::TextPasted { panel: kind, text },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{msg_for_key, Focus};
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use textdesk_core::{update, AppState, Msg, PanelKind, SourceKind};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn typing_edits_the_url_buffer_when_url_source_is_selected() {
        let state = AppState::new();
        let (state, _effects) = update(
            state,
            Msg::SourceSelected {
                panel: PanelKind::Summarizer,
                source: SourceKind::Url,
            },
        );
        let msg = msg_for_key(&state.view(), Focus::Source, &key(KeyCode::Char('h'))).unwrap();
        assert_eq!(
            msg,
            Msg::UrlEdited {
                panel: PanelKind::Summarizer,
                text: "h".to_string(),
            }
        );
    }

    #[test]
    fn enter_triggers_a_url_load() {
        let state = AppState::new();
        let (state, _effects) = update(
            state,
            Msg::SourceSelected {
                panel: PanelKind::Summarizer,
                source: SourceKind::Url,
            },
        );
        let msg = msg_for_key(&state.view(), Focus::Source, &key(KeyCode::Enter)).unwrap();
        assert_eq!(
            msg,
            Msg::LoadUrlRequested {
                panel: PanelKind::Summarizer,
            }
        );
    }

    #[test]
    fn questions_focus_routes_edits_to_the_questions_buffer() {
        let state = AppState::new();
        let (state, _effects) = update(state, Msg::TabSelected(PanelKind::QuestionAnswering));
        let msg = msg_for_key(&state.view(), Focus::Questions, &key(KeyCode::Char('Q'))).unwrap();
        assert_eq!(
            msg,
            Msg::QuestionsEdited {
                panel: PanelKind::QuestionAnswering,
                text: "Q".to_string(),
            }
        );
    }

    #[test]
    fn paste_edits_become_resolved_text() {
        let state = AppState::new();
        let (state, _effects) = update(state, Msg::TabSelected(PanelKind::QuestionAnswering));
        let msg = msg_for_key(&state.view(), Focus::Source, &key(KeyCode::Char('x'))).unwrap();
        assert_eq!(
            msg,
            Msg::TextPasted {
                panel: PanelKind::QuestionAnswering,
                text: "x".to_string(),
            }
        );
    }
}
