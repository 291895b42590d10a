use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Tabs, Wrap};
use ratatui::Frame;
use textdesk_core::{AppViewModel, PanelKind, PanelView, ResultView, SourceKind, UPLOAD_HINT};

use crate::app::Focus;

pub fn render(frame: &mut Frame, view: &AppViewModel, focus: Focus) {
    let [tabs_area, panel_area, footer_area] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .areas(frame.area());

    render_tabs(frame, tabs_area, view);
    render_panel(frame, panel_area, view.active_panel(), focus);
    render_footer(frame, footer_area, view.active_panel(), focus);
}

fn render_tabs(frame: &mut Frame, area: Rect, view: &AppViewModel) {
    let titles = vec![
        PanelKind::Summarizer.title(),
        PanelKind::QuestionAnswering.title(),
    ];
    let selected = match view.active {
        PanelKind::Summarizer => 0,
        PanelKind::QuestionAnswering => 1,
    };
    let tabs = Tabs::new(titles)
        .select(selected)
        .block(Block::bordered().title("Textdesk"))
        .highlight_style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD));
    frame.render_widget(tabs, area);
}

fn render_panel(frame: &mut Frame, area: Rect, panel: &PanelView, focus: Focus) {
    let is_qa = panel.kind == PanelKind::QuestionAnswering;
    let constraints = if is_qa {
        vec![
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Length(6),
            Constraint::Length(5),
            Constraint::Length(1),
            Constraint::Min(4),
        ]
    } else {
        vec![
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Length(6),
            Constraint::Length(1),
            Constraint::Min(4),
        ]
    };
    let chunks = Layout::vertical(constraints).split(area);

    frame.render_widget(source_line(panel), chunks[0]);
    render_input(frame, chunks[1], panel, focus);
    render_preview(frame, chunks[2], panel);
    if is_qa {
        render_questions(frame, chunks[3], panel, focus);
        frame.render_widget(status_line(panel), chunks[4]);
        render_result(frame, chunks[5], panel);
    } else {
        frame.render_widget(status_line(panel), chunks[3]);
        render_result(frame, chunks[4], panel);
    }
}

fn source_line(panel: &PanelView) -> Paragraph<'_> {
    let mut spans = vec![Span::raw("Input Type: ")];
    for choice in panel.source_choices {
        let selected = *choice == panel.source;
        let marker = if selected { "(*) " } else { "( ) " };
        let style = if selected {
            Style::default().add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        spans.push(Span::styled(format!("{marker}{}  ", choice.label()), style));
    }
    Paragraph::new(Line::from(spans))
}

fn render_input(frame: &mut Frame, area: Rect, panel: &PanelView, focus: Focus) {
    let focused = focus == Focus::Source;
    let (title, value) = match panel.source {
        SourceKind::Upload => (format!("File path ({UPLOAD_HINT})"), panel.file_input.as_str()),
        SourceKind::Url => ("Webpage URL".to_string(), panel.url_input.as_str()),
        SourceKind::Paste => ("Paste text".to_string(), panel.resolved_text.as_str()),
    };
    let paragraph = Paragraph::new(value)
        .block(bordered(title, focused))
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

fn render_preview(frame: &mut Frame, area: Rect, panel: &PanelView) {
    let body = panel.preview.as_deref().unwrap_or("");
    let paragraph = Paragraph::new(body)
        .block(Block::bordered().title("Preview Text"))
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

fn render_questions(frame: &mut Frame, area: Rect, panel: &PanelView, focus: Focus) {
    let paragraph = Paragraph::new(panel.questions_input.as_str())
        .block(bordered(
            "Questions (one per line)".to_string(),
            focus == Focus::Questions,
        ))
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

fn status_line(panel: &PanelView) -> Paragraph<'_> {
    if panel.busy {
        Paragraph::new("Loading...").style(Style::default().fg(Color::Yellow))
    } else if let Some(error) = panel.error.as_deref() {
        Paragraph::new(error).style(Style::default().fg(Color::Red))
    } else if panel.submit_enabled {
        Paragraph::new(format!("Ready. Press F5 to {}.", panel.submit_label))
    } else {
        Paragraph::new("Waiting for input.")
    }
}

fn render_result(frame: &mut Frame, area: Rect, panel: &PanelView) {
    let bold = Style::default().add_modifier(Modifier::BOLD);
    let dim = Style::default().fg(Color::DarkGray);
    let lines = match &panel.result {
        None => vec![Line::from("No result yet.")],
        Some(ResultView::Summary(summary)) => vec![
            Line::from(Span::styled("Summary", bold)),
            Line::from(summary.summary.as_str()),
            Line::from(""),
            Line::from(Span::styled("Keywords", bold)),
            Line::from(summary.keywords.join(", ")),
            Line::from(""),
            Line::from(format!("Original Length: {}", summary.original_length_label)),
            Line::from(format!("Summary Length: {}", summary.summary_length_label)),
        ],
        Some(ResultView::Answers(answers)) => {
            let mut lines = Vec::with_capacity(answers.len() * 4);
            for answer in answers {
                lines.push(Line::from(Span::styled(
                    format!("Q: {}", answer.question),
                    bold,
                )));
                lines.push(Line::from(format!("A: {}", answer.answer)));
                lines.push(Line::from(Span::styled(
                    format!("Confidence: {}", answer.confidence_label),
                    dim,
                )));
                lines.push(Line::from(""));
            }
            if lines.is_empty() {
                lines.push(Line::from("No result yet."));
            }
            lines
        }
    };
    let paragraph = Paragraph::new(lines)
        .block(Block::bordered().title("Results"))
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

fn render_footer(frame: &mut Frame, area: Rect, panel: &PanelView, focus: Focus) {
    let mut hints = vec![
        "Tab: switch panel".to_string(),
        "F2: input source".to_string(),
        format!("F5: {}", panel.submit_label),
        "Esc: quit".to_string(),
    ];
    if panel.kind == PanelKind::QuestionAnswering {
        let target = if focus == Focus::Questions {
            "questions"
        } else {
            "input"
        };
        hints.insert(2, format!("F6: edit target ({target})"));
    }
    let paragraph =
        Paragraph::new(hints.join("  |  ")).style(Style::default().fg(Color::DarkGray));
    frame.render_widget(paragraph, area);
}

fn bordered(title: String, focused: bool) -> Block<'static> {
    let block = Block::bordered().title(title);
    if focused {
        block.border_style(Style::default().fg(Color::Cyan))
    } else {
        block
    }
}
