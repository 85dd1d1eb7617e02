use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Gauge, Padding, Paragraph, Wrap},
};

use crate::app::App;
use crate::engine::SessionSnapshot;
use crate::models::Question;

const OPTION_LABELS: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";

pub fn render(frame: &mut Frame, area: Rect, app: &App, snapshot: &SessionSnapshot) {
    let Some(question) = app.current_question() else {
        return;
    };

    let chunks = Layout::vertical([
        Constraint::Length(2),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(4),
        Constraint::Fill(1),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .margin(1)
    .split(area);

    render_header(frame, chunks[0], snapshot);
    render_clock(frame, chunks[1], snapshot);
    render_progress(frame, chunks[2], snapshot);
    render_question_text(frame, chunks[3], &question.text);
    render_options(frame, chunks[4], question, app.highlighted_option(), snapshot);
    render_feedback(frame, chunks[5], snapshot);
    render_picker(frame, chunks[6], snapshot);
    render_controls(frame, chunks[7], snapshot);
}

fn render_header(frame: &mut Frame, area: Rect, snapshot: &SessionSnapshot) {
    let mut meta = format!("{} questions", snapshot.total_questions);
    if !snapshot.grade.is_empty() || !snapshot.category.is_empty() {
        meta.push_str(&format!("  ·  {} - {}", snapshot.grade, snapshot.category));
    }

    let lines = vec![
        Line::from(Span::styled(
            snapshot.title.as_str(),
            Style::default().fg(Color::Cyan).bold(),
        )),
        Line::from(Span::styled(meta, Style::default().fg(Color::DarkGray))),
    ];
    frame.render_widget(Paragraph::new(lines), area);
}

fn render_clock(frame: &mut Frame, area: Rect, snapshot: &SessionSnapshot) {
    let color = if snapshot.low_time {
        Color::Red
    } else {
        Color::Indexed(63)
    };
    let ratio = f64::from(snapshot.time_left_percent.min(100)) / 100.0;

    let widget = Gauge::default()
        .gauge_style(Style::default().fg(color))
        .ratio(ratio)
        .label(format!("{} left", snapshot.remaining_clock()));
    frame.render_widget(widget, area);
}

fn render_progress(frame: &mut Frame, area: Rect, snapshot: &SessionSnapshot) {
    let progress = format!(
        "Question {}/{}  ·  {} answered  ·  {}%",
        snapshot.current_index + 1,
        snapshot.total_questions,
        snapshot.answered_count,
        snapshot.progress_percent,
    );
    let widget = Paragraph::new(progress)
        .alignment(Alignment::Right)
        .fg(Color::DarkGray);
    frame.render_widget(widget, area);
}

fn render_question_text(frame: &mut Frame, area: Rect, text: &str) {
    let widget = Paragraph::new(text)
        .wrap(Wrap { trim: true })
        .fg(Color::White)
        .bold();
    frame.render_widget(widget, area);
}

fn option_label(index: usize) -> char {
    OPTION_LABELS
        .get(index)
        .map_or('?', |label| char::from(*label))
}

fn render_options(
    frame: &mut Frame,
    area: Rect,
    question: &Question,
    highlighted: usize,
    snapshot: &SessionSnapshot,
) {
    let chosen = snapshot.answers[snapshot.current_index];
    let feedback = snapshot
        .feedback
        .filter(|f| f.question == snapshot.current_index);

    let mut lines: Vec<Line> = Vec::with_capacity(question.options.len() * 2);
    for (index, option) in question.options.iter().enumerate() {
        let is_highlighted = index == highlighted;
        let is_chosen = chosen == Some(index);

        let style = match feedback {
            Some(f) if is_chosen && f.correct => Style::default().fg(Color::Green).bold(),
            Some(_) if is_chosen => Style::default().fg(Color::Red).bold(),
            Some(_) if index == question.correct_index => Style::default().fg(Color::Green),
            _ if is_highlighted => Style::default().fg(Color::Cyan).bold(),
            _ if is_chosen => Style::default().fg(Color::Yellow),
            _ => Style::default().fg(Color::Gray),
        };
        let marker = if is_highlighted { ">" } else { " " };
        let check = if is_chosen { "*" } else { " " };

        lines.push(Line::from(vec![
            Span::styled(format!(" {} ", marker), style),
            Span::styled(format!("{}. ", option_label(index)), style),
            Span::styled(option.as_str(), style),
            Span::styled(format!(" {}", check), style),
        ]));
        lines.push(Line::from(""));
    }

    let widget = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::TOP)
            .border_style(Color::DarkGray)
            .padding(Padding::vertical(1)),
    );
    frame.render_widget(widget, area);
}

fn render_feedback(frame: &mut Frame, area: Rect, snapshot: &SessionSnapshot) {
    let line = match snapshot.feedback {
        Some(f) if f.correct => Line::from("Correct! Well done.".fg(Color::Green).bold()),
        Some(_) => Line::from("Wrong answer.".fg(Color::Red).bold()),
        None => Line::from(""),
    };
    frame.render_widget(Paragraph::new(line).alignment(Alignment::Center), area);
}

fn render_picker(frame: &mut Frame, area: Rect, snapshot: &SessionSnapshot) {
    let spans: Vec<Span> = snapshot
        .answers
        .iter()
        .enumerate()
        .map(|(index, answer)| {
            let style = if index == snapshot.current_index {
                Style::default().fg(Color::Black).bg(Color::Cyan)
            } else if answer.is_some() {
                Style::default().fg(Color::Green)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            Span::styled(format!(" {} ", index + 1), style)
        })
        .collect();

    frame.render_widget(
        Paragraph::new(Line::from(spans)).alignment(Alignment::Center),
        area,
    );
}

fn render_controls(frame: &mut Frame, area: Rect, snapshot: &SessionSnapshot) {
    let text = if snapshot.is_last_question() {
        "j/k move  ·  enter answer  ·  h prev  ·  f finish  ·  q quit"
    } else {
        "j/k move  ·  enter answer  ·  h/l prev/next  ·  f finish  ·  q quit"
    };
    let widget = Paragraph::new(text)
        .alignment(Alignment::Center)
        .fg(Color::DarkGray);
    frame.render_widget(widget, area);
}
