mod quiz;
mod result;

use ratatui::{prelude::*, widgets::Block};

use crate::app::App;

pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();
    frame.render_widget(Block::default().bg(Color::Reset), area);

    let Some(snapshot) = app.snapshot() else {
        return;
    };

    if snapshot.is_finished() {
        result::render(frame, area, app, &snapshot);
    } else {
        quiz::render(frame, area, app, &snapshot);
    }
}
