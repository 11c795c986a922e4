use crate::app::{App, HELP_TEXT};
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::prelude::{Color, Line, Modifier, Span, Style, Stylize};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;
use starmatch_core::{Digit, RoundStatus};

const STARS_PER_ROW: usize = 3;

pub fn draw(frame: &mut Frame, app: &App) {
    let root = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5),
            Constraint::Min(9),
            Constraint::Length(3),
            Constraint::Length(8),
        ])
        .split(frame.area());

    draw_header(frame, root[0], app);

    let middle = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(root[1]);

    if app.snapshot().status == RoundStatus::Active {
        draw_stars(frame, middle[0], app);
    } else {
        draw_play_again(frame, middle[0], app);
    }
    draw_numbers(frame, middle[1], app);
    draw_timer(frame, root[2], app);
    draw_events(frame, root[3], app);

    if app.show_help {
        draw_help_popup(frame);
    }
}

fn draw_header(frame: &mut Frame, area: Rect, app: &App) {
    let lines = vec![
        Line::from(HELP_TEXT),
        Line::from(format!("Status: {}", app.status_line)),
    ];
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!("Star Match #{}", app.game_id()).bold());
    let paragraph = Paragraph::new(lines).wrap(Wrap { trim: true }).block(block);
    frame.render_widget(paragraph, area);
}

fn draw_stars(frame: &mut Frame, area: Rect, app: &App) {
    let stars = app.snapshot().stars as usize;
    let lines: Vec<Line<'_>> = (0..stars)
        .collect::<Vec<_>>()
        .chunks(STARS_PER_ROW)
        .map(|row| {
            let text = vec!["★"; row.len()].join("  ");
            Line::from(Span::styled(text, Style::default().fg(Color::Yellow)))
        })
        .collect();
    let block = Block::default().borders(Borders::ALL).title("Stars");
    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(block),
        area,
    );
}

fn draw_play_again(frame: &mut Frame, area: Rect, app: &App) {
    let (message, color) = if app.snapshot().status == RoundStatus::Lost {
        ("Game Over", Color::Red)
    } else {
        ("You Win!", Color::Green)
    };
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            message,
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from("press n to play again"),
    ];
    let block = Block::default().borders(Borders::ALL).title("Result");
    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(block),
        area,
    );
}

fn draw_numbers(frame: &mut Frame, area: Rect, app: &App) {
    let snapshot = app.snapshot();
    let digits: Vec<Digit> = Digit::all().collect();
    let mut lines = Vec::new();
    for row in digits.chunks(3) {
        let mut spans = Vec::new();
        for digit in row {
            let status = snapshot.digit_status(*digit);
            let mut style = Style::default()
                .fg(Color::Black)
                .bg(app.config.theme.color_for(status));
            if app.cursor_digit() == Some(*digit) {
                style = style.add_modifier(Modifier::BOLD | Modifier::UNDERLINED);
            }
            spans.push(Span::styled(format!("  {digit}  "), style));
            spans.push(Span::raw(" "));
        }
        lines.push(Line::from(spans));
        lines.push(Line::from(""));
    }
    let block = Block::default().borders(Borders::ALL).title("Numbers");
    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(block),
        area,
    );
}

fn draw_timer(frame: &mut Frame, area: Rect, app: &App) {
    let snapshot = app.snapshot();
    let style = if snapshot.seconds_left <= 3 && snapshot.status == RoundStatus::Active {
        Style::default().fg(Color::Red)
    } else {
        Style::default()
    };
    let line = Line::from(Span::styled(
        format!("Time Remaining: {}", snapshot.seconds_left),
        style,
    ));
    frame.render_widget(
        Paragraph::new(line)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL)),
        area,
    );
}

fn draw_events(frame: &mut Frame, area: Rect, app: &App) {
    let capacity = area.height.saturating_sub(2) as usize;
    let start = app.event_log.len().saturating_sub(capacity);
    let lines: Vec<Line<'_>> = app
        .event_log
        .iter()
        .skip(start)
        .map(|line| Line::from(line.clone()))
        .collect();
    let block = Block::default().borders(Borders::ALL).title("Events");
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn draw_help_popup(frame: &mut Frame) {
    let area = centered_rect(60, 50, frame.area());
    frame.render_widget(Clear, area);
    let lines = vec![
        Line::from("1-9 pick or drop a digit"),
        Line::from("arrows/hjkl move | space/enter pick or drop"),
        Line::from("n play again once the round is over"),
        Line::from("? help | esc close | q quit"),
    ];
    let block = Block::default()
        .title("Help")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    frame.render_widget(
        Paragraph::new(lines).block(block).wrap(Wrap { trim: true }),
        area,
    );
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
