use bluehour::{
    chart::{self, ChartBar},
    engine::TimerStatus,
    settings::Mode,
};
use ratatui::{layout::Margin, prelude::*, widgets::*};

use crate::app::{AppState, SettingsField, View, alarm_label};

// ============================================================================
// UI Rendering
// ============================================================================

pub fn render_ui(f: &mut Frame, app: &AppState) {
    match app.current_view {
        View::Timer => render_timer(f, app),
        View::Analytics => render_analytics(f, app),
        View::Settings => render_settings(f, app),
        View::Help => render_help(f, app),
    }
}

fn mode_color(app: &AppState, mode: Mode) -> Color {
    match mode {
        Mode::Pomodoro => app.theme.pomodoro_color,
        Mode::Short => app.theme.short_color,
        Mode::Long => app.theme.long_color,
    }
}

fn panel<'a>(title: &'a str, app: &AppState) -> Block<'a> {
    Block::default()
        .title(title)
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(app.theme.border_color))
}

fn render_timer(f: &mut Frame, app: &AppState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(1), Constraint::Length(3)])
        .split(f.size());

    let header = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(app.theme.border_color))
        .title(Span::styled(
            " 🌌 BLUE HOUR ",
            Style::default().fg(app.theme.accent_color).add_modifier(Modifier::BOLD),
        ));
    f.render_widget(header, chunks[0]);

    let sections = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(10),
            Constraint::Length(1), Constraint::Length(1),
            Constraint::Length(3), Constraint::Length(1),
            Constraint::Length(1), Constraint::Length(1),
            Constraint::Length(3), Constraint::Length(1),
            Constraint::Length(1), Constraint::Length(1),
            Constraint::Length(2),
            Constraint::Percentage(10),
        ])
        .split(chunks[1]);

    // Mode tabs
    let mut tabs = Vec::new();
    for (i, mode) in Mode::ALL.iter().enumerate() {
        let style = if *mode == app.display.highlighted {
            Style::default()
                .fg(Color::Black)
                .bg(mode_color(app, *mode))
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        tabs.push(Span::styled(format!(" {} {} ", i + 1, mode.name()), style));
        tabs.push(Span::raw("  "));
    }
    f.render_widget(Paragraph::new(Line::from(tabs)).alignment(Alignment::Center), sections[1]);

    // Time
    let color = mode_color(app, app.engine.state().mode);
    f.render_widget(
        Paragraph::new(app.display.time_str())
            .style(Style::default().fg(color).add_modifier(Modifier::BOLD))
            .alignment(Alignment::Center),
        sections[3],
    );

    // Status
    let status = app.engine.state().status;
    let indicator = match status {
        TimerStatus::Running if app.animation_frame < 10 => "● ",
        TimerStatus::Running => "○ ",
        TimerStatus::Paused => "⏸  ",
        TimerStatus::Completed => "✓ ",
        TimerStatus::Ready => "",
    };
    let status_color = match status {
        TimerStatus::Running => Color::Green,
        TimerStatus::Paused => Color::Yellow,
        TimerStatus::Completed => app.theme.accent_color,
        TimerStatus::Ready => Color::Gray,
    };
    f.render_widget(
        Paragraph::new(format!("{}{}", indicator, app.display.status))
            .style(Style::default().fg(status_color).add_modifier(Modifier::BOLD))
            .alignment(Alignment::Center),
        sections[5],
    );

    // Progress
    f.render_widget(
        Gauge::default()
            .block(Block::default().borders(Borders::ALL).border_type(BorderType::Rounded))
            .gauge_style(Style::default().fg(color).bg(Color::Black))
            .ratio(app.progress_ratio()),
        sections[7],
    );

    // Today
    let summary = app.engine.week_summary();
    let today = app.engine.analytics().today();
    let auto = if app.engine.settings().auto_next { "auto-next on" } else { "auto-next off" };
    f.render_widget(
        Paragraph::new(format!(
            "{} min focused today  •  {} sessions  •  {}",
            summary.today_minutes, today.completed_sessions, auto
        ))
        .style(Style::default().fg(Color::Gray))
        .alignment(Alignment::Center),
        sections[9],
    );

    // Quote
    let quote = vec![
        Line::from(Span::styled(
            format!("“{}”", app.quote.text),
            Style::default().fg(Color::Gray).add_modifier(Modifier::ITALIC),
        )),
        Line::from(Span::styled(
            format!("— {}", app.quote.author),
            Style::default().fg(Color::DarkGray),
        )),
    ];
    f.render_widget(
        Paragraph::new(quote).alignment(Alignment::Center).wrap(Wrap { trim: true }),
        sections[11],
    );

    let controls = vec![
        Line::from(vec![
            span_key("Space", app), Span::raw(" Start/Pause  •  "),
            span_key("R", app), Span::raw(" Reset  •  "),
            span_key("1-3", app), Span::raw(" Mode  •  "),
            span_key("T", app), Span::raw(" Theme"),
        ]),
        Line::from(vec![
            span_key("A", app), Span::raw(" Analytics  •  "),
            span_key("S", app), Span::raw(" Settings  •  "),
            span_key("H", app), Span::raw(" Help  •  "),
            span_key("Q", app), Span::raw(" Quit"),
        ]),
    ];
    f.render_widget(
        Paragraph::new(controls).alignment(Alignment::Center).style(Style::default().fg(Color::DarkGray)),
        chunks[2],
    );
}

fn span_key<'a>(text: &'a str, app: &AppState) -> Span<'a> {
    Span::styled(text, Style::default().fg(app.theme.accent_color).add_modifier(Modifier::BOLD))
}

fn render_analytics(f: &mut Frame, app: &AppState) {
    let area = centered_rect(80, 85, f.size());
    f.render_widget(panel(" Analytics ", app), area);

    let inner = area.inner(&Margin::new(2, 1));
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(6), Constraint::Min(5), Constraint::Length(2)])
        .split(inner);

    let summary = app.engine.week_summary();
    let lines = vec![
        Line::from(Span::styled("📊 LAST 7 DAYS", Style::default().fg(app.theme.accent_color).add_modifier(Modifier::BOLD))),
        Line::from(""),
        stat_line("Focus this week", format!("{} min", summary.week_minutes)),
        stat_line("Sessions this week", summary.week_sessions.to_string()),
        stat_line("Focus today", format!("{} min", summary.today_minutes)),
    ];
    f.render_widget(Paragraph::new(lines), chunks[0]);

    let days = app.engine.last_7_days();
    let bars = chart::project(&days);
    render_week_chart(f, app, &bars, chunks[1]);

    let footer = if app.confirm_clear {
        Line::from(Span::styled(
            "  ⚠️  Clear ALL analytics? Y: Confirm  •  any other key: Cancel",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ))
    } else {
        Line::from(Span::styled(
            "  C: Clear data  •  A/Esc: Back",
            Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
        ))
    };
    f.render_widget(Paragraph::new(footer), chunks[2]);
}

fn render_week_chart(f: &mut Frame, app: &AppState, bars: &[ChartBar], area: Rect) {
    let max = chart::scale_max(&bars.iter().map(|b| b.minutes).collect::<Vec<_>>());
    let bar_width = (area.width.saturating_sub(2) / 7).saturating_sub(2).clamp(3, 9);

    let data: Vec<Bar> = bars
        .iter()
        .map(|b| {
            let color = if b.is_today { app.theme.accent_color } else { app.theme.pomodoro_color };
            Bar::default()
                .value(b.minutes)
                .text_value(b.minutes.to_string())
                .label(Line::from(b.label.clone()))
                .style(Style::default().fg(color))
                .value_style(Style::default().fg(Color::Black).bg(color))
        })
        .collect();

    f.render_widget(
        BarChart::default()
            .block(Block::default().title(" minutes ").borders(Borders::TOP))
            .data(BarGroup::default().bars(&data))
            .bar_width(bar_width)
            .bar_gap(2)
            .max(max),
        area,
    );
}

fn stat_line(label: &str, value: String) -> Line<'static> {
    Line::from(vec![
        Span::raw(format!("   {}: ", label)),
        Span::styled(value, Style::default().fg(Color::White).add_modifier(Modifier::BOLD)),
    ])
}

fn render_settings(f: &mut Frame, app: &AppState) {
    let area = centered_rect(70, 85, f.size());

    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled("⚙️  SETTINGS", Style::default().fg(app.theme.accent_color).add_modifier(Modifier::BOLD))),
        Line::from(""),
        Line::from(Span::styled(
            "  ↑↓/jk: Navigate  •  Enter: Edit  •  Space/←→: Change  •  W: Save  •  Esc: Discard",
            Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
        )),
        Line::from(""),
    ];

    for field in SettingsField::ALL {
        let (label, value) = match field {
            SettingsField::Pomodoro => ("🎯 Focus", format!("{} min", app.draft.pomodoro_minutes)),
            SettingsField::Short => ("☕ Short Break", format!("{} min", app.draft.short_minutes)),
            SettingsField::Long => ("🌴 Long Break", format!("{} min", app.draft.long_minutes)),
            SettingsField::Alarm => ("⏰ Alarm", format!("< {} >", alarm_label(app.draft.alarm))),
            SettingsField::AutoNext => (
                "▶️  Auto-Next",
                if app.draft.auto_next { "ON" } else { "OFF" }.to_string(),
            ),
        };
        let selected = app.settings_field == field;
        let editing = selected && app.settings_editing;

        lines.push(Line::from(""));

        if editing {
            lines.push(Line::from(vec![
                Span::styled("  > ", Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)),
                Span::styled(label, Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)),
            ]));
            lines.push(Line::from(vec![
                Span::raw("    "),
                Span::styled(app.settings_input.as_str(), Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)),
                Span::styled("█", Style::default().fg(Color::Green)),
            ]));
        } else {
            let (prefix, label_style, value_style) = if selected {
                (
                    "  > ",
                    Style::default().fg(app.theme.accent_color).add_modifier(Modifier::BOLD),
                    Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
                )
            } else {
                ("    ", Style::default().fg(Color::Gray), Style::default().fg(Color::DarkGray))
            };
            lines.push(Line::from(vec![Span::styled(prefix, label_style), Span::styled(label, label_style)]));
            lines.push(Line::from(vec![Span::raw("    "), Span::styled(value, value_style)]));
        }
    }

    if app.draft != *app.engine.settings() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "  ✎ Unsaved changes",
            Style::default().fg(Color::Yellow).add_modifier(Modifier::ITALIC),
        )));
    }

    f.render_widget(Paragraph::new(lines).block(panel(" Settings ", app)), area);
}

fn render_help(f: &mut Frame, app: &AppState) {
    let area = centered_rect(70, 85, f.size());

    let help_text = vec![
        Line::from(""),
        Line::from(Span::styled("⌨️  KEYBOARD SHORTCUTS", Style::default().fg(app.theme.accent_color).add_modifier(Modifier::BOLD))),
        Line::from(""),
        Line::from("  Timer:"),
        help_line("Space", "Start / pause"),
        help_line("R", "Reset current mode"),
        help_line("1 / 2 / 3", "Focus / short break / long break (when stopped)"),
        help_line("T / Shift+T", "Next / previous theme"),
        Line::from(""),
        Line::from("  Views:"),
        help_line("A", "Analytics (C to clear all data)"),
        help_line("S", "Settings (W saves, Esc discards)"),
        help_line("H / ?", "This help"),
        Line::from(""),
        Line::from("  General:"),
        help_line("Q / Esc", "Quit / go back"),
        help_line("Ctrl+C", "Force quit"),
        Line::from(""),
        Line::from(Span::styled(
            "💡 With auto-next on, every 4th focus session of the day earns a long break",
            Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
        )),
    ];

    f.render_widget(Paragraph::new(help_text).block(panel(" Help ", app)), area);
}

fn help_line<'a>(key: &'a str, desc: &'a str) -> Line<'a> {
    Line::from(vec![
        Span::raw("    "),
        Span::styled(key, Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
        Span::raw(format!("  {}", desc)),
    ])
}

fn centered_rect(w: u16, h: u16, r: Rect) -> Rect {
    let v = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - h) / 2),
            Constraint::Percentage(h),
            Constraint::Percentage((100 - h) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - w) / 2),
            Constraint::Percentage(w),
            Constraint::Percentage((100 - w) / 2),
        ])
        .split(v[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_rect_is_inside() {
        let outer = Rect::new(0, 0, 100, 50);
        let inner = centered_rect(70, 80, outer);
        assert!(inner.width <= 70 && inner.height <= 40);
        assert!(inner.x >= 15 && inner.y >= 5);
    }
}
