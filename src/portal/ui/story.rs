use ratatui::{
    prelude::*,
    widgets::{Paragraph, Wrap},
};

use super::panel;
use crate::portal::views::story::{IMPACT, MILESTONES};
use crate::portal::views::StoryView;
use crate::portal::PortalApp;

pub fn draw_story(frame: &mut Frame, area: Rect, app: &PortalApp, view: &StoryView) {
    if area.height < 10 || area.width < 40 {
        return;
    }

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(8), Constraint::Length(3)])
        .split(area);
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(34), Constraint::Min(20)])
        .split(rows[0]);

    draw_timeline(frame, columns[0], app, view);
    draw_milestone(frame, columns[1], app, view);
    draw_impact(frame, rows[1], app);
}

fn draw_timeline(frame: &mut Frame, area: Rect, app: &PortalApp, view: &StoryView) {
    let inner = panel(frame, area, "The Aadhaar Story", app);

    for (idx, milestone) in MILESTONES.iter().enumerate() {
        if idx as u16 >= inner.height {
            break;
        }
        let selected = idx == view.selected();
        let style = if selected {
            app.theme.selected_style(true)
        } else {
            app.theme.style()
        };
        frame.render_widget(
            Paragraph::new(format!(" {}  {}", milestone.year, milestone.title)).style(style),
            Rect::new(inner.x, inner.y + idx as u16, inner.width, 1),
        );
    }
}

fn draw_milestone(frame: &mut Frame, area: Rect, app: &PortalApp, view: &StoryView) {
    let milestone = view.milestone();
    let inner = panel(frame, area, &milestone.year.to_string(), app);

    let (button, button_style) = if view.is_playing() {
        ("[Enter] Stop", app.theme.error_style())
    } else {
        ("[Enter] Listen", app.theme.secondary_style())
    };

    let lines = vec![
        Line::from(Span::styled(
            milestone.title,
            app.theme.primary_style().add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(milestone.hindi, app.theme.secondary_style())),
        Line::from(""),
        Line::from(milestone.description),
        Line::from(""),
        Line::from(Span::styled(milestone.details, app.theme.muted_style())),
        Line::from(""),
        Line::from(vec![
            Span::styled(format!(" {} ", milestone.stat), app.theme.selected_style(false)),
            Span::raw("   "),
            Span::styled(button, button_style.add_modifier(Modifier::BOLD)),
        ]),
    ];

    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), inner);
}

fn draw_impact(frame: &mut Frame, area: Rect, app: &PortalApp) {
    let inner = panel(frame, area, "Impact", app);
    let spans: Vec<Span> = IMPACT
        .iter()
        .flat_map(|(number, label)| {
            [
                Span::styled(*number, app.theme.primary_style().add_modifier(Modifier::BOLD)),
                Span::styled(format!(" {label}    "), app.theme.muted_style()),
            ]
        })
        .collect();
    frame.render_widget(
        Paragraph::new(Line::from(spans)).alignment(Alignment::Center),
        inner,
    );
}
