use ratatui::{
    prelude::*,
    widgets::{Paragraph, Wrap},
};

use super::panel;
use crate::portal::views::home::{AVATARS, SERVICES, TRIVIA};
use crate::portal::views::HomeView;
use crate::portal::PortalApp;

pub fn draw_home(frame: &mut Frame, area: Rect, app: &PortalApp, view: &HomeView) {
    if area.height < 10 || area.width < 40 {
        return;
    }

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(8), Constraint::Length(5)])
        .split(area);
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(rows[0]);

    draw_welcome(frame, columns[0], app, view);
    draw_services(frame, columns[1], app, view);
    draw_trivia(frame, rows[1], app, view);
}

fn draw_welcome(frame: &mut Frame, area: Rect, app: &PortalApp, view: &HomeView) {
    let inner = panel(frame, area, "Namaste! नमस्ते!", app);
    let avatar = view.avatar();

    let mut lines = vec![Line::from("")];
    lines.extend(
        avatar
            .art
            .iter()
            .map(|row| Line::from(Span::styled(*row, app.theme.primary_style()))),
    );
    lines.push(Line::from(Span::styled(avatar.label, app.theme.secondary_style())));

    let dots: String = (0..AVATARS.len())
        .map(|i| if i == view.avatar_index() { '●' } else { '○' })
        .collect();
    lines.push(Line::from(Span::styled(dots, app.theme.muted_style())));
    lines.push(Line::from(""));
    lines.push(Line::from("Your identity, your foundation."));
    lines.push(Line::from(Span::styled(
        "आपकी पहचान, आपका आधार",
        app.theme.muted_style(),
    )));

    frame.render_widget(
        Paragraph::new(lines).alignment(Alignment::Center),
        inner,
    );
}

fn draw_services(frame: &mut Frame, area: Rect, app: &PortalApp, view: &HomeView) {
    let inner = panel(frame, area, "Services", app);
    let mut y = inner.y;

    for (idx, service) in SERVICES.iter().enumerate() {
        if y + 3 > inner.y + inner.height {
            break;
        }
        let selected = idx == view.selected();
        let title_style = if selected {
            app.theme.selected_style(true)
        } else {
            app.theme.style().add_modifier(Modifier::BOLD)
        };
        let marker = if selected { ">" } else { " " };

        frame.render_widget(
            Paragraph::new(Line::from(vec![
                Span::styled(format!("{marker} "), app.theme.primary_style()),
                Span::styled(format!(" {} ", service.title), title_style),
                Span::raw("  "),
                Span::styled(service.hindi, app.theme.primary_style()),
            ])),
            Rect::new(inner.x, y, inner.width, 1),
        );
        frame.render_widget(
            Paragraph::new(format!("   {}  ({})", service.description, service.route.path()))
                .style(app.theme.muted_style()),
            Rect::new(inner.x, y + 1, inner.width, 1),
        );
        y += 3;
    }
}

fn draw_trivia(frame: &mut Frame, area: Rect, app: &PortalApp, view: &HomeView) {
    let inner = panel(frame, area, "Did you know?", app);
    let counter = format!("{}/{}", view.trivia_index() + 1, TRIVIA.len());
    frame.render_widget(
        Paragraph::new(vec![
            Line::from(view.trivia()),
            Line::from(Span::styled(counter, app.theme.muted_style())),
        ])
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true }),
        inner,
    );
}
