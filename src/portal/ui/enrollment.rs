use ratatui::{
    prelude::*,
    widgets::{Paragraph, Wrap},
};

use super::{field_display, panel};
use crate::portal::views::enrollment::GENDERS;
use crate::portal::views::EnrollmentView;
use crate::portal::PortalApp;
use crate::ui::draw_input;
use crate::wizard::{AssistantMood, EnrollmentStep, Field};

const LABEL_WIDTH: u16 = 30;

pub fn draw_enrollment(frame: &mut Frame, area: Rect, app: &PortalApp, view: &EnrollmentView) {
    if area.height < 10 || area.width < 50 {
        return;
    }

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(8)])
        .split(area);
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
        .split(rows[1]);

    draw_progress(frame, rows[0], app, view);

    let step = view.step();
    let inner = panel(frame, columns[0], step.title(), app);
    if view.wizard().is_submitted() {
        draw_submitted(frame, inner, app);
    } else if step == EnrollmentStep::Verification {
        draw_review(frame, inner, app, view);
    } else {
        draw_fields(frame, inner, app, view);
    }

    draw_assistant(frame, columns[1], app, view);
}

fn draw_progress(frame: &mut Frame, area: Rect, app: &PortalApp, view: &EnrollmentView) {
    let current = view.step().number();
    let mut spans = vec![Span::raw(" ")];
    for step in EnrollmentStep::ALL {
        let n = step.number();
        let (marker, style) = if n < current {
            ("[x]", app.theme.secondary_style())
        } else if n == current {
            ("[>]", app.theme.primary_style().add_modifier(Modifier::BOLD))
        } else {
            ("[ ]", app.theme.muted_style())
        };
        spans.push(Span::styled(format!("{marker} {n}. {}", step.title()), style));
        if n < EnrollmentStep::ALL.len() {
            spans.push(Span::styled(" ── ", app.theme.muted_style()));
        }
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn draw_fields(frame: &mut Frame, area: Rect, app: &PortalApp, view: &EnrollmentView) {
    let focused = view.focused_field();
    let mut y = area.y + 1;

    for field in view.step().fields() {
        if y + 2 > area.y + area.height {
            break;
        }
        let is_focused = focused == Some(*field);
        let label_style = if is_focused {
            app.theme.primary_style()
        } else {
            app.theme.style()
        };
        let required = if field.required() { " *" } else { "" };
        frame.render_widget(
            Paragraph::new(format!("{}{required}", field.label())).style(label_style),
            Rect::new(area.x + 1, y, LABEL_WIDTH, 1).intersection(area),
        );

        let input_area = Rect::new(
            area.x + LABEL_WIDTH + 2,
            y,
            area.width.saturating_sub(LABEL_WIDTH + 3),
            1,
        )
        .intersection(area);
        match view.input(*field) {
            Some(buffer) => draw_input(
                frame,
                input_area,
                buffer,
                field.placeholder(),
                field_display(app, is_focused),
                &app.theme,
            ),
            None => draw_gender(frame, input_area, app, view, is_focused),
        }

        let validity = view.wizard().form().validity(*field);
        if let (false, Some(reason)) = (validity.valid, validity.reason) {
            if !view.wizard().form().get(*field).is_empty() || is_focused {
                frame.render_widget(
                    Paragraph::new(format!("  {reason}")).style(app.theme.muted_style()),
                    Rect::new(input_area.x, y + 1, input_area.width, 1),
                );
            }
        }
        y += 3;
    }

    let hint = "[n] Next step   [p] Back   [Enter] Continue";
    frame.render_widget(
        Paragraph::new(hint).style(app.theme.muted_style()),
        Rect::new(area.x + 1, area.y + area.height - 1, area.width.saturating_sub(2), 1),
    );
}

fn draw_gender(frame: &mut Frame, area: Rect, app: &PortalApp, view: &EnrollmentView, focused: bool) {
    if area.is_empty() {
        return;
    }
    let chosen = view.wizard().form().get(Field::Gender);
    let mut spans = Vec::new();
    for gender in GENDERS {
        let style = if gender == chosen {
            app.theme.selected_style(focused)
        } else {
            app.theme.muted_style()
        };
        spans.push(Span::styled(format!(" {gender} "), style));
        spans.push(Span::raw(" "));
    }
    if focused {
        spans.push(Span::styled("h/l", app.theme.muted_style()));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn draw_review(frame: &mut Frame, area: Rect, app: &PortalApp, view: &EnrollmentView) {
    let form = view.wizard().form();
    let mut lines = vec![Line::from("")];

    for field in Field::ALL {
        let value = form.get(field);
        let validity = form.validity(field);
        let (mark, style) = if validity.valid {
            ("✓", app.theme.success_style())
        } else {
            ("✗", app.theme.error_style())
        };
        let shown = if value.is_empty() { "(empty)" } else { value };
        lines.push(Line::from(vec![
            Span::styled(format!(" {mark} "), style),
            Span::styled(format!("{:<28}", field.label()), app.theme.muted_style()),
            Span::styled(shown, app.theme.style()),
        ]));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        " Next: biometric capture (photo, fingerprints, iris) at your enrollment centre",
        app.theme.muted_style(),
    )));
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        " [Enter] Submit enrollment   [p] Back",
        app.theme.primary_style().add_modifier(Modifier::BOLD),
    )));

    frame.render_widget(Paragraph::new(lines), area);
}

fn draw_submitted(frame: &mut Frame, area: Rect, app: &PortalApp) {
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "Enrollment submitted!",
            app.theme.success_style().add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled("नामांकन जमा हो गया!", app.theme.secondary_style())),
        Line::from(""),
        Line::from("Your Enrollment ID (EID) will be sent to your mobile number."),
        Line::from("Use it on the Status page (4) to track your application."),
    ];
    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        area,
    );
}

fn draw_assistant(frame: &mut Frame, area: Rect, app: &PortalApp, view: &EnrollmentView) {
    let inner = panel(frame, area, "Assistant", app);
    let mood = view.wizard().mood();

    let tip = match mood {
        AssistantMood::Happy => "Namaste! Let's get you enrolled.",
        AssistantMood::Excited => "What a lovely name!",
        AssistantMood::Thinking => "Take your time, I'm here to help.",
        AssistantMood::Celebrating => "Wonderful! Almost there!",
    };

    let mut lines = vec![
        Line::from(Span::styled(
            mood.face(),
            app.theme.primary_style().add_modifier(Modifier::BOLD),
        )),
        Line::from(tip),
        Line::from(""),
    ];

    match view.focused_field() {
        Some(Field::Name) => {
            let suggestions = view.suggestions();
            if !suggestions.is_empty() {
                lines.push(Line::from(Span::styled(
                    "Suggestions (Ctrl+n):",
                    app.theme.secondary_style(),
                )));
                lines.extend(suggestions.into_iter().map(|name| Line::from(format!("  {name}"))));
            }
        }
        Some(Field::DateOfBirth) => {
            let today = chrono::Local::now().date_naive();
            lines.push(Line::from(Span::styled(
                "Upcoming festivals:",
                app.theme.secondary_style(),
            )));
            lines.extend(view.festivals(today).into_iter().map(|festival| {
                Line::from(format!("  {:02}/{:02} {}", festival.day, festival.month, festival.name))
            }));
        }
        _ => {}
    }

    frame.render_widget(
        Paragraph::new(lines).wrap(Wrap { trim: true }),
        inner,
    );
}
