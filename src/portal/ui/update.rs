use ratatui::{
    prelude::*,
    widgets::{Gauge, Paragraph},
};

use super::{field_display, panel};
use crate::portal::views::{UpdateFocus, UpdateView};
use crate::portal::PortalApp;
use crate::ui::{draw_input, FieldDisplay};
use crate::wizard::{ScanState, UPDATE_FIELDS, UPDATE_OPTIONS};

const LABEL_WIDTH: u16 = 30;

pub fn draw_update(frame: &mut Frame, area: Rect, app: &PortalApp, view: &UpdateView) {
    if area.height < 10 || area.width < 50 {
        return;
    }

    if !view.session().is_verified() {
        draw_verification(frame, area, app, view);
        return;
    }

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(area);
    let side = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(6), Constraint::Length(5)])
        .split(columns[1]);

    draw_profile(frame, columns[0], app, view);
    draw_options(frame, side[0], app, view);
    draw_scan(frame, side[1], app, view);
}

fn draw_verification(frame: &mut Frame, area: Rect, app: &PortalApp, view: &UpdateView) {
    let inner = panel(frame, area, "Update Details | विवरण अपडेट करें", app);
    let x = inner.x + 2;
    let width = inner.width.saturating_sub(4);

    frame.render_widget(
        Paragraph::new("Verify your identity to continue").style(app.theme.style()),
        Rect::new(x, inner.y + 1, width, 1),
    );
    frame.render_widget(
        Paragraph::new("Aadhaar Number | आधार संख्या").style(app.theme.primary_style()),
        Rect::new(x, inner.y + 3, width, 1),
    );

    let display = field_display(app, view.focus() == UpdateFocus::Verification);
    draw_input(
        frame,
        Rect::new(x, inner.y + 4, width.min(20), 1),
        view.verification(),
        "12 digits",
        display,
        &app.theme,
    );

    let entered = view.verification().len();
    frame.render_widget(
        Paragraph::new(format!("{entered}/12 digits   [i] type  [Enter] verify"))
            .style(app.theme.muted_style()),
        Rect::new(x, inner.y + 6, width, 1),
    );
}

fn draw_profile(frame: &mut Frame, area: Rect, app: &PortalApp, view: &UpdateView) {
    let inner = panel(frame, area, "Your Details", app);
    let focus = view.focus();
    let mut y = inner.y + 1;

    for (idx, field) in UPDATE_FIELDS.iter().enumerate() {
        if y >= inner.y + inner.height {
            break;
        }
        let is_focused = focus == UpdateFocus::Field(idx);
        frame.render_widget(
            Paragraph::new(field.label()).style(if is_focused {
                app.theme.primary_style()
            } else {
                app.theme.muted_style()
            }),
            Rect::new(inner.x + 1, y, LABEL_WIDTH, 1).intersection(inner),
        );
        if let Some(buffer) = view.input(idx) {
            draw_input(
                frame,
                Rect::new(
                    inner.x + LABEL_WIDTH + 2,
                    y,
                    inner.width.saturating_sub(LABEL_WIDTH + 3),
                    1,
                )
                .intersection(inner),
                buffer,
                field.placeholder(),
                field_display(app, is_focused),
                &app.theme,
            );
        }
        y += 2;
    }

    let submit = if view.session().is_submitted() {
        Span::styled(" Request submitted ", app.theme.success_style().add_modifier(Modifier::BOLD))
    } else {
        Span::styled(" :submit Send update request ", app.theme.muted_style().add_modifier(Modifier::REVERSED))
    };
    if inner.height > 0 {
        frame.render_widget(
            Paragraph::new(Line::from(submit)),
            Rect::new(inner.x + 1, inner.y + inner.height - 1, inner.width.saturating_sub(2), 1),
        );
    }
}

fn draw_options(frame: &mut Frame, area: Rect, app: &PortalApp, view: &UpdateView) {
    let inner = panel(frame, area, "What to update", app);
    let focus = view.focus();

    for (idx, option) in UPDATE_OPTIONS.iter().enumerate() {
        if idx as u16 >= inner.height {
            break;
        }
        let mark = if view.session().is_option_selected(idx) { "[x]" } else { "[ ]" };
        let style = if focus == UpdateFocus::Option(idx) {
            app.theme.selected_style(true)
        } else {
            app.theme.style()
        };
        frame.render_widget(
            Paragraph::new(format!(" {mark} {option}")).style(style),
            Rect::new(inner.x, inner.y + idx as u16, inner.width, 1),
        );
    }
}

fn draw_scan(frame: &mut Frame, area: Rect, app: &PortalApp, view: &UpdateView) {
    let inner = panel(frame, area, "Pehchan Face Scan", app);
    if inner.height < 2 {
        return;
    }
    let focused = field_display(app, view.focus() == UpdateFocus::Scan) != FieldDisplay::Idle;

    let (label, percent) = match view.scan() {
        ScanState::Idle => ("[Enter] Start scan", 0),
        ScanState::Scanning { progress } => ("Scanning...", progress),
        ScanState::Complete => ("Identity verified", 100),
    };
    let label_style = if focused {
        app.theme.selected_style(true)
    } else {
        app.theme.style()
    };

    frame.render_widget(
        Paragraph::new(label).style(label_style),
        Rect::new(inner.x + 1, inner.y, inner.width.saturating_sub(2), 1),
    );
    frame.render_widget(
        Gauge::default()
            .gauge_style(app.theme.secondary_style())
            .percent(u16::from(percent.min(100))),
        Rect::new(inner.x + 1, inner.y + 1, inner.width.saturating_sub(2), 1),
    );
}
