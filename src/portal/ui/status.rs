use ratatui::{
    prelude::*,
    widgets::{Paragraph, Wrap},
};

use super::{field_display, panel};
use crate::portal::views::{StatusFocus, StatusView};
use crate::portal::PortalApp;
use crate::status::{LookupState, StatusDetail, StatusRecord, SAMPLE_IDS};
use crate::ui::draw_input;

pub fn draw_status(frame: &mut Frame, area: Rect, app: &PortalApp, view: &StatusView) {
    if area.height < 10 || area.width < 40 {
        return;
    }

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(38), Constraint::Min(20)])
        .split(area);

    draw_lookup_form(frame, columns[0], app, view);

    let inner = panel(frame, columns[1], "Result", app);
    match view.state() {
        LookupState::Idle => {
            frame.render_widget(
                Paragraph::new("Enter your 16-digit Enrollment ID (EID) and press Enter.")
                    .style(app.theme.muted_style())
                    .wrap(Wrap { trim: true }),
                inner,
            );
        }
        LookupState::Pending { identifier } => {
            frame.render_widget(
                Paragraph::new(format!("{} Checking status of {identifier}...", app.spinner()))
                    .style(app.theme.secondary_style()),
                inner,
            );
        }
        LookupState::NotFound { identifier } => {
            frame.render_widget(
                Paragraph::new(vec![
                    Line::from(Span::styled(
                        "No enrollment found",
                        app.theme.error_style().add_modifier(Modifier::BOLD),
                    )),
                    Line::from(""),
                    Line::from(format!("No record matches EID {identifier}.")),
                    Line::from("Please check the number and try again."),
                ])
                .wrap(Wrap { trim: true }),
                inner,
            );
        }
        LookupState::Found(record) => draw_record(frame, inner, app, record),
    }
}

fn draw_lookup_form(frame: &mut Frame, area: Rect, app: &PortalApp, view: &StatusView) {
    let inner = panel(frame, area, "Check Status | स्थिति जांचें", app);
    let focus = view.focus();
    let mut y = inner.y + 1;

    frame.render_widget(
        Paragraph::new("Enrollment ID (EID)").style(if focus == StatusFocus::Input {
            app.theme.primary_style()
        } else {
            app.theme.style()
        }),
        Rect::new(inner.x + 1, y, inner.width.saturating_sub(2), 1),
    );
    y += 1;
    draw_input(
        frame,
        Rect::new(inner.x + 1, y, inner.width.saturating_sub(2), 1),
        view.checker().identifier(),
        "16 digits",
        field_display(app, focus == StatusFocus::Input),
        &app.theme,
    );
    y += 2;

    frame.render_widget(
        Paragraph::new("Try a sample:").style(app.theme.muted_style()),
        Rect::new(inner.x + 1, y, inner.width.saturating_sub(2), 1),
    );
    y += 1;

    for (idx, (id, label)) in SAMPLE_IDS.iter().enumerate() {
        if y >= inner.y + inner.height {
            break;
        }
        let style = if focus == StatusFocus::Sample(idx) {
            app.theme.selected_style(true)
        } else {
            app.theme.style()
        };
        frame.render_widget(
            Paragraph::new(format!(" {id}  {label}")).style(style),
            Rect::new(inner.x + 1, y, inner.width.saturating_sub(2), 1),
        );
        y += 1;
    }
}

fn draw_record(frame: &mut Frame, area: Rect, app: &PortalApp, record: &StatusRecord) {
    let label_style = match record.detail {
        StatusDetail::Pending { .. } => app.theme.primary_style(),
        StatusDetail::Accepted { .. } => app.theme.success_style(),
        StatusDetail::Rejected { .. } => app.theme.error_style(),
    };

    let mut lines = vec![
        Line::from(vec![
            Span::styled(
                format!(" {} ", record.label()),
                label_style.add_modifier(Modifier::REVERSED | Modifier::BOLD),
            ),
            Span::raw("  "),
            Span::styled(record.title.as_str(), app.theme.style().add_modifier(Modifier::BOLD)),
        ]),
        Line::from(record.message.as_str()),
        Line::from(Span::styled(
            format!("Last updated: {}", record.updated_at),
            app.theme.muted_style(),
        )),
        Line::from(""),
    ];

    match &record.detail {
        StatusDetail::Pending {
            estimated_completion,
            checkpoints,
        } => {
            for checkpoint in checkpoints {
                let (mark, style) = if checkpoint.completed {
                    ("[x]", app.theme.success_style())
                } else {
                    ("[ ]", app.theme.muted_style())
                };
                lines.push(Line::from(Span::styled(
                    format!(" {mark} {}", checkpoint.name),
                    style,
                )));
            }
            lines.push(Line::from(""));
            lines.push(Line::from(format!("Estimated completion: {estimated_completion}")));
        }
        StatusDetail::Accepted { issued_id } => {
            lines.push(Line::from(vec![
                Span::raw("Aadhaar number: "),
                Span::styled(
                    issued_id.as_str(),
                    app.theme.primary_style().add_modifier(Modifier::BOLD),
                ),
            ]));
            lines.push(Line::from("Download your e-Aadhaar or collect it by post."));
        }
        StatusDetail::Rejected {
            reason,
            remediation,
        } => {
            lines.push(Line::from(Span::styled(
                format!("Reason: {reason}"),
                app.theme.error_style(),
            )));
            lines.push(Line::from(""));
            lines.push(Line::from("Next steps:"));
            for (i, step) in remediation.iter().enumerate() {
                lines.push(Line::from(format!(" {}. {step}", i + 1)));
            }
        }
    }

    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), area);
}
