mod enrollment;
mod home;
mod status;
mod story;
mod update;

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

use super::{PortalApp, View};
use crate::router::Route;
use crate::ui::{FieldDisplay, Layout as ScreenLayout};
use crate::vim::VimMode;

/// Main draw function for the portal
pub fn draw(frame: &mut Frame, app: &PortalApp) {
    let area = frame.area();
    frame.render_widget(Clear, area);
    let layout = ScreenLayout::new(area);

    draw_header(frame, layout.header, app);
    draw_tabs(frame, layout.tabs, app);

    let content = layout.content;
    match &app.view {
        View::Home(view) => home::draw_home(frame, content, app, view),
        View::Enrollment(view) => enrollment::draw_enrollment(frame, content, app, view),
        View::Update(view) => update::draw_update(frame, content, app, view),
        View::Status(view) => status::draw_status(frame, content, app, view),
        View::Story(view) => story::draw_story(frame, content, app, view),
    }

    draw_message(frame, layout.message, app);
    draw_status_bar(frame, layout.status, app);

    // Overlays
    if app.celebration > 0 {
        draw_celebration(frame, content, app);
    }

    if app.show_help {
        draw_help(frame, app);
    }
}

/// Draw header bar (1 line, no borders)
fn draw_header(frame: &mut Frame, area: Rect, app: &PortalApp) {
    let general = &app.config.general;
    let title = Line::from(vec![
        Span::styled(
            format!(" {} ", general.title),
            app.theme.primary_style().add_modifier(Modifier::BOLD),
        ),
        Span::styled(general.subtitle.as_str(), app.theme.secondary_style()),
    ]);
    frame.render_widget(Paragraph::new(title), area);

    let clock = chrono::Local::now().format("%a %d %b  %H:%M ").to_string();
    frame.render_widget(
        Paragraph::new(clock)
            .style(app.theme.muted_style())
            .alignment(Alignment::Right),
        area,
    );
}

fn draw_tabs(frame: &mut Frame, area: Rect, app: &PortalApp) {
    let current = app.route();
    let mut spans = vec![Span::raw(" ")];
    for (idx, route) in Route::ALL.iter().enumerate() {
        let style = if *route == current {
            app.theme.selected_style(true)
        } else {
            app.theme.muted_style()
        };
        spans.push(Span::styled(format!(" {} {} ", idx + 1, route.title()), style));
        spans.push(Span::raw(" "));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
    frame.render_widget(
        Paragraph::new(format!("{} ", current.path()))
            .style(app.theme.muted_style())
            .alignment(Alignment::Right),
        area,
    );
}

fn draw_message(frame: &mut Frame, area: Rect, app: &PortalApp) {
    let Some(msg) = &app.message else {
        return;
    };

    let (title, border_style, text_style) = if msg.is_error {
        (" Error ", app.theme.error_style(), app.theme.error_style())
    } else {
        (" Info ", app.theme.secondary_style(), app.theme.style())
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(title)
        .title_style(border_style.add_modifier(Modifier::BOLD));

    let paragraph = Paragraph::new(Line::from(Span::styled(msg.text.as_str(), text_style)))
        .block(block)
        .wrap(Wrap { trim: true });

    frame.render_widget(paragraph, area);
}

fn draw_status_bar(frame: &mut Frame, area: Rect, app: &PortalApp) {
    // Squeezed out entirely on short terminals
    if area.height == 0 || area.width == 0 {
        return;
    }
    frame.render_widget(Clear, area);

    // Mode indicator on left
    let mode_name = app.vim_mode.display_name();
    let mode_span = Span::styled(format!(" {mode_name} "), app.theme.mode_style(mode_name));

    // Command buffer in command mode, otherwise show left hint
    let after_mode = if app.vim_mode == VimMode::Command {
        Span::styled(format!(":{}", app.command_buffer.content()), app.theme.style())
    } else {
        Span::styled(app.status_bar.left_hint.as_str(), app.theme.muted_style())
    };

    let left_line = Line::from(vec![mode_span, Span::raw(" "), after_mode]);
    frame.render_widget(
        Paragraph::new(left_line),
        Rect::new(area.x, area.y, area.width * 2 / 3, 1).intersection(area),
    );

    frame.render_widget(
        Paragraph::new(format!("{} ", app.status_bar.right_hint))
            .style(app.theme.muted_style())
            .alignment(Alignment::Right),
        Rect::new(area.x + area.width / 3, area.y, area.width * 2 / 3, 1).intersection(area),
    );
}

fn draw_celebration(frame: &mut Frame, area: Rect, app: &PortalApp) {
    let banner = ScreenLayout::centered_box(area, 44.min(area.width), 5.min(area.height));
    let sparkle = if app.celebration % 2 == 0 { "*  .  *  .  *" } else { ".  *  .  *  ." };
    let lines = vec![
        Line::from(Span::styled(sparkle, app.theme.primary_style())),
        Line::from(Span::styled(
            "Your Aadhaar is ready!",
            app.theme.success_style().add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(sparkle, app.theme.secondary_style())),
    ];
    frame.render_widget(Clear, banner);
    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(app.theme.primary_style()),
            ),
        banner,
    );
}

fn draw_help(frame: &mut Frame, app: &PortalApp) {
    let width = 62.min(frame.area().width.saturating_sub(4));
    let height = 26.min(frame.area().height.saturating_sub(2));
    let area = ScreenLayout::centered_box(frame.area(), width, height);

    let help_text = [
        "",
        "Navigation:",
        "",
        "  1-5            Home / Enroll / Update / Status / Story",
        "  j/k, Tab       Next / previous field or item",
        "  h/l            Change choice (gender)",
        "  n/p            Next / previous step or milestone",
        "  Enter          Select / continue / check",
        "  s              Stop narration",
        "",
        "Vim Modes:",
        "",
        "  i/a/I/A        Edit the focused field",
        "  Ctrl+n         Take the name suggestion (insert)",
        "  x, dd          Delete char / clear field",
        "  Esc            Return to normal",
        "  :              Command mode",
        "",
        "Commands: :go PATH :next :prev :submit :sample N",
        "          :set FIELD VALUE :listen :stop :q",
        "",
        "Press q or Esc to close",
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(app.theme.border_style())
        .title(" Help ");

    let inner = block.inner(area);
    frame.render_widget(Clear, area);
    frame.render_widget(block, area);

    for (i, line) in help_text.iter().enumerate() {
        if i as u16 >= inner.height {
            break;
        }
        frame.render_widget(
            Paragraph::new(*line).style(app.theme.style()),
            Rect::new(inner.x, inner.y + i as u16, inner.width, 1),
        );
    }
}

/// Display mode for a field given focus and the current vim mode
fn field_display(app: &PortalApp, focused: bool) -> FieldDisplay {
    match (focused, app.vim_mode) {
        (false, _) => FieldDisplay::Idle,
        (true, VimMode::Insert) => FieldDisplay::Editing,
        (true, _) => FieldDisplay::Focused,
    }
}

/// Bordered panel, returns the inner area
fn panel(frame: &mut Frame, area: Rect, title: &str, app: &PortalApp) -> Rect {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(app.theme.border_style())
        .title(format!(" {title} "))
        .title_style(app.theme.primary_style().add_modifier(Modifier::BOLD));
    let inner = block.inner(area);
    frame.render_widget(block, area);
    inner
}
