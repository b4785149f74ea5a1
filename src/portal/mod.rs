pub mod config;
pub mod ui;
pub mod views;
mod widgets;

pub use config::PortalConfig;
pub use views::View;
pub use widgets::StatusBarState;

use crate::event::EventSender;
use crate::narration::Narrator;
use crate::router::Route;
use crate::status::{LookupResponse, StatusLookup};
use crate::ui::Theme;
use crate::vim::{parse_command, Command, InputBuffer, ModeAction, VimMode};
use crate::wizard::{Field, StepMove, UpdateOutcome};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::sync::Arc;
use tracing::{debug, info};
use views::{StatusFocus, UpdateFocus};

/// Ticks the accepted-status banner stays up
const CELEBRATION_TICKS: u8 = 20;

/// Actions the main loop has to carry out
#[derive(Debug, PartialEq, Eq)]
pub enum PortalAction {
    Quit,
}

/// Message displayed to the user
pub struct Message {
    pub text: String,
    pub is_error: bool,
}

/// Main portal application state
pub struct PortalApp {
    pub config: PortalConfig,
    pub theme: Theme,

    // Vim mode state
    pub vim_mode: VimMode,
    pub command_buffer: InputBuffer,

    // State of the current route; replaced on navigation
    pub view: View,

    // UI state
    pub message: Option<Message>,
    pub show_help: bool,
    pub should_exit: bool,
    pub status_bar: StatusBarState,
    pub celebration: u8,
    spinner_frame: usize,
    pending_dd: bool,
    greeted: bool,

    narrator: Arc<dyn Narrator>,
    lookup: Arc<dyn StatusLookup>,
    events: EventSender,
}

impl PortalApp {
    /// Must be called from within a tokio runtime.
    pub fn new(
        config: PortalConfig,
        start: Route,
        narrator: Arc<dyn Narrator>,
        lookup: Arc<dyn StatusLookup>,
        events: EventSender,
    ) -> Self {
        let view = View::open(start, &config, events.clone());
        let mut app = Self {
            config,
            theme: Theme::default(),
            vim_mode: VimMode::Normal,
            command_buffer: InputBuffer::new(),
            view,
            message: None,
            show_help: false,
            should_exit: false,
            status_bar: StatusBarState::for_route(start),
            celebration: 0,
            spinner_frame: 0,
            pending_dd: false,
            greeted: false,
            narrator,
            lookup,
            events,
        };
        app.greet();
        app
    }

    pub fn route(&self) -> Route {
        self.view.route()
    }

    pub fn spinner(&self) -> char {
        ['|', '/', '-', '\\'][self.spinner_frame]
    }

    /// Switch to `route`, dropping the current view and everything it owns
    pub fn navigate(&mut self, route: Route) {
        if route == self.route() {
            return;
        }
        if let View::Story(story) = &mut self.view {
            if story.is_playing() {
                story.stop(self.narrator.as_ref());
            }
        }
        info!(from = %self.route(), to = %route, "Navigating");
        self.view = View::open(route, &self.config, self.events.clone());
        self.vim_mode = VimMode::Normal;
        self.pending_dd = false;
        self.celebration = 0;
        self.greet();
        self.update_status_bar();
    }

    fn greet(&mut self) {
        if self.route() == Route::Home && self.config.home.greeting && !self.greeted {
            self.greeted = true;
            self.narrator.speak(views::home::GREETING);
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Option<PortalAction> {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Some(PortalAction::Quit);
        }

        // Clear message on any key
        if self.message.is_some() {
            self.message = None;
        }

        if self.show_help {
            if key.code == KeyCode::Esc || key.code == KeyCode::Char('q') {
                self.show_help = false;
            }
            self.update_status_bar();
            return None;
        }

        let result = match self.vim_mode {
            VimMode::Normal => self.handle_normal_mode(key),
            VimMode::Insert => self.handle_insert_mode(key),
            VimMode::Command => self.handle_command_mode(key),
        };

        self.update_status_bar();
        result
    }

    fn handle_normal_mode(&mut self, key: KeyEvent) -> Option<PortalAction> {
        let pending_dd = std::mem::take(&mut self.pending_dd);
        match key.code {
            // Mode transitions
            KeyCode::Char('i') | KeyCode::Char('a') | KeyCode::Char('A') | KeyCode::Char('I') => {
                let Some(input) = self.view.input_mut() else {
                    return None;
                };
                match key.code {
                    KeyCode::Char('a') => input.move_right(),
                    KeyCode::Char('A') => input.move_end(),
                    KeyCode::Char('I') => input.move_start(),
                    _ => {}
                }
                self.vim_mode = self.vim_mode.transition(ModeAction::EnterInsert);
            }
            KeyCode::Char(':') => {
                self.vim_mode = self.vim_mode.transition(ModeAction::EnterCommand);
                self.command_buffer.clear();
            }
            KeyCode::Char('?') => {
                self.show_help = true;
            }

            // Route switching
            KeyCode::Char(c @ '1'..='5') => {
                if let Some(route) = c.to_digit(10).and_then(|n| Route::from_number(n as usize)) {
                    self.navigate(route);
                }
            }

            // Navigation
            KeyCode::Char('j') | KeyCode::Down | KeyCode::Tab => self.view.focus_next(),
            KeyCode::Char('k') | KeyCode::Up | KeyCode::BackTab => self.view.focus_prev(),
            KeyCode::Char('h') | KeyCode::Left => self.cycle_choice(false),
            KeyCode::Char('l') | KeyCode::Right => self.cycle_choice(true),
            KeyCode::Char('n') => self.step_forward(),
            KeyCode::Char('p') => self.step_back(),
            KeyCode::Char('s') => self.stop_narration(),

            // Editing
            KeyCode::Char('x') => {
                if let Some(input) = self.view.input_mut() {
                    input.delete_forward();
                    self.commit_input();
                }
            }
            KeyCode::Char('d') => {
                if pending_dd {
                    if let Some(input) = self.view.input_mut() {
                        input.clear();
                        self.commit_input();
                    }
                } else {
                    self.pending_dd = true;
                }
            }

            KeyCode::Enter => self.activate(),
            _ => {}
        }
        None
    }

    fn handle_insert_mode(&mut self, key: KeyEvent) -> Option<PortalAction> {
        match key.code {
            KeyCode::Esc => {
                self.vim_mode = self.vim_mode.transition(ModeAction::Escape);
                return None;
            }
            KeyCode::Enter => {
                if let View::Enrollment(_) = self.view {
                    self.next_input();
                } else {
                    self.vim_mode = self.vim_mode.transition(ModeAction::Execute);
                    self.activate();
                }
                return None;
            }
            KeyCode::Tab => {
                self.next_input();
                return None;
            }
            KeyCode::BackTab => {
                self.view.focus_prev();
                if self.view.input_mut().is_none() {
                    self.vim_mode = VimMode::Normal;
                }
                return None;
            }
            _ => {}
        }

        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('n') {
            if let View::Enrollment(view) = &mut self.view {
                if let Some(name) = view.accept_suggestion(self.narrator.as_ref()) {
                    debug!(name, "accepted name suggestion");
                }
            }
            return None;
        }

        let Some(input) = self.view.input_mut() else {
            self.vim_mode = VimMode::Normal;
            return None;
        };
        match key.code {
            KeyCode::Backspace => {
                input.delete_back();
            }
            KeyCode::Delete => {
                input.delete_forward();
            }
            KeyCode::Left => input.move_left(),
            KeyCode::Right => input.move_right(),
            KeyCode::Home => input.move_start(),
            KeyCode::End => input.move_end(),
            KeyCode::Char(c) => {
                if key.modifiers.contains(KeyModifiers::CONTROL) {
                    match c {
                        'u' => input.clear(),
                        'a' => input.move_start(),
                        'e' => input.move_end(),
                        _ => {}
                    }
                } else {
                    input.insert(c);
                }
            }
            _ => return None,
        }
        self.commit_input();
        None
    }

    fn handle_command_mode(&mut self, key: KeyEvent) -> Option<PortalAction> {
        match key.code {
            KeyCode::Esc => {
                self.vim_mode = self.vim_mode.transition(ModeAction::Escape);
                self.command_buffer.clear();
            }
            KeyCode::Enter => {
                let cmd = self.command_buffer.content().to_string();
                self.vim_mode = self.vim_mode.transition(ModeAction::Execute);
                self.command_buffer.clear();
                return self.execute_command(&cmd);
            }
            KeyCode::Backspace => {
                if self.command_buffer.is_empty() {
                    self.vim_mode = self.vim_mode.transition(ModeAction::Escape);
                } else {
                    self.command_buffer.delete_back();
                }
            }
            KeyCode::Char(c) => {
                self.command_buffer.insert(c);
            }
            _ => {}
        }
        None
    }

    fn execute_command(&mut self, cmd: &str) -> Option<PortalAction> {
        match parse_command(cmd) {
            Ok(Command::Go(route)) => self.navigate(route),
            Ok(Command::Next) => self.step_forward(),
            Ok(Command::Prev) => self.step_back(),
            Ok(Command::Submit) => self.submit(),
            Ok(Command::Sample(n)) => {
                self.navigate(Route::Status);
                if let View::Status(view) = &mut self.view {
                    if !n.checked_sub(1).is_some_and(|idx| view.use_sample(idx)) {
                        self.set_error(format!("No sample {}", n));
                    }
                }
            }
            Ok(Command::Set(name, value)) => self.set_field(&name, &value),
            Ok(Command::Listen) => match &mut self.view {
                View::Story(story) => story.listen(self.narrator.as_ref()),
                _ => self.set_error("Open the story (5) to listen".to_string()),
            },
            Ok(Command::Stop) => self.stop_narration(),
            Ok(Command::Help) => {
                self.show_help = true;
            }
            Ok(Command::Quit) => {
                return Some(PortalAction::Quit);
            }
            Err(e) => {
                self.set_error(e.to_string());
            }
        }
        None
    }

    /// Enter in normal mode
    fn activate(&mut self) {
        match &mut self.view {
            View::Home(home) => {
                let route = home.selected_route();
                self.navigate(route);
            }
            View::Enrollment(view) => {
                let outcome = if view.wizard().steps().is_last() {
                    view.submit()
                } else {
                    view.advance()
                };
                self.report_step(outcome);
            }
            View::Update(view) => {
                let focus = view.focus();
                match (focus, view.activate(self.narrator.as_ref())) {
                    (UpdateFocus::Verification, Some(false)) => {
                        self.set_error("Enter a valid 12-digit Aadhaar number".to_string());
                    }
                    (UpdateFocus::Verification, Some(true)) => {
                        self.set_info("Aadhaar verified! Review your details below.".to_string());
                    }
                    (UpdateFocus::Scan, Some(false)) => {
                        self.set_info("Face scan already in progress".to_string());
                    }
                    _ => {}
                }
            }
            View::Status(view) => {
                let on_input = view.focus() == StatusFocus::Input;
                if view.activate(self.lookup.clone(), self.events.clone()).is_none() && on_input {
                    self.set_error("Enter a valid 16-digit EID".to_string());
                }
            }
            View::Story(story) => story.toggle(self.narrator.as_ref()),
        }
    }

    fn submit(&mut self) {
        match &mut self.view {
            View::Enrollment(view) => {
                let outcome = view.submit();
                self.report_step(outcome);
            }
            View::Update(view) => match view.submit() {
                UpdateOutcome::Submitted => self.set_info(
                    "Update request submitted! You will receive an SMS confirmation shortly."
                        .to_string(),
                ),
                UpdateOutcome::NotVerified => {
                    self.set_error("Verify your Aadhaar number first".to_string())
                }
                UpdateOutcome::NothingSelected => {
                    self.set_error("Select at least one detail to update".to_string())
                }
                UpdateOutcome::AlreadySubmitted => {
                    self.set_info("Update request already submitted".to_string())
                }
            },
            View::Status(view) => {
                if view.submit(self.lookup.clone(), self.events.clone()).is_none() {
                    self.set_error("Enter a valid 16-digit EID".to_string());
                }
            }
            View::Home(_) | View::Story(_) => {
                self.set_error("Nothing to submit here".to_string());
            }
        }
    }

    fn step_forward(&mut self) {
        match &mut self.view {
            View::Enrollment(view) => {
                let outcome = view.advance();
                self.report_step(outcome);
            }
            View::Story(story) => story.select_next(),
            _ => self.view.focus_next(),
        }
    }

    fn step_back(&mut self) {
        match &mut self.view {
            View::Enrollment(view) => {
                let outcome = view.retreat();
                self.report_step(outcome);
            }
            View::Story(story) => story.select_prev(),
            _ => self.view.focus_prev(),
        }
    }

    fn report_step(&mut self, outcome: StepMove) {
        let View::Enrollment(view) = &self.view else {
            return;
        };
        let submitted = view.wizard().is_submitted();
        match outcome {
            StepMove::Moved | StepMove::Clamped => {}
            StepMove::Blocked(missing) => {
                let names: Vec<&str> = missing.iter().map(Field::key).collect();
                self.set_error(format!("Please complete: {}", names.join(", ")));
            }
            StepMove::Finished if submitted => {
                self.set_info(
                    "Enrollment submitted! Your EID will be sent to your mobile number."
                        .to_string(),
                );
            }
            StepMove::Finished => {}
        }
    }

    fn set_field(&mut self, name: &str, value: &str) {
        let field = match name.parse::<Field>() {
            Ok(field) => field,
            Err(e) => {
                self.set_error(e.to_string());
                return;
            }
        };
        if let View::Enrollment(view) = &mut self.view {
            if !view.wizard().is_submitted() {
                view.set_field(field, value, self.narrator.as_ref());
                return;
            }
        }
        self.set_error("Fields can only be set during enrollment".to_string());
    }

    fn cycle_choice(&mut self, forward: bool) {
        if let View::Enrollment(view) = &mut self.view {
            view.cycle_gender(forward, self.narrator.as_ref());
        }
    }

    fn stop_narration(&mut self) {
        match &mut self.view {
            View::Story(story) => story.stop(self.narrator.as_ref()),
            _ => self.narrator.cancel(),
        }
    }

    /// Move to the next field, staying in insert mode only if it takes text
    fn next_input(&mut self) {
        self.view.focus_next();
        if self.view.input_mut().is_none() {
            self.vim_mode = VimMode::Normal;
        }
    }

    /// Push the edited input into the view's model
    fn commit_input(&mut self) {
        match &mut self.view {
            View::Enrollment(view) => view.commit_input(self.narrator.as_ref()),
            View::Update(view) => view.commit_input(),
            View::Home(_) | View::Status(_) | View::Story(_) => {}
        }
    }

    /// Periodic timer event from a view-owned timer
    pub fn on_timer(&mut self, timer: u64) {
        let handled = match &mut self.view {
            View::Home(view) => view.on_timer(timer),
            View::Update(view) => view.on_timer(timer, self.narrator.as_ref()),
            View::Enrollment(_) | View::Status(_) | View::Story(_) => false,
        };
        if !handled {
            debug!(timer, "ignoring timer from a closed view");
        }
        self.update_status_bar();
    }

    /// Completed status lookup
    pub fn on_lookup(&mut self, response: LookupResponse) {
        let View::Status(view) = &mut self.view else {
            debug!(generation = response.generation, "ignoring lookup for a closed view");
            return;
        };
        if view.on_lookup(response, self.narrator.as_ref()) && view.is_celebrating() {
            self.celebration = CELEBRATION_TICKS;
            self.set_info("Congratulations! Your Aadhaar has been generated!".to_string());
        }
        self.update_status_bar();
    }

    pub fn set_error(&mut self, text: String) {
        self.message = Some(Message {
            text,
            is_error: true,
        });
    }

    pub fn set_info(&mut self, text: String) {
        self.message = Some(Message {
            text,
            is_error: false,
        });
    }

    pub fn tick(&mut self) {
        self.spinner_frame = (self.spinner_frame + 1) % 4;
        // Polling also reaps an utterance that finished on its own
        let speaking = self.narrator.is_speaking();
        if let View::Story(story) = &mut self.view {
            story.sync(speaking);
        }
        self.celebration = self.celebration.saturating_sub(1);
        self.update_status_bar();
    }

    fn update_status_bar(&mut self) {
        self.status_bar = match self.vim_mode {
            VimMode::Command => StatusBarState::command_mode(),
            VimMode::Insert => match &self.view {
                View::Enrollment(view) if view.focused_field() == Some(Field::Name) => {
                    StatusBarState::name_insert()
                }
                _ => StatusBarState::insert_mode(),
            },
            VimMode::Normal => match &self.view {
                View::Status(view) if view.checker().is_pending() => StatusBarState::checking(),
                View::Update(view) if view.is_scanning() => StatusBarState::scanning(),
                view => StatusBarState::for_route(view.route()),
            },
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::Event;
    use crate::narration::testing::RecordingNarrator;
    use crate::status::{LookupState, MockStatusTable};
    use crate::wizard::EnrollmentStep;
    use std::time::Duration;
    use tokio::sync::mpsc;

    struct Harness {
        app: PortalApp,
        narrator: Arc<RecordingNarrator>,
        rx: mpsc::UnboundedReceiver<Event>,
    }

    fn harness(start: Route) -> Harness {
        let (tx, rx) = mpsc::unbounded_channel();
        let narrator = Arc::new(RecordingNarrator::default());
        let app = PortalApp::new(
            PortalConfig::default(),
            start,
            narrator.clone(),
            Arc::new(MockStatusTable::new(Duration::ZERO)),
            tx,
        );
        Harness { app, narrator, rx }
    }

    fn press(app: &mut PortalApp, code: KeyCode) -> Option<PortalAction> {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn type_text(app: &mut PortalApp, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    fn command(app: &mut PortalApp, cmd: &str) -> Option<PortalAction> {
        press(app, KeyCode::Char(':'));
        type_text(app, cmd);
        press(app, KeyCode::Enter)
    }

    #[tokio::test]
    async fn greeting_is_spoken_once_per_process() {
        let mut h = harness(Route::Home);
        press(&mut h.app, KeyCode::Char('5'));
        press(&mut h.app, KeyCode::Char('1'));
        assert_eq!(h.app.route(), Route::Home);
        assert_eq!(h.narrator.lines(), vec![views::home::GREETING.to_string()]);
    }

    #[tokio::test]
    async fn number_keys_and_commands_switch_routes() {
        let mut h = harness(Route::Story);
        assert!(h.narrator.lines().is_empty());
        press(&mut h.app, KeyCode::Char('2'));
        assert_eq!(h.app.route(), Route::Enrollment);
        command(&mut h.app, "go /status");
        assert_eq!(h.app.route(), Route::Status);
        command(&mut h.app, "go /nowhere");
        assert!(h.app.message.as_ref().is_some_and(|m| m.is_error));
        assert_eq!(h.app.route(), Route::Status);
    }

    #[tokio::test]
    async fn quit_via_command_and_ctrl_c() {
        let mut h = harness(Route::Story);
        assert_eq!(command(&mut h.app, "q"), Some(PortalAction::Quit));
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(h.app.handle_key(ctrl_c), Some(PortalAction::Quit));
    }

    #[tokio::test]
    async fn enrollment_walkthrough() {
        let mut h = harness(Route::Enrollment);
        press(&mut h.app, KeyCode::Char('i'));
        assert_eq!(h.app.vim_mode, VimMode::Insert);
        type_text(&mut h.app, "Kavya");
        press(&mut h.app, KeyCode::Esc);
        assert_eq!(h.app.vim_mode, VimMode::Normal);

        let View::Enrollment(view) = &h.app.view else {
            panic!("expected enrollment view");
        };
        assert_eq!(view.wizard().form().get(Field::Name), "Kavya");

        command(&mut h.app, "set pincode 110 001");
        command(&mut h.app, "set colour blue");
        assert!(h.app.message.as_ref().is_some_and(|m| m.is_error));

        press(&mut h.app, KeyCode::Char('n'));
        press(&mut h.app, KeyCode::Char('n'));
        press(&mut h.app, KeyCode::Enter);
        let View::Enrollment(view) = &h.app.view else {
            panic!("expected enrollment view");
        };
        assert_eq!(view.step(), EnrollmentStep::Verification);
        assert_eq!(view.wizard().form().get(Field::PostalCode), "110001");

        press(&mut h.app, KeyCode::Enter);
        let View::Enrollment(view) = &h.app.view else {
            panic!("expected enrollment view");
        };
        assert!(view.wizard().is_submitted());
        assert!(h.app.message.as_ref().is_some_and(|m| !m.is_error));
        assert_eq!(
            h.narrator.lines(),
            vec![crate::wizard::PIN_DETECTED_NARRATION.to_string()]
        );
    }

    #[tokio::test]
    async fn status_check_end_to_end() {
        let mut h = harness(Route::Status);
        press(&mut h.app, KeyCode::Enter);
        assert!(h.app.message.as_ref().is_some_and(|m| m.is_error));

        command(&mut h.app, "sample 2");
        command(&mut h.app, "check");
        let View::Status(view) = &h.app.view else {
            panic!("expected status view");
        };
        assert!(view.checker().is_pending());
        assert_eq!(h.app.status_bar, StatusBarState::checking());

        let Some(Event::Lookup(response)) = h.rx.recv().await else {
            panic!("expected lookup response");
        };
        h.app.on_lookup(response);
        let View::Status(view) = &h.app.view else {
            panic!("expected status view");
        };
        assert!(matches!(view.state(), LookupState::Found(_)));
        assert_eq!(h.app.celebration, CELEBRATION_TICKS);
        assert_eq!(h.narrator.lines().len(), 1);
        h.app.tick();
        assert_eq!(h.app.celebration, CELEBRATION_TICKS - 1);
    }

    #[tokio::test]
    async fn lookup_for_a_left_view_is_dropped() {
        let mut h = harness(Route::Status);
        command(&mut h.app, "sample 1");
        command(&mut h.app, "check");
        let Some(Event::Lookup(response)) = h.rx.recv().await else {
            panic!("expected lookup response");
        };
        press(&mut h.app, KeyCode::Char('5'));
        press(&mut h.app, KeyCode::Char('4'));
        h.app.on_lookup(response);
        let View::Status(view) = &h.app.view else {
            panic!("expected status view");
        };
        assert_eq!(view.state(), &LookupState::Idle);
    }

    #[tokio::test]
    async fn update_flow_requires_verification() {
        let mut h = harness(Route::Update);
        command(&mut h.app, "submit");
        assert!(h.app.message.as_ref().is_some_and(|m| m.is_error));

        press(&mut h.app, KeyCode::Char('i'));
        type_text(&mut h.app, "1234-5678-9012");
        press(&mut h.app, KeyCode::Enter);
        let View::Update(view) = &h.app.view else {
            panic!("expected update view");
        };
        assert!(view.session().is_verified());
        assert_eq!(h.app.vim_mode, VimMode::Normal);
    }

    #[tokio::test]
    async fn leaving_the_story_stops_narration() {
        let mut h = harness(Route::Story);
        press(&mut h.app, KeyCode::Char('j'));
        press(&mut h.app, KeyCode::Enter);
        assert_eq!(h.narrator.lines().len(), 1);
        assert!(h.narrator.lines()[0].starts_with("In 2010"));
        press(&mut h.app, KeyCode::Char('3'));
        assert_eq!(h.narrator.cancel_count(), 2);
    }

    #[tokio::test]
    async fn story_stops_showing_playback_once_speech_ends() {
        let mut h = harness(Route::Story);
        press(&mut h.app, KeyCode::Enter);
        let View::Story(story) = &h.app.view else {
            panic!("expected story view");
        };
        assert!(story.is_playing());

        h.narrator.finish();
        h.app.tick();
        let View::Story(story) = &h.app.view else {
            panic!("expected story view");
        };
        assert!(!story.is_playing());

        press(&mut h.app, KeyCode::Enter);
        assert_eq!(h.narrator.lines().len(), 2);
    }

    #[tokio::test]
    async fn help_popup_swallows_keys() {
        let mut h = harness(Route::Story);
        press(&mut h.app, KeyCode::Char('?'));
        assert!(h.app.show_help);
        press(&mut h.app, KeyCode::Char('2'));
        assert_eq!(h.app.route(), Route::Story);
        press(&mut h.app, KeyCode::Esc);
        assert!(!h.app.show_help);
    }
}
