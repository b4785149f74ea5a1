use crate::event::EventSender;
use crate::narration::Narrator;
use crate::timer::{ScopedTimer, TimerKind};
use crate::vim::InputBuffer;
use crate::wizard::validation::VERIFICATION_ID_LEN;
use crate::wizard::{ScanState, UpdateOutcome, UpdateSession, UPDATE_FIELDS, UPDATE_OPTIONS};
use std::time::Duration;

const SCAN_INTERVAL: Duration = Duration::from_millis(200);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateFocus {
    Verification,
    /// Index into [`UPDATE_FIELDS`]
    Field(usize),
    /// Index into [`UPDATE_OPTIONS`]
    Option(usize),
    Scan,
}

pub struct UpdateView {
    session: UpdateSession,
    verification: InputBuffer,
    inputs: Vec<InputBuffer>,
    focus: UpdateFocus,
    scan_timer: Option<ScopedTimer>,
    tx: EventSender,
}

impl UpdateView {
    pub fn new(tx: EventSender) -> Self {
        Self {
            session: UpdateSession::new(),
            verification: InputBuffer::digits(VERIFICATION_ID_LEN).sensitive(),
            inputs: UPDATE_FIELDS
                .iter()
                .map(|field| match field.digit_limit() {
                    Some(max) => InputBuffer::digits(max),
                    None => InputBuffer::new(),
                })
                .collect(),
            focus: UpdateFocus::Verification,
            scan_timer: None,
            tx,
        }
    }

    pub fn session(&self) -> &UpdateSession {
        &self.session
    }

    pub fn verification(&self) -> &InputBuffer {
        &self.verification
    }

    pub fn input(&self, idx: usize) -> Option<&InputBuffer> {
        self.inputs.get(idx)
    }

    pub fn focus(&self) -> UpdateFocus {
        self.focus
    }

    pub fn is_scanning(&self) -> bool {
        self.scan_timer.is_some()
    }

    pub fn input_mut(&mut self) -> Option<&mut InputBuffer> {
        match self.focus {
            UpdateFocus::Verification => Some(&mut self.verification),
            UpdateFocus::Field(idx) => self.inputs.get_mut(idx),
            UpdateFocus::Option(_) | UpdateFocus::Scan => None,
        }
    }

    /// Push the focused profile input into the session
    pub fn commit_input(&mut self) {
        if let UpdateFocus::Field(idx) = self.focus {
            if let (Some(field), Some(input)) = (UPDATE_FIELDS.get(idx), self.inputs.get(idx)) {
                self.session.set_field(*field, input.content());
            }
        }
    }

    pub fn focus_next(&mut self) {
        if !self.session.is_verified() {
            return;
        }
        self.focus = match self.focus {
            UpdateFocus::Verification => UpdateFocus::Field(0),
            UpdateFocus::Field(i) if i + 1 < UPDATE_FIELDS.len() => UpdateFocus::Field(i + 1),
            UpdateFocus::Field(_) => UpdateFocus::Option(0),
            UpdateFocus::Option(i) if i + 1 < UPDATE_OPTIONS.len() => UpdateFocus::Option(i + 1),
            UpdateFocus::Option(_) => UpdateFocus::Scan,
            UpdateFocus::Scan => UpdateFocus::Field(0),
        };
    }

    pub fn focus_prev(&mut self) {
        if !self.session.is_verified() {
            return;
        }
        self.focus = match self.focus {
            UpdateFocus::Verification | UpdateFocus::Field(0) => UpdateFocus::Scan,
            UpdateFocus::Field(i) => UpdateFocus::Field(i - 1),
            UpdateFocus::Option(0) => UpdateFocus::Field(UPDATE_FIELDS.len() - 1),
            UpdateFocus::Option(i) => UpdateFocus::Option(i - 1),
            UpdateFocus::Scan => UpdateFocus::Option(UPDATE_OPTIONS.len() - 1),
        };
    }

    /// Check the verification identifier and load the profile into the inputs
    pub fn verify(&mut self, narrator: &dyn Narrator) -> bool {
        let Some(welcome) = self.session.verify(self.verification.content()) else {
            return false;
        };
        if let Some(profile) = self.session.profile() {
            for (input, field) in self.inputs.iter_mut().zip(UPDATE_FIELDS) {
                input.set(profile.get(field));
            }
        }
        self.verification.clear();
        self.focus = UpdateFocus::Field(0);
        narrator.speak(welcome);
        true
    }

    /// What Enter does on the focused element
    pub fn activate(&mut self, narrator: &dyn Narrator) -> Option<bool> {
        match self.focus {
            UpdateFocus::Verification => Some(self.verify(narrator)),
            UpdateFocus::Field(_) => {
                self.focus_next();
                None
            }
            UpdateFocus::Option(idx) => {
                self.session.toggle_option(idx);
                None
            }
            UpdateFocus::Scan => Some(self.start_scan()),
        }
    }

    pub fn start_scan(&mut self) -> bool {
        if !self.session.start_scan() {
            return false;
        }
        self.scan_timer = Some(ScopedTimer::every(
            SCAN_INTERVAL,
            TimerKind::Scan,
            self.tx.clone(),
        ));
        true
    }

    /// Apply a timer tick. Returns false for timers this view does not own.
    pub fn on_timer(&mut self, timer: u64, narrator: &dyn Narrator) -> bool {
        if !self.scan_timer.as_ref().is_some_and(|t| t.owns(timer)) {
            return false;
        }
        if let Some(done) = self.session.tick_scan() {
            self.scan_timer = None;
            narrator.speak(done);
        }
        true
    }

    pub fn scan(&self) -> ScanState {
        self.session.scan()
    }

    pub fn submit(&mut self) -> UpdateOutcome {
        self.session.submit()
    }
}
