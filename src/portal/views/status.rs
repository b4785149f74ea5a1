use crate::event::EventSender;
use crate::narration::Narrator;
use crate::status::{LookupResponse, LookupState, StatusChecker, StatusLookup, SAMPLE_IDS};
use crate::vim::InputBuffer;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusFocus {
    Input,
    /// Index into [`SAMPLE_IDS`]
    Sample(usize),
}

pub struct StatusView {
    checker: StatusChecker,
    focus: StatusFocus,
    celebrating: bool,
}

impl Default for StatusView {
    fn default() -> Self {
        Self::new()
    }
}

impl StatusView {
    pub fn new() -> Self {
        Self {
            checker: StatusChecker::new(),
            focus: StatusFocus::Input,
            celebrating: false,
        }
    }

    pub fn checker(&self) -> &StatusChecker {
        &self.checker
    }

    pub fn state(&self) -> &LookupState {
        self.checker.state()
    }

    pub fn focus(&self) -> StatusFocus {
        self.focus
    }

    pub fn is_celebrating(&self) -> bool {
        self.celebrating
    }

    pub fn input_mut(&mut self) -> Option<&mut InputBuffer> {
        match self.focus {
            StatusFocus::Input => Some(self.checker.identifier_mut()),
            StatusFocus::Sample(_) => None,
        }
    }

    pub fn focus_next(&mut self) {
        self.focus = match self.focus {
            StatusFocus::Input => StatusFocus::Sample(0),
            StatusFocus::Sample(i) if i + 1 < SAMPLE_IDS.len() => StatusFocus::Sample(i + 1),
            StatusFocus::Sample(_) => StatusFocus::Input,
        };
    }

    pub fn focus_prev(&mut self) {
        self.focus = match self.focus {
            StatusFocus::Input => StatusFocus::Sample(SAMPLE_IDS.len() - 1),
            StatusFocus::Sample(0) => StatusFocus::Input,
            StatusFocus::Sample(i) => StatusFocus::Sample(i - 1),
        };
    }

    /// Copy a sample identifier (0-based) into the input
    pub fn use_sample(&mut self, idx: usize) -> bool {
        match SAMPLE_IDS.get(idx) {
            Some((id, _)) => {
                self.checker.set_identifier(id);
                self.focus = StatusFocus::Input;
                true
            }
            None => false,
        }
    }

    /// Enter on a sample fills it in, Enter on the input submits
    pub fn activate(&mut self, lookup: Arc<dyn StatusLookup>, tx: EventSender) -> Option<u64> {
        match self.focus {
            StatusFocus::Sample(idx) => {
                self.use_sample(idx);
                None
            }
            StatusFocus::Input => self.submit(lookup, tx),
        }
    }

    pub fn submit(&mut self, lookup: Arc<dyn StatusLookup>, tx: EventSender) -> Option<u64> {
        let generation = self.checker.submit(lookup, tx);
        if generation.is_some() {
            self.celebrating = false;
        }
        generation
    }

    /// Apply a lookup response and narrate what was found
    pub fn on_lookup(&mut self, response: LookupResponse, narrator: &dyn Narrator) -> bool {
        if !self.checker.resolve(response) {
            return false;
        }
        if let LookupState::Found(record) = self.checker.state() {
            narrator.speak(record.narration());
        }
        self.celebrating = self.checker.take_celebration();
        true
    }
}
