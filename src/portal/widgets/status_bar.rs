use crate::router::Route;

/// Key hints shown in the status bar, chosen per route and mode
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusBarState {
    /// Left side hint text (e.g., "j/k: fields  i: edit")
    pub left_hint: String,
    /// Right side hint text (e.g., "1-5: views  :help")
    pub right_hint: String,
}

impl StatusBarState {
    fn new(left: &str, right: &str) -> Self {
        Self {
            left_hint: left.to_string(),
            right_hint: right.to_string(),
        }
    }

    /// Normal-mode hints for a route
    pub fn for_route(route: Route) -> Self {
        match route {
            Route::Home => Self::new("j/k: services  Enter: open", "1-5: views  :help"),
            Route::Enrollment => Self::new("j/k: fields  i: edit  n/p: step", "Enter: next  :submit"),
            Route::Update => Self::new("j/k: fields  i: edit  Enter: select", ":submit  :help"),
            Route::Status => Self::new("i: enter EID  j/k: samples", "Enter: check  :help"),
            Route::Story => Self::new("j/k: milestones", "Enter/l: listen  s: stop"),
        }
    }

    /// Hints while editing a text field
    pub fn insert_mode() -> Self {
        Self::new("Type to enter text", "Esc: normal  Tab: next field")
    }

    /// Hints while editing the enrollment name field
    pub fn name_insert() -> Self {
        Self::new("Type to enter text  Ctrl+n: suggestion", "Esc: normal  Tab: next field")
    }

    pub fn command_mode() -> Self {
        Self::new("", "Enter: run  Esc: cancel")
    }

    pub fn checking() -> Self {
        Self::new("Checking status...", "Enter: check again  Esc: normal")
    }

    pub fn scanning() -> Self {
        Self::new("Scanning face...", "")
    }
}
