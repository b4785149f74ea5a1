//! Per-route view state. A view is built when its route is entered and
//! dropped when the route is left, taking its timers and lookups with it.

pub mod enrollment;
pub mod home;
pub mod status;
pub mod story;
pub mod update;

pub use enrollment::EnrollmentView;
pub use home::HomeView;
pub use status::{StatusFocus, StatusView};
pub use story::StoryView;
pub use update::{UpdateFocus, UpdateView};

use super::config::PortalConfig;
use crate::event::EventSender;
use crate::router::Route;
use crate::vim::InputBuffer;

pub enum View {
    Home(HomeView),
    Enrollment(EnrollmentView),
    Update(UpdateView),
    Status(StatusView),
    Story(StoryView),
}

impl View {
    /// Fresh state for `route`. Must be called from within a tokio runtime.
    pub fn open(route: Route, config: &PortalConfig, tx: EventSender) -> Self {
        match route {
            Route::Home => View::Home(HomeView::new(&config.home, tx)),
            Route::Enrollment => {
                View::Enrollment(EnrollmentView::new(config.enrollment.advance_policy))
            }
            Route::Update => View::Update(UpdateView::new(tx)),
            Route::Status => View::Status(StatusView::new()),
            Route::Story => View::Story(StoryView::new()),
        }
    }

    pub fn route(&self) -> Route {
        match self {
            View::Home(_) => Route::Home,
            View::Enrollment(_) => Route::Enrollment,
            View::Update(_) => Route::Update,
            View::Status(_) => Route::Status,
            View::Story(_) => Route::Story,
        }
    }

    /// Text input that insert mode edits, if the focus is on one
    pub fn input_mut(&mut self) -> Option<&mut InputBuffer> {
        match self {
            View::Enrollment(view) => view.input_mut(),
            View::Update(view) => view.input_mut(),
            View::Status(view) => view.input_mut(),
            View::Home(_) | View::Story(_) => None,
        }
    }

    pub fn focus_next(&mut self) {
        match self {
            View::Home(view) => view.select_next(),
            View::Enrollment(view) => view.focus_next(),
            View::Update(view) => view.focus_next(),
            View::Status(view) => view.focus_next(),
            View::Story(view) => view.select_next(),
        }
    }

    pub fn focus_prev(&mut self) {
        match self {
            View::Home(view) => view.select_prev(),
            View::Enrollment(view) => view.focus_prev(),
            View::Update(view) => view.focus_prev(),
            View::Status(view) => view.focus_prev(),
            View::Story(view) => view.select_prev(),
        }
    }
}
