use crate::event::EventSender;
use crate::portal::config::HomeConfig;
use crate::router::Route;
use crate::timer::{ScopedTimer, TimerKind};

pub const GREETING: &str = "Namaste! Welcome to your Aadhaar services portal!";

/// Resident portraits cycled by the carousel
pub const AVATARS: [Avatar; 4] = [
    Avatar {
        label: "Punjabi",
        art: ["  ,^^^,  ", " ( o o ) ", "  \\ = /  "],
    },
    Avatar {
        label: "South Indian",
        art: ["  .~~~.  ", " ( ^ ^ ) ", "  \\_-_/  "],
    },
    Avatar {
        label: "Northeast",
        art: ["  _____  ", " ( - - ) ", "  \\ v /  "],
    },
    Avatar {
        label: "Farmer",
        art: [" _/===\\_ ", " ( o o ) ", "  \\ ~ /  "],
    },
];

pub const TRIVIA: [&str; 5] = [
    "Aadhaar is the world's largest biometric ID system with over 1.3 billion enrollments!",
    "The word 'Aadhaar' means 'foundation' or 'support' in Hindi",
    "Aadhaar authentication happens 2.5 billion times per month!",
    "It takes less than 10 minutes to enroll for Aadhaar",
    "Aadhaar has helped save over ₹2.2 lakh crores by eliminating duplicates",
];

pub const SERVICES: [Service; 3] = [
    Service {
        title: "New Enrollment",
        hindi: "नया नामांकन",
        description: "Get your first Aadhaar card",
        route: Route::Enrollment,
    },
    Service {
        title: "Update Details",
        hindi: "विवरण अपडेट करें",
        description: "Modify your existing information",
        route: Route::Update,
    },
    Service {
        title: "Check Status",
        hindi: "स्थिति जांचें",
        description: "Track your application progress",
        route: Route::Status,
    },
];

#[derive(Debug, Clone, Copy)]
pub struct Avatar {
    pub label: &'static str,
    pub art: [&'static str; 3],
}

#[derive(Debug, Clone, Copy)]
pub struct Service {
    pub title: &'static str,
    pub hindi: &'static str,
    pub description: &'static str,
    pub route: Route,
}

/// Landing view: rotating avatar and trivia plus service shortcuts
pub struct HomeView {
    avatar: usize,
    trivia: usize,
    selected: usize,
    carousel_timer: ScopedTimer,
    trivia_timer: ScopedTimer,
}

impl HomeView {
    pub fn new(config: &HomeConfig, tx: EventSender) -> Self {
        Self {
            avatar: 0,
            trivia: 0,
            selected: 0,
            carousel_timer: ScopedTimer::every(
                config.carousel_interval(),
                TimerKind::Carousel,
                tx.clone(),
            ),
            trivia_timer: ScopedTimer::every(config.trivia_interval(), TimerKind::Trivia, tx),
        }
    }

    pub fn avatar(&self) -> &Avatar {
        &AVATARS[self.avatar]
    }

    pub fn avatar_index(&self) -> usize {
        self.avatar
    }

    pub fn trivia(&self) -> &'static str {
        TRIVIA[self.trivia]
    }

    pub fn trivia_index(&self) -> usize {
        self.trivia
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn selected_route(&self) -> Route {
        SERVICES[self.selected].route
    }

    pub fn select_next(&mut self) {
        self.selected = (self.selected + 1) % SERVICES.len();
    }

    pub fn select_prev(&mut self) {
        self.selected = (self.selected + SERVICES.len() - 1) % SERVICES.len();
    }

    /// Apply a timer tick. Returns false for timers this view does not own.
    pub fn on_timer(&mut self, timer: u64) -> bool {
        if self.carousel_timer.owns(timer) {
            self.avatar = (self.avatar + 1) % AVATARS.len();
            true
        } else if self.trivia_timer.owns(timer) {
            self.trivia = (self.trivia + 1) % TRIVIA.len();
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::Event;
    use std::time::Duration;
    use tokio::sync::mpsc;

    fn fast() -> HomeConfig {
        HomeConfig {
            carousel_interval_ms: 10,
            trivia_interval_ms: 15,
            greeting: false,
        }
    }

    #[tokio::test]
    async fn rotations_wrap_around() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut home = HomeView::new(&fast(), tx);

        let mut carousel_ticks = 0;
        while carousel_ticks < AVATARS.len() {
            match rx.recv().await {
                Some(Event::Timer { timer, kind }) => {
                    assert!(home.on_timer(timer));
                    if kind == TimerKind::Carousel {
                        carousel_ticks += 1;
                    }
                }
                other => panic!("unexpected event {other:?}"),
            }
        }
        assert_eq!(home.avatar_index(), 0);
        assert!(home.trivia_index() < TRIVIA.len());
    }

    #[tokio::test]
    async fn foreign_timers_are_ignored() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let old = HomeView::new(&fast(), tx.clone());
        let stale = match rx.recv().await {
            Some(Event::Timer { timer, .. }) => timer,
            other => panic!("unexpected event {other:?}"),
        };
        drop(old);

        let mut home = HomeView::new(&fast(), tx);
        assert!(!home.on_timer(stale));
        assert_eq!(home.avatar_index(), 0);
        assert_eq!(home.trivia_index(), 0);
    }

    #[tokio::test]
    async fn dropping_the_view_stops_its_timers() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let home = HomeView::new(&fast(), tx);
        drop(home);
        let closed = tokio::time::timeout(Duration::from_secs(1), rx.recv()).await;
        assert!(matches!(closed, Ok(None)));
    }

    #[tokio::test]
    async fn service_selection_cycles() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let mut home = HomeView::new(&fast(), tx);
        assert_eq!(home.selected_route(), Route::Enrollment);
        home.select_prev();
        assert_eq!(home.selected_route(), Route::Status);
        home.select_next();
        home.select_next();
        assert_eq!(home.selected_route(), Route::Update);
    }
}
