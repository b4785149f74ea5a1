use crate::error::{PortalError, Result};
use std::fmt;
use std::str::FromStr;

/// The five top-level views, selected by path
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Route {
    #[default]
    Home,
    Enrollment,
    Update,
    Status,
    Story,
}

impl Route {
    pub const ALL: [Route; 5] = [
        Route::Home,
        Route::Enrollment,
        Route::Update,
        Route::Status,
        Route::Story,
    ];

    pub fn path(&self) -> &'static str {
        match self {
            Route::Home => "/",
            Route::Enrollment => "/enrollment",
            Route::Update => "/update",
            Route::Status => "/status",
            Route::Story => "/story",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Route::Home => "Home",
            Route::Enrollment => "Enroll",
            Route::Update => "Update",
            Route::Status => "Status",
            Route::Story => "Story",
        }
    }

    /// Parse a path. A trailing slash and surrounding whitespace are ignored.
    pub fn from_path(path: &str) -> Result<Self> {
        let trimmed = path.trim();
        let normalized = match trimmed.trim_end_matches('/') {
            "" => "/",
            other => other,
        };
        Route::ALL
            .into_iter()
            .find(|route| route.path() == normalized)
            .ok_or_else(|| PortalError::UnknownRoute(trimmed.to_string()))
    }

    /// 1-based position used for quick switching
    pub fn from_number(n: usize) -> Option<Self> {
        n.checked_sub(1).and_then(|i| Route::ALL.get(i).copied())
    }
}

impl FromStr for Route {
    type Err = PortalError;

    fn from_str(s: &str) -> Result<Self> {
        Route::from_path(s)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_route_path() {
        for route in Route::ALL {
            assert_eq!(Route::from_path(route.path()).unwrap(), route);
        }
    }

    #[test]
    fn tolerates_trailing_slash() {
        assert_eq!(Route::from_path("/status/").unwrap(), Route::Status);
        assert_eq!(Route::from_path("").unwrap(), Route::Home);
    }

    #[test]
    fn rejects_unknown_paths() {
        assert!(matches!(
            Route::from_path("/admin"),
            Err(PortalError::UnknownRoute(p)) if p == "/admin"
        ));
    }

    #[test]
    fn numbers_map_in_order() {
        assert_eq!(Route::from_number(1), Some(Route::Home));
        assert_eq!(Route::from_number(5), Some(Route::Story));
        assert_eq!(Route::from_number(0), None);
        assert_eq!(Route::from_number(6), None);
    }
}
