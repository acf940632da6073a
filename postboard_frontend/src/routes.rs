use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Feed,
    /// `id` is carried but the profile view only ever shows the signed-in user.
    Profile { id: String },
    NotFound(String),
}

impl Route {
    pub fn parse(path: &str) -> Self {
        let trimmed = path.trim();
        let segments: Vec<&str> = trimmed.split('/').filter(|s| !s.is_empty()).collect();
        match segments.as_slice() {
            [] => Route::Feed,
            ["profile", id] => Route::Profile { id: (*id).to_string() },
            _ => Route::NotFound(trimmed.to_string()),
        }
    }

    pub fn profile(id: impl Into<String>) -> Self {
        Route::Profile { id: id.into() }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Route::Feed => f.write_str("/"),
            Route::Profile { id } => write!(f, "/profile/{id}"),
            Route::NotFound(path) => f.write_str(path),
        }
    }
}
