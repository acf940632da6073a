use crate::models::{NewPost, Principal};

#[derive(Default)]
pub struct ComposerState {
    pub draft: String,
    pub submitting: bool,
}

impl ComposerState {
    /// Builds the row to insert. Only an empty draft is refused; a draft of
    /// spaces goes through as written.
    pub fn prepare(&self, principal: Option<&Principal>) -> Option<NewPost> {
        match principal {
            Some(principal) if !self.draft.is_empty() => {
                Some(NewPost::authored_by(principal, self.draft.clone()))
            }
            _ => None,
        }
    }

    /// Returns whether the feed should reload.
    pub fn finish(&mut self, succeeded: bool) -> bool {
        self.submitting = false;
        if succeeded {
            self.draft.clear();
        }
        succeeded
    }
}
