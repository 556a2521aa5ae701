//! The two screens: the filterable fact list and the single-fact detail
//!
//! Views issue requests as spawned tasks and fold completions back in
//! through `step()`. Each piece of rendered state updates independently,
//! so a slow categories response never holds back the fact grid.

mod detail;
mod list;

pub use detail::{CategoryLink, DetailScreen, DetailView, FactPage, ResearchEntry};
pub use list::{FactCard, ListEvent, ListScreen, ListView, TagView};

use crate::source::SourceResult;

/// Progress of one request-backed piece of screen state.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadState<T> {
    /// Request outstanding
    Loading,
    /// Request failed; carries a message for the user
    Failed(String),
    /// Request completed
    Ready(T),
}

impl<T> LoadState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading)
    }

    pub fn ready(&self) -> Option<&T> {
        match self {
            LoadState::Ready(value) => Some(value),
            _ => None,
        }
    }

    pub fn map<U>(&self, f: impl FnOnce(&T) -> U) -> LoadState<U> {
        match self {
            LoadState::Loading => LoadState::Loading,
            LoadState::Failed(message) => LoadState::Failed(message.clone()),
            LoadState::Ready(value) => LoadState::Ready(f(value)),
        }
    }
}

impl<T> From<SourceResult<T>> for LoadState<T> {
    fn from(result: SourceResult<T>) -> Self {
        match result {
            Ok(value) => LoadState::Ready(value),
            Err(e) => LoadState::Failed(e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::SourceError;

    #[test]
    fn from_result() {
        let ok: LoadState<u8> = Ok(3).into();
        assert_eq!(ok.ready(), Some(&3));

        let failed: LoadState<u8> = Err(SourceError::MissingData).into();
        assert_eq!(failed, LoadState::Failed("response carried no data".into()));
    }

    #[test]
    fn map_preserves_state() {
        assert!(LoadState::<u8>::Loading.map(|n| n + 1).is_loading());
        assert_eq!(LoadState::Ready(1).map(|n| n + 1), LoadState::Ready(2));
    }
}
