//! Application state management.
//!
//! State is organized into logical groupings that correspond to different
//! areas of functionality.

pub mod navigation;
mod selection;
pub mod settings;
pub mod url_state;

pub use navigation::NavigationState;
pub use selection::SelectionState;

use crate::data::get_location;

/// Root application state containing all sub-states.
#[derive(Default)]
pub struct AppState {
    /// Marker selection and hover on the Bangkok overlay
    pub selection: SelectionState,

    /// Details card, status message, and pending navigation steps
    pub navigation: NavigationState,
}

impl AppState {
    pub fn new(initial_selection: Option<&str>) -> Self {
        let selection = SelectionState::with_initial(initial_selection);
        let navigation = NavigationState::new(selection.selected.and_then(get_location));
        Self {
            selection,
            navigation,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_selection_fills_details() {
        let state = AppState::new(Some("B1"));
        assert_eq!(state.selection.selected, Some("B1"));
        assert_eq!(state.navigation.selected.map(|l| l.id), Some("B1"));
        assert!(state.navigation.status.is_none());
    }

    #[test]
    fn test_no_initial_selection() {
        let state = AppState::new(None);
        assert!(state.selection.selected.is_none());
        assert!(state.navigation.selected.is_none());
    }
}
