//! Marker selection and hover state for the Bangkok overlay.

use crate::data::{get_location, Location};

/// Selected and hovered location ids. The two are independent: hovering
/// never changes the selection and vice versa.
#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub struct SelectionState {
    pub selected: Option<&'static str>,
    pub hovered: Option<&'static str>,
}

impl SelectionState {
    /// Starts with `initial` selected if it names a known location.
    pub fn with_initial(initial: Option<&str>) -> Self {
        let selected = initial.and_then(|id| match get_location(id) {
            Some(location) => Some(location.id),
            None => {
                log::warn!("Ignoring unknown initial location '{}'", id);
                None
            }
        });
        Self {
            selected,
            hovered: None,
        }
    }

    /// Records a click and returns the location to forward upward.
    pub fn click(&mut self, location: &'static Location) -> &'static Location {
        self.selected = Some(location.id);
        location
    }

    pub fn set_hovered(&mut self, hovered: Option<&'static Location>) {
        self.hovered = hovered.map(|l| l.id);
    }

    pub fn is_selected(&self, location: &Location) -> bool {
        self.selected == Some(location.id)
    }

    pub fn is_hovered(&self, location: &Location) -> bool {
        self.hovered == Some(location.id)
    }
}
