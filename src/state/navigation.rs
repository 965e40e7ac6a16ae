//! Selection-to-navigation choreography.
//!
//! A selection updates the details card and status immediately, navigates
//! after [`NAVIGATE_DELAY`], then clears the status [`STATUS_CLEAR_DELAY`]
//! after the navigate fires. Each selection takes a new generation; steps
//! scheduled by an older generation are dropped when they come due, so a
//! quick second click never has its status cleared early by the first.

use crate::data::Location;
use geo_types::Coord;
use std::time::Duration;
use web_time::Instant;

/// Delay between a selection and the navigate command.
pub const NAVIGATE_DELAY: Duration = Duration::from_millis(1000);

/// Delay between the navigate command and clearing the status.
pub const STATUS_CLEAR_DELAY: Duration = Duration::from_millis(3000);

/// Zoom used when navigating to a selected location.
pub const SELECTION_ZOOM: f64 = 16.0;

/// Command handed to the map bridge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NavigateCommand {
    pub coordinates: Coord<f64>,
    pub zoom: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Step {
    Navigate(NavigateCommand),
    ClearStatus,
}

#[derive(Debug)]
struct PendingStep {
    due: Instant,
    generation: u64,
    step: Step,
}

/// Selected location details, transient status, and pending steps.
#[derive(Default)]
pub struct NavigationState {
    /// Location shown in the details card
    pub selected: Option<&'static Location>,

    /// Transient status shown while navigating
    pub status: Option<String>,

    generation: u64,
    pending: Vec<PendingStep>,
}

impl NavigationState {
    pub fn new(selected: Option<&'static Location>) -> Self {
        Self {
            selected,
            ..Default::default()
        }
    }

    /// Handles a location click at `now`.
    pub fn select(&mut self, location: &'static Location, now: Instant) {
        self.generation += 1;
        self.selected = Some(location);
        self.status = Some(navigation_status(location));
        self.pending.push(PendingStep {
            due: now + NAVIGATE_DELAY,
            generation: self.generation,
            step: Step::Navigate(NavigateCommand {
                coordinates: location.coordinates,
                zoom: SELECTION_ZOOM,
            }),
        });
    }

    /// Runs every step due at `now` and returns navigate commands to issue.
    pub fn poll(&mut self, now: Instant) -> Vec<NavigateCommand> {
        let (mut due, pending): (Vec<_>, Vec<_>) =
            self.pending.drain(..).partition(|p| p.due <= now);
        self.pending = pending;
        due.sort_by_key(|p| p.due);

        let mut commands = Vec::new();
        for PendingStep {
            generation, step, ..
        } in due
        {
            if generation != self.generation {
                log::debug!("Dropping stale {:?} from generation {}", step, generation);
                continue;
            }
            match step {
                Step::Navigate(command) => {
                    commands.push(command);
                    self.pending.push(PendingStep {
                        due: now + STATUS_CLEAR_DELAY,
                        generation,
                        step: Step::ClearStatus,
                    });
                }
                Step::ClearStatus => self.status = None,
            }
        }
        commands
    }

    /// Earliest pending step, for scheduling a repaint.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.pending.iter().map(|p| p.due).min()
    }

    /// Drops every pending step.
    pub fn cancel_all(&mut self) {
        self.generation += 1;
        self.pending.clear();
    }
}

/// Status text shown while the map flies to `location`.
pub fn navigation_status(location: &Location) -> String {
    format!("กำลังนำทางไปยัง {} ({})", location.name, location.id)
}
