// Panel layout coordinator
// Derives the three panes' widths and the topic pane mode from selection state

use super::catalog::Topic;
use super::selection::SelectionState;

/// Agent list width while the topic panel is collapsed
pub const LEFT_NORMAL_WIDTH: f32 = 256.0;
/// Agent list width while the topic panel is expanded
pub const LEFT_NARROW_WIDTH: f32 = 192.0;
/// Width of the topic rail
pub const RIGHT_RAIL_WIDTH: f32 = 96.0;

/// Width class of a pane
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PaneWidth {
    /// Fixed width in points
    Fixed(f32),
    /// Share of the available window width
    Fraction(f32),
}

impl PaneWidth {
    /// Resolve to points given the available width
    pub fn resolve(&self, available: f32) -> f32 {
        match *self {
            PaneWidth::Fixed(points) => points.min(available),
            PaneWidth::Fraction(share) => (available * share).max(0.0),
        }
    }
}

/// What the right pane shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RightPaneMode {
    /// Narrow rail of rotated topic labels
    Rail,
    /// Thread list for the topic, or nothing if no topic is selected
    Expanded {
        /// Topic whose threads are listed
        topic: Option<Topic>,
    },
}

/// Layout descriptor for one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanelLayout {
    /// Agent list
    pub left: PaneWidth,
    /// Chat
    pub middle: PaneWidth,
    /// Topics
    pub right: PaneWidth,
    /// Topic pane content mode
    pub right_mode: RightPaneMode,
}

/// Compute the layout for a selection state
pub fn compute_layout(state: &SelectionState) -> PanelLayout {
    if state.is_topic_expanded() {
        PanelLayout {
            left: PaneWidth::Fixed(LEFT_NARROW_WIDTH),
            middle: PaneWidth::Fraction(0.25),
            right: PaneWidth::Fraction(0.60),
            right_mode: RightPaneMode::Expanded {
                topic: state.selected_topic(),
            },
        }
    } else {
        PanelLayout {
            left: PaneWidth::Fixed(LEFT_NORMAL_WIDTH),
            middle: PaneWidth::Fraction(0.60),
            right: PaneWidth::Fixed(RIGHT_RAIL_WIDTH),
            right_mode: RightPaneMode::Rail,
        }
    }
}
