//! Transition rules for buttons and dead-zone classification for axes
//!
//! These are the pure comparisons the tracker runs against its stored state
//! on every poll step. All comparisons are strict: a magnitude of exactly the
//! dead zone neither releases nor pushes an axis.

/// Default dead-zone magnitude for analog axes
pub const DEFAULT_DEAD_ZONE: f32 = 0.01;

/// Edge detected on a digital button
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonTransition {
    Pressed,
    Released,
}

/// Classification of an axis reading against the previous one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisTransition {
    /// Back inside the dead zone after having been outside it
    Released,
    /// Outside the dead zone
    Pushed,
    /// Inside the dead zone but moved by more than the dead zone
    ValueUpdated,
}

/// Compare a button's stored and current pressed flags
pub fn button_transition(was_pressed: bool, is_pressed: bool) -> Option<ButtonTransition> {
    match (was_pressed, is_pressed) {
        (false, true) => Some(ButtonTransition::Pressed),
        (true, false) => Some(ButtonTransition::Released),
        _ => None,
    }
}

/// Classify an axis reading
///
/// # Arguments
/// * `previous` - Value stored on the previous tick
/// * `value` - Current raw reading
/// * `dead_zone` - Magnitude below which readings count as rest
///
/// # Returns
/// At most one transition; `None` when nothing noteworthy happened
pub fn classify_axis(previous: f32, value: f32, dead_zone: f32) -> Option<AxisTransition> {
    if value.abs() < dead_zone && previous.abs() > dead_zone {
        Some(AxisTransition::Released)
    } else if value.abs() > dead_zone {
        Some(AxisTransition::Pushed)
    } else if (value - previous).abs() > dead_zone {
        Some(AxisTransition::ValueUpdated)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_button_edges() {
        assert_eq!(button_transition(false, true), Some(ButtonTransition::Pressed));
        assert_eq!(button_transition(true, false), Some(ButtonTransition::Released));
        assert_eq!(button_transition(true, true), None);
        assert_eq!(button_transition(false, false), None);
    }

    #[test]
    fn test_dead_zone_sequence() {
        let values = [0.0, 0.5, 0.5, 0.005, 0.0];
        let mut previous = 0.0;
        let mut seen = Vec::new();
        for value in values {
            seen.push(classify_axis(previous, value, DEFAULT_DEAD_ZONE));
            previous = value;
        }

        assert_eq!(
            seen,
            vec![
                None,
                Some(AxisTransition::Pushed),
                Some(AxisTransition::Pushed),
                Some(AxisTransition::Released),
                None,
            ]
        );
    }

    #[test]
    fn test_negative_deflection_counts_as_pushed() {
        assert_eq!(classify_axis(0.0, -0.8, DEFAULT_DEAD_ZONE), Some(AxisTransition::Pushed));
        assert_eq!(classify_axis(-0.8, 0.0, DEFAULT_DEAD_ZONE), Some(AxisTransition::Released));
    }

    #[test]
    fn test_value_updated_inside_dead_zone() {
        // Both readings sit inside a wider dead zone but differ by more than it
        assert_eq!(classify_axis(-0.04, 0.04, 0.05), Some(AxisTransition::ValueUpdated));
        assert_eq!(classify_axis(0.0, 0.004, DEFAULT_DEAD_ZONE), None);
    }

    #[test]
    fn test_boundary_is_neither_pushed_nor_released() {
        // |0.25| == dead zone exactly: not outside, not below
        assert_eq!(classify_axis(0.25, 0.25, 0.25), None);
        assert_eq!(classify_axis(-0.25, 0.25, 0.25), Some(AxisTransition::ValueUpdated));
    }
}
