//! Gamepad events published by the tracker
//!
//! Event names follow the kebab-case convention listeners subscribe with:
//! `button-pressed`, `button-released`, `axe-value-updated`, `axe-pushed`,
//! `axe-released`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::emitter::Event;
use crate::error::ParseEventKindError;

/// Payload of a button transition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ButtonEvent {
    pub idx: usize,
}

/// Payload of an axis event: the axis index and its new reading
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AxeEvent {
    pub idx: usize,
    pub value: f32,
}

/// One transition detected during a poll step
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "kebab-case")]
pub enum GamepadEvent {
    ButtonPressed(ButtonEvent),
    ButtonReleased(ButtonEvent),
    /// Small movement inside the dead zone that still changed meaningfully
    AxeValueUpdated(AxeEvent),
    /// Axis outside the dead zone (emitted every tick it stays there)
    AxePushed(AxeEvent),
    /// Axis returned to rest after being pushed
    AxeReleased(AxeEvent),
}

impl GamepadEvent {
    /// Button or axis index this event refers to
    pub fn idx(&self) -> usize {
        match self {
            Self::ButtonPressed(e) | Self::ButtonReleased(e) => e.idx,
            Self::AxeValueUpdated(e) | Self::AxePushed(e) | Self::AxeReleased(e) => e.idx,
        }
    }

    /// Axis reading, `None` for button events
    pub fn value(&self) -> Option<f32> {
        match self {
            Self::ButtonPressed(_) | Self::ButtonReleased(_) => None,
            Self::AxeValueUpdated(e) | Self::AxePushed(e) | Self::AxeReleased(e) => Some(e.value),
        }
    }
}

impl Event for GamepadEvent {
    type Kind = GamepadEventKind;

    fn kind(&self) -> GamepadEventKind {
        match self {
            Self::ButtonPressed(_) => GamepadEventKind::ButtonPressed,
            Self::ButtonReleased(_) => GamepadEventKind::ButtonReleased,
            Self::AxeValueUpdated(_) => GamepadEventKind::AxeValueUpdated,
            Self::AxePushed(_) => GamepadEventKind::AxePushed,
            Self::AxeReleased(_) => GamepadEventKind::AxeReleased,
        }
    }
}

/// Event names listeners subscribe to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GamepadEventKind {
    ButtonPressed,
    ButtonReleased,
    AxeValueUpdated,
    AxePushed,
    AxeReleased,
}

impl GamepadEventKind {
    pub const ALL: [GamepadEventKind; 5] = [
        Self::ButtonPressed,
        Self::ButtonReleased,
        Self::AxeValueUpdated,
        Self::AxePushed,
        Self::AxeReleased,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ButtonPressed => "button-pressed",
            Self::ButtonReleased => "button-released",
            Self::AxeValueUpdated => "axe-value-updated",
            Self::AxePushed => "axe-pushed",
            Self::AxeReleased => "axe-released",
        }
    }

    pub fn is_button(&self) -> bool {
        matches!(self, Self::ButtonPressed | Self::ButtonReleased)
    }
}

impl fmt::Display for GamepadEventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GamepadEventKind {
    type Err = ParseEventKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| ParseEventKindError(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_kind_names_parse_back() {
        for kind in GamepadEventKind::ALL {
            assert_eq!(kind.as_str().parse::<GamepadEventKind>(), Ok(kind));
        }
        assert_eq!(
            "axis-pushed".parse::<GamepadEventKind>(),
            Err(ParseEventKindError("axis-pushed".to_string()))
        );
    }

    #[test]
    fn test_event_kind_and_payload() {
        let event = GamepadEvent::AxeReleased(AxeEvent { idx: 3, value: 0.005 });
        assert_eq!(event.kind(), GamepadEventKind::AxeReleased);
        assert_eq!(event.idx(), 3);
        assert_eq!(event.value(), Some(0.005));

        let event = GamepadEvent::ButtonPressed(ButtonEvent { idx: 1 });
        assert!(event.kind().is_button());
        assert_eq!(event.value(), None);
    }

    #[test]
    fn test_json_shape() {
        let event = GamepadEvent::AxePushed(AxeEvent { idx: 0, value: 0.5 });
        assert_eq!(
            serde_json::to_value(event).unwrap(),
            json!({ "event": "axe-pushed", "idx": 0, "value": 0.5 })
        );

        let event = GamepadEvent::ButtonReleased(ButtonEvent { idx: 2 });
        assert_eq!(
            serde_json::to_value(event).unwrap(),
            json!({ "event": "button-released", "idx": 2 })
        );
    }
}
