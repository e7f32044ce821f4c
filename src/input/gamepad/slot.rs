//! Single-gamepad slot
//!
//! The tracker follows exactly one gamepad. The slot decides which connected
//! controller that is (optional case-insensitive product match) and remembers
//! its identity so only that controller's disconnect detaches it.

use tracing::{debug, info, warn};

use super::device::DeviceId;

#[derive(Debug, Clone)]
pub struct DeviceSlot {
    /// Product pattern to match (substring, case-insensitive); `None` accepts any
    pub product_match: Option<String>,

    /// Currently connected gamepad
    pub connected_id: Option<DeviceId>,

    /// Product name of the currently connected gamepad
    pub connected_name: Option<String>,
}

impl DeviceSlot {
    pub fn new(product_match: Option<String>) -> Self {
        Self {
            product_match,
            connected_id: None,
            connected_name: None,
        }
    }

    /// Check if this slot accepts the given gamepad name
    pub fn matches(&self, gamepad_name: &str) -> bool {
        match &self.product_match {
            Some(pattern) => gamepad_name.to_lowercase().contains(&pattern.to_lowercase()),
            None => true,
        }
    }

    pub fn is_connected(&self) -> bool {
        self.connected_id.is_some()
    }

    /// Offer a newly connected gamepad to the slot
    ///
    /// # Returns
    /// `true` if the gamepad now occupies the slot and should be attached
    pub fn try_connect(&mut self, id: DeviceId, name: &str) -> bool {
        if self.connected_id == Some(id) {
            return false;
        }
        if !self.matches(name) {
            debug!("Gamepad \"{}\" doesn't match pattern {:?}", name, self.product_match);
            return false;
        }
        if let Some(current) = &self.connected_name {
            warn!("Gamepad \"{}\" matches but slot already occupied by \"{}\"", name, current);
            return false;
        }

        self.connected_id = Some(id);
        self.connected_name = Some(name.to_string());
        info!("Gamepad {} connected: {}", id, name);
        true
    }

    /// Handle a disconnect signal
    ///
    /// # Returns
    /// `true` if it was the slot's gamepad
    pub fn disconnect(&mut self, id: DeviceId) -> bool {
        if self.connected_id != Some(id) {
            return false;
        }
        let name = self.connected_name.take().unwrap_or_else(|| "Unknown".to_string());
        warn!("Gamepad {} disconnected: {}", id, name);
        self.connected_id = None;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_matching() {
        let slot = DeviceSlot::new(Some("Xbox".to_string()));
        assert!(slot.matches("Xbox Wireless Controller"));
        assert!(slot.matches("xbox elite")); // Case insensitive
        assert!(!slot.matches("Nintendo Switch"));

        assert!(DeviceSlot::new(None).matches("Anything"));
    }

    #[test]
    fn test_first_match_occupies_slot() {
        let mut slot = DeviceSlot::new(None);
        assert!(slot.try_connect(DeviceId(0), "Pad A"));
        assert!(!slot.try_connect(DeviceId(1), "Pad B"));
        assert!(!slot.try_connect(DeviceId(0), "Pad A")); // already attached
        assert_eq!(slot.connected_id, Some(DeviceId(0)));
    }

    #[test]
    fn test_only_own_disconnect_frees_slot() {
        let mut slot = DeviceSlot::new(Some("8BitDo".to_string()));
        assert!(!slot.try_connect(DeviceId(3), "PS4 Controller"));
        assert!(slot.try_connect(DeviceId(4), "8BitDo Pro 2"));

        assert!(!slot.disconnect(DeviceId(3)));
        assert!(slot.is_connected());
        assert!(slot.disconnect(DeviceId(4)));
        assert!(!slot.is_connected());

        // Reconnect to the freed slot
        assert!(slot.try_connect(DeviceId(5), "8BitDo Pro 2"));
    }
}
