use crate::error::Error;
use std::time::Duration;

/// Default time between resize checks
pub const DEFAULT_RESIZE_INTERVAL: Duration = Duration::from_millis(500);

/// Browser timers work in whole milliseconds
pub const MIN_RESIZE_INTERVAL: Duration = Duration::from_millis(1);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanvasConfig {
    pub canvas_id: String,
    pub resize_interval: Duration,
    pub poll_resize: bool,
    pub prevent_default: bool,
    pub stop_propagation: bool,
    pub disable_context_menu: bool,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            canvas_id: "canvas".to_string(),
            resize_interval: DEFAULT_RESIZE_INTERVAL,
            poll_resize: true,
            prevent_default: false,
            stop_propagation: false,
            disable_context_menu: false,
        }
    }
}

impl CanvasConfig {
    /// Set the id of the canvas element to listen
    pub fn canvas_id(mut self, id: &str) -> Self {
        self.canvas_id = id.to_string();
        self
    }

    /// Set the time between resize checks
    pub fn resize_interval(mut self, interval: Duration) -> Self {
        self.resize_interval = interval;
        self
    }

    /// Enable or disable the resize polling
    pub fn poll_resize(mut self, enabled: bool) -> Self {
        self.poll_resize = enabled;
        self
    }

    /// Call `preventDefault` on every mouse event
    pub fn prevent_default(mut self, prevent: bool) -> Self {
        self.prevent_default = prevent;
        self
    }

    /// Call `stopPropagation` on every mouse event
    pub fn stop_propagation(mut self, stop: bool) -> Self {
        self.stop_propagation = stop;
        self
    }

    /// Avoid the browser's context menu on right click
    pub fn disable_context_menu(mut self, disable: bool) -> Self {
        self.disable_context_menu = disable;
        self
    }

    pub fn validate(&self) -> Result<(), Error> {
        if self.poll_resize && self.resize_interval < MIN_RESIZE_INTERVAL {
            return Err(Error::InvalidInterval);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = CanvasConfig::default();
        assert_eq!(config.canvas_id, "canvas");
        assert_eq!(config.resize_interval, Duration::from_millis(500));
        assert!(config.poll_resize);
        assert!(!config.prevent_default);
        assert!(!config.disable_context_menu);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_interval_is_rejected() {
        let config = CanvasConfig::default().resize_interval(Duration::ZERO);
        assert_eq!(config.validate(), Err(Error::InvalidInterval));

        let config = config.resize_interval(Duration::from_micros(999));
        assert_eq!(
            config.validate(),
            Err(Error::InvalidInterval),
            "Less than a millisecond can't be scheduled"
        );
        assert!(config.clone().resize_interval(MIN_RESIZE_INTERVAL).validate().is_ok());

        // no polling, no interval to check
        let config = config.poll_resize(false);
        assert!(config.validate().is_ok());
    }
}
