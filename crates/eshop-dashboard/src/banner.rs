//! Notification banner

/// One error slot and one success slot, each overwritten by the next message
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Banner {
    error: Option<String>,
    success: Option<String>,
}

impl Banner {
    /// Current error message
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Current success message
    #[must_use]
    pub fn success(&self) -> Option<&str> {
        self.success.as_deref()
    }

    /// Replace the error message
    pub fn set_error(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
    }

    /// Replace the success message
    pub fn set_success(&mut self, message: impl Into<String>) {
        self.success = Some(message.into());
    }

    /// Hide the error message
    pub fn dismiss_error(&mut self) {
        self.error = None;
    }

    /// Hide the success message
    pub fn dismiss_success(&mut self) {
        self.success = None;
    }

    /// Hide both messages
    pub fn clear(&mut self) {
        self.error = None;
        self.success = None;
    }

    /// Whether anything is showing
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.error.is_none() && self.success.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_messages_overwrite() {
        let mut banner = Banner::default();
        banner.set_error("first");
        banner.set_error("second");

        assert_eq!(banner.error(), Some("second"));
        assert_eq!(banner.success(), None);
    }

    #[test]
    fn test_slots_dismiss_independently() {
        let mut banner = Banner::default();
        banner.set_error("Failed to delete product");
        banner.set_success("Login successful!");

        banner.dismiss_error();
        assert_eq!(banner.error(), None);
        assert_eq!(banner.success(), Some("Login successful!"));

        banner.dismiss_success();
        assert!(banner.is_empty());
    }

    #[test]
    fn test_clear() {
        let mut banner = Banner::default();
        banner.set_error("e");
        banner.set_success("s");
        banner.clear();

        assert!(banner.is_empty());
    }
}
