use std::time::Duration;

/// Configuration options for the editor
#[derive(Debug, Clone)]
pub struct EditorOptions {
    /// Quiet period before a component's content edits are autosaved.
    /// Each new edit restarts the timer for that component.
    pub autosave_delay: Duration,

    /// Attempts allowed for a create that keeps hitting order-index
    /// conflicts. Non-conflict errors abort immediately regardless.
    pub create_retry_limit: u32,
}

impl Default for EditorOptions {
    fn default() -> Self {
        Self {
            autosave_delay: Duration::from_millis(1500),
            create_retry_limit: 3,
        }
    }
}

impl EditorOptions {
    /// Zero debounce delay; pending saves become due immediately.
    pub fn eager() -> Self {
        Self {
            autosave_delay: Duration::ZERO,
            ..Default::default()
        }
    }
}
