use std::fmt;

/// Zero-argument unit of work run when its entry is selected.
pub type Action = Box<dyn FnMut()>;

/// One selectable item: a display label and the action it triggers.
///
/// The label is printed exactly as given, so callers usually include the
/// number themselves (`"1. Say hi"`).
pub struct MenuEntry {
    label: String,
    action: Action,
}

impl MenuEntry {
    /// Creates an entry from a label and any `FnMut()` closure.
    pub fn new(label: impl Into<String>, action: impl FnMut() + 'static) -> Self {
        Self {
            label: label.into(),
            action: Box::new(action),
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Runs the action to completion on the calling thread.
    pub(crate) fn invoke(&mut self) {
        (self.action)();
    }
}

impl fmt::Debug for MenuEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MenuEntry")
            .field("label", &self.label)
            .finish_non_exhaustive()
    }
}
