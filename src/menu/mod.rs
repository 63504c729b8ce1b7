//! The menu list and the loop that renders it, reads a selection and dispatches actions.
//!
//! Includes:
//! - `entry`: `MenuEntry`, a label paired with its action.
//! - `choice`: parsing a typed line into a `Choice`.
//! - `controller`: the `Running -> Terminated` loop driving a `LineIo`.

mod choice;
mod controller;
mod entry;

pub use choice::*;
pub use controller::*;
pub use entry::*;

/// Ordered list of menu entries. Insertion order is display order and fixes each
/// entry's 1-based selection number; the exit option is always `len() + 1`.
#[derive(Debug, Default)]
pub struct Menu {
    entries: Vec<MenuEntry>,
}

impl Menu {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an entry, builder style.
    ///
    /// ```
    /// let menu = termenu::Menu::new()
    ///     .entry("1. Say hi", || println!("Hi!"))
    ///     .entry("2. Say bye", || println!("Bye!"));
    /// assert_eq!(menu.exit_index(), 3);
    /// ```
    pub fn entry(mut self, label: impl Into<String>, action: impl FnMut() + 'static) -> Self {
        self.push(MenuEntry::new(label, action));
        self
    }

    pub fn push(&mut self, entry: MenuEntry) {
        self.entries.push(entry);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Selection number of the synthesized exit option.
    pub fn exit_index(&self) -> usize {
        self.entries.len() + 1
    }

    /// Text of the synthesized exit line, e.g. `"3. Exit"`.
    pub fn exit_label(&self) -> String {
        format!("{}. Exit", self.exit_index())
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(MenuEntry::label)
    }
}

impl FromIterator<MenuEntry> for Menu {
    fn from_iter<T: IntoIterator<Item = MenuEntry>>(iter: T) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}
