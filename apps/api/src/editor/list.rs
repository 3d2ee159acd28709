//! Index-addressable operations on the repeating lists of a record.

use uuid::Uuid;

use crate::editor::EditError;
use crate::models::cv::Entry;

/// Append / remove / update-in-place for a list of entries.
///
/// A list never shrinks below one entry: the form always shows at least one
/// row to type into.
pub trait EntryList<T: Entry> {
    /// Appends a blank entry with a fresh id and returns its index.
    fn push_blank(&mut self) -> usize;

    /// Removes the entry at `index`. Fails when out of range or when it is the
    /// only entry left.
    fn remove_entry(&mut self, index: usize) -> Result<T, EditError>;

    fn entry_mut(&mut self, index: usize) -> Result<&mut T, EditError>;
}

impl<T: Entry> EntryList<T> for Vec<T> {
    fn push_blank(&mut self) -> usize {
        self.push(T::blank(Uuid::new_v4().to_string()));
        self.len() - 1
    }

    fn remove_entry(&mut self, index: usize) -> Result<T, EditError> {
        let len = self.len();
        if index >= len {
            return Err(EditError::IndexOutOfRange { index, len });
        }
        if len <= 1 {
            return Err(EditError::LastEntry);
        }
        Ok(self.remove(index))
    }

    fn entry_mut(&mut self, index: usize) -> Result<&mut T, EditError> {
        let len = self.len();
        self.get_mut(index)
            .ok_or(EditError::IndexOutOfRange { index, len })
    }
}
