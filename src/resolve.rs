// Row-to-identifier resolution
//
// The tracker numbers intervals backwards: @1 is the newest and @N the
// oldest of N listed. A displayed row r therefore maps to @(N - r).
// Getting this wrong silently edits the wrong interval.

use crate::error::{BridgeError, BridgeResult};

/// A selection translated into tracker terms
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolved {
    /// Tracker identifier, used as `@id`
    pub task_id: i64,
    /// Row in the displayed list
    pub row: usize,
}

impl Resolved {
    /// `@id` argument form
    pub fn tag(&self) -> String {
        format!("@{}", self.task_id)
    }
}

/// Map a selected display row to the tracker's identifier.
///
/// With no selection the most recent interval (`@1`) is targeted, even for
/// an empty list, which matches what the tracker itself does for `@1`.
/// A row beyond the listed tasks is rejected rather than wrapped.
pub fn resolve(selected_row: Option<usize>, snapshot_len: usize) -> BridgeResult<Resolved> {
    match selected_row {
        Some(row) if row < snapshot_len => Ok(Resolved {
            task_id: (snapshot_len - row) as i64,
            row,
        }),
        Some(row) => Err(BridgeError::RowOutOfRange { row, len: snapshot_len }),
        None => Ok(Resolved {
            task_id: 1,
            row: snapshot_len.saturating_sub(1),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selected_rows_count_backwards() {
        for len in 1..=12usize {
            for row in 0..len {
                let resolved = resolve(Some(row), len).unwrap();
                assert_eq!(resolved.task_id, (len - row) as i64);
                assert_eq!(resolved.row, row);
            }
        }
    }

    #[test]
    fn test_no_selection_targets_most_recent() {
        assert_eq!(resolve(None, 5).unwrap(), Resolved { task_id: 1, row: 4 });
        assert_eq!(resolve(None, 1).unwrap(), Resolved { task_id: 1, row: 0 });
    }

    #[test]
    fn test_empty_list_without_selection() {
        assert_eq!(resolve(None, 0).unwrap().task_id, 1);
    }

    #[test]
    fn test_row_out_of_range() {
        assert!(matches!(
            resolve(Some(3), 3),
            Err(BridgeError::RowOutOfRange { row: 3, len: 3 })
        ));
        assert!(resolve(Some(0), 0).is_err());
    }

    #[test]
    fn test_tag_format() {
        assert_eq!(resolve(Some(0), 4).unwrap().tag(), "@4");
    }
}
