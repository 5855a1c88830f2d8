//! Step-list primitives.
//!
//! Step ids are purely positional: after any mutation, ids must be contiguous
//! integers `1..=len` in list order. Every other component manipulates step
//! lists only through [`renumber`], [`partition`], and ordinary concatenation;
//! nothing else may touch the `id` field.

use crate::models::Step;

/// Reassigns step ids to their 1-based ordinal positions in current order.
pub fn renumber(mut steps: Vec<Step>) -> Vec<Step> {
    for (idx, step) in steps.iter_mut().enumerate() {
        step.id = (idx + 1) as u32;
    }
    steps
}

/// Stable-splits a step list into `(completed, remaining)` partitions.
///
/// Relative order within each partition matches the input order.
pub fn partition(steps: Vec<Step>) -> (Vec<Step>, Vec<Step>) {
    steps.into_iter().partition(|step| step.completed)
}

/// Computes the progress cursor for a step list.
///
/// Returns the 0-based index of the first incomplete step, or the list length
/// when every step is complete (including the empty list).
pub fn progress_cursor(steps: &[Step]) -> u32 {
    steps
        .iter()
        .position(|step| !step.completed)
        .unwrap_or(steps.len()) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn step(title: &str, completed: bool) -> Step {
        Step {
            id: 0,
            title: title.to_string(),
            description: String::new(),
            duration: String::new(),
            completed,
        }
    }

    #[test]
    fn test_renumber_assigns_contiguous_ids() {
        let steps = renumber(vec![step("a", false), step("b", true), step("c", false)]);
        let ids: Vec<u32> = steps.iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn test_renumber_empty_list() {
        assert!(renumber(Vec::new()).is_empty());
    }

    #[test]
    fn test_renumber_preserves_everything_but_ids() {
        let steps = renumber(vec![step("keep me", true)]);
        assert_eq!(steps[0].title, "keep me");
        assert!(steps[0].completed);
    }

    #[test]
    fn test_partition_is_stable() {
        let input = vec![
            step("a", true),
            step("b", false),
            step("c", true),
            step("d", false),
        ];
        let (completed, remaining) = partition(input);
        let done: Vec<&str> = completed.iter().map(|s| s.title.as_str()).collect();
        let todo: Vec<&str> = remaining.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(done, vec!["a", "c"]);
        assert_eq!(todo, vec!["b", "d"]);
    }

    #[test]
    fn test_progress_cursor_points_at_first_incomplete() {
        let steps = vec![step("a", true), step("b", true), step("c", false)];
        assert_eq!(progress_cursor(&steps), 2);
    }

    #[test]
    fn test_progress_cursor_all_complete() {
        let steps = vec![step("a", true), step("b", true)];
        assert_eq!(progress_cursor(&steps), 2);
    }

    #[test]
    fn test_progress_cursor_interleaved_completion() {
        // Completion toggles can leave gaps; the cursor stops at the first gap.
        let steps = vec![step("a", true), step("b", false), step("c", true)];
        assert_eq!(progress_cursor(&steps), 1);
    }

    #[test]
    fn test_progress_cursor_empty() {
        assert_eq!(progress_cursor(&[]), 0);
    }
}
