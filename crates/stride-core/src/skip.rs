//! Deterministic skip mutator.
//!
//! Removes a user-specified number of upcoming, not-yet-completed steps.
//! This mutator never consults the generative producer; it has to stay
//! deterministic so skips are testable and repeatable.

use crate::models::Step;
use crate::steps::{partition, renumber};

/// Result of applying a skip request to a step list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkipOutcome {
    /// The step list after the skip, renumbered
    pub steps: Vec<Step>,
    /// How many steps were actually removed
    pub skipped: usize,
    /// Human-readable description of what happened
    pub note: String,
}

/// Returns true when a modification request is asking to skip steps.
pub fn is_skip_request(request: &str) -> bool {
    request.to_lowercase().contains("skip")
}

/// Extracts the first integer literal from a request, defaulting to 1.
///
/// Only a digitless request falls back to the default; an explicit "skip 0"
/// is honored as zero.
fn parse_skip_count(request: &str) -> usize {
    let digits: String = request
        .chars()
        .skip_while(|c| !c.is_ascii_digit())
        .take_while(char::is_ascii_digit)
        .collect();
    digits.parse().unwrap_or(1)
}

/// Removes the first `count` steps of the remaining partition, where `count`
/// is parsed from the request text.
///
/// Completed steps are never touched and stay contiguous at the front of the
/// result. If nothing remains to skip, the list is returned unmodified with an
/// explanatory note.
pub fn skip(steps: &[Step], request: &str) -> SkipOutcome {
    let count = parse_skip_count(request);
    let (completed, remaining) = partition(steps.to_vec());

    if remaining.is_empty() {
        return SkipOutcome {
            steps: steps.to_vec(),
            skipped: 0,
            note: "No remaining steps to skip".to_string(),
        };
    }

    let skipped = count.min(remaining.len());
    let mut merged = completed;
    merged.extend(remaining.into_iter().skip(skipped));

    SkipOutcome {
        steps: renumber(merged),
        skipped,
        note: format!(
            "Skipped {skipped} step{} as requested",
            if skipped == 1 { "" } else { "s" }
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn step(id: u32, title: &str, completed: bool) -> Step {
        Step {
            id,
            title: title.to_string(),
            description: String::new(),
            duration: String::new(),
            completed,
        }
    }

    #[test]
    fn test_skip_named_count() {
        let steps: Vec<Step> = (1..=7).map(|i| step(i, &format!("s{i}"), false)).collect();
        let outcome = skip(&steps, "skip next 5 steps");
        assert_eq!(outcome.skipped, 5);
        assert_eq!(outcome.steps.len(), 2);
        assert_eq!(outcome.steps[0].title, "s6");
        assert_eq!(outcome.steps[0].id, 1);
    }

    #[test]
    fn test_skip_defaults_to_one_without_digits() {
        let steps = vec![step(1, "a", false), step(2, "b", false)];
        let outcome = skip(&steps, "please skip this");
        assert_eq!(outcome.skipped, 1);
        assert_eq!(outcome.steps.len(), 1);
        assert_eq!(outcome.steps[0].title, "b");
    }

    #[test]
    fn test_skip_leaves_completed_steps_untouched() {
        // Scenario from the progress tracker: two done, two upcoming, skip 1.
        let steps = vec![
            step(1, "one", true),
            step(2, "two", true),
            step(3, "three", false),
            step(4, "four", false),
        ];
        let outcome = skip(&steps, "skip 1");

        assert_eq!(outcome.skipped, 1);
        let titles: Vec<&str> = outcome.steps.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, vec!["one", "two", "four"]);
        let ids: Vec<u32> = outcome.steps.iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert!(outcome.steps[0].completed && outcome.steps[1].completed);
    }

    #[test]
    fn test_skip_more_than_remaining_clears_remaining() {
        let steps = vec![step(1, "done", true), step(2, "todo", false)];
        let outcome = skip(&steps, "skip 10 steps");
        assert_eq!(outcome.skipped, 1);
        assert_eq!(outcome.steps.len(), 1);
        assert!(outcome.steps[0].completed);
    }

    #[test]
    fn test_skip_with_nothing_remaining_is_a_noop() {
        let steps = vec![step(1, "done", true)];
        let outcome = skip(&steps, "skip 2");
        assert_eq!(outcome.skipped, 0);
        assert_eq!(outcome.steps, steps);
        assert_eq!(outcome.note, "No remaining steps to skip");
    }

    #[test]
    fn test_skip_zero_is_honored() {
        let steps = vec![step(1, "a", false)];
        let outcome = skip(&steps, "skip 0 steps");
        assert_eq!(outcome.skipped, 0);
        assert_eq!(outcome.steps.len(), 1);
    }

    #[test]
    fn test_is_skip_request() {
        assert!(is_skip_request("please SKIP the next two"));
        assert!(!is_skip_request("make the plan shorter"));
    }

    #[test]
    fn test_first_integer_wins() {
        let steps: Vec<Step> = (1..=5).map(|i| step(i, &format!("s{i}"), false)).collect();
        let outcome = skip(&steps, "skip 2 of the next 4 steps");
        assert_eq!(outcome.skipped, 2);
    }
}
