//! Step-list reconciliation.
//!
//! When a freshly generated or freshly edited candidate list must replace a
//! goal's plan, only the not-yet-done portion may change: completed steps are
//! retained verbatim, in their original relative order, at the front of the
//! result. Candidate steps are forced incomplete regardless of what the
//! generator claimed, so an untrusted producer can neither resurrect finished
//! work nor mark new steps done.

use crate::models::Step;
use crate::steps::{partition, renumber};

/// Merges a candidate step list against an existing plan's steps.
///
/// With no existing steps the result is simply the renumbered candidate. With
/// existing steps, the completed prefix of the existing plan is kept and the
/// candidate replaces everything else. Ids come out contiguous `1..=len`.
pub fn reconcile_create(existing: Option<&[Step]>, candidate: Vec<Step>) -> Vec<Step> {
    let mut candidate: Vec<Step> = candidate
        .into_iter()
        .map(|mut step| {
            step.completed = false;
            step
        })
        .collect();

    let merged = match existing {
        Some(steps) => {
            let (mut completed, _) = partition(steps.to_vec());
            completed.append(&mut candidate);
            completed
        }
        None => candidate,
    };

    renumber(merged)
}

/// Merges an edited remaining-steps list back into an existing plan.
///
/// The candidate is expected to have been produced by handing only the
/// remaining (incomplete) steps to the generative producer; the merge rule is
/// identical to [`reconcile_create`].
pub fn reconcile_tweak(existing: &[Step], edited_remaining: Vec<Step>) -> Vec<Step> {
    reconcile_create(Some(existing), edited_remaining)
}
