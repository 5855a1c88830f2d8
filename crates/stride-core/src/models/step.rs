//! Step model definition.

use serde::{Deserialize, Serialize};

/// One unit of work within a plan.
///
/// The `id` is the step's 1-based ordinal position in the current step list,
/// not a stable identifier: it is recomputed after every mutation by
/// [`crate::steps::renumber`]. Title, description, and duration are opaque
/// display strings produced by the step generator.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Step {
    /// 1-based ordinal position within the plan
    pub id: u32,

    /// Brief title of the step
    pub title: String,

    /// What the step involves
    #[serde(default)]
    pub description: String,

    /// Expected duration as free text ("3 days", "1 week")
    #[serde(default)]
    pub duration: String,

    /// Whether the user has marked this step done
    #[serde(default)]
    pub completed: bool,
}

impl Step {
    /// Creates an incomplete step with a placeholder id.
    ///
    /// The final id is assigned by [`crate::steps::renumber`] once the step's
    /// position in the list is known.
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        duration: impl Into<String>,
    ) -> Self {
        Self {
            id: 0,
            title: title.into(),
            description: description.into(),
            duration: duration.into(),
            completed: false,
        }
    }
}
