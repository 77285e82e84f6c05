use std::collections::{HashSet, VecDeque};

use crate::solver::csp::ConstraintId;

/// FIFO worklist of constraints awaiting revision, deduplicated against its
/// current contents. A constraint that has already been popped may be pushed
/// again; only simultaneous queue membership is collapsed.
#[derive(Debug, Default)]
pub struct WorkList {
    queue: VecDeque<ConstraintId>,
    members: HashSet<ConstraintId>,
}

impl WorkList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_back(&mut self, constraint: ConstraintId) {
        if self.members.insert(constraint) {
            self.queue.push_back(constraint);
        }
    }

    pub fn pop_front(&mut self) -> Option<ConstraintId> {
        let constraint = self.queue.pop_front()?;
        self.members.remove(&constraint);
        Some(constraint)
    }
}
