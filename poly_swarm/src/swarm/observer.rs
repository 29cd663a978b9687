use std::{cell::RefCell, rc::Rc};

/// Swarm state reported after every evaluation phase.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StepStatus {
    pub step: usize,
    pub substep: usize,
    pub global_best_cost: Option<f64>,
    pub r_squared: Option<f64>,
}

pub trait SwarmObserver {
    fn observe_step(&mut self, status: &StepStatus);
}

/// Records the global best cost of every evaluated step.
///
/// Clones share the same buffer, so keep one handle and register the other.
#[derive(Clone, Default)]
pub struct CostHistory {
    cost_history: Rc<RefCell<Vec<f64>>>,
}

impl CostHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cost_history(&self) -> Vec<f64> {
        self.cost_history.borrow().clone()
    }

    pub fn observe_cost(&self, cost: f64) {
        self.cost_history.borrow_mut().push(cost);
    }
}

impl SwarmObserver for CostHistory {
    fn observe_step(&mut self, status: &StepStatus) {
        if let Some(cost) = status.global_best_cost {
            self.observe_cost(cost);
        }
    }
}
