//! Path search, goal proposal, and the planner driver (C5–C8).

mod astar;
mod driver;
mod goals;
mod memo;
mod node_pool;
mod time_budget;

pub use astar::{PathGraph, astar};
pub use driver::{PlannerDriver, SearchNode, Strategy};
pub use goals::{GoalSet, propose_goals};
pub use memo::Memo;
pub use node_pool::NodePool;
pub use time_budget::TimeBudget;
