use std::collections::HashSet;

use super::simulate::plan_move;
use crate::hash::PlanningContext;
use crate::model::{Action, Program, SimState};

/// Legal next actions from `state`, in the fixed order left/right/up/down/
/// wait, skipping anything in `exclude` and anything that would be a
/// no-op bump into a wall, closed lift, or un-pushable rock. Returns
/// nothing once the run has ended or `prefix` has already reached the
/// `width * height` search depth cap.
pub fn legal_moves(
    ctx: &PlanningContext,
    state: &SimState,
    prefix: &Program,
    exclude: &HashSet<Action>,
) -> Vec<Action> {
    if state.is_ended || prefix.len() >= ctx.map.depth_cap() {
        return Vec::new();
    }

    Action::ALL_MOVES
        .iter()
        .copied()
        .filter(|a| !exclude.contains(a))
        .filter(|&a| match a {
            Action::Wait => true,
            _ => plan_move(ctx, state, a).is_some(),
        })
        .collect()
}
