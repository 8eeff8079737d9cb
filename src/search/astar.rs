//! Generic A\* (C5): a graph collaborator trait plus a single best-first
//! search, parameterised the way the teacher keeps its search and its
//! tuning separate — here the algorithm knows nothing about boards or
//! robots, only the four operations the planner's world-graph adapter
//! implements in `driver.rs`.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};
use std::hash::Hash;
use std::time::Instant;

/// A location graph A\* can search over. `Loc` need not be a simulated
/// world directly — the planner's adapter uses move prefixes, with a
/// lightweight "stub" location standing in for the target tile.
pub trait PathGraph {
    type Loc: Eq + Hash + Clone;

    fn check_goal(&self, loc: &Self::Loc, goal: &Self::Loc) -> bool;
    fn children(&self, loc: &Self::Loc) -> Vec<Self::Loc>;
    fn distance(&self, from: &Self::Loc, to: &Self::Loc) -> i64;
    fn path_estimate(&self, loc: &Self::Loc, goal: &Self::Loc) -> i64;
}

struct Entry<L> {
    f: i64,
    g: i64,
    loc: L,
}

impl<L> PartialEq for Entry<L> {
    fn eq(&self, other: &Self) -> bool {
        self.f == other.f && self.g == other.g
    }
}
impl<L> Eq for Entry<L> {}
impl<L> PartialOrd for Entry<L> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
impl<L> Ord for Entry<L> {
    // Reversed so `BinaryHeap`, a max-heap, pops the smallest f (ties by g).
    fn cmp(&self, other: &Self) -> Ordering {
        other.f.cmp(&self.f).then_with(|| other.g.cmp(&self.g))
    }
}

/// Best-first search from `start` to `goal` over `graph`. Reopening is
/// allowed: a shorter `g` found for an already-seen location overwrites
/// its parent and re-enters the queue. Returns the empty path if the
/// queue drains without reaching the goal, or if `deadline` passes first.
pub fn astar<G: PathGraph>(graph: &G, start: G::Loc, goal: G::Loc, deadline: Instant) -> Vec<G::Loc> {
    let mut open = BinaryHeap::new();
    let mut g_score: HashMap<G::Loc, i64> = HashMap::new();
    let mut parent: HashMap<G::Loc, G::Loc> = HashMap::new();

    g_score.insert(start.clone(), 0);
    open.push(Entry {
        f: graph.path_estimate(&start, &goal),
        g: 0,
        loc: start.clone(),
    });

    while let Some(Entry { g, loc, .. }) = open.pop() {
        if Instant::now() >= deadline {
            return Vec::new();
        }
        if graph.check_goal(&loc, &goal) {
            return reconstruct_path(&parent, loc);
        }
        if g > *g_score.get(&loc).unwrap_or(&i64::MAX) {
            continue; // stale queue entry superseded by a shorter path found since
        }
        for child in graph.children(&loc) {
            let tentative_g = g + graph.distance(&loc, &child);
            if tentative_g < *g_score.get(&child).unwrap_or(&i64::MAX) {
                g_score.insert(child.clone(), tentative_g);
                parent.insert(child.clone(), loc.clone());
                open.push(Entry {
                    f: tentative_g + graph.path_estimate(&child, &goal),
                    g: tentative_g,
                    loc: child,
                });
            }
        }
    }
    Vec::new()
}

fn reconstruct_path<L: Eq + Hash + Clone>(parent: &HashMap<L, L>, mut loc: L) -> Vec<L> {
    let mut path = vec![loc.clone()];
    while let Some(prev) = parent.get(&loc) {
        path.push(prev.clone());
        loc = prev.clone();
    }
    path.reverse();
    path
}
