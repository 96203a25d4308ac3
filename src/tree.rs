//! Arena-backed search tree.
//!
//! Nodes live in a fixed-capacity [`Arena`] and refer to each other through
//! small integer [`NodeId`] handles, so the tree carries no ownership cycles
//! and freed slots are recycled through a free list. Children of a node form
//! an intrusive singly-linked list per player: the parent keeps one head
//! handle per player and each child keeps a `sibling` handle. Insertion is
//! at the head; iteration therefore yields children in reverse insertion
//! order.
//!
//! [`Tree`] owns the arena, the root node (which carries a placeholder
//! move), and the descent history of the playout in progress.

use std::fmt::{self, Write};
use std::ops::{Index, IndexMut};

use crate::board::{Player, Vertex, str_coord};
use crate::config::UctConfig;
use crate::constants::ANY_MOVE;

/// Handle to a node slot in the arena.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct NodeId(u32);

/// One search tree node.
///
/// `value` is the running mean of playout results seen through this node,
/// always from Black's perspective: positive favors Black. `bias` is the
/// effective visit count including the prior, and never drops below the
/// configured initial bias.
#[derive(Clone, Debug)]
pub struct Node {
    /// The move that leads to this node. The root carries [`ANY_MOVE`].
    pub mv: Vertex,
    pub value: f32,
    pub bias: f32,
    /// Head of the children list, per player to move.
    pub child: [Option<NodeId>; 2],
    /// Next sibling in the parent's children list.
    pub sibling: Option<NodeId>,
}

impl Node {
    fn blank() -> Self {
        Node {
            mv: ANY_MOVE,
            value: 0.0,
            bias: 1.0,
            child: [None, None],
            sibling: None,
        }
    }

    /// Prepare a freshly acquired slot. Called exactly once per allocation.
    pub fn init(&mut self, mv: Vertex, config: &UctConfig) {
        self.mv = mv;
        self.value = config.initial_value;
        self.bias = config.initial_bias;
        self.child = [None, None];
        self.sibling = None;
    }

    /// UCB urgency of this node for the given player.
    ///
    /// The exploitation term is the sign-adjusted mean; the exploration
    /// term divides the caller-precomputed coefficient
    /// (`ln(parent bias) * explore_rate`) by this node's bias.
    #[inline]
    pub fn ucb(&self, pl: Player, explore_coeff: f32) -> f32 {
        let exploit = match pl {
            Player::Black => self.value,
            Player::White => -self.value,
        };
        exploit + (explore_coeff / self.bias).sqrt()
    }

    /// Fold one playout result into the running mean. The prior counts as
    /// one pseudo-observation at the initial value.
    #[inline]
    pub fn update(&mut self, result: f32) {
        self.bias += 1.0;
        self.value += (result - self.value) / self.bias;
    }

    /// A leaf is mature once its bias exceeds the threshold; the next
    /// playout arriving here will expand it instead of rolling out.
    #[inline]
    pub fn is_mature(&self, mature_bias_threshold: f32) -> bool {
        self.bias > mature_bias_threshold
    }

    #[inline]
    pub fn no_children(&self, pl: Player) -> bool {
        self.child[pl.idx()].is_none()
    }
}

/// Fixed-capacity pool of node slots with free-list recycling.
///
/// Slots stay at stable locations, so a [`NodeId`] remains valid until the
/// slot is released. Exhausting the capacity is fatal.
pub struct Arena {
    slots: Box<[Node]>,
    free: Vec<NodeId>,
}

impl Arena {
    pub fn new(capacity: usize) -> Self {
        let slots: Vec<Node> = (0..capacity).map(|_| Node::blank()).collect();
        let free = (0..capacity as u32).rev().map(NodeId).collect();
        Arena {
            slots: slots.into_boxed_slice(),
            free,
        }
    }

    /// Take a slot off the free list. The slot contents are stale until
    /// `Node::init` runs.
    pub fn acquire(&mut self) -> NodeId {
        match self.free.pop() {
            Some(id) => id,
            None => panic!("node arena exhausted ({} slots)", self.slots.len()),
        }
    }

    /// Return a slot to the free list.
    pub fn release(&mut self, id: NodeId) {
        debug_assert!(!self.free.contains(&id), "double release of node slot");
        self.free.push(id);
    }

    pub fn live_count(&self) -> usize {
        self.slots.len() - self.free.len()
    }
}

impl Index<NodeId> for Arena {
    type Output = Node;

    #[inline]
    fn index(&self, id: NodeId) -> &Node {
        &self.slots[id.0 as usize]
    }
}

impl IndexMut<NodeId> for Arena {
    #[inline]
    fn index_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.slots[id.0 as usize]
    }
}

/// Iterator over one player's children list of a node.
pub struct Children<'a> {
    arena: &'a Arena,
    next: Option<NodeId>,
}

impl Iterator for Children<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let id = self.next?;
        self.next = self.arena[id].sibling;
        Some(id)
    }
}

/// The search tree: arena, root, and the descent path of the current
/// playout.
///
/// `history[0]` is always the root; each following entry is a child of the
/// one before it. Backpropagation walks exactly this path.
pub struct Tree {
    pub arena: Arena,
    pub history: Vec<NodeId>,
    pub config: UctConfig,
}

impl Tree {
    pub fn new(config: UctConfig) -> Self {
        let mut arena = Arena::new(config.max_nodes);
        let root = arena.acquire();
        arena[root].init(ANY_MOVE, &config);
        let mut history = Vec::with_capacity(config.max_depth);
        history.push(root);
        Tree {
            arena,
            history,
            config,
        }
    }

    #[inline]
    pub fn root(&self) -> NodeId {
        self.history[0]
    }

    /// Drop the descent path back to just the root.
    pub fn history_reset(&mut self) {
        self.history.truncate(1);
    }

    /// The frontier of the current descent.
    #[inline]
    pub fn current(&self) -> NodeId {
        self.history[self.history.len() - 1]
    }

    /// Descend one level: pick the UCB-best child of the current node for
    /// `pl` and append it to the history. The depth cap is fatal.
    pub fn descend_uct(&mut self, pl: Player) {
        let next = self.find_uct_child(self.current(), pl);
        assert!(
            self.history.len() < self.config.max_depth,
            "descent exceeded maximum depth {}",
            self.config.max_depth
        );
        self.history.push(next);
    }

    /// Allocate a fresh node for move `v` and hook it under the current
    /// node as a `pl`-child.
    pub fn expand_child(&mut self, pl: Player, v: Vertex) {
        let id = self.arena.acquire();
        self.arena[id].init(v, &self.config);
        self.add_child(self.current(), id, pl);
    }

    /// Remove the current node from its parent's `pl`-children list,
    /// recycle its slot, and pop the history. The node must be a leaf with
    /// respect to the opposing player.
    pub fn delete_current(&mut self, pl: Player) {
        assert!(self.history.len() > 1, "cannot delete the root");
        let cur = self.current();
        debug_assert!(self.arena[cur].no_children(pl.other()));
        let parent = self.history[self.history.len() - 2];
        self.remove_child(parent, pl, cur);
        self.arena.release(cur);
        self.history.pop();
    }

    /// Free `node` and every node reachable from it. Iterative so that
    /// deep trees cannot overflow the call stack.
    pub fn free_subtree(&mut self, node: NodeId) {
        let mut stack = vec![node];
        while let Some(id) = stack.pop() {
            for pl in [Player::Black, Player::White] {
                let mut next = self.arena[id].child[pl.idx()];
                while let Some(c) = next {
                    next = self.arena[c].sibling;
                    stack.push(c);
                }
            }
            self.arena.release(id);
        }
    }

    /// Fold one playout result into every node on the descent path, root
    /// included, exactly once each.
    pub fn backprop(&mut self, result: f32) {
        for i in 0..self.history.len() {
            let id = self.history[i];
            self.arena[id].update(result);
        }
    }

    /// Insert `child` at the head of `parent`'s children list for `pl`.
    /// The child must be fresh: no siblings, no children of its own.
    pub fn add_child(&mut self, parent: NodeId, child: NodeId, pl: Player) {
        debug_assert!(self.arena[child].sibling.is_none());
        debug_assert!(self.arena[child].child == [None, None]);
        self.arena[child].sibling = self.arena[parent].child[pl.idx()];
        self.arena[parent].child[pl.idx()] = Some(child);
    }

    /// Unlink `target` from `parent`'s `pl`-children list. Fatal if it is
    /// not on that list.
    pub fn remove_child(&mut self, parent: NodeId, pl: Player, target: NodeId) {
        if self.arena[parent].child[pl.idx()] == Some(target) {
            self.arena[parent].child[pl.idx()] = self.arena[target].sibling;
            self.arena[target].sibling = None;
            return;
        }
        let mut cur = self.arena[parent].child[pl.idx()];
        while let Some(id) = cur {
            if self.arena[id].sibling == Some(target) {
                self.arena[id].sibling = self.arena[target].sibling;
                self.arena[target].sibling = None;
                return;
            }
            cur = self.arena[id].sibling;
        }
        panic!("remove_child: node is not a child of its parent");
    }

    pub fn children(&self, id: NodeId, pl: Player) -> Children<'_> {
        Children {
            arena: &self.arena,
            next: self.arena[id].child[pl.idx()],
        }
    }

    #[inline]
    pub fn no_children(&self, id: NodeId, pl: Player) -> bool {
        self.arena[id].no_children(pl)
    }

    /// The child of `parent` with the highest UCB urgency for `pl`. Ties go
    /// to the child seen first in list order. The list must be non-empty.
    pub fn find_uct_child(&self, parent: NodeId, pl: Player) -> NodeId {
        let explore_coeff = self.arena[parent].bias.ln() * self.config.explore_rate;
        let mut best: Option<NodeId> = None;
        let mut best_urgency = f32::NEG_INFINITY;

        for child in self.children(parent, pl) {
            let urgency = self.arena[child].ucb(pl, explore_coeff);
            if urgency > best_urgency {
                best_urgency = urgency;
                best = Some(child);
            }
        }
        best.expect("uct selection on a node without children")
    }

    /// The child of `parent` with the highest bias. Same tie-break rule as
    /// UCB selection.
    pub fn find_most_explored_child(&self, parent: NodeId, pl: Player) -> NodeId {
        let mut best: Option<NodeId> = None;
        let mut best_bias = f32::NEG_INFINITY;

        for child in self.children(parent, pl) {
            if self.arena[child].bias > best_bias {
                best_bias = self.arena[child].bias;
                best = Some(child);
            }
        }
        best.expect("most-explored selection on a node without children")
    }

    fn rec_print(&self, out: &mut String, id: NodeId, depth: usize, pl: Player) -> fmt::Result {
        let node = &self.arena[id];
        for _ in 0..depth {
            out.push_str("  ");
        }
        writeln!(
            out,
            "{} {} {:.3} ({:.0})",
            pl,
            str_coord(node.mv),
            node.value,
            node.bias - self.config.initial_bias
        )?;
        for pl2 in [Player::Black, Player::White] {
            self.rec_print_children(out, id, depth, pl2)?;
        }
        Ok(())
    }

    /// Print the well-explored children of `id`, best mean first from the
    /// mover's point of view. A child qualifies once its effective visits
    /// reach the base cutoff plus a fraction of the parent's visits.
    fn rec_print_children(
        &self,
        out: &mut String,
        id: NodeId,
        depth: usize,
        pl: Player,
    ) -> fmt::Result {
        let min_visits = self.config.print_visit_threshold_base
            + (self.arena[id].bias - self.config.initial_bias)
                * self.config.print_visit_threshold_parent;

        let mut kids: Vec<NodeId> = self.children(id, pl).collect();
        let signed = |id: NodeId| match pl {
            Player::Black => self.arena[id].value,
            Player::White => -self.arena[id].value,
        };
        kids.sort_by(|&a, &b| {
            signed(b)
                .partial_cmp(&signed(a))
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        for child in kids {
            if self.arena[child].bias - self.config.initial_bias >= min_visits {
                self.rec_print(out, child, depth + 1, pl)?;
            }
        }
        Ok(())
    }
}

impl fmt::Display for Tree {
    /// Human-readable dump of the explored part of the tree.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = String::new();
        self.rec_print(&mut out, self.root(), 0, Player::Black)?;
        f.write_str(&out)
    }
}
