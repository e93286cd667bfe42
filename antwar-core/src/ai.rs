//! Alpha-beta search over simulated game states
//!
//! The engine is generic over a [`SearchDomain`] so it can be driven by the
//! ant game ([`AntSearch`]) or by a synthetic tree in tests.
//!
//! ## Architecture
//! - Level 1: `search` (root extraction)
//! - Level 2: `Searcher::expand` (Maximizer/Minimizer recursion)
//! - Level 3: candidate ordering, half-list pruning, arena storage

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::error::GameError;
use crate::eval::{evaluate, Heuristics, LOSS_VALUE, WIN_VALUE};
use crate::game::{GameState, Move, PlayerId};
use crate::rules::legal_moves;
use crate::transition::apply_move;
use crate::units::{cheapest_ant, BuildType};

// ============================================================================
// CONFIGURATION
// ============================================================================

/// Search bounds
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Depth at which nodes are scored by their cached evaluation
    pub max_depth: u32,
    /// Keep only the better half of each node's children
    pub half_list_pruning: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_depth: 1,
            half_list_pruning: true,
        }
    }
}

impl SearchConfig {
    pub fn with_depth(mut self, max_depth: u32) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn without_half_list_pruning(mut self) -> Self {
        self.half_list_pruning = false;
        self
    }

    /// A depth of 0 never looks past the root and so never picks an action
    pub fn validate(&self) -> Result<(), GameError> {
        if self.max_depth == 0 {
            return Err(GameError::SearchDepth {
                depth: self.max_depth,
            });
        }
        Ok(())
    }
}

// ============================================================================
// DOMAIN
// ============================================================================

/// The game-specific half of the search
pub trait SearchDomain {
    type State;
    type Action: Clone;

    /// Actions worth exploring from `state`
    fn candidate_actions(&mut self, state: &Self::State) -> Vec<Self::Action>;

    /// Resulting state; `state` must be left untouched
    fn apply(&mut self, state: &Self::State, action: &Self::Action) -> Self::State;

    /// Value in [0, 1] for the searching agent; exactly 1.0 / 0.0 for won / lost
    fn evaluate(&self, state: &Self::State) -> f64;

    /// Whether the searching agent is the one to move in `state`
    fn is_agent_turn(&self, state: &Self::State) -> bool;
}

// ============================================================================
// ARENA
// ============================================================================

/// Node identifier (index into the arena)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(pub usize);

impl NodeId {
    pub const ROOT: NodeId = NodeId(0);
}

/// One explored position
#[derive(Clone, Debug)]
pub struct SearchNode<S, A> {
    /// Action that produced this node (None for the root)
    pub action: Option<A>,
    pub state: S,
    /// Cached evaluation of `state`
    pub value: f64,
    pub parent: Option<NodeId>,
}

/// Per-search node arena, dropped when the search returns
#[derive(Debug)]
pub struct SearchTree<S, A> {
    nodes: Vec<SearchNode<S, A>>,
}

impl<S, A> SearchTree<S, A> {
    fn new(root_state: S, root_value: f64) -> Self {
        Self {
            nodes: vec![SearchNode {
                action: None,
                state: root_state,
                value: root_value,
                parent: None,
            }],
        }
    }

    pub fn get(&self, id: NodeId) -> &SearchNode<S, A> {
        &self.nodes[id.0]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn push(&mut self, node: SearchNode<S, A>) -> NodeId {
        self.nodes.push(node);
        NodeId(self.nodes.len() - 1)
    }

    /// Action of the root's child on the path to `leaf`
    fn first_action(&self, leaf: NodeId) -> Option<A>
    where
        A: Clone,
    {
        let mut current = leaf;
        loop {
            let node = self.get(current);
            match node.parent {
                None => return None,
                Some(parent) if self.get(parent).parent.is_none() => return node.action.clone(),
                Some(parent) => current = parent,
            }
        }
    }
}

// ============================================================================
// SEARCH
// ============================================================================

/// Whose interests a node serves
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Role {
    Maximizer,
    Minimizer,
}

/// Children generated for one node
enum Expansion {
    Children(Vec<NodeId>),
    /// A child that ends the game in the expanding role's favour
    Decisive(NodeId),
}

/// Counters for one search call
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SearchStats {
    pub nodes: usize,
    pub cutoffs: usize,
    pub terminal_hits: usize,
}

/// Result of one search call
#[derive(Clone, Debug)]
pub struct SearchOutcome<A> {
    /// Root action on the principal path (None if the root had no candidates)
    pub action: Option<A>,
    /// Cached value of the leaf the principal path ends in
    pub value: f64,
    pub stats: SearchStats,
}

/// Run a bounded alpha-beta search from `root`
pub fn search<D: SearchDomain>(
    domain: &mut D,
    root: D::State,
    config: &SearchConfig,
) -> SearchOutcome<D::Action> {
    let root_value = domain.evaluate(&root);
    let mut searcher = Searcher {
        domain,
        config,
        tree: SearchTree::new(root, root_value),
        stats: SearchStats::default(),
    };

    let best = searcher.expand(
        NodeId::ROOT,
        Role::Maximizer,
        f64::NEG_INFINITY,
        f64::INFINITY,
        0,
    );

    let Searcher { tree, mut stats, .. } = searcher;
    stats.nodes = tree.len();
    SearchOutcome {
        action: tree.first_action(best),
        value: tree.get(best).value,
        stats,
    }
}

struct Searcher<'a, D: SearchDomain> {
    domain: &'a mut D,
    config: &'a SearchConfig,
    tree: SearchTree<D::State, D::Action>,
    stats: SearchStats,
}

impl<'a, D: SearchDomain> Searcher<'a, D> {
    /// Best node reachable from `node` under `role`; `node` itself at the
    /// depth bound or when it has no children
    fn expand(&mut self, node: NodeId, role: Role, mut alpha: f64, mut beta: f64, depth: u32) -> NodeId {
        debug_assert!(alpha <= beta, "alpha {} exceeds beta {}", alpha, beta);

        if depth >= self.config.max_depth {
            return node;
        }

        let children = match self.generate_children(node, role) {
            Expansion::Children(children) => children,
            Expansion::Decisive(terminal) => {
                self.stats.terminal_hits += 1;
                return terminal;
            }
        };
        if children.is_empty() {
            return node;
        }

        let agent_turn = self.domain.is_agent_turn(&self.tree.get(node).state);
        let children = self.order_children(children, role, agent_turn);
        let child_role = if agent_turn {
            Role::Maximizer
        } else {
            Role::Minimizer
        };

        let mut best: Option<NodeId> = None;
        match role {
            Role::Maximizer => {
                let mut v = f64::NEG_INFINITY;
                for child in children {
                    let reached = self.expand(child, child_role, alpha, beta, depth + 1);
                    let value = self.tree.get(reached).value;
                    if value > v {
                        v = value;
                        best = Some(reached);
                    }
                    if v >= beta {
                        self.stats.cutoffs += 1;
                        return reached;
                    }
                    alpha = alpha.max(v);
                }
            }
            Role::Minimizer => {
                let mut v = f64::INFINITY;
                for child in children {
                    let reached = self.expand(child, child_role, alpha, beta, depth + 1);
                    let value = self.tree.get(reached).value;
                    if value < v {
                        v = value;
                        best = Some(reached);
                    }
                    if v <= alpha {
                        self.stats.cutoffs += 1;
                        return reached;
                    }
                    beta = beta.min(v);
                }
            }
        }

        best.unwrap_or(node)
    }

    /// Create and evaluate every child of `node`, stopping at the first one
    /// whose value decides the game in `role`'s favour
    fn generate_children(&mut self, node: NodeId, role: Role) -> Expansion {
        let actions = self.domain.candidate_actions(&self.tree.get(node).state);
        let decisive = match role {
            Role::Maximizer => WIN_VALUE,
            Role::Minimizer => LOSS_VALUE,
        };

        let mut children = Vec::with_capacity(actions.len());
        for action in actions {
            let state = self.domain.apply(&self.tree.get(node).state, &action);
            let value = self.domain.evaluate(&state);
            let child = self.tree.push(SearchNode {
                action: Some(action),
                state,
                value,
                parent: Some(node),
            });
            if value == decisive {
                return Expansion::Decisive(child);
            }
            children.push(child);
        }
        Expansion::Children(children)
    }

    /// Sort by cached value and keep the better half (rounded up).
    ///
    /// A Maximizer on the agent's turn keeps the highest half, a Minimizer
    /// the lowest half. A Maximizer on the opponent's turn visits every
    /// child in ascending order.
    fn order_children(&self, mut children: Vec<NodeId>, role: Role, agent_turn: bool) -> Vec<NodeId> {
        let (descending, halve) = match role {
            Role::Maximizer if agent_turn => (true, true),
            Role::Maximizer => (false, false),
            Role::Minimizer => (false, true),
        };
        children.sort_by(|&a, &b| {
            let (va, vb) = (self.tree.get(a).value, self.tree.get(b).value);
            let ord = va.partial_cmp(&vb).unwrap_or(std::cmp::Ordering::Equal);
            if descending {
                ord.reverse()
            } else {
                ord
            }
        });
        if halve && self.config.half_list_pruning {
            children.truncate(children.len().div_ceil(2));
        }
        children
    }
}

// ============================================================================
// ANT GAME BINDING
// ============================================================================

/// Whether the search explores `mv` at all. The queen stays put once the
/// player has reinforcements, and the only unit ever built is the cheapest
/// worker class. `End` is always explored.
pub fn is_search_candidate(state: &GameState, mv: &Move) -> bool {
    match mv {
        Move::End => true,
        Move::MoveAnt { path } => {
            let queen_moving = path
                .first()
                .and_then(|&from| state.ant_at(from))
                .map_or(false, |ant| ant.ant_type.is_queen());
            !(queen_moving && state.inventory(state.whose_turn).ants.len() >= 2)
        }
        Move::Build { build, .. } => *build == BuildType::Ant(cheapest_ant()),
    }
}

/// Search domain over real game states
pub struct AntSearch<'a, R> {
    pub agent: PlayerId,
    pub heuristics: &'a Heuristics,
    pub rng: &'a mut R,
}

impl<'a, R: rand::Rng> SearchDomain for AntSearch<'a, R> {
    type State = GameState;
    type Action = Move;

    fn candidate_actions(&mut self, state: &GameState) -> Vec<Move> {
        legal_moves(state)
            .into_iter()
            .filter(|mv| is_search_candidate(state, mv))
            .collect()
    }

    fn apply(&mut self, state: &GameState, action: &Move) -> GameState {
        apply_move(state, action, &mut *self.rng)
    }

    fn evaluate(&self, state: &GameState) -> f64 {
        evaluate(state, self.agent, self.heuristics)
    }

    fn is_agent_turn(&self, state: &GameState) -> bool {
        state.whose_turn == self.agent
    }
}

/// Alpha-beta player
pub struct AlphaBetaAI {
    pub config: SearchConfig,
    pub heuristics: Heuristics,
    rng: ChaCha8Rng,
}

impl AlphaBetaAI {
    pub fn new(config: SearchConfig, heuristics: Heuristics) -> Self {
        Self::with_seed(config, heuristics, 42)
    }

    pub fn with_seed(config: SearchConfig, heuristics: Heuristics, seed: u64) -> Self {
        Self {
            config,
            heuristics,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Full search result for `agent` to move in `state`
    pub fn search(&mut self, state: &GameState, agent: PlayerId) -> SearchOutcome<Move> {
        let mut domain = AntSearch {
            agent,
            heuristics: &self.heuristics,
            rng: &mut self.rng,
        };
        let outcome = search(&mut domain, state.clone(), &self.config);
        tracing::trace!(
            nodes = outcome.stats.nodes,
            cutoffs = outcome.stats.cutoffs,
            terminal_hits = outcome.stats.terminal_hits,
            value = outcome.value,
            "search finished"
        );
        outcome
    }

    /// Get best move for the player to move
    pub fn best_move(&mut self, state: &GameState) -> Option<Move> {
        self.search(state, state.whose_turn).action
    }
}

// ============================================================================
// TESTS
// ============================================================================
