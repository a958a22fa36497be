//! Proposition space: dense ids for ground facts.
//!
//! Task-native facts map 1:1 onto the id range `[0, num_task_facts)` via a
//! per-variable offset table. Conditions named by an external operator
//! source that match no native fact are synthesized on demand and occupy
//! `[num_task_facts, total)`. Synthesis deduplicates by name: the same
//! name always resolves to the same id, and a name that belongs to a
//! native fact always resolves to the native id, never a synthesized one.

use crate::arena::ArenaHandle;
use crate::ops::OpId;
use crate::task::Task;
use hashbrown::HashMap;
use lasso::{Rodeo, Spur};

/// Dense, zero-based proposition identifier. Stable for the lifetime of
/// the graph that allocated it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PropId(u32);

impl PropId {
    pub(crate) fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// Raw u32 value (for debugging/display).
    pub fn raw(self) -> u32 {
        self.0
    }

    /// Index into the dense proposition array.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// One proposition in the relaxed representation.
///
/// `is_goal` and `precondition_of` are filled in by construction. The
/// remaining fields are per-search scratch owned by the downstream
/// propagation algorithm; construction only initializes them to their
/// "unreached" defaults.
#[derive(Debug, Clone)]
pub struct Proposition {
    /// True if this proposition appears in the goal condition.
    pub is_goal: bool,
    /// Operators listing this proposition as a precondition.
    pub precondition_of: ArenaHandle,
    /// Cached length of `precondition_of`; -1 until cross-referencing.
    pub num_precondition_occurrences: i32,
    /// Propagation scratch: best reached cost, -1 = unreached.
    pub cost: i32,
    /// Propagation scratch: operator that achieved `cost`.
    pub reached_by: Option<OpId>,
    /// Propagation scratch: marked during relaxed plan extraction.
    pub marked: bool,
}

impl Proposition {
    pub fn new() -> Self {
        Self {
            is_goal: false,
            precondition_of: ArenaHandle::empty(),
            num_precondition_occurrences: -1,
            cost: -1,
            reached_by: None,
            marked: false,
        }
    }
}

impl Default for Proposition {
    fn default() -> Self {
        Self::new()
    }
}

/// The bijection between fact names / (variable, value) pairs and dense
/// proposition ids, extended by name-deduplicated synthesis.
#[derive(Debug)]
pub struct PropSpace {
    /// offsets[i] = sum of domain sizes of variables 0..i.
    offsets: Vec<u32>,
    num_task_facts: u32,
    /// Interner over every known condition name, native and synthesized.
    names: Rodeo,
    by_name: HashMap<Spur, PropId>,
    /// Names of synthesized propositions, in allocation order.
    synthesized: Vec<Spur>,
}

impl PropSpace {
    /// Build the space from a task: offset table from the variable domain
    /// sizes, and every native fact name registered with its native id.
    pub fn from_task(task: &Task) -> Self {
        let mut offsets = Vec::with_capacity(task.variables.len());
        let mut offset = 0u32;
        for var in &task.variables {
            offsets.push(offset);
            offset += var.domain_size as u32;
        }

        let mut names = Rodeo::default();
        let mut by_name = HashMap::with_capacity(task.facts.len());
        for (index, fact) in task.facts.iter().enumerate() {
            let key = names.get_or_intern(&fact.name);
            by_name.insert(key, PropId(index as u32));
        }

        Self {
            offsets,
            num_task_facts: task.facts.len() as u32,
            names,
            by_name,
            synthesized: Vec::new(),
        }
    }

    /// Id of the native fact for a (variable, value) pair. Pure O(1).
    pub fn task_fact_id(&self, var: usize, value: usize) -> PropId {
        PropId(self.offsets[var] + value as u32)
    }

    /// Resolve a condition name, synthesizing a fresh proposition if the
    /// name is unknown. Native fact names resolve to their native id.
    pub fn resolve_or_create(&mut self, name: &str) -> PropId {
        let key = self.names.get_or_intern(name);
        if let Some(&id) = self.by_name.get(&key) {
            return id;
        }
        let id = PropId(self.num_task_facts + self.synthesized.len() as u32);
        self.by_name.insert(key, id);
        self.synthesized.push(key);
        id
    }

    /// Resolve a condition name without synthesizing.
    pub fn lookup(&self, name: &str) -> Option<PropId> {
        let key = self.names.get(name)?;
        self.by_name.get(&key).copied()
    }

    /// Name of a synthesized proposition; None for native ids (the task
    /// owns those names).
    pub fn synthesized_name(&self, id: PropId) -> Option<&str> {
        let index = id.0.checked_sub(self.num_task_facts)? as usize;
        let key = self.synthesized.get(index)?;
        Some(self.names.resolve(key))
    }

    /// Number of task-native facts.
    pub fn num_task_facts(&self) -> usize {
        self.num_task_facts as usize
    }

    /// Number of propositions synthesized so far.
    pub fn num_synthesized(&self) -> usize {
        self.synthesized.len()
    }

    /// Total proposition count, native plus synthesized.
    pub fn total(&self) -> usize {
        self.num_task_facts as usize + self.synthesized.len()
    }
}
