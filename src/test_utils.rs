use crate::task::{Fact, Task, Variable};

/// Task with one variable of domain 2 and facts named `p1`, `p2`; `p2` is
/// the goal. No `goal` fact exists, so sources naming one synthesize it.
pub(crate) fn setup() -> Task {
    task_from_domains(&[&["p1", "p2"]], &[(0, 1)])
}

/// Build a task from per-variable fact name lists and goal pairs.
pub(crate) fn task_from_domains(domains: &[&[&str]], goals: &[(usize, usize)]) -> Task {
    let mut variables = Vec::with_capacity(domains.len());
    let mut facts = Vec::new();
    for (var, names) in domains.iter().enumerate() {
        variables.push(Variable {
            domain_size: names.len(),
        });
        for (value, name) in names.iter().enumerate() {
            facts.push(Fact {
                var,
                value,
                name: name.to_string(),
            });
        }
    }
    Task {
        variables,
        facts,
        goals: goals.to_vec(),
        has_axioms: false,
    }
}
