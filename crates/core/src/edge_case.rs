use consilium_models::EdgeCase;

/// Merges edge-case seeds and an optional clinician addition into the
/// working list.
///
/// Names are deduplicated by exact trimmed match against what is already in
/// the list; a first-seen entry keeps its `further_steps`. Insertion order
/// is preserved; nothing is sorted.
pub fn consolidate(
    seeds: &[String],
    existing: &[EdgeCase],
    clinician_add: Option<&str>,
) -> Vec<EdgeCase> {
    let mut merged: Vec<EdgeCase> = existing.to_vec();

    for seed in seeds {
        let name = seed.trim();
        if name.is_empty() {
            continue;
        }
        if !merged.iter().any(|e| e.name == name) {
            merged.push(EdgeCase::suggested(name));
        }
    }

    if let Some(added) = clinician_add {
        let name = added.trim();
        if !name.is_empty() && !merged.iter().any(|e| e.name == name) {
            merged.push(EdgeCase::suggested(name));
        }
    }

    merged
}

/// Removes an entry by exact name match.
///
/// Removal only filters the working list; the name is not blacklisted, so
/// re-running consolidation with the same seeds surfaces it again.
pub fn remove_edge_case(list: &mut Vec<EdgeCase>, name: &str) -> bool {
    let before = list.len();
    list.retain(|e| e.name != name);
    list.len() != before
}

/// Replaces the clinician notes on the matching entry. Pure field mutation;
/// the entry keeps its position.
pub fn edit_further_steps(list: &mut [EdgeCase], name: &str, further_steps: &str) -> bool {
    match list.iter_mut().find(|e| e.name == name) {
        Some(entry) => {
            entry.further_steps = further_steps.to_string();
            true
        }
        None => false,
    }
}
