use indexmap::IndexMap;

/// frequency map of observed successors for one adjacency key.
///
/// candidates are stored in the order they were first observed. resolution picks the
/// most frequently observed successor and breaks ties in favor of the one seen first.
#[derive(Debug, Default, Clone)]
pub struct SuccessorTally {
    counts: IndexMap<String, usize>,
}

impl SuccessorTally {
    pub fn observe(&mut self, successor: &str) {
        *self.counts.entry(successor.to_string()).or_insert(0) += 1;
    }

    /// the majority successor, or `None` if no successor was ever observed
    /// (the key is an end-of-line stop).
    pub fn resolve(&self) -> Option<&str> {
        let mut best: Option<(&str, usize)> = None;
        for (successor, count) in self.counts.iter() {
            match best {
                Some((_, best_count)) if *count <= best_count => {}
                _ => best = Some((successor.as_str(), *count)),
            }
        }
        best.map(|(s, _)| s)
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn observations(&self) -> usize {
        self.counts.values().sum()
    }
}
