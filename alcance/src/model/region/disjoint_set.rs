/// union-find over the index space `0..n`.
///
/// `union` links the root of the first element under the root of the second, with
/// no rank heuristic. `find` compresses paths by pointing every element it walks
/// through directly at the root.
#[derive(Debug, Clone)]
pub struct DisjointSet {
    parent: Vec<usize>,
}

impl DisjointSet {
    pub fn new(n: usize) -> DisjointSet {
        DisjointSet {
            parent: (0..n).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.parent.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parent.is_empty()
    }

    /// representative of the set holding `x`.
    ///
    /// # Panics
    ///
    /// if `x` is not in `0..len()`
    pub fn find(&mut self, x: usize) -> usize {
        let mut root = x;
        while self.parent[root] != root {
            root = self.parent[root];
        }
        let mut node = x;
        while self.parent[node] != root {
            let next = self.parent[node];
            self.parent[node] = root;
            node = next;
        }
        root
    }

    /// merges the sets holding `x` and `y`. returns false if they were already joined.
    pub fn union(&mut self, x: usize, y: usize) -> bool {
        let (rx, ry) = (self.find(x), self.find(y));
        if rx == ry {
            return false;
        }
        self.parent[rx] = ry;
        true
    }

    /// all sets, each listed in ascending element order, ordered by their smallest element.
    pub fn sets(&mut self) -> Vec<Vec<usize>> {
        let mut by_root: Vec<Option<usize>> = vec![None; self.parent.len()];
        let mut sets: Vec<Vec<usize>> = vec![];
        for x in 0..self.parent.len() {
            let root = self.find(x);
            match by_root[root] {
                Some(idx) => sets[idx].push(x),
                None => {
                    by_root[root] = Some(sets.len());
                    sets.push(vec![x]);
                }
            }
        }
        sets
    }
}
