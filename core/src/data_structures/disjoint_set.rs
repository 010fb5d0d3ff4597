//! Disjoint-set forest for cycle detection during spanning tree construction
//!
//! The default configuration is the naive forest: `find` chases parent
//! pointers to the root and `union` hangs the first root under the second.
//! Path compression can be switched on; it flattens chains but never changes
//! which pairs are reported as connected, so spanning tree output is
//! identical either way.
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

/// Up-tree forest over vertex positions `0..n`
#[derive(Debug, Clone)]
pub struct DisjointSet {
    /// Parent pointers, `parent[x] == x` for roots
    parent: Vec<usize>,
    /// Whether `find` rewrites visited nodes to point at the root
    path_compression: bool,
    /// Number of disjoint sets
    num_components: usize,
    /// Parent hops performed by `find`
    hops: usize,
}

impl DisjointSet {
    /// Creates `n` singleton sets with naive parent chasing
    pub fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
            path_compression: false,
            num_components: n,
            hops: 0,
        }
    }

    /// Enables or disables path compression
    pub fn with_path_compression(mut self, enabled: bool) -> Self {
        self.path_compression = enabled;
        self
    }

    /// Root of the set containing `x`
    pub fn find(&mut self, x: usize) -> usize {
        let mut root = x;
        while self.parent[root] != root {
            root = self.parent[root];
            self.hops += 1;
        }

        if self.path_compression {
            let mut node = x;
            while self.parent[node] != root {
                let next = self.parent[node];
                self.parent[node] = root;
                node = next;
            }
        }

        root
    }

    /// Merges the sets of `x` and `y`; `false` if they were already joined
    pub fn union(&mut self, x: usize, y: usize) -> bool {
        let root_x = self.find(x);
        let root_y = self.find(y);

        if root_x == root_y {
            return false;
        }

        self.parent[root_x] = root_y;
        self.num_components -= 1;
        true
    }

    pub fn connected(&mut self, x: usize, y: usize) -> bool {
        self.find(x) == self.find(y)
    }

    /// Number of disjoint sets
    #[inline]
    pub fn components(&self) -> usize {
        self.num_components
    }

    /// Total parent hops performed so far
    #[inline]
    pub fn hops(&self) -> usize {
        self.hops
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.parent.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.parent.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_union_find() {
        let mut ds = DisjointSet::new(5);

        assert_eq!(ds.components(), 5);
        assert!(!ds.connected(0, 1));

        assert!(ds.union(0, 1));
        assert_eq!(ds.components(), 4);
        assert!(ds.connected(0, 1));

        // Joining twice is rejected
        assert!(!ds.union(1, 0));
        assert_eq!(ds.components(), 4);

        assert!(ds.union(2, 3));
        assert!(ds.union(1, 2));
        assert_eq!(ds.components(), 2);
        assert!(ds.connected(0, 3));
        assert!(!ds.connected(0, 4));
    }

    #[test]
    fn test_naive_union_hangs_first_root_under_second() {
        let mut ds = DisjointSet::new(3);
        ds.union(0, 1);
        ds.union(1, 2);

        assert_eq!(ds.find(0), 2);
        assert_eq!(ds.parent, vec![1, 2, 2]);
    }

    #[test]
    fn test_path_compression_preserves_connectivity() {
        let mut naive = DisjointSet::new(6);
        let mut compressed = DisjointSet::new(6).with_path_compression(true);

        for (a, b) in [(0, 1), (1, 2), (2, 3), (4, 5)] {
            assert_eq!(naive.union(a, b), compressed.union(a, b));
        }

        for x in 0..6 {
            for y in 0..6 {
                assert_eq!(naive.connected(x, y), compressed.connected(x, y));
            }
        }
        assert!(compressed.hops() <= naive.hops());
        assert_eq!(naive.len(), 6);
    }
}
