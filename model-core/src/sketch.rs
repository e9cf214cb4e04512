//! Random tree topologies rendered as ASCII sketches.
//!
//! A sketch only describes the shape of a tree: how many children each node
//! has, level by level. Turning it into a tree document with coordinates and
//! atoms is left to a separate tool.

use std::fmt;

use rand::Rng;

use crate::config::SketchConfig;
use crate::error::{ModelError, Result};

/// A random tree, stored as child counts.
///
/// `levels[k]` holds one group per non-leaf node of level `k` (the root
/// forms level 0), and each group holds the child counts of that node's
/// children.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RandomTree {
    pub root_children: usize,
    pub levels: Vec<Vec<Vec<usize>>>,
}

impl RandomTree {
    /// Draws a random tree of at most `cfg.max_levels` levels.
    ///
    /// Child counts are drawn from `leaf_weight` zeros plus every count in
    /// `min_children..=max_children`. When `max_children < min_children` the
    /// range is empty and every node is a leaf. Levels are only recorded
    /// while they hold at least one node, so no trailing layer is empty.
    ///
    /// ### Errors
    /// [`ModelError::InvalidSketch`] if `max_levels` is zero or there is
    /// nothing to draw from.
    pub fn generate(cfg: &SketchConfig, rng: &mut impl Rng) -> Result<Self> {
        if cfg.max_levels == 0 {
            return Err(ModelError::InvalidSketch(
                "max_levels must be at least 1".into(),
            ));
        }

        // An inverted child range contributes no counts; only leaf draws remain.
        let pool: Vec<usize> = std::iter::repeat_n(0, cfg.leaf_weight)
            .chain(cfg.min_children..=cfg.max_children)
            .collect();
        if pool.is_empty() {
            return Err(ModelError::InvalidSketch(format!(
                "no child counts to draw from (leaf_weight 0, children {}..={})",
                cfg.min_children, cfg.max_children
            )));
        }
        let mut draw = || pool[rng.random_range(0..pool.len())];

        let root_children = draw();
        let mut levels = Vec::new();
        let mut open: Vec<usize> = if root_children > 0 {
            vec![root_children]
        } else {
            Vec::new()
        };

        // The root counts as the first level.
        while levels.len() + 1 < cfg.max_levels && !open.is_empty() {
            let level: Vec<Vec<usize>> = open
                .iter()
                .map(|&n| (0..n).map(|_| draw()).collect())
                .collect();
            open = level.iter().flatten().copied().filter(|&n| n > 0).collect();
            levels.push(level);
        }

        if !open.is_empty() {
            levels.push(open.iter().map(|&n| vec![0; n]).collect());
        }

        Ok(Self {
            root_children,
            levels,
        })
    }

    pub fn node_count(&self) -> usize {
        1 + self.levels.iter().flatten().map(Vec::len).sum::<usize>()
    }

    pub fn depth(&self) -> usize {
        self.levels.len()
    }
}

impl fmt::Display for RandomTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "// RANDOM TREE")?;
        writeln!(f, "[R]")?;
        for (i, level) in self.levels.iter().enumerate() {
            writeln!(f, "--")?;
            writeln!(f, "Layer {}", i + 1)?;
            for group in level {
                let marks: Vec<&str> = group
                    .iter()
                    .map(|&n| if n == 0 { "(L)" } else { "[N]" })
                    .collect();
                writeln!(f, "{}", marks.join(" "))?;
            }
            write!(f, "\n\n")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::StdRng};

    fn cfg(max_levels: usize, max_children: usize) -> SketchConfig {
        SketchConfig {
            max_levels,
            max_children,
            ..SketchConfig::default()
        }
    }

    #[test]
    fn rejects_invalid_parameters() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!(RandomTree::generate(&cfg(0, 3), &mut rng).is_err());

        let empty_pool = SketchConfig {
            leaf_weight: 0,
            ..cfg(3, 1)
        };
        assert!(RandomTree::generate(&empty_pool, &mut rng).is_err());
    }

    #[test]
    fn inverted_child_bounds_give_a_leaf_root() {
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..20 {
            let tree = RandomTree::generate(&cfg(3, 1), &mut rng).unwrap();
            assert_eq!(tree.root_children, 0);
            assert!(tree.levels.is_empty());
            assert_eq!(tree.to_string(), "// RANDOM TREE\n[R]\n");
        }
    }

    #[test]
    fn no_recorded_level_is_empty() {
        let mut rng = StdRng::seed_from_u64(11);
        for max_levels in 1..6 {
            for _ in 0..30 {
                let tree = RandomTree::generate(&cfg(max_levels, 3), &mut rng).unwrap();
                assert!(tree.levels.iter().all(|level| !level.is_empty()));
                assert_eq!(tree.levels.is_empty(), tree.root_children == 0);
            }
        }
    }

    #[test]
    fn groups_match_parent_child_counts() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..50 {
            let tree = RandomTree::generate(&cfg(4, 4), &mut rng).unwrap();

            let mut parents = if tree.root_children > 0 {
                vec![tree.root_children]
            } else {
                vec![]
            };
            for level in &tree.levels {
                let sizes: Vec<usize> = level.iter().map(Vec::len).collect();
                assert_eq!(sizes, parents);
                parents = level.iter().flatten().copied().filter(|&n| n > 0).collect();
            }
            assert!(parents.is_empty(), "last level must be all leaves");
        }
    }

    #[test]
    fn depth_is_bounded_by_max_levels() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..50 {
            let tree = RandomTree::generate(&cfg(3, 3), &mut rng).unwrap();
            assert!(tree.depth() <= 3);
        }
    }

    #[test]
    fn child_counts_come_from_the_pool() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..50 {
            let tree = RandomTree::generate(&cfg(4, 5), &mut rng).unwrap();
            for n in tree.levels.iter().flatten().flatten() {
                assert!(*n == 0 || (2..=5).contains(n), "{n}");
            }
        }
    }

    #[test]
    fn same_seed_gives_same_tree() {
        let a = RandomTree::generate(&cfg(4, 3), &mut StdRng::seed_from_u64(9)).unwrap();
        let b = RandomTree::generate(&cfg(4, 3), &mut StdRng::seed_from_u64(9)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn renders_layers_and_markers() {
        let tree = RandomTree {
            root_children: 2,
            levels: vec![vec![vec![2, 0]], vec![vec![0, 0]]],
        };
        assert_eq!(tree.node_count(), 5);
        assert_eq!(
            tree.to_string(),
            "// RANDOM TREE\n[R]\n--\nLayer 1\n[N] (L)\n\n\n--\nLayer 2\n(L) (L)\n\n\n"
        );
    }

    #[test]
    fn lone_root_renders_header_only() {
        let tree = RandomTree {
            root_children: 0,
            levels: vec![],
        };
        assert_eq!(tree.node_count(), 1);
        assert_eq!(tree.to_string(), "// RANDOM TREE\n[R]\n");
    }
}
