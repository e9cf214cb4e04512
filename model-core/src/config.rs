/// Parameters of the tree-to-model conversion.
#[derive(Clone, Copy, Debug)]
pub struct Config {
    /// Distance multiplier applied to the depth-scaled node translation.
    pub translate_distance: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            translate_distance: 10.0,
        }
    }
}

/// Parameters of the random tree sketch generator.
#[derive(Clone, Copy, Debug)]
pub struct SketchConfig {
    /// Maximum number of levels grown before the final leaf level.
    pub max_levels: usize,
    /// Smallest child count a non-leaf node can draw.
    pub min_children: usize,
    /// Largest child count a non-leaf node can draw.
    pub max_children: usize,
    /// How many zero entries (leaves) sit in the child-count pool.
    pub leaf_weight: usize,
}

impl Default for SketchConfig {
    fn default() -> Self {
        Self {
            max_levels: 3,
            min_children: 2,
            max_children: 3,
            leaf_weight: 4,
        }
    }
}
