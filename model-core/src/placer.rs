//! Placement of node pyramids in model space.

use glam::DVec3;

use crate::config::Config;
use crate::graph::TreeNode;
use crate::template::{NODE_POINTS, POINTS_IN_A_NODE};

/// Ratio of the geometric series used to space out deeper levels.
pub const DEPTH_DECAY: f64 = 0.75;

/// Returns the translation factor for a node at the given depth.
///
/// This is the partial geometric sum `Σ_{i=0}^{depth-1} 0.75^i`, so the
/// root (depth 0) sits at the origin and every further level moves less
/// than the previous one.
///
/// ### Parameters
/// - `depth` - Depth of the node below the root.
///
/// ### Returns
/// `0.0` for the root, strictly increasing with `depth` and bounded by `4.0`.
pub fn z_factor(depth: u32) -> f64 {
    (0..depth).map(|i| DEPTH_DECAY.powf(f64::from(i))).sum()
}

/// Computes the five absolute points of a node's pyramid.
///
/// The template pyramid is shrunk by `1 / (depth + 1)` and moved by
/// `translate_distance * (x * zf / 2, y * zf / 2, zf)` where `zf` is
/// [`z_factor`] of the node's depth.
///
/// ### Parameters
/// - `node` - A validated tree node (`z >= 0`).
/// - `cfg` - Conversion configuration, providing the translate distance.
///
/// ### Returns
/// The node's points in template order: four base corners, then the apex.
pub fn place(node: &TreeNode, cfg: &Config) -> [DVec3; POINTS_IN_A_NODE] {
    let depth = node.depth();
    let zf = z_factor(depth);
    let x_factor = node.coord.x as f64 * zf / 2.0;
    let y_factor = node.coord.y as f64 * zf / 2.0;

    let shrink = f64::from(depth) + 1.0;
    let offset = cfg.translate_distance * DVec3::new(x_factor, y_factor, zf);

    NODE_POINTS.map(|p| p / shrink + offset)
}
