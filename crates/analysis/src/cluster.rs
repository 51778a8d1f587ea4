//! Density-based clustering (DBSCAN) over a uniform spatial hash.
//!
//! Used to pick out separate engine exhaust bells in the stern slab. Radius
//! queries go through a kd-tree. The neighbourhood of a point includes the
//! point itself, and distances are compared with `<= eps`. Labels are
//! assigned in discovery order, so the result only depends on input order.

use crate::error::{AnalysisError, AnalysisResult};
use geometry::{mean_of, Bounds};
use glam::Vec3;
use kiddo::float::kdtree::KdTree;
use kiddo::SquaredEuclidean;
use std::collections::VecDeque;

/// One density cluster.
#[derive(Debug, Clone, PartialEq)]
pub struct Cluster {
    pub label: usize,
    pub size: usize,
    pub centroid: Vec3,
    pub bounds: Bounds,
}

/// DBSCAN parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dbscan {
    /// Neighbourhood radius.
    pub eps: f32,
    /// Neighbours (self included) needed for a core point.
    pub min_samples: usize,
}

impl Dbscan {
    pub fn new(eps: f32, min_samples: usize) -> AnalysisResult<Self> {
        if !(eps > 0.0 && eps.is_finite()) {
            return Err(AnalysisError::invalid_params(format!("eps must be positive, got {eps}")));
        }
        if min_samples == 0 {
            return Err(AnalysisError::invalid_params("min_samples must be at least 1"));
        }
        Ok(Self { eps, min_samples })
    }

    /// Cluster label per point; `None` marks noise.
    pub fn labels(&self, points: &[Vec3]) -> Vec<Option<usize>> {
        let neighbours = Neighbours::build(points, self.eps);
        let mut labels = vec![None; points.len()];
        let mut visited = vec![false; points.len()];
        let mut next_label = 0;

        for i in 0..points.len() {
            if visited[i] {
                continue;
            }
            visited[i] = true;
            let seeds = neighbours.of(i);
            if seeds.len() < self.min_samples {
                continue;
            }

            let label = next_label;
            next_label += 1;
            labels[i] = Some(label);

            let mut queue: VecDeque<usize> = seeds.into();
            while let Some(j) = queue.pop_front() {
                if labels[j].is_none() {
                    labels[j] = Some(label);
                }
                if visited[j] {
                    continue;
                }
                visited[j] = true;
                let more = neighbours.of(j);
                if more.len() >= self.min_samples {
                    queue.extend(more);
                }
            }
        }
        labels
    }

    /// Clusters ordered by label.
    pub fn clusters(&self, points: &[Vec3]) -> Vec<Cluster> {
        let labels = self.labels(points);
        let count = labels.iter().flatten().max().map_or(0, |&m| m + 1);
        let mut groups: Vec<Vec<Vec3>> = vec![Vec::new(); count];
        for (&p, label) in points.iter().zip(&labels) {
            if let Some(label) = *label {
                groups[label].push(p);
            }
        }
        groups
            .into_iter()
            .enumerate()
            .filter_map(|(label, members)| {
                Some(Cluster {
                    label,
                    size: members.len(),
                    centroid: mean_of(members.iter().copied())?,
                    bounds: Bounds::from_points(members.iter().copied())?,
                })
            })
            .collect()
    }
}

/// Leaf capacity of the neighbour tree. Stern slabs hold many coplanar
/// vertices, and a leaf cannot split while every point in it shares a
/// coordinate on the leaf's split axis.
const BUCKET: usize = 256;

type PointTree = KdTree<f32, u64, 3, BUCKET, u32>;

/// Radius queries over a fixed point set.
struct Neighbours<'a> {
    points: &'a [Vec3],
    tree: PointTree,
    eps2: f32,
}

impl<'a> Neighbours<'a> {
    fn build(points: &'a [Vec3], eps: f32) -> Self {
        let mut tree = PointTree::new();
        for (i, p) in points.iter().enumerate() {
            tree.add(&p.to_array(), i as u64);
        }
        Self {
            points,
            tree,
            eps2: eps * eps,
        }
    }

    /// Indices within `eps` of point `i`, itself included, ascending.
    fn of(&self, i: usize) -> Vec<usize> {
        let p = self.points[i];
        // Query slightly wide, then apply the inclusive cut on our own distances
        let mut out: Vec<usize> = self
            .tree
            .within::<SquaredEuclidean>(&p.to_array(), self.eps2 * 1.0001)
            .into_iter()
            .map(|n| n.item as usize)
            .filter(|&j| self.points[j].distance_squared(p) <= self.eps2)
            .collect();
        out.sort_unstable();
        out
    }
}
