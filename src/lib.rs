//! Constructs a Voronoi diagram given a set of points.
//!
//! The diagram is built with [Fortune's algorithm](https://en.wikipedia.org/wiki/Fortune%27s_algorithm):
//! a sweepline crosses the plane top to bottom while a beachline of parabolic
//! arcs traces out the diagram's edges. The output is an edge list; each
//! [`Edge`] names the two sites ("faces") whose cells it separates and
//! carries up to two endpoints. Rays that never gained a second endpoint are
//! terminated on the fixed x = ±100 envelope, so every returned edge is a
//! drawable segment.
//!
//! There is deliberately no face/half-edge connectivity here and no clipping
//! to a caller-supplied box; consumers that want polygons can assemble them
//! from the edge list. Inputs are assumed distinct and are not checked for
//! adversarial coordinates.
//!
//! # Example
//!
//! ```rust
//! extern crate fortunator;
//! extern crate rand;
//!
//! use rand::distributions::Uniform;
//! use rand::prelude::*;
//! use fortunator::{Diagram, Point};
//!
//! fn main() {
//!   let mut rng = rand::thread_rng();
//!   let range = Uniform::new(0.0, 100.0);
//!   let points: Vec<Point> = (0..10)
//!     .map(|_| Point::new(rng.sample(&range), rng.sample(&range)))
//!     .collect();
//!
//!   let diagram = Diagram::new(points).unwrap();
//!
//!   for edge in diagram.edges.iter() {
//!     println!("{:?}", edge);
//!   }
//! }
//! ```
//!
//! The sweep can also be driven by hand through [`fortune::Builder`], which
//! exposes `step()` and the beachline state between events.

#![warn(
  future_incompatible,
  missing_copy_implementations,
  missing_debug_implementations,
  missing_docs
)]

pub extern crate glam;

pub mod fortune;
mod math;
pub mod trace;

#[doc(no_inline)]
pub use glam::DVec2 as Point;
use maybe_parallel_iterator::IntoMaybeParallelIterator;

pub use crate::fortune::{Builder, Edge};
use crate::trace::Anomaly;

/// A computed Voronoi diagram.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagram {
  /// A list of input site points.
  pub sites: Vec<Point>,
  /// The edges of the diagram, every endpoint resolved (finite vertices or
  /// envelope extensions).
  pub edges: Vec<Edge>,
  /// Contains a list of neighbors for each site: the indices of the sites
  /// it shares an edge with.
  pub neighbors: Vec<Vec<usize>>,
  /// Non-fatal conditions recorded during the sweep.
  pub anomalies: Vec<Anomaly>,
}

impl Diagram {
  /// Computes the Voronoi diagram, if it exists, for a given set of points.
  /// Needs at least two distinct sites.
  pub fn new(sites: Vec<Point>) -> Option<Self> {
    let mut builder = Builder::new(&sites)?;
    builder.compute();

    let edges = builder.edges().to_vec();
    let anomalies = builder.anomalies().to_vec();
    let neighbors = calculate_neighbors(&sites, &edges);

    Some(Diagram { sites, edges, neighbors, anomalies })
  }
}

fn calculate_neighbors(sites: &[Point], edges: &[Edge]) -> Vec<Vec<usize>> {
  (0..sites.len())
    .into_maybe_par_iter()
    .map(|site| {
      let mut neighbors: Vec<usize> = edges
        .iter()
        .filter_map(|edge| {
          if edge.left_face == site {
            Some(edge.right_face)
          } else if edge.right_face == site {
            Some(edge.left_face)
          } else {
            None
          }
        })
        .collect();
      neighbors.sort_unstable();
      neighbors.dedup();
      neighbors
    })
    .collect()
}
