//! Optional observers for the sweep.
//!
//! The engine produces no output of its own. A [`Trace`] implementation can
//! be handed to [`Builder::compute_with`] to watch the sweep as it runs; the
//! unit type is the silent default. Non-fatal numerical degradations are
//! recorded as [`Anomaly`] values on the builder rather than reported through
//! the trace.
//!
//! [`Builder::compute_with`]: ../fortune/struct.Builder.html#method.compute_with

use std::fmt;

use crate::fortune::Edge;
use crate::Point;

/// Hooks called by the engine as the sweep progresses. Every method has a
/// no-op default, so an implementation only overrides what it wants to see.
pub trait Trace {
  /// A site event fired for the given site.
  fn site_event(&mut self, _site: Point) {}

  /// A vertex event fired, creating a Voronoi vertex at the given point.
  fn vertex_event(&mut self, _vertex: Point) {}

  /// The beachline after an event, as owning site indices left to right.
  fn beachline(&mut self, _owners: &[usize]) {}

  /// The edge list after an event.
  fn edges(&mut self, _edges: &[Edge]) {}
}

/// The silent sink.
impl Trace for () {}

/// Non-fatal conditions recorded during a sweep.
///
/// None of these abort the computation; each describes an event that was
/// skipped or a write that was dropped.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Anomaly {
  /// A candidate arc triple had collinear or coincident sites; no circle
  /// event was generated for it.
  DegenerateCircle,
  /// A popped vertex event's y was already above the sweepline; discarded.
  StaleVertexEvent {
    /// y of the discarded event point.
    event_y: f64,
  },
  /// An edge's endpoint slot was already populated; the second write was
  /// dropped.
  DoubleVertexAssignment {
    /// Index of the edge in the edge list.
    edge: usize,
  },
  /// An edge reached finalization with neither endpoint set; left as-is.
  UnboundEdge {
    /// Index of the edge in the edge list.
    edge: usize,
  },
  /// The two topmost sites share a y coordinate, so the bootstrap ran on a
  /// degenerate arrangement.
  LevelBootstrap {
    /// The shared y coordinate.
    y: f64,
  },
}

impl fmt::Display for Anomaly {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Anomaly::DegenerateCircle => {
        write!(f, "degenerate circle: collinear or coincident triple skipped")
      }
      Anomaly::StaleVertexEvent { event_y } => {
        write!(f, "stale vertex event at y = {} discarded", event_y)
      }
      Anomaly::DoubleVertexAssignment { edge } => {
        write!(f, "edge {} already had its endpoint slot filled", edge)
      }
      Anomaly::UnboundEdge { edge } => {
        write!(f, "edge {} reached finalization with no vertices", edge)
      }
      Anomaly::LevelBootstrap { y } => {
        write!(f, "topmost sites share y = {}; bootstrap is degenerate", y)
      }
    }
  }
}
