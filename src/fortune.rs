//! Implements Fortune's sweepline algorithm.
//!
//! Given a set of distinct points ("sites") in the 2D plane, this module
//! produces the edges of their Voronoi diagram: one [`Edge`] per pair of
//! sites whose cells came to share a boundary during the sweep, each
//! carrying its two bounding sites ("faces") and up to two endpoints.
//!
//! ```no_run
//! # use fortunator::Point;
//! # use fortunator::fortune::Builder;
//! let sites = vec![Point::new(0.0, 0.0), Point::new(4.0, 0.0), Point::new(2.0, 4.0)];
//! let mut builder = Builder::new(&sites).unwrap();
//! builder.compute();
//! for edge in builder.edges() {
//!   println!("{:?} | {:?} -> {:?}", (edge.left_face, edge.right_face), edge.first_vertex, edge.last_vertex);
//! }
//! ```
//!
//! The sweepline moves top to bottom: events pop in descending y. A site
//! event splits the arc found above the new site; a vertex event collapses
//! the middle arc of a converging triple and writes the circumcenter into
//! the three affected edges. Edges that still miss an endpoint when the
//! queue drains are extended to the fixed x = ±100 envelope along the
//! perpendicular bisector of their faces.
//!
//! Scheduling deviates from the textbook formulation: vertex events are
//! queued at `center.y + radius` (which makes them pop ahead of all
//! remaining sites), the sweepline jumps up to that value while one is
//! handled, and queued vertex events left strictly below the jumped
//! sweepline are discarded as stale when popped. Numerical degenerations
//! never abort the sweep; they are recorded as [`Anomaly`] values.
//!
//! [`Anomaly`]: ../trace/enum.Anomaly.html

use crate::trace::{Anomaly, Trace};
use crate::Point;

/// Defines an invalid index in the arc links
pub const INVALID_INDEX: usize = usize::MAX;

/// Far-x envelope that terminates unbounded edges at finalization. A fixed
/// rendering convention, not a configurable bound.
pub const ENVELOPE_X: f64 = 100.0;

/// A Voronoi edge: the perpendicular-bisector segment between two faces.
///
/// Which endpoint lands in `first_vertex` and which in `last_vertex` is
/// decided by the sign of the perpendicular distance of the vertex from the
/// directed segment `left_face -> right_face`; that partition is the only
/// notion of edge direction this representation has.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Edge {
  /// Index of the site bounding this edge on one side.
  pub left_face: usize,
  /// Index of the site bounding this edge on the other side.
  pub right_face: usize,
  /// Endpoint on the positive side of `left_face -> right_face`, if known.
  pub first_vertex: Option<Point>,
  /// Endpoint on the non-positive side, if known.
  pub last_vertex: Option<Point>,
}

impl Edge {
  fn new(left_face: usize, right_face: usize) -> Self {
    Self { left_face, right_face, first_vertex: None, last_vertex: None }
  }

  /// Whether this edge joins the two given sites, in either orientation.
  pub fn joins(&self, a: usize, b: usize) -> bool {
    (self.left_face == a && self.right_face == b) || (self.left_face == b && self.right_face == a)
  }
}

// A node of the beachline. Arcs are arena-allocated and referenced by index;
// indices are never reused, so an index doubles as the arc's identity for
// event invalidation.
#[derive(Clone, Copy, Debug)]
struct Arc {
  // Index into the active-site list.
  owner: usize,
  left: usize,
  right: usize,
}

// A site that has entered the beachline, with the arcs it currently owns in
// left-to-right order. Entries are never removed, even when a site loses its
// last arc.
#[derive(Clone, Debug)]
struct ActiveSite {
  site: usize,
  arcs: Vec<usize>,
}

// Three adjacent arcs converging to a point. `point` is where the event pops
// (circumcenter x, center y plus radius); `vertex` is the circumcenter that
// becomes the Voronoi vertex.
#[derive(Clone, Copy, Debug)]
struct VertexEvent {
  arcs: (usize, usize, usize),
  point: Point,
  vertex: Point,
}

impl VertexEvent {
  fn references(&self, arc: usize) -> bool {
    self.arcs.0 == arc || self.arcs.1 == arc || self.arcs.2 == arc
  }
}

// Two ordered sequences, each kept sorted so its last element pops next.
// Sites pop highest y first, ties smallest x first; vertex events pop
// highest y first, ties largest x first. On a y tie between the sequences
// the site wins.
#[derive(Clone, Debug, Default)]
struct EventQueue {
  sites: Vec<(usize, Point)>,
  vertices: Vec<VertexEvent>,
}

enum Event {
  Site(usize, Point),
  Vertex(VertexEvent),
}

impl EventQueue {
  fn push_sites(&mut self, points: &[Point]) {
    self.sites = points.iter().copied().enumerate().collect();
    self
      .sites
      .sort_unstable_by(|(_, a), (_, b)| f64::total_cmp(&a.y, &b.y).then(f64::total_cmp(&b.x, &a.x)));
  }

  fn push_vertex_event(&mut self, event: VertexEvent) {
    self.vertices.push(event);
    self
      .vertices
      .sort_unstable_by(|a, b| f64::total_cmp(&a.point.y, &b.point.y).then(f64::total_cmp(&a.point.x, &b.point.x)));
  }

  // Identity-based removal: arc indices are never reused, so matching on a
  // referenced arc removes exactly the events invalidated by its death.
  fn remove_referencing(&mut self, arc: usize) {
    self.vertices.retain(|event| !event.references(arc));
  }

  fn pop(&mut self) -> Option<Event> {
    let take_vertex = match (self.sites.last(), self.vertices.last()) {
      (None, None) => return None,
      (None, Some(_)) => true,
      (Some(_), None) => false,
      (Some((_, site)), Some(vertex)) => site.y < vertex.point.y,
    };

    if take_vertex {
      self.vertices.pop().map(Event::Vertex)
    } else {
      self.sites.pop().map(|(index, point)| Event::Site(index, point))
    }
  }

  fn is_empty(&self) -> bool {
    self.sites.is_empty() && self.vertices.is_empty()
  }
}

/// Sweepline state for one diagram computation. See the [module docs] for an
/// example.
///
/// [module docs]: ./index.html
#[derive(Clone, Debug)]
pub struct Builder {
  sites: Vec<Point>,
  arcs: Vec<Arc>,
  active: Vec<ActiveSite>,
  edges: Vec<Edge>,
  queue: EventQueue,
  sweepline: f64,
  anomalies: Vec<Anomaly>,
}

impl Builder {
  /// Seeds the queue with the given sites and bootstraps the beachline from
  /// the two topmost ones. Returns `None` for fewer than two sites; the
  /// input points are assumed distinct.
  pub fn new(sites: &[Point]) -> Option<Self> {
    if sites.len() < 2 {
      return None;
    }

    let mut builder = Self {
      sites: sites.to_vec(),
      arcs: Vec::new(),
      active: Vec::new(),
      edges: Vec::new(),
      queue: EventQueue::default(),
      sweepline: 0.0,
      anomalies: Vec::new(),
    };

    builder.queue.push_sites(sites);
    builder.bootstrap();

    Some(builder)
  }

  // The two highest sites seed the beachline: the first contributes the
  // outer arc pair, the second the single arc between them. When they share
  // a y this arrangement is degenerate; the sweep proceeds anyway and the
  // condition is recorded.
  fn bootstrap(&mut self) {
    let (first, first_point) = match self.queue.pop() {
      Some(Event::Site(index, point)) => (index, point),
      _ => unreachable!(),
    };
    let (second, second_point) = match self.queue.pop() {
      Some(Event::Site(index, point)) => (index, point),
      _ => unreachable!(),
    };

    if first_point.y == second_point.y {
      self.anomalies.push(Anomaly::LevelBootstrap { y: first_point.y });
    }

    let left = self.new_arc(0);
    let middle = self.new_arc(1);
    let right = self.new_arc(0);
    self.active.push(ActiveSite { site: first, arcs: vec![left, right] });
    self.active.push(ActiveSite { site: second, arcs: vec![middle] });

    self.arcs[left].right = middle;
    self.arcs[middle].left = left;
    self.arcs[middle].right = right;
    self.arcs[right].left = middle;

    self.edges.push(Edge::new(first, second));
    self.sweepline = second_point.y;
  }

  fn new_arc(&mut self, owner: usize) -> usize {
    self.arcs.push(Arc { owner, left: INVALID_INDEX, right: INVALID_INDEX });
    self.arcs.len() - 1
  }

  fn site_of_arc(&self, arc: usize) -> usize {
    self.active[self.arcs[arc].owner].site
  }

  // Among active sites still owning arcs, the one whose parabola sits
  // highest over x wins; degenerate parabolas (focus on the sweepline) are
  // skipped. If every evaluation is non-finite the scan falls back to the
  // first arc-owning active site. A winner owning several arcs narrows down
  // by right-neighbor site x, falling back to its rightmost arc.
  fn locate_arc(&self, x: f64) -> usize {
    let mut fallback = INVALID_INDEX;
    let mut best = INVALID_INDEX;
    let mut best_y = f64::NEG_INFINITY;
    for (index, active) in self.active.iter().enumerate() {
      if active.arcs.is_empty() {
        continue;
      }
      if fallback == INVALID_INDEX {
        fallback = index;
      }
      let y = crate::math::parabola_y(self.sites[active.site], self.sweepline, x);
      if y.is_finite() && (best == INVALID_INDEX || y > best_y) {
        best = index;
        best_y = y;
      }
    }
    if best == INVALID_INDEX {
      best = fallback;
    }

    let arcs = &self.active[best].arcs;
    if arcs.len() > 1 {
      for &arc in arcs.iter() {
        let right = self.arcs[arc].right;
        if right == INVALID_INDEX || self.arcs[right].owner == best {
          continue;
        }
        if self.sites[self.site_of_arc(right)].x > x {
          return arc;
        }
      }
    }
    *arcs.last().unwrap()
  }

  // Replace `target` with (left copy, `arc`, right copy); the copies take
  // over the target's owner and neighbors. The owner's arc list is re-sorted
  // by right-neighbor site x so multiple arcs stay in left-to-right order.
  fn split_arc(&mut self, target: usize, arc: usize) {
    let owner = self.arcs[target].owner;
    let outer_left = self.arcs[target].left;
    let outer_right = self.arcs[target].right;

    let left_copy = self.new_arc(owner);
    let right_copy = self.new_arc(owner);

    self.arcs[left_copy].left = outer_left;
    self.arcs[left_copy].right = arc;
    self.arcs[arc].left = left_copy;
    self.arcs[arc].right = right_copy;
    self.arcs[right_copy].left = arc;
    self.arcs[right_copy].right = outer_right;
    if outer_left != INVALID_INDEX {
      self.arcs[outer_left].right = left_copy;
    }
    if outer_right != INVALID_INDEX {
      self.arcs[outer_right].left = right_copy;
    }
    self.arcs[target].left = INVALID_INDEX;
    self.arcs[target].right = INVALID_INDEX;

    let list = &mut self.active[owner].arcs;
    list.retain(|&a| a != target);
    list.push(left_copy);
    list.push(right_copy);
    self.sort_owner_arcs(owner);
  }

  fn sort_owner_arcs(&mut self, owner: usize) {
    let mut keyed: Vec<(usize, f64)> = self.active[owner]
      .arcs
      .iter()
      .map(|&arc| {
        let right = self.arcs[arc].right;
        let key = if right == INVALID_INDEX {
          f64::INFINITY
        } else {
          self.sites[self.site_of_arc(right)].x
        };
        (arc, key)
      })
      .collect();
    keyed.sort_by(|(_, a), (_, b)| f64::total_cmp(a, b));
    self.active[owner].arcs = keyed.into_iter().map(|(arc, _)| arc).collect();
  }

  fn remove_arc(&mut self, arc: usize) {
    let owner = self.arcs[arc].owner;
    self.active[owner].arcs.retain(|&a| a != arc);

    let left = self.arcs[arc].left;
    let right = self.arcs[arc].right;
    if left != INVALID_INDEX {
      self.arcs[left].right = right;
    }
    if right != INVALID_INDEX {
      self.arcs[right].left = left;
    }
    self.arcs[arc].left = INVALID_INDEX;
    self.arcs[arc].right = INVALID_INDEX;
  }

  fn site_event(&mut self, site: usize, point: Point, trace: &mut impl Trace) {
    self.sweepline = point.y;
    trace.site_event(point);

    let target = self.locate_arc(point.x);
    let target_site = self.site_of_arc(target);

    let owner = self.active.len();
    self.active.push(ActiveSite { site, arcs: Vec::new() });
    let arc = self.new_arc(owner);
    self.active[owner].arcs.push(arc);

    self.split_arc(target, arc);
    self.edges.push(Edge::new(site, target_site));
    self.queue.remove_referencing(target);

    let left = self.arcs[arc].left;
    let right = self.arcs[arc].right;
    self.try_vertex_event(left);
    if left != INVALID_INDEX {
      self.try_vertex_event(self.arcs[left].left);
    }
    self.try_vertex_event(right);
    if right != INVALID_INDEX {
      self.try_vertex_event(self.arcs[right].right);
    }
  }

  // Candidate circle event with `middle` as the collapsing arc. Rejections:
  // missing neighbor, a repeated site in the triple, diverging breakpoints,
  // a non-finite circumcenter (recorded), or an event point already above
  // the sweepline.
  fn try_vertex_event(&mut self, middle: usize) {
    if middle == INVALID_INDEX {
      return;
    }
    let left = self.arcs[middle].left;
    let right = self.arcs[middle].right;
    if left == INVALID_INDEX || right == INVALID_INDEX {
      return;
    }

    let left_site = self.site_of_arc(left);
    let middle_site = self.site_of_arc(middle);
    let right_site = self.site_of_arc(right);
    if left_site == middle_site || middle_site == right_site || left_site == right_site {
      return;
    }
    if self.sites[left_site].x > self.sites[right_site].x {
      return;
    }

    let (center, radius) =
      crate::math::circumcircle(self.sites[left_site], self.sites[middle_site], self.sites[right_site]);
    if !center.x.is_finite() || !center.y.is_finite() {
      self.anomalies.push(Anomaly::DegenerateCircle);
      return;
    }

    let event_y = center.y + radius;
    if event_y < self.sweepline {
      return;
    }

    self.queue.push_vertex_event(VertexEvent {
      arcs: (left, middle, right),
      point: Point::new(center.x, event_y),
      vertex: center,
    });
  }

  fn vertex_event(&mut self, event: VertexEvent, trace: &mut impl Trace) {
    self.sweepline = event.point.y;
    trace.vertex_event(event.vertex);

    let (left, middle, right) = event.arcs;
    let left_site = self.site_of_arc(left);
    let middle_site = self.site_of_arc(middle);
    let right_site = self.site_of_arc(right);

    self.remove_arc(middle);
    self.queue.remove_referencing(middle);

    self.edges.push(Edge::new(left_site, right_site));
    let closure = self.edges.len() - 1;
    self.add_vertex_to_edge(closure, event.vertex);

    if let Some(edge) = self.find_edge(left_site, middle_site) {
      self.add_vertex_to_edge(edge, event.vertex);
    }
    if let Some(edge) = self.find_edge(middle_site, right_site) {
      self.add_vertex_to_edge(edge, event.vertex);
    }
  }

  // Most recent edge joining the pair; older closed-off edges between the
  // same faces must not receive further writes.
  fn find_edge(&self, a: usize, b: usize) -> Option<usize> {
    self.edges.iter().rposition(|edge| edge.joins(a, b))
  }

  // The sign of the perpendicular distance from left_face -> right_face
  // picks the endpoint slot; a second write to an occupied slot is dropped.
  fn add_vertex_to_edge(&mut self, index: usize, vertex: Point) {
    let edge = self.edges[index];
    let side = crate::math::plane_distance(self.sites[edge.left_face], self.sites[edge.right_face], vertex);
    let slot = if side > 0.0 {
      &mut self.edges[index].first_vertex
    } else {
      &mut self.edges[index].last_vertex
    };
    if slot.is_some() {
      self.anomalies.push(Anomaly::DoubleVertexAssignment { edge: index });
    } else {
      *slot = Some(vertex);
    }
  }

  /// Processes the next event, returning `false` once the queue is empty.
  /// Does not finalize; [`compute`] does.
  ///
  /// [`compute`]: #method.compute
  pub fn step(&mut self) -> bool {
    self.step_with(&mut ())
  }

  /// Like [`step`], reporting to the given trace.
  ///
  /// [`step`]: #method.step
  pub fn step_with(&mut self, trace: &mut impl Trace) -> bool {
    let event = match self.queue.pop() {
      Some(event) => event,
      None => return false,
    };

    match event {
      Event::Site(site, point) => self.site_event(site, point, trace),
      Event::Vertex(event) => {
        // The sweepline jumps up while handling a vertex event; events
        // queued below the jump come out stale and are discarded.
        if event.point.y < self.sweepline {
          self.anomalies.push(Anomaly::StaleVertexEvent { event_y: event.point.y });
        } else {
          self.vertex_event(event, trace);
        }
      }
    }

    trace.beachline(&self.beachline_owners());
    trace.edges(&self.edges);
    true
  }

  /// Runs the sweep to completion and finalizes unbounded edges.
  pub fn compute(&mut self) {
    self.compute_with(&mut ());
  }

  /// Like [`compute`], reporting each event to the given trace.
  ///
  /// [`compute`]: #method.compute
  pub fn compute_with(&mut self, trace: &mut impl Trace) {
    while self.step_with(trace) {}
    self.finalize();
  }

  /// Extends every edge still missing an endpoint to the x = ±100 envelope
  /// along the perpendicular bisector of its faces. An edge missing both
  /// endpoints is recorded as an anomaly and then extended at both ends.
  /// Idempotent: a second call on a finalized diagram changes nothing.
  pub fn finalize(&mut self) {
    for index in 0..self.edges.len() {
      let edge = self.edges[index];
      if edge.first_vertex.is_none() && edge.last_vertex.is_none() {
        self.anomalies.push(Anomaly::UnboundEdge { edge: index });
      }

      let a = self.sites[edge.left_face];
      let b = self.sites[edge.right_face];
      let mid = crate::math::midpoint(a, b);

      if self.edges[index].first_vertex.is_none() {
        // With no opposite endpoint the comparison is against NaN, which
        // sends the extension to the -x side; the second branch then has a
        // real x to aim away from.
        let anchor = self.edges[index].last_vertex.map_or(f64::NAN, |v| v.x);
        let x = if mid.x > anchor { ENVELOPE_X } else { -ENVELOPE_X };
        self.edges[index].first_vertex = Some(Point::new(x, crate::math::bisector_y(a, b, x)));
      }
      if self.edges[index].last_vertex.is_none() {
        let anchor = self.edges[index].first_vertex.map_or(f64::NAN, |v| v.x);
        let x = if mid.x > anchor { ENVELOPE_X } else { -ENVELOPE_X };
        self.edges[index].last_vertex = Some(Point::new(x, crate::math::bisector_y(a, b, x)));
      }
    }
  }

  /// The edges produced so far, in creation order: construction-time edges
  /// first, then the closure edges emitted by vertex events.
  pub fn edges(&self) -> &[Edge] {
    &self.edges
  }

  /// The input sites, as passed to [`new`].
  ///
  /// [`new`]: #method.new
  pub fn sites(&self) -> &[Point] {
    &self.sites
  }

  /// Indices of the sites that have entered the beachline, in activation
  /// order. Entries persist even after a site loses all of its arcs.
  pub fn active_sites(&self) -> impl Iterator<Item = usize> + '_ {
    self.active.iter().map(|active| active.site)
  }

  /// The current sweepline y.
  pub fn sweepline(&self) -> f64 {
    self.sweepline
  }

  /// Non-fatal conditions recorded so far.
  pub fn anomalies(&self) -> &[Anomaly] {
    &self.anomalies
  }

  /// Owning site index of every beachline arc, left to right.
  pub fn beachline_owners(&self) -> Vec<usize> {
    let mut leftmost = match self.active.iter().flat_map(|active| active.arcs.iter()).next() {
      Some(&arc) => arc,
      None => return Vec::new(),
    };
    while self.arcs[leftmost].left != INVALID_INDEX {
      leftmost = self.arcs[leftmost].left;
    }

    let mut owners = Vec::new();
    let mut arc = leftmost;
    while arc != INVALID_INDEX {
      owners.push(self.site_of_arc(arc));
      arc = self.arcs[arc].right;
    }
    owners
  }

  /// True once every queued event has been consumed.
  pub fn is_done(&self) -> bool {
    self.queue.is_empty()
  }
}
