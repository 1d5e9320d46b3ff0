extern crate fortunator;

use fortunator::fortune::{Builder, Edge, ENVELOPE_X};
use fortunator::trace::Anomaly;
use fortunator::{Diagram, Point};

const TOLERANCE: f64 = 1e-9;

#[test]
fn two_sites() {
  let sites = vec![Point::new(0.0, 0.0), Point::new(2.0, 0.0)];
  let diagram = Diagram::new(sites).unwrap();

  assert_eq!(diagram.edges.len(), 1);
  let edge = diagram.edges[0];
  assert!(edge.joins(0, 1));

  // The bisector is vertical, so the envelope extension is near-vertical:
  // both x's land on the envelope and the y's blow up in opposite
  // directions.
  let first = edge.first_vertex.unwrap();
  let last = edge.last_vertex.unwrap();
  assert_eq!(first.x, -ENVELOPE_X);
  assert_eq!(last.x, ENVELOPE_X);
  assert!(first.y > 0.0 && !first.y.is_nan());
  assert!(last.y < 0.0 && !last.y.is_nan());

  assert!(diagram.anomalies.iter().any(|a| matches!(a, Anomaly::LevelBootstrap { .. })));
  assert!(diagram.anomalies.iter().any(|a| matches!(a, Anomaly::UnboundEdge { .. })));
}

#[test]
fn three_sites_single_vertex() {
  let sites = vec![Point::new(0.0, 0.0), Point::new(4.0, 0.0), Point::new(2.0, 4.0)];
  let diagram = Diagram::new(sites.clone()).unwrap();

  assert_eq!(diagram.edges.len(), 3);

  // Every edge carries the circumcenter (2, 1.5) on one end and an envelope
  // extension on the other.
  let circumcenter = Point::new(2.0, 1.5);
  for edge in diagram.edges.iter() {
    let first = edge.first_vertex.unwrap();
    let last = edge.last_vertex.unwrap();
    let (finite, envelope) = if first.distance(circumcenter) < TOLERANCE {
      (first, last)
    } else {
      (last, first)
    };
    assert!(finite.distance(circumcenter) < TOLERANCE);
    assert_eq!(envelope.x.abs(), ENVELOPE_X);
  }

  validate(&sites, &diagram.edges);
}

#[test]
fn seed_scenario() {
  let sites = vec![
    Point::new(3.0, 3.0),
    Point::new(12.0, 3.0),
    Point::new(8.0, 5.0),
    Point::new(10.0, 5.0),
  ];
  let diagram = Diagram::new(sites.clone()).unwrap();

  // These pairs must have shared a beachline boundary at some point.
  assert!(diagram.edges.iter().any(|e| e.joins(2, 3)));
  assert!(diagram.edges.iter().any(|e| e.joins(2, 0)));
  assert!(diagram.edges.iter().any(|e| e.joins(0, 1)));
  assert!(diagram.edges.iter().any(|e| e.joins(3, 0) || e.joins(3, 1)));

  validate(&sites, &diagram.edges);
}

#[test]
fn seed_scenario_activation_order() {
  let sites = vec![
    Point::new(3.0, 3.0),
    Point::new(12.0, 3.0),
    Point::new(8.0, 5.0),
    Point::new(10.0, 5.0),
  ];
  let mut builder = Builder::new(&sites).unwrap();

  // Bootstrap takes the two topmost sites, smaller x first on the y tie.
  let order: Vec<usize> = builder.active_sites().collect();
  assert_eq!(order, vec![2, 3]);
  assert_eq!(builder.beachline_owners(), vec![2, 3, 2]);
  assert_eq!(builder.sweepline(), 5.0);

  // First queued event is the site at (3, 3); it splits an arc of (10, 5).
  assert!(builder.step());
  assert_eq!(builder.sweepline(), 3.0);
  assert_eq!(builder.beachline_owners(), vec![2, 3, 0, 3, 2]);

  builder.compute();
  let order: Vec<usize> = builder.active_sites().collect();
  assert_eq!(order, vec![2, 3, 0, 1]);
}

#[test]
fn collinear_sites() {
  let sites = vec![Point::new(0.0, 0.0), Point::new(1.0, 1.0), Point::new(2.0, 2.0)];
  let diagram = Diagram::new(sites.clone()).unwrap();

  // No circle through collinear sites, so no vertices: every edge runs
  // envelope to envelope, all along parallel bisectors of slope -1.
  assert_eq!(diagram.edges.len(), 2);
  for edge in diagram.edges.iter() {
    let first = edge.first_vertex.unwrap();
    let last = edge.last_vertex.unwrap();
    assert_eq!(first.x.abs(), ENVELOPE_X);
    assert_eq!(last.x.abs(), ENVELOPE_X);
    let slope = (last.y - first.y) / (last.x - first.x);
    assert!((slope - -1.0).abs() < TOLERANCE);
  }

  assert!(diagram.anomalies.iter().any(|a| matches!(a, Anomaly::DegenerateCircle)));
}

#[test]
fn cocircular_sites() {
  let sites = vec![
    Point::new(0.0, 0.0),
    Point::new(2.0, 0.0),
    Point::new(0.0, 2.0),
    Point::new(2.0, 2.0),
  ];
  let diagram = Diagram::new(sites.clone()).unwrap();

  // Both coincident circle events get processed: every finite vertex is the
  // shared circumcenter and at least four edges meet there.
  let center = Point::new(1.0, 1.0);
  let mut touching = 0;
  for edge in diagram.edges.iter() {
    let mut touches = false;
    for vertex in [edge.first_vertex.unwrap(), edge.last_vertex.unwrap()] {
      if vertex.x.abs() != ENVELOPE_X {
        assert!(vertex.distance(center) < TOLERANCE);
        touches = true;
      }
    }
    if touches {
      touching += 1;
    }
  }
  assert!(touching >= 4);

  validate(&sites, &diagram.edges);
}

#[test]
fn grid_of_nine() {
  let mut sites = Vec::new();
  for i in 0..3 {
    for j in 0..3 {
      sites.push(Point::new(i as f64, j as f64));
    }
  }
  let diagram = Diagram::new(sites.clone()).unwrap();

  assert!(!diagram.edges.is_empty());
  validate(&sites, &diagram.edges);

  for (site, neighbors) in diagram.neighbors.iter().enumerate() {
    for &neighbor in neighbors {
      assert!(diagram.neighbors[neighbor].contains(&site));
    }
  }
}

#[test]
fn general_position() {
  let sites = vec![
    Point::new(4.1, 9.7),
    Point::new(1.3, 8.2),
    Point::new(7.6, 8.9),
    Point::new(2.8, 6.1),
    Point::new(6.2, 5.4),
    Point::new(9.1, 6.8),
    Point::new(0.7, 3.9),
    Point::new(4.9, 2.6),
    Point::new(8.3, 3.1),
    Point::new(3.4, 0.8),
    Point::new(6.8, 0.2),
    Point::new(9.8, 1.4),
  ];
  let diagram = Diagram::new(sites.clone()).unwrap();

  assert!(diagram.edges.len() >= sites.len() - 1);
  validate(&sites, &diagram.edges);
}

#[test]
fn finalization_is_idempotent() {
  let sites = vec![
    Point::new(3.0, 3.0),
    Point::new(12.0, 3.0),
    Point::new(8.0, 5.0),
    Point::new(10.0, 5.0),
  ];
  let mut builder = Builder::new(&sites).unwrap();
  builder.compute();

  let finalized = builder.edges().to_vec();
  builder.finalize();
  assert_eq!(builder.edges(), finalized.as_slice());
}

#[test]
fn too_few_sites() {
  assert!(Builder::new(&[]).is_none());
  assert!(Builder::new(&[Point::new(1.0, 1.0)]).is_none());
  assert!(Diagram::new(vec![Point::new(1.0, 1.0)]).is_none());
}

// Structural laws that hold for any input: both endpoints of every edge are
// resolved, and each endpoint either sits on the envelope or is equidistant
// from the edge's two faces (it lies on their perpendicular bisector).
fn validate(sites: &[Point], edges: &[Edge]) {
  for edge in edges {
    let first = edge.first_vertex.expect("finalized edge missing first vertex");
    let last = edge.last_vertex.expect("finalized edge missing last vertex");

    for vertex in [first, last] {
      if vertex.x.abs() == ENVELOPE_X {
        continue;
      }
      let a = sites[edge.left_face];
      let b = sites[edge.right_face];
      let spread = (vertex.distance(a) - vertex.distance(b)).abs();
      let scale = vertex.distance(a).max(1.0);
      assert!(
        spread / scale < 1e-6,
        "vertex {:?} is off the bisector of {:?} and {:?}",
        vertex,
        a,
        b
      );
    }
  }
}
