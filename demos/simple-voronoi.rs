extern crate fortunator;

use fortunator::{Diagram, Point};

fn main() {
  let points = vec![
    Point::new(3.0, 3.0),
    Point::new(12.0, 3.0),
    Point::new(8.0, 5.0),
    Point::new(10.0, 5.0),
  ];

  let diagram = Diagram::new(points).expect("Need at least two sites.");

  for (i, edge) in diagram.edges.iter().enumerate() {
    println!(
      "edge {}: faces ({}, {}), {:?} -> {:?}",
      i, edge.left_face, edge.right_face, edge.first_vertex, edge.last_vertex
    );
  }

  for anomaly in diagram.anomalies.iter() {
    println!("note: {}", anomaly);
  }
}
