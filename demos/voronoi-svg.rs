extern crate fortunator;

use fortunator::{Diagram, Point};
use svg::node::element::path::{Command, Data, Position};
use svg::node::element::{Path, Rectangle};
use svg::{Document, Node};

fn main() {
  let points = vec![
    Point::new(20.0, 60.0),
    Point::new(50.0, 85.0),
    Point::new(80.0, 30.0),
  ];

  let diagram = Diagram::new(points.clone()).expect("Need at least two sites.");

  let mut document = Document::new().set("viewBox", (-110, -110, 220, 220));
  let colours = ["blue", "green", "red", "purple", "orange"];

  for (i, edge) in diagram.edges.iter().enumerate() {
    let first = edge.first_vertex.expect("Finalized edges have both vertices.");
    let last = edge.last_vertex.expect("Finalized edges have both vertices.");

    let data = Data::from(vec![
      Command::Move(Position::Absolute, (first.x, -first.y).into()),
      Command::Line(Position::Absolute, (last.x, -last.y).into()),
    ]);

    let path = Path::new()
      .set("fill", "none")
      .set("stroke", colours[i % colours.len()])
      .set("stroke-width", 1)
      .set("d", data);

    document.append(path);
  }

  for point in points {
    document.append(
      Rectangle::new()
        .set("x", point.x - 1.5)
        .set("y", -point.y - 1.5)
        .set("width", 3)
        .set("height", 3),
    );
  }

  svg::save("example.svg", &document).unwrap();
}
