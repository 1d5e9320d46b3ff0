extern crate fortunator;
extern crate plotters;
extern crate rand;

use fortunator::fortune::ENVELOPE_X;
use fortunator::{Diagram, Point};
use plotters::coord::types::RangedCoordf32;
use plotters::prelude::*;
use rand::prelude::*;

const IMG_WIDTH: u32 = 500;
const IMG_HEIGHT: u32 = 500;

fn get_points(n: i32, jitter: f64) -> Vec<Point> {
  let mut rng = rand::thread_rng();
  let mut points: Vec<Point> = Vec::new();
  for i in 0..n + 1 {
    for j in 0..n + 1 {
      points.push(Point {
        x: (i as f64) + jitter * (rng.gen::<f64>() - rng.gen::<f64>()),
        y: (j as f64) + jitter * (rng.gen::<f64>() - rng.gen::<f64>()),
      });
    }
  }

  points
}

// Envelope extensions can run far outside the viewport (and carry infinite
// y's for near-vertical bisectors); pin them to something the backend can
// rasterize.
fn clamp(p: Point) -> (f32, f32) {
  let bound = 4.0 * ENVELOPE_X;
  (p.x.clamp(-bound, bound) as f32, p.y.clamp(-bound, bound) as f32)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
  let size = 10;
  let points: Vec<Point> = get_points(size, 0.6)
    .into_iter()
    .map(|p| Point {
      x: ((IMG_WIDTH as f64) / 20.0 + p.x * (IMG_WIDTH as f64)) / (size as f64),
      y: ((IMG_HEIGHT as f64) / 20.0 + p.y * (IMG_HEIGHT as f64)) / (size as f64),
    })
    .collect();

  let now = std::time::Instant::now();
  let diagram = Diagram::new(points.to_vec()).expect("Need at least two sites.");

  println!(
    "time it took to generating a diagram for {} points: {}ms",
    points.len(),
    now.elapsed().as_millis()
  );

  let root = BitMapBackend::new("plot.png", (IMG_WIDTH, IMG_HEIGHT)).into_drawing_area();
  root.fill(&WHITE)?;

  let root = root.apply_coord_spec(Cartesian2d::<RangedCoordf32, RangedCoordf32>::new(
    0f32..IMG_WIDTH as f32,
    0f32..IMG_HEIGHT as f32,
    (0..IMG_WIDTH as i32, 0..IMG_HEIGHT as i32),
  ));

  println!("edges: {}", diagram.edges.len());
  println!("anomalies: {}", diagram.anomalies.len());

  for edge in diagram.edges.iter() {
    let first = edge.first_vertex.expect("Finalized edges have both vertices.");
    let last = edge.last_vertex.expect("Finalized edges have both vertices.");

    let plot = PathElement::new(vec![clamp(first), clamp(last)], ShapeStyle {
      color: BLACK.to_rgba(),
      filled: true,
      stroke_width: 1,
    });
    root.draw(&plot)?;
  }

  for site in diagram.sites.iter() {
    root.draw(&Circle::new((site.x as f32, site.y as f32), 2, RED.filled()))?;
  }

  Ok(())
}
