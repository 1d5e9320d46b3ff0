extern crate fortunator;

use std::time::{Duration, Instant};

use fortunator::fortune::Builder;
use fortunator::Point;
use rand::distributions::Uniform;
use rand::Rng;
use rand_distr::StandardNormal;

fn report(n: usize, elapsed: Duration, builder: &Builder) {
  println!(
    "{} points ({} edges, {} anomalies): {}.{}ms.",
    n,
    builder.edges().len(),
    builder.anomalies().len(),
    elapsed.as_millis(),
    elapsed.subsec_micros()
  );
}

fn uniform(count: &[usize]) {
  let mut rng = rand::thread_rng();
  let range = Uniform::new(0.0, 1000.0);

  println!("Uniform distribution:");

  for &c in count {
    let points = (0..c)
      .map(|_| Point::new(rng.sample(&range), rng.sample(&range)))
      .collect::<Vec<Point>>();

    let now = Instant::now();
    let mut builder = Builder::new(&points).expect("Need at least two sites.");
    builder.compute();
    let elapsed = now.elapsed();

    report(points.len(), elapsed, &builder);
  }
}

fn gaussian(count: &[usize]) {
  let mut rng = rand::thread_rng();

  println!("Gaussian distribution:");

  for &c in count {
    let points = (0..c)
      .map(|_| Point::new(rng.sample(StandardNormal), rng.sample(StandardNormal)) * 1000.0)
      .collect::<Vec<Point>>();

    let now = Instant::now();
    let mut builder = Builder::new(&points).expect("Need at least two sites.");
    builder.compute();
    let elapsed = now.elapsed();

    report(points.len(), elapsed, &builder);
  }
}

fn jittered_grid(count: &[usize]) {
  let mut rng = rand::thread_rng();

  println!("Jittered grid distribution:");

  for &c in count {
    let size = (c as f64).sqrt().floor() as usize;
    let mut points: Vec<Point> = Vec::new();

    for i in 0..size {
      for j in 0..size {
        points.push(Point::new(
          i as f64 + 0.2 * rng.gen::<f64>(),
          j as f64 + 0.2 * rng.gen::<f64>(),
        ));
      }
    }

    let now = Instant::now();
    let mut builder = Builder::new(&points).expect("Need at least two sites.");
    builder.compute();
    let elapsed = now.elapsed();

    report(points.len(), elapsed, &builder);
  }
}

fn main() {
  // The beachline search is a linear scan, so the sweep is quadratic; keep
  // the counts modest compared to a triangulation-based builder.
  let count = [500, 1000, 2000, 5000];

  gaussian(&count);
  uniform(&count);
  jittered_grid(&count);
}
