use crate::Point;

/// y on the parabola with focus `f` and horizontal directrix `y = d`, at `x`.
///
/// Non-finite when the directrix passes through the focus; callers treat
/// that as "no arc here".
pub fn parabola_y(f: Point, d: f64, x: f64) -> f64 {
  let dy = d - f.y;
  let dx = x - f.x;
  (dy * dy - dx * dx) / (2.0 * dy) + f.y
}

/// Circumcenter and radius of the triangle `abc`.
///
/// The three points are sorted (y ascending, ties by x ascending) before any
/// arithmetic so the result is bit-stable under input reordering. Degenerate
/// triples propagate IEEE-754 infinities/NaNs into the center; callers filter
/// non-finite results.
pub fn circumcircle(a: Point, b: Point, c: Point) -> (Point, f64) {
  let mut p = [a, b, c];
  p.sort_unstable_by(|m, n| f64::total_cmp(&m.y, &n.y).then(f64::total_cmp(&m.x, &n.x)));
  let [a, b, c] = p;

  let mab = midpoint(a, b);
  let mbc = midpoint(b, c);

  // Perpendicular slopes of ab and bc; infinite when the side is horizontal.
  let m1 = (a.x - b.x) / (b.y - a.y);
  let m2 = (b.x - c.x) / (c.y - b.y);

  let center = if !m1.is_finite() {
    let x = mab.x;
    Point::new(x, m2 * (x - mbc.x) + mbc.y)
  } else if !m2.is_finite() {
    let x = mbc.x;
    Point::new(x, m1 * (x - mab.x) + mab.y)
  } else {
    let x = (m1 * mab.x - m2 * mbc.x + mbc.y - mab.y) / (m1 - m2);
    Point::new(x, m1 * (x - mab.x) + mab.y)
  };

  (center, Point::distance(center, a))
}

/// y on the perpendicular bisector of `ab` at horizontal coordinate `x`.
///
/// A horizontal `ab` makes the bisector vertical; the zero denominator is
/// replaced with the smallest positive representable value instead of letting
/// the slope go infinite. Only finalization calls this, with far-x values
/// where the near-vertical approximation is what gets drawn anyway.
pub fn bisector_y(a: Point, b: Point, x: f64) -> f64 {
  let mid = midpoint(a, b);
  let mut dy = b.y - a.y;
  if dy == 0.0 {
    dy = f64::MIN_POSITIVE;
  }
  let slope = -(b.x - a.x) / dy;
  slope * (x - mid.x) + mid.y
}

/// Signed perpendicular distance of `p` from the directed infinite line
/// `a` -> `b`, using the right-hand normal. Positive means `p` is on the
/// right-hand side. Used for its sign only.
pub fn plane_distance(a: Point, b: Point, p: Point) -> f64 {
  let d = b - a;
  let normal = Point::new(d.y, -d.x).normalize();
  normal.dot(p - a)
}

pub fn midpoint(a: Point, b: Point) -> Point {
  (a + b) / 2.0
}
