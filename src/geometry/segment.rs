//! Directed line segments: intersection, side classification, ray casts.

use super::vector::{Vector2, VectorExt};
use super::{between, SurfaceTag, SIDE_EPSILON, VERTICAL_EPSILON};

/// A directed two-point line, optionally tagged with a surface material.
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    pub p1: Vector2,
    pub p2: Vector2,
    /// Per-edge material override; cosmetic, carried through to ray hits.
    pub surface: Option<SurfaceTag>,
}

/// Result of casting a ray against a bounded reflecting surface.
#[derive(Debug, Clone, PartialEq)]
pub struct RayHit {
    pub point: Vector2,
    /// Unit surface normal, facing back toward the ray origin.
    pub normal: Vector2,
    /// Unit ray direction mirrored about `normal`.
    pub reflection: Vector2,
    /// Distance from the ray origin to `point`.
    pub distance: f64,
    pub surface: Option<SurfaceTag>,
}

impl Segment {
    pub fn new(p1: Vector2, p2: Vector2) -> Self {
        Self {
            p1,
            p2,
            surface: None,
        }
    }

    pub fn with_surface(mut self, surface: impl Into<SurfaceTag>) -> Self {
        self.surface = Some(surface.into());
        self
    }

    #[inline]
    pub fn length(&self) -> f64 {
        (self.p2 - self.p1).length()
    }

    /// Unit vector from `p1` toward `p2` (zero for a degenerate segment).
    #[inline]
    pub fn direction(&self) -> Vector2 {
        (self.p2 - self.p1).unit()
    }

    #[inline]
    pub fn midpoint(&self) -> Vector2 {
        (self.p1 + self.p2) * 0.5
    }

    /// Direction rotated by -90°: `(dy, -dx)`.
    #[inline]
    pub fn normal(&self) -> Vector2 {
        let d = self.direction();
        Vector2::new(d.y, -d.x)
    }

    /// Intersection point of two segments.
    ///
    /// The point always lies within the bounds of `self`; it must also lie
    /// within `other` unless `infinite_other` treats `other` as a full line.
    /// Parallel segments, including collinear overlapping ones, never
    /// intersect. Two near-vertical segments are considered parallel.
    pub fn intersects(&self, other: &Segment, infinite_other: bool) -> Option<Vector2> {
        let dx1 = self.p2.x - self.p1.x;
        let dx2 = other.p2.x - other.p1.x;
        let vertical_self = dx1.abs() < VERTICAL_EPSILON;
        let vertical_other = dx2.abs() < VERTICAL_EPSILON;

        let point = match (vertical_self, vertical_other) {
            (true, true) => return None,
            (true, false) => {
                let m2 = (other.p2.y - other.p1.y) / dx2;
                let b2 = other.p1.y - m2 * other.p1.x;
                let x = self.p1.x;
                Vector2::new(x, m2 * x + b2)
            }
            (false, true) => {
                let m1 = (self.p2.y - self.p1.y) / dx1;
                let b1 = self.p1.y - m1 * self.p1.x;
                let x = other.p1.x;
                Vector2::new(x, m1 * x + b1)
            }
            (false, false) => {
                // Solve with self.p1 as the origin so the intercept of self is zero.
                let a = other.p1 - self.p1;
                let b = other.p2 - self.p1;
                let m1 = (self.p2.y - self.p1.y) / dx1;
                let m2 = (b.y - a.y) / (b.x - a.x);
                if m1 == m2 {
                    return None;
                }
                let b2 = a.y - m2 * a.x;
                let x = b2 / (m1 - m2);
                Vector2::new(x, m1 * x) + self.p1
            }
        };

        if !self.bounds_contain(point) {
            return None;
        }
        if !infinite_other && !other.bounds_contain(point) {
            return None;
        }
        Some(point)
    }

    /// Treat `self` as a ray from `p1` toward `p2` and reflect it off `surface`.
    pub fn ray_intersect(&self, surface: &Segment) -> Option<RayHit> {
        let point = self.intersects(surface, false)?;

        let mut normal = surface.normal();
        if normal.dot(self.p1 - point) < 0.0 {
            normal = -normal;
        }

        let incoming = self.direction();
        let reflection = incoming - normal * (2.0 * incoming.dot(normal));

        Some(RayHit {
            point,
            normal,
            reflection,
            distance: (point - self.p1).length(),
            surface: surface.surface.clone(),
        })
    }

    /// Classify each point against the infinite line through `self`.
    ///
    /// Returns `0` for points within [`SIDE_EPSILON`] of the line, otherwise
    /// the sign of the cross product of the line direction and `point - p1`.
    pub fn which_side(&self, points: &[Vector2]) -> Vec<i8> {
        let direction = self.direction();
        points
            .iter()
            .map(|point| {
                let cross = direction.cross(*point - self.p1);
                if cross.abs() < SIDE_EPSILON {
                    0
                } else if cross > 0.0 {
                    1
                } else {
                    -1
                }
            })
            .collect()
    }

    #[inline]
    fn bounds_contain(&self, point: Vector2) -> bool {
        between(point.x, self.p1.x, self.p2.x) && between(point.y, self.p1.y, self.p2.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn seg(x1: f64, y1: f64, x2: f64, y2: f64) -> Segment {
        Segment::new(Vector2::new(x1, y1), Vector2::new(x2, y2))
    }

    fn approx_eq(a: Option<Vector2>, b: Option<Vector2>) -> bool {
        match (a, b) {
            (Some(a), Some(b)) => (a - b).length() < EPS,
            (None, None) => true,
            _ => false,
        }
    }

    #[test]
    fn test_crossing_segments() {
        let a = seg(0.0, 0.0, 10.0, 10.0);
        let b = seg(0.0, 10.0, 10.0, 0.0);
        let p = a.intersects(&b, false).unwrap();
        assert!((p - Vector2::new(5.0, 5.0)).length() < EPS);
    }

    #[test]
    fn test_disjoint_segments() {
        let a = seg(0.0, 0.0, 1.0, 1.0);
        let b = seg(5.0, 0.0, 6.0, -3.0);
        assert!(a.intersects(&b, false).is_none());
    }

    #[test]
    fn test_intersection_is_symmetric() {
        let cases = [
            (seg(0.0, 0.0, 10.0, 10.0), seg(0.0, 10.0, 10.0, 0.0)),
            (seg(-3.0, 1.0, 7.0, 2.5), seg(2.0, -4.0, 2.5, 9.0)),
            (seg(5.0, -5.0, 5.0, 5.0), seg(-10.0, 1.0, 10.0, 3.0)),
            (seg(0.0, 0.0, 4.0, 0.0), seg(4.0, 0.0, 4.0, 8.0)),
            (seg(1.0, 1.0, 2.0, 2.0), seg(3.0, 1.0, 9.0, 0.0)),
            (seg(-1.0, 0.5, 1.0, 0.5), seg(0.0, 0.0, 0.3, 3.0)),
        ];
        for (a, b) in cases {
            let ab = a.intersects(&b, false);
            let ba = b.intersects(&a, false);
            assert!(approx_eq(ab, ba), "{a:?} vs {b:?}: {ab:?} != {ba:?}");
        }
    }

    #[test]
    fn test_near_vertical_pair_is_parallel() {
        // Collinear and overlapping, but both have |dx| < 0.01.
        let a = seg(0.0, 0.0, 0.005, 10.0);
        let b = seg(0.0, 5.0, 0.004, 15.0);
        assert!(a.intersects(&b, false).is_none());

        let c = seg(0.0, 0.0, 0.0, 10.0);
        let d = seg(0.005, 10.0, 0.0, 0.0);
        assert!(c.intersects(&d, false).is_none());
    }

    #[test]
    fn test_collinear_overlap_is_not_a_crossing() {
        let a = seg(0.0, 0.0, 10.0, 0.0);
        let b = seg(5.0, 0.0, 15.0, 0.0);
        assert!(a.intersects(&b, false).is_none());
    }

    #[test]
    fn test_one_vertical_substitutes_x() {
        let wall = seg(3.0, -10.0, 3.0, 10.0);
        let slope = seg(0.0, 0.0, 6.0, 3.0);
        let p = wall.intersects(&slope, false).unwrap();
        assert!((p - Vector2::new(3.0, 1.5)).length() < EPS);
        let q = slope.intersects(&wall, false).unwrap();
        assert!((q - p).length() < EPS);
    }

    #[test]
    fn test_bounds_fudge_accepts_endpoint_touch() {
        let a = seg(0.0, 0.0, 10.0, 0.0);
        let b = seg(10.00005, -5.0, 10.00005, 5.0);
        assert!(a.intersects(&b, false).is_some());

        let far = seg(10.001, -5.0, 10.001, 5.0);
        assert!(a.intersects(&far, false).is_none());
    }

    #[test]
    fn test_infinite_other() {
        let a = seg(0.0, 0.0, 10.0, 0.0);
        let short = seg(5.0, 2.0, 6.0, 4.0);
        assert!(a.intersects(&short, false).is_none());
        let p = a.intersects(&short, true).unwrap();
        assert!((p - Vector2::new(4.0, 0.0)).length() < EPS);

        // The bounds of self are never relaxed.
        assert!(short.intersects(&a, true).is_none());
    }

    #[test]
    fn test_ray_reflects_toward_origin() {
        let ray = seg(0.0, -10.0, 0.5, 10.0);
        let floor = seg(-5.0, 0.0, 5.0, 0.0).with_surface("stone");
        let hit = ray.ray_intersect(&floor).unwrap();
        assert!(hit.normal.dot(ray.p1 - hit.point) > 0.0);
        assert!((hit.normal - Vector2::new(0.0, -1.0)).length() < EPS);
        assert!(hit.reflection.y < 0.0);
        assert!((hit.reflection.length() - 1.0).abs() < EPS);
        assert_eq!(hit.surface.as_ref().map(SurfaceTag::as_str), Some("stone"));

        // Reversed surface direction still yields a normal facing the ray.
        let reversed = seg(5.0, 0.0, -5.0, 0.0);
        let hit = ray.ray_intersect(&reversed).unwrap();
        assert!((hit.normal - Vector2::new(0.0, -1.0)).length() < EPS);
    }

    #[test]
    fn test_ray_miss() {
        let ray = seg(0.0, 0.0, 1.0, 1.0);
        let surface = seg(5.0, 0.0, 6.0, 0.0);
        assert!(ray.ray_intersect(&surface).is_none());
    }

    #[test]
    fn test_which_side() {
        let line = seg(0.0, 0.0, 10.0, 0.0);
        let sides = line.which_side(&[
            Vector2::new(5.0, 3.0),
            Vector2::new(5.0, -3.0),
            Vector2::new(20.0, 0.005),
            Vector2::new(-4.0, -0.009),
        ]);
        assert_eq!(sides, vec![1, -1, 0, 0]);
    }
}
