//! Closed polygons with outward edge normals.

use std::f64::consts::TAU;

use crate::ecs::components::physics::RigidEntity;
use crate::error::{CollisionError, Result};

use super::segment::{RayHit, Segment};
use super::vector::{Vector2, VectorExt};
use super::SurfaceTag;

/// Hits in the uppermost fraction of a polygon's height report the top material.
const TOP_BAND: f64 = 0.1;

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vector2,
    pub max: Vector2,
}

impl Aabb {
    /// Test whether two boxes overlap once each is grown by `margin`.
    #[inline]
    pub fn overlaps(&self, other: &Aabb, margin: f64) -> bool {
        let slack = 2.0 * margin;
        self.min.x <= other.max.x + slack
            && self.max.x + slack >= other.min.x
            && self.min.y <= other.max.y + slack
            && self.max.y + slack >= other.min.y
    }
}

/// Materials reported by ray hits that have no per-edge override.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SurfaceMaterials {
    pub default: Option<SurfaceTag>,
    /// Used for hits in the top 10% of the polygon.
    pub top: Option<SurfaceTag>,
}

/// An ordered loop of points; the last point connects back to the first.
///
/// `normals[i]` is the outward unit normal of the edge from `points[i]` to
/// `points[(i + 1) % n]`.
#[derive(Debug, Clone)]
pub struct Polygon {
    points: Vec<Vector2>,
    edges: Vec<Segment>,
    normals: Vec<Vector2>,
    /// Non-owning handle to the entity that produced this polygon.
    pub owner: Option<hecs::Entity>,
    pub materials: SurfaceMaterials,
}

impl Polygon {
    /// Build a polygon from at least three finite points, in either winding.
    pub fn from_points(points: Vec<Vector2>) -> Result<Self> {
        if points.len() < 3 {
            return Err(CollisionError::DegeneratePolygon {
                points: points.len(),
            });
        }
        for point in &points {
            point.ensure_finite("polygon point")?;
        }

        let n = points.len();
        let twice_area: f64 = (0..n)
            .map(|i| points[i].cross(points[(i + 1) % n]))
            .sum();

        let mut edges = Vec::with_capacity(n);
        let mut normals = Vec::with_capacity(n);
        for i in 0..n {
            let edge = Segment::new(points[i], points[(i + 1) % n]);
            let d = edge.direction();
            let normal = if twice_area > 0.0 {
                Vector2::new(d.y, -d.x)
            } else {
                Vector2::new(-d.y, d.x)
            };
            edges.push(edge);
            normals.push(normal);
        }

        Ok(Self {
            points,
            edges,
            normals,
            owner: None,
            materials: SurfaceMaterials::default(),
        })
    }

    /// Axis-aligned rectangle with its first corner at `origin`.
    pub fn rectangle(origin: Vector2, width: f64, height: f64) -> Result<Self> {
        Self::from_points(vec![
            origin,
            origin + Vector2::new(width, 0.0),
            origin + Vector2::new(width, height),
            origin + Vector2::new(0.0, height),
        ])
    }

    /// Regular `segments`-gon inscribed in a circle of the given diameter.
    ///
    /// Vertex `i` sits at angle `(i + angle_offset) * 2π / segments`.
    pub fn circle(
        center: Vector2,
        diameter: f64,
        segments: usize,
        angle_offset: f64,
    ) -> Result<Self> {
        let step = TAU / segments as f64;
        let radius = diameter * 0.5;
        let points = (0..segments)
            .map(|i| center + Vector2::from_polar((i as f64 + angle_offset) * step, radius))
            .collect();
        Self::from_points(points)
    }

    pub fn with_owner(mut self, owner: hecs::Entity) -> Self {
        self.owner = Some(owner);
        self
    }

    pub fn with_materials(mut self, materials: SurfaceMaterials) -> Self {
        self.materials = materials;
        self
    }

    /// Override the material of one edge. Out-of-range indices are ignored.
    pub fn set_edge_surface(&mut self, index: usize, surface: Option<SurfaceTag>) {
        if let Some(edge) = self.edges.get_mut(index) {
            edge.surface = surface;
        }
    }

    #[inline]
    pub fn points(&self) -> &[Vector2] {
        &self.points
    }

    #[inline]
    pub fn edges(&self) -> &[Segment] {
        &self.edges
    }

    #[inline]
    pub fn normals(&self) -> &[Vector2] {
        &self.normals
    }

    /// Average of the vertices.
    pub fn centroid(&self) -> Vector2 {
        self.points.iter().copied().sum::<Vector2>() / self.points.len() as f64
    }

    pub fn bounds(&self) -> Aabb {
        let mut min = Vector2::splat(f64::INFINITY);
        let mut max = Vector2::splat(f64::NEG_INFINITY);
        for p in &self.points {
            min = min.min(*p);
            max = max.max(*p);
        }
        Aabb { min, max }
    }

    /// Copy shifted by `offset`; normals are unchanged.
    pub fn translated(&self, offset: Vector2) -> Self {
        let mut moved = self.clone();
        for p in &mut moved.points {
            *p += offset;
        }
        for edge in &mut moved.edges {
            edge.p1 += offset;
            edge.p2 += offset;
        }
        moved
    }

    /// Every point where an edge crosses `line`, nearest in x to `line.p1` first.
    pub fn intersect(&self, line: &Segment) -> Vec<Vector2> {
        let mut hits: Vec<Vector2> = self
            .edges
            .iter()
            .filter_map(|edge| edge.intersects(line, false))
            .collect();
        hits.sort_by(|a, b| {
            (a.x - line.p1.x)
                .abs()
                .total_cmp(&(b.x - line.p1.x).abs())
        });
        hits
    }

    /// Reflect `ray` off every edge it crosses, nearest hit first.
    ///
    /// Material precedence: edge override, then the top material for hits
    /// in the uppermost band, then the polygon default.
    pub fn ray_intersect(&self, ray: &Segment) -> Vec<RayHit> {
        let bounds = self.bounds();
        let top_limit = bounds.min.y + (bounds.max.y - bounds.min.y) * TOP_BAND;

        let mut hits: Vec<RayHit> = self
            .edges
            .iter()
            .filter_map(|edge| ray.ray_intersect(edge))
            .map(|mut hit| {
                if hit.surface.is_none() {
                    hit.surface = if hit.point.y <= top_limit && self.materials.top.is_some() {
                        self.materials.top.clone()
                    } else {
                        self.materials.default.clone()
                    };
                }
                hit
            })
            .collect();
        hits.sort_by(|a, b| a.distance.total_cmp(&b.distance));
        hits
    }

    /// Velocity of `point` as if rigidly attached to the owning entity.
    ///
    /// Zero when there is no owner or the owner is no longer in `world`.
    pub fn surface_velocity(&self, point: Vector2, world: &hecs::World) -> Vector2 {
        let Some(owner) = self.owner else {
            return Vector2::ZERO;
        };
        match world.get::<&RigidEntity>(owner) {
            Ok(entity) => entity.velocity_at(point),
            Err(_) => {
                tracing::trace!(?owner, "polygon owner is gone; surface is at rest");
                Vector2::ZERO
            }
        }
    }
}
