//! Incremental Delaunay triangulation over a quad-edge subdivision.
//!
//! A [`Subdivision`] borrows the caller's point buffer (the sites to
//! triangulate followed by three reserved slots), seeds a synthetic triangle
//! enclosing all sites, and inserts one site at a time: locate the containing
//! triangle by walking the mesh, fan out from the new site to the corners of
//! the containing polygon, then restore the Delaunay condition with local
//! edge swaps. Faces come back as point-index triples from
//! [`Subdivision::faces`]. Based on the incremental algorithm of Guibas &
//! Stolfi (1985), pp. 103-121.

use log::warn;
use thiserror::Error;

use crate::core::collections::FastHashSet;
use crate::core::quad_edge::{EdgePool, EdgeRef, PointIndex};
use crate::geometry::point::Point2;
use crate::geometry::predicates::{
    InCircle, coincident, counterclockwise, in_circle, in_circle_position, on_segment,
};

/// Buffer slots reserved past the sites for the synthetic bounding triangle.
pub const BOUNDING_SLOTS: usize = 3;

/// Baseline bound on locate-walk steps; scaled up for large inputs.
const LOCATE_STEP_FLOOR: usize = 400;

/// How far the synthetic triangle reaches beyond the site bounding box, as a
/// multiple of the box extent.
const BOUNDING_SCALE: f64 = 10.0;

/// Error constructing a [`Subdivision`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConstructionError {
    /// The buffer must hold every site plus [`BOUNDING_SLOTS`] extra slots.
    #[error(
        "point buffer holds {len} slots; {} are reserved for the bounding triangle",
        BOUNDING_SLOTS
    )]
    BufferTooSmall {
        /// Length of the buffer that was passed in.
        len: usize,
    },

    /// Every site coordinate must be finite.
    #[error("site {index} has a non-finite coordinate")]
    NonFiniteCoordinate {
        /// Index of the offending site.
        index: usize,
    },
}

/// Error inserting a site into a [`Subdivision`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InsertionError {
    /// The site index does not name a real site.
    #[error("site index {site} out of range for {count} sites")]
    SiteOutOfBounds {
        /// The rejected index.
        site: usize,
        /// Number of real sites in the subdivision.
        count: usize,
    },

    /// The locate walk hit its step bound; the site was not inserted and the
    /// mesh is unchanged.
    #[error("locate walk for site {site} gave up after {steps} steps")]
    LocateFailed {
        /// The site whose insertion was abandoned.
        site: usize,
        /// The step bound that was exhausted.
        steps: usize,
    },
}

/// Successful outcomes of [`Subdivision::insert_site`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SiteOutcome {
    /// The site was added to the triangulation.
    Inserted,
    /// The site coincides with an existing vertex; the mesh is unchanged.
    Duplicate,
}

/// A face whose circumcircle strictly contains a site, as reported by
/// [`Subdivision::find_delaunay_violation`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DelaunayViolation {
    /// The offending face.
    pub face: [PointIndex; 3],
    /// The site strictly inside the face's circumcircle.
    pub site: PointIndex,
}

enum Located {
    Edge(EdgeRef),
    Coincident,
    StepLimit,
}

/// Triangulates a set of points.
///
/// The subdivision never copies point coordinates; it holds the caller's
/// buffer for its whole lifetime and reads sites through their indices. The
/// topology arena is owned per instance, so independent triangulations never
/// share state, and dropping the subdivision releases every quad-edge group.
pub struct Subdivision<'p> {
    points: &'p mut [Point2],
    site_count: usize,
    pool: EdgePool,
    start: EdgeRef,
}

impl<'p> Subdivision<'p> {
    /// Builds the initial subdivision over `points`.
    ///
    /// The buffer holds the sites to triangulate followed by
    /// [`BOUNDING_SLOTS`] reserved slots, which this constructor overwrites
    /// with a synthetic triangle reaching ten times the site bounding box's
    /// extent beyond its center. Degenerate boxes (a single
    /// site, or all sites on one axis-aligned line) are padded to a minimum
    /// extent so the triangle always has positive area.
    ///
    /// # Errors
    ///
    /// [`ConstructionError::BufferTooSmall`] when the buffer cannot hold the
    /// reserved slots, [`ConstructionError::NonFiniteCoordinate`] when a
    /// site has a NaN or infinite coordinate.
    pub fn new(points: &'p mut [Point2]) -> Result<Self, ConstructionError> {
        let Some(site_count) = points.len().checked_sub(BOUNDING_SLOTS) else {
            return Err(ConstructionError::BufferTooSmall { len: points.len() });
        };
        if let Some(index) = points[..site_count].iter().position(|p| !p.is_finite()) {
            return Err(ConstructionError::NonFiniteCoordinate { index });
        }

        let mut min = Point2::new(f64::INFINITY, f64::INFINITY);
        let mut max = Point2::new(f64::NEG_INFINITY, f64::NEG_INFINITY);
        for p in &points[..site_count] {
            min.x = min.x.min(p.x);
            min.y = min.y.min(p.y);
            max.x = max.x.max(p.x);
            max.y = max.y.max(p.y);
        }
        let (cx, cy, w, h) = if site_count == 0 {
            (0.0, 0.0, 1.0, 1.0)
        } else {
            (
                (min.x + max.x) / 2.0,
                (min.y + max.y) / 2.0,
                (max.x - min.x).max(1.0),
                (max.y - min.y).max(1.0),
            )
        };

        points[site_count] = Point2::new(cx, cy - h * BOUNDING_SCALE);
        points[site_count + 1] = Point2::new(cx + w * BOUNDING_SCALE, cy + h * BOUNDING_SCALE);
        points[site_count + 2] = Point2::new(cx - w * BOUNDING_SCALE, cy + h * BOUNDING_SCALE);

        let mut pool = EdgePool::new();
        let ea = pool.make_edge();
        pool.set_endpoints(ea, site_count, site_count + 1);
        let eb = pool.make_edge();
        pool.splice(ea.sym(), eb);
        pool.set_endpoints(eb, site_count + 1, site_count + 2);
        let ec = pool.make_edge();
        pool.splice(eb.sym(), ec);
        pool.set_endpoints(ec, site_count + 2, site_count);
        pool.splice(ec.sym(), ea);

        Ok(Self {
            points,
            site_count,
            pool,
            start: ea,
        })
    }

    /// Number of real sites; indices `site_count..site_count + 3` are the
    /// synthetic corners.
    #[must_use]
    pub fn site_count(&self) -> usize {
        self.site_count
    }

    /// The full point buffer, synthetic corners included.
    #[must_use]
    pub fn points(&self) -> &[Point2] {
        self.points
    }

    /// Number of live undirected edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.pool.len()
    }

    /// The underlying topology arena.
    #[must_use]
    pub fn pool(&self) -> &EdgePool {
        &self.pool
    }

    /// `true` iff `p` is strictly right of the directed edge `e`.
    #[must_use]
    pub fn right_of(&self, p: Point2, e: EdgeRef) -> bool {
        counterclockwise(p, self.points[self.pool.dest(e)], self.points[self.pool.org(e)])
    }

    /// `true` iff `p` is strictly left of the directed edge `e`.
    #[must_use]
    pub fn left_of(&self, p: Point2, e: EdgeRef) -> bool {
        counterclockwise(p, self.points[self.pool.org(e)], self.points[self.pool.dest(e)])
    }

    /// `true` iff `p` lies in the tolerance neighborhood of the edge `e`.
    #[must_use]
    pub fn on_edge(&self, p: Point2, e: EdgeRef) -> bool {
        on_segment(p, self.points[self.pool.org(e)], self.points[self.pool.dest(e)])
    }

    fn locate_step_limit(&self) -> usize {
        LOCATE_STEP_FLOOR.max(6 * self.points.len())
    }

    /// Walks from the current start edge toward `p`, returning an edge `e`
    /// such that `p` is on `e` or inside `e`'s left face. Guibas & Stolfi
    /// p. 121.
    ///
    /// The walk is bounded: degenerate configurations can make it cycle, so
    /// after the step limit it reports failure instead of spinning.
    fn locate(&self, p: Point2) -> Located {
        let mut e = self.start;
        for _ in 0..self.locate_step_limit() {
            if coincident(p, self.points[self.pool.org(e)])
                || coincident(p, self.points[self.pool.dest(e)])
            {
                return Located::Coincident;
            }
            if self.right_of(p, e) {
                e = e.sym();
            } else if !self.right_of(p, self.pool.onext(e)) {
                e = self.pool.onext(e);
            } else if !self.right_of(p, self.pool.dprev(e)) {
                e = self.pool.dprev(e);
            } else {
                return Located::Edge(e);
            }
        }
        Located::StepLimit
    }

    /// Inserts the site with index `site`, restoring the Delaunay condition
    /// before returning.
    ///
    /// A site coinciding with an existing vertex is reported as
    /// [`SiteOutcome::Duplicate`] and leaves the mesh unchanged.
    ///
    /// # Errors
    ///
    /// [`InsertionError::SiteOutOfBounds`] when `site` does not name a real
    /// site. [`InsertionError::LocateFailed`] when the locate walk hits its
    /// step bound; the mesh is left unchanged and the site is not
    /// represented in it.
    pub fn insert_site(&mut self, site: usize) -> Result<SiteOutcome, InsertionError> {
        if site >= self.site_count {
            return Err(InsertionError::SiteOutOfBounds {
                site,
                count: self.site_count,
            });
        }
        let p = self.points[site];
        let mut e = match self.locate(p) {
            Located::Coincident => return Ok(SiteOutcome::Duplicate),
            Located::StepLimit => {
                let steps = self.locate_step_limit();
                warn!("locate walk for site {site} gave up after {steps} steps");
                return Err(InsertionError::LocateFailed { site, steps });
            }
            Located::Edge(e) => e,
        };

        if self.on_edge(p, e) {
            // Landing on an edge would leave a zero-area face; merge the two
            // incident triangles into a quadrilateral first.
            e = self.pool.oprev(e);
            let doomed = self.pool.onext(e);
            self.pool.delete_edge(doomed);
        }

        // Connect the new site to every corner of the containing triangle
        // (or quadrilateral, for the on-edge case).
        let mut base = self.pool.make_edge();
        let first_org = self.pool.org(e);
        self.pool.set_endpoints(base, first_org, site);
        self.pool.splice(base, e);
        self.start = base;
        loop {
            base = self.pool.connect_edge(e, base.sym());
            e = self.pool.oprev(base);
            if self.pool.lnext(e) == self.start {
                break;
            }
        }

        // Examine suspect edges until the Delaunay condition holds
        // everywhere reachable from the fan.
        loop {
            let t = self.pool.oprev(e);
            let td = self.points[self.pool.dest(t)];
            if self.right_of(td, e)
                && in_circle(
                    self.points[self.pool.org(e)],
                    td,
                    self.points[self.pool.dest(e)],
                    p,
                )
            {
                self.pool.swap(e);
                e = self.pool.oprev(e);
            } else if self.pool.onext(e) == self.start {
                // No more suspect edges.
                return Ok(SiteOutcome::Inserted);
            } else {
                // Pop the next suspect edge.
                let next = self.pool.onext(e);
                e = self.pool.lprev(next);
            }
        }
    }

    /// All faces over real sites, as `[org, dest, apex]` index triples.
    ///
    /// Enumerates per quad-edge group: the left-face triangle of the group's
    /// primal edge and, when its apex differs, the right-face triangle. An
    /// interior face borders three groups, so most faces are reported more
    /// than once; use [`Self::unique_faces`] for a de-duplicated list. Faces
    /// touching a synthetic corner are suppressed.
    pub fn faces(&self) -> impl Iterator<Item = [PointIndex; 3]> + '_ {
        let n = self.site_count;
        self.pool.quad_keys().flat_map(move |quad| {
            let e = EdgeRef::primal(quad);
            let p0 = self.pool.org(e);
            let p1 = self.pool.dest(e);
            let left = self.pool.dest(self.pool.lnext(e));
            let right = self.pool.dest(self.pool.oprev(e));
            let real = p0 < n && p1 < n;
            let first = (real && left < n).then_some([p0, p1, left]);
            let second = (real && right < n && right != left).then_some([p0, p1, right]);
            [first, second].into_iter().flatten()
        })
    }

    /// De-duplicated face list, keeping the first-seen vertex order of each
    /// face.
    #[must_use]
    pub fn unique_faces(&self) -> Vec<[PointIndex; 3]> {
        let mut seen: FastHashSet<[PointIndex; 3]> = FastHashSet::default();
        let mut faces = Vec::new();
        for face in self.faces() {
            let mut key = face;
            key.sort_unstable();
            if seen.insert(key) {
                faces.push(face);
            }
        }
        faces
    }

    /// Exhaustively checks the empty-circumcircle property of every unique
    /// face against every site in the buffer, returning the first strict
    /// violation.
    ///
    /// Cocircular ties within the predicate's tolerance band do not count as
    /// violations. Sites that were never inserted are still checked; callers
    /// that skipped sites should expect violations from them.
    #[must_use]
    pub fn find_delaunay_violation(&self) -> Option<DelaunayViolation> {
        for face in self.unique_faces() {
            let [a, b, c] = face.map(|i| self.points[i]);
            for site in 0..self.site_count {
                if face.contains(&site) {
                    continue;
                }
                if in_circle_position(a, b, c, self.points[site]) == InCircle::Inside {
                    return Some(DelaunayViolation { face, site });
                }
            }
        }
        None
    }

    /// `true` when no face circumcircle strictly contains a site.
    #[must_use]
    pub fn is_delaunay(&self) -> bool {
        self.find_delaunay_violation().is_none()
    }
}
