//! Quad-edge mesh topology after Guibas & Stolfi (1985).
//!
//! A [`QuadEdge`] group bundles one undirected edge with its dual in all four
//! rotational orientations. Groups live in an [`EdgePool`] arena owned by a
//! single subdivision; an [`EdgeRef`] addresses one directed edge as a
//! `(group, rotation)` pair, so rotation and symmetry are index arithmetic on
//! the handle while ring traversal goes through the pool.
//!
//! This layer is purely combinatorial: it stores point *indices* and never
//! looks at coordinates.

use slotmap::new_key_type;

use crate::core::collections::StorageMap;

/// Index into the caller's point buffer.
pub type PointIndex = usize;

new_key_type! {
    /// Stable key of one quad-edge group within its pool.
    pub struct QuadKey;
}

/// Handle to a directed edge: a group key plus a rotation index 0..4.
///
/// `rot`/`invrot`/`sym` are pure handle arithmetic; every other traversal
/// goes through the owning [`EdgePool`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct EdgeRef {
    quad: QuadKey,
    rot: u8,
}

impl EdgeRef {
    /// The primal directed edge of a group.
    #[inline]
    #[must_use]
    pub const fn primal(quad: QuadKey) -> Self {
        Self { quad, rot: 0 }
    }

    /// Key of the owning group.
    #[inline]
    #[must_use]
    pub const fn quad(self) -> QuadKey {
        self.quad
    }

    /// Rotation index of this directed edge within its group.
    #[inline]
    #[must_use]
    pub const fn rot_index(self) -> u8 {
        self.rot
    }

    /// The dual edge, directed from the right face to the left face.
    #[inline]
    #[must_use]
    pub const fn rot(self) -> Self {
        Self {
            quad: self.quad,
            rot: (self.rot + 1) & 3,
        }
    }

    /// The dual edge, directed from the left face to the right face.
    #[inline]
    #[must_use]
    pub const fn invrot(self) -> Self {
        Self {
            quad: self.quad,
            rot: (self.rot + 3) & 3,
        }
    }

    /// The same edge, directed from destination to origin.
    #[inline]
    #[must_use]
    pub const fn sym(self) -> Self {
        Self {
            quad: self.quad,
            rot: (self.rot + 2) & 3,
        }
    }
}

/// One slot of a group: origin-ring successor and origin index.
#[derive(Clone, Copy, Debug)]
struct DirectedEdge {
    next: EdgeRef,
    origin: PointIndex,
}

/// One undirected edge together with its dual, in all four rotations.
#[derive(Clone, Debug)]
pub struct QuadEdge {
    edges: [DirectedEdge; 4],
}

impl QuadEdge {
    /// Fresh group wired as an isolated edge: the primal edge and its sym
    /// each form their own origin ring, the dual pair forms one two-element
    /// ring. Origins start at the 0 sentinel.
    fn new(quad: QuadKey) -> Self {
        let at = |rot| EdgeRef { quad, rot };
        let slot = |next| DirectedEdge { next, origin: 0 };
        Self {
            edges: [slot(at(0)), slot(at(3)), slot(at(2)), slot(at(1))],
        }
    }
}

/// Arena of live quad-edge groups.
///
/// Owns the entire topology of one subdivision; dropping the pool releases
/// every group at once. Handles must only be used against the pool that
/// issued them, and not after their group has been deleted.
///
/// # Panics
///
/// Traversal and surgery methods panic when given a stale handle (one whose
/// group was deleted). None of them validate geometric preconditions.
#[derive(Debug, Default)]
pub struct EdgePool {
    quads: StorageMap<QuadKey, QuadEdge>,
}

impl EdgePool {
    /// Empty pool.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live groups (undirected edges).
    #[must_use]
    pub fn len(&self) -> usize {
        self.quads.len()
    }

    /// `true` when no group is live.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.quads.is_empty()
    }

    /// Keys of all live groups, in arbitrary order.
    pub fn quad_keys(&self) -> impl Iterator<Item = QuadKey> + '_ {
        self.quads.keys()
    }

    #[inline]
    fn slot(&self, e: EdgeRef) -> &DirectedEdge {
        &self.quads[e.quad].edges[usize::from(e.rot)]
    }

    #[inline]
    fn slot_mut(&mut self, e: EdgeRef) -> &mut DirectedEdge {
        &mut self.quads[e.quad].edges[usize::from(e.rot)]
    }

    /// Next edge counterclockwise around the origin of `e`.
    #[inline]
    #[must_use]
    pub fn onext(&self, e: EdgeRef) -> EdgeRef {
        self.slot(e).next
    }

    /// Next edge clockwise around the origin of `e`.
    #[inline]
    #[must_use]
    pub fn oprev(&self, e: EdgeRef) -> EdgeRef {
        self.onext(e.rot()).rot()
    }

    /// Next edge counterclockwise around the destination of `e`.
    #[inline]
    #[must_use]
    pub fn dnext(&self, e: EdgeRef) -> EdgeRef {
        self.onext(e.sym()).sym()
    }

    /// Next edge clockwise around the destination of `e`.
    #[inline]
    #[must_use]
    pub fn dprev(&self, e: EdgeRef) -> EdgeRef {
        self.onext(e.invrot()).invrot()
    }

    /// Counterclockwise edge around the left face, following `e`.
    #[inline]
    #[must_use]
    pub fn lnext(&self, e: EdgeRef) -> EdgeRef {
        self.onext(e.invrot()).rot()
    }

    /// Counterclockwise edge around the left face, before `e`.
    #[inline]
    #[must_use]
    pub fn lprev(&self, e: EdgeRef) -> EdgeRef {
        self.onext(e).sym()
    }

    /// Counterclockwise edge around the right face, following `e`.
    #[inline]
    #[must_use]
    pub fn rnext(&self, e: EdgeRef) -> EdgeRef {
        self.onext(e.rot()).invrot()
    }

    /// Counterclockwise edge around the right face, before `e`.
    #[inline]
    #[must_use]
    pub fn rprev(&self, e: EdgeRef) -> EdgeRef {
        self.onext(e.sym())
    }

    /// Origin point index of `e`.
    #[inline]
    #[must_use]
    pub fn org(&self, e: EdgeRef) -> PointIndex {
        self.slot(e).origin
    }

    /// Destination point index of `e`.
    #[inline]
    #[must_use]
    pub fn dest(&self, e: EdgeRef) -> PointIndex {
        self.slot(e.sym()).origin
    }

    /// Sets both endpoints of `e`: its own origin and its sym's origin.
    pub fn set_endpoints(&mut self, e: EdgeRef, org: PointIndex, dest: PointIndex) {
        self.slot_mut(e).origin = org;
        self.slot_mut(e.sym()).origin = dest;
    }

    /// Allocates a fresh group and returns its primal edge, with both
    /// endpoints initialized to the 0 sentinel.
    pub fn make_edge(&mut self) -> EdgeRef {
        let quad = self.quads.insert_with_key(QuadEdge::new);
        EdgeRef::primal(quad)
    }

    /// The Guibas-Stolfi splice.
    ///
    /// Affects the two edge rings around the origins of `a` and `b` and,
    /// independently, the two rings around their left faces: distinct rings
    /// are combined into one, a shared ring is broken in two. The dual-ring
    /// effect is what lets [`Self::connect_edge`], [`Self::delete_edge`],
    /// and [`Self::swap`] each be a handful of splices.
    pub fn splice(&mut self, a: EdgeRef, b: EdgeRef) {
        let alpha = self.onext(a).rot();
        let beta = self.onext(b).rot();

        let t1 = self.onext(b);
        let t2 = self.onext(a);
        let t3 = self.onext(beta);
        let t4 = self.onext(alpha);

        self.slot_mut(a).next = t1;
        self.slot_mut(b).next = t2;
        self.slot_mut(alpha).next = t3;
        self.slot_mut(beta).next = t4;
    }

    /// Detaches `e` from both of its endpoint rings and frees its group.
    pub fn delete_edge(&mut self, e: EdgeRef) {
        let a = self.oprev(e);
        self.splice(e, a);
        let s = e.sym();
        let b = self.oprev(s);
        self.splice(s, b);
        self.quads.remove(e.quad);
    }

    /// Connects `dest(a)` to `org(b)` with a new edge spliced in so that the
    /// new edge, `a`, and `b` share a left face. Returns the new edge with
    /// its endpoints set.
    pub fn connect_edge(&mut self, a: EdgeRef, b: EdgeRef) -> EdgeRef {
        let e = self.make_edge();
        let an = self.lnext(a);
        self.splice(e, an);
        self.splice(e.sym(), b);
        let org = self.dest(a);
        let dest = self.org(b);
        self.set_endpoints(e, org, dest);
        e
    }

    /// Turns `e` counterclockwise inside the quadrilateral formed by its two
    /// adjacent triangles, re-deriving its endpoints from the opposite
    /// corners. Both incident faces must be triangles.
    pub fn swap(&mut self, e: EdgeRef) {
        let a = self.oprev(e);
        let b = self.oprev(e.sym());
        self.splice(e, a);
        self.splice(e.sym(), b);
        let la = self.lnext(a);
        self.splice(e, la);
        let lb = self.lnext(b);
        self.splice(e.sym(), lb);
        let org = self.dest(a);
        let dest = self.dest(b);
        self.set_endpoints(e, org, dest);
    }
}
