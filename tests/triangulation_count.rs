//! Euler-count and full Delaunay validation on a seeded random point cloud.

#![allow(missing_docs)]

use delaunay2d::prelude::*;

/// Number of convex hull vertices by Andrew's monotone chain, keeping only
/// strict turns. The generator draws continuous coordinates, so collinear
/// hull triples do not occur.
fn convex_hull_len(points: &[Point2]) -> usize {
    fn chain(points: impl Iterator<Item = Point2>) -> Vec<Point2> {
        let mut out: Vec<Point2> = Vec::new();
        for p in points {
            while out.len() >= 2 && signed_area2(out[out.len() - 2], out[out.len() - 1], p) <= 0.0 {
                out.pop();
            }
            out.push(p);
        }
        out
    }

    let mut sorted = points.to_vec();
    sorted.sort_by(|a, b| {
        a.x.partial_cmp(&b.x)
            .unwrap()
            .then(a.y.partial_cmp(&b.y).unwrap())
    });
    let lower = chain(sorted.iter().copied());
    let upper = chain(sorted.iter().rev().copied());
    lower.len() + upper.len() - 2
}

#[test]
fn random_cloud_matches_euler_count_and_stays_delaunay() {
    const N: usize = 200;
    let sites = generate_random_points_seeded(N, (0.0, 100.0), 42).unwrap();

    let mut points = sites.clone();
    points.extend([Point2::default(); BOUNDING_SLOTS]);
    let mut subdivision = Subdivision::new(&mut points).unwrap();
    for site in 0..N {
        assert_eq!(
            subdivision.insert_site(site).unwrap(),
            SiteOutcome::Inserted,
            "site {site} should insert cleanly"
        );
    }

    // For a triangulated point set: triangles = 2n - 2 - h, with h points on
    // the convex hull.
    let hull = convex_hull_len(&sites);
    let faces = subdivision.unique_faces();
    assert_eq!(faces.len(), 2 * N - 2 - hull);

    assert_eq!(subdivision.find_delaunay_violation(), None);
}

#[test]
fn smaller_seeded_clouds_are_delaunay_across_seeds() {
    for seed in [1u64, 7, 99, 1234] {
        let sites = generate_random_points_seeded(40, (-50.0, 50.0), seed).unwrap();
        let mut points = sites.clone();
        points.extend([Point2::default(); BOUNDING_SLOTS]);
        let mut subdivision = Subdivision::new(&mut points).unwrap();
        for site in 0..sites.len() {
            assert_eq!(
                subdivision.insert_site(site).unwrap(),
                SiteOutcome::Inserted
            );
        }

        let hull = convex_hull_len(&sites);
        assert_eq!(subdivision.unique_faces().len(), 2 * sites.len() - 2 - hull);
        assert_eq!(subdivision.find_delaunay_violation(), None);
    }
}
