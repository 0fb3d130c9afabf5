//! Property-based tests for the Delaunay invariant on random site sets.

#![allow(missing_docs)]

use delaunay2d::prelude::*;
use proptest::prelude::*;

fn site_strategy() -> impl Strategy<Value = Vec<(f64, f64)>> {
    prop::collection::vec((-100.0f64..100.0, -100.0f64..100.0), 3..24)
}

fn make_buffer(sites: &[(f64, f64)]) -> Vec<Point2> {
    let mut points: Vec<Point2> = sites.iter().map(|&(x, y)| Point2::new(x, y)).collect();
    points.extend([Point2::default(); BOUNDING_SLOTS]);
    points
}

/// Inserts every site, returning the indices that actually became mesh
/// vertices. Duplicates and reported locate failures are skipped; any other
/// error fails the test.
fn insert_sites(subdivision: &mut Subdivision<'_>) -> Result<Vec<usize>, TestCaseError> {
    let mut inserted = Vec::new();
    for site in 0..subdivision.site_count() {
        match subdivision.insert_site(site) {
            Ok(SiteOutcome::Inserted) => inserted.push(site),
            Ok(SiteOutcome::Duplicate) => {}
            Err(InsertionError::LocateFailed { .. }) => {}
            Err(e) => prop_assert!(false, "unexpected insertion error: {e}"),
        }
    }
    Ok(inserted)
}

proptest! {
    #[test]
    fn triangulation_satisfies_empty_circumcircle(sites in site_strategy()) {
        let mut points = make_buffer(&sites);
        let mut subdivision = Subdivision::new(&mut points).unwrap();
        let inserted = insert_sites(&mut subdivision)?;

        let faces = subdivision.unique_faces();
        for face in &faces {
            for &v in face {
                prop_assert!(v < subdivision.site_count(), "synthetic corner leaked: {face:?}");
            }
        }

        // Empty circumcircle against every site that is present in the mesh.
        for face in &faces {
            let [a, b, c] = face.map(|i| subdivision.points()[i]);
            for &site in &inserted {
                if face.contains(&site) {
                    continue;
                }
                prop_assert!(
                    in_circle_position(a, b, c, subdivision.points()[site]) != InCircle::Inside,
                    "site {site} lies strictly inside the circumcircle of {face:?}"
                );
            }
        }
    }

    #[test]
    fn face_queries_are_idempotent(sites in site_strategy()) {
        let mut points = make_buffer(&sites);
        let mut subdivision = Subdivision::new(&mut points).unwrap();
        insert_sites(&mut subdivision)?;

        let collect = |s: &Subdivision<'_>| {
            let mut faces: Vec<[usize; 3]> = s
                .unique_faces()
                .into_iter()
                .map(|mut f| {
                    f.sort_unstable();
                    f
                })
                .collect();
            faces.sort_unstable();
            faces
        };
        prop_assert_eq!(collect(&subdivision), collect(&subdivision));
    }

    #[test]
    fn faces_are_combinatorially_sound(sites in site_strategy()) {
        let mut points = make_buffer(&sites);
        let mut subdivision = Subdivision::new(&mut points).unwrap();
        let inserted = insert_sites(&mut subdivision)?;

        for face in subdivision.unique_faces() {
            // No repeated vertices within a face.
            prop_assert!(face[0] != face[1] && face[1] != face[2] && face[0] != face[2]);
            // Every face vertex is a site that actually made it into the
            // mesh.
            for &v in &face {
                prop_assert!(inserted.contains(&v), "face {face:?} names a site that was never inserted");
            }
            let [a, b, c] = face.map(|i| subdivision.points()[i]);
            prop_assert!(signed_area2(a, b, c).is_finite());
        }
    }

    #[test]
    fn duplicate_sites_never_grow_the_mesh(
        sites in site_strategy(),
        dup in 0usize..64,
    ) {
        let mut base = sites.clone();
        let dup_index = dup % sites.len();
        base.push(sites[dup_index]);

        let mut points = make_buffer(&base);
        let mut subdivision = Subdivision::new(&mut points).unwrap();
        let mut outcomes = Vec::new();
        for site in 0..subdivision.site_count() {
            outcomes.push(subdivision.insert_site(site));
        }

        // The appended copy must be a no-op whenever its original made it in.
        let original = &outcomes[dup_index];
        let copy = &outcomes[sites.len()];
        if matches!(original, Ok(SiteOutcome::Inserted)) {
            prop_assert_eq!(copy, &Ok(SiteOutcome::Duplicate));
        }
    }
}
