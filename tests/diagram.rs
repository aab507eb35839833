use voronoi_fortune::{edges, Edge, Error, Point, Voronoi};

fn pt(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

fn dist(a: Point, b: Point) -> f64 {
    ((a.x - b.x).powi(2) + (a.y - b.y).powi(2)).sqrt()
}

fn near(a: Point, b: Point) -> bool {
    dist(a, b) < 1e-6
}

/// Both endpoints of every edge satisfy the edge's own line equation.
fn assert_on_own_line(edges: &[Edge]) {
    for e in edges {
        for p in [e.start, e.end] {
            assert!(p.x.is_finite() && p.y.is_finite(), "non-finite endpoint in {e:?}");
            if e.is_vertical() {
                assert!((p.x - e.start.x).abs() < 1e-9, "vertical edge bends: {e:?}");
            } else {
                let err = (e.f * p.x + e.g - p.y).abs();
                assert!(err < 1e-6 * (1.0 + p.x.abs()), "endpoint off the line: {e:?}");
            }
        }
    }
}

/// A diagram vertex has (at least) three sites at equal, minimal distance.
fn assert_is_vertex(v: Point, sites: &[Point]) {
    let mut dists: Vec<f64> = sites.iter().map(|&s| dist(v, s)).collect();
    dists.sort_by(|a, b| a.partial_cmp(b).unwrap());
    assert!(
        dists[2] - dists[0] < 1e-6 * (1.0 + dists[0]),
        "{v:?} is not equidistant from three sites: {dists:?}"
    );
}

fn endpoints_at(edges: &[Edge], v: Point) -> usize {
    edges
        .iter()
        .flat_map(|e| [e.start, e.end])
        .filter(|&p| near(p, v))
        .count()
}

#[test]
fn three_sites_meet_at_their_circumcenter() {
    let sites = [pt(1.0, 2.0), pt(2.0, 3.0), pt(5.0, 1.0)];
    let mut v = Voronoi::new();
    let edges = v.edges(&sites, 10.0, 10.0).unwrap();

    assert_eq!(edges.len(), 3);
    assert_on_own_line(&edges);

    let center = pt(2.9, 1.1);
    assert_is_vertex(center, &sites);
    assert_eq!(endpoints_at(&edges, center), 3);

    assert_eq!(v.vertices().len(), 1);
    assert!(near(v.vertices()[0], center));
}

#[test]
fn cohorizontal_pair_gets_a_vertical_bisector() {
    let sites = [pt(1.0, 1.0), pt(2.0, 3.0), pt(5.0, 1.0)];
    let edges = edges(&sites, 10.0, 10.0).unwrap();

    assert_eq!(edges.len(), 3);
    assert_on_own_line(&edges);

    let center = pt(3.0, 1.25);
    assert_is_vertex(center, &sites);
    assert_eq!(endpoints_at(&edges, center), 3);

    // The bisector of the two level sites runs straight up from the bottom
    // of the box to the circumcenter.
    let vertical = edges
        .iter()
        .find(|e| e.is_vertical())
        .expect("no vertical edge");
    let (mut lo, mut hi) = (vertical.start, vertical.end);
    if lo.y > hi.y {
        std::mem::swap(&mut lo, &mut hi);
    }
    assert!(near(lo, pt(3.0, 0.0)));
    assert!(near(hi, center));
}

#[test]
fn two_sites_share_one_bisector_across_the_box() {
    let a = pt(2.0, 2.0);
    let b = pt(6.0, 4.0);
    let edges = edges(&[a, b], 10.0, 10.0).unwrap();

    assert_eq!(edges.len(), 1);
    assert_on_own_line(&edges);

    let e = edges[0];
    assert!((e.f - -2.0).abs() < 1e-9);
    assert!((e.f * 4.0 + e.g - 3.0).abs() < 1e-9, "bisector misses the sites' midpoint");
    assert!(e.start.x.min(e.end.x) <= 0.0);
    assert!(e.start.x.max(e.end.x) >= 10.0);

    let mid = pt((e.start.x + e.end.x) / 2.0, (e.start.y + e.end.y) / 2.0);
    assert!((dist(mid, a) - dist(mid, b)).abs() < 1e-9);
}

#[test]
fn a_center_site_is_fenced_in() {
    // Four corners and an off-center fifth site. The fifth site's region is
    // a quadrilateral: four finite edges between four vertices, plus one
    // clipped edge per pair of adjacent corners.
    let sites = [
        pt(2.0, 2.0),
        pt(8.0, 2.0),
        pt(2.0, 8.0),
        pt(8.0, 8.0),
        pt(5.1, 4.9),
    ];
    let mut v = Voronoi::new();
    let edges = v.edges(&sites, 10.0, 10.0).unwrap();

    assert_eq!(edges.len(), 8);
    assert_on_own_line(&edges);

    assert_eq!(v.vertices().len(), 4);
    for &vertex in v.vertices() {
        assert_is_vertex(vertex, &sites);
        // Each vertex joins the two bisector edges ending there and the one
        // starting there.
        assert!(endpoints_at(&edges, vertex) >= 3);
    }
}

#[test]
fn a_nearly_collinear_row_meets_far_below() {
    // Three sites almost in a row: their common circle is huge and its
    // center, the single diagram vertex, sits thousands of units below the
    // box. The vertex is carried over from the bisector intersection, so it
    // lies exactly on all three incident edges even at this scale.
    let sites = [pt(0.0, 10.0), pt(38.0, 10.2), pt(80.0, 10.05)];
    let mut v = Voronoi::new();
    let edges = v.edges(&sites, 100.0, 100.0).unwrap();

    assert_eq!(edges.len(), 3);
    assert_on_own_line(&edges);

    assert_eq!(v.vertices().len(), 1);
    let vertex = v.vertices()[0];
    assert!(vertex.y < -4000.0, "vertex unexpectedly near the box: {vertex:?}");
    assert_eq!(endpoints_at(&edges, vertex), 3);

    // Equidistant from the two sites whose bisector is exact; the first
    // pair's bisector is seeded at the bottom of the box, which costs a
    // small absolute error this far out.
    let d: Vec<f64> = sites.iter().map(|&s| dist(vertex, s)).collect();
    assert!((d[0] - d[1]).abs() < 1e-3);
    assert!((d[0] - d[2]).abs() < 0.1);
}

#[test]
fn reusing_the_builder_is_deterministic() {
    let sites = [pt(1.0, 2.0), pt(2.0, 3.0), pt(5.0, 1.0), pt(7.0, 6.0)];
    let mut v = Voronoi::new();
    let first = v.edges(&sites, 10.0, 10.0).unwrap();
    let second = v.edges(&sites, 10.0, 10.0).unwrap();
    assert_eq!(first, second);

    let fresh = edges(&sites, 10.0, 10.0).unwrap();
    assert_eq!(first, fresh);
}

#[test]
fn faulty_input_is_reported() {
    assert_eq!(
        edges(&[pt(1.0, 1.0), pt(f64::NAN, 2.0)], 10.0, 10.0),
        Err(Error::NaN)
    );
    assert_eq!(
        edges(&[pt(1.0, f64::INFINITY)], 10.0, 10.0),
        Err(Error::Infinity)
    );
    assert_eq!(
        edges(&[pt(1.0, 1.0), pt(2.0, 2.0), pt(1.0, 1.0)], 10.0, 10.0),
        Err(Error::DuplicateSite(pt(1.0, 1.0)))
    );
}

#[test]
fn small_inputs_have_no_edges() {
    assert_eq!(edges(&[], 10.0, 10.0), Ok(vec![]));
    assert_eq!(edges(&[pt(4.0, 4.0)], 10.0, 10.0), Ok(vec![]));
}

fn jittered_grid(n: usize, spacing: f64) -> Vec<Point> {
    let mut sites = Vec::with_capacity(n * n);
    for i in 0..n {
        for j in 0..n {
            let x = spacing * (i as f64 + 0.5) + (3.7 * i as f64 + 1.3 * j as f64).sin() * 3.0;
            let y = spacing * (j as f64 + 0.5) + (2.1 * i as f64 + 5.3 * j as f64).cos() * 3.0;
            sites.push(pt(x, y));
        }
    }
    sites
}

#[test]
fn a_jittered_grid_smokes_out_the_sweep() {
    let sites = jittered_grid(5, 20.0);
    let mut v = Voronoi::new();
    let edges = v.edges(&sites, 100.0, 100.0).unwrap();

    // Every region borders its neighbors; a diagram this dense has roughly
    // as many edges as a planar graph allows.
    assert!(edges.len() >= sites.len() - 1, "too few edges: {}", edges.len());
    assert!(edges.len() <= 3 * sites.len(), "too many edges: {}", edges.len());
    assert_on_own_line(&edges);

    for &vertex in v.vertices() {
        assert_is_vertex(vertex, &sites);
    }

    let again = v.edges(&sites, 100.0, 100.0).unwrap();
    assert_eq!(edges, again);
}
