mod common;

use common::{arena, polygon, q5, rasterizer, Recorder};

use cwr::{calculate_alpha, FillingRule, Scanline};

#[test]
fn render_twice_is_identical() {
    common::init();
    let mut arena = arena(30, 500);
    let mut ras = rasterizer(&mut arena, 30);
    polygon(&mut ras, &[(3.25, 1.5), (27.0, 8.75), (11.5, 26.0)]);
    let mut first = Recorder::default();
    assert!(ras.render(&mut first));
    let n = ras.num_cells();
    let mut second = Recorder::default();
    assert!(ras.render(&mut second));
    assert_eq!(first, second);
    assert_eq!(ras.num_cells(), n);
    assert!(! first.spans.is_empty());
}

#[test]
fn too_complex_never_reverts() {
    common::init();
    let mut arena = arena(40, 40);
    let mut ras = rasterizer(&mut arena, 40);
    ras.move_to(q5(1.0), q5(1.0));
    let mut flags = vec![];
    for i in 0 .. 40 {
        let x = if i % 2 == 0 { 38.5 } else { 1.5 };
        ras.line_to(q5(x), q5(1.0 + f64::from(i) * 0.9));
        flags.push(ras.was_outline_too_complex());
    }
    assert!(flags.last().copied().unwrap_or(false));
    let first = flags.iter().position(|&f| f).unwrap();
    assert!(flags[first ..].iter().all(|&f| f));
    assert!(! ras.render(&mut Recorder::default()));

    // A reset gives a fresh start with the same capacity
    ras.reset();
    assert!(! ras.was_outline_too_complex());
    polygon(&mut ras, &[(1.0, 1.0), (3.0, 1.0), (3.0, 3.0)]);
    assert!(ras.render(&mut Recorder::default()));
}

#[test]
fn span_equals_cells() {
    let (mut c1, mut s1, mut n1) = (vec![0u8; 16], vec![0u16; 18], vec![0u16; 18]);
    let (mut c2, mut s2, mut n2) = (vec![0u8; 16], vec![0u16; 18], vec![0u16; 18]);
    let mut a = Scanline::new(&mut c1, &mut s1, &mut n1, 16);
    let mut b = Scanline::new(&mut c2, &mut s2, &mut n2, 16);

    a.add_cell(1, 7, 90);
    a.add_span(2, 7, 5, 200);
    a.add_span(12, 7, 8, 40);
    b.add_cell(1, 7, 90);
    for i in 0 .. 5 {
        b.add_cell(2 + i, 7, 200);
    }
    for i in 0 .. 8 {
        b.add_cell(12 + i, 7, 40);
    }
    let sa : Vec<_> = a.spans().collect();
    let sb : Vec<_> = b.spans().collect();
    assert_eq!(sa, sb);
    assert_eq!(sa.len(), 2);
    assert_eq!(sa[0].x, 1);
    assert_eq!(sa[0].len(), 6);
    assert_eq!(sa[1].covers, &[40, 40, 40, 40][..]);
}

#[test]
fn alpha_in_range_for_any_area() {
    let mut area = i32::MIN;
    for _ in 0 .. 100_000 {
        let cover = (i64::from(area) >> 3).abs();
        let nz = calculate_alpha(FillingRule::NonZero, area);
        assert_eq!(i64::from(nz), cover.min(255), "{}", area);

        let mut eo = cover & 511;
        if eo > 256 {
            eo = 512 - eo;
        }
        assert_eq!(i64::from(calculate_alpha(FillingRule::EvenOdd, area)), eo.min(255), "{}", area);
        area = area.wrapping_add(42_949);
    }
    assert_eq!(calculate_alpha(FillingRule::NonZero, i32::MAX), 255);
    assert_eq!(calculate_alpha(FillingRule::EvenOdd, i32::MAX), 1);
}

/// Area of `pts` between rows `y0` and `y1`
fn band_area(pts: &[(f64, f64)], y0: f64, y1: f64) -> f64 {
    fn clip(pts: &[(f64, f64)], inside: &dyn Fn(f64) -> bool, y: f64) -> Vec<(f64, f64)> {
        let mut out = vec![];
        for i in 0 .. pts.len() {
            let p = pts[i];
            let q = pts[(i + 1) % pts.len()];
            if inside(p.1) {
                out.push(p);
            }
            if inside(p.1) != inside(q.1) {
                let t = (y - p.1) / (q.1 - p.1);
                out.push((p.0 + t * (q.0 - p.0), y));
            }
        }
        out
    }
    let pts = clip(pts, &|y| y >= y0, y0);
    let pts = clip(&pts, &|y| y <= y1, y1);
    let n = pts.len();
    let mut a = 0.0;
    for i in 0 .. n {
        let (x1, y1) = pts[i];
        let (x2, y2) = pts[(i + 1) % n];
        a += x1 * y2 - x2 * y1;
    }
    (a / 2.0).abs()
}

#[test]
fn coverage_matches_polygon_area() {
    common::init();
    let shapes : [&[(f64, f64)]; 3] = [
        &[(2.5, 1.0), (17.25, 3.5), (14.0, 12.75), (4.0, 9.5)],
        &[(0.0, 0.0), (10.0, 0.0), (0.0, 10.0)],
        &[(3.0, 2.0), (18.5, 2.0), (10.0, 7.0), (18.5, 13.25), (3.0, 13.25)],
    ];
    for pts in shapes.iter() {
        let mut arena = arena(20, 1000);
        let mut ras = rasterizer(&mut arena, 20);
        polygon(&mut ras, pts);
        let mut rec = Recorder::default();
        assert!(ras.render(&mut rec));
        for y in 0 .. 20 {
            let want = band_area(pts, f64::from(y), f64::from(y + 1));
            let got = rec.coverage(y);
            assert!((want - got).abs() < 0.25, "row {} want {} got {}", y, want, got);
        }
    }
}

#[test]
fn cells_stay_in_render_area() {
    common::init();
    let mut arena = arena(10, 500);
    let mut ras = rasterizer(&mut arena, 6);
    polygon(&mut ras, &[(-5.0, -5.0), (25.0, -3.0), (12.0, 30.0)]);
    let mut rec = Recorder::default();
    assert!(ras.render(&mut rec));
    assert!(! rec.spans.is_empty());
    for (y, x, covers) in &rec.spans {
        assert!(*y >= 0 && *y < 6);
        assert!(*x >= 0 && x + covers.len() as i32 <= 10);
    }
}
