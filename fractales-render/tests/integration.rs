use std::sync::Arc;

use fractales_core::{
    escape_time, Complex, EscapeParams, Grid, Julia, JuliaMap, MandelbrotMap, Region,
};
use fractales_render::{
    compute_julia, compute_julia_with, compute_mandelbrot, compute_mandelbrot_with, Palette,
    Progress, ScheduleOptions, Workers,
};

fn region(x: (f64, f64), y: (f64, f64)) -> Region {
    Region::new(x, y).unwrap()
}

fn workers(n: usize) -> ScheduleOptions {
    ScheduleOptions {
        workers: Workers::Fixed(n),
        progress: None,
    }
}

#[test]
fn end_to_end_mandelbrot_scenario() {
    let r = region((-2.0, 1.0), (-1.0, 1.0));
    let out = compute_mandelbrot(r, 200, 50, 0, 2).unwrap();
    let field = &out.field;

    assert_eq!(field.width(), 200);
    assert_eq!(field.height(), 200);

    let grid = Grid::square(r, 200).unwrap();
    let (row, col) = grid.nearest(Complex::new(-1.0, 0.0));
    assert_eq!(field.get(row, col), Some(50), "c = -1 is inside the set");

    let (row, col) = grid.nearest(Complex::new(2.0, 2.0));
    let far = field.get(row, col).unwrap();
    assert!(far < 5, "near 2 + 2i should escape quickly, got {far}");
}

#[test]
fn every_cell_within_budget() {
    for map_id in 0..MandelbrotMap::ALL.len() as u32 {
        let out = compute_mandelbrot(Region::default_mandelbrot(), 32, 25, map_id, 3).unwrap();
        assert!(out.field.data().iter().all(|&n| n <= 25), "map {map_id}");
    }
    for map_id in 0..JuliaMap::ALL.len() as u32 {
        let out = compute_julia(
            Region::default_julia(),
            32,
            25,
            map_id,
            2,
            Complex::new(0.3, -0.4),
        )
        .unwrap();
        assert!(out.field.data().iter().all(|&n| n <= 25), "map {map_id}");
    }
}

#[test]
fn deterministic_across_runs_and_worker_counts() {
    let r = region((-1.5, 0.5), (-1.0, 1.0));
    for map_id in [0, 2, 4, 7, 10] {
        let a = compute_mandelbrot_with(r, 48, 40, map_id, 2, &workers(1)).unwrap();
        let b = compute_mandelbrot_with(r, 48, 40, map_id, 2, &workers(6)).unwrap();
        let c = compute_mandelbrot(r, 48, 40, map_id, 2).unwrap();
        assert_eq!(a.field, b.field, "map {map_id}: 1 vs 6 workers");
        assert_eq!(a.field, c.field, "map {map_id}: repeated run");
    }

    let c = Complex::new(-0.4, 0.6);
    let a = compute_julia_with(Region::default_julia(), 60, 60, 0, 2, c, &workers(1)).unwrap();
    let b = compute_julia_with(Region::default_julia(), 60, 60, 0, 2, c, &workers(4)).unwrap();
    assert_eq!(a.field, b.field);
}

#[test]
fn origin_is_inside_for_classic_map() {
    for k in [1, 7, 50, 1000] {
        let params = EscapeParams::new(k, 2, 2.0).unwrap();
        assert_eq!(
            escape_time(MandelbrotMap::Classic, Complex::ZERO, Complex::ZERO, &params),
            k
        );
    }
}

#[test]
fn far_point_escapes_within_one_step() {
    let params = EscapeParams::new(100, 2, 2.0).unwrap();
    let n = escape_time(
        MandelbrotMap::Classic,
        Complex::ZERO,
        Complex::new(3.0, 3.0),
        &params,
    );
    assert!(n <= 1, "got {n}");
}

#[test]
fn guarded_maps_with_zero_c_run_to_budget() {
    let params = EscapeParams::new(64, 2, 2.0).unwrap();
    for map in MandelbrotMap::ALL {
        if map == MandelbrotMap::Classic {
            continue;
        }
        let n = escape_time(map, Complex::ZERO, Complex::ZERO, &params);
        assert_eq!(n, 64, "{map:?}");
    }
    for map in [JuliaMap::InverseC, JuliaMap::ExpRatio] {
        let n = escape_time(map, Complex::new(0.5, 0.0), Complex::ZERO, &params);
        assert_eq!(n, 64, "{map:?}");
    }
}

#[test]
fn julia_escape_radius_rule() {
    let julia = Julia::new(JuliaMap::Classic, Complex::new(5.0, 0.0), 10, 2).unwrap();
    assert_eq!(fractales_core::Fractal::params(&julia).escape_radius, 5.0);
    assert_eq!(Julia::escape_radius_for(Complex::new(5.0, 0.0)), 5.0);
}

#[test]
fn julia_grid_geometry() {
    let out = compute_julia(
        region((-2.0, 2.0), (-1.0, 1.0)),
        400,
        10,
        0,
        2,
        Complex::new(0.0, -1.0),
    )
    .unwrap();
    assert_eq!(out.field.width(), 400);
    assert_eq!(out.field.height(), 200);
}

#[test]
fn progress_observer_sees_completion() {
    let progress = Arc::new(Progress::new());
    let options = ScheduleOptions {
        workers: Workers::Available,
        progress: Some(Arc::clone(&progress)),
    };
    let out = compute_mandelbrot_with(Region::default_mandelbrot(), 64, 30, 0, 2, &options).unwrap();
    assert_eq!(progress.get(), (64, 64));

    // The observer never changes the result.
    let plain = compute_mandelbrot(Region::default_mandelbrot(), 64, 30, 0, 2).unwrap();
    assert_eq!(out.field, plain.field);
}

#[test]
fn colorize_end_to_end() {
    let out = compute_mandelbrot(Region::default_mandelbrot(), 96, 40, 0, 2).unwrap();
    let buffer = Palette::by_name("hot").unwrap().colorize(&out.field);

    assert_eq!(buffer.pixels.len(), 96 * 96 * 4);
    let distinct: std::collections::HashSet<_> = buffer.pixels.chunks_exact(4).collect();
    assert!(distinct.len() > 2, "image should not be flat");
}
