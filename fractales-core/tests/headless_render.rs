use fractales_core::{
    Complex, Fractal, Grid, Julia, JuliaMap, Mandelbrot, MandelbrotMap, Region,
};

/// Evaluate every sample of a grid serially, row-major.
fn render_grid<F: Fractal>(fractal: &F, grid: &Grid) -> Vec<u32> {
    let mut results = Vec::with_capacity(grid.len());
    for row in 0..grid.height() {
        for col in 0..grid.width() {
            results.push(fractal.escape_time(grid.point(row, col)));
        }
    }
    results
}

#[test]
fn headless_mandelbrot_render() {
    let mandelbrot = Mandelbrot::new(MandelbrotMap::Classic, 64, 2).unwrap();
    let grid = Grid::square(Region::default_mandelbrot(), 100).unwrap();

    let results = render_grid(&mandelbrot, &grid);

    assert_eq!(results.len(), 100 * 100);
    let interior = results.iter().filter(|&&n| n == 64).count();
    let escaped = results.len() - interior;
    assert!(escaped > 0, "should have some escaped points");
    assert!(interior > 0, "should have some interior points");
    assert!(results.iter().all(|&n| n <= 64));
}

#[test]
fn classic_map_is_conjugate_symmetric() {
    // z² + c commutes with conjugation, so c and its conjugate share an
    // escape time exactly.
    let mandelbrot = Mandelbrot::new(MandelbrotMap::Classic, 80, 2).unwrap();
    let grid = Grid::square(Region::default_mandelbrot(), 31).unwrap();
    for row in 0..grid.height() {
        for col in 0..grid.width() {
            let c = grid.point(row, col);
            let conj = Complex::new(c.re, -c.im);
            assert_eq!(mandelbrot.escape_time(c), mandelbrot.escape_time(conj), "c = {c}");
        }
    }
}

#[test]
fn every_mandelbrot_map_stays_in_budget() {
    let grid = Grid::square(Region::default_mandelbrot(), 24).unwrap();
    for map in MandelbrotMap::ALL {
        for m in [1, 2, 5] {
            let fractal = Mandelbrot::new(map, 20, m).unwrap();
            let results = render_grid(&fractal, &grid);
            assert!(results.iter().all(|&n| n <= 20), "{map:?}, m = {m}");
        }
    }
}

#[test]
fn headless_julia_render() {
    let julia = Julia::new(JuliaMap::Classic, Complex::new(-0.7, 0.27015), 100, 2).unwrap();
    let grid = Grid::aspect_preserving(Region::default_julia(), 80).unwrap();

    let results = render_grid(&julia, &grid);

    assert_eq!(grid.height(), 80);
    assert_eq!(results.len(), 80 * 80);
    assert!(results.iter().any(|&n| n == 100));
    assert!(results.iter().any(|&n| n < 100));
}

#[test]
fn every_julia_map_stays_in_budget() {
    let grid = Grid::aspect_preserving(Region::default_julia(), 20).unwrap();
    for map in JuliaMap::ALL {
        for c in [Complex::ZERO, Complex::new(0.0, -1.0), Complex::new(5.0, 0.0)] {
            let julia = Julia::new(map, c, 15, 2).unwrap();
            let results = render_grid(&julia, &grid);
            assert!(results.iter().all(|&n| n <= 15), "{map:?}, c = {c}");
        }
    }
}

#[test]
fn headless_render_is_deterministic() {
    let mandelbrot = Mandelbrot::new(MandelbrotMap::SinInverseC, 50, 3).unwrap();
    let grid = Grid::square(Region::default_mandelbrot(), 60).unwrap();

    let run1 = render_grid(&mandelbrot, &grid);
    let run2 = render_grid(&mandelbrot, &grid);

    assert_eq!(run1, run2, "two identical renders must produce identical results");
}
