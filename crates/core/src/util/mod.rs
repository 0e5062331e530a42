pub mod range;
pub mod unit;

/// A macro to measure the evaluation time of an expression. Wraps an
/// expression, logs how long it took to evaluate, and returns the value of the
/// expression.
#[macro_export]
macro_rules! timed {
    ($label:expr, $ex:expr) => {
        $crate::timed!($label, log::Level::Debug, $ex)
    };
    ($label:expr, $log_level:expr, $ex:expr) => {{
        let now = std::time::Instant::now();
        let value = $ex;
        let elapsed = now.elapsed();
        log::log!($log_level, "{} took {} ms", $label, elapsed.as_millis());
        value
    }};
}

/// Number of vertices in one row (or column) of the height lattice for a grid
/// with `size` tiles per side. Tiles share corners, so there's always one more
/// vertex than there are tiles.
pub fn lattice_width(size: u16) -> usize {
    size as usize + 1
}

/// Total number of tiles in a square grid with `size` tiles per side.
pub fn grid_len(size: u16) -> usize {
    let size = size as usize;
    size * size
}
