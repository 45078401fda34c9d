//! Shared test utilities for the radar plotter workspace.
//!
//! - Test data path helpers and a skip macro for optional files
//! - Synthetic radar volumes
//! - An in-memory [`radar_common::VolumeSource`]
//! - Logo and font fixtures
//!
//! ```toml
//! [dev-dependencies]
//! test-utils = { path = "../test-utils" }
//! ```

pub mod fixtures;
pub mod generators;
pub mod paths;

pub use fixtures::*;
pub use generators::*;
pub use paths::*;

/// Return early from a test when an optional data file is absent.
///
/// ```ignore
/// let path = test_utils::require_test_file!("20220902-233911_Reflectividad.nc");
/// ```
#[macro_export]
macro_rules! require_test_file {
    ($name:expr) => {{
        match $crate::find_test_file($name) {
            Some(path) => path,
            None => {
                eprintln!(
                    "SKIPPED: Test file '{}' not found. Set TEST_DATA_DIR to a directory with radar scans.",
                    $name
                );
                return;
            }
        }
    }};
}

/// Return early from a test when no TrueType font is available.
#[macro_export]
macro_rules! require_font {
    () => {{
        match $crate::find_system_font() {
            Some(path) => path,
            None => {
                eprintln!("SKIPPED: no TrueType font found. Set TEST_FONT to a .ttf file.");
                return;
            }
        }
    }};
}

/// Approximate floating-point equality.
#[macro_export]
macro_rules! assert_approx_eq {
    ($left:expr, $right:expr, $epsilon:expr) => {{
        let left: f64 = $left as f64;
        let right: f64 = $right as f64;
        let epsilon: f64 = $epsilon as f64;
        let diff = (left - right).abs();
        if diff > epsilon {
            panic!(
                "assertion failed: `(left ≈ right)`\n  left: `{:?}`,\n right: `{:?}`,\n  diff: `{:?}` > epsilon `{:?}`",
                left, right, diff, epsilon
            );
        }
    }};
}

#[cfg(test)]
mod tests {
    #[test]
    fn test_assert_approx_eq_passes() {
        assert_approx_eq!(33700.0, 33700.4, 0.5);
        assert_approx_eq!(-8.0_f32, -8.0_f32, 0.0);
    }

    #[test]
    #[should_panic(expected = "assertion failed")]
    fn test_assert_approx_eq_fails() {
        assert_approx_eq!(1.1, 1.0, 0.001);
    }
}
