pub mod framebuffer;
pub mod logging;
pub mod raster;
pub mod rotation;
pub mod scene;

use crate::rotation::Vertex;

pub const DEFAULT_ANGLE: f64 = 90.0;

/// Process exit code of both binaries when setup fails.
pub const EXIT_FAILURE: i32 = -1;

#[rustfmt::skip]
pub const TRIANGLE: [Vertex; 3] = [
    Vertex::new(0.0, 0.5),
    Vertex::new(-0.5, -0.5),
    Vertex::new(0.5, -0.5),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failure_exit_code() {
        // both binaries share it, and it must never read as success
        assert_ne!(EXIT_FAILURE, 0);
        assert_eq!(EXIT_FAILURE, -1);
    }
}
