use cgmath::Vector2;

use crate::framebuffer::{FrameBuffer, Pixel};
use crate::rotation::{ClipPosition, RotationError};
use crate::scene::Scene;

/// Software stand-in for the GL pipeline: the same vertex transform,
/// a `glViewport(0, 0, w, h)` mapping and a solid fill.
#[derive(Default)]
pub struct Rasterizer {}

impl Rasterizer {
    pub fn new() -> Self {
        Self {}
    }

    /// Clears `fb` and draws every triangle of `scene` under `scene.formula`.
    /// Returns the number of pixels written.
    pub fn draw(&self, scene: &Scene, fb: &mut FrameBuffer) -> Result<usize, RotationError> {
        fb.clear(scene.clear_color);

        let positions = scene.clip_positions()?;
        let mut covered = 0;

        for tri in positions.chunks_exact(3) {
            covered += self.fill_triangle(fb, [tri[0], tri[1], tri[2]], scene);
        }

        log::debug!("rasterized {} triangle(s), {covered} px", positions.len() / 3);

        Ok(covered)
    }

    fn fill_triangle(&self, fb: &mut FrameBuffer, tri: [ClipPosition; 3], scene: &Scene) -> usize {
        let (w, h) = (fb.width() as f32, fb.height() as f32);
        let [a, b, c] = tri.map(|p| to_viewport(p, w, h));

        let mut area = edge(a, b, c);

        if area == 0.0 || !area.is_finite() {
            return 0;
        }

        // normalise winding so inside is positive
        let (b, c) = if area < 0.0 {
            area = -area;
            (c, b)
        } else {
            (b, c)
        };

        let min_x = a.x.min(b.x).min(c.x).floor().max(0.0) as usize;
        let min_y = a.y.min(b.y).min(c.y).floor().max(0.0) as usize;
        let max_x = (a.x.max(b.x).max(c.x).ceil().min(w) as usize).min(fb.width());
        let max_y = (a.y.max(b.y).max(c.y).ceil().min(h) as usize).min(fb.height());

        let color = Pixel::from(scene.fill_color);
        let mut covered = 0;

        for y in min_y..max_y {
            for x in min_x..max_x {
                let p = Vector2::new(x as f32 + 0.5, y as f32 + 0.5);

                let inside = edge(b, c, p) >= 0.0 && edge(c, a, p) >= 0.0 && edge(a, b, p) >= 0.0;

                if inside {
                    if let Some(pixel) = fb.pixel_mut(x, y) {
                        *pixel = color;
                        covered += 1;
                    }
                }
            }
        }

        log::trace!("triangle area {area} px, covered {covered} px");

        covered
    }
}

fn to_viewport(p: ClipPosition, width: f32, height: f32) -> Vector2<f32> {
    let (ndc_x, ndc_y) = (p.x / p.w, p.y / p.w);

    Vector2::new((ndc_x + 1.0) * 0.5 * width, (1.0 - ndc_y) * 0.5 * height)
}

/// Twice the signed area of `a b p`.
fn edge(a: Vector2<f32>, b: Vector2<f32>, p: Vector2<f32>) -> f32 {
    (b.x - a.x) * (p.y - a.y) - (b.y - a.y) * (p.x - a.x)
}
