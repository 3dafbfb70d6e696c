use criterion::{criterion_group, criterion_main, Criterion};

use triangle::framebuffer::FrameBuffer;
use triangle::raster::Rasterizer;
use triangle::scene::Scene;

pub fn reference_scene(c: &mut Criterion) {
    let scene = Scene::default();
    let rasterizer = Rasterizer::new();
    let mut fb = FrameBuffer::new(400, 400);

    c.bench_function("raster_400", |b| {
        b.iter(|| rasterizer.draw(&scene, &mut fb))
    });
}

criterion_group!(benches, reference_scene);
criterion_main!(benches);
