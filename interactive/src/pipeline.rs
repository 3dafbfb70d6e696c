use gl_wrapper::geometry::{Geometry, GeometryBuilder, VertexAttribute};
use gl_wrapper::program::{Program, ProgramBuilder};
use gl_wrapper::renderer::GlRenderer;

use triangle::scene::{Color, Scene};

use crate::app::AppError;
use crate::shaders::*;

/// GL objects for the scene, set up once. Every frame draws the same thing.
pub struct Pipeline {
    program: Program,
    geometry: Geometry,
    clear_color: Color,
    renderer: GlRenderer,
}

impl Pipeline {
    /// Needs a current GL context.
    pub fn new(scene: &Scene, sources: ShaderSources) -> Result<Self, AppError> {
        let program = ProgramBuilder::new(sources.vertex, sources.fragment)
            .build()
            .map_err(AppError::ShaderInitialization)?;

        log::debug!("shaders ready for {:?} formula", scene.formula);

        let position = program
            .attribute_location(ATTR_POSITION)
            .map_err(|e| AppError::ResourceCreation(e.to_string()))?;

        let data = scene.attribute_data();
        let geometry = GeometryBuilder::new(&data)
            .with_attribute(position, VertexAttribute::Vec2)
            .build()
            .map_err(|e| AppError::ResourceCreation(e.to_string()))?;

        let coefficients = scene.coefficients()?;

        let lookup = |name: &str| {
            program
                .uniform_location(name)
                .map_err(|e| AppError::ResourceCreation(e.to_string()))
        };

        let u_cos = lookup(UNIFORM_COS)?;
        let u_sin = lookup(UNIFORM_SIN)?;
        let u_color = lookup(UNIFORM_COLOR)?;

        program.set_float(u_cos, coefficients.cos);
        program.set_float(u_sin, coefficients.sin);

        let fill = scene.fill_color;
        program.set_vec4(u_color, [fill.r, fill.g, fill.b, fill.a]);

        log::info!(
            "rotating {} vertices by {} deg (cos {:.4}, sin {:.4})",
            geometry.vertices(),
            scene.angle,
            coefficients.cos,
            coefficients.sin
        );

        Ok(Self {
            program,
            geometry,
            clear_color: scene.clear_color,
            renderer: GlRenderer::new(),
        })
    }

    pub fn draw(&mut self) {
        let c = self.clear_color;

        self.renderer.clear_color(c.r, c.g, c.b, c.a);
        self.renderer.draw(&self.geometry, &self.program);
    }

    pub fn resize(&self, width: u32, height: u32) {
        self.renderer.resize(width, height);
    }
}
