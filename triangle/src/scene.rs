use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::rotation::{
    rotate_with, ClipPosition, Formula, RotationCoefficients, RotationError, Vertex,
};
use crate::{DEFAULT_ANGLE, TRIANGLE};

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0, 1.0);
    pub const RED: Self = Self::new(1.0, 0.0, 0.0, 1.0);

    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }
}

impl From<[f32; 4]> for Color {
    fn from(c: [f32; 4]) -> Self {
        Self::new(c[0], c[1], c[2], c[3])
    }
}

/// Everything the pipeline needs to draw one frame. Built once, never mutated
/// by the renderers.
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub angle: f64,
    pub formula: Formula,
    pub vertices: Vec<Vertex>,
    pub clear_color: Color,
    pub fill_color: Color,
}

impl Default for Scene {
    fn default() -> Self {
        Self {
            angle: DEFAULT_ANGLE,
            formula: Formula::Standard,
            vertices: TRIANGLE.to_vec(),
            clear_color: Color::BLACK,
            fill_color: Color::RED,
        }
    }
}

impl Scene {
    pub fn coefficients(&self) -> Result<RotationCoefficients, RotationError> {
        RotationCoefficients::try_from_degrees(self.angle)
    }

    pub fn clip_positions(&self) -> Result<Vec<ClipPosition>, RotationError> {
        let coefficients = self.coefficients()?;

        Ok(self
            .vertices
            .iter()
            .map(|v| rotate_with(*v, coefficients, self.formula))
            .collect())
    }

    /// Vertex data as a flat `vec2` attribute stream.
    pub fn attribute_data(&self) -> Vec<f32> {
        self.vertices.iter().flat_map(|v| [v.x, v.y]).collect()
    }

    /// Command line values win over the scene file.
    pub fn with_overrides(
        mut self,
        angle: Option<f64>,
        formula: Option<Formula>,
    ) -> Result<Self, LoaderError> {
        if let Some(angle) = angle {
            self.angle = angle;
        }

        if let Some(formula) = formula {
            self.formula = formula;
        }

        self.validate()?;

        Ok(self)
    }

    pub fn validate(&self) -> Result<(), LoaderError> {
        if self.vertices.is_empty() || self.vertices.len() % 3 != 0 {
            return Err(LoaderError::InvalidVertexCount(self.vertices.len()));
        }

        if !self.angle.is_finite() {
            return Err(LoaderError::NonFinite("angle"));
        }

        let coords_finite = self
            .vertices
            .iter()
            .all(|v| v.x.is_finite() && v.y.is_finite() && v.z.is_finite());

        if !coords_finite {
            return Err(LoaderError::NonFinite("vertices"));
        }

        Ok(())
    }
}

#[derive(Deserialize, Debug, Default)]
#[serde(default)]
struct SceneFile {
    angle: Option<f64>,
    formula: Option<Formula>,
    vertices: Option<Vec<[f32; 2]>>,
    clear_color: Option<[f32; 4]>,
    fill_color: Option<[f32; 4]>,
}

pub struct SceneLoader {}

impl SceneLoader {
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Scene, LoaderError> {
        let scene_str = std::fs::read_to_string(path).map_err(LoaderError::InputError)?;

        Self::load_from_str(&scene_str)
    }

    pub fn load_optional(path: Option<&Path>) -> Result<Scene, LoaderError> {
        match path {
            Some(path) => {
                let scene = Self::load_from_path(path)?;
                log::info!("read scene file from {:?}", path);
                Ok(scene)
            }
            None => Ok(Scene::default()),
        }
    }

    /// Missing keys keep the values of [`Scene::default`].
    pub fn load_from_str(scene_str: &str) -> Result<Scene, LoaderError> {
        let file: SceneFile = json5::from_str(scene_str).map_err(LoaderError::FormatError)?;

        let mut scene = Scene::default();

        if let Some(angle) = file.angle {
            scene.angle = angle;
        }

        if let Some(formula) = file.formula {
            scene.formula = formula;
        }

        if let Some(vertices) = file.vertices {
            scene.vertices = vertices.iter().map(|[x, y]| Vertex::new(*x, *y)).collect();
        }

        if let Some(color) = file.clear_color {
            scene.clear_color = color.into();
        }

        if let Some(color) = file.fill_color {
            scene.fill_color = color.into();
        }

        scene.validate()?;

        Ok(scene)
    }
}

#[derive(Debug, Error)]
pub enum LoaderError {
    #[error("cannot read scene file: {0}")]
    InputError(std::io::Error),
    #[error("invalid scene file: {0}")]
    FormatError(json5::Error),
    #[error("vertex count {0} does not form whole triangles")]
    InvalidVertexCount(usize),
    #[error("non-finite value in {0}")]
    NonFinite(&'static str),
}
