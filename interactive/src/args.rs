use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use triangle::rotation::Formula;
use triangle::scene::{LoaderError, Scene, SceneLoader};

#[derive(Debug, Parser)]
pub struct ArgsInteractive {
    /// Path to a JSON5 scene file, the reference scene is used without one
    #[arg()]
    pub scene: Option<PathBuf>,
    /// Rotation angle in degrees, overrides the scene file
    #[arg(short, long, allow_negative_numbers = true)]
    pub angle: Option<f64>,
    /// How the vertex stage computes y', overrides the scene file
    #[arg(short, long, value_enum)]
    pub formula: Option<FormulaArg>,
    /// Initial width of the window
    #[arg(long, default_value_t = 400)]
    pub width: u32,
    /// Initial height of the window
    #[arg(long, default_value_t = 400)]
    pub height: u32,
}

impl ArgsInteractive {
    pub fn scene(&self) -> Result<Scene, LoaderError> {
        SceneLoader::load_optional(self.scene.as_deref())?
            .with_overrides(self.angle, self.formula.map(Into::into))
    }
}

#[derive(Copy, Clone, Debug, ValueEnum)]
pub enum FormulaArg {
    Standard,
    Skewed,
}

impl From<FormulaArg> for Formula {
    fn from(f: FormulaArg) -> Self {
        match f {
            FormulaArg::Standard => Self::Standard,
            FormulaArg::Skewed => Self::Skewed,
        }
    }
}
