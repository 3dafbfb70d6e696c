use clap::{Parser, ValueEnum};

use std::path::PathBuf;

use triangle::rotation::Formula;
use triangle::scene::{LoaderError, Scene, SceneLoader};

#[derive(Debug, Parser)]
pub struct Args {
    /// Path to a JSON5 scene file, the reference scene is used without one
    #[arg()]
    pub scene: Option<PathBuf>,
    /// Rotation angle in degrees, overrides the scene file
    #[arg(short, long, allow_negative_numbers = true)]
    pub angle: Option<f64>,
    /// How y' is computed, overrides the scene file
    #[arg(short, long, value_enum)]
    pub formula: Option<FormulaArg>,
    /// Width of the output image
    #[arg(long, default_value_t = 400, value_parser = clap::value_parser!(u32).range(1..))]
    pub width: u32,
    /// Height of the output image
    #[arg(long, default_value_t = 400, value_parser = clap::value_parser!(u32).range(1..))]
    pub height: u32,
    /// Path to save render to
    #[arg(short, long, default_value_os_t = PathBuf::from("out.png"))]
    pub output: PathBuf,
    /// Print clip-space positions as JSON instead of rendering
    #[arg(short, long)]
    pub print: bool,
}

impl Args {
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let args = Args::try_parse_from(["triangle-cli"]).unwrap();

        assert_eq!(args.output, PathBuf::from("out.png"));
        assert!(!args.print);
        assert_eq!(args.scene().unwrap(), Scene::default());
    }

    #[test]
    fn overrides() {
        let args = Args::try_parse_from([
            "triangle-cli",
            "-a",
            "450",
            "-f",
            "skewed",
            "--width",
            "64",
            "--print",
        ])
        .unwrap();
        let scene = args.scene().unwrap();

        assert_eq!(scene.angle, 450.0);
        assert_eq!(scene.formula, Formula::Skewed);
        assert_eq!(args.width, 64);
        assert!(args.print);

        assert!(Args::try_parse_from(["triangle-cli", "-f", "sideways"]).is_err());
    }

    #[test]
    fn rejects_bad_sizes() {
        assert!(Args::try_parse_from(["triangle-cli", "--width", "0"]).is_err());
        assert!(Args::try_parse_from(["triangle-cli", "--height", "0"]).is_err());
        assert!(Args::try_parse_from(["triangle-cli", "--width", "4294967296"]).is_err());
        assert!(
            Args::try_parse_from(["triangle-cli", "--width", "18446744073709551615"]).is_err()
        );

        let args = Args::try_parse_from(["triangle-cli", "--width", "4294967295"]).unwrap();
        assert_eq!(args.width, u32::MAX);
    }
}
