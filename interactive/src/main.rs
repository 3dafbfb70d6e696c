use clap::Parser;

use triangle::logging::{init_logging, DEFAULT_FILTER};
use triangle::EXIT_FAILURE;

mod app;
mod args;
mod pipeline;
mod shaders;

use app::{App, AppError};
use args::ArgsInteractive;
use pipeline::Pipeline;
use shaders::ShaderSources;

fn main() {
    init_logging(DEFAULT_FILTER);

    // clion needs help in trait annotation
    let args = <ArgsInteractive as Parser>::parse();

    if let Err(e) = run(args) {
        log::error!("{e}");
        std::process::exit(EXIT_FAILURE);
    }
}

/// Context, shaders, buffers and uniforms, in that order. The first failure
/// aborts the rest.
fn run(args: ArgsInteractive) -> Result<(), AppError> {
    let scene = args.scene()?;

    let app = App::new(args.width, args.height)?;
    let pipeline = Pipeline::new(&scene, ShaderSources::for_formula(scene.formula))?;

    app.run(pipeline)
}
