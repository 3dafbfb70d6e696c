use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use clap::Parser;

use thiserror::Error;

use triangle::framebuffer::{FrameBuffer, FrameBufferError};
use triangle::logging::{init_logging, DEFAULT_FILTER};
use triangle::EXIT_FAILURE;
use triangle::raster::Rasterizer;
use triangle::rotation::RotationError;
use triangle::scene::{LoaderError, Scene};

mod args;

use args::Args;

fn main() {
    init_logging(DEFAULT_FILTER);

    // clion needs help in trait annotation
    let args = <Args as Parser>::parse();

    if let Err(e) = run(&args) {
        log::error!("{e}");
        std::process::exit(EXIT_FAILURE);
    }
}

fn run(args: &Args) -> Result<(), CliError> {
    let scene = args.scene()?;

    if args.print {
        let stdout = std::io::stdout();
        return print_positions(&scene, &mut stdout.lock());
    }

    let mut fb = FrameBuffer::try_new(args.width as usize, args.height as usize)?;

    let covered = Rasterizer::new().draw(&scene, &mut fb)?;

    write_out(&fb, &args.output)?;

    log::info!(
        "wrote {:?} ({}x{}, {covered} px filled)",
        args.output,
        args.width,
        args.height
    );

    Ok(())
}

fn print_positions<W: Write>(scene: &Scene, out: &mut W) -> Result<(), CliError> {
    let positions = scene.clip_positions()?;

    serde_json::to_writer_pretty(&mut *out, &positions)?;
    writeln!(out)?;

    Ok(())
}

fn write_out(fb: &FrameBuffer, name: &Path) -> Result<(), CliError> {
    let (width, height) = match (u32::try_from(fb.width()), u32::try_from(fb.height())) {
        (Ok(w), Ok(h)) => (w, h),
        _ => return Err(FrameBufferError::TooLarge(fb.width(), fb.height()).into()),
    };

    let file = File::create(name)?;
    let writer = BufWriter::new(file);

    let mut encoder = png::Encoder::new(writer, width, height);
    encoder.set_color(png::ColorType::Rgba);
    encoder.set_depth(png::BitDepth::Eight);

    let mut writer = encoder.write_header()?;
    writer.write_image_data(&fb.to_rgba8())?;
    writer.finish()?;

    Ok(())
}

#[derive(Debug, Error)]
enum CliError {
    #[error("could not read scene description: {0}")]
    Scene(#[from] LoaderError),
    #[error(transparent)]
    Rotation(#[from] RotationError),
    #[error(transparent)]
    FrameBuffer(#[from] FrameBufferError),
    #[error("could not write output: {0}")]
    Output(#[from] std::io::Error),
    #[error("could not encode image: {0}")]
    Encoding(#[from] png::EncodingError),
    #[error("could not serialize positions: {0}")]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prints_one_position_per_vertex() {
        let mut out = Vec::new();
        print_positions(&Scene::default(), &mut out).unwrap();

        let json: serde_json::Value = serde_json::from_slice(&out).unwrap();
        let positions = json.as_array().unwrap();

        assert_eq!(positions.len(), 3);

        for p in positions {
            assert_eq!(p["w"], 1.0);
            assert_eq!(p["z"], 0.0);
        }

        // quarter turn moves the tip to the left
        let tip_x = positions[0]["x"].as_f64().unwrap();
        assert!((tip_x + 0.5).abs() < 1e-6);
    }

    #[test]
    fn writes_png() {
        let path = std::env::temp_dir().join(format!("triangle-cli-{}.png", std::process::id()));

        let mut fb = FrameBuffer::new(32, 16);
        Rasterizer::new().draw(&Scene::default(), &mut fb).unwrap();
        write_out(&fb, &path).unwrap();

        let decoder = png::Decoder::new(File::open(&path).unwrap());
        let mut reader = decoder.read_info().unwrap();
        let mut buf = vec![0; reader.output_buffer_size()];
        let info = reader.next_frame(&mut buf).unwrap();

        assert_eq!((info.width, info.height), (32, 16));
        assert_eq!(&buf[..info.buffer_size()], &fb.to_rgba8()[..]);

        std::fs::remove_file(path).unwrap();
    }
}
