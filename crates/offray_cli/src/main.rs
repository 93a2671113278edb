//! `offray <mesh.off>`: render an OFF mesh to `<mesh>.ppm`.

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{bail, Context, Result};
use offray_core::off::{has_off_extension, load_off};
use offray_renderer::{frame_mesh, render, save_ppm, Camera, FramingConfig, RenderConfig};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(err) = run() {
        eprintln!("Error: {err:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let input = parse_args(&args)?;
    let output = output_path(&input);

    let start = Instant::now();
    let mut mesh = load_off(&input).with_context(|| format!("Failed to load {}", input.display()))?;
    log::info!(
        "Loaded {} vertices, {} triangles in {:?}",
        mesh.vertex_count(),
        mesh.triangle_count(),
        start.elapsed()
    );

    frame_mesh(&mut mesh, &FramingConfig::default());

    let camera = Camera::new();
    let config = RenderConfig::default();

    log::info!(
        "Rendering {}x{} with 4 samples per pixel...",
        camera.image_width,
        camera.image_height
    );
    let start = Instant::now();
    let image = render(&camera, &mesh, &config);
    log::info!("Rendered in {:?}", start.elapsed());

    save_ppm(&image, &output).with_context(|| format!("Failed to write {}", output.display()))?;
    log::info!("Saved to {}", output.display());

    Ok(())
}

/// Validate the command line: exactly one argument naming an `.off` file.
fn parse_args(args: &[String]) -> Result<PathBuf> {
    let program = args.first().map(String::as_str).unwrap_or("offray");
    let [_, input] = args else {
        bail!("Usage: {} <mesh.off>", program);
    };

    let input = PathBuf::from(input);
    if !has_off_extension(&input) {
        bail!("{} is not an OFF file", input.display());
    }
    Ok(input)
}

/// `models/bunny.off` -> `models/bunny.ppm`
fn output_path(input: &Path) -> PathBuf {
    input.with_extension("ppm")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_args_accepts_off_file() {
        let input = parse_args(&args(&["offray", "models/bunny.off"])).unwrap();
        assert_eq!(input, PathBuf::from("models/bunny.off"));
    }

    #[test]
    fn test_parse_args_requires_exactly_one_argument() {
        let err = parse_args(&args(&["offray"])).unwrap_err();
        assert!(err.to_string().starts_with("Usage:"));

        assert!(parse_args(&args(&["offray", "a.off", "b.off"])).is_err());
    }

    #[test]
    fn test_parse_args_rejects_other_extensions() {
        let err = parse_args(&args(&["offray", "bunny.obj"])).unwrap_err();
        assert!(err.to_string().contains("not an OFF file"));

        assert!(parse_args(&args(&["offray", "bunny"])).is_err());
    }

    #[test]
    fn test_output_path_swaps_extension() {
        assert_eq!(output_path(Path::new("models/bunny.off")), PathBuf::from("models/bunny.ppm"));
        assert_eq!(output_path(Path::new("cube.OFF")), PathBuf::from("cube.ppm"));
    }

    #[test]
    fn test_missing_file_reports_context() {
        let err = load_off("no/such/mesh.off")
            .with_context(|| "Failed to load no/such/mesh.off")
            .unwrap_err();
        assert!(format!("{err:#}").starts_with("Failed to load no/such/mesh.off: IO error"));
    }
}
