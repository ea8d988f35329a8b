use image_pose::{format_report, PoseReport};
use stance_base::{init_stdout_logger, log, log_fatal};
use stance_image::decode_rgb;
use stance_infer::{ModelSource, OnnxBackend, PoseConfig, YoloPoseEstimator};
use std::env;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

const CONFIG_ENV: &str = "STANCE_CONFIG";
const DEFAULT_OUTPUT: &str = "output_poses.json";

fn print_usage() {
    println!("Usage: image-pose <model-path> <image-path> [output-path]");
    println!();
    println!("Arguments:");
    println!("  model-path   : YOLO pose model in ONNX format");
    println!("  image-path   : Input image (jpeg, png, bmp, gif, tiff, webp)");
    println!("  output-path  : JSON report of the detections (default: {DEFAULT_OUTPUT})");
    println!();
    println!("Set {CONFIG_ENV} to a JSON file to override thresholds and model size.");
}

fn load_config() -> Result<PoseConfig, Box<dyn std::error::Error>> {
    match env::var(CONFIG_ENV) {
        Ok(path) => {
            log::info!("using config {}", path);
            Ok(PoseConfig::from_file(path)?)
        }
        Err(_) => Ok(PoseConfig::default()),
    }
}

async fn run(model_path: PathBuf, image_path: &Path, output_path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config()?;

    let bytes = tokio::fs::read(image_path).await?;
    let image = decode_rgb(&bytes)?;
    log::info!("image {} is {:?}", image_path.display(), image.shape);

    let mut estimator =
        YoloPoseEstimator::new(ModelSource::File(model_path), &OnnxBackend)?.with_config(config)?;
    let poses = estimator.estimate(&image)?;

    print!("{}", format_report(&poses));

    let report = PoseReport::new(image_path.display().to_string(), &poses);
    tokio::fs::write(output_path, report.to_json()?).await?;
    println!("\nReport written to {}", output_path.display());

    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    init_stdout_logger();

    println!("Image Pose Estimation");
    println!("=====================\n");

    let args: Vec<String> = env::args().skip(1).collect();
    if args.len() < 2 {
        print_usage();
        return ExitCode::FAILURE;
    }

    let model_path = PathBuf::from(&args[0]);
    let image_path = PathBuf::from(&args[1]);
    let output_path = PathBuf::from(args.get(2).map(String::as_str).unwrap_or(DEFAULT_OUTPUT));

    for (what, path) in [("Model", &model_path), ("Image", &image_path)] {
        if !path.is_file() {
            eprintln!("Error: {what} file not found: {}", path.display());
            return ExitCode::FAILURE;
        }
    }

    match run(model_path, &image_path, &output_path).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => log_fatal!("Error: {}", e),
    }
}
