use clap::Parser;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;
use yolodecode::io::load_input_tensor;
use yolodecode::{Anchor, Detection, DetectorConfig, LabelSet, Pipeline};

const SCHEMA_JSON: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/config.schema.json"));
const EXAMPLE_JSON: &str =
    include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/config.example.json"));

#[derive(Parser, Debug)]
#[command(author, version, about = "YOLO output decoder CLI (JSON config driven)")]
struct Cli {
    /// Path to the JSON configuration file.
    #[arg(short, long, value_name = "FILE", default_value = "config.json")]
    config: PathBuf,
    /// Print the JSON schema and exit.
    #[arg(long)]
    print_schema: bool,
    /// Print an example config and exit.
    #[arg(long)]
    print_example: bool,
    /// Enable tracing output for performance profiling.
    #[arg(long)]
    trace: bool,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct DetectorConfigJson {
    labels: Vec<String>,
    anchors: Vec<[f64; 2]>,
    stride: usize,
    max_results: usize,
    class_confidence_floor: f64,
    nms_confidence_floor: f64,
    nms_overlap_threshold: f64,
    parallel: bool,
}

impl Default for DetectorConfigJson {
    fn default() -> Self {
        let cfg = DetectorConfig::default();
        Self {
            labels: cfg.labels.iter().map(str::to_string).collect(),
            anchors: cfg.anchors.iter().map(|a| [a.width, a.height]).collect(),
            stride: cfg.stride,
            max_results: cfg.max_results,
            class_confidence_floor: cfg.class_confidence_floor,
            nms_confidence_floor: cfg.nms_confidence_floor,
            nms_overlap_threshold: cfg.nms_overlap_threshold,
            parallel: cfg.parallel,
        }
    }
}

impl From<DetectorConfigJson> for DetectorConfig {
    fn from(value: DetectorConfigJson) -> Self {
        DetectorConfig::default()
            .with_labels(LabelSet::new(value.labels))
            .with_anchors(
                value
                    .anchors
                    .into_iter()
                    .map(|[w, h]| Anchor::new(w, h))
                    .collect::<Vec<_>>(),
            )
            .with_stride(value.stride)
            .with_max_results(value.max_results)
            .with_class_confidence_floor(value.class_confidence_floor)
            .with_nms(value.nms_confidence_floor, value.nms_overlap_threshold)
            .with_parallel(value.parallel)
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct Config {
    tensor_path: String,
    image_path: Option<String>,
    image_width: usize,
    image_height: usize,
    output_path: Option<String>,
    detector: DetectorConfigJson,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tensor_path: String::new(),
            image_path: None,
            image_width: 416,
            image_height: 416,
            output_path: None,
            detector: DetectorConfigJson::default(),
        }
    }
}

#[derive(Debug, Serialize)]
struct DetectionRecord {
    id: usize,
    label: String,
    confidence: f32,
    left: f32,
    top: f32,
    right: f32,
    bottom: f32,
}

impl From<Detection> for DetectionRecord {
    fn from(value: Detection) -> Self {
        Self {
            id: value.id,
            label: value.label.to_string(),
            confidence: value.confidence,
            left: value.bbox.left,
            top: value.bbox.top,
            right: value.bbox.right,
            bottom: value.bbox.bottom,
        }
    }
}

#[derive(Debug, Serialize)]
struct Output {
    image_width: usize,
    image_height: usize,
    count: usize,
    detections: Vec<DetectionRecord>,
}

/// Reads raw little-endian `f32` values from `.bin` files, JSON arrays otherwise.
fn load_tensor(path: &Path) -> Result<Vec<f32>, Box<dyn std::error::Error>> {
    if path.extension().is_some_and(|ext| ext == "bin") {
        let bytes = fs::read(path)?;
        if bytes.len() % 4 != 0 {
            return Err(format!(
                "{}: length {} is not a multiple of 4 bytes",
                path.display(),
                bytes.len()
            )
            .into());
        }
        return Ok(bytes
            .chunks_exact(4)
            .map(|chunk| f32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
            .collect());
    }
    let text = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&text)?)
}

/// Frame size the tensor was produced for: taken from `image_path` when set.
fn frame_size(config: &Config) -> Result<(usize, usize), Box<dyn std::error::Error>> {
    match &config.image_path {
        Some(path) => {
            let input = load_input_tensor(path)?;
            tracing::info!(path = %path, width = input.width, height = input.height, "frame image loaded");
            Ok((input.width, input.height))
        }
        None => Ok((config.image_width, config.image_height)),
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    if cli.trace {
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env().add_directive("yolodecode=debug".parse()?))
            .with_target(false)
            .init();
    }

    if cli.print_schema {
        println!("{SCHEMA_JSON}");
        return Ok(());
    }
    if cli.print_example {
        println!("{EXAMPLE_JSON}");
        return Ok(());
    }

    let config_text = fs::read_to_string(&cli.config)?;
    let config: Config = serde_json::from_str(&config_text)?;
    if config.tensor_path.is_empty() {
        return Err("tensor_path must be set in the config".into());
    }
    let (image_width, image_height) = frame_size(&config)?;
    if image_width == 0 || image_height == 0 {
        return Err("image_width and image_height must be positive".into());
    }

    let tensor = load_tensor(Path::new(&config.tensor_path))?;
    let pipeline = Pipeline::new(config.detector.into())?;
    let detections = pipeline.process(&tensor, image_width, image_height)?;

    let detections: Vec<DetectionRecord> =
        detections.into_iter().map(DetectionRecord::from).collect();
    let output = Output {
        image_width,
        image_height,
        count: detections.len(),
        detections,
    };
    let json = serde_json::to_string_pretty(&output)?;

    match config.output_path {
        Some(path) => fs::write(path, json)?,
        None => println!("{json}"),
    }

    Ok(())
}
