//! Print every detection and its sharpness for a set of photos.
//!
//! Usage:
//!   cargo run --example debug_face_scores -- <model.bin> <image>...

use std::sync::Arc;

use blurscore::config::DetectorConfig;
use blurscore::{
    select_qualifying, BlurScoreError, FaceDetector, RustfaceDetector, SelectionPolicy,
    SharpnessAnalyzer,
};

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let Some((model_path, images)) = args.split_first() else {
        eprintln!("usage: debug_face_scores <model.bin> <image>...");
        std::process::exit(1);
    };

    let config = DetectorConfig {
        model_path: model_path.into(),
        ..DetectorConfig::default()
    };
    let detector = Arc::new(RustfaceDetector::from_config(&config).expect("failed to load model"));
    let analyzer = SharpnessAnalyzer::new(Box::new(Arc::clone(&detector)));

    for path in images {
        let input = std::fs::read(path).unwrap();
        let image = image::load_from_memory(&input).unwrap();
        let gray = image.to_luma8();
        let (width, height) = (gray.width(), gray.height());

        println!("=== {path} ({width}x{height}) ===");
        println!(
            "  whole image: {:.3}",
            blurscore::score_whole_image(&input).unwrap()
        );

        let detections = detector.detect(gray.as_raw(), width, height);
        if detections.is_empty() {
            println!("  NO FACES DETECTED");
            println!();
            continue;
        }

        println!("  Found {} face(s):", detections.len());
        for (i, det) in detections.iter().enumerate() {
            println!(
                "    face {i}: confidence={:.2}, center=({}, {}), scale={}",
                det.confidence, det.col, det.row, det.scale
            );
        }

        match select_qualifying(&detections, width, height, &SelectionPolicy::default()) {
            Ok(regions) => println!("  {} face(s) large enough to score", regions.len()),
            Err(e) => println!("  {e}"),
        }

        match analyzer.analyze_faces(&input) {
            Ok(faces) => {
                for face in faces {
                    println!(
                        "  → {:?}: sharpness {:.3}",
                        face.region.visible, face.score
                    );
                }
            }
            Err(BlurScoreError::NoQualifyingFace) => println!("  → all faces too small"),
            Err(e) => println!("  → error: {e}"),
        }
        println!();
    }
}
