use blurscore::BlurScoreConfig;
use std::env;
use std::path::PathBuf;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        print_usage();
        std::process::exit(1);
    }

    let command = &args[1];
    match command.as_str() {
        "score" => cmd_score(&args),
        "face-score" => cmd_face_score(&args),
        "crop-face" => cmd_crop_face(&args),
        "draw-faces" => cmd_draw_faces(&args),
        _ => {
            eprintln!("Unknown command: {}", command);
            print_usage();
            std::process::exit(1);
        }
    }
}

fn print_usage() {
    eprintln!("Usage: blurscore-cli <command> [args]");
    eprintln!("  score <image> [--json]");
    eprintln!("  face-score <image> [--config <toml>] [--json]");
    eprintln!("  crop-face <image> <out.png> [--config <toml>]");
    eprintln!("  draw-faces <image> <out.png> [--config <toml>]");
}

/// Positional arguments after the command, plus the optional flags.
struct Invocation {
    positional: Vec<String>,
    config: Option<PathBuf>,
    json: bool,
}

fn parse_invocation(args: &[String]) -> Result<Invocation, Box<dyn std::error::Error>> {
    let mut positional = Vec::new();
    let mut config = None;
    let mut json = false;

    let mut i = 2;
    while i < args.len() {
        match args[i].as_str() {
            "--config" => {
                i += 1;
                let path = args.get(i).ok_or("--config requires a path")?;
                config = Some(PathBuf::from(path));
            }
            "--json" => json = true,
            other => positional.push(other.to_string()),
        }
        i += 1;
    }

    Ok(Invocation {
        positional,
        config,
        json,
    })
}

fn load_config(inv: &Invocation) -> Result<BlurScoreConfig, Box<dyn std::error::Error>> {
    match &inv.config {
        Some(path) => Ok(BlurScoreConfig::load_from_file(path)?),
        None => Ok(BlurScoreConfig::load_or_default()),
    }
}

fn read_input(inv: &Invocation, usage: &str) -> Result<Vec<u8>, Box<dyn std::error::Error>> {
    let Some(path) = inv.positional.first() else {
        eprintln!("Usage: blurscore-cli {}", usage);
        std::process::exit(1);
    };
    Ok(std::fs::read(path)?)
}

fn output_path(inv: &Invocation, usage: &str) -> PathBuf {
    match inv.positional.get(1) {
        Some(path) => PathBuf::from(path),
        None => {
            eprintln!("Usage: blurscore-cli {}", usage);
            std::process::exit(1);
        }
    }
}

fn print_score(score: f64, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    if json {
        println!(
            "{}",
            serde_json::to_string(&serde_json::json!({ "sharpness_score": score }))?
        );
    } else {
        println!("{:.4}", score);
    }
    Ok(())
}

fn cmd_score(args: &[String]) -> Result<(), Box<dyn std::error::Error>> {
    let inv = parse_invocation(args)?;
    let input = read_input(&inv, "score <image> [--json]")?;
    let score = blurscore::score_whole_image(&input)?;
    print_score(score, inv.json)
}

#[cfg(feature = "rustface")]
fn analyzer(inv: &Invocation) -> Result<blurscore::SharpnessAnalyzer, Box<dyn std::error::Error>> {
    let config = load_config(inv)?;
    Ok(blurscore::SharpnessAnalyzer::from_config(&config)?)
}

#[cfg(not(feature = "rustface"))]
fn analyzer(inv: &Invocation) -> Result<blurscore::SharpnessAnalyzer, Box<dyn std::error::Error>> {
    let _ = load_config(inv)?;
    Err("face commands require the `rustface` feature".into())
}

fn cmd_face_score(args: &[String]) -> Result<(), Box<dyn std::error::Error>> {
    let usage = "face-score <image> [--config <toml>] [--json]";
    let inv = parse_invocation(args)?;
    let input = read_input(&inv, usage)?;
    let analyzer = analyzer(&inv)?;

    if inv.json {
        let faces = analyzer.analyze_faces(&input)?;
        let best = faces.iter().map(|f| f.score).fold(0.0_f64, f64::max);
        let faces: Vec<_> = faces
            .iter()
            .map(|f| {
                serde_json::json!({
                    "row": f.region.detection.row,
                    "col": f.region.detection.col,
                    "scale": f.region.detection.scale,
                    "confidence": f.region.detection.confidence,
                    "sharpness_score": f.score,
                })
            })
            .collect();
        println!(
            "{}",
            serde_json::to_string(&serde_json::json!({
                "sharpness_score": best,
                "faces": faces,
            }))?
        );
        Ok(())
    } else {
        let score = analyzer.score_face_region(&input)?;
        print_score(score, false)
    }
}

fn cmd_crop_face(args: &[String]) -> Result<(), Box<dyn std::error::Error>> {
    let usage = "crop-face <image> <out.png> [--config <toml>]";
    let inv = parse_invocation(args)?;
    let input = read_input(&inv, usage)?;
    let out = output_path(&inv, usage);

    let png = analyzer(&inv)?.crop_largest_face(&input)?;
    std::fs::write(&out, png)?;
    println!("Wrote {}", out.display());
    Ok(())
}

fn cmd_draw_faces(args: &[String]) -> Result<(), Box<dyn std::error::Error>> {
    let usage = "draw-faces <image> <out.png> [--config <toml>]";
    let inv = parse_invocation(args)?;
    let input = read_input(&inv, usage)?;
    let out = output_path(&inv, usage);

    let png = analyzer(&inv)?.draw_face_rectangles(&input)?;
    std::fs::write(&out, png)?;
    println!("Wrote {}", out.display());
    Ok(())
}
