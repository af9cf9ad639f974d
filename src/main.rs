use brd_viewer::config::Config;
use brd_viewer::document::DocumentNode;
use brd_viewer::file_info::parse_file_url;
use brd_viewer::render::{Renderer, to_outline};
use brd_viewer::upload::{UploadCheck, supported_formats_label, validate_upload};
use brd_viewer::view::{BrdRecord, PageRenderer};
use std::env;
use std::fs;
use std::process::ExitCode;

fn usage(program: &str) {
    eprintln!("Usage:");
    eprintln!("  {} extract <google-url>          Print the file id and type as JSON", program);
    eprintln!("  {} render <brd.json>             Print a BRD body as an outline", program);
    eprintln!("  {} page <record.json> [out.html] Render a stored BRD record as HTML", program);
    eprintln!("  {} check <filename>              Check a file name against the upload formats", program);
    eprintln!("Upload formats: {}", supported_formats_label());
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = env::args().collect();
    let program = args.first().map(String::as_str).unwrap_or("brd-viewer");

    if args.len() < 3 {
        usage(program);
        return ExitCode::from(2);
    }

    let config = Config::load();
    let renderer = Renderer::with_max_depth(config.max_depth);

    let result = match args[1].as_str() {
        "extract" => extract(&args[2]),
        "render" => render(&args[2], renderer),
        "check" => check(&args[2]),
        "page" => page(&args[2], args.get(3).map(String::as_str), renderer),
        _ => {
            usage(program);
            return ExitCode::from(2);
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn extract(url: &str) -> Result<(), Box<dyn std::error::Error>> {
    let reference = parse_file_url(url)?;
    println!("{}", serde_json::to_string(&reference)?);
    Ok(())
}

fn check(filename: &str) -> Result<(), Box<dyn std::error::Error>> {
    let kind = validate_upload(filename)
        .map_err(|e| format!("{} (supported: {})", e, supported_formats_label()))?;
    println!("{}", serde_json::to_string(&UploadCheck::from(kind))?);
    Ok(())
}

fn render(path: &str, renderer: Renderer) -> Result<(), Box<dyn std::error::Error>> {
    let contents = fs::read_to_string(path)?;
    let node = DocumentNode::from_json_str(&contents)?;

    // Accept either a bare BRD body or a full stored record
    let body = match node.get("brd") {
        Some(brd) if node.get("id").is_some() => brd.clone(),
        _ => node,
    };

    print!("{}", to_outline(&renderer.render(&body)));
    Ok(())
}

fn page(path: &str, out: Option<&str>, renderer: Renderer) -> Result<(), Box<dyn std::error::Error>> {
    let contents = fs::read_to_string(path)?;
    let record = BrdRecord::from_json_str(&contents)?;
    let html = PageRenderer::new(renderer)?.render(&record)?;

    match out {
        Some(out) => {
            fs::write(out, html)?;
            log::info!("wrote {}", out);
        }
        None => println!("{}", html),
    }
    Ok(())
}
