//! End-to-end CLI tests: run the built binary on local inputs.
//!
//! No test here touches the network: images come in through `--image`.

use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};
use std::io::Cursor;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

fn bin() -> Command {
    Command::new(env!("CARGO_BIN_EXE_image-editor-pro"))
}

fn write_png(path: &Path, width: u32, height: u32, rgba: [u8; 4]) {
    let img = RgbaImage::from_pixel(width, height, Rgba(rgba));
    let mut buf = Cursor::new(Vec::new());
    DynamicImage::ImageRgba8(img)
        .write_to(&mut buf, ImageFormat::Png)
        .unwrap();
    std::fs::write(path, buf.into_inner()).unwrap();
}

fn render(tmp: &TempDir, params: serde_json::Value, image: Option<&Path>) -> Output {
    let params_path = tmp.path().join("params.json");
    std::fs::write(&params_path, params.to_string()).unwrap();

    let mut cmd = bin();
    cmd.arg("render")
        .arg(&params_path)
        .arg("--output")
        .arg(tmp.path().join("out.png"));
    if let Some(image) = image {
        cmd.arg("--image").arg(image);
    }
    cmd.output().expect("failed to run image-editor-pro")
}

fn stdout(out: &Output) -> String {
    String::from_utf8_lossy(&out.stdout).into_owned()
}

fn stderr(out: &Output) -> String {
    String::from_utf8_lossy(&out.stderr).into_owned()
}

#[test]
fn collage_from_local_image() {
    let tmp = TempDir::new().unwrap();
    let red = tmp.path().join("red.png");
    write_png(&red, 40, 10, [255, 0, 0, 255]);

    let out = render(
        &tmp,
        serde_json::json!({
            "mode": "collage",
            "rows": 1,
            "columns": 2,
            "spacing": 4,
            "backgroundColor": "#00ff00"
        }),
        Some(&red),
    );
    assert!(out.status.success(), "{}", stderr(&out));

    let img = image::open(tmp.path().join("out.png")).unwrap().to_rgba8();
    assert_eq!(img.dimensions(), (604, 300));
    assert_eq!(img.get_pixel(150, 150).0, [255, 0, 0, 255]);
    // Gutter and the empty second cell are background.
    assert_eq!(img.get_pixel(302, 150).0, [0, 255, 0, 255]);
    assert_eq!(img.get_pixel(450, 150).0, [0, 255, 0, 255]);

    let summary = stdout(&out);
    assert!(summary.starts_with("Collage → "), "{summary}");
    assert!(summary.contains("Input: 1 image (1 inline)"), "{summary}");
    assert!(summary.contains("Size: 604×300"), "{summary}");
}

#[test]
fn text_overlay_keeps_base_dimensions() {
    let tmp = TempDir::new().unwrap();
    let base = tmp.path().join("base.png");
    write_png(&base, 120, 80, [255, 255, 255, 255]);

    let out = render(
        &tmp,
        serde_json::json!({
            "mode": "addText",
            "text": "Hi",
            "fontSize": 20,
            "textBackgroundShape": "rectangle",
            "textBackgroundColor": "#0000ff",
            "shapeWidth": 40,
            "shapeHeight": 30,
            "position": "custom",
            "customX": 60,
            "customY": 40
        }),
        Some(&base),
    );
    assert!(out.status.success(), "{}", stderr(&out));

    let img = image::open(tmp.path().join("out.png")).unwrap().to_rgba8();
    assert_eq!(img.dimensions(), (120, 80));
    // Rectangle spans (40..80, 25..55); corners stay outside the glyphs.
    assert_eq!(img.get_pixel(42, 27).0, [0, 0, 255, 255]);
    assert_eq!(img.get_pixel(10, 10).0, [255, 255, 255, 255]);
}

#[test]
fn text_watermark_renders() {
    let tmp = TempDir::new().unwrap();
    let base = tmp.path().join("base.png");
    write_png(&base, 200, 100, [10, 20, 30, 255]);

    let out = render(
        &tmp,
        serde_json::json!({
            "mode": "addWatermark",
            "watermarkText": "© test",
            "position": "bottom-right",
            "opacity": 0.5
        }),
        Some(&base),
    );
    assert!(out.status.success(), "{}", stderr(&out));
    assert!(stdout(&out).contains("Watermark: \"© test\" at bottom-right, opacity 0.5"));
}

#[test]
fn missing_input_fails_without_output() {
    let tmp = TempDir::new().unwrap();
    let out = render(&tmp, serde_json::json!({"mode": "collage"}), None);

    assert!(!out.status.success());
    assert!(stderr(&out).contains("NoInput"), "{}", stderr(&out));
    assert!(!tmp.path().join("out.png").exists());
}

#[test]
fn unknown_mode_fails() {
    let tmp = TempDir::new().unwrap();
    let base = tmp.path().join("base.png");
    write_png(&base, 10, 10, [0, 0, 0, 255]);

    let out = render(&tmp, serde_json::json!({"mode": "resize"}), Some(&base));
    assert!(!out.status.success());
    assert!(stderr(&out).contains("UnsupportedMode"), "{}", stderr(&out));
}

#[test]
fn invalid_config_is_rejected() {
    let tmp = TempDir::new().unwrap();
    let base = tmp.path().join("base.png");
    write_png(&base, 10, 10, [0, 0, 0, 255]);
    let config = tmp.path().join("config.toml");
    std::fs::write(&config, "[fonts]\nfamly = \"serif\"\n").unwrap();
    let params = tmp.path().join("params.json");
    std::fs::write(&params, r#"{"mode": "collage"}"#).unwrap();

    let out = bin()
        .arg("--config")
        .arg(&config)
        .arg("render")
        .arg(&params)
        .arg("--image")
        .arg(&base)
        .arg("--output")
        .arg(tmp.path().join("out.png"))
        .output()
        .unwrap();
    assert!(!out.status.success());
}

#[test]
fn schema_prints_every_parameter() {
    let out = bin().arg("schema").output().unwrap();
    assert!(out.status.success());

    let json: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    let names: Vec<&str> = json["parameters"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["name"].as_str().unwrap())
        .collect();
    assert!(names.contains(&"imageUrls"));
    assert!(names.contains(&"textAlignInShape"));
    assert!(names.contains(&"watermarkImageUrl"));
}

#[test]
fn gen_config_round_trips_through_config_flag() {
    let tmp = TempDir::new().unwrap();
    let out = bin().arg("gen-config").output().unwrap();
    assert!(out.status.success());

    let config = tmp.path().join("config.toml");
    std::fs::write(&config, &out.stdout).unwrap();
    let base = tmp.path().join("base.png");
    write_png(&base, 10, 10, [0, 0, 0, 255]);
    let params = tmp.path().join("params.json");
    std::fs::write(&params, r#"{"mode": "collage", "rows": 1, "columns": 1}"#).unwrap();

    let out = bin()
        .arg("--config")
        .arg(&config)
        .arg("render")
        .arg(&params)
        .arg("--image")
        .arg(&base)
        .arg("--output")
        .arg(tmp.path().join("out.png"))
        .output()
        .unwrap();
    assert!(out.status.success(), "{}", stderr(&out));
}
