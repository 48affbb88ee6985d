#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use vistas2yolo::SplitPaths;

pub fn bmp_bytes(width: u32, height: u32) -> Vec<u8> {
    let row_stride = (width * 3).div_ceil(4) * 4;
    let pixel_array_size = row_stride * height;
    let file_size = 54 + pixel_array_size;

    let mut bytes = Vec::with_capacity(file_size as usize);
    bytes.extend_from_slice(b"BM");
    bytes.extend_from_slice(&file_size.to_le_bytes());
    bytes.extend_from_slice(&[0, 0, 0, 0]);
    bytes.extend_from_slice(&54u32.to_le_bytes());

    bytes.extend_from_slice(&40u32.to_le_bytes());
    bytes.extend_from_slice(&(width as i32).to_le_bytes());
    bytes.extend_from_slice(&(height as i32).to_le_bytes());
    bytes.extend_from_slice(&1u16.to_le_bytes());
    bytes.extend_from_slice(&24u16.to_le_bytes());
    bytes.extend_from_slice(&0u32.to_le_bytes());
    bytes.extend_from_slice(&pixel_array_size.to_le_bytes());
    bytes.extend_from_slice(&2835u32.to_le_bytes());
    bytes.extend_from_slice(&2835u32.to_le_bytes());
    bytes.extend_from_slice(&0u32.to_le_bytes());
    bytes.extend_from_slice(&0u32.to_le_bytes());

    bytes.resize(file_size as usize, 0);
    bytes
}

pub fn write_bmp(path: &Path, width: u32, height: u32) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create parent dir");
    }
    fs::write(path, bmp_bytes(width, height)).expect("write bmp file");
}

pub fn write_text(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create parent dir");
    }
    fs::write(path, content).expect("write text file");
}

/// Layout used by the tests: `<root>/<split>/v2.0/{polygons,yolo}` and
/// `<root>/<split>/images` with `.bmp` images.
pub fn split_paths(root: &Path, split: &str) -> SplitPaths {
    SplitPaths {
        name: split.to_string(),
        annotations_dir: root.join(split).join("v2.0").join("polygons"),
        images_dir: root.join(split).join("images"),
        output_dir: root.join(split).join("v2.0").join("yolo"),
        image_extension: "bmp".to_string(),
    }
}

/// Write one annotated image into `split`: its polygon JSON and a blank BMP.
pub fn add_sample(split: &SplitPaths, stem: &str, annotation_json: &str, width: u32, height: u32) {
    write_text(
        &split.annotations_dir.join(format!("{stem}.json")),
        annotation_json,
    );
    write_bmp(&split.images_dir.join(format!("{stem}.bmp")), width, height);
}

pub fn label_file(split: &SplitPaths, stem: &str) -> PathBuf {
    split.output_dir.join(format!("{stem}.txt"))
}

/// Config file pointing at `root`, with BMP images and a small label table.
pub fn config_yaml(root: &Path) -> String {
    format!(
        "vistas_path: '{}'\n\
         image_extension: bmp\n\
         labels:\n\
         \x20 construction--flat--road: 0\n\
         \x20 construction--flat--service-lane: 0\n\
         \x20 object--vehicle--car: 1\n\
         \x20 animal--bird: x\n\
         relabels:\n\
         \x20 0: road\n\
         \x20 1: car\n",
        root.display()
    )
}

pub const STREET_SCENE: &str = r#"{
  "width": 200,
  "height": 100,
  "objects": [
    {"id": 1, "label": "construction--flat--road", "polygon": [[0, 50], [200, 50], [200, 100], [0, 100]]},
    {"id": 2, "label": "animal--bird", "polygon": [[10, 10], [12, 10], [11, 12]]},
    {"id": 3, "label": "object--vehicle--car", "polygon": [[40, 60], [80, 60], [80, 90], [40, 90]]}
  ]
}"#;

pub const STREET_SCENE_LABELS: &str = "0 0.5000000 0.7500000 1.0000000 0.5000000\n\
                                       1 0.3000000 0.7500000 0.2000000 0.3000000\n";
