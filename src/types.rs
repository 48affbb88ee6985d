use serde::{Deserialize, Deserializer};
use std::fmt;

// The string that marks a source label as excluded in the config's label table
pub const EXCLUSION_MARKER: &str = "x";

/// Where a source label goes in the target taxonomy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "RawLabelTarget")]
pub enum LabelTarget {
    /// Remapped onto the given target class index
    Mapped(u32),
    /// Dropped from the target taxonomy
    Excluded,
}

// On-disk form of a label target: either an integer or the exclusion marker
#[derive(Deserialize)]
#[serde(untagged)]
enum RawLabelTarget {
    Index(u32),
    Marker(String),
}

impl TryFrom<RawLabelTarget> for LabelTarget {
    type Error = String;

    fn try_from(raw: RawLabelTarget) -> Result<Self, Self::Error> {
        match raw {
            RawLabelTarget::Index(index) => Ok(LabelTarget::Mapped(index)),
            RawLabelTarget::Marker(marker) if marker == EXCLUSION_MARKER => {
                Ok(LabelTarget::Excluded)
            }
            RawLabelTarget::Marker(other) => Err(format!(
                "expected a class index or '{}', found '{}'",
                EXCLUSION_MARKER, other
            )),
        }
    }
}

/// A polygon outline in pixel coordinates. Never empty.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "Vec<(f64, f64)>")]
pub struct Polygon(Vec<(f64, f64)>);

impl Polygon {
    /// Returns `None` when `points` is empty.
    pub fn new(points: Vec<(f64, f64)>) -> Option<Self> {
        if points.is_empty() {
            None
        } else {
            Some(Self(points))
        }
    }

    pub fn points(&self) -> &[(f64, f64)] {
        &self.0
    }
}

impl TryFrom<Vec<(f64, f64)>> for Polygon {
    type Error = &'static str;

    fn try_from(points: Vec<(f64, f64)>) -> Result<Self, Self::Error> {
        Polygon::new(points).ok_or("polygon has no points")
    }
}

// A single annotated object; other keys in the source JSON are ignored
#[derive(Debug, Clone, Deserialize)]
pub struct AnnotationObject {
    #[serde(deserialize_with = "label_from_scalar")]
    pub label: String,
    pub polygon: Polygon,
}

// Source labels may be written as strings or bare integers; both key the
// relabel map by their text form, matching how YAML reads `5:` in the config
#[derive(Deserialize)]
#[serde(untagged)]
enum RawLabel {
    Text(String),
    Integer(i64),
}

fn label_from_scalar<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match RawLabel::deserialize(deserializer)? {
        RawLabel::Text(text) => text,
        RawLabel::Integer(index) => index.to_string(),
    })
}

// The content of one per-image annotation file
#[derive(Debug, Clone, Deserialize)]
pub struct AnnotationFile {
    pub objects: Vec<AnnotationObject>,
}

/// Pixel size of an image. Both sides are strictly positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageDimensions {
    height: u32,
    width: u32,
}

impl ImageDimensions {
    /// Returns `None` if either side is zero.
    pub fn new(height: u32, width: u32) -> Option<Self> {
        if height == 0 || width == 0 {
            None
        } else {
            Some(Self { height, width })
        }
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn width(&self) -> u32 {
        self.width
    }
}

/// Normalized center-form bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub x_center: f64,
    pub y_center: f64,
    pub width: f64,
    pub height: f64,
}

/// Target class for a remapped source label.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClassTarget {
    pub index: u32,
    pub name: String,
}

impl ClassTarget {
    pub fn new(index: u32, name: impl Into<String>) -> Self {
        Self {
            index,
            name: name.into(),
        }
    }
}

impl fmt::Display for ClassTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.index, self.name)
    }
}

// Struct to hold per-split processing statistics
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ConversionStats {
    pub files_converted: usize,
    pub objects_written: usize,
    pub objects_skipped: usize,
}

impl ConversionStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_file(&mut self, written: usize, skipped: usize) {
        self.files_converted += 1;
        self.objects_written += written;
        self.objects_skipped += skipped;
    }

    pub fn merge(mut self, other: ConversionStats) -> Self {
        self.files_converted += other.files_converted;
        self.objects_written += other.objects_written;
        self.objects_skipped += other.objects_skipped;
        self
    }

    pub fn print_summary(&self, split: &str) {
        log::info!("=== Conversion Summary ({}) ===", split);
        log::info!("Annotation files converted: {}", self.files_converted);
        log::info!("Objects written: {}", self.objects_written);
        log::info!(
            "Objects skipped (label excluded from target taxonomy): {}",
            self.objects_skipped
        );
        if self.files_converted > 0 && self.objects_written == 0 {
            log::warn!(
                "No objects of interest found in split '{}'; all label files are empty",
                split
            );
        }
    }
}
