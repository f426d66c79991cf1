//! Evidence rectangles in page-image pixel space

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A rectangle `(x1, y1)`-`(x2, y2)` marking where evidence sits on a page image
///
/// Serialized as `{"x1": .., "y1": .., "x2": .., "y2": ..}`. The older
/// annotation GUI wrote `[x1, y1, x2, y2]`; that form is accepted on input.
/// Whole-pixel coordinates are written as JSON integers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BBox {
    /// Left edge
    #[serde(serialize_with = "serialize_coord")]
    pub x1: f64,
    /// Top edge
    #[serde(serialize_with = "serialize_coord")]
    pub y1: f64,
    /// Right edge
    #[serde(serialize_with = "serialize_coord")]
    pub x2: f64,
    /// Bottom edge
    #[serde(serialize_with = "serialize_coord")]
    pub y2: f64,
}

/// Integer value of a whole, in-range coordinate
fn whole(value: f64) -> Option<i64> {
    (value.fract() == 0.0 && value.abs() < i64::MAX as f64).then_some(value as i64)
}

fn serialize_coord<S>(value: &f64, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match whole(*value) {
        Some(n) => serializer.serialize_i64(n),
        None => serializer.serialize_f64(*value),
    }
}

/// Render a coordinate for flat tables: `1` for whole pixels, `12.5` otherwise
///
/// # Examples
///
/// ```
/// use sasb_domain::bbox::format_coord;
///
/// assert_eq!(format_coord(1.0), "1");
/// assert_eq!(format_coord(12.5), "12.5");
/// ```
pub fn format_coord(value: f64) -> String {
    match whole(value) {
        Some(n) => n.to_string(),
        None => value.to_string(),
    }
}

impl BBox {
    /// Create a new rectangle
    pub fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Coordinates in `[x1, y1, x2, y2]` order
    pub fn as_array(&self) -> [f64; 4] {
        [self.x1, self.y1, self.x2, self.y2]
    }

    /// Parse `"x1,y1,x2,y2"`
    ///
    /// # Examples
    ///
    /// ```
    /// use sasb_domain::BBox;
    ///
    /// let bbox = BBox::parse("10,20,110,40").unwrap();
    /// assert_eq!(bbox.as_array(), [10.0, 20.0, 110.0, 40.0]);
    /// assert!(BBox::parse("1,2,3").is_err());
    /// ```
    pub fn parse(s: &str) -> Result<Self, String> {
        let coords = s
            .split(',')
            .map(|part| {
                part.trim()
                    .parse::<f64>()
                    .map_err(|e| format!("Invalid coordinate '{}': {}", part.trim(), e))
            })
            .collect::<Result<Vec<_>, _>>()?;

        match coords.as_slice() {
            [x1, y1, x2, y2] => Ok(Self::new(*x1, *y1, *x2, *y2)),
            _ => Err(format!(
                "Expected 4 coordinates (x1,y1,x2,y2), got {}",
                coords.len()
            )),
        }
    }
}

impl fmt::Display for BBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})-({}, {})", self.x1, self.y1, self.x2, self.y2)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum BBoxRepr {
    Object { x1: f64, y1: f64, x2: f64, y2: f64 },
    List([f64; 4]),
}

impl<'de> Deserialize<'de> for BBox {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match BBoxRepr::deserialize(deserializer)? {
            BBoxRepr::Object { x1, y1, x2, y2 } => BBox::new(x1, y1, x2, y2),
            BBoxRepr::List([x1, y1, x2, y2]) => BBox::new(x1, y1, x2, y2),
        })
    }
}
