#![forbid(unsafe_code)]

//! Grid configuration.
//!
//! [`GridGeometry`] holds the four numbers every layout pass reads. They are
//! constant for the lifetime of a style and only change through
//! [`GridConfig::apply_style_json`] or an explicit resize notification.
//!
//! The host serialises its style as a JSON document of string values grouped
//! by section:
//!
//! ```json
//! { "ScrollMode": { "MaxRowCount": "6", "Animation": "True" },
//!   "Size": { "ScrollCellWidth": "65" } }
//! ```

use std::fmt;
use std::time::Duration;

use serde::Deserialize;

/// Default delay between the visual shrink and the data discard of a collapse.
///
/// Stays under the host's resize animation budget.
pub const DEFAULT_COLLAPSE_DELAY: Duration = Duration::from_millis(290);

/// Shape of the scrolling grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridGeometry {
    /// Rows visible in the viewport at once.
    pub max_rows: usize,
    /// Layout units per row.
    pub max_columns: usize,
    /// Width of one layout unit in pixels.
    pub cell_unit_width: f32,
    /// Height of a single-line row in pixels.
    pub row_height: f32,
}

impl Default for GridGeometry {
    fn default() -> Self {
        Self {
            max_rows: 6,
            max_columns: 6,
            cell_unit_width: 65.0,
            row_height: 30.0,
        }
    }
}

impl GridGeometry {
    /// Full row width in pixels.
    #[inline]
    #[must_use]
    pub fn row_width(&self) -> f32 {
        self.max_columns as f32 * self.cell_unit_width
    }

    /// Candidates requested by one prefetch.
    #[inline]
    #[must_use]
    pub const fn page_len(&self) -> usize {
        self.max_rows * self.max_columns
    }

    /// Candidates requested when expanding: the visible page plus one hidden row.
    #[inline]
    #[must_use]
    pub const fn expand_len(&self) -> usize {
        (self.max_rows + 1) * self.max_columns
    }

    /// Layout units a cell of `width` pixels occupies, capped at `max_columns`.
    ///
    /// Every cell occupies at least one unit.
    #[must_use]
    pub fn units_for(&self, width: f32) -> usize {
        let units = (width / self.cell_unit_width).ceil();
        if units.is_nan() || units < 1.0 {
            return 1;
        }
        (units as usize).min(self.max_columns)
    }

    /// Reject geometry no layout can satisfy.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_rows == 0 {
            return Err(ConfigError::ZeroRows);
        }
        if self.max_columns == 0 {
            return Err(ConfigError::ZeroColumns);
        }
        if !self.cell_unit_width.is_finite() || self.cell_unit_width <= 0.0 {
            return Err(ConfigError::InvalidUnitWidth(self.cell_unit_width));
        }
        if !self.row_height.is_finite() || self.row_height < 0.0 {
            return Err(ConfigError::InvalidRowHeight(self.row_height));
        }
        Ok(())
    }
}

/// How the pointer hovering a cell affects its markers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HoverBehavior {
    /// Hover changes nothing.
    #[default]
    None,
    /// The highlight marker follows the pointer.
    Move,
    /// A separate hover marker follows the pointer.
    Add,
}

/// Where row structure comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LayoutMode {
    /// The engine measures candidates and places cells itself.
    #[default]
    Flow,
    /// The host renders cells and reports their boxes back.
    Measured,
}

/// Complete configuration for one panel instance.
#[derive(Debug, Clone, PartialEq)]
pub struct GridConfig {
    pub geometry: GridGeometry,
    /// Animate the collapse (shrink first, discard after `collapse_delay`).
    pub animation: bool,
    pub collapse_delay: Duration,
    pub hover: HoverBehavior,
    pub layout_mode: LayoutMode,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            geometry: GridGeometry::default(),
            animation: true,
            collapse_delay: DEFAULT_COLLAPSE_DELAY,
            hover: HoverBehavior::None,
            layout_mode: LayoutMode::Flow,
        }
    }
}

impl GridConfig {
    /// Create a configuration with defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_geometry(mut self, geometry: GridGeometry) -> Self {
        self.geometry = geometry;
        self
    }

    #[must_use]
    pub fn with_animation(mut self, animation: bool) -> Self {
        self.animation = animation;
        self
    }

    #[must_use]
    pub fn with_collapse_delay(mut self, delay: Duration) -> Self {
        self.collapse_delay = delay;
        self
    }

    #[must_use]
    pub fn with_hover(mut self, hover: HoverBehavior) -> Self {
        self.hover = hover;
        self
    }

    #[must_use]
    pub fn with_layout_mode(mut self, mode: LayoutMode) -> Self {
        self.layout_mode = mode;
        self
    }

    /// Validate the geometry.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.geometry.validate()
    }

    /// Build a configuration from a host style document, starting from defaults.
    pub fn from_style_json(json: &str) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        config.apply_style_json(json)?;
        Ok(config)
    }

    /// Overlay a host style document onto this configuration.
    ///
    /// Keys absent from the document keep their current value. On error the
    /// configuration is left untouched.
    pub fn apply_style_json(&mut self, json: &str) -> Result<(), ConfigError> {
        let doc: StyleDocument =
            serde_json::from_str(json).map_err(|e| ConfigError::Json(e.to_string()))?;

        let mut next = self.clone();
        let scroll = doc.scroll_mode;
        if let Some(v) = scroll.max_row_count {
            next.geometry.max_rows = parse_usize("ScrollMode.MaxRowCount", &v)?;
        }
        if let Some(v) = scroll.max_column_count {
            next.geometry.max_columns = parse_usize("ScrollMode.MaxColumnCount", &v)?;
        }
        if let Some(v) = scroll.animation {
            next.animation = parse_bool("ScrollMode.Animation", &v)?;
        }
        if let Some(v) = scroll.hover_behavior {
            next.hover = match v.as_str() {
                "None" => HoverBehavior::None,
                "Move" => HoverBehavior::Move,
                "Add" => HoverBehavior::Add,
                _ => return Err(ConfigError::invalid("ScrollMode.HoverBehavior", &v)),
            };
        }
        let size = doc.size;
        if let Some(v) = size.scroll_cell_width {
            next.geometry.cell_unit_width = parse_f32("Size.ScrollCellWidth", &v)?;
        }
        if let Some(v) = size.scroll_row_height {
            next.geometry.row_height = parse_f32("Size.ScrollRowHeight", &v)?;
        }

        next.validate()?;
        *self = next;
        Ok(())
    }
}

#[derive(Debug, Default, Deserialize)]
struct StyleDocument {
    #[serde(rename = "ScrollMode", default)]
    scroll_mode: ScrollModeSection,
    #[serde(rename = "Size", default)]
    size: SizeSection,
}

#[derive(Debug, Default, Deserialize)]
struct ScrollModeSection {
    #[serde(rename = "MaxRowCount")]
    max_row_count: Option<String>,
    #[serde(rename = "MaxColumnCount")]
    max_column_count: Option<String>,
    #[serde(rename = "Animation")]
    animation: Option<String>,
    #[serde(rename = "HoverBehavior")]
    hover_behavior: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct SizeSection {
    #[serde(rename = "ScrollCellWidth")]
    scroll_cell_width: Option<String>,
    #[serde(rename = "ScrollRowHeight")]
    scroll_row_height: Option<String>,
}

fn parse_usize(key: &'static str, value: &str) -> Result<usize, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::invalid(key, value))
}

fn parse_f32(key: &'static str, value: &str) -> Result<f32, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::invalid(key, value))
}

fn parse_bool(key: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim() {
        "True" | "true" => Ok(true),
        "False" | "false" => Ok(false),
        _ => Err(ConfigError::invalid(key, value)),
    }
}

/// Configuration rejected.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// The style document is not valid JSON of the expected shape.
    Json(String),
    /// A value could not be parsed for its key.
    InvalidValue { key: &'static str, value: String },
    /// `max_rows` is zero.
    ZeroRows,
    /// `max_columns` is zero.
    ZeroColumns,
    /// Unit width must be positive and finite.
    InvalidUnitWidth(f32),
    /// Row height must be non-negative and finite.
    InvalidRowHeight(f32),
}

impl ConfigError {
    fn invalid(key: &'static str, value: &str) -> Self {
        Self::InvalidValue {
            key,
            value: value.to_owned(),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json(msg) => write!(f, "malformed style document: {msg}"),
            Self::InvalidValue { key, value } => write!(f, "invalid value {value:?} for {key}"),
            Self::ZeroRows => write!(f, "max_rows must be at least 1"),
            Self::ZeroColumns => write!(f, "max_columns must be at least 1"),
            Self::InvalidUnitWidth(w) => write!(f, "cell unit width must be positive, got {w}"),
            Self::InvalidRowHeight(h) => write!(f, "row height must be non-negative, got {h}"),
        }
    }
}

impl std::error::Error for ConfigError {}
