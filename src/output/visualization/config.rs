//! Plot configuration shared across chart functions

use plotters::prelude::*;

/// Configuration for customizing plots
///
/// # Fields
///
/// - `width`, `height`: Dimensions in pixels
/// - `title`: Plot title
/// - `xlabel`, `ylabel`: Axis labels (an empty `ylabel` falls back to the quantity label)
/// - `line_color`: Color of the primary series
/// - `secondary_color`: Color of the right-axis series in dual-axis charts
/// - `series_colors`: Optional palette for panels with several series
/// - `background`: Background color
/// - `line_width`: Line thickness in pixels
/// - `show_grid`: Whether to show grid lines
///
/// # Example
///
/// ```rust
/// use solar_still::output::visualization::PlotConfig;
/// use plotters::prelude::*;
///
/// let mut config = PlotConfig::time_series("Omara still, 14 July");
/// config.line_color = BLUE;
/// config.width = 1920;
/// config.height = 1080;
/// assert_eq!(config.xlabel, "Hour");
/// ```
#[derive(Debug, Clone)]
pub struct PlotConfig {
    /// Image width in pixels (default: 1024)
    pub width: u32,

    /// Image height in pixels (default: 768)
    pub height: u32,

    /// Plot title (default: "Plot")
    pub title: String,

    /// X-axis label (default: "Hour")
    pub xlabel: String,

    /// Y-axis label (default: empty, i.e. the plotted quantity's label)
    pub ylabel: String,

    /// Primary series color (default: orange)
    pub line_color: RGBColor,

    /// Secondary series color (default: BLUE)
    pub secondary_color: RGBColor,

    /// Optional palette for multi-series panels
    pub series_colors: Option<Vec<RGBColor>>,

    /// Background color (default: WHITE)
    pub background: RGBColor,

    /// Line width in pixels (default: 2)
    pub line_width: u32,

    /// Show grid lines (default: true)
    pub show_grid: bool,
}

/// Orange used for irradiance
pub const SOLAR_ORANGE: RGBColor = RGBColor(255, 140, 0);

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            width: 1024,
            height: 768,
            title: "Plot".to_string(),
            xlabel: "Hour".to_string(),
            ylabel: String::new(),
            line_color: SOLAR_ORANGE,
            secondary_color: BLUE,
            series_colors: None,
            background: WHITE,
            line_width: 2,
            show_grid: true,
        }
    }
}

/// Helper trait to accept both `String` and `None` for optional titles
pub trait IntoOptionalTitle {
    fn into_optional_title(self) -> Option<String>;
}

impl IntoOptionalTitle for &str {
    fn into_optional_title(self) -> Option<String> {
        Some(self.to_string())
    }
}

impl IntoOptionalTitle for String {
    fn into_optional_title(self) -> Option<String> {
        Some(self)
    }
}

impl<T: IntoOptionalTitle> IntoOptionalTitle for Option<T> {
    fn into_optional_title(self) -> Option<String> {
        self.and_then(|t| t.into_optional_title())
    }
}

/// Constant for no title (default title will be used)
///
/// ```rust
/// use solar_still::output::visualization::{PlotConfig, NO_TITLE};
///
/// let config = PlotConfig::time_series(NO_TITLE);
/// assert_eq!(config.title, "Solar Still");
/// ```
pub const NO_TITLE: Option<&str> = None;

impl PlotConfig {
    /// Config for a chart against the hour of simulation
    ///
    /// Title defaults to "Solar Still".
    pub fn time_series(title: impl IntoOptionalTitle) -> Self {
        Self {
            title: title
                .into_optional_title()
                .unwrap_or_else(|| "Solar Still".to_string()),
            ..Default::default()
        }
    }

    /// Config for the eight-panel dashboard
    ///
    /// Larger canvas; title defaults to "Solar Still Dashboard".
    pub fn dashboard(title: impl IntoOptionalTitle) -> Self {
        Self {
            width: 1600,
            height: 1800,
            title: title
                .into_optional_title()
                .unwrap_or_else(|| "Solar Still Dashboard".to_string()),
            ..Default::default()
        }
    }

    /// Color for series at index i
    ///
    /// Uses custom colors if provided, otherwise the default palette
    pub(crate) fn series_color(&self, series_index: usize) -> RGBColor {
        if let Some(ref colors) = self.series_colors {
            if series_index < colors.len() {
                return colors[series_index];
            }
        }

        let default_colors = [
            self.line_color,
            self.secondary_color,
            GREEN,
            RED,
            MAGENTA,
            RGBColor(139, 69, 19), // Brown
            RGBColor(128, 0, 128), // Purple
            BLACK,
        ];

        default_colors[series_index % default_colors.len()]
    }
}

// =================================================================================================
// Tests
// =================================================================================================
