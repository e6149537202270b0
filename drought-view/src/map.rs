//! Map-widget primitives: one colored circle per state.
//!
//! The tile map itself is external; it is handed a center, a zoom level and
//! shape/color/popup primitives and gives nothing back here.

use crate::escape_html;
use drought_core::config::MapConfig;
use drought_core::state_coordinates::{LatLon, StateCoordinates};
use drought_data::{AggregationResult, SeveritySummary};
use log::warn;
use serde::Serialize;

/// Leaflet-style circle options.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShapeStyle {
    pub radius: f64,
    pub fill_color: String,
    pub stroke_color: String,
    pub opacity: f64,
    pub fill_opacity: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapMarker {
    pub state: String,
    pub center: LatLon,
    pub zoom: u8,
    pub style: ShapeStyle,
    pub popup_html: String,
}

/// What the map should show for one state's aggregation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "view", rename_all = "snake_case")]
pub enum MapView {
    /// Statistics exist: a colored marker with a popup
    Marker(MapMarker),
    /// No records matched: center on the state without statistics
    CenterOnly {
        state: String,
        center: LatLon,
        zoom: u8,
    },
}

fn popup_html(result: &AggregationResult, summary: &SeveritySummary) -> String {
    format!(
        "<b>{}</b><br>{}<br>Median severity: {:.2}<br>Category: {}<br>Districts: {}",
        escape_html(&result.state),
        result.period.label(),
        summary.median_severity,
        summary.category.label(),
        result.sample_count
    )
}

fn marker(result: &AggregationResult, summary: &SeveritySummary, center: LatLon, map: &MapConfig) -> MapMarker {
    MapMarker {
        state: result.state.clone(),
        center,
        zoom: map.state_zoom,
        style: ShapeStyle {
            radius: map.marker.radius,
            fill_color: summary.color().to_string(),
            stroke_color: map.marker.stroke_color.clone(),
            opacity: map.marker.opacity,
            fill_opacity: map.marker.fill_opacity,
        },
        popup_html: popup_html(result, summary),
    }
}

/// View for one state, or `None` when the state has no known coordinate.
///
/// A missing coordinate only skips positioning; it is logged, not an error.
pub fn state_view(
    result: &AggregationResult,
    coordinates: &StateCoordinates,
    map: &MapConfig,
) -> Option<MapView> {
    let Some(center) = coordinates.get(&result.state) else {
        warn!("map: no coordinate for state {:?}; skipping marker", result.state);
        return None;
    };
    Some(match &result.summary {
        Some(summary) => MapView::Marker(marker(result, summary, center, map)),
        None => MapView::CenterOnly {
            state: result.state.clone(),
            center,
            zoom: map.state_zoom,
        },
    })
}

/// Whole-country map payload for one period.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapOverview {
    pub center: LatLon,
    pub zoom: u8,
    pub markers: Vec<MapMarker>,
    /// States with data for the period but no coordinate
    pub unplaced: Vec<String>,
}

/// Markers for every aggregated state that has data and a coordinate.
pub fn overview(
    results: &[AggregationResult],
    coordinates: &StateCoordinates,
    map: &MapConfig,
) -> MapOverview {
    let mut markers = Vec::new();
    let mut unplaced = Vec::new();
    for result in results.iter().filter(|r| r.has_data()) {
        match state_view(result, coordinates, map) {
            Some(MapView::Marker(m)) => markers.push(m),
            Some(MapView::CenterOnly { .. }) => {}
            None => unplaced.push(result.state.clone()),
        }
    }
    MapOverview {
        center: map.center,
        zoom: map.zoom,
        markers,
        unplaced,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use drought_core::category::{DroughtCategory, SeverityThresholds};
    use drought_core::period::Period;
    use drought_data::Dataset;

    fn dataset() -> Dataset {
        Dataset::from_json(
            r#"[
            {"state":"Bihar","district":"Patna","year":2025,"month":3,"drought_severity":2.0},
            {"state":"Bihar","district":"Gaya","year":2025,"month":3,"drought_severity":4.0},
            {"state":"Atlantis","district":"Poseidonia","year":2025,"month":3,"drought_severity":1.0},
            {"state":"Kerala","district":"Kochi","year":2024,"month":3,"drought_severity":1.0}
        ]"#,
        )
        .unwrap()
    }

    fn march() -> Period {
        Period::new(2025, 3).unwrap()
    }

    #[test]
    fn test_marker_for_state_with_data() {
        let result = dataset().aggregate("Bihar", march(), &SeverityThresholds::default());
        let view = state_view(&result, &StateCoordinates::builtin(), &MapConfig::default()).unwrap();
        let MapView::Marker(marker) = view else {
            panic!("expected a marker");
        };
        assert_eq!(marker.style.fill_color, DroughtCategory::SevereDrought.color());
        assert_eq!(marker.style.stroke_color, "#333333");
        assert_eq!(marker.zoom, 6);
        assert!(marker.popup_html.contains("<b>Bihar</b>"));
        assert!(marker.popup_html.contains("March 2025"));
        assert!(marker.popup_html.contains("Median severity: 3.00"));
        assert!(marker.popup_html.contains("Districts: 2"));
    }

    #[test]
    fn test_center_only_without_data() {
        let result = dataset().aggregate("Kerala", march(), &SeverityThresholds::default());
        let view = state_view(&result, &StateCoordinates::builtin(), &MapConfig::default()).unwrap();
        assert!(matches!(view, MapView::CenterOnly { ref state, .. } if state == "Kerala"));
    }

    #[test]
    fn test_missing_coordinate_skips_positioning() {
        let result = dataset().aggregate("Atlantis", march(), &SeverityThresholds::default());
        assert!(result.has_data());
        assert!(state_view(&result, &StateCoordinates::builtin(), &MapConfig::default()).is_none());
    }

    #[test]
    fn test_overview() {
        let data = dataset();
        let results = data.aggregate_all(march(), &SeverityThresholds::default());
        let overview = overview(&results, &StateCoordinates::builtin(), &MapConfig::default());
        assert_eq!(overview.zoom, 5);
        assert_eq!(overview.markers.len(), 1);
        assert_eq!(overview.markers[0].state, "Bihar");
        assert_eq!(overview.unplaced, vec!["Atlantis"]);
    }

    #[test]
    fn test_serialized_view_tag() {
        let result = dataset().aggregate("Kerala", march(), &SeverityThresholds::default());
        let view = state_view(&result, &StateCoordinates::builtin(), &MapConfig::default()).unwrap();
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["view"], "center_only");
        assert_eq!(json["state"], "Kerala");
    }
}
