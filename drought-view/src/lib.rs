//! Presentation adapter for the drought dashboard.
//!
//! Turns [`AggregationResult`](drought_data::AggregationResult)s and
//! [`Prediction`](drought_data::Prediction)s into plain serializable
//! primitives for the external map widget and results panel. All structs
//! derive `Serialize` so they can be handed to JavaScript as JSON.

pub mod map;
pub mod options;
pub mod panel;

/// Escape text for interpolation into popup/panel HTML.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            c => escaped.push(c),
        }
    }
    escaped
}
