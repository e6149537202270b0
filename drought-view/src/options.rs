//! Option lists for the selection controls.

use drought_core::period::month_name;
use drought_data::LookupIndex;
use serde::Serialize;

/// One `<option>`: the submitted value and the visible label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

impl SelectOption {
    fn same(text: &str) -> Self {
        SelectOption {
            value: text.to_string(),
            label: text.to_string(),
        }
    }
}

/// Every option list the dashboard's forms need.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectionOptions {
    pub states: Vec<SelectOption>,
    pub months: Vec<SelectOption>,
    pub years: Vec<SelectOption>,
    /// Map period selector, chronological
    pub periods: Vec<SelectOption>,
    /// True when built from the fallback table; predictions are unavailable
    pub fallback: bool,
}

pub fn state_options(index: &LookupIndex) -> Vec<SelectOption> {
    index.states.iter().map(|s| SelectOption::same(s)).collect()
}

/// Districts of `state`, alphabetical; empty for an unknown state.
pub fn district_options(index: &LookupIndex, state: &str) -> Vec<SelectOption> {
    index
        .districts
        .districts(state)
        .into_iter()
        .map(SelectOption::same)
        .collect()
}

pub fn month_options() -> Vec<SelectOption> {
    (1..=12u32)
        .filter_map(|m| {
            month_name(m).map(|name| SelectOption {
                value: m.to_string(),
                label: name.to_string(),
            })
        })
        .collect()
}

pub fn selection_options(index: &LookupIndex) -> SelectionOptions {
    SelectionOptions {
        states: state_options(index),
        months: month_options(),
        years: index
            .years()
            .into_iter()
            .map(|y| SelectOption::same(&y.to_string()))
            .collect(),
        periods: index
            .periods
            .iter()
            .map(|p| SelectOption {
                value: p.to_string(),
                label: p.label(),
            })
            .collect(),
        fallback: !index.can_serve_predictions(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use drought_core::period::YearRange;
    use drought_data::Dataset;

    #[test]
    fn test_month_options() {
        let months = month_options();
        assert_eq!(months.len(), 12);
        assert_eq!(months[0].value, "1");
        assert_eq!(months[0].label, "January");
        assert_eq!(months[11].label, "December");
    }

    #[test]
    fn test_selection_options_from_dataset() {
        let dataset = Dataset::from_json(
            r#"[
            {"state":"Punjab","district":"Ludhiana","year":2024,"month":10,"drought_severity":1.0},
            {"state":"Punjab","district":"Amritsar","year":2024,"month":9,"drought_severity":1.0},
            {"state":"Assam","district":"Guwahati","year":2025,"month":1,"drought_severity":1.0}
        ]"#,
        )
        .unwrap();
        let index = dataset.index(YearRange::default());
        let options = selection_options(&index);
        assert!(!options.fallback);
        let states: Vec<&str> = options.states.iter().map(|o| o.value.as_str()).collect();
        assert_eq!(states, vec!["Assam", "Punjab"]);
        let periods: Vec<&str> = options.periods.iter().map(|o| o.value.as_str()).collect();
        assert_eq!(periods, vec!["2024-9", "2024-10", "2025-1"]);
        assert_eq!(options.periods[0].label, "September 2024");
        let years: Vec<&str> = options.years.iter().map(|o| o.value.as_str()).collect();
        assert_eq!(years, vec!["2024", "2025"]);

        let districts = district_options(&index, "Punjab");
        assert_eq!(districts[0].value, "Amritsar");
        assert_eq!(districts[1].value, "Ludhiana");
        assert!(district_options(&index, "Goa").is_empty());
    }

    #[test]
    fn test_fallback_options() {
        let options = selection_options(&LookupIndex::fallback());
        assert!(options.fallback);
        assert!(options.periods.is_empty());
        assert_eq!(options.states.len(), 5);
    }
}
