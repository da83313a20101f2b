use super::model::{Observation, SegmentKey};

/// Combo-box value meaning "no constraint on this axis".
pub const ALL_SENTINEL: &str = "all";

// ---------------------------------------------------------------------------
// Filter predicate: optional province / vehicle type
// ---------------------------------------------------------------------------

/// Currently selected province and vehicle type. An unset field places no
/// constraint on that axis.
///
/// Values are never validated against the loaded dataset: a selection that
/// matches nothing just yields an empty view downstream.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SegmentFilter {
    province: Option<String>,
    vehicle_type: Option<String>,
}

/// Translate a raw UI selection into an optional constraint.
/// The sentinel and the empty string both mean "unset".
fn from_selection(value: &str) -> Option<String> {
    if value.is_empty() || value == ALL_SENTINEL {
        None
    } else {
        Some(value.to_string())
    }
}

impl SegmentFilter {
    pub fn province(&self) -> Option<&str> {
        self.province.as_deref()
    }

    pub fn vehicle_type(&self) -> Option<&str> {
        self.vehicle_type.as_deref()
    }

    pub fn set_province(&mut self, value: &str) {
        self.province = from_selection(value);
        log::debug!("province filter -> {:?}", self.province);
    }

    pub fn set_vehicle_type(&mut self, value: &str) {
        self.vehicle_type = from_selection(value);
        log::debug!("vehicle type filter -> {:?}", self.vehicle_type);
    }

    /// Clear both axes.
    pub fn reset(&mut self) {
        self.province = None;
        self.vehicle_type = None;
    }

    pub fn is_active(&self) -> bool {
        self.province.is_some() || self.vehicle_type.is_some()
    }

    /// Set values in (province, vehicle type) order, for display.
    pub fn active_labels(&self) -> Vec<&str> {
        [self.province(), self.vehicle_type()]
            .into_iter()
            .flatten()
            .collect()
    }

    /// Whether a segment passes both axes.
    pub fn matches(&self, segment: &SegmentKey) -> bool {
        self.province().map_or(true, |p| segment.province == p)
            && self
                .vehicle_type()
                .map_or(true, |t| segment.vehicle_type == t)
    }
}

// ---------------------------------------------------------------------------
// Distinct values for the filter options
// ---------------------------------------------------------------------------

/// Unique values of one segment axis in first-seen order.
fn distinct_by<'a, F>(observations: &'a [Observation], axis: F) -> Vec<String>
where
    F: Fn(&'a SegmentKey) -> &'a str,
{
    let mut seen: Vec<String> = Vec::new();
    for obs in observations {
        let value = axis(&obs.segment);
        if !seen.iter().any(|s| s == value) {
            seen.push(value.to_string());
        }
    }
    seen
}

/// Provinces present in the observations, first-seen order.
pub fn distinct_provinces(observations: &[Observation]) -> Vec<String> {
    distinct_by(observations, |s| s.province.as_str())
}

/// Vehicle types present in the observations, first-seen order.
pub fn distinct_vehicle_types(observations: &[Observation]) -> Vec<String> {
    distinct_by(observations, |s| s.vehicle_type.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Dataset;

    #[test]
    fn sentinel_clears_field() {
        let mut f = SegmentFilter::default();
        f.set_province("CABA");
        assert_eq!(f.province(), Some("CABA"));
        f.set_province(ALL_SENTINEL);
        assert_eq!(f.province(), None);
        f.set_vehicle_type("");
        assert_eq!(f.vehicle_type(), None);
    }

    #[test]
    fn reset_clears_both_fields() {
        let mut f = SegmentFilter::default();
        f.set_province("CABA");
        f.set_vehicle_type("Moto");
        assert!(f.is_active());
        assert_eq!(f.active_labels(), vec!["CABA", "Moto"]);

        f.reset();
        assert_eq!(f, SegmentFilter::default());
        assert!(!f.is_active());
        assert!(f.active_labels().is_empty());

        // Resetting an already empty filter is a no-op.
        f.reset();
        assert_eq!(f, SegmentFilter::default());
    }

    #[test]
    fn setters_are_independent() {
        let mut f = SegmentFilter::default();
        f.set_vehicle_type("Auto");
        f.set_province("Cordoba");
        f.set_province(ALL_SENTINEL);
        assert_eq!(f.vehicle_type(), Some("Auto"));
        assert_eq!(f.active_labels(), vec!["Auto"]);
    }

    #[test]
    fn matches_each_axis() {
        let seg = SegmentKey::new("CABA", "Auto");
        let mut f = SegmentFilter::default();
        assert!(f.matches(&seg));

        f.set_province("CABA");
        assert!(f.matches(&seg));
        f.set_vehicle_type("Moto");
        assert!(!f.matches(&seg));
        f.set_province("Cordoba");
        f.set_vehicle_type(ALL_SENTINEL);
        assert!(!f.matches(&seg));
    }

    #[test]
    fn distinct_values_keep_first_seen_order() {
        let ds = Dataset::demo();
        assert_eq!(distinct_provinces(&ds.observations), vec!["CABA", "Buenos Aires"]);
        assert_eq!(distinct_vehicle_types(&ds.observations), vec!["Auto", "Moto"]);
    }

    #[test]
    fn distinct_values_of_empty_dataset() {
        assert!(distinct_provinces(&[]).is_empty());
        assert!(distinct_vehicle_types(&[]).is_empty());
    }
}
