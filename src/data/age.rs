use super::model::{AgeGroup, MetadataValue};

/// Parse a raw age cell. Missing, non-finite or unparseable values are 0.
pub fn clean_age(raw: &MetadataValue) -> f64 {
    let parsed = match raw {
        MetadataValue::String(s) => s.trim().parse::<f64>().ok(),
        other => other.as_f64(),
    };
    parsed.filter(|v| v.is_finite()).unwrap_or(0.0)
}

/// Bucket a cleaned age into one of the eleven labels.
///
/// Interval `k` is `[10k, 10k + 10)`. Exactly 0 and negative ages are
/// `Unknown`; ages of 100 and over are clamped into `91-100`.
pub fn age_group(age: f64) -> AgeGroup {
    if age.is_nan() || age <= 0.0 {
        return AgeGroup::Unknown;
    }
    let idx = ((age / 10.0).floor() as usize).min(AgeGroup::DECADES.len() - 1);
    AgeGroup::DECADES[idx]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bucket(raw: MetadataValue) -> AgeGroup {
        age_group(clean_age(&raw))
    }

    #[test]
    fn zero_is_unknown_even_though_it_opens_the_first_interval() {
        assert_eq!(age_group(0.0), AgeGroup::Unknown);
        assert_eq!(bucket(MetadataValue::Integer(0)), AgeGroup::Unknown);
        assert_eq!(bucket(MetadataValue::String("0".into())), AgeGroup::Unknown);
    }

    #[test]
    fn missing_negative_and_garbage_are_unknown() {
        assert_eq!(bucket(MetadataValue::Null), AgeGroup::Unknown);
        assert_eq!(bucket(MetadataValue::Integer(-4)), AgeGroup::Unknown);
        assert_eq!(bucket(MetadataValue::String("about 30".into())), AgeGroup::Unknown);
        assert_eq!(bucket(MetadataValue::String("".into())), AgeGroup::Unknown);
        assert_eq!(bucket(MetadataValue::Bool(true)), AgeGroup::Unknown);
        assert_eq!(bucket(MetadataValue::Float(f64::NAN)), AgeGroup::Unknown);
        assert_eq!(clean_age(&MetadataValue::String("inf".into())), 0.0);
    }

    #[test]
    fn decades_are_lower_inclusive() {
        assert_eq!(age_group(0.5), AgeGroup::Age0To10);
        assert_eq!(age_group(9.99), AgeGroup::Age0To10);
        assert_eq!(age_group(10.0), AgeGroup::Age11To20);
        assert_eq!(age_group(19.0), AgeGroup::Age11To20);
        assert_eq!(age_group(25.0), AgeGroup::Age21To30);
        assert_eq!(age_group(90.0), AgeGroup::Age91To100);
        assert_eq!(age_group(99.9), AgeGroup::Age91To100);
    }

    #[test]
    fn every_interval_maps_to_its_label() {
        for (k, group) in AgeGroup::DECADES.iter().enumerate().skip(1) {
            let lower = 10.0 * k as f64;
            assert_eq!(age_group(lower), *group);
            assert_eq!(age_group(lower + 9.5), *group);
        }
    }

    #[test]
    fn hundred_and_over_clamp_to_last_decade() {
        assert_eq!(age_group(100.0), AgeGroup::Age91To100);
        assert_eq!(age_group(117.0), AgeGroup::Age91To100);
    }

    #[test]
    fn strings_are_trimmed_and_floats_accepted() {
        assert_eq!(clean_age(&MetadataValue::String(" 42 ".into())), 42.0);
        assert_eq!(clean_age(&MetadataValue::String("3.5".into())), 3.5);
        assert_eq!(clean_age(&MetadataValue::Float(61.0)), 61.0);
        assert_eq!(bucket(MetadataValue::String(" 42 ".into())), AgeGroup::Age41To50);
    }
}
