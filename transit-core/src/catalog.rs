//! Static mapping from weather condition to route recommendation.
//!
//! Lookups are total: conditions without a dedicated entry resolve to the
//! default recommendation.

use crate::model::{RouteOption, RouteRecommendation, WeatherCondition};

const SUNNY: RouteRecommendation = RouteRecommendation {
    recommendation: "Take a bike or walk if distance is short",
    routes: &[
        RouteOption {
            kind: "bike",
            duration: "15 min",
            details: "City Bike available at station",
        },
        RouteOption {
            kind: "walk",
            duration: "25 min",
            details: "Pleasant weather for walking",
        },
    ],
};

const RAINY: RouteRecommendation = RouteRecommendation {
    recommendation: "Public transport is recommended",
    routes: &[
        RouteOption {
            kind: "tram",
            duration: "12 min",
            details: "Tram 4 to Mannerheimintie",
        },
        RouteOption {
            kind: "bus",
            duration: "18 min",
            details: "Bus 55 to Airport",
        },
    ],
};

const SNOWY: RouteRecommendation = RouteRecommendation {
    recommendation: "Use metro or trams which are more reliable in snow",
    routes: &[
        RouteOption {
            kind: "metro",
            duration: "10 min",
            details: "M1 to Helsinki Central",
        },
        RouteOption {
            kind: "tram",
            duration: "15 min",
            details: "Tram 6 to Hietalahti",
        },
    ],
};

const DEFAULT: RouteRecommendation = RouteRecommendation {
    recommendation: "Multiple options available",
    routes: &[
        RouteOption {
            kind: "bus",
            duration: "20 min",
            details: "Bus 30 to city center",
        },
        RouteOption {
            kind: "metro",
            duration: "15 min",
            details: "M2 to Tapiola",
        },
    ],
};

/// Recommendation for `condition`. Never fails.
pub fn lookup(condition: WeatherCondition) -> &'static RouteRecommendation {
    match condition {
        WeatherCondition::Sunny => &SUNNY,
        WeatherCondition::Rainy => &RAINY,
        WeatherCondition::Snowy => &SNOWY,
        _ => &DEFAULT,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snowy_entry_contents() {
        let rec = lookup(WeatherCondition::Snowy);
        assert_eq!(rec.recommendation, "Use metro or trams which are more reliable in snow");
        assert_eq!(rec.routes.len(), 2);
        assert_eq!(rec.routes[0].kind, "metro");
        assert_eq!(rec.routes[0].duration, "10 min");
        assert_eq!(rec.routes[0].details, "M1 to Helsinki Central");
        assert_eq!(rec.routes[1].details, "Tram 6 to Hietalahti");
    }

    #[test]
    fn unmapped_conditions_resolve_to_default() {
        for condition in WeatherCondition::all() {
            if matches!(
                condition,
                WeatherCondition::Sunny | WeatherCondition::Rainy | WeatherCondition::Snowy
            ) {
                continue;
            }

            let rec = lookup(*condition);
            assert_eq!(rec.recommendation, "Multiple options available");
            assert_eq!(rec.routes.len(), 2);
            assert_eq!(rec.routes[0].kind, "bus");
            assert_eq!(rec.routes[0].duration, "20 min");
            assert_eq!(rec.routes[1].kind, "metro");
            assert_eq!(rec.routes[1].duration, "15 min");
        }
    }

    #[test]
    fn lookup_is_total() {
        for condition in WeatherCondition::all() {
            assert!(!lookup(*condition).routes.is_empty());
        }
    }
}
