//! The multiplicative adjustment chain.
//!
//! Each property attribute contributes one `Adjustment`; the chain is applied
//! to a per-m² percentile anchor left-to-right. New adjustments extend the
//! pipeline by appending to [`chain`] without touching the engine's
//! multiply-by-area logic.

use core_types::ValuationRequest;

/// A single multiplicative correction derived from one property attribute.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Adjustment {
    /// The attribute this correction comes from.
    pub name: &'static str,
    /// The factor applied to the per-m² anchor. 1.0 is a no-op.
    pub factor: f64,
}

/// Builds the ordered adjustment chain for a request: room adjustment first,
/// age adjustment second. The order is part of the ruleset identified by
/// `core_types::MODEL_VERSION`.
pub fn chain(request: &ValuationRequest) -> Vec<Adjustment> {
    vec![
        room_adjustment(request.rooms),
        age_adjustment(request.year_built),
    ]
}

/// Applies a chain to a per-m² anchor, folding the factors left-to-right.
pub fn apply(chain: &[Adjustment], anchor_per_m2: f64) -> f64 {
    chain
        .iter()
        .fold(anchor_per_m2, |value, adjustment| value * adjustment.factor)
}

/// Studio/1-bed premium, large-unit discount. Both bounds are inclusive.
fn room_adjustment(rooms: Option<i32>) -> Adjustment {
    let factor = match rooms {
        None => 1.0,
        Some(rooms) if rooms <= 1 => 1.05,
        Some(rooms) if rooms >= 4 => 0.97,
        Some(_) => 1.0,
    };
    Adjustment {
        name: "rooms",
        factor,
    }
}

/// Older-stock discount below 1970, new-build premium from 2010 onwards.
fn age_adjustment(year_built: Option<i32>) -> Adjustment {
    let factor = match year_built {
        None => 1.0,
        Some(year) if year < 1970 => 0.94,
        Some(year) if year >= 2010 => 1.03,
        Some(_) => 1.0,
    };
    Adjustment {
        name: "age",
        factor,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(rooms: Option<i32>, year_built: Option<i32>) -> ValuationRequest {
        ValuationRequest {
            zone: "Madrid".to_string(),
            area_m2: 80.0,
            rooms,
            year_built,
            lat: None,
            lon: None,
        }
    }

    #[test]
    fn absent_attributes_leave_the_anchor_untouched() {
        let chain = chain(&request(None, None));
        assert_eq!(apply(&chain, 2000.0), 2000.0);
    }

    #[test]
    fn room_boundary_is_inclusive_at_one_and_four() {
        assert_eq!(room_adjustment(Some(0)).factor, 1.05);
        assert_eq!(room_adjustment(Some(1)).factor, 1.05);
        assert_eq!(room_adjustment(Some(2)).factor, 1.0);
        assert_eq!(room_adjustment(Some(3)).factor, 1.0);
        assert_eq!(room_adjustment(Some(4)).factor, 0.97);
        assert_eq!(room_adjustment(Some(9)).factor, 0.97);
    }

    #[test]
    fn age_boundary_switches_at_1970_and_2010() {
        assert_eq!(age_adjustment(Some(1969)).factor, 0.94);
        assert_eq!(age_adjustment(Some(1970)).factor, 1.0);
        assert_eq!(age_adjustment(Some(2009)).factor, 1.0);
        assert_eq!(age_adjustment(Some(2010)).factor, 1.03);
    }

    #[test]
    fn chain_applies_room_then_age() {
        let chain = chain(&request(Some(1), Some(2015)));
        assert_eq!(chain.len(), 2);
        assert_eq!(chain[0].name, "rooms");
        assert_eq!(chain[1].name, "age");
        assert_eq!(apply(&chain, 1800.0), 1800.0 * 1.05 * 1.03);
    }
}
