//! Predicted visit times of a chosen dispatch.

use headway_core::{ConfigError, StopId, StopProvider, StopTime};
use headway_scorer::rotation_indices;
use jiff::civil::DateTime;

/// Visit times for a vehicle leaving `start` at `departure`.
///
/// Arrivals accumulate each stop's travel time and event delay along the
/// route rotated to begin at `start`. The returned plan is listed in route
/// order from index 0, so a vehicle starting mid-route shows its later
/// visits first.
///
/// # Errors
///
/// Returns [`ConfigError::UnknownStop`] if `start` is not in `stops`.
pub fn build_plan<S: StopProvider>(
    stops: &[S],
    start: &StopId,
    departure: DateTime,
) -> Result<Vec<StopTime>, ConfigError> {
    let pivot = stops
        .iter()
        .position(|stop| stop.id() == start)
        .ok_or_else(|| ConfigError::UnknownStop { id: start.clone() })?;

    let mut clock = departure;
    let mut timed: Vec<(usize, StopTime)> = rotation_indices(stops.len(), pivot)
        .filter_map(|index| stops.get(index).map(|stop| (index, stop)))
        .map(|(index, stop)| {
            clock = clock
                .saturating_add(stop.travel_time())
                .saturating_add(stop.event_delay());
            let visit = StopTime {
                stop: stop.id().clone(),
                name: stop.name().to_owned(),
                time: clock,
            };
            (index, visit)
        })
        .collect();
    timed.sort_by_key(|(index, _)| *index);
    Ok(timed.into_iter().map(|(_, visit)| visit).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use headway_core::Stop;
    use headway_core::test_support::three_stops;
    use headway_forecast::test_support::at;
    use jiff::SignedDuration;
    use rstest::rstest;

    fn times(plan: &[StopTime]) -> Vec<(String, DateTime)> {
        plan.iter()
            .map(|visit| (visit.stop.to_string(), visit.time))
            .collect()
    }

    #[rstest]
    fn departing_from_the_first_stop_keeps_route_order() {
        let plan = build_plan(&three_stops(), &StopId::from(1), at(6, 10)).expect("plan");
        assert_eq!(
            times(&plan),
            [
                ("1".to_owned(), at(6, 15)),
                ("2".to_owned(), at(6, 20)),
                ("3".to_owned(), at(6, 25)),
            ]
        );
    }

    #[rstest]
    fn mid_route_starts_list_index_zero_first() {
        let plan = build_plan(&three_stops(), &StopId::from(2), at(6, 0)).expect("plan");
        assert_eq!(
            times(&plan),
            [
                ("1".to_owned(), at(6, 15)),
                ("2".to_owned(), at(6, 5)),
                ("3".to_owned(), at(6, 10)),
            ]
        );
    }

    #[rstest]
    fn event_delays_push_later_stops_back() {
        let mut stops = three_stops();
        if let Some(centro) = stops.get_mut(1) {
            *centro = Stop::new(2, "Centro", SignedDuration::from_mins(5))
                .with_event_delay(SignedDuration::from_mins(7));
        }
        let plan = build_plan(&stops, &StopId::from(1), at(6, 0)).expect("plan");
        assert_eq!(plan.last().map(|visit| visit.time), Some(at(6, 22)));
    }

    #[rstest]
    fn unknown_start_is_rejected() {
        assert_eq!(
            build_plan(&three_stops(), &StopId::from(8), at(6, 0)),
            Err(ConfigError::UnknownStop {
                id: StopId::from(8)
            })
        );
    }
}
