//! Rotating and cutting stop sequences.

use headway_core::{ConfigError, StopId, StopProvider};

/// Indices of a `len`-stop sequence rotated to begin at `start`.
///
/// # Examples
/// ```
/// use headway_scorer::rotation_indices;
///
/// let order: Vec<usize> = rotation_indices(4, 2).collect();
/// assert_eq!(order, [2, 3, 0, 1]);
/// ```
pub fn rotation_indices(len: usize, start: usize) -> impl Iterator<Item = usize> {
    let pivot = start.min(len);
    (pivot..len).chain(0..pivot)
}

/// Indices from `from` up to, but excluding, `to`, wrapping past the end.
/// Equal bounds yield the whole rotation starting at `from`.
///
/// # Examples
/// ```
/// use headway_scorer::limit_indices;
///
/// assert_eq!(limit_indices(6, 1, 4), [1, 2, 3]);
/// assert_eq!(limit_indices(6, 4, 1), [4, 5, 0]);
/// assert_eq!(limit_indices(3, 1, 1), [1, 2, 0]);
/// ```
#[must_use]
pub fn limit_indices(len: usize, from: usize, to: usize) -> Vec<usize> {
    if from == to {
        return rotation_indices(len, from).collect();
    }
    rotation_indices(len, from)
        .take_while(|index| *index != to)
        .collect()
}

fn position_of<S: StopProvider>(stops: &[S], id: &StopId) -> Result<usize, ConfigError> {
    stops
        .iter()
        .position(|stop| stop.id() == id)
        .ok_or_else(|| ConfigError::UnknownStop { id: id.clone() })
}

/// `stops` rotated to begin at `start`, keeping relative order.
///
/// # Errors
///
/// Returns [`ConfigError::UnknownStop`] if `start` is not in `stops`.
pub fn rotate_to<'s, S: StopProvider>(
    stops: &'s [S],
    start: &StopId,
) -> Result<Vec<&'s S>, ConfigError> {
    let pivot = position_of(stops, start)?;
    Ok(rotation_indices(stops.len(), pivot)
        .filter_map(|index| stops.get(index))
        .collect())
}

/// The stops from `from` up to, but excluding, `to`, wrapping past the end.
///
/// # Errors
///
/// Returns [`ConfigError::UnknownStop`] if either bound is not in `stops`.
pub fn limit_stops<'s, S: StopProvider>(
    stops: &'s [S],
    from: &StopId,
    to: &StopId,
) -> Result<Vec<&'s S>, ConfigError> {
    let start = position_of(stops, from)?;
    let end = position_of(stops, to)?;
    Ok(limit_indices(stops.len(), start, end)
        .into_iter()
        .filter_map(|index| stops.get(index))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use headway_core::Stop;
    use jiff::SignedDuration;
    use rstest::{fixture, rstest};

    #[fixture]
    fn stops() -> Vec<Stop> {
        ["A", "B", "C", "D"]
            .into_iter()
            .map(|id| Stop::new(id, id, SignedDuration::from_mins(1)))
            .collect()
    }

    fn ids(scoped: &[&Stop]) -> Vec<String> {
        scoped.iter().map(|stop| stop.id().to_string()).collect()
    }

    #[rstest]
    #[case("C", &["C", "D", "A", "B"])]
    #[case("A", &["A", "B", "C", "D"])]
    #[case("D", &["D", "A", "B", "C"])]
    fn rotation_preserves_relative_order(
        stops: Vec<Stop>,
        #[case] start: &str,
        #[case] expected: &[&str],
    ) {
        let scoped = rotate_to(&stops, &StopId::from(start)).expect("rotation");
        assert_eq!(ids(&scoped), expected);
    }

    #[rstest]
    fn rotation_rejects_unknown_start(stops: Vec<Stop>) {
        assert_eq!(
            rotate_to(&stops, &StopId::from("Z")).map(|scoped| scoped.len()),
            Err(ConfigError::UnknownStop {
                id: StopId::from("Z")
            })
        );
    }

    #[rstest]
    #[case("B", "D", &["B", "C"])]
    #[case("D", "B", &["D", "A"])]
    #[case("C", "C", &["C", "D", "A", "B"])]
    fn limits_wrap_around(
        stops: Vec<Stop>,
        #[case] from: &str,
        #[case] to: &str,
        #[case] expected: &[&str],
    ) {
        let scoped =
            limit_stops(&stops, &StopId::from(from), &StopId::from(to)).expect("limit");
        assert_eq!(ids(&scoped), expected);
    }

    #[rstest]
    fn opposite_limits_partition_the_route() {
        let mut both = limit_indices(7, 2, 5);
        both.extend(limit_indices(7, 5, 2));
        both.sort_unstable();
        assert_eq!(both, (0..7).collect::<Vec<_>>());
    }
}
