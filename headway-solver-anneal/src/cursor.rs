//! Round-robin enumeration of dispatch states.

use std::num::NonZeroU32;

use headway_core::ConfigError;

/// One candidate dispatch: indices into the vehicle list, the delay slots
/// and the candidate start stops.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DispatchState {
    /// Index into the vehicle list.
    pub vehicle: usize,
    /// Delay slot; the delay is `slot * interval`.
    pub delay_slot: u32,
    /// Index into the candidate start stops.
    pub start: usize,
}

impl DispatchState {
    /// First vehicle, no delay, first start stop.
    pub const ORIGIN: Self = Self {
        vehicle: 0,
        delay_slot: 0,
        start: 0,
    };
}

/// Walks every [`DispatchState`] in a fixed cycle.
///
/// The vehicle index turns fastest; when it wraps the start stop advances,
/// and when that wraps the delay advances by one slot, returning to zero
/// after the last. The cycle length is therefore
/// `vehicles * starts * delay_slots`.
///
/// # Examples
/// ```
/// use std::num::NonZeroU32;
///
/// use headway_solver_anneal::{DispatchCursor, DispatchState};
///
/// let slots = NonZeroU32::new(3).unwrap_or(NonZeroU32::MIN);
/// let mut cursor = DispatchCursor::new(2, slots, 1)?;
/// cursor.advance();
/// cursor.advance();
/// assert_eq!(
///     cursor.current(),
///     DispatchState { vehicle: 0, delay_slot: 1, start: 0 }
/// );
/// assert_eq!(cursor.cycle_len(), Ok(6));
/// # Ok::<(), headway_core::ConfigError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchCursor {
    vehicles: usize,
    delay_slots: u32,
    starts: usize,
    current: DispatchState,
}

impl DispatchCursor {
    /// Cursor over `vehicles` vehicles, `delay_slots` delays and `starts`
    /// start stops.
    ///
    /// # Errors
    ///
    /// [`ConfigError::NoVehicles`] without vehicles and
    /// [`ConfigError::EmptyScope`] without start stops.
    pub const fn new(
        vehicles: usize,
        delay_slots: NonZeroU32,
        starts: usize,
    ) -> Result<Self, ConfigError> {
        if vehicles == 0 {
            return Err(ConfigError::NoVehicles);
        }
        if starts == 0 {
            return Err(ConfigError::EmptyScope);
        }
        Ok(Self {
            vehicles,
            delay_slots: delay_slots.get(),
            starts,
            current: DispatchState::ORIGIN,
        })
    }

    /// Number of states in one cycle, which is also the annealing step
    /// budget.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::SearchSpaceTooLarge`] if the product does not
    /// fit a `u32` step counter.
    pub fn cycle_len(&self) -> Result<u32, ConfigError> {
        let vehicles = u32::try_from(self.vehicles).ok();
        let starts = u32::try_from(self.starts).ok();
        vehicles
            .zip(starts)
            .and_then(|(vehicles, starts)| vehicles.checked_mul(starts))
            .and_then(|states| states.checked_mul(self.delay_slots))
            .ok_or(ConfigError::SearchSpaceTooLarge)
    }

    /// State the cursor points at.
    #[must_use]
    pub const fn current(&self) -> DispatchState {
        self.current
    }

    /// Return to [`DispatchState::ORIGIN`].
    pub const fn rewind(&mut self) -> DispatchState {
        self.current = DispatchState::ORIGIN;
        self.current
    }

    /// Move to the next state of the cycle.
    pub const fn advance(&mut self) -> DispatchState {
        let state = &mut self.current;
        state.vehicle += 1;
        if state.vehicle == self.vehicles {
            state.vehicle = 0;
            state.start += 1;
            if state.start == self.starts {
                state.start = 0;
                state.delay_slot += 1;
                if state.delay_slot == self.delay_slots {
                    state.delay_slot = 0;
                }
            }
        }
        self.current
    }
}
