//! Debounce filter for the button input.
//!
//! Pure timing logic, no hardware dependencies. Fully testable on host.
//!
//! An edge is a genuine press when strictly more than the debounce window
//! has elapsed since the last *accepted* edge. Rejected edges never move the
//! reference point, so a bounce train is measured from its first edge.
//!
//! # First edge
//!
//! Before any edge has been accepted there is no reference timestamp and the
//! window counts as satisfied: the first edge after boot is always accepted,
//! even if it arrives within the first window after boot.

/// Default debounce window in milliseconds.
pub const DEBOUNCE_WINDOW_MS: u32 = 200;

/// Decide whether an edge at `now_ms` is a genuine press.
///
/// `accept = (now_ms - last_accepted_ms) > window_ms`, computed with
/// wrapping arithmetic. `None` means no edge has been accepted yet.
#[inline]
pub const fn window_elapsed(now_ms: u32, last_accepted_ms: Option<u32>, window_ms: u32) -> bool {
    match last_accepted_ms {
        None => true,
        Some(last) => now_ms.wrapping_sub(last) > window_ms,
    }
}

/// Debounce state: the timestamp of the last accepted edge.
///
/// Owned by the interrupt capture. The stored timestamp only moves on
/// acceptance.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Debouncer {
    window_ms: u32,
    last_accepted_ms: Option<u32>,
}

impl Debouncer {
    /// Create a debouncer that accepts the first edge unconditionally.
    pub const fn new(window_ms: u32) -> Self {
        Self {
            window_ms,
            last_accepted_ms: None,
        }
    }

    /// Filter one edge. Returns `true` and records `now_ms` if accepted.
    #[inline]
    pub fn on_edge(&mut self, now_ms: u32) -> bool {
        if window_elapsed(now_ms, self.last_accepted_ms, self.window_ms) {
            self.last_accepted_ms = Some(now_ms);
            true
        } else {
            false
        }
    }

    /// Timestamp of the last accepted edge, if any.
    #[inline]
    pub fn last_accepted_ms(&self) -> Option<u32> {
        self.last_accepted_ms
    }

    #[inline]
    pub fn window_ms(&self) -> u32 {
        self.window_ms
    }
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(DEBOUNCE_WINDOW_MS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_boundary_is_exclusive() {
        assert!(!window_elapsed(1200, Some(1000), 200));
        assert!(window_elapsed(1201, Some(1000), 200));
    }

    #[test]
    fn test_window_survives_clock_wrap() {
        let last = u32::MAX - 100;
        assert!(!window_elapsed(50, Some(last), 200)); // 151 ms later
        assert!(window_elapsed(150, Some(last), 200)); // 251 ms later
    }

    #[test]
    fn test_rejected_edge_keeps_reference() {
        let mut d = Debouncer::new(200);
        assert!(d.on_edge(0));
        assert!(!d.on_edge(150));
        assert_eq!(d.last_accepted_ms(), Some(0));
        assert!(d.on_edge(201));
        assert_eq!(d.last_accepted_ms(), Some(201));
    }
}
