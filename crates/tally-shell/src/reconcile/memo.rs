//! Stability memo for flicker-prone capabilities.

/// Last *accepted* granted value for the camera, the one kind prone to
/// reporting false negatives right after the app backgrounds/foregrounds.
///
/// Starts unknown, is updated only when a refresh candidate is accepted,
/// and is never reset for the life of the process.
#[derive(Debug, Default)]
pub struct StabilityMemo {
    camera: Option<bool>,
}

impl StabilityMemo {
    pub const fn new() -> Self {
        Self { camera: None }
    }

    /// Whether a candidate camera reading must be rejected: the last
    /// accepted value was granted and the candidate claims it no longer is.
    pub fn suppresses(&self, candidate_granted: bool) -> bool {
        self.camera == Some(true) && !candidate_granted
    }

    /// Record an accepted camera reading.
    pub const fn accept(&mut self, granted: bool) {
        self.camera = Some(granted);
    }

    /// Last accepted value, `None` until the first acceptance.
    pub const fn last_accepted(&self) -> Option<bool> {
        self.camera
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_memo_suppresses_nothing() {
        let memo = StabilityMemo::new();
        assert!(!memo.suppresses(false));
        assert!(!memo.suppresses(true));
    }

    #[test]
    fn granted_memo_suppresses_denied_candidate() {
        let mut memo = StabilityMemo::new();
        memo.accept(true);
        assert!(memo.suppresses(false));
        assert!(!memo.suppresses(true));
    }

    #[test]
    fn denied_memo_accepts_anything() {
        let mut memo = StabilityMemo::new();
        memo.accept(false);
        assert!(!memo.suppresses(false));
        assert!(!memo.suppresses(true));
        assert_eq!(memo.last_accepted(), Some(false));
    }
}
