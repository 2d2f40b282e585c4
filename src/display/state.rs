//! Fetch lifecycle for the dashboard page.
//!
//! One fetch per page load: loading → ready or failed. Results are applied
//! through a generation token so that a result arriving after the page moved
//! on (re-fetch or teardown) is discarded instead of clobbering newer state.

use super::{adapt, Category, DisplayModel, PLACEHOLDERS};
use crate::error::FetchError;
use crate::shape::ShapedData;

/// Ticket for one fetch attempt. Only the most recently issued token can
/// still apply its result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchToken(u64);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Loading,
    Ready(ShapedData),
    Failed(String),
}

impl Default for Phase {
    fn default() -> Self {
        Phase::Idle
    }
}

#[derive(Debug, Default)]
pub struct DashboardState {
    generation: u64,
    phase: Phase,
}

impl DashboardState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a fetch. Tokens issued earlier become stale immediately.
    pub fn begin_fetch(&mut self) -> FetchToken {
        self.generation += 1;
        self.phase = Phase::Loading;
        FetchToken(self.generation)
    }

    /// Apply a fetch outcome. Returns `false` and changes nothing when the
    /// token is stale.
    pub fn apply(
        &mut self,
        token: FetchToken,
        result: Result<ShapedData, FetchError>,
    ) -> bool {
        if token.0 != self.generation {
            return false;
        }
        self.phase = match result {
            Ok(data) => Phase::Ready(data),
            Err(err) => Phase::Failed(format!("could not fetch data: {err}")),
        };
        true
    }

    /// Tear the page down: whatever is still in flight lands stale.
    pub fn invalidate(&mut self) {
        self.generation += 1;
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn is_loading(&self) -> bool {
        self.phase == Phase::Loading
    }

    pub fn error(&self) -> Option<&str> {
        match &self.phase {
            Phase::Failed(message) => Some(message),
            _ => None,
        }
    }

    /// The display model for a tab right now. Tab switching is always
    /// possible; until a fetch resolves, every tab renders placeholders.
    pub fn display(&self, category: Category) -> DisplayModel {
        let fetched = match &self.phase {
            Phase::Ready(data) => Some(data),
            _ => None,
        };
        adapt(category, fetched, &PLACEHOLDERS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn data(value: &str) -> ShapedData {
        ShapedData {
            summary: [("GMV (฿)".to_string(), value.to_string())]
                .into_iter()
                .collect(),
            daily: vec![[("สรุปข้อมูล".to_string(), "1 ม.ค.".to_string())]
                .into_iter()
                .collect::<BTreeMap<_, _>>()],
        }
    }

    #[test]
    fn current_token_applies() {
        let mut state = DashboardState::new();
        let token = state.begin_fetch();
        assert!(state.is_loading());
        assert!(state.apply(token, Ok(data("1"))));
        assert!(matches!(state.phase(), Phase::Ready(_)));
    }

    #[test]
    fn stale_token_is_discarded() {
        let mut state = DashboardState::new();
        let stale = state.begin_fetch();
        let current = state.begin_fetch();

        assert!(!state.apply(stale, Ok(data("old"))));
        assert!(state.is_loading());

        assert!(state.apply(current, Ok(data("new"))));
        match state.phase() {
            Phase::Ready(d) => assert_eq!(d.summary.get("GMV (฿)").unwrap(), "new"),
            other => panic!("unexpected phase: {other:?}"),
        }
    }

    #[test]
    fn result_after_invalidate_is_discarded() {
        let mut state = DashboardState::new();
        let token = state.begin_fetch();
        state.invalidate();
        assert!(!state.apply(token, Ok(data("late"))));
        assert!(state.is_loading());
    }

    #[test]
    fn failure_surfaces_one_message() {
        let mut state = DashboardState::new();
        let token = state.begin_fetch();
        state.apply(
            token,
            Err(FetchError::SourceUnavailable("boom".to_string())),
        );
        let message = state.error().unwrap();
        assert!(message.contains("could not fetch data"));
        assert!(message.contains("boom"));
    }

    #[test]
    fn tabs_render_placeholders_until_ready() {
        let mut state = DashboardState::new();
        state.begin_fetch();
        let model = state.display(Category::Performance);
        assert_eq!(model.daily, PLACEHOLDERS.get(Category::Performance).daily);

        let token = state.begin_fetch();
        state.apply(token, Ok(data("42")));
        let model = state.display(Category::Performance);
        assert_eq!(model.summary[0].value, "42");
    }
}
