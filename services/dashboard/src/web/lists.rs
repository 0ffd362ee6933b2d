//! services/dashboard/src/web/lists.rs
//!
//! The load cycle shared by every list page: start the controller, call the
//! backend with the lock released, apply the outcome, render.

use crate::web::responses::session_expired;
use crate::web::state::{AppState, PageViews};
use crate::web::views::ListView;
use axum::{
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::future::Future;
use tracing::warn;
use travel_portal_core::domain::Paginated;
use travel_portal_core::listing::{ListController, ListQuery};
use travel_portal_core::ports::PortResult;
use utoipa::{IntoParams, ToSchema};

/// A pagination button press.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Nav {
    Next,
    Previous,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListParams {
    /// Requested page; values below 1 are treated as 1.
    pub page: Option<u32>,
    /// Search term. Submitting one without a page starts from page 1.
    pub search: Option<String>,
    /// Move relative to the current page. Ignored at either end.
    pub nav: Option<Nav>,
}

impl ListParams {
    /// Moves the controller into `Loading` and returns the query to send, or
    /// `None` when a pagination control was pressed while disabled.
    pub fn start<T>(&self, controller: &mut ListController<T>) -> Option<ListQuery> {
        match self.nav {
            Some(Nav::Next) => controller.next_page(),
            Some(Nav::Previous) => controller.previous_page(),
            None => match (&self.search, self.page) {
                (Some(term), None) => Some(controller.submit_search(term.clone())),
                _ => Some(controller.begin(self.page.unwrap_or(1), self.search.clone())),
            },
        }
    }
}

/// Picks one list controller out of a session's page state.
pub type Slot<T> = fn(&mut PageViews) -> &mut ListController<T>;

pub async fn list_page<T, F, Fut>(
    state: &AppState,
    token: &str,
    params: &ListParams,
    slot: Slot<T>,
    failure_message: &str,
    fetch: F,
) -> Response
where
    T: Clone + Serialize + Send + 'static,
    F: FnOnce(ListQuery) -> Fut,
    Fut: Future<Output = PortResult<Paginated<T>>>,
{
    let Some(query) = state.views.with(token, |v| params.start(slot(v))).await else {
        return render(state, token, slot).await;
    };

    let result = fetch(query).await;

    let outcome = state
        .views
        .with(token, |v| slot(v).finish(result, failure_message))
        .await;
    if let Err(err) = outcome {
        if err.invalidates_session() {
            return session_expired(state, token).await;
        }
        warn!("{}: {}", failure_message, err);
    }
    render(state, token, slot).await
}

async fn render<T>(state: &AppState, token: &str, slot: Slot<T>) -> Response
where
    T: Clone + Serialize + Send + 'static,
{
    let view = state.views.with(token, |v| ListView::render(slot(v))).await;
    Json(view).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_without_page_restarts_at_one() {
        let mut ctl = ListController::<u8>::new();
        ctl.begin(4, None);
        let params = ListParams {
            search: Some("budi".into()),
            ..Default::default()
        };
        let query = params.start(&mut ctl).unwrap();
        assert_eq!(query.page, 1);
        assert_eq!(query.search.as_deref(), Some("budi"));
    }

    #[test]
    fn disabled_nav_does_not_start_a_load() {
        let mut ctl = ListController::<u8>::new();
        let params = ListParams {
            nav: Some(Nav::Previous),
            ..Default::default()
        };
        assert!(params.start(&mut ctl).is_none());
        assert!(!ctl.is_loading());
    }

    #[test]
    fn zero_page_is_clamped() {
        let mut ctl = ListController::<u8>::new();
        let params = ListParams {
            page: Some(0),
            ..Default::default()
        };
        assert_eq!(params.start(&mut ctl).unwrap().page, 1);
    }
}
