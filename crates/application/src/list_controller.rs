//! Generic paginated list control-flow.
//!
//! Every list screen shares the same lifecycle: load a page with the
//! current filters, debounce search input, reset to page 1 when a filter
//! changes, and make sure a stale response can never overwrite newer state.
//! The controller factors that skeleton once; a screen supplies only the
//! backend and its filter shape.

use std::collections::BTreeSet;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use std::time::Duration;

use async_trait::async_trait;
use casaflow_core::{ClientError, ClientResult};
use casaflow_domain::{
    DEFAULT_PAGE_SIZE, ListQuery, Page, PaginationState, SearchEvaluation, evaluate_search_input,
};
use uuid::Uuid;

use crate::client_ports::{CapabilityCheck, NotificationSink};
use crate::preferences::RoutePreferenceStore;


/// Quiet period search input must survive before it is evaluated.
///
/// Not a nicety: without it, overlapping loads for intermediate keystrokes
/// could resolve out of order and overwrite newer results.
pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(300);

/// Load/delete port a list screen plugs into the controller.
#[async_trait]
pub trait ListBackend<T, F>: Send + Sync {
    /// Loads one page for the query.
    async fn load(&self, query: ListQuery<F>) -> ClientResult<Page<T>>;

    /// Deletes one row by id.
    async fn delete(&self, id: Uuid) -> ClientResult<()>;
}

/// Lifecycle phase of a list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListPhase {
    /// Nothing loaded yet.
    Idle,
    /// A load is in flight.
    Loading,
    /// The last load succeeded.
    Loaded,
    /// The last load failed; the list shows the empty first-page state.
    Failed,
}

/// Construction parameters for a list controller.
#[derive(Debug, Clone)]
pub struct ListControllerParams {
    /// Permission module key gating the list (e.g. `banks`).
    pub module: String,
    /// Stable route key for per-route preferences.
    pub route: String,
    /// Human resource label used in notifications.
    pub label: String,
}

struct ListState<T, F> {
    items: Vec<T>,
    pagination: PaginationState,
    phase: ListPhase,
    /// Raw input, echoed to the UI on every keystroke.
    search_input: String,
    /// The settled term actually sent to the server, when one is applied.
    applied_search: Option<String>,
    filters: F,
    selection: BTreeSet<Uuid>,
}

struct ListCore<T, F> {
    backend: Arc<dyn ListBackend<T, F>>,
    capabilities: Arc<dyn CapabilityCheck>,
    notifications: Arc<dyn NotificationSink>,
    preferences: RoutePreferenceStore,
    module: String,
    route: String,
    label: String,
    state: Mutex<ListState<T, F>>,
    search_epoch: AtomicU64,
    load_epoch: AtomicU64,
}

/// Reusable paginated list controller, one per mounted list screen.
///
/// A cheap handle over shared state: clones observe and drive the same
/// list. Debounce timers hold only weak references, so once the screen
/// drops its last handle, pending evaluations become no-ops instead of
/// touching a dead list.
pub struct ListController<T, F> {
    core: Arc<ListCore<T, F>>,
}

impl<T, F> Clone for ListController<T, F> {
    fn clone(&self) -> Self {
        Self {
            core: self.core.clone(),
        }
    }
}

impl<T, F> ListController<T, F>
where
    T: Clone + Send + 'static,
    F: Clone + Default + PartialEq + Send + 'static,
{
    /// Creates a controller in the idle state. The page size comes from
    /// the per-route preference when one is stored.
    #[must_use]
    pub fn new(
        backend: Arc<dyn ListBackend<T, F>>,
        capabilities: Arc<dyn CapabilityCheck>,
        notifications: Arc<dyn NotificationSink>,
        preferences: RoutePreferenceStore,
        params: ListControllerParams,
    ) -> Self {
        let page_size = preferences
            .page_size(&params.route)
            .unwrap_or(DEFAULT_PAGE_SIZE);

        Self {
            core: Arc::new(ListCore {
                backend,
                capabilities,
                notifications,
                preferences,
                module: params.module,
                route: params.route,
                label: params.label,
                state: Mutex::new(ListState {
                    items: Vec::new(),
                    pagination: PaginationState::new(page_size),
                    phase: ListPhase::Idle,
                    search_input: String::new(),
                    applied_search: None,
                    filters: F::default(),
                    selection: BTreeSet::new(),
                }),
                search_epoch: AtomicU64::new(0),
                load_epoch: AtomicU64::new(0),
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, ListState<T, F>> {
        self.core
            .state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Loads the current page with the applied search and filters.
    ///
    /// Success atomically replaces items and totals and clears the row
    /// selection, so a selection can never reference rows from another
    /// page or filter. Failure resets to the empty first-page state,
    /// clears the selection, and notifies; nothing is retried. A response
    /// superseded by a newer load is dropped.
    pub async fn load(&self) {
        if !self.core.capabilities.can_view(&self.core.module) {
            tracing::warn!(module = %self.core.module, "list load blocked, no view permission");
            let mut state = self.lock();
            state.items.clear();
            state.pagination.reset_after_failure();
            state.selection.clear();
            state.phase = ListPhase::Failed;
            return;
        }

        let epoch = self.core.load_epoch.fetch_add(1, Ordering::SeqCst) + 1;
        let query = {
            let mut state = self.lock();
            state.phase = ListPhase::Loading;
            ListQuery {
                current_page: state.pagination.current_page(),
                page_size: state.pagination.page_size(),
                search_query: state.applied_search.clone(),
                filters: state.filters.clone(),
            }
        };

        let outcome = self.core.backend.load(query).await;

        if self.core.load_epoch.load(Ordering::SeqCst) != epoch {
            // A newer load superseded this one; its result wins.
            return;
        }

        match outcome {
            Ok(page) => {
                let mut state = self.lock();
                state.items = page.result;
                state
                    .pagination
                    .apply_totals(page.current_page, page.total_pages, page.total_items);
                state.selection.clear();
                state.phase = ListPhase::Loaded;
            }
            Err(error) => {
                {
                    let mut state = self.lock();
                    state.items.clear();
                    state.pagination.reset_after_failure();
                    state.selection.clear();
                    state.phase = ListPhase::Failed;
                }
                tracing::error!(route = %self.core.route, error = %error, "list load failed");
                self.core
                    .notifications
                    .error(&self.core.label, &error.to_string());
            }
        }
    }

    /// Records raw search input for immediate UI echo and schedules the
    /// debounced evaluation. Only the last input inside the quiet window
    /// is evaluated; earlier pending evaluations become no-ops.
    pub fn set_search_input(&self, text: &str) {
        {
            let mut state = self.lock();
            state.search_input = text.to_owned();
        }

        let epoch = self.core.search_epoch.fetch_add(1, Ordering::SeqCst) + 1;
        let core: Weak<ListCore<T, F>> = Arc::downgrade(&self.core);
        let text = text.to_owned();

        tokio::spawn(async move {
            tokio::time::sleep(SEARCH_DEBOUNCE).await;

            let Some(core) = core.upgrade() else {
                return;
            };
            if core.search_epoch.load(Ordering::SeqCst) != epoch {
                return;
            }

            let controller = Self { core };
            controller.apply_settled_search(&text).await;
        });
    }

    /// Applies the settled search input.
    ///
    /// A term of three or more characters is applied (when it differs from
    /// the current one). Empty input clears an applied query. A 1-2
    /// character fragment also clears an applied query but is itself never
    /// sent. Every transition resets to page 1 and reloads.
    async fn apply_settled_search(&self, text: &str) {
        let reload = {
            let mut state = self.lock();
            match evaluate_search_input(text) {
                SearchEvaluation::Apply(term) => {
                    if state.applied_search.as_deref() == Some(term.as_str()) {
                        false
                    } else {
                        state.applied_search = Some(term);
                        state.pagination.reset_to_first_page();
                        true
                    }
                }
                SearchEvaluation::Reset | SearchEvaluation::Fragment => {
                    if state.applied_search.is_some() {
                        state.applied_search = None;
                        state.pagination.reset_to_first_page();
                        true
                    } else {
                        false
                    }
                }
            }
        };

        if reload {
            self.load().await;
        }
    }

    /// Replaces the filter fields, resets to page 1, and reloads.
    pub async fn set_filters(&self, filters: F) {
        {
            let mut state = self.lock();
            state.filters = filters;
            state.pagination.reset_to_first_page();
        }
        self.load().await;
    }

    /// Moves to another page, preserving filters. Out-of-bounds and
    /// same-page requests are no-ops.
    pub async fn change_page(&self, page: u32) {
        let changed = self.lock().pagination.set_page(page);
        if changed {
            self.load().await;
        }
    }

    /// Changes the page size, persists it as the per-route preference,
    /// resets to page 1, and reloads.
    pub async fn change_page_size(&self, page_size: u32) {
        {
            let mut state = self.lock();
            state.pagination.set_page_size(page_size);
        }
        self.core
            .preferences
            .set_page_size(&self.core.route, page_size.max(1));
        self.load().await;
    }

    /// Clears search (raw and applied) and every filter field, resets to
    /// page 1, and reloads. Pending debounced evaluations are cancelled.
    pub async fn reset_filters(&self) {
        self.core.search_epoch.fetch_add(1, Ordering::SeqCst);
        {
            let mut state = self.lock();
            state.search_input.clear();
            state.applied_search = None;
            state.filters = F::default();
            state.pagination.reset_to_first_page();
        }
        self.load().await;
    }

    /// Deletes one row.
    ///
    /// The selection forgets the row immediately, but the rendered page is
    /// only replaced by a full reload after the server confirms, so counts
    /// never drift. When the deleted row was the last one on the final
    /// page, the page is clamped to the recomputed total and reloaded
    /// again.
    pub async fn delete_row(&self, id: Uuid) -> ClientResult<()> {
        if !self.core.capabilities.can_delete(&self.core.module) {
            return Err(ClientError::Forbidden(format!(
                "missing delete permission for '{}'",
                self.core.module
            )));
        }

        {
            let mut state = self.lock();
            state.selection.remove(&id);
        }

        if let Err(error) = self.core.backend.delete(id).await {
            self.core
                .notifications
                .error(&self.core.label, &error.to_string());
            return Err(error);
        }

        self.load().await;

        let clamped = self.lock().pagination.clamp_to_last_page();
        if clamped {
            self.load().await;
        }

        Ok(())
    }

    /// Marks a row as selected.
    pub fn select(&self, id: Uuid) {
        self.lock().selection.insert(id);
    }

    /// Unmarks a row.
    pub fn deselect(&self, id: Uuid) {
        self.lock().selection.remove(&id);
    }

    /// Returns the selected row ids.
    #[must_use]
    pub fn selection(&self) -> BTreeSet<Uuid> {
        self.lock().selection.clone()
    }

    /// Returns a snapshot of the current rows.
    #[must_use]
    pub fn items(&self) -> Vec<T> {
        self.lock().items.clone()
    }

    /// Returns the current page window.
    #[must_use]
    pub fn pagination(&self) -> PaginationState {
        self.lock().pagination
    }

    /// Returns the lifecycle phase.
    #[must_use]
    pub fn phase(&self) -> ListPhase {
        self.lock().phase
    }

    /// Returns whether a load is in flight.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.phase() == ListPhase::Loading
    }

    /// Returns the raw, unthrottled search input for UI echo.
    #[must_use]
    pub fn search_input(&self) -> String {
        self.lock().search_input.clone()
    }

    /// Returns the search term actually applied to requests, if any.
    #[must_use]
    pub fn applied_search(&self) -> Option<String> {
        self.lock().applied_search.clone()
    }

    /// Returns whether a search or any non-default filter is applied,
    /// driving the "reset filters" affordance.
    #[must_use]
    pub fn has_active_filters(&self) -> bool {
        let state = self.lock();
        state.applied_search.is_some() || state.filters != F::default()
    }
}
