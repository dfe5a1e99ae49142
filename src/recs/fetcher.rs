use std::{collections::HashSet, sync::Arc};

use log::error;
use tokio::sync::Mutex;

use crate::context::ContextStore;
use crate::events::{EventBus, StorefrontEvent};

use super::client::{RecsClient, RecsRequest};
use super::types::{PageType, RecsError, RecsResponse};

/// Caller-supplied fetch input. The page type arrives as a raw string so
/// malformed input fails fast with the documented errors.
#[derive(Debug, Clone, Default)]
pub struct RecsProps {
    pub page_type: Option<String>,
}

impl RecsProps {
    pub fn new(page_type: impl Into<String>) -> Self {
        Self {
            page_type: Some(page_type.into()),
        }
    }
}

/// Hook-style fetch state: the latest response, an in-flight flag, and the
/// last non-fatal fetch error.
#[derive(Debug, Clone, Default)]
pub struct RecsState {
    pub data: Option<RecsResponse>,
    pub is_loading: bool,
    pub error: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// No storefront instance (or an empty environment id) in the context.
    MissingStorefrontContext,
    /// Product page without a product SKU in the context.
    MissingProductSku,
    /// This (page type, SKU) pair has already been fetched.
    AlreadyFetched,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    Fetched,
    Skipped(SkipReason),
    /// The client call failed; the error is surfaced in [`RecsState`].
    Failed,
}

struct FetcherState {
    state: RecsState,
    fetched: HashSet<(PageType, Option<String>)>,
}

/// Guarded recommendations fetcher.
///
/// A fetch is issued only once the required context is present, and at
/// most once per distinct (page type, SKU) pair. Request and response are
/// published on the bus around the client call; client failures are local
/// and non-fatal.
#[derive(Clone)]
pub struct RecsFetcher {
    client: Arc<dyn RecsClient>,
    context: ContextStore,
    bus: EventBus,
    inner: Arc<Mutex<FetcherState>>,
}

impl RecsFetcher {
    pub fn new(client: Arc<dyn RecsClient>, context: ContextStore, bus: EventBus) -> Self {
        Self {
            client,
            context,
            bus,
            inner: Arc::new(Mutex::new(FetcherState {
                state: RecsState::default(),
                fetched: HashSet::new(),
            })),
        }
    }

    pub async fn state(&self) -> RecsState {
        self.inner.lock().await.state.clone()
    }

    pub async fn fetch(&self, props: &RecsProps) -> Result<FetchOutcome, RecsError> {
        let raw_page_type = props
            .page_type
            .as_deref()
            .ok_or(RecsError::MissingPageType)?;
        let page_type: PageType = raw_page_type.parse()?;

        let Some(storefront) = self.context.storefront_instance() else {
            return Ok(FetchOutcome::Skipped(SkipReason::MissingStorefrontContext));
        };
        if storefront.environment_id.is_empty() {
            return Ok(FetchOutcome::Skipped(SkipReason::MissingStorefrontContext));
        }

        let current_sku = if page_type == PageType::Product {
            match self.context.product().and_then(|product| product.sku) {
                Some(sku) => Some(sku),
                None => return Ok(FetchOutcome::Skipped(SkipReason::MissingProductSku)),
            }
        } else {
            None
        };

        let key = (page_type, current_sku.clone());
        {
            let mut guard = self.inner.lock().await;
            if guard.fetched.contains(&key) {
                return Ok(FetchOutcome::Skipped(SkipReason::AlreadyFetched));
            }
            // Claimed before the await so a concurrent caller cannot issue
            // a duplicate request for the same pair.
            guard.fetched.insert(key);
            guard.state.is_loading = true;
            guard.state.error = None;
        }

        let request = RecsRequest {
            environment_id: storefront.environment_id,
            store_view_code: storefront.store_view_code,
            page_type,
            current_sku,
        };

        self.bus
            .publish(StorefrontEvent::RecsRequestSent { page_type });

        match self.client.fetch_preconfigured(&request).await {
            Ok(response) => {
                self.bus.publish(StorefrontEvent::RecsResponseReceived {
                    page_type,
                    rec_units: response.results.clone(),
                });
                let mut guard = self.inner.lock().await;
                guard.state.data = Some(response);
                guard.state.is_loading = false;
                Ok(FetchOutcome::Fetched)
            }
            Err(err) => {
                error!("recommendations fetch failed: {err:?}");
                let mut guard = self.inner.lock().await;
                guard.state.is_loading = false;
                guard.state.error = Some(err.to_string());
                Ok(FetchOutcome::Failed)
            }
        }
    }
}
