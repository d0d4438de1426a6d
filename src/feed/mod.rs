//! Ranked opportunities for one strategy.

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{debug, warn};

use crate::domain::{Opportunity, OpportunityQuery, StrategyType};
use crate::gateway::{Gateway, GatewayError};

/// Entries shown to the operator. The service ranks, the client only truncates.
pub const DISPLAY_LIMIT: usize = 5;

/// Lifecycle of the last fetch.
#[derive(Debug, Clone, PartialEq)]
pub enum FeedState {
    Idle,
    Loading,
    Loaded(Vec<Opportunity>),
    Errored(GatewayError),
}

#[derive(Debug)]
struct Inner {
    state: FeedState,
    strategy: Option<StrategyType>,
    last_good: Vec<Opportunity>,
    /// Sequence number of the newest fetch; older answers are dropped.
    request: u64,
}

/// OpportunityFeed fetches a strategy's opportunities and keeps the last good list.
///
/// State lives behind a lock so readers see `Loading` while a fetch is out.
pub struct OpportunityFeed {
    gateway: Arc<dyn Gateway>,
    inner: RwLock<Inner>,
}

impl OpportunityFeed {
    pub fn new(gateway: Arc<dyn Gateway>) -> Self {
        Self {
            gateway,
            inner: RwLock::new(Inner {
                state: FeedState::Idle,
                strategy: None,
                last_good: Vec::new(),
                request: 0,
            }),
        }
    }

    pub async fn state(&self) -> FeedState {
        self.inner.read().await.state.clone()
    }

    /// Strategy of the most recent fetch.
    pub async fn strategy(&self) -> Option<StrategyType> {
        self.inner.read().await.strategy
    }

    pub async fn is_loading(&self) -> bool {
        self.inner.read().await.state == FeedState::Loading
    }

    /// Error of the most recent fetch, if it failed.
    pub async fn error(&self) -> Option<GatewayError> {
        match &self.inner.read().await.state {
            FeedState::Errored(e) => Some(e.clone()),
            _ => None,
        }
    }

    /// Fetches opportunities. A failure is recorded in the state and the
    /// previous list stays available through `top`.
    ///
    /// When fetches overlap, only the newest one is applied.
    pub async fn fetch(&self, strategy: StrategyType, query: &OpportunityQuery) -> FeedState {
        let request = {
            let mut inner = self.inner.write().await;
            if inner.strategy != Some(strategy) {
                inner.last_good.clear();
            }
            inner.strategy = Some(strategy);
            inner.state = FeedState::Loading;
            inner.request += 1;
            inner.request
        };

        let result = self.gateway.opportunities(strategy, query).await;

        let mut inner = self.inner.write().await;
        if inner.request != request {
            debug!(strategy = %strategy, "newer fetch pending, dropping result");
            return inner.state.clone();
        }

        match result {
            Ok(list) => {
                debug!(strategy = %strategy, count = list.len(), "Opportunities loaded");
                inner.last_good = list.clone();
                inner.state = FeedState::Loaded(list);
            }
            Err(e) => {
                warn!(strategy = %strategy, error = %e, kind = %e.kind(), "Failed to fetch opportunities");
                inner.state = FeedState::Errored(e);
            }
        }
        inner.state.clone()
    }

    /// First `n` entries in the order the service returned them.
    pub async fn top(&self, n: usize) -> Vec<Opportunity> {
        let inner = self.inner.read().await;
        inner.last_good.iter().take(n).cloned().collect()
    }

    /// Entries for display, capped at `DISPLAY_LIMIT`.
    pub async fn visible(&self) -> Vec<Opportunity> {
        self.top(DISPLAY_LIMIT).await
    }
}
