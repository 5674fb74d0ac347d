use async_trait::async_trait;
use domain::{DomainError, Project, ProjectPage, User};
use futures::future::try_join_all;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, warn};

/// Where the feed pages come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedScope {
    Global,
    Author(String),
}

#[async_trait]
pub trait ProjectPageSource: Send + Sync {
    async fn fetch_page(
        &self,
        scope: &FeedScope,
        page: u32,
        page_size: u32,
    ) -> Result<ProjectPage, DomainError>;
}

#[async_trait]
pub trait AuthorLookup: Send + Sync {
    async fn find_author(&self, user_id: &str) -> Result<User, DomainError>;
}

/// A project card. `author` is only resolved on the global feed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeedEntry {
    #[serde(flatten)]
    pub project: Project,
    pub author: Option<User>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedState {
    Idle,
    Loading,
    Exhausted,
}

/// Handed out by [`FeedLoader::begin_load`]; identifies one in-flight fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageTicket {
    pub generation: u64,
    pub page: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FetchedPage {
    pub entries: Vec<FeedEntry>,
    pub total_count: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Trigger ignored, a fetch is in flight or the feed is exhausted.
    Skipped,
    Appended(usize),
    Exhausted,
    /// The ticket no longer matches the fetch in flight.
    Stale,
}

/// Incremental loader behind an infinite-scroll project list.
///
/// Page 1 is rendered up front, so the first trigger fetches page 2. At most
/// one fetch is outstanding; triggers while loading or exhausted are no-ops.
/// Any failure ends the feed instead of retrying.
pub struct FeedLoader {
    scope: FeedScope,
    page_size: u32,
    source: Arc<dyn ProjectPageSource>,
    authors: Arc<dyn AuthorLookup>,
    state: FeedState,
    pages_loaded: u32,
    generation: u64,
    items: Vec<FeedEntry>,
}

impl FeedLoader {
    pub fn new(
        scope: FeedScope,
        page_size: u32,
        source: Arc<dyn ProjectPageSource>,
        authors: Arc<dyn AuthorLookup>,
    ) -> Self {
        Self {
            scope,
            page_size,
            source,
            authors,
            state: FeedState::Idle,
            pages_loaded: 1,
            generation: 0,
            items: Vec::new(),
        }
    }

    /// Seeds the loader with the already rendered first page, so an empty or
    /// complete first page needs no further fetch.
    pub fn from_first_page(
        scope: FeedScope,
        page_size: u32,
        source: Arc<dyn ProjectPageSource>,
        authors: Arc<dyn AuthorLookup>,
        first_page: Vec<FeedEntry>,
        total_count: u64,
    ) -> Self {
        let mut loader = Self::new(scope, page_size, source, authors);
        if first_page.is_empty() || first_page.len() as u64 >= total_count {
            loader.state = FeedState::Exhausted;
        }
        loader.items = first_page;
        loader
    }

    pub fn state(&self) -> FeedState {
        self.state
    }

    pub fn has_more(&self) -> bool {
        self.state != FeedState::Exhausted
    }

    pub fn pages_loaded(&self) -> u32 {
        self.pages_loaded
    }

    pub fn items(&self) -> &[FeedEntry] {
        &self.items
    }

    pub fn scope(&self) -> &FeedScope {
        &self.scope
    }

    /// IDLE -> LOADING. `None` when a fetch is already out or the feed is done.
    pub fn begin_load(&mut self) -> Option<PageTicket> {
        if self.state != FeedState::Idle {
            return None;
        }
        self.state = FeedState::Loading;
        Some(PageTicket {
            generation: self.generation,
            page: self.pages_loaded + 1,
        })
    }

    /// Fetches the ticket's page and, on the global feed, resolves every
    /// author concurrently. One failed lookup fails the whole page.
    pub async fn fetch(&self, ticket: PageTicket) -> Result<FetchedPage, DomainError> {
        let page = self
            .source
            .fetch_page(&self.scope, ticket.page, self.page_size)
            .await?;

        let entries = match &self.scope {
            FeedScope::Author(_) => page
                .items
                .into_iter()
                .map(|project| FeedEntry {
                    project,
                    author: None,
                })
                .collect(),
            FeedScope::Global => {
                let authors = self.authors.clone();
                try_join_all(page.items.into_iter().map(|project| {
                    let authors = authors.clone();
                    async move {
                        let author = authors.find_author(&project.author_id).await?;
                        Ok::<_, DomainError>(FeedEntry {
                            project,
                            author: Some(author),
                        })
                    }
                }))
                .await?
            }
        };

        Ok(FetchedPage {
            entries,
            total_count: page.total_count,
        })
    }

    /// Commits a fetch result. Only the ticket of the fetch currently in
    /// flight is accepted; tickets from before a reset or already applied
    /// ones are dropped.
    pub fn apply(
        &mut self,
        ticket: PageTicket,
        result: Result<FetchedPage, DomainError>,
    ) -> LoadOutcome {
        if !self.is_in_flight(ticket) {
            debug!(
                page = ticket.page,
                generation = ticket.generation,
                "Discarding page that is no longer awaited"
            );
            return LoadOutcome::Stale;
        }

        let fetched = match result {
            Ok(fetched) => fetched,
            Err(e) => {
                warn!(page = ticket.page, error = %e, "Feed page failed, no more pages will load");
                self.state = FeedState::Exhausted;
                return LoadOutcome::Exhausted;
            }
        };

        if fetched.entries.is_empty() {
            self.state = FeedState::Exhausted;
            return LoadOutcome::Exhausted;
        }

        let appended = fetched.entries.len();
        self.items.extend(fetched.entries);
        self.pages_loaded = ticket.page;
        self.state = if self.items.len() as u64 >= fetched.total_count {
            FeedState::Exhausted
        } else {
            FeedState::Idle
        };

        debug!(
            page = ticket.page,
            appended,
            loaded = self.items.len(),
            total_count = fetched.total_count,
            "Feed page applied"
        );
        LoadOutcome::Appended(appended)
    }

    fn is_in_flight(&self, ticket: PageTicket) -> bool {
        self.state == FeedState::Loading
            && ticket.generation == self.generation
            && ticket.page == self.pages_loaded + 1
    }

    /// Back to an empty feed at page 1. Fetches still in flight become stale.
    pub fn reset(&mut self) {
        self.generation += 1;
        self.pages_loaded = 1;
        self.items.clear();
        self.state = FeedState::Idle;
    }

    /// The load-more trigger: one full begin, fetch, apply cycle.
    pub async fn load_more(&mut self) -> LoadOutcome {
        let Some(ticket) = self.begin_load() else {
            return LoadOutcome::Skipped;
        };
        let result = self.fetch(ticket).await;
        self.apply(ticket, result)
    }
}
