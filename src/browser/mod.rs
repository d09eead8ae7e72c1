//! Paginated repository browser: the fetch/state-reconciliation engine.
//!
//! [`RepoBrowser`] mediates between user intents ([`search`],
//! [`load_more`], [`lookup`]) and a [`RepoFetcher`], maintaining one
//! pagination session at a time and publishing a single
//! [`BrowserState`] that consumers observe through a watch channel.
//!
//! A session tracks the subject being listed, the next page to request,
//! whether the subject is exhausted, and the accumulated records. The
//! session is guarded by a generation counter: a `search` supersedes
//! whatever was in flight, and any completion carrying a stale
//! generation is discarded without touching state.
//!
//! Page advancement is strictly sequential. The in-flight flag bounds
//! the fetcher to one outstanding call per session, which is also what
//! makes the accumulated list free of duplicated pages without any
//! per-record deduplication.
//!
//! [`search`]: RepoBrowser::search
//! [`load_more`]: RepoBrowser::load_more
//! [`lookup`]: RepoBrowser::lookup

use std::sync::{Arc, Mutex, MutexGuard};

use tokio::sync::watch;

use crate::fetcher::RepoFetcher;
use crate::models::{PageRequest, Repository, DEFAULT_PAGE_SIZE};

/// Observable state published by the browser.
///
/// Exactly one variant is current at any time. `Idle` until the first
/// search; there is no terminal variant, the browser is reusable across
/// searches indefinitely.
#[derive(Debug, Clone, PartialEq)]
pub enum BrowserState {
    /// No search has been issued yet
    Idle,

    /// The initial page of a fresh search is being fetched
    Loading,

    /// At least one page has loaded successfully
    Success {
        /// Accumulated records, page order then within-page order
        repos: Vec<Repository>,
        /// A further page is currently being fetched
        is_fetching_more: bool,
    },

    /// The last fetch failed
    Error {
        /// Human-readable failure description
        message: String,
    },
}

/// The mutable pagination session owned by the browser.
#[derive(Debug)]
struct Session {
    /// Subject currently targeted; empty until the first search
    subject: String,
    /// Next page to request for the current subject
    cursor: u32,
    /// True once a page came back empty for the current subject
    exhausted: bool,
    /// True while a fetch for the current session is outstanding
    in_flight: bool,
    /// Accumulated records, cleared on a new subject
    repos: Vec<Repository>,
    /// Session token; bumped by every `search`
    generation: u64,
}

impl Session {
    fn new() -> Self {
        Self {
            subject: String::new(),
            cursor: 1,
            exhausted: false,
            in_flight: false,
            repos: Vec::new(),
            generation: 0,
        }
    }
}

/// Pagination state machine over a [`RepoFetcher`].
#[derive(Debug)]
pub struct RepoBrowser {
    fetcher: Arc<dyn RepoFetcher>,
    session: Mutex<Session>,
    state: watch::Sender<BrowserState>,
    page_size: u32,
}

impl RepoBrowser {
    /// Create a browser over the given fetcher, starting in `Idle`.
    pub fn new(fetcher: Arc<dyn RepoFetcher>) -> Self {
        let (state, _) = watch::channel(BrowserState::Idle);
        Self {
            fetcher,
            session: Mutex::new(Session::new()),
            state,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    /// Set the page size requested from the fetcher.
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    /// Subscribe to state publications.
    ///
    /// Watch semantics: publications are strictly ordered, and a
    /// subscriber always observes the latest state (intermediate
    /// states may be conflated for slow readers).
    pub fn subscribe(&self) -> watch::Receiver<BrowserState> {
        self.state.subscribe()
    }

    /// Snapshot of the current published state.
    pub fn current_state(&self) -> BrowserState {
        self.state.borrow().clone()
    }

    /// Next page number that would be requested for the current subject.
    pub fn cursor(&self) -> u32 {
        self.session().cursor
    }

    /// Whether the current subject has no further pages.
    pub fn is_exhausted(&self) -> bool {
        self.session().exhausted
    }

    /// Subject currently targeted; empty until the first search.
    pub fn subject(&self) -> String {
        self.session().subject.clone()
    }

    /// Start a new search session for `subject`.
    ///
    /// Unconditionally resets the session (cursor back to 1, results
    /// cleared) and fetches page 1. If a fetch from a previous session
    /// is still outstanding, its eventual completion is discarded: the
    /// generation bump here supersedes it.
    ///
    /// Blank-subject rejection is the caller's responsibility.
    pub async fn search(&self, subject: &str) {
        let (generation, request) = {
            let mut session = self.session();
            session.generation += 1;
            session.subject = subject.to_string();
            session.cursor = 1;
            session.exhausted = false;
            session.in_flight = true;
            session.repos.clear();
            self.state.send_replace(BrowserState::Loading);
            (
                session.generation,
                PageRequest::new(subject, 1).per_page(self.page_size),
            )
        };

        tracing::info!(subject, "starting repository search");

        let result = self.fetcher.fetch_page(&request).await;

        let mut session = self.session();
        if session.generation != generation {
            tracing::debug!(subject, "discarding completion of superseded search");
            return;
        }

        session.in_flight = false;
        match result {
            Ok(repos) => {
                session.exhausted = repos.is_empty();
                session.repos = repos;
                self.state.send_replace(BrowserState::Success {
                    repos: session.repos.clone(),
                    is_fetching_more: false,
                });
            }
            Err(e) => {
                tracing::warn!(subject, error = %e, "initial fetch failed");
                self.state.send_replace(BrowserState::Error {
                    message: format!("failed to load repositories for \"{}\": {}", subject, e),
                });
            }
        }
    }

    /// Fetch the next page for the current subject.
    ///
    /// A no-op when a fetch is already in flight, the subject is
    /// exhausted, or the current state is not `Success`. The cursor is
    /// incremented before the fetch is issued, so after a pagination
    /// failure it already points at the intended next page.
    pub async fn load_more(&self) {
        let (generation, request, subject) = {
            let mut session = self.session();
            if session.in_flight || session.exhausted {
                return;
            }
            if !matches!(&*self.state.borrow(), BrowserState::Success { .. }) {
                return;
            }

            session.in_flight = true;
            session.cursor += 1;
            self.state.send_replace(BrowserState::Success {
                repos: session.repos.clone(),
                is_fetching_more: true,
            });
            (
                session.generation,
                PageRequest::new(session.subject.clone(), session.cursor)
                    .per_page(self.page_size),
                session.subject.clone(),
            )
        };

        tracing::debug!(subject = %subject, page = request.page, "loading more repositories");

        let result = self.fetcher.fetch_page(&request).await;

        let mut session = self.session();
        if session.generation != generation {
            tracing::debug!(subject = %subject, "discarding completion of superseded pagination");
            return;
        }

        session.in_flight = false;
        match result {
            Ok(repos) => {
                if repos.is_empty() {
                    session.exhausted = true;
                } else {
                    session.repos.extend(repos);
                }
                self.state.send_replace(BrowserState::Success {
                    repos: session.repos.clone(),
                    is_fetching_more: false,
                });
            }
            Err(e) => {
                tracing::warn!(subject = %subject, page = request.page, error = %e, "pagination fetch failed");
                self.state.send_replace(BrowserState::Error {
                    message: format!(
                        "failed to load more repositories for \"{}\": {}",
                        subject, e
                    ),
                });
            }
        }
    }

    /// Resolve a previously fetched record by exact name.
    ///
    /// Pure read over the accumulated results; no fetch is issued.
    pub fn lookup(&self, name: &str) -> Option<Repository> {
        self.session().repos.iter().find(|r| r.name == name).cloned()
    }

    fn session(&self) -> MutexGuard<'_, Session> {
        // The guard is never held across an await point.
        self.session.lock().expect("session lock poisoned")
    }
}
