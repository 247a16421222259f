// Repository issue view-state store.
//
// Parse failures reject before any network call. A failed fetch only
// touches the flags and error message; the issue list and repository
// reference stay as they were. Generation counters give latest-wins
// semantics across overlapping requests.

use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::watch;
use tracing::debug;

use octoview_api::{Error, Issue, IssuesClient, PageRequest, RepositoryRef};

/// Page size for every issue listing request.
const PER_PAGE: u32 = 10;

const NOT_FOUND_MESSAGE: &str =
    "Repository not found. Check that the URL is correct and the repository is public.";
const LOAD_FALLBACK: &str = "Failed to load the repository's issues";
const PAGE_FALLBACK: &str = "Failed to load the page";

/// Issue-listing view-state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssueListState {
    pub issues: Vec<Issue>,
    pub repository: Option<RepositoryRef>,
    pub current_page: u32,
    pub total_pages: u32,
    pub is_loading: bool,
    pub error: Option<String>,
}

impl Default for IssueListState {
    fn default() -> Self {
        Self {
            issues: Vec::new(),
            repository: None,
            current_page: 1,
            total_pages: 1,
            is_loading: false,
            error: None,
        }
    }
}

pub struct IssueStore {
    client: IssuesClient,
    state: watch::Sender<IssueListState>,
    generation: AtomicU64,
}

impl IssueStore {
    pub fn new(client: IssuesClient) -> Self {
        let (state, _) = watch::channel(IssueListState::default());
        Self {
            client,
            state,
            generation: AtomicU64::new(0),
        }
    }

    /// Current state snapshot (cheap clone).
    pub fn state(&self) -> IssueListState {
        self.state.borrow().clone()
    }

    /// Subscribe to state changes via a `watch::Receiver`.
    pub fn subscribe(&self) -> watch::Receiver<IssueListState> {
        self.state.subscribe()
    }

    // ── Actions ──────────────────────────────────────────────────────

    /// Parse `repo_url` and load one page of its issues (page size 10).
    ///
    /// A malformed URL rejects before any network call. On success the
    /// issue list is replaced wholesale and the repository reference and
    /// page are updated together.
    pub async fn load_issues_from_url(&self, repo_url: &str, page: u32) {
        let seq = self.begin_action();

        let repository = match IssuesClient::parse_repository_url(repo_url) {
            Ok(repository) => repository,
            Err(e) => {
                self.reject(seq, e.to_string());
                return;
            }
        };

        let pagination = PageRequest {
            page,
            per_page: PER_PAGE,
        };
        match self.client.get_repository_issues(&repository, pagination).await {
            Ok(issues) => self.patch_if_current(seq, move |s| {
                s.issues = issues;
                s.repository = Some(repository);
                s.current_page = page;
                s.is_loading = false;
            }),
            Err(e) => self.reject(seq, fetch_error_message(&e, LOAD_FALLBACK)),
        }
    }

    /// Load another page for the repository already in state.
    ///
    /// Without a repository this is a complete no-op: no flag flips, no
    /// error, no request.
    pub async fn load_next_page(&self, page: u32) {
        let Some(repository) = self.state.borrow().repository.clone() else {
            debug!("page load without a repository, ignoring");
            return;
        };

        let seq = self.begin_action();

        let pagination = PageRequest {
            page,
            per_page: PER_PAGE,
        };
        match self.client.get_repository_issues(&repository, pagination).await {
            Ok(issues) => self.patch_if_current(seq, move |s| {
                s.issues = issues;
                s.current_page = page;
                s.is_loading = false;
            }),
            Err(e) => self.reject(seq, fetch_error_message(&e, PAGE_FALLBACK)),
        }
    }

    /// Reset to the initial state.
    pub fn clear_issues(&self) {
        // Invalidate any in-flight request's pending patch.
        self.generation.fetch_add(1, Ordering::SeqCst);
        self.state.send_modify(|s| *s = IssueListState::default());
    }

    /// Null out only the error message.
    pub fn clear_error(&self) {
        self.state.send_modify(|s| s.error = None);
    }

    // ── Internal transitions ─────────────────────────────────────────

    fn begin_action(&self) -> u64 {
        let seq = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        self.state.send_modify(|s| {
            s.is_loading = true;
            s.error = None;
        });
        seq
    }

    fn reject(&self, seq: u64, message: String) {
        self.patch_if_current(seq, move |s| {
            s.error = Some(message);
            s.is_loading = false;
        });
    }

    /// Apply a patch only while `seq` is still the latest issued action.
    fn patch_if_current(&self, seq: u64, patch: impl FnOnce(&mut IssueListState)) {
        if self.generation.load(Ordering::SeqCst) == seq {
            self.state.send_modify(patch);
        } else {
            debug!(seq, "discarding stale state patch");
        }
    }
}

/// A missing repository gets a specific hint; anything else surfaces the
/// service's message, with a generic fallback if it is empty.
fn fetch_error_message(error: &Error, fallback: &str) -> String {
    if error.is_not_found() {
        return NOT_FOUND_MESSAGE.to_owned();
    }
    let message = error.to_string();
    if message.is_empty() {
        fallback.to_owned()
    } else {
        message
    }
}
