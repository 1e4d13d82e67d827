//! Debounced drug-name autocomplete.
//!
//! Typing restarts a [`Debouncer`]; once input has been quiet for [`DEBOUNCE`],
//! [`Autocomplete::plan`] decides whether to search. Every search carries a [`Ticket`] and a
//! response is only shown if its ticket is still the newest one issued, so a slow response can
//! never overwrite the suggestions for a newer term.

use crate::selection::Selection;
use dic_types::Drug;
use std::time::Duration;
use tokio::time::{sleep_until, Instant};

/// Quiet period before a search is issued.
pub const DEBOUNCE: Duration = Duration::from_millis(300);

/// Shortest term, in characters, that triggers a search.
pub const MIN_TERM_CHARS: usize = 2;

/// Sequence number of an autocomplete search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ticket(u64);

/// What to do once the search term has settled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchPlan {
    /// Search for `term` and hand the response back with `ticket`.
    Fetch { ticket: Ticket, term: String },
    /// The term is too short; suggestions were cleared.
    Clear,
}

/// Suggestion list state.
#[derive(Debug, Default)]
pub struct Autocomplete {
    issued: u64,
    suggestions: Vec<Drug>,
}

impl Autocomplete {
    pub fn new() -> Self {
        Self::default()
    }

    /// Plan a search for the settled `term`.
    ///
    /// Always supersedes any search still in flight, including when the term is too short.
    pub fn plan(&mut self, term: &str) -> SearchPlan {
        let ticket = self.next_ticket();
        if term.chars().count() < MIN_TERM_CHARS {
            self.suggestions.clear();
            return SearchPlan::Clear;
        }
        SearchPlan::Fetch {
            ticket,
            term: term.to_string(),
        }
    }

    /// Apply the response for `ticket`.
    ///
    /// Stale responses are dropped and `false` is returned. Otherwise the suggestions become
    /// `results` minus anything already in `selection`.
    pub fn accept(&mut self, ticket: Ticket, results: Vec<Drug>, selection: &Selection) -> bool {
        if ticket != Ticket(self.issued) {
            tracing::debug!(?ticket, latest = self.issued, "discarding stale suggestions");
            return false;
        }
        self.suggestions = results
            .into_iter()
            .filter(|d| !selection.contains(d.id))
            .collect();
        true
    }

    /// Clear suggestions and invalidate searches in flight.
    pub fn clear(&mut self) {
        self.next_ticket();
        self.suggestions.clear();
    }

    /// Take the suggestion at `index`, clearing the list.
    pub fn pick(&mut self, index: usize) -> Option<Drug> {
        let drug = self.suggestions.get(index).cloned()?;
        self.clear();
        Some(drug)
    }

    pub fn suggestions(&self) -> &[Drug] {
        &self.suggestions
    }

    fn next_ticket(&mut self) -> Ticket {
        self.issued += 1;
        Ticket(self.issued)
    }
}

/// Single restartable quiet-period timer.
#[derive(Debug)]
pub struct Debouncer {
    delay: Duration,
    deadline: Option<Instant>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            deadline: None,
        }
    }

    /// Restart the quiet period from now.
    pub fn touch(&mut self) {
        self.deadline = Some(Instant::now() + self.delay);
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    /// Resolves once the quiet period has passed, then disarms. Never resolves while disarmed.
    pub async fn settled(&mut self) {
        match self.deadline {
            Some(deadline) => {
                sleep_until(deadline).await;
                self.deadline = None;
            }
            None => std::future::pending().await,
        }
    }
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(DEBOUNCE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drugs() -> Vec<Drug> {
        vec![Drug::new(1, "Aspirin"), Drug::new(7, "Aspartame")]
    }

    fn fetch_ticket(plan: SearchPlan) -> Ticket {
        match plan {
            SearchPlan::Fetch { ticket, .. } => ticket,
            SearchPlan::Clear => panic!("expected a fetch"),
        }
    }

    #[test]
    fn short_terms_clear_suggestions() {
        let mut autocomplete = Autocomplete::new();
        let ticket = fetch_ticket(autocomplete.plan("as"));
        assert!(autocomplete.accept(ticket, drugs(), &Selection::new()));
        assert_eq!(autocomplete.suggestions().len(), 2);

        assert_eq!(autocomplete.plan("a"), SearchPlan::Clear);
        assert!(autocomplete.suggestions().is_empty());
    }

    #[test]
    fn term_length_counts_characters() {
        let mut autocomplete = Autocomplete::new();
        assert_eq!(autocomplete.plan("é"), SearchPlan::Clear);
        assert!(matches!(autocomplete.plan("éa"), SearchPlan::Fetch { .. }));
    }

    #[test]
    fn stale_response_never_replaces_newer_one() {
        let mut autocomplete = Autocomplete::new();
        let older = fetch_ticket(autocomplete.plan("as"));
        let newer = fetch_ticket(autocomplete.plan("aspa"));

        assert!(autocomplete.accept(newer, vec![Drug::new(7, "Aspartame")], &Selection::new()));
        assert!(!autocomplete.accept(older, drugs(), &Selection::new()));

        assert_eq!(autocomplete.suggestions(), &[Drug::new(7, "Aspartame")]);
    }

    #[test]
    fn clearing_a_short_term_invalidates_in_flight_search() {
        let mut autocomplete = Autocomplete::new();
        let in_flight = fetch_ticket(autocomplete.plan("asp"));
        autocomplete.plan("");

        assert!(!autocomplete.accept(in_flight, drugs(), &Selection::new()));
        assert!(autocomplete.suggestions().is_empty());
    }

    #[test]
    fn selected_drugs_are_filtered_out() {
        let mut selection = Selection::new();
        selection.add(Drug::new(1, "Aspirin"));

        let mut autocomplete = Autocomplete::new();
        let ticket = fetch_ticket(autocomplete.plan("asp"));
        autocomplete.accept(ticket, drugs(), &selection);

        assert_eq!(autocomplete.suggestions(), &[Drug::new(7, "Aspartame")]);
    }

    #[test]
    fn pick_takes_suggestion_and_clears() {
        let mut autocomplete = Autocomplete::new();
        let ticket = fetch_ticket(autocomplete.plan("asp"));
        autocomplete.accept(ticket, drugs(), &Selection::new());

        assert_eq!(autocomplete.pick(1), Some(Drug::new(7, "Aspartame")));
        assert!(autocomplete.suggestions().is_empty());
        assert!(!autocomplete.accept(ticket, drugs(), &Selection::new()));
        assert_eq!(autocomplete.pick(0), None);
    }

    #[tokio::test(start_paused = true)]
    async fn debouncer_waits_for_quiet_period() {
        let mut debouncer = Debouncer::default();
        let start = Instant::now();

        debouncer.touch();
        tokio::time::advance(Duration::from_millis(200)).await;
        debouncer.touch();
        debouncer.settled().await;

        assert!(start.elapsed() >= Duration::from_millis(500));
        assert!(!debouncer.is_armed());
    }

    #[tokio::test(start_paused = true)]
    async fn cancelled_debouncer_never_fires() {
        let mut debouncer = Debouncer::default();
        debouncer.touch();
        debouncer.cancel();

        let fired = tokio::time::timeout(Duration::from_secs(5), debouncer.settled()).await;
        assert!(fired.is_err());
    }
}
