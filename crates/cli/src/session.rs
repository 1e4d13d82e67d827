//! Interactive checker session.
//!
//! Mirrors the checker page: a search box with debounced suggestions, the selected-drug tags,
//! the interaction results and the FAQ accordion. Input is read line by line from stdin; a
//! plain line replaces the search term and `:`-prefixed lines are commands.

use crate::api::ApiClient;
use crate::autocomplete::{Autocomplete, Debouncer, SearchPlan, Ticket};
use crate::faq::FaqAccordion;
use crate::render;
use crate::selection::Selection;
use crate::{ClientError, ClientResult};
use dic_types::{Drug, DrugId, Interaction};
use std::io::Write;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

pub const HELP: &str = "\
Type to search for a drug (at least 2 characters).
  :pick N    add suggestion N to the selection
  :rm ID     remove drug ID from the selection
  :check     check interactions among the selected drugs
  :faq N     expand or collapse FAQ entry N
  :show      show the selection and the last results
  :help      show this help
  :quit      leave";

/// One line of user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Search(String),
    /// Zero-based suggestion index.
    Pick(usize),
    Remove(DrugId),
    Check,
    /// Zero-based FAQ index.
    Faq(usize),
    Show,
    Help,
    Quit,
    Invalid(String),
}

/// Parse a line of input. Numbers typed by the user are one-based.
pub fn parse_input(line: &str) -> Input {
    let trimmed = line.trim();
    let Some(command) = trimmed.strip_prefix(':') else {
        return Input::Search(trimmed.to_string());
    };

    let mut parts = command.split_whitespace();
    let name = parts.next().unwrap_or_default();
    let arg = parts.next();

    let one_based = |arg: Option<&str>| {
        arg.and_then(|a| a.parse::<usize>().ok())
            .filter(|n| *n >= 1)
            .map(|n| n - 1)
    };

    match name {
        "pick" | "p" => one_based(arg)
            .map(Input::Pick)
            .unwrap_or_else(|| Input::Invalid("usage: :pick N".into())),
        "rm" | "remove" => arg
            .and_then(|a| a.parse::<DrugId>().ok())
            .map(Input::Remove)
            .unwrap_or_else(|| Input::Invalid("usage: :rm ID".into())),
        "check" | "c" => Input::Check,
        "faq" => one_based(arg)
            .map(Input::Faq)
            .unwrap_or_else(|| Input::Invalid("usage: :faq N".into())),
        "show" | "s" => Input::Show,
        "help" | "h" => Input::Help,
        "quit" | "q" | "exit" => Input::Quit,
        other => Input::Invalid(format!("unknown command :{other}")),
    }
}

/// Pick the drug `query` refers to among `candidates`.
///
/// A numeric query matches by id. Otherwise an exact (case-insensitive) name wins, then a
/// single candidate.
///
/// # Errors
///
/// `ClientError::UnknownDrug` when nothing matches, `ClientError::AmbiguousDrug` when several
/// candidates match and none exactly.
pub fn pick_match(query: &str, candidates: Vec<Drug>) -> ClientResult<Drug> {
    if let Ok(id) = query.trim().parse::<DrugId>() {
        return candidates
            .into_iter()
            .find(|d| d.id == id)
            .ok_or_else(|| ClientError::UnknownDrug(query.to_string()));
    }

    if let Some(exact) = candidates
        .iter()
        .find(|d| d.name.eq_ignore_ascii_case(query.trim()))
    {
        return Ok(exact.clone());
    }

    let mut rest = candidates.into_iter();
    match (rest.next(), rest.next()) {
        (None, _) => Err(ClientError::UnknownDrug(query.to_string())),
        (Some(only), None) => Ok(only),
        (Some(first), Some(second)) => Err(ClientError::AmbiguousDrug {
            term: query.to_string(),
            candidates: [first, second]
                .into_iter()
                .chain(rest)
                .map(|d| d.name)
                .collect(),
        }),
    }
}

/// Look up the drug `query` refers to on the server.
pub async fn find_drug(client: &ApiClient, query: &str) -> ClientResult<Drug> {
    let term = if query.trim().parse::<DrugId>().is_ok() {
        ""
    } else {
        query.trim()
    };
    let candidates = client.search_drugs(term).await?;
    pick_match(query, candidates)
}

/// State of one checker session.
pub struct CheckerSession {
    client: ApiClient,
    search_term: String,
    autocomplete: Autocomplete,
    selection: Selection,
    interactions: Option<Vec<Interaction>>,
    faq: FaqAccordion,
}

impl CheckerSession {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            search_term: String::new(),
            autocomplete: Autocomplete::new(),
            selection: Selection::new(),
            interactions: None,
            faq: FaqAccordion::new(),
        }
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn interactions(&self) -> Option<&[Interaction]> {
        self.interactions.as_deref()
    }

    pub fn suggestions(&self) -> &[Drug] {
        self.autocomplete.suggestions()
    }

    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
    }

    /// Decide what to search for now that typing has settled.
    pub fn plan_search(&mut self) -> SearchPlan {
        self.autocomplete.plan(&self.search_term)
    }

    /// Apply a search response. Returns `false` if it was superseded.
    pub fn accept_suggestions(&mut self, ticket: Ticket, drugs: Vec<Drug>) -> bool {
        self.autocomplete.accept(ticket, drugs, &self.selection)
    }

    /// Move suggestion `index` into the selection and reset the search box.
    pub fn pick_suggestion(&mut self, index: usize) -> Option<Drug> {
        let drug = self.autocomplete.pick(index)?;
        self.selection.add(drug.clone());
        self.search_term.clear();
        Some(drug)
    }

    pub fn add(&mut self, drug: Drug) -> bool {
        self.selection.add(drug)
    }

    /// Drop drug `id` from the selection. Suggestions must be re-fetched afterwards so the
    /// removed drug can be offered again.
    pub fn remove(&mut self, id: DrugId) -> Option<Drug> {
        self.selection.remove(id)
    }

    pub fn toggle_faq(&mut self, index: usize) -> Option<usize> {
        self.faq.toggle(index)
    }

    /// Check interactions among the selected drugs and keep the response.
    ///
    /// Returns the number of interactions found.
    ///
    /// # Errors
    ///
    /// `ClientError::TooFewDrugs` with fewer than two selected drugs, without contacting the
    /// server. Request failures are logged and leave the previous results untouched.
    pub async fn check(&mut self) -> ClientResult<usize> {
        self.selection.ensure_checkable()?;
        match self.client.check_interactions(&self.selection.ids()).await {
            Ok(found) => {
                let count = found.len();
                tracing::debug!(found = count, "interaction check returned");
                self.interactions = Some(found);
                Ok(count)
            }
            Err(e) => {
                tracing::error!("Error checking interaction: {e}");
                Err(e)
            }
        }
    }

    pub fn write_selection<W: Write>(&self, out: &mut W) -> std::io::Result<()> {
        render::write_selection(out, &self.selection)
    }

    pub fn write_results<W: Write>(&self, out: &mut W) -> std::io::Result<()> {
        render::write_results(out, self.interactions(), &self.selection.name_lookup())
    }

    pub fn write_faq<W: Write>(&self, out: &mut W) -> std::io::Result<()> {
        render::write_faq(out, &self.faq)
    }
}

/// Whether the interactive loop keeps going after a line of input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

impl CheckerSession {
    /// Apply one line of input, restarting or cancelling `debouncer` as the search box would.
    pub async fn handle_input<W: Write>(
        &mut self,
        input: Input,
        debouncer: &mut Debouncer,
        out: &mut W,
    ) -> std::io::Result<Flow> {
        match input {
            Input::Search(term) => {
                self.set_search_term(term);
                debouncer.touch();
            }
            Input::Pick(index) => match self.pick_suggestion(index) {
                Some(_) => {
                    debouncer.cancel();
                    self.write_selection(out)?;
                }
                None => writeln!(out, "No suggestion {}", index + 1)?,
            },
            Input::Remove(id) => {
                match self.remove(id) {
                    Some(_) => debouncer.touch(),
                    None => writeln!(out, "Drug #{id} is not selected")?,
                }
                self.write_selection(out)?;
            }
            Input::Check => match self.check().await {
                Ok(_) => self.write_results(out)?,
                Err(ClientError::TooFewDrugs) => writeln!(out, "{}", ClientError::TooFewDrugs)?,
                // Already logged; the results panel keeps its previous state.
                Err(_) => {}
            },
            Input::Faq(index) => {
                self.toggle_faq(index);
                self.write_faq(out)?;
            }
            Input::Show => {
                self.write_selection(out)?;
                self.write_results(out)?;
            }
            Input::Help => writeln!(out, "{HELP}")?,
            Input::Quit => return Ok(Flow::Quit),
            Input::Invalid(message) => writeln!(out, "{message}")?,
        }
        Ok(Flow::Continue)
    }
}

/// Run an interactive session on stdin/stdout until `:quit` or end of input.
pub async fn run_interactive(client: ApiClient) -> anyhow::Result<()> {
    let mut session = CheckerSession::new(client.clone());
    let mut debouncer = Debouncer::default();
    let (tx, mut rx) = mpsc::unbounded_channel::<(Ticket, ClientResult<Vec<Drug>>)>();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut out = std::io::stdout();

    writeln!(out, "{HELP}")?;

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                let flow = session
                    .handle_input(parse_input(&line), &mut debouncer, &mut out)
                    .await?;
                if flow == Flow::Quit {
                    break;
                }
            }
            () = debouncer.settled(), if debouncer.is_armed() => {
                match session.plan_search() {
                    SearchPlan::Fetch { ticket, term } => {
                        let client = client.clone();
                        let tx = tx.clone();
                        tokio::spawn(async move {
                            let result = client.search_drugs(&term).await;
                            let _ = tx.send((ticket, result));
                        });
                    }
                    SearchPlan::Clear => {}
                }
            }
            Some((ticket, result)) = rx.recv() => match result {
                Ok(drugs) => {
                    if session.accept_suggestions(ticket, drugs) {
                        render::write_suggestions(&mut out, session.suggestions())?;
                    }
                }
                Err(e) => tracing::error!("Error fetching suggestions: {e}"),
            },
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drugs() -> Vec<Drug> {
        vec![
            Drug::new(1, "Aspirin"),
            Drug::new(7, "Aspartame"),
            Drug::new(9, "Aspirin Plus"),
        ]
    }

    #[test]
    fn plain_lines_are_search_terms() {
        assert_eq!(parse_input("  asp \n"), Input::Search("asp".into()));
        assert_eq!(parse_input(""), Input::Search(String::new()));
    }

    #[test]
    fn commands_use_one_based_numbers() {
        assert_eq!(parse_input(":pick 1"), Input::Pick(0));
        assert_eq!(parse_input(":faq 5"), Input::Faq(4));
        assert_eq!(parse_input(":rm 12"), Input::Remove(12));
        assert_eq!(parse_input(":check"), Input::Check);
        assert_eq!(parse_input(":q"), Input::Quit);
        assert!(matches!(parse_input(":pick 0"), Input::Invalid(_)));
        assert!(matches!(parse_input(":faq"), Input::Invalid(_)));
        assert!(matches!(parse_input(":frobnicate"), Input::Invalid(_)));
    }

    #[test]
    fn exact_name_beats_partial_matches() {
        assert_eq!(pick_match("aspirin", drugs()).unwrap().id, 1);
    }

    #[test]
    fn numeric_queries_match_ids() {
        assert_eq!(pick_match("7", drugs()).unwrap().name, "Aspartame");
        assert!(matches!(
            pick_match("42", drugs()),
            Err(ClientError::UnknownDrug(_))
        ));
    }

    #[test]
    fn ambiguous_and_missing_queries_fail() {
        assert!(matches!(
            pick_match("asp", drugs()),
            Err(ClientError::AmbiguousDrug { .. })
        ));
        assert!(matches!(
            pick_match("insulin", Vec::new()),
            Err(ClientError::UnknownDrug(_))
        ));
        assert_eq!(
            pick_match("aspart", vec![Drug::new(7, "Aspartame")])
                .unwrap()
                .id,
            7
        );
    }

    #[test]
    fn picking_a_suggestion_selects_it_and_resets_search() {
        let mut session = CheckerSession::new(ApiClient::new("http://localhost:3000"));
        session.set_search_term("asp");
        let SearchPlan::Fetch { ticket, term } = session.plan_search() else {
            panic!("expected a fetch");
        };
        assert_eq!(term, "asp");
        assert!(session.accept_suggestions(ticket, drugs()));

        let picked = session.pick_suggestion(1).unwrap();

        assert_eq!(picked.id, 7);
        assert_eq!(session.selection().ids(), vec![7]);
        assert!(session.suggestions().is_empty());
        assert_eq!(session.plan_search(), SearchPlan::Clear);
    }

    fn session() -> CheckerSession {
        CheckerSession::new(ApiClient::new("http://localhost:3000"))
    }

    #[tokio::test]
    async fn removing_a_drug_refreshes_suggestions() {
        let mut session = session();
        let mut debouncer = Debouncer::default();
        let mut out = Vec::new();

        session.set_search_term("asp");
        let SearchPlan::Fetch { ticket, .. } = session.plan_search() else {
            panic!("expected a fetch");
        };
        session.add(Drug::new(1, "Aspirin"));
        session.accept_suggestions(ticket, drugs());
        assert!(!session.suggestions().iter().any(|d| d.id == 1));

        let flow = session
            .handle_input(Input::Remove(1), &mut debouncer, &mut out)
            .await
            .unwrap();
        assert_eq!(flow, Flow::Continue);
        assert!(debouncer.is_armed());

        let SearchPlan::Fetch { ticket, term } = session.plan_search() else {
            panic!("expected a fetch");
        };
        assert_eq!(term, "asp");
        assert!(session.accept_suggestions(ticket, drugs()));
        assert!(session.suggestions().iter().any(|d| d.id == 1));
    }

    #[tokio::test]
    async fn removing_an_unselected_drug_leaves_search_idle() {
        let mut session = session();
        let mut debouncer = Debouncer::default();
        let mut out = Vec::new();

        session
            .handle_input(Input::Remove(42), &mut debouncer, &mut out)
            .await
            .unwrap();

        assert!(!debouncer.is_armed());
        assert!(String::from_utf8(out).unwrap().contains("Drug #42 is not selected"));
    }

    #[tokio::test]
    async fn typing_arms_and_picking_cancels_the_debouncer() {
        let mut session = session();
        let mut debouncer = Debouncer::default();
        let mut out = Vec::new();

        session
            .handle_input(Input::Search("asp".into()), &mut debouncer, &mut out)
            .await
            .unwrap();
        assert!(debouncer.is_armed());

        let SearchPlan::Fetch { ticket, .. } = session.plan_search() else {
            panic!("expected a fetch");
        };
        session.accept_suggestions(ticket, drugs());
        session
            .handle_input(Input::Pick(0), &mut debouncer, &mut out)
            .await
            .unwrap();

        assert!(!debouncer.is_armed());
        assert_eq!(session.selection().ids(), vec![1]);
    }

    #[tokio::test]
    async fn quit_and_short_check_are_handled_without_the_server() {
        let mut session = session();
        let mut debouncer = Debouncer::default();
        let mut out = Vec::new();

        session
            .handle_input(Input::Check, &mut debouncer, &mut out)
            .await
            .unwrap();
        let flow = session
            .handle_input(Input::Quit, &mut debouncer, &mut out)
            .await
            .unwrap();

        assert_eq!(flow, Flow::Quit);
        assert!(String::from_utf8(out)
            .unwrap()
            .contains("Select at least 2 drugs to check interaction."));
    }

    #[tokio::test]
    async fn check_needs_two_selected_drugs() {
        let mut session = CheckerSession::new(ApiClient::new("http://localhost:3000"));
        session.add(Drug::new(1, "Aspirin"));

        let result = session.check().await;

        assert!(matches!(result, Err(ClientError::TooFewDrugs)));
        assert!(session.interactions().is_none());
    }
}
