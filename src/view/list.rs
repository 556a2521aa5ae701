//! Fact list screen: category tags, search box and the fact grid

use super::LoadState;
use crate::model::{Category, Fact};
use crate::query::QueryFilter;
use crate::router::{History, Location};
use crate::source::{FactSource, SourceResult};
use crate::state::FilterController;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// A finished request, tagged so superseded fact responses can be dropped.
enum Completion {
    Categories(SourceResult<Vec<Category>>),
    Facts {
        generation: u64,
        result: SourceResult<Vec<Fact>>,
    },
}

/// What one `step()` did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListEvent {
    CategoriesLoaded,
    FactsLoaded,
    /// A facts response arrived for a filter that has since changed
    StaleDiscarded,
    /// Debounced search text was adopted and a new facts request went out
    FilterChanged,
    /// Debounced search text was adopted but derived the filter already in flight
    FilterUnchanged,
}

/// One category toggle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagView {
    pub id: String,
    pub name: String,
    pub selected: bool,
}

/// One card in the fact grid. Counts are present only when non-zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FactCard {
    pub id: String,
    pub text: String,
    pub href: Location,
    pub research_count: Option<usize>,
    pub category_count: Option<usize>,
}

impl From<&Fact> for FactCard {
    fn from(fact: &Fact) -> Self {
        let nonzero = |n: usize| (n > 0).then_some(n);
        Self {
            id: fact.id.clone(),
            text: fact.text.clone(),
            href: Location::fact(&fact.id),
            research_count: nonzero(fact.research.len()),
            category_count: nonzero(fact.categories.len()),
        }
    }
}

/// Snapshot of everything the list screen shows.
#[derive(Debug, Clone, PartialEq)]
pub struct ListScreen {
    pub location: Location,
    pub search: Option<String>,
    pub tags: LoadState<Vec<TagView>>,
    pub grid: LoadState<Vec<FactCard>>,
}

/// The mounted list screen.
pub struct ListView {
    source: Arc<dyn FactSource>,
    filter: FilterController,
    categories: LoadState<Vec<Category>>,
    facts: LoadState<Vec<Fact>>,
    issued: Option<QueryFilter>,
    generation: u64,
    outstanding: usize,
    tx: mpsc::UnboundedSender<Completion>,
    rx: mpsc::UnboundedReceiver<Completion>,
}

impl ListView {
    /// Mount from a location: seed the filter from its query string and
    /// send the categories and facts requests.
    pub fn mount(source: Arc<dyn FactSource>, location: &Location, debounce: Duration) -> Self {
        Self::mount_with_search(source, location, debounce, None)
    }

    /// Mount with search text already in the box. The text is part of the
    /// first facts request; no debounce delay applies to it.
    pub fn mount_with_search(
        source: Arc<dyn FactSource>,
        location: &Location,
        debounce: Duration,
        search: Option<String>,
    ) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let mut filter = FilterController::new(debounce);
        filter.initialize_from_query(&location.query);
        if search.is_some() {
            filter.seed_search_text(search);
        }
        info!(location = %location, "mounting list view");

        let mut view = Self {
            source,
            filter,
            categories: LoadState::Loading,
            facts: LoadState::Loading,
            issued: None,
            generation: 0,
            outstanding: 0,
            tx,
            rx,
        };
        view.request_categories();
        view.refresh_facts();
        view
    }

    pub fn filter(&self) -> &FilterController {
        &self.filter
    }

    /// Toggle a category tag and refetch immediately. The new selection is
    /// pushed onto `history`.
    pub fn toggle_category(&mut self, id: &str, history: &mut History) {
        self.filter.toggle_category(id, history);
        self.refresh_facts();
    }

    /// Update the search box. The facts request follows once the debounce
    /// delay passes without further input.
    pub fn set_search_text(&mut self, text: Option<String>) {
        self.filter.set_search_text(text);
    }

    /// Nothing outstanding and no search input waiting to be adopted.
    pub fn is_settled(&self) -> bool {
        self.outstanding == 0 && !self.filter.search_pending()
    }

    /// Wait for the next completion or search adoption and fold it in.
    ///
    /// Never resolves on a settled view.
    pub async fn step(&mut self) -> ListEvent {
        tokio::select! {
            Some(completion) = self.rx.recv() => self.apply(completion),
            search = self.filter.search_adopted() => {
                debug!(search = ?search, "search text adopted");
                if self.refresh_facts() {
                    ListEvent::FilterChanged
                } else {
                    ListEvent::FilterUnchanged
                }
            }
        }
    }

    /// Step until settled.
    pub async fn settle(&mut self) {
        while !self.is_settled() {
            self.step().await;
        }
    }

    pub fn screen(&self) -> ListScreen {
        ListScreen {
            location: self.filter.location(),
            search: self.filter.search_text().map(String::from),
            tags: self.categories.map(|categories| {
                categories
                    .iter()
                    .map(|c| TagView {
                        id: c.id.clone(),
                        name: c.name.clone(),
                        selected: self.filter.is_selected(&c.id),
                    })
                    .collect()
            }),
            grid: self
                .facts
                .map(|facts| facts.iter().map(FactCard::from).collect()),
        }
    }

    fn request_categories(&mut self) {
        let source = self.source.clone();
        let tx = self.tx.clone();
        self.outstanding += 1;
        debug!("requesting categories");
        tokio::spawn(async move {
            let result = source.list_categories().await;
            let _ = tx.send(Completion::Categories(result));
        });
    }

    /// Send a facts request for the current filter unless that exact filter
    /// is already the latest one issued. Returns whether a request went out.
    fn refresh_facts(&mut self) -> bool {
        let filter = self.filter.derive_query_filter();
        if self.issued.as_ref() == Some(&filter) {
            return false;
        }

        self.generation += 1;
        self.facts = LoadState::Loading;
        self.issued = Some(filter.clone());
        self.outstanding += 1;

        let generation = self.generation;
        let source = self.source.clone();
        let tx = self.tx.clone();
        info!(generation, filter = ?filter, "requesting facts");
        tokio::spawn(async move {
            let result = source.list_facts(&filter).await;
            let _ = tx.send(Completion::Facts { generation, result });
        });
        true
    }

    fn apply(&mut self, completion: Completion) -> ListEvent {
        self.outstanding = self.outstanding.saturating_sub(1);
        match completion {
            Completion::Categories(result) => {
                if let Err(ref e) = result {
                    warn!(error = %e, "categories request failed");
                }
                self.categories = result.into();
                ListEvent::CategoriesLoaded
            }
            Completion::Facts { generation, result } => {
                if generation != self.generation {
                    debug!(generation, latest = self.generation, "discarding stale facts response");
                    return ListEvent::StaleDiscarded;
                }
                match result {
                    Ok(ref facts) => debug!(generation, count = facts.len(), "facts loaded"),
                    Err(ref e) => warn!(generation, error = %e, "facts request failed"),
                }
                self.facts = result.into();
                ListEvent::FactsLoaded
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Research;
    use crate::source::MockSource;

    const DEBOUNCE: Duration = Duration::from_millis(300);

    fn source() -> Arc<MockSource> {
        let water = Category::new("1", "Water");
        let food = Category::new("2", "Food");
        let energy = Category::new("3", "Energy");
        Arc::new(MockSource::new(
            vec![water.clone(), food.clone(), energy.clone()],
            vec![
                Fact::new("1", "Aquaponic systems use 90% less water")
                    .with_category(water)
                    .with_research(Research::new("r1", "Water study"))
                    .with_research(Research::new("r2", "Follow-up")),
                Fact::new("2", "Fish waste feeds the plants").with_category(food),
                Fact::new("3", "Pumps can run on solar power").with_category(energy),
                Fact::new("4", "No soil is needed"),
            ],
        ))
    }

    fn card_ids(screen: &ListScreen) -> Vec<String> {
        screen
            .grid
            .ready()
            .map(|cards| cards.iter().map(|c| c.id.clone()).collect())
            .unwrap_or_default()
    }

    #[tokio::test]
    async fn mount_starts_loading_then_populates() {
        let mut view = ListView::mount(source(), &Location::root(), DEBOUNCE);
        let screen = view.screen();
        assert!(screen.grid.is_loading());
        assert!(screen.tags.is_loading());

        view.settle().await;
        let screen = view.screen();
        assert_eq!(card_ids(&screen), vec!["1", "2", "3", "4"]);
        assert_eq!(screen.tags.ready().map(|t| t.len()), Some(3));
    }

    #[tokio::test]
    async fn cards_show_only_nonzero_counts() {
        let mut view = ListView::mount(source(), &Location::root(), DEBOUNCE);
        view.settle().await;
        let screen = view.screen();
        let cards = screen.grid.ready().unwrap();

        assert_eq!(cards[0].research_count, Some(2));
        assert_eq!(cards[0].category_count, Some(1));
        assert_eq!(cards[0].href.to_string(), "/fact/1");
        assert_eq!(cards[3].research_count, None);
        assert_eq!(cards[3].category_count, None);
    }

    #[tokio::test]
    async fn mount_from_query_selects_tags_and_filters() {
        let source = source();
        let location = Location::parse("/?categories=1,3");
        let mut view = ListView::mount(source.clone(), &location, DEBOUNCE);
        view.settle().await;

        let screen = view.screen();
        let selected: Vec<_> = screen
            .tags
            .ready()
            .unwrap()
            .iter()
            .filter(|t| t.selected)
            .map(|t| t.id.as_str())
            .collect();
        assert_eq!(selected, vec!["1", "3"]);
        assert_eq!(card_ids(&screen), vec!["1", "3"]);
        assert_eq!(
            source.fact_requests(),
            vec![QueryFilter::new().with_categories(["1", "3"])]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn initial_search_goes_out_with_the_first_request() {
        let source = source();
        let location = Location::parse("/?categories=3");
        let mut view =
            ListView::mount_with_search(source.clone(), &location, DEBOUNCE, Some("solar".into()));
        assert!(!view.filter().search_pending());

        let started = tokio::time::Instant::now();
        view.settle().await;
        assert!(started.elapsed() < DEBOUNCE);

        assert_eq!(card_ids(&view.screen()), vec!["3"]);
        assert_eq!(
            source.fact_requests(),
            vec![QueryFilter::new().with_text("solar").with_categories(["3"])]
        );
    }

    #[tokio::test]
    async fn toggle_refetches_and_pushes_location() {
        let source = source();
        let mut history = History::default();
        let mut view = ListView::mount(source.clone(), history.current(), DEBOUNCE);
        view.settle().await;

        view.toggle_category("2", &mut history);
        assert!(view.screen().grid.is_loading());
        view.settle().await;

        assert_eq!(history.current().to_string(), "/?categories=2");
        assert_eq!(view.screen().location, *history.current());
        assert_eq!(card_ids(&view.screen()), vec!["2"]);
        assert_eq!(source.fact_requests().len(), 2);
        assert_eq!(source.category_requests(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn rapid_search_sends_one_request() {
        let source = source();
        let mut view = ListView::mount(source.clone(), &Location::root(), DEBOUNCE);
        view.settle().await;

        view.set_search_text(Some("aquaponic".into()));
        tokio::time::sleep(Duration::from_millis(100)).await;
        view.set_search_text(Some("aquaponics".into()));
        view.settle().await;

        let requests = source.fact_requests();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[1], QueryFilter::new().with_text("aquaponics"));
        assert!(card_ids(&view.screen()).is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn stale_response_is_discarded() {
        let source = Arc::new(
            MockSource::new(
                vec![Category::new("1", "Water")],
                vec![
                    Fact::new("1", "Water fact").with_category(Category::new("1", "Water")),
                    Fact::new("2", "Other fact"),
                ],
            )
            .with_latency(Duration::from_millis(100)),
        );
        let mut history = History::default();
        let mut view = ListView::mount(source.clone(), history.current(), DEBOUNCE);
        view.toggle_category("1", &mut history);

        let mut events = Vec::new();
        while !view.is_settled() {
            events.push(view.step().await);
        }

        assert!(events.contains(&ListEvent::StaleDiscarded));
        assert_eq!(card_ids(&view.screen()), vec!["1"]);
    }

    #[tokio::test(start_paused = true)]
    async fn search_returning_to_issued_filter_sends_nothing() {
        let source = source();
        let mut view = ListView::mount(source.clone(), &Location::root(), DEBOUNCE);
        view.settle().await;

        view.set_search_text(Some(String::new()));
        assert_eq!(view.step().await, ListEvent::FilterUnchanged);
        assert_eq!(source.fact_requests().len(), 1);
    }

    #[tokio::test]
    async fn failures_surface_as_failed_state() {
        let source = Arc::new(MockSource::new(Vec::new(), Vec::new()).failing());
        let mut view = ListView::mount(source, &Location::root(), DEBOUNCE);
        view.settle().await;

        let screen = view.screen();
        assert!(matches!(screen.grid, LoadState::Failed(_)));
        assert!(matches!(screen.tags, LoadState::Failed(_)));
    }

    #[tokio::test]
    async fn empty_result_is_ready_with_no_cards() {
        let source = Arc::new(MockSource::new(Vec::new(), Vec::new()));
        let mut view = ListView::mount(source, &Location::root(), DEBOUNCE);
        view.settle().await;
        assert_eq!(view.screen().grid, LoadState::Ready(Vec::new()));
    }
}
