//! Viewer session: history plus whichever screen the current location selects
//!
//! Every navigation tears the current screen down and mounts a fresh one
//! from the new location. Category toggles on the list screen are the one
//! exception: they push a history entry without remounting.

use crate::router::{History, Location, Route};
use crate::source::FactSource;
use crate::view::{DetailScreen, DetailView, ListScreen, ListView};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// The mounted screen.
pub enum Screen {
    List(ListView),
    Detail(DetailView),
    NotFound(String),
}

/// Snapshot of the mounted screen.
#[derive(Debug, Clone, PartialEq)]
pub enum ScreenView {
    List(ListScreen),
    Detail(DetailScreen),
    NotFound { path: String },
}

pub struct App {
    source: Arc<dyn FactSource>,
    debounce: Duration,
    history: History,
    screen: Screen,
}

impl App {
    /// Start a session at `location`.
    pub fn open(source: Arc<dyn FactSource>, location: Location, debounce: Duration) -> Self {
        Self::open_with_search(source, location, debounce, None)
    }

    /// Open with search text already entered. Only a list screen takes it;
    /// it rides along with the first facts request.
    pub fn open_with_search(
        source: Arc<dyn FactSource>,
        location: Location,
        debounce: Duration,
        search: Option<String>,
    ) -> Self {
        let screen = mount(&source, &location, debounce, search);
        Self {
            source,
            debounce,
            history: History::new(location),
            screen,
        }
    }

    pub fn location(&self) -> &Location {
        self.history.current()
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    /// Push `location` and mount its screen.
    pub fn navigate(&mut self, location: Location) {
        info!(from = %self.history.current(), to = %location, "navigating");
        self.history.push(location);
        self.remount();
    }

    /// Go back one entry; returns false at the start of history.
    pub fn back(&mut self) -> bool {
        if self.history.back().is_none() {
            return false;
        }
        info!(to = %self.history.current(), "history back");
        self.remount();
        true
    }

    /// Go forward one entry; returns false at the end of history.
    pub fn forward(&mut self) -> bool {
        if self.history.forward().is_none() {
            return false;
        }
        info!(to = %self.history.current(), "history forward");
        self.remount();
        true
    }

    /// Open the detail screen for a fact.
    pub fn open_fact(&mut self, id: &str) {
        self.navigate(Location::fact(id));
    }

    /// Back button on the detail screen: the unfiltered list.
    pub fn home(&mut self) {
        self.navigate(DetailView::back_location());
    }

    /// Click a category tag. On the list screen this toggles the tag; on the
    /// detail screen it opens the list filtered to that category alone.
    /// Returns false when the current screen has no tags.
    pub fn select_category(&mut self, id: &str) -> bool {
        match self.screen {
            Screen::List(ref mut view) => {
                view.toggle_category(id, &mut self.history);
                true
            }
            Screen::Detail(_) => {
                self.navigate(DetailView::category_location(id));
                true
            }
            Screen::NotFound(_) => false,
        }
    }

    /// Type into the search box. Returns false off the list screen.
    pub fn set_search_text(&mut self, text: Option<String>) -> bool {
        match self.screen {
            Screen::List(ref mut view) => {
                view.set_search_text(text);
                true
            }
            _ => false,
        }
    }

    pub fn is_settled(&self) -> bool {
        match self.screen {
            Screen::List(ref view) => view.is_settled(),
            Screen::Detail(ref view) => view.is_settled(),
            Screen::NotFound(_) => true,
        }
    }

    /// Fold in the next completion on the mounted screen. Never resolves
    /// once settled.
    pub async fn step(&mut self) {
        match self.screen {
            Screen::List(ref mut view) => {
                view.step().await;
            }
            Screen::Detail(ref mut view) => view.step().await,
            Screen::NotFound(_) => std::future::pending().await,
        }
    }

    pub async fn settle(&mut self) {
        while !self.is_settled() {
            self.step().await;
        }
    }

    pub fn view(&self) -> ScreenView {
        match self.screen {
            Screen::List(ref view) => ScreenView::List(view.screen()),
            Screen::Detail(ref view) => ScreenView::Detail(view.screen()),
            Screen::NotFound(ref path) => ScreenView::NotFound { path: path.clone() },
        }
    }

    fn remount(&mut self) {
        self.screen = mount(&self.source, self.history.current(), self.debounce, None);
    }
}

fn mount(
    source: &Arc<dyn FactSource>,
    location: &Location,
    debounce: Duration,
    search: Option<String>,
) -> Screen {
    match Route::resolve(location) {
        Route::List { .. } => Screen::List(ListView::mount_with_search(
            source.clone(),
            location,
            debounce,
            search,
        )),
        Route::Detail { id } => Screen::Detail(DetailView::mount(source.clone(), &id)),
        Route::NotFound { path } => {
            info!(path = %path, "no route");
            Screen::NotFound(path)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Category, Fact};
    use crate::query::QueryFilter;
    use crate::source::MockSource;

    const DEBOUNCE: Duration = Duration::from_millis(300);

    fn source() -> Arc<MockSource> {
        let water = Category::new("1", "Water");
        Arc::new(MockSource::new(
            vec![water.clone(), Category::new("2", "Food")],
            vec![Fact::new("7", "Water fact").with_category(water)],
        ))
    }

    #[tokio::test]
    async fn routes_to_screens() {
        let mut app = App::open(source(), Location::parse("/fact/7"), DEBOUNCE);
        app.settle().await;
        assert!(matches!(app.view(), ScreenView::Detail(_)));

        app.navigate(Location::parse("/nope"));
        assert!(app.is_settled());
        assert_eq!(
            app.view(),
            ScreenView::NotFound {
                path: "/nope".into()
            }
        );
        assert!(!app.select_category("1"));
        assert!(!app.set_search_text(Some("x".into())));
    }

    #[tokio::test(start_paused = true)]
    async fn opening_with_search_issues_a_single_request() {
        let source = source();
        let mut app = App::open_with_search(
            source.clone(),
            Location::root(),
            DEBOUNCE,
            Some("water".into()),
        );
        app.settle().await;

        assert_eq!(
            source.fact_requests(),
            vec![QueryFilter::new().with_text("water")]
        );
        match app.view() {
            ScreenView::List(screen) => assert_eq!(screen.search.as_deref(), Some("water")),
            other => panic!("expected list, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn detail_category_is_a_one_way_shortcut() {
        let mut app = App::open(source(), Location::parse("/?categories=2"), DEBOUNCE);
        app.settle().await;
        app.open_fact("7");
        app.settle().await;

        assert!(app.select_category("1"));
        assert_eq!(app.location().to_string(), "/?categories=1");
        app.settle().await;
        let ScreenView::List(screen) = app.view() else {
            panic!("expected list screen");
        };
        let selected: Vec<_> = screen
            .tags
            .ready()
            .unwrap()
            .iter()
            .filter(|t| t.selected)
            .map(|t| t.id.clone())
            .collect();
        assert_eq!(selected, vec!["1"]);
    }

    #[tokio::test]
    async fn home_discards_filter() {
        let mut app = App::open(source(), Location::parse("/?categories=1"), DEBOUNCE);
        app.open_fact("7");
        app.home();
        assert_eq!(app.location(), &Location::root());
        assert_eq!(app.history().len(), 3);
    }
}
