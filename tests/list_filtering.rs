//! List screen filtering through a full session: tags, search and the URL.

mod common;

use factsheet::{App, ListScreen, Location, QueryFilter, ScreenView};
use std::time::Duration;

const DEBOUNCE: Duration = Duration::from_millis(300);

fn list_screen(app: &App) -> ListScreen {
    match app.view() {
        ScreenView::List(screen) => screen,
        other => panic!("expected list screen, got {:?}", other),
    }
}

fn selected_tags(app: &App) -> Vec<String> {
    list_screen(app)
        .tags
        .ready()
        .map(|tags| {
            tags.iter()
                .filter(|t| t.selected)
                .map(|t| t.id.clone())
                .collect()
        })
        .unwrap_or_default()
}

fn card_ids(app: &App) -> Vec<String> {
    list_screen(app)
        .grid
        .ready()
        .map(|cards| cards.iter().map(|c| c.id.clone()).collect())
        .unwrap_or_default()
}

#[tokio::test]
async fn active_tags_always_match_the_location() {
    let mut app = App::open(common::source(), Location::root(), DEBOUNCE);
    app.settle().await;

    for id in ["3", "1", "4", "1"] {
        assert!(app.select_category(id));
        app.settle().await;
        let encoded = factsheet::query::decode(&app.location().query);
        assert_eq!(selected_tags(&app), encoded);
    }
    assert_eq!(app.location().to_string(), "/?categories=3,4");
    assert_eq!(card_ids(&app), vec!["2", "3", "4"]);
}

#[tokio::test]
async fn selection_survives_leaving_and_returning_by_url() {
    let mut app = App::open(common::source(), Location::root(), DEBOUNCE);
    app.settle().await;
    app.select_category("1");
    app.select_category("3");
    app.settle().await;
    let before = selected_tags(&app);
    assert_eq!(before, vec!["1", "3"]);

    app.open_fact("1");
    app.settle().await;
    app.navigate(Location::parse("/?categories=1,3"));
    app.settle().await;

    assert_eq!(selected_tags(&app), before);
    assert_eq!(card_ids(&app), vec!["1", "3"]);
}

#[tokio::test]
async fn back_restores_previous_filter() {
    let mut app = App::open(common::source(), Location::root(), DEBOUNCE);
    app.select_category("2");
    app.select_category("4");
    app.settle().await;

    assert!(app.back());
    app.settle().await;
    assert_eq!(app.location().to_string(), "/?categories=2");
    assert_eq!(selected_tags(&app), vec!["2"]);

    assert!(app.forward());
    app.settle().await;
    assert_eq!(selected_tags(&app), vec!["2", "4"]);
}

#[tokio::test(start_paused = true)]
async fn quick_retype_sends_one_filtered_request() {
    let source = common::source();
    let mut app = App::open(source.clone(), Location::root(), DEBOUNCE);
    app.settle().await;

    app.set_search_text(Some("aquaponic".into()));
    tokio::time::sleep(Duration::from_millis(120)).await;
    app.set_search_text(Some("aquaponics".into()));
    app.settle().await;

    let requests = source.fact_requests();
    assert_eq!(
        requests,
        vec![QueryFilter::new(), QueryFilter::new().with_text("aquaponics")]
    );
    assert_eq!(card_ids(&app), vec!["2", "3"]);
}

#[tokio::test(start_paused = true)]
async fn search_and_tags_combine() {
    let source = common::source();
    let mut app = App::open(source.clone(), Location::parse("/?categories=2,3"), DEBOUNCE);
    app.set_search_text(Some("solar".into()));
    app.settle().await;

    assert_eq!(card_ids(&app), vec!["3"]);
    assert_eq!(
        source.fact_requests().last(),
        Some(&QueryFilter::new().with_text("solar").with_categories(["2", "3"]))
    );
    // Search text is not part of the location.
    assert_eq!(app.location().to_string(), "/?categories=2,3");
}

#[tokio::test]
async fn unknown_category_ids_pass_through() {
    let source = common::source();
    let mut app = App::open(source.clone(), Location::parse("/?categories=99,abc"), DEBOUNCE);
    app.settle().await;

    assert!(selected_tags(&app).is_empty());
    assert!(card_ids(&app).is_empty());
    assert_eq!(
        source.fact_requests(),
        vec![QueryFilter::new().with_categories(["99", "abc"])]
    );
}
