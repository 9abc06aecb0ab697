use async_trait::async_trait;
use nt_app::prelude::*;
use nt_core::{FeedGateway, KeyValueStore, FAVORITES_KEY, USER_DATA_KEY};
use nt_storage::InMemoryStore;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

/// Gateway that replays queued responses and records the terms it was asked for.
#[derive(Default)]
struct ScriptedGateway {
    responses: Mutex<VecDeque<Result<Vec<ArticleRecord>>>>,
    terms: Mutex<Vec<String>>,
}

impl ScriptedGateway {
    fn push(&self, response: Result<Vec<ArticleRecord>>) {
        self.responses.lock().unwrap().push_back(response);
    }

    fn terms(&self) -> Vec<String> {
        self.terms.lock().unwrap().clone()
    }
}

#[async_trait]
impl FeedGateway for ScriptedGateway {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn search(&self, term: Option<&str>) -> Result<Vec<ArticleRecord>> {
        self.terms.lock().unwrap().push(term.unwrap_or_default().to_string());
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(Error::Network("no scripted response".to_string())))
    }
}

/// In-memory store whose reads and writes can be made to fail.
#[derive(Default)]
struct FlakyStore {
    inner: InMemoryStore,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
}

#[async_trait]
impl KeyValueStore for FlakyStore {
    fn name(&self) -> &str {
        "flaky"
    }

    async fn get(&self, key: &str) -> Result<Option<String>> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(Error::Store("read failed".to_string()));
        }
        self.inner.get(key).await
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(Error::Store("write failed".to_string()));
        }
        self.inner.set(key, value).await
    }

    async fn remove(&self, key: &str) -> Result<()> {
        self.inner.remove(key).await
    }
}

fn article(title: &str) -> ArticleRecord {
    ArticleRecord::new(title, format!("About {}", title)).with_image(format!("https://img.example/{}.jpg", title))
}

fn setup() -> (Arc<FlakyStore>, Arc<ScriptedGateway>, App) {
    let store = Arc::new(FlakyStore::default());
    let gateway = Arc::new(ScriptedGateway::default());
    let app = App::new(store.clone(), gateway.clone());
    (store, gateway, app)
}

#[tokio::test]
async fn login_with_valid_credentials_saves_marker_and_navigates() {
    let (store, _, mut app) = setup();
    let mut login = app.login_screen().with_credentials("Francesco@Live.it", "ciao");

    assert!(login.submit(&mut app.navigator).await);
    assert_eq!(app.navigator.current(), &Route::News);
    assert_eq!(login.last_error(), None);

    let marker = store.get(USER_DATA_KEY).await.unwrap().unwrap();
    let value: serde_json::Value = serde_json::from_str(&marker).unwrap();
    assert_eq!(value, serde_json::json!({"email": "francesco@live.it"}));
}

#[tokio::test]
async fn login_with_bad_password_stays_on_screen() {
    let (store, _, mut app) = setup();
    let mut login = app.login_screen().with_credentials("test@test.com", "wrong");

    assert!(!login.submit(&mut app.navigator).await);
    assert_eq!(app.navigator.current(), &Route::Login);
    assert_eq!(login.last_error(), Some("Invalid email or password"));
    assert_eq!(store.get(USER_DATA_KEY).await.unwrap(), None);

    // Retry is allowed, no lockout.
    login.password = "password2".to_string();
    assert!(login.submit(&mut app.navigator).await);
    assert_eq!(login.last_error(), None);
}

#[tokio::test]
async fn login_stays_when_marker_cannot_be_saved() {
    let (store, _, mut app) = setup();
    store.fail_writes.store(true, Ordering::SeqCst);
    let mut login = app.login_screen().with_credentials("test@test.com", "password2");

    assert!(!login.submit(&mut app.navigator).await);
    assert_eq!(app.navigator.current(), &Route::Login);
    assert!(login.last_error().is_some());
}

#[tokio::test]
async fn resume_skips_login_when_session_exists() {
    let (_, _, mut app) = setup();
    assert!(!app.resume().await.unwrap());
    assert_eq!(app.navigator.current(), &Route::Login);

    app.session()
        .save_user(&nt_core::UserData { email: "test@test.com".to_string() })
        .await
        .unwrap();
    assert!(app.resume().await.unwrap());
    assert_eq!(app.navigator.current(), &Route::News);
}

#[tokio::test]
async fn list_loads_and_keeps_previous_items_on_failure() {
    let (_, gateway, _) = setup();
    gateway.push(Ok(vec![article("A"), article("B")]));
    gateway.push(Err(Error::Network("offline".to_string())));
    gateway.push(Err(Error::Decode("garbage".to_string())));

    let mut list = ListController::new(gateway.clone());
    assert_eq!(list.state(), &ListState::Idle);

    assert!(list.mount().await);
    assert_eq!(list.items(), &[article("A"), article("B")]);
    assert_eq!(list.last_error(), None);

    assert!(!list.submit_search("rust").await);
    assert_eq!(list.items(), &[article("A"), article("B")]);
    assert!(list.last_error().unwrap().contains("offline"));

    assert!(!list.submit_search("").await);
    assert_eq!(list.items().len(), 2);
    assert_eq!(gateway.terms(), vec!["", "rust", ""]);
}

#[tokio::test]
async fn list_failure_on_mount_stays_idle() {
    let (_, gateway, _) = setup();
    gateway.push(Err(Error::Network("offline".to_string())));

    let mut list = ListController::new(gateway);
    assert!(!list.mount().await);
    assert_eq!(list.state(), &ListState::Idle);
    assert!(list.items().is_empty());
}

#[tokio::test]
async fn selecting_an_item_carries_the_full_record() {
    let (_, gateway, mut app) = setup();
    gateway.push(Ok(vec![article("A"), article("B")]));
    app.navigator.navigate(Route::News);

    let mut list = app.news_screen();
    list.mount().await;
    assert!(!list.select(7, &mut app.navigator));
    assert!(list.select(1, &mut app.navigator));
    assert_eq!(app.navigator.current(), &Route::SingleNews(article("B")));

    let detail = app.detail_screen().await.unwrap();
    assert_eq!(detail.article(), &article("B"));
    assert_eq!(gateway.terms().len(), 1);
}

#[tokio::test]
async fn detail_toggle_updates_store_and_flag() {
    let (store, _, app) = setup();
    let favorites = app.favorites();

    let mut detail = DetailController::mount(favorites.clone(), article("A")).await;
    assert!(!detail.is_favorite());

    detail.toggle().await;
    assert!(detail.is_favorite());
    assert!(favorites.is_favorite("A").await.unwrap());

    // A second screen for the same article sees it as favorite on mount.
    let other = DetailController::mount(favorites.clone(), article("A")).await;
    assert!(other.is_favorite());

    detail.toggle().await;
    assert!(!detail.is_favorite());
    assert_eq!(store.get(FAVORITES_KEY).await.unwrap().as_deref(), Some("[]"));
}

#[tokio::test]
async fn detail_flag_does_not_flip_when_write_fails() {
    let (store, _, app) = setup();
    let mut detail = DetailController::mount(app.favorites(), article("A")).await;

    store.fail_writes.store(true, Ordering::SeqCst);
    detail.toggle().await;
    assert!(!detail.is_favorite());
    assert!(detail.last_error().unwrap().contains("write failed"));

    store.fail_writes.store(false, Ordering::SeqCst);
    detail.toggle().await;
    assert!(detail.is_favorite());
    assert_eq!(detail.last_error(), None);
}

#[tokio::test]
async fn detail_mount_with_unreadable_store_defaults_to_not_favorite() {
    let (store, _, app) = setup();
    store.fail_reads.store(true, Ordering::SeqCst);

    let detail = DetailController::mount(app.favorites(), article("A")).await;
    assert!(!detail.is_favorite());
    assert!(detail.last_error().is_some());
}

#[tokio::test]
async fn detail_refresh_picks_up_removal_elsewhere() {
    let (_, _, app) = setup();
    let mut detail = DetailController::mount(app.favorites(), article("A")).await;
    detail.add_to_favorites().await;

    let mut screen = app.favorites_screen().await;
    screen.remove_at(0).await;
    assert!(screen.is_empty());

    assert!(detail.is_favorite());
    detail.refresh().await;
    assert!(!detail.is_favorite());
}

#[tokio::test]
async fn favorites_screen_removes_by_position() {
    let (_, _, app) = setup();
    let favorites = app.favorites();
    for title in ["A", "B", "C"] {
        favorites.add(&article(title)).await.unwrap();
    }

    let mut screen = app.favorites_screen().await;
    assert_eq!(screen.items(), &[article("A"), article("B"), article("C")]);

    screen.remove_at(1).await;
    assert_eq!(screen.items(), &[article("A"), article("C")]);
    assert_eq!(favorites.load_all().await.unwrap(), vec![article("A"), article("C")]);

    screen.remove_at(5).await;
    assert_eq!(screen.items().len(), 2);
    assert_eq!(screen.last_error(), None);
}

#[tokio::test]
async fn favorites_screen_reflects_store_after_concurrent_change() {
    let (_, _, app) = setup();
    let favorites = app.favorites();
    favorites.add(&article("A")).await.unwrap();
    favorites.add(&article("B")).await.unwrap();

    let mut screen = app.favorites_screen().await;
    assert!(!screen.sync().await);

    // Detail screen adds C while the favorites screen still shows [A, B].
    favorites.add(&article("C")).await.unwrap();

    // Removing position 0 of the stale list still removes A, and the reload
    // shows C too instead of overwriting it.
    screen.remove_at(0).await;
    assert_eq!(screen.items(), &[article("B"), article("C")]);
    assert_eq!(favorites.load_all().await.unwrap(), vec![article("B"), article("C")]);
}

#[tokio::test]
async fn favorites_screen_sync_follows_events() {
    let (_, _, app) = setup();
    let mut screen = app.favorites_screen().await;
    assert!(screen.is_empty());

    let mut detail = DetailController::mount(app.favorites(), article("A")).await;
    detail.add_to_favorites().await;

    assert!(screen.sync().await);
    assert_eq!(screen.items(), &[article("A")]);
    assert!(!screen.sync().await);
}

#[tokio::test]
async fn favorites_screen_keeps_list_on_malformed_blob() {
    let (store, _, app) = setup();
    app.favorites().add(&article("A")).await.unwrap();
    let mut screen = app.favorites_screen().await;
    assert_eq!(screen.items().len(), 1);

    store.set(FAVORITES_KEY, "{broken").await.unwrap();
    screen.refresh().await;
    assert_eq!(screen.items(), &[article("A")]);
    assert!(screen.last_error().unwrap().starts_with("Decode error"));
    assert_eq!(store.get(FAVORITES_KEY).await.unwrap().as_deref(), Some("{broken"));
}

#[tokio::test]
async fn full_session_flow() {
    let (_, gateway, mut app) = setup();
    gateway.push(Ok(vec![article("A"), article("B")]));

    let mut login = app.login_screen().with_credentials("test@test.com", "password2");
    assert!(login.submit(&mut app.navigator).await);

    let mut list = app.news_screen();
    list.mount().await;
    list.select(0, &mut app.navigator);

    let mut detail = app.detail_screen().await.unwrap();
    detail.toggle().await;
    detail.open_favorites(&mut app.navigator);
    assert_eq!(app.navigator.current(), &Route::FavoritesNews);

    let mut screen = app.favorites_screen().await;
    assert_eq!(screen.items(), &[article("A")]);
    screen.remove_at(0).await;
    assert!(screen.is_empty());

    screen.go_home(&mut app.navigator);
    assert_eq!(app.navigator.current(), &Route::News);
    assert_eq!(app.navigator.depth(), 2);
    assert!(app.detail_screen().await.is_none());
}
