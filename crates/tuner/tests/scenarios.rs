#![allow(clippy::unwrap_used, clippy::expect_used)]
use std::sync::{Arc, Mutex};

use {
    tuner::{
        ActivationToken, BootstrapSource, NavigationDecision, PlaybackState, PlayerSurface,
        RecoveryAction, RenderDirective, SurfaceError, Tuner, TunerEvent, TunerOptions,
    },
    tuner_channels::ChannelRecord,
    tuner_config::{ChannelSeed, StorageBackend, TunerConfig},
    tuner_store::{JsonFileStore, KeyValueStore, MemoryStore},
};

const BUNNY: &str = "https://test-streams.mux.dev/x36xhzz/x36xhzz.m3u8";

#[derive(Debug, Clone, PartialEq, Eq)]
enum Call {
    Load(ActivationToken),
    Script(String),
    Clear,
}

/// Player surface that only records what it was asked to do.
#[derive(Clone, Default)]
struct RecordingSurface {
    calls: Arc<Mutex<Vec<Call>>>,
}

impl RecordingSurface {
    fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn loads(&self) -> usize {
        self.calls()
            .iter()
            .filter(|c| matches!(c, Call::Load(_)))
            .count()
    }

    fn last(&self) -> Option<Call> {
        self.calls().last().cloned()
    }
}

impl PlayerSurface for RecordingSurface {
    fn load_document(&self, directive: &RenderDirective) {
        assert_eq!(directive.content_type, "text/html");
        self.calls
            .lock()
            .unwrap()
            .push(Call::Load(directive.token.clone()));
    }

    fn execute_script(&self, script: &str) {
        self.calls
            .lock()
            .unwrap()
            .push(Call::Script(script.to_string()));
    }

    fn clear(&self) {
        self.calls.lock().unwrap().push(Call::Clear);
    }
}

fn snapshot(channels: &[(&str, &str)]) -> String {
    let records: Vec<_> = channels
        .iter()
        .map(|(name, url)| ChannelRecord::new(*name, *url))
        .collect();
    serde_json::to_string(&records).unwrap()
}

fn three_channels() -> String {
    snapshot(&[
        ("One", "https://one.example/live.m3u8"),
        ("Two", "https://two.example/live.m3u8"),
        ("Three", "https://three.example/live.m3u8"),
    ])
}

async fn start(store: Arc<dyn KeyValueStore>) -> (Tuner, RecordingSurface) {
    let surface = RecordingSurface::default();
    let tuner = Tuner::start(store, Box::new(surface.clone()), TunerOptions::default()).await;
    (tuner, surface)
}

async fn persisted_names(store: &dyn KeyValueStore) -> Vec<String> {
    let raw = store.get("channels").await.unwrap().unwrap();
    let records: Vec<ChannelRecord> = serde_json::from_str(&raw).unwrap();
    records.into_iter().map(|r| r.name).collect()
}

fn assert_selection_invariant(tuner: &Tuner) {
    match tuner.selected() {
        None => {
            assert!(tuner.channels().is_empty());
            assert!(tuner.token().is_none());
        },
        Some(selected) => {
            assert!(tuner.channels().iter().any(|c| c.id() == selected.id()));
            assert_eq!(
                tuner.token(),
                Some(&ActivationToken::for_url(selected.url()))
            );
        },
    }
}

// ── Bootstrap ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn empty_store_starts_with_defaults() {
    let store = Arc::new(MemoryStore::new());
    let (tuner, surface) = start(store.clone()).await;

    assert_eq!(tuner.channels().len(), 2);
    assert_eq!(tuner.source(), Some(BootstrapSource::DefaultsEmptyStore));
    let first = &tuner.channels()[0];
    assert_eq!(first.url(), BUNNY);
    assert_eq!(tuner.selected(), Some(first));
    assert_eq!(tuner.token(), Some(&ActivationToken::for_url(BUNNY)));
    assert_eq!(tuner.state(), PlaybackState::Loading);
    assert_eq!(surface.calls(), vec![Call::Load(ActivationToken::for_url(BUNNY))]);

    // Defaults are not written back until something changes.
    tuner.flush().await;
    assert!(store.get("channels").await.unwrap().is_none());
}

#[tokio::test]
async fn corrupt_snapshot_is_cleared_and_defaults_used() {
    let store = Arc::new(MemoryStore::with_entry("channels", "not-json"));
    let (tuner, _surface) = start(store.clone()).await;

    assert_eq!(tuner.source(), Some(BootstrapSource::DefaultsCorrupt));
    assert_eq!(tuner.channels().len(), 2);
    tuner.flush().await;
    assert!(store.get("channels").await.unwrap().is_none());
}

#[tokio::test]
async fn unavailable_store_uses_defaults_without_clearing() {
    let store = Arc::new(MemoryStore::with_entry("channels", three_channels()));
    store.set_offline(true);
    let (tuner, _surface) = start(store.clone()).await;

    assert_eq!(tuner.source(), Some(BootstrapSource::DefaultsUnavailable));
    assert_eq!(tuner.channels().len(), 2);

    tuner.flush().await;
    store.set_offline(false);
    assert_eq!(
        store.get("channels").await.unwrap(),
        Some(three_channels())
    );
}

#[tokio::test]
async fn persisted_list_is_loaded_in_order() {
    let store = Arc::new(MemoryStore::with_entry("channels", three_channels()));
    let (tuner, _surface) = start(store).await;

    assert_eq!(tuner.source(), Some(BootstrapSource::Persisted));
    let names: Vec<_> = tuner.channels().iter().map(|c| c.name()).collect();
    assert_eq!(names, ["One", "Two", "Three"]);
    assert_eq!(tuner.selected().unwrap().name(), "One");
}

#[tokio::test]
async fn configured_seeds_replace_builtin_defaults() {
    let mut config = TunerConfig::default();
    config.storage.backend = StorageBackend::Memory;
    config.player.muted = true;
    config.defaults.channels = Some(vec![ChannelSeed {
        name: "Local".into(),
        url: "http://192.168.1.20/live.m3u8".into(),
    }]);

    let surface = RecordingSurface::default();
    let tuner = Tuner::from_config(&config, Box::new(surface.clone()))
        .await
        .unwrap();

    assert_eq!(tuner.channels().len(), 1);
    assert_eq!(tuner.selected().unwrap().name(), "Local");
    assert_eq!(surface.loads(), 1);
}

#[tokio::test]
async fn empty_seed_list_starts_with_nothing() {
    let store = Arc::new(MemoryStore::new());
    let surface = RecordingSurface::default();
    let options = TunerOptions {
        seeds: Some(Vec::new()),
        ..TunerOptions::default()
    };
    let tuner = Tuner::start(store, Box::new(surface.clone()), options).await;

    assert!(tuner.channels().is_empty());
    assert!(tuner.selected().is_none());
    assert_eq!(tuner.state(), PlaybackState::Empty);
    assert!(surface.calls().is_empty());
}

// ── Mutations ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn add_appends_and_persists_full_list() {
    let store = Arc::new(MemoryStore::new());
    let (mut tuner, surface) = start(store.clone()).await;

    let added = tuner.add("  News  ", " https://news.example/live.m3u8 ").unwrap();
    assert_eq!(added.name(), "News");
    assert_eq!(added.url(), "https://news.example/live.m3u8");
    assert_eq!(tuner.channels().last(), Some(&added));
    // A selection already existed, so the surface is left alone.
    assert_eq!(surface.loads(), 1);

    tuner.flush().await;
    assert_eq!(
        persisted_names(store.as_ref()).await,
        ["Big Buck Bunny", "Apple fMP4 Bipbop", "News"]
    );
}

#[tokio::test]
async fn invalid_input_changes_nothing() {
    let store = Arc::new(MemoryStore::with_entry("channels", three_channels()));
    let (mut tuner, _surface) = start(store.clone()).await;
    let before = tuner.channels().to_vec();
    let second = before[1].id();

    assert!(matches!(
        tuner.add("", "https://x.example/a.m3u8"),
        Err(tuner::Error::Validation(_))
    ));
    assert!(matches!(
        tuner.add("Name", "not a url"),
        Err(tuner::Error::Validation(_))
    ));
    assert!(matches!(
        tuner.edit(second, "Name", "  "),
        Err(tuner::Error::Validation(_))
    ));
    assert_eq!(tuner.channels(), before.as_slice());

    tuner.flush().await;
    assert_eq!(
        store.get("channels").await.unwrap(),
        Some(three_channels())
    );
}

#[tokio::test]
async fn removing_selected_middle_channel_moves_to_first() {
    let store = Arc::new(MemoryStore::with_entry("channels", three_channels()));
    let (mut tuner, surface) = start(store.clone()).await;
    let second = tuner.channels()[1].id();

    tuner.select(second).unwrap();
    assert_eq!(
        surface.last(),
        Some(Call::Load(ActivationToken::for_url("https://two.example/live.m3u8")))
    );

    assert!(tuner.remove(second));
    assert_eq!(tuner.selected().unwrap().name(), "One");
    let expected = ActivationToken::for_url("https://one.example/live.m3u8");
    assert_eq!(tuner.token(), Some(&expected));
    assert_eq!(surface.last(), Some(Call::Load(expected)));

    tuner.flush().await;
    assert_eq!(persisted_names(store.as_ref()).await, ["One", "Three"]);
}

#[tokio::test]
async fn removing_unselected_channel_keeps_surface() {
    let store = Arc::new(MemoryStore::with_entry("channels", three_channels()));
    let (mut tuner, surface) = start(store).await;
    let third = tuner.channels()[2].id();

    assert!(tuner.remove(third));
    assert_eq!(tuner.selected().unwrap().name(), "One");
    assert_eq!(surface.loads(), 1);
}

#[tokio::test]
async fn remove_twice_is_a_no_op() {
    let store = Arc::new(MemoryStore::with_entry("channels", three_channels()));
    let (mut tuner, _surface) = start(store).await;
    let third = tuner.channels()[2].id();

    assert!(tuner.remove(third));
    let after_first = tuner.channels().to_vec();
    assert!(!tuner.remove(third));
    assert_eq!(tuner.channels(), after_first.as_slice());
}

#[tokio::test]
async fn editing_selected_url_follows_and_rebuilds() {
    let store = Arc::new(MemoryStore::new());
    let (mut tuner, surface) = start(store).await;
    let first = tuner.channels()[0].id();

    let edited = tuner
        .edit(first, "Bunny HD", "https://bunny.example/hd.m3u8")
        .unwrap();

    assert_eq!(tuner.channels()[0], edited);
    assert_eq!(tuner.selected(), Some(&edited));
    let expected = ActivationToken::for_url("https://bunny.example/hd.m3u8");
    assert_eq!(tuner.token(), Some(&expected));
    assert_eq!(surface.last(), Some(Call::Load(expected)));
}

#[tokio::test]
async fn renaming_selected_channel_does_not_rebuild() {
    let store = Arc::new(MemoryStore::new());
    let (mut tuner, surface) = start(store).await;
    let first = tuner.channels()[0].id();

    let edited = tuner.edit(first, "Bunny", BUNNY).unwrap();

    assert_eq!(tuner.selected().unwrap().name(), "Bunny");
    assert_eq!(tuner.selected().unwrap().id(), edited.id());
    assert_eq!(surface.loads(), 1);
}

#[tokio::test]
async fn selecting_a_duplicate_url_does_not_rebuild() {
    let store = Arc::new(MemoryStore::new());
    let (mut tuner, surface) = start(store).await;

    let copy = tuner.add("Big Buck Bunny", BUNNY).unwrap();
    assert_eq!(tuner.channels().len(), 3);

    tuner.select(copy.id()).unwrap();
    assert_eq!(tuner.selected().unwrap().id(), copy.id());
    assert_eq!(surface.loads(), 1);

    let other = tuner.channels()[1].id();
    tuner.select(other).unwrap();
    assert_eq!(surface.loads(), 2);
}

#[tokio::test]
async fn selection_invariant_holds_through_mutations() {
    let store = Arc::new(MemoryStore::new());
    let (mut tuner, surface) = start(store).await;
    assert_selection_invariant(&tuner);

    let news = tuner.add("News", "https://news.example/live.m3u8").unwrap();
    assert_selection_invariant(&tuner);

    tuner.select(news.id()).unwrap();
    assert_selection_invariant(&tuner);

    let news = tuner
        .edit(news.id(), "News 24", "https://news.example/24.m3u8")
        .unwrap();
    assert_selection_invariant(&tuner);
    assert_eq!(tuner.selected(), Some(&news));

    while let Some(first) = tuner.channels().first().map(|c| c.id()) {
        assert!(tuner.remove(first));
        assert_selection_invariant(&tuner);
    }
    assert!(tuner.selected().is_none());
    assert_eq!(tuner.state(), PlaybackState::Empty);
    assert_eq!(surface.last(), Some(Call::Clear));

    let radio = tuner.add("Radio", "https://radio.example/live.m3u8").unwrap();
    assert_selection_invariant(&tuner);
    assert_eq!(tuner.selected(), Some(&radio));
    assert_eq!(tuner.state(), PlaybackState::Loading);
    assert_eq!(
        surface.last(),
        Some(Call::Load(ActivationToken::for_url(radio.url())))
    );
}

// ── Surface callbacks ───────────────────────────────────────────────────────

#[tokio::test]
async fn created_moves_to_playing() {
    let (mut tuner, _surface) = start(Arc::new(MemoryStore::new())).await;
    let mut events = tuner.subscribe();

    tuner.on_surface_created();

    assert_eq!(tuner.state(), PlaybackState::Playing);
    assert_eq!(
        events.try_recv().unwrap(),
        TunerEvent::PlaybackStateChanged {
            state: PlaybackState::Playing
        }
    );
}

#[tokio::test]
async fn load_error_goes_through_error_and_reloads() {
    let store = Arc::new(MemoryStore::with_entry("channels", three_channels()));
    let (mut tuner, surface) = start(store).await;
    tuner.on_surface_created();
    let mut events = tuner.subscribe();

    let action = tuner
        .on_surface_error(SurfaceError::Load {
            code: -2,
            message: "net::ERR_CONNECTION_RESET".into(),
            request_url: "https://one.example/live.m3u8".into(),
        })
        .await;

    assert_eq!(action, RecoveryAction::Reload);
    assert_eq!(tuner.state(), PlaybackState::Loading);
    assert_eq!(tuner.selected().unwrap().name(), "One");
    // Same URL, but a reload always rebuilds.
    assert_eq!(surface.loads(), 2);

    let mut states = Vec::new();
    while let Ok(event) = events.try_recv() {
        if let TunerEvent::PlaybackStateChanged { state } = event {
            states.push(state);
        }
    }
    assert_eq!(states, [PlaybackState::Error, PlaybackState::Loading]);
}

#[tokio::test]
async fn http_error_changes_nothing() {
    let (mut tuner, surface) = start(Arc::new(MemoryStore::new())).await;
    tuner.on_surface_created();
    let mut events = tuner.subscribe();

    let action = tuner
        .on_surface_error(SurfaceError::Http {
            status: 404,
            request_url: "https://test-streams.mux.dev/x36xhzz/seg-1.ts".into(),
        })
        .await;

    assert_eq!(action, RecoveryAction::None);
    assert_eq!(tuner.state(), PlaybackState::Playing);
    assert_eq!(surface.loads(), 1);
    assert!(events.try_recv().is_err());
}

#[tokio::test]
async fn navigation_away_from_player_is_cancelled() {
    let (mut tuner, _surface) = start(Arc::new(MemoryStore::new())).await;

    assert_eq!(
        tuner.on_navigation_starting("data:text/html,<script>location='https://evil.example'</script>"),
        NavigationDecision::Cancel
    );
    assert_eq!(
        tuner.on_navigation_starting("about:blank"),
        NavigationDecision::Allow
    );
    tuner.on_surface_created();

    assert_eq!(
        tuner.on_navigation_starting("about:blank"),
        NavigationDecision::Cancel
    );
    assert_eq!(
        tuner.on_navigation_starting("https://ads.example/click"),
        NavigationDecision::Cancel
    );
    assert_eq!(
        tuner.on_navigation_starting(BUNNY),
        NavigationDecision::Cancel
    );
}

#[tokio::test]
async fn switching_channels_allows_the_new_document_once() {
    let (mut tuner, _surface) = start(Arc::new(MemoryStore::new())).await;
    assert_eq!(
        tuner.on_navigation_starting("about:blank"),
        NavigationDecision::Allow
    );
    tuner.on_surface_created();

    let second = tuner.channels()[1].id();
    tuner.select(second).unwrap();
    assert_eq!(
        tuner.on_navigation_starting("about:blank"),
        NavigationDecision::Allow
    );
    assert_eq!(
        tuner.on_navigation_starting("about:blank"),
        NavigationDecision::Cancel
    );
}

#[tokio::test]
async fn fullscreen_change_relays_out_document() {
    let (tuner, surface) = start(Arc::new(MemoryStore::new())).await;

    tuner.on_fullscreen_changed(true);

    match surface.last() {
        Some(Call::Script(script)) => assert!(script.contains("tunerLayout(true)")),
        other => panic!("expected a script call, got {other:?}"),
    }
}

// ── Persistence across restarts ─────────────────────────────────────────────

#[tokio::test]
async fn file_store_survives_restart() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("state").join("channels.json");

    {
        let store = Arc::new(JsonFileStore::new(path.clone()));
        let (mut tuner, _surface) = start(store).await;
        let second = tuner.channels()[1].id();
        tuner.add("News", "https://news.example/live.m3u8").unwrap();
        tuner.remove(second);
        tuner.flush().await;
    }

    let store = Arc::new(JsonFileStore::new(path));
    let (tuner, _surface) = start(store).await;
    assert_eq!(tuner.source(), Some(BootstrapSource::Persisted));
    let names: Vec<_> = tuner.channels().iter().map(|c| c.name()).collect();
    assert_eq!(names, ["Big Buck Bunny", "News"]);
}

#[tokio::test]
async fn garbled_store_file_recovers_on_next_save() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("channels.json");
    std::fs::write(&path, "{{ truncated").unwrap();

    let store = Arc::new(JsonFileStore::new(path.clone()));
    let (mut tuner, _surface) = start(store).await;
    assert_eq!(tuner.source(), Some(BootstrapSource::DefaultsEmptyStore));
    assert_eq!(tuner.channels().len(), 2);

    tuner.add("Mine", "https://mine.example/live.m3u8").unwrap();
    tuner.flush().await;

    let on_disk = std::fs::read_to_string(&path).unwrap();
    assert!(on_disk.contains("Mine"));
    assert_eq!(
        std::fs::read_to_string(path.with_extension("json.corrupt")).unwrap(),
        "{{ truncated"
    );

    let (tuner, _surface) = start(Arc::new(JsonFileStore::new(path))).await;
    assert_eq!(tuner.source(), Some(BootstrapSource::Persisted));
    assert_eq!(tuner.channels().len(), 3);
}
