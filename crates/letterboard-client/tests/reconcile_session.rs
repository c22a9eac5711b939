use async_trait::async_trait;
use letterboard_client::{ClientError, LocalTransport, Session, SessionConfig, Transport};
use letterboard_model::{StyleMap, Tile};
use letterboard_repo::TileRepository;
use letterboard_service::BoardService;
use letterboard_store::MemoryStore;
use letterboard_test_utils::{board_fixture, three_tiles};
use pretty_assertions::assert_eq;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;

async fn fixture_service() -> Arc<BoardService<MemoryStore>> {
    let repo = TileRepository::new(Arc::new(MemoryStore::new()));
    repo.set_board(&board_fixture()).await.unwrap();
    repo.set_all(&three_tiles()).await.unwrap();
    Arc::new(BoardService::new(repo))
}

fn session_for(service: &Arc<BoardService<MemoryStore>>) -> Session<LocalTransport<MemoryStore>> {
    Session::new(LocalTransport::new(Arc::clone(service)))
}

#[tokio::test]
async fn initialize_loads_board_and_tiles() {
    let service = fixture_service().await;
    let session = session_for(&service);
    session.initialize().await.unwrap();

    assert_eq!(session.board().await, board_fixture());
    assert_eq!(session.tiles().await, three_tiles());
}

#[tokio::test]
async fn drag_release_propagates_to_other_viewers() {
    let service = fixture_service().await;
    let alice = session_for(&service);
    let bob = session_for(&service);
    alice.initialize().await.unwrap();
    bob.initialize().await.unwrap();

    alice.begin_drag(0).await.unwrap();
    alice.drag_to("15em", "15em").await.unwrap();
    alice.release_drag("rotate(1deg)", "0 0").await.unwrap();

    bob.poll_once().await;
    let seen = bob.tiles().await;
    let moved = seen.iter().find(|t| t.id == 0).unwrap();
    assert_eq!(moved.style.position_fields(), Some(("15em", "15em")));
    assert_eq!(moved.style.transform_fields(), Some(("rotate(1deg)", "0 0")));
    // Creation-time fields untouched by the partial update.
    assert_eq!(moved.style.color.as_deref(), Some("blue"));
}

#[tokio::test]
async fn polling_does_not_yank_a_dragged_tile() {
    let service = fixture_service().await;
    let alice = session_for(&service);
    let bob = session_for(&service);
    alice.initialize().await.unwrap();
    bob.initialize().await.unwrap();

    alice.begin_drag(1).await.unwrap();
    alice.drag_to("7em", "7em").await.unwrap();

    // Bob moves a different tile while Alice's drag is in flight.
    bob.begin_drag(2).await.unwrap();
    bob.drag_to("3em", "3em").await.unwrap();
    bob.release_drag("none", "0 0").await.unwrap();

    // Alice polls mid-drag: her tile keeps its local optimistic style,
    // Bob's move is merged in.
    alice.poll_once().await;
    let tiles = alice.tiles().await;
    let dragged = tiles.iter().find(|t| t.id == 1).unwrap();
    assert_eq!(dragged.style.position_fields(), Some(("7em", "7em")));
    let bobs = tiles.iter().find(|t| t.id == 2).unwrap();
    assert_eq!(bobs.style.position_fields(), Some(("3em", "3em")));

    // After release, the next poll overwrites normally again.
    alice.release_drag("none", "0 0").await.unwrap();
    let stored = service.tile(1).await.unwrap();
    assert_eq!(stored.style.position_fields(), Some(("7em", "7em")));
}

/// Transport wrapper with switchable failure injection. The flags are
/// shared so tests keep a handle after the session takes ownership.
struct FlakyTransport {
    inner: LocalTransport<MemoryStore>,
    fail_fetches: Arc<AtomicBool>,
    fail_puts: Arc<AtomicBool>,
}

impl FlakyTransport {
    fn new(service: &Arc<BoardService<MemoryStore>>) -> (Self, Arc<AtomicBool>, Arc<AtomicBool>) {
        let fail_fetches = Arc::new(AtomicBool::new(false));
        let fail_puts = Arc::new(AtomicBool::new(false));
        let transport = Self {
            inner: LocalTransport::new(Arc::clone(service)),
            fail_fetches: Arc::clone(&fail_fetches),
            fail_puts: Arc::clone(&fail_puts),
        };
        (transport, fail_fetches, fail_puts)
    }
}

#[async_trait]
impl Transport for FlakyTransport {
    async fn fetch_tiles(&self) -> Result<Vec<Tile>, ClientError> {
        if self.fail_fetches.load(Ordering::SeqCst) {
            return Err(ClientError::Status(500));
        }
        self.inner.fetch_tiles().await
    }
    async fn fetch_board(&self) -> Result<StyleMap, ClientError> {
        if self.fail_fetches.load(Ordering::SeqCst) {
            return Err(ClientError::Status(500));
        }
        self.inner.fetch_board().await
    }
    async fn put_tile(&self, index: usize, tile: &Tile) -> Result<Tile, ClientError> {
        if self.fail_puts.load(Ordering::SeqCst) {
            return Err(ClientError::Status(500));
        }
        self.inner.put_tile(index, tile).await
    }
}

#[tokio::test]
async fn failed_update_keeps_optimistic_state_and_releases_ownership() {
    let service = fixture_service().await;
    let (transport, _, fail_puts) = FlakyTransport::new(&service);
    fail_puts.store(true, Ordering::SeqCst);
    let session = Session::new(transport);
    session.initialize().await.unwrap();

    session.begin_drag(0).await.unwrap();
    session.drag_to("9em", "9em").await.unwrap();
    // Swallowed failure: release still succeeds locally.
    session.release_drag("none", "0 0").await.unwrap();

    // Ownership released, so a new drag may start.
    session.begin_drag(1).await.unwrap();

    // Local optimistic position kept, server untouched.
    let local = session.tiles().await;
    assert_eq!(
        local.iter().find(|t| t.id == 0).unwrap().style.position_fields(),
        Some(("9em", "9em"))
    );
    let stored = service.tile(0).await.unwrap();
    assert_eq!(stored, three_tiles()[0]);
}

#[tokio::test]
async fn failed_poll_leaves_local_state_untouched() {
    let service = fixture_service().await;
    let (transport, fail_fetches, _) = FlakyTransport::new(&service);
    let session = Session::new(transport);
    session.initialize().await.unwrap();

    // Another viewer moves a tile, then polls start failing before this
    // session can observe the change.
    let writer = session_for(&service);
    writer.initialize().await.unwrap();
    writer.begin_drag(0).await.unwrap();
    writer.drag_to("9em", "9em").await.unwrap();
    writer.release_drag("none", "0 0").await.unwrap();

    let before = session.tiles().await;
    fail_fetches.store(true, Ordering::SeqCst);
    session.poll_once().await;
    assert_eq!(session.tiles().await, before);

    // Once the transport recovers, the next poll converges.
    fail_fetches.store(false, Ordering::SeqCst);
    session.poll_once().await;
    assert_eq!(
        session.tiles().await.iter().find(|t| t.id == 0).unwrap().style.position_fields(),
        Some(("9em", "9em"))
    );
}

#[tokio::test]
async fn run_loop_polls_until_shutdown() {
    let service = fixture_service().await;
    let session = Arc::new(Session::with_config(
        LocalTransport::new(Arc::clone(&service)),
        SessionConfig {
            poll_interval: Duration::from_millis(10),
        },
    ));
    session.initialize().await.unwrap();

    let (tx, rx) = watch::channel(false);
    let looped = {
        let session = Arc::clone(&session);
        tokio::spawn(async move { session.run(rx).await })
    };

    // Mutate the board through a second viewer and wait for the loop to
    // pick it up.
    let writer = session_for(&service);
    writer.initialize().await.unwrap();
    writer.begin_drag(2).await.unwrap();
    writer.drag_to("12em", "12em").await.unwrap();
    writer.release_drag("none", "0 0").await.unwrap();

    tokio::time::sleep(Duration::from_millis(100)).await;
    let seen = session.tiles().await;
    assert_eq!(
        seen.iter().find(|t| t.id == 2).unwrap().style.position_fields(),
        Some(("12em", "12em"))
    );

    tx.send(true).unwrap();
    looped.await.unwrap();
}
