//! Test helpers and fixtures for lockstep integration tests

use std::sync::{Arc, Once};
use std::thread;
use std::time::{Duration, Instant};

use lockstep::core::testing::{MockEngine, MockTransport};
use lockstep::prelude::*;

/// Poll interval short enough for tests to observe several ticks quickly.
pub const TEST_POLL_INTERVAL: Duration = Duration::from_millis(2);

/// Upper bound for waiting on the poller thread.
pub const WAIT_TIMEOUT: Duration = Duration::from_secs(2);

/// System under test with its mocks.
pub struct Fixture {
    pub system: SyncSystem,
    pub engine: Arc<MockEngine>,
    pub transport: Arc<MockTransport>,
}

impl Fixture {
    pub fn controller(&self) -> SyncController {
        self.system.controller()
    }

    pub fn hooks(&self) -> SyncHooks {
        self.system.hooks()
    }
}

/// Install a tracing subscriber once so control-path logs show with `--nocapture`.
pub fn init_tracing() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// Unbound system in `mode`, not polling.
pub fn unbound_system(mode: SyncMode) -> (SyncSystem, Arc<MockEngine>) {
    init_tracing();
    let engine = Arc::new(MockEngine::new());
    let system = SyncSystem::builder()
        .engine(engine.clone())
        .initial_mode(mode)
        .poll_interval(TEST_POLL_INTERVAL)
        .build()
        .expect("Failed to build sync system");
    (system, engine)
}

/// System in `mode` with a bound transport, sync switched off.
pub fn test_system(mode: SyncMode) -> Fixture {
    let (system, engine) = unbound_system(mode);
    let transport = Arc::new(MockTransport::new());
    system
        .bind_transport_handle(transport.clone())
        .expect("Failed to bind transport");
    Fixture {
        system,
        engine,
        transport,
    }
}

/// Bound system in `mode` with sync switched on and the poller stopped, so
/// ticks only happen when the test calls them.
pub fn active_system(mode: SyncMode) -> Fixture {
    let fixture = test_system(mode);
    fixture.system.stop_poller();
    assert!(fixture.controller().set_active(true));
    fixture
}

/// Spin until `condition` holds or [`WAIT_TIMEOUT`] elapses.
pub fn wait_for(mut condition: impl FnMut() -> bool) -> bool {
    let deadline = Instant::now() + WAIT_TIMEOUT;
    while Instant::now() < deadline {
        if condition() {
            return true;
        }
        thread::sleep(Duration::from_millis(1));
    }
    condition()
}
