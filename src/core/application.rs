//! # Application: lifecycle controller and cancellation context.
//!
//! The [`Application`] runs one workload, optionally alongside a service supervisor, and turns
//! every way the process can end (workload exit, workload error, panic, service failure,
//! OS signal) into a single, ordered shutdown.
//!
//! ## Run
//! ```text
//! run()
//!   ├─ no workload            ─► Err(MainOmitted)           (no side effects)
//!   ├─ CAS Init → Running     ─► Err(WrongState) on failure (no side effects)
//!   ├─ spawn event listener   (Bus ─► SubscriberSet)
//!   ├─ services.init          (bounded by initialization_timeout; abort on failure)
//!   ├─ signals.listen()       (register SIGHUP/SIGINT/SIGTERM/SIGQUIT)
//!   ├─ spawn services.watch   (if configured)
//!   ├─ spawn run_main         (workload behind a panic boundary)
//!   ├─ spawn watch_signals    (hold-on, then forced shutdown after the grace period)
//!   ├─ await done latch
//!   └─ publish Stopped, drain subscribers (bounded by drain_timeout), return recorded error
//! ```
//!
//! ## Transitions
//! | From    | To       | Side effect                                | Triggered by                          |
//! |---------|----------|--------------------------------------------|---------------------------------------|
//! | Init    | Running  | -                                          | `run`                                 |
//! | Running | HoldOn   | close `hold_on` (and record error, if any) | workload exit, watch exit, signal, `hold_on()` |
//! | HoldOn  | Shutdown | close `done`                               | `shutdown()`, escalation              |
//!
//! ## Rules
//! - Every side effect is gated on a successful transition; losing callers do nothing.
//! - The first failure to win `Running → HoldOn` is the run's error; later ones are dropped.
//! - `hold_on` always closes before `done`.

use std::any::Any;
use std::sync::Arc;
use std::time::Instant;

use parking_lot::Mutex;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;

use crate::context::{AppContextKey, Context};
use crate::core::builder::ApplicationBuilder;
use crate::core::config::AppConfig;
use crate::core::latch::Latch;
use crate::core::services::{self, Services};
use crate::core::shutdown::{self, SignalSource};
use crate::core::runner;
use crate::core::state::{AppState, StateCell};
use crate::error::{AppError, ContextError};
use crate::events::{Bus, Event, EventKind};
use crate::subscribers::{Subscribe, SubscriberSet};
use crate::workload::WorkloadRef;

/// Lifecycle controller for a long-running process.
///
/// Build with [`Application::builder`], run once with [`Application::run`]. The application is
/// also a [`Context`]: the workload receives it and can wait on [`Context::done`].
pub struct Application {
    cfg: AppConfig,
    main: Option<WorkloadRef>,
    services: Option<Arc<dyn Services>>,
    signals: Arc<dyn SignalSource>,
    subscribers: Vec<Arc<dyn Subscribe>>,
    bus: Bus,

    state: StateCell,
    error: Mutex<Option<AppError>>,
    hold_on: Latch,
    done: Latch,
}

impl Application {
    /// Returns a builder with the given configuration.
    pub fn builder(cfg: AppConfig) -> ApplicationBuilder {
        ApplicationBuilder::new(cfg)
    }

    pub(crate) fn new_internal(
        cfg: AppConfig,
        main: Option<WorkloadRef>,
        services: Option<Arc<dyn Services>>,
        signals: Arc<dyn SignalSource>,
        subscribers: Vec<Arc<dyn Subscribe>>,
    ) -> Self {
        let bus = Bus::new(cfg.bus_capacity_clamped());
        Self {
            cfg,
            main,
            services,
            signals,
            subscribers,
            bus,
            state: StateCell::new(),
            error: Mutex::new(None),
            hold_on: Latch::new(),
            done: Latch::new(),
        }
    }

    /// Recovers the application from a context obtained through it (directly or via a derived
    /// context).
    pub fn from_context(ctx: &dyn Context) -> Option<&Application> {
        ctx.value(&AppContextKey)
            .and_then(|v| v.downcast_ref::<Application>())
    }

    /// Returns the configuration.
    pub fn config(&self) -> &AppConfig {
        &self.cfg
    }

    /// Returns the current lifecycle state.
    pub fn state(&self) -> AppState {
        self.state.load()
    }

    /// Returns the latch closed when graceful termination begins.
    pub fn hold_on_latch(&self) -> Latch {
        self.hold_on.clone()
    }

    /// Subscribes to lifecycle events published after this call.
    pub fn events(&self) -> broadcast::Receiver<Event> {
        self.bus.subscribe()
    }

    pub(crate) fn bus(&self) -> &Bus {
        &self.bus
    }

    /// Runs the workload until the application shuts down.
    ///
    /// Returns the first recorded failure, or `Ok(())` on a clean run. Single-use: a second
    /// call returns [`AppError::WrongState`].
    pub async fn run(self: &Arc<Self>) -> Result<(), AppError> {
        let Some(main) = self.main.clone() else {
            return Err(AppError::MainOmitted);
        };
        if !self.state.transition(AppState::Init, AppState::Running) {
            return Err(AppError::WrongState {
                state: self.state.load(),
            });
        }

        let listener = self.spawn_event_listener();
        self.bus.publish(Event::new(EventKind::Starting));

        let res = self.drive(main).await;

        let stopped = match &res {
            Ok(()) => Event::new(EventKind::Stopped),
            Err(e) => Event::new(EventKind::Stopped).with_reason(e.to_string()),
        };
        self.bus.publish(stopped);
        if let Err(join_err) = listener.await {
            self.bus.publish(
                Event::new(EventKind::SubscriberAborted).with_reason(join_err.to_string()),
            );
        }
        res
    }

    /// Starts every worker and waits for the done latch.
    async fn drive(self: &Arc<Self>, main: WorkloadRef) -> Result<(), AppError> {
        if let Some(svc) = &self.services {
            let init = services::init_services(self, svc.as_ref(), self.cfg.init_timeout());
            if let Err(e) = init.await {
                self.shutdown();
                return Err(e);
            }
        }

        let signal = match self.signals.listen() {
            Ok(fut) => fut,
            Err(e) => {
                self.shutdown();
                return Err(AppError::Signal(e));
            }
        };

        if let Some(svc) = &self.services {
            tokio::spawn(services::watch_services(Arc::clone(self), Arc::clone(svc)));
        }
        tokio::spawn(runner::run_main(Arc::clone(self), main));
        let watcher = tokio::spawn(shutdown::watch_signals(
            Arc::clone(self),
            signal,
            self.cfg.grace(),
        ));

        self.done.closed().await;
        watcher.abort();

        match self.error.lock().take() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    /// Forwards bus events to the subscriber set until `Stopped`, then drains the set within
    /// the configured drain timeout.
    fn spawn_event_listener(&self) -> JoinHandle<Vec<&'static str>> {
        let mut rx = self.bus.subscribe();
        let set = SubscriberSet::new(self.subscribers.clone(), self.bus.clone());
        let drain = self.cfg.drain();

        tokio::spawn(async move {
            loop {
                match rx.recv().await {
                    Ok(ev) => {
                        let last = ev.is_terminal();
                        set.emit(ev);
                        if last {
                            break;
                        }
                    }
                    Err(broadcast::error::RecvError::Lagged(_)) => continue,
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
            set.shutdown(drain).await
        })
    }

    /// Asks the workload to stop taking new work.
    ///
    /// Idempotent: only the first call from `Running` closes the hold-on latch.
    pub fn hold_on(&self) {
        if self.state.transition(AppState::Running, AppState::HoldOn) {
            self.bus.publish(Event::new(EventKind::HoldOnRequested));
            self.hold_on.close();
        }
    }

    /// Stops the application. Implies [`hold_on`](Self::hold_on).
    ///
    /// Idempotent: only the first call from `HoldOn` closes the done latch.
    pub fn shutdown(&self) {
        self.hold_on();
        if self.state.transition(AppState::HoldOn, AppState::Shutdown) {
            self.bus.publish(Event::new(EventKind::ShutdownCompleted));
            self.done.close();
        }
    }

    /// Records `err` as the run's outcome if this call wins `Running → HoldOn`.
    ///
    /// The slot lock is held across the transition and the store, so `drive` never reads the
    /// slot between the two.
    pub(crate) fn set_error(&self, err: AppError) {
        let mut slot = self.error.lock();
        if self.state.transition(AppState::Running, AppState::HoldOn) {
            self.bus
                .publish(Event::new(EventKind::HoldOnRequested).with_reason(err.to_string()));
            *slot = Some(err);
            self.hold_on.close();
        }
    }
}

impl Context for Application {
    fn deadline(&self) -> Option<Instant> {
        None
    }

    fn done(&self) -> Latch {
        self.done.clone()
    }

    fn err(&self) -> Option<ContextError> {
        (self.state.load() == AppState::Shutdown).then_some(ContextError::Shutdown)
    }

    fn value(&self, key: &dyn Any) -> Option<&(dyn Any + Send + Sync)> {
        if key.is::<AppContextKey>() {
            Some(self as &(dyn Any + Send + Sync))
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::time::Duration;

    use async_trait::async_trait;
    use futures::FutureExt;
    use futures::future::BoxFuture;
    use tokio::sync::{Notify, oneshot};

    use crate::core::shutdown::TermSignal;
    use crate::error::BoxError;

    /// Signal source driven by the test instead of the OS.
    #[derive(Clone, Default)]
    struct ManualSignal(Arc<Notify>);

    impl ManualSignal {
        fn raise(&self) {
            self.0.notify_one();
        }
    }

    impl SignalSource for ManualSignal {
        fn listen(&self) -> io::Result<BoxFuture<'static, TermSignal>> {
            let notify = Arc::clone(&self.0);
            Ok(async move {
                notify.notified().await;
                TermSignal::Terminate
            }
            .boxed())
        }
    }

    struct BrokenSignals;

    impl SignalSource for BrokenSignals {
        fn listen(&self) -> io::Result<BoxFuture<'static, TermSignal>> {
            Err(io::Error::other("no signals here"))
        }
    }

    #[derive(Debug)]
    struct DomainError(&'static str);

    impl std::fmt::Display for DomainError {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "domain: {}", self.0)
        }
    }

    impl std::error::Error for DomainError {}

    fn grace_cfg(grace: Duration) -> AppConfig {
        AppConfig {
            termination_timeout: grace,
            ..AppConfig::default()
        }
    }

    fn drain(rx: &mut broadcast::Receiver<Event>) -> Vec<Event> {
        let mut out = Vec::new();
        while let Ok(ev) = rx.try_recv() {
            out.push(ev);
        }
        out
    }

    fn count(events: &[Event], kind: EventKind) -> usize {
        events.iter().filter(|e| e.kind == kind).count()
    }

    fn seq_of(events: &[Event], kind: EventKind) -> u64 {
        events
            .iter()
            .find(|e| e.kind == kind)
            .map(|e| e.seq)
            .unwrap()
    }

    async fn finish(app: &Arc<Application>) -> Result<(), AppError> {
        tokio::time::timeout(Duration::from_secs(5), app.run())
            .await
            .expect("run should finish")
    }

    #[tokio::test]
    async fn test_clean_run_returns_ok() {
        let app = Application::builder(grace_cfg(Duration::from_secs(1)))
            .with_main_fn(|_ctx: Arc<dyn Context>, _hold: Latch| async { Ok::<_, BoxError>(()) })
            .with_signals(ManualSignal::default())
            .build();

        assert!(finish(&app).await.is_ok());
        assert_eq!(app.state(), AppState::Shutdown);
        assert!(app.done().is_closed());
        assert!(app.hold_on_latch().is_closed());
        assert_eq!(app.err(), Some(ContextError::Shutdown));
    }

    #[tokio::test]
    async fn test_workload_error_is_returned() {
        let app = Application::builder(grace_cfg(Duration::from_secs(1)))
            .with_main_fn(|_ctx: Arc<dyn Context>, _hold: Latch| async {
                Err::<(), BoxError>(Box::new(DomainError("db down")))
            })
            .with_signals(ManualSignal::default())
            .build();
        let mut rx = app.events();

        let err = finish(&app).await.unwrap_err();
        let inner = err.as_main().expect("workload error");
        assert_eq!(inner.to_string(), "domain: db down");
        assert!(inner.downcast_ref::<DomainError>().is_some());

        let events = drain(&mut rx);
        assert!(seq_of(&events, EventKind::HoldOnRequested) < seq_of(&events, EventKind::ShutdownCompleted));
        assert!(app.hold_on_latch().is_closed());
        assert!(app.done().is_closed());
    }

    #[tokio::test]
    async fn test_workload_panic_becomes_error() {
        let app = Application::builder(grace_cfg(Duration::from_secs(1)))
            .with_main_fn(|_ctx: Arc<dyn Context>, _hold: Latch| async {
                if true {
                    panic!("kaboom");
                }
                Ok::<_, BoxError>(())
            })
            .with_signals(ManualSignal::default())
            .build();

        match finish(&app).await {
            Err(AppError::Panicked { message }) => assert_eq!(message, "kaboom"),
            other => panic!("unexpected result: {other:?}"),
        }
        assert_eq!(app.err(), Some(ContextError::Shutdown));
    }

    #[tokio::test]
    async fn test_second_run_is_wrong_state() {
        let app = Application::builder(grace_cfg(Duration::from_secs(1)))
            .with_main_fn(|_ctx: Arc<dyn Context>, _hold: Latch| async {
                Err::<(), BoxError>("first".into())
            })
            .with_signals(ManualSignal::default())
            .build();

        assert!(finish(&app).await.is_err());
        match app.run().await {
            Err(AppError::WrongState { state }) => assert_eq!(state, AppState::Shutdown),
            other => panic!("unexpected result: {other:?}"),
        }
        assert_eq!(app.state(), AppState::Shutdown);
    }

    #[tokio::test]
    async fn test_missing_main_has_no_side_effects() {
        let app = Application::builder(AppConfig::default())
            .with_signals(BrokenSignals)
            .build();
        let mut rx = app.events();

        assert!(matches!(app.run().await, Err(AppError::MainOmitted)));
        assert_eq!(app.state(), AppState::Init);
        assert!(!app.hold_on_latch().is_closed());
        assert!(!app.done().is_closed());
        assert!(drain(&mut rx).is_empty());
    }

    #[tokio::test]
    async fn test_signal_forces_shutdown_after_grace() {
        let signal = ManualSignal::default();
        let app = Application::builder(grace_cfg(Duration::from_millis(50)))
            .with_main_fn(|_ctx: Arc<dyn Context>, _hold: Latch| async {
                std::future::pending::<()>().await;
                Ok::<_, BoxError>(())
            })
            .with_signals(signal.clone())
            .build();
        let mut rx = app.events();

        signal.raise();
        let started = Instant::now();
        assert!(finish(&app).await.is_ok());
        let elapsed = started.elapsed();
        assert!(elapsed >= Duration::from_millis(50));
        assert!(elapsed < Duration::from_millis(550), "forced shutdown took {elapsed:?}");

        let events = drain(&mut rx);
        assert_eq!(count(&events, EventKind::SignalReceived), 1);
        assert_eq!(count(&events, EventKind::EscalationFired), 1);
        assert_eq!(count(&events, EventKind::ShutdownCompleted), 1);
    }

    #[tokio::test]
    async fn test_cooperative_workload_exits_before_grace() {
        let signal = ManualSignal::default();
        let app = Application::builder(grace_cfg(Duration::from_secs(30)))
            .with_main_fn(|_ctx: Arc<dyn Context>, hold: Latch| async move {
                hold.closed().await;
                Ok::<_, BoxError>(())
            })
            .with_signals(signal.clone())
            .build();
        let mut rx = app.events();

        signal.raise();
        assert!(finish(&app).await.is_ok());

        let events = drain(&mut rx);
        assert_eq!(count(&events, EventKind::EscalationFired), 0);
        assert_eq!(count(&events, EventKind::MainStopped), 1);
    }

    #[tokio::test]
    async fn test_hold_on_and_shutdown_are_idempotent() {
        let (started_tx, started_rx) = oneshot::channel::<()>();
        let started_tx = parking_lot::Mutex::new(Some(started_tx));
        let app = Application::builder(grace_cfg(Duration::from_secs(30)))
            .with_main_fn(move |ctx: Arc<dyn Context>, _hold: Latch| {
                let tx = started_tx.lock().take();
                async move {
                    if let Some(tx) = tx {
                        let _ = tx.send(());
                    }
                    ctx.done().closed().await;
                    Ok::<_, BoxError>(())
                }
            })
            .with_signals(ManualSignal::default())
            .build();
        let mut rx = app.events();

        let runner = {
            let app = Arc::clone(&app);
            tokio::spawn(async move { app.run().await })
        };
        started_rx.await.unwrap();

        for _ in 0..5 {
            app.hold_on();
        }
        assert_eq!(app.state(), AppState::HoldOn);
        assert!(app.hold_on_latch().is_closed());
        assert!(!app.done().is_closed());
        assert!(app.err().is_none());

        for _ in 0..3 {
            app.shutdown();
        }
        let res = tokio::time::timeout(Duration::from_secs(5), runner)
            .await
            .unwrap()
            .unwrap();
        assert!(res.is_ok());

        let events = drain(&mut rx);
        assert_eq!(count(&events, EventKind::HoldOnRequested), 1);
        assert_eq!(count(&events, EventKind::ShutdownCompleted), 1);
        assert!(seq_of(&events, EventKind::HoldOnRequested) < seq_of(&events, EventKind::ShutdownCompleted));
    }

    #[tokio::test]
    async fn test_hold_on_before_run_is_noop() {
        let app = Application::builder(AppConfig::default())
            .with_main_fn(|_ctx: Arc<dyn Context>, _hold: Latch| async { Ok::<_, BoxError>(()) })
            .with_signals(ManualSignal::default())
            .build();

        app.hold_on();
        app.shutdown();
        assert_eq!(app.state(), AppState::Init);
        assert!(finish(&app).await.is_ok());
    }

    #[tokio::test]
    async fn test_context_identity() {
        let app = Application::builder(AppConfig::default())
            .with_signals(ManualSignal::default())
            .build();

        let found = app
            .value(&AppContextKey)
            .and_then(|v| v.downcast_ref::<Application>())
            .expect("application under its key");
        assert!(std::ptr::eq(found, Arc::as_ptr(&app)));
        assert!(app.value(&"app").is_none());
        assert!(app.value(&42u32).is_none());

        let ctx: Arc<dyn Context> = app.clone();
        let recovered = Application::from_context(ctx.as_ref()).unwrap();
        assert!(std::ptr::eq(recovered, Arc::as_ptr(&app)));

        assert!(app.deadline().is_none());
        assert!(app.err().is_none());
    }

    #[tokio::test]
    async fn test_signal_registration_failure() {
        let app = Application::builder(AppConfig::default())
            .with_main_fn(|_ctx: Arc<dyn Context>, _hold: Latch| async { Ok::<_, BoxError>(()) })
            .with_signals(BrokenSignals)
            .build();

        assert!(matches!(finish(&app).await, Err(AppError::Signal(_))));
        assert!(app.done().is_closed());
    }

    struct TestServices {
        init: Result<(), &'static str>,
        init_delay: Duration,
        watch: Result<(), &'static str>,
        saw_deadline: AtomicBool,
    }

    impl TestServices {
        fn new(init: Result<(), &'static str>, watch: Result<(), &'static str>) -> Self {
            Self {
                init,
                init_delay: Duration::ZERO,
                watch,
                saw_deadline: AtomicBool::new(false),
            }
        }
    }

    #[async_trait]
    impl Services for TestServices {
        async fn init(&self, ctx: Arc<dyn Context>) -> Result<(), BoxError> {
            self.saw_deadline
                .store(ctx.deadline().is_some(), Ordering::SeqCst);
            assert!(Application::from_context(ctx.as_ref()).is_some());
            tokio::time::sleep(self.init_delay).await;
            self.init.map_err(Into::into)
        }

        async fn watch(&self, ctx: Arc<dyn Context>) -> Result<(), BoxError> {
            match self.watch {
                Ok(()) => {
                    ctx.done().closed().await;
                    Ok(())
                }
                Err(e) => Err(e.into()),
            }
        }
    }

    #[tokio::test]
    async fn test_services_watch_failure_wins() {
        let services = Arc::new(TestServices::new(Ok(()), Err("redis lost")));
        let app = Application::builder(grace_cfg(Duration::from_secs(30)))
            .with_main_fn(|_ctx: Arc<dyn Context>, hold: Latch| async move {
                hold.closed().await;
                Err::<(), BoxError>("main after hold".into())
            })
            .with_services(services.clone())
            .with_signals(ManualSignal::default())
            .build();

        match finish(&app).await {
            Err(AppError::Watch(e)) => assert_eq!(e.to_string(), "redis lost"),
            other => panic!("unexpected result: {other:?}"),
        }
        assert!(services.saw_deadline.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn test_services_init_failure_aborts() {
        let main_started = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&main_started);
        let app = Application::builder(AppConfig::default())
            .with_main_fn(move |_ctx: Arc<dyn Context>, _hold: Latch| {
                flag.store(true, Ordering::SeqCst);
                async { Ok::<_, BoxError>(()) }
            })
            .with_services(Arc::new(TestServices::new(Err("no config"), Ok(()))))
            .with_signals(BrokenSignals)
            .build();

        match finish(&app).await {
            Err(AppError::Init(e)) => assert_eq!(e.to_string(), "no config"),
            other => panic!("unexpected result: {other:?}"),
        }
        assert!(!main_started.load(Ordering::SeqCst));
        assert!(app.done().is_closed());
    }

    #[tokio::test]
    async fn test_services_init_timeout() {
        let mut services = TestServices::new(Ok(()), Ok(()));
        services.init_delay = Duration::from_secs(60);
        let app = Application::builder(AppConfig {
            initialization_timeout: Duration::from_millis(30),
            ..AppConfig::default()
        })
        .with_main_fn(|_ctx: Arc<dyn Context>, _hold: Latch| async { Ok::<_, BoxError>(()) })
        .with_services(Arc::new(services))
        .with_signals(ManualSignal::default())
        .build();

        match finish(&app).await {
            Err(AppError::InitTimeout { timeout }) => {
                assert_eq!(timeout, Duration::from_millis(30))
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_watch_exit_shuts_down() {
        struct QuickWatch;

        #[async_trait]
        impl Services for QuickWatch {
            async fn init(&self, _ctx: Arc<dyn Context>) -> Result<(), BoxError> {
                Ok(())
            }
            async fn watch(&self, _ctx: Arc<dyn Context>) -> Result<(), BoxError> {
                Ok(())
            }
        }

        let app = Application::builder(grace_cfg(Duration::from_secs(30)))
            .with_main_fn(|ctx: Arc<dyn Context>, _hold: Latch| async move {
                ctx.done().closed().await;
                Ok::<_, BoxError>(())
            })
            .with_services(Arc::new(QuickWatch))
            .with_signals(ManualSignal::default())
            .build();

        assert!(finish(&app).await.is_ok());
        assert_eq!(app.err(), Some(ContextError::Shutdown));
    }

    #[tokio::test]
    async fn test_watch_panic_becomes_watch_error() {
        struct PanickingWatch;

        #[async_trait]
        impl Services for PanickingWatch {
            async fn init(&self, _ctx: Arc<dyn Context>) -> Result<(), BoxError> {
                Ok(())
            }
            async fn watch(&self, _ctx: Arc<dyn Context>) -> Result<(), BoxError> {
                panic!("watch boom");
            }
        }

        let app = Application::builder(grace_cfg(Duration::from_secs(30)))
            .with_main_fn(|ctx: Arc<dyn Context>, _hold: Latch| async move {
                ctx.done().closed().await;
                Ok::<_, BoxError>(())
            })
            .with_services(Arc::new(PanickingWatch))
            .with_signals(ManualSignal::default())
            .build();
        let mut rx = app.events();

        match finish(&app).await {
            Err(AppError::Watch(e)) => assert_eq!(e.to_string(), "watch panicked: watch boom"),
            other => panic!("unexpected result: {other:?}"),
        }
        assert_eq!(app.state(), AppState::Shutdown);
        assert_eq!(count(&drain(&mut rx), EventKind::WatchFailed), 1);
    }

    struct StuckSubscriber;

    #[async_trait]
    impl Subscribe for StuckSubscriber {
        async fn on_event(&self, _event: &Event) {
            std::future::pending::<()>().await;
        }
        fn name(&self) -> &'static str {
            "stuck"
        }
    }

    #[tokio::test]
    async fn test_stuck_subscriber_does_not_block_run() {
        let signal = ManualSignal::default();
        let subs: Vec<Arc<dyn Subscribe>> = vec![Arc::new(StuckSubscriber)];
        let app = Application::builder(AppConfig {
            termination_timeout: Duration::from_millis(50),
            drain_timeout: Duration::from_millis(50),
            ..AppConfig::default()
        })
        .with_main_fn(|_ctx: Arc<dyn Context>, _hold: Latch| async {
            std::future::pending::<()>().await;
            Ok::<_, BoxError>(())
        })
        .with_subscribers(subs)
        .with_signals(signal.clone())
        .build();
        let mut rx = app.events();

        signal.raise();
        let started = Instant::now();
        let res = tokio::time::timeout(Duration::from_secs(2), app.run()).await;
        assert!(matches!(res, Ok(Ok(()))), "run did not return: {res:?}");
        assert!(started.elapsed() < Duration::from_millis(600));
        assert!(app.done().is_closed());

        let events = drain(&mut rx);
        let aborted: Vec<_> = events
            .iter()
            .filter(|e| e.kind == EventKind::SubscriberAborted)
            .collect();
        assert_eq!(aborted.len(), 1);
        assert_eq!(aborted[0].subscriber, Some("stuck"));
        assert_eq!(aborted[0].reason.as_deref(), Some("drain timeout"));
    }
}
