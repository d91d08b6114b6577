//! Dispatcher ordering, failure isolation and lifecycle of a container.

mod common;

use std::time::Duration;

use catalog_mvi::mvi::{
    Container, Feature, HandlerContext, HandlerError, HandlerFuture, HandlerRegistry, Intent,
    UiState,
};

#[derive(Debug, Clone, PartialEq)]
enum Probe {
    Idle,
    Step { label: &'static str, n: u32 },
    Failed(String),
}

impl UiState for Probe {
    fn error(message: String) -> Option<Self> {
        Some(Probe::Failed(message))
    }
}

#[derive(Debug)]
enum ProbeIntent {
    /// Emit `count` steps, pausing after each.
    Emit {
        label: &'static str,
        count: u32,
        pause: Duration,
    },
    Panic { message: &'static str },
    Fail,
    Unhandled,
}

impl Intent for ProbeIntent {
    fn tag(&self) -> &'static str {
        match self {
            ProbeIntent::Emit { .. } => "emit",
            ProbeIntent::Panic { .. } => "panic",
            ProbeIntent::Fail => "fail",
            ProbeIntent::Unhandled => "unhandled",
        }
    }
}

struct ProbeFeature;

impl Feature for ProbeFeature {
    type State = Probe;
    type Intent = ProbeIntent;

    fn name(&self) -> &'static str {
        "probe"
    }

    fn initial_state(&self) -> Probe {
        Probe::Idle
    }

    fn register(registry: &mut HandlerRegistry<Self>) {
        registry
            .on("emit", on_emit)
            .on("panic", on_panic)
            .on("fail", on_fail);
    }
}

type Ctx = HandlerContext<ProbeFeature>;

fn on_emit(_feature: &mut ProbeFeature, intent: ProbeIntent, ctx: Ctx) -> HandlerFuture<'_> {
    Box::pin(async move {
        if let ProbeIntent::Emit {
            label,
            count,
            pause,
        } = intent
        {
            for n in 1..=count {
                ctx.emit(Probe::Step { label, n });
                tokio::time::sleep(pause).await;
            }
        }
        Ok(())
    })
}

fn on_panic(_feature: &mut ProbeFeature, intent: ProbeIntent, _ctx: Ctx) -> HandlerFuture<'_> {
    Box::pin(async move {
        if let ProbeIntent::Panic { message } = intent {
            panic!("{message}");
        }
        Ok(())
    })
}

fn on_fail(_feature: &mut ProbeFeature, _intent: ProbeIntent, _ctx: Ctx) -> HandlerFuture<'_> {
    Box::pin(async move { Err(HandlerError::Unexpected("nope".into())) })
}

fn emit(label: &'static str, count: u32, pause_ms: u64) -> ProbeIntent {
    ProbeIntent::Emit {
        label,
        count,
        pause: Duration::from_millis(pause_ms),
    }
}

#[tokio::test(start_paused = true)]
async fn emissions_of_one_intent_precede_the_next() {
    let container = Container::spawn(ProbeFeature);
    let mut stream = container.observe();

    // The first handler suspends between emissions; the second must still
    // wait for it to finish.
    let seen = common::run(&container, &mut stream, [emit("a", 3, 50), emit("b", 2, 0)]).await;

    assert_eq!(
        seen,
        vec![
            Probe::Idle,
            Probe::Step { label: "a", n: 1 },
            Probe::Step { label: "a", n: 2 },
            Probe::Step { label: "a", n: 3 },
            Probe::Step { label: "b", n: 1 },
            Probe::Step { label: "b", n: 2 },
        ]
    );
}

#[tokio::test(start_paused = true)]
async fn subscriber_count_does_not_change_the_sequence() {
    let single = Container::spawn(ProbeFeature);
    let mut only = single.observe();
    let single_seen = common::run(&single, &mut only, [emit("x", 2, 10), emit("y", 1, 0)]).await;

    let many = Container::spawn(ProbeFeature);
    let mut first = many.observe();
    let mut second = many.observe();
    let mut third = many.observe();
    let many_seen = common::run(&many, &mut first, [emit("x", 2, 10), emit("y", 1, 0)]).await;

    assert_eq!(single_seen, many_seen);
    assert_eq!(second.drain(), many_seen);
    assert_eq!(third.drain(), many_seen);
}

#[tokio::test]
async fn late_subscriber_starts_from_current() {
    let container = Container::spawn(ProbeFeature);
    container.dispatch(emit("a", 2, 0));
    container.settled().await;

    assert_eq!(container.current_snapshot(), Probe::Step { label: "a", n: 2 });
    let mut stream = container.observe();
    assert_eq!(stream.next().await, Some(Probe::Step { label: "a", n: 2 }));
}

#[tokio::test]
async fn panic_becomes_error_snapshot_and_queue_continues() {
    let container = Container::spawn(ProbeFeature);
    let mut stream = container.observe();

    let seen = common::run(
        &container,
        &mut stream,
        [
            ProbeIntent::Panic {
                message: "probe exploded",
            },
            emit("after", 1, 0),
        ],
    )
    .await;

    assert_eq!(
        seen,
        vec![
            Probe::Idle,
            Probe::Failed("Unexpected error: probe exploded".into()),
            Probe::Step {
                label: "after",
                n: 1
            },
        ]
    );
}

#[tokio::test]
async fn handler_error_becomes_error_snapshot() {
    let container = Container::spawn(ProbeFeature);
    let mut stream = container.observe();

    let seen = common::run(&container, &mut stream, [ProbeIntent::Fail]).await;

    assert_eq!(
        seen,
        vec![Probe::Idle, Probe::Failed("Unexpected error: nope".into())]
    );
}

#[tokio::test]
async fn unregistered_intent_is_dropped_silently() {
    let container = Container::spawn(ProbeFeature);
    let mut stream = container.observe();

    let seen = common::run(
        &container,
        &mut stream,
        [ProbeIntent::Unhandled, emit("next", 1, 0)],
    )
    .await;

    assert_eq!(
        seen,
        vec![Probe::Idle, Probe::Step { label: "next", n: 1 }]
    );
}

#[tokio::test(start_paused = true)]
async fn close_discards_queued_intents_and_ends_streams() {
    let container = Container::spawn(ProbeFeature);
    let mut stream = container.observe();

    container.dispatch(emit("slow", 5, 100));
    container.dispatch(emit("queued", 1, 0));
    tokio::time::sleep(Duration::from_millis(150)).await;
    container.close();
    container.close();
    container.dispatch(emit("late", 1, 0));
    tokio::time::sleep(Duration::from_secs(1)).await;

    let mut seen = Vec::new();
    while let Some(snapshot) = stream.next().await {
        seen.push(snapshot);
    }
    assert_eq!(
        seen,
        vec![
            Probe::Idle,
            Probe::Step { label: "slow", n: 1 },
            Probe::Step { label: "slow", n: 2 },
        ]
    );
    assert!(container.is_closed());
    assert_eq!(
        container.current_snapshot(),
        Probe::Step { label: "slow", n: 2 }
    );
}

#[test]
fn registering_a_tag_twice_keeps_one_binding() {
    let mut registry = HandlerRegistry::<ProbeFeature>::new();
    registry.on("emit", on_emit).on("emit", on_emit);
    assert_eq!(registry.tags(), vec!["emit"]);
    assert!(registry.resolve("emit").is_some());
    assert!(registry.resolve("panic").is_none());
}
