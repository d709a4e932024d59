//! Tests for the command engine

use super::*;
use crate::commands::registry::{MockCommandHost, OpenHost, RootClaim};
use crate::config::MessagesConfig;
use crate::error::HeraldError;
use crate::sender::MemorySender;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::mpsc;
use std::time::Duration;

fn args(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

fn engine() -> CommandEngine {
    CommandEngine::new(
        Arc::new(OpenHost),
        EngineConfig::default().with_worker_threads(1),
    )
    .unwrap()
}

fn echo(label: &'static str) -> HandlerBinding {
    HandlerBinding::callback(move |sender, args| {
        let line = format!("{label} {}", args.join(" "));
        sender.send_message(line.trim_end());
        Ok(())
    })
}

#[test]
fn test_handle_routes_longest_match() {
    let engine = engine();
    engine.register(CommandDescriptor::new("guild"), echo("guild")).unwrap();
    engine
        .register(CommandDescriptor::new("guild invite"), echo("invite"))
        .unwrap();
    let sender = Arc::new(MemorySender::new("alex"));

    let outcome = engine.handle(sender.clone(), "GUILD", &args(&["Invite", "Bob"]));
    assert_eq!(outcome, DispatchOutcome::Completed);
    assert_eq!(sender.take_messages(), vec!["invite Bob"]);

    engine.handle(sender.clone(), "guild", &args(&["list"]));
    assert_eq!(sender.take_messages(), vec!["guild list"]);
}

#[test]
fn test_no_match_sends_listing() {
    let engine = engine();
    engine
        .register(
            CommandDescriptor::new("guild invite")
                .with_usage("/guild invite <player>")
                .with_description("Invite a player"),
            echo("invite"),
        )
        .unwrap();
    engine
        .register(
            CommandDescriptor::new("guild disband").with_permission("guild.admin"),
            echo("disband"),
        )
        .unwrap();
    engine
        .register(CommandDescriptor::new("guild leave"), echo("leave"))
        .unwrap();
    let sender = Arc::new(MemorySender::new("alex"));

    let outcome = engine.handle(sender.clone(), "guild", &args(&["nonsense"]));

    assert_eq!(outcome, DispatchOutcome::NoMatch);
    assert_eq!(
        sender.messages(),
        vec![format!(
            "{}\n/guild invite <player> - Invite a player\n/guild leave",
            MessagesConfig::default().listing_header
        )]
    );
}

#[test]
fn test_no_match_without_reachable_commands() {
    let engine = engine();
    engine
        .register(
            CommandDescriptor::new("admin reload").with_permission("admin"),
            echo("reload"),
        )
        .unwrap();
    let sender = Arc::new(MemorySender::new("alex"));

    assert_eq!(
        engine.handle(sender.clone(), "admin", &[]),
        DispatchOutcome::NoMatch
    );
    assert_eq!(sender.messages(), vec![MessagesConfig::default().no_commands]);
    assert!(engine.help_listing(sender.as_ref(), "admin").is_empty());
}

#[test]
fn test_execute_unknown_root_returns_false() {
    let engine = engine();
    let sender = Arc::new(MemorySender::new("alex"));

    assert!(!engine.execute(sender.clone(), "nothing", &args(&["here"])));
    assert_eq!(sender.message_count(), 0);
    assert!(engine.help_listing(sender.as_ref(), "nothing").is_empty());
}

#[test]
fn test_execute_undeclared_root_returns_false() {
    let mut host = MockCommandHost::new();
    host.expect_claim_root().returning(|root| {
        if root == "shop" {
            RootClaim::Claimed
        } else {
            RootClaim::Undeclared
        }
    });
    let engine = CommandEngine::with_defaults(Arc::new(host)).unwrap();
    engine.register(CommandDescriptor::new("shop"), echo("shop")).unwrap();
    engine.register(CommandDescriptor::new("warp"), echo("warp")).unwrap();
    let sender = Arc::new(MemorySender::new("alex"));

    assert!(engine.execute(sender.clone(), " Shop ", &[]));
    assert!(!engine.execute(sender.clone(), "warp", &[]));
    assert_eq!(sender.messages(), vec!["shop"]);

    // Unknown sub-path on a routed root still counts as handled
    assert!(engine.execute(sender.clone(), "shop", &args(&["x"])));
}

#[test]
fn test_manifest_engine() {
    let config = EngineConfig::default()
        .with_worker_threads(1)
        .with_declared_roots(["shop"]);
    let engine = CommandEngine::with_manifest(config).unwrap();
    engine.register(CommandDescriptor::new("shop"), echo("shop")).unwrap();
    engine.register(CommandDescriptor::new("warp"), echo("warp")).unwrap();

    let sender = Arc::new(MemorySender::new("alex"));
    assert!(engine.execute(sender.clone(), "shop", &[]));
    assert!(!engine.execute(sender, "warp", &[]));
    assert!(engine.registry().contains("warp"));
}

#[test]
fn test_invalid_config_is_rejected() {
    let result = CommandEngine::new(
        Arc::new(OpenHost),
        EngineConfig::default().with_worker_threads(0),
    );
    assert!(matches!(result, Err(HeraldError::Config(_))));
}

#[test]
fn test_complete_through_engine() {
    let engine = engine();
    engine.register(CommandDescriptor::new("shop buy"), echo("buy")).unwrap();
    engine.register(CommandDescriptor::new("shop sell"), echo("sell")).unwrap();
    let sender = MemorySender::new("alex");

    assert_eq!(engine.complete(&sender, "shop", &args(&[""])), vec!["buy", "sell"]);
    assert_eq!(engine.complete(&sender, "shop", &args(&["b"])), vec!["buy"]);
    assert!(engine.completion_cache().len() >= 1);
}

#[test]
fn test_shutdown_rejects_invocations() {
    let engine = engine();
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    engine
        .register(
            CommandDescriptor::new("spawn"),
            HandlerBinding::callback(move |_sender, _args| {
                counter.fetch_add(1, Ordering::SeqCst);
                Ok(())
            }),
        )
        .unwrap();
    let sender = Arc::new(MemorySender::new("alex"));

    engine.shutdown();
    assert!(!engine.is_running());

    assert_eq!(
        engine.handle(sender.clone(), "spawn", &[]),
        DispatchOutcome::Rejected
    );
    assert_eq!(
        engine.handle(sender.clone(), "unknown", &[]),
        DispatchOutcome::Rejected
    );
    assert_eq!(calls.load(Ordering::SeqCst), 0);
    assert_eq!(sender.message_count(), 2);
    assert_eq!(engine.in_flight(), 0);
}

#[test]
fn test_async_command_can_wait_on_nested_async_command() {
    let engine = Arc::new(
        CommandEngine::new(
            Arc::new(OpenHost),
            EngineConfig::default().with_worker_threads(4),
        )
        .unwrap(),
    );

    let (inner_tx, inner_rx) = mpsc::channel::<()>();
    let inner_tx = Mutex::new(inner_tx);
    engine
        .register(
            CommandDescriptor::new("inner").asynchronous(),
            HandlerBinding::callback(move |_sender, _args| {
                let _ = inner_tx.lock().send(());
                Ok(())
            }),
        )
        .unwrap();

    let (done_tx, done_rx) = mpsc::channel::<bool>();
    let done_tx = Mutex::new(done_tx);
    let inner_rx = Mutex::new(inner_rx);
    let weak = Arc::downgrade(&engine);
    engine
        .register(
            CommandDescriptor::new("outer").asynchronous(),
            HandlerBinding::callback(move |_sender, _args| {
                let ran = {
                    let engine = weak
                        .upgrade()
                        .ok_or_else(|| anyhow::anyhow!("engine dropped"))?;
                    let outcome =
                        engine.handle(Arc::new(MemorySender::new("relay")), "inner", &[]);
                    outcome == DispatchOutcome::Submitted
                        && inner_rx
                            .lock()
                            .recv_timeout(Duration::from_secs(2))
                            .is_ok()
                };
                let _ = done_tx.lock().send(ran);
                Ok(())
            }),
        )
        .unwrap();

    assert_eq!(
        engine.handle(Arc::new(MemorySender::new("alex")), "outer", &[]),
        DispatchOutcome::Submitted
    );
    assert_eq!(done_rx.recv_timeout(Duration::from_secs(5)), Ok(true));
}
