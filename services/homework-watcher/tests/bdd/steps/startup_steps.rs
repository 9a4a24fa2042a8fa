//! BDD step definitions for the startup credential check

use std::sync::Arc;

use cucumber::{given, then, when};
use tokio_util::sync::CancellationToken;

use homework_watcher::config::{PRACTICUM_TOKEN_VAR, TELEGRAM_CHAT_ID_VAR, TELEGRAM_TOKEN_VAR};
use homework_watcher::{Config, Credentials, WatcherError};

use crate::world::WatcherWorld;

fn full_environment() -> Vec<(&'static str, &'static str)> {
    vec![
        (PRACTICUM_TOKEN_VAR, "practicum"),
        (TELEGRAM_TOKEN_VAR, "telegram"),
        (TELEGRAM_CHAT_ID_VAR, "100500"),
    ]
}

#[given(expr = "an environment without {word}")]
fn environment_without(world: &mut WatcherWorld, missing: String) {
    let vars: Vec<_> = full_environment()
        .into_iter()
        .filter(|(name, _)| *name != missing)
        .collect();
    world.credentials = Some(Credentials::from_lookup(|name| {
        vars.iter()
            .find(|(var, _)| *var == name)
            .map(|(_, value)| value.to_string())
    }));
}

#[given("an empty environment")]
fn empty_environment(world: &mut WatcherWorld) {
    world.credentials = Some(Credentials::from_lookup(|_| None));
}

#[when("the watcher starts")]
async fn watcher_starts(world: &mut WatcherWorld) {
    let credentials = world.credentials.clone().expect("environment not set");
    let cancel = CancellationToken::new();
    // a successful start would poll forever, so stop right after the first iteration
    cancel.cancel();
    world.startup_result = Some(
        homework_watcher::run_with_client(
            Config::default(),
            credentials,
            0,
            Arc::clone(&world.api) as _,
            cancel,
        )
        .await,
    );
}

#[then(expr = "startup should fail naming {string}")]
fn startup_fails_naming(world: &mut WatcherWorld, names: String) {
    let result = world.startup_result.as_ref().expect("watcher never started");
    match result {
        Err(WatcherError::MissingTokens(missing)) => {
            let expected: Vec<String> = names.split(',').map(|n| n.trim().to_string()).collect();
            assert_eq!(missing, &expected);
        }
        other => panic!("expected MissingTokens, got {other:?}"),
    }
}

#[then("no request should have been made")]
fn no_request(world: &mut WatcherWorld) {
    assert!(world.api.from_dates().is_empty());
}

#[given("an environment with every credential")]
fn environment_complete(world: &mut WatcherWorld) {
    let vars = full_environment();
    world.credentials = Some(Credentials::from_lookup(|name| {
        vars.iter()
            .find(|(var, _)| *var == name)
            .map(|(_, value)| value.to_string())
    }));
}

#[then("startup should succeed")]
fn startup_succeeds(world: &mut WatcherWorld) {
    let result = world.startup_result.as_ref().expect("watcher never started");
    assert!(result.is_ok(), "{result:?}");
}
