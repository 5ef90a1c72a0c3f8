//! Then steps for engine comparison BDD scenarios.

use super::world::{ComparisonWorld, split_names};
use rstest_bdd_macros::then;

#[then(r#"the result for "{engine}" is "{text}""#)]
fn result_is_text(world: &ComparisonWorld, engine: String, text: String) -> Result<(), eyre::Report> {
    let result = world.result_for(&engine)?;
    match result.translated_text() {
        Some(actual) if actual == text => Ok(()),
        Some(actual) => Err(eyre::eyre!("expected '{text}' from {engine}, got '{actual}'")),
        None => Err(eyre::eyre!(
            "expected '{text}' from {engine}, got failure {:?}",
            result.failure_details()
        )),
    }
}

#[then(r#"the result for "{engine}" fails with "{kind}""#)]
fn result_fails_with(world: &ComparisonWorld, engine: String, kind: String) -> Result<(), eyre::Report> {
    let failure = world
        .result_for(&engine)?
        .failure_details()
        .ok_or_else(|| eyre::eyre!("expected {engine} to fail"))?;
    if failure.kind().as_str() != kind {
        return Err(eyre::eyre!(
            "expected {engine} to fail with {kind}, got {}",
            failure.kind()
        ));
    }
    Ok(())
}

#[then(r#"the failure for "{engine}" mentions "{needle}""#)]
fn failure_mentions(world: &ComparisonWorld, engine: String, needle: String) -> Result<(), eyre::Report> {
    let failure = world
        .result_for(&engine)?
        .failure_details()
        .ok_or_else(|| eyre::eyre!("expected {engine} to fail"))?;
    if !failure.message().contains(&needle) {
        return Err(eyre::eyre!(
            "failure message '{}' does not mention '{needle}'",
            failure.message()
        ));
    }
    Ok(())
}

#[then(r#"the results are listed as "{engines}""#)]
fn results_listed_in_order(world: &ComparisonWorld, engines: String) -> Result<(), eyre::Report> {
    let actual: Vec<&str> = world.results.iter().map(|result| result.engine()).collect();
    let expected = split_names(&engines);
    if actual != expected {
        return Err(eyre::eyre!("expected order {expected:?}, got {actual:?}"));
    }
    Ok(())
}

#[then("{count:usize} engines succeeded")]
fn engines_succeeded(world: &ComparisonWorld, count: usize) -> Result<(), eyre::Report> {
    let succeeded = world.results.iter().filter(|result| result.is_success()).count();
    if succeeded != count {
        return Err(eyre::eyre!("expected {count} successes, got {succeeded}"));
    }
    Ok(())
}

#[then("no backend was called")]
fn no_backend_called(world: &ComparisonWorld) -> Result<(), eyre::Report> {
    let calls = world.hosted.call_count() + world.local.call_count();
    if calls != 0 {
        return Err(eyre::eyre!("expected no backend calls, got {calls}"));
    }
    Ok(())
}
