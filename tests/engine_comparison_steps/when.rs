//! When steps for engine comparison BDD scenarios.

use super::world::{ComparisonWorld, run_async, split_names};
use honyaku::translation::domain::TranslationRequest;
use rstest_bdd_macros::when;

#[when(r#""{text}" is translated into "{language}" with "{engine}""#)]
fn translate_with_one_engine(
    world: &mut ComparisonWorld,
    text: String,
    language: String,
    engine: String,
) -> Result<(), eyre::Report> {
    let request = TranslationRequest::from_input(text, &language)
        .map_err(|err| eyre::eyre!("invalid request: {err}"))?;
    let result = run_async(world.app()?.translate(&engine, &request));
    world.results = vec![result];
    Ok(())
}

#[when(r#""{text}" is compared into "{language}" with "{engines}""#)]
fn compare_engines(
    world: &mut ComparisonWorld,
    text: String,
    language: String,
    engines: String,
) -> Result<(), eyre::Report> {
    let request = TranslationRequest::from_input(text, &language)
        .map_err(|err| eyre::eyre!("invalid request: {err}"))?;
    let comparison = run_async(world.app()?.compare(split_names(&engines), &request));
    world.record_comparison(comparison);
    Ok(())
}
