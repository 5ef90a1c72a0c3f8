//! Given steps for engine comparison BDD scenarios.

use super::world::ComparisonWorld;
use honyaku::translation::{adapters::ScriptedReply, ports::BackendError};
use rstest_bdd_macros::given;
use std::time::Duration;

#[given(
    r#"a catalogue with "{first}" serving "{first_model}" and "{second}" serving "{second_model}""#
)]
fn a_catalogue(
    world: &mut ComparisonWorld,
    first: String,
    first_model: String,
    second: String,
    second_model: String,
) -> Result<(), eyre::Report> {
    world.load_catalogue([(first, first_model), (second, second_model)])
}

#[given(r#"the hosted model "{model}" replies "{text}""#)]
fn hosted_model_replies(
    world: &mut ComparisonWorld,
    model: String,
    text: String,
) -> Result<(), eyre::Report> {
    world
        .hosted
        .script(model, [ScriptedReply::text(text)])
        .map_err(|err| eyre::eyre!("script rejected: {err}"))
}

#[given(r#"the hosted model "{model}" replies "{text}" after {millis:u64} milliseconds"#)]
fn hosted_model_replies_slowly(
    world: &mut ComparisonWorld,
    model: String,
    text: String,
    millis: u64,
) -> Result<(), eyre::Report> {
    world
        .hosted
        .script(
            model,
            [ScriptedReply::text(text).after(Duration::from_millis(millis))],
        )
        .map_err(|err| eyre::eyre!("script rejected: {err}"))
}

#[given(r#"the local model "{model}" replies "{text}""#)]
fn local_model_replies(
    world: &mut ComparisonWorld,
    model: String,
    text: String,
) -> Result<(), eyre::Report> {
    world
        .local
        .script(model, [ScriptedReply::text(text)])
        .map_err(|err| eyre::eyre!("script rejected: {err}"))
}

#[given("the local server is unreachable")]
fn local_server_unreachable(world: &mut ComparisonWorld) -> Result<(), eyre::Report> {
    let app = world.app()?;
    let models: Vec<String> = app
        .engines()
        .iter()
        .filter(|engine| engine.name().namespace() == "Ollama")
        .map(|engine| engine.model_id().as_str().to_owned())
        .collect();
    for model in models {
        let unreachable = BackendError::ServerUnreachable {
            endpoint: "http://127.0.0.1:11434".to_owned(),
            reason: "connection refused".to_owned(),
        };
        world
            .local
            .script(model, [ScriptedReply::error(unreachable)])
            .map_err(|err| eyre::eyre!("script rejected: {err}"))?;
    }
    Ok(())
}

#[given("the hosted API rejects the credential")]
fn hosted_rejects_credential(world: &mut ComparisonWorld) -> Result<(), eyre::Report> {
    let models: Vec<String> = world
        .app()?
        .engines()
        .iter()
        .filter(|engine| engine.name().namespace() == "OpenAI")
        .map(|engine| engine.model_id().as_str().to_owned())
        .collect();
    for model in models {
        let rejected = BackendError::Auth("401 Unauthorized: invalid api key".to_owned());
        world
            .hosted
            .script(model, [ScriptedReply::error(rejected)])
            .map_err(|err| eyre::eyre!("script rejected: {err}"))?;
    }
    Ok(())
}
