//! asyncapi-tmctl
//!
//! Reads an AsyncAPI document, derives the tmctl commands that recreate its
//! subscribable channels as TriggerMesh sources, and writes them as a script.

use tracing::info;

use asyncapi_tmctl::{
    adapters::script,
    asyncapi::Document,
    config::Config,
    telemetry,
    translator::Translator,
};

fn main() -> anyhow::Result<()> {
    let config = Config::load()?;
    telemetry::init_tracing(&config.logging);

    let settings = &config.translate;
    info!("Reading AsyncAPI document {}", settings.asyncapi_file.display());
    let document = Document::from_path(&settings.asyncapi_file)?;

    let translator = Translator::new(settings.translator_options());
    let commands = translator.translate(&document)?;

    script::write_script(&commands, &settings.script_file)?;
    info!(
        "Wrote {} tmctl commands to {}",
        commands.len(),
        settings.script_file.display()
    );

    Ok(())
}
