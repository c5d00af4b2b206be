use clap::Parser;

use duet::dialogue::Participant;
use duet::{Credentials, DialogueOrchestrator, ProviderAdapter, TranscriptWriter};

use crate::args::CliArgs;
use crate::config::load_config;
use crate::logging::init_logging;

pub async fn run() -> anyhow::Result<()> {
    let args = CliArgs::parse();
    let loaded = load_config(args.config.clone())?;
    let mut config = loaded.config;
    config.apply_env(|name| std::env::var(name).ok())?;
    config.apply_args(&args);

    let _logger = init_logging(&config.logging, &loaded.paths)?;
    if loaded.config_exists {
        log::info!("loaded config from {}", loaded.paths.config_file.display());
    } else {
        log::info!("no config file, using built-in agents");
    }

    let settings = config.run_settings()?;
    let profiles = config.agent_profiles();
    let credentials = Credentials::resolve(
        profiles.iter().filter_map(|p| p.api_key_env.as_deref()),
        |name| std::env::var(name).ok(),
    );

    let participants = profiles
        .into_iter()
        .map(|profile| {
            let adapter = ProviderAdapter::new(&profile, &credentials);
            Participant::new(profile, adapter)
        })
        .collect();
    let mut dialogue = DialogueOrchestrator::new(participants, settings)?;

    let outcome = dialogue.run().await;

    let writer = TranscriptWriter::new(&config.transcript.path);
    writer.export(
        dialogue.turns(),
        &config.transcript.title,
        config.transcript.subtitle.as_deref(),
    )?;

    println!(
        "\n{} after {} turns. Transcript: {}",
        outcome.state,
        outcome.turns,
        writer.path().display()
    );
    Ok(())
}
