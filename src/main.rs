use anyhow::{Context, Result};

use arplace::{demo::DemoState, SessionConfig};

fn main() -> Result<()> {
    pretty_env_logger::init();

    let config = match std::env::args().nth(1) {
        Some(path) => SessionConfig::load(&path)
            .with_context(|| format!("Failed to load session config from {}", path))?,
        None => SessionConfig::default(),
    };

    let mut demo = DemoState::new(config)?;
    demo.run();

    log::info!(
        "Session ended with {} placed objects and {} tracked planes",
        demo.session.registry().len(),
        demo.session.anchor_count()
    );

    Ok(())
}
