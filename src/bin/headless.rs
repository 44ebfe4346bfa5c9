//! Headless runner.
//!
//! Plays a command script against a seeded engine and prints the final
//! snapshot as JSON:
//!
//! ```text
//! BLOCKFALL_SEED=7 blockfall-headless left left rotate hardDrop tick:800
//! ```

use std::io::Write;

use anyhow::Result;

use blockfall::core::{GameConfig, GameState};
use blockfall::logging;
use blockfall::script::{parse_script, play};

fn main() -> Result<()> {
    logging::init_stderr();

    let config = GameConfig::from_env()?;
    let steps = parse_script(std::env::args().skip(1))?;
    tracing::debug!(seed = config.seed, steps = steps.len(), "running script");

    let mut state = GameState::new(&config);
    state.start(0);
    let end_ms = play(&mut state, &steps, 0, config.tick_ms);

    let snapshot = state.snapshot();
    tracing::info!(
        end_ms,
        score = snapshot.score,
        lifecycle = snapshot.lifecycle.as_str(),
        "script finished"
    );

    let mut stdout = std::io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, &snapshot)?;
    writeln!(stdout)?;
    Ok(())
}
