mod animation;
mod clock;
mod config;
mod damper;
mod error;
mod graphics;
mod input;
mod math;
mod scroll;
mod sections;
mod shapes;
mod showcase;
mod state;
mod terminal;
mod vertex;

use std::fs::File;
use std::time::Instant;

use clap::Parser;
use crossterm::event;

use crate::config::Config;
use crate::error::ShowcaseError;
use crate::showcase::{Flow, Showcase};
use crate::terminal::TerminalSession;

/// Sends logs to the configured file; without one logging stays off so it
/// cannot tear the rendered frame
fn init_logging(config: &Config) -> Result<(), ShowcaseError> {
    let Some(path) = &config.log_file else {
        return Ok(());
    };
    let file = File::create(path).map_err(|source| ShowcaseError::LogFile {
        path: path.clone(),
        source,
    })?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

/// Polls input until the next frame is due, then ticks and presents it
fn event_loop(showcase: &mut Showcase, session: &mut TerminalSession) -> Result<(), ShowcaseError> {
    showcase.start(Instant::now());
    while showcase.is_running() {
        let timeout = showcase.time_until_next_frame(Instant::now());
        if event::poll(timeout)? {
            let event = event::read()?;
            if showcase.handle_event(&event, Instant::now()) == Flow::Quit {
                break;
            }
        }

        let now = Instant::now();
        if showcase.take_frame(now) {
            showcase.tick(now);
            let frame = showcase.compose(now);
            session.present(&frame)?;
        }
    }
    Ok(())
}

/// Main function
pub fn main() -> Result<(), ShowcaseError> {
    let config = Config::parse();
    config.validate()?;
    init_logging(&config)?;
    log::info!(
        "starting {} {} ({} fps, damping {}, {} rows per wheel notch)",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION"),
        config.fps,
        config.damping,
        config.wheel_rows
    );

    let mut session = TerminalSession::open()?;
    let mut showcase = Showcase::new(&config, terminal::viewport()?);
    let result = event_loop(&mut showcase, &mut session);

    // Frames stop and input is released in the same teardown step
    showcase.stop();
    let scroll = showcase.scroll_state();
    log::info!(
        "exiting in section {} at progress {:.3}",
        scroll.active_section,
        scroll.progress
    );
    let closed = session.close();
    result?;
    closed?;
    Ok(())
}
