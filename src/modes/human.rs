use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{Stderr, stderr};
use std::time::Duration;
use tokio::time::{MissedTickBehavior, interval};
use tracing::{debug, info, warn};

use crate::game::GameEngine;
use crate::input::{InputHandler, KeyAction};
use crate::render::Renderer;
use crate::session::GameController;
use crate::storage::HighScoreStore;

/// Render at ~30 FPS, independent of the game tick
const FRAME_INTERVAL: Duration = Duration::from_millis(33);

/// Raw mode and the alternate screen, restored when dropped
///
/// Dropping the guard also covers early returns and panics inside the loop.
struct TerminalGuard {
    terminal: Terminal<CrosstermBackend<Stderr>>,
}

impl TerminalGuard {
    fn acquire() -> Result<Self> {
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;
        Ok(Self { terminal })
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        if let Err(err) = disable_raw_mode() {
            warn!("Failed to disable raw mode: {err}");
        }
        if let Err(err) = execute!(self.terminal.backend_mut(), LeaveAlternateScreen) {
            warn!("Failed to leave alternate screen: {err}");
        }
        if let Err(err) = self.terminal.show_cursor() {
            warn!("Failed to show cursor: {err}");
        }
    }
}

/// Keyboard play in the terminal
pub struct HumanMode {
    controller: GameController,
    tick_interval: Duration,
    renderer: Renderer,
    input_handler: InputHandler,
    should_quit: bool,
}

impl HumanMode {
    pub fn new(engine: GameEngine, store: Box<dyn HighScoreStore>) -> Self {
        let tick_interval = Duration::from_millis(engine.config().tick_interval_ms);

        Self {
            controller: GameController::new(engine, store),
            tick_interval,
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            should_quit: false,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        let mut guard = TerminalGuard::acquire()?;
        info!(tick_ms = self.tick_interval.as_millis() as u64, "game started");

        let result = self.run_game_loop(&mut guard.terminal).await;

        drop(guard);
        info!(high_score = self.controller.session().high_score, "game closed");
        result
    }

    /// The key stream and the tick timer live and die together in this scope
    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();

        let mut tick_timer = interval(self.tick_interval);
        tick_timer.set_missed_tick_behavior(MissedTickBehavior::Delay);

        let mut render_timer = interval(FRAME_INTERVAL);

        loop {
            tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    match maybe_event {
                        Some(Ok(event)) => self.handle_event(event),
                        Some(Err(err)) => {
                            return Err(err).context("Failed to read terminal event");
                        }
                        None => self.should_quit = true,
                    }
                }

                // Game logic tick
                _ = tick_timer.tick() => {
                    self.controller.tick();
                }

                // Render frame
                _ = render_timer.tick() => {
                    let snapshot = self.controller.snapshot();
                    terminal.draw(|frame| {
                        self.renderer.render(frame, &snapshot);
                    }).context("Failed to draw frame")?;
                }

                // Handle Ctrl+C
                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    fn handle_event(&mut self, event: Event) {
        let Event::Key(key) = event else {
            return;
        };
        // Only process key press events, not release
        if key.kind != KeyEventKind::Press {
            return;
        }

        match self.input_handler.handle_key_event(key) {
            KeyAction::Steer(key) => {
                // Raw mode already keeps arrows from scrolling or echoing
                let consumed = self.controller.handle_key(key);
                debug!(?key, consumed, "steering key");
            }
            KeyAction::Restart => {
                // The restart control only exists on the game over dialog
                if self.controller.is_game_over() {
                    self.controller.restart();
                }
            }
            KeyAction::Quit => {
                self.should_quit = true;
            }
            KeyAction::None => {}
        }
    }
}
