use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use log::{debug, info};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{Stderr, stderr};
use std::time::{Duration, Instant};
use tokio::time::{MissedTickBehavior, interval};

use crate::game::{GameConfig, GameSession};
use crate::input::{InputHandler, KeyAction};
use crate::metrics::RunStats;
use crate::render::Renderer;
use crate::sound::{SoundCue, SoundSink};

pub struct HumanMode {
    session: GameSession,
    frame_interval: Duration,
    stats: RunStats,
    renderer: Renderer,
    input_handler: InputHandler,
    sound: Box<dyn SoundSink>,
    should_quit: bool,
}

impl HumanMode {
    pub fn new(config: &GameConfig, seed: Option<u64>, sound: Box<dyn SoundSink>) -> Result<Self> {
        let session = match seed {
            Some(seed) => GameSession::seeded(config, seed),
            None => GameSession::new(config),
        }
        .context("Failed to start game")?;

        Ok(Self {
            session,
            frame_interval: config.frame_interval(),
            stats: RunStats::new(Instant::now()),
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            sound,
            should_quit: false,
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        // Run game loop with cleanup
        let result = self.run_game_loop(&mut terminal).await;

        // Cleanup terminal
        self.cleanup_terminal(&mut terminal)?;

        result
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();

        // The session decides on its own when a frame also carries a tick
        let mut frame_timer = interval(self.frame_interval);
        frame_timer.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    match maybe_event {
                        Some(Ok(event)) => self.handle_event(event),
                        Some(Err(err)) => return Err(err).context("Failed to read terminal event"),
                        None => self.should_quit = true,
                    }
                }

                // Advance and render a frame
                _ = frame_timer.tick() => {
                    let now = Instant::now();
                    self.update_game(now)?;
                    self.stats.tick_clock(now);
                    terminal.draw(|frame| {
                        self.renderer.render(frame, &self.session, &self.stats);
                    }).context("Failed to draw frame")?;
                }

                // Handle Ctrl+C
                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                info!("Quitting");
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
            KeyAction::Turn(direction) => {
                if !self.session.steer(direction) {
                    debug!("Ignored reversing turn to {:?}", direction);
                }
            }
            KeyAction::Restart => self.restart(),
            KeyAction::Quit => self.should_quit = true,
            KeyAction::None => {}
        }
    }

    fn update_game(&mut self, now: Instant) -> Result<()> {
        let outcome = self
            .session
            .advance(now)
            .context("Game state became unplayable")?;

        self.stats.record(&outcome, now);

        if let Some(cue) = SoundCue::for_outcome(&outcome) {
            self.sound.play(cue).context("Failed to play sound")?;
        }

        Ok(())
    }

    fn restart(&mut self) {
        if self.session.is_running() {
            return;
        }
        self.session.resume();
        self.stats.new_round(Instant::now());
    }

    fn cleanup_terminal(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)
            .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}
