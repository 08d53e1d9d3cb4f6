//! Application state and the cooperative control loop
//!
//! The [`Controller`] owns everything that lives for the device uptime:
//! the screen registry, the fade engine, the config store, the tick
//! scheduler and the serial line buffer. The firmware main loop calls
//! [`Controller::feed`] with received bytes and [`Controller::service`]
//! with the current time; both run to completion, so commands and ticks
//! never interleave.

use core::fmt::{self, Write};

use embassy_time::{Duration, Instant};
use log::{debug, info, warn};

use crate::OutputDriver;
use crate::color::{Hsi, Pixel};
use crate::command::{Command, CommandError};
use crate::config::{DEFAULT_COLOR, LINE_CAPACITY};
use crate::engine::{EngineConfig, FadeEngine};
use crate::filter::apply_brightness;
use crate::line::LineBuffer;
use crate::registry::ScreenRegistry;
use crate::scheduler::TickScheduler;
use crate::storage::{ConfigStore, StoredConfig};

/// Successful command outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Reply {
    Done,
    ScreenList,
    Config,
}

/// Indicator application state
///
/// `LEDS` is the strip length, `SEGMENTS` the indicator count and `SCREENS`
/// the registry capacity.
pub struct Controller<
    P: Pixel,
    S: ConfigStore<SCREENS>,
    const LEDS: usize,
    const SEGMENTS: usize,
    const SCREENS: usize,
> {
    registry: ScreenRegistry<SCREENS>,
    engine: FadeEngine<P, LEDS, SEGMENTS>,
    store: S,
    scheduler: TickScheduler,
    lines: LineBuffer<LINE_CAPACITY>,
    output: [P; LEDS],
}

impl<P, S, const LEDS: usize, const SEGMENTS: usize, const SCREENS: usize>
    Controller<P, S, LEDS, SEGMENTS, SCREENS>
where
    P: Pixel,
    S: ConfigStore<SCREENS>,
{
    /// Create the controller and restore the stored configuration
    ///
    /// A missing or unreadable record starts with an empty screen table and
    /// the color from `config`. The stored color is shown immediately,
    /// without a fade.
    pub fn new(mut store: S, config: &EngineConfig, tick_interval: Duration, now: Instant) -> Self {
        let stored = match store.load() {
            Ok(Some(stored)) => Some(stored),
            Ok(None) => None,
            Err(error) => {
                warn!("controller: failed to load configuration: {}", error);
                None
            }
        };

        let mut config = *config;
        let registry = match &stored {
            Some(stored) => {
                config.color = stored.color();
                stored.registry()
            }
            None => ScreenRegistry::new(),
        };
        info!(
            "controller: {} screens, color h={} s={} i={}",
            registry.len(),
            config.color.hue,
            config.color.saturation,
            config.color.intensity
        );

        Self {
            registry,
            engine: FadeEngine::new(&config),
            store,
            scheduler: TickScheduler::new(tick_interval, now),
            lines: LineBuffer::new(),
            output: [P::default(); LEDS],
        }
    }

    pub const fn registry(&self) -> &ScreenRegistry<SCREENS> {
        &self.registry
    }

    pub const fn engine(&self) -> &FadeEngine<P, LEDS, SEGMENTS> {
        &self.engine
    }

    pub const fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// Feed received serial bytes, dispatching every completed line
    ///
    /// Responses are written to `out`. A failing writer does not stop
    /// command processing; the first write error is returned at the end.
    pub fn feed<W: Write>(&mut self, bytes: &[u8], out: &mut W) -> fmt::Result {
        let mut result = Ok(());
        for &byte in bytes {
            if let Some(line) = self.lines.push(byte) {
                let written = self.handle_line(&line, out);
                if result.is_ok() {
                    result = written;
                }
            }
        }
        result
    }

    /// Execute one command line and write the response
    ///
    /// Every command ends with `OK` or `ERROR: <reason>`.
    pub fn handle_line<W: Write>(&mut self, line: &str, out: &mut W) -> fmt::Result {
        debug!("controller: command {:?}", line);
        let reply = Command::parse(line).and_then(|command| self.execute(command));

        match reply {
            Ok(Reply::Done) => writeln!(out, "OK"),
            Ok(Reply::ScreenList) => {
                writeln!(out, "OK")?;
                for screen in self.registry.list() {
                    writeln!(out, "SCREEN: {} ({})", screen.name, screen.indicator)?;
                }
                Ok(())
            }
            Ok(Reply::Config) => {
                writeln!(out, "OK")?;
                writeln!(out, "{}", self.stored_config())
            }
            Err(error) => writeln!(out, "ERROR: {}", error),
        }
    }

    /// Advance the engine if a tick is due and push a dirty frame
    ///
    /// Returns `true` if the strip was written.
    pub fn service<D: OutputDriver<P>>(&mut self, now: Instant, driver: &mut D) -> bool {
        let Some(elapsed) = self.scheduler.poll(now) else {
            return false;
        };
        if !self.engine.advance(elapsed) {
            return false;
        }
        self.flush(driver);
        true
    }

    /// Write the current frame with the current intensity applied
    pub fn flush<D: OutputDriver<P>>(&mut self, driver: &mut D) {
        self.output = *self.engine.frame();
        apply_brightness(&mut self.output, self.engine.brightness());
        driver.write(&self.output);
    }

    fn execute(&mut self, command: Command<'_>) -> Result<Reply, CommandError> {
        match command {
            Command::Set { name } => {
                let Some(indicator) = self.registry.resolve(name) else {
                    self.engine.set_active(None);
                    return Err(CommandError::UnknownScreen);
                };
                self.engine.set_active(usize::try_from(indicator).ok());
            }
            Command::List => return Ok(Reply::ScreenList),
            Command::Show => return Ok(Reply::Config),
            Command::Add { name, indicator } => {
                self.registry.add(name, indicator)?;
                self.persist();
            }
            Command::Remove { name } => {
                if self.registry.remove(name) {
                    self.persist();
                }
            }
            Command::Color {
                hue,
                saturation,
                intensity,
            } => {
                self.engine
                    .set_color(Hsi::normalized(hue, saturation, intensity));
                self.persist();
            }
            Command::Reset => {
                self.engine.set_color(DEFAULT_COLOR);
                self.persist();
            }
        }
        Ok(Reply::Done)
    }

    fn snapshot(&self) -> StoredConfig<SCREENS> {
        StoredConfig::capture(&self.registry, self.engine.target_color())
    }

    /// Save the screen table and target color
    ///
    /// Failures are logged; the device keeps running from memory.
    fn persist(&mut self) {
        let snapshot = self.snapshot();
        if let Err(error) = self.store.save(&snapshot) {
            warn!("controller: failed to save configuration: {}", error);
        }
    }

    /// Stored record for `show`, the in-memory state if it cannot be read
    fn stored_config(&mut self) -> StoredConfig<SCREENS> {
        match self.store.load() {
            Ok(Some(stored)) => stored,
            Ok(None) => self.snapshot(),
            Err(error) => {
                warn!("controller: failed to read configuration: {}", error);
                self.snapshot()
            }
        }
    }
}
