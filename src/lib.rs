#![no_std]

pub mod bounds;
pub mod color;
pub mod command;
pub mod config;
pub mod controller;
pub mod driver;
pub mod engine;
pub mod filter;
pub mod line;
pub mod math8;
pub mod registry;
pub mod scheduler;
pub mod storage;
pub mod transition;

pub use bounds::SegmentLayout;
pub use color::{Hsi, Pixel, Rgb, Rgbw};
pub use command::{Command, CommandError};
pub use controller::Controller;
pub use driver::SmartLedsOutput;
pub use engine::{EngineConfig, FadeEngine};
pub use line::LineBuffer;
pub use registry::{RegistryError, Screen, ScreenName, ScreenRegistry};
pub use scheduler::TickScheduler;
pub use storage::{ConfigStore, FlashConfigStore, StorageError, StoredConfig};
pub use transition::ColorTransition;

pub use embassy_time::{Duration, Instant};

/// Controller for the stock RGBW indicator board
pub type IndicatorController<S> =
    Controller<Rgbw, S, { config::PIXEL_COUNT }, { config::SEGMENT_COUNT }, { config::SCREEN_COUNT }>;

/// Config record store sized for the stock board
///
/// Place it at [`config::CONFIG_PARTITION_OFFSET`].
pub type IndicatorStore<F> = FlashConfigStore<F, { config::CONFIG_STORAGE_SIZE }>;

/// Abstract LED driver trait
///
/// Implement this trait to support different hardware platforms.
/// The controller is generic over this trait.
pub trait OutputDriver<P: Pixel = Rgbw> {
    /// Write colors to the LED strip
    fn write(&mut self, colors: &[P]);
}
