//! A [`BusOpener`] for Linux spidev character devices.
//!
//! ```no_run
//! use nrf24_hal::{linux::SpidevOpener, BusSelector, Nrf24Hal};
//!
//! let mut hal = Nrf24Hal::new();
//! hal.open_with(&mut SpidevOpener::default(), BusSelector::new(0, 0))
//!     .expect("/dev/spidev0.0 is not available");
//! hal.set_rf_channel(76).unwrap();
//! ```

use std::format;

pub use linux_embedded_hal::spidev::SpiModeFlags;
use linux_embedded_hal::{spidev::SpidevOptions, SPIError, SpidevDevice};

use crate::hal::{BusOpener, BusSelector};

/// Settings applied to every spidev device that is opened.
#[derive(Clone, Copy, Debug)]
pub struct SpidevConfig {
    pub max_speed_hz: u32,
    pub mode: SpiModeFlags,
}

impl Default for SpidevConfig {
    /// 10 MHz in SPI mode 0.
    fn default() -> Self {
        Self {
            max_speed_hz: 10_000_000,
            mode: SpiModeFlags::SPI_MODE_0,
        }
    }
}

/// Opens `/dev/spidev{bus}.{chip_select}`.
#[derive(Clone, Copy, Debug, Default)]
pub struct SpidevOpener {
    pub config: SpidevConfig,
}

impl SpidevOpener {
    pub fn new(config: SpidevConfig) -> Self {
        Self { config }
    }
}

impl BusOpener for SpidevOpener {
    type Device = SpidevDevice;
    type Error = SPIError;

    fn open(&mut self, selector: BusSelector) -> Result<SpidevDevice, SPIError> {
        let mut spi = SpidevDevice::open(format!(
            "/dev/spidev{}.{}",
            selector.bus, selector.chip_select
        ))?;
        let options = SpidevOptions::new()
            .max_speed_hz(self.config.max_speed_hz)
            .mode(self.config.mode)
            .bits_per_word(8)
            .build();
        spi.configure(&options).map_err(SPIError::from)?;
        Ok(spi)
    }
}
