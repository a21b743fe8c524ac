use embedded_hal::spi::{ErrorKind, SpiDevice};

use super::Nrf24Hal;

/// Identifies a bus channel: the SPI bus number and the chip select line on that bus.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BusSelector {
    pub bus: u8,
    pub chip_select: u8,
}

impl BusSelector {
    pub const fn new(bus: u8, chip_select: u8) -> Self {
        Self { bus, chip_select }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for BusSelector {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(fmt, "spi{}.{}", self.bus, self.chip_select)
    }
}

/// Something that can acquire an SPI channel for a [`BusSelector`].
///
/// Releasing the channel is done by dropping the returned device.
pub trait BusOpener {
    type Device: SpiDevice;
    type Error;

    fn open(&mut self, selector: BusSelector) -> Result<Self::Device, Self::Error>;
}

impl<SPI> Nrf24Hal<SPI>
where
    SPI: SpiDevice,
{
    /// Open the session on an already acquired SPI device.
    ///
    /// Any previously held device is closed first and handed back.
    /// The last fault is reset.
    pub fn open(&mut self, spi: SPI) -> Option<SPI> {
        let previous = self.close();
        self.last_fault = None;
        self.spi = Some(spi);
        #[cfg(feature = "defmt")]
        defmt::debug!("nRF24 session opened");
        previous
    }

    /// Close any current session, then acquire a new channel from `opener`.
    ///
    /// On failure the session stays closed.
    pub fn open_with<B>(&mut self, opener: &mut B, selector: BusSelector) -> Result<(), B::Error>
    where
        B: BusOpener<Device = SPI>,
    {
        self.close();
        self.last_fault = None;
        let spi = opener.open(selector)?;
        self.spi = Some(spi);
        #[cfg(feature = "defmt")]
        defmt::debug!("nRF24 session opened on {}", selector);
        Ok(())
    }

    /// Release the bus channel, returning it to the caller.
    ///
    /// Closing an already closed session does nothing.
    pub fn close(&mut self) -> Option<SPI> {
        let spi = self.spi.take();
        #[cfg(feature = "defmt")]
        if spi.is_some() {
            defmt::debug!("nRF24 session closed");
        }
        spi
    }

    pub fn is_open(&self) -> bool {
        self.spi.is_some()
    }

    /// The fault reported by the most recent SPI transaction, if it failed.
    ///
    /// This is reset when a session is opened.
    pub fn last_fault(&self) -> Option<ErrorKind> {
        self.last_fault
    }
}
