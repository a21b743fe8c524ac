use core::fmt::{Display, Formatter};

use embedded_hal::spi::{Error as _, ErrorKind, SpiDevice};

pub(crate) mod bit_fields;
mod config;
mod constants;
mod fifo;
mod irq;
mod multibyte;
mod payload;
mod pipe;
mod retransmit;
mod rf;
mod session;
pub use constants::{commands, mnemonics, registers, Register, RegisterWidth};
pub use multibyte::{MultiByteRead, MultiByteRegister};
pub use session::{BusOpener, BusSelector};

use crate::StatusFlags;

/// Why a register operation failed.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Nrf24HalError<SPI> {
    /// The SPI transaction failed (a communication fault).
    ///
    /// The fault is also kept in [`Nrf24Hal::last_fault()`].
    Spi(SPI),
    /// The session is closed; no bus channel is held.
    ///
    /// Call [`Nrf24Hal::open()`] (or [`Nrf24Hal::open_with()`]) first.
    NotOpen,
}

impl<SPI> Display for Nrf24HalError<SPI> {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            Nrf24HalError::Spi(_) => write!(f, "SPI communication fault"),
            Nrf24HalError::NotOpen => write!(f, "no open session"),
        }
    }
}

#[cfg(feature = "std")]
impl<SPI: core::fmt::Debug> std::error::Error for Nrf24HalError<SPI> {}

#[cfg(feature = "defmt")]
impl<SPI> defmt::Format for Nrf24HalError<SPI> {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Nrf24HalError::Spi(_) => defmt::write!(fmt, "SPI communication fault"),
            Nrf24HalError::NotOpen => defmt::write!(fmt, "no open session"),
        }
    }
}

/// A register-level session with one nRF24L01 over SPI.
///
/// A session is either closed (no bus channel) or open (owning an [`SpiDevice`]).
/// Every register operation needs an open session and returns
/// [`Nrf24HalError::NotOpen`] otherwise.
///
/// The radio's CSN pin (aka Chip Select pin) shall be defined
/// when instantiating the [`SpiDevice`](trait@embedded_hal::spi::SpiDevice)
/// object.
pub struct Nrf24Hal<SPI> {
    spi: Option<SPI>,
    buf: [u8; mnemonics::MAX_PAYLOAD + 1],
    last_fault: Option<ErrorKind>,
}

impl<SPI> Default for Nrf24Hal<SPI> {
    fn default() -> Self {
        Self::new()
    }
}

impl<SPI> Nrf24Hal<SPI> {
    /// Create a closed session.
    pub const fn new() -> Self {
        Nrf24Hal {
            spi: None,
            buf: [0u8; mnemonics::MAX_PAYLOAD + 1],
            last_fault: None,
        }
    }
}

impl<SPI> Nrf24Hal<SPI>
where
    SPI: SpiDevice,
{
    /// Fail with [`Nrf24HalError::NotOpen`] unless a bus channel is held.
    pub(crate) fn ensure_open(&self) -> Result<(), Nrf24HalError<SPI::Error>> {
        match self.spi {
            Some(_) => Ok(()),
            None => Err(Nrf24HalError::NotOpen),
        }
    }

    /// Run one full-duplex transaction over the first `len` bytes of the internal buffer.
    ///
    /// The outcome is recorded in the last-fault slot either way.
    fn spi_transfer(&mut self, len: usize) -> Result<(), Nrf24HalError<SPI::Error>> {
        let spi = self.spi.as_mut().ok_or(Nrf24HalError::NotOpen)?;
        match spi.transfer_in_place(&mut self.buf[..len]) {
            Ok(()) => {
                self.last_fault = None;
                #[cfg(feature = "defmt")]
                defmt::trace!("spi {=[u8]:x}", &self.buf[..len]);
                Ok(())
            }
            Err(e) => {
                let kind = e.kind();
                self.last_fault = Some(kind);
                #[cfg(feature = "defmt")]
                defmt::warn!(
                    "spi transaction {=u8:x} failed: {}",
                    self.buf[0],
                    defmt::Debug2Format(&kind)
                );
                Err(Nrf24HalError::Spi(e))
            }
        }
    }

    /// Transmit `[command, 0]` and return the second byte received.
    fn spi_read_byte(&mut self, command: u8) -> Result<u8, Nrf24HalError<SPI::Error>> {
        self.buf[0] = command;
        self.buf[1] = 0;
        self.spi_transfer(2)?;
        Ok(self.buf[1])
    }

    /// Transmit `[command, ...payload]` and return the STATUS byte
    /// received while the command was shifted out.
    fn spi_command(
        &mut self,
        command: u8,
        payload: &[u8],
    ) -> Result<u8, Nrf24HalError<SPI::Error>> {
        let len = payload.len().min(mnemonics::MAX_PAYLOAD);
        self.buf[0] = command;
        self.buf[1..(len + 1)].copy_from_slice(&payload[..len]);
        self.spi_transfer(len + 1)?;
        Ok(self.buf[0])
    }

    /// Read one register; the STATUS byte shifted out alongside is discarded.
    pub(crate) fn read_reg(&mut self, reg: Register) -> Result<u8, Nrf24HalError<SPI::Error>> {
        self.spi_read_byte(commands::R_REGISTER | reg.address())
    }

    /// Write one register and return the STATUS register as it was when the write began.
    pub(crate) fn write_reg(
        &mut self,
        reg: Register,
        value: u8,
    ) -> Result<u8, Nrf24HalError<SPI::Error>> {
        self.spi_command(commands::W_REGISTER | reg.address(), &[value])
    }

    /// Read-modify-write of one register.
    ///
    /// Nothing is written back if the read fails.
    pub(crate) fn modify_reg<F>(
        &mut self,
        reg: Register,
        f: F,
    ) -> Result<(), Nrf24HalError<SPI::Error>>
    where
        F: FnOnce(u8) -> u8,
    {
        let value = self.read_reg(reg)?;
        self.write_reg(reg, f(value))?;
        Ok(())
    }

    /// Send the NOP command and return the STATUS register.
    pub fn nop(&mut self) -> Result<StatusFlags, Nrf24HalError<SPI::Error>> {
        self.spi_command(commands::NOP, &[]).map(StatusFlags::from_bits)
    }

    /// Discard all 3 layers in the radio's RX FIFO.
    pub fn flush_rx(&mut self) -> Result<(), Nrf24HalError<SPI::Error>> {
        self.spi_command(commands::FLUSH_RX, &[])?;
        Ok(())
    }

    /// Discard all 3 layers in the radio's TX FIFO.
    pub fn flush_tx(&mut self) -> Result<(), Nrf24HalError<SPI::Error>> {
        self.spi_command(commands::FLUSH_TX, &[])?;
        Ok(())
    }

    /// Keep transmitting the last payload for as long as CE is held high.
    ///
    /// The reuse lasts until the TX FIFO is flushed or a new payload is written.
    pub fn reuse_tx(&mut self) -> Result<(), Nrf24HalError<SPI::Error>> {
        self.spi_command(commands::REUSE_TX_PL, &[])?;
        Ok(())
    }
}
