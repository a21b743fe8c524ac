//! Transfers whose length is not known until the radio is asked.
//!
//! Reading an address needs the configured address width first, and reading a
//! payload needs the pipe it came from and its width first. Those auxiliary reads
//! are the only place where a communication fault is absorbed: if one fails, the
//! dependent transfer is skipped and a zero-length result is returned, leaving the
//! caller's buffer exactly as it was. The fault itself stays visible through
//! [`Nrf24Hal::last_fault()`].

use embedded_hal::spi::SpiDevice;

use super::{commands, mnemonics, Nrf24Hal, Nrf24HalError, Register, RegisterWidth};
use crate::{Pipe, StatusFlags};

/// A register whose transfer length is resolved at run time.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MultiByteRegister {
    /// The address of [`Pipe::Tx`], [`Pipe::Pipe0`] or [`Pipe::Pipe1`].
    ///
    /// Any other pipe is not a multi-byte register and reads nothing.
    Address(Pipe),
    /// The payload at the head of the RX FIFO.
    RxPayload,
}

/// The outcome of a multi-byte read.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MultiByteRead {
    /// For payloads, the pipe the payload arrived on (0-5), or
    /// [`StatusFlags::RX_EMPTY`] when nothing was pending.
    /// For addresses, the [`Pipe::id()`] of the address that was read.
    pub source: u8,
    /// Number of bytes written into the caller's buffer.
    pub len: u8,
}

impl MultiByteRead {
    pub const fn empty(source: u8) -> Self {
        Self { source, len: 0 }
    }

    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The RX pipe named by [`MultiByteRead::source`], if it is one.
    pub const fn pipe(&self) -> Option<Pipe> {
        Pipe::from_index(self.source)
    }

    /// The `source << 8 | len` packing used by the radio vendor's own HAL.
    pub const fn into_bits(self) -> u16 {
        ((self.source as u16) << 8) | self.len as u16
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for MultiByteRead {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(fmt, "MultiByteRead source: {}, len: {}", self.source, self.len)
    }
}

/// Turn a communication fault from an auxiliary read into `None`.
///
/// Anything else (a closed session) is still an error.
fn auxiliary<T, E>(result: Result<T, Nrf24HalError<E>>) -> Result<Option<T>, Nrf24HalError<E>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(Nrf24HalError::Spi(_)) => {
            #[cfg(feature = "defmt")]
            defmt::warn!("auxiliary read failed; skipping transfer");
            Ok(None)
        }
        Err(e) => Err(e),
    }
}

impl<SPI> Nrf24Hal<SPI>
where
    SPI: SpiDevice,
{
    /// Read a multi-byte register into `buf`.
    ///
    /// `buf` should hold at least 32 bytes; anything that does not fit is dropped.
    /// On a zero-length result `buf` is left untouched.
    pub fn read_multibyte_reg(
        &mut self,
        reg: MultiByteRegister,
        buf: &mut [u8],
    ) -> Result<MultiByteRead, Nrf24HalError<SPI::Error>> {
        self.ensure_open()?;
        let (source, command, len) = match reg {
            MultiByteRegister::Address(pipe) => {
                let register = match pipe.address_register() {
                    Some(r) if r.width() == RegisterWidth::Address => r,
                    _ => return Ok(MultiByteRead::empty(pipe.id())),
                };
                let Some(width) = auxiliary(self.get_address_width())? else {
                    return Ok(MultiByteRead::empty(pipe.id()));
                };
                (
                    pipe.id(),
                    commands::R_REGISTER | register.address(),
                    width as usize,
                )
            }
            MultiByteRegister::RxPayload => {
                let Some(source) = auxiliary(self.get_rx_data_source())? else {
                    return Ok(MultiByteRead::empty(StatusFlags::RX_EMPTY));
                };
                if Pipe::from_index(source).is_none() {
                    return Ok(MultiByteRead::empty(source));
                }
                let Some(width) = auxiliary(self.read_rx_payload_width())? else {
                    return Ok(MultiByteRead::empty(source));
                };
                (
                    source,
                    commands::R_RX_PAYLOAD,
                    (width as usize).min(mnemonics::MAX_PAYLOAD),
                )
            }
        };
        if len == 0 {
            return Ok(MultiByteRead::empty(source));
        }

        self.buf[0] = command;
        self.buf[1..(len + 1)].fill(0);
        self.spi_transfer(len + 1)?;
        let copied = len.min(buf.len());
        buf[..copied].copy_from_slice(&self.buf[1..(copied + 1)]);
        Ok(MultiByteRead {
            source,
            len: copied as u8,
        })
    }

    /// Write `data` (at most 32 bytes) behind `command` in one transaction.
    ///
    /// Returns the STATUS register.
    pub(crate) fn write_multibyte_reg(
        &mut self,
        command: u8,
        data: &[u8],
    ) -> Result<StatusFlags, Nrf24HalError<SPI::Error>> {
        self.spi_command(command, data).map(StatusFlags::from_bits)
    }
}

impl Pipe {
    /// The register holding this pipe's address.
    pub(crate) const fn address_register(self) -> Option<Register> {
        match self {
            Pipe::Tx => Some(Register::TxAddr),
            Pipe::All => None,
            _ => match self.index() {
                Some(n) => Some(Register::RxAddr(n)),
                None => None,
            },
        }
    }
}
