use embedded_hal::spi::SpiDevice;

use super::{
    bit_fields::SetupAw, commands, mnemonics, MultiByteRegister, Nrf24Hal, Nrf24HalError,
    Register, RegisterWidth,
};
use crate::{AddressWidth, Pipe, PipeStatus};

impl<SPI> Nrf24Hal<SPI>
where
    SPI: SpiDevice,
{
    /// Read EN_RXADDR and EN_AA, let `f` update both, then write them back.
    fn modify_pipe_bits<F>(&mut self, f: F) -> Result<(), Nrf24HalError<SPI::Error>>
    where
        F: FnOnce(u8, u8) -> (u8, u8),
    {
        let en_rxaddr = self.read_reg(Register::EnRxAddr)?;
        let en_aa = self.read_reg(Register::EnAa)?;
        let (en_rxaddr, en_aa) = f(en_rxaddr, en_aa);
        self.write_reg(Register::EnRxAddr, en_rxaddr)?;
        self.write_reg(Register::EnAa, en_aa)?;
        Ok(())
    }

    /// Enable a pipe for receiving, with or without auto-acknowledgement.
    ///
    /// [`Pipe::All`] opens pipes 0-5 at once. [`Pipe::Tx`] is not an RX pipe, so
    /// nothing is done for it. Bits 6 and 7 of both registers are never touched.
    pub fn open_pipe(
        &mut self,
        pipe: Pipe,
        auto_ack: bool,
    ) -> Result<(), Nrf24HalError<SPI::Error>> {
        self.ensure_open()?;
        let mask = match pipe {
            Pipe::All => mnemonics::PIPE_MASK,
            _ => match pipe.index() {
                Some(n) => 1 << n,
                None => return Ok(()),
            },
        };
        self.modify_pipe_bits(|en_rxaddr, en_aa| {
            let en_aa = if auto_ack { en_aa | mask } else { en_aa & !mask };
            (en_rxaddr | mask, en_aa)
        })
    }

    /// Disable a pipe and its auto-acknowledgement.
    ///
    /// [`Pipe::All`] closes pipes 0-5 at once; [`Pipe::Tx`] does nothing.
    pub fn close_pipe(&mut self, pipe: Pipe) -> Result<(), Nrf24HalError<SPI::Error>> {
        self.ensure_open()?;
        let mask = match pipe {
            Pipe::All => mnemonics::PIPE_MASK,
            _ => match pipe.index() {
                Some(n) => 1 << n,
                None => return Ok(()),
            },
        };
        self.modify_pipe_bits(|en_rxaddr, en_aa| (en_rxaddr & !mask, en_aa & !mask))
    }

    /// Is `pipe` enabled, and does it auto-acknowledge?
    ///
    /// Both are reported false for [`Pipe::Tx`] and [`Pipe::All`].
    pub fn get_pipe_status(&mut self, pipe: Pipe) -> Result<PipeStatus, Nrf24HalError<SPI::Error>> {
        self.ensure_open()?;
        let Some(n) = pipe.index() else {
            return Ok(PipeStatus::default());
        };
        let en_rxaddr = self.read_reg(Register::EnRxAddr)?;
        let en_aa = self.read_reg(Register::EnAa)?;
        Ok(PipeStatus {
            enabled: en_rxaddr & (1 << n) != 0,
            auto_ack: en_aa & (1 << n) != 0,
        })
    }

    /// Set the address of a pipe.
    ///
    /// [`Pipe::Tx`], [`Pipe::Pipe0`] and [`Pipe::Pipe1`] take as many bytes of
    /// `address` as the configured address width (LSByte first). Pipes 2-5 only
    /// store their LSByte (`address[0]`) and borrow the rest from pipe 1.
    /// [`Pipe::All`] does nothing.
    pub fn set_address(
        &mut self,
        pipe: Pipe,
        address: &[u8],
    ) -> Result<(), Nrf24HalError<SPI::Error>> {
        self.ensure_open()?;
        let Some(register) = pipe.address_register() else {
            return Ok(());
        };
        match register.width() {
            RegisterWidth::Address => {
                let width = (self.get_address_width()? as usize).min(address.len());
                self.write_multibyte_reg(
                    commands::W_REGISTER | register.address(),
                    &address[..width],
                )?;
            }
            RegisterWidth::Single => {
                if let Some(&lsb) = address.first() {
                    self.write_reg(register, lsb)?;
                }
            }
        }
        Ok(())
    }

    /// Read the address of a pipe into `address` and return the number of bytes read.
    ///
    /// For [`Pipe::Tx`], [`Pipe::Pipe0`] and [`Pipe::Pipe1`] this is the configured
    /// address width, or 0 if the width could not be read (`address` is then left
    /// untouched). Pipes 2-5 yield their single LSByte. [`Pipe::All`] yields 0.
    pub fn get_address(
        &mut self,
        pipe: Pipe,
        address: &mut [u8],
    ) -> Result<u8, Nrf24HalError<SPI::Error>> {
        self.ensure_open()?;
        let Some(register) = pipe.address_register() else {
            return Ok(0);
        };
        match register.width() {
            RegisterWidth::Address => {
                let read = self.read_multibyte_reg(MultiByteRegister::Address(pipe), address)?;
                Ok(read.len)
            }
            RegisterWidth::Single => {
                let lsb = self.read_reg(register)?;
                match address.first_mut() {
                    Some(byte) => {
                        *byte = lsb;
                        Ok(1)
                    }
                    None => Ok(0),
                }
            }
        }
    }

    /// Set the address width shared by all pipes.
    pub fn set_address_width(
        &mut self,
        width: AddressWidth,
    ) -> Result<(), Nrf24HalError<SPI::Error>> {
        let setup_aw = SetupAw::new().with_aw(width.into_bits());
        self.write_reg(Register::SetupAw, setup_aw.into_bits())?;
        Ok(())
    }

    /// The configured address width in bytes.
    pub fn get_address_width(&mut self) -> Result<u8, Nrf24HalError<SPI::Error>> {
        let setup_aw = SetupAw::from_bits(self.read_reg(Register::SetupAw)?);
        Ok(setup_aw.address_width())
    }

    /// Set the static payload width (clamped to 32) of an RX pipe.
    ///
    /// Only used while dynamic payloads are disabled for that pipe.
    /// Does nothing for [`Pipe::Tx`] and [`Pipe::All`].
    pub fn set_rx_payload_width(
        &mut self,
        pipe: Pipe,
        width: u8,
    ) -> Result<(), Nrf24HalError<SPI::Error>> {
        self.ensure_open()?;
        let Some(n) = pipe.index() else {
            return Ok(());
        };
        self.write_reg(Register::RxPw(n), width.min(mnemonics::MAX_PAYLOAD as u8))?;
        Ok(())
    }

    /// The static payload width of an RX pipe; 0 for [`Pipe::Tx`] and [`Pipe::All`].
    pub fn get_rx_payload_width(&mut self, pipe: Pipe) -> Result<u8, Nrf24HalError<SPI::Error>> {
        self.ensure_open()?;
        match pipe.index() {
            Some(n) => self.read_reg(Register::RxPw(n)),
            None => Ok(0),
        }
    }
}
