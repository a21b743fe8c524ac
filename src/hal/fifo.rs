use embedded_hal::spi::SpiDevice;

use super::{Nrf24Hal, Nrf24HalError, Register};
use crate::{FifoState, FifoStatus};

impl<SPI> Nrf24Hal<SPI>
where
    SPI: SpiDevice,
{
    /// The FIFO_STATUS register.
    pub fn get_fifo_status(&mut self) -> Result<FifoStatus, Nrf24HalError<SPI::Error>> {
        self.read_reg(Register::FifoStatus).map(FifoStatus::from_bits)
    }

    pub fn get_tx_fifo_status(&mut self) -> Result<FifoState, Nrf24HalError<SPI::Error>> {
        Ok(self.get_fifo_status()?.tx_state())
    }

    pub fn get_rx_fifo_status(&mut self) -> Result<FifoState, Nrf24HalError<SPI::Error>> {
        Ok(self.get_fifo_status()?.rx_state())
    }

    pub fn rx_fifo_empty(&mut self) -> Result<bool, Nrf24HalError<SPI::Error>> {
        Ok(self.get_fifo_status()?.rx_empty())
    }

    pub fn rx_fifo_full(&mut self) -> Result<bool, Nrf24HalError<SPI::Error>> {
        Ok(self.get_fifo_status()?.rx_full())
    }

    pub fn tx_fifo_empty(&mut self) -> Result<bool, Nrf24HalError<SPI::Error>> {
        Ok(self.get_fifo_status()?.tx_empty())
    }

    /// Read from FIFO_STATUS rather than the TX_FULL bit of STATUS.
    pub fn tx_fifo_full(&mut self) -> Result<bool, Nrf24HalError<SPI::Error>> {
        Ok(self.get_fifo_status()?.tx_full())
    }

    /// Is the last transmitted payload being reused?
    ///
    /// See [`Nrf24Hal::reuse_tx()`].
    pub fn get_reuse_tx_status(&mut self) -> Result<bool, Nrf24HalError<SPI::Error>> {
        Ok(self.get_fifo_status()?.tx_reuse())
    }
}
