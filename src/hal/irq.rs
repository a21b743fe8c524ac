use embedded_hal::spi::SpiDevice;

use super::{Nrf24Hal, Nrf24HalError, Register};
use crate::{FifoStatus, IrqSource, StatusFlags, StatusSnapshot};

impl<SPI> Nrf24Hal<SPI>
where
    SPI: SpiDevice,
{
    /// Clear all IRQ flags and return the ones that were set.
    ///
    /// Use [`Nrf24Hal::clear_irq_flags_get_status()`] to also learn the RX pipe.
    pub fn get_clear_irq_flags(&mut self) -> Result<StatusFlags, Nrf24HalError<SPI::Error>> {
        let status = self.write_reg(Register::Status, StatusFlags::IRQ_MASK)?;
        Ok(StatusFlags::from_bits(status).irq_only())
    }

    /// Clear all IRQ flags and report them together with the RX pipe source and
    /// the FIFO flags.
    ///
    /// The IRQ flags and RX pipe source come from the STATUS byte returned by the
    /// clearing write itself. Once the flags are cleared the pipe source can no
    /// longer be trusted, so only the FIFO flags are read afterwards.
    pub fn clear_irq_flags_get_status(
        &mut self,
    ) -> Result<StatusSnapshot, Nrf24HalError<SPI::Error>> {
        let status = self.write_reg(Register::Status, StatusFlags::IRQ_MASK)?;
        let status =
            StatusFlags::from_bits(status & (StatusFlags::IRQ_MASK | StatusFlags::RX_PIPE_MASK));
        let fifo = FifoStatus::from_bits(self.read_reg(Register::FifoStatus)?);
        Ok(StatusSnapshot { status, fifo })
    }

    /// Clear the flag of a single IRQ source.
    pub fn clear_irq_flag(&mut self, source: IrqSource) -> Result<(), Nrf24HalError<SPI::Error>> {
        self.write_reg(Register::Status, source.mask())?;
        Ok(())
    }

    /// Get the IRQ flags without clearing them.
    pub fn get_irq_flags(&mut self) -> Result<StatusFlags, Nrf24HalError<SPI::Error>> {
        Ok(self.nop()?.irq_only())
    }

    /// The pipe (0-5) of the payload at the head of the RX FIFO; 7 if it is empty.
    pub fn get_rx_data_source(&mut self) -> Result<u8, Nrf24HalError<SPI::Error>> {
        Ok(self.nop()?.rx_pipe())
    }
}
