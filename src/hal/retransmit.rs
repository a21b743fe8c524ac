use embedded_hal::spi::SpiDevice;

use super::{bit_fields::SetupRetry, Nrf24Hal, Nrf24HalError, Register};
use crate::ObserveTx;

impl<SPI> Nrf24Hal<SPI>
where
    SPI: SpiDevice,
{
    /// Configure automatic retransmission.
    ///
    /// - `count` is the number of retries (0-15); 0 disables retransmission.
    /// - `delay` is the wait between retries in microseconds. It is stored in
    ///   steps of 256 us (`delay >> 8`), so a delay below 256 us yields the
    ///   minimum step and anything past 4095 us wraps.
    pub fn set_auto_retr(
        &mut self,
        count: u8,
        delay: u16,
    ) -> Result<(), Nrf24HalError<SPI::Error>> {
        let setup_retr = SetupRetry::from_parts(count, delay);
        self.write_reg(Register::SetupRetr, setup_retr.into_bits())?;
        Ok(())
    }

    /// The OBSERVE_TX register: lost packets and retransmissions.
    pub fn get_auto_retr_status(&mut self) -> Result<ObserveTx, Nrf24HalError<SPI::Error>> {
        self.read_reg(Register::ObserveTx).map(ObserveTx::from_bits)
    }

    /// Packets lost since the RF channel was last written (saturates at 15).
    pub fn get_packet_lost_ctr(&mut self) -> Result<u8, Nrf24HalError<SPI::Error>> {
        Ok(self.get_auto_retr_status()?.plos_cnt())
    }

    /// Retransmissions used for the current packet.
    pub fn get_transmit_attempts(&mut self) -> Result<u8, Nrf24HalError<SPI::Error>> {
        Ok(self.get_auto_retr_status()?.arc_cnt())
    }
}
