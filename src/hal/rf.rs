use embedded_hal::spi::SpiDevice;

use super::{bit_fields::RfSetup, Nrf24Hal, Nrf24HalError, Register};
use crate::{DataRate, OutputPower};

impl<SPI> Nrf24Hal<SPI>
where
    SPI: SpiDevice,
{
    fn modify_rf_setup<F>(&mut self, f: F) -> Result<(), Nrf24HalError<SPI::Error>>
    where
        F: FnOnce(RfSetup) -> RfSetup,
    {
        self.modify_reg(Register::RfSetup, |value| {
            f(RfSetup::from_bits(value)).into_bits()
        })
    }

    fn get_rf_setup(&mut self) -> Result<RfSetup, Nrf24HalError<SPI::Error>> {
        self.read_reg(Register::RfSetup).map(RfSetup::from_bits)
    }

    /// Select the RF channel; only the lower 7 bits of `channel` are used.
    ///
    /// The frequency is 2400 MHz + `channel`. Writing the channel also resets the
    /// lost packet counter.
    pub fn set_rf_channel(&mut self, channel: u8) -> Result<(), Nrf24HalError<SPI::Error>> {
        self.write_reg(Register::RfCh, channel & 0x7F)?;
        Ok(())
    }

    pub fn get_rf_channel(&mut self) -> Result<u8, Nrf24HalError<SPI::Error>> {
        self.read_reg(Register::RfCh)
    }

    pub fn set_output_power(
        &mut self,
        power: OutputPower,
    ) -> Result<(), Nrf24HalError<SPI::Error>> {
        self.modify_rf_setup(|rf_setup| rf_setup.with_output_power(power))
    }

    pub fn get_output_power(&mut self) -> Result<OutputPower, Nrf24HalError<SPI::Error>> {
        Ok(self.get_rf_setup()?.output_power())
    }

    /// Set the on-air data rate. Both ends of a link must use the same rate.
    pub fn set_datarate(&mut self, data_rate: DataRate) -> Result<(), Nrf24HalError<SPI::Error>> {
        self.modify_rf_setup(|rf_setup| rf_setup.with_data_rate(data_rate))
    }

    pub fn get_datarate(&mut self) -> Result<DataRate, Nrf24HalError<SPI::Error>> {
        Ok(self.get_rf_setup()?.data_rate())
    }

    /// Force the PLL lock signal. Only meant for testing.
    pub fn set_pll_mode(&mut self, locked: bool) -> Result<(), Nrf24HalError<SPI::Error>> {
        self.modify_rf_setup(|rf_setup| rf_setup.with_pll_lock(locked))
    }

    /// Transmit an unmodulated carrier. Only meant for testing.
    pub fn enable_continuous_wave(
        &mut self,
        enable: bool,
    ) -> Result<(), Nrf24HalError<SPI::Error>> {
        self.modify_rf_setup(|rf_setup| rf_setup.with_cont_wave(enable))
    }

    /// Was a carrier (or, on the nRF24L01+, a signal above -64 dBm) detected
    /// on the current channel?
    pub fn get_carrier_detect(&mut self) -> Result<bool, Nrf24HalError<SPI::Error>> {
        Ok(self.read_reg(Register::Cd)? & 1 == 1)
    }
}
