use embedded_hal::spi::SpiDevice;

use super::{bit_fields::Config, Nrf24Hal, Nrf24HalError, Register};
use crate::{CrcMode, IrqSource, OperationMode, PowerMode};

impl<SPI> Nrf24Hal<SPI>
where
    SPI: SpiDevice,
{
    fn modify_config<F>(&mut self, f: F) -> Result<(), Nrf24HalError<SPI::Error>>
    where
        F: FnOnce(Config) -> Config,
    {
        self.modify_reg(Register::Config, |value| {
            f(Config::from_bits(value)).into_bits()
        })
    }

    fn get_config(&mut self) -> Result<Config, Nrf24HalError<SPI::Error>> {
        self.read_reg(Register::Config).map(Config::from_bits)
    }

    /// Switch between primary transmitter and primary receiver.
    pub fn set_operation_mode(
        &mut self,
        mode: OperationMode,
    ) -> Result<(), Nrf24HalError<SPI::Error>> {
        self.modify_config(|config| config.with_operation_mode(mode))
    }

    pub fn get_operation_mode(&mut self) -> Result<OperationMode, Nrf24HalError<SPI::Error>> {
        Ok(self.get_config()?.operation_mode())
    }

    /// Power the radio up into standby, or down into sleep.
    ///
    /// Leaving power down takes up to 5 ms (Tpd2stby) before CE may be asserted;
    /// that wait is the caller's responsibility.
    pub fn set_power_mode(&mut self, mode: PowerMode) -> Result<(), Nrf24HalError<SPI::Error>> {
        self.modify_config(|config| config.with_power_mode(mode))
    }

    pub fn get_power_mode(&mut self) -> Result<PowerMode, Nrf24HalError<SPI::Error>> {
        Ok(self.get_config()?.power_mode())
    }

    /// [`CrcMode::Off`] clears only the enable bit; the CRC size bit is left as is.
    pub fn set_crc_mode(&mut self, mode: CrcMode) -> Result<(), Nrf24HalError<SPI::Error>> {
        self.modify_config(|config| config.with_crc_mode(mode))
    }

    pub fn get_crc_mode(&mut self) -> Result<CrcMode, Nrf24HalError<SPI::Error>> {
        Ok(self.get_config()?.crc_mode())
    }

    /// Reflect (`enable = true`) or mask the event from `source` on the IRQ pin.
    pub fn set_irq_mode(
        &mut self,
        source: IrqSource,
        enable: bool,
    ) -> Result<(), Nrf24HalError<SPI::Error>> {
        self.modify_config(|config| config.with_irq(source, enable))
    }
}

/////////////////////////////////////////////////////////////////////////////////
/// unit tests
#[cfg(test)]
mod test {
    extern crate std;
    use crate::hal::{commands, registers};
    use crate::{spi_test_expects, test::mk_hal};
    use crate::{CrcMode, IrqSource, OperationMode, PowerMode};
    use embedded_hal_mock::eh1::spi::Transaction as SpiTransaction;
    use std::vec;

    #[test]
    pub fn set_operation_mode() {
        let spi_expectations = spi_test_expects![
            (vec![registers::CONFIG, 0u8], vec![0xEu8, 0x0Cu8]),
            (
                vec![registers::CONFIG | commands::W_REGISTER, 0x0Du8],
                vec![0xEu8, 0u8],
            ),
            (vec![registers::CONFIG, 0u8], vec![0xEu8, 0x0Fu8]),
            (
                vec![registers::CONFIG | commands::W_REGISTER, 0x0Eu8],
                vec![0xEu8, 0u8],
            ),
            (vec![registers::CONFIG, 0u8], vec![0xEu8, 0x0Du8]),
        ];
        let mocks = mk_hal(&spi_expectations);
        let (mut hal, mut spi) = (mocks.0, mocks.1);
        hal.set_operation_mode(OperationMode::Prx).unwrap();
        hal.set_operation_mode(OperationMode::Ptx).unwrap();
        assert_eq!(hal.get_operation_mode(), Ok(OperationMode::Prx));
        spi.done();
    }

    #[test]
    pub fn set_power_mode() {
        let spi_expectations = spi_test_expects![
            (vec![registers::CONFIG, 0u8], vec![0xEu8, 0x08u8]),
            (
                vec![registers::CONFIG | commands::W_REGISTER, 0x0Au8],
                vec![0xEu8, 0u8],
            ),
            (vec![registers::CONFIG, 0u8], vec![0xEu8, 0x0Bu8]),
            (
                vec![registers::CONFIG | commands::W_REGISTER, 0x09u8],
                vec![0xEu8, 0u8],
            ),
            (vec![registers::CONFIG, 0u8], vec![0xEu8, 0x09u8]),
        ];
        let mocks = mk_hal(&spi_expectations);
        let (mut hal, mut spi) = (mocks.0, mocks.1);
        hal.set_power_mode(PowerMode::PowerUp).unwrap();
        hal.set_power_mode(PowerMode::PowerDown).unwrap();
        assert_eq!(hal.get_power_mode(), Ok(PowerMode::PowerDown));
        spi.done();
    }

    #[test]
    pub fn set_crc_mode() {
        let spi_expectations = spi_test_expects![
            // 16 bit sets both bits
            (vec![registers::CONFIG, 0u8], vec![0xEu8, 0x02u8]),
            (
                vec![registers::CONFIG | commands::W_REGISTER, 0x0Eu8],
                vec![0xEu8, 0u8],
            ),
            (vec![registers::CONFIG, 0u8], vec![0xEu8, 0x0Eu8]),
            // off clears only EN_CRC
            (vec![registers::CONFIG, 0u8], vec![0xEu8, 0x0Eu8]),
            (
                vec![registers::CONFIG | commands::W_REGISTER, 0x06u8],
                vec![0xEu8, 0u8],
            ),
            (vec![registers::CONFIG, 0u8], vec![0xEu8, 0x06u8]),
            // 8 bit
            (vec![registers::CONFIG, 0u8], vec![0xEu8, 0x06u8]),
            (
                vec![registers::CONFIG | commands::W_REGISTER, 0x0Au8],
                vec![0xEu8, 0u8],
            ),
            (vec![registers::CONFIG, 0u8], vec![0xEu8, 0x0Au8]),
        ];
        let mocks = mk_hal(&spi_expectations);
        let (mut hal, mut spi) = (mocks.0, mocks.1);
        hal.set_crc_mode(CrcMode::Bit16).unwrap();
        assert_eq!(hal.get_crc_mode(), Ok(CrcMode::Bit16));
        hal.set_crc_mode(CrcMode::Off).unwrap();
        assert_eq!(hal.get_crc_mode(), Ok(CrcMode::Off));
        hal.set_crc_mode(CrcMode::Bit8).unwrap();
        assert_eq!(hal.get_crc_mode(), Ok(CrcMode::Bit8));
        spi.done();
    }

    #[test]
    pub fn set_irq_mode() {
        let spi_expectations = spi_test_expects![
            // mask RX_DR
            (vec![registers::CONFIG, 0u8], vec![0xEu8, 0x0Cu8]),
            (
                vec![registers::CONFIG | commands::W_REGISTER, 0x4Cu8],
                vec![0xEu8, 0u8],
            ),
            // unmask MAX_RT
            (vec![registers::CONFIG, 0u8], vec![0xEu8, 0x7Cu8]),
            (
                vec![registers::CONFIG | commands::W_REGISTER, 0x6Cu8],
                vec![0xEu8, 0u8],
            ),
            // mask TX_DS
            (vec![registers::CONFIG, 0u8], vec![0xEu8, 0u8]),
            (
                vec![registers::CONFIG | commands::W_REGISTER, 0x20u8],
                vec![0xEu8, 0u8],
            ),
        ];
        let mocks = mk_hal(&spi_expectations);
        let (mut hal, mut spi) = (mocks.0, mocks.1);
        hal.set_irq_mode(IrqSource::RxDataReady, false).unwrap();
        hal.set_irq_mode(IrqSource::MaxRetransmits, true).unwrap();
        hal.set_irq_mode(IrqSource::TxDataSent, false).unwrap();
        spi.done();
    }
}
