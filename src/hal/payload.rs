use embedded_hal::spi::SpiDevice;

use super::{
    bit_fields::Feature, commands, mnemonics, MultiByteRead, MultiByteRegister, Nrf24Hal,
    Nrf24HalError, Register,
};
use crate::{Pipe, StatusFlags};

impl<SPI> Nrf24Hal<SPI>
where
    SPI: SpiDevice,
{
    fn modify_feature<F>(&mut self, f: F) -> Result<(), Nrf24HalError<SPI::Error>>
    where
        F: FnOnce(Feature) -> Feature,
    {
        self.modify_reg(Register::Feature, |value| {
            f(Feature::from_bits(value)).into_bits()
        })
    }

    /// Enable dynamic payload length per pipe: bit `n` of `pipes` stands for pipe `n`.
    ///
    /// Bits 6 and 7 are ignored. Dynamic payloads must also be enabled globally
    /// with [`Nrf24Hal::enable_dynamic_payload()`].
    pub fn setup_dynamic_payload(&mut self, pipes: u8) -> Result<(), Nrf24HalError<SPI::Error>> {
        self.write_reg(Register::Dynpd, pipes & mnemonics::PIPE_MASK)?;
        Ok(())
    }

    pub fn enable_dynamic_payload(
        &mut self,
        enable: bool,
    ) -> Result<(), Nrf24HalError<SPI::Error>> {
        self.modify_feature(|feature| feature.with_en_dpl(enable))
    }

    /// Allow payloads to be attached to acknowledgements.
    ///
    /// This requires dynamic payloads on the pipes in use.
    pub fn enable_ack_payload(&mut self, enable: bool) -> Result<(), Nrf24HalError<SPI::Error>> {
        self.modify_feature(|feature| feature.with_en_ack_pay(enable))
    }

    /// Allow [`Nrf24Hal::write_tx_payload_noack()`].
    pub fn enable_dynamic_ack(&mut self, enable: bool) -> Result<(), Nrf24HalError<SPI::Error>> {
        self.modify_feature(|feature| feature.with_en_dyn_ack(enable))
    }

    /// Put a payload (at most 32 bytes; the rest is dropped) into the TX FIFO.
    pub fn write_tx_payload(
        &mut self,
        payload: &[u8],
    ) -> Result<StatusFlags, Nrf24HalError<SPI::Error>> {
        self.write_multibyte_reg(commands::W_TX_PAYLOAD, payload)
    }

    /// Like [`Nrf24Hal::write_tx_payload()`], but the receiver will not acknowledge
    /// this payload. Needs [`Nrf24Hal::enable_dynamic_ack()`].
    pub fn write_tx_payload_noack(
        &mut self,
        payload: &[u8],
    ) -> Result<StatusFlags, Nrf24HalError<SPI::Error>> {
        self.write_multibyte_reg(commands::W_TX_PAYLOAD_NO_ACK, payload)
    }

    /// Queue a payload to be sent with the next acknowledgement on `pipe`.
    ///
    /// Returns `None` without any bus traffic for [`Pipe::Tx`] and [`Pipe::All`].
    pub fn write_ack_payload(
        &mut self,
        pipe: Pipe,
        payload: &[u8],
    ) -> Result<Option<StatusFlags>, Nrf24HalError<SPI::Error>> {
        self.ensure_open()?;
        let Some(n) = pipe.index() else {
            return Ok(None);
        };
        self.write_multibyte_reg(commands::W_ACK_PAYLOAD | n, payload).map(Some)
    }

    /// Width of the payload at the head of the RX FIFO.
    ///
    /// The radio reports garbage (greater than 32) if that payload is corrupt; it
    /// should then be flushed.
    pub fn read_rx_payload_width(&mut self) -> Result<u8, Nrf24HalError<SPI::Error>> {
        self.spi_read_byte(commands::R_RX_PL_WID)
    }

    /// Pop the payload at the head of the RX FIFO into `buf`.
    ///
    /// See [`Nrf24Hal::read_multibyte_reg()`] for the zero-length results.
    pub fn read_rx_payload(
        &mut self,
        buf: &mut [u8],
    ) -> Result<MultiByteRead, Nrf24HalError<SPI::Error>> {
        self.read_multibyte_reg(MultiByteRegister::RxPayload, buf)
    }
}

/////////////////////////////////////////////////////////////////////////////////
/// unit tests
#[cfg(test)]
mod test {
    extern crate std;
    use crate::hal::{commands, registers, MultiByteRead, Nrf24Hal};
    use crate::{
        spi_test_expects,
        test::{mk_hal, SimRadio},
        Pipe,
    };
    use embedded_hal_mock::eh1::spi::Transaction as SpiTransaction;
    use std::vec;

    #[test]
    pub fn setup_dynamic_payload() {
        let spi_expectations = spi_test_expects![(
            vec![registers::DYNPD | commands::W_REGISTER, 0x3Fu8],
            vec![0xEu8, 0u8],
        ),];
        let mocks = mk_hal(&spi_expectations);
        let (mut hal, mut spi) = (mocks.0, mocks.1);
        hal.setup_dynamic_payload(0xFF).unwrap();
        spi.done();
    }

    #[test]
    pub fn feature_toggles() {
        let spi_expectations = spi_test_expects![
            (vec![registers::FEATURE, 0u8], vec![0xEu8, 0u8]),
            (
                vec![registers::FEATURE | commands::W_REGISTER, 4u8],
                vec![0xEu8, 0u8],
            ),
            (vec![registers::FEATURE, 0u8], vec![0xEu8, 4u8]),
            (
                vec![registers::FEATURE | commands::W_REGISTER, 6u8],
                vec![0xEu8, 0u8],
            ),
            (vec![registers::FEATURE, 0u8], vec![0xEu8, 7u8]),
            (
                vec![registers::FEATURE | commands::W_REGISTER, 6u8],
                vec![0xEu8, 0u8],
            ),
        ];
        let mocks = mk_hal(&spi_expectations);
        let (mut hal, mut spi) = (mocks.0, mocks.1);
        hal.enable_dynamic_payload(true).unwrap();
        hal.enable_ack_payload(true).unwrap();
        hal.enable_dynamic_ack(false).unwrap();
        spi.done();
    }

    #[test]
    pub fn write_payloads() {
        let spi_expectations = spi_test_expects![
            (
                vec![commands::W_TX_PAYLOAD, 1u8, 2u8, 3u8],
                vec![0xEu8, 0u8, 0u8, 0u8],
            ),
            (
                vec![commands::W_TX_PAYLOAD_NO_ACK, 4u8],
                vec![0x1Fu8, 0u8],
            ),
            (
                vec![commands::W_ACK_PAYLOAD | 3, 9u8, 9u8],
                vec![0xEu8, 0u8, 0u8],
            ),
        ];
        let mocks = mk_hal(&spi_expectations);
        let (mut hal, mut spi) = (mocks.0, mocks.1);
        hal.write_tx_payload(&[1, 2, 3]).unwrap();
        let status = hal.write_tx_payload_noack(&[4]).unwrap();
        assert!(status.tx_full());
        assert!(hal.write_ack_payload(Pipe::Pipe3, &[9, 9]).unwrap().is_some());
        // not an RX pipe
        assert_eq!(hal.write_ack_payload(Pipe::Tx, &[9, 9]), Ok(None));
        spi.done();
    }

    #[test]
    pub fn read_rx_payload_width() {
        let spi_expectations = spi_test_expects![(
            vec![commands::R_RX_PL_WID, 0u8],
            vec![0xEu8, 12u8],
        ),];
        let mocks = mk_hal(&spi_expectations);
        let (mut hal, mut spi) = (mocks.0, mocks.1);
        assert_eq!(hal.read_rx_payload_width(), Ok(12));
        spi.done();
    }

    #[test]
    pub fn tx_payload_then_flush() {
        let mut hal = Nrf24Hal::new();
        hal.open(SimRadio::new());
        assert_eq!(hal.tx_fifo_empty(), Ok(true));
        hal.write_tx_payload(&[0x11u8; 10]).unwrap();
        assert_eq!(hal.tx_fifo_empty(), Ok(false));
        hal.flush_tx().unwrap();
        assert_eq!(hal.tx_fifo_empty(), Ok(true));
    }

    #[test]
    pub fn receive_payload() {
        let mut sim = SimRadio::new();
        sim.receive(Pipe::Pipe2, b"hello");
        let mut hal = Nrf24Hal::new();
        hal.open(sim);
        assert_eq!(hal.rx_fifo_empty(), Ok(false));
        let mut buf = [0u8; 32];
        let result = hal.read_rx_payload(&mut buf).unwrap();
        assert_eq!(result, MultiByteRead { source: 2, len: 5 });
        assert_eq!(&buf[..5], b"hello");
        assert_eq!(hal.rx_fifo_empty(), Ok(true));
        // nothing left
        assert_eq!(hal.read_rx_payload(&mut buf), Ok(MultiByteRead::empty(7)));
    }
}
