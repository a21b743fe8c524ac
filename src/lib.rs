#![doc = include_str!("../README.md")]
//!
//! ## Session
//!
//! - [`Nrf24Hal::new()`](fn@crate::hal::Nrf24Hal::new)
//! - [`Nrf24Hal::open()`](hal/struct.Nrf24Hal.html#method.open)
//! - [`Nrf24Hal::open_with()`](hal/struct.Nrf24Hal.html#method.open_with)
//! - [`Nrf24Hal::close()`](hal/struct.Nrf24Hal.html#method.close)
//! - [`Nrf24Hal::last_fault()`](hal/struct.Nrf24Hal.html#method.last_fault)
//!
//! ## Configuration
//!
//! - [`Nrf24Hal::set_operation_mode()`](hal/struct.Nrf24Hal.html#method.set_operation_mode)
//! - [`Nrf24Hal::set_power_mode()`](hal/struct.Nrf24Hal.html#method.set_power_mode)
//! - [`Nrf24Hal::set_crc_mode()`](hal/struct.Nrf24Hal.html#method.set_crc_mode)
//! - [`Nrf24Hal::set_irq_mode()`](hal/struct.Nrf24Hal.html#method.set_irq_mode)
//! - [`Nrf24Hal::set_rf_channel()`](hal/struct.Nrf24Hal.html#method.set_rf_channel)
//! - [`Nrf24Hal::set_datarate()`](hal/struct.Nrf24Hal.html#method.set_datarate)
//! - [`Nrf24Hal::set_output_power()`](hal/struct.Nrf24Hal.html#method.set_output_power)
//! - [`Nrf24Hal::set_auto_retr()`](hal/struct.Nrf24Hal.html#method.set_auto_retr)
//! - [`Nrf24Hal::set_address_width()`](hal/struct.Nrf24Hal.html#method.set_address_width)
//! - [`Nrf24Hal::setup_dynamic_payload()`](hal/struct.Nrf24Hal.html#method.setup_dynamic_payload)
//!
//! ## Pipes and payloads
//!
//! - [`Nrf24Hal::open_pipe()`](hal/struct.Nrf24Hal.html#method.open_pipe)
//! - [`Nrf24Hal::close_pipe()`](hal/struct.Nrf24Hal.html#method.close_pipe)
//! - [`Nrf24Hal::set_address()`](hal/struct.Nrf24Hal.html#method.set_address)
//! - [`Nrf24Hal::get_address()`](hal/struct.Nrf24Hal.html#method.get_address)
//! - [`Nrf24Hal::write_tx_payload()`](hal/struct.Nrf24Hal.html#method.write_tx_payload)
//! - [`Nrf24Hal::write_ack_payload()`](hal/struct.Nrf24Hal.html#method.write_ack_payload)
//! - [`Nrf24Hal::read_rx_payload()`](hal/struct.Nrf24Hal.html#method.read_rx_payload)
//!
//! ## Status
//!
//! - [`Nrf24Hal::clear_irq_flags_get_status()`](fn@crate::hal::Nrf24Hal::clear_irq_flags_get_status)
//! - [`Nrf24Hal::get_irq_flags()`](hal/struct.Nrf24Hal.html#method.get_irq_flags)
//! - [`Nrf24Hal::get_fifo_status()`](hal/struct.Nrf24Hal.html#method.get_fifo_status)
//! - [`Nrf24Hal::get_carrier_detect()`](fn@crate::hal::Nrf24Hal::get_carrier_detect)
//!
#![no_std]

#[cfg(feature = "std")]
extern crate std;

mod types;
pub use types::{
    AddressWidth, CrcMode, DataRate, FifoState, FifoStatus, IrqSource, ObserveTx,
    OperationMode, OutputPower, Pipe, PipeStatus, PowerMode, StatusFlags, StatusSnapshot,
};
pub mod hal;
#[doc(inline)]
pub use hal::{BusOpener, BusSelector, MultiByteRead, MultiByteRegister, Nrf24Hal, Nrf24HalError};

#[cfg(feature = "linux")]
pub mod linux;

#[cfg(test)]
mod test_device;

#[cfg(test)]
mod test {
    use crate::hal::Nrf24Hal;
    use embedded_hal_mock::eh1::spi::{Mock as SpiMock, Transaction as SpiTransaction};

    pub use crate::test_device::SimRadio;

    /// Takes an indefinite repetition of a tuple of 2 vectors: `(expected_data, response_data)`
    /// and generates an array of `SpiTransaction`s.
    ///
    /// NOTE: This macro is only used to generate code in unit tests (for this crate only).
    #[macro_export]
    macro_rules! spi_test_expects {
        ($( ($expected:expr , $response:expr $(,)? ) , ) + ) => {
            [
                $(
                    SpiTransaction::transaction_start(),
                    SpiTransaction::transfer_in_place($expected, $response),
                    SpiTransaction::transaction_end(),
                )*
            ]
        }
    }

    /// An open [`Nrf24Hal`] session on a mocked SPI bus, plus a handle to that bus.
    pub struct MockHal(pub Nrf24Hal<SpiMock<u8>>, pub SpiMock<u8>);

    /// Open a session on a mock bus that expects `spi_expectations`.
    pub fn mk_hal(spi_expectations: &[SpiTransaction<u8>]) -> MockHal {
        let spi = SpiMock::new(spi_expectations);
        let mut hal = Nrf24Hal::new();
        hal.open(spi.clone());
        MockHal(hal, spi)
    }
}
