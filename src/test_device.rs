//! A simulated nRF24L01 register file behind an [`SpiDevice`].
//!
//! It understands the command set well enough to observe the effects of a
//! sequence of operations, and it can be told to fail a chosen command.

extern crate std;
use std::{collections::VecDeque, vec::Vec};

use embedded_hal::spi::{ErrorKind, ErrorType, Operation, SpiDevice};

use crate::{
    hal::{commands, registers},
    Pipe,
};

const FIFO_DEPTH: usize = 3;

pub struct SimRadio {
    registers: [u8; 0x20],
    /// RX_ADDR_P0, RX_ADDR_P1 and TX_ADDR, LSByte first.
    addresses: [[u8; 5]; 3],
    tx_fifo: VecDeque<Vec<u8>>,
    rx_fifo: VecDeque<(u8, Vec<u8>)>,
    reuse_tx: bool,
    fail_on: Option<u8>,
    commands: Vec<u8>,
}

impl SimRadio {
    /// A radio in its power-on reset state.
    pub fn new() -> Self {
        let mut regs = [0u8; 0x20];
        regs[registers::CONFIG as usize] = 0x08;
        regs[registers::EN_AA as usize] = 0x3F;
        regs[registers::EN_RXADDR as usize] = 0x03;
        regs[registers::SETUP_AW as usize] = 0x03;
        regs[registers::SETUP_RETR as usize] = 0x03;
        regs[registers::RF_CH as usize] = 0x02;
        regs[registers::RF_SETUP as usize] = 0x0E;
        for (n, lsb) in [0xC3u8, 0xC4, 0xC5, 0xC6].into_iter().enumerate() {
            regs[registers::RX_ADDR_P0 as usize + 2 + n] = lsb;
        }
        Self {
            registers: regs,
            addresses: [[0xE7; 5], [0xC2; 5], [0xE7; 5]],
            tx_fifo: VecDeque::new(),
            rx_fifo: VecDeque::new(),
            reuse_tx: false,
            fail_on: None,
            commands: Vec::new(),
        }
    }

    /// Make every transaction starting with `command` fail.
    pub fn fail_on(&mut self, command: u8) {
        self.fail_on = Some(command);
    }

    /// Deliver a payload as if it arrived on `pipe`.
    pub fn receive(&mut self, pipe: Pipe, payload: &[u8]) {
        let Some(n) = pipe.index() else {
            return;
        };
        if self.rx_fifo.len() < FIFO_DEPTH {
            self.rx_fifo.push_back((n, payload.to_vec()));
            self.registers[registers::STATUS as usize] |= 0x40;
        }
    }

    /// The first byte of every attempted transaction, failed ones included.
    pub fn commands(&self) -> &[u8] {
        &self.commands
    }

    fn status(&self) -> u8 {
        let rx_pipe = self.rx_fifo.front().map_or(7, |(n, _)| *n);
        (self.registers[registers::STATUS as usize] & 0x70)
            | (rx_pipe << 1)
            | (self.tx_fifo.len() >= FIFO_DEPTH) as u8
    }

    fn fifo_status(&self) -> u8 {
        ((self.reuse_tx as u8) << 6)
            | (((self.tx_fifo.len() >= FIFO_DEPTH) as u8) << 5)
            | ((self.tx_fifo.is_empty() as u8) << 4)
            | (((self.rx_fifo.len() >= FIFO_DEPTH) as u8) << 1)
            | self.rx_fifo.is_empty() as u8
    }

    fn address_slot(reg: u8) -> Option<usize> {
        match reg {
            registers::RX_ADDR_P0 => Some(0),
            r if r == registers::RX_ADDR_P0 + 1 => Some(1),
            registers::TX_ADDR => Some(2),
            _ => None,
        }
    }

    fn read_register(&self, reg: u8, out: &mut [u8]) {
        if let Some(slot) = Self::address_slot(reg) {
            let len = out.len().min(5);
            out[..len].copy_from_slice(&self.addresses[slot][..len]);
            return;
        }
        if let Some(byte) = out.first_mut() {
            *byte = match reg {
                registers::STATUS => self.status(),
                registers::FIFO_STATUS => self.fifo_status(),
                _ => self.registers[reg as usize],
            };
        }
    }

    fn write_register(&mut self, reg: u8, data: &[u8]) {
        if let Some(slot) = Self::address_slot(reg) {
            let len = data.len().min(5);
            self.addresses[slot][..len].copy_from_slice(&data[..len]);
            return;
        }
        let Some(&value) = data.first() else {
            return;
        };
        match reg {
            registers::STATUS => self.registers[reg as usize] &= !(value & 0x70),
            registers::OBSERVE_TX | registers::CD | registers::FIFO_STATUS => (),
            _ => self.registers[reg as usize] = value,
        }
    }

    fn push_tx(&mut self, payload: &[u8]) {
        if self.tx_fifo.len() < FIFO_DEPTH {
            self.tx_fifo.push_back(payload.to_vec());
        }
        self.reuse_tx = false;
    }

    fn transfer(&mut self, buf: &mut [u8]) -> Result<(), ErrorKind> {
        let Some(&command) = buf.first() else {
            return Ok(());
        };
        self.commands.push(command);
        if self.fail_on == Some(command) {
            return Err(ErrorKind::Other);
        }
        buf[0] = self.status();
        let (_, data) = buf.split_at_mut(1);
        match command {
            c if c < commands::W_REGISTER => self.read_register(c & 0x1F, data),
            c if c < 0x40 => self.write_register(c & 0x1F, data),
            commands::R_RX_PL_WID => {
                if let Some(byte) = data.first_mut() {
                    *byte = self.rx_fifo.front().map_or(0, |(_, p)| p.len() as u8);
                }
            }
            commands::R_RX_PAYLOAD => {
                if let Some((_, payload)) = self.rx_fifo.pop_front() {
                    let len = payload.len().min(data.len());
                    data[..len].copy_from_slice(&payload[..len]);
                }
            }
            commands::W_TX_PAYLOAD | commands::W_TX_PAYLOAD_NO_ACK => self.push_tx(data),
            c if c & 0xF8 == commands::W_ACK_PAYLOAD => self.push_tx(data),
            commands::FLUSH_TX => {
                self.tx_fifo.clear();
                self.reuse_tx = false;
            }
            commands::FLUSH_RX => self.rx_fifo.clear(),
            commands::REUSE_TX_PL => self.reuse_tx = true,
            _ => (),
        }
        Ok(())
    }
}

impl ErrorType for SimRadio {
    type Error = ErrorKind;
}

impl SpiDevice for SimRadio {
    fn transaction(&mut self, operations: &mut [Operation<'_, u8>]) -> Result<(), ErrorKind> {
        for op in operations {
            match op {
                Operation::TransferInPlace(buf) => self.transfer(buf)?,
                _ => return Err(ErrorKind::Other),
            }
        }
        Ok(())
    }
}

/////////////////////////////////////////////////////////////////////////////////
/// unit tests
#[cfg(test)]
mod test {
    use super::SimRadio;
    use crate::{hal::Nrf24Hal, IrqSource, Pipe};

    #[test]
    fn reset_state() {
        let mut hal = Nrf24Hal::new();
        hal.open(SimRadio::new());
        assert_eq!(hal.get_address_width(), Ok(5));
        assert_eq!(hal.get_rf_channel(), Ok(2));
        assert_eq!(hal.rx_fifo_empty(), Ok(true));
        assert_eq!(hal.get_rx_data_source(), Ok(7));
        let mut buf = [0u8; 5];
        assert_eq!(hal.get_address(Pipe::Pipe3, &mut buf), Ok(1));
        assert_eq!(buf[0], 0xC4);
    }

    #[test]
    fn status_flags_clear_on_write() {
        let mut sim = SimRadio::new();
        sim.receive(Pipe::Pipe5, &[1]);
        let mut hal = Nrf24Hal::new();
        hal.open(sim);
        let snapshot = hal.clear_irq_flags_get_status().unwrap();
        assert!(snapshot.status.irq(IrqSource::RxDataReady));
        assert_eq!(snapshot.status.rx_pipe_source(), Some(Pipe::Pipe5));
        assert!(!snapshot.fifo.rx_empty());
        assert!(!hal.get_irq_flags().unwrap().rx_dr());
    }
}
