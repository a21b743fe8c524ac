/// Register addresses of the nRF24L01.
pub mod registers {
    pub const CONFIG: u8 = 0x00;
    pub const EN_AA: u8 = 0x01;
    pub const EN_RXADDR: u8 = 0x02;
    pub const SETUP_AW: u8 = 0x03;
    pub const SETUP_RETR: u8 = 0x04;
    pub const RF_CH: u8 = 0x05;
    pub const RF_SETUP: u8 = 0x06;
    pub const STATUS: u8 = 0x07;
    pub const OBSERVE_TX: u8 = 0x08;
    /// Carrier detect on the nRF24L01, received power detector on the nRF24L01+.
    pub const CD: u8 = 0x09;
    pub const RX_ADDR_P0: u8 = 0x0A;
    pub const TX_ADDR: u8 = 0x10;
    pub const RX_PW_P0: u8 = 0x11;
    pub const FIFO_STATUS: u8 = 0x17;
    pub const DYNPD: u8 = 0x1C;
    pub const FEATURE: u8 = 0x1D;
}

/// SPI command words.
pub mod commands {
    pub const R_REGISTER: u8 = 0x00;
    pub const W_REGISTER: u8 = 0x20;
    pub const R_RX_PL_WID: u8 = 0x60;
    pub const R_RX_PAYLOAD: u8 = 0x61;
    pub const W_TX_PAYLOAD: u8 = 0xA0;
    pub const W_TX_PAYLOAD_NO_ACK: u8 = 0xB0;
    pub const W_ACK_PAYLOAD: u8 = 0xA8;
    pub const FLUSH_TX: u8 = 0xE1;
    pub const FLUSH_RX: u8 = 0xE2;
    pub const REUSE_TX_PL: u8 = 0xE3;
    pub const NOP: u8 = 0xFF;
}

/// Bit masks shared by several registers.
pub mod mnemonics {
    pub const MASK_RX_DR: u8 = 1 << 6;
    pub const MASK_TX_DS: u8 = 1 << 5;
    pub const MASK_MAX_RT: u8 = 1 << 4;
    /// Bits 6 and 7 of EN_AA, EN_RXADDR and DYNPD do not belong to any pipe.
    pub const PIPE_MASK: u8 = 0x3F;
    /// Largest payload the FIFOs hold.
    pub const MAX_PAYLOAD: usize = 32;
}

/// How many bytes a register transfers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RegisterWidth {
    /// One byte.
    Single,
    /// As many bytes as the SETUP_AW register says (3 to 5).
    Address,
}

/// The closed table of the radio's registers.
///
/// Each entry knows its address and its transfer width; the bit layout of the
/// registers that hold more than one value lives in [`bit_fields`](super::bit_fields).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Register {
    Config,
    EnAa,
    EnRxAddr,
    SetupAw,
    SetupRetr,
    RfCh,
    RfSetup,
    Status,
    ObserveTx,
    Cd,
    /// RX address of pipe `n` (0-5).
    RxAddr(u8),
    TxAddr,
    /// RX payload width of pipe `n` (0-5).
    RxPw(u8),
    FifoStatus,
    Dynpd,
    Feature,
}

impl Register {
    pub const fn address(self) -> u8 {
        match self {
            Register::Config => registers::CONFIG,
            Register::EnAa => registers::EN_AA,
            Register::EnRxAddr => registers::EN_RXADDR,
            Register::SetupAw => registers::SETUP_AW,
            Register::SetupRetr => registers::SETUP_RETR,
            Register::RfCh => registers::RF_CH,
            Register::RfSetup => registers::RF_SETUP,
            Register::Status => registers::STATUS,
            Register::ObserveTx => registers::OBSERVE_TX,
            Register::Cd => registers::CD,
            Register::RxAddr(n) => registers::RX_ADDR_P0 + (n % 6),
            Register::TxAddr => registers::TX_ADDR,
            Register::RxPw(n) => registers::RX_PW_P0 + (n % 6),
            Register::FifoStatus => registers::FIFO_STATUS,
            Register::Dynpd => registers::DYNPD,
            Register::Feature => registers::FEATURE,
        }
    }

    pub const fn width(self) -> RegisterWidth {
        match self {
            Register::RxAddr(0) | Register::RxAddr(1) | Register::TxAddr => {
                RegisterWidth::Address
            }
            _ => RegisterWidth::Single,
        }
    }
}
