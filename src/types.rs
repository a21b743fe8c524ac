//! This module defines the semantic values accepted and returned by the HAL.
//!
//! Each enumeration knows how to encode itself into the bits of the register
//! it configures (and how to decode those bits back), so that the rest of the
//! crate never has to spell out a bit position.

use core::{
    fmt::{Display, Formatter, Result},
    write,
};

use bitfield_struct::bitfield;

/// The primary role of the radio (the `PRIM_RX` bit in the CONFIG register).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OperationMode {
    /// Primary transmitter.
    Ptx,
    /// Primary receiver.
    Prx,
}

impl OperationMode {
    pub(crate) const fn into_bit(self) -> bool {
        matches!(self, OperationMode::Prx)
    }

    pub(crate) const fn from_bit(bit: bool) -> Self {
        if bit {
            OperationMode::Prx
        } else {
            OperationMode::Ptx
        }
    }
}

impl Display for OperationMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            OperationMode::Ptx => write!(f, "PTX"),
            OperationMode::Prx => write!(f, "PRX"),
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for OperationMode {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            OperationMode::Ptx => defmt::write!(fmt, "PTX"),
            OperationMode::Prx => defmt::write!(fmt, "PRX"),
        }
    }
}

/// The power state of the radio (the `PWR_UP` bit in the CONFIG register).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PowerMode {
    /// Sleep state; registers are retained but the radio is inactive.
    PowerDown,
    /// Standby state, ready to enter active RX or TX mode.
    PowerUp,
}

impl PowerMode {
    pub(crate) const fn into_bit(self) -> bool {
        matches!(self, PowerMode::PowerUp)
    }

    pub(crate) const fn from_bit(bit: bool) -> Self {
        if bit {
            PowerMode::PowerUp
        } else {
            PowerMode::PowerDown
        }
    }
}

impl Display for PowerMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            PowerMode::PowerDown => write!(f, "power down"),
            PowerMode::PowerUp => write!(f, "power up"),
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for PowerMode {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            PowerMode::PowerDown => defmt::write!(fmt, "power down"),
            PowerMode::PowerUp => defmt::write!(fmt, "power up"),
        }
    }
}

/// The length of a CRC checksum that is used (if any).
///
/// Cyclical Redundancy Checking (CRC) is commonly used to ensure data integrity.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CrcMode {
    /// represents no CRC checksum is used
    Off,
    /// represents CRC 8 bit checksum is used
    Bit8,
    /// represents CRC 16 bit checksum is used
    Bit16,
}

impl CrcMode {
    /// Decode the `EN_CRC` and `CRCO` bits.
    ///
    /// A cleared `EN_CRC` bit always means [`CrcMode::Off`], whatever `CRCO` holds.
    pub(crate) const fn from_bits(enabled: bool, two_bytes: bool) -> Self {
        match (enabled, two_bytes) {
            (false, _) => CrcMode::Off,
            (true, false) => CrcMode::Bit8,
            (true, true) => CrcMode::Bit16,
        }
    }
}

impl Display for CrcMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            CrcMode::Off => write!(f, "disabled"),
            CrcMode::Bit8 => write!(f, "8 bit"),
            CrcMode::Bit16 => write!(f, "16 bit"),
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for CrcMode {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            CrcMode::Off => defmt::write!(fmt, "disabled"),
            CrcMode::Bit8 => defmt::write!(fmt, "8 bit"),
            CrcMode::Bit16 => defmt::write!(fmt, "16 bit"),
        }
    }
}

/// How fast data moves through the air. Units are in bits per second (bps).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DataRate {
    /// represents 250 Kbps
    Kbps250,
    /// represents 1 Mbps
    Mbps1,
    /// represents 2 Mbps
    Mbps2,
}

impl DataRate {
    /// Encode as the (`RF_DR_LOW`, `RF_DR_HIGH`) bit pair.
    pub(crate) const fn into_bits(self) -> (bool, bool) {
        match self {
            DataRate::Kbps250 => (true, false),
            DataRate::Mbps1 => (false, false),
            DataRate::Mbps2 => (false, true),
        }
    }

    /// Decode the (`RF_DR_LOW`, `RF_DR_HIGH`) bit pair.
    ///
    /// The reserved combination (both bits set) is reported as [`DataRate::Mbps2`].
    pub(crate) const fn from_bits(low: bool, high: bool) -> Self {
        match (low, high) {
            (true, false) => DataRate::Kbps250,
            (false, false) => DataRate::Mbps1,
            _ => DataRate::Mbps2,
        }
    }
}

impl Display for DataRate {
    fn fmt(&self, f: &mut Formatter) -> Result {
        match self {
            DataRate::Kbps250 => write!(f, "250 Kbps"),
            DataRate::Mbps1 => write!(f, "1 Mbps"),
            DataRate::Mbps2 => write!(f, "2 Mbps"),
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for DataRate {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            DataRate::Kbps250 => defmt::write!(fmt, "250 Kbps"),
            DataRate::Mbps1 => defmt::write!(fmt, "1 Mbps"),
            DataRate::Mbps2 => defmt::write!(fmt, "2 Mbps"),
        }
    }
}

/// Output power of the power amplifier, in dBm (decibel-milliwatts).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputPower {
    /// -18 dBm
    Min,
    /// -12 dBm
    Low,
    /// -6 dBm
    High,
    /// 0 dBm
    Max,
}

impl OutputPower {
    pub(crate) const fn into_bits(self) -> u8 {
        match self {
            OutputPower::Min => 0,
            OutputPower::Low => 1,
            OutputPower::High => 2,
            OutputPower::Max => 3,
        }
    }

    pub(crate) const fn from_bits(value: u8) -> Self {
        match value & 3 {
            0 => OutputPower::Min,
            1 => OutputPower::Low,
            2 => OutputPower::High,
            _ => OutputPower::Max,
        }
    }
}

impl Display for OutputPower {
    fn fmt(&self, f: &mut Formatter) -> Result {
        match self {
            OutputPower::Min => write!(f, "-18 dBm"),
            OutputPower::Low => write!(f, "-12 dBm"),
            OutputPower::High => write!(f, "-6 dBm"),
            OutputPower::Max => write!(f, "0 dBm"),
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for OutputPower {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            OutputPower::Min => defmt::write!(fmt, "-18 dBm"),
            OutputPower::Low => defmt::write!(fmt, "-12 dBm"),
            OutputPower::High => defmt::write!(fmt, "-6 dBm"),
            OutputPower::Max => defmt::write!(fmt, "0 dBm"),
        }
    }
}

/// The radio's interrupt sources.
///
/// The discriminant is the bit position shared by the STATUS register (event flag)
/// and the CONFIG register (event mask).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IrqSource {
    /// Maximum number of retransmits reached (aka "TX Data Failed").
    MaxRetransmits = 4,
    /// TX Data Sent.
    TxDataSent = 5,
    /// RX Data Ready.
    RxDataReady = 6,
}

impl IrqSource {
    pub(crate) const fn mask(self) -> u8 {
        1 << self as u8
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for IrqSource {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            IrqSource::MaxRetransmits => defmt::write!(fmt, "max_rt"),
            IrqSource::TxDataSent => defmt::write!(fmt, "tx_ds"),
            IrqSource::RxDataReady => defmt::write!(fmt, "rx_dr"),
        }
    }
}

/// A data pipe, or one of the two sentinels [`Pipe::Tx`] and [`Pipe::All`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Pipe {
    Pipe0,
    Pipe1,
    Pipe2,
    Pipe3,
    Pipe4,
    Pipe5,
    /// The transmit address.
    Tx,
    /// Every RX pipe at once.
    All,
}

impl Pipe {
    /// The RX pipes in numerical order.
    pub const RX: [Pipe; 6] = [
        Pipe::Pipe0,
        Pipe::Pipe1,
        Pipe::Pipe2,
        Pipe::Pipe3,
        Pipe::Pipe4,
        Pipe::Pipe5,
    ];

    /// The pipe number (0-5) of an RX pipe, or `None` for [`Pipe::Tx`] and [`Pipe::All`].
    pub const fn index(self) -> Option<u8> {
        match self {
            Pipe::Pipe0 => Some(0),
            Pipe::Pipe1 => Some(1),
            Pipe::Pipe2 => Some(2),
            Pipe::Pipe3 => Some(3),
            Pipe::Pipe4 => Some(4),
            Pipe::Pipe5 => Some(5),
            Pipe::Tx | Pipe::All => None,
        }
    }

    /// The identifier the chip uses for this pipe: 0-5 for RX pipes, 6 for TX.
    ///
    /// [`Pipe::All`] has no chip identifier and maps to `0xFF`.
    pub const fn id(self) -> u8 {
        match self.index() {
            Some(n) => n,
            None => match self {
                Pipe::Tx => 6,
                _ => 0xFF,
            },
        }
    }

    /// Look up an RX pipe by its number. Anything above 5 yields `None`.
    pub const fn from_index(index: u8) -> Option<Self> {
        if index < 6 {
            Some(Self::RX[index as usize])
        } else {
            None
        }
    }
}

impl Display for Pipe {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self.index() {
            Some(n) => write!(f, "pipe {n}"),
            None if *self == Pipe::Tx => write!(f, "TX"),
            None => write!(f, "all pipes"),
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Pipe {
    fn format(&self, fmt: defmt::Formatter) {
        match self.index() {
            Some(n) => defmt::write!(fmt, "pipe {}", n),
            None if *self == Pipe::Tx => defmt::write!(fmt, "TX"),
            None => defmt::write!(fmt, "all pipes"),
        }
    }
}

/// Length of the on-air address, shared by all pipes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AddressWidth {
    Bytes3,
    Bytes4,
    Bytes5,
}

impl AddressWidth {
    /// Number of address bytes.
    pub const fn len(self) -> u8 {
        match self {
            AddressWidth::Bytes3 => 3,
            AddressWidth::Bytes4 => 4,
            AddressWidth::Bytes5 => 5,
        }
    }

    /// The 2-bit offset stored in the SETUP_AW register (`len() - 2`).
    pub(crate) const fn into_bits(self) -> u8 {
        self.len() - 2
    }
}

impl TryFrom<u8> for AddressWidth {
    type Error = u8;

    fn try_from(value: u8) -> core::result::Result<Self, Self::Error> {
        match value {
            3 => Ok(AddressWidth::Bytes3),
            4 => Ok(AddressWidth::Bytes4),
            5 => Ok(AddressWidth::Bytes5),
            other => Err(other),
        }
    }
}

/// The possible states of a FIFO.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FifoState {
    /// Represent the state of a FIFO when it is full.
    Full,
    /// Represent the state of a FIFO when it is empty.
    Empty,
    /// Represent the state of a FIFO when it is not full but not empty either.
    Occupied,
}

impl FifoState {
    pub(crate) const fn from_bits(full: bool, empty: bool) -> Self {
        match (full, empty) {
            (true, false) => FifoState::Full,
            (false, true) => FifoState::Empty,
            _ => FifoState::Occupied,
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for FifoState {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            FifoState::Empty => defmt::write!(fmt, "Empty"),
            FifoState::Full => defmt::write!(fmt, "Full"),
            FifoState::Occupied => defmt::write!(fmt, "Occupied"),
        }
    }
}

impl Display for FifoState {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            FifoState::Empty => write!(f, "Empty"),
            FifoState::Full => write!(f, "Full"),
            FifoState::Occupied => write!(f, "Occupied"),
        }
    }
}

/// The STATUS register: IRQ event flags, the pipe of the next RX payload
/// and the TX FIFO full flag.
///
/// The chip shifts this register out as the first byte of every transaction.
#[bitfield(u8, order = Msb)]
#[derive(PartialEq, Eq)]
pub struct StatusFlags {
    #[bits(1)]
    _reserved: u8,

    /// RX Data Ready.
    #[bits(1, access = RO)]
    pub rx_dr: bool,

    /// TX Data Sent.
    #[bits(1, access = RO)]
    pub tx_ds: bool,

    /// Maximum number of retransmits reached.
    #[bits(1, access = RO)]
    pub max_rt: bool,

    /// Pipe number of the payload at the head of the RX FIFO; 7 when it is empty.
    #[bits(3, access = RO)]
    pub rx_pipe: u8,

    /// TX FIFO full flag.
    #[bits(1, access = RO)]
    pub tx_full: bool,
}

impl StatusFlags {
    /// A mask to isolate only the IRQ flags. Useful for STATUS and CONFIG registers.
    pub const IRQ_MASK: u8 = 0x70;

    /// A mask to isolate the RX pipe source field.
    pub const RX_PIPE_MASK: u8 = 0x0E;

    /// The [`StatusFlags::rx_pipe`] value reported for an empty RX FIFO.
    pub const RX_EMPTY: u8 = 7;

    /// Is the event from `source` latched?
    pub const fn irq(&self, source: IrqSource) -> bool {
        self.into_bits() & source.mask() != 0
    }

    /// The pipe that received the payload at the head of the RX FIFO, if any.
    ///
    /// Only valid until the IRQ flags are cleared.
    pub const fn rx_pipe_source(&self) -> Option<Pipe> {
        Pipe::from_index(self.rx_pipe())
    }

    /// Keep only the IRQ event flags.
    ///
    /// The RX pipe field is set to [`StatusFlags::RX_EMPTY`], so the result never
    /// names a pipe.
    pub const fn irq_only(self) -> Self {
        Self::from_bits((self.into_bits() & Self::IRQ_MASK) | (Self::RX_EMPTY << 1))
    }
}

impl Display for StatusFlags {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(
            f,
            "StatusFlags rx_dr: {}, tx_ds: {}, max_rt: {}, rx_pipe: {}, tx_full: {}",
            self.rx_dr(),
            self.tx_ds(),
            self.max_rt(),
            self.rx_pipe(),
            self.tx_full()
        )
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for StatusFlags {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(
            fmt,
            "StatusFlags rx_dr: {}, tx_ds: {}, max_rt: {}, rx_pipe: {}",
            self.rx_dr(),
            self.tx_ds(),
            self.max_rt(),
            self.rx_pipe()
        )
    }
}

/// The FIFO_STATUS register.
#[bitfield(u8, order = Msb)]
#[derive(PartialEq, Eq)]
pub struct FifoStatus {
    #[bits(1)]
    _reserved: u8,

    /// The last transmitted payload is reused while CE is held high.
    #[bits(1, access = RO)]
    pub tx_reuse: bool,

    #[bits(1, access = RO)]
    pub tx_full: bool,

    #[bits(1, access = RO)]
    pub tx_empty: bool,

    #[bits(2)]
    _reserved2: u8,

    #[bits(1, access = RO)]
    pub rx_full: bool,

    #[bits(1, access = RO)]
    pub rx_empty: bool,
}

impl FifoStatus {
    pub const fn tx_state(&self) -> FifoState {
        FifoState::from_bits(self.tx_full(), self.tx_empty())
    }

    pub const fn rx_state(&self) -> FifoState {
        FifoState::from_bits(self.rx_full(), self.rx_empty())
    }
}

impl Display for FifoStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(
            f,
            "FifoStatus tx: {}, rx: {}, tx_reuse: {}",
            self.tx_state(),
            self.rx_state(),
            self.tx_reuse()
        )
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for FifoStatus {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(
            fmt,
            "FifoStatus tx: {}, rx: {}, tx_reuse: {}",
            self.tx_state(),
            self.rx_state(),
            self.tx_reuse()
        )
    }
}

/// The OBSERVE_TX register: lost packet and retransmit counters.
#[bitfield(u8, order = Msb)]
#[derive(PartialEq, Eq)]
pub struct ObserveTx {
    /// Lost packets; saturates at 15 and resets when the RF channel is written.
    #[bits(4, access = RO)]
    pub plos_cnt: u8,

    /// Retransmissions of the current packet; resets with each new payload.
    #[bits(4, access = RO)]
    pub arc_cnt: u8,
}

/// The result of [`Nrf24Hal::clear_irq_flags_get_status()`](fn@crate::hal::Nrf24Hal::clear_irq_flags_get_status).
///
/// `status` holds the IRQ flags and RX pipe source as they were *before* the clear.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StatusSnapshot {
    pub status: StatusFlags,
    pub fifo: FifoStatus,
}

#[cfg(feature = "defmt")]
impl defmt::Format for StatusSnapshot {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(fmt, "{} {}", self.status, self.fifo)
    }
}

/// Enabled and auto-ack state of one RX pipe.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PipeStatus {
    /// The pipe's bit in EN_RXADDR.
    pub enabled: bool,
    /// The pipe's bit in EN_AA.
    pub auto_ack: bool,
}

impl PipeStatus {
    /// Packed as `auto_ack << 1 | enabled`.
    pub const fn into_bits(self) -> u8 {
        ((self.auto_ack as u8) << 1) | self.enabled as u8
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for PipeStatus {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(
            fmt,
            "PipeStatus enabled: {}, auto_ack: {}",
            self.enabled,
            self.auto_ack
        )
    }
}
