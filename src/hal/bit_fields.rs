use bitfield_struct::bitfield;

use crate::{CrcMode, DataRate, IrqSource, OperationMode, OutputPower, PowerMode};

#[bitfield(u8, order = Msb)]
#[derive(PartialEq, Eq)]
pub(crate) struct Config {
    #[bits(1)]
    _reserved: u8,

    /// Mask the "RX Data Ready" IRQ event (set = disabled).
    pub mask_rx_dr: bool,

    /// Mask the "TX Data Sent" IRQ event (set = disabled).
    pub mask_tx_ds: bool,

    /// Mask the "max retransmits" IRQ event (set = disabled).
    pub mask_max_rt: bool,

    pub en_crc: bool,

    /// 2 byte CRC when set, 1 byte otherwise.
    pub crco: bool,

    pub pwr_up: bool,

    pub prim_rx: bool,
}

impl Config {
    pub const fn crc_mode(&self) -> CrcMode {
        CrcMode::from_bits(self.en_crc(), self.crco())
    }

    /// [`CrcMode::Off`] only clears `EN_CRC`; the size bit keeps its old value.
    pub const fn with_crc_mode(self, mode: CrcMode) -> Self {
        match mode {
            CrcMode::Off => self.with_en_crc(false),
            CrcMode::Bit8 => self.with_en_crc(true).with_crco(false),
            CrcMode::Bit16 => self.with_en_crc(true).with_crco(true),
        }
    }

    pub const fn operation_mode(&self) -> OperationMode {
        OperationMode::from_bit(self.prim_rx())
    }

    pub const fn with_operation_mode(self, mode: OperationMode) -> Self {
        self.with_prim_rx(mode.into_bit())
    }

    pub const fn power_mode(&self) -> PowerMode {
        PowerMode::from_bit(self.pwr_up())
    }

    pub const fn with_power_mode(self, mode: PowerMode) -> Self {
        self.with_pwr_up(mode.into_bit())
    }

    /// Is the interrupt from `source` reflected on the IRQ pin?
    #[cfg(test)]
    pub const fn irq_enabled(&self, source: IrqSource) -> bool {
        self.into_bits() & source.mask() == 0
    }

    /// The mask bits have inverted polarity: enabling an event clears its bit.
    pub const fn with_irq(self, source: IrqSource, enable: bool) -> Self {
        let mask = source.mask();
        Self::from_bits(self.into_bits() & !mask | ((!enable as u8) * mask))
    }
}

#[bitfield(u8, order = Msb)]
#[derive(PartialEq, Eq)]
pub(crate) struct RfSetup {
    pub cont_wave: bool,

    #[bits(1)]
    _reserved: u8,

    pub rf_dr_low: bool,

    pub pll_lock: bool,

    pub rf_dr_high: bool,

    #[bits(2)]
    pub rf_pwr: u8,

    /// LNA gain on the nRF24L01 and Si24R1, unused on the nRF24L01+.
    pub lna_hcurr: bool,
}

impl RfSetup {
    pub const fn data_rate(&self) -> DataRate {
        DataRate::from_bits(self.rf_dr_low(), self.rf_dr_high())
    }

    pub const fn with_data_rate(self, data_rate: DataRate) -> Self {
        let (low, high) = data_rate.into_bits();
        self.with_rf_dr_low(low).with_rf_dr_high(high)
    }

    pub const fn output_power(&self) -> OutputPower {
        OutputPower::from_bits(self.rf_pwr())
    }

    pub const fn with_output_power(self, power: OutputPower) -> Self {
        self.with_rf_pwr(power.into_bits())
    }
}

#[bitfield(u8, order = Msb)]
pub(crate) struct SetupRetry {
    /// Auto retransmit delay, in steps of 250 microseconds.
    #[bits(4)]
    pub ard: u8,

    /// Auto retransmit count.
    #[bits(4)]
    pub arc: u8,
}

impl SetupRetry {
    /// Pack a retransmit `count` and a `delay` given in microseconds.
    ///
    /// Only bits 8-11 of `delay` survive: the delay is quantised down to
    /// multiples of 256 us, and anything past 4095 us wraps.
    pub const fn from_parts(count: u8, delay: u16) -> Self {
        Self::new()
            .with_ard(((delay >> 8) & 0x0F) as u8)
            .with_arc(count & 0x0F)
    }
}

#[bitfield(u8, order = Msb)]
pub(crate) struct Feature {
    #[bits(5)]
    _reserved: u8,

    pub en_dpl: bool,

    pub en_ack_pay: bool,

    pub en_dyn_ack: bool,
}

#[bitfield(u8, order = Msb)]
pub(crate) struct SetupAw {
    #[bits(6)]
    _reserved: u8,

    #[bits(2)]
    pub aw: u8,
}

impl SetupAw {
    /// Address length in bytes. The undocumented offset 0 reads back as 2.
    pub const fn address_width(&self) -> u8 {
        self.aw() + 2
    }
}
