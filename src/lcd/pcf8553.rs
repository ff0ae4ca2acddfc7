//! PCF8553 segment LCD controller: register framing and SPI bus driver.
//!
//! Every transfer starts with one address byte (register in bits 0..=4,
//! R/W in bit 7, 0 = write); the controller auto-increments from there.
//! Chip enable is active low and frames one transfer, which is exactly
//! what an `embedded_hal::spi::SpiDevice` transaction provides.

use super::segments::REGISTERS;
use super::{BlinkSpeed, Transport};
use crate::config::LCD_RESET_PULSE_MS;
use crate::error::Error;
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use embedded_hal::spi::SpiDevice;

// Register map

pub const DEVICE_CTRL: u8 = 0x01;
pub const DISPLAY_CTRL_1: u8 = 0x02;
pub const DISPLAY_CTRL_2: u8 = 0x03;
/// First of the 20 segment data registers.
pub const DATA_START: u8 = 0x04;

/// Clock output off, internal oscillator off, 64 Hz frame frequency.
pub const DEVICE_CTRL_VALUE: u8 = 0x00;

/// Display enabled (the power-on default is disabled), 1/3 bias,
/// 1:4 multiplex, standard drive.
pub const DISPLAY_CTRL_1_VALUE: u8 = 0x01;

const READ: u8 = 1 << 7;

/// Address byte for a write starting at `register`.
pub const fn write_address(register: u8) -> u8 {
    register & 0x1F & !READ
}

/// Display-control-2 value: line inversion, blink mode in bits 1..=2.
pub const fn display_ctrl_2(blink: BlinkSpeed) -> u8 {
    (blink as u8) << 1
}

/// Burst that programs the three control registers at start-up.
pub fn setup_frame(blink: BlinkSpeed) -> [u8; 4] {
    [
        write_address(DEVICE_CTRL),
        DEVICE_CTRL_VALUE,
        DISPLAY_CTRL_1_VALUE,
        display_ctrl_2(blink),
    ]
}

/// Single write of the blink mode.
pub fn blink_frame(blink: BlinkSpeed) -> [u8; 2] {
    [write_address(DISPLAY_CTRL_2), display_ctrl_2(blink)]
}

/// Full segment dump in address order.
pub fn data_frame(buffer: &[u8; REGISTERS]) -> [u8; REGISTERS + 1] {
    let mut frame = [0u8; REGISTERS + 1];
    frame[0] = write_address(DATA_START);
    frame[1..].copy_from_slice(buffer);
    frame
}

/// PCF8553 on an SPI bus with a dedicated reset line.
pub struct Pcf8553Bus<SPI, RST, D> {
    spi: SPI,
    reset: RST,
    delay: D,
}

impl<SPI, RST, D> Pcf8553Bus<SPI, RST, D>
where
    SPI: SpiDevice,
    RST: OutputPin,
    D: DelayNs,
{
    pub fn new(spi: SPI, reset: RST, delay: D) -> Self {
        Self { spi, reset, delay }
    }

    pub fn release(self) -> (SPI, RST, D) {
        (self.spi, self.reset, self.delay)
    }
}

impl<SPI, RST, D> Transport for Pcf8553Bus<SPI, RST, D>
where
    SPI: SpiDevice,
    RST: OutputPin,
    D: DelayNs,
{
    fn send(&mut self, frame: &[u8]) -> Result<(), Error> {
        self.spi.write(frame).map_err(|_| Error::Transport)
    }

    /// With the internal power-on reset disabled the chip needs RST held
    /// low for at least 10 us.
    fn reset(&mut self) -> Result<(), Error> {
        self.reset.set_low().map_err(|_| Error::Reset)?;
        self.delay.delay_ms(LCD_RESET_PULSE_MS);
        self.reset.set_high().map_err(|_| Error::Reset)?;
        self.delay.delay_ms(LCD_RESET_PULSE_MS);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::convert::Infallible;
    use embedded_hal::spi::{ErrorType, Operation};

    #[derive(Default)]
    struct RecordingSpi {
        frames: std::vec::Vec<std::vec::Vec<u8>>,
    }

    impl ErrorType for RecordingSpi {
        type Error = Infallible;
    }

    impl SpiDevice for RecordingSpi {
        fn transaction(&mut self, operations: &mut [Operation<'_, u8>]) -> Result<(), Infallible> {
            let mut frame = std::vec::Vec::new();
            for op in operations.iter() {
                if let Operation::Write(bytes) = op {
                    frame.extend_from_slice(bytes);
                }
            }
            self.frames.push(frame);
            Ok(())
        }
    }

    #[derive(Default)]
    struct RecordingPin {
        levels: std::vec::Vec<bool>,
    }

    impl embedded_hal::digital::ErrorType for RecordingPin {
        type Error = Infallible;
    }

    impl OutputPin for RecordingPin {
        fn set_low(&mut self) -> Result<(), Infallible> {
            self.levels.push(false);
            Ok(())
        }

        fn set_high(&mut self) -> Result<(), Infallible> {
            self.levels.push(true);
            Ok(())
        }
    }

    #[derive(Default)]
    struct CountingDelay {
        total_ns: u64,
    }

    impl DelayNs for CountingDelay {
        fn delay_ns(&mut self, ns: u32) {
            self.total_ns += ns as u64;
        }
    }

    #[test]
    fn address_byte_is_a_write() {
        assert_eq!(write_address(DATA_START), 0x04);
        assert_eq!(write_address(DEVICE_CTRL), 0x01);
        assert_eq!(write_address(0xFF) & READ, 0);
    }

    #[test]
    fn blink_bits_sit_above_inversion() {
        assert_eq!(display_ctrl_2(BlinkSpeed::Off), 0b000);
        assert_eq!(display_ctrl_2(BlinkSpeed::Low), 0b010);
        assert_eq!(display_ctrl_2(BlinkSpeed::Medium), 0b100);
        assert_eq!(display_ctrl_2(BlinkSpeed::High), 0b110);
    }

    #[test]
    fn setup_frame_enables_display() {
        assert_eq!(setup_frame(BlinkSpeed::Off), [0x01, 0x00, 0x01, 0x00]);
    }

    #[test]
    fn data_frame_prefixes_address() {
        let mut buf = [0u8; REGISTERS];
        buf[0] = 0xAA;
        buf[19] = 0x55;
        let frame = data_frame(&buf);
        assert_eq!(frame.len(), 21);
        assert_eq!(frame[0], DATA_START);
        assert_eq!(frame[1], 0xAA);
        assert_eq!(frame[20], 0x55);
    }

    #[test]
    fn bus_sends_each_frame_in_one_transaction() {
        let mut bus = Pcf8553Bus::new(
            RecordingSpi::default(),
            RecordingPin::default(),
            CountingDelay::default(),
        );
        bus.send(&blink_frame(BlinkSpeed::High)).unwrap();
        bus.send(&data_frame(&[0xFF; REGISTERS])).unwrap();
        let (spi, _, _) = bus.release();
        assert_eq!(spi.frames.len(), 2);
        assert_eq!(spi.frames[0], [0x03, 0b110]);
        assert_eq!(spi.frames[1].len(), 21);
    }

    #[test]
    fn reset_pulses_low_then_high() {
        let mut bus = Pcf8553Bus::new(
            RecordingSpi::default(),
            RecordingPin::default(),
            CountingDelay::default(),
        );
        bus.reset().unwrap();
        let (_, pin, delay) = bus.release();
        assert_eq!(pin.levels, [false, true]);
        assert!(delay.total_ns >= LCD_RESET_PULSE_MS as u64 * 1_000_000);
    }
}
