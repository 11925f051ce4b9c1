use bitfield::bitfield;
use embedded_hal::{delay::DelayNs, i2c};

use crate::DeviceSetupConfig;

use super::HD44780AdapterTrait;

// GPIO byte of the common PCF8574T backpack. Data lines D4-D7 sit on P4-P7.
bitfield! {
    pub struct GenericPCF8574TBitField(u8);
    impl Debug;
    pub rs, set_rs: 0, 0;
    pub rw, set_rw: 1, 1;
    pub enable, set_enable: 2, 2;
    pub backlight, set_backlight: 3, 3;
    pub data, set_data: 7, 4;
}

impl Clone for GenericPCF8574TBitField {
    fn clone(&self) -> Self {
        Self(self.0)
    }
}

/// Adapter based on the PCF8574T I2C GPIO expander interfacing with the HD44780 LCD controller
/// via a 4-bit interface. The backlight starts out on.
pub struct GenericPCF8574TAdapter<I2C, DELAY>
where
    I2C: i2c::I2c,
    DELAY: DelayNs,
{
    bits: GenericPCF8574TBitField,
    config: DeviceSetupConfig<I2C, DELAY>,
}

impl<I2C, DELAY> HD44780AdapterTrait<I2C, DELAY> for GenericPCF8574TAdapter<I2C, DELAY>
where
    I2C: i2c::I2c,
    DELAY: DelayNs,
{
    fn new(config: DeviceSetupConfig<I2C, DELAY>) -> Self {
        let mut bits = GenericPCF8574TBitField(0);
        bits.set_backlight(1);
        Self { bits, config }
    }

    fn default_i2c_address() -> u8 {
        0x27
    }

    fn device_config(&mut self) -> &mut DeviceSetupConfig<I2C, DELAY> {
        &mut self.config
    }

    fn release(self) -> DeviceSetupConfig<I2C, DELAY> {
        self.config
    }

    fn bits(&self) -> u8 {
        self.bits.0
    }

    fn set_rs(&mut self, value: bool) {
        self.bits.set_rs(value as u8);
    }

    fn set_rw(&mut self, value: bool) {
        self.bits.set_rw(value as u8);
    }

    fn set_enable(&mut self, value: bool) {
        self.bits.set_enable(value as u8);
    }

    fn set_backlight(&mut self, value: bool) {
        self.bits.set_backlight(value as u8);
    }

    fn backlight(&self) -> bool {
        self.bits.backlight() != 0
    }

    fn set_data(&mut self, value: u8) {
        self.bits.set_data(value);
    }
}

#[cfg(test)]
mod tests {
    extern crate std;
    use crate::DeviceSetupConfig;

    use super::*;
    use embedded_hal::i2c::ErrorKind;
    use embedded_hal_mock::eh1::{
        delay::NoopDelay,
        i2c::{Mock as I2cMock, Transaction as I2cTransaction},
    };

    fn adapter(
        expected: &[I2cTransaction],
    ) -> GenericPCF8574TAdapter<I2cMock, NoopDelay> {
        GenericPCF8574TAdapter::new(DeviceSetupConfig {
            i2c: I2cMock::new(expected),
            address: 0x27,
            delay: NoopDelay::new(),
        })
    }

    #[test]
    fn test_generic_pcf8574t_bits() {
        let mut device = adapter(&[]);
        assert_eq!(device.bits(), 0b0000_1000); // backlight starts on
        assert!(device.backlight());

        device.set_rs(true);
        device.set_rw(false);
        device.set_enable(true);
        device.set_data(0b1010);
        assert_eq!(device.bits(), 0b1010_1101);

        device.set_rs(false);
        device.set_rw(true);
        device.set_enable(false);
        device.set_data(0b0101);
        device.set_backlight(false);
        assert_eq!(device.bits(), 0b0101_0010);
        assert!(!device.backlight());

        assert_eq!(
            GenericPCF8574TAdapter::<I2cMock, NoopDelay>::default_i2c_address(),
            0x27
        );
        device.release().i2c.done();
    }

    #[test]
    fn test_generic_pcf8574t_set_backlight_does_not_write() {
        let mut device = adapter(&[]);
        device.set_backlight(false);
        device.set_backlight(true);
        device.set_backlight(false);
        // the mock has no expectations, so any write would fail here
        device.release().i2c.done();
    }

    #[test]
    fn test_generic_pcf8574t_write_byte() {
        let expected_transactions = [
            // write byte 0xDE with RS = 1
            I2cTransaction::write(0x27, std::vec![0b1101_1101]), // high nibble, bl = 1, enable = 1, rs = 1
            I2cTransaction::write(0x27, std::vec![0b1101_1001]), // high nibble, bl = 1, enable = 0, rs = 1
            I2cTransaction::write(0x27, std::vec![0b1110_1101]), // low nibble, bl = 1, enable = 1, rs = 1
            I2cTransaction::write(0x27, std::vec![0b1110_1001]), // low nibble, bl = 1, enable = 0, rs = 1
            // write byte 0xAD with RS = 0
            I2cTransaction::write(0x27, std::vec![0b1010_1100]), // high nibble, bl = 1, enable = 1, rs = 0
            I2cTransaction::write(0x27, std::vec![0b1010_1000]), // high nibble, bl = 1, enable = 0, rs = 0
            I2cTransaction::write(0x27, std::vec![0b1101_1100]), // low nibble, bl = 1, enable = 1, rs = 0
            I2cTransaction::write(0x27, std::vec![0b1101_1000]), // low nibble, bl = 1, enable = 0, rs = 0
        ];
        let mut device = adapter(&expected_transactions);

        assert!(device.write_byte(true, 0xDE).is_ok());
        assert!(device.write_byte(false, 0xAD).is_ok());
        device.release().i2c.done();
    }

    #[test]
    fn test_generic_pcf8574t_write_nibble_ignores_high_bits() {
        let expected_transactions = [
            I2cTransaction::write(0x3F, std::vec![0b0011_0100]), // nibble 0x3, bl = 0, enable = 1
            I2cTransaction::write(0x3F, std::vec![0b0011_0000]), // nibble 0x3, bl = 0, enable = 0
        ];
        let mut device = GenericPCF8574TAdapter::new(DeviceSetupConfig {
            i2c: I2cMock::new(&expected_transactions),
            address: 0x3F,
            delay: NoopDelay::new(),
        });
        device.set_backlight(false);

        assert!(device.write_nibble(false, 0xF3).is_ok());
        device.release().i2c.done();
    }

    #[test]
    fn test_generic_pcf8574t_write_stops_on_error() {
        let expected_transactions = [
            I2cTransaction::write(0x27, std::vec![0b0100_1101]),
            I2cTransaction::write(0x27, std::vec![0b0100_1001]),
            I2cTransaction::write(0x27, std::vec![0b0001_1101]).with_error(ErrorKind::Other),
        ];
        let mut device = adapter(&expected_transactions);

        let result = device.write_byte(true, 0x41);
        assert!(matches!(
            result,
            Err(crate::DisplayError::BusWriteFailure(ErrorKind::Other))
        ));
        device.release().i2c.done();
    }
}
