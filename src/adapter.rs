pub mod generic_pcf8574t;

use embedded_hal::{delay::DelayNs, i2c};

use crate::{DeviceSetupConfig, DisplayError};

/// Time the enable line is held in each state. The falling edge latches the nibble, so the
/// same settle is applied after both writes of a cycle.
pub const ENABLE_SETTLE_US: u32 = 500;

/// Trait for implementing an I2C backpack adapter for a HD44780 controller. Assumes the controller
/// is wired for its 4 bit interface and the adapter exposes RS, RW, enable and backlight on the
/// same GPIO byte as the four data lines, so every bus write is one byte.
///
/// The adapter owns the bus, the delay and the pin state. The backlight pin is the only piece of
/// controller state held locally; it is merged into every byte written.
pub trait HD44780AdapterTrait<I2C, DELAY>
where
    I2C: i2c::I2c,
    DELAY: DelayNs,
{
    fn new(config: DeviceSetupConfig<I2C, DELAY>) -> Self;

    /// Returns the default I2C address for the adapter
    fn default_i2c_address() -> u8;

    fn device_config(&mut self) -> &mut DeviceSetupConfig<I2C, DELAY>;

    /// Gives back the bus and delay. Nothing is sent to the device.
    fn release(self) -> DeviceSetupConfig<I2C, DELAY>;

    /// Returns the GPIO byte for the current pin state
    fn bits(&self) -> u8;

    /// Sets the RS pin. `false` selects the instruction register, `true` the data register.
    fn set_rs(&mut self, value: bool);

    /// Sets the RW pin. Only writes are performed, so this is always driven `false`.
    fn set_rw(&mut self, value: bool);

    fn set_enable(&mut self, value: bool);

    /// Sets the backlight pin. Takes effect with the next byte written to the bus.
    fn set_backlight(&mut self, value: bool);

    fn backlight(&self) -> bool;

    /// Sets the four data lines from the low nibble of `value`
    fn set_data(&mut self, value: u8);

    fn write_bits_to_gpio(&mut self) -> Result<(), DisplayError<I2C>> {
        let data = [self.bits()];
        let config = self.device_config();
        config
            .i2c
            .write(config.address, &data)
            .map_err(DisplayError::BusWriteFailure)?;
        Ok(())
    }

    /// writes a full byte as two nibbles, high nibble first. If `rs_setting` is `true`, the byte goes to
    /// the data register (CGRAM or DDRAM, depending on the last address set). If `rs_setting` is `false`,
    /// it goes to the instruction register.
    fn write_byte(&mut self, rs_setting: bool, value: u8) -> Result<(), DisplayError<I2C>> {
        self.write_nibble(rs_setting, value >> 4)?;
        self.write_nibble(rs_setting, value & 0x0F)
    }

    /// writes the lower nibble of `value` as one enable cycle. Used on its own only during
    /// initialization, while the controller may still be in 8 bit mode.
    fn write_nibble(&mut self, rs_setting: bool, value: u8) -> Result<(), DisplayError<I2C>> {
        self.set_rs(rs_setting);
        self.set_rw(false);
        self.set_data(value & 0x0F);

        self.set_enable(true);
        self.write_bits_to_gpio()?;
        self.device_config().delay.delay_us(ENABLE_SETTLE_US);

        self.set_enable(false);
        self.write_bits_to_gpio()?;
        self.device_config().delay.delay_us(ENABLE_SETTLE_US);

        Ok(())
    }
}
