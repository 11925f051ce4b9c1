//! Power-on bring-up of the HD44780 in 4 bit mode, following the "initializing by instruction"
//! procedure of the datasheet (figure 24). The sequence is fixed apart from the line count and
//! is kept as data so the bus traffic is independent of the timing.

use embedded_hal::{delay::DelayNs, i2c};

use crate::{
    adapter::HD44780AdapterTrait,
    instruction::{
        display_control, function_set, LCD_CMD_CLEARDISPLAY, LCD_CMD_ENTRYMODESET,
        LCD_FLAG_ENTRYINCREMENT, NIBBLE_FUNCTIONSET_4BIT, NIBBLE_FUNCTIONSET_8BIT,
    },
    DisplayError,
};

/// Power-on settle before the first write.
pub const POWER_ON_DELAY_US: u32 = 40_000;
/// Wait after the first 8 bit function set.
pub const FIRST_FUNCTIONSET_DELAY_US: u32 = 5_000;
/// Wait after the second 8 bit function set.
pub const SECOND_FUNCTIONSET_DELAY_US: u32 = 150;
/// Clear display takes up to 1.53 ms.
pub const CLEAR_DISPLAY_DELAY_US: u32 = 2_000;

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum InitStep {
    /// Block for the given number of microseconds.
    Wait(u32),
    /// A single enable cycle carrying only the low nibble, for while the controller may be in 8 bit mode.
    Nibble(u8),
    /// A full instruction byte sent as two nibbles.
    Instruction(u8),
}

pub const INIT_STEP_COUNT: usize = 12;

pub const fn init_sequence(single_line: bool) -> [InitStep; INIT_STEP_COUNT] {
    [
        InitStep::Wait(POWER_ON_DELAY_US),
        // three 8 bit function sets recover the controller from any state
        InitStep::Nibble(NIBBLE_FUNCTIONSET_8BIT),
        InitStep::Wait(FIRST_FUNCTIONSET_DELAY_US),
        InitStep::Nibble(NIBBLE_FUNCTIONSET_8BIT),
        InitStep::Wait(SECOND_FUNCTIONSET_DELAY_US),
        InitStep::Nibble(NIBBLE_FUNCTIONSET_8BIT),
        // switch to 4 bit, every instruction after this is two nibbles
        InitStep::Nibble(NIBBLE_FUNCTIONSET_4BIT),
        InitStep::Instruction(function_set(single_line)),
        InitStep::Instruction(display_control(true, false, false)),
        InitStep::Instruction(LCD_CMD_CLEARDISPLAY),
        InitStep::Wait(CLEAR_DISPLAY_DELAY_US),
        InitStep::Instruction(LCD_CMD_ENTRYMODESET | LCD_FLAG_ENTRYINCREMENT),
    ]
}

/// Runs the bring-up sequence. Stops at the first bus error.
pub fn init<I2C, DELAY, DEVICE>(device: &mut DEVICE, single_line: bool) -> Result<(), DisplayError<I2C>>
where
    I2C: i2c::I2c,
    DELAY: DelayNs,
    DEVICE: HD44780AdapterTrait<I2C, DELAY>,
{
    #[cfg(feature = "defmt")]
    defmt::debug!("Initializing HD44780, single line: {}", single_line);

    for step in init_sequence(single_line) {
        match step {
            InitStep::Wait(us) => device.device_config().delay.delay_us(us),
            InitStep::Nibble(nibble) => device.write_nibble(false, nibble)?,
            InitStep::Instruction(cmd) => device.write_byte(false, cmd)?,
        }
    }
    Ok(())
}
