//! This Rust `embedded-hal`-based library drives a [HD44780](https://en.wikipedia.org/wiki/Hitachi_HD44780_LCD_controller)
//! compatible character display through a PCF8574T "I2C backpack" in an embedded, `no_std` environment.
//!
//! The PCF8574T exposes eight GPIO pins as a single I2C byte. On the common backpacks the low four pins
//! carry the register-select, read/write, enable and backlight lines and the high four pins are wired to the
//! D4-D7 data lines of the display, so the controller runs in its 4-bit mode and every byte is sent as two
//! enable-pulsed nibbles.
//!
//! Key features include:
//! - Instruction and data writes, printing text, cursor positioning, display shifting and clearing
//! - Loading a full set of 8 custom characters, or a single one
//! - Backlight control, applied with the next byte sent to the display
//! - `core::fmt::Write` implementation for easy use with the `write!` macro
//! - Compatible with the `embedded-hal` traits v1.0 and later
//! - Optional support for the `defmt` and `ufmt` frameworks
//!
//! ## Usage
//! ```rust
//! use hd44780_i2c_backpack::CharacterDisplayPCF8574T;
//!
//! // board setup
//! let i2c = ...; // I2C peripheral
//! let delay = ...; // DelayNs implementation
//!
//! // the display is initialized before `new` returns. `false` selects the two line mode
//! let mut lcd = CharacterDisplayPCF8574T::new(i2c, false, delay)?;
//! lcd.goto(0, 0)?.print("Hello, world!")?;
//!
//! use core::fmt::Write;
//! lcd.goto(1, 0)?;
//! write!(lcd, "temp: {}", 21)?;
//! ```
//!
//! No status is ever read back from the controller. All timing is met with fixed delays from the
//! `DelayNs` implementation passed in, and the only state kept by the driver is the backlight setting.
//! The driver expects to be the only writer to the backpack's address; share it between threads by
//! wrapping the whole display in a mutex.
//!
#![no_std]

pub mod adapter;
pub mod init;
pub mod instruction;

use core::{fmt::Display, marker::PhantomData};

use embedded_hal::{delay::DelayNs, i2c};

use adapter::{generic_pcf8574t::GenericPCF8574TAdapter, HD44780AdapterTrait};
use instruction::{
    cursor_shift, display_control, set_cgram_address, set_ddram_address, LCD_CMD_CLEARDISPLAY,
    LCD_CMD_RETURNHOME,
};

/// HD44780 based character display using a generic PCF8574T I2C adapter.
pub type CharacterDisplayPCF8574T<I2C, DELAY> =
    CharacterDisplay<I2C, DELAY, GenericPCF8574TAdapter<I2C, DELAY>>;

/// A full CGRAM load: 8 glyphs of 8 rows each. Only the low 5 bits of each row are displayed.
pub type CustomChars = [[u8; 8]; 8];

#[derive(Debug, PartialEq, Copy, Clone)]
/// Errors that can occur when using the display
pub enum DisplayError<I2C>
where
    I2C: i2c::I2c,
{
    /// Write to the backpack failed. Carries the error from the underlying I2C implementation.
    BusWriteFailure(I2C::Error),
}

impl<I2C> From<&DisplayError<I2C>> for &'static str
where
    I2C: i2c::I2c,
{
    fn from(err: &DisplayError<I2C>) -> Self {
        match err {
            DisplayError::BusWriteFailure(_) => "I2C bus write failure",
        }
    }
}

#[cfg(feature = "defmt")]
impl<I2C> defmt::Format for DisplayError<I2C>
where
    I2C: i2c::I2c,
{
    fn format(&self, fmt: defmt::Formatter) {
        let msg: &'static str = From::from(self);
        defmt::write!(fmt, "{}", msg);
    }
}

#[cfg(feature = "ufmt")]
impl<I2C> ufmt::uDisplay for DisplayError<I2C>
where
    I2C: i2c::I2c,
{
    fn fmt<W>(&self, w: &mut ufmt::Formatter<'_, W>) -> Result<(), W::Error>
    where
        W: ufmt::uWrite + ?Sized,
    {
        let msg: &'static str = From::from(self);
        ufmt::uwrite!(w, "{}", msg)
    }
}

impl<I2C> Display for DisplayError<I2C>
where
    I2C: i2c::I2c,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let msg: &'static str = From::from(self);
        write!(f, "{}", msg)
    }
}

/// Everything an adapter needs to reach the display: the bus, the backpack's 7-bit address and
/// the delay used for all controller timing.
pub struct DeviceSetupConfig<I2C, DELAY>
where
    I2C: i2c::I2c,
    DELAY: DelayNs,
{
    pub(crate) i2c: I2C,
    pub(crate) address: u8,
    pub(crate) delay: DELAY,
}

pub struct CharacterDisplay<I2C, DELAY, DEVICE>
where
    I2C: i2c::I2c,
    DELAY: DelayNs,
    DEVICE: HD44780AdapterTrait<I2C, DELAY>,
{
    device: DEVICE,
    _marker: PhantomData<(I2C, DELAY)>,
}

impl<I2C, DELAY, DEVICE> CharacterDisplay<I2C, DELAY, DEVICE>
where
    I2C: i2c::I2c,
    DELAY: DelayNs,
    DEVICE: HD44780AdapterTrait<I2C, DELAY>,
{
    /// Create and initialize a character display at the default I2C address for the adapter.
    /// `single_line` selects the controller's one line mode and cannot be changed later.
    pub fn new(i2c: I2C, single_line: bool, delay: DELAY) -> Result<Self, DisplayError<I2C>> {
        Self::new_with_address(i2c, DEVICE::default_i2c_address(), single_line, delay)
    }

    /// Create and initialize a character display with a specific I2C address for the adapter.
    pub fn new_with_address(
        i2c: I2C,
        address: u8,
        single_line: bool,
        delay: DELAY,
    ) -> Result<Self, DisplayError<I2C>> {
        let mut display = Self {
            device: DEVICE::new(DeviceSetupConfig {
                i2c,
                address,
                delay,
            }),
            _marker: PhantomData,
        };
        init::init(&mut display.device, single_line)?;
        Ok(display)
    }

    /// Consume the display and return the I2C bus and delay. The display is left as it is.
    pub fn release(self) -> (I2C, DELAY) {
        let config = self.device.release();
        (config.i2c, config.delay)
    }

    //--------------------------------------------------------------------------------------------------
    // raw access
    //--------------------------------------------------------------------------------------------------

    /// Send an instruction byte. The byte is not checked against the instruction table.
    pub fn write_instruction(&mut self, cmd: u8) -> Result<&mut Self, DisplayError<I2C>> {
        self.device.write_byte(false, cmd)?;
        Ok(self)
    }

    /// Write a data byte to the DDRAM or CGRAM address last set.
    pub fn write_data(&mut self, data: u8) -> Result<&mut Self, DisplayError<I2C>> {
        self.device.write_byte(true, data)?;
        Ok(self)
    }

    //--------------------------------------------------------------------------------------------------
    // high level commands, for the user!
    //--------------------------------------------------------------------------------------------------

    /// Prints a string at the current cursor position, one byte per character. There is no
    /// wrapping; text past the end of the row goes wherever the controller's address counter
    /// takes it. Characters above U+00FF are not supported and are sent as their low byte.
    pub fn print(&mut self, text: &str) -> Result<&mut Self, DisplayError<I2C>> {
        for c in text.chars() {
            #[cfg(feature = "defmt")]
            if u32::from(c) > 0xFF {
                defmt::warn!("Unsupported character U+{:X} sent as a single byte", u32::from(c));
            }
            self.device.write_byte(true, c as u8)?;
        }
        Ok(self)
    }

    /// Move the cursor to `col` of `row`. Rows 0 and 1 are addressed natively; other rows and
    /// out of range columns are sent without checks.
    pub fn goto(&mut self, row: u8, col: u8) -> Result<&mut Self, DisplayError<I2C>> {
        self.write_instruction(set_ddram_address(row, col))
    }

    /// Clear the display and return the cursor home. Does not wait for the clear to finish; the
    /// caller should allow 1.53 ms before relying on the display contents.
    pub fn clear(&mut self) -> Result<&mut Self, DisplayError<I2C>> {
        self.write_instruction(LCD_CMD_CLEARDISPLAY)?;
        self.write_instruction(LCD_CMD_RETURNHOME)
    }

    /// Return the cursor and any display shift to the home position.
    pub fn home(&mut self) -> Result<&mut Self, DisplayError<I2C>> {
        self.write_instruction(LCD_CMD_RETURNHOME)
    }

    /// Turn the backlight on or off. Nothing is written until the next byte is sent.
    pub fn set_backlight(&mut self, on: bool) -> Result<&mut Self, DisplayError<I2C>> {
        self.device.set_backlight(on);
        Ok(self)
    }

    /// Backlight setting that will be sent with the next byte
    pub fn backlight(&self) -> bool {
        self.device.backlight()
    }

    /// Shift the whole display one position to the left.
    pub fn shift_left(&mut self) -> Result<&mut Self, DisplayError<I2C>> {
        self.write_instruction(cursor_shift(true, false))
    }

    /// Shift the whole display one position to the right.
    pub fn shift_right(&mut self) -> Result<&mut Self, DisplayError<I2C>> {
        self.write_instruction(cursor_shift(true, true))
    }

    pub fn move_cursor_left(&mut self) -> Result<&mut Self, DisplayError<I2C>> {
        self.write_instruction(cursor_shift(false, false))
    }

    pub fn move_cursor_right(&mut self) -> Result<&mut Self, DisplayError<I2C>> {
        self.write_instruction(cursor_shift(false, true))
    }

    /// Set display, cursor and blink visibility in one instruction.
    pub fn set_display_control(
        &mut self,
        display_on: bool,
        cursor_on: bool,
        blink_on: bool,
    ) -> Result<&mut Self, DisplayError<I2C>> {
        self.write_instruction(display_control(display_on, cursor_on, blink_on))
    }

    /// Load all 8 custom characters, glyph by glyph and row by row, from CGRAM address 0. The
    /// controller's address auto-increment carries the writes across glyphs. Afterwards the
    /// address counter points into CGRAM, so call `goto` before printing.
    pub fn load_custom_chars(&mut self, chars: &CustomChars) -> Result<&mut Self, DisplayError<I2C>> {
        self.write_instruction(set_cgram_address(0))?;
        for glyph in chars.iter() {
            for &row in glyph.iter() {
                self.write_data(row)?;
            }
        }
        Ok(self)
    }

    /// Create a single custom character at `location` (0-7).
    pub fn create_char(
        &mut self,
        location: u8,
        charmap: [u8; 8],
    ) -> Result<&mut Self, DisplayError<I2C>> {
        self.write_instruction(set_cgram_address(location))?;
        for &row in charmap.iter() {
            self.write_data(row)?;
        }
        Ok(self)
    }
}

/// Implement the `core::fmt::Write` trait for the display, allowing it to be used with the `write!` macro.
impl<I2C, DELAY, DEVICE> core::fmt::Write for CharacterDisplay<I2C, DELAY, DEVICE>
where
    I2C: i2c::I2c,
    DELAY: DelayNs,
    DEVICE: HD44780AdapterTrait<I2C, DELAY>,
{
    fn write_str(&mut self, s: &str) -> Result<(), core::fmt::Error> {
        if let Err(_e) = self.print(s) {
            return Err(core::fmt::Error);
        }
        Ok(())
    }
}

#[cfg(feature = "ufmt")]
/// Implement the `ufmt::uWrite` trait for the display, allowing it to be used with the `uwriteln!` and `uwrite!` macros.
impl<I2C, DELAY, DEVICE> ufmt::uWrite for CharacterDisplay<I2C, DELAY, DEVICE>
where
    I2C: i2c::I2c,
    DELAY: DelayNs,
    DEVICE: HD44780AdapterTrait<I2C, DELAY>,
{
    type Error = DisplayError<I2C>;

    fn write_str(&mut self, s: &str) -> Result<(), DisplayError<I2C>> {
        self.print(s)?;
        Ok(())
    }
}
