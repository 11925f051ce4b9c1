//! HD44780 instruction set. Opcodes, flag bits and the small helpers that combine them into
//! instruction bytes. Nothing here is validated: flags are OR-ed into the opcode as given.

// commands
pub const LCD_CMD_CLEARDISPLAY: u8 = 0x01; //  Clear display, set cursor position to zero
pub const LCD_CMD_RETURNHOME: u8 = 0x02; //  Set cursor position to zero
pub const LCD_CMD_ENTRYMODESET: u8 = 0x04; //  Sets the entry mode
pub const LCD_CMD_DISPLAYCONTROL: u8 = 0x08; //  Display, cursor and blink on/off
pub const LCD_CMD_CURSORSHIFT: u8 = 0x10; //  Moves the cursor or shifts the display
pub const LCD_CMD_FUNCTIONSET: u8 = 0x20; //  Data length, line count and font
pub const LCD_CMD_SETCGRAMADDR: u8 = 0x40; //  Sets the CGRAM (character generator RAM) address
pub const LCD_CMD_SETDDRAMADDR: u8 = 0x80; //  Sets the DDRAM (display data RAM) address

// flags for display entry mode
pub const LCD_FLAG_ENTRYINCREMENT: u8 = 0x02; //  Cursor moves right after each write
pub const LCD_FLAG_ENTRYSHIFT: u8 = 0x01; //  Display shifts with each write

// flags for display on/off control
pub const LCD_FLAG_DISPLAYON: u8 = 0x04;
pub const LCD_FLAG_CURSORON: u8 = 0x02;
pub const LCD_FLAG_BLINKON: u8 = 0x01;

// flags for display/cursor shift
pub const LCD_FLAG_DISPLAYMOVE: u8 = 0x08; //  Shift the whole display instead of the cursor
pub const LCD_FLAG_MOVERIGHT: u8 = 0x04; //  Shift right, left when clear

// flags for function set
pub const LCD_FLAG_8BITMODE: u8 = 0x10;
pub const LCD_FLAG_2LINE: u8 = 0x08;
pub const LCD_FLAG_5X10_DOTS: u8 = 0x04;

/// DDRAM offset of the second physical row.
pub const ROW_1_OFFSET: u8 = 0x40;

/// Nibble sent while the controller may still be in 8 bit mode to select 8 bit mode.
pub const NIBBLE_FUNCTIONSET_8BIT: u8 = (LCD_CMD_FUNCTIONSET | LCD_FLAG_8BITMODE) >> 4;
/// Nibble that switches the controller from 8 bit to 4 bit mode.
pub const NIBBLE_FUNCTIONSET_4BIT: u8 = LCD_CMD_FUNCTIONSET >> 4;

/// Function set for 4 bit operation with a 5x8 font and the requested line count.
pub const fn function_set(single_line: bool) -> u8 {
    if single_line {
        LCD_CMD_FUNCTIONSET
    } else {
        LCD_CMD_FUNCTIONSET | LCD_FLAG_2LINE
    }
}

pub const fn display_control(display_on: bool, cursor_on: bool, blink_on: bool) -> u8 {
    let mut cmd = LCD_CMD_DISPLAYCONTROL;
    if display_on {
        cmd |= LCD_FLAG_DISPLAYON;
    }
    if cursor_on {
        cmd |= LCD_FLAG_CURSORON;
    }
    if blink_on {
        cmd |= LCD_FLAG_BLINKON;
    }
    cmd
}

/// Cursor or display shift. `display` selects shifting the whole display rather than the cursor.
pub const fn cursor_shift(display: bool, right: bool) -> u8 {
    let mut cmd = LCD_CMD_CURSORSHIFT;
    if display {
        cmd |= LCD_FLAG_DISPLAYMOVE;
    }
    if right {
        cmd |= LCD_FLAG_MOVERIGHT;
    }
    cmd
}

/// Set DDRAM address for a row and column. Only rows 0 and 1 have a native offset, every other
/// row is addressed as if it were row 0. Out of range values wrap and are sent as is.
pub const fn set_ddram_address(row: u8, col: u8) -> u8 {
    let address = match row {
        1 => col.wrapping_add(ROW_1_OFFSET),
        _ => col,
    };
    LCD_CMD_SETDDRAMADDR | address
}

/// Set CGRAM address to the first row of the glyph at `location` (0-7).
pub const fn set_cgram_address(location: u8) -> u8 {
    LCD_CMD_SETCGRAMADDR | ((location & 0x7) << 3)
}
