//! GPIO assignments for the OsciFan controller board (ESP32-S3).
//!
//! Single source of truth for pin numbers.  `hw_init` has to claim the
//! typed `esp-idf-hal` pins by field name, so it checks every claimed
//! pin against these tables with [`check_claims`] before handing out
//! the banks.

// ---------------------------------------------------------------------------
// Front-panel buttons (active-low, internal pull-up)
// ---------------------------------------------------------------------------

/// Input bit 3.
pub const POWER_BUTTON_GPIO: i32 = 7;
/// Input bit 2.
pub const SPEED_BUTTON_GPIO: i32 = 6;
/// Input bit 1.
pub const OSCILLATE_BUTTON_GPIO: i32 = 5;
/// Input bit 0.
pub const TEMPERATURE_BUTTON_GPIO: i32 = 4;

/// Button pins indexed by input bit.
pub const BUTTON_GPIOS: [i32; 4] = [
    TEMPERATURE_BUTTON_GPIO,
    OSCILLATE_BUTTON_GPIO,
    SPEED_BUTTON_GPIO,
    POWER_BUTTON_GPIO,
];

// ---------------------------------------------------------------------------
// Output latch
// ---------------------------------------------------------------------------

/// Bit 0: power indicator LED.
pub const POWER_LED_GPIO: i32 = 15;
/// Bit 1: oscillation indicator LED.
pub const OSCILLATE_LED_GPIO: i32 = 16;
/// Bit 2: oscillator servo control pulse.
pub const SERVO_PULSE_GPIO: i32 = 17;
/// Bit 3: DC motor enable (H-bridge EN).
pub const MOTOR_ENABLE_GPIO: i32 = 18;
/// Bit 4: H-bridge input A.
pub const MOTOR_DIR_A_GPIO: i32 = 8;
/// Bit 5: H-bridge input B.
pub const MOTOR_DIR_B_GPIO: i32 = 9;

/// Output pins indexed by output word bit.
pub const OUTPUT_GPIOS: [i32; 6] = [
    POWER_LED_GPIO,
    OSCILLATE_LED_GPIO,
    SERVO_PULSE_GPIO,
    MOTOR_ENABLE_GPIO,
    MOTOR_DIR_A_GPIO,
    MOTOR_DIR_B_GPIO,
];

/// Compare the pins actually claimed, in bit order, against the tables.
pub fn check_claims(buttons: &[i32], outputs: &[i32]) -> Result<(), &'static str> {
    if buttons != BUTTON_GPIOS.as_slice() {
        return Err("button pins differ from pins::BUTTON_GPIOS");
    }
    if outputs != OUTPUT_GPIOS.as_slice() {
        return Err("output pins differ from pins::OUTPUT_GPIOS");
    }
    Ok(())
}
