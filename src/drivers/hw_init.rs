//! One-shot pin bank initialization (ESP-IDF only).
//!
//! Claims the GPIOs listed in [`pins`](crate::pins), configures the
//! buttons as pulled-up inputs and drives every output line low, then
//! hands back the two banks ready for the
//! [`HardwareAdapter`](crate::adapters::hardware::HardwareAdapter).
//! Called once from `main()` before the tick loop starts.

use esp_idf_hal::gpio::{AnyIOPin, AnyOutputPin, Input, Output, PinDriver, Pins, Pull};
use esp_idf_hal::sys::EspError;
use log::{error, info};

use super::buttons::ButtonBank;
use super::output_latch::OutputLatch;
use crate::error::Error;
use crate::pins;

pub type ButtonPin = PinDriver<'static, AnyIOPin, Input>;
pub type LatchPin = PinDriver<'static, AnyOutputPin, Output>;

pub fn init_pin_banks(
    gpio: Pins,
) -> Result<(ButtonBank<ButtonPin>, OutputLatch<LatchPin>), Error> {
    // Claimed in pins::BUTTON_GPIOS / pins::OUTPUT_GPIOS order; checked below.
    let buttons = [
        button(gpio.gpio4.downgrade())?,
        button(gpio.gpio5.downgrade())?,
        button(gpio.gpio6.downgrade())?,
        button(gpio.gpio7.downgrade())?,
    ];
    let lines = [
        line(gpio.gpio15.downgrade_output())?,
        line(gpio.gpio16.downgrade_output())?,
        line(gpio.gpio17.downgrade_output())?,
        line(gpio.gpio18.downgrade_output())?,
        line(gpio.gpio8.downgrade_output())?,
        line(gpio.gpio9.downgrade_output())?,
    ];

    let claimed_buttons = buttons.each_ref().map(|p| p.pin());
    let claimed_lines = lines.each_ref().map(|p| p.pin());
    if let Err(what) = pins::check_claims(&claimed_buttons, &claimed_lines) {
        error!(
            "hw_init: {} (buttons {:?}, outputs {:?})",
            what, claimed_buttons, claimed_lines
        );
        return Err(Error::Init(what));
    }

    info!(
        "hw_init: buttons on GPIO {:?}, outputs on GPIO {:?}",
        pins::BUTTON_GPIOS,
        pins::OUTPUT_GPIOS
    );
    Ok((ButtonBank::new(buttons), OutputLatch::new(lines)))
}

fn button(pin: AnyIOPin) -> Result<ButtonPin, Error> {
    let mut driver = PinDriver::input(pin).map_err(|e| init_failed("button pin", e))?;
    driver
        .set_pull(Pull::Up)
        .map_err(|e| init_failed("button pull-up", e))?;
    Ok(driver)
}

fn line(pin: AnyOutputPin) -> Result<LatchPin, Error> {
    let mut driver = PinDriver::output(pin).map_err(|e| init_failed("output pin", e))?;
    driver
        .set_low()
        .map_err(|e| init_failed("output initial level", e))?;
    Ok(driver)
}

fn init_failed(what: &'static str, e: EspError) -> Error {
    error!("hw_init: {} failed (rc={})", what, e.code());
    Error::Init(what)
}
