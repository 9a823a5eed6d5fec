//! Simple potentiometer example
//!
//! Demonstrates basic usage of the ad525x crate on the Raspberry Pi Pico 2.
//! Reads the factory tolerance of every RDAC, then sweeps RDAC 0 of an
//! AD5254 up and down in 6dB steps, logging the wiper via defmt.
//!
//! # Wiring
//!
//! | Signal    | Pico 2 Pin | Notes                        |
//! |-----------|------------|------------------------------|
//! | I2C0 SDA  | GP20       |                              |
//! | I2C0 SCL  | GP21       |                              |
//! | AD0, AD1  | GND        | Device address 0x2C          |

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp as hal;
use embassy_rp::block::ImageDef;
use embassy_rp::i2c::{self, I2c};
use embassy_time::{Duration, Timer};
use {defmt_rtt as _, panic_probe as _};

use ad525x::{address_selector, Ad525x, I2cBus, RDAC_COUNT};

/// Tell the Boot ROM about our application.
#[link_section = ".start_block"]
#[used]
pub static IMAGE_DEF: ImageDef = hal::block::ImageDef::secure_exe();

#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    let p = embassy_rp::init(Default::default());

    // --- I2C bus (GP20 = SDA, GP21 = SCL) ---
    let i2c = I2c::new_blocking(
        p.I2C0,
        p.PIN_21, // SCL
        p.PIN_20, // SDA
        i2c::Config::default(),
    );

    // --- Potentiometer ---
    let mut pot = Ad525x::ad5254(I2cBus::new(i2c));
    pot.initialize(address_selector(false, false))
        .expect("Failed to initialize AD5254");

    for rdac in 0..RDAC_COUNT {
        match pot.read_tolerance(rdac) {
            Ok(tolerance) => info!("RDAC{} tolerance: {}%", rdac, tolerance),
            Err(e) => error!("Tolerance read failed: {}", e),
        }
    }

    // Start from the value stored in EEMEM.
    if let Err(e) = pot.restore_one(0) {
        error!("Restore failed: {}", e);
    }

    info!("Sweep started");

    // Main loop: bring the wiper to 1, double it up to full scale, halve it back.
    loop {
        if let Err(e) = pot.write_wiper(0, 1) {
            error!("Write failed: {}", e);
        }

        for _ in 0..8 {
            Timer::after(Duration::from_millis(250)).await;
            if let Err(e) = pot.increment_one_6db(0) {
                error!("Increment failed: {}", e);
            }
            log_wiper(&mut pot);
        }

        for _ in 0..8 {
            Timer::after(Duration::from_millis(250)).await;
            if let Err(e) = pot.decrement_one_6db(0) {
                error!("Decrement failed: {}", e);
            }
            log_wiper(&mut pot);
        }
    }
}

fn log_wiper<B: ad525x::Bus>(pot: &mut Ad525x<B>) {
    match pot.read_wiper(0) {
        Ok(value) => info!("Wiper: {}", value),
        Err(e) => error!("Read failed: {} (code {})", e, pot.error_code()),
    }
}
