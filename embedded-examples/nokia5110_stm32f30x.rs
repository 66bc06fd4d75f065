//! Full example code for driving a Nokia 5110 (PCD8544) display. This runs on an STM32F303RE,
//! with the display on SPI1 (PA5 = SCLK, PA7 = SDIN), PA8 for D/C, PA9 for /RES and PA10 for /SCE.

#![deny(unsafe_code)]
#![no_main]
#![no_std]

extern crate cortex_m;
extern crate embedded_hal as hal_api;
extern crate stm32f30x;
extern crate stm32f30x_hal as hal;
#[macro_use]
extern crate cortex_m_rt;
extern crate panic_abort;
extern crate pcd8544;

use cortex_m::asm;
use cortex_m_rt::ExceptionFrame;
use hal::prelude::*;
use hal::spi;
use pcd8544 as lcd;

entry!(main);

exception!(*, default_handler);
exception!(HardFault, hard_fault);

fn hard_fault(_ef: &ExceptionFrame) -> ! {
    asm::bkpt();
    loop {}
}

fn default_handler(_irqn: i16) {
    loop {}
}

fn main() -> ! {
    // Get peripherals and set up RCC.
    let cp = cortex_m::Peripherals::take().unwrap();
    let dp = stm32f30x::Peripherals::take().unwrap();

    let mut flash = dp.FLASH.constrain();
    let mut rcc = dp.RCC.constrain();
    let clocks = rcc.cfgr.freeze(&mut flash.acr);
    let mut delay = hal::delay::Delay::new(cp.SYST, clocks);

    // Get GPIO A where the display is connected.
    let mut gpioa = dp.GPIOA.split(&mut rcc.ahb);

    // Set up SPI1, which is Alternate Function 5 for GPIOs PA5,6,7. The PCD8544 has no MISO, but
    // the HAL wants the pin anyway.
    let lcd_sclk = gpioa.pa5.into_af5(&mut gpioa.moder, &mut gpioa.afrl);
    let lcd_miso = gpioa.pa6.into_af5(&mut gpioa.moder, &mut gpioa.afrl);
    let lcd_sdin = gpioa.pa7.into_af5(&mut gpioa.moder, &mut gpioa.afrl);

    let lcd_spi = spi::Spi::spi1(
        dp.SPI1,
        (lcd_sclk, lcd_miso, lcd_sdin),
        hal_api::spi::Mode {
            polarity: hal_api::spi::Polarity::IdleLow,
            phase: hal_api::spi::Phase::CaptureOnFirstTransition,
        },
        4.mhz(),
        clocks,
        &mut rcc.apb2,
    );

    let lcd_dc = gpioa
        .pa8
        .into_push_pull_output(&mut gpioa.moder, &mut gpioa.otyper);
    let lcd_rst = gpioa
        .pa9
        .into_push_pull_output(&mut gpioa.moder, &mut gpioa.otyper);
    let lcd_sce = gpioa
        .pa10
        .into_push_pull_output(&mut gpioa.moder, &mut gpioa.otyper);

    let mut disp = lcd::Display::new(lcd::SpiInterface::new(lcd_spi, lcd_dc, lcd_rst, lcd_sce));

    // Reset and initialize the display. The blue PCB variant of the module wants a little more
    // contrast than the default.
    disp.init(lcd::Config::new().contrast(56), &mut delay)
        .unwrap();

    // Frame the screen and put a filled box in the middle.
    disp.draw_rectangle(0, 0, 83, 47);
    disp.draw_filled_rectangle(32, 14, 51, 33);
    disp.flush().unwrap();

    loop {
        asm::wfi();
    }
}
