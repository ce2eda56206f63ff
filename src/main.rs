/*
 *  main.rs
 *
 *  monogfx - page-addressed monochrome graphics
 *	(c) 2020-26 Stuart Hunter
 *
 *	Demo: draw a scene on an SSD1306 or on the console
 *
 *	This program is free software: you can redistribute it and/or modify
 *	it under the terms of the GNU General Public License as published by
 *	the Free Software Foundation, either version 3 of the License, or
 *	(at your option) any later version.
 *
 *	This program is distributed in the hope that it will be useful,
 *	but WITHOUT ANY WARRANTY; without even the implied warranty of
 *	MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 *	GNU General Public License for more details.
 *
 *	See <http://www.gnu.org/licenses/> to get a copy of the GNU General
 *	Public License.
 *
 */

use anyhow::{Context, Result};
use embedded_graphics::{
    pixelcolor::BinaryColor,
    prelude::*,
    primitives::{Line, PrimitiveStyle},
};
use env_logger::Env;
use log::{info, warn};

use monogfx::config::{self, DriverKind, Scene};
use monogfx::display::components::{ButtonLed, ChannelText};
use monogfx::display::{DisplayDriverFactory, DisplayTransport};
use monogfx::{FONT_5X7, MonoGraphics, PixelState};

include!(concat!(env!("OUT_DIR"), "/build_info.rs"));

/// The bring-up picture: a 32 pixel circle, a frame and a caption
fn draw_shapes<T: DisplayTransport>(gfx: &mut MonoGraphics<T>) -> Result<()> {
    let (width, height) = (gfx.screen_width() as i32, gfx.screen_height() as i32);

    gfx.draw_rectangle(0, 0, width as u32, height as u32, PixelState::Set, PixelState::Transparent);
    gfx.draw_circle(4, 4, 32, PixelState::Set, PixelState::Transparent);
    gfx.draw_centered_circle(20, 20, 6, PixelState::Set, PixelState::Set);

    let caption = "monogfx";
    gfx.draw_string(
        &FONT_5X7,
        40,
        height / 2 - FONT_5X7.height() as i32 / 2,
        caption,
        caption.len(),
        PixelState::Set,
        PixelState::Clear,
    );

    // same canvas through embedded-graphics
    Line::new(Point::new(40, height - 6), Point::new(width - 6, height - 6))
        .into_styled(PrimitiveStyle::with_stroke(BinaryColor::On, 1))
        .draw(gfx)?;
    Ok(())
}

/// Every printable character, wrapped at the right edge
fn draw_text<T: DisplayTransport>(gfx: &mut MonoGraphics<T>) {
    let advance = FONT_5X7.width() as i32 + 1;
    let line_height = FONT_5X7.height() as i32 + 1;
    let per_line = (gfx.screen_width() as i32 / advance).max(1);

    let (first, last) = (FONT_5X7.first_char(), FONT_5X7.last_char());
    for (i, code) in (first..=last).enumerate() {
        let i = i as i32;
        let x = (i % per_line) * advance;
        let y = (i / per_line) * line_height;
        gfx.draw_character(&FONT_5X7, x, y, code as char, PixelState::Set, PixelState::Clear);
    }
}

/// One dot per step down the diagonal
fn draw_diagonal<T: DisplayTransport>(gfx: &mut MonoGraphics<T>) {
    for i in 0..64 {
        gfx.draw_dot(i, i, PixelState::Set);
    }
}

fn draw_widgets<T: DisplayTransport>(gfx: &mut MonoGraphics<T>) -> Result<()> {
    let mut strip = ChannelText::new(2, 2, 0, &FONT_5X7);
    strip.set_text(gfx, 0, 0, "Vol  -6");
    strip.set_text(gfx, 1, 0, "Pan   C");

    let row = gfx.screen_height() as i32 - 14;
    let mut mute = ButtonLed::new(2, row, 30, 11, "MUTE", &FONT_5X7, false)
        .context("mute button")?;
    let mut solo = ButtonLed::new(36, row, 30, 11, "SOLO", &FONT_5X7, false)
        .context("solo button")?;
    mute.render(gfx);
    solo.set_state(gfx, true);
    mute.set_state(gfx, false);
    Ok(())
}

fn main() -> Result<()> {
    let cfg = config::load().context("loading configuration")?;

    env_logger::Builder::from_env(Env::default().default_filter_or(cfg.log_level()))
        .format_timestamp_secs()
        .init();

    info!("{} v.{} built {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"), BUILD_DATE);

    let mut display_cfg = cfg.display.clone().unwrap_or_default();
    if display_cfg.driver.is_none() {
        info!("No display driver configured, drawing to the console");
        display_cfg.driver = Some(DriverKind::Console);
    }
    let rotation = display_cfg.rotation().context("display rotation")?;

    let transport = DisplayDriverFactory::create_from_config(&display_cfg)
        .context("creating display transport")?;
    let mut gfx = MonoGraphics::new(transport, rotation)
        .context("initializing display")?;

    if let Some(contrast) = display_cfg.contrast {
        if let Err(e) = gfx.set_contrast(contrast) {
            warn!("Contrast not applied: {}", e);
        }
    }
    if display_cfg.invert.unwrap_or(false) {
        if let Err(e) = gfx.set_invert(true) {
            warn!("Invert not applied: {}", e);
        }
    }

    let scene = cfg.scene();
    info!("Drawing {:?} scene", scene);
    match scene {
        Scene::Shapes => draw_shapes(&mut gfx)?,
        Scene::Text => draw_text(&mut gfx),
        Scene::Diagonal => draw_diagonal(&mut gfx),
        Scene::Widgets => draw_widgets(&mut gfx)?,
    }

    gfx.render().context("rendering canvas")?;
    info!("Done");
    Ok(())
}
