///
/// @package sash-rs
///
/// @file Main functions
/// @copyright 2025-present Christoph Kappel <christoph@unexist.dev>
/// @version $Id$
///
/// This program can be distributed under the terms of the GNU GPLv3.
/// See the file LICENSE for details.
///

mod config;
mod event;
mod ewmh;
mod logger;
mod notify;
mod rect;
mod splash;
mod window;

#[cfg(test)]
mod tests;

use std::sync::Arc;
use std::sync::atomic::AtomicBool;
use anyhow::{Context, Result};
use log::{error, info};
use signal_hook::consts::{SIGINT, SIGTERM};
use crate::config::Config;
use crate::notify::WindowNotify;
use crate::window::Window;

/// Engine-side listener; the render backend hooks in here
struct EngineNotify;

impl WindowNotify for EngineNotify {
    fn on_window_resized(&mut self, width: u32, height: u32) {
        info!("Window resized to {}x{}", width, height);
    }

    fn on_window_closed(&mut self) {
        info!("Window closed");
    }

    fn on_resolution_changed(&mut self, width: u32, height: u32) {
        info!("Resolution changed to {}x{}", width, height);
    }
}

fn install_signal_handler(shutdown: &Arc<AtomicBool>) -> Result<()> {
    for signal in [SIGINT, SIGTERM] {
        signal_hook::flag::register(signal, Arc::clone(shutdown))
            .with_context(|| "Failed to set signal handler")?;
    }

    Ok(())
}

fn print_version() {
    info!("{} {} - Copyright (c) 2025-present {}",
        env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"), env!("CARGO_PKG_AUTHORS"));
    info!("Released under the GNU Public License");
    info!("Compiled for X11");
}

fn main() -> Result<()> {
    // Load config
    let (config, path, _format) = Config::parse_info();

    logger::init(&config)?;

    info!("Reading file `{:?}'", path.unwrap_or_default());

    let shutdown = Arc::new(AtomicBool::new(false));

    install_signal_handler(&shutdown)?;
    print_version();

    let (conn, screen_num) = x11rb::connect(Some(&*config.display))?;

    let mut win = Window::create(&conn, screen_num, &config,
                                 Box::new(EngineNotify), shutdown.clone())?;

    info!("Window {:?} is {} ({} Hz, client-area resize: {})",
        win.id(), win.geometry(), win.display_refresh_rate(),
        win.supports_client_area_resize());

    win.activate()?;

    if config.fullscreen {
        win.set_fullscreen(true)?;

        info!("Fullscreen: {}", win.is_fullscreen());
    }

    drop(config);

    // Run event handler
    if let Err(e) = event::handle_requests(&mut win, &shutdown) {
        error!("Error: {}", e);
    }

    win.deactivate()?;
    win.destroy()?;

    info!("Exit");

    Ok(())
}
