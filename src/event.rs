///
/// @package sash-rs
///
/// @file Event functions
/// @copyright 2025-present Christoph Kappel <christoph@unexist.dev>
/// @version $Id$
///
/// This program can be distributed under the terms of the GNU GPLv3.
/// See the file LICENSE for details.
///

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use anyhow::Result;
use log::debug;
use x11rb::connection::Connection;
use crate::window::Window;

/// Drive the window from the X event stream until shutdown is requested
///
/// Dispatch is gated by the window's subscription, not by its mapped
/// state; this loop is the only caller of [`Window::handle_event`].
pub(crate) fn handle_requests(win: &mut Window<'_>, shutdown: &Arc<AtomicBool>) -> Result<()> {
    while !shutdown.load(Ordering::SeqCst) {
        win.conn.flush()?;

        let event = win.conn.wait_for_event()?;

        if win.is_subscribed() {
            win.handle_event(&event)?;
        } else {
            debug!("Unhandled event: {:?}", event);
        }
    }

    Ok(())
}
