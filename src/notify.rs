///
/// @package sash-rs
///
/// @file Notify functions
/// @copyright 2025-present Christoph Kappel <christoph@unexist.dev>
/// @version $Id$
///
/// This program can be distributed under the terms of the GNU GPLv3.
/// See the file LICENSE for details.
///

use crate::rect::Rect;
use crate::window::Flags;

/// Listener interface for window lifecycle notifications
///
/// Registered per window at creation time; calls are fire-and-forget,
/// nothing is queued or retried.
pub(crate) trait WindowNotify {
    /// Client area size changed
    fn on_window_resized(&mut self, width: u32, height: u32);

    /// Window was closed
    fn on_window_closed(&mut self);

    /// Render resolution follows the new client area size
    fn on_resolution_changed(&mut self, width: u32, height: u32);
}

/// Apply a size change to the stored geometry and publish notifications
///
/// Unchanged sizes are a no-op. Geometry updates even while deactivated,
/// but notifications only go out for an activated window; the resolution
/// notification is skipped when a custom resolution is pinned.
///
/// # Returns
///
/// `true` when the stored geometry was updated
pub(crate) fn size_changed(geom: &mut Rect, flags: Flags, notify: &mut dyn WindowNotify,
                           width: u16, height: u16) -> bool {
    if geom.width == width && geom.height == height {
        return false;
    }

    geom.width = width;
    geom.height = height;

    if flags.contains(Flags::ACTIVATED) {
        notify.on_window_resized(width.into(), height.into());

        if !flags.contains(Flags::CUSTOM_RESOLUTION) {
            notify.on_resolution_changed(width.into(), height.into());
        }
    }

    true
}

/// Apply the close transition; fires at most once per activation
///
/// # Returns
///
/// `true` when the window actually left the activated state
pub(crate) fn closed(flags: &mut Flags, notify: &mut dyn WindowNotify) -> bool {
    if !flags.contains(Flags::ACTIVATED) {
        return false;
    }

    flags.remove(Flags::ACTIVATED);
    notify.on_window_closed();

    true
}
