///
/// @package sash-rs
///
/// @file Window functions
/// @copyright 2025-present Christoph Kappel <christoph@unexist.dev>
/// @version $Id$
///
/// This program can be distributed under the terms of the GNU GPLv3.
/// See the file LICENSE for details.
///

use std::fmt;
use std::process;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use anyhow::{Context, Result};
use bitflags::bitflags;
use log::{debug, info, warn};
use stdext::function_name;
use x11rb::COPY_DEPTH_FROM_PARENT;
use x11rb::connection::Connection;
use x11rb::protocol::Event;
use x11rb::protocol::xproto::{self, Atom, AtomEnum, ClientMessageEvent, ConfigureNotifyEvent,
                              ConfigureWindowAux, ConnectionExt, CreateGCAux, CreateWindowAux,
                              EventMask, Gcontext, PropMode, Visualid, WindowClass};
use x11rb::rust_connection::RustConnection;
use x11rb::wrapper::ConnectionExt as ConnectionExtWrapper;
use crate::config::Config;
use crate::ewmh;
use crate::ewmh::{Atoms, Protocol};
use crate::notify;
use crate::notify::WindowNotify;
use crate::rect::{Rect, Style};
use crate::splash;

bitflags! {
    /// State flags for [`Window`]
    #[derive(Default, Debug, Copy, Clone, PartialEq)]
    pub(crate) struct Flags: u32 {
        /// Window is mapped and live
        const ACTIVATED = 1 << 0;
        /// Window takes events from the dispatch loop
        const SUBSCRIBED = 1 << 1;
        /// WM reported fullscreen state
        const FULLSCREEN = 1 << 2;
        /// WM reported horizontal maximization
        const MAX_HORZ = 1 << 3;
        /// WM reported vertical maximization
        const MAX_VERT = 1 << 4;
        /// Render resolution is pinned; size changes don't retune it
        const CUSTOM_RESOLUTION = 1 << 5;
    }
}

/// Read-only snapshot of the root screen, taken once at creation time
#[derive(Default, Debug, Copy, Clone)]
pub(crate) struct RootScreen {
    pub(crate) root: xproto::Window,
    pub(crate) visual: Visualid,
    pub(crate) depth: u8,
    pub(crate) black_pixel: u32,
}

/// A top-level window on a borrowed X11 connection
///
/// The connection is owned elsewhere and only borrowed for the lifetime
/// of the window; it is never closed here.
pub(crate) struct Window<'a> {
    pub(crate) flags: Flags,

    pub(crate) conn: &'a RustConnection,
    pub(crate) screen: RootScreen,
    pub(crate) atoms: Atoms,

    /// Server-side id; set once at creation, cleared once at destruction
    pub(crate) win: Option<xproto::Window>,
    pub(crate) gc: Gcontext,

    pub(crate) geom: Rect,
    pub(crate) border_width: u16,

    pub(crate) splash_image: String,
    pub(crate) cache_root: String,

    pub(crate) notify: Box<dyn WindowNotify>,
    pub(crate) shutdown: Arc<AtomicBool>,
}

impl<'a> Window<'a> {
    /// Create the native window and negotiate the WM protocols
    ///
    /// Every request on this path is checked; an error here means a
    /// broken host environment, not a runtime condition.
    ///
    /// # Arguments
    ///
    /// * `conn` - Established X11 connection
    /// * `screen_num` - Preferred screen of the connection
    /// * `config` - Config values read either from args or config file
    /// * `notify` - Listener for lifecycle notifications
    /// * `shutdown` - Shared exit-request flag
    ///
    /// # Returns
    ///
    /// A [`Result`] with either [`Window`] on success or otherwise [`anyhow::Error`]
    pub(crate) fn create(conn: &'a RustConnection, screen_num: usize, config: &Config,
                         notify: Box<dyn WindowNotify>, shutdown: Arc<AtomicBool>) -> Result<Self> {
        let setup_screen = &conn.setup().roots[screen_num];

        let screen = RootScreen {
            root: setup_screen.root,
            visual: setup_screen.root_visual,
            depth: setup_screen.root_depth,
            black_pixel: setup_screen.black_pixel,
        };

        // Graphics context for splash blits, created on the root drawable
        let gc = conn.generate_id()?;

        let gc_aux = CreateGCAux::default()
            .foreground(screen.black_pixel)
            .graphics_exposures(0u32);

        conn.create_gc(gc, screen.root, &gc_aux)?.check()
            .context("Failed to create graphics context")?;

        let style = Style::from_switches(config.borderless, config.resizeable);

        let win = conn.generate_id()?;

        let win_aux = CreateWindowAux::default()
            .background_pixel(screen.black_pixel)
            .event_mask(EventMask::STRUCTURE_NOTIFY
                | EventMask::KEY_PRESS
                | EventMask::KEY_RELEASE
                | EventMask::FOCUS_CHANGE
                | EventMask::PROPERTY_CHANGE
                | EventMask::EXPOSURE);

        conn.create_window(COPY_DEPTH_FROM_PARENT, win, screen.root,
                           config.pos_x, config.pos_y, config.width, config.height,
                           style.border_width(), WindowClass::INPUT_OUTPUT,
                           screen.visual, &win_aux)?.check()
            .context("Failed to create window")?;

        let mut flags = Flags::empty();

        if config.custom_resolution {
            flags.insert(Flags::CUSTOM_RESOLUTION);
        }

        let window = Self {
            flags,
            conn,
            screen,
            atoms: Atoms::new(conn),
            win: Some(win),
            gc,
            geom: Rect {
                x: config.pos_x,
                y: config.pos_y,
                width: config.width,
                height: config.height,
            },
            border_width: style.border_width(),
            splash_image: config.splash_image.clone(),
            cache_root: config.cache_root.clone(),
            notify,
            shutdown,
        };

        window.set_title(&config.title)?;
        window.set_protocols()?;
        window.request_frame_extents()?;
        window.set_pid()?;

        conn.flush()?;

        debug!("{}: window={}", function_name!(), window);

        Ok(window)
    }

    /// Destroy the window if one is still held; idempotent
    pub(crate) fn destroy(&mut self) -> Result<()> {
        if let Some(win) = self.win.take() {
            self.conn.free_gc(self.gc)?;
            self.conn.destroy_window(win)?.check()
                .context("Failed to destroy window")?;
            self.conn.flush()?;

            debug!("{}", function_name!());
        }

        Ok(())
    }

    /// Set window title
    ///
    /// The title is written twice, separated by a null byte, so one
    /// WM_CLASS write names both the window and the taskbar group.
    pub(crate) fn set_title(&self, title: &str) -> Result<()> {
        let win = self.win.context("No window")?;

        let value = ewmh::class_property(title);

        self.conn.change_property(PropMode::REPLACE, win, AtomEnum::WM_CLASS,
                                  AtomEnum::STRING, 8, value.len() as u32, &value)?
            .check().context("Failed to set window title")?;

        Ok(())
    }

    /// Advertise the protocols this window answers to
    fn set_protocols(&self) -> Result<()> {
        let win = self.win.context("No window")?;

        let protocols = [self.atoms.WM_DELETE_WINDOW, self.atoms._NET_WM_PING];

        self.conn.change_property32(PropMode::REPLACE, win, self.atoms.WM_PROTOCOLS,
                                    AtomEnum::ATOM, &protocols)?
            .check().context("Failed to set WM_PROTOCOLS")?;

        self.conn.flush()?;

        Ok(())
    }

    /// Ask the WM for its frame extents around the client area
    fn request_frame_extents(&self) -> Result<()> {
        let win = self.win.context("No window")?;

        ewmh::send_message(self.conn, self.screen.root, win,
                           self.atoms._NET_REQUEST_FRAME_EXTENTS, [0; 5], true)
            .context("Failed to set _NET_REQUEST_FRAME_EXTENTS")?;

        Ok(())
    }

    /// Tag the window with our pid so the WM can kill us when unresponsive
    fn set_pid(&self) -> Result<()> {
        let win = self.win.context("No window")?;

        self.conn.change_property32(PropMode::REPLACE, win, self.atoms._NET_WM_PID,
                                    AtomEnum::CARDINAL, &[process::id()])?
            .check().context("Failed to set _NET_WM_PID")?;

        Ok(())
    }

    /// Map the window and show the splash once
    pub(crate) fn activate(&mut self) -> Result<()> {
        self.flags.insert(Flags::SUBSCRIBED);

        if !self.flags.contains(Flags::ACTIVATED) {
            let win = self.win.context("No window")?;

            self.conn.map_window(win)?;
            self.conn.flush()?;

            // Splash is optional; never fail activation over it
            if let Err(err) = splash::present(self) {
                warn!("Skipping splash: {}", err);
            }

            self.flags.insert(Flags::ACTIVATED);
        }

        debug!("{}: window={}", function_name!(), self);

        Ok(())
    }

    /// Unmap the window and notify listeners once
    pub(crate) fn deactivate(&mut self) -> Result<()> {
        if notify::closed(&mut self.flags, self.notify.as_mut()) {
            let win = self.win.context("No window")?;

            self.conn.unmap_window(win)?;
            self.conn.flush()?;
        }

        self.flags.remove(Flags::SUBSCRIBED);

        debug!("{}: window={}", function_name!(), self);

        Ok(())
    }

    /// Resize the client area
    ///
    /// Unmap before the configure and remap afterwards; resizing while
    /// mapped flickers on some WMs.
    #[allow(dead_code)]
    pub(crate) fn resize(&mut self, width: u16, height: u16) -> Result<()> {
        let win = self.win.context("No window")?;

        if self.flags.contains(Flags::ACTIVATED) {
            self.conn.unmap_window(win)?;
        }

        let aux = ConfigureWindowAux::default()
            .width(u32::from(width))
            .height(u32::from(height));

        self.conn.configure_window(win, &aux)?;

        if self.flags.contains(Flags::ACTIVATED) {
            self.conn.map_window(win)?;
            self.conn.flush()?;
        }

        // The render side rebuilds its swapchain from this notification
        self.window_size_changed(width, height);

        Ok(())
    }

    /// Query _NET_WM_STATE and recompute the local state flags
    ///
    /// Failures leave the flags untouched.
    pub(crate) fn get_wm_states(&mut self) {
        let Some(win) = self.win else { return };

        let reply = match self.conn.get_property(false, win, self.atoms._NET_WM_STATE,
                                                 AtomEnum::ATOM, 0, 1024) {
            Ok(cookie) => cookie.reply(),
            Err(err) => Err(err.into()),
        };

        match reply {
            Ok(reply) if 32 == reply.format && Atom::from(AtomEnum::ATOM) == reply.type_ => {
                let states = ewmh::wm_state_flags(&self.atoms,
                                                  reply.value32().into_iter().flatten());

                self.flags.remove(Flags::FULLSCREEN | Flags::MAX_HORZ | Flags::MAX_VERT);
                self.flags.insert(states);
            },
            Ok(_) => warn!("Acquiring _NET_WM_STATE information from the WM failed"),
            Err(err) => warn!("Acquiring _NET_WM_STATE information from the WM failed: {}", err),
        }
    }

    /// Ask the WM for the given fullscreen state
    ///
    /// The message is advisory; the local flag is stored without waiting
    /// for the WM to confirm, a later property change reconciles.
    pub(crate) fn set_fullscreen(&mut self, fullscreen: bool) -> Result<()> {
        let win = self.win.context("No window")?;

        self.get_wm_states();

        let action = if fullscreen { ewmh::NET_WM_STATE_ADD } else { ewmh::NET_WM_STATE_REMOVE };

        ewmh::send_message(self.conn, self.screen.root, win, self.atoms._NET_WM_STATE,
                           [action, self.atoms._NET_WM_STATE_FULLSCREEN, 0, 1, 0], true)
            .context("Failed to set _NET_WM_STATE_FULLSCREEN")?;

        // Hint the compositor to get out of the way in fullscreen
        if let Err(err) = self.conn.change_property32(PropMode::REPLACE, win,
                                                      self.atoms._NET_WM_BYPASS_COMPOSITOR,
                                                      AtomEnum::CARDINAL, &[u32::from(fullscreen)]) {
            warn!("Failed to set _NET_WM_BYPASS_COMPOSITOR: {}", err);
        }

        if !fullscreen && self.flags.intersects(Flags::MAX_HORZ | Flags::MAX_VERT) {
            info!("Removing maximized state");

            ewmh::send_message(self.conn, self.screen.root, win, self.atoms._NET_WM_STATE,
                               [ewmh::NET_WM_STATE_REMOVE,
                                self.atoms._NET_WM_STATE_MAXIMIZED_HORZ,
                                self.atoms._NET_WM_STATE_MAXIMIZED_VERT, 1, 0], true)
                .context("Failed to remove _NET_WM_STATE_MAXIMIZED_HORZ | _NET_WM_STATE_MAXIMIZED_VERT")?;
        }

        self.conn.flush()?;

        self.flags.set(Flags::FULLSCREEN, fullscreen);

        debug!("{}: window={}", function_name!(), self);

        Ok(())
    }

    /// Dispatch one event from the X event stream
    pub(crate) fn handle_event(&mut self, event: &Event) -> Result<()> {
        match event {
            Event::ConfigureNotify(event) => self.handle_configure_notify(event),
            Event::ClientMessage(event) => self.handle_client_message(event)?,

            // Everything else belongs to other collaborators
            _ => {},
        }

        Ok(())
    }

    fn handle_configure_notify(&mut self, event: &ConfigureNotifyEvent) {
        if event.width != self.geom.width || event.height != self.geom.height {
            self.window_size_changed(event.width, event.height);
        }
    }

    fn handle_client_message(&mut self, event: &ClientMessageEvent) -> Result<()> {
        match ewmh::classify(&self.atoms, self.screen.root, event) {
            Some(Protocol::Delete) => {
                self.deactivate()?;

                self.shutdown.store(true, Ordering::SeqCst);
            },
            Some(Protocol::Ping) => {
                let reply = ewmh::pong(event, self.screen.root);

                self.conn.send_event(false, self.screen.root,
                                     EventMask::STRUCTURE_NOTIFY | EventMask::SUBSTRUCTURE_REDIRECT,
                                     reply)?;
                self.conn.flush()?;
            },
            None => {},
        }

        Ok(())
    }

    /// Store new geometry and publish notifications while activated
    pub(crate) fn window_size_changed(&mut self, width: u16, height: u16) {
        if notify::size_changed(&mut self.geom, self.flags, self.notify.as_mut(),
                                width, height) {
            debug!("{}: window={}", function_name!(), self);
        }
    }

    pub(crate) fn id(&self) -> Option<xproto::Window> {
        self.win
    }

    pub(crate) fn geometry(&self) -> Rect {
        self.geom
    }

    pub(crate) fn is_fullscreen(&self) -> bool {
        self.flags.contains(Flags::FULLSCREEN)
    }

    pub(crate) fn is_subscribed(&self) -> bool {
        self.flags.contains(Flags::SUBSCRIBED)
    }

    /// Fixed capability of this backend
    pub(crate) fn supports_client_area_resize(&self) -> bool {
        true
    }

    /// Fixed placeholder
    // TODO: Read the actual rate via randr
    pub(crate) fn display_refresh_rate(&self) -> u32 {
        60
    }
}

impl Drop for Window<'_> {
    fn drop(&mut self) {
        let _ = self.destroy();
    }
}

impl fmt::Display for Window<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "win={:?}, geom={}, border={}, flags={:?}",
               self.win, self.geom, self.border_width, self.flags)
    }
}
