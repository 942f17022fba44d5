///
/// @package sash-rs
///
/// @file Ewmh functions
/// @copyright 2025-present Christoph Kappel <christoph@unexist.dev>
/// @version $Id$
///
/// This program can be distributed under the terms of the GNU GPLv3.
/// See the file LICENSE for details.
///

use anyhow::Result;
use log::error;
use x11rb::NONE;
use x11rb::connection::Connection;
use x11rb::protocol::xproto::{Atom, ClientMessageEvent, ConnectionExt, EventMask, Window};
use crate::window::Flags;

/// Format indicator for client messages
pub(crate) const CLIENT_MESSAGE_FORMAT: u8 = 32;

/// Actions understood by _NET_WM_STATE client messages
pub(crate) const NET_WM_STATE_REMOVE: u32 = 0;
pub(crate) const NET_WM_STATE_ADD: u32 = 1;
#[allow(dead_code)]
pub(crate) const NET_WM_STATE_TOGGLE: u32 = 2;

/// Cache for the fixed set of atoms this window negotiates with the WM
///
/// Populated once right after window creation; all later lookups are
/// plain field reads without a round-trip. The set matches what the
/// protocol setup advertises, not just what the dispatcher consumes.
#[allow(non_snake_case, dead_code)]
#[derive(Debug)]
pub(crate) struct Atoms {
    // ICCCM
    pub(crate) WM_PROTOCOLS: Atom,
    pub(crate) WM_DELETE_WINDOW: Atom,

    // EWMH
    pub(crate) _NET_WM_PING: Atom,
    pub(crate) _NET_ACTIVE_WINDOW: Atom,
    pub(crate) _NET_WM_BYPASS_COMPOSITOR: Atom,
    pub(crate) _NET_MOVERESIZE_WINDOW: Atom,
    pub(crate) _NET_REQUEST_FRAME_EXTENTS: Atom,
    pub(crate) _NET_FRAME_EXTENTS: Atom,
    pub(crate) _NET_WM_PID: Atom,

    // States
    pub(crate) _NET_WM_STATE: Atom,
    pub(crate) _NET_WM_STATE_FULLSCREEN: Atom,
    pub(crate) _NET_WM_STATE_MAXIMIZED_HORZ: Atom,
    pub(crate) _NET_WM_STATE_MAXIMIZED_VERT: Atom,
}

impl Atoms {
    /// Resolve the whole atom set, one round-trip per name
    pub(crate) fn new(conn: &impl Connection) -> Self {
        Self {
            WM_PROTOCOLS: intern(conn, "WM_PROTOCOLS"),
            WM_DELETE_WINDOW: intern(conn, "WM_DELETE_WINDOW"),
            _NET_WM_PING: intern(conn, "_NET_WM_PING"),
            _NET_ACTIVE_WINDOW: intern(conn, "_NET_ACTIVE_WINDOW"),
            _NET_WM_BYPASS_COMPOSITOR: intern(conn, "_NET_WM_BYPASS_COMPOSITOR"),
            _NET_MOVERESIZE_WINDOW: intern(conn, "_NET_MOVERESIZE_WINDOW"),
            _NET_REQUEST_FRAME_EXTENTS: intern(conn, "_NET_REQUEST_FRAME_EXTENTS"),
            _NET_FRAME_EXTENTS: intern(conn, "_NET_FRAME_EXTENTS"),
            _NET_WM_PID: intern(conn, "_NET_WM_PID"),
            _NET_WM_STATE: intern(conn, "_NET_WM_STATE"),
            _NET_WM_STATE_FULLSCREEN: intern(conn, "_NET_WM_STATE_FULLSCREEN"),
            _NET_WM_STATE_MAXIMIZED_HORZ: intern(conn, "_NET_WM_STATE_MAXIMIZED_HORZ"),
            _NET_WM_STATE_MAXIMIZED_VERT: intern(conn, "_NET_WM_STATE_MAXIMIZED_VERT"),
        }
    }
}

/// Resolve a single atom name; failures log and yield [`NONE`]
fn intern(conn: &impl Connection, name: &str) -> Atom {
    let cookie = match conn.intern_atom(false, name.as_bytes()) {
        Ok(cookie) => cookie,
        Err(err) => {
            error!("Unable to query atom `{}': {}", name, err);

            return NONE;
        },
    };

    match cookie.reply() {
        Ok(reply) => reply.atom,
        Err(err) => {
            error!("Unable to query atom `{}': {}", name, err);

            NONE
        },
    }
}

/// Protocol requests delivered through WM_PROTOCOLS client messages
#[derive(Debug, Copy, Clone, PartialEq)]
pub(crate) enum Protocol {
    /// Close requested by the user
    Delete,
    /// Liveness check from the window manager
    Ping,
}

/// Interpret a client message against the WM_PROTOCOLS convention
///
/// Pings already addressed to the root window are not ours to answer.
pub(crate) fn classify(atoms: &Atoms, root: Window, event: &ClientMessageEvent) -> Option<Protocol> {
    if event.type_ != atoms.WM_PROTOCOLS || CLIENT_MESSAGE_FORMAT != event.format {
        return None;
    }

    let protocol = event.data.as_data32()[0];

    if protocol == atoms.WM_DELETE_WINDOW {
        Some(Protocol::Delete)
    } else if protocol == atoms._NET_WM_PING && event.window != root {
        Some(Protocol::Ping)
    } else {
        None
    }
}

/// Rewrite a ping so it can be echoed back to the root window
pub(crate) fn pong(event: &ClientMessageEvent, root: Window) -> ClientMessageEvent {
    let mut reply = event.clone();

    reply.window = root;

    reply
}

/// Recompute state flags from a _NET_WM_STATE atom list
pub(crate) fn wm_state_flags(atoms: &Atoms, states: impl Iterator<Item = Atom>) -> Flags {
    let mut flags = Flags::empty();

    for state in states {
        if state == atoms._NET_WM_STATE_FULLSCREEN {
            flags.insert(Flags::FULLSCREEN);
        } else if state == atoms._NET_WM_STATE_MAXIMIZED_HORZ {
            flags.insert(Flags::MAX_HORZ);
        } else if state == atoms._NET_WM_STATE_MAXIMIZED_VERT {
            flags.insert(Flags::MAX_VERT);
        }
    }

    flags
}

/// Encode WM_CLASS: the title twice, each copy null-terminated, so a
/// single property write names both the window and the taskbar group
pub(crate) fn class_property(title: &str) -> Vec<u8> {
    let mut value = Vec::with_capacity((title.len() + 1) * 2);

    value.extend_from_slice(title.as_bytes());
    value.push(0);
    value.extend_from_slice(title.as_bytes());
    value.push(0);

    value
}

/// Send a client message to the root window with the event masks the
/// WM hint convention expects
pub(crate) fn send_message(conn: &impl Connection, root: Window, win: Window,
                           message_type: Atom, data: [u32; 5], propagate: bool) -> Result<()> {
    let event = ClientMessageEvent::new(CLIENT_MESSAGE_FORMAT, win, message_type, data);

    conn.send_event(propagate, root,
                    EventMask::STRUCTURE_NOTIFY | EventMask::SUBSTRUCTURE_REDIRECT,
                    event)?.check()?;

    Ok(())
}
