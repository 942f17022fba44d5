///
/// @package sash-rs
///
/// @file Ewmh tests
/// @copyright 2025-present Christoph Kappel <christoph@unexist.dev>
/// @version $Id$
///
/// This program can be distributed under the terms of the GNU GPLv3.
/// See the file LICENSE for details.
///

use x11rb::protocol::xproto::ClientMessageEvent;
use crate::ewmh::{self, Atoms, Protocol, CLIENT_MESSAGE_FORMAT};
use crate::window::Flags;

const ROOT: u32 = 1;
const WIN: u32 = 42;

fn atoms() -> Atoms {
    Atoms {
        WM_PROTOCOLS: 100,
        WM_DELETE_WINDOW: 101,
        _NET_WM_PING: 102,
        _NET_ACTIVE_WINDOW: 103,
        _NET_WM_BYPASS_COMPOSITOR: 104,
        _NET_MOVERESIZE_WINDOW: 105,
        _NET_REQUEST_FRAME_EXTENTS: 106,
        _NET_FRAME_EXTENTS: 107,
        _NET_WM_PID: 108,
        _NET_WM_STATE: 109,
        _NET_WM_STATE_FULLSCREEN: 110,
        _NET_WM_STATE_MAXIMIZED_HORZ: 111,
        _NET_WM_STATE_MAXIMIZED_VERT: 112,
    }
}

#[test]
fn should_classify_delete_window() {
    let atoms = atoms();
    let event = ClientMessageEvent::new(CLIENT_MESSAGE_FORMAT, WIN, atoms.WM_PROTOCOLS,
                                        [atoms.WM_DELETE_WINDOW, 0, 0, 0, 0]);

    assert_eq!(ewmh::classify(&atoms, ROOT, &event), Some(Protocol::Delete));
}

#[test]
fn should_classify_ping() {
    let atoms = atoms();
    let event = ClientMessageEvent::new(CLIENT_MESSAGE_FORMAT, WIN, atoms.WM_PROTOCOLS,
                                        [atoms._NET_WM_PING, 0, 0, 0, 0]);

    assert_eq!(ewmh::classify(&atoms, ROOT, &event), Some(Protocol::Ping));
}

#[test]
fn should_ignore_ping_addressed_to_root() {
    let atoms = atoms();
    let event = ClientMessageEvent::new(CLIENT_MESSAGE_FORMAT, ROOT, atoms.WM_PROTOCOLS,
                                        [atoms._NET_WM_PING, 0, 0, 0, 0]);

    assert_eq!(ewmh::classify(&atoms, ROOT, &event), None);
}

#[test]
fn should_ignore_wrong_format() {
    let atoms = atoms();
    let event = ClientMessageEvent::new(8, WIN, atoms.WM_PROTOCOLS,
                                        [atoms.WM_DELETE_WINDOW, 0, 0, 0, 0]);

    assert_eq!(ewmh::classify(&atoms, ROOT, &event), None);
}

#[test]
fn should_ignore_foreign_message_types() {
    let atoms = atoms();
    let event = ClientMessageEvent::new(CLIENT_MESSAGE_FORMAT, WIN, 999u32,
                                        [atoms.WM_DELETE_WINDOW, 0, 0, 0, 0]);

    assert_eq!(ewmh::classify(&atoms, ROOT, &event), None);

    let event = ClientMessageEvent::new(CLIENT_MESSAGE_FORMAT, WIN, atoms.WM_PROTOCOLS,
                                        [atoms._NET_FRAME_EXTENTS, 0, 0, 0, 0]);

    assert_eq!(ewmh::classify(&atoms, ROOT, &event), None);
}

#[test]
fn should_rewrite_pong_destination() {
    let atoms = atoms();
    let event = ClientMessageEvent::new(CLIENT_MESSAGE_FORMAT, WIN, atoms.WM_PROTOCOLS,
                                        [atoms._NET_WM_PING, 7, 8, 9, 10]);

    let reply = ewmh::pong(&event, ROOT);

    assert_eq!(reply.window, ROOT);
    assert_eq!(reply.type_, atoms.WM_PROTOCOLS);
    assert_eq!(reply.format, CLIENT_MESSAGE_FORMAT);
    assert_eq!(reply.data.as_data32(), [atoms._NET_WM_PING, 7, 8, 9, 10]);
}

#[test]
fn should_recompute_wm_state_flags() {
    let atoms = atoms();
    let states = [atoms._NET_WM_STATE_FULLSCREEN, atoms._NET_WM_STATE_MAXIMIZED_HORZ, 999];

    let flags = ewmh::wm_state_flags(&atoms, states.into_iter());

    assert_eq!(flags, Flags::FULLSCREEN | Flags::MAX_HORZ);
}

#[test]
fn should_recompute_empty_wm_state_flags() {
    let atoms = atoms();

    assert!(ewmh::wm_state_flags(&atoms, std::iter::empty()).is_empty());
}

#[test]
fn should_encode_class_property() {
    assert_eq!(ewmh::class_property("sash").as_slice(), b"sash\0sash\0");
    assert_eq!(ewmh::class_property("").as_slice(), b"\0\0");
}

#[test]
fn should_use_ewmh_state_actions() {
    assert_eq!(ewmh::NET_WM_STATE_REMOVE, 0);
    assert_eq!(ewmh::NET_WM_STATE_ADD, 1);
    assert_eq!(ewmh::NET_WM_STATE_TOGGLE, 2);
}
