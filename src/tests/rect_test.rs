///
/// @package sash-rs
///
/// @file Rect tests
/// @copyright 2025-present Christoph Kappel <christoph@unexist.dev>
/// @version $Id$
///
/// This program can be distributed under the terms of the GNU GPLv3.
/// See the file LICENSE for details.
///

use proptest::prelude::*;
use crate::rect::{Rect, Style};

proptest! {
    #![proptest_config(ProptestConfig::with_cases(5))]
    #[test]
    fn should_create_rect(x: i16, y: i16, width: u16, height: u16) {
        let rect = Rect::from((x, y, width, height));

        assert_eq!(rect.x, x);
        assert_eq!(rect.y, y);
        assert_eq!(rect.width, width);
        assert_eq!(rect.height, height);
    }
}

#[test]
fn should_resolve_border_width() {
    assert_eq!(Style::empty().border_width(), 0);
    assert_eq!(Style::BORDERED.border_width(), 4);
    assert_eq!(Style::RESIZEABLE.border_width(), 4);
    assert_eq!((Style::BORDERED | Style::RESIZEABLE).border_width(), 4);
}

#[test]
fn should_map_style_switches() {
    assert_eq!(Style::from_switches(true, false), Style::empty());
    assert_eq!(Style::from_switches(false, false), Style::BORDERED);
    assert_eq!(Style::from_switches(true, true), Style::RESIZEABLE);
    assert_eq!(Style::from_switches(false, true), Style::BORDERED | Style::RESIZEABLE);
}

#[test]
fn should_center_origin() {
    let rect = Rect::from((0, 0, 1280, 720));

    assert_eq!(rect.centered_origin(1080, 320), (100, 200));
}

#[test]
fn should_clamp_origin_for_oversized_areas() {
    let rect = Rect::from((0, 0, 640, 480));

    assert_eq!(rect.centered_origin(2000, 2000), (0, 0));
}
