///
/// @package sash-rs
///
/// @file Rect functions
/// @copyright 2025-present Christoph Kappel <christoph@unexist.dev>
/// @version $Id$
///
/// This program can be distributed under the terms of the GNU GPLv3.
/// See the file LICENSE for details.
///

use std::fmt;
use bitflags::bitflags;
use easy_min_max::max;

/// Border width in pixels when a border was requested
const DEFAULT_BORDER_WIDTH: u16 = 4;

bitflags! {
    /// Style mask decided at creation time
    #[derive(Default, Debug, Copy, Clone, PartialEq)]
    pub(crate) struct Style: u32 {
        /// Window carries a border
        const BORDERED = 1 << 0;
        /// Window can be resized by the user
        const RESIZEABLE = 1 << 1;
    }
}

impl Style {
    /// Assemble mask from config switches
    pub(crate) fn from_switches(borderless: bool, resizeable: bool) -> Self {
        let mut style = Style::empty();

        if !borderless {
            style.insert(Style::BORDERED);
        }

        if resizeable {
            style.insert(Style::RESIZEABLE);
        }

        style
    }

    /// Resolve border width from the mask
    pub(crate) fn border_width(self) -> u16 {
        if self.intersects(Style::BORDERED | Style::RESIZEABLE) {
            DEFAULT_BORDER_WIDTH
        } else {
            0
        }
    }
}

#[derive(Default, Debug, Copy, Clone, PartialEq)]
pub(crate) struct Rect {
    pub(crate) x: i16,
    pub(crate) y: i16,
    pub(crate) width: u16,
    pub(crate) height: u16,
}

impl Rect {
    /// Top-left origin that centers an area of the given size inside
    /// this rect, clamped to the rect
    pub(crate) fn centered_origin(&self, width: u16, height: u16) -> (i16, i16) {
        let x = (i32::from(self.width) - i32::from(width)) / 2;
        let y = (i32::from(self.height) - i32::from(height)) / 2;

        (max!(0, x) as i16, max!(0, y) as i16)
    }
}

impl fmt::Display for Rect {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "(x={}, y={}, width={}, height={})",
               self.x, self.y, self.width, self.height)
    }
}

impl From<(i16, i16, u16, u16)> for Rect {
    fn from(rect: (i16, i16, u16, u16)) -> Self {
        Self {
            x: rect.0,
            y: rect.1,
            width: rect.2,
            height: rect.3,
        }
    }
}
