///
/// @package sash-rs
///
/// @file Splash tests
/// @copyright 2025-present Christoph Kappel <christoph@unexist.dev>
/// @version $Id$
///
/// This program can be distributed under the terms of the GNU GPLv3.
/// See the file LICENSE for details.
///

use image::{Rgba, RgbaImage};
use crate::splash;

#[test]
fn should_resolve_splash_file() {
    let path = splash::splash_file("/var/cache/sash", "splash.png");

    assert_eq!(path.unwrap().to_str().unwrap(), "/var/cache/sash/linux/splash.png");
}

#[test]
fn should_skip_without_settings() {
    assert!(splash::splash_file("", "splash.png").is_none());
    assert!(splash::splash_file("/var/cache/sash", "").is_none());
    assert!(splash::splash_file("", "").is_none());
}

#[test]
fn should_swap_channels_in_raster() {
    let mut img = RgbaImage::new(2, 1);

    img.put_pixel(0, 0, Rgba([1, 2, 3, 255]));
    img.put_pixel(1, 0, Rgba([10, 20, 30, 255]));

    let data = splash::raster(&img);

    assert_eq!(data, vec![3, 2, 1, 0, 30, 20, 10, 0]);
}

#[test]
fn should_zero_the_unused_channel() {
    let mut img = RgbaImage::new(1, 1);

    img.put_pixel(0, 0, Rgba([255, 255, 255, 255]));

    assert_eq!(splash::raster(&img), vec![255, 255, 255, 0]);
}
