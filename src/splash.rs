///
/// @package sash-rs
///
/// @file Splash functions
/// @copyright (c) 2025-present Christoph Kappel <christoph@unexist.dev>
/// @version $Id$
///
/// This program can be distributed under the terms of the GNU GPLv3.
/// See the file LICENSE for details.
///

use std::path::PathBuf;
use anyhow::{Context, Result};
use image::RgbaImage;
use log::{debug, info, warn};
use stdext::function_name;
use x11rb::connection::Connection;
use x11rb::protocol::Event;
use x11rb::protocol::xproto::{ConnectionExt, ImageFormat, Pixmap};
use x11rb::rust_connection::RustConnection;
use crate::window::Window;

/// Frees the server-side pixmap on every exit path
struct PixmapGuard<'a> {
    conn: &'a RustConnection,
    pixmap: Pixmap,
}

impl Drop for PixmapGuard<'_> {
    fn drop(&mut self) {
        let _ = self.conn.free_pixmap(self.pixmap);
        let _ = self.conn.flush();
    }
}

/// Resolve the absolute splash image path; empty settings skip the splash
pub(crate) fn splash_file(cache_root: &str, splash_image: &str) -> Option<PathBuf> {
    if cache_root.is_empty() || splash_image.is_empty() {
        return None;
    }

    Some(PathBuf::from(format!("{}/linux/{}", cache_root, splash_image)))
}

/// Compose a BGRX raster from a decoded image
///
/// The fourth byte stays zero, the output format ignores it.
pub(crate) fn raster(image: &RgbaImage) -> Vec<u8> {
    let mut data = vec![0u8; image.width() as usize * image.height() as usize * 4];

    for (i, pixel) in image.pixels().enumerate() {
        let [r, g, b, _] = pixel.0;

        data[i * 4] = b;
        data[i * 4 + 1] = g;
        data[i * 4 + 2] = r;
    }

    data
}

/// Show the splash image exactly once
///
/// Uploads the decoded raster into a pixmap, then blocks on a private
/// receive loop until the first expose and blits the image centered
/// into the window. Missing settings or an unreadable image skip the
/// splash without error; window activation never fails over it.
pub(crate) fn present(win: &Window) -> Result<()> {
    let Some(path) = splash_file(&win.cache_root, &win.splash_image) else {
        info!("No splash image configured");

        return Ok(());
    };

    let image = match image::open(&path) {
        Ok(image) => image.to_rgba8(),
        Err(err) => {
            warn!("Failed to open splash image `{}': {}", path.display(), err);

            return Ok(());
        },
    };

    let width = image.width() as u16;
    let height = image.height() as u16;

    let data = raster(&image);

    drop(image);

    let conn = win.conn;
    let xid = win.id().context("No window")?;

    let pixmap = conn.generate_id()?;

    conn.create_pixmap(win.screen.depth, pixmap, xid, width, height)?.check()
        .context("Failed to create splash pixmap")?;

    let _guard = PixmapGuard { conn, pixmap };

    conn.put_image(ImageFormat::Z_PIXMAP, pixmap, win.gc, width, height,
                   0, 0, 0, win.screen.depth, &data)?.check()
        .context("Failed to upload splash image")?;

    drop(data);

    conn.flush()?;

    // Swallow everything until the first expose, then blit once
    loop {
        let event = conn.wait_for_event()?;

        if let Event::Expose(expose) = event {
            let (dst_x, dst_y) = win.geom.centered_origin(width, height);

            conn.copy_area(pixmap, xid, win.gc,
                           expose.x as i16, expose.y as i16,
                           dst_x, dst_y, expose.width, expose.height)?;
            conn.flush()?;

            break;
        }
    }

    debug!("{}: window={}", function_name!(), win);

    Ok(())
}
