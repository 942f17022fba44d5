///
/// @package sash-rs
///
/// @file Config functions
/// @copyright 2025-present Christoph Kappel <christoph@unexist.dev>
/// @version $Id$
///
/// This program can be distributed under the terms of the GNU GPLv3.
/// See the file LICENSE for details.
///

use clap_config_file::ClapConfigFile;

#[derive(ClapConfigFile)]
#[config_file_name = "sash"]
#[config_file_formats = "yaml,toml,json"]
pub(crate) struct Config {
    /// Connect to DISPLAY
    #[config_arg(short = 'd', default_value = ":0", accept_from = "cli_only")]
    pub(crate) display: String,

    /// Set logging level LEVEL
    #[config_arg(short = 'l', name = "level", default_value = "", accept_from = "cli_only")]
    pub(crate) loglevel: String,

    /// Print debugging messages
    #[config_arg(short = 'D', default_value = false, accept_from = "cli_only")]
    pub(crate) debug: bool,

    /// Window title
    #[config_arg(short = 't', default_value = "sash")]
    pub(crate) title: String,

    /// Window x position
    #[config_arg(default_value = 0)]
    pub(crate) pos_x: i16,

    /// Window y position
    #[config_arg(default_value = 0)]
    pub(crate) pos_y: i16,

    /// Window width
    #[config_arg(default_value = 1280)]
    pub(crate) width: u16,

    /// Window height
    #[config_arg(default_value = 720)]
    pub(crate) height: u16,

    /// Create the window without a border
    #[config_arg(default_value = false)]
    pub(crate) borderless: bool,

    /// Allow the user to resize the window
    #[config_arg(default_value = true)]
    pub(crate) resizeable: bool,

    /// Ask the WM for fullscreen after activation
    #[config_arg(short = 'f', default_value = false)]
    pub(crate) fullscreen: bool,

    /// Keep the render resolution fixed across window resizes
    #[config_arg(default_value = false)]
    pub(crate) custom_resolution: bool,

    /// Splash image path relative to the cache root
    #[config_arg(default_value = "")]
    pub(crate) splash_image: String,

    /// Asset cache root folder
    #[config_arg(default_value = "")]
    pub(crate) cache_root: String,
}
