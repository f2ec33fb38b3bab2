//! Browser automation module
//!
//! This module provides headless browser control through ChromiumOxide:
//! lifecycle management and navigation with document capture.

pub mod controller;
pub mod navigation;

pub use controller::{launch_args, BrowserController};
pub use navigation::{NavigationOptions, PageNavigator, UrlValidator};
