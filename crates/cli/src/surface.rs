//! Terminal rendering of cart state.

use mdi_site::ui::{Badge, CartSurface, Notification};

/// Prints cart banners to stdout and remembers the latest badge.
///
/// Badge updates arrive after every mutation; printing each one would
/// repeat the count, so commands print [`TerminalSurface::badge`] once at
/// the end instead.
#[derive(Debug, Default)]
pub struct TerminalSurface {
    badge: Badge,
}

impl TerminalSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub const fn badge(&self) -> Badge {
        self.badge
    }
}

impl CartSurface for TerminalSurface {
    fn render_badge(&mut self, badge: Badge) {
        self.badge = badge;
    }

    #[allow(clippy::print_stdout)]
    fn show_notification(&mut self, notification: &Notification) {
        println!(
            "{} ({}: {})",
            notification.message, notification.link.label, notification.link.href
        );
    }
}

/// Write a line of command output.
#[allow(clippy::print_stdout)]
pub fn print_line(line: &str) {
    println!("{line}");
}

/// Write an error message for the user.
#[allow(clippy::print_stderr)]
pub fn print_error(message: &str) {
    eprintln!("error: {message}");
}
