use zeroframe_core::{Command, Frame, LogSink};

use crate::ZeroFrame;

/// Multiuser plugin.
impl<F: Frame, L: LogSink + 'static> ZeroFrame<F, L> {
    /// Show the login form for switching to another private key.
    pub fn user_login_form(&self) {
        self.cmd(Command::new("userLoginForm"));
    }

    /// Show the current user's master seed.
    pub fn user_show_master_seed(&self) {
        self.cmd(Command::new("userShowMasterSeed"));
    }
}
