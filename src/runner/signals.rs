//! Signal dispositions while a child command runs.
//!
//! The child shares our terminal, so a Ctrl+C already reaches it through
//! the foreground process group. The launcher ignores SIGINT and SIGQUIT
//! itself and outlives the child to report its status. SIGTERM and SIGHUP
//! sent to the launcher alone are relayed to the child.
//!
//! The signals are blocked from before the spawn until forwarding is in
//! place, so a SIGTERM in between cannot kill the launcher and orphan the
//! child. Dispositions are process-wide, so only one guard exists at a time.

#[cfg(unix)]
pub use unix::ForwardingGuard;

#[cfg(not(unix))]
pub use fallback::ForwardingGuard;

#[cfg(unix)]
mod unix {
    use std::ffi::c_int;
    use std::sync::atomic::{AtomicI32, Ordering};
    use std::sync::{Mutex, MutexGuard, PoisonError};

    use log::debug;
    use nix::sys::signal::{self, SaFlags, SigAction, SigHandler, SigSet, SigmaskHow, Signal};
    use nix::unistd::Pid;

    /// Pid of the running child, or 0 when none.
    static CHILD_PID: AtomicI32 = AtomicI32::new(0);

    /// Held for the whole life of a guard.
    static GUARD_LOCK: Mutex<()> = Mutex::new(());

    const IGNORED: [Signal; 2] = [Signal::SIGINT, Signal::SIGQUIT];
    const FORWARDED: [Signal; 2] = [Signal::SIGTERM, Signal::SIGHUP];

    extern "C" fn forward(raw: c_int) {
        let pid = CHILD_PID.load(Ordering::SeqCst);
        if pid <= 0 {
            return;
        }
        if let Ok(sig) = Signal::try_from(raw) {
            // kill(2) is async-signal-safe
            let _ = signal::kill(Pid::from_raw(pid), sig);
        }
    }

    fn handled() -> SigSet {
        let mut set = SigSet::empty();
        for sig in IGNORED.into_iter().chain(FORWARDED) {
            set.add(sig);
        }
        set
    }

    /// Restores the previous dispositions and signal mask on drop.
    #[derive(Debug)]
    pub struct ForwardingGuard {
        previous: Vec<(Signal, SigAction)>,
        /// Mask to restore while the signals are still blocked.
        blocked: Option<SigSet>,
        _lock: MutexGuard<'static, ()>,
    }

    impl ForwardingGuard {
        /// Block the handled signals. Call before spawning the child.
        ///
        /// The child starts with an empty mask and default dispositions.
        pub fn block() -> nix::Result<Self> {
            let lock = GUARD_LOCK.lock().unwrap_or_else(PoisonError::into_inner);
            let old_mask = handled().thread_swap_mask(SigmaskHow::SIG_BLOCK)?;

            Ok(Self {
                previous: Vec::with_capacity(IGNORED.len() + FORWARDED.len()),
                blocked: Some(old_mask),
                _lock: lock,
            })
        }

        /// Ignore interactive signals, relay termination to `child`, then
        /// unblock. Signals that arrived in the meantime are handled now.
        pub fn forward_to(&mut self, child: u32) -> nix::Result<()> {
            let pid = i32::try_from(child).map_err(|_| nix::Error::EINVAL)?;
            CHILD_PID.store(pid, Ordering::SeqCst);

            let ignore = SigAction::new(SigHandler::SigIgn, SaFlags::empty(), SigSet::empty());
            let relay = SigAction::new(
                SigHandler::Handler(forward),
                SaFlags::SA_RESTART,
                SigSet::empty(),
            );

            for sig in IGNORED {
                // SAFETY: SigIgn runs no code in the handler
                let old = unsafe { signal::sigaction(sig, &ignore) }?;
                self.previous.push((sig, old));
            }
            for sig in FORWARDED {
                // SAFETY: `forward` only reads an atomic and calls kill(2)
                let old = unsafe { signal::sigaction(sig, &relay) }?;
                self.previous.push((sig, old));
            }

            if let Some(mask) = self.blocked.take() {
                mask.thread_set_mask()?;
            }

            debug!("Forwarding SIGTERM/SIGHUP to pid {pid}");
            Ok(())
        }
    }

    impl Drop for ForwardingGuard {
        fn drop(&mut self) {
            for (sig, old) in self.previous.drain(..).rev() {
                // SAFETY: restores a disposition previously returned by sigaction
                if let Err(e) = unsafe { signal::sigaction(sig, &old) } {
                    debug!("Failed to restore {sig}: {e}");
                }
            }
            CHILD_PID.store(0, Ordering::SeqCst);

            // Only reached when forwarding never started; pending signals
            // now get the original dispositions
            if let Some(mask) = self.blocked.take() {
                if let Err(e) = mask.thread_set_mask() {
                    debug!("Failed to restore the signal mask: {e}");
                }
            }
        }
    }

}

#[cfg(not(unix))]
mod fallback {
    /// No dispositions to manage on this platform.
    #[derive(Debug)]
    pub struct ForwardingGuard;

    impl ForwardingGuard {
        pub fn block() -> std::io::Result<Self> {
            Ok(Self)
        }

        pub fn forward_to(&mut self, _child: u32) -> std::io::Result<()> {
            Ok(())
        }
    }
}
