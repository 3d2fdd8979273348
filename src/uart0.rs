//! UART0 console input shim.
//!
//! The console UART is owned by the SDK's stdio, so it cannot be opened
//! as a regular UART driver. Instead, the task that services UART0 pushes
//! received bytes into [`STDIN_RING`], and application code reads them
//! back through [`Uart0`].
//!
//! ```text
//! UART0 RX task          StdinRing            Uart0 reader
//! ─────────────          ─────────            ────────────
//! push(byte) ─────────▶ [b0][b1][b2] ───────▶ any() / read()
//!                        lock-free SPSC
//! ```

use core::cell::UnsafeCell;
use core::sync::atomic::{AtomicU32, Ordering};

/// Default ring size (bytes).
pub const STDIN_RING_SIZE: usize = 256;

/// Lock-free single-producer / single-consumer byte ring.
///
/// Push never blocks; when the ring is full the byte is dropped and
/// counted.
pub struct StdinRing<const N: usize = STDIN_RING_SIZE> {
    buf: UnsafeCell<[u8; N]>,
    write_idx: AtomicU32,
    read_idx: AtomicU32,
    dropped: AtomicU32,
}

// SAFETY: Single producer writes only the slot at write_idx before
// publishing it; single consumer reads only published slots.
unsafe impl<const N: usize> Sync for StdinRing<N> {}
unsafe impl<const N: usize> Send for StdinRing<N> {}

impl<const N: usize> StdinRing<N> {
    const MASK: usize = N - 1;

    pub const fn new() -> Self {
        assert!(N.is_power_of_two(), "Stdin ring size must be power of 2");

        Self {
            buf: UnsafeCell::new([0; N]),
            write_idx: AtomicU32::new(0),
            read_idx: AtomicU32::new(0),
            dropped: AtomicU32::new(0),
        }
    }

    /// Push a received byte (producer side).
    ///
    /// Returns `false` if the ring was full and the byte was dropped.
    #[inline]
    pub fn push(&self, byte: u8) -> bool {
        let write = self.write_idx.load(Ordering::Relaxed);
        let read = self.read_idx.load(Ordering::Acquire);

        if write.wrapping_sub(read) >= N as u32 {
            self.dropped.fetch_add(1, Ordering::Relaxed);
            return false;
        }

        // SAFETY: Only the producer touches the slot at write_idx until
        // the Release store below publishes it.
        unsafe {
            (*self.buf.get())[(write as usize) & Self::MASK] = byte;
        }
        self.write_idx.store(write.wrapping_add(1), Ordering::Release);
        true
    }

    /// Push a slice, returning how many bytes were accepted.
    pub fn push_slice(&self, bytes: &[u8]) -> usize {
        bytes.iter().take_while(|b| self.push(**b)).count()
    }

    /// Pop the oldest byte (consumer side).
    #[inline]
    pub fn pop(&self) -> Option<u8> {
        let read = self.read_idx.load(Ordering::Relaxed);
        let write = self.write_idx.load(Ordering::Acquire);

        if read == write {
            return None;
        }

        // SAFETY: Slot was published by the producer, single consumer.
        let byte = unsafe { (*self.buf.get())[(read as usize) & Self::MASK] };
        self.read_idx.store(read.wrapping_add(1), Ordering::Release);
        Some(byte)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.read_idx.load(Ordering::Relaxed) == self.write_idx.load(Ordering::Acquire)
    }

    /// Number of bytes waiting.
    #[inline]
    pub fn pending(&self) -> u32 {
        let read = self.read_idx.load(Ordering::Relaxed);
        let write = self.write_idx.load(Ordering::Acquire);
        write.wrapping_sub(read)
    }

    /// Bytes dropped because the ring was full.
    #[inline]
    pub fn dropped(&self) -> u32 {
        self.dropped.load(Ordering::Relaxed)
    }
}

impl<const N: usize> Default for StdinRing<N> {
    fn default() -> Self {
        Self::new()
    }
}

/// Console input fed by the UART0 RX task.
pub static STDIN_RING: StdinRing = StdinRing::new();

/// Reader over a [`StdinRing`].
#[derive(Clone, Copy)]
pub struct Uart0<'r, const N: usize = STDIN_RING_SIZE> {
    ring: &'r StdinRing<N>,
}

impl Uart0<'static> {
    /// The UART0 reader over [`STDIN_RING`].
    pub fn take() -> Self {
        Self { ring: &STDIN_RING }
    }
}

impl<'r, const N: usize> Uart0<'r, N> {
    pub fn new(ring: &'r StdinRing<N>) -> Self {
        Self { ring }
    }

    /// Input is waiting.
    pub fn any(&self) -> bool {
        !self.ring.is_empty()
    }

    /// Read one byte, `None` if nothing is waiting.
    pub fn read(&self) -> Option<u8> {
        self.ring.pop()
    }

    /// Read up to `buf.len()` bytes without blocking.
    pub fn read_into(&self, buf: &mut [u8]) -> usize {
        let mut n = 0;
        while n < buf.len() {
            match self.ring.pop() {
                Some(b) => {
                    buf[n] = b;
                    n += 1;
                }
                None => break,
            }
        }
        n
    }
}

impl<const N: usize> core::fmt::Display for Uart0<'_, N> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("UART0")
    }
}
