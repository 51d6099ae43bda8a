use std::thread;
use std::time::Duration;

use log::debug;

/// Waits between survey iterations.
pub trait Pacer {
    fn pause(&mut self, duration: Duration);
}

/// Blocks the current thread.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadPacer;

impl Pacer for ThreadPacer {
    fn pause(&mut self, duration: Duration) {
        debug!("Sleeping for {:?}", duration);
        thread::sleep(duration);
    }
}

/// Remembers requested pauses without waiting.
#[derive(Debug, Default, Clone)]
pub struct RecordingPacer {
    pub pauses: Vec<Duration>,
}

impl Pacer for RecordingPacer {
    fn pause(&mut self, duration: Duration) {
        self.pauses.push(duration);
    }
}
