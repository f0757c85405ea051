use std::io::{self, Write};
use std::sync::{Mutex, OnceLock};

/// Output sink behind the printing built-ins and console helpers. Swapping it
/// lets an embedder or a test observe program output without touching the
/// process stdout.
pub trait Platform: Send + Sync {
    fn write_out(&self, bytes: &[u8]);
    fn flush_out(&self);
}

pub struct StdPlatform;

impl Platform for StdPlatform {
    fn write_out(&self, bytes: &[u8]) {
        let _ = io::stdout().lock().write_all(bytes);
    }

    fn flush_out(&self) {
        let _ = io::stdout().flush();
    }
}

/// Collects everything written to it. Used by embedders that want the
/// program's output as a buffer.
#[derive(Default)]
pub struct BufferPlatform {
    buffer: Mutex<Vec<u8>>,
}

impl BufferPlatform {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contents(&self) -> Vec<u8> {
        match self.buffer.lock() {
            Ok(buffer) => buffer.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn contents_lossy(&self) -> String {
        String::from_utf8_lossy(&self.contents()).into_owned()
    }
}

impl Platform for BufferPlatform {
    fn write_out(&self, bytes: &[u8]) {
        let mut buffer = match self.buffer.lock() {
            Ok(buffer) => buffer,
            Err(poisoned) => poisoned.into_inner(),
        };
        buffer.extend_from_slice(bytes);
    }

    fn flush_out(&self) {}
}

impl<P: Platform + ?Sized> Platform for &'static P {
    fn write_out(&self, bytes: &[u8]) {
        (**self).write_out(bytes)
    }

    fn flush_out(&self) {
        (**self).flush_out()
    }
}

fn default_platform() -> Box<dyn Platform> {
    Box::new(StdPlatform)
}

static PLATFORM: OnceLock<Box<dyn Platform>> = OnceLock::new();

pub fn platform() -> &'static dyn Platform {
    PLATFORM.get_or_init(default_platform).as_ref()
}

/// Must run before the first write; afterwards the active platform is fixed
/// and the rejected one is handed back.
pub fn install_platform<P: Platform + 'static>(platform: P) -> Result<(), Box<dyn Platform>> {
    PLATFORM.set(Box::new(platform))
}
