//! Global root logger and level macros
//!
//! The root is process-wide, so everything touching it lives in one test.

use std::io::{self, Write};
use std::sync::Arc;

use linelog_core::{global, Decorator, Filter, Level, Logger, TsFormat};
use parking_lot::Mutex;

#[derive(Clone, Default)]
struct Capture(Arc<Mutex<Vec<u8>>>);

impl Write for Capture {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn test_macros_log_through_root() {
    let capture = Capture::default();
    global::set_root(
        Logger::decorated(capture.clone(), Decorator::bracketed(TsFormat::NONE))
            .with_filter(Filter::ALL),
    );

    linelog_core::info!("server starting");
    linelog_core::warn!(domain: "tls", "certificate expires in {} days", 3);
    {
        let _scope = global::scoped_domain("db");
        linelog_core::debug!("pool size {}", 8);
        linelog_core::error!(domain: "conn", "refused");
    }
    linelog_core::trace!("tick");
    linelog_core::log!(Level::Info, "progress: ");
    global::print("50%");
    linelog_core::fatal!("giving up");
    global::close();

    let text = String::from_utf8(capture.0.lock().clone()).unwrap();
    assert_eq!(
        text,
        "[INFO] server starting\n\
         [WARN:tls] certificate expires in 3 days\n\
         [DBUG:db] pool size 8\n\
         [ERR!:db:conn] refused\n\
         [TRCE] tick\n\
         [INFO] progress: 50%\n\
         [FATAL!] giving up\n"
    );
}
