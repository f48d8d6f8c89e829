//! Copy async byte streams into the logger.

use std::io::{self, Write};

use linelog_core::{Level, LevelWriter, SharedLogger};
use tokio::io::{AsyncRead, AsyncReadExt};

const CHUNK_SIZE: usize = 8 * 1024;

/// Feed everything `reader` produces into `logger` at `level`/`domain`.
///
/// Reads are forwarded as they arrive, whatever their size; the logger takes
/// care of line boundaries. Nothing is logged for an empty stream.
pub async fn pump<R>(
    mut reader: R,
    logger: SharedLogger,
    level: Level,
    domain: &str,
) -> io::Result<u64>
where
    R: AsyncRead + Unpin,
{
    let mut buf = vec![0u8; CHUNK_SIZE];
    let mut writer = LevelWriter::new(logger, level, domain);
    let mut total = 0u64;

    loop {
        let n = reader.read(&mut buf).await?;
        if n == 0 {
            break;
        }
        total += n as u64;
        writer.write_all(&buf[..n])?;
        writer.flush()?;
    }

    writer.finish();
    Ok(total)
}
