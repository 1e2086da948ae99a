use std::fs;
use std::io;
use std::path::Path;

static INIT_ONCE: std::sync::Once = std::sync::Once::new();
pub fn init_tracing_once() {
    INIT_ONCE.call_once(|| {
        let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
        let _ = tracing_subscriber::fmt().with_env_filter(env_filter).try_init();
    });
}

/// Replace `dest` with `tmp`, falling back to copy+remove when the rename
/// fails (cross-device moves, Windows sharing violations).
pub fn replace_file_atomic(tmp: &Path, dest: &Path) -> io::Result<()> {
    match fs::rename(tmp, dest) {
        Ok(()) => Ok(()),
        Err(_) => {
            fs::copy(tmp, dest)?;
            fs::remove_file(tmp)?;
            Ok(())
        }
    }
}
