//! tmctl shell script rendering and output

use std::io::Write;
use std::path::Path;

use crate::translator::Command;
use crate::{Error, Result};

/// Program every script line invokes
pub const TMCTL: &str = "tmctl";

/// Output target meaning standard output
pub const STDOUT_TARGET: &str = "-";

/// Render commands as a script, one newline-terminated invocation per line
pub fn render_script(commands: &[Command]) -> String {
    commands
        .iter()
        .map(|command| format!("{} {}\n", TMCTL, command))
        .collect()
}

/// Write the rendered script to `target`, or to stdout when it is `-`
pub fn write_script(commands: &[Command], target: &Path) -> Result<()> {
    let script = render_script(commands);

    if target == Path::new(STDOUT_TARGET) {
        let mut stdout = std::io::stdout().lock();
        return stdout
            .write_all(script.as_bytes())
            .and_then(|_| stdout.flush())
            .map_err(|e| Error::io("<stdout>", e));
    }

    std::fs::write(target, script).map_err(|e| Error::io(target, e))
}
